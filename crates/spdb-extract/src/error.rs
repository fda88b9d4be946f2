use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The submitted request failed validation; every problem found is listed.
    #[error("invalid request: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("unsupported platform or invalid URL: {url}")]
    UnsupportedPlatform { url: String },
}

impl ExtractError {
    /// Human-readable problems suitable for an API `errors` array.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        match self {
            ExtractError::Validation(errors) => errors.clone(),
            other => vec![other.to_string()],
        }
    }
}
