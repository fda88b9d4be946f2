pub mod app_config;
pub mod config;
pub mod platform;
pub mod profiles;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use platform::Platform;
pub use profiles::{InstagramProfile, LinkedInProfile, ProfileRecord};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
