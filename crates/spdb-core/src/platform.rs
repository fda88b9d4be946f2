use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A social platform whose profile pages can be extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    LinkedIn,
    Instagram,
}

impl Platform {
    /// Every supported platform, in the order they are advertised to clients.
    pub const ALL: [Platform; 2] = [Platform::LinkedIn, Platform::Instagram];

    /// The lowercase wire tag, e.g. `"linkedin"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::LinkedIn => "linkedin",
            Platform::Instagram => "instagram",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linkedin" => Ok(Platform::LinkedIn),
            "instagram" => Ok(Platform::Instagram),
            other => Err(CoreError::UnsupportedPlatform(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_serde_tag() {
        for platform in Platform::ALL {
            let json = serde_json::to_string(&platform).unwrap();
            assert_eq!(json, format!("\"{platform}\""));
        }
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("LinkedIn".parse::<Platform>().unwrap(), Platform::LinkedIn);
        assert_eq!(" instagram ".parse::<Platform>().unwrap(), Platform::Instagram);
    }

    #[test]
    fn from_str_rejects_unknown_platform() {
        let err = "myspace".parse::<Platform>().unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedPlatform(ref p) if p == "myspace"));
    }
}
