//! Trading platform selection and gateway URLs.

use std::str::FromStr;

use crate::error::ConfigError;

/// Live gateway base URL.
pub const LIVE_API_URL: &str = "https://api.ig.com/gateway/deal";

/// Demo gateway base URL.
pub const DEMO_API_URL: &str = "https://demo-api.ig.com/gateway/deal";

/// Which IG trading platform to talk to.
///
/// Credentials are platform-specific: a demo API key is rejected by the live
/// gateway and vice versa.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Platform {
    #[default]
    Live,
    Demo,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Demo => "demo",
        }
    }

    /// Gateway base URL for this platform.
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Live => LIVE_API_URL,
            Self::Demo => DEMO_API_URL,
        }
    }
}

impl FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "live" => Ok(Self::Live),
            "demo" => Ok(Self::Demo),
            other => Err(ConfigError::UnknownPlatform(other.to_string())),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_base_urls() {
        assert_eq!(Platform::Live.base_url(), "https://api.ig.com/gateway/deal");
        assert_eq!(
            Platform::Demo.base_url(),
            "https://demo-api.ig.com/gateway/deal"
        );
    }

    #[test]
    fn test_platform_from_str() {
        assert_eq!("live".parse::<Platform>().unwrap(), Platform::Live);
        assert_eq!("demo".parse::<Platform>().unwrap(), Platform::Demo);
        assert!("staging".parse::<Platform>().is_err());
    }

    #[test]
    fn test_platform_default_is_live() {
        assert_eq!(Platform::default(), Platform::Live);
    }
}
