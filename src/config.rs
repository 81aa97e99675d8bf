//! Configuration loading — TOML file with environment fallback.
//!
//! The config file (default `~/.igindex.toml`) selects a platform and holds
//! per-platform credentials:
//!
//! ```toml
//! [platform]
//! default = "demo"
//!
//! [auth.demo]
//! api_key = "..."
//! username = "..."
//! password = "..."
//! ```
//!
//! A missing file is not an error. Any credential the file does not provide
//! is looked up in `IG_API_KEY` / `IG_USERNAME` / `IG_PASSWORD`; a value
//! found in neither place is. The platform resolves in the same order:
//! explicit override, file, `IG_PLATFORM`, then `live`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::auth::ApiCredentials;
use crate::error::ConfigError;
use crate::network::Platform;

pub const DEFAULT_CONFIG_FILE: &str = ".igindex.toml";

/// Resolved configuration: a platform and the credentials to use on it.
#[derive(Debug, Clone)]
pub struct Config {
    pub platform: Platform,
    pub credentials: ApiCredentials,
}

// ─── File schema ─────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    platform: PlatformSection,
    #[serde(default)]
    auth: HashMap<String, AuthSection>,
}

#[derive(Debug, Default, Deserialize)]
struct PlatformSection {
    default: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AuthSection {
    api_key: Option<String>,
    username: Option<String>,
    password: Option<String>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };
        toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }
}

// ─── Resolution ──────────────────────────────────────────────────────────────

/// Default config file path: `$HOME/.igindex.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(DEFAULT_CONFIG_FILE))
}

/// Load configuration from `path` (or the default location), overlaying
/// environment fallbacks.
pub fn load(path: Option<&Path>, platform_override: Option<Platform>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(p) => FileConfig::load(p)?,
        None => match default_config_path() {
            Some(p) => FileConfig::load(&p)?,
            None => FileConfig::default(),
        },
    };

    let platform = match platform_override {
        Some(p) => p,
        None => match file.platform.default.as_deref() {
            Some(name) => name.parse()?,
            None => match std::env::var("IG_PLATFORM") {
                Ok(name) => name.parse()?,
                Err(_) => Platform::default(),
            },
        },
    };

    let auth = file.auth.get(platform.as_str());

    let resolve = |file_value: Option<&String>,
                   field: &'static str,
                   env_var: &'static str|
     -> Result<String, ConfigError> {
        if let Some(v) = file_value {
            return Ok(v.clone());
        }
        std::env::var(env_var).map_err(|_| ConfigError::MissingCredential { field, env_var })
    };

    let credentials = ApiCredentials {
        api_key: resolve(auth.and_then(|a| a.api_key.as_ref()), "api_key", "IG_API_KEY")?,
        username: resolve(
            auth.and_then(|a| a.username.as_ref()),
            "username",
            "IG_USERNAME",
        )?,
        password: resolve(
            auth.and_then(|a| a.password.as_ref()),
            "password",
            "IG_PASSWORD",
        )?,
    };

    Ok(Config {
        platform,
        credentials,
    })
}
