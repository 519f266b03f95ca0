//! Engine and application configuration.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::invocation::normalize;

/// Reserved control tokens. None of these can address a user command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tokens that show help
    pub help_tokens: Vec<String>,

    /// Tokens that ask the host to stop
    pub quit_tokens: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            help_tokens: vec!["help".to_string(), "h".to_string()],
            quit_tokens: vec!["quit".to_string(), "exit".to_string(), "q".to_string()],
        }
    }
}

impl EngineConfig {
    pub fn is_help(&self, token: &str) -> bool {
        contains(&self.help_tokens, token)
    }

    pub fn is_quit(&self, token: &str) -> bool {
        contains(&self.quit_tokens, token)
    }

    pub fn is_reserved(&self, token: &str) -> bool {
        self.is_help(token) || self.is_quit(token)
    }
}

fn contains(tokens: &[String], token: &str) -> bool {
    let token = normalize(token);
    tokens.iter().any(|t| normalize(t) == token)
}

/// Descriptive information about the host application, shown in help output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl AppInfo {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// Settings file contents.
///
/// ```toml
/// [app]
/// name = "toolbox"
/// version = "1.2.0"
///
/// [engine]
/// help_tokens = ["help", "h", "?"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: Option<AppInfo>,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        content.parse()
    }
}

impl FromStr for Settings {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}
