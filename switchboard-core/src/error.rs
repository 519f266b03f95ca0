//! Error types for the Switchboard engine.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while populating a command's fields from an invocation.
///
/// These never escape the dispatcher: they are folded into a failed
/// [`CommandOutput`](crate::CommandOutput) instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    #[error("Missing required parameter: {0}")]
    MissingRequiredParameter(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValueFormat { field: String, value: String },

    #[error("Unsupported field type for {0}")]
    UnsupportedFieldType(String),

    /// The descriptor declares a field the command has no accessor for
    #[error("No accessor registered for field: {0}")]
    UnknownField(String),
}

/// Failures creating a fresh command instance.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstantiationError {
    #[error("Command '{0}' has no parameterless constructor")]
    NoConstructor(String),

    #[error("Cannot instantiate command '{command}': {reason}")]
    Failed { command: String, reason: String },
}

/// Failures resolving or preparing the target command.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("Ambiguous command '{command}'. Matches: {}", .candidates.join(", "))]
    AmbiguousCommand {
        command: String,
        candidates: Vec<String>,
    },

    #[error(transparent)]
    Instantiation(#[from] InstantiationError),

    #[error("Failed to render help: {0}")]
    Render(#[from] RenderError),
}

/// Failures producing help text.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Format error: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Failures loading settings or manifests.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
