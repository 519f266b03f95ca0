//! Static metadata describing commands and their fields.
//!
//! Descriptors are plain data. They are produced by a command's [`Schema`](crate::Schema)
//! or loaded from a TOML [`CommandManifest`], and the engine only ever reads them.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::invocation::normalize;

/// Declared type of a command field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Int,
    Long,
    Float,
    Double,
    Bool,
}

/// A coerced value ready to be written into a command field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
}

/// Whether a field is a valued parameter or a boolean flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldKind {
    Parameter {
        #[serde(default)]
        required: bool,
        /// Raw default, coerced like a supplied value
        #[serde(default)]
        default: String,
    },
    Flag {
        #[serde(default)]
        default: bool,
    },
}

/// Metadata for one bindable field of a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub fn is_flag(&self) -> bool {
        matches!(self.kind, FieldKind::Flag { .. })
    }

    pub fn is_required(&self) -> bool {
        matches!(self.kind, FieldKind::Parameter { required: true, .. })
    }

    /// The short alias, if one is declared and non-blank
    pub fn short(&self) -> Option<&str> {
        self.short_name.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Metadata for a command: how it is addressed and which fields it binds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl CommandDescriptor {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            short_name: None,
            description: String::new(),
            fields: Vec::new(),
        }
    }

    /// The short alias, if one is declared and non-blank
    pub fn short(&self) -> Option<&str> {
        self.short_name.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Check whether this command is addressed by an already-normalized token
    pub fn answers_to(&self, token: &str) -> bool {
        normalize(&self.name) == token || self.short().is_some_and(|s| normalize(s) == token)
    }

    pub fn find_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn flags(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.is_flag())
    }

    pub fn parameters(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| !f.is_flag())
    }
}

/// A set of command descriptors stored as TOML.
///
/// ```toml
/// [[commands]]
/// name = "deploy"
/// short_name = "d"
/// description = "Deploy a build"
///
/// [[commands.fields]]
/// kind = "parameter"
/// name = "target"
/// type = "string"
/// required = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandManifest {
    #[serde(default)]
    pub commands: Vec<CommandDescriptor>,
}

impl CommandManifest {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        content.parse()
    }

    pub fn find_command(&self, name: &str) -> Option<&CommandDescriptor> {
        let token = normalize(name);
        self.commands.iter().find(|c| c.answers_to(&token))
    }
}

impl FromStr for CommandManifest {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}
