//! Sources of command entries.
//!
//! A [`Discovery`] hands out the commands belonging to a scope. Two sources
//! ship with the crate: an in-process [`Catalog`] and [`ManifestDiscovery`],
//! which reads descriptor-only commands from TOML manifests on disk.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::command::Command;
use crate::descriptor::CommandManifest;
use crate::error::Result;
use crate::registry::CommandEntry;

pub const MANIFEST_FILE: &str = "commands.toml";

/// Supplies the command entries registered under a scope.
pub trait Discovery {
    fn discover(&self, scope: &str) -> Result<Vec<CommandEntry>>;
}

/// Commands registered in code, grouped by scope.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    scopes: HashMap<String, Vec<CommandEntry>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<C: Command + Default>(self, scope: &str) -> Self {
        self.entry(scope, CommandEntry::of::<C>())
    }

    pub fn entry(mut self, scope: &str, entry: CommandEntry) -> Self {
        self.scopes.entry(scope.to_string()).or_default().push(entry);
        self
    }

    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scopes.keys().map(String::as_str)
    }
}

impl Discovery for Catalog {
    fn discover(&self, scope: &str) -> Result<Vec<CommandEntry>> {
        Ok(self.scopes.get(scope).cloned().unwrap_or_default())
    }
}

/// Loads `<root>/<scope>/commands.toml`.
#[derive(Debug, Clone)]
pub struct ManifestDiscovery {
    root: PathBuf,
}

impl ManifestDiscovery {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn manifest_path(&self, scope: &str) -> PathBuf {
        self.root.join(scope).join(MANIFEST_FILE)
    }
}

impl Discovery for ManifestDiscovery {
    fn discover(&self, scope: &str) -> Result<Vec<CommandEntry>> {
        let manifest = CommandManifest::load(self.manifest_path(scope))?;

        Ok(manifest
            .commands
            .into_iter()
            .map(CommandEntry::descriptor_only)
            .collect())
    }
}
