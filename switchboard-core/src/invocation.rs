//! The parsed form of a single command-line call.

use std::collections::HashMap;

/// Lowercase and trim a command name or key.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// A normalized command-line call: the command name plus its parameters and flags.
///
/// A key is held in at most one of the two maps. Lookups normalize the key,
/// so `parameter("Name")` and `parameter("name")` are equivalent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    command: Option<String>,
    parameters: HashMap<String, String>,
    flags: HashMap<String, bool>,
}

impl Invocation {
    /// Create an empty invocation with no command
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an invocation targeting the given command
    pub fn for_command(command: &str) -> Self {
        Self {
            command: Some(normalize(command)),
            ..Self::default()
        }
    }

    /// Add a parameter, replacing any flag recorded under the same key
    pub fn with_parameter(mut self, key: &str, value: &str) -> Self {
        self.put_parameter(key, value);
        self
    }

    /// Add a flag, replacing any parameter recorded under the same key
    pub fn with_flag(mut self, key: &str, value: bool) -> Self {
        self.put_flag(key, value);
        self
    }

    pub(crate) fn set_command(&mut self, command: &str) {
        self.command = Some(normalize(command));
    }

    pub(crate) fn put_parameter(&mut self, key: &str, value: &str) {
        let key = normalize(key);
        self.flags.remove(&key);
        self.parameters.insert(key, value.to_string());
    }

    pub(crate) fn put_flag(&mut self, key: &str, value: bool) {
        let key = normalize(key);
        self.parameters.remove(&key);
        self.flags.insert(key, value);
    }

    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(&normalize(key)).map(String::as_str)
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        self.flags.get(&normalize(key)).copied()
    }

    pub fn parameters(&self) -> &HashMap<String, String> {
        &self.parameters
    }

    pub fn flags(&self) -> &HashMap<String, bool> {
        &self.flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_trims() {
        assert_eq!(normalize("  Deploy "), "deploy");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn lookups_are_case_insensitive() {
        let invocation = Invocation::for_command(" Hello ")
            .with_parameter("Name", "World")
            .with_flag("FORMAL", true);

        assert_eq!(invocation.command(), Some("hello"));
        assert_eq!(invocation.parameter("name"), Some("World"));
        assert_eq!(invocation.parameter(" NAME "), Some("World"));
        assert_eq!(invocation.flag("formal"), Some(true));
        assert_eq!(invocation.flag("missing"), None);
    }

    #[test]
    fn key_lives_in_one_map_only() {
        let invocation = Invocation::for_command("cmd")
            .with_parameter("mode", "fast")
            .with_flag("mode", false);

        assert_eq!(invocation.parameter("mode"), None);
        assert_eq!(invocation.flag("mode"), Some(false));

        let invocation = invocation.with_parameter("mode", "slow");
        assert_eq!(invocation.flag("mode"), None);
        assert_eq!(invocation.parameter("mode"), Some("slow"));
    }

    #[test]
    fn empty_invocation_has_nothing() {
        let invocation = Invocation::new();
        assert!(invocation.command().is_none());
        assert!(invocation.parameters().is_empty());
        assert!(invocation.flags().is_empty());
    }
}
