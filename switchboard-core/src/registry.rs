//! The read-only set of commands the dispatcher can resolve.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::command::{Bound, Command, Instance};
use crate::config::EngineConfig;
use crate::descriptor::CommandDescriptor;
use crate::discovery::Discovery;
use crate::error::{DispatchError, InstantiationError, Result};
use crate::invocation::normalize;

/// Produces a fresh command instance.
pub type Factory =
    Arc<dyn Fn() -> std::result::Result<Box<dyn Instance>, InstantiationError> + Send + Sync>;

/// A command descriptor and, when the command is runnable, how to create it.
#[derive(Clone)]
pub struct CommandEntry {
    descriptor: CommandDescriptor,
    factory: Option<Factory>,
}

impl CommandEntry {
    /// Entry for a command type with a parameterless constructor
    pub fn of<C: Command + Default>() -> Self {
        Self::with_constructor::<C, _>(|| Ok(C::default()))
    }

    /// Entry for a command type built by `ctor`
    pub fn with_constructor<C, F>(ctor: F) -> Self
    where
        C: Command,
        F: Fn() -> std::result::Result<C, InstantiationError> + Send + Sync + 'static,
    {
        let schema = Arc::new(C::schema());
        let descriptor = schema.descriptor().clone();
        let factory: Factory = Arc::new(move || {
            let command = ctor()?;
            Ok(Box::new(Bound::new(command, Arc::clone(&schema))) as Box<dyn Instance>)
        });

        Self {
            descriptor,
            factory: Some(factory),
        }
    }

    /// Entry that can be listed and resolved but not instantiated
    pub fn descriptor_only(descriptor: CommandDescriptor) -> Self {
        Self {
            descriptor,
            factory: None,
        }
    }

    pub fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    pub fn factory(&self) -> Option<&Factory> {
        self.factory.as_ref()
    }
}

impl fmt::Debug for CommandEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEntry")
            .field("descriptor", &self.descriptor)
            .field("runnable", &self.factory.is_some())
            .finish()
    }
}

/// Immutable command set, built once and shared by every dispatch.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<CommandEntry>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Build a registry, dropping entries whose name or short name is reserved
    pub fn new(config: &EngineConfig, entries: Vec<CommandEntry>) -> Self {
        let entries = entries
            .into_iter()
            .filter(|entry| {
                let descriptor = entry.descriptor();
                let reserved = config.is_reserved(&descriptor.name)
                    || descriptor.short().is_some_and(|s| config.is_reserved(s));
                if reserved {
                    warn!(
                        command = %descriptor.name,
                        "command uses a reserved name and will not be registered"
                    );
                }
                !reserved
            })
            .collect();

        Self { entries }
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.entries.iter().map(CommandEntry::descriptor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the single entry addressed by `command`
    pub fn resolve(&self, command: &str) -> std::result::Result<&CommandEntry, DispatchError> {
        let token = normalize(command);
        let matches: Vec<&CommandEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.descriptor().answers_to(&token))
            .collect();

        debug!(command = %token, matches = matches.len(), "resolving command");

        match matches.as_slice() {
            [] => Err(DispatchError::CommandNotFound(token)),
            [entry] => Ok(*entry),
            _ => Err(DispatchError::AmbiguousCommand {
                command: token,
                candidates: matches.iter().map(|e| e.descriptor().name.clone()).collect(),
            }),
        }
    }
}

/// Collects entries before the reserved-name filter is applied.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<CommandEntry>,
}

impl RegistryBuilder {
    pub fn register<C: Command + Default>(self) -> Self {
        self.entry(CommandEntry::of::<C>())
    }

    pub fn entry(mut self, entry: CommandEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn entries(mut self, entries: impl IntoIterator<Item = CommandEntry>) -> Self {
        self.entries.extend(entries);
        self
    }

    /// Add everything `source` offers for `scope`
    pub fn discover(self, source: &dyn Discovery, scope: &str) -> Result<Self> {
        let found = source.discover(scope)?;
        debug!(scope, count = found.len(), "discovered commands");
        Ok(self.entries(found))
    }

    pub fn build(self, config: &EngineConfig) -> Registry {
        Registry::new(config, self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandOutput, Schema};

    #[derive(Default)]
    struct Hello;

    impl Command for Hello {
        fn schema() -> Schema<Self> {
            Schema::new("hello").short_name("hi")
        }

        fn run(&mut self) -> CommandOutput {
            CommandOutput::success("hello")
        }
    }

    fn named(name: &str, short: Option<&str>) -> CommandEntry {
        let mut descriptor = CommandDescriptor::new(name);
        descriptor.short_name = short.map(str::to_string);
        CommandEntry::descriptor_only(descriptor)
    }

    #[test]
    fn resolves_by_name_or_short_name() {
        let registry = Registry::builder()
            .register::<Hello>()
            .build(&EngineConfig::default());

        assert_eq!(registry.resolve("hello").unwrap().descriptor().name, "hello");
        assert_eq!(registry.resolve(" HI ").unwrap().descriptor().name, "hello");
    }

    #[test]
    fn unknown_command() {
        let registry = Registry::builder()
            .register::<Hello>()
            .build(&EngineConfig::default());

        assert!(matches!(
            registry.resolve("goodbye"),
            Err(DispatchError::CommandNotFound(name)) if name == "goodbye"
        ));
    }

    #[test]
    fn duplicate_names_are_ambiguous() {
        let registry = Registry::builder()
            .entry(named("deploy", None))
            .entry(named("Deploy", Some("d")))
            .build(&EngineConfig::default());

        match registry.resolve("deploy") {
            Err(DispatchError::AmbiguousCommand { command, candidates }) => {
                assert_eq!(command, "deploy");
                assert_eq!(candidates, ["deploy", "Deploy"]);
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }

        // The short name alone is unique
        assert_eq!(registry.resolve("d").unwrap().descriptor().name, "Deploy");
    }

    #[test]
    fn short_name_colliding_with_other_name_is_ambiguous() {
        let registry = Registry::builder()
            .entry(named("st", None))
            .entry(named("status", Some("st")))
            .build(&EngineConfig::default());

        assert!(matches!(registry.resolve("st"), Err(DispatchError::AmbiguousCommand { .. })));
    }

    #[test]
    fn reserved_names_are_dropped() {
        let registry = Registry::builder()
            .entry(named("help", None))
            .entry(named("Quit", None))
            .entry(named("hello", Some("h")))
            .entry(named("status", Some("s")))
            .build(&EngineConfig::default());

        assert_eq!(registry.len(), 1);
        assert!(matches!(registry.resolve("help"), Err(DispatchError::CommandNotFound(_))));
        assert!(matches!(registry.resolve("hello"), Err(DispatchError::CommandNotFound(_))));
        assert!(registry.resolve("status").is_ok());
    }

    #[test]
    fn reserved_names_follow_config() {
        let config = EngineConfig {
            help_tokens: vec!["?".to_string()],
            quit_tokens: vec![],
        };
        let registry = Registry::builder()
            .entry(named("help", None))
            .entry(named("ask", Some("?")))
            .build(&config);

        assert_eq!(registry.len(), 1);
        assert!(registry.resolve("help").is_ok());
    }

    #[test]
    fn descriptor_only_entry_has_no_factory() {
        let entry = named("status", None);
        assert!(entry.factory().is_none());
        assert!(CommandEntry::of::<Hello>().factory().is_some());
    }
}
