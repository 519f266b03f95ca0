//! Creation of fresh command instances.

use crate::command::Instance;
use crate::error::InstantiationError;
use crate::registry::CommandEntry;

/// Produces a new, unbound instance for a registered command.
pub trait Instantiator: Send + Sync {
    fn instantiate(&self, entry: &CommandEntry) -> Result<Box<dyn Instance>, InstantiationError>;
}

/// Uses the constructor recorded on the entry at registration time.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultInstantiator;

impl Instantiator for DefaultInstantiator {
    fn instantiate(&self, entry: &CommandEntry) -> Result<Box<dyn Instance>, InstantiationError> {
        let factory = entry
            .factory()
            .ok_or_else(|| InstantiationError::NoConstructor(entry.descriptor().name.clone()))?;

        factory()
    }
}
