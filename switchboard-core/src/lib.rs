//! Declarative command invocation engine.
//!
//! Commands describe their parameters and flags with a [`Schema`]. The engine
//! tokenizes raw arguments into an [`Invocation`], resolves the target command
//! in a [`Registry`], binds values into the command's fields with type
//! coercion and runs it, returning a [`CommandOutput`].

mod app;
pub mod binder;
mod command;
mod config;
mod descriptor;
pub mod discovery;
mod dispatcher;
mod error;
pub mod help;
mod instantiate;
mod invocation;
pub mod parser;
mod registry;

pub use app::{Application, ApplicationBuilder};
pub use command::{Bound, Command, CommandOutput, FieldType, Flag, Instance, Param, Schema};
pub use config::{AppInfo, EngineConfig, Settings};
pub use descriptor::{
    CommandDescriptor, CommandManifest, FieldDescriptor, FieldKind, FieldValue, ValueType,
};
pub use discovery::{Catalog, Discovery, ManifestDiscovery};
pub use dispatcher::{Dispatch, Dispatcher};
pub use error::{
    BindError, ConfigError, DispatchError, Error, InstantiationError, RenderError, Result,
};
pub use help::{HelpRenderer, HelpRequest, JsonHelpRenderer, LinearHelpRenderer};
pub use instantiate::{DefaultInstantiator, Instantiator};
pub use invocation::{normalize, Invocation};
pub use parser::{parse_args, ArgumentParser, DefaultArgumentParser};
pub use registry::{CommandEntry, Factory, Registry, RegistryBuilder};

/// Prelude module for commonly used types
pub mod prelude {
    pub use crate::{
        Application,
        Command,
        CommandOutput,
        Dispatch,
        Flag,
        Param,
        Schema,
    };
}
