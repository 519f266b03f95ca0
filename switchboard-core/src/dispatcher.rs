//! Resolution and execution of a parsed invocation.

use tracing::{debug, info};

use crate::binder;
use crate::command::CommandOutput;
use crate::config::{AppInfo, EngineConfig};
use crate::error::DispatchError;
use crate::help::{HelpRenderer, HelpRequest, LinearHelpRenderer};
use crate::instantiate::{DefaultInstantiator, Instantiator};
use crate::invocation::Invocation;
use crate::registry::Registry;

/// Parameter of the help command naming a single command to describe.
const HELP_FOCUS: (&str, &str) = ("command", "c");

/// How a dispatch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The command ran, or failed to bind; the output says which
    Completed(CommandOutput),
    /// Help was requested; holds the rendered text
    Help(String),
    /// A quit token was given. The host should stop.
    Quit,
}

pub struct Dispatcher {
    registry: Registry,
    config: EngineConfig,
    app: Option<AppInfo>,
    instantiator: Box<dyn Instantiator>,
    renderer: Box<dyn HelpRenderer>,
}

impl Dispatcher {
    pub fn new(registry: Registry, config: EngineConfig) -> Self {
        Self {
            registry,
            config,
            app: None,
            instantiator: Box::new(DefaultInstantiator),
            renderer: Box::new(LinearHelpRenderer::new()),
        }
    }

    pub fn with_app(mut self, app: Option<AppInfo>) -> Self {
        self.app = app;
        self
    }

    pub fn with_instantiator(mut self, instantiator: Box<dyn Instantiator>) -> Self {
        self.instantiator = instantiator;
        self
    }

    pub fn with_help_renderer(mut self, renderer: Box<dyn HelpRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Resolve, bind and run the invocation's command.
    ///
    /// Binding failures come back as a failed [`CommandOutput`]; only
    /// resolution, instantiation and help rendering produce an `Err`.
    pub fn dispatch(&self, invocation: &Invocation) -> Result<Dispatch, DispatchError> {
        let command = invocation.command().unwrap_or_default();

        if command.is_empty() || self.config.is_help(command) {
            let focus = invocation
                .parameter(HELP_FOCUS.0)
                .or_else(|| invocation.parameter(HELP_FOCUS.1));
            return self.render_help(focus).map(Dispatch::Help);
        }

        if self.config.is_quit(command) {
            debug!(command, "quit requested");
            return Ok(Dispatch::Quit);
        }

        let entry = self.registry.resolve(command)?;
        let descriptor = entry.descriptor();
        let mut instance = self.instantiator.instantiate(entry)?;

        if let Err(err) = binder::bind(instance.as_mut(), descriptor, invocation) {
            debug!(command = %descriptor.name, error = %err, "failed to bind arguments");
            return Ok(Dispatch::Completed(CommandOutput::failure(err.to_string())));
        }

        let output = instance.run();
        info!(command = %descriptor.name, success = output.success, "command finished");

        Ok(Dispatch::Completed(output))
    }

    /// Describe every registered command.
    pub fn help_request(&self) -> HelpRequest {
        HelpRequest {
            app: self.app.clone(),
            commands: self.registry.descriptors().cloned().collect(),
            focus: None,
            help_tokens: self.config.help_tokens.clone(),
            quit_tokens: self.config.quit_tokens.clone(),
        }
    }

    /// Render help for all commands, or for the one addressed by `focus`
    pub fn render_help(&self, focus: Option<&str>) -> Result<String, DispatchError> {
        let mut request = self.help_request();
        if let Some(name) = focus {
            request.focus = Some(self.registry.resolve(name)?.descriptor().clone());
        }

        Ok(self.renderer.render(&request)?)
    }
}
