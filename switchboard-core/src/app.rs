//! Application facade tying parsing, dispatch and output together.

use std::io::Write;

use crate::command::Command;
use crate::config::{AppInfo, EngineConfig, Settings};
use crate::discovery::Discovery;
use crate::dispatcher::{Dispatch, Dispatcher};
use crate::error::Result;
use crate::help::{HelpRenderer, LinearHelpRenderer};
use crate::instantiate::{DefaultInstantiator, Instantiator};
use crate::parser::{ArgumentParser, DefaultArgumentParser};
use crate::registry::{CommandEntry, RegistryBuilder};

/// A configured command-line application.
pub struct Application {
    parser: Box<dyn ArgumentParser>,
    dispatcher: Dispatcher,
}

impl Application {
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::default()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Parse `args`, dispatch, and write help text or command output to `out`.
    pub fn run<W: Write>(&self, args: &[String], out: &mut W) -> Result<Dispatch> {
        let invocation = self.parser.parse(args);
        let outcome = self.dispatcher.dispatch(&invocation)?;

        match &outcome {
            Dispatch::Completed(output) => writeln!(out, "{}", output.output)?,
            Dispatch::Help(text) => write!(out, "{}", text)?,
            Dispatch::Quit => {}
        }
        out.flush()?;

        Ok(outcome)
    }
}

/// Builder for [`Application`]; every collaborator has a default.
pub struct ApplicationBuilder {
    parser: Box<dyn ArgumentParser>,
    instantiator: Box<dyn Instantiator>,
    renderer: Box<dyn HelpRenderer>,
    config: EngineConfig,
    app: Option<AppInfo>,
    registry: RegistryBuilder,
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self {
            parser: Box::new(DefaultArgumentParser),
            instantiator: Box::new(DefaultInstantiator),
            renderer: Box::new(LinearHelpRenderer::new()),
            config: EngineConfig::default(),
            app: None,
            registry: RegistryBuilder::default(),
        }
    }
}

impl ApplicationBuilder {
    pub fn app(mut self, app: AppInfo) -> Self {
        self.app = Some(app);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Apply a loaded settings file; app info is only replaced when present
    pub fn settings(mut self, settings: Settings) -> Self {
        if settings.app.is_some() {
            self.app = settings.app;
        }
        self.config = settings.engine;
        self
    }

    pub fn parser(mut self, parser: impl ArgumentParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    pub fn instantiator(mut self, instantiator: impl Instantiator + 'static) -> Self {
        self.instantiator = Box::new(instantiator);
        self
    }

    pub fn help_renderer(mut self, renderer: impl HelpRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn command<C: Command + Default>(mut self) -> Self {
        self.registry = self.registry.register::<C>();
        self
    }

    pub fn entry(mut self, entry: CommandEntry) -> Self {
        self.registry = self.registry.entry(entry);
        self
    }

    pub fn discover(mut self, source: &dyn Discovery, scope: &str) -> Result<Self> {
        self.registry = self.registry.discover(source, scope)?;
        Ok(self)
    }

    pub fn build(self) -> Application {
        let registry = self.registry.build(&self.config);
        let dispatcher = Dispatcher::new(registry, self.config)
            .with_app(self.app)
            .with_instantiator(self.instantiator)
            .with_help_renderer(self.renderer);

        Application {
            parser: self.parser,
            dispatcher,
        }
    }
}
