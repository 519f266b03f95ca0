mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use switchboard_core::{
    AppInfo, Application, Dispatch, Error, JsonHelpRenderer, LinearHelpRenderer,
    ManifestDiscovery, Settings,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commands::{catalog, BUILTIN_SCOPE};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (TOML) with app info and reserved tokens
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of command manifests, read as <dir>/<scope>/commands.toml
    #[arg(long)]
    manifests: Option<PathBuf>,

    /// Manifest scope to load from --manifests
    #[arg(long, default_value = "default")]
    scope: String,

    /// Render help as JSON
    #[arg(long)]
    json: bool,

    /// Disable colored help
    #[arg(long)]
    no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Command followed by its parameters and flags
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let app = build_app(&cli)?;
    let mut stdout = std::io::stdout();

    match app.run(&cli.args, &mut stdout) {
        Ok(Dispatch::Completed(output)) if !output.success => Ok(ExitCode::from(1)),
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(Error::Dispatch(e)) => {
            debug!(error = ?e, args = ?cli.args, "dispatch failed");
            // User-correctable: show what went wrong and what is available
            eprintln!("Error: {}", e);
            if let Ok(help) = app.dispatcher().render_help(None) {
                eprint!("{}", help);
            }
            Ok(ExitCode::from(2))
        }
        Err(e) => Err(e.into()),
    }
}

fn build_app(cli: &Cli) -> Result<Application> {
    let settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    let mut builder = Application::builder()
        .app(default_app_info())
        .settings(settings)
        .discover(&catalog(), BUILTIN_SCOPE)?;

    if let Some(root) = &cli.manifests {
        builder = builder
            .discover(&ManifestDiscovery::new(root), &cli.scope)
            .with_context(|| format!("Failed to load manifests for scope '{}'", cli.scope))?;
    }

    builder = if cli.json {
        builder.help_renderer(JsonHelpRenderer)
    } else {
        builder.help_renderer(LinearHelpRenderer::new().colored(!cli.no_color))
    };

    Ok(builder.build())
}

fn default_app_info() -> AppInfo {
    AppInfo {
        executable: Some("switchboard".to_string()),
        description: Some(env!("CARGO_PKG_DESCRIPTION").to_string()).filter(|d| !d.is_empty()),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
        ..AppInfo::new("switchboard")
    }
}

fn init_tracing(debug: bool) {
    // RUST_LOG wins; otherwise stay quiet unless --debug
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("switchboard=debug,switchboard_core=debug")
        } else {
            EnvFilter::new("switchboard=warn,switchboard_core=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
