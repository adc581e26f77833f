use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod coordinator;
mod dispatch;
mod error;
mod library;
mod service;
mod tui;

use cli::args::{Cli, Commands};
use cli::commands;
use config::paths;
use config::types::{AppConfig, Verbosity};
use error::AssetError;

fn main() {
    let cli = Cli::parse();

    // Convert CLI flags to verbosity level
    let verbosity = Verbosity::from((cli.quiet, cli.verbose));
    init_tracing(&cli, verbosity);

    tracing::debug!("Verbosity level: {:?}", verbosity);

    if let Err(err) = run(cli) {
        display_error(&err);
        std::process::exit(1);
    }
}

/// Set up tracing with a verbosity-based filter. RUST_LOG overrides the
/// CLI flags. The panel owns the terminal, so in `ui` mode logs go to
/// `assetdesk.log` in the library directory instead of stderr.
fn init_tracing(cli: &Cli, verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.as_tracing_filter()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if !matches!(cli.command, Commands::Ui) {
        builder.with_writer(io::stderr).init();
        return;
    }
    match open_log_file(cli.library.as_deref()) {
        Some(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).init(),
        None => builder.with_writer(io::sink).init(),
    }
}

fn open_log_file(library: Option<&Path>) -> Option<std::fs::File> {
    let dir = paths::data_dir(library).ok()?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("assetdesk.log"))
        .ok()
}

fn load_config() -> Result<AppConfig, AssetError> {
    AppConfig::load(&paths::config_dir()?)
}

/// Execute the dispatched command.
fn run(cli: Cli) -> Result<(), AssetError> {
    let quiet = cli.quiet;
    let library = cli.library;

    match cli.command {
        Commands::Ui => {
            let config = load_config()?;
            let data_dir = paths::data_dir(library.as_deref())?;
            tracing::info!(library = %data_dir.display(), course = %config.course.id, "Launching panel");
            tui::launch_tui(config, data_dir)
        }
        Commands::List(args) => {
            let data_dir = paths::data_dir(library.as_deref())?;
            commands::list(&data_dir, args, &mut io::stdout().lock())
        }
        Commands::Import(args) => {
            let config = load_config()?;
            let data_dir = paths::data_dir(library.as_deref())?;
            commands::import(&data_dir, &config, args, &mut io::stdout().lock())
        }
        Commands::Delete(args) => {
            let data_dir = paths::data_dir(library.as_deref())?;
            let name = commands::delete(&data_dir, args)?;
            if !quiet {
                eprintln!("{} has been deleted.", name);
            }
            Ok(())
        }
        Commands::Lock(args) => {
            let data_dir = paths::data_dir(library.as_deref())?;
            let (name, locked) = commands::toggle_lock(&data_dir, args)?;
            if !quiet {
                let state = if locked { "Locked" } else { "Unlocked" };
                eprintln!("{} {}", state, name);
            }
            Ok(())
        }
        Commands::Config => {
            let config = load_config()?;
            print!("{}", config.to_toml()?);
            Ok(())
        }
        Commands::Completions(args) => {
            clap_complete::generate(
                args.shell,
                &mut Cli::command(),
                "assetdesk",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}

/// Display an AssetError with optional suggestion hint to stderr.
fn display_error(err: &AssetError) {
    eprintln!("error: {}", err);
    if let Some(suggestion) = err.suggestion() {
        eprintln!("  hint: {}", suggestion);
    }
}
