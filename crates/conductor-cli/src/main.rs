//! Conductor CLI - adds non-Steam shortcuts to a local Steam installation.
//!
//! This binary wraps the conductor-core library. Progress is logged to
//! stderr; stdout carries only the results.

mod commands;

use clap::{Args, Parser, Subcommand};
use conductor_core::{Conductor, ConductorError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "conductor", version)]
#[command(about = "Add non-Steam shortcuts with compat tools and artwork to Steam")]
struct Cli {
    /// Steam installation root (defaults to $CONDUCTOR_STEAM_ROOT or ~/.steam/steam)
    #[arg(long, global = true)]
    steam_root: Option<PathBuf>,

    /// Steam profile id to modify (defaults to the first one under userdata/)
    #[arg(long, global = true)]
    steam_user: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the shortcuts registered for the current Steam profile
    Info {
        /// Print the collection as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add an app to Steam as a non-Steam shortcut
    #[command(name = "add_shortcut")]
    AddShortcut(AddShortcutArgs),
}

#[derive(Args, Debug)]
struct AddShortcutArgs {
    /// Name shown in the Steam library
    #[arg(long)]
    app_name: String,

    /// Full path to the executable
    #[arg(long)]
    exe_path: String,

    /// Compatibility tool directory name under compatibilitytools.d
    #[arg(long)]
    compat_tool: Option<String>,

    /// Hero image
    #[arg(long)]
    hero: Option<String>,

    /// Logo image
    #[arg(long)]
    logo: Option<String>,

    /// Wide capsule image
    #[arg(long)]
    tenfoot: Option<String>,

    /// Portrait capsule image
    #[arg(long)]
    boxart: Option<String>,

    /// Shortcut icon
    #[arg(long)]
    icon: Option<String>,

    /// Launch options passed to the executable
    #[arg(long, allow_hyphen_values = true)]
    launch_options: Option<String>,

    /// Report what would change without modifying any files
    #[arg(long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(exit_status(&err))
        }
    }
}

/// Log to stderr. `RUST_LOG` overrides the level picked by `--debug`.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut builder = Conductor::builder().steam_user(cli.steam_user);
    if let Some(root) = cli.steam_root {
        builder = builder.steam_root(root);
    }
    let conductor = builder.build()?;
    debug!("Steam root: {}", conductor.paths().root().display());

    match cli.command {
        Command::Info { json } => commands::info(&conductor, json),
        Command::AddShortcut(args) => commands::add_shortcut(&conductor, args),
    }
}

/// Process status for a failed run: the library's taxonomy code, else 1.
fn exit_status(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ConductorError>()
        .map(ConductorError::exit_code)
        .and_then(|code| u8::try_from(code).ok())
        .unwrap_or(1)
}
