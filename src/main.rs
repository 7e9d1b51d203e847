mod commands;
mod config;
mod error;
mod highlight;
mod menu;
mod model;
mod present;
mod prompt;
mod session;
mod storage;

use anyhow::Result;
use clap::{Parser, Subcommand};
use error::PromptError;
use model::CrudAction;
use present::Presenter;
use session::Session;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "codepad")]
#[command(about = "A terminal-first pad for code snippets, filed by language", long_about = None)]
struct Cli {
    /// Directory holding the language directories (default: ~/codepad)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Highlighting theme used when reading
    #[arg(long, global = true)]
    theme: Option<String>,

    /// Print plain text without colors or highlighting
    #[arg(long, global = true)]
    no_color: bool,

    /// Log diagnostics to stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a snippet
    Read,
    /// Write a new snippet
    Write,
    /// Delete a snippet
    Delete,
}

impl From<Commands> for CrudAction {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Read => CrudAction::Read,
            Commands::Write => CrudAction::Write,
            Commands::Delete => CrudAction::Delete,
        }
    }
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("CODEPAD_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = config::Config::init()?.with_overrides(cli.root, cli.theme);
    tracing::debug!(root = ?config.root_dir, theme = %config.theme, "starting session");

    let presenter = Presenter::new(io::stdout().lock(), !cli.no_color);
    let mut session = Session::new(&config, io::stdin().lock(), presenter);

    match session.run(cli.command.map(CrudAction::from)) {
        Ok(outcome) if outcome.is_failure() => Ok(ExitCode::FAILURE),
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) if matches!(e.downcast_ref::<PromptError>(), Some(PromptError::Closed)) => {
            eprintln!("Input closed before the session finished.");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e),
    }
}
