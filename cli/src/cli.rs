use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser, Subcommand};
use task_core::TaskId;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tasks",
    version,
    about = "Terminal client for the task tracker API",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Base URL of the task API.
    #[arg(long, env = "TASKS_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Path to a TOML config file.
    #[arg(long, env = "TASKS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub no_color: bool,

    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the task list.
    List,
    /// Create a task.
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        content: String,
    },
    /// Flip a task between pending and completed.
    Toggle { id: TaskId },
    /// Delete a task after a y/N prompt.
    Delete {
        id: TaskId,
        /// Skip the prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Check that the API is reachable.
    Health,
    /// Interactive task page (default).
    Shell,
}

/// Log level used when `RUST_LOG` is unset. Quiet wins over verbose.
pub fn default_level(verbose: u8, quiet: u8) -> &'static str {
    match (verbose, quiet) {
        (_, 2..) => "off",
        (_, 1) => "error",
        (3.., _) => "trace",
        (2, _) => "debug",
        (1, _) => "info",
        _ => "warn",
    }
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level(verbose, quiet)))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
