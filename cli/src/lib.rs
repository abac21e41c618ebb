//! Terminal client for the task tracker API.
//!
//! `tasks` with no subcommand opens the interactive page ([`shell`]); the
//! other subcommands run one operation and exit ([`commands`]). Requests go
//! through [`transport::UreqTransport`] into a `task_core::TaskStore`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod render;
pub mod shell;
pub mod transport;

use std::ffi::OsString;
use std::io::IsTerminal;

use clap::Parser;
use task_core::{TaskClient, TaskStore};
use tracing::info;

use crate::cli::{init_tracing, Cli, Command};
use crate::config::{load_file_config, Settings};
use crate::render::RenderOptions;
use crate::transport::UreqTransport;

pub fn run<I, T>(args: I) -> anyhow::Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    init_tracing(cli.verbose, cli.quiet)?;

    let file = load_file_config(cli.config.as_deref())?;
    let settings = Settings::resolve(
        cli.api_url.clone(),
        cli.no_color,
        &file,
        std::io::stdout().is_terminal(),
    );
    info!(api_url = %settings.api_url, color = settings.color, "using task API");

    let store = TaskStore::new(TaskClient::new(&settings.api_url), UreqTransport::new());
    let options = RenderOptions {
        color: settings.color,
    };
    commands::execute(
        cli.command.unwrap_or(Command::Shell),
        store,
        std::io::stdin().lock(),
        std::io::stdout().lock(),
        options,
    )
}
