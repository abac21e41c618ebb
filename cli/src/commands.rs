//! One-shot subcommands. Each runs a single operation and exits.

use std::io::{BufRead, Write};

use anyhow::Context;
use task_core::{TaskStore, Transport};

use crate::cli::Command;
use crate::render::{render_page, RenderOptions};
use crate::shell::Shell;

pub fn execute<T, R, W>(
    command: Command,
    mut store: TaskStore<T>,
    mut input: R,
    mut output: W,
    options: RenderOptions,
) -> anyhow::Result<()>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    match command {
        Command::Shell => Shell::new(store, input, output, options).run(),
        Command::List => {
            let fetched = store.fetch_tasks();
            write!(output, "{}", render_page(store.list(), options))?;
            fetched.context("failed to load tasks")
        }
        Command::Add { title, content } => {
            store.form_mut().set_title(title);
            store.form_mut().set_content(content);
            match store.submit_form().context("failed to create task")? {
                Some(task) => writeln!(output, "Created task #{}.", task.id)?,
                None => writeln!(output, "Task created.")?,
            }
            Ok(())
        }
        Command::Toggle { id } => {
            store.fetch_tasks().context("failed to load tasks")?;
            let status = store
                .toggle_status(id)
                .with_context(|| format!("failed to update task #{id}"))?;
            writeln!(output, "Task #{id} is now {status}.")?;
            Ok(())
        }
        Command::Delete { id, yes } => {
            if !yes {
                write!(output, "Delete task #{id}? [y/N] ")?;
                output.flush()?;
                let mut answer = String::new();
                input.read_line(&mut answer).context("failed to read input")?;
                if !matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
                    writeln!(output, "Cancelled.")?;
                    return Ok(());
                }
            }
            store
                .delete_task(id)
                .with_context(|| format!("failed to delete task #{id}"))?;
            writeln!(output, "Deleted task #{id}.")?;
            Ok(())
        }
        Command::Health => {
            let health = store.health().context("health check failed")?;
            writeln!(
                output,
                "{} ({}, version {}) at {}",
                health.status,
                health.env,
                health.version,
                store.client().base_url()
            )?;
            Ok(())
        }
    }
}
