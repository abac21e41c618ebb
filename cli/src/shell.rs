//! Interactive task page.
//!
//! Mounting fetches the list and renders it; every command then performs at
//! most one action through the store and re-renders the page. Deleting opens
//! a confirmation dialog; only an explicit `y` confirms.

use std::io::{BufRead, Write};

use anyhow::Context;
use task_core::{FormError, TaskId, TaskStore, Transport};
use tracing::debug;

use crate::render::{render_delete_dialog, render_page, RenderOptions};

const HELP: &str = "\
Commands:
  list | refresh    reload the task list
  add               create a task (prompts for title and details)
  toggle <id>       flip a task between pending and completed
  delete <id>       delete a task after confirmation
  help              show this help
  quit | exit       leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Refresh,
    Add,
    Toggle(TaskId),
    Delete(TaskId),
    Help,
    Quit,
    Nothing,
}

pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(ShellCommand::Nothing);
    };
    let command = match verb {
        "list" | "ls" | "refresh" => ShellCommand::Refresh,
        "add" | "new" => ShellCommand::Add,
        "toggle" | "done" => ShellCommand::Toggle(parse_id(verb, words.next())?),
        "delete" | "rm" => ShellCommand::Delete(parse_id(verb, words.next())?),
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("Unknown command `{other}`. Type `help` for a list.")),
    };
    if words.next().is_some() {
        return Err(format!("Too many arguments for `{verb}`."));
    }
    Ok(command)
}

fn parse_id(verb: &str, raw: Option<&str>) -> Result<TaskId, String> {
    let raw = raw.ok_or_else(|| format!("Usage: {verb} <id>"))?;
    raw.trim_start_matches('#')
        .parse()
        .map_err(|_| format!("`{raw}` is not a task id."))
}

pub struct Shell<T, R, W> {
    store: TaskStore<T>,
    input: R,
    output: W,
    options: RenderOptions,
}

impl<T: Transport, R: BufRead, W: Write> Shell<T, R, W> {
    pub fn new(store: TaskStore<T>, input: R, output: W, options: RenderOptions) -> Self {
        Self {
            store,
            input,
            output,
            options,
        }
    }

    pub fn store(&self) -> &TaskStore<T> {
        &self.store
    }

    pub fn into_store(self) -> TaskStore<T> {
        self.store
    }

    /// Mount, then read commands until `quit` or end of input.
    pub fn run(&mut self) -> anyhow::Result<()> {
        // Fetch failures are shown in the banner.
        let _ = self.store.fetch_tasks();
        self.render()?;

        loop {
            let Some(line) = self.prompt("> ")? else {
                break;
            };
            match parse_command(&line) {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => self.dispatch(command)?,
                Err(message) => writeln!(self.output, "{message}")?,
            }
        }
        writeln!(self.output)?;
        Ok(())
    }

    fn dispatch(&mut self, command: ShellCommand) -> anyhow::Result<()> {
        debug!(?command, "shell command");
        match command {
            ShellCommand::Refresh => {
                let _ = self.store.refresh();
                self.render()
            }
            ShellCommand::Add => self.add(),
            ShellCommand::Toggle(id) => {
                match self.store.toggle_status(id) {
                    Ok(status) => writeln!(self.output, "Task #{id} is now {status}.")?,
                    Err(err) => writeln!(self.output, "Could not update task #{id}: {err}")?,
                }
                self.render()
            }
            ShellCommand::Delete(id) => self.delete(id),
            ShellCommand::Help => {
                writeln!(self.output, "{HELP}")?;
                Ok(())
            }
            ShellCommand::Quit | ShellCommand::Nothing => Ok(()),
        }
    }

    /// Fill the form field by field. An empty answer keeps the current value,
    /// so a failed submission can be retried without retyping; a lone `-`
    /// clears the details.
    fn add(&mut self) -> anyhow::Result<()> {
        let title_prompt = field_prompt("Title", self.store.form().title(), false);
        let Some(title) = self.prompt(&title_prompt)? else {
            return Ok(());
        };
        if !title.trim().is_empty() {
            self.store.form_mut().set_title(title.trim());
        }
        if !self.store.form().can_submit() {
            writeln!(self.output, "Cannot submit: {}.", FormError::EmptyTitle)?;
            return Ok(());
        }

        let content_prompt = field_prompt("Details", self.store.form().content(), true);
        let Some(content) = self.prompt(&content_prompt)? else {
            return Ok(());
        };
        match content.trim() {
            "" => {}
            CLEAR_FIELD => self.store.form_mut().set_content(""),
            text => self.store.form_mut().set_content(text),
        }

        writeln!(self.output, "Saving...")?;
        match self.store.submit_form() {
            Ok(Some(task)) => writeln!(self.output, "Created task #{}.", task.id)?,
            Ok(None) => writeln!(self.output, "Task created.")?,
            Err(err) => writeln!(self.output, "Could not create task: {err}")?,
        }
        self.render()
    }

    fn delete(&mut self, id: TaskId) -> anyhow::Result<()> {
        if let Err(err) = self.store.request_delete(id) {
            writeln!(self.output, "{err}")?;
            return Ok(());
        }
        let dialog = match self.store.list().get(id) {
            Some(task) => render_delete_dialog(task),
            None => format!("Delete task #{id}? [y/N] "),
        };
        let answer = self.prompt(&dialog)?.unwrap_or_default();

        if matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
            match self.store.confirm_delete() {
                Ok(id) => writeln!(self.output, "Deleted task #{id}.")?,
                Err(err) => writeln!(self.output, "Could not delete task #{id}: {err}")?,
            }
        } else {
            self.store.cancel_delete();
            writeln!(self.output, "Cancelled.")?;
        }
        self.render()
    }

    fn render(&mut self) -> anyhow::Result<()> {
        let page = render_page(self.store.list(), self.options);
        write!(self.output, "\n{page}").context("failed to write page")?;
        Ok(())
    }

    /// Print `label` and read one line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Answer that empties a clearable field.
const CLEAR_FIELD: &str = "-";

fn field_prompt(label: &str, current: &str, clearable: bool) -> String {
    match (current.is_empty(), clearable) {
        (true, _) => format!("{label}: "),
        (false, false) => format!("{label} [{current}]: "),
        (false, true) => format!("{label} [{current}] ({CLEAR_FIELD} clears): "),
    }
}
