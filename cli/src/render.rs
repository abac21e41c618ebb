//! Text rendering of the task page.
//!
//! Completed tasks are marked `[x]`; with color on they are also struck
//! through and dimmed. Pending tasks are marked `[ ]` and left plain.

use std::fmt::Write;

use crossterm::style::Stylize;
use task_core::{Task, TaskListState};

pub const TITLE: &str = "Task Tracker";
pub const LOADING_MESSAGE: &str = "Loading...";
pub const EMPTY_MESSAGE: &str = "No tasks found. Create one with `add`.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub color: bool,
}

/// The whole page: header, optional error banner, then loading / empty /
/// list body.
pub fn render_page(list: &TaskListState, options: RenderOptions) -> String {
    let mut out = String::new();
    if options.color {
        let _ = writeln!(out, "{}", TITLE.bold());
    } else {
        let _ = writeln!(out, "{TITLE}");
    }
    let _ = writeln!(out, "{}", "=".repeat(TITLE.len()));

    if let Some(error) = list.error() {
        let banner = format!("! {error}");
        if options.color {
            let _ = writeln!(out, "{}", banner.red());
        } else {
            let _ = writeln!(out, "{banner}");
        }
    }

    if list.is_loading() {
        let _ = writeln!(out, "{LOADING_MESSAGE}");
    } else if list.is_empty() {
        let _ = writeln!(out, "{EMPTY_MESSAGE}");
    } else {
        for task in list.tasks() {
            out.push_str(&render_task(task, options));
        }
    }
    out
}

/// One task: marker, id, title and status badge, then the detail line if
/// there is one.
pub fn render_task(task: &Task, options: RenderOptions) -> String {
    let marker = if task.is_completed() { "[x]" } else { "[ ]" };
    let badge = task.status.as_str().to_uppercase();
    let mut out = String::new();

    if task.is_completed() && options.color {
        let _ = writeln!(
            out,
            "{marker} #{} {}  {}",
            task.id,
            task.title.as_str().crossed_out().dim(),
            badge.green()
        );
    } else if options.color {
        let _ = writeln!(out, "{marker} #{} {}  {}", task.id, task.title, badge.yellow());
    } else {
        let _ = writeln!(out, "{marker} #{} {}  {badge}", task.id, task.title);
    }

    if !task.content.is_empty() {
        if task.is_completed() && options.color {
            let _ = writeln!(out, "      {}", task.content.as_str().dim());
        } else {
            let _ = writeln!(out, "      {}", task.content);
        }
    }
    out
}

/// Prompt shown while a deletion awaits confirmation.
pub fn render_delete_dialog(task: &Task) -> String {
    format!(
        "Delete task #{} \"{}\"? This cannot be undone. [y/N] ",
        task.id, task.title
    )
}
