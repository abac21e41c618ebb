//! Local list state backing the task list view.
//!
//! The list is a cache of the last successful `GET /v1/tasks`, patched in
//! place after confirmed mutations. `loading` is only true until the first
//! fetch resolves; later refreshes keep showing the current list.

use std::collections::HashSet;

use tracing::warn;

use crate::error::ApiError;
use crate::types::{Task, TaskId, TaskStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListState {
    tasks: Vec<Task>,
    loading: bool,
    error: Option<String>,
}

impl Default for TaskListState {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskListState {
    /// A freshly mounted view: no tasks yet, loading.
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            loading: true,
            error: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message for the error banner, set by the last failed fetch.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Apply the outcome of a list fetch.
    ///
    /// Success replaces the list and clears the banner. Failure sets the
    /// banner and keeps whatever was loaded before. Both stop loading.
    pub fn apply_fetch(&mut self, result: Result<Vec<Task>, &ApiError>) {
        self.loading = false;
        match result {
            Ok(tasks) => {
                self.tasks = dedup_by_id(tasks);
                self.error = None;
            }
            Err(err) => {
                self.error = Some(format!("Failed to load tasks: {err}"));
            }
        }
    }

    /// Patch one task's status. Returns false if the id is not loaded.
    pub fn set_status(&mut self, id: TaskId, status: TaskStatus) -> bool {
        match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.status = status;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        Some(self.tasks.remove(index))
    }
}

fn dedup_by_id(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = HashSet::with_capacity(tasks.len());
    tasks
        .into_iter()
        .filter(|task| {
            let fresh = seen.insert(task.id);
            if !fresh {
                warn!(id = task.id, "duplicate task id in list response, keeping first");
            }
            fresh
        })
        .collect()
}
