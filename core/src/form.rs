//! State of the "new task" form.
//!
//! Submission is split in two halves so a host can show the in-flight state:
//! `begin_submit` validates and snapshots the fields, `finish_submit` clears
//! them on success or leaves them for a retry on failure.

use crate::error::FormError;
use crate::types::CreateTask;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    title: String,
    content: String,
    submitting: bool,
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Whether the submit action is enabled.
    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.title.trim().is_empty()
    }

    /// Guard and snapshot the fields for a create request.
    pub fn begin_submit(&mut self) -> Result<CreateTask, FormError> {
        if self.submitting {
            return Err(FormError::AlreadySubmitting);
        }
        if self.title.trim().is_empty() {
            return Err(FormError::EmptyTitle);
        }
        self.submitting = true;
        Ok(CreateTask {
            title: self.title.clone(),
            content: self.content.clone(),
        })
    }

    pub fn finish_submit(&mut self, succeeded: bool) {
        self.submitting = false;
        if succeeded {
            self.title.clear();
            self.content.clear();
        }
    }
}
