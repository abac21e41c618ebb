//! Confirmation step in front of a delete: `idle -> pending -> idle`.

use crate::types::TaskId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingDeletion {
    target: Option<TaskId>,
}

impl PendingDeletion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id awaiting confirmation, if the dialog is open.
    pub fn target(&self) -> Option<TaskId> {
        self.target
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    /// Open the dialog for `id`, replacing any previous target.
    pub fn open(&mut self, id: TaskId) {
        self.target = Some(id);
    }

    /// Close the dialog and hand back the id it was holding.
    pub fn close(&mut self) -> Option<TaskId> {
        self.target.take()
    }
}
