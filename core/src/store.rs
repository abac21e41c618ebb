//! `TaskStore`: the single place that talks to the API.
//!
//! # Design
//! The store owns the request codec, a [`Transport`] and the three pieces of
//! view state (list, form, pending deletion). Every operation follows the
//! same shape: build a request, execute it, parse the response, then patch
//! local state only if the server confirmed success. Failures are logged and
//! returned; local state is left as it was, except for the list banner on a
//! failed fetch and the deletion dialog, which always closes.
//!
//! Requests are issued one at a time and never retried or cancelled.

use tracing::{debug, error, info};

use crate::client::TaskClient;
use crate::deletion::PendingDeletion;
use crate::error::{ApiError, StoreError};
use crate::form::TaskForm;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{CreateTask, HealthStatus, Task, TaskId, TaskStatus, UpdateTask};
use crate::view::TaskListState;

#[derive(Debug)]
pub struct TaskStore<T> {
    client: TaskClient,
    transport: T,
    list: TaskListState,
    form: TaskForm,
    deletion: PendingDeletion,
}

impl<T: Transport> TaskStore<T> {
    pub fn new(client: TaskClient, transport: T) -> Self {
        Self {
            client,
            transport,
            list: TaskListState::new(),
            form: TaskForm::new(),
            deletion: PendingDeletion::new(),
        }
    }

    pub fn client(&self) -> &TaskClient {
        &self.client
    }

    pub fn list(&self) -> &TaskListState {
        &self.list
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TaskForm {
        &mut self.form
    }

    /// Id whose deletion awaits confirmation, if the dialog is open.
    pub fn pending_deletion(&self) -> Option<TaskId> {
        self.deletion.target()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Load the whole collection, replacing the local list.
    #[tracing::instrument(skip(self))]
    pub fn fetch_tasks(&mut self) -> Result<(), StoreError> {
        let request = self.client.build_list_tasks();
        let result = self
            .send(request)
            .and_then(|response| self.client.parse_list_tasks(response));
        match result {
            Ok(tasks) => {
                debug!(count = tasks.len(), "loaded tasks");
                self.list.apply_fetch(Ok(tasks));
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "failed to fetch tasks");
                self.list.apply_fetch(Err(&err));
                Err(err.into())
            }
        }
    }

    pub fn refresh(&mut self) -> Result<(), StoreError> {
        self.fetch_tasks()
    }

    /// POST a new task, then refresh the list.
    ///
    /// A failed refresh does not fail the create: it is logged and shows up
    /// in the list banner.
    #[tracing::instrument(skip(self, input), fields(title = %input.title))]
    pub fn create_task(&mut self, input: &CreateTask) -> Result<Option<Task>, StoreError> {
        let request = self.client.build_create_task(input)?;
        let created = self
            .send(request)
            .and_then(|response| self.client.parse_create_task(response))
            .map_err(|err| {
                error!(error = %err, "failed to create task");
                err
            })?;
        info!(id = created.as_ref().map(|task| task.id), "task created");
        if let Err(err) = self.refresh() {
            // Already logged and shown in the banner by `fetch_tasks`.
            debug!(error = %err, "refresh after create failed");
        }
        Ok(created)
    }

    /// Submit the form's current fields.
    ///
    /// An empty title or a submission already in flight is refused without
    /// a request. On success the fields are cleared and the list refreshed;
    /// on failure they are kept for a retry.
    pub fn submit_form(&mut self) -> Result<Option<Task>, StoreError> {
        let input = self.form.begin_submit().map_err(|err| {
            debug!(error = %err, "form submission refused");
            err
        })?;
        let result = self.create_task(&input);
        self.form.finish_submit(result.is_ok());
        result
    }

    /// Flip a loaded task's status once the server accepts the update.
    #[tracing::instrument(skip(self))]
    pub fn toggle_status(&mut self, id: TaskId) -> Result<TaskStatus, StoreError> {
        let current = self.list.get(id).ok_or(StoreError::UnknownTask(id))?.status;
        let next = current.toggled();
        let request = self.client.build_update_task(id, &UpdateTask::status(next))?;
        match self
            .send(request)
            .and_then(|response| self.client.parse_update_task(response))
        {
            Ok(()) => {
                self.list.set_status(id, next);
                debug!(%next, "status updated");
                Ok(next)
            }
            Err(err) => {
                error!(error = %err, "failed to update task status");
                Err(err.into())
            }
        }
    }

    /// Open the confirmation dialog for a loaded task. No request is made.
    pub fn request_delete(&mut self, id: TaskId) -> Result<(), StoreError> {
        if self.list.get(id).is_none() {
            return Err(StoreError::UnknownTask(id));
        }
        self.deletion.open(id);
        Ok(())
    }

    /// Close the dialog without deleting anything.
    pub fn cancel_delete(&mut self) -> Option<TaskId> {
        self.deletion.close()
    }

    /// Delete the task held by the dialog. The dialog closes whether the
    /// request succeeds or fails.
    pub fn confirm_delete(&mut self) -> Result<TaskId, StoreError> {
        let id = self.deletion.target().ok_or(StoreError::NoPendingDeletion)?;
        let result = self.delete_task(id);
        self.deletion.close();
        result.map(|()| id)
    }

    /// Delete immediately, without the dialog.
    #[tracing::instrument(skip(self))]
    pub fn delete_task(&mut self, id: TaskId) -> Result<(), StoreError> {
        let request = self.client.build_delete_task(id);
        match self
            .send(request)
            .and_then(|response| self.client.parse_delete_task(response))
        {
            Ok(()) => {
                self.list.remove(id);
                info!("task deleted");
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "failed to delete task");
                Err(err.into())
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn health(&mut self) -> Result<HealthStatus, StoreError> {
        let request = self.client.build_health();
        let health = self
            .send(request)
            .and_then(|response| self.client.parse_health(response))
            .map_err(|err| {
                error!(error = %err, "health check failed");
                err
            })?;
        Ok(health)
    }

    fn send(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        self.transport.execute(request)
    }
}
