//! Synchronous client core for the task tracker API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the client-side
//! state of the task page: the loaded list, the "new task" form and the
//! delete confirmation. `TaskStore` ties them together over a `Transport`
//! supplied by the host.
//!
//! # Design
//! - `TaskClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Local state is only patched after the server confirms a mutation.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod deletion;
pub mod error;
pub mod form;
pub mod http;
pub mod store;
pub mod types;
pub mod view;

pub use client::TaskClient;
pub use deletion::PendingDeletion;
pub use error::{ApiError, FormError, StoreError};
pub use form::TaskForm;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use store::TaskStore;
pub use types::{CreateTask, HealthStatus, Task, TaskId, TaskList, TaskStatus, UpdateTask};
pub use view::TaskListState;
