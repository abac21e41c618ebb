//! Full task lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives a `TaskStore` over
//! real HTTP using ureq. Validates that request building, response parsing
//! and local state patching work end-to-end with the actual server.

use task_core::{
    ApiError, CreateTask, HttpMethod, HttpRequest, HttpResponse, StoreError, TaskClient,
    TaskStatus, TaskStore, Transport,
};

/// Blocking ureq transport.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&mut self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => self.agent.get(&req.path).call(),
            (HttpMethod::Delete, _) => self.agent.delete(&req.path).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&req.path).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(&req.path).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();
        Ok(HttpResponse::new(status, body))
    }
}

/// Start the mock server on a random port in a background runtime.
fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            task_mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn task_lifecycle() {
    let base_url = spawn_server();
    let mut store = TaskStore::new(TaskClient::new(&base_url), UreqTransport::new());

    // Step 1: mount; empty list, loading cleared.
    store.fetch_tasks().unwrap();
    assert!(!store.list().is_loading());
    assert!(store.list().is_empty(), "expected empty list");

    // Step 2: empty title never reaches the server.
    assert!(matches!(store.submit_form(), Err(StoreError::Form(_))));

    // Step 3: create through the form; fields reset and list refreshes.
    store.form_mut().set_title("Buy milk");
    store.form_mut().set_content("2%");
    let created = store.submit_form().unwrap().expect("server echoes the task");
    assert_eq!(created.title, "Buy milk");
    assert_eq!(created.status, TaskStatus::Pending);
    assert_eq!(store.form().title(), "");
    assert_eq!(store.list().tasks().len(), 1);
    let milk = created.id;

    // Step 4: a second task through the raw create path.
    store
        .create_task(&CreateTask {
            title: "Walk dog".to_string(),
            content: String::new(),
        })
        .unwrap();
    assert_eq!(store.list().tasks().len(), 2);

    // Step 5: toggle patches locally and on the server.
    assert_eq!(store.toggle_status(milk).unwrap(), TaskStatus::Completed);
    assert_eq!(store.list().get(milk).unwrap().status, TaskStatus::Completed);
    store.refresh().unwrap();
    assert_eq!(store.list().get(milk).unwrap().status, TaskStatus::Completed);

    // Step 6: cancelled delete keeps the task.
    store.request_delete(milk).unwrap();
    store.cancel_delete();
    store.refresh().unwrap();
    assert!(store.list().get(milk).is_some());

    // Step 7: confirmed delete removes it.
    store.request_delete(milk).unwrap();
    assert_eq!(store.confirm_delete().unwrap(), milk);
    assert!(store.list().get(milk).is_none());
    store.refresh().unwrap();
    assert_eq!(store.list().tasks().len(), 1);

    // Step 8: deleting again is NotFound.
    let err = store.delete_task(milk).unwrap_err();
    assert_eq!(err, StoreError::Api(ApiError::NotFound));

    // Step 9: health endpoint answers.
    assert_eq!(store.health().unwrap().status, "available");
}

#[test]
fn unreachable_server_sets_banner() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let mut store = TaskStore::new(TaskClient::new(&format!("http://{addr}")), UreqTransport::new());

    let err = store.fetch_tasks().unwrap_err();
    assert!(matches!(err, StoreError::Api(ApiError::Transport(_))));
    assert!(!store.list().is_loading());
    assert!(store.list().error().is_some());
}
