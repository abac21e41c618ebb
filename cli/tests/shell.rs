//! Drive the terminal client against the live mock server.
//!
//! Each test starts its own mock server on a random port, feeds a scripted
//! stdin to the shell or a one-shot command, and checks both the printed
//! page and the server-side state afterwards.

use std::io::Cursor;

use task_cli::cli::Command;
use task_cli::commands::execute;
use task_cli::render::{RenderOptions, EMPTY_MESSAGE};
use task_cli::shell::Shell;
use task_cli::transport::UreqTransport;
use task_core::{TaskClient, TaskStatus, TaskStore};

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

fn store(base_url: &str) -> TaskStore<UreqTransport> {
    TaskStore::new(TaskClient::new(base_url), UreqTransport::new())
}

const PLAIN: RenderOptions = RenderOptions { color: false };

#[test]
fn shell_session_covers_every_action() {
    let base_url = spawn_server();
    let script = "\
add

add
Buy milk
2%
add
Walk dog

toggle 1
delete 1
n
delete 2
y
quit
";
    let mut output = Vec::new();
    let mut shell = Shell::new(store(&base_url), Cursor::new(script), &mut output, PLAIN);
    shell.run().unwrap();
    let mut store = shell.into_store();
    let output = String::from_utf8(output).unwrap();

    // Mount renders the empty state.
    assert!(output.contains(EMPTY_MESSAGE));
    // Empty title is refused before any request.
    assert!(output.contains("Cannot submit: title is required."));
    assert!(output.contains("Created task #1."));
    assert!(output.contains("Created task #2."));
    assert!(output.contains("Task #1 is now completed."));
    assert!(output.contains("[x] #1 Buy milk  COMPLETED"));
    assert!(output.contains("      2%"));
    assert!(output.contains("Delete task #1 \"Buy milk\"? This cannot be undone. [y/N] "));
    assert!(output.contains("Cancelled."));
    assert!(output.contains("Deleted task #2."));

    // Local state matches what the server now holds.
    assert_eq!(store.list().tasks().len(), 1);
    store.refresh().unwrap();
    let tasks = store.list().tasks();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, 1);
    assert_eq!(tasks[0].status, TaskStatus::Completed);
}

#[test]
fn shell_reports_unknown_ids_without_requests() {
    let base_url = spawn_server();
    let mut output = Vec::new();
    let mut shell = Shell::new(
        store(&base_url),
        Cursor::new("toggle 7\ndelete 7\nfrobnicate\n"),
        &mut output,
        PLAIN,
    );
    shell.run().unwrap();
    assert_eq!(shell.store().pending_deletion(), None);
    drop(shell);
    let output = String::from_utf8(output).unwrap();

    assert!(output.contains("Could not update task #7: task 7 is not in the list"));
    assert!(output.contains("task 7 is not in the list"));
    assert!(output.contains("Unknown command `frobnicate`"));
}

#[test]
fn shell_shows_banner_when_api_is_down() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let mut output = Vec::new();
    let mut shell = Shell::new(
        store(&format!("http://{addr}")),
        Cursor::new("quit\n"),
        &mut output,
        PLAIN,
    );
    shell.run().unwrap();
    drop(shell);
    let output = String::from_utf8(output).unwrap();

    assert!(output.contains("! Failed to load tasks: transport failed"));
}

#[test]
fn one_shot_commands_round_trip() {
    let base_url = spawn_server();

    let mut out = Vec::new();
    execute(
        Command::Add {
            title: "Buy milk".to_string(),
            content: "2%".to_string(),
        },
        store(&base_url),
        Cursor::new(""),
        &mut out,
        PLAIN,
    )
    .unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "Created task #1.\n");

    let mut out = Vec::new();
    execute(Command::Toggle { id: 1 }, store(&base_url), Cursor::new(""), &mut out, PLAIN).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "Task #1 is now completed.\n");

    // Declined prompt leaves the task in place.
    let mut out = Vec::new();
    execute(
        Command::Delete { id: 1, yes: false },
        store(&base_url),
        Cursor::new("n\n"),
        &mut out,
        PLAIN,
    )
    .unwrap();
    assert!(String::from_utf8(out).unwrap().ends_with("Cancelled.\n"));

    let mut out = Vec::new();
    execute(Command::List, store(&base_url), Cursor::new(""), &mut out, PLAIN).unwrap();
    let page = String::from_utf8(out).unwrap();
    assert!(page.contains("[x] #1 Buy milk  COMPLETED"));

    let mut out = Vec::new();
    execute(
        Command::Delete { id: 1, yes: true },
        store(&base_url),
        Cursor::new(""),
        &mut out,
        PLAIN,
    )
    .unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "Deleted task #1.\n");

    let err = execute(
        Command::Delete { id: 1, yes: true },
        store(&base_url),
        Cursor::new(""),
        Vec::new(),
        PLAIN,
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("resource not found"));

    let mut out = Vec::new();
    execute(Command::Health, store(&base_url), Cursor::new(""), &mut out, PLAIN).unwrap();
    assert!(String::from_utf8(out).unwrap().starts_with("available (development"));
}
