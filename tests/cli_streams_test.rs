//! The one-shot version command as a process: what lands on stdout, stderr and in the log
//!
//! Logging is turned up to `debug` so any subscriber output that escaped to
//! the terminal streams would show up in the assertions.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::process::{Command, Output};
use std::thread;

fn header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map(|i| i + 4)
}

fn content_length(head: &str) -> usize {
    head.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}

/// Answer one JSON-RPC request on a background thread with `result`
fn spawn_node(result: &'static str) -> (String, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let url = format!("http://{}", listener.local_addr().expect("addr"));

    let handle = thread::spawn(move || {
        let (mut socket, _) = listener.accept().expect("accept");
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];

        let body_start = loop {
            let n = socket.read(&mut chunk).expect("read");
            assert!(n > 0, "client closed before sending headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = header_end(&buf) {
                break end;
            }
        };
        let head = String::from_utf8_lossy(&buf[..body_start]).to_string();
        let len = content_length(&head);
        while buf.len() < body_start + len {
            let n = socket.read(&mut chunk).expect("read body");
            assert!(n > 0, "client closed mid-body");
            buf.extend_from_slice(&chunk[..n]);
        }

        let request: serde_json::Value =
            serde_json::from_slice(&buf[body_start..body_start + len]).expect("json request");
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": request["id"].clone(),
            "result": result,
        })
        .to_string();
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).expect("write");
    });

    (url, handle)
}

fn run_cli(rpc: &str, home: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_crowdfund"))
        .args(["probe", "--rpc", rpc])
        .env("XDG_DATA_HOME", home)
        .env("CROWDFUND_CONFIG", home.join("missing.toml"))
        .env("CROWDFUND_LOG", "debug")
        .output()
        .expect("run crowdfund")
}

#[test]
fn test_version_goes_to_stdout_and_nothing_else() {
    let home = tempfile::tempdir().unwrap();
    let (url, node) = spawn_node("Geth/v1.2.3");

    let output = run_cli(&url, home.path());
    node.join().unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Client Version: Geth/v1.2.3\n"
    );
    assert_eq!(String::from_utf8_lossy(&output.stderr), "");

    let log = std::fs::read_to_string(home.path().join("crowdfund").join("crowdfund.log"))
        .expect("log file");
    assert!(log.contains("node version"));
}

#[test]
fn test_refused_connection_writes_one_stderr_line() {
    let home = tempfile::tempdir().unwrap();
    let url = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let output = run_cli(&url, home.path());

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "");
    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(lines.len(), 1, "stderr: {stderr:?}");
    assert!(lines[0].starts_with("Error fetching client version: "));
    assert!(stderr.ends_with('\n'));

    // each part of the error chain is printed once
    let parts: Vec<&str> = lines[0].split(": ").skip(1).collect();
    for (i, part) in parts.iter().enumerate() {
        assert!(!parts[i + 1..].contains(part), "repeated {part:?} in {stderr:?}");
    }
}
