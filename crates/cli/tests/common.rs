// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

pub fn quill() -> Command {
    cargo_bin_cmd!("quill")
}

/// A port nothing is listening on.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Isolated config file and data directory.
pub struct Workspace {
    pub temp: TempDir,
}

impl Workspace {
    /// Workspace whose server URL points at a closed port.
    pub fn new() -> Self {
        Self::with_url(&format!("http://127.0.0.1:{}/api/v1", closed_port()))
    }

    pub fn with_url(url: &str) -> Self {
        let temp = TempDir::new().unwrap();
        let config = format!("[remote]\nurl = \"{}\"\ntimeout_secs = 5\n", url);
        std::fs::write(temp.path().join("config.toml"), config).unwrap();
        Workspace { temp }
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp.path().join("config.toml")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.temp.path().join("data")
    }

    /// `quill` with this workspace's config and data directory.
    pub fn cmd(&self) -> Command {
        let mut cmd = quill();
        cmd.arg("--config")
            .arg(self.config_path())
            .arg("--data-dir")
            .arg(self.data_dir())
            .env_remove("QUILL_TOKEN")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Add a note and return its id.
    pub fn add(&self, title: &str, description: &str) -> String {
        let output = self
            .cmd()
            .arg("add")
            .arg(title)
            .arg(description)
            .output()
            .unwrap();
        assert!(output.status.success());

        String::from_utf8_lossy(&output.stdout)
            .split_whitespace()
            .find(|s| s.starts_with("temp-"))
            .unwrap()
            .trim_end_matches(':')
            .to_string()
    }
}

/// Minimal notes API on a background thread.
///
/// Answers `POST` with a fixed id and `GET` with a fixed listing, and
/// records the request line of everything it receives.
pub struct FakeApi {
    pub url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeApi {
    pub fn start(created_id: &'static str, listing: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/api/v1", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let mut reader = BufReader::new(stream.try_clone().unwrap());

                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                let mut content_length = 0;
                loop {
                    let mut header = String::new();
                    reader.read_line(&mut header).unwrap();
                    if header.trim().is_empty() {
                        break;
                    }
                    if let Some((name, value)) = header.split_once(':') {
                        if name.eq_ignore_ascii_case("content-length") {
                            content_length = value.trim().parse().unwrap_or(0);
                        }
                    }
                }
                let mut body = vec![0; content_length];
                reader.read_exact(&mut body).unwrap();

                let request_line = request_line.trim().to_string();
                let response_body = if request_line.starts_with("POST") {
                    format!(r#"{{"savedPost":{{"_id":"{}"}}}}"#, created_id)
                } else if request_line.starts_with("GET") {
                    listing.to_string()
                } else {
                    "{}".to_string()
                };
                seen.lock().unwrap().push(request_line);

                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    response_body.len(),
                    response_body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        FakeApi { url, requests }
    }

    /// Request lines received so far, e.g. `POST /api/v1/posts HTTP/1.1`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}
