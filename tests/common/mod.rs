//! In-process stand-in for the inference server.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use codefixer::apply::{BuildValidator, Prompter};
use codefixer::{FixError, Result};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

type Routes = HashMap<String, (u16, String)>;

pub struct FakeServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeServer {
    /// Serve fixed `(status, body)` answers keyed by request path.
    pub async fn start(routes: &[(&str, u16, String)]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let routes: Arc<Routes> = Arc::new(
            routes
                .iter()
                .map(|(path, status, body)| (path.to_string(), (*status, body.clone())))
                .collect(),
        );
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else { break };
                let routes = routes.clone();
                let recorded = recorded.clone();
                tokio::spawn(async move {
                    let _ = serve(stream, routes, recorded).await;
                });
            }
        });

        Self {
            base_url: format!("http://{}/v1", addr),
            requests,
        }
    }

    /// Healthy server answering chat completions with `content` as the first choice.
    pub async fn answering(content: &str) -> Self {
        Self::start(&[
            ("/v1/models", 200, models_body()),
            ("/v1/chat/completions", 200, completion_body(content)),
        ])
        .await
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn completion_requests(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == "/v1/chat/completions")
            .collect()
    }
}

pub fn models_body() -> String {
    serde_json::json!({
        "object": "list",
        "data": [{ "id": "llama-3.2-1b-instruct", "object": "model" }]
    })
    .to_string()
}

pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "finish_reason": "stop",
            "message": { "role": "assistant", "content": content }
        }]
    })
    .to_string()
}

async fn serve(
    mut stream: TcpStream,
    routes: Arc<Routes>,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.lines();
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or_default().to_string();
    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body = String::from_utf8_lossy(&buf[header_end..]).into_owned();
    recorded.lock().unwrap().push(RecordedRequest {
        method,
        path: path.clone(),
        body,
    });

    let (status, body) = routes
        .get(&path)
        .cloned()
        .unwrap_or((404, "{\"error\":\"not found\"}".to_string()));
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(status),
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// Gives a fixed answer and remembers every question asked.
pub struct ScriptedPrompter {
    answer: bool,
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn answering(answer: bool) -> Self {
        Self { answer, asked: Vec::new() }
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        self.asked.push(question.to_string());
        Ok(self.answer)
    }
}

/// Go-keyed validator that records invocations instead of running `go`.
pub struct RecordingGoValidator {
    pub calls: Rc<RefCell<Vec<PathBuf>>>,
    pub fail_with: Option<String>,
}

impl RecordingGoValidator {
    pub fn new() -> (Self, Rc<RefCell<Vec<PathBuf>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        (Self { calls: calls.clone(), fail_with: None }, calls)
    }
}

impl BuildValidator for RecordingGoValidator {
    fn name(&self) -> &str {
        "Go"
    }

    fn language(&self) -> &str {
        "go"
    }

    fn extensions(&self) -> &[&str] {
        &["go"]
    }

    fn validate(&self, path: &Path) -> Result<()> {
        self.calls.borrow_mut().push(path.to_path_buf());
        match &self.fail_with {
            Some(output) => Err(FixError::BuildValidationFailure {
                status: "exit status: 1".to_string(),
                output: output.clone(),
            }),
            None => Ok(()),
        }
    }
}

pub fn backups_in(dir: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().map_or(false, |ext| ext == "bak"))
        .collect();
    found.sort();
    found
}
