//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::io::Write;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Json;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use http_basics::config::AppConfig;
use http_basics::net::Listener;
use http_basics::users::UserStore;
use http_basics::{HttpServer, Shutdown};

/// In-memory stand-in for stdout, shared with the server task.
#[derive(Debug, Clone, Default)]
pub struct Console {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl Console {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock().unwrap()).into_owned()
    }
}

impl Write for Console {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// A users server running on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub console: Console,
    shutdown: Shutdown,
    handle: JoinHandle<Result<UserStore, std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger shutdown and return the final store.
    pub async fn stop(self) -> UserStore {
        self.shutdown.trigger();
        self.handle.await.unwrap().unwrap()
    }
}

/// Start the users server with default settings on 127.0.0.1.
pub async fn start_server() -> TestServer {
    let mut config = AppConfig::default();
    config.server.host = "127.0.0.1".into();
    config.server.port = 0;
    config.server.read_timeout_secs = 2;
    start_server_with(config).await
}

pub async fn start_server_with(config: AppConfig) -> TestServer {
    let listener = Listener::bind(&config.server).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    let console = Console::default();
    let server = HttpServer::new(&config);
    let server_console = console.clone();
    let handle =
        tokio::spawn(async move { server.run_with_console(listener, signal, server_console).await });

    TestServer {
        addr,
        console,
        shutdown,
        handle,
    }
}

/// HTTP client that sends `Content-Length` in title case and never reuses connections.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .http1_title_case_headers()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Write raw bytes and read until the server closes.
pub async fn raw_request(addr: SocketAddr, raw: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw).await.unwrap();
    let mut out = Vec::new();
    stream.read_to_end(&mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

/// Split a raw response into its status line, header lines and body.
pub fn split_response(raw: &str) -> (String, Vec<String>, String) {
    let (head, body) = raw.split_once("\r\n\r\n").unwrap();
    let mut lines = head.split("\r\n");
    let status = lines.next().unwrap().to_string();
    let headers = lines.map(str::to_string).collect();
    (status, headers, body.to_string())
}

/// A request seen by the mock API.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: String,
}

#[derive(Debug, Clone, Default)]
pub struct Recorder {
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl Recorder {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start an axum mock of the remote users API.
pub async fn start_mock_api() -> (SocketAddr, Recorder) {
    let recorder = Recorder::default();
    let app = axum::Router::new()
        .fallback(mock_users_api)
        .with_state(recorder.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, recorder)
}

async fn mock_users_api(
    State(recorder): State<Recorder>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<Value>) {
    recorder.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: uri.path().to_string(),
        headers,
        body: body.clone(),
    });

    let sent: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    match (method, uri.path()) {
        (Method::GET, "/users/1") => (
            StatusCode::OK,
            Json(json!({"id": 1, "name": "Leanne Graham", "email": "Sincere@april.biz"})),
        ),
        (Method::POST, "/users") => {
            let mut created = sent;
            created["id"] = json!(11);
            (StatusCode::CREATED, Json(created))
        }
        (Method::PUT, "/users/1") => (StatusCode::OK, Json(sent)),
        (Method::DELETE, "/users/1") => (StatusCode::OK, Json(json!({}))),
        _ => (StatusCode::NOT_FOUND, Json(json!({}))),
    }
}

/// An address with nothing listening on it.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
