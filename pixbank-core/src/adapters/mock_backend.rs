//! Mock PixBank backend for testing
//!
//! A small HTTP server on a random local port that answers the `/v1` REST
//! endpoints with canned data and records every request it receives, so
//! tests can assert on methods, paths, query strings and headers.
//!
//! - `POST /v1/auth/sign_up` and `PUT /v1/auth/sign_in` are public
//! - everything under `/v1/users` requires `Authorization: Bearer <token>`

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{json, Value as JsonValue};

/// Mock server configuration
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Token issued on sign in and required on `/users/*`
    pub token: String,
    /// Password accepted by sign in
    pub password: String,
    /// Answer transfers with this status instead of creating them
    pub transfer_status: Option<u16>,
    /// Number of accounts owned by the caller
    pub num_accounts: usize,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            token: "mock-token".to_string(),
            password: "secret".to_string(),
            transfer_status: None,
            num_accounts: 2,
        }
    }
}

/// A request as seen by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    /// Header names are lowercased
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.headers
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn json_body(&self) -> Option<JsonValue> {
        serde_json::from_str(&self.body).ok()
    }

    /// Query parameters in the order they were sent
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .as_deref()
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

pub struct MockBackend {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

impl MockBackend {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let requests = Arc::new(Mutex::new(Vec::new()));

        // Non-blocking so the loop can observe shutdown
        listener.set_nonblocking(true)?;

        let running_clone = running.clone();
        let requests_clone = requests.clone();
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let log = requests_clone.clone();
                        thread::spawn(move || handle_connection(stream, &cfg, &log));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            requests,
            thread_handle: Some(thread_handle),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// API base URL including the `/v1` prefix
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}/v1", self.port)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests().pop()
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.stop();
    }
}

fn read_request(stream: &TcpStream) -> std::io::Result<Option<RecordedRequest>> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line)? == 0 {
        return Ok(None);
    }
    let mut parts = request_line.split_whitespace();
    let (method, target) = match (parts.next(), parts.next()) {
        (Some(m), Some(t)) => (m.to_string(), t.to_string()),
        _ => return Ok(None),
    };

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_lowercase(), value.trim().to_string()));
        }
    }

    let content_length = headers
        .iter()
        .find(|(n, _)| n == "content-length")
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0; content_length];
    reader.read_exact(&mut body)?;

    let (path, query) = match target.split_once('?') {
        Some((p, q)) => (p.to_string(), Some(q.to_string())),
        None => (target, None),
    };

    Ok(Some(RecordedRequest {
        method,
        path,
        query,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    }))
}

fn handle_connection(
    mut stream: TcpStream,
    config: &MockConfig,
    log: &Arc<Mutex<Vec<RecordedRequest>>>,
) {
    let _ = stream.set_nonblocking(false);

    let request = match read_request(&stream) {
        Ok(Some(request)) => request,
        _ => {
            send_response(&mut stream, 400, "Bad Request", r#"{"error":"Invalid request"}"#);
            return;
        }
    };

    if let Ok(mut requests) = log.lock() {
        requests.push(request.clone());
    }

    let (status, body) = route(&request, config);
    send_response(&mut stream, status, reason(status), &body.to_string());
}

fn route(request: &RecordedRequest, config: &MockConfig) -> (u16, JsonValue) {
    let method = request.method.as_str();
    let path = request.path.trim_end_matches('/');

    match (method, path) {
        ("POST", "/v1/auth/sign_up") => {
            let user = request
                .json_body()
                .and_then(|b| b.get("user").cloned())
                .unwrap_or(JsonValue::Null);
            (
                201,
                json!({
                    "token": "signup-token",
                    "user": {"id": 42, "name": user["name"], "email": user["email"]}
                }),
            )
        }
        ("PUT", "/v1/auth/sign_in") => {
            let body = request.json_body().unwrap_or(JsonValue::Null);
            if body["user"]["password"] == json!(config.password) {
                (
                    200,
                    json!({
                        "token": config.token,
                        "user": {"id": 1, "name": "Ana Souza", "email": body["user"]["email"]}
                    }),
                )
            } else {
                (401, json!({"error": "Invalid email or password"}))
            }
        }
        (_, p) if p.starts_with("/v1/users") => {
            let expected = format!("Bearer {}", config.token);
            if request.header("authorization") != Some(expected.as_str()) {
                return (401, json!({"error": "Unauthorized"}));
            }
            route_authenticated(method, p, request, config)
        }
        _ => (404, json!({"error": "Endpoint not found"})),
    }
}

fn route_authenticated(
    method: &str,
    path: &str,
    request: &RecordedRequest,
    config: &MockConfig,
) -> (u16, JsonValue) {
    match (method, path) {
        ("GET", "/v1/users/infos") => (
            200,
            json!({"user": {"id": 1, "name": "Ana Souza", "email": "ana@example.com"}}),
        ),
        ("GET", "/v1/users/bank_accounts/my") => {
            let accounts: Vec<JsonValue> = (0..config.num_accounts)
                .map(|i| mock_account(i as i64 + 1, "Ana Souza"))
                .collect();
            (200, json!({"user_bank_accounts": accounts}))
        }
        ("GET", "/v1/users/bank_accounts") => (
            200,
            json!({
                "user_bank_accounts": [
                    mock_account(100, "Bruno Lima"),
                    mock_account(101, "Carla Dias")
                ]
            }),
        ),
        ("GET", "/v1/users/bank_account_transfers/statements") => {
            let page: u64 = request
                .query_pairs()
                .into_iter()
                .find(|(k, _)| k == "page")
                .and_then(|(_, v)| v.parse().ok())
                .unwrap_or(1);
            (
                200,
                json!({
                    "data": {
                        "bank_account_transfers": [mock_transfer(page as i64, "50.25", 1)],
                        "total_records": 21,
                        "total_pages": 3,
                        "current_page": page
                    }
                }),
            )
        }
        ("POST", "/v1/users/bank_account_transfers") => {
            if let Some(status) = config.transfer_status {
                return (status, json!({"errors": ["Transfer rejected"]}));
            }
            let body = request.json_body().unwrap_or(JsonValue::Null);
            let inner = &body["bank_account_transfer"];
            let from_id = inner["from_user_bank_account_id"].as_i64().unwrap_or(0);
            let to_id = inner["to_user_bank_account_id"].as_i64().unwrap_or(0);
            (
                201,
                json!({
                    "id": 500,
                    "amount_to_transfer": inner["amount_to_transfer"],
                    "transfer_type": inner["transfer_type"],
                    "created_at": "2024-03-01T12:00:00Z",
                    "source_account": mock_account(from_id, "Ana Souza"),
                    "destination_account": mock_account(to_id, "Bruno Lima")
                }),
            )
        }
        _ => (404, json!({"error": "Endpoint not found"})),
    }
}

fn mock_account(id: i64, holder: &str) -> JsonValue {
    json!({
        "id": id,
        "bank_name": "Banco Exemplo",
        "bank_code": "999",
        "agency_number": "0001",
        "agency_digit": "9",
        "number": format!("{:06}", id),
        "account_number": format!("{:05}", id),
        "account_digit": "0",
        "account_type": "checking",
        "holder_name": holder,
        "balance": format!("{}.50", 1000 * id),
        "amount": 1000 * id,
        "created_at": "2024-01-15T10:00:00.000Z",
        "updated_at": "2024-01-15T10:00:00.000Z"
    })
}

fn mock_transfer(id: i64, amount: &str, transfer_type: u8) -> JsonValue {
    json!({
        "id": id,
        "amount_to_transfer": amount,
        "transfer_type": transfer_type,
        "created_at": "2024-03-01T12:00:00Z"
    })
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        _ => "Error",
    }
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_server_starts() {
        let server = MockBackend::start(MockConfig::default()).unwrap();
        assert!(server.port() > 0);
        assert!(server.base_url().ends_with("/v1"));
        assert!(server.requests().is_empty());
    }

    #[test]
    fn test_route_requires_token() {
        let request = RecordedRequest {
            method: "GET".to_string(),
            path: "/v1/users/infos".to_string(),
            query: None,
            headers: vec![],
            body: String::new(),
        };
        let (status, _) = route(&request, &MockConfig::default());
        assert_eq!(status, 401);

        let authorized = RecordedRequest {
            headers: vec![("authorization".to_string(), "Bearer mock-token".to_string())],
            ..request
        };
        let (status, body) = route(&authorized, &MockConfig::default());
        assert_eq!(status, 200);
        assert_eq!(body["user"]["id"], json!(1));
    }

    #[test]
    fn test_query_pairs() {
        let request = RecordedRequest {
            method: "GET".to_string(),
            path: "/v1/users/bank_account_transfers/statements".to_string(),
            query: Some("transfer_type=sent&page=2".to_string()),
            headers: vec![],
            body: String::new(),
        };
        assert_eq!(
            request.query_pairs(),
            vec![
                ("transfer_type".to_string(), "sent".to_string()),
                ("page".to_string(), "2".to_string())
            ]
        );
    }
}
