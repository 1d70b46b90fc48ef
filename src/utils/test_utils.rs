//! Shared fixtures: preconfigured apps and an in-process HTTP backend.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

use crate::core::app::{apply_action, App, AppAction, AppInitConfig, Theme};
use crate::core::providers::Provider;

pub const TEST_BASE_URL: &str = "http://127.0.0.1:9";

/// Client that never routes loopback traffic through a proxy.
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("test client should build")
}

pub fn test_init_config(base_url: &str) -> AppInitConfig {
    AppInitConfig {
        base_url: base_url.to_string(),
        model: Provider::Gemini,
        reasoning: false,
        theme: Theme::Light,
        request_timeout: None,
    }
}

pub fn create_test_app() -> App {
    create_test_app_with_base_url(TEST_BASE_URL)
}

pub fn create_test_app_with_base_url(base_url: &str) -> App {
    App::with_client(test_client(), test_init_config(base_url))
}

/// An app whose probe already succeeded and which holds a credential.
pub fn create_online_test_app() -> App {
    let mut app = create_test_app();
    app.session.set_credential("test-key");
    apply_action(&mut app, AppAction::StartProbe);
    apply_action(&mut app, AppAction::ProbeCompleted { result: Ok(()) });
    app
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
    pub delay: Duration,
}

impl MockResponse {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub request_line: String,
    pub body: Vec<u8>,
}

pub type CapturedRequests = Arc<Mutex<Vec<CapturedRequest>>>;

/// Serve `responses` in order, one connection each, then stop accepting.
/// Returns the base URL and the requests received so far.
pub async fn spawn_mock_backend(responses: Vec<MockResponse>) -> (String, CapturedRequests) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("local addr should resolve");
    let captured: CapturedRequests = Arc::new(Mutex::new(Vec::new()));
    let captured_for_server = Arc::clone(&captured);

    tokio::spawn(async move {
        for response in responses {
            let (mut stream, _) = listener.accept().await.map_err(|err| err.to_string())?;
            let (request_line, body) = read_http_request(&mut stream).await?;
            captured_for_server
                .lock()
                .await
                .push(CapturedRequest { request_line, body });

            if !response.delay.is_zero() {
                tokio::time::sleep(response.delay).await;
            }

            let raw = format!(
                "HTTP/1.1 {} {}\r\ncontent-type: {}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                response.status,
                if response.status < 400 { "OK" } else { "Error" },
                response.content_type,
                response.body.len(),
                response.body
            );
            stream
                .write_all(raw.as_bytes())
                .await
                .map_err(|err| err.to_string())?;
            let _ = stream.shutdown().await;
        }
        Ok::<(), String>(())
    });

    (format!("http://{addr}"), captured)
}

/// A loopback address with nothing listening on it.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("local addr should resolve");
    drop(listener);
    format!("http://{addr}")
}

async fn read_http_request(stream: &mut TcpStream) -> Result<(String, Vec<u8>), String> {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 1024];
    let header_end = loop {
        if let Some(pos) = buffer.windows(4).position(|window| window == b"\r\n\r\n") {
            break pos + 4;
        }
        let read = stream
            .read(&mut chunk)
            .await
            .map_err(|err| err.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP headers".to_string());
        }
        buffer.extend_from_slice(&chunk[..read]);
    };

    let headers = String::from_utf8_lossy(&buffer[..header_end]).to_string();
    let mut lines = headers.split("\r\n");
    let request_line = lines.next().unwrap_or_default().to_string();
    let mut content_length = 0_usize;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse::<usize>().map_err(|err| err.to_string())?;
            }
        }
    }

    let mut body = buffer[header_end..].to_vec();
    while body.len() < content_length {
        let read = stream
            .read(&mut chunk)
            .await
            .map_err(|err| err.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP body".to_string());
        }
        body.extend_from_slice(&chunk[..read]);
    }
    body.truncate(content_length);

    Ok((request_line, body))
}
