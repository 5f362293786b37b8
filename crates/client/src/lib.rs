//! linkrelay HTTP client
//!
//! A native Rust client for the linkrelay server. It builds the same
//! multipart submission the upload page sends and decodes the response
//! envelope.
//!
//! # Quick Start
//!
//! ```no_run
//! use linkrelay_client::{Attachment, Channel, RelayServerClient, SubmissionForm};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), linkrelay_client::Error> {
//!     let client = RelayServerClient::new("http://localhost:8080")?;
//!
//!     let mut form = SubmissionForm::new().with_title("Q3 review");
//!     form.add_link("example.com/report");
//!     form.attach(Channel::Pdfs, Attachment::new("deck.pdf", b"%PDF".to_vec()));
//!
//!     let response = client.submit(form).await?;
//!     match response.failure_message() {
//!         None => println!("relayed: {:?}", response.n8n),
//!         Some(message) => eprintln!("failed: {message}"),
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod submission;

pub use error::Error;
pub use submission::{SubmissionForm, SubmitResponse};

// Re-exported so callers don't need a direct `linkrelay_core` dependency.
pub use linkrelay_core::{Attachment, Channel, LinkDraft, LinkSet};

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client for the linkrelay server.
#[derive(Debug, Clone)]
pub struct RelayServerClient {
    client: Client,
    base_url: String,
}

/// Builder for configuring a [`RelayServerClient`].
#[derive(Debug)]
pub struct RelayServerClientBuilder {
    base_url: String,
    timeout: Duration,
    client: Option<Client>,
}

impl RelayServerClientBuilder {
    /// Create a new builder with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            client: None,
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a custom reqwest Client.
    #[must_use]
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<RelayServerClient, Error> {
        let client = match self.client {
            Some(c) => c,
            None => Client::builder()
                .timeout(self.timeout)
                .build()
                .map_err(|e| Error::Configuration(e.to_string()))?,
        };

        Ok(RelayServerClient {
            client,
            base_url: self.base_url,
        })
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub webhook_configured: bool,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

impl RelayServerClient {
    /// Create a new client with default configuration.
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        RelayServerClientBuilder::new(base_url).build()
    }

    /// Create a builder for advanced configuration.
    pub fn builder(base_url: impl Into<String>) -> RelayServerClientBuilder {
        RelayServerClientBuilder::new(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Probe `/health`.
    pub async fn health(&self) -> Result<HealthStatus, Error> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Http {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<HealthStatus>()
            .await
            .map_err(|e| Error::Deserialization(e.to_string()))
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Post a submission to `/api/submit` and decode the envelope.
    ///
    /// Relay failures come back as `Ok` with `ok == false`; only transport
    /// and decoding problems are `Err`. A non-2xx answer without a JSON
    /// envelope is reported as a failed response carrying just the status.
    pub async fn submit(&self, form: SubmissionForm) -> Result<SubmitResponse, Error> {
        let url = format!("{}/api/submit", self.base_url);
        debug!(
            links = form.links().len(),
            pdfs = form.attachments(Channel::Pdfs).len(),
            ctrs = form.attachments(Channel::Ctrs).len(),
            "submitting"
        );

        let response = self
            .client
            .post(&url)
            .multipart(form.into_multipart())
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        match serde_json::from_str::<SubmitResponse>(&body) {
            Ok(mut envelope) => {
                envelope.status = status.as_u16();
                Ok(envelope)
            }
            Err(_) if !status.is_success() => Ok(SubmitResponse::without_envelope(status.as_u16())),
            Err(e) => Err(Error::Deserialization(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    use super::*;

    struct MockRelayServer {
        listener: TcpListener,
        base_url: String,
    }

    impl MockRelayServer {
        async fn start() -> Self {
            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("failed to bind mock server");
            let port = listener.local_addr().unwrap().port();
            Self {
                listener,
                base_url: format!("http://127.0.0.1:{port}"),
            }
        }

        async fn respond_once(self, status_code: u16, body: &'static str) -> Vec<u8> {
            let (mut stream, _) = self.listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;

            let response = format!(
                "HTTP/1.1 {status_code} OK\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\
                 \r\n\
                 {body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
            request
        }
    }

    async fn read_request(stream: &mut TcpStream) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 8192];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let head = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
            let body_len = buf.len() - header_end - 4;
            let content_length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok());
            let complete = match content_length {
                Some(len) => body_len >= len,
                None if head.contains("transfer-encoding: chunked") => {
                    buf.ends_with(b"0\r\n\r\n")
                }
                None => true,
            };
            if complete {
                break;
            }
        }
        buf
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = RelayServerClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn builder_accepts_timeout() {
        let client = RelayServerClient::builder("http://localhost:8080")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[tokio::test]
    async fn health_decodes_status() {
        let server = MockRelayServer::start().await;
        let client = RelayServerClient::new(&server.base_url).unwrap();

        let handle = tokio::spawn(async move {
            server
                .respond_once(200, r#"{"status":"ok","webhook_configured":true}"#)
                .await
        });
        let health = client.health().await.unwrap();
        let request = handle.await.unwrap();

        assert!(health.is_ok());
        assert!(health.webhook_configured);
        assert!(String::from_utf8_lossy(&request).starts_with("GET /health "));
    }

    #[tokio::test]
    async fn health_unreachable_is_connection_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = RelayServerClient::new(format!("http://127.0.0.1:{port}")).unwrap();
        let err = client.health().await.unwrap_err();
        assert!(err.is_connection());
    }

    #[tokio::test]
    async fn submit_sends_multipart_form() {
        let server = MockRelayServer::start().await;
        let client = RelayServerClient::new(&server.base_url).unwrap();

        let mut form = SubmissionForm::new().with_title("Q3 review");
        form.add_link("example.com/a");
        form.add_link("https://example.com/a");
        form.attach(
            Channel::Pdfs,
            Attachment::new("deck.pdf", b"%PDF-1.4".to_vec()).with_content_type("application/pdf"),
        );
        form.attach(Channel::Ctrs, Attachment::new("q3.ctr", b"ctr".to_vec()));

        let handle =
            tokio::spawn(async move { server.respond_once(200, r#"{"ok":true,"n8n":{"id":7}}"#).await });
        let response = client.submit(form).await.unwrap();
        let request = String::from_utf8_lossy(&handle.await.unwrap()).into_owned();

        assert!(response.is_success());
        assert_eq!(response.n8n, Some(serde_json::json!({"id": 7})));

        assert!(request.starts_with("POST /api/submit "));
        assert!(request.to_lowercase().contains("content-type: multipart/form-data"));
        assert!(request.contains("Q3 review"));
        assert!(request.contains(r#"["https://example.com/a"]"#));
        assert!(request.contains("name=\"pdfs\"; filename=\"deck.pdf\""));
        assert!(request.contains("name=\"ctrs\"; filename=\"q3.ctr\""));
        assert!(request.contains("%PDF-1.4"));
    }

    #[tokio::test]
    async fn submit_reports_upstream_failure() {
        let server = MockRelayServer::start().await;
        let client = RelayServerClient::new(&server.base_url).unwrap();

        let handle = tokio::spawn(async move {
            server
                .respond_once(
                    502,
                    r#"{"ok":false,"error":"upstream error: 503","detail":{"raw":"busy"}}"#,
                )
                .await
        });
        let response = client.submit(SubmissionForm::new()).await.unwrap();
        handle.await.unwrap();

        assert!(!response.is_success());
        assert_eq!(response.status, 502);
        assert_eq!(
            response.failure_message().as_deref(),
            Some("upstream error: 503")
        );
        assert_eq!(response.detail, Some(serde_json::json!({"raw": "busy"})));
    }

    #[tokio::test]
    async fn submit_without_envelope_reports_status() {
        let server = MockRelayServer::start().await;
        let client = RelayServerClient::new(&server.base_url).unwrap();

        let handle = tokio::spawn(async move { server.respond_once(413, "too large").await });
        let response = client.submit(SubmissionForm::new()).await.unwrap();
        handle.await.unwrap();

        assert_eq!(response.failure_message().as_deref(), Some("HTTP 413"));
    }

    #[tokio::test]
    async fn submit_undecodable_success_is_error() {
        let server = MockRelayServer::start().await;
        let client = RelayServerClient::new(&server.base_url).unwrap();

        let handle = tokio::spawn(async move { server.respond_once(200, "<html>").await });
        let err = client.submit(SubmissionForm::new()).await.unwrap_err();
        handle.await.unwrap();

        assert!(matches!(err, Error::Deserialization(_)));
    }
}
