//! Network transport for fetching the policy document.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::errors::{GateError, GateResult};

/// Fetches a JSON payload from a URL.
///
/// Any non-success status or undecodable body is an error; the caller decides
/// whether to fall back.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> GateResult<Value>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(timeout: Duration) -> GateResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("update-gate/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client, e.g. one shared with the rest of the host.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> GateResult<Value> {
        debug!(url, "fetching policy document");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GateError::transport(
                format!("GET {url}"),
                format!("unexpected status {status}"),
            ));
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| GateError::malformed(format!("response from {url}"), e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on an ephemeral port and return its URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{addr}/policy.json")
    }

    // Bypass any proxy configured in the environment so requests reach the local listener
    fn local_transport() -> HttpTransport {
        HttpTransport::with_client(reqwest::Client::builder().no_proxy().build().unwrap())
    }

    #[tokio::test]
    async fn success_status_returns_parsed_body() {
        let url = serve_once("HTTP/1.1 200 OK", r#"{"ios":{"enabled":true}}"#).await;
        let transport = local_transport();

        let body = transport.get(&url).await.unwrap();
        assert_eq!(body["ios"]["enabled"], serde_json::Value::Bool(true));
    }

    #[tokio::test]
    async fn error_status_is_a_transport_error() {
        let url = serve_once("HTTP/1.1 503 Service Unavailable", r#"{"ios":{}}"#).await;
        let transport = local_transport();

        let err = transport.get(&url).await.unwrap_err();
        assert!(matches!(
            err,
            GateError::Transport { ref message, .. } if message.contains("503")
        ));
        assert!(err.is_fallback_trigger());
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let url = serve_once("HTTP/1.1 200 OK", "not json").await;
        let transport = local_transport();

        let err = transport.get(&url).await.unwrap_err();
        assert!(matches!(err, GateError::Malformed { .. }));
        assert!(err.is_fallback_trigger());
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let transport = HttpTransport::new(Duration::from_millis(500)).unwrap();
        // Port 9 on localhost is discard; nothing listens in test environments
        let err = transport.get("http://127.0.0.1:9/policy.json").await.unwrap_err();
        assert!(matches!(err, GateError::Transport { .. }));
        assert!(err.is_fallback_trigger());
    }

    #[tokio::test]
    async fn invalid_url_is_a_transport_error() {
        let transport = HttpTransport::new(HttpTransport::DEFAULT_TIMEOUT).unwrap();
        let err = transport.get("not a url").await.unwrap_err();
        assert!(matches!(err, GateError::Transport { .. }));
    }
}
