//! Remote quote endpoint client
//!
//! HTTP client for the remote quote collection: `GET` returns a JSON array
//! of quotes, `POST` announces a newly added quote.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::models::{Quote, RemoteQuote};

/// User agent sent with every request
const USER_AGENT: &str = concat!("quotebook/", env!("CARGO_PKG_VERSION"));

/// A source of remote quotes
///
/// `HttpRemote` is the real implementation; tests substitute in-memory
/// fakes.
#[allow(async_fn_in_trait)]
pub trait RemoteSource {
    /// Fetch the full remote collection
    async fn fetch(&self) -> Result<Vec<RemoteQuote>>;

    /// Send a newly added quote to the remote
    async fn push(&self, quote: &Quote) -> Result<()>;
}

/// HTTP client for the remote endpoint
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: reqwest::Client,
    url: String,
}

impl HttpRemote {
    /// Create a client for `url` with the given request timeout
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// The endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RemoteSource for HttpRemote {
    async fn fetch(&self) -> Result<Vec<RemoteQuote>> {
        debug!(url = %self.url, "fetching remote quotes");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.url))?
            .error_for_status()
            .with_context(|| format!("Remote {} returned an error", self.url))?;

        let quotes: Vec<RemoteQuote> = response
            .json()
            .await
            .with_context(|| format!("Remote {} did not return a quote list", self.url))?;

        debug!(count = quotes.len(), "fetched remote quotes");
        Ok(quotes)
    }

    async fn push(&self, quote: &Quote) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(quote)
            .send()
            .await
            .with_context(|| format!("Failed to post quote to {}", self.url))?;

        let status = response.status();
        if status.is_success() {
            info!(id = quote.id, %status, "posted quote to remote");
        } else {
            warn!(id = quote.id, %status, "remote rejected posted quote");
        }
        Ok(())
    }
}

/// Push a quote and log the outcome; errors never propagate
pub async fn push_and_log<R: RemoteSource>(remote: &R, quote: &Quote) {
    if let Err(e) = remote.push(quote).await {
        warn!(id = quote.id, error = %e, "failed to post quote");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a local port and return its URL
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            // Read until the end of the request headers
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
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}/posts", addr)
    }

    #[test]
    fn test_http_remote_keeps_url() {
        let remote =
            HttpRemote::new("https://example.com/posts", Duration::from_secs(5)).unwrap();
        assert_eq!(remote.url(), "https://example.com/posts");
    }

    #[test]
    fn test_user_agent() {
        assert!(USER_AGENT.starts_with("quotebook/"));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_fails() {
        // Port 9 (discard) on localhost is closed in test environments
        let remote = HttpRemote::new("http://127.0.0.1:9/quotes", Duration::from_secs(2)).unwrap();
        assert!(remote.fetch().await.is_err());
    }

    #[tokio::test]
    async fn test_push_and_log_swallows_errors() {
        let remote = HttpRemote::new("http://127.0.0.1:9/quotes", Duration::from_secs(2)).unwrap();
        push_and_log(&remote, &Quote::new(1, "A", "X")).await;
    }

    #[tokio::test]
    async fn test_fetch_decodes_placeholder_posts() {
        let url = serve_once(
            "200 OK",
            r#"[
                {"userId": 1, "id": 1, "title": "sunt aut facere", "body": "quia et suscipit"},
                {"userId": 1, "id": 2, "title": "qui est esse", "body": "est rerum tempore"}
            ]"#,
        )
        .await;
        let remote = HttpRemote::new(&url, Duration::from_secs(5)).unwrap();

        let quotes = remote.fetch().await.unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].id, 1);
        assert_eq!(quotes[1].content(), Some("qui est esse"));
        assert!(quotes[1].category.is_none());
    }

    #[tokio::test]
    async fn test_fetch_rejects_error_status() {
        let url = serve_once("500 Internal Server Error", "{}").await;
        let remote = HttpRemote::new(&url, Duration::from_secs(5)).unwrap();

        let err = remote.fetch().await.unwrap_err();
        assert!(format!("{:#}", err).contains("returned an error"));
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_list_body() {
        let url = serve_once("200 OK", r#"{"id": 1, "title": "not a list"}"#).await;
        let remote = HttpRemote::new(&url, Duration::from_secs(5)).unwrap();

        let err = remote.fetch().await.unwrap_err();
        assert!(format!("{:#}", err).contains("did not return a quote list"));
    }
}
