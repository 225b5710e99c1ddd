// src/fetch/client.rs
use crate::utils::error::FetchError;
use reqwest::header;
use std::time::Duration;

// gutenberg.org turns away requests that carry no User-Agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/4.0 (compatible; MSIE 5.01; Windows NT 5.0)";
// Pause before each request so batch runs stay polite to the mirrors.
const REQUEST_DELAY_MS: u64 = 150;

/// The User-Agent actually sent: `user_agent`, or the default when it is blank.
pub fn effective_user_agent(user_agent: &str) -> &str {
    if user_agent.trim().is_empty() {
        DEFAULT_USER_AGENT
    } else {
        user_agent
    }
}

/// Creates a reqwest client that sends `user_agent` with every request.
fn build_client(user_agent: &str) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .build()
}

/// Downloads an etext as raw bytes. Decoding is left to the caller.
pub async fn download_document(url: &str, user_agent: &str) -> Result<Vec<u8>, FetchError> {
    let effective = effective_user_agent(user_agent);
    if effective != user_agent {
        tracing::warn!("Empty User-Agent given, falling back to the default");
    }
    let client = build_client(effective)?;

    tracing::info!("Downloading document from: {}", url);
    tracing::debug!("Using User-Agent: {}", effective);

    tokio::time::sleep(Duration::from_millis(REQUEST_DELAY_MS)).await;

    let response = client.get(url)
        .header(header::ACCEPT, "text/plain,*/*")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        if status == reqwest::StatusCode::FORBIDDEN {
            tracing::warn!("Received 403 Forbidden - check the User-Agent.");
            return Err(FetchError::Forbidden);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::DocumentNotFound(url.to_string()));
        }
        return Err(FetchError::Http(status));
    }

    let body = response.bytes().await?;
    tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);

    Ok(body.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers a single request with `response`; the handle yields the lowercased request head.
    async fn serve_once(response: &'static [u8]) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
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
            socket.write_all(response).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).to_lowercase()
        });
        (format!("http://{}/dirs/etext00/0ws2510.txt", addr), handle)
    }

    #[test]
    fn blank_user_agent_falls_back_to_default() {
        assert_eq!(effective_user_agent(""), DEFAULT_USER_AGENT);
        assert_eq!(effective_user_agent("  \t"), DEFAULT_USER_AGENT);
        assert_eq!(effective_user_agent("my-reader/2.0"), "my-reader/2.0");
        assert!(!DEFAULT_USER_AGENT.trim().is_empty());
    }

    #[tokio::test]
    async fn download_returns_raw_bytes_and_sends_user_agent() {
        let (url, server) = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Length: 9\r\nConnection: close\r\n\r\nraw \xe9text",
        )
        .await;

        let body = download_document(&url, "gutenberg-cleaner-test/1.0").await.unwrap();
        assert_eq!(body, b"raw \xe9text");

        let request = server.await.unwrap();
        assert!(request.contains("user-agent: gutenberg-cleaner-test/1.0"), "{}", request);
    }

    #[tokio::test]
    async fn not_found_maps_to_document_not_found() {
        let (url, server) =
            serve_once(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;

        let err = download_document(&url, "gutenberg-cleaner-test/1.0").await.unwrap_err();
        match err {
            FetchError::DocumentNotFound(missing) => assert_eq!(missing, url),
            other => panic!("expected DocumentNotFound, got {:?}", other),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn forbidden_with_blank_user_agent_still_sends_default() {
        let (url, server) =
            serve_once(b"HTTP/1.1 403 Forbidden\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;

        let err = download_document(&url, "").await.unwrap_err();
        assert!(matches!(err, FetchError::Forbidden), "{:?}", err);

        let request = server.await.unwrap();
        let expected = format!("user-agent: {}", DEFAULT_USER_AGENT.to_lowercase());
        assert!(request.contains(&expected), "{}", request);
    }
}
