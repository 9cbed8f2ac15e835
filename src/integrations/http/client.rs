// src/integrations/http/client.rs
//
// HTTP artifact fetcher
//
// ARCHITECTURE:
// - Existence check (HEAD) followed by a full download (GET)
// - Maps transport and status failures onto FetchError reasons
// - `file://` URLs are read from the local file system, so local mirrors
//   can take part in a chain
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE: it never decides fallback, it only reports
// - Every failure is returned, never panicked or retried here

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode, Url};
use std::time::Duration;

use crate::error::{AppResult, FetchError};
use crate::integrations::fetcher::ArtifactFetcher;

const USER_AGENT: &str = concat!("artifacthub/", env!("CARGO_PKG_VERSION"));

/// Fetches artifacts over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpArtifactFetcher {
    http_client: Client,
}

impl HttpArtifactFetcher {
    /// Create a fetcher with its own connection pool
    pub fn new() -> AppResult<Self> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self::with_client(http_client))
    }

    /// Reuse an existing client
    pub fn with_client(http_client: Client) -> Self {
        Self { http_client }
    }

    // ========================================================================
    // INTERNAL: HTTP
    // ========================================================================

    async fn fetch_http(&self, url: &Url, timeout: Duration) -> Result<Vec<u8>, FetchError> {
        let response = self
            .http_client
            .head(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        // Some repositories refuse HEAD; fall through to GET for those
        let status = response.status();
        if !status.is_success()
            && status != StatusCode::METHOD_NOT_ALLOWED
            && status != StatusCode::NOT_IMPLEMENTED
        {
            return Err(classify_status(status));
        }

        let response = self
            .http_client
            .get(url.clone())
            .header(header::ACCEPT, "*/*")
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        if !response.status().is_success() {
            return Err(classify_status(response.status()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        Ok(body.to_vec())
    }

    // ========================================================================
    // INTERNAL: file://
    // ========================================================================

    async fn fetch_file(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let path = url
            .to_file_path()
            .map_err(|_| FetchError::MalformedResponse(format!("not a local file URL: {}", url)))?;

        tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FetchError::NotFound,
            _ => FetchError::Connection(format!("{}: {}", path.display(), e)),
        })
    }
}

#[async_trait]
impl ArtifactFetcher for HttpArtifactFetcher {
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<Vec<u8>, FetchError> {
        match url.scheme() {
            "file" => self.fetch_file(url).await,
            "http" | "https" => self.fetch_http(url, timeout).await,
            other => Err(FetchError::Connection(format!("unsupported scheme '{}'", other))),
        }
    }
}

fn classify_status(status: StatusCode) -> FetchError {
    match status {
        StatusCode::NOT_FOUND | StatusCode::GONE => FetchError::NotFound,
        other => FetchError::HttpStatus(other.as_u16()),
    }
}

fn classify_transport_error(err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::Timeout;
    }
    if is_connection_refused(err) {
        return FetchError::ConnectionRefused;
    }
    if err.is_body() || err.is_decode() {
        return FetchError::MalformedResponse(err.to_string());
    }
    FetchError::Connection(err.to_string())
}

/// Walk the source chain looking for an io::ErrorKind::ConnectionRefused
fn is_connection_refused(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut source = Some(err);
    while let Some(current) = source {
        if let Some(io) = current.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::ConnectionRefused {
                return true;
            }
        }
        source = current.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Canned HTTP repository: answers HEAD and GET with fixed statuses and
    /// records the method of every request it receives.
    async fn stub_repository(
        head_status: u16,
        get_status: u16,
        body: &'static [u8],
    ) -> (Url, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let methods = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&methods);

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let seen = Arc::clone(&seen);

                tokio::spawn(async move {
                    let mut request = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => request.extend_from_slice(&chunk[..n]),
                        }
                    }

                    let head = String::from_utf8_lossy(&request);
                    let method = head.split_whitespace().next().unwrap_or_default().to_string();
                    seen.lock().unwrap().push(method.clone());

                    let status = if method == "HEAD" { head_status } else { get_status };
                    let mut response = format!(
                        "HTTP/1.1 {} Stub\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                        status,
                        body.len()
                    )
                    .into_bytes();
                    if method != "HEAD" {
                        response.extend_from_slice(body);
                    }

                    let _ = socket.write_all(&response).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        let url = Url::parse(&format!("http://{}/org/example/lib/1.0/lib-1.0.jar", addr)).unwrap();
        (url, methods)
    }

    fn recorded(methods: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
        methods.lock().unwrap().clone()
    }

    /// Talks to the stub directly, whatever proxy the environment sets
    fn local_fetcher() -> HttpArtifactFetcher {
        HttpArtifactFetcher::with_client(Client::builder().no_proxy().build().unwrap())
    }

    #[tokio::test]
    async fn test_head_not_found_skips_download() {
        let (url, methods) = stub_repository(404, 200, b"jar").await;

        let fetcher = local_fetcher();
        let result = fetcher.fetch(&url, Duration::from_secs(5)).await;

        assert_eq!(result, Err(FetchError::NotFound));
        assert_eq!(recorded(&methods), vec!["HEAD"]);
    }

    #[tokio::test]
    async fn test_head_refused_falls_through_to_get() {
        for head_status in [405, 501] {
            let (url, methods) = stub_repository(head_status, 200, b"PK\x03\x04jar").await;

            let fetcher = local_fetcher();
            let bytes = fetcher.fetch(&url, Duration::from_secs(5)).await.unwrap();

            assert_eq!(bytes, b"PK\x03\x04jar");
            assert_eq!(recorded(&methods), vec!["HEAD", "GET"]);
        }
    }

    #[tokio::test]
    async fn test_get_server_error_is_http_status() {
        let (url, methods) = stub_repository(200, 503, b"").await;

        let fetcher = local_fetcher();
        let result = fetcher.fetch(&url, Duration::from_secs(5)).await;

        assert_eq!(result, Err(FetchError::HttpStatus(503)));
        assert_eq!(recorded(&methods), vec!["HEAD", "GET"]);
    }

    #[tokio::test]
    async fn test_successful_download_returns_body() {
        let (url, methods) = stub_repository(200, 200, b"PK\x03\x04 full jar body").await;

        let fetcher = local_fetcher();
        let bytes = fetcher.fetch(&url, Duration::from_secs(5)).await.unwrap();

        assert_eq!(bytes, b"PK\x03\x04 full jar body");
        assert_eq!(recorded(&methods), vec!["HEAD", "GET"]);
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(classify_status(StatusCode::NOT_FOUND), FetchError::NotFound);
        assert_eq!(classify_status(StatusCode::GONE), FetchError::NotFound);
        assert_eq!(
            classify_status(StatusCode::SERVICE_UNAVAILABLE),
            FetchError::HttpStatus(503)
        );
    }

    #[test]
    fn test_connection_refused_detection() {
        let refused = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(is_connection_refused(&refused));

        let other = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert!(!is_connection_refused(&other));
    }

    #[tokio::test]
    async fn test_fetch_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"PK\x03\x04jar").unwrap();
        let url = Url::from_file_path(file.path()).unwrap();

        let fetcher = HttpArtifactFetcher::new().unwrap();
        let bytes = fetcher.fetch(&url, Duration::from_secs(1)).await.unwrap();
        assert_eq!(bytes, b"PK\x03\x04jar");
    }

    #[tokio::test]
    async fn test_fetch_missing_local_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let url = Url::from_file_path(dir.path().join("missing.jar")).unwrap();

        let fetcher = HttpArtifactFetcher::new().unwrap();
        let result = fetcher.fetch(&url, Duration::from_secs(1)).await;
        assert_eq!(result, Err(FetchError::NotFound));
    }

    #[tokio::test]
    async fn test_connection_refused_on_closed_port() {
        // Bind then drop to get a port nobody listens on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = Url::parse(&format!("http://127.0.0.1:{}/a.jar", port)).unwrap();

        let fetcher = local_fetcher();
        let result = fetcher.fetch(&url, Duration::from_secs(2)).await;
        assert!(
            matches!(result, Err(FetchError::ConnectionRefused) | Err(FetchError::Connection(_))),
            "unexpected result: {:?}",
            result
        );
    }
}
