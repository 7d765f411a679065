use crate::show::ShowRecord;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_API_URL: &str = "https://api.tvmaze.com/shows";

/// The catalog could not be obtained. No partial data accompanies it.
///
/// Variants only matter for logs; the UI reports every kind the same way.
#[derive(Error, Debug)]
pub enum FetchFailure {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("catalog endpoint returned HTTP {status}")]
    Status { status: u16 },

    #[error("malformed catalog payload: {0}")]
    Payload(#[source] serde_json::Error),

    #[error("fetch task ended without a result")]
    Interrupted,
}

impl FetchFailure {
    /// Message shown in the error indicator.
    pub fn user_message(&self) -> String {
        "Failed to load shows. Please try again later.".to_string()
    }
}

/// Build the HTTP client used for the single catalog request.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, FetchFailure> {
    reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(FetchFailure::Network)
}

/// Perform the one outbound GET and parse the whole catalog.
pub async fn fetch_catalog(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<ShowRecord>, FetchFailure> {
    info!(url, "fetching catalog");

    let response = client.get(url).send().await.map_err(|e| {
        warn!(error = %e, "catalog request failed");
        FetchFailure::Network(e)
    })?;

    let status = response.status();
    if !status.is_success() {
        warn!(status = status.as_u16(), "catalog endpoint returned error status");
        return Err(FetchFailure::Status {
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(FetchFailure::Network)?;
    debug!(bytes = body.len(), "catalog body received");

    let shows: Vec<ShowRecord> = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "catalog payload did not parse");
        FetchFailure::Payload(e)
    })?;

    info!(count = shows.len(), "catalog loaded");
    Ok(shows)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one HTTP response on a random local port.
    pub(crate) async fn serve_once(status_line: &'static str, body: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        format!("http://{}/shows", addr)
    }

    fn client() -> reqwest::Client {
        build_client(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let body = r#"[
            {"id": 1, "name": "Zeta", "genres": ["Drama"], "rating": {"average": null}},
            {"id": 2, "name": "Alpha", "genres": ["Comedy"], "rating": {"average": 8.0}}
        ]"#;
        let url = serve_once("200 OK", body.to_string()).await;

        let shows = fetch_catalog(&client(), &url).await.unwrap();
        assert_eq!(shows.len(), 2);
        assert_eq!(shows[0].name, "Zeta");
        assert_eq!(shows[1].average_rating(), Some(8.0));
    }

    #[tokio::test]
    async fn test_fetch_empty_array_is_success() {
        let url = serve_once("200 OK", "[]".to_string()).await;
        let shows = fetch_catalog(&client(), &url).await.unwrap();
        assert!(shows.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let url = serve_once("500 Internal Server Error", "oops".to_string()).await;
        let err = fetch_catalog(&client(), &url).await.unwrap_err();
        assert!(matches!(err, FetchFailure::Status { status: 500 }));
    }

    #[tokio::test]
    async fn test_fetch_not_found_status() {
        let url = serve_once("404 Not Found", "[]".to_string()).await;
        let err = fetch_catalog(&client(), &url).await.unwrap_err();
        assert!(matches!(err, FetchFailure::Status { status: 404 }));
    }

    #[tokio::test]
    async fn test_fetch_malformed_payload() {
        let url = serve_once("200 OK", r#"{"not": "an array"}"#.to_string()).await;
        let err = fetch_catalog(&client(), &url).await.unwrap_err();
        assert!(matches!(err, FetchFailure::Payload(_)));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Bind then drop to get a port nobody listens on
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let err = fetch_catalog(&client(), &format!("http://{}/shows", addr))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchFailure::Network(_)));
    }

    #[test]
    fn test_user_message_is_uniform() {
        let status = FetchFailure::Status { status: 503 };
        let payload = FetchFailure::Payload(serde_json::from_str::<Vec<u8>>("x").unwrap_err());
        assert_eq!(status.user_message(), payload.user_message());
    }
}
