use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use humanizer_core::api as core_api;
use humanizer_core::api::{BackendError, HttpBackendConfig, HumanizeRequest};

use super::response::decode_response;

/// POSTs each request to a humanization service.
pub struct HttpHumanizer {
    cfg: HttpBackendConfig,
    client: reqwest::Client,
}

impl HttpHumanizer {
    pub fn new(cfg: HttpBackendConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms.max(1)))
            .build()?;
        Ok(Self { cfg, client })
    }

    fn classify(&self, e: reqwest::Error) -> BackendError {
        if e.is_connect() {
            BackendError::Unavailable(format!(
                "humanizer service at {} is not reachable: {}",
                self.cfg.url, e
            ))
        } else if e.is_timeout() {
            BackendError::Failed(format!(
                "request to {} timed out after {} ms",
                self.cfg.url, self.cfg.timeout_ms
            ))
        } else {
            BackendError::Failed(format!("request to {} failed: {}", self.cfg.url, e))
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[async_trait]
impl core_api::Humanizer for HttpHumanizer {
    fn name(&self) -> &str {
        "http"
    }

    async fn humanize(&self, request: &HumanizeRequest) -> Result<Value, BackendError> {
        if !is_http_url(&self.cfg.url) {
            return Err(BackendError::Unavailable(format!(
                "http backend must be a URL (http/https), got: {}",
                self.cfg.url
            )));
        }

        tracing::debug!(url = %self.cfg.url, "posting humanize request");
        let mut req = self.client.post(&self.cfg.url).json(request);
        if !self.cfg.api_key.trim().is_empty() {
            req = req.bearer_auth(self.cfg.api_key.trim());
        }

        let resp = req.send().await.map_err(|e| self.classify(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "humanizer service returned an error");
            return Err(BackendError::Failed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body.trim_end()
            )));
        }

        let body = resp.bytes().await.map_err(|e| self.classify(e))?;
        Ok(decode_response(&body))
    }

    async fn check_dependencies(&self) -> Vec<String> {
        if is_http_url(&self.cfg.url) {
            Vec::new()
        } else {
            vec![format!(
                "http backend url must start with http:// or https:// (got '{}')",
                self.cfg.url
            )]
        }
    }

    fn install_hint(&self) -> Vec<String> {
        vec![
            "1. Start a humanization service that accepts POST {\"text\", \"strength\", \"personality\"}".to_string(),
            "2. Point the backend at it in ~/.humanizer/config.toml:".to_string(),
            "   [backend]".to_string(),
            "   provider = \"http\"".to_string(),
            format!("   url = \"{}\"", self.cfg.url),
            "   OR set HUMANIZER_URL (and HUMANIZER_API_KEY if required)".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use humanizer_core::api::{Humanizer, Strength};
    use mockito::Matcher;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn backend(url: String, api_key: &str) -> HttpHumanizer {
        HttpHumanizer::new(HttpBackendConfig {
            url,
            api_key: api_key.to_string(),
            timeout_ms: 5_000,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn posts_request_and_extracts_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/humanize")
            .match_header("authorization", "Bearer k-123")
            .match_body(Matcher::Json(json!({
                "text": "hello",
                "strength": "high",
                "personality": "friendly"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"humanized_text":"Hey there"}"#)
            .create_async()
            .await;

        let req = HumanizeRequest::new("hello")
            .with_strength(Strength::High)
            .with_personality("friendly");
        let out = backend(format!("{}/humanize", server.url()), "k-123")
            .humanize(&req)
            .await
            .unwrap();

        assert_eq!(out, json!("Hey there"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn plain_text_body_is_accepted() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body("just text\n")
            .create_async()
            .await;

        let out = backend(format!("{}/", server.url()), "")
            .humanize(&HumanizeRequest::new("x"))
            .await
            .unwrap();
        assert_eq!(out, json!("just text\n"));
    }

    #[tokio::test]
    async fn server_error_is_a_processing_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/humanize")
            .with_status(503)
            .with_body("overloaded")
            .create_async()
            .await;

        let err = backend(format!("{}/humanize", server.url()), "")
            .humanize(&HumanizeRequest::new("x"))
            .await
            .unwrap_err();
        assert_eq!(err, BackendError::Failed("HTTP 503: overloaded".to_string()));
    }

    #[tokio::test]
    async fn refused_connection_is_unavailable() {
        let err = backend("http://127.0.0.1:1/humanize".to_string(), "")
            .humanize(&HumanizeRequest::new("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Unavailable(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn silent_service_times_out_as_processing_failure() {
        // Bound but never accepted: the handshake completes, no response ever comes.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/humanize", listener.local_addr().unwrap());
        let b = HttpHumanizer::new(HttpBackendConfig {
            url,
            api_key: String::new(),
            timeout_ms: 200,
        })
        .unwrap();

        let err = b.humanize(&HumanizeRequest::new("x")).await.unwrap_err();
        assert!(
            matches!(err, BackendError::Failed(ref m) if m.contains("timed out after 200 ms")),
            "{:?}",
            err
        );
        drop(listener);
    }

    #[tokio::test]
    async fn non_http_url_fails_dependency_check() {
        let b = backend("ftp://humanize.example".to_string(), "");
        assert_eq!(b.check_dependencies().await.len(), 1);
        assert!(matches!(
            b.humanize(&HumanizeRequest::new("x")).await,
            Err(BackendError::Unavailable(_))
        ));
    }
}
