//! Scene captioning service.

use std::path::Path;

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::endpoint::{check_status, ServiceEndpoint};
use crate::error::{MlClientError, MlResult};

/// Vision-to-text capability: describes a still image.
#[async_trait]
pub trait SceneCaptioner: Send + Sync {
    /// Get the name of this captioner for logging.
    fn name(&self) -> &'static str;

    /// Describe `image` following `prompt`. The text is returned as produced.
    async fn describe(&self, image: &Path, prompt: &str) -> MlResult<String>;
}

#[derive(Debug, Serialize)]
struct CaptionRequest<'a> {
    /// Base64-encoded image bytes
    image: String,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct CaptionResponse {
    description: String,
}

/// [`SceneCaptioner`] calling a model-serving endpoint over HTTP.
pub struct HttpSceneCaptioner {
    endpoint: ServiceEndpoint,
    client: Client,
}

impl HttpSceneCaptioner {
    pub fn new(endpoint: ServiceEndpoint) -> MlResult<Self> {
        let client = endpoint.client()?;
        Ok(Self { endpoint, client })
    }
}

#[async_trait]
impl SceneCaptioner for HttpSceneCaptioner {
    fn name(&self) -> &'static str {
        "http-captioner"
    }

    async fn describe(&self, image: &Path, prompt: &str) -> MlResult<String> {
        let bytes = tokio::fs::read(image).await?;
        debug!("Captioning {} ({} bytes)", image.display(), bytes.len());

        let request = CaptionRequest {
            image: base64::engine::general_purpose::STANDARD.encode(&bytes),
            prompt,
        };

        let response = self.endpoint.post(&self.client).json(&request).send().await?;
        let response = check_status(response).await?;

        let body: CaptionResponse = response.json().await.map_err(|e| {
            MlClientError::invalid_response(format!("Failed to parse caption response: {}", e))
        })?;

        if body.description.trim().is_empty() {
            return Err(MlClientError::empty_output("caption is blank"));
        }

        info!("Scene description received ({} chars)", body.description.len());
        Ok(body.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn frame(dir: &TempDir) -> std::path::PathBuf {
        let p = dir.path().join("frame.png");
        tokio::fs::write(&p, b"\x89PNG fake").await.unwrap();
        p
    }

    #[tokio::test]
    async fn test_describe_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/caption"))
            .and(header("authorization", "Bearer secret"))
            .and(body_partial_json(serde_json::json!({ "prompt": "what do you hear?" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({ "description": "  Bees buzzing around flowers. " }),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let image = frame(&dir).await;
        let captioner = HttpSceneCaptioner::new(
            ServiceEndpoint::new(format!("{}/caption", server.uri()))
                .with_api_key(Some("secret".to_string())),
        )
        .unwrap();

        let text = captioner.describe(&image, "what do you hear?").await.unwrap();
        // Passed through untouched
        assert_eq!(text, "  Bees buzzing around flowers. ");
    }

    #[tokio::test]
    async fn test_blank_description_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "description": "   " })))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let image = frame(&dir).await;
        let captioner = HttpSceneCaptioner::new(ServiceEndpoint::new(server.uri())).unwrap();

        let err = captioner.describe(&image, "p").await.unwrap_err();
        assert!(matches!(err, MlClientError::EmptyOutput(_)));
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(1)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let image = frame(&dir).await;
        let captioner = HttpSceneCaptioner::new(ServiceEndpoint::new(server.uri())).unwrap();

        match captioner.describe(&image, "p").await {
            Err(MlClientError::Status { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "overloaded");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let image = frame(&dir).await;
        let captioner = HttpSceneCaptioner::new(ServiceEndpoint::new(server.uri())).unwrap();

        let err = captioner.describe(&image, "p").await.unwrap_err();
        assert!(matches!(err, MlClientError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_missing_image() {
        let captioner = HttpSceneCaptioner::new(ServiceEndpoint::new("http://127.0.0.1:9")).unwrap();
        let err = captioner
            .describe(Path::new("/no/such/frame.png"), "p")
            .await
            .unwrap_err();
        assert!(matches!(err, MlClientError::Io(_)));
    }
}
