//! Text-to-audio synthesis service.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use tracing::info;

use vsfx_models::EffectDuration;

use crate::endpoint::{check_status, ServiceEndpoint};
use crate::error::{MlClientError, MlResult};

/// Text-to-audio capability.
#[async_trait]
pub trait AudioSynthesizer: Send + Sync {
    /// Get the name of this synthesizer for logging.
    fn name(&self) -> &'static str;

    /// Generate roughly `duration` of audio matching `description` and
    /// write it into `dest_dir`. Returns the written file.
    async fn synthesize(
        &self,
        description: &str,
        duration: EffectDuration,
        dest_dir: &Path,
    ) -> MlResult<PathBuf>;
}

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    prompt: &'a str,
    duration: f64,
}

/// [`AudioSynthesizer`] calling a model-serving endpoint over HTTP.
///
/// The response body is the audio file itself; its Content-Type picks the
/// file extension.
pub struct HttpAudioSynthesizer {
    endpoint: ServiceEndpoint,
    client: Client,
}

impl HttpAudioSynthesizer {
    pub fn new(endpoint: ServiceEndpoint) -> MlResult<Self> {
        let client = endpoint.client()?;
        Ok(Self { endpoint, client })
    }
}

/// File extension for an audio MIME type, WAV when unknown.
fn extension_for(content_type: Option<&str>) -> &'static str {
    let mime = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|m| m.trim().to_ascii_lowercase())
        .unwrap_or_default();

    match mime.as_str() {
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/flac" | "audio/x-flac" => "flac",
        "audio/ogg" | "audio/vorbis" => "ogg",
        _ => "wav",
    }
}

#[async_trait]
impl AudioSynthesizer for HttpAudioSynthesizer {
    fn name(&self) -> &'static str {
        "http-synthesizer"
    }

    async fn synthesize(
        &self,
        description: &str,
        duration: EffectDuration,
        dest_dir: &Path,
    ) -> MlResult<PathBuf> {
        let request = SynthesisRequest {
            prompt: description,
            duration: duration.as_secs(),
        };

        let response = self.endpoint.post(&self.client).json(&request).send().await?;
        let response = check_status(response).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;

        if bytes.is_empty() {
            return Err(MlClientError::empty_output("synthesized audio is empty"));
        }

        let out = dest_dir.join(format!("effect.{}", extension_for(content_type.as_deref())));
        tokio::fs::write(&out, &bytes).await?;

        info!(
            "Synthesized {} bytes of audio for {} -> {}",
            bytes.len(),
            duration,
            out.display()
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{body_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_extension_for() {
        assert_eq!(extension_for(Some("audio/mpeg")), "mp3");
        assert_eq!(extension_for(Some("audio/FLAC; rate=44100")), "flac");
        assert_eq!(extension_for(Some("audio/wav")), "wav");
        assert_eq!(extension_for(Some("application/octet-stream")), "wav");
        assert_eq!(extension_for(None), "wav");
    }

    #[tokio::test]
    async fn test_synthesize_writes_file() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(serde_json::json!({ "prompt": "bees buzzing", "duration": 5.0 })))
            .respond_with(ResponseTemplate::new(200).set_body_raw(b"ID3fake-mp3".to_vec(), "audio/mpeg"))
            .expect(1)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let synth = HttpAudioSynthesizer::new(ServiceEndpoint::new(server.uri())).unwrap();
        let duration = EffectDuration::new(5.0).unwrap();

        let out = synth.synthesize("bees buzzing", duration, dir.path()).await.unwrap();
        assert_eq!(out, dir.path().join("effect.mp3"));
        assert_eq!(tokio::fs::read(&out).await.unwrap(), b"ID3fake-mp3");
    }

    #[tokio::test]
    async fn test_empty_body_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(Vec::new(), "audio/wav"))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let synth = HttpAudioSynthesizer::new(ServiceEndpoint::new(server.uri())).unwrap();

        let err = synth
            .synthesize("rain", EffectDuration::default(), dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, MlClientError::EmptyOutput(_)));
        assert!(!dir.path().join("effect.wav").exists());
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(b"RIFF".to_vec(), "audio/wav")
                    .set_delay(std::time::Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let synth = HttpAudioSynthesizer::new(
            ServiceEndpoint::new(server.uri()).with_timeout(Some(std::time::Duration::from_millis(200))),
        )
        .unwrap();

        let err = synth
            .synthesize("rain", EffectDuration::default(), dir.path())
            .await
            .unwrap_err();
        assert!(err.is_timeout(), "expected timeout, got {err}");
    }
}
