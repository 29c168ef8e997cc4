use super::{LanguageDirectory, SynthesisApi, SynthesisRequest};
use crate::domain::synthesis::error::ApiError;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

const SYNTHESIS_PATH: &str = "/tts";
const LANGUAGES_PATH: &str = "/languages";

/// Failure body of the synthesis service: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LanguagesResponse {
    languages: BTreeMap<String, String>,
}

/// reqwest-backed implementation of both service ports.
pub struct HttpTtsApi {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpTtsApi {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl SynthesisApi for HttpTtsApi {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, ApiError> {
        let response = self
            .http_client
            .post(self.url(SYNTHESIS_PATH))
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if status.is_success() {
            tracing::info!(
                lang = %request.lang,
                text_length = request.text.chars().count(),
                audio_size = body.len(),
                "synthesis succeeded"
            );
            return Ok(body.to_vec());
        }

        tracing::warn!(
            status = status.as_u16(),
            body_size = body.len(),
            "synthesis request rejected"
        );
        Err(ApiError::Server {
            detail: parse_error_detail(&body),
        })
    }
}

#[async_trait]
impl LanguageDirectory for HttpTtsApi {
    async fn fetch_languages(&self) -> Result<BTreeMap<String, String>, ApiError> {
        let response = self
            .http_client
            .get(self.url(LANGUAGES_PATH))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Server { detail: None });
        }

        let listing: LanguagesResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(listing.languages)
    }
}

/// Extract the server's `detail` message from a failure body.
///
/// The service declares `audio/mpeg` even on failures, so the body arrives as
/// an opaque blob. It is reinterpreted as UTF-8 text and then as JSON; only a
/// non-empty `detail` field counts. This matches the service's error-response
/// convention and must stay lenient about everything else.
fn parse_error_detail(body: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(body).ok()?;
    let parsed: ErrorBody = serde_json::from_str(text).ok()?;
    parsed.detail.filter(|detail| !detail.is_empty())
}
