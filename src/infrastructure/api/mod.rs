pub mod http;

pub use http::HttpTtsApi;

use crate::domain::synthesis::error::ApiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of an outbound synthesis call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    pub text: String,
    pub lang: String,
}

/// Port for the synthesis service.
/// Abstracts the transport so the controller can be exercised without a
/// running service.
///
/// Implementations are responsible for:
/// - Issuing exactly one request per call, no retries
/// - Returning the raw audio payload on success
/// - Classifying failures into [`ApiError`], extracting the server-supplied
///   detail message where one exists
#[async_trait]
pub trait SynthesisApi: Send + Sync {
    /// Synthesize the request into audio bytes (MP3 data, ready to play).
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, ApiError>;
}

/// Port for the language directory, queried once at startup.
#[async_trait]
pub trait LanguageDirectory: Send + Sync {
    /// Supported languages as code -> display name.
    async fn fetch_languages(&self) -> Result<BTreeMap<String, String>, ApiError>;
}
