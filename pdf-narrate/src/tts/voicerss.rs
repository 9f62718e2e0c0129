//! VoiceRSS HTTP text-to-speech backend.
//!
//! VoiceRSS reports failures in-band: a failed request can come back as a
//! 200 response whose body is a plain-text message starting with "ERROR".
//! Anything that is not binary audio is treated as a synthesis failure.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::{Result, SpeechSynthesizer, SynthesisError, VoiceSettings};

/// VoiceRSS API endpoint.
const ENDPOINT: &str = "https://api.voicerss.org/";

/// Per-request timeout. The API has no documented latency bound; a stuck
/// request must not stall the rest of the run.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Synthesizer backed by the VoiceRSS HTTP API.
pub struct VoiceRssSynthesizer {
    api_key: String,
    settings: VoiceSettings,
    endpoint: String,
    client: Client,
}

impl VoiceRssSynthesizer {
    /// Create a new VoiceRSS synthesizer.
    ///
    /// The API key and voice settings are injected here; the synthesizer
    /// never reads the environment itself.
    pub fn new(api_key: String, settings: VoiceSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SynthesisError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            settings,
            endpoint: ENDPOINT.to_string(),
            client,
        })
    }

    /// Override the API endpoint (testing against a local server).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Query parameters for one request payload.
    fn query_params<'a>(&'a self, text: &'a str) -> [(&'static str, &'a str); 6] {
        [
            ("key", self.api_key.as_str()),
            ("src", text),
            ("hl", self.settings.language.as_str()),
            ("v", self.settings.voice.as_str()),
            ("c", self.settings.codec.as_str()),
            ("f", self.settings.quality.as_str()),
        ]
    }
}

/// Classify a successful HTTP response body as audio or an in-band error.
fn classify_body(body: &[u8]) -> Result<()> {
    if body.is_empty() {
        return Err(SynthesisError::NonAudio {
            message: "empty response body".to_string(),
        });
    }
    if body.starts_with(b"ERROR") {
        return Err(SynthesisError::NonAudio {
            message: String::from_utf8_lossy(body).into_owned(),
        });
    }
    Ok(())
}

#[async_trait]
impl SpeechSynthesizer for VoiceRssSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&self.query_params(text))
            .send()
            .await
            .map_err(|e| SynthesisError::Request(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SynthesisError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::Request(format!("Failed to read response body: {}", e)))?;

        classify_body(&body)?;
        Ok(body.to_vec())
    }

    fn name(&self) -> &'static str {
        "VoiceRSS"
    }
}
