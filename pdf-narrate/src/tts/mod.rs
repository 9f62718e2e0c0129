//! Speech synthesis backend trait and types.

pub mod mock;
pub mod voicerss;

use async_trait::async_trait;
use thiserror::Error;

/// Voice parameters sent with every synthesis request.
#[derive(Debug, Clone)]
pub struct VoiceSettings {
    /// Language code (e.g. "en-gb")
    pub language: String,
    /// Voice name (e.g. "Harry")
    pub voice: String,
    /// Output codec (e.g. "MP3")
    pub codec: String,
    /// Output quality string (e.g. "16khz_16bit_stereo")
    pub quality: String,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            language: "en-gb".to_string(),
            voice: "Harry".to_string(),
            codec: "MP3".to_string(),
            quality: "16khz_16bit_stereo".to_string(),
        }
    }
}

/// Per-batch synthesis errors. Contained by the runner; never fatal to a run.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("HTTP error: {status}")]
    Http { status: u16 },

    #[error("Non-audio response: {message}")]
    NonAudio { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SynthesisError>;

/// Trait for speech synthesis backends.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize one request payload into raw audio bytes.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;

    /// Get the backend name for display
    fn name(&self) -> &'static str;
}
