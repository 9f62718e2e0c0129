//! Mock synthesizer for testing the batch loop.
//!
//! Scriptable per-call success/failure so partial-failure runs can be
//! exercised deterministically without a network.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Result, SpeechSynthesizer, SynthesisError};

/// A mock synthesizer with scripted failures.
pub struct MockSynthesizer {
    /// 1-based call numbers that fail
    failing_calls: Vec<usize>,
    /// Audio bytes returned on success
    audio: Vec<u8>,
    /// Number of synthesize() calls so far
    call_count: AtomicUsize,
}

impl MockSynthesizer {
    /// Create a synthesizer that always succeeds with the given bytes.
    pub fn always_succeeds(audio: &[u8]) -> Self {
        Self {
            failing_calls: Vec::new(),
            audio: audio.to_vec(),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Create a synthesizer that fails on the given 1-based call numbers and
    /// succeeds with the given bytes otherwise.
    pub fn fails_on_calls(failing_calls: &[usize], audio: &[u8]) -> Self {
        Self {
            failing_calls: failing_calls.to_vec(),
            audio: audio.to_vec(),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Get the number of times synthesize() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(&self, _text: &str) -> Result<Vec<u8>> {
        let call = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;
        if self.failing_calls.contains(&call) {
            return Err(SynthesisError::NonAudio {
                message: format!("mock failure on call {}", call),
            });
        }
        Ok(self.audio.clone())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_always_succeeds() {
        let mock = MockSynthesizer::always_succeeds(b"audio");
        assert_eq!(mock.synthesize("hi").await.unwrap(), b"audio");
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_scripted_failure() {
        let mock = MockSynthesizer::fails_on_calls(&[2], b"audio");
        assert!(mock.synthesize("one").await.is_ok());
        assert!(mock.synthesize("two").await.is_err());
        assert!(mock.synthesize("three").await.is_ok());
        assert_eq!(mock.call_count(), 3);
    }
}
