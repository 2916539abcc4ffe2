//! Speech collaborators.
//!
//! Microphone capture, speech-to-text and text-to-speech playback live outside
//! the pipeline. The chat session only talks to them through the two traits
//! below, so any backend (a native TTS engine, a cloud recognizer, a test
//! double) can be plugged in.

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

/// Errors reported by a speech backend.
#[derive(Debug, thiserror::Error, Serialize, Clone, PartialEq, Eq)]
pub enum SpeechError {
    /// Audio was captured but could not be turned into text.
    #[error("speech was not understood")]
    UnknownValue,
    /// The recognition service could not be reached or refused the request.
    #[error("recognition request failed: {0}")]
    Request(String),
    /// The synthesizer failed to play an utterance.
    #[error("playback failed: {0}")]
    Playback(String),
}

/// Speaks a reply aloud.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + 'static {
    /// Plays `text` and returns once playback has finished.
    async fn speak(&self, text: &str) -> Result<(), SpeechError>;
}

/// Captures one utterance from a microphone and transcribes it.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync + 'static {
    /// Listens for a single phrase and returns its transcription.
    ///
    /// Callers bound this with their own timeout.
    async fn listen(&self) -> Result<String, SpeechError>;
}

/// Synthesizer that records each utterance as a tracing event instead of
/// playing audio.
#[derive(Debug, Default, Clone)]
pub struct LoggingSynthesizer;

#[async_trait]
impl SpeechSynthesizer for LoggingSynthesizer {
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        info!(utterance = %text, "speak");
        Ok(())
    }
}

/// Synthesizer used when voice output is disabled.
#[derive(Debug, Default, Clone)]
pub struct MutedSynthesizer;

#[async_trait]
impl SpeechSynthesizer for MutedSynthesizer {
    async fn speak(&self, _text: &str) -> Result<(), SpeechError> {
        Ok(())
    }
}

/// Recognizer for builds without a microphone backend.
#[derive(Debug, Default, Clone)]
pub struct UnavailableRecognizer;

#[async_trait]
impl SpeechRecognizer for UnavailableRecognizer {
    async fn listen(&self) -> Result<String, SpeechError> {
        Err(SpeechError::Request(
            "no speech backend configured".to_string(),
        ))
    }
}
