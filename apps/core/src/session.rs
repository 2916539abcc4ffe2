//! Chat session.
//!
//! Drives one conversation: feeds typed or spoken input to the pipeline,
//! speaks the reply and keeps an in-memory transcript for display. The
//! transcript lives only as long as the session.

use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, instrument, warn};

use crate::brain::PipelineHandle;
use crate::config::ChatbotConfig;
use crate::error::AppError;
use crate::speech::{SpeechError, SpeechRecognizer, SpeechSynthesizer};

pub const LISTENING_NOTICE: &str = "Listening...";
pub const NOT_UNDERSTOOD_NOTICE: &str = "Sorry, I couldn't understand. Try again.";
pub const SERVICE_ERROR_NOTICE: &str = "Speech recognition service error.";

/// Who produced a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    UserVoice,
    Bot,
    System,
}

/// One line of the transcript.
#[derive(Debug, Clone, Serialize)]
pub struct ChatLine {
    pub speaker: Speaker,
    pub text: String,
    pub at: DateTime<Local>,
}

impl ChatLine {
    fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            at: Local::now(),
        }
    }
}

impl fmt::Display for ChatLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.speaker {
            Speaker::User => write!(f, "You: {}", self.text),
            Speaker::UserVoice => write!(f, "You (voice): {}", self.text),
            Speaker::Bot => write!(f, "Bot: {}", self.text),
            Speaker::System => write!(f, "{}", self.text),
        }
    }
}

/// A single conversation wired to a pipeline and two speech collaborators.
pub struct ChatSession {
    pipeline: Arc<PipelineHandle>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    recognizer: Arc<dyn SpeechRecognizer>,
    listen_timeout: Duration,
    rng: StdRng,
    transcript: Vec<ChatLine>,
}

impl ChatSession {
    /// Creates a session; replies are reproducible when `config.seed` is set.
    pub fn new(
        pipeline: Arc<PipelineHandle>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        recognizer: Arc<dyn SpeechRecognizer>,
        config: &ChatbotConfig,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            pipeline,
            synthesizer,
            recognizer,
            listen_timeout: config.speech.listen_timeout(),
            rng,
            transcript: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &[ChatLine] {
        &self.transcript
    }

    fn push(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.transcript.push(ChatLine::new(speaker, text));
    }

    /// Handles a typed message.
    ///
    /// Blank input is ignored and returns `None`. Otherwise the reply is
    /// recorded, spoken and returned. A failing synthesizer is logged but
    /// does not fail the call.
    #[instrument(skip(self))]
    pub async fn send_message(&mut self, input: &str) -> Option<String> {
        if input.trim().is_empty() {
            return None;
        }
        self.push(Speaker::User, input);
        Some(self.reply_to(input).await)
    }

    /// Captures one spoken utterance and answers it.
    ///
    /// Recognition failures and timeouts end up in the transcript as notices;
    /// they are never returned as errors.
    #[instrument(skip(self))]
    pub async fn listen_microphone(&mut self) -> Option<String> {
        self.push(Speaker::System, LISTENING_NOTICE);

        match self.capture().await {
            Ok(heard) => {
                info!(heard = %heard, "voice input");
                self.push(Speaker::UserVoice, heard.as_str());
                Some(self.reply_to(&heard).await)
            }
            Err(AppError::Speech(SpeechError::Request(e))) => {
                warn!(error = %e, "speech recognition service error");
                self.push(Speaker::System, SERVICE_ERROR_NOTICE);
                None
            }
            Err(e) => {
                warn!(error = %e, "speech not understood");
                self.push(Speaker::System, NOT_UNDERSTOOD_NOTICE);
                None
            }
        }
    }

    async fn capture(&self) -> Result<String, AppError> {
        let heard = timeout(self.listen_timeout, self.recognizer.listen()).await??;
        Ok(heard)
    }

    async fn reply_to(&mut self, input: &str) -> String {
        let reply = self.pipeline.respond_with(input, &mut self.rng);
        self.push(Speaker::Bot, reply.as_str());

        if let Err(e) = self.synthesizer.speak(&reply).await {
            warn!(error = %e, "failed to speak reply");
        }
        reply
    }
}
