//! Intent Chat
//!
//! A small chat assistant: user text (typed or transcribed from speech) is
//! classified into one of a fixed set of intents by a naive Bayes model
//! trained at start-up, and answered with a canned reply that can be spoken
//! aloud.

pub mod brain;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod speech;

pub use brain::{initialize, PipelineHandle};
pub use config::ChatbotConfig;
pub use error::AppError;

#[cfg(test)]
mod tests;
