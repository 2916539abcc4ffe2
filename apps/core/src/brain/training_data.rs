//! Built-in training examples and reply catalog.

use serde::{Deserialize, Serialize};

use super::catalog::{ResponseCatalog, DEFAULT_BUCKET};

/// A labelled training sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub text: String,
    pub label: String,
}

impl TrainingExample {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

const EXAMPLES: &[(&str, &str)] = &[
    ("hello", "greeting"),
    ("hi", "greeting"),
    ("hey", "greeting"),
    ("good morning", "greeting"),
    ("good evening", "greeting"),
    ("bye", "goodbye"),
    ("goodbye", "goodbye"),
    ("see you later", "goodbye"),
    ("thanks", "thanks"),
    ("thank you", "thanks"),
    ("thx", "thanks"),
    ("can you help me", "help"),
    ("i need assistance", "help"),
    ("i want support", "help"),
    ("what is your name", "name"),
    ("who are you", "name"),
    ("how old are you", "age"),
    ("your age", "age"),
];

const RESPONSES: &[(&str, &[&str])] = &[
    (
        "greeting",
        &["Hello! How can I help you?", "Hi there! What can I do for you?"],
    ),
    ("goodbye", &["Goodbye! Have a great day!", "See you later!"]),
    ("thanks", &["You're welcome!", "No problem!"]),
    ("help", &["Sure! How can I assist you?", "I'm here to help!"]),
    (
        "name",
        &["I'm a smart chatbot created with Python, spaCy, and scikit-learn."],
    ),
    ("age", &["I'm timeless. I live in your computer!"]),
    (
        DEFAULT_BUCKET,
        &["Sorry, I didn't understand that. Could you rephrase?"],
    ),
];

/// The reference training set: 18 sentences over 6 intents.
pub fn default_examples() -> Vec<TrainingExample> {
    EXAMPLES
        .iter()
        .map(|(text, label)| TrainingExample::new(*text, *label))
        .collect()
}

/// The reference reply catalog, including the default bucket.
pub fn default_responses() -> ResponseCatalog {
    RESPONSES
        .iter()
        .map(|(label, replies)| (*label, replies.iter().map(|r| r.to_string()).collect::<Vec<_>>()))
        .collect()
}
