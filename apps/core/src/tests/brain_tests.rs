//! Brain Module Tests
//!
//! End-to-end tests for the conversation pipeline on the built-in training
//! set and reply catalog.

use crate::brain::catalog::{ResponseCatalog, DEFAULT_BUCKET};
use crate::brain::normalizer::normalize;
use crate::brain::training_data::{default_examples, TrainingExample};
use crate::brain::vectorizer::CountVectorizer;
use crate::brain::{initialize, PipelineHandle};
use crate::config::ChatbotConfig;
use crate::error::AppError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn pipeline() -> PipelineHandle {
    initialize(&ChatbotConfig::default()).expect("reference data must train")
}

fn bucket(handle: &PipelineHandle, label: &str) -> Vec<String> {
    handle.catalog().bucket(label).unwrap_or_default().to_vec()
}

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    #[test]
    fn test_training_set_recall() {
        let handle = pipeline();

        for example in default_examples() {
            let result = handle.classify(&example.text);
            assert_eq!(
                result.label.as_deref(),
                Some(example.label.as_str()),
                "Expected '{}' for '{}'",
                example.label,
                example.text
            );

            let reply = handle.respond(&example.text);
            assert!(
                bucket(&handle, &example.label).contains(&reply),
                "Reply '{}' not in bucket '{}'",
                reply,
                example.label
            );
        }
    }

    #[test]
    fn test_hello_scenario() {
        let handle = pipeline();

        assert_eq!(normalize("hello"), "hello");
        assert_eq!(handle.classify("hello").label.as_deref(), Some("greeting"));

        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10 {
            let reply = handle.respond_with("hello", &mut rng);
            assert!(
                reply == "Hello! How can I help you?" || reply == "Hi there! What can I do for you?",
                "Unexpected greeting reply '{}'",
                reply
            );
        }
    }

    #[test]
    fn test_thank_you_scenario() {
        let handle = pipeline();

        assert_eq!(handle.classify("thank you").label.as_deref(), Some("thanks"));
        let reply = handle.respond("thank you");
        assert!(reply == "You're welcome!" || reply == "No problem!");
    }

    #[test]
    fn test_name_scenario() {
        let handle = pipeline();

        assert_eq!(
            handle.classify("what is your name").label.as_deref(),
            Some("name")
        );
        assert_eq!(
            handle.respond("what is your name"),
            "I'm a smart chatbot created with Python, spaCy, and scikit-learn."
        );
        assert_eq!(bucket(&handle, "name").len(), 1);
    }

    #[test]
    fn test_gibberish_gets_default_reply() {
        let handle = pipeline();
        let default = bucket(&handle, DEFAULT_BUCKET);

        for text in ["asdkjhasd", "", "   ", "!!!???", "qwerty zxcvb"] {
            let result = handle.classify(text);
            assert!(!result.is_recognized(), "'{}' should be unrecognized", text);
            assert!(default.contains(&handle.respond(text)));
        }
    }

    #[test]
    fn test_punctuation_and_case_do_not_matter() {
        let handle = pipeline();

        assert_eq!(handle.classify("HELLO!!!").label.as_deref(), Some("greeting"));
        assert_eq!(handle.classify("Thanks, bot.").label.as_deref(), Some("thanks"));
        assert_eq!(handle.classify("How old are you?").label.as_deref(), Some("age"));
        assert_eq!(handle.classify("Goodbye!").label.as_deref(), Some("goodbye"));
    }

    #[test]
    fn test_classification_is_stable_across_calls() {
        let handle = pipeline();

        let first: Vec<_> = default_examples()
            .iter()
            .map(|e| handle.classify(&e.text))
            .collect();
        for _ in 0..3 {
            for (example, expected) in default_examples().iter().zip(&first) {
                assert_eq!(&handle.classify(&example.text), expected);
            }
        }
    }

    #[test]
    fn test_handle_is_shareable_between_threads() {
        let handle = Arc::new(pipeline());

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let handle = Arc::clone(&handle);
                std::thread::spawn(move || handle.classify("see you later").label)
            })
            .collect();

        for worker in workers {
            assert_eq!(worker.join().unwrap().as_deref(), Some("goodbye"));
        }
    }

    #[test]
    fn test_tie_break_prefers_first_label() {
        let mut config = ChatbotConfig::default();
        config.training = vec![
            TrainingExample::new("ping", "zulu"),
            TrainingExample::new("ping", "alpha"),
        ];
        config.responses = ResponseCatalog::new()
            .with_bucket("zulu", ["Z"])
            .with_bucket("alpha", ["A"])
            .with_bucket(DEFAULT_BUCKET, ["?"]);

        let handle = initialize(&config).unwrap();
        assert_eq!(handle.classify("ping").label.as_deref(), Some("alpha"));
        assert_eq!(handle.respond("ping ping"), "A");
    }

    #[test]
    fn test_catalog_invariant_enforced_at_initialize() {
        let mut config = ChatbotConfig::default();
        config.responses = ResponseCatalog::new()
            .with_bucket("greeting", ["Hi"])
            .with_bucket(DEFAULT_BUCKET, ["?"]);
        assert!(matches!(initialize(&config), Err(AppError::Config(_))));

        let mut config = ChatbotConfig::default();
        config.responses = crate::brain::training_data::default_responses()
            .with_bucket(DEFAULT_BUCKET, Vec::<String>::new());
        assert!(matches!(initialize(&config), Err(AppError::Config(_))));
    }
}

#[cfg(test)]
mod normalizer_properties {
    use super::*;

    #[test]
    fn test_normalize_idempotent_on_corpus() {
        let extra = [
            "Can you help me, please?",
            "I'm looking for SUPPORT!!",
            "What's up? Who're you?",
            "  spaced    out   text  ",
            "Thanks a lot :)",
        ];
        for text in default_examples()
            .iter()
            .map(|e| e.text.as_str())
            .chain(extra)
        {
            let once = normalize(text);
            assert_eq!(normalize(&once), once, "Not idempotent for '{}'", text);
        }
    }

    #[test]
    fn test_transform_empty_string_is_zero_vector() {
        let handle = pipeline();
        let vector = CountVectorizer::new().transform("", handle.vocabulary());

        assert_eq!(vector.len(), handle.vocabulary().len());
        assert!(vector.is_zero());
    }
}
