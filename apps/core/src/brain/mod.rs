//! # Brain Module
//!
//! Intent recognition for the chat assistant. Everything here is synchronous
//! and, once trained, read-only.
//!
//! ## Components
//! - `normalizer` / `lemma`: lowercasing, tokenization, lemmatization
//! - `vectorizer`: bag-of-words vocabulary and token counts
//! - `naive_bayes`: multinomial naive Bayes classifier
//! - `catalog`: intent → canned replies
//! - `reply`: random reply selection
//! - `training_data`: built-in examples and replies
//! - `pipeline`: the composed `respond(text) -> reply` entry point

pub mod catalog;
pub mod lemma;
pub mod naive_bayes;
pub mod normalizer;
pub mod pipeline;
pub mod reply;
pub mod training_data;
pub mod vectorizer;

pub use catalog::{ResponseCatalog, DEFAULT_BUCKET};
pub use naive_bayes::NaiveBayesModel;
pub use normalizer::normalize;
pub use pipeline::{initialize, FittedPipeline, IntentResult, PipelineHandle, UntrainedPipeline};
pub use reply::{select, ReplySelector};
pub use training_data::TrainingExample;
pub use vectorizer::{CountVectorizer, FeatureVector, Vocabulary};
