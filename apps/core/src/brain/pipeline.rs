//! Conversation pipeline: normalize → vectorize → classify → select reply.
//!
//! Building a pipeline goes through three typed stages so that each step can
//! only run once and in order:
//!
//! 1. [`UntrainedPipeline`]: configuration checked, nothing learned yet.
//! 2. [`FittedPipeline`]: vocabulary learned from the training corpus.
//! 3. [`PipelineHandle`]: classifier trained; ready to answer.
//!
//! A `PipelineHandle` is immutable. `classify` and `respond` take `&self`, so
//! the handle can be shared between threads behind an `Arc` without locking.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

use super::catalog::{ResponseCatalog, DEFAULT_BUCKET};
use super::naive_bayes::NaiveBayesModel;
use super::normalizer::normalize;
use super::reply::ReplySelector;
use super::training_data::TrainingExample;
use super::vectorizer::{CountVectorizer, Vocabulary};
use crate::config::ChatbotConfig;
use crate::error::AppError;

/// Result of intent classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentResult {
    /// Predicted intent; `None` when the input shares no token with the
    /// training vocabulary.
    pub label: Option<String>,
    /// Posterior probability of `label` (0.0 when unrecognized).
    pub confidence: f32,
    /// The normalized input.
    pub normalized: String,
    /// Vocabulary tokens found in the input.
    pub matched_tokens: Vec<String>,
}

impl IntentResult {
    pub fn is_recognized(&self) -> bool {
        self.label.is_some()
    }

    /// Catalog key to answer from.
    pub fn bucket(&self) -> &str {
        self.label.as_deref().unwrap_or(DEFAULT_BUCKET)
    }
}

/// Validated configuration, before any learning.
#[derive(Debug, Clone)]
pub struct UntrainedPipeline {
    examples: Vec<TrainingExample>,
    selector: ReplySelector,
    vectorizer: CountVectorizer,
    alpha: f64,
}

impl UntrainedPipeline {
    /// Checks the configuration and the catalog invariant: a default bucket
    /// exists, no bucket is empty, every training label has a bucket.
    pub fn new(config: &ChatbotConfig) -> Result<Self, AppError> {
        config.validate()?;
        config
            .responses
            .validate_for(config.training.iter().map(|e| e.label.as_str()))?;

        Ok(Self {
            examples: config.training.clone(),
            selector: ReplySelector::new(config.responses.clone())?,
            vectorizer: CountVectorizer::with_min_token_len(config.vectorizer.min_token_len),
            alpha: config.classifier.alpha,
        })
    }

    /// Normalizes the training corpus and learns the vocabulary.
    pub fn fit(self) -> FittedPipeline {
        let corpus: Vec<String> = self.examples.iter().map(|e| normalize(&e.text)).collect();
        let vocabulary = self.vectorizer.fit(&corpus);
        if vocabulary.is_empty() {
            warn!("training corpus produced an empty vocabulary; every input will get the default reply");
        }
        let labels = self.examples.into_iter().map(|e| e.label).collect();

        FittedPipeline {
            corpus,
            labels,
            vocabulary,
            vectorizer: self.vectorizer,
            selector: self.selector,
            alpha: self.alpha,
        }
    }
}

/// Vocabulary learned; classifier not trained yet.
#[derive(Debug, Clone)]
pub struct FittedPipeline {
    corpus: Vec<String>,
    labels: Vec<String>,
    vocabulary: Vocabulary,
    vectorizer: CountVectorizer,
    selector: ReplySelector,
    alpha: f64,
}

impl FittedPipeline {
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Vectorizes the corpus and trains the classifier.
    pub fn train(self) -> Result<PipelineHandle, AppError> {
        let features: Vec<_> = self
            .corpus
            .iter()
            .map(|text| self.vectorizer.transform(text, &self.vocabulary))
            .collect();
        let model = NaiveBayesModel::train(&features, &self.labels, self.alpha)?;

        info!(
            examples = features.len(),
            vocabulary = self.vocabulary.len(),
            intents = model.classes().len(),
            "intent pipeline ready"
        );

        Ok(PipelineHandle {
            vocabulary: self.vocabulary,
            vectorizer: self.vectorizer,
            model,
            selector: self.selector,
        })
    }
}

/// Trained pipeline, read-only for the rest of the process.
#[derive(Debug, Clone)]
pub struct PipelineHandle {
    vocabulary: Vocabulary,
    vectorizer: CountVectorizer,
    model: NaiveBayesModel,
    selector: ReplySelector,
}

/// Validates `config`, fits the vocabulary and trains the classifier.
///
/// # Errors
///
/// `AppError::Config` for malformed training data or reply catalog.
#[instrument(skip(config), fields(examples = config.training.len()))]
pub fn initialize(config: &ChatbotConfig) -> Result<PipelineHandle, AppError> {
    UntrainedPipeline::new(config)?.fit().train()
}

impl PipelineHandle {
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn model(&self) -> &NaiveBayesModel {
        &self.model
    }

    pub fn catalog(&self) -> &ResponseCatalog {
        self.selector.catalog()
    }

    /// Predicts the intent of `text`.
    pub fn classify(&self, text: &str) -> IntentResult {
        let normalized = normalize(text);
        let vector = self.vectorizer.transform(&normalized, &self.vocabulary);
        let matched_tokens: Vec<String> = vector
            .nonzero()
            .filter_map(|(i, _)| self.vocabulary.token(i))
            .map(str::to_string)
            .collect();

        let unrecognized = |normalized: String, matched_tokens: Vec<String>| IntentResult {
            label: None,
            confidence: 0.0,
            normalized,
            matched_tokens,
        };

        if vector.is_zero() {
            debug!(input = %text, "no known tokens; intent unrecognized");
            return unrecognized(normalized, matched_tokens);
        }

        // The vector is built over this handle's vocabulary, which is the one
        // the model was trained on, so its length always matches.
        match self.model.rank(&vector) {
            Ok((label, confidence)) => {
                debug!(input = %text, intent = %label, confidence, "classified");
                IntentResult {
                    label: Some(label.to_string()),
                    confidence: confidence as f32,
                    normalized,
                    matched_tokens,
                }
            }
            Err(e) => {
                debug_assert!(false, "{}", e);
                error!(error = %e, "feature vector does not fit the trained model");
                unrecognized(normalized, matched_tokens)
            }
        }
    }

    /// Answers `text` using `rng` to pick among the candidate replies.
    pub fn respond_with<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> String {
        let intent = self.classify(text);
        self.selector
            .select(intent.label.as_deref(), rng)
            .to_string()
    }

    /// Answers `text` using the thread-local random generator.
    pub fn respond(&self, text: &str) -> String {
        self.respond_with(text, &mut rand::thread_rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::training_data::{default_examples, default_responses};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_stages_expose_learned_state() {
        let config = ChatbotConfig::default();
        let fitted = UntrainedPipeline::new(&config).unwrap().fit();
        assert!(fitted.vocabulary().index_of("hello").is_some());
        // single-character tokens are not features
        assert!(fitted.vocabulary().index_of("i").is_none());

        let handle = fitted.train().unwrap();
        assert_eq!(handle.model().classes().len(), 6);
        assert_eq!(handle.model().vocabulary_size(), handle.vocabulary().len());
    }

    #[test]
    fn test_classify_reports_matched_tokens() {
        let handle = initialize(&ChatbotConfig::default()).unwrap();
        let result = handle.classify("Thank you so much!");

        assert_eq!(result.label.as_deref(), Some("thanks"));
        assert_eq!(result.normalized, "thank you so much");
        assert_eq!(result.matched_tokens, vec!["you".to_string(), "thank".to_string()]);
        assert!(result.confidence > 0.0 && result.confidence <= 1.0);
    }

    #[test]
    fn test_unknown_input_is_unrecognized() {
        let handle = initialize(&ChatbotConfig::default()).unwrap();
        let result = handle.classify("asdkjhasd");
        assert!(!result.is_recognized());
        assert_eq!(result.bucket(), DEFAULT_BUCKET);
    }

    #[test]
    fn test_missing_bucket_fails_initialize() {
        let mut config = ChatbotConfig::default();
        config.responses = default_responses().with_bucket("age", Vec::<String>::new());
        assert!(matches!(initialize(&config), Err(AppError::Config(_))));

        let mut config = ChatbotConfig::default();
        config.training = default_examples();
        config.training.push(TrainingExample::new("what's the weather", "weather"));
        assert!(matches!(initialize(&config), Err(AppError::Config(_))));
    }

    #[test]
    fn test_respond_with_seed_is_reproducible() {
        let handle = initialize(&ChatbotConfig::default()).unwrap();
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..8)
                .map(|_| handle.respond_with("hello", &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(11), run(11));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "feature vector has length")]
    fn test_model_vocabulary_mismatch_surfaces() {
        let mut handle = initialize(&ChatbotConfig::default()).unwrap();
        handle.model = NaiveBayesModel::train(
            &[crate::brain::vectorizer::FeatureVector::from(vec![1])],
            &["greeting"],
            1.0,
        )
        .unwrap();
        handle.classify("hello");
    }
}
