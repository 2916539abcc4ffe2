//! Multinomial naive Bayes intent classifier.
//!
//! The model is plain data: one log prior per class and one smoothed log
//! likelihood per (class, token). Classes are stored in lexicographic order,
//! which is also the tie-break order at prediction time: when two classes
//! score exactly the same, the one whose label sorts first wins.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::vectorizer::FeatureVector;
use crate::error::AppError;

/// Default additive (Laplace) smoothing.
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Trained multinomial naive Bayes parameters.
///
/// Deserialized models are shape-checked, so a loaded model can be used the
/// same way as a freshly trained one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawModel")]
pub struct NaiveBayesModel {
    /// Class labels, sorted.
    classes: Vec<String>,
    /// `ln P(class)`, aligned with `classes`.
    log_priors: Vec<f64>,
    /// `ln P(token | class)`, `[class][token]`.
    log_likelihoods: Vec<Vec<f64>>,
    vocabulary_size: usize,
}

/// Unchecked wire form of [`NaiveBayesModel`].
#[derive(Deserialize)]
struct RawModel {
    classes: Vec<String>,
    log_priors: Vec<f64>,
    log_likelihoods: Vec<Vec<f64>>,
    vocabulary_size: usize,
}

impl TryFrom<RawModel> for NaiveBayesModel {
    type Error = AppError;

    fn try_from(raw: RawModel) -> Result<Self, Self::Error> {
        if raw.classes.is_empty() {
            return Err(AppError::Config("model has no classes".to_string()));
        }
        if raw.log_priors.len() != raw.classes.len()
            || raw.log_likelihoods.len() != raw.classes.len()
        {
            return Err(AppError::Config(format!(
                "model has {} classes, {} priors and {} likelihood rows",
                raw.classes.len(),
                raw.log_priors.len(),
                raw.log_likelihoods.len()
            )));
        }
        if let Some((c, row)) = raw
            .log_likelihoods
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != raw.vocabulary_size)
        {
            return Err(AppError::Config(format!(
                "likelihood row {} has length {}, expected {}",
                c,
                row.len(),
                raw.vocabulary_size
            )));
        }

        Ok(Self {
            classes: raw.classes,
            log_priors: raw.log_priors,
            log_likelihoods: raw.log_likelihoods,
            vocabulary_size: raw.vocabulary_size,
        })
    }
}

impl NaiveBayesModel {
    /// Estimates priors and smoothed token likelihoods from labelled vectors.
    ///
    /// The prior of a class is the fraction of examples carrying its label.
    /// Token likelihoods use additive smoothing:
    /// `(count + alpha) / (class_total + alpha * vocabulary_size)`.
    ///
    /// # Errors
    ///
    /// `AppError::Config` when `features` and `labels` differ in length, when
    /// there are no examples, when vectors disagree on their length, or when
    /// `alpha` is not a positive finite number.
    pub fn train<L: AsRef<str>>(
        features: &[FeatureVector],
        labels: &[L],
        alpha: f64,
    ) -> Result<Self, AppError> {
        if features.len() != labels.len() {
            return Err(AppError::Config(format!(
                "training data mismatch: {} feature vectors but {} labels",
                features.len(),
                labels.len()
            )));
        }
        if features.is_empty() {
            return Err(AppError::Config(
                "cannot train a classifier without examples".to_string(),
            ));
        }
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(AppError::Config(format!(
                "smoothing alpha must be positive, got {}",
                alpha
            )));
        }

        let vocabulary_size = features[0].len();
        if let Some((i, v)) = features
            .iter()
            .enumerate()
            .find(|(_, v)| v.len() != vocabulary_size)
        {
            return Err(AppError::Config(format!(
                "feature vector {} has length {}, expected {}",
                i,
                v.len(),
                vocabulary_size
            )));
        }

        let classes: Vec<String> = labels
            .iter()
            .map(|l| l.as_ref())
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .map(str::to_string)
            .collect();
        let class_index: BTreeMap<&str, usize> = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();

        let mut doc_counts = vec![0usize; classes.len()];
        let mut token_counts = vec![vec![0u64; vocabulary_size]; classes.len()];

        for (vector, label) in features.iter().zip(labels) {
            let Some(&c) = class_index.get(label.as_ref()) else {
                continue;
            };
            doc_counts[c] += 1;
            for (token, count) in vector.nonzero() {
                token_counts[c][token] += u64::from(count);
            }
        }

        let total_docs = features.len() as f64;
        let log_priors = doc_counts
            .iter()
            .map(|&n| (n as f64 / total_docs).ln())
            .collect();

        let log_likelihoods = token_counts
            .iter()
            .map(|counts| {
                let class_total: u64 = counts.iter().sum();
                let denom = class_total as f64 + alpha * vocabulary_size as f64;
                counts
                    .iter()
                    .map(|&count| ((count as f64 + alpha) / denom).ln())
                    .collect()
            })
            .collect();

        Ok(Self {
            classes,
            log_priors,
            log_likelihoods,
            vocabulary_size,
        })
    }

    /// Class labels in tie-break order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Expected feature vector length.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    /// Prior probability of `label`, if it is a known class.
    pub fn prior(&self, label: &str) -> Option<f64> {
        self.classes
            .iter()
            .position(|c| c == label)
            .map(|i| self.log_priors[i].exp())
    }

    fn check_len(&self, vector: &FeatureVector) -> Result<(), AppError> {
        if vector.len() != self.vocabulary_size {
            return Err(AppError::Config(format!(
                "feature vector has length {}, model expects {}",
                vector.len(),
                self.vocabulary_size
            )));
        }
        Ok(())
    }

    /// Joint log likelihood `ln P(class) + Σ count_i · ln P(token_i | class)`
    /// for every class, aligned with [`classes`](Self::classes).
    pub fn scores(&self, vector: &FeatureVector) -> Result<Vec<f64>, AppError> {
        self.check_len(vector)?;
        Ok(self
            .log_priors
            .iter()
            .zip(&self.log_likelihoods)
            .map(|(prior, likelihoods)| {
                prior
                    + vector
                        .nonzero()
                        .map(|(i, count)| f64::from(count) * likelihoods[i])
                        .sum::<f64>()
            })
            .collect())
    }

    /// Returns the highest-scoring class.
    ///
    /// Ties go to the label that sorts first.
    pub fn predict(&self, vector: &FeatureVector) -> Result<&str, AppError> {
        self.rank(vector).map(|(label, _)| label)
    }

    /// Best class together with its posterior probability, both derived from
    /// a single scoring pass.
    pub fn rank(&self, vector: &FeatureVector) -> Result<(&str, f64), AppError> {
        let scores = self.scores(vector)?;
        let best = argmax(&scores);
        Ok((self.classes[best].as_str(), softmax(&scores)[best]))
    }

    /// Posterior probability of every class (softmax of the scores).
    pub fn probabilities(&self, vector: &FeatureVector) -> Result<Vec<f64>, AppError> {
        Ok(softmax(&self.scores(vector)?))
    }
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exp: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exp.iter().sum();
    exp.into_iter().map(|e| e / sum).collect()
}

/// Index of the first maximum; later entries must be strictly greater to win.
fn argmax(scores: &[f64]) -> usize {
    let mut best = 0;
    for (i, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] {
            best = i;
        }
    }
    best
}
