//! Response catalog: intent label → candidate replies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::AppError;

/// Key of the bucket used for unrecognized intents.
pub const DEFAULT_BUCKET: &str = "default";

/// Mapping from intent label (plus [`DEFAULT_BUCKET`]) to reply strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseCatalog(BTreeMap<String, Vec<String>>);

impl ResponseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a bucket.
    pub fn with_bucket<I, S>(mut self, label: &str, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0
            .insert(label.to_string(), replies.into_iter().map(Into::into).collect());
        self
    }

    /// Replies registered for `label`, if any.
    pub fn bucket(&self, label: &str) -> Option<&[String]> {
        self.0.get(label).map(Vec::as_slice)
    }

    /// Replies for `label`, falling back to the default bucket.
    pub fn bucket_or_default(&self, label: &str) -> Option<&[String]> {
        self.bucket(label).or_else(|| self.bucket(DEFAULT_BUCKET))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks the catalog on its own: the default bucket exists and no
    /// bucket is empty.
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.0.contains_key(DEFAULT_BUCKET) {
            return Err(AppError::Config(format!(
                "response catalog has no '{}' bucket",
                DEFAULT_BUCKET
            )));
        }
        if let Some((label, _)) = self.0.iter().find(|(_, replies)| replies.is_empty()) {
            return Err(AppError::Config(format!(
                "response bucket '{}' is empty",
                label
            )));
        }
        Ok(())
    }

    /// Checks the catalog against the labels a classifier can produce: every
    /// label needs its own non-empty bucket.
    pub fn validate_for<'a, I>(&self, labels: I) -> Result<(), AppError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.validate()?;
        for label in labels {
            if !self.0.contains_key(label) {
                return Err(AppError::Config(format!(
                    "intent '{}' has no response bucket",
                    label
                )));
            }
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<String>)> for ResponseCatalog {
    fn from_iter<T: IntoIterator<Item = (S, Vec<String>)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
