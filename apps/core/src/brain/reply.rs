//! Reply selection.
//!
//! Picks one reply uniformly at random from the bucket of the predicted
//! intent. The random source is always passed in, so seeded generators give
//! reproducible conversations.

use rand::Rng;

use super::catalog::{ResponseCatalog, DEFAULT_BUCKET};
use crate::error::AppError;

/// Picks a reply for `label` from `catalog`, falling back to the default
/// bucket when the label has none.
///
/// # Errors
///
/// `AppError::Config` when neither bucket exists or the chosen bucket is empty.
pub fn select<'c, R: Rng + ?Sized>(
    label: &str,
    catalog: &'c ResponseCatalog,
    rng: &mut R,
) -> Result<&'c str, AppError> {
    let bucket = catalog.bucket_or_default(label).ok_or_else(|| {
        AppError::Config(format!(
            "no response bucket for '{}' and no '{}' bucket",
            label, DEFAULT_BUCKET
        ))
    })?;
    if bucket.is_empty() {
        return Err(AppError::Config(format!(
            "response bucket for '{}' is empty",
            label
        )));
    }
    Ok(bucket[rng.gen_range(0..bucket.len())].as_str())
}

/// Reply selector over a catalog that has already been validated.
///
/// Construction checks the catalog once, so selection cannot fail afterwards.
#[derive(Debug, Clone)]
pub struct ReplySelector {
    catalog: ResponseCatalog,
}

impl ReplySelector {
    /// Wraps `catalog` after checking that the default bucket exists and no
    /// bucket is empty.
    pub fn new(catalog: ResponseCatalog) -> Result<Self, AppError> {
        catalog.validate()?;
        Ok(Self { catalog })
    }

    pub fn catalog(&self) -> &ResponseCatalog {
        &self.catalog
    }

    /// Picks a reply for `label`; `None` selects from the default bucket.
    pub fn select<R: Rng + ?Sized>(&self, label: Option<&str>, rng: &mut R) -> &str {
        let bucket = label
            .and_then(|l| self.catalog.bucket(l))
            .or_else(|| self.catalog.bucket(DEFAULT_BUCKET))
            .unwrap_or_default();
        match bucket.len() {
            0 => "",
            n => bucket[rng.gen_range(0..n)].as_str(),
        }
    }
}
