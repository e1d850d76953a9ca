//! Batch orchestration: one composition per identifier, failures isolated.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::document::{Artifact, Composer};

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("no candidate identifiers survived input filtering")]
    EmptyInput,
    #[error("all {failed} composition(s) in the batch failed")]
    AllFailed { failed: usize },
}

/// Per-identifier outcome, kept in original input order.
#[derive(Debug)]
pub enum Outcome {
    Produced(Artifact),
    Failed { identifier: String, reason: String },
}

/// Ordered outcomes of one batch run.
#[derive(Debug)]
pub struct BatchResult {
    pub outcomes: Vec<Outcome>,
}

impl BatchResult {
    pub fn produced(&self) -> usize {
        self.artifacts().count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.produced()
    }

    pub fn artifacts(&self) -> impl Iterator<Item = &Artifact> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            Outcome::Produced(artifact) => Some(artifact),
            Outcome::Failed { .. } => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            Outcome::Produced(_) => None,
            Outcome::Failed { identifier, reason } => {
                Some((identifier.as_str(), reason.as_str()))
            }
        })
    }

    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            requested: self.outcomes.len(),
            produced: self.produced(),
            failed: self.failed(),
            failed_identifiers: self
                .failures()
                .map(|(identifier, _)| identifier.to_string())
                .collect(),
            generated_at: Utc::now(),
        }
    }
}

/// Serializable completion report for one batch.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub requested: usize,
    pub produced: usize,
    pub failed: usize,
    pub failed_identifiers: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

/// Compose every identifier and collect outcomes in input order.
///
/// Compositions share nothing mutable, so they run in parallel; every one
/// settles regardless of how its siblings fare. A failed item becomes a
/// [`Outcome::Failed`] marker, never an early return.
pub fn run(identifiers: &[String], composer: &Composer<'_>) -> BatchResult {
    info!(count = identifiers.len(), "starting batch composition");
    let outcomes: Vec<Outcome> = identifiers
        .par_iter()
        .map(|identifier| match composer.compose(identifier) {
            Ok(artifact) => Outcome::Produced(artifact),
            Err(err) => {
                warn!(identifier = identifier.as_str(), error = %err, "composition failed");
                Outcome::Failed {
                    identifier: identifier.clone(),
                    reason: err.to_string(),
                }
            }
        })
        .collect();
    let result = BatchResult { outcomes };
    info!(
        produced = result.produced(),
        failed = result.failed(),
        "batch settled"
    );
    result
}
