//! Batch scan reporting
//!
//! Aggregates statistics across many anonymization passes, for callers that
//! sweep a corpus of texts and want a summary of what was found.

use crate::domain::PiiKind;
use crate::engine::AnonymizationResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregate statistics over a batch of anonymization passes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanReport {
    /// Total texts processed
    pub total_texts: usize,

    /// Total PII spans detected across all texts
    pub total_pii_detected: usize,

    /// Detection counts by kind
    pub detections_by_kind: HashMap<PiiKind, usize>,

    /// Texts with at least one detection
    pub texts_with_pii: usize,

    /// Texts with no detections
    pub texts_without_pii: usize,

    /// Warnings accumulated during the batch
    pub warnings: Vec<String>,
}

impl ScanReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one pass result into the report
    pub fn add_result(&mut self, result: &AnonymizationResult) {
        self.total_texts += 1;

        if result.has_detections() {
            self.texts_with_pii += 1;
            self.total_pii_detected += result.detection_count();
            for (kind, count) in &result.stats_by_kind {
                *self.detections_by_kind.entry(*kind).or_insert(0) += count;
            }
        } else {
            self.texts_without_pii += 1;
        }
    }

    /// Record a warning
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// One-line human-readable summary
    pub fn summary(&self) -> String {
        let mut kinds: Vec<(&PiiKind, &usize)> = self.detections_by_kind.iter().collect();
        kinds.sort_by_key(|(kind, _)| kind.label());
        let breakdown = kinds
            .iter()
            .map(|(kind, count)| format!("{}={count}", kind.label()))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{} spans in {}/{} texts ({})",
            self.total_pii_detected, self.texts_with_pii, self.total_texts, breakdown
        )
    }
}
