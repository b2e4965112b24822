//! Anonymization engine
//!
//! The [`Anonymizer`] orchestrates one detection pass: it runs every
//! configured detector applicable to the active locale, concatenates their
//! span outputs, and hands the merged set to the configured rewrite strategy.
//!
//! Cross-detector overlap is deliberately not resolved here: when two
//! detectors claim the same substring, both spans are reported and both are
//! rewritten independently by the strategy. Overlap is only prevented within
//! a single pattern detector instance.
//!
//! # Examples
//!
//! ```
//! use cloak::engine::Anonymizer;
//! use cloak::detectors::email_detector;
//! use cloak::strategies::MaskStrategy;
//! use cloak::domain::Locale;
//!
//! let anonymizer = Anonymizer::builder()
//!     .with_detector(Box::new(email_detector(Locale::Generic)))
//!     .with_strategy(Box::new(MaskStrategy::new()))
//!     .build();
//!
//! let result = anonymizer.anonymize("Contact support@example.com now");
//! assert_eq!(result.redacted_text, "Contact [REDACTED] now");
//! assert_eq!(result.detection_count(), 1);
//! ```

use crate::detectors::Detector;
use crate::domain::{Locale, PiiEntity, PiiKind};
use crate::strategies::{MaskStrategy, RedactionStrategy};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result of one anonymization pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizationResult {
    /// The untouched input text
    pub original_text: String,
    /// The rewritten text
    pub redacted_text: String,
    /// All detected spans, in detector-emission order, with offsets into the
    /// original text
    pub entities: Vec<PiiEntity>,
    /// Name of the strategy applied
    pub strategy: String,
    /// Locale the pass ran under
    pub locale: Locale,
    /// Detection counts per kind
    pub stats_by_kind: HashMap<PiiKind, usize>,
    /// When the pass completed
    pub timestamp: DateTime<Utc>,
}

impl AnonymizationResult {
    fn new(
        original_text: String,
        redacted_text: String,
        entities: Vec<PiiEntity>,
        strategy: String,
        locale: Locale,
    ) -> Self {
        let mut stats_by_kind = HashMap::new();
        for entity in &entities {
            *stats_by_kind.entry(entity.kind).or_insert(0) += 1;
        }
        Self {
            original_text,
            redacted_text,
            entities,
            strategy,
            locale,
            stats_by_kind,
            timestamp: Utc::now(),
        }
    }

    /// Number of detected spans
    pub fn detection_count(&self) -> usize {
        self.entities.len()
    }

    /// Whether any PII was detected
    pub fn has_detections(&self) -> bool {
        !self.entities.is_empty()
    }
}

/// Orchestrates detectors and a rewrite strategy over input text
///
/// Instances are intended to be built once and reused across many calls;
/// detection is read-only, so a shared `Anonymizer` is safe for concurrent
/// use provided no caller mutates a detector's registry mid-flight.
pub struct Anonymizer {
    detectors: Vec<Box<dyn Detector>>,
    strategy: Box<dyn RedactionStrategy>,
    locale: Locale,
}

impl Anonymizer {
    /// Start building an anonymizer
    pub fn builder() -> AnonymizerBuilder {
        AnonymizerBuilder::new()
    }

    /// The locale this anonymizer runs detection under
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Detect and rewrite PII in the given text
    ///
    /// Empty input is a valid no-op: it returns an empty result without
    /// invoking any detector. A detector returning an error is logged and
    /// contributes no spans; the pass continues with the remaining detectors.
    pub fn anonymize(&self, text: &str) -> AnonymizationResult {
        if text.is_empty() {
            return AnonymizationResult::new(
                String::new(),
                String::new(),
                Vec::new(),
                self.strategy.name().to_string(),
                self.locale,
            );
        }

        let mut all_entities: Vec<PiiEntity> = Vec::new();
        for detector in &self.detectors {
            if !detector.supports_locale(self.locale) {
                tracing::debug!(
                    kind = detector.kind().label(),
                    locale = %self.locale,
                    "Skipping detector for unsupported locale"
                );
                continue;
            }
            match detector.detect(text) {
                Ok(entities) => all_entities.extend(entities),
                Err(e) => {
                    tracing::warn!(
                        kind = detector.kind().label(),
                        error = %e,
                        "Detector failed, contributing no spans"
                    );
                }
            }
        }

        let redacted = self.strategy.redact(text, &all_entities);

        tracing::debug!(
            detections = all_entities.len(),
            strategy = self.strategy.name(),
            "Anonymization pass complete"
        );

        AnonymizationResult::new(
            text.to_string(),
            redacted,
            all_entities,
            self.strategy.name().to_string(),
            self.locale,
        )
    }
}

/// Builder for configuring an [`Anonymizer`]
///
/// Defaults: mask strategy, Generic locale, no detectors.
pub struct AnonymizerBuilder {
    detectors: Vec<Box<dyn Detector>>,
    strategy: Box<dyn RedactionStrategy>,
    locale: Locale,
}

impl AnonymizerBuilder {
    /// Create a builder with defaults
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
            strategy: Box::new(MaskStrategy::new()),
            locale: Locale::Generic,
        }
    }

    /// Add a detection source
    pub fn with_detector(mut self, detector: Box<dyn Detector>) -> Self {
        self.detectors.push(detector);
        self
    }

    /// Add multiple detection sources
    pub fn with_detectors(mut self, detectors: Vec<Box<dyn Detector>>) -> Self {
        self.detectors.extend(detectors);
        self
    }

    /// Set the rewrite strategy
    pub fn with_strategy(mut self, strategy: Box<dyn RedactionStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the active locale
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Build the configured anonymizer
    pub fn build(self) -> Anonymizer {
        Anonymizer {
            detectors: self.detectors,
            strategy: self.strategy,
            locale: self.locale,
        }
    }
}

impl Default for AnonymizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
