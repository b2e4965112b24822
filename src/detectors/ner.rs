//! Model-backed NER detection and BIO reconstruction
//!
//! An external [`ModelSource`] produces a raw per-token label/score/span
//! stream (BIO tagging scheme). [`NerDetector`] reassembles that stream into
//! coherent multi-token entities with an explicit two-state machine:
//! `Idle` and `Accumulating`.
//!
//! Reconstruction rules:
//! - tokens scoring below the confidence threshold are skipped entirely
//! - a `B-` label closes any in-progress entity (with the kind of the entity
//!   being closed, not the new token's kind) and starts a new one
//! - an `I-` label extends the current entity only when its mapped kind
//!   matches; a mismatched `I-` token is dropped outright
//! - any other label, `O` included, does not close an in-progress entity
//!   mid-stream; entities close only on the next `B-` or at end-of-stream
//! - a closed entity's confidence is the mean of its merged token scores

use super::Detector;
use crate::domain::{Locale, PiiEntity, PiiKind, Result};
use std::collections::HashSet;

const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.80;

/// One token of raw model output
///
/// Offsets are into the original input text and must satisfy `start < end`
/// within bounds; tokens violating the contract are discarded with a warning.
#[derive(Debug, Clone)]
pub struct RawToken {
    /// Raw tag, e.g. "B-PER", "I-LOC", "O"
    pub label: String,
    /// Model confidence for this token
    pub score: f64,
    /// Start offset in the original text
    pub start: usize,
    /// End offset in the original text
    pub end: usize,
    /// The token's surface form
    pub surface: String,
}

impl RawToken {
    /// Convenience constructor
    pub fn new(
        label: impl Into<String>,
        surface: impl Into<String>,
        start: usize,
        end: usize,
        score: f64,
    ) -> Self {
        Self {
            label: label.into(),
            score,
            start,
            end,
            surface: surface.into(),
        }
    }
}

/// External model collaborator
///
/// A black-box synchronous function from text to raw tokens. Implementations
/// backed by a real inference runtime are expected to handle their own
/// resource management; the engine imposes no timeout.
pub trait ModelSource: Send + Sync {
    /// Produce the raw token stream for the given text
    fn predict(&self, text: &str) -> Result<Vec<RawToken>>;
}

/// Map a raw entity type (label with `B-`/`I-` stripped) to a kind
///
/// Unmapped types go to [`PiiKind::Misc`] so no span is lost to vocabulary
/// mismatch.
fn map_entity_type(raw: &str) -> PiiKind {
    match raw {
        "PER" | "PERSON" => PiiKind::PersonName,
        "ORG" | "ORGANIZATION" => PiiKind::Organization,
        "LOC" | "LOCATION" => PiiKind::Location,
        "MISC" => PiiKind::Misc,
        other => {
            tracing::debug!(entity_type = other, "Unmapped entity type, using MISC");
            PiiKind::Misc
        }
    }
}

/// Accumulation state for the BIO walk
enum BioState {
    Idle,
    Accumulating {
        kind: PiiKind,
        text: String,
        start: usize,
        end: usize,
        score_sum: f64,
        count: usize,
    },
}

impl BioState {
    /// Close the in-progress entity, if any, and return to `Idle`
    fn close(&mut self) -> Option<PiiEntity> {
        match std::mem::replace(self, BioState::Idle) {
            BioState::Idle => None,
            BioState::Accumulating {
                kind,
                text,
                start,
                end,
                score_sum,
                count,
            } => Some(PiiEntity::new(
                kind,
                start,
                end,
                text.trim(),
                score_sum / count as f64,
            )),
        }
    }
}

/// Detector that reconstructs entities from an external BIO token stream
pub struct NerDetector {
    source: Box<dyn ModelSource>,
    locale: Locale,
    supported: HashSet<Locale>,
    confidence_threshold: f64,
}

impl NerDetector {
    /// Create a detector over a model source with the default threshold
    pub fn new(source: Box<dyn ModelSource>, locale: Locale) -> Self {
        let supported = [locale, Locale::Generic].into_iter().collect();
        Self {
            source,
            locale,
            supported,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }

    /// Set the per-token confidence threshold
    pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// The per-token confidence threshold
    pub fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }

    /// Merge a raw token stream into entities
    fn assemble(&self, text: &str, tokens: Vec<RawToken>) -> Vec<PiiEntity> {
        let mut entities = Vec::new();
        let mut state = BioState::Idle;

        for token in tokens {
            // Malformed offsets violate the ModelSource contract; drop the token
            if token.start >= token.end || token.end > text.len() {
                tracing::warn!(
                    label = %token.label,
                    start = token.start,
                    end = token.end,
                    "Discarding token with malformed offsets"
                );
                continue;
            }
            if token.score < self.confidence_threshold {
                continue;
            }

            if let Some(raw_type) = token.label.strip_prefix("B-") {
                // Close with the kind of the entity being closed, not the
                // new token's kind
                entities.extend(state.close());
                state = BioState::Accumulating {
                    kind: map_entity_type(raw_type),
                    text: token.surface.clone(),
                    start: token.start,
                    end: token.end,
                    score_sum: token.score,
                    count: 1,
                };
            } else if let Some(raw_type) = token.label.strip_prefix("I-") {
                if let BioState::Accumulating {
                    kind,
                    text,
                    end,
                    score_sum,
                    count,
                    ..
                } = &mut state
                {
                    // A continuation of a different kind is dropped without
                    // closing or extending the current entity
                    if map_entity_type(raw_type) == *kind {
                        text.push(' ');
                        text.push_str(&token.surface);
                        *end = token.end;
                        *score_sum += token.score;
                        *count += 1;
                    }
                }
                // An I- token with no entity in progress is dropped
            }
            // Any other label (O included) neither closes nor extends
        }

        entities.extend(state.close());
        entities
    }
}

impl Detector for NerDetector {
    /// Run the model and reconstruct entities from its token stream
    ///
    /// A failing model source is logged and yields an empty span list so one
    /// broken collaborator cannot abort the whole pipeline.
    fn detect(&self, text: &str) -> Result<Vec<PiiEntity>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let tokens = match self.source.predict(text) {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::warn!(error = %e, "Model source failed, no spans from this detector");
                return Ok(Vec::new());
            }
        };

        Ok(self.assemble(text, tokens))
    }

    /// Detector-level kind; NER reports per-entity kinds, so the detector
    /// itself is registered under the catch-all
    fn kind(&self) -> PiiKind {
        PiiKind::Misc
    }

    fn locale(&self) -> Locale {
        self.locale
    }

    fn supported_locales(&self) -> &HashSet<Locale> {
        &self.supported
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CloakError;

    struct StubModel {
        tokens: Vec<RawToken>,
    }

    impl ModelSource for StubModel {
        fn predict(&self, _text: &str) -> Result<Vec<RawToken>> {
            Ok(self.tokens.clone())
        }
    }

    struct FailingModel;

    impl ModelSource for FailingModel {
        fn predict(&self, _text: &str) -> Result<Vec<RawToken>> {
            Err(CloakError::Model("inference backend unavailable".into()))
        }
    }

    fn detector(tokens: Vec<RawToken>) -> NerDetector {
        NerDetector::new(Box::new(StubModel { tokens }), Locale::Generic)
    }

    #[test]
    fn test_two_token_person_merge() {
        let d = detector(vec![
            RawToken::new("B-PER", "John", 0, 4, 0.95),
            RawToken::new("I-PER", "Smith", 5, 10, 0.93),
        ]);
        let spans = d.detect("John Smith").unwrap();
        assert_eq!(spans.len(), 1);
        let e = &spans[0];
        assert_eq!(e.kind, PiiKind::PersonName);
        assert_eq!(e.text, "John Smith");
        assert_eq!(e.start, 0);
        assert_eq!(e.end, 10);
        assert!((e.confidence - 0.94).abs() < 1e-9);
    }

    #[test]
    fn test_b_token_closes_previous_with_its_own_kind() {
        let d = detector(vec![
            RawToken::new("B-PER", "John", 0, 4, 0.95),
            RawToken::new("B-LOC", "Paris", 5, 10, 0.92),
        ]);
        let spans = d.detect("John Paris").unwrap();
        assert_eq!(spans.len(), 2);
        // The first entity keeps the kind it was opened with
        assert_eq!(spans[0].kind, PiiKind::PersonName);
        assert_eq!(spans[0].text, "John");
        assert_eq!(spans[1].kind, PiiKind::Location);
        assert_eq!(spans[1].text, "Paris");
    }

    #[test]
    fn test_mismatched_continuation_dropped() {
        let d = detector(vec![
            RawToken::new("B-PER", "John", 0, 4, 0.95),
            RawToken::new("I-LOC", "Paris", 5, 10, 0.92),
            RawToken::new("I-PER", "Smith", 11, 16, 0.91),
        ]);
        let spans = d.detect("John Paris Smith").unwrap();
        // The I-LOC token neither closed nor extended the PER entity
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "John Smith");
        assert_eq!(spans[0].end, 16);
    }

    #[test]
    fn test_o_label_does_not_close_mid_stream() {
        let d = detector(vec![
            RawToken::new("B-PER", "John", 0, 4, 0.95),
            RawToken::new("O", "visited", 5, 12, 0.99),
            RawToken::new("I-PER", "Smith", 13, 18, 0.93),
        ]);
        let spans = d.detect("John visited Smith").unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "John Smith");
    }

    #[test]
    fn test_low_score_tokens_skipped_entirely() {
        let d = detector(vec![
            RawToken::new("B-PER", "John", 0, 4, 0.95),
            RawToken::new("I-PER", "Smith", 5, 10, 0.40),
        ]);
        let spans = d.detect("John Smith").unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "John");
        assert_eq!(spans[0].end, 4);
        assert!((spans[0].confidence - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_orphan_continuation_dropped() {
        let d = detector(vec![RawToken::new("I-PER", "Smith", 0, 5, 0.93)]);
        let spans = d.detect("Smith").unwrap();
        assert!(spans.is_empty());
    }

    #[test]
    fn test_unmapped_label_becomes_misc() {
        let d = detector(vec![RawToken::new("B-DRUG", "aspirin", 0, 7, 0.91)]);
        let spans = d.detect("aspirin").unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, PiiKind::Misc);
    }

    #[test]
    fn test_malformed_offsets_discarded() {
        let d = detector(vec![
            RawToken::new("B-PER", "John", 4, 4, 0.95),   // empty span
            RawToken::new("B-PER", "Smith", 5, 999, 0.95), // out of bounds
            RawToken::new("B-LOC", "Paris", 0, 5, 0.95),
        ]);
        let spans = d.detect("Paris is far").unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, PiiKind::Location);
    }

    #[test]
    fn test_failing_model_yields_empty_not_error() {
        let d = NerDetector::new(Box::new(FailingModel), Locale::Generic);
        let spans = d.detect("John Smith").unwrap();
        assert!(spans.is_empty());
    }

    #[test]
    fn test_empty_text_short_circuits() {
        let d = NerDetector::new(Box::new(FailingModel), Locale::Generic);
        assert!(d.detect("").unwrap().is_empty());
    }
}
