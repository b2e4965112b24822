//! Mask rewrite strategy

use super::{clamped_range, descending_start_order, RedactionStrategy};
use crate::domain::PiiEntity;

const DEFAULT_MASK: &str = "[REDACTED]";

/// Replaces each detected span with a fixed mask string
#[derive(Debug, Clone)]
pub struct MaskStrategy {
    mask: String,
}

impl MaskStrategy {
    /// Create a strategy with the default `[REDACTED]` mask
    pub fn new() -> Self {
        Self::with_mask(DEFAULT_MASK)
    }

    /// Create a strategy with a custom mask string
    pub fn with_mask(mask: impl Into<String>) -> Self {
        Self { mask: mask.into() }
    }

    /// The configured mask string
    pub fn mask(&self) -> &str {
        &self.mask
    }
}

impl Default for MaskStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl RedactionStrategy for MaskStrategy {
    fn redact(&self, text: &str, entities: &[PiiEntity]) -> String {
        if text.is_empty() || entities.is_empty() {
            return text.to_string();
        }

        let mut result = text.to_string();
        for idx in descending_start_order(entities) {
            let entity = &entities[idx];
            if let Some(range) = clamped_range(&result, entity.start, entity.end) {
                result.replace_range(range, &self.mask);
            }
        }
        result
    }

    fn name(&self) -> &'static str {
        "MASK"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PiiKind;

    #[test]
    fn test_mask_single_span() {
        let text = "Contact support@example.com now";
        let entities = vec![PiiEntity::new(
            PiiKind::Email,
            8,
            27,
            "support@example.com",
            0.9,
        )];
        let strategy = MaskStrategy::new();
        assert_eq!(strategy.redact(text, &entities), "Contact [REDACTED] now");
    }

    #[test]
    fn test_mask_length_invariant() {
        let text = "a@x.com called 555-123-4567 twice";
        let entities = vec![
            PiiEntity::new(PiiKind::Email, 0, 7, "a@x.com", 0.9),
            PiiEntity::new(PiiKind::PhoneNumber, 15, 27, "555-123-4567", 0.85),
        ];
        let strategy = MaskStrategy::with_mask("***");
        let out = strategy.redact(text, &entities);
        let span_total: usize = entities.iter().map(|e| e.len()).sum();
        assert_eq!(out.len(), text.len() - span_total + entities.len() * 3);
    }

    #[test]
    fn test_mask_custom_string() {
        let text = "mail me at a@b.co";
        let entities = vec![PiiEntity::new(PiiKind::Email, 11, 17, "a@b.co", 0.9)];
        let strategy = MaskStrategy::with_mask("<hidden>");
        assert_eq!(strategy.redact(text, &entities), "mail me at <hidden>");
    }

    #[test]
    fn test_no_entities_returns_text_unchanged() {
        let strategy = MaskStrategy::new();
        assert_eq!(strategy.redact("nothing here", &[]), "nothing here");
    }

    #[test]
    fn test_overlapping_identical_spans_masked_once_over() {
        // Two detectors claiming the same substring both get rewritten; the
        // second splice clamps to the already-shortened buffer
        let text = "overlapping span";
        let entities = vec![
            PiiEntity::new(PiiKind::Email, 0, 16, "overlapping span", 0.9),
            PiiEntity::new(PiiKind::PersonName, 0, 16, "overlapping span", 0.9),
        ];
        let strategy = MaskStrategy::new();
        assert_eq!(strategy.redact(text, &entities), "[REDACTED]");
    }

    #[test]
    fn test_partially_overlapping_spans_clamp_to_buffer() {
        let text = "0123456789abcdef";
        let entities = vec![
            PiiEntity::new(PiiKind::Misc, 0, 10, "0123456789", 0.9),
            PiiEntity::new(PiiKind::Misc, 5, 15, "56789abcde", 0.9),
        ];
        let strategy = MaskStrategy::with_mask("[X]");
        // [5,15) splices first, then [0,10) clamps its end into the new buffer
        assert_eq!(strategy.redact(text, &entities), "[X]f");
    }
}
