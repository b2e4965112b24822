//! Tag rewrite strategy
//!
//! Replaces each span with a `<KIND_N>` token. Sequence numbers are assigned
//! in reading order (ascending start offset) and only then applied during the
//! descending-order rewrite pass; numbering order and rewrite order must stay
//! separate or the output would carry `<EMAIL_1>` before `<EMAIL_0>`.

use super::{clamped_range, descending_start_order, RedactionStrategy};
use crate::domain::{PiiEntity, PiiKind};
use std::collections::HashMap;

/// Replaces each detected span with a per-kind sequence token
#[derive(Debug, Clone, Default)]
pub struct TagStrategy;

impl TagStrategy {
    /// Create a new tag strategy
    pub fn new() -> Self {
        Self
    }

    /// Assign zero-based per-kind sequence numbers in ascending start order
    fn number_in_reading_order(entities: &[PiiEntity]) -> Vec<usize> {
        let mut reading_order: Vec<usize> = (0..entities.len()).collect();
        reading_order.sort_by(|&a, &b| entities[a].start.cmp(&entities[b].start));

        let mut counters: HashMap<PiiKind, usize> = HashMap::new();
        let mut numbers = vec![0usize; entities.len()];
        for idx in reading_order {
            let counter = counters.entry(entities[idx].kind).or_insert(0);
            numbers[idx] = *counter;
            *counter += 1;
        }
        numbers
    }
}

impl RedactionStrategy for TagStrategy {
    fn redact(&self, text: &str, entities: &[PiiEntity]) -> String {
        if text.is_empty() || entities.is_empty() {
            return text.to_string();
        }

        // Counters reset here, per invocation
        let numbers = Self::number_in_reading_order(entities);

        let mut result = text.to_string();
        for idx in descending_start_order(entities) {
            let entity = &entities[idx];
            if let Some(range) = clamped_range(&result, entity.start, entity.end) {
                let token = format!("<{}_{}>", entity.kind.label(), numbers[idx]);
                result.replace_range(range, &token);
            }
        }
        result
    }

    fn name(&self) -> &'static str {
        "TAG"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_numbering_matches_reading_order() {
        let text = "a@x.com b@y.com";
        let entities = vec![
            PiiEntity::new(PiiKind::Email, 0, 7, "a@x.com", 0.9),
            PiiEntity::new(PiiKind::Email, 8, 15, "b@y.com", 0.9),
        ];
        let strategy = TagStrategy::new();
        assert_eq!(strategy.redact(text, &entities), "<EMAIL_0> <EMAIL_1>");
    }

    #[test]
    fn test_tag_numbering_independent_of_emission_order() {
        let text = "a@x.com b@y.com";
        // Entities reported right-to-left; numbering still follows the text
        let entities = vec![
            PiiEntity::new(PiiKind::Email, 8, 15, "b@y.com", 0.9),
            PiiEntity::new(PiiKind::Email, 0, 7, "a@x.com", 0.9),
        ];
        let strategy = TagStrategy::new();
        assert_eq!(strategy.redact(text, &entities), "<EMAIL_0> <EMAIL_1>");
    }

    #[test]
    fn test_tag_counters_are_per_kind() {
        let text = "a@x.com 555-123-4567 b@y.com";
        let entities = vec![
            PiiEntity::new(PiiKind::Email, 0, 7, "a@x.com", 0.9),
            PiiEntity::new(PiiKind::PhoneNumber, 8, 20, "555-123-4567", 0.85),
            PiiEntity::new(PiiKind::Email, 21, 28, "b@y.com", 0.9),
        ];
        let strategy = TagStrategy::new();
        assert_eq!(
            strategy.redact(text, &entities),
            "<EMAIL_0> <PHONE_NUMBER_0> <EMAIL_1>"
        );
    }

    #[test]
    fn test_tag_overlapping_spans_rewrite_independently() {
        let text = "overlapping span";
        let entities = vec![
            PiiEntity::new(PiiKind::Email, 0, 16, "overlapping span", 0.9),
            PiiEntity::new(PiiKind::PersonName, 0, 16, "overlapping span", 0.9),
        ];
        let strategy = TagStrategy::new();
        // The later splice clamps onto the first token and replaces it
        assert_eq!(strategy.redact(text, &entities), "<PERSON_NAME_0>");
    }

    #[test]
    fn test_tag_counters_reset_per_call() {
        let text = "a@x.com";
        let entities = vec![PiiEntity::new(PiiKind::Email, 0, 7, "a@x.com", 0.9)];
        let strategy = TagStrategy::new();
        assert_eq!(strategy.redact(text, &entities), "<EMAIL_0>");
        // A second invocation starts numbering from zero again
        assert_eq!(strategy.redact(text, &entities), "<EMAIL_0>");
    }
}
