//! Delete rewrite strategy

use super::{clamped_range, descending_start_order, RedactionStrategy};
use crate::domain::PiiEntity;

/// Removes each detected span entirely, collapsing the surrounding text
#[derive(Debug, Clone, Default)]
pub struct DeleteStrategy;

impl DeleteStrategy {
    /// Create a new delete strategy
    pub fn new() -> Self {
        Self
    }
}

impl RedactionStrategy for DeleteStrategy {
    fn redact(&self, text: &str, entities: &[PiiEntity]) -> String {
        if text.is_empty() || entities.is_empty() {
            return text.to_string();
        }

        let mut result = text.to_string();
        for idx in descending_start_order(entities) {
            let entity = &entities[idx];
            if let Some(range) = clamped_range(&result, entity.start, entity.end) {
                result.replace_range(range, "");
            }
        }
        result
    }

    fn name(&self) -> &'static str {
        "DELETE"
    }
}
