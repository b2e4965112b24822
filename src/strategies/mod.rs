//! Rewrite strategies
//!
//! A strategy rewrites detected spans in the original text. Every strategy
//! processes spans in descending start order before touching the buffer, so
//! span offsets (always relative to the original text) stay valid without
//! recomputing shifted positions. Strategies are stateless across calls; any
//! per-call counters reset at the start of each `redact` invocation.

pub mod delete;
pub mod mask;
pub mod tag;

use crate::domain::PiiEntity;

pub use delete::DeleteStrategy;
pub use mask::MaskStrategy;
pub use tag::TagStrategy;

/// Trait for span rewrite policies
pub trait RedactionStrategy: Send + Sync {
    /// Rewrite all detected spans in the original text
    fn redact(&self, text: &str, entities: &[PiiEntity]) -> String;

    /// Descriptive name of this strategy
    fn name(&self) -> &'static str;
}

/// Indices into `entities`, sorted by descending start offset
///
/// Shared by all strategies: rewriting back-to-front keeps earlier offsets
/// stable while later spans are spliced out.
pub(crate) fn descending_start_order(entities: &[PiiEntity]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..entities.len()).collect();
    order.sort_by(|&a, &b| entities[b].start.cmp(&entities[a].start));
    order
}

/// Clamp a span to the current buffer, snapping the end down to a char
/// boundary
///
/// Cross-detector overlap is not resolved upstream, so a span may reach past
/// text an earlier splice already shortened. Returns `None` when nothing of
/// the span remains to rewrite.
pub(crate) fn clamped_range(
    buffer: &str,
    start: usize,
    end: usize,
) -> Option<std::ops::Range<usize>> {
    if start >= buffer.len() {
        return None;
    }
    let mut end = end.min(buffer.len());
    while !buffer.is_char_boundary(end) {
        end -= 1;
    }
    if start >= end {
        return None;
    }
    Some(start..end)
}
