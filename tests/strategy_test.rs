//! Strategy-level rewrite properties over hand-built span sets

use cloak::strategies::{DeleteStrategy, MaskStrategy, RedactionStrategy, TagStrategy};
use cloak::{PiiEntity, PiiKind};

fn entity(kind: PiiKind, start: usize, end: usize, text: &str) -> PiiEntity {
    PiiEntity::new(kind, start, end, text, 0.9)
}

#[test]
fn mask_is_position_stable_for_adjacent_spans() {
    let text = "ab@x.com cd@y.org";
    let entities = vec![
        entity(PiiKind::Email, 0, 8, "ab@x.com"),
        entity(PiiKind::Email, 9, 17, "cd@y.org"),
    ];
    let out = MaskStrategy::new().redact(text, &entities);
    assert_eq!(out, "[REDACTED] [REDACTED]");
}

#[test]
fn mask_handles_span_at_end_of_text() {
    let text = "mail a@b.co";
    let entities = vec![entity(PiiKind::Email, 5, 11, "a@b.co")];
    let out = MaskStrategy::with_mask("*").redact(text, &entities);
    assert_eq!(out, "mail *");
}

#[test]
fn delete_collapses_spans_without_touching_surroundings() {
    let text = "id 123-45-6789 on file";
    let entities = vec![entity(PiiKind::Ssn, 3, 14, "123-45-6789")];
    let out = DeleteStrategy::new().redact(text, &entities);
    assert_eq!(out, "id  on file");
}

#[test]
fn tag_numbers_per_kind_in_reading_order() {
    let text = "A a@x.com B 555-123-4567 C b@y.org";
    let entities = vec![
        // Deliberately out of reading order
        entity(PiiKind::Email, 27, 34, "b@y.org"),
        entity(PiiKind::Email, 2, 9, "a@x.com"),
        entity(PiiKind::PhoneNumber, 12, 24, "555-123-4567"),
    ];
    let out = TagStrategy::new().redact(text, &entities);
    assert_eq!(out, "A <EMAIL_0> B <PHONE_NUMBER_0> C <EMAIL_1>");
}

#[test]
fn tag_counters_reset_between_calls() {
    let strategy = TagStrategy::new();
    let text = "x a@b.co";
    let entities = vec![entity(PiiKind::Email, 2, 8, "a@b.co")];
    assert_eq!(strategy.redact(text, &entities), "x <EMAIL_0>");
    assert_eq!(strategy.redact(text, &entities), "x <EMAIL_0>");
}

#[test]
fn strategies_pass_text_through_when_no_spans() {
    let text = "nothing sensitive";
    let none: Vec<PiiEntity> = Vec::new();
    assert_eq!(MaskStrategy::new().redact(text, &none), text);
    assert_eq!(DeleteStrategy::new().redact(text, &none), text);
    assert_eq!(TagStrategy::new().redact(text, &none), text);
}

#[test]
fn strategy_names_are_stable() {
    assert_eq!(MaskStrategy::new().name(), "MASK");
    assert_eq!(DeleteStrategy::new().name(), "DELETE");
    assert_eq!(TagStrategy::new().name(), "TAG");
}

#[test]
fn multibyte_text_around_spans_is_preserved() {
    let text = "héllo a@b.co wörld";
    let start = text.find("a@b.co").unwrap();
    let entities = vec![entity(PiiKind::Email, start, start + 6, "a@b.co")];
    let out = MaskStrategy::new().redact(text, &entities);
    assert_eq!(out, "héllo [REDACTED] wörld");
}
