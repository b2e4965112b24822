//! PII entity data models

use serde::{Deserialize, Serialize};

/// Kind of PII a detector can report
///
/// Closed set with a [`PiiKind::Misc`] catch-all so a label outside the known
/// vocabulary is never silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PiiKind {
    /// Email addresses
    Email,
    /// Telephone numbers
    PhoneNumber,
    /// Payment card numbers
    CreditCard,
    /// Social Security Numbers
    Ssn,
    /// IP addresses
    IpAddress,
    /// Person names
    PersonName,
    /// Organization names
    Organization,
    /// Geographic locations
    Location,
    /// Dates of birth
    DateOfBirth,
    /// Street addresses
    Address,
    /// Catch-all for unmapped or custom entity labels
    Misc,
}

impl PiiKind {
    /// Label used in tag tokens and serialized output
    pub fn label(&self) -> &'static str {
        match self {
            PiiKind::Email => "EMAIL",
            PiiKind::PhoneNumber => "PHONE_NUMBER",
            PiiKind::CreditCard => "CREDIT_CARD",
            PiiKind::Ssn => "SSN",
            PiiKind::IpAddress => "IP_ADDRESS",
            PiiKind::PersonName => "PERSON_NAME",
            PiiKind::Organization => "ORGANIZATION",
            PiiKind::Location => "LOCATION",
            PiiKind::DateOfBirth => "DATE_OF_BIRTH",
            PiiKind::Address => "ADDRESS",
            PiiKind::Misc => "MISC",
        }
    }

    /// Parse a label back into a kind
    ///
    /// Unknown labels map to [`PiiKind::Misc`] so vocabulary mismatches with an
    /// external model degrade to a catch-all category instead of losing spans.
    pub fn from_label(label: &str) -> PiiKind {
        match label {
            "EMAIL" => PiiKind::Email,
            "PHONE_NUMBER" | "PHONE" => PiiKind::PhoneNumber,
            "CREDIT_CARD" => PiiKind::CreditCard,
            "SSN" => PiiKind::Ssn,
            "IP_ADDRESS" => PiiKind::IpAddress,
            "PERSON_NAME" | "PERSON" => PiiKind::PersonName,
            "ORGANIZATION" => PiiKind::Organization,
            "LOCATION" => PiiKind::Location,
            "DATE_OF_BIRTH" => PiiKind::DateOfBirth,
            "ADDRESS" => PiiKind::Address,
            _ => PiiKind::Misc,
        }
    }
}

/// A detected PII span
///
/// `start` and `end` are half-open byte offsets into the *original* input
/// text, never into a partially rewritten buffer. `text` redundantly carries
/// the exact matched substring for convenience and verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiiEntity {
    /// Kind of PII detected
    pub kind: PiiKind,
    /// Start offset in the original text (inclusive)
    pub start: usize,
    /// End offset in the original text (exclusive)
    pub end: usize,
    /// The matched substring, equal to `original[start..end]`
    pub text: String,
    /// Detection confidence (0.0 - 1.0)
    pub confidence: f64,
}

impl PiiEntity {
    /// Create a new entity, clamping confidence into `[0.0, 1.0]`
    pub fn new(
        kind: PiiKind,
        start: usize,
        end: usize,
        text: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            kind,
            start,
            end,
            text: text.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Length of the span in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty (never true for a well-formed entity)
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether this span overlaps another (adjacency is not overlap)
    pub fn overlaps(&self, other: &PiiEntity) -> bool {
        self.start < other.end && other.start < self.end
    }
}
