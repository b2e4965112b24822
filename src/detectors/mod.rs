//! PII detection module
//!
//! Provides the trait-based detection interface and its implementations:
//! pattern-based detectors built on [`RegexDetector`] and the model-backed
//! [`NerDetector`]. Detection sources are composed via the [`Detector`] trait,
//! not via inheritance chains.

pub mod builtin;
pub mod ner;
pub mod regex;
pub mod registry;

use crate::domain::{Locale, PiiEntity, PiiKind, Result};
use std::collections::HashSet;

pub use builtin::{
    credit_card_detector, email_detector, ip_address_detector, phone_detector, ssn_detector,
};
pub use ner::{ModelSource, NerDetector, RawToken};
pub use registry::PatternRegistry;

pub use self::regex::RegexDetector;

/// Trait for PII detection sources
///
/// A detector reports spans with offsets into the original input. Detection
/// never fails for unmatched or empty input; an `Err` signals a detector-level
/// fault (for example a failing model collaborator) which the engine isolates
/// to this one detector.
pub trait Detector: Send + Sync {
    /// Detect PII entities in the provided text
    fn detect(&self, text: &str) -> Result<Vec<PiiEntity>>;

    /// The kind of PII this detector reports
    fn kind(&self) -> PiiKind;

    /// The locale this detector is configured for
    fn locale(&self) -> Locale;

    /// The set of locales this detector declares support for
    fn supported_locales(&self) -> &HashSet<Locale>;

    /// Whether this detector is applicable to the given locale
    ///
    /// A detector applies when its supported set contains the locale, or when
    /// it declares support for [`Locale::Generic`].
    fn supports_locale(&self, locale: Locale) -> bool {
        self.supported_locales().contains(&locale)
            || self.supported_locales().contains(&Locale::Generic)
    }
}
