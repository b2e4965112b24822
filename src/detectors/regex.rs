//! Pattern-matching PII detector
//!
//! [`RegexDetector`] applies an ordered set of compiled patterns to text and
//! emits the maximal set of non-overlapping matches for its configured
//! locale. Active-locale patterns are compiled first, then Generic patterns,
//! so earlier patterns take priority when matches collide.

use super::registry::PatternRegistry;
use super::Detector;
use crate::domain::{Locale, PiiEntity, PiiKind, Result};
use regex::Regex;
use std::collections::HashSet;

/// Match-specific confidence hook
///
/// Given the matched substring, returns a confidence overriding the
/// detector's base value (the credit-card detector uses this for its Luhn
/// check).
pub type MatchScorer = Box<dyn Fn(&str) -> f64 + Send + Sync>;

/// Regex-based PII detector for a single kind
pub struct RegexDetector {
    kind: PiiKind,
    locale: Locale,
    supported: HashSet<Locale>,
    registry: PatternRegistry,
    base_confidence: f64,
    scorer: Option<MatchScorer>,
    compiled: Vec<Regex>,
}

impl RegexDetector {
    /// Create a detector over the given registry
    ///
    /// If the requested locale is not in the supported set the detector falls
    /// back to [`Locale::Generic`], mirroring registry fallback semantics.
    pub fn new(
        kind: PiiKind,
        locale: Locale,
        supported: HashSet<Locale>,
        base_confidence: f64,
        registry: PatternRegistry,
    ) -> Self {
        let locale = if supported.contains(&locale) {
            locale
        } else {
            Locale::Generic
        };
        let mut detector = Self {
            kind,
            locale,
            supported,
            registry,
            base_confidence: base_confidence.clamp(0.0, 1.0),
            scorer: None,
            compiled: Vec::new(),
        };
        detector.recompile();
        detector
    }

    /// Attach a match-specific confidence scorer
    pub fn with_scorer(mut self, scorer: MatchScorer) -> Self {
        self.scorer = Some(scorer);
        self
    }

    /// Patterns configured for the detector's current locale
    pub fn patterns(&self) -> &[String] {
        self.registry.patterns_for(self.locale, self.kind)
    }

    /// Patterns configured for a specific locale
    pub fn patterns_for(&self, locale: Locale) -> &[String] {
        self.registry.patterns_for(locale, self.kind)
    }

    /// Append a pattern for the current locale
    pub fn add_pattern(&mut self, pattern: impl Into<String>) -> Result<()> {
        self.add_pattern_for(self.locale, pattern)
    }

    /// Append a pattern for a specific locale
    pub fn add_pattern_for(&mut self, locale: Locale, pattern: impl Into<String>) -> Result<()> {
        self.registry.add_pattern(locale, self.kind, pattern)?;
        self.recompile();
        Ok(())
    }

    /// Append multiple patterns for a specific locale
    pub fn add_patterns_for(&mut self, locale: Locale, patterns: Vec<String>) -> Result<()> {
        self.registry.add_patterns(locale, self.kind, patterns)?;
        self.recompile();
        Ok(())
    }

    /// Replace all patterns for a specific locale
    pub fn set_patterns_for(&mut self, locale: Locale, patterns: Vec<String>) -> Result<()> {
        self.registry.set_patterns(locale, self.kind, patterns)?;
        self.recompile();
        Ok(())
    }

    /// Clear all patterns for a specific locale
    pub fn clear_patterns_for(&mut self, locale: Locale) {
        self.registry.clear_patterns(locale, self.kind);
        self.recompile();
    }

    /// Rebuild the compiled pattern list from the registry
    ///
    /// Active-locale patterns come first in registration order, then Generic
    /// patterns when the active locale is not Generic. Patterns that fail to
    /// compile are skipped with a warning; registry mutation APIs validate
    /// eagerly so this path only fires for broken construction tables.
    fn recompile(&mut self) {
        self.compiled.clear();

        let mut sources: Vec<&str> = self
            .registry
            .patterns_for(self.locale, self.kind)
            .iter()
            .map(String::as_str)
            .collect();
        if self.locale != Locale::Generic {
            sources.extend(
                self.registry
                    .patterns_for(Locale::Generic, self.kind)
                    .iter()
                    .map(String::as_str),
            );
        }

        for pattern in sources {
            match Regex::new(pattern) {
                Ok(regex) => self.compiled.push(regex),
                Err(e) => {
                    tracing::warn!(pattern, error = %e, "Skipping invalid pattern");
                }
            }
        }
    }

    fn confidence_for(&self, matched: &str) -> f64 {
        match &self.scorer {
            Some(scorer) => scorer(matched).clamp(0.0, 1.0),
            None => self.base_confidence,
        }
    }
}

impl Detector for RegexDetector {
    /// Scan the text with every compiled pattern, left to right
    ///
    /// A candidate match is accepted only if it does not overlap any
    /// already-accepted match; earlier patterns win at the same or
    /// overlapping position.
    fn detect(&self, text: &str) -> Result<Vec<PiiEntity>> {
        let mut results: Vec<PiiEntity> = Vec::new();
        if text.is_empty() {
            return Ok(results);
        }

        for regex in &self.compiled {
            for m in regex.find_iter(text) {
                let candidate = PiiEntity::new(
                    self.kind,
                    m.start(),
                    m.end(),
                    m.as_str(),
                    self.confidence_for(m.as_str()),
                );
                if !results.iter().any(|existing| candidate.overlaps(existing)) {
                    results.push(candidate);
                }
            }
        }

        Ok(results)
    }

    fn kind(&self) -> PiiKind {
        self.kind
    }

    fn locale(&self) -> Locale {
        self.locale
    }

    fn supported_locales(&self) -> &HashSet<Locale> {
        &self.supported
    }
}
