//! Locale-aware pattern registry
//!
//! A [`PatternRegistry`] is a two-level owned map from [`Locale`] to
//! [`PiiKind`] to an ordered list of regex pattern strings. It is mutable at
//! configuration time and read-only during a detection pass; mutation is the
//! caller's responsibility to serialize against in-flight detection.
//!
//! Invalid pattern syntax is rejected at mutation and load time, never
//! silently dropped.

use crate::domain::{CloakError, Locale, PiiKind, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Pattern library file contents
///
/// TOML sections are keyed by locale code, then by kind label:
///
/// ```toml
/// [locales.US]
/// PHONE_NUMBER = ['\(\d{3}\)\s*\d{3}[-.]?\d{4}']
///
/// [locales.GEN]
/// EMAIL = ['\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b']
/// ```
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    locales: HashMap<String, HashMap<String, Vec<String>>>,
}

/// Per-locale, per-kind collections of textual patterns
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    patterns: HashMap<Locale, HashMap<PiiKind, Vec<String>>>,
}

impl PatternRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a registry from a TOML pattern library file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            CloakError::Configuration(format!(
                "Failed to read pattern library {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Load a registry from TOML content
    ///
    /// Unknown locale codes, unknown kind labels, and invalid regexes are all
    /// configuration errors reported to the caller.
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary = toml::from_str(content)?;

        let mut registry = Self::new();
        for (code, kinds) in library.locales {
            let locale = Self::parse_locale(&code)?;
            for (label, patterns) in kinds {
                let kind = Self::parse_kind(&label)?;
                registry.set_patterns(locale, kind, patterns)?;
            }
        }
        Ok(registry)
    }

    /// Patterns configured for an exact locale and kind
    ///
    /// Returns an empty slice if none are configured. This is an exact-locale
    /// lookup; Generic fallback is applied by the detector when compiling.
    pub fn patterns_for(&self, locale: Locale, kind: PiiKind) -> &[String] {
        self.patterns
            .get(&locale)
            .and_then(|kinds| kinds.get(&kind))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Replace the pattern list for a locale and kind wholesale
    pub fn set_patterns(
        &mut self,
        locale: Locale,
        kind: PiiKind,
        patterns: Vec<String>,
    ) -> Result<()> {
        for pattern in &patterns {
            Self::validate(pattern)?;
        }
        self.patterns
            .entry(locale)
            .or_default()
            .insert(kind, patterns);
        Ok(())
    }

    /// Append a single pattern for a locale and kind
    pub fn add_pattern(
        &mut self,
        locale: Locale,
        kind: PiiKind,
        pattern: impl Into<String>,
    ) -> Result<()> {
        let pattern = pattern.into();
        Self::validate(&pattern)?;
        self.patterns
            .entry(locale)
            .or_default()
            .entry(kind)
            .or_default()
            .push(pattern);
        Ok(())
    }

    /// Append multiple patterns for a locale and kind
    pub fn add_patterns(
        &mut self,
        locale: Locale,
        kind: PiiKind,
        patterns: Vec<String>,
    ) -> Result<()> {
        for pattern in patterns {
            self.add_pattern(locale, kind, pattern)?;
        }
        Ok(())
    }

    /// Empty the pattern list for a locale and kind
    pub fn clear_patterns(&mut self, locale: Locale, kind: PiiKind) {
        if let Some(kinds) = self.patterns.get_mut(&locale) {
            if let Some(patterns) = kinds.get_mut(&kind) {
                patterns.clear();
            }
        }
    }

    /// Locales that have at least one non-empty pattern list
    pub fn configured_locales(&self) -> Vec<Locale> {
        let mut locales: Vec<Locale> = self
            .patterns
            .iter()
            .filter(|(_, kinds)| kinds.values().any(|p| !p.is_empty()))
            .map(|(l, _)| *l)
            .collect();
        locales.sort_by_key(|l| l.code());
        locales
    }

    /// Whether the registry has no patterns at all
    pub fn is_empty(&self) -> bool {
        self.patterns
            .values()
            .all(|kinds| kinds.values().all(|p| p.is_empty()))
    }

    fn validate(pattern: &str) -> Result<()> {
        Regex::new(pattern)
            .map(|_| ())
            .map_err(|e| CloakError::pattern(pattern, &e))
    }

    fn parse_locale(code: &str) -> Result<Locale> {
        Locale::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| CloakError::Configuration(format!("Unknown locale code: {code}")))
    }

    fn parse_kind(label: &str) -> Result<PiiKind> {
        match PiiKind::from_label(&label.to_uppercase()) {
            PiiKind::Misc if !label.eq_ignore_ascii_case("MISC") => Err(CloakError::Configuration(
                format!("Unknown PII kind: {label}"),
            )),
            kind => Ok(kind),
        }
    }
}
