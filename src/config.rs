//! Engine configuration
//!
//! [`AnonymizerConfig`] is the declarative way to assemble an engine: which
//! built-in detectors to run, which strategy to apply, the active locale, and
//! an optional TOML pattern library layered on top of the built-in tables.
//! Invalid values are configuration errors reported synchronously, never
//! silently swallowed.

use crate::detectors::{
    credit_card_detector, email_detector, ip_address_detector, phone_detector, ssn_detector,
    PatternRegistry,
};
use crate::domain::{CloakError, Locale, PiiKind, Result};
use crate::engine::Anonymizer;
use crate::strategies::{DeleteStrategy, MaskStrategy, RedactionStrategy, TagStrategy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Rewrite strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Replace spans with a fixed mask string
    Mask,
    /// Remove spans entirely
    Delete,
    /// Replace spans with `<KIND_N>` tokens
    Tag,
}

impl Default for StrategyKind {
    fn default() -> Self {
        Self::Mask
    }
}

/// Built-in detector selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinDetector {
    Email,
    Phone,
    CreditCard,
    Ssn,
    IpAddress,
}

impl BuiltinDetector {
    fn kind(&self) -> PiiKind {
        match self {
            BuiltinDetector::Email => PiiKind::Email,
            BuiltinDetector::Phone => PiiKind::PhoneNumber,
            BuiltinDetector::CreditCard => PiiKind::CreditCard,
            BuiltinDetector::Ssn => PiiKind::Ssn,
            BuiltinDetector::IpAddress => PiiKind::IpAddress,
        }
    }
}

/// Declarative anonymizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizerConfig {
    /// Active locale for the detection pass
    #[serde(default)]
    pub locale: Locale,

    /// Rewrite strategy to apply
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Custom mask string (mask strategy only)
    pub mask: Option<String>,

    /// Built-in detectors to run
    #[serde(default = "default_detectors")]
    pub detectors: Vec<BuiltinDetector>,

    /// Optional TOML pattern library layered on top of built-in tables
    pub pattern_library: Option<PathBuf>,
}

fn default_detectors() -> Vec<BuiltinDetector> {
    vec![BuiltinDetector::Email, BuiltinDetector::Phone]
}

impl Default for AnonymizerConfig {
    fn default() -> Self {
        Self {
            locale: Locale::Generic,
            strategy: StrategyKind::Mask,
            mask: None,
            detectors: default_detectors(),
            pattern_library: None,
        }
    }
}

impl AnonymizerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            CloakError::Configuration(format!(
                "Failed to read config {}: {e}",
                path.as_ref().display()
            ))
        })?;
        let config: AnonymizerConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref path) = self.pattern_library {
            if !path.exists() {
                return Err(CloakError::Configuration(format!(
                    "Pattern library file not found: {}",
                    path.display()
                )));
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                return Err(CloakError::Configuration(format!(
                    "Pattern library must be a TOML file: {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }

    /// Apply environment variable overrides
    ///
    /// Recognized: `CLOAK_LOCALE`, `CLOAK_STRATEGY`, `CLOAK_MASK`. Invalid
    /// values are configuration errors.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("CLOAK_LOCALE") {
            self.locale = Locale::ALL
                .into_iter()
                .find(|l| l.code().eq_ignore_ascii_case(&val))
                .ok_or_else(|| {
                    CloakError::Configuration(format!("Invalid CLOAK_LOCALE: {val}"))
                })?;
        }

        if let Ok(val) = std::env::var("CLOAK_STRATEGY") {
            self.strategy = match val.to_lowercase().as_str() {
                "mask" => StrategyKind::Mask,
                "delete" => StrategyKind::Delete,
                "tag" => StrategyKind::Tag,
                _ => {
                    return Err(CloakError::Configuration(format!(
                        "Invalid CLOAK_STRATEGY: {val}"
                    )))
                }
            };
        }

        if let Ok(val) = std::env::var("CLOAK_MASK") {
            self.mask = Some(val);
        }

        Ok(())
    }

    /// Assemble an [`Anonymizer`] from this configuration
    ///
    /// Loads the pattern library (if configured) and layers its patterns on
    /// top of each selected detector's built-in table.
    pub fn build(&self) -> Result<Anonymizer> {
        self.validate()?;

        let library = match &self.pattern_library {
            Some(path) => Some(PatternRegistry::from_file(path)?),
            None => None,
        };

        let mut builder = Anonymizer::builder().with_locale(self.locale);

        for selector in &self.detectors {
            let mut detector = match selector {
                BuiltinDetector::Email => email_detector(self.locale),
                BuiltinDetector::Phone => phone_detector(self.locale),
                BuiltinDetector::CreditCard => credit_card_detector(self.locale),
                BuiltinDetector::Ssn => ssn_detector(self.locale),
                BuiltinDetector::IpAddress => ip_address_detector(self.locale),
            };

            if let Some(ref library) = library {
                let kind = selector.kind();
                for locale in library.configured_locales() {
                    let patterns = library.patterns_for(locale, kind).to_vec();
                    if !patterns.is_empty() {
                        detector.add_patterns_for(locale, patterns)?;
                    }
                }
            }

            builder = builder.with_detector(Box::new(detector));
        }

        let strategy: Box<dyn RedactionStrategy> = match self.strategy {
            StrategyKind::Mask => match &self.mask {
                Some(mask) => Box::new(MaskStrategy::with_mask(mask.clone())),
                None => Box::new(MaskStrategy::new()),
            },
            StrategyKind::Delete => Box::new(DeleteStrategy::new()),
            StrategyKind::Tag => Box::new(TagStrategy::new()),
        };

        Ok(builder.with_strategy(strategy).build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnonymizerConfig::default();
        assert_eq!(config.locale, Locale::Generic);
        assert_eq!(config.strategy, StrategyKind::Mask);
        assert!(config.mask.is_none());
        assert_eq!(config.detectors.len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_build_default_engine() {
        let config = AnonymizerConfig::default();
        let anonymizer = config.build().unwrap();
        let result = anonymizer.anonymize("mail a@b.co");
        assert_eq!(result.detection_count(), 1);
    }

    #[test]
    fn test_custom_mask() {
        let config = AnonymizerConfig {
            mask: Some("<gone>".to_string()),
            detectors: vec![BuiltinDetector::Email],
            ..Default::default()
        };
        let anonymizer = config.build().unwrap();
        let result = anonymizer.anonymize("mail a@b.co");
        assert_eq!(result.redacted_text, "mail <gone>");
    }

    #[test]
    fn test_missing_pattern_library_rejected() {
        let config = AnonymizerConfig {
            pattern_library: Some(PathBuf::from("/nonexistent/patterns.toml")),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, CloakError::Configuration(_)));
    }

    #[test]
    fn test_config_deserialization() {
        let toml = r#"
            locale = "US"
            strategy = "tag"
            detectors = ["email", "credit_card"]
        "#;
        let config: AnonymizerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.locale, Locale::Us);
        assert_eq!(config.strategy, StrategyKind::Tag);
        assert_eq!(
            config.detectors,
            vec![BuiltinDetector::Email, BuiltinDetector::CreditCard]
        );
    }
}
