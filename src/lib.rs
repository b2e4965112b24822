// Cloak - PII detection and anonymization engine
// Copyright (c) 2025 Cloak Contributors
// Licensed under the MIT License

//! # Cloak - PII detection and anonymization
//!
//! Cloak locates spans of sensitive text (PII entities) inside arbitrary
//! input strings and rewrites those spans under a configurable redaction
//! policy. It is an embeddable engine: callers supply detection sources and a
//! rewrite strategy, submit text, and receive both the rewritten text and
//! structured metadata about what was found.
//!
//! ## Overview
//!
//! This library provides:
//! - **Pattern detection** with locale-aware registries (US, UK, EU, India,
//!   Canada, Australia, plus a Generic fallback always considered in addition
//!   to the active locale)
//! - **BIO reconstruction** of multi-token entities from an external NER
//!   model's raw token stream
//! - **Rewrite strategies**: mask, delete, and tag, all position-stable over
//!   offsets into the original text
//!
//! ## Architecture
//!
//! - [`domain`] - shared value types ([`PiiEntity`], [`PiiKind`], [`Locale`])
//!   and the error taxonomy
//! - [`detectors`] - the [`Detector`](detectors::Detector) trait, the
//!   locale-aware [`PatternRegistry`](detectors::PatternRegistry), built-in
//!   pattern detectors, and the model-backed NER detector
//! - [`strategies`] - mask/delete/tag rewrite policies
//! - [`engine`] - the [`Anonymizer`] orchestrator
//! - [`config`] - declarative engine assembly
//! - [`report`] - batch scan statistics
//!
//! ## Quick start
//!
//! ```rust
//! use cloak::{Anonymizer, Locale};
//! use cloak::detectors::{email_detector, phone_detector};
//! use cloak::strategies::TagStrategy;
//!
//! let anonymizer = Anonymizer::builder()
//!     .with_detector(Box::new(email_detector(Locale::Us)))
//!     .with_detector(Box::new(phone_detector(Locale::Us)))
//!     .with_strategy(Box::new(TagStrategy::new()))
//!     .with_locale(Locale::Us)
//!     .build();
//!
//! let result = anonymizer.anonymize("Reach john@example.com or (555) 123-4567");
//! assert!(result.redacted_text.contains("<EMAIL_0>"));
//! assert!(result.has_detections());
//! ```
//!
//! ## Error handling
//!
//! Configuration errors (invalid patterns, unknown locale codes) surface
//! synchronously through [`CloakError`]; detection-time faults are caught
//! per-detector and degrade to "fewer spans detected". Empty input is a
//! valid no-op, never an error.
//!
//! ## Concurrency
//!
//! Each `anonymize` call is synchronous and single-threaded. Built engines
//! are safe for concurrent read-only reuse; pattern registry mutation is not
//! internally synchronized and must be serialized by the caller against
//! in-flight detection.

pub mod config;
pub mod detectors;
pub mod domain;
pub mod engine;
pub mod report;
pub mod strategies;

// Re-export the primary API surface
pub use config::AnonymizerConfig;
pub use domain::{CloakError, Locale, PiiEntity, PiiKind};
pub use engine::{AnonymizationResult, Anonymizer};
pub use report::ScanReport;
