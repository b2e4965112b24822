//! Built-in pattern detectors
//!
//! Thin constructors over [`RegexDetector`] carrying the default per-locale
//! pattern tables. All tables are registered at construction through the
//! registry's validating API, so the default patterns are guaranteed
//! well-formed.

use super::registry::PatternRegistry;
use super::regex::RegexDetector;
use crate::domain::{Locale, PiiKind};
use std::collections::HashSet;

const EMAIL_CONFIDENCE: f64 = 0.90;
const PHONE_CONFIDENCE: f64 = 0.85;
const CREDIT_CARD_CONFIDENCE: f64 = 0.90;
const CREDIT_CARD_LUHN_CONFIDENCE: f64 = 0.95;
const SSN_CONFIDENCE: f64 = 0.85;
const IP_ADDRESS_CONFIDENCE: f64 = 0.90;

fn all_locales() -> HashSet<Locale> {
    Locale::ALL.into_iter().collect()
}

/// Email address detector
///
/// Email format is standardized globally, so a single pattern is registered
/// for the Generic locale and every locale is supported.
pub fn email_detector(locale: Locale) -> RegexDetector {
    let mut registry = PatternRegistry::new();
    registry
        .add_pattern(
            Locale::Generic,
            PiiKind::Email,
            r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
        )
        .expect("builtin email pattern is valid");
    RegexDetector::new(
        PiiKind::Email,
        locale,
        all_locales(),
        EMAIL_CONFIDENCE,
        registry,
    )
}

/// Phone number detector with per-locale format tables
pub fn phone_detector(locale: Locale) -> RegexDetector {
    let us_patterns = [
        r"\(\d{3}\)\s*\d{3}[-.]?\d{4}",            // (123) 456-7890 or (123)456-7890
        r"\d{3}[-.]\d{3}[-.]\d{4}",                // 123-456-7890 or 123.456.7890
        r"\d{10}",                                 // 1234567890
        r"\+1\s*\(\d{3}\)\s*\d{3}[-. ]?\d{4}",     // +1 (123) 456-7890
        r"\(\d{3}\)\s+\d{3}\s+\d{4}",              // (123) 456 7890
        r"\d{3}\s+\d{3}\s+\d{4}",                  // 123 456 7890
    ];
    let uk_patterns = [
        r"\+44\s?\d{4}\s?\d{6}",                   // +44 7911 123456
        r"\(0\d{3,4}\)\s?\d{3,4}\s?\d{4}",         // (0161) 999 8888
        r"0\d{3,4}[- ]?\d{3,4}[- ]?\d{4}",         // 01619998888 or 0161-999-8888
    ];
    let india_patterns = [
        r"\+91[- ]?\d{10}",                        // +91 9999999999
        r"0\d{10}",                                // 09999999999
        r"\d{5}[- ]?\d{5}",                        // 99999 99999
    ];
    let australia_patterns = [
        r"\+61\s?\d{1}\s?\d{4}\s?\d{4}",           // +61 4 1234 5678
        r"0\d{1}\s?\d{4}\s?\d{4}",                 // 04 1234 5678
        r"\(0\d{1}\)\s?\d{4}\s?\d{4}",             // (04) 1234 5678
    ];
    let eu_patterns = [
        r"\+49[- ]?\d{3,4}[- ]?\d{5,8}",                           // Germany
        r"\+33[- ]?\d{1}[- ]?\d{2}[- ]?\d{2}[- ]?\d{2}[- ]?\d{2}", // France
        r"\+39[- ]?\d{2,4}[- ]?\d{6,8}",                           // Italy
        r"\+34[- ]?\d{2}[- ]?\d{3}[- ]?\d{3}",                     // Spain
    ];
    let generic_patterns = [
        r"\+\d{1,3}[- ]?\d{3,14}", // international prefix form
        r"\d{5,15}",               // bare digit run
    ];

    let mut registry = PatternRegistry::new();
    let tables: [(Locale, &[&str]); 7] = [
        (Locale::Us, &us_patterns),
        (Locale::Canada, &us_patterns), // Canada shares US formats
        (Locale::Uk, &uk_patterns),
        (Locale::India, &india_patterns),
        (Locale::Australia, &australia_patterns),
        (Locale::Eu, &eu_patterns),
        (Locale::Generic, &generic_patterns),
    ];
    for (table_locale, patterns) in tables {
        registry
            .set_patterns(
                table_locale,
                PiiKind::PhoneNumber,
                patterns.iter().map(|p| p.to_string()).collect(),
            )
            .expect("builtin phone patterns are valid");
    }

    RegexDetector::new(
        PiiKind::PhoneNumber,
        locale,
        all_locales(),
        PHONE_CONFIDENCE,
        registry,
    )
}

/// Payment card detector with a Luhn-check confidence scorer
///
/// Card numbers are locale-independent; a structurally valid number (Luhn
/// checksum passes) is reported with raised confidence.
pub fn credit_card_detector(locale: Locale) -> RegexDetector {
    let card_patterns = [
        // Visa
        r"\b4[0-9]{12}(?:[0-9]{3})?\b",
        r"\b4[0-9]{3}[-\s]?[0-9]{4}[-\s]?[0-9]{4}[-\s]?[0-9]{4}\b",
        // Mastercard
        r"\b5[1-5][0-9]{14}\b",
        r"\b5[1-5][0-9]{2}[-\s]?[0-9]{4}[-\s]?[0-9]{4}[-\s]?[0-9]{4}\b",
        // American Express
        r"\b3[47][0-9]{13}\b",
        r"\b3[47][0-9]{2}[-\s]?[0-9]{6}[-\s]?[0-9]{5}\b",
    ];

    let mut registry = PatternRegistry::new();
    registry
        .set_patterns(
            Locale::Generic,
            PiiKind::CreditCard,
            card_patterns.iter().map(|p| p.to_string()).collect(),
        )
        .expect("builtin card patterns are valid");

    RegexDetector::new(
        PiiKind::CreditCard,
        locale,
        all_locales(),
        CREDIT_CARD_CONFIDENCE,
        registry,
    )
    .with_scorer(Box::new(|matched| {
        let digits: String = matched.chars().filter(|c| c.is_ascii_digit()).collect();
        if luhn_valid(&digits) {
            CREDIT_CARD_LUHN_CONFIDENCE
        } else {
            CREDIT_CARD_CONFIDENCE
        }
    }))
}

/// US Social Security Number detector
pub fn ssn_detector(locale: Locale) -> RegexDetector {
    let mut registry = PatternRegistry::new();
    registry
        .set_patterns(
            Locale::Us,
            PiiKind::Ssn,
            vec![r"\b\d{3}-\d{2}-\d{4}\b".to_string()],
        )
        .expect("builtin SSN patterns are valid");
    // The dashed form is unambiguous enough to report everywhere
    registry
        .set_patterns(
            Locale::Generic,
            PiiKind::Ssn,
            vec![r"\b\d{3}-\d{2}-\d{4}\b".to_string()],
        )
        .expect("builtin SSN patterns are valid");

    RegexDetector::new(
        PiiKind::Ssn,
        locale,
        [Locale::Us, Locale::Generic].into_iter().collect(),
        SSN_CONFIDENCE,
        registry,
    )
}

/// IPv4 address detector
pub fn ip_address_detector(locale: Locale) -> RegexDetector {
    let mut registry = PatternRegistry::new();
    registry
        .add_pattern(
            Locale::Generic,
            PiiKind::IpAddress,
            r"\b(?:25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)(?:\.(?:25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)){3}\b",
        )
        .expect("builtin IP pattern is valid");

    RegexDetector::new(
        PiiKind::IpAddress,
        locale,
        all_locales(),
        IP_ADDRESS_CONFIDENCE,
        registry,
    )
}

/// Luhn checksum over a digit string
fn luhn_valid(digits: &str) -> bool {
    if digits.len() < 12 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let mut sum = 0u32;
    let mut alternate = false;
    for c in digits.chars().rev() {
        let mut digit = c.to_digit(10).unwrap_or(0);
        if alternate {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
        alternate = !alternate;
    }
    sum % 10 == 0
}
