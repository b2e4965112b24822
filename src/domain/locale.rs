//! Geographic locales controlling which detection patterns apply

use serde::{Deserialize, Serialize};
use std::fmt;

/// Geographic locale supported by the library
///
/// A locale selects the region-specific pattern set a detector uses. Pattern
/// registries always consider the [`Locale::Generic`] entry in addition to the
/// active locale's entry, never instead of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Locale {
    /// United States
    Us,
    /// United Kingdom
    Uk,
    /// European Union
    Eu,
    /// India
    India,
    /// Canada
    Canada,
    /// Australia
    Australia,
    /// Generic/international fallback patterns
    Generic,
}

impl Locale {
    /// All locales, in declaration order
    pub const ALL: [Locale; 7] = [
        Locale::Us,
        Locale::Uk,
        Locale::Eu,
        Locale::India,
        Locale::Canada,
        Locale::Australia,
        Locale::Generic,
    ];

    /// Short locale code (e.g. "US", "GEN")
    pub fn code(&self) -> &'static str {
        match self {
            Locale::Us => "US",
            Locale::Uk => "UK",
            Locale::Eu => "EU",
            Locale::India => "IN",
            Locale::Canada => "CA",
            Locale::Australia => "AU",
            Locale::Generic => "GEN",
        }
    }

    /// Human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::Us => "United States",
            Locale::Uk => "United Kingdom",
            Locale::Eu => "European Union",
            Locale::India => "India",
            Locale::Canada => "Canada",
            Locale::Australia => "Australia",
            Locale::Generic => "Generic/International",
        }
    }

    /// Look up a locale by its code, case-insensitively
    ///
    /// Unknown codes fall back to [`Locale::Generic`] rather than failing, so
    /// a stale or misspelled code degrades to the broadest pattern set.
    pub fn from_code(code: &str) -> Locale {
        Locale::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(code))
            .unwrap_or(Locale::Generic)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::Generic
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_exact() {
        assert_eq!(Locale::from_code("US"), Locale::Us);
        assert_eq!(Locale::from_code("GEN"), Locale::Generic);
        assert_eq!(Locale::from_code("IN"), Locale::India);
    }

    #[test]
    fn test_from_code_case_insensitive() {
        assert_eq!(Locale::from_code("us"), Locale::Us);
        assert_eq!(Locale::from_code("Au"), Locale::Australia);
    }

    #[test]
    fn test_from_code_unknown_falls_back_to_generic() {
        assert_eq!(Locale::from_code("XX"), Locale::Generic);
        assert_eq!(Locale::from_code(""), Locale::Generic);
    }

    #[test]
    fn test_display_uses_code() {
        assert_eq!(Locale::Uk.to_string(), "UK");
    }
}
