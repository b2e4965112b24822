//! Domain models and types for cloak
//!
//! The shared value types every other component operates on:
//!
//! - [`PiiEntity`] - an immutable detected span with offsets into the
//!   original input
//! - [`PiiKind`] - the closed set of PII categories with a `Misc` catch-all
//! - [`Locale`] - region/format profiles with Generic fallback semantics
//! - [`CloakError`] - the crate error taxonomy
//!
//! All fallible operations return [`Result<T>`]:
//!
//! ```rust
//! use cloak::domain::{CloakError, Result};
//!
//! fn example() -> Result<()> {
//!     let locale = cloak::domain::Locale::from_code("US");
//!     assert_eq!(locale.code(), "US");
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod errors;
pub mod locale;

// Re-export commonly used types for convenience
pub use entity::{PiiEntity, PiiKind};
pub use errors::CloakError;
pub use locale::Locale;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, CloakError>;
