//! # Error Types
//!
//! Domain-specific error types for pampa-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pampa-core errors (this file)                                         │
//! │  └── CuitError        - Tax-identifier validation failures             │
//! │                                                                         │
//! │  API errors (in route handlers, outside this workspace)                │
//! │  └── "INVALID_CUIT: <message>" - What the frontend sees                │
//! │                                                                         │
//! │  Flow: CuitError → route handler wraps with marker → 400 payload       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (declared vs calculated digit, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// CUIT Error
// =============================================================================

/// CUIT/CUIL validation failures.
///
/// Variants are declared in rule-evaluation order: the validator stops at the
/// first failing rule, so a returned variant implies every earlier rule passed.
///
/// Wrapping these in a transport-level error (HTTP 400 with an
/// `INVALID_CUIT:` message prefix) is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CuitError {
    /// Input was empty or whitespace-only.
    #[error("CUIT is required")]
    Empty,

    /// Input contains characters other than digits, dashes, and spaces.
    ///
    /// Dashes and spaces are tolerated as separators; letters and any other
    /// punctuation are not.
    #[error("CUIT must contain only digits")]
    InvalidCharacters,

    /// Stripped digit string is not exactly 11 digits long.
    #[error("CUIT must have exactly 11 digits, found {found}")]
    WrongLength { found: usize },

    /// The two-digit prefix is not a recognized AFIP type code.
    #[error("{code} is not a valid CUIT type")]
    InvalidTypeCode { code: String },

    /// The declared check digit does not match the modulo-11 computation.
    ///
    /// Both digits are reported so callers can surface the expected value.
    #[error("check digit {declared} is incorrect, expected {calculated}")]
    CheckDigitMismatch { declared: u8, calculated: u8 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CuitError.
pub type CuitResult<T> = Result<T, CuitError>;

// =============================================================================
// Unit Tests
// =============================================================================
