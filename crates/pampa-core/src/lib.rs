//! # pampa-core: Pure Business Logic for Pampa ERP
//!
//! This crate is the **heart** of Pampa ERP's validation layer. It contains
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pampa ERP Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (React)                             │   │
//! │  │    Entity Forms ──► Invoice UI ──► Purchase Orders ──► Treasury│   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    API Route Handlers                           │   │
//! │  │    create_supplier, create_customer, emit_invoice, etc.        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pampa-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────────────────┐       ┌─────────────────────┐        │   │
//! │  │   │        cuit         │       │       error         │        │   │
//! │  │   │  validate, format,  │       │     CuitError       │        │   │
//! │  │   │  classify, generate │       │   typed failures    │        │   │
//! │  │   └─────────────────────┘       └─────────────────────┘        │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cuit`] - CUIT/CUIL tax-identifier validation, formatting, generation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use pampa_core::cuit::{validate_cuit, SubjectKind};
//!
//! let cuit = validate_cuit("20-12345678-6").unwrap();
//! assert_eq!(cuit.formatted(), "20-12345678-6");
//! assert!(matches!(cuit.kind(), SubjectKind::Individual(_)));
//!
//! // Every failure is a value, never a panic
//! assert!(validate_cuit("99-12345678-6").is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cuit;
pub mod error;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use pampa_core::Cuit` instead of
// `use pampa_core::cuit::Cuit`

pub use cuit::{Cuit, Gender, SubjectKind};
pub use error::CuitError;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of digits in a complete CUIT/CUIL identifier.
///
/// ## Structure
/// 2 (type code) + 8 (DNI or registration number) + 1 (check digit)
pub const CUIT_DIGITS: usize = 11;

/// Number of digits in the body (DNI / registration number) of a CUIT.
pub const CUIT_BODY_DIGITS: usize = 8;
