//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a deterministic business failure raised at the point of
/// violation. Console rendering belongs to the shell, which prints the
/// `Display` form prefixed with `Error: `.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (blank text, non-positive price, negative quantity, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A product with the same code is already in the catalog.
    #[error("duplicate product code: {code}")]
    DuplicateCode { code: String },

    /// An exit asked for more units than the product holds.
    #[error(
        "insufficient stock for {name} (code: {code}). Available: {available}, requested: {requested}"
    )]
    InsufficientStock {
        name: String,
        code: String,
        available: i64,
        requested: i64,
    },

    /// A lookup missed.
    #[error("product not found: {0}")]
    NotFound(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn duplicate_code(code: impl Into<String>) -> Self {
        Self::DuplicateCode { code: code.into() }
    }

    pub fn insufficient_stock(
        name: impl Into<String>,
        code: impl Into<String>,
        available: i64,
        requested: i64,
    ) -> Self {
        Self::InsufficientStock {
            name: name.into(),
            code: code.into(),
            available,
            requested,
        }
    }

    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound(code.into())
    }
}
