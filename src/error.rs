//! Error types for the billing lifecycle.
//!
//! `BillError` is what every operation returns. Recoverable variants map to a
//! user-facing [`Notice`] through [`BillError::notice`].

use thiserror::Error;

use crate::models::ProductId;
use crate::notice::Notice;

/// Failures of the underlying key/value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database lock poisoned")]
    LockPoisoned,

    /// Bills saved by older releases carry locale dates such as `10/19/2026`.
    #[error("Stored {key} has a bill dated {date:?}, which predates the YYYY-MM-DD date format")]
    LegacyDate { key: &'static str, date: String },
}

/// Rejected product input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Product name is required")]
    EmptyName,

    #[error("Price is required")]
    MissingPrice,

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Price cannot be negative")]
    NegativePrice,
}

/// Failure reported by an external share surface.
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("Share failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Share surface unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum BillError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Save attempted with no item above zero quantity.
    #[error("No items with a quantity above zero")]
    EmptyBill,

    #[error("No bills found for today")]
    NothingToClear,

    /// A quantity or price is too large for the total to be represented.
    #[error("Amount too large to calculate")]
    AmountOverflow,

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl BillError {
    /// The notice a front end should show for this error, if it is one the
    /// user can act on.
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::EmptyBill => Some(Notice::NoItems),
            Self::NothingToClear => Some(Notice::NothingToClear),
            Self::AmountOverflow => Some(Notice::AmountTooLarge),
            _ => None,
        }
    }
}

/// Result type alias for `BillError`.
pub type Result<T> = std::result::Result<T, BillError>;
