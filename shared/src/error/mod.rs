//! Composer error types
//!
//! Three layers:
//! - [`ValidationError`] - pre-submission rejections; composer state is
//!   left untouched so the operator can correct and retry.
//! - [`SubmissionError`] - backend/transport failures on the submit path.
//! - [`ComposerError`] - umbrella type returned by the submit operations.
//!
//! Out-of-range indices passed to line mutations are caller bugs and
//! panic instead of surfacing here.

use serde::{Deserialize, Serialize};

/// Pre-submission validation failure
///
/// Serialized form carries a SCREAMING_SNAKE_CASE `kind` tag plus the
/// offending values, for the presentation layer to render.
#[derive(Debug, Clone, thiserror::Error, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationError {
    #[error("order has no lines")]
    EmptyOrder,

    #[error("take-away orders require a note")]
    TakeawayNoteRequired,

    #[error("product '{product_id}' has no catalog price, a custom price is required")]
    CustomPriceRequired { product_id: String },

    #[error("custom price must be a positive finite number, got {price}")]
    InvalidCustomPrice { price: f64 },

    #[error("{field} must be a finite number, got {value}")]
    NonFiniteAmount { field: String, value: f64 },

    #[error("price must be non-negative, got {price}")]
    NegativePrice { price: f64 },

    #[error("price exceeds maximum allowed ({max}), got {price}")]
    PriceTooLarge { price: f64, max: f64 },

    #[error("quantity must be positive, got {quantity}")]
    InvalidQuantity { quantity: i32 },

    #[error("quantity exceeds maximum allowed ({max}), got {quantity}")]
    QuantityTooLarge { quantity: i32, max: i32 },

    #[error("invalid discount amount: {amount}")]
    InvalidDiscount { amount: f64 },

    #[error("note exceeds maximum length ({max}), got {len} characters")]
    NoteTooLong { len: usize, max: usize },
}

/// Submission failure surfaced from the order gateway
#[derive(Debug, Clone, thiserror::Error, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionError {
    /// The backend received the request and rejected it
    #[error("backend rejected the request: {code}: {message}")]
    Rejected { code: String, message: String },

    /// The request never completed (network failure, timeout)
    #[error("transport failure: {message}")]
    Transport { message: String },
}

/// Umbrella error for the submit operations
#[derive(Debug, Clone, thiserror::Error, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ComposerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}
