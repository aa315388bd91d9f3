//! Shared types for the order composer
//!
//! Boundary data structures exchanged with the backend order API:
//! catalog/client/table models, order line and addition types, request
//! payloads, the order-detail read model, and the composer error types.

pub mod error;
pub mod models;
pub mod order;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ComposerError, SubmissionError, ValidationError};
pub use order::{Addition, DiscountKind, OrderKind, OrderLine, Operator};
