//! Order gateway seam
//!
//! The composer's only asynchronous boundary. Implementations wrap the
//! HTTP client; the composer itself never constructs requests beyond the
//! payload structs, never retries, and never mutates its state based on
//! the outcome.

use async_trait::async_trait;
use shared::error::SubmissionError;
use shared::order::{AdjustOrderRequest, CreateOrderRequest, OrderDetail};

/// Backend order persistence API
///
/// Timeouts are the implementation's concern and surface as
/// [`SubmissionError::Transport`].
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Persist a new order; returns the server-assigned order id
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<String, SubmissionError>;

    /// Fetch the detail read model for an existing order
    async fn fetch_order(&self, order_id: &str) -> Result<OrderDetail, SubmissionError>;

    /// Apply an adjustment change-set to an existing order
    async fn adjust_order(&self, request: &AdjustOrderRequest) -> Result<(), SubmissionError>;
}
