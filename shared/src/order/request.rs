//! Submission request payloads

use super::types::{OrderKind, OrderLine};
use serde::{Deserialize, Serialize};

/// Addition reference inside a submitted line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdditionRef {
    pub addition_id: String,
    pub quantity: i32,
}

/// One line of a create/adjust request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineRequest {
    pub product_id: String,
    pub quantity: i32,
    pub unit_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additions: Vec<AdditionRef>,
}

impl From<&OrderLine> for LineRequest {
    fn from(line: &OrderLine) -> Self {
        Self {
            product_id: line.product_id.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            note: line.note.clone(),
            additions: line
                .additions
                .iter()
                .map(|a| AdditionRef {
                    addition_id: a.addition_id.clone(),
                    quantity: a.quantity,
                })
                .collect(),
        }
    }
}

/// Create-order request
///
/// `client_id` / `table_id` serialize as explicit nulls; the backend
/// distinguishes "walk-in" (null client) from a missing field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Command unique ID (for idempotent retry on the backend)
    pub command_id: String,
    pub operator_id: String,
    /// Operator name (snapshot for audit)
    pub operator_name: String,
    pub client_id: Option<String>,
    pub table_id: Option<String>,
    pub order_kind: OrderKind,
    pub note: String,
    pub lines: Vec<LineRequest>,
    /// Client timestamp (Unix milliseconds)
    pub timestamp: i64,
}

/// Quantity/discount adjustment to an existing persisted line
///
/// The backend only accepts quantity and discount-amount changes to
/// existing lines; addition and price changes require remove + re-add.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModifiedLine {
    pub line_id: String,
    pub quantity: i32,
    pub discount_amount: f64,
}

/// The three change-sets produced by edit-mode reconciliation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderAdjustment {
    pub added: Vec<LineRequest>,
    pub modified: Vec<ModifiedLine>,
    pub removed: Vec<String>,
}

impl OrderAdjustment {
    /// True when the adjustment carries no changes at all
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }
}

/// Adjust-order request: reconciliation change-sets plus command metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustOrderRequest {
    pub command_id: String,
    pub operator_id: String,
    pub operator_name: String,
    pub order_id: String,
    #[serde(flatten)]
    pub adjustment: OrderAdjustment,
    /// Client timestamp (Unix milliseconds)
    pub timestamp: i64,
}
