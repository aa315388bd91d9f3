//! Core order line types

use serde::{Deserialize, Serialize};

/// Maximum allowed quantity for a single addition
pub const MAX_ADDITION_QUANTITY: i32 = 99;

/// Discount kind, applicable to a single line or to the whole order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountKind {
    #[default]
    None,
    Percentage,
    Fixed,
}

/// Order service kind
///
/// Wire form is snake_case ("dine_in" / "takeaway") per the backend contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderKind {
    #[default]
    DineIn,
    Takeaway,
}

/// Operator identity attached to submission requests
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    pub id: String,
    pub name: String,
}

/// A paid extra attached to a line item (e.g. "extra cheese")
///
/// Owned by its line; additions have no independent lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Addition {
    pub addition_id: String,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i32,
}

impl Addition {
    /// Build an addition with the default quantity of 1
    pub fn new(addition_id: impl Into<String>, name: impl Into<String>, unit_price: f64) -> Self {
        Self {
            addition_id: addition_id.into(),
            name: name.into(),
            unit_price,
            quantity: 1,
        }
    }
}

/// One product entry in an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Catalog product reference (not owned)
    pub product_id: String,
    /// Display name, copied from the catalog at add-time
    pub name: String,
    pub quantity: i32,
    /// Per-unit price; copied from the catalog, or operator-entered when
    /// the catalog price is 0
    pub unit_price: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additions: Vec<Addition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Line total after additions and line discount (computed)
    pub total: f64,
    pub discount_amount: f64,
    pub discount_kind: DiscountKind,
    /// Server-assigned line identifier; present only when the line
    /// originates from a previously persisted order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_id: Option<String>,
}

/// Line input - what the operator selected, before it becomes an [`OrderLine`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineInput {
    pub product_id: String,
    pub name: String,
    /// Catalog unit price (0 means "operator must enter a custom price")
    pub unit_price: f64,
    /// Operator-entered price; replaces `unit_price` when the catalog
    /// price is 0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_price: Option<f64>,
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additions: Vec<Addition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
