//! Order-detail read model
//!
//! Shape of the backend's fetch-detail response. The edit-mode
//! composer derives its original snapshot from this.

use super::types::{DiscountKind, OrderKind};
use serde::{Deserialize, Serialize};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Active,
    Completed,
    Voided,
}

/// Addition as persisted on a server-side line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdditionDetail {
    pub addition_id: String,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i32,
}

/// One persisted line of an order, as returned by fetch-detail
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineDetail {
    /// Server-assigned line identifier
    pub line_id: String,
    pub product_id: String,
    pub name: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub discount_amount: f64,
    pub discount_kind: DiscountKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additions: Vec<AdditionDetail>,
}

/// Full order read model (header + lines)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    /// Table label; `None` together with `order_kind == Takeaway`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    pub order_kind: OrderKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    pub status: OrderStatus,
    #[serde(default)]
    pub note: String,
    pub discount_amount: f64,
    pub discount_kind: DiscountKind,
    pub lines: Vec<LineDetail>,
}
