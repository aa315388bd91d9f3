//! Product Model

use serde::{Deserialize, Serialize};

/// Catalog product entry
///
/// A `price` of 0 means the product has no fixed catalog price; the
/// operator enters a custom price when adding it to an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub is_active: bool,
    /// Category reference (String ID)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// Category name snapshot (for display/statistics)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    /// Addition templates attachable to this product
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additions: Vec<AdditionTemplate>,
}

/// Addition template defined on a catalog product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdditionTemplate {
    pub id: String,
    pub name: String,
    pub price: f64,
}
