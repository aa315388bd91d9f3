//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Dining table directory entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTable {
    pub id: String,
    pub name: String,
    /// Zone/area reference (String ID)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    pub is_active: bool,
}
