//! Content-addressed line identity
//!
//! Two lines are merge candidates when they refer to the same product
//! with the same additions set, regardless of the order the additions
//! were attached in. The identity is a hash over the product reference
//! and the additions sorted by id, so property/insertion order cannot
//! affect the result.

use sha2::{Digest, Sha256};
use shared::order::Addition;

/// Generate an order-independent identity for a line's merge key
///
/// Covers product_id plus each addition's (id, quantity), sorted by
/// addition id. Unit prices and discounts are deliberately excluded:
/// merging is keyed on what the line *is*, not what it costs.
pub fn line_identity(product_id: &str, additions: &[Addition]) -> String {
    let mut hasher = Sha256::new();

    hasher.update(product_id.as_bytes());
    hasher.update([0u8]);

    let mut sorted: Vec<&Addition> = additions.iter().collect();
    sorted.sort_by(|a, b| {
        a.addition_id
            .cmp(&b.addition_id)
            .then(a.quantity.cmp(&b.quantity))
    });

    for addition in sorted {
        hasher.update(addition.addition_id.as_bytes());
        hasher.update([0u8]);
        hasher.update(addition.quantity.to_be_bytes());
    }

    let result = hasher.finalize();
    hex::encode(&result[..16]) // First 16 bytes for a shorter ID
}
