//! Catalog projections
//!
//! Pure, side-effect-free lookups over externally supplied catalog data.
//! The composer does not own or cache the catalog; callers pass the
//! current product list on every call.

use shared::models::Product;
use shared::order::Addition;

/// True iff the catalog entry for `product_id` defines at least one
/// addition template
pub fn product_has_additions(product_id: &str, catalog: &[Product]) -> bool {
    catalog
        .iter()
        .any(|p| p.id == product_id && !p.additions.is_empty())
}

/// Addition templates defined on the catalog entry, mapped to the
/// [`Addition`] shape with quantity defaulted to 1
///
/// Callers may override the quantity before attaching an addition to a
/// line. Unknown products yield an empty list.
pub fn product_additions(product_id: &str, catalog: &[Product]) -> Vec<Addition> {
    catalog
        .iter()
        .find(|p| p.id == product_id)
        .map(|p| {
            p.additions
                .iter()
                .map(|t| Addition::new(t.id.clone(), t.name.clone(), t.price))
                .collect()
        })
        .unwrap_or_default()
}
