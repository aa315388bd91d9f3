//! Line and order pricing
//!
//! Pure functions over [`OrderLine`] values. Formulas:
//!
//! - line subtotal = unit_price × quantity + (Σ addition.price × addition.quantity) × quantity
//!   (each unit of the product incurs the full additions bundle)
//! - line total = subtotal after the line discount, clamped to >= 0
//! - order total = Σ line totals, minus the order-level discount, clamped to >= 0
//!
//! Negative or non-finite discount inputs are rejected at the composer
//! boundary; the computations here still clamp defensively.

use crate::money::{to_decimal, to_f64};
use rust_decimal::prelude::*;
use shared::order::{DiscountKind, OrderLine};

/// Apply a discount to a non-negative subtotal, clamping the result to >= 0
fn apply_discount(subtotal: Decimal, kind: DiscountKind, amount: f64) -> Decimal {
    // Defensive clamp: negative amounts behave as no discount
    let amount = to_decimal(amount).max(Decimal::ZERO);
    if amount.is_zero() {
        return subtotal;
    }
    match kind {
        DiscountKind::None => subtotal,
        DiscountKind::Percentage => {
            (subtotal * (Decimal::ONE_HUNDRED - amount) / Decimal::ONE_HUNDRED).max(Decimal::ZERO)
        }
        DiscountKind::Fixed => (subtotal - amount).max(Decimal::ZERO),
    }
}

/// Line subtotal before the line discount
fn line_subtotal(line: &OrderLine) -> Decimal {
    let quantity = Decimal::from(line.quantity);
    let base = to_decimal(line.unit_price) * quantity;
    let additions: Decimal = line
        .additions
        .iter()
        .map(|a| to_decimal(a.unit_price) * Decimal::from(a.quantity))
        .sum();
    base + additions * quantity
}

/// Calculate the line total with precise decimal arithmetic
///
/// Never negative, regardless of discount inputs.
pub fn line_total(line: &OrderLine) -> Decimal {
    apply_discount(line_subtotal(line), line.discount_kind, line.discount_amount)
}

/// Order-level totals computed from the current lines
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    /// Sum of line totals before the order-level discount
    pub subtotal: f64,
    /// Computed order-level discount value
    pub discount: f64,
    /// Final amount to pay
    pub total: f64,
    /// Number of lines (not sum of quantities)
    pub line_count: usize,
}

/// Compute order-level discount value for a given subtotal
fn order_discount_value(subtotal: Decimal, kind: DiscountKind, amount: f64) -> Decimal {
    let amount = to_decimal(amount).max(Decimal::ZERO);
    match kind {
        DiscountKind::None => Decimal::ZERO,
        DiscountKind::Percentage => subtotal * amount / Decimal::ONE_HUNDRED,
        DiscountKind::Fixed => amount.min(subtotal),
    }
}

/// Aggregate line totals into order totals under the order-level discount
pub fn compute_totals(lines: &[OrderLine], kind: DiscountKind, amount: f64) -> OrderTotals {
    let subtotal: Decimal = lines.iter().map(line_total).sum();
    let discount = order_discount_value(subtotal, kind, amount);
    let total = (subtotal - discount).max(Decimal::ZERO);

    OrderTotals {
        subtotal: to_f64(subtotal),
        discount: to_f64(discount),
        total: to_f64(total),
        line_count: lines.len(),
    }
}
