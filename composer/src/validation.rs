//! Input validation
//!
//! All operator-supplied values are validated at the composer boundary
//! before they reach the pricing code. Failures return
//! [`ValidationError`] without mutating composer state.

use crate::config::Limits;
use shared::error::ValidationError;
use shared::order::{Addition, DiscountKind, LineInput, OrderLine, MAX_ADDITION_QUANTITY};

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
pub fn require_finite(value: f64, field: &str) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteAmount {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn validate_price(price: f64, field: &str, limits: &Limits) -> Result<(), ValidationError> {
    require_finite(price, field)?;
    if price < 0.0 {
        return Err(ValidationError::NegativePrice { price });
    }
    if price > limits.max_unit_price {
        return Err(ValidationError::PriceTooLarge {
            price,
            max: limits.max_unit_price,
        });
    }
    Ok(())
}

pub fn validate_quantity(quantity: i32, limits: &Limits) -> Result<(), ValidationError> {
    if quantity <= 0 {
        return Err(ValidationError::InvalidQuantity { quantity });
    }
    if quantity > limits.max_quantity {
        return Err(ValidationError::QuantityTooLarge {
            quantity,
            max: limits.max_quantity,
        });
    }
    Ok(())
}

fn validate_note(note: Option<&str>, limits: &Limits) -> Result<(), ValidationError> {
    if let Some(note) = note {
        let len = note.chars().count();
        if len > limits.max_note_len {
            return Err(ValidationError::NoteTooLong {
                len,
                max: limits.max_note_len,
            });
        }
    }
    Ok(())
}

fn validate_additions(additions: &[Addition], limits: &Limits) -> Result<(), ValidationError> {
    for addition in additions {
        validate_price(addition.unit_price, "addition unit_price", limits)?;
        if addition.quantity <= 0 {
            return Err(ValidationError::InvalidQuantity {
                quantity: addition.quantity,
            });
        }
        if addition.quantity > MAX_ADDITION_QUANTITY {
            return Err(ValidationError::QuantityTooLarge {
                quantity: addition.quantity,
                max: MAX_ADDITION_QUANTITY,
            });
        }
    }
    Ok(())
}

/// Validate a line/order discount pair
///
/// Amounts must be finite and non-negative; percentages must not exceed 100.
pub fn validate_discount(kind: DiscountKind, amount: f64) -> Result<(), ValidationError> {
    if kind == DiscountKind::None {
        return Ok(());
    }
    if !amount.is_finite() || amount < 0.0 {
        return Err(ValidationError::InvalidDiscount { amount });
    }
    if kind == DiscountKind::Percentage && amount > 100.0 {
        return Err(ValidationError::InvalidDiscount { amount });
    }
    Ok(())
}

/// Validate a [`LineInput`] and resolve its effective unit price
///
/// A catalog price of 0 requires an operator-entered custom price, which
/// must be positive and finite. No partial validation: the first failure
/// rejects the whole input.
pub fn resolve_unit_price(input: &LineInput, limits: &Limits) -> Result<f64, ValidationError> {
    validate_quantity(input.quantity, limits)?;
    validate_price(input.unit_price, "unit_price", limits)?;
    validate_additions(&input.additions, limits)?;
    validate_note(input.note.as_deref(), limits)?;

    if input.unit_price > 0.0 {
        return Ok(input.unit_price);
    }

    // Catalog price 0: the custom price replaces unit_price for this line
    match input.custom_price {
        None => Err(ValidationError::CustomPriceRequired {
            product_id: input.product_id.clone(),
        }),
        Some(price) if !price.is_finite() || price <= 0.0 => {
            Err(ValidationError::InvalidCustomPrice { price })
        }
        Some(price) if price > limits.max_unit_price => Err(ValidationError::PriceTooLarge {
            price,
            max: limits.max_unit_price,
        }),
        Some(price) => Ok(price),
    }
}

/// Validate a fully-formed [`OrderLine`] (used by wholesale line replacement)
pub fn validate_line(line: &OrderLine, limits: &Limits) -> Result<(), ValidationError> {
    validate_quantity(line.quantity, limits)?;
    validate_price(line.unit_price, "unit_price", limits)?;
    if line.unit_price == 0.0 {
        return Err(ValidationError::InvalidCustomPrice { price: 0.0 });
    }
    validate_additions(&line.additions, limits)?;
    validate_note(line.note.as_deref(), limits)?;
    validate_discount(line.discount_kind, line.discount_amount)?;
    Ok(())
}
