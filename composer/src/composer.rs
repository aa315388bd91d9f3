//! Create-mode order composer
//!
//! Holds an order under construction: line items, order-level discount,
//! client/table selection and the order note. All mutations run
//! synchronously on the caller's thread; the only async operation is
//! [`OrderComposer::submit`].

use crate::config::ComposerConfig;
use crate::gateway::OrderGateway;
use crate::identity::line_identity;
use crate::money::to_f64;
use crate::pricing::{self, OrderTotals};
use crate::utils::now_millis;
use crate::validation;
use shared::error::{ComposerError, ValidationError};
use shared::order::{
    CreateOrderRequest, DiscountKind, LineInput, LineRequest, Operator, OrderKind, OrderLine,
};
use tracing::{debug, info, warn};

/// Where the order will be served
///
/// A table reference and the take-away sentinel are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OrderTarget {
    #[default]
    DineIn,
    Table(String),
    Takeaway,
}

impl OrderTarget {
    fn order_kind(&self) -> OrderKind {
        match self {
            OrderTarget::Takeaway => OrderKind::Takeaway,
            _ => OrderKind::DineIn,
        }
    }

    fn table_id(&self) -> Option<String> {
        match self {
            OrderTarget::Table(id) => Some(id.clone()),
            _ => None,
        }
    }
}

/// In-memory order under construction
pub struct OrderComposer {
    config: ComposerConfig,
    operator: Operator,
    lines: Vec<OrderLine>,
    discount_kind: DiscountKind,
    discount_amount: f64,
    client_id: Option<String>,
    target: OrderTarget,
    note: String,
    created_at: i64,
    updated_at: i64,
}

impl OrderComposer {
    pub fn new(operator: Operator, config: ComposerConfig) -> Self {
        let now = now_millis();
        Self {
            config,
            operator,
            lines: Vec::new(),
            discount_kind: DiscountKind::None,
            discount_amount: 0.0,
            client_id: None,
            target: OrderTarget::default(),
            note: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    // ========== Line mutations ==========

    /// Add a product to the order
    ///
    /// When an existing line has the same product and an identical
    /// (order-insensitive) additions set, quantities are merged into that
    /// line instead of inserting a duplicate row; otherwise a new line is
    /// appended with the discount defaulted to none. Returns the index of
    /// the merged-or-appended line. Never silently drops a line.
    pub fn add_line(&mut self, input: LineInput) -> Result<usize, ValidationError> {
        let unit_price = validation::resolve_unit_price(&input, &self.config.limits)?;
        let identity = line_identity(&input.product_id, &input.additions);

        if let Some(index) = self
            .lines
            .iter()
            .position(|l| line_identity(&l.product_id, &l.additions) == identity)
        {
            let merged = self.lines[index].quantity.saturating_add(input.quantity);
            validation::validate_quantity(merged, &self.config.limits)?;

            let line = &mut self.lines[index];
            line.quantity = merged;
            line.total = to_f64(pricing::line_total(line));
            debug!(
                product_id = %line.product_id,
                index,
                quantity = line.quantity,
                "merged line into existing entry"
            );
            self.touch();
            return Ok(index);
        }

        let mut line = OrderLine {
            product_id: input.product_id,
            name: input.name,
            quantity: input.quantity,
            unit_price,
            additions: input.additions,
            note: input.note,
            total: 0.0,
            discount_amount: 0.0,
            discount_kind: DiscountKind::None,
            line_id: None,
        };
        line.total = to_f64(pricing::line_total(&line));
        debug!(product_id = %line.product_id, quantity = line.quantity, "appended new line");
        self.lines.push(line);
        self.touch();
        Ok(self.lines.len() - 1)
    }

    /// Replace the line at `index` wholesale
    ///
    /// The stored total is recomputed from the new line data so the
    /// total/field invariant cannot drift. Lines created through this
    /// composer never carry a server line id; any id on the supplied line
    /// is discarded.
    ///
    /// # Panics
    /// Panics when `index` is out of range - that is a caller bug, not a
    /// user-recoverable condition.
    pub fn update_line(&mut self, index: usize, mut line: OrderLine) -> Result<(), ValidationError> {
        assert!(
            index < self.lines.len(),
            "update_line index {index} out of range ({} lines)",
            self.lines.len()
        );
        validation::validate_line(&line, &self.config.limits)?;
        line.line_id = None;
        line.total = to_f64(pricing::line_total(&line));
        self.lines[index] = line;
        self.touch();
        Ok(())
    }

    /// Delete the line at `index`
    ///
    /// # Panics
    /// Panics when `index` is out of range.
    pub fn remove_line(&mut self, index: usize) -> OrderLine {
        let line = self.lines.remove(index);
        debug!(product_id = %line.product_id, index, "removed line");
        self.touch();
        line
    }

    // ========== Header mutations ==========

    pub fn set_client(&mut self, client_id: Option<String>) {
        self.client_id = client_id;
        self.touch();
    }

    /// Bind the order to a table (clears the take-away sentinel)
    pub fn set_table(&mut self, table_id: impl Into<String>) {
        self.target = OrderTarget::Table(table_id.into());
        self.touch();
    }

    /// Mark the order as take-away (mutually exclusive with a table)
    pub fn set_takeaway(&mut self) {
        self.target = OrderTarget::Takeaway;
        self.touch();
    }

    pub fn set_note(&mut self, note: impl Into<String>) -> Result<(), ValidationError> {
        let note = note.into();
        let len = note.chars().count();
        if len > self.config.limits.max_note_len {
            return Err(ValidationError::NoteTooLong {
                len,
                max: self.config.limits.max_note_len,
            });
        }
        self.note = note;
        self.touch();
        Ok(())
    }

    /// Set the order-level discount
    ///
    /// Non-finite or negative amounts (and percentages above 100) are
    /// rejected without changing the current discount.
    pub fn set_order_discount(
        &mut self,
        kind: DiscountKind,
        amount: f64,
    ) -> Result<(), ValidationError> {
        validation::validate_discount(kind, amount)?;
        self.discount_kind = kind;
        self.discount_amount = amount;
        self.touch();
        Ok(())
    }

    // ========== Accessors ==========

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn target(&self) -> &OrderTarget {
        &self.target
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    /// Current order totals under the order-level discount
    pub fn totals(&self) -> OrderTotals {
        pricing::compute_totals(&self.lines, self.discount_kind, self.discount_amount)
    }

    // ========== Submission ==========

    /// Validate the order and map it to the create-order payload
    ///
    /// Rejections leave the composer untouched so the operator can
    /// correct and retry.
    pub fn build_create_request(&self) -> Result<CreateOrderRequest, ValidationError> {
        if self.lines.is_empty() {
            return Err(ValidationError::EmptyOrder);
        }
        if self.target == OrderTarget::Takeaway && self.note.trim().is_empty() {
            return Err(ValidationError::TakeawayNoteRequired);
        }

        Ok(CreateOrderRequest {
            command_id: uuid::Uuid::new_v4().to_string(),
            operator_id: self.operator.id.clone(),
            operator_name: self.operator.name.clone(),
            client_id: self.client_id.clone(),
            table_id: self.target.table_id(),
            order_kind: self.target.order_kind(),
            note: self.note.clone(),
            lines: self.lines.iter().map(LineRequest::from).collect(),
            timestamp: now_millis(),
        })
    }

    /// Submit the order through the gateway
    ///
    /// Validation runs first; nothing goes out on the wire when it fails.
    /// Submission failures leave the composer state untouched and are
    /// never retried here.
    pub async fn submit(&self, gateway: &dyn OrderGateway) -> Result<String, ComposerError> {
        let request = self.build_create_request()?;
        info!(
            command_id = %request.command_id,
            lines = request.lines.len(),
            order_kind = ?request.order_kind,
            "submitting create-order request"
        );
        match gateway.create_order(&request).await {
            Ok(order_id) => {
                info!(%order_id, "order created");
                Ok(order_id)
            }
            Err(err) => {
                warn!(error = %err, "create-order submission failed");
                Err(err.into())
            }
        }
    }

    fn touch(&mut self) {
        self.updated_at = now_millis();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::Addition;

    fn test_composer() -> OrderComposer {
        OrderComposer::new(
            Operator {
                id: "op-1".into(),
                name: "Ana".into(),
            },
            ComposerConfig::default(),
        )
    }

    fn input(product_id: &str, unit_price: f64, quantity: i32) -> LineInput {
        LineInput {
            product_id: product_id.into(),
            name: format!("Product {product_id}"),
            unit_price,
            custom_price: None,
            quantity,
            additions: vec![],
            note: None,
        }
    }

    #[test]
    fn test_add_line_appends_with_defaults() {
        let mut composer = test_composer();
        let index = composer.add_line(input("p1", 10.0, 2)).unwrap();
        assert_eq!(index, 0);
        let line = &composer.lines()[0];
        assert_eq!(line.discount_kind, DiscountKind::None);
        assert_eq!(line.discount_amount, 0.0);
        assert_eq!(line.total, 20.0);
        assert!(line.line_id.is_none());
    }

    #[test]
    fn test_add_line_merges_same_product_and_additions() {
        let mut composer = test_composer();
        let mut first = input("p1", 10.0, 1);
        first.additions = vec![Addition::new("a1", "Extra", 2.0)];
        let mut second = input("p1", 10.0, 2);
        second.additions = vec![Addition::new("a1", "Extra", 2.0)];

        let i0 = composer.add_line(first).unwrap();
        let i1 = composer.add_line(second).unwrap();

        assert_eq!(i0, i1);
        assert_eq!(composer.lines().len(), 1);
        let line = &composer.lines()[0];
        assert_eq!(line.quantity, 3);
        // (10 + 2) × 3
        assert_eq!(line.total, 36.0);
    }

    #[test]
    fn test_add_line_different_additions_do_not_merge() {
        let mut composer = test_composer();
        let plain = input("p1", 10.0, 1);
        let mut extra = input("p1", 10.0, 1);
        extra.additions = vec![Addition::new("a1", "Extra", 2.0)];

        composer.add_line(plain).unwrap();
        composer.add_line(extra).unwrap();
        assert_eq!(composer.lines().len(), 2);
    }

    #[test]
    fn test_add_line_merge_addition_order_insensitive() {
        let mut composer = test_composer();
        let mut first = input("p1", 10.0, 1);
        first.additions = vec![
            Addition::new("a1", "Extra", 2.0),
            Addition::new("a2", "Bacon", 1.0),
        ];
        let mut second = input("p1", 10.0, 1);
        second.additions = vec![
            Addition::new("a2", "Bacon", 1.0),
            Addition::new("a1", "Extra", 2.0),
        ];

        composer.add_line(first).unwrap();
        composer.add_line(second).unwrap();
        assert_eq!(composer.lines().len(), 1);
        assert_eq!(composer.lines()[0].quantity, 2);
    }

    #[test]
    fn test_merge_rejects_quantity_over_limit_without_mutation() {
        let mut composer = test_composer();
        composer.add_line(input("p1", 10.0, 9000)).unwrap();
        let err = composer.add_line(input("p1", 10.0, 5000)).unwrap_err();
        assert!(matches!(err, ValidationError::QuantityTooLarge { .. }));
        assert_eq!(composer.lines()[0].quantity, 9000);
    }

    #[test]
    fn test_update_line_recomputes_total_and_strips_line_id() {
        let mut composer = test_composer();
        composer.add_line(input("p1", 10.0, 1)).unwrap();

        let mut replacement = composer.lines()[0].clone();
        replacement.quantity = 4;
        replacement.discount_kind = DiscountKind::Fixed;
        replacement.discount_amount = 10.0;
        replacement.total = 12345.0; // stale, must be recomputed
        replacement.line_id = Some("bogus".into());

        composer.update_line(0, replacement).unwrap();
        let line = &composer.lines()[0];
        assert_eq!(line.total, 30.0);
        assert!(line.line_id.is_none());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_update_line_out_of_range_panics() {
        let mut composer = test_composer();
        let line = OrderLine {
            product_id: "p1".into(),
            name: "x".into(),
            quantity: 1,
            unit_price: 1.0,
            additions: vec![],
            note: None,
            total: 1.0,
            discount_amount: 0.0,
            discount_kind: DiscountKind::None,
            line_id: None,
        };
        let _ = composer.update_line(3, line);
    }

    #[test]
    fn test_remove_line() {
        let mut composer = test_composer();
        composer.add_line(input("p1", 10.0, 1)).unwrap();
        composer.add_line(input("p2", 5.0, 1)).unwrap();
        let removed = composer.remove_line(0);
        assert_eq!(removed.product_id, "p1");
        assert_eq!(composer.lines().len(), 1);
        assert_eq!(composer.lines()[0].product_id, "p2");
    }

    #[test]
    fn test_build_request_rejects_empty_order() {
        let composer = test_composer();
        assert_eq!(
            composer.build_create_request().unwrap_err(),
            ValidationError::EmptyOrder
        );
    }

    #[test]
    fn test_build_request_takeaway_requires_note() {
        let mut composer = test_composer();
        composer.add_line(input("p1", 10.0, 1)).unwrap();
        composer.set_takeaway();
        assert_eq!(
            composer.build_create_request().unwrap_err(),
            ValidationError::TakeawayNoteRequired
        );

        // Whitespace-only notes do not count
        composer.set_note("   ").unwrap();
        assert!(composer.build_create_request().is_err());

        composer.set_note("pickup at 14:00").unwrap();
        let request = composer.build_create_request().unwrap();
        assert_eq!(request.order_kind, OrderKind::Takeaway);
        assert_eq!(request.table_id, None);
    }

    #[test]
    fn test_build_request_maps_lines_and_header() {
        let mut composer = test_composer();
        let mut line = input("p1", 10.0, 2);
        line.additions = vec![Addition::new("a1", "Extra", 2.0)];
        line.note = Some("no onions".into());
        composer.add_line(line).unwrap();
        composer.set_table("t5");
        composer.set_client(Some("c9".into()));

        let request = composer.build_create_request().unwrap();
        assert_eq!(request.operator_id, "op-1");
        assert_eq!(request.client_id.as_deref(), Some("c9"));
        assert_eq!(request.table_id.as_deref(), Some("t5"));
        assert_eq!(request.order_kind, OrderKind::DineIn);
        assert_eq!(request.lines.len(), 1);
        assert_eq!(request.lines[0].additions[0].addition_id, "a1");
        assert_eq!(request.lines[0].additions[0].quantity, 1);
        assert!(!request.command_id.is_empty());
    }

    #[test]
    fn test_set_order_discount_rejects_bad_amounts() {
        let mut composer = test_composer();
        composer
            .set_order_discount(DiscountKind::Percentage, 10.0)
            .unwrap();
        assert!(composer
            .set_order_discount(DiscountKind::Percentage, 120.0)
            .is_err());
        assert!(composer
            .set_order_discount(DiscountKind::Fixed, -3.0)
            .is_err());
        // The previous discount is untouched on rejection
        assert_eq!(composer.totals().discount, 0.0);
    }

    #[test]
    fn test_totals_reflect_order_discount() {
        let mut composer = test_composer();
        composer.add_line(input("p1", 100.0, 1)).unwrap();
        composer.add_line(input("p2", 50.0, 1)).unwrap();
        composer
            .set_order_discount(DiscountKind::Fixed, 30.0)
            .unwrap();

        let totals = composer.totals();
        assert_eq!(totals.subtotal, 150.0);
        assert_eq!(totals.total, 120.0);
        assert_eq!(totals.line_count, 2);
    }
}
