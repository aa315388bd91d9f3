//! Edit-mode session and reconciliation
//!
//! An [`EditSession`] starts from an order's fetch-detail response and
//! tracks mutations against that immutable snapshot. Reconciliation into
//! added/modified/removed change-sets happens once, at submission time,
//! in [`EditSession::build_adjustment`] - never incrementally, so partial
//! updates cannot drift out of sync.
//!
//! Invariants, held by construction:
//! - every `line_id` among the live lines existed in the original snapshot
//!   (`update_line` preserves the stored id, `add_line` never assigns one);
//! - an id in the removed set never appears among the live lines
//!   (ids enter the set only when `remove_line` drops the carrying line).

use crate::config::ComposerConfig;
use crate::gateway::OrderGateway;
use crate::identity::line_identity;
use crate::money::{money_eq, to_f64};
use crate::pricing::{self, OrderTotals};
use crate::utils::now_millis;
use crate::validation;
use shared::error::{ComposerError, ValidationError};
use shared::order::{
    AdjustOrderRequest, DiscountKind, LineDetail, LineInput, LineRequest, ModifiedLine, Operator,
    OrderAdjustment, OrderDetail, OrderLine,
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// The original snapshot values the backend accepts adjustments against
#[derive(Debug, Clone, Copy, PartialEq)]
struct LineBaseline {
    quantity: i32,
    discount_amount: f64,
}

/// An order being edited against its persisted state
pub struct EditSession {
    config: ComposerConfig,
    operator: Operator,
    order_id: String,
    /// Immutable baseline, keyed by server line id
    original: BTreeMap<String, LineBaseline>,
    /// Live lines: carried-over persisted lines (with `line_id`) plus
    /// lines added this session (without), in display order
    lines: Vec<OrderLine>,
    /// Server line ids removed this session
    removed: BTreeSet<String>,
    discount_kind: DiscountKind,
    discount_amount: f64,
    opened_at: i64,
    updated_at: i64,
}

fn detail_to_line(detail: &LineDetail) -> OrderLine {
    let mut line = OrderLine {
        product_id: detail.product_id.clone(),
        name: detail.name.clone(),
        quantity: detail.quantity,
        unit_price: detail.unit_price,
        additions: detail
            .additions
            .iter()
            .map(|a| shared::order::Addition {
                addition_id: a.addition_id.clone(),
                name: a.name.clone(),
                unit_price: a.unit_price,
                quantity: a.quantity,
            })
            .collect(),
        note: detail.note.clone(),
        total: 0.0,
        discount_amount: detail.discount_amount,
        discount_kind: detail.discount_kind,
        line_id: Some(detail.line_id.clone()),
    };
    line.total = to_f64(pricing::line_total(&line));
    line
}

impl EditSession {
    /// Derive an edit session from a fetch-detail response
    pub fn from_detail(detail: &OrderDetail, operator: Operator, config: ComposerConfig) -> Self {
        let original = detail
            .lines
            .iter()
            .map(|l| {
                (
                    l.line_id.clone(),
                    LineBaseline {
                        quantity: l.quantity,
                        discount_amount: l.discount_amount,
                    },
                )
            })
            .collect();
        let lines = detail.lines.iter().map(detail_to_line).collect();
        let now = now_millis();

        Self {
            config,
            operator,
            order_id: detail.order_id.clone(),
            original,
            lines,
            removed: BTreeSet::new(),
            discount_kind: detail.discount_kind,
            discount_amount: detail.discount_amount,
            opened_at: now,
            updated_at: now,
        }
    }

    // ========== Line mutations ==========

    /// Add a product during the editing session
    ///
    /// Merge semantics match create mode: an existing line (persisted or
    /// new) with the same product and additions set absorbs the quantity.
    /// A merge into a persisted line will surface as a quantity
    /// modification at reconciliation time; a non-merged add becomes part
    /// of the `added` change-set.
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
                line_id = ?line.line_id,
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
    /// The stored `line_id` is preserved regardless of what the supplied
    /// line carries - a persisted line stays persisted, a new line stays
    /// new. The total is recomputed.
    ///
    /// # Panics
    /// Panics when `index` is out of range.
    pub fn update_line(&mut self, index: usize, mut line: OrderLine) -> Result<(), ValidationError> {
        assert!(
            index < self.lines.len(),
            "update_line index {index} out of range ({} lines)",
            self.lines.len()
        );
        validation::validate_line(&line, &self.config.limits)?;
        line.line_id = self.lines[index].line_id.clone();
        line.total = to_f64(pricing::line_total(&line));
        self.lines[index] = line;
        self.touch();
        Ok(())
    }

    /// Delete the line at `index`
    ///
    /// A persisted line is recorded as a deletion against the server, not
    /// merely dropped from memory.
    ///
    /// # Panics
    /// Panics when `index` is out of range.
    pub fn remove_line(&mut self, index: usize) -> OrderLine {
        let line = self.lines.remove(index);
        if let Some(line_id) = &line.line_id {
            self.removed.insert(line_id.clone());
            debug!(%line_id, product_id = %line.product_id, "recorded server-side line removal");
        } else {
            debug!(product_id = %line.product_id, index, "dropped unsubmitted line");
        }
        self.touch();
        line
    }

    // ========== Accessors ==========

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn removed_line_ids(&self) -> impl Iterator<Item = &str> {
        self.removed.iter().map(String::as_str)
    }

    pub fn opened_at(&self) -> i64 {
        self.opened_at
    }

    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    /// Current order totals (carried-over and new lines together)
    pub fn totals(&self) -> OrderTotals {
        pricing::compute_totals(&self.lines, self.discount_kind, self.discount_amount)
    }

    // ========== Reconciliation ==========

    /// Diff the live lines against the original snapshot
    ///
    /// - `added`: lines without a `line_id`, in display order.
    /// - `modified`: persisted lines whose quantity or discount amount
    ///   differs from the baseline. Addition and unit-price changes are
    ///   deliberately not part of this predicate: the backend only
    ///   accepts quantity/discount adjustments to existing lines, so such
    ///   edits must go through remove + re-add.
    /// - `removed`: the recorded server line ids, in sorted order.
    ///
    /// Pure function of the session state: calling it twice without
    /// intervening mutation yields identical output.
    pub fn build_adjustment(&self) -> OrderAdjustment {
        let mut added = Vec::new();
        let mut modified = Vec::new();

        for line in &self.lines {
            match &line.line_id {
                None => added.push(LineRequest::from(line)),
                Some(line_id) => {
                    // Baseline is always present: ids only enter lines
                    // through from_detail
                    let Some(baseline) = self.original.get(line_id) else {
                        continue;
                    };
                    if line.quantity != baseline.quantity
                        || !money_eq(line.discount_amount, baseline.discount_amount)
                    {
                        modified.push(ModifiedLine {
                            line_id: line_id.clone(),
                            quantity: line.quantity,
                            discount_amount: line.discount_amount,
                        });
                    }
                }
            }
        }

        let adjustment = OrderAdjustment {
            added,
            modified,
            removed: self.removed.iter().cloned().collect(),
        };
        info!(
            order_id = %self.order_id,
            added = adjustment.added.len(),
            modified = adjustment.modified.len(),
            removed = adjustment.removed.len(),
            "reconciled edit session"
        );
        adjustment
    }

    /// Wrap the reconciliation result with command metadata
    pub fn build_adjust_request(&self) -> AdjustOrderRequest {
        AdjustOrderRequest {
            command_id: uuid::Uuid::new_v4().to_string(),
            operator_id: self.operator.id.clone(),
            operator_name: self.operator.name.clone(),
            order_id: self.order_id.clone(),
            adjustment: self.build_adjustment(),
            timestamp: now_millis(),
        }
    }

    /// Submit the adjustment through the gateway
    ///
    /// Failures leave the session state untouched; the operator's work is
    /// preserved for a retry.
    pub async fn submit(&self, gateway: &dyn OrderGateway) -> Result<(), ComposerError> {
        let request = self.build_adjust_request();
        info!(
            command_id = %request.command_id,
            order_id = %request.order_id,
            "submitting adjust-order request"
        );
        match gateway.adjust_order(&request).await {
            Ok(()) => {
                info!(order_id = %request.order_id, "order adjusted");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "adjust-order submission failed");
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
    use shared::order::{AdditionDetail, OrderKind, OrderStatus};

    fn operator() -> Operator {
        Operator {
            id: "op-1".into(),
            name: "Ana".into(),
        }
    }

    fn line_detail(line_id: &str, product_id: &str, quantity: i32, unit_price: f64) -> LineDetail {
        LineDetail {
            line_id: line_id.into(),
            product_id: product_id.into(),
            name: format!("Product {product_id}"),
            quantity,
            unit_price,
            discount_amount: 0.0,
            discount_kind: DiscountKind::None,
            note: None,
            additions: vec![],
        }
    }

    fn detail() -> OrderDetail {
        OrderDetail {
            order_id: "order-1".into(),
            client_name: Some("Walk-in".into()),
            table_name: Some("T5".into()),
            order_kind: OrderKind::DineIn,
            payment_method: None,
            status: OrderStatus::Active,
            note: String::new(),
            discount_amount: 0.0,
            discount_kind: DiscountKind::None,
            lines: vec![
                line_detail("l1", "p1", 2, 10.0),
                line_detail("l2", "p2", 1, 5.0),
            ],
        }
    }

    fn session() -> EditSession {
        EditSession::from_detail(&detail(), operator(), ComposerConfig::default())
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
    fn test_from_detail_recomputes_totals() {
        let session = session();
        assert_eq!(session.lines().len(), 2);
        assert_eq!(session.lines()[0].total, 20.0);
        assert_eq!(session.lines()[0].line_id.as_deref(), Some("l1"));
        assert_eq!(session.totals().subtotal, 25.0);
    }

    #[test]
    fn test_untouched_session_yields_empty_adjustment() {
        let adjustment = session().build_adjustment();
        assert!(adjustment.is_empty());
    }

    #[test]
    fn test_added_lines_have_no_line_id() {
        let mut session = session();
        session.add_line(input("p3", 7.5, 2)).unwrap();

        let adjustment = session.build_adjustment();
        assert_eq!(adjustment.added.len(), 1);
        assert_eq!(adjustment.added[0].product_id, "p3");
        assert_eq!(adjustment.added[0].quantity, 2);
        assert!(adjustment.modified.is_empty());
        assert!(adjustment.removed.is_empty());
    }

    #[test]
    fn test_quantity_change_appears_in_modified() {
        let mut session = session();
        let mut line = session.lines()[0].clone();
        line.quantity = 5;
        session.update_line(0, line).unwrap();

        let adjustment = session.build_adjustment();
        assert_eq!(
            adjustment.modified,
            vec![ModifiedLine {
                line_id: "l1".into(),
                quantity: 5,
                discount_amount: 0.0,
            }]
        );
    }

    #[test]
    fn test_noop_edit_not_in_modified() {
        let mut session = session();
        // Replace quantity 2 with quantity 2
        let line = session.lines()[0].clone();
        session.update_line(0, line).unwrap();
        assert!(session.build_adjustment().modified.is_empty());
    }

    #[test]
    fn test_addition_and_price_changes_ignored_by_modified_predicate() {
        let mut session = session();
        let mut line = session.lines()[0].clone();
        line.unit_price = 99.0;
        line.additions = vec![shared::order::Addition::new("a1", "Extra", 2.0)];
        session.update_line(0, line).unwrap();
        // Known backend contract gap: only quantity/discount changes are
        // accepted on existing lines
        assert!(session.build_adjustment().modified.is_empty());
    }

    #[test]
    fn test_removed_persisted_line_is_recorded() {
        let mut session = session();
        session.remove_line(0);

        let adjustment = session.build_adjustment();
        assert_eq!(adjustment.removed, vec!["l1".to_string()]);
        assert!(adjustment.modified.is_empty());
        // The removed id no longer appears among the live lines
        assert!(session
            .lines()
            .iter()
            .all(|l| l.line_id.as_deref() != Some("l1")));
    }

    #[test]
    fn test_removed_new_line_leaves_no_trace() {
        let mut session = session();
        let index = session.add_line(input("p3", 7.5, 1)).unwrap();
        session.remove_line(index);
        assert!(session.build_adjustment().is_empty());
    }

    #[test]
    fn test_no_id_in_both_modified_and_removed() {
        let mut session = session();
        let mut line = session.lines()[0].clone();
        line.quantity = 9;
        session.update_line(0, line).unwrap();
        session.remove_line(1);

        let adjustment = session.build_adjustment();
        for modified in &adjustment.modified {
            assert!(!adjustment.removed.contains(&modified.line_id));
        }
        assert_eq!(adjustment.removed, vec!["l2".to_string()]);
    }

    #[test]
    fn test_build_adjustment_is_idempotent() {
        let mut session = session();
        session.add_line(input("p3", 7.5, 1)).unwrap();
        let mut line = session.lines()[0].clone();
        line.quantity = 4;
        session.update_line(0, line).unwrap();
        session.remove_line(1);

        assert_eq!(session.build_adjustment(), session.build_adjustment());
    }

    #[test]
    fn test_merge_into_persisted_line_becomes_modification() {
        let mut session = session();
        let index = session.add_line(input("p1", 10.0, 3)).unwrap();
        assert_eq!(index, 0);

        let adjustment = session.build_adjustment();
        assert!(adjustment.added.is_empty());
        assert_eq!(adjustment.modified.len(), 1);
        assert_eq!(adjustment.modified[0].quantity, 5);
    }

    #[test]
    fn test_discount_change_appears_in_modified() {
        let mut session = session();
        let mut line = session.lines()[1].clone();
        line.discount_kind = DiscountKind::Fixed;
        line.discount_amount = 1.5;
        session.update_line(1, line).unwrap();

        let adjustment = session.build_adjustment();
        assert_eq!(adjustment.modified.len(), 1);
        assert_eq!(adjustment.modified[0].line_id, "l2");
        assert_eq!(adjustment.modified[0].discount_amount, 1.5);
    }

    #[test]
    fn test_update_preserves_line_id() {
        let mut session = session();
        let mut line = session.lines()[0].clone();
        line.line_id = None; // caller cannot detach a persisted line
        line.quantity = 3;
        session.update_line(0, line).unwrap();
        assert_eq!(session.lines()[0].line_id.as_deref(), Some("l1"));
    }

    #[test]
    fn test_detail_with_additions_round_trips_into_lines() {
        let mut detail = detail();
        detail.lines[0].additions = vec![AdditionDetail {
            addition_id: "a1".into(),
            name: "Extra".into(),
            unit_price: 2.0,
            quantity: 1,
        }];
        let session = EditSession::from_detail(&detail, operator(), ComposerConfig::default());
        // (10 + 2) × 2
        assert_eq!(session.lines()[0].total, 24.0);
    }
}
