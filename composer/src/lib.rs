//! Order composer engine
//!
//! In-memory order building and pricing for the back-office order flows:
//! line items with additions and discounts, order-level aggregation,
//! create-mode composition and edit-mode reconciliation against a
//! server-fetched snapshot.
//!
//! The composer consumes and produces the plain data structures defined
//! in the `shared` crate; submission goes through the [`OrderGateway`]
//! trait so the HTTP layer stays out of this crate.

pub mod catalog;
pub mod composer;
pub mod config;
pub mod edit;
pub mod gateway;
pub mod identity;
pub mod money;
pub mod pricing;
pub mod utils;
pub mod validation;

// Re-exports
pub use composer::{OrderComposer, OrderTarget};
pub use config::{ComposerConfig, Limits, Preferences};
pub use edit::EditSession;
pub use gateway::OrderGateway;
pub use pricing::OrderTotals;
