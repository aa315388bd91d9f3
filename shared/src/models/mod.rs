//! Data models
//!
//! Catalog and directory entities supplied by the backend. The composer
//! never owns or caches these; they arrive as read-only API responses.

pub mod client;
pub mod dining_table;
pub mod product;

// Re-exports
pub use client::*;
pub use dining_table::*;
pub use product::*;
