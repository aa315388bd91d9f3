//! Order composition types
//!
//! Line items, additions, discount kinds, request payloads and the
//! order-detail read model shared between the composer and the backend.

pub mod detail;
pub mod request;
pub mod types;

// Re-exports
pub use detail::*;
pub use request::*;
pub use types::*;
