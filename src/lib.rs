//! MyFinance metapackage
//!
//! Re-exports the workspace crates so end-to-end tests can drive the whole
//! stack from one place.

pub use account_service;
pub use api_gateway;
pub use common;
