//! API handlers
//!
//! This module contains the API endpoint handlers organized by resource.
//! Each handler follows a consistent pattern:
//! - Extract state and parameters using Axum extractors
//! - Validate input parameters
//! - Call the account service
//! - Map the result to a standardized response format

pub mod account;
pub mod health;
pub mod response;

// Re-export the response module for easy access
pub use response::{ApiListResponse, ApiResponse};
