//! # Settler Domain
//!
//! Business domain types and models for Settler.
//!
//! This crate contains:
//! - Domain data types (StoreCredentials, CompensationRow, etc.)
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other Settler crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod errors;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
