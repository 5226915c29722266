//! # Easemob Domain
//!
//! Data types and models for the Easemob server REST client.
//!
//! This crate contains:
//! - Client configuration
//! - Error types and the `Result` alias
//! - Request/response entities and the two envelope families
//! - Batch limits and wire constants
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
