//! Conversions from external infrastructure errors into domain errors

pub mod conversions;

pub use conversions::InfraError;
