//! Custom user attributes

pub mod service;

pub use service::MetadataService;
