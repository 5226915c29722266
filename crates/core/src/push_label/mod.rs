//! Push targeting labels and their members

pub mod service;

pub use service::PushLabelService;
