//! Push notification dispatch
//!
//! Single-target (sync and async), batch, label-based and full broadcast.

pub mod service;

pub use service::PushService;
