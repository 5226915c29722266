//! # Easemob Core
//!
//! Request shaping and response decoding for the Easemob REST API - no HTTP
//! stack.
//!
//! This crate contains:
//! - The [`Transport`] port and the envelope decoder
//! - Application token cache and stateless user tokens
//! - User, metadata, push label and push services
//! - The [`EasemobClient`] facade
//!
//! ## Architecture Principles
//! - Only depends on `easemob-domain`
//! - Network I/O goes through the `Transport` trait
//! - Invalid input fails before any request is sent

pub mod auth;
pub mod client;
pub mod metadata;
pub mod push;
pub mod push_label;
pub mod transport;
pub mod user;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use auth::{AppTokenCache, AuthService, Clock, SystemClock};
pub use client::EasemobClient;
pub use metadata::MetadataService;
pub use push::PushService;
pub use push_label::PushLabelService;
pub use transport::{ApiRequest, HttpMethod, RawResponse, RequestBody, Transport};
pub use user::UserService;
