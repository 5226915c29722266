//! User management
//!
//! Registration, deletion, password changes, activation and presence.

pub mod service;

pub use service::UserService;
