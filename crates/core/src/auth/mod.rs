//! Application and user tokens

pub mod dynamic_token;
pub mod service;
pub mod token_cache;

pub use dynamic_token::{Clock, DynamicTokenParams, SystemClock};
pub use service::AuthService;
pub use token_cache::AppTokenCache;
