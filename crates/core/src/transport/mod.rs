//! Transport port, envelope decoder and request executor

pub mod decoder;
pub mod executor;
pub mod ports;

pub use decoder::decode;
pub use executor::ApiExecutor;
pub use ports::{ApiRequest, HttpMethod, RawResponse, RequestBody, Transport};
