//! reqwest-backed transport adapter

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
