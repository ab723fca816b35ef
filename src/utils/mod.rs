//! Utility modules supporting provider operations.
//!
//! - [`HttpClient`]: shared HTTP client with a crate user agent and timeouts

mod http;

pub use http::HttpClient;
