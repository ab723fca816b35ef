//! Data providers that retrieve bibliographic records from remote catalogs.
//!
//! This module defines the [`DataProvider`] trait implemented by every
//! catalog backend. A provider turns a [`SearchRequest`] into a
//! [`SearchResponse`] of OPDS2 publications; everything about the remote
//! wire format stays behind the trait.
//!
//! [`OpenLibraryProvider`] is the real implementation; [`MockProvider`]
//! returns canned responses for tests that must not touch the network.

mod mock;
mod openlibrary;

pub use mock::{make_publication, MockProvider};
pub use openlibrary::OpenLibraryProvider;

use async_trait::async_trait;

use crate::models::{SearchRequest, SearchResponse};

/// Interface for bibliographic data providers.
///
/// `search` is the sole operation: one request, one parse, one mapping pass.
/// Callers hand the returned publications directly to an OPDS2 catalog
/// serializer.
#[async_trait]
pub trait DataProvider: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this provider (e.g. "openlibrary")
    fn id(&self) -> &str;

    /// Human-readable name of this provider
    fn name(&self) -> &str;

    /// Search the remote catalog for records matching the query.
    ///
    /// Returns the mapped publications in the remote relevance order. An
    /// empty response is a successful "no matches" outcome, distinct from
    /// every [`ProviderError`].
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ProviderError>;
}

/// Errors surfaced by a provider.
///
/// All variants are raised to the immediate caller; providers perform no
/// internal retry or fallback. Per-record mapping failures are not errors:
/// those records are dropped and counted in
/// [`SearchResponse::skipped`](crate::models::SearchResponse).
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The query is empty after whitespace normalization; no request was
    /// issued
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Transport-level failure reaching the remote API (timeout, DNS,
    /// connection refused)
    #[error("network error: {0}")]
    Network(String),

    /// The remote API answered with a non-success status
    #[error("remote API returned status {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, kept for diagnostics
        body: String,
    },

    /// The response envelope is not the expected JSON shape; no records can
    /// be trusted
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Parse(format!("JSON: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProviderError::Api {
            status: 500,
            body: "upstream down".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "remote API returned status 500: upstream down"
        );

        let err = ProviderError::InvalidQuery("query must not be empty".to_string());
        assert!(err.to_string().starts_with("invalid query"));
    }

    #[test]
    fn test_json_error_maps_to_parse() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: ProviderError = json_err.into();
        assert!(matches!(err, ProviderError::Parse(_)));
    }
}
