//! Search request and response models.

use serde::{Deserialize, Serialize};

use crate::models::Publication;

/// Search request parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text bibliographic query
    pub query: String,

    /// Maximum number of records to request
    pub limit: usize,

    /// Offset into the remote result set
    pub offset: usize,

    /// Remote sort key (e.g. "rating", "new"); relevance order when unset
    pub sort: Option<String>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            limit: 50,
            offset: 0,
            sort: None,
        }
    }
}

impl SearchRequest {
    /// Create a new search request
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Set the maximum number of records
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set the offset into the remote result set
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Set the remote sort key
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

/// Search response containing mapped publications and envelope metadata.
///
/// Publications appear in the order the remote catalog ranked them; the
/// sequence is never re-sorted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Publications mapped from the remote records
    pub publications: Vec<Publication>,

    /// Total number of matches reported by the remote catalog (may be more
    /// than returned)
    pub total: Option<usize>,

    /// Number of records dropped because they could not be mapped
    pub skipped: usize,

    /// Display name of the provider that produced the results
    pub source: String,

    /// Normalized query that was executed
    pub query: String,
}

impl SearchResponse {
    /// Create a new search response
    pub fn new(
        publications: Vec<Publication>,
        source: impl Into<String>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            publications,
            total: None,
            skipped: 0,
            source: source.into(),
            query: query.into(),
        }
    }

    /// Set the total match count
    pub fn total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }

    /// Set the skipped-record count
    pub fn skipped(mut self, skipped: usize) -> Self {
        self.skipped = skipped;
        self
    }

    /// Number of publications returned
    pub fn len(&self) -> usize {
        self.publications.len()
    }

    /// Whether the response contains no publications
    pub fn is_empty(&self) -> bool {
        self.publications.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_builder() {
        let request = SearchRequest::new("roald dahl")
            .limit(10)
            .offset(20)
            .sort("rating");

        assert_eq!(request.query, "roald dahl");
        assert_eq!(request.limit, 10);
        assert_eq!(request.offset, 20);
        assert_eq!(request.sort, Some("rating".to_string()));
    }

    #[test]
    fn test_search_request_defaults() {
        let request = SearchRequest::new("test");

        assert_eq!(request.limit, 50);
        assert_eq!(request.offset, 0);
        assert!(request.sort.is_none());
    }

    #[test]
    fn test_search_response() {
        let response = SearchResponse::new(Vec::new(), "Open Library", "test")
            .total(100)
            .skipped(2);

        assert!(response.is_empty());
        assert_eq!(response.len(), 0);
        assert_eq!(response.total, Some(100));
        assert_eq!(response.skipped, 2);
        assert_eq!(response.source, "Open Library");
    }
}
