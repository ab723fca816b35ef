//! Mock provider for testing purposes.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::models::{Publication, SearchRequest, SearchResponse};
use crate::provider::{DataProvider, ProviderError};

/// A mock provider for testing that returns predefined responses.
#[derive(Debug, Default)]
pub struct MockProvider {
    search_response: Mutex<Option<SearchResponse>>,
}

impl MockProvider {
    /// Create a new mock provider.
    pub fn new() -> Self {
        Self {
            search_response: Mutex::new(None),
        }
    }

    /// Set the search response to return.
    pub fn set_search_response(&self, response: SearchResponse) {
        let mut guard = self.search_response.lock().unwrap();
        *guard = Some(response);
    }

    /// Clear the configured response.
    pub fn clear_response(&self) {
        let mut guard = self.search_response.lock().unwrap();
        *guard = None;
    }
}

#[async_trait]
impl DataProvider for MockProvider {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Provider"
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ProviderError> {
        let guard = self.search_response.lock().unwrap();
        match &*guard {
            Some(response) => Ok(response.clone()),
            None => Ok(SearchResponse::new(Vec::new(), "Mock Provider", &request.query)),
        }
    }
}

/// Helper function to create a minimal publication for testing.
pub fn make_publication(title: &str) -> Publication {
    Publication::new(title)
}
