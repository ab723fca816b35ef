//! # opds2-openlibrary
//!
//! An Open Library data provider for OPDS2 catalog generation.
//!
//! Given a free-text bibliographic query, this crate searches the Open
//! Library web API and converts the matching records into OPDS2 publication
//! entities (metadata, typed links, cover images) ready to hand to a catalog
//! serialization library.
//!
//! ## Architecture
//!
//! The library is organized into a few modules:
//!
//! - [`models`]: OPDS2 publication entities and search request/response types
//! - [`provider`]: the [`DataProvider`] trait, the Open Library
//!   implementation, and a mock provider for tests
//! - [`utils`]: shared HTTP client
//!
//! ## Example
//!
//! ```rust,no_run
//! use opds2_openlibrary::models::SearchRequest;
//! use opds2_openlibrary::provider::{DataProvider, OpenLibraryProvider};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = OpenLibraryProvider::new();
//! let response = provider.search(&SearchRequest::new("roald dahl").limit(10)).await?;
//!
//! for publication in &response.publications {
//!     println!("{}", publication.metadata.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod models;
pub mod provider;
pub mod utils;

// Re-export commonly used types
pub use models::{Publication, SearchRequest, SearchResponse};
pub use provider::{DataProvider, OpenLibraryProvider, ProviderError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
