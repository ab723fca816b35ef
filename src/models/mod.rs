//! Core data models for OPDS2 publications and search operations.

mod publication;
mod search;

pub use publication::{
    mime, rel, Contributor, Link, Metadata, Publication, PublicationBuilder, SCHEMA_BOOK,
};
pub use search::{SearchRequest, SearchResponse};
