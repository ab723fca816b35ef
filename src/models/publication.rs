//! Publication model representing one discoverable work in an OPDS2 catalog.

use serde::{Deserialize, Serialize};

/// Schema.org type for book records
pub const SCHEMA_BOOK: &str = "http://schema.org/Book";

/// OPDS link relations used by this provider.
pub mod rel {
    /// Canonical page for the record
    pub const SELF: &str = "self";
    /// Alternate representation of the record
    pub const ALTERNATE: &str = "alternate";
    /// Cover image
    pub const COVER: &str = "cover";
    /// Contributor page
    pub const AUTHOR: &str = "author";
    /// Acquisition link; an access mode may be appended as a path segment
    pub const ACQUISITION: &str = "http://opds-spec.org/acquisition";
}

/// Media types used by this provider.
pub mod mime {
    /// HTML page
    pub const HTML: &str = "text/html";
    /// JSON record
    pub const JSON: &str = "application/json";
    /// JPEG image
    pub const JPEG: &str = "image/jpeg";
    /// PDF document
    pub const PDF: &str = "application/pdf";
    /// EPUB
    pub const EPUB: &str = "application/epub+zip";
    /// Audio recording
    pub const AUDIO: &str = "audio/mpeg";
}

/// A typed hyperlink attached to a publication or contributor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Target URL
    pub href: String,

    /// Link relation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,

    /// Media type of the target
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl Link {
    /// Create a link with no relation or media type
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: None,
            media_type: None,
        }
    }

    /// Set the link relation
    pub fn rel(mut self, rel: impl Into<String>) -> Self {
        self.rel = Some(rel.into());
        self
    }

    /// Set the media type
    pub fn media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }
}

/// A contributor to a publication (author, translator, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    /// Display name
    pub name: String,

    /// Links for this contributor (e.g. an author page)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl Contributor {
    /// Create a contributor with no links
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            links: Vec::new(),
        }
    }

    /// Attach a link to this contributor
    pub fn link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }
}

/// Bibliographic metadata for a publication.
///
/// Serializes to the OPDS2 metadata object; empty collections and unset
/// options are omitted from the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Schema.org type of the record
    #[serde(rename = "@type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    /// Title (always present and non-empty)
    pub title: String,

    /// Subtitle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Authors, in the order the remote catalog lists them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub author: Vec<Contributor>,

    /// Description or synopsis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// ISO 639-1 language codes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub language: Vec<String>,

    /// Subject headings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subject: Vec<String>,

    /// Year of first publication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<i32>,

    /// Page count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_pages: Option<u32>,
}

/// One discoverable work in an OPDS2 catalog.
///
/// Invariant: `metadata.title` is non-empty; records without a usable title
/// are never turned into publications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    /// Bibliographic metadata
    pub metadata: Metadata,

    /// Navigation and acquisition links
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,

    /// Cover images
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Link>,
}

impl Publication {
    /// Create a publication with the given title and no other metadata
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            metadata: Metadata {
                schema_type: Some(SCHEMA_BOOK.to_string()),
                title: title.into(),
                subtitle: None,
                author: Vec::new(),
                description: None,
                language: Vec::new(),
                subject: Vec::new(),
                published: None,
                number_of_pages: None,
            },
            links: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Author names in catalog order
    pub fn author_names(&self) -> Vec<&str> {
        self.metadata.author.iter().map(|a| a.name.as_str()).collect()
    }

    /// Whether this publication carries a cover image link
    pub fn has_cover(&self) -> bool {
        !self.images.is_empty()
    }
}

/// Builder for constructing Publication objects
#[derive(Debug, Clone)]
pub struct PublicationBuilder {
    publication: Publication,
}

impl PublicationBuilder {
    /// Create a new builder with the required title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            publication: Publication::new(title),
        }
    }

    /// Set the subtitle
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.publication.metadata.subtitle = Some(subtitle.into());
        self
    }

    /// Add an author
    pub fn author(mut self, author: Contributor) -> Self {
        self.publication.metadata.author.push(author);
        self
    }

    /// Set the full author list
    pub fn authors(mut self, authors: Vec<Contributor>) -> Self {
        self.publication.metadata.author = authors;
        self
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.publication.metadata.description = Some(description.into());
        self
    }

    /// Set the language list
    pub fn languages(mut self, languages: Vec<String>) -> Self {
        self.publication.metadata.language = languages;
        self
    }

    /// Set the subject list
    pub fn subjects(mut self, subjects: Vec<String>) -> Self {
        self.publication.metadata.subject = subjects;
        self
    }

    /// Set the year of first publication
    pub fn published(mut self, year: i32) -> Self {
        self.publication.metadata.published = Some(year);
        self
    }

    /// Set the page count
    pub fn number_of_pages(mut self, pages: u32) -> Self {
        self.publication.metadata.number_of_pages = Some(pages);
        self
    }

    /// Add a navigation or acquisition link
    pub fn link(mut self, link: Link) -> Self {
        self.publication.links.push(link);
        self
    }

    /// Add a cover image link
    pub fn image(mut self, image: Link) -> Self {
        self.publication.images.push(image);
        self
    }

    /// Build the Publication
    pub fn build(self) -> Publication {
        self.publication
    }
}
