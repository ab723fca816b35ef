//! Open Library data provider implementation.

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{
    mime, rel, Contributor, Link, Publication, PublicationBuilder, SearchRequest, SearchResponse,
};
use crate::provider::{DataProvider, ProviderError};
use crate::utils::HttpClient;

const OPENLIBRARY_BASE: &str = "https://openlibrary.org";
const COVERS_BASE: &str = "https://covers.openlibrary.org";

/// Fields requested from the search endpoint; everything the mapper consumes
/// and nothing more.
const SEARCH_FIELDS: &[&str] = &[
    "key",
    "title",
    "subtitle",
    "description",
    "author_name",
    "author_key",
    "cover_i",
    "language",
    "subject",
    "first_publish_year",
    "number_of_pages_median",
    "editions",
    "providers",
];

/// Open Library data provider
///
/// Issues one GET against the Open Library search API (`/search.json`) per
/// [`search`](DataProvider::search) call and maps each returned document
/// independently. Holds no state between calls.
#[derive(Debug, Clone)]
pub struct OpenLibraryProvider {
    client: HttpClient,
    base_url: String,
    covers_url: String,
}

impl OpenLibraryProvider {
    /// Create a provider with a default HTTP client
    pub fn new() -> Self {
        Self::with_client(HttpClient::new())
    }

    /// Create a provider with an explicit HTTP client
    pub fn with_client(client: HttpClient) -> Self {
        Self {
            client,
            base_url: OPENLIBRARY_BASE.to_string(),
            covers_url: COVERS_BASE.to_string(),
        }
    }

    /// Override the API base URL (e.g. to point at a local test server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the cover-image host
    pub fn with_covers_url(mut self, covers_url: impl Into<String>) -> Self {
        self.covers_url = covers_url.into().trim_end_matches('/').to_string();
        self
    }

    fn search_url(&self, query: &str, request: &SearchRequest) -> String {
        let page = if request.limit > 0 {
            request.offset / request.limit + 1
        } else {
            1
        };
        let mut url = format!(
            "{}/search.json?q={}&page={}&limit={}&editions=true&fields={}",
            self.base_url,
            urlencoding::encode(query),
            page,
            request.limit,
            SEARCH_FIELDS.join(","),
        );
        if let Some(sort) = &request.sort {
            url.push_str("&sort=");
            url.push_str(&urlencoding::encode(sort));
        }
        url
    }

    /// Map one raw search document into a publication.
    ///
    /// Documents that cannot produce a usable catalog entry are classified
    /// with a [`SkipReason`] instead of failing the whole page.
    fn map_doc(&self, value: &serde_json::Value) -> Result<Publication, SkipReason> {
        let doc: SearchDoc =
            serde_json::from_value(value.clone()).map_err(|_| SkipReason::Malformed)?;

        let edition = doc
            .editions
            .as_ref()
            .and_then(|e| e.docs.as_ref())
            .and_then(|docs| docs.first());

        // Edition-level fields take precedence over the work-level ones.
        let title = edition
            .and_then(|e| e.title.as_deref())
            .or(doc.title.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(SkipReason::MissingTitle)?;

        let mut builder = PublicationBuilder::new(title);

        if let Some(subtitle) = edition
            .and_then(|e| e.subtitle.as_deref())
            .or(doc.subtitle.as_deref())
        {
            builder = builder.subtitle(subtitle);
        }
        if let Some(description) = doc.description.as_deref() {
            builder = builder.description(description);
        }

        builder = builder.authors(self.map_authors(&doc));

        let subjects: Vec<String> = doc
            .subject
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(coerce_subject)
            .collect();
        builder = builder.subjects(subjects);

        let languages: Vec<String> = doc
            .language
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(|marc| marc_to_iso_639_1(marc))
            .map(str::to_string)
            .collect();
        builder = builder.languages(languages);

        if let Some(year) = doc.first_publish_year {
            builder = builder.published(year);
        }
        if let Some(pages) = doc.number_of_pages_median {
            builder = builder.number_of_pages(pages);
        }

        // Reference links back to the record's canonical page. A document
        // without a key simply gets no self/alternate links.
        let key = edition
            .and_then(|e| e.key.as_deref())
            .or(doc.key.as_deref());
        if let Some(key) = key {
            builder = builder
                .link(
                    Link::new(format!("{}{}", self.base_url, key))
                        .rel(rel::SELF)
                        .media_type(mime::HTML),
                )
                .link(
                    Link::new(format!("{}{}.json", self.base_url, key))
                        .rel(rel::ALTERNATE)
                        .media_type(mime::JSON),
                );
        }

        if let Some(providers) = edition.and_then(|e| e.providers.as_ref()) {
            for provider in providers {
                let Some(url) = provider.url.as_deref() else {
                    continue;
                };
                let relation = match provider.access.as_deref() {
                    Some(access) => format!("{}/{}", rel::ACQUISITION, access),
                    None => rel::ACQUISITION.to_string(),
                };
                let mut link = Link::new(url).rel(relation);
                if let Some(media_type) = provider.format.as_deref().and_then(format_media_type) {
                    link = link.media_type(media_type);
                }
                builder = builder.link(link);
            }
        }

        let cover_id = edition.and_then(|e| e.cover_i).or(doc.cover_i);
        if let Some(cover_id) = cover_id {
            builder = builder.image(
                Link::new(format!("{}/b/id/{}-L.jpg", self.covers_url, cover_id))
                    .rel(rel::COVER)
                    .media_type(mime::JPEG),
            );
        }

        Ok(builder.build())
    }

    fn map_authors(&self, doc: &SearchDoc) -> Vec<Contributor> {
        let Some(names) = doc.author_name.as_ref() else {
            return Vec::new();
        };
        let keys = doc.author_key.as_deref().unwrap_or_default();
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let mut contributor = Contributor::new(name);
                // A name without a matching key still makes a valid
                // contributor, just without an author-page link.
                if let Some(author_key) = keys.get(i) {
                    contributor = contributor.link(
                        Link::new(format!("{}/authors/{}", self.base_url, author_key))
                            .rel(rel::AUTHOR)
                            .media_type(mime::HTML),
                    );
                }
                contributor
            })
            .collect()
    }
}

impl Default for OpenLibraryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataProvider for OpenLibraryProvider {
    fn id(&self) -> &str {
        "openlibrary"
    }

    fn name(&self) -> &str {
        "Open Library"
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ProviderError> {
        let query = normalize_query(&request.query)?;
        let url = self.search_url(&query, request);

        tracing::debug!(%url, "searching Open Library");

        let response = self
            .client
            .client()
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Network(format!("failed to reach Open Library: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Open Library returned an error status");
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(format!("failed to read response body: {}", e)))?;

        let page: SearchPage = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Parse(format!("unexpected response envelope: {}", e)))?;

        let mut publications = Vec::with_capacity(page.docs.len());
        let mut skipped = 0usize;
        for doc in &page.docs {
            match self.map_doc(doc) {
                Ok(publication) => publications.push(publication),
                Err(reason) => {
                    skipped += 1;
                    tracing::debug!(%reason, "skipping unmappable record");
                }
            }
        }

        let mut result = SearchResponse::new(publications, self.name(), query).skipped(skipped);
        if let Some(total) = page.num_found {
            result = result.total(total);
        }
        Ok(result)
    }
}

/// Collapse whitespace runs and reject queries that are empty after trimming.
///
/// The remote API tokenizes on whitespace, so normalization keeps the issued
/// query deterministic without changing its meaning.
fn normalize_query(text: &str) -> Result<String, ProviderError> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        return Err(ProviderError::InvalidQuery(
            "query must not be empty or whitespace-only".to_string(),
        ));
    }
    Ok(normalized)
}

/// Coerce a raw subject entry to a string.
///
/// Entries with no sensible string form are dropped from the subject list.
fn coerce_subject(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Map an Open Library provider format to a media type
fn format_media_type(format: &str) -> Option<&'static str> {
    match format {
        "web" => Some(mime::HTML),
        "pdf" => Some(mime::PDF),
        "epub" => Some(mime::EPUB),
        "audio" => Some(mime::AUDIO),
        _ => None,
    }
}

/// Translate a MARC language code to ISO 639-1.
///
/// Search results carry MARC codes while OPDS metadata wants two-letter
/// codes. Codes outside this table are dropped.
fn marc_to_iso_639_1(marc: &str) -> Option<&'static str> {
    match marc {
        "eng" => Some("en"),
        "fre" => Some("fr"),
        "ger" => Some("de"),
        "spa" => Some("es"),
        "ita" => Some("it"),
        "por" => Some("pt"),
        "rus" => Some("ru"),
        "jpn" => Some("ja"),
        "chi" => Some("zh"),
        "ara" => Some("ar"),
        "dut" => Some("nl"),
        "swe" => Some("sv"),
        "pol" => Some("pl"),
        "kor" => Some("ko"),
        "hin" => Some("hi"),
        _ => None,
    }
}

/// Why a record was excluded from the mapped results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    /// The element does not decode as a record object
    Malformed,
    /// Title absent or empty after trimming
    MissingTitle,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Malformed => write!(f, "record does not decode"),
            SkipReason::MissingTitle => write!(f, "missing title"),
        }
    }
}

// ===== Open Library API types =====

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(rename = "numFound")]
    num_found: Option<usize>,
    docs: Vec<serde_json::Value>,
}

/// One work-level search document. Every field is optional; the mapper owns
/// all absence semantics.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchDoc {
    key: Option<String>,
    title: Option<String>,
    subtitle: Option<String>,
    description: Option<String>,
    author_key: Option<Vec<String>>,
    author_name: Option<Vec<String>>,
    cover_i: Option<i64>,
    language: Option<Vec<String>>,
    subject: Option<Vec<serde_json::Value>>,
    first_publish_year: Option<i32>,
    number_of_pages_median: Option<u32>,
    editions: Option<EditionPage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EditionPage {
    docs: Option<Vec<EditionDoc>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EditionDoc {
    key: Option<String>,
    title: Option<String>,
    subtitle: Option<String>,
    cover_i: Option<i64>,
    providers: Option<Vec<EditionProvider>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EditionProvider {
    access: Option<String>,
    format: Option<String>,
    url: Option<String>,
}
