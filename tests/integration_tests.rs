//! Integration tests for the Open Library provider.
//!
//! These tests drive the full search pipeline (query normalization, one
//! HTTP request, envelope parsing, per-record mapping) against a local
//! mock of the Open Library API.

use mockito::{Matcher, Server, ServerGuard};
use opds2_openlibrary::models::{rel, SearchRequest, SearchResponse};
use opds2_openlibrary::provider::{
    make_publication, DataProvider, MockProvider, OpenLibraryProvider, ProviderError,
};

fn provider_for(server: &ServerGuard) -> OpenLibraryProvider {
    // Surface skip/request logs when a test run needs them (RUST_LOG=debug).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    OpenLibraryProvider::new().with_base_url(server.url())
}

fn two_docs_body() -> &'static str {
    r#"{
        "numFound": 2,
        "docs": [
            {
                "key": "/works/OL45804W",
                "title": "Fantastic Mr Fox",
                "author_name": ["Roald Dahl"],
                "author_key": ["OL34184A"],
                "cover_i": 8739161,
                "language": ["eng"],
                "first_publish_year": 1970,
                "editions": {
                    "numFound": 1,
                    "docs": [
                        {
                            "key": "/books/OL7353617M",
                            "title": "Fantastic Mr Fox",
                            "cover_i": 8739161,
                            "providers": [
                                {
                                    "url": "https://openlibrary.org/books/OL7353617M",
                                    "format": "web",
                                    "access": "open",
                                    "provider_name": "openlibrary"
                                }
                            ]
                        }
                    ]
                }
            },
            {
                "key": "/works/OL45805W",
                "title": "Charlie and the Chocolate Factory",
                "author_name": ["Roald Dahl"],
                "author_key": ["OL34184A"]
            }
        ]
    }"#
}

#[tokio::test]
async fn test_search_maps_all_well_formed_records() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search.json")
        .match_query(Matcher::Any)
        .with_header("content-type", "application/json")
        .with_body(two_docs_body())
        .create_async()
        .await;

    let provider = provider_for(&server);
    let response = provider
        .search(&SearchRequest::new("roald dahl").limit(10))
        .await
        .unwrap();

    mock.assert_async().await;

    assert_eq!(response.len(), 2);
    assert_eq!(response.total, Some(2));
    assert_eq!(response.skipped, 0);
    assert_eq!(response.source, "Open Library");

    // Remote relevance order is preserved.
    let first = &response.publications[0];
    assert_eq!(first.metadata.title, "Fantastic Mr Fox");
    assert_eq!(first.author_names(), vec!["Roald Dahl"]);
    assert_eq!(
        response.publications[1].metadata.title,
        "Charlie and the Chocolate Factory"
    );

    // The edition key wins over the work key for the self link.
    let self_link = first
        .links
        .iter()
        .find(|l| l.rel.as_deref() == Some(rel::SELF))
        .unwrap();
    assert_eq!(
        self_link.href,
        format!("{}/books/OL7353617M", server.url())
    );

    // The cover URL follows the fixed image-service template.
    assert_eq!(
        first.images[0].href,
        "https://covers.openlibrary.org/b/id/8739161-L.jpg"
    );

    // The edition provider entry becomes an acquisition link.
    assert!(first.links.iter().any(|l| {
        l.rel.as_deref() == Some("http://opds-spec.org/acquisition/open")
    }));
}

#[tokio::test]
async fn test_title_less_record_is_skipped_not_fatal() {
    let body = r#"{
        "numFound": 3,
        "docs": [
            {"key": "/works/OL1W", "title": "First"},
            {"key": "/works/OL2W", "author_name": ["No Title Here"]},
            {"key": "/works/OL3W", "title": "Third"}
        ]
    }"#;

    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search.json")
        .match_query(Matcher::Any)
        .with_body(body)
        .create_async()
        .await;

    let response = provider_for(&server)
        .search(&SearchRequest::new("test"))
        .await
        .unwrap();

    assert_eq!(response.len(), 2);
    assert_eq!(response.skipped, 1);
    assert_eq!(response.publications[0].metadata.title, "First");
    assert_eq!(response.publications[1].metadata.title, "Third");
}

#[tokio::test]
async fn test_server_error_surfaces_status_and_body() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search.json")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("upstream down")
        .create_async()
        .await;

    let err = provider_for(&server)
        .search(&SearchRequest::new("test"))
        .await
        .unwrap_err();

    match err {
        ProviderError::Api { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream down");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rate_limit_status_is_an_api_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search.json")
        .match_query(Matcher::Any)
        .with_status(429)
        .with_body("slow down")
        .create_async()
        .await;

    let err = provider_for(&server)
        .search(&SearchRequest::new("test"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Api { status: 429, .. }));
}

#[tokio::test]
async fn test_non_json_body_is_parse_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search.json")
        .match_query(Matcher::Any)
        .with_body("<html>definitely not json</html>")
        .create_async()
        .await;

    let err = provider_for(&server)
        .search(&SearchRequest::new("test"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Parse(_)));
}

#[tokio::test]
async fn test_envelope_without_docs_is_parse_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search.json")
        .match_query(Matcher::Any)
        .with_body(r#"{"numFound": 3}"#)
        .create_async()
        .await;

    let err = provider_for(&server)
        .search(&SearchRequest::new("test"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Parse(_)));
}

#[tokio::test]
async fn test_blank_query_issues_no_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search.json")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let provider = provider_for(&server);

    let err = provider.search(&SearchRequest::new("")).await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidQuery(_)));

    let err = provider.search(&SearchRequest::new("   ")).await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidQuery(_)));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_query_is_normalized_before_sending() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "tolkien hobbit".into()),
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("limit".into(), "50".into()),
        ]))
        .with_body(r#"{"numFound": 0, "docs": []}"#)
        .create_async()
        .await;

    let response = provider_for(&server)
        .search(&SearchRequest::new("  tolkien \t  hobbit "))
        .await
        .unwrap();

    mock.assert_async().await;

    assert!(response.is_empty());
    assert_eq!(response.query, "tolkien hobbit");
    assert_eq!(response.total, Some(0));
}

#[tokio::test]
async fn test_pagination_parameters() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "3".into()),
            Matcher::UrlEncoded("limit".into(), "10".into()),
            Matcher::UrlEncoded("sort".into(), "rating".into()),
        ]))
        .with_body(r#"{"numFound": 100, "docs": []}"#)
        .create_async()
        .await;

    let response = provider_for(&server)
        .search(&SearchRequest::new("test").limit(10).offset(20).sort("rating"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.total, Some(100));
}

#[tokio::test]
async fn test_empty_result_page_is_ok_not_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search.json")
        .match_query(Matcher::Any)
        .with_body(r#"{"numFound": 0, "docs": []}"#)
        .create_async()
        .await;

    let response = provider_for(&server)
        .search(&SearchRequest::new("nonexistent"))
        .await
        .unwrap();

    assert!(response.is_empty());
    assert_eq!(response.skipped, 0);
}

#[tokio::test]
async fn test_provider_metadata() {
    let provider = OpenLibraryProvider::new();
    assert_eq!(provider.id(), "openlibrary");
    assert_eq!(provider.name(), "Open Library");
}

#[tokio::test]
async fn test_mock_provider_returns_canned_response() {
    let mock = MockProvider::new();
    mock.set_search_response(
        SearchResponse::new(
            vec![make_publication("Canned Title")],
            "Mock Provider",
            "anything",
        )
        .total(1),
    );

    let provider: &dyn DataProvider = &mock;
    let response = provider.search(&SearchRequest::new("anything")).await.unwrap();

    assert_eq!(response.len(), 1);
    assert_eq!(response.publications[0].metadata.title, "Canned Title");

    mock.clear_response();
    let response = mock.search(&SearchRequest::new("anything")).await.unwrap();
    assert!(response.is_empty());
}
