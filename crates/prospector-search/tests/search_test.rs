//! Search and profile discovery against a mock Custom Search API.

use prospector_search::{GoogleSearchClient, ProfileFinder, SearchBackend, SearchError};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GoogleSearchClient {
    GoogleSearchClient::new(Some("search-key"), Some("engine-id"))
        .expect("create client")
        .with_base_url(server.uri())
}

#[tokio::test]
async fn test_search_maps_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("key", "search-key"))
        .and(query_param("cx", "engine-id"))
        .and(query_param("q", "tech startups in San Francisco"))
        .and(query_param("num", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "title": "Acme Robotics",
                    "link": "https://www.acme.io/",
                    "snippet": "Robots for everyone"
                },
                { "title": "No Snippet", "link": "https://globex.com/about" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let hits = client_for(&server)
        .search("tech startups", 2, Some("in San Francisco"))
        .await;

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].title, "Acme Robotics");
    assert_eq!(hits[0].domain, "www.acme.io");
    assert_eq!(hits[0].snippet, "Robots for everyone");
    assert_eq!(hits[1].snippet, "");
    assert_eq!(hits[1].domain, "globex.com");
}

#[tokio::test]
async fn test_search_without_items_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "kind": "customsearch#search" })),
        )
        .mount(&server)
        .await;

    assert!(client_for(&server).search("nothing", 5, None).await.is_empty());
}

#[tokio::test]
async fn test_search_failure_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(ResponseTemplate::new(403).set_body_string("quota"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.search("tech", 5, None).await.is_empty());

    let err = client.query("tech", 5).await.unwrap_err();
    assert!(matches!(err, SearchError::Api { status: 403, .. }));
}

#[tokio::test]
async fn test_find_profiles_across_strategies() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("q", "site:linkedin.com/in \"Acme Robotics\" Berlin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "title": "Jane Doe - Acme", "link": "https://www.linkedin.com/in/jane-doe" },
                { "title": "Acme company page", "link": "https://www.linkedin.com/company/acme" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("q", "site:linkedin.com/in acme-robotics Berlin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "title": "Jane Doe - Acme", "link": "https://www.linkedin.com/in/jane-doe" },
                { "title": "Raj Patel", "link": "https://www.linkedin.com/in/raj-patel-42" },
                { "title": "Li Wei", "link": "https://www.linkedin.com/in/li-wei" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("q", "site:linkedin.com/in Acme Berlin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let finder = ProfileFinder::new(Arc::new(client_for(&server)));
    let profiles = finder
        .find_profiles("Acme Robotics", Some("Berlin"), 2)
        .await;

    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].name, "Jane Doe");
    assert_eq!(profiles[0].profile_url, "https://www.linkedin.com/in/jane-doe");
    assert_eq!(profiles[1].name, "Raj Patel 42");
}

#[tokio::test]
async fn test_find_profiles_failure_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let finder = ProfileFinder::new(Arc::new(client_for(&server)));
    assert!(finder.find_profiles("Acme", None, 3).await.is_empty());
}

fn page_of(count: usize, offset: usize) -> serde_json::Value {
    let items: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "title": format!("Company {}", offset + i),
                "link": format!("https://company{}.example.com/", offset + i)
            })
        })
        .collect();
    json!({ "items": items })
}

#[tokio::test]
async fn test_large_request_is_paged() {
    let server = MockServer::start().await;

    for (start, num, offset) in [("1", "10", 0), ("11", "10", 10), ("21", "3", 20)] {
        let count: usize = num.parse().unwrap();
        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .and(query_param("start", start))
            .and(query_param("num", num))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_of(count, offset)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let hits = client_for(&server).search("tech startups", 23, None).await;

    assert_eq!(hits.len(), 23);
    assert_eq!(hits[0].title, "Company 0");
    assert_eq!(hits[22].domain, "company22.example.com");
}

#[tokio::test]
async fn test_short_page_ends_paging() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("start", "1"))
        .and(query_param("num", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_of(4, 0)))
        .expect(1)
        .mount(&server)
        .await;

    let hits = client_for(&server)
        .query("tech startups", 30)
        .await
        .expect("query succeeds");

    assert_eq!(hits.len(), 4);
}
