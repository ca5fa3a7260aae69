//! Adapter-level tests against a local mock of the resolution service.

use tbx_core::ports::LinkResolverPort;
use tbx_resolver::HttpLinkResolver;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LINK: &str = "https://terabox.com/s/abc123";

async fn resolver_for(server: &MockServer) -> HttpLinkResolver {
    HttpLinkResolver::new(server.uri(), "test-key")
}

#[tokio::test]
async fn passes_link_and_key_as_query_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("url", LINK))
        .and(query_param("apikey", "test-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "url": "https://cdn.example/v.mp4" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resolved = resolver_for(&server).await.resolve(LINK).await.unwrap();
    assert_eq!(resolved, "https://cdn.example/v.mp4");
}

#[tokio::test]
async fn non_success_status_is_a_resolution_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    assert!(resolver_for(&server).await.resolve(LINK).await.is_err());
}

#[tokio::test]
async fn malformed_body_is_a_resolution_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    assert!(resolver_for(&server).await.resolve(LINK).await.is_err());
}

#[tokio::test]
async fn missing_url_field_is_a_resolution_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "ok" })),
        )
        .mount(&server)
        .await;

    assert!(resolver_for(&server).await.resolve(LINK).await.is_err());
}
