use axum::http::StatusCode;

use super::harness::{TestHarness, header_value};

#[tokio::test]
async fn responses_carry_cache_and_security_headers() {
    let harness = TestHarness::setup();
    for uri in ["/browse/", "/stats", "/browse/collections/missing"] {
        let response = harness.get(uri).await;
        let headers = response.headers();
        assert_eq!(
            header_value(headers, "cache-control"),
            Some("no-cache, no-store, must-revalidate"),
            "uri: {uri}"
        );
        assert_eq!(header_value(headers, "pragma"), Some("no-cache"));
        assert_eq!(header_value(headers, "expires"), Some("0"));
        assert_eq!(header_value(headers, "x-content-type-options"), Some("nosniff"));
        let csp = header_value(headers, "content-security-policy").expect("csp header");
        assert!(csp.contains("frame-ancestors 'none'"));
    }
}

#[tokio::test]
async fn pages_are_html_and_stats_is_json() {
    let harness = TestHarness::setup();

    let page = harness.get("/browse/").await;
    assert_eq!(page.status(), StatusCode::OK);
    assert!(
        header_value(page.headers(), "content-type")
            .is_some_and(|value| value.starts_with("text/html"))
    );

    let stats = harness.get("/stats").await;
    assert_eq!(
        header_value(stats.headers(), "content-type"),
        Some("application/json")
    );
}
