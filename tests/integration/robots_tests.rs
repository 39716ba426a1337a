//! robots.txt fetching against a mock server

use crate::test_client;
use crawl_audit::robots::fetch_robots;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_robots_parses_rules_and_sitemaps() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "User-agent: *\nDisallow: /private\nCrawl-delay: 2\n\nUser-agent: TestBot\nDisallow: /\n\nSitemap: {}/sitemap.xml\n",
            base_url
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client();
    let site = Url::parse(&format!("{}/some/page", base_url)).unwrap();
    let robots = fetch_robots(&client, &site, "*").await;

    assert!(robots.exists);
    assert!(robots.is_valid);
    assert_eq!(robots.rules.len(), 2);
    assert_eq!(robots.sitemaps, vec![format!("{}/sitemap.xml", base_url)]);
    assert_eq!(robots.applicable_rules.user_agent, "*");
    assert_eq!(robots.applicable_rules.crawl_delay, Some(2.0));
    assert!(robots.is_path_blocked("/private/page"));
    assert!(!robots.is_path_blocked("/public"));
}

#[tokio::test]
async fn test_fetch_robots_selects_named_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("User-agent: *\nAllow: /\n\nUser-agent: TestBot\nDisallow: /\n"),
        )
        .mount(&mock_server)
        .await;

    let client = test_client();
    let site = Url::parse(&mock_server.uri()).unwrap();
    let robots = fetch_robots(&client, &site, "TestBot").await;

    assert_eq!(robots.applicable_rules.user_agent, "TestBot");
    assert!(robots.is_path_blocked("/anything"));

    // Agent matching is case-sensitive; other casings fall back to `*`
    let other = fetch_robots(&client, &site, "testbot").await;
    assert_eq!(other.applicable_rules.user_agent, "*");
    assert!(!other.is_path_blocked("/anything"));
}

#[tokio::test]
async fn test_fetch_robots_missing_file() {
    let mock_server = MockServer::start().await;
    // No mocks mounted: wiremock answers 404

    let client = test_client();
    let site = Url::parse(&mock_server.uri()).unwrap();
    let robots = fetch_robots(&client, &site, "*").await;

    assert!(!robots.exists);
    assert!(robots.rules.is_empty());
    assert!(robots.sitemaps.is_empty());
    assert!(robots.errors.iter().any(|e| e.contains("404")));
    assert!(!robots.is_path_blocked("/private"));
}

#[tokio::test]
async fn test_fetch_robots_reports_syntax_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("User-agent: *\nthis line has no colon\nDisallow: /tmp\n"),
        )
        .mount(&mock_server)
        .await;

    let client = test_client();
    let site = Url::parse(&mock_server.uri()).unwrap();
    let robots = fetch_robots(&client, &site, "*").await;

    assert!(robots.exists);
    assert!(!robots.is_valid);
    assert_eq!(robots.errors.len(), 1);
    assert!(robots.errors[0].starts_with("Line 2:"));
    // Valid lines are still applied
    assert!(robots.is_path_blocked("/tmp/file"));
}
