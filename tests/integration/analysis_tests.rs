//! End-to-end analyses against a mock site

use crate::urlset;
use crawl_audit::config::Config;
use crawl_audit::output::to_json;
use crawl_audit::{analyze_crawlability, Analyzer, AuditError};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page_html(canonical: &str, robots_meta: Option<&str>) -> String {
    let meta = robots_meta
        .map(|content| format!(r#"<meta name="robots" content="{}">"#, content))
        .unwrap_or_default();
    format!(
        r#"<html><head><title>Test</title>{}<link rel="canonical" href="{}"></head><body>Hello</body></html>"#,
        meta, canonical
    )
}

async fn serve_page(mock_server: &MockServer, route: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(template)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_healthy_site_scores_full_marks() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    serve_page(
        &mock_server,
        "/robots.txt",
        ResponseTemplate::new(200).set_body_string(format!(
            "User-agent: *\nDisallow: /admin\n\nSitemap: {}/sitemap.xml\n",
            base_url
        )),
    )
    .await;
    serve_page(
        &mock_server,
        "/sitemap.xml",
        ResponseTemplate::new(200).set_body_raw(
            urlset(&[format!("{}/", base_url), format!("{}/about", base_url)]),
            "application/xml",
        ),
    )
    .await;
    serve_page(
        &mock_server,
        "/",
        ResponseTemplate::new(200)
            .set_body_raw(page_html(&format!("{}/", base_url), None), "text/html"),
    )
    .await;

    let analyzer = Analyzer::new(Config::default()).unwrap();
    let result = analyzer.analyze(&format!("{}/", base_url)).await.unwrap();

    assert!(result.robots_txt.exists);
    assert!(result.robots_txt.is_valid);
    assert_eq!(result.sitemaps.discovered, vec![format!("{}/sitemap.xml", base_url)]);
    assert_eq!(result.sitemaps.urls.len(), 2);
    assert!(result.indexability.is_indexable);
    assert!(result.overall_indexable);
    assert_eq!(result.crawlability_score, 100);
    assert!(result.recommendations.is_empty());
    assert!(result.error.is_none());
}

#[tokio::test]
async fn test_page_blocked_by_robots_txt() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    serve_page(
        &mock_server,
        "/robots.txt",
        ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private\n"),
    )
    .await;
    serve_page(
        &mock_server,
        "/private/page",
        ResponseTemplate::new(200).set_body_raw(
            page_html(&format!("{}/private/page", base_url), None),
            "text/html",
        ),
    )
    .await;

    let analyzer = Analyzer::new(Config::default()).unwrap();
    let result = analyzer
        .analyze(&format!("{}/private/page", base_url))
        .await
        .unwrap();

    assert!(result.indexability.blocking_factors.robots_txt);
    assert!(!result.indexability.is_indexable);
    assert!(!result.overall_indexable);
    assert!(result
        .recommendations
        .iter()
        .any(|r| r.contains("robots.txt")));
    // No sitemap (-10) and not indexable (-50)
    assert_eq!(result.crawlability_score, 40);
}

#[tokio::test]
async fn test_site_without_robots_txt() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    serve_page(
        &mock_server,
        "/",
        ResponseTemplate::new(200)
            .set_body_raw(page_html(&format!("{}/", base_url), None), "text/html"),
    )
    .await;

    let analyzer = Analyzer::new(Config::default()).unwrap();
    let result = analyzer.analyze(&format!("{}/", base_url)).await.unwrap();

    assert!(!result.robots_txt.exists);
    assert!(result.sitemaps.discovered.is_empty());
    assert!(result.sitemaps.sitemaps.is_empty());
    assert!(result.indexability.is_indexable);
    // Missing robots.txt (-20) and no sitemap (-10)
    assert_eq!(result.crawlability_score, 70);
    assert_eq!(
        result.recommendations[0],
        "Create a robots.txt file to guide search engine crawlers"
    );
}

#[tokio::test]
async fn test_noindex_meta_and_header() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    serve_page(
        &mock_server,
        "/robots.txt",
        ResponseTemplate::new(200).set_body_string("User-agent: *\nAllow: /\n"),
    )
    .await;
    serve_page(
        &mock_server,
        "/meta",
        ResponseTemplate::new(200).set_body_raw(
            page_html(&format!("{}/meta", base_url), Some("noindex, nofollow")),
            "text/html",
        ),
    )
    .await;
    serve_page(
        &mock_server,
        "/header",
        ResponseTemplate::new(200)
            .insert_header("x-robots-tag", "noindex")
            .set_body_raw(page_html(&format!("{}/header", base_url), None), "text/html"),
    )
    .await;

    let analyzer = Analyzer::new(Config::default()).unwrap();

    let meta = analyzer.analyze(&format!("{}/meta", base_url)).await.unwrap();
    assert!(!meta.indexability.is_indexable);
    assert!(meta.indexability.blocking_factors.meta_robots);
    assert!(meta.indexability.blocking_factors.nofollow);
    assert!(!meta.indexability.blocking_factors.robots_txt);
    assert_eq!(meta.crawlability_score, 40);

    let header = analyzer.analyze(&format!("{}/header", base_url)).await.unwrap();
    assert!(!header.indexability.is_indexable);
    assert!(header.indexability.meta_robots.noindex);
    assert!(!header.indexability.meta_robots.nofollow);
}

#[tokio::test]
async fn test_unreachable_page_is_not_indexable() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    serve_page(
        &mock_server,
        "/robots.txt",
        ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow:\n"),
    )
    .await;

    let analyzer = Analyzer::new(Config::default()).unwrap();
    let result = analyzer.analyze(&format!("{}/gone", base_url)).await.unwrap();

    assert!(!result.indexability.is_indexable);
    assert!(!result.indexability.blocking_factors.robots_txt);
    assert!(result
        .indexability
        .recommendations
        .iter()
        .any(|r| r.contains("HTTP 404")));
}

#[tokio::test]
async fn test_configured_agent_selects_its_rules() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    serve_page(
        &mock_server,
        "/robots.txt",
        ResponseTemplate::new(200)
            .set_body_string("User-agent: *\nAllow: /\n\nUser-agent: Googlebot\nDisallow: /\n"),
    )
    .await;
    serve_page(
        &mock_server,
        "/",
        ResponseTemplate::new(200)
            .set_body_raw(page_html(&format!("{}/", base_url), None), "text/html"),
    )
    .await;

    let mut config = Config::default();
    config.engine.evaluation_agent = "Googlebot".to_string();
    let analyzer = Analyzer::new(config).unwrap();
    let result = analyzer.analyze(&format!("{}/", base_url)).await.unwrap();

    assert_eq!(result.robots_txt.applicable_rules.user_agent, "Googlebot");
    assert!(result.indexability.blocking_factors.robots_txt);
}

#[tokio::test]
async fn test_result_serializes_in_camel_case() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    serve_page(
        &mock_server,
        "/",
        ResponseTemplate::new(200)
            .set_body_raw(page_html(&format!("{}/", base_url), None), "text/html"),
    )
    .await;

    let result = analyze_crawlability(&format!("{}/", base_url)).await;
    let json = to_json(&result).unwrap();

    assert!(json.contains("\"robotsTxt\""));
    assert!(json.contains("\"crawlabilityScore\": 70"));
    assert!(json.contains("\"overallIndexable\": true"));
    assert!(json.contains("\"blockingFactors\""));
}

#[tokio::test]
async fn test_invalid_url_yields_undetermined_result() {
    let result = analyze_crawlability("not a url").await;

    assert_eq!(result.crawlability_score, 0);
    assert!(!result.overall_indexable);
    assert!(result.error.is_some());
    assert!(!result.recommendations.is_empty());
}

#[tokio::test]
async fn test_cancel_during_slow_fetches() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    serve_page(
        &mock_server,
        "/robots.txt",
        ResponseTemplate::new(200).set_body_string(format!(
            "User-agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n",
            base_url
        )),
    )
    .await;
    serve_page(
        &mock_server,
        "/sitemap.xml",
        ResponseTemplate::new(200)
            .set_delay(Duration::from_secs(5))
            .set_body_raw(urlset(&[format!("{}/", base_url)]), "application/xml"),
    )
    .await;
    serve_page(
        &mock_server,
        "/",
        ResponseTemplate::new(200)
            .set_delay(Duration::from_secs(5))
            .set_body_raw(page_html(&format!("{}/", base_url), None), "text/html"),
    )
    .await;

    let analyzer = Analyzer::new(Config::default()).unwrap();
    let started = Instant::now();
    let result = analyzer
        .analyze_until(
            &format!("{}/", base_url),
            tokio::time::sleep(Duration::from_millis(200)),
        )
        .await;

    assert!(matches!(result, Err(AuditError::Cancelled { .. })));
    assert!(
        started.elapsed() < Duration::from_secs(2),
        "cancellation took {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn test_redirected_page_reports_landing_url() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    serve_page(
        &mock_server,
        "/old",
        ResponseTemplate::new(301).insert_header("location", format!("{}/new", base_url).as_str()),
    )
    .await;
    serve_page(
        &mock_server,
        "/new",
        ResponseTemplate::new(200)
            .set_body_raw(page_html(&format!("{}/new", base_url), None), "text/html"),
    )
    .await;

    let analyzer = Analyzer::new(Config::default()).unwrap();
    let result = analyzer.analyze(&format!("{}/old", base_url)).await.unwrap();

    assert!(result.indexability.is_indexable);
    assert_eq!(result.indexability.url, format!("{}/old", base_url));
    assert_eq!(
        result.indexability.recommendations,
        vec![format!(
            "Page redirects to {}/new; link to the final URL directly",
            base_url
        )]
    );
}
