use url::Url;

/// Derives the robots.txt location for a site: `{scheme}://{host}[:port]/robots.txt`
///
/// Path, query and fragment of the input are discarded.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use crawl_audit::url::robots_url;
///
/// let site = Url::parse("https://example.com/blog/post?id=1").unwrap();
/// assert_eq!(robots_url(&site).as_str(), "https://example.com/robots.txt");
/// ```
pub fn robots_url(site: &Url) -> Url {
    let mut robots = site.clone();
    robots.set_path("/robots.txt");
    robots.set_query(None);
    robots.set_fragment(None);
    robots
}

/// Returns the part of a URL that robots.txt patterns are matched against
///
/// This is the path plus the query string, if any.
pub fn robots_path(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}
