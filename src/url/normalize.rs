use crate::UrlError;
use url::Url;

/// Parses and validates a site URL supplied by the caller
///
/// The URL must be absolute, use the `http` or `https` scheme, and carry a
/// host.
///
/// # Examples
///
/// ```
/// use crawl_audit::url::parse_site_url;
///
/// assert!(parse_site_url("https://example.com/page").is_ok());
/// assert!(parse_site_url("example.com").is_err());
/// assert!(parse_site_url("ftp://example.com/").is_err());
/// ```
pub fn parse_site_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Builds the key used to compare a canonical URL with the requested URL
///
/// The comparison ignores a trailing slash and the fragment. Scheme and
/// host case are already normalized by the URL parser.
pub fn comparison_key(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    url.as_str().trim_end_matches('/').to_string()
}

/// Returns true if two URLs refer to the same page, ignoring a trailing slash
///
/// # Examples
///
/// ```
/// use url::Url;
/// use crawl_audit::url::same_page;
///
/// let a = Url::parse("https://example.com/page/").unwrap();
/// let b = Url::parse("https://example.com/page").unwrap();
/// assert!(same_page(&a, &b));
/// ```
pub fn same_page(a: &Url, b: &Url) -> bool {
    comparison_key(a) == comparison_key(b)
}
