//! URL handling module for Bookdredge
//!
//! This module provides the root-origin filter that keeps the crawl on the
//! seed's site, relative link resolution, and the listing/detail page
//! classification.

use crate::DredgeError;
use url::Url;

/// The kind of page a URL is expected to yield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// A page whose purpose is to yield further links, never a record
    Listing,
    /// A page expected to yield exactly one book record
    Detail,
}

/// The scheme + host (+ port) of the seed URL
///
/// Discovered links outside this origin are dropped; the crawl never leaves
/// the seed's site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootOrigin {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl RootOrigin {
    /// Derives the root origin from the seed URL
    ///
    /// # Errors
    ///
    /// Returns `DredgeError::SeedWithoutHost` if the URL has no host
    /// component (e.g. a `file:` URL).
    pub fn from_seed(seed: &Url) -> crate::Result<Self> {
        let host = seed
            .host_str()
            .ok_or_else(|| DredgeError::SeedWithoutHost(seed.to_string()))?;

        Ok(Self {
            scheme: seed.scheme().to_string(),
            host: host.to_string(),
            port: seed.port(),
        })
    }

    /// Returns whether a URL lies within this origin
    pub fn contains(&self, url: &Url) -> bool {
        url.scheme() == self.scheme
            && url.host_str() == Some(self.host.as_str())
            && url.port() == self.port
    }
}

/// Classifies a URL by path shape
///
/// A URL is a detail page when its path contains the configured detail
/// fragment (a plain substring test, matching the target site's layout);
/// anything else is a listing page. The classification is authoritative and
/// by path alone, never by page content.
pub fn classify(url: &Url, detail_fragment: &str) -> PageKind {
    if url.path().contains(detail_fragment) {
        PageKind::Detail
    } else {
        PageKind::Listing
    }
}

/// Resolves a link href against a base URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
pub fn resolve_link(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();

    // Skip empty hrefs
    if href.is_empty() {
        return None;
    }

    // Skip special schemes
    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Skip fragment-only links (same page anchors)
    if href.starts_with('#') {
        return None;
    }

    match base.join(href) {
        Ok(absolute) => {
            if absolute.scheme() == "http" || absolute.scheme() == "https" {
                Some(absolute)
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> Url {
        Url::parse("https://www.goodreads.com/shelf/show/technology?page=1").unwrap()
    }

    #[test]
    fn test_origin_from_seed() {
        let origin = RootOrigin::from_seed(&seed()).unwrap();
        assert!(origin.contains(&Url::parse("https://www.goodreads.com/book/show/42").unwrap()));
    }

    #[test]
    fn test_origin_rejects_other_host() {
        let origin = RootOrigin::from_seed(&seed()).unwrap();
        assert!(!origin.contains(&Url::parse("https://other.com/book/show/42").unwrap()));
    }

    #[test]
    fn test_origin_rejects_other_scheme() {
        let origin = RootOrigin::from_seed(&seed()).unwrap();
        assert!(!origin.contains(&Url::parse("http://www.goodreads.com/book/show/42").unwrap()));
    }

    #[test]
    fn test_origin_distinguishes_ports() {
        let seed = Url::parse("http://127.0.0.1:8080/shelf").unwrap();
        let origin = RootOrigin::from_seed(&seed).unwrap();
        assert!(origin.contains(&Url::parse("http://127.0.0.1:8080/book/show/1").unwrap()));
        assert!(!origin.contains(&Url::parse("http://127.0.0.1:9090/book/show/1").unwrap()));
    }

    #[test]
    fn test_classify_detail() {
        let url = Url::parse("https://www.goodreads.com/book/show/42-some-title").unwrap();
        assert_eq!(classify(&url, "/book/show/"), PageKind::Detail);
    }

    #[test]
    fn test_classify_listing() {
        let url = Url::parse("https://www.goodreads.com/shelf/show/technology?page=2").unwrap();
        assert_eq!(classify(&url, "/book/show/"), PageKind::Listing);
    }

    #[test]
    fn test_classify_ignores_query() {
        // The fragment has to appear in the path itself
        let url = Url::parse("https://www.goodreads.com/shelf?next=/book/show/42").unwrap();
        assert_eq!(classify(&url, "/book/show/"), PageKind::Listing);
    }

    #[test]
    fn test_resolve_relative_link() {
        let base = Url::parse("https://example.org/shelf?page=1").unwrap();
        let resolved = resolve_link("/book/show/42", &base).unwrap();
        assert_eq!(resolved.as_str(), "https://example.org/book/show/42");
    }

    #[test]
    fn test_resolve_absolute_link() {
        let base = Url::parse("https://example.org/shelf").unwrap();
        let resolved = resolve_link("https://example.org/shelf?page=2", &base).unwrap();
        assert_eq!(resolved.as_str(), "https://example.org/shelf?page=2");
    }

    #[test]
    fn test_resolve_skips_special_schemes() {
        let base = Url::parse("https://example.org/").unwrap();
        assert!(resolve_link("javascript:void(0)", &base).is_none());
        assert!(resolve_link("mailto:a@b.com", &base).is_none());
        assert!(resolve_link("tel:+123", &base).is_none());
        assert!(resolve_link("data:text/html,x", &base).is_none());
    }

    #[test]
    fn test_resolve_skips_fragment_only() {
        let base = Url::parse("https://example.org/").unwrap();
        assert!(resolve_link("#section", &base).is_none());
    }

    #[test]
    fn test_resolve_skips_empty() {
        let base = Url::parse("https://example.org/").unwrap();
        assert!(resolve_link("   ", &base).is_none());
    }
}
