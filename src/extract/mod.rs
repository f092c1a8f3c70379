//! Page extraction boundary
//!
//! The crawl engine never inspects HTML itself; everything page-specific
//! lives behind the [`Extractor`] trait. Listing pages go through
//! [`Extractor::links`], detail pages through [`Extractor::record`].

mod book;

pub use book::BookExtractor;

use crate::record::Record;
use url::Url;

/// Pluggable page heuristics
///
/// Implementations must be cheap to call from many worker tasks at once;
/// they receive the raw body and own no crawl state.
pub trait Extractor: Send + Sync {
    /// Extracts candidate links from a listing page
    ///
    /// Returned URLs are absolute (resolved against `base`, the page's final
    /// URL after redirects). The caller applies the root-origin filter; the
    /// extractor does not.
    fn links(&self, html: &str, base: &Url) -> Vec<Url>;

    /// Extracts a record from a detail page
    ///
    /// Always returns a record with provenance populated; every field the
    /// page did not yield is simply left out. A record with no fields beyond
    /// provenance signals a total extraction failure to the caller.
    fn record(&self, html: &str, url: &Url) -> Record;
}
