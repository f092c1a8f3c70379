//! Book page heuristics
//!
//! Extraction rules for the target site's markup:
//! - listing pages link to books through `<a class="bookTitle" href>` anchors
//! - a detail page carries a labeled info box (`Original Title`, `ISBN`)
//!   where the value sits in the div following the label div
//! - ISBN digits are fished out of the value markup with `\D(\d{10})\D` /
//!   `\D(\d{13})\D`, keeping the last match
//! - ISBN13 falls back to `<meta property="books:isbn">`
//! - the author is the first `<a class="authorName">` anchor
//!
//! Every rule that finds nothing leaves its field unset; there is no error
//! path out of extraction.

use crate::extract::Extractor;
use crate::record::Record;
use crate::url::resolve_link;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Extractor for the book site's listing and detail markup
pub struct BookExtractor {
    isbn10: Regex,
    isbn13: Regex,
}

impl BookExtractor {
    pub fn new() -> Self {
        // Both patterns are literals; parse cannot fail
        Self {
            isbn10: Regex::new(r"\D(\d{10})\D").unwrap(),
            isbn13: Regex::new(r"\D(\d{13})\D").unwrap(),
        }
    }

    /// Finds the value div that follows the div whose text equals `label`
    fn labeled_value<'a>(document: &'a Html, label: &str) -> Option<ElementRef<'a>> {
        let div = Selector::parse("div").ok()?;

        for element in document.select(&div) {
            let text = element.text().collect::<String>();
            if text.trim() == label {
                return next_sibling_div(element);
            }
        }

        None
    }

    /// Last capture of `pattern` in the serialized value markup
    ///
    /// Matching runs over the element's HTML rather than its text so that
    /// digits wedged against tag boundaries still satisfy the `\D` guards,
    /// and so hidden alternate editions are seen. Keeping the last match
    /// mirrors the site putting the edition's own ISBN last.
    fn last_digit_run(&self, pattern: &Regex, value: &ElementRef) -> Option<String> {
        pattern
            .captures_iter(&value.html())
            .last()
            .map(|captures| captures[1].to_string())
    }
}

impl Default for BookExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for BookExtractor {
    fn links(&self, html: &str, base: &Url) -> Vec<Url> {
        let document = Html::parse_document(html);
        let mut links = Vec::new();

        if let Ok(selector) = Selector::parse("a.bookTitle[href]") {
            for element in document.select(&selector) {
                if let Some(href) = element.value().attr("href") {
                    if let Some(absolute) = resolve_link(href, base) {
                        links.push(absolute);
                    }
                }
            }
        }

        links
    }

    fn record(&self, html: &str, url: &Url) -> Record {
        let document = Html::parse_document(html);
        let mut record = Record::empty(url.to_string());

        // Title
        if let Some(value) = Self::labeled_value(&document, "Original Title") {
            let text = value.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                record.title = Some(text);
            }
        }

        // ISBN numbers, each independently of the other
        if let Some(value) = Self::labeled_value(&document, "ISBN") {
            record.isbn = self.last_digit_run(&self.isbn10, &value);
            record.isbn13 = self.last_digit_run(&self.isbn13, &value);
        }

        // Alternative source for the ISBN13
        if record.isbn13.is_none() {
            if let Ok(selector) = Selector::parse(r#"meta[property="books:isbn"]"#) {
                record.isbn13 = document
                    .select(&selector)
                    .next()
                    .and_then(|meta| meta.value().attr("content"))
                    .map(|content| content.to_string());
            }
        }

        // Author
        if let Ok(selector) = Selector::parse("a.authorName") {
            record.author = document
                .select(&selector)
                .next()
                .map(|element| element.text().collect::<String>().trim().to_string())
                .filter(|text| !text.is_empty());
        }

        record
    }
}

/// The next div element among this element's following siblings
fn next_sibling_div(element: ElementRef) -> Option<ElementRef> {
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == "div")
}
