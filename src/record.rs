//! The harvested book record
//!
//! A record is produced by the extractor from one detail page and consumed
//! exactly once by the result sink. All fields except the provenance URL are
//! optional; a field the page did not yield is simply absent.

/// Column order of the CSV export. `Record::as_row` must stay in sync.
pub const FIELD_NAMES: [&str; 5] = ["Title", "ISBN", "ISBN13", "Author", "URL"];

/// One book harvested from a detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub title: Option<String>,
    pub isbn: Option<String>,
    pub isbn13: Option<String>,
    pub author: Option<String>,
    /// Provenance: the detail page this record came from. Always populated.
    pub url: String,
}

impl Record {
    /// Creates a record with only provenance populated
    pub fn empty(url: impl Into<String>) -> Self {
        Self {
            title: None,
            isbn: None,
            isbn13: None,
            author: None,
            url: url.into(),
        }
    }

    /// Returns whether extraction produced anything beyond provenance
    ///
    /// A record that fails this check is a total extraction failure and
    /// triggers the one-retry policy.
    pub fn has_fields(&self) -> bool {
        self.title.is_some() || self.isbn.is_some() || self.isbn13.is_some() || self.author.is_some()
    }

    /// The record as CSV cells, in `FIELD_NAMES` order, missing fields empty
    pub fn as_row(&self) -> [&str; 5] {
        [
            self.title.as_deref().unwrap_or(""),
            self.isbn.as_deref().unwrap_or(""),
            self.isbn13.as_deref().unwrap_or(""),
            self.author.as_deref().unwrap_or(""),
            self.url.as_str(),
        ]
    }
}
