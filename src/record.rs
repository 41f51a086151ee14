//! Flat records assembled from the extractors

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::ExtractorConfig;
use crate::document::ParsedDocument;
use crate::extractors::SearchResultFieldExtractor;

/// All fields of a marketplace item page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub artist: String,
    pub title: String,
    pub label: String,
    pub number_of_tracks: usize,
    pub release_date: String,
    pub price: String,
    pub rating: String,
    pub votes: String,
    pub have: String,
    pub want: String,
    pub limited_edition: u8,
    pub release_format: String,
    pub media_condition: String,
    pub sleeve_condition: String,
    pub release_page_url: String,
}

/// One row of a marketplace search export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub artist: String,
    pub title: String,
    pub price: String,
    pub have: u32,
    pub want: u32,
    pub url: String,
}

impl SearchRecord {
    pub const COLUMNS: [&'static str; 6] = ["artist", "title", "price", "have", "want", "url"];

    /// Row kept for an item page that could not be parsed.
    pub fn placeholder(url: &str) -> Self {
        Self {
            artist: "-".to_string(),
            title: "-".to_string(),
            price: "-".to_string(),
            have: 0,
            want: 0,
            url: url.to_string(),
        }
    }

    /// Extract a row, falling back to [`SearchRecord::placeholder`] so one bad
    /// page does not drop the item from an export.
    pub fn from_document_or_placeholder<D: ParsedDocument>(
        document: &D,
        url: &str,
        config: ExtractorConfig,
    ) -> Self {
        match SearchResultFieldExtractor::with_config(document, config).record() {
            Ok(record) => record,
            Err(e) => {
                warn!("Item {} could not be parsed: {}", url, e);
                Self::placeholder(url)
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl ListingRecord {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
