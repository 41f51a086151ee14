//! Master release page fields

use tracing::debug;

use super::patterns::{master_id_from, parse_count, strip_byte_artifact};
use crate::config::{ExtractorConfig, SITE_ORIGIN};
use crate::document::{DocumentNode, ParsedDocument};
use crate::error::ExtractResult;
use crate::record::SearchRecord;

const HEADING: &str = "#page > div > div:nth-child(2) > div > h1";
const HEADING_ARTIST: &str = "#page > div > div:nth-child(2) > div > h1 > span > a";
const MARKETPLACE_PRICE: &str = "#master-release-marketplace > header > div > span > span";
const HAVE_COUNT: &str =
    "#master-statistics > div > div > div:nth-child(1) > ul > li:nth-child(1) > a";
const WANT_COUNT: &str =
    "#master-statistics > div > div > div:nth-child(1) > ul > li:nth-child(2) > a";
const MASTER_ID: &str = "#master-actions > header > button > span";

/// Field accessors over a master release page reached from search results.
pub struct SearchResultFieldExtractor<'d, D: ParsedDocument> {
    document: &'d D,
    config: ExtractorConfig,
}

impl<'d, D: ParsedDocument> SearchResultFieldExtractor<'d, D> {
    /// Uses [`ExtractorConfig::default`], under which `price` never fails.
    pub fn new(document: &'d D) -> Self {
        Self::with_config(document, ExtractorConfig::default())
    }

    pub fn with_config(document: &'d D, config: ExtractorConfig) -> Self {
        Self { document, config }
    }

    pub fn artist(&self) -> ExtractResult<String> {
        let node = self.document.first("artist", HEADING_ARTIST)?;
        Ok(node.text_content().trim().to_string())
    }

    /// Heading text minus the artist, minus the `" – "` separator.
    pub fn title(&self) -> ExtractResult<String> {
        let heading = self.document.first("title", HEADING)?.text_content();
        let artist = self.artist()?;
        Ok(heading.replace(&artist, "").chars().skip(3).collect())
    }

    /// Lowest marketplace price. Failure handling follows
    /// `ExtractorConfig::price_failure`.
    pub fn price(&self) -> ExtractResult<String> {
        let price = self
            .document
            .first("price", MARKETPLACE_PRICE)
            .map(|node| strip_byte_artifact(&node.text_content()));
        self.config.price_failure.apply("price", price)
    }

    pub fn have(&self) -> ExtractResult<u32> {
        let node = self.document.first("have", HAVE_COUNT)?;
        parse_count("have", &node.text_content())
    }

    pub fn want(&self) -> ExtractResult<u32> {
        let node = self.document.first("want", WANT_COUNT)?;
        parse_count("want", &node.text_content())
    }

    /// Canonical `https://discogs.com/master/{id}` link.
    pub fn url(&self) -> ExtractResult<String> {
        let node = self.document.first("url", MASTER_ID)?;
        Ok(format!("{SITE_ORIGIN}/master/{}", master_id_from(&node.text_content())))
    }

    pub fn record(&self) -> ExtractResult<SearchRecord> {
        let record = SearchRecord {
            artist: self.artist()?,
            title: self.title()?,
            price: self.price()?,
            have: self.have()?,
            want: self.want()?,
            url: self.url()?,
        };
        debug!("Extracted master release: {} - {}", record.artist, record.title);
        Ok(record)
    }
}
