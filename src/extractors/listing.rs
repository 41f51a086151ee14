//! Marketplace item page fields
//!
//! The ratings block and the format line feed several fields each, so both are
//! read once when the extractor is built.

use tracing::debug;

use super::absolute_url;
use super::patterns::{
    collapse_whitespace, have_from, is_limited_edition, release_format_from, strip_currency,
    votes_from, want_from,
};
use crate::config::{NOT_AVAILABLE, SITE_ORIGIN};
use crate::document::{DocumentNode, ParsedDocument};
use crate::error::{ExtractError, ExtractResult};
use crate::record::ListingRecord;

const MARKETPLACE_BUTTONS: &str = "div.release_info_buttons > div";
const ARTIST: &str = "div.profile > h1 > span > span";
const TITLE: &str = "div.profile > h1 > span";
const HEAD: &str = "div.head";
const TRACK_ROW: &str = "tr.tracklist_track";
const PRICE: &str = "span.price";
const RATING_VALUE: &str = "span.rating_value_sm";
const CONDITION_LABEL: &str = "strong";
const RELEASE_PAGE_LINK: &str = "a.release-page";

const NO_RATING: &str = "No Rating Yet";

/// Field accessors over a marketplace item page.
pub struct ListingFieldExtractor<'d, D: ParsedDocument> {
    document: &'d D,
    ratings_section: Option<String>,
    release_info: Option<String>,
}

impl<'d, D: ParsedDocument> ListingFieldExtractor<'d, D> {
    pub fn new(document: &'d D) -> Self {
        let mut extractor = Self {
            document,
            ratings_section: None,
            release_info: None,
        };

        if extractor.item_exists() {
            extractor.ratings_section = document
                .first("ratings_section", MARKETPLACE_BUTTONS)
                .map(|node| node.text_content())
                .ok();
            extractor.release_info = extractor.head_value("release_info", "Format").ok();
        }

        debug!(
            "Listing extractor ready: ratings_section={}, release_info={}",
            extractor.ratings_section.is_some(),
            extractor.release_info.is_some()
        );
        extractor
    }

    /// Whether the page carries the marketplace buttons block at all.
    pub fn item_exists(&self) -> bool {
        self.document.exists(MARKETPLACE_BUTTONS).unwrap_or(false)
    }

    fn ratings_section(&self) -> ExtractResult<&str> {
        self.ratings_section
            .as_deref()
            .ok_or_else(|| ExtractError::shape_mismatch("ratings_section", MARKETPLACE_BUTTONS))
    }

    fn release_info(&self) -> ExtractResult<&str> {
        self.release_info.as_deref().ok_or_else(|| {
            ExtractError::shape_mismatch("release_info", "div.head:contains('Format') ~ div")
        })
    }

    fn is_unrated(&self) -> ExtractResult<bool> {
        Ok(self.ratings_section()?.contains(NO_RATING))
    }

    /// Raw text of the `div` following the `div.head` labelled `label`.
    fn head_value_raw(&self, field: &str, label: &str) -> ExtractResult<String> {
        self.document
            .first_containing(field, HEAD, label)?
            .next_sibling_tagged("div")
            .map(|node| node.text_content())
            .ok_or_else(|| {
                ExtractError::shape_mismatch(field, &format!("{HEAD}:contains('{label}') ~ div"))
            })
    }

    fn head_value(&self, field: &str, label: &str) -> ExtractResult<String> {
        Ok(collapse_whitespace(&self.head_value_raw(field, label)?))
    }

    /// Text node right after the rating value, e.g. `" of 12 votes, (7 have, 9 want)"`.
    fn rating_trailing_text(&self, field: &str) -> ExtractResult<String> {
        self.document
            .first(field, RATING_VALUE)?
            .next_text()
            .ok_or_else(|| ExtractError::shape_mismatch(field, &format!("{RATING_VALUE} + text")))
    }

    pub fn artist(&self) -> ExtractResult<String> {
        let node = self.document.first("artist", ARTIST)?;
        Ok(node.text_content().trim().to_string())
    }

    pub fn title(&self) -> ExtractResult<String> {
        let node = self.document.nth("title", TITLE, 1)?;
        Ok(node.text_content().trim().to_string())
    }

    pub fn label(&self) -> ExtractResult<String> {
        let raw = self.head_value_raw("label", "Label")?;
        Ok(collapse_whitespace(&raw.replace('\n', "")))
    }

    pub fn number_of_tracks(&self) -> ExtractResult<usize> {
        self.document.count(TRACK_ROW)
    }

    pub fn release_date(&self) -> ExtractResult<String> {
        self.head_value("release_date", "Released")
    }

    pub fn price(&self) -> ExtractResult<String> {
        let node = self.document.first("price", PRICE)?;
        Ok(strip_currency(&node.text_content()))
    }

    pub fn rating(&self) -> ExtractResult<String> {
        if self.is_unrated()? {
            return Ok(NOT_AVAILABLE.to_string());
        }
        Ok(self.document.first("rating", RATING_VALUE)?.text_content())
    }

    pub fn votes(&self) -> ExtractResult<String> {
        if self.is_unrated()? {
            return Ok(NOT_AVAILABLE.to_string());
        }
        votes_from(&self.rating_trailing_text("votes")?)
    }

    /// Unrated pages only show `(N have, M want)` in the ratings block itself.
    pub fn have(&self) -> ExtractResult<String> {
        if self.is_unrated()? {
            return have_from(self.ratings_section()?);
        }
        have_from(&self.rating_trailing_text("have")?)
    }

    pub fn want(&self) -> ExtractResult<String> {
        if self.is_unrated()? {
            return want_from(self.ratings_section()?);
        }
        want_from(&self.rating_trailing_text("want")?)
    }

    /// 1 when the format line mentions a limited edition, else 0.
    pub fn limited_edition(&self) -> ExtractResult<u8> {
        Ok(u8::from(is_limited_edition(self.release_info()?)))
    }

    pub fn release_format(&self) -> ExtractResult<String> {
        release_format_from(self.release_info()?)
    }

    pub fn media_condition(&self) -> ExtractResult<String> {
        self.document
            .first_containing("media_condition", CONDITION_LABEL, "Media:")?
            .next_sibling_tagged("span")
            .map(|node| collapse_whitespace(&node.text_content()))
            .ok_or_else(|| {
                ExtractError::shape_mismatch("media_condition", "strong:contains('Media:') ~ span")
            })
    }

    /// Sleeve grade, or `"N/A"` for items sold without one.
    pub fn sleeve_condition(&self) -> ExtractResult<String> {
        let label = match self
            .document
            .first_containing("sleeve_condition", CONDITION_LABEL, "Sleeve:")
        {
            Ok(label) => label,
            Err(e) if e.is_shape_mismatch() => return Ok(NOT_AVAILABLE.to_string()),
            Err(e) => return Err(e),
        };

        label
            .next_text()
            .map(|text| text.trim().to_string())
            .ok_or_else(|| {
                ExtractError::shape_mismatch("sleeve_condition", "strong:contains('Sleeve:') + text")
            })
    }

    pub fn release_page_url(&self) -> ExtractResult<String> {
        let href = self
            .document
            .first("release_page_url", RELEASE_PAGE_LINK)?
            .attribute("href")
            .ok_or_else(|| {
                ExtractError::shape_mismatch("release_page_url", "a.release-page[href]")
            })?;
        absolute_url(SITE_ORIGIN, &href)
    }

    /// Every field at once; fails on the first field that fails.
    pub fn record(&self) -> ExtractResult<ListingRecord> {
        Ok(ListingRecord {
            artist: self.artist()?,
            title: self.title()?,
            label: self.label()?,
            number_of_tracks: self.number_of_tracks()?,
            release_date: self.release_date()?,
            price: self.price()?,
            rating: self.rating()?,
            votes: self.votes()?,
            have: self.have()?,
            want: self.want()?,
            limited_edition: self.limited_edition()?,
            release_format: self.release_format()?,
            media_condition: self.media_condition()?,
            sleeve_condition: self.sleeve_condition()?,
            release_page_url: self.release_page_url()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_html;

    const RATED_LISTING: &str = r#"
    <html>
    <body>
        <div class="profile">
            <h1><span><span><a href="/artist/45-Aphex-Twin">Aphex Twin</a></span></span> – <span> Drukqs </span></h1>
            <div class="head">Label:</div>
            <div class="content">
                Warp Records –
                WARPLP92
            </div>
            <div class="head">Format:</div>
            <div class="content">
                Vinyl, 12",
                Limited Edition, Album
            </div>
            <div class="head">Released:</div>
            <div class="content"> 22 Oct
                2001 </div>
        </div>
        <table class="playlist">
            <tr class="tracklist_track"><td>Jynweythek</td></tr>
            <tr class="tracklist_track"><td>Vordhosbn</td></tr>
            <tr class="tracklist_track"><td>Kladfvgbung Micshk</td></tr>
        </table>
        <span class="price">€24.99</span>
        <p class="item_condition"><strong>Media:</strong> <span> Near Mint
            (NM or M-) </span><br><strong>Sleeve:</strong> Very Good Plus (VG+) </p>
        <div class="release_info_buttons"><div><span class="rating_value_sm">4.5</span> (out of 5) of 12 votes, (7 have, 9 want)</div></div>
        <a class="release-page" href="/release/123-Aphex-Twin-Drukqs">Release page</a>
    </body>
    </html>
    "#;

    const UNRATED_LISTING: &str = r#"
    <html>
    <body>
        <div class="profile">
            <h1><span><span><a>Boards of Canada</a></span></span> – <span>Twoism</span></h1>
            <div class="head">Format:</div>
            <div class="content">Vinyl, LP, Album</div>
        </div>
        <p class="item_condition"><strong>Media:</strong> <span>Mint (M)</span></p>
        <div class="release_info_buttons"><div>No Rating Yet (3 have, 5 want)</div></div>
    </body>
    </html>
    "#;

    #[test]
    fn test_rated_listing_fields() {
        let doc = parse_html(RATED_LISTING);
        let listing = ListingFieldExtractor::new(&doc);

        assert!(listing.item_exists());
        assert_eq!(listing.artist().unwrap(), "Aphex Twin");
        assert_eq!(listing.title().unwrap(), "Drukqs");
        assert_eq!(listing.label().unwrap(), "Warp Records – WARPLP92");
        assert_eq!(listing.number_of_tracks().unwrap(), 3);
        assert_eq!(listing.release_date().unwrap(), "22 Oct 2001");
        assert_eq!(listing.price().unwrap(), "24.99");
        assert_eq!(listing.rating().unwrap(), "4.5");
        assert_eq!(listing.votes().unwrap(), "12");
        assert_eq!(listing.have().unwrap(), "7");
        assert_eq!(listing.want().unwrap(), "9");
        assert_eq!(listing.limited_edition().unwrap(), 1);
        assert_eq!(listing.release_format().unwrap(), "12\"");
        assert_eq!(listing.media_condition().unwrap(), "Near Mint (NM or M-)");
        assert_eq!(listing.sleeve_condition().unwrap(), "Very Good Plus (VG+)");
        assert_eq!(
            listing.release_page_url().unwrap(),
            "https://discogs.com/release/123-Aphex-Twin-Drukqs"
        );
    }

    #[test]
    fn test_unrated_listing_reads_counts_from_ratings_block() {
        let doc = parse_html(UNRATED_LISTING);
        let listing = ListingFieldExtractor::new(&doc);

        assert_eq!(listing.rating().unwrap(), "N/A");
        assert_eq!(listing.votes().unwrap(), "N/A");
        assert_eq!(listing.have().unwrap(), "3");
        assert_eq!(listing.want().unwrap(), "5");
        assert_eq!(listing.limited_edition().unwrap(), 0);
        assert_eq!(listing.release_format().unwrap(), "LP");
        assert_eq!(listing.sleeve_condition().unwrap(), "N/A");
        assert_eq!(listing.number_of_tracks().unwrap(), 0);
    }

    #[test]
    fn test_missing_nodes_are_shape_mismatches() {
        let doc = parse_html(UNRATED_LISTING);
        let listing = ListingFieldExtractor::new(&doc);

        assert!(listing.label().unwrap_err().is_shape_mismatch());
        assert!(listing.release_date().unwrap_err().is_shape_mismatch());
        assert!(listing.price().unwrap_err().is_shape_mismatch());
        assert!(listing.release_page_url().unwrap_err().is_shape_mismatch());
        assert!(listing.record().unwrap_err().is_shape_mismatch());
    }

    #[test]
    fn test_page_without_marketplace_buttons() {
        let doc = parse_html("<html><body><div class=\"profile\"></div></body></html>");
        let listing = ListingFieldExtractor::new(&doc);

        assert!(!listing.item_exists());
        for result in [
            listing.rating(),
            listing.votes(),
            listing.have(),
            listing.want(),
            listing.release_format(),
        ] {
            assert!(result.unwrap_err().is_shape_mismatch());
        }
        assert!(listing.limited_edition().unwrap_err().is_shape_mismatch());
        assert!(listing.artist().unwrap_err().is_shape_mismatch());
    }

    #[test]
    fn test_rated_block_with_unexpected_text_is_pattern_mismatch() {
        let html = r#"
        <div class="release_info_buttons"><div><span class="rating_value_sm">4.5</span> ratings hidden</div></div>
        "#;
        let doc = parse_html(html);
        let listing = ListingFieldExtractor::new(&doc);

        assert_eq!(listing.rating().unwrap(), "4.5");
        assert!(listing.votes().unwrap_err().is_pattern_mismatch());
        assert!(listing.have().unwrap_err().is_pattern_mismatch());
        assert!(listing.want().unwrap_err().is_pattern_mismatch());
        assert!(listing.release_format().unwrap_err().is_shape_mismatch());
    }

    #[test]
    fn test_repeated_reads_are_identical() {
        let doc = parse_html(RATED_LISTING);
        let first = ListingFieldExtractor::new(&doc);
        let second = ListingFieldExtractor::new(&doc);

        assert_eq!(first.want().unwrap(), first.want().unwrap());
        assert_eq!(first.record().unwrap(), second.record().unwrap());
    }
}
