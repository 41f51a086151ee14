//! Marketplace search pages
//!
//! Builds the paginated search URLs for a style/year/country query and reads
//! the result count and item links back out of a fetched results page.
//! Fetching itself is up to the caller.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SEARCH_ORIGIN;
use crate::document::{DocumentNode, ParsedDocument};
use crate::error::{ExtractError, ExtractResult};
use crate::extractors::absolute_url;
use crate::extractors::patterns::pagination_total_from;

/// Only vinyl listings are searched.
pub const FORMAT: &str = "Vinyl";

/// Largest page size the search endpoint accepts.
pub const MAX_ITEMS_PER_PAGE: usize = 250;

const PAGE_SIZES: [usize; 4] = [25, 50, 100, MAX_ITEMS_PER_PAGE];

const PAGINATION_TOTAL: &str = "strong.pagination_total";
const RESULT_LINK: &str = "a.search_result_title";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub style: String,
    pub year: u16,
    /// Country the seller ships from, as the site spells it.
    pub country: String,
    pub items_to_scrape: usize,
}

impl SearchQuery {
    pub fn new(
        style: &str,
        year: u16,
        country: &str,
        items_to_scrape: usize,
    ) -> ExtractResult<Self> {
        if style.trim().is_empty() {
            return Err(ExtractError::InvalidQuery {
                reason: "style must not be empty".to_string(),
            });
        }
        if items_to_scrape == 0 {
            return Err(ExtractError::InvalidQuery {
                reason: "at least one item must be requested".to_string(),
            });
        }

        Ok(Self {
            style: style.to_string(),
            year,
            country: country.to_string(),
            items_to_scrape,
        })
    }

    /// Smallest page size that holds every requested item.
    pub fn items_per_page(&self) -> usize {
        PAGE_SIZES
            .into_iter()
            .find(|&size| size >= self.items_to_scrape)
            .unwrap_or(MAX_ITEMS_PER_PAGE)
    }

    pub fn pages_to_scrape(&self) -> usize {
        if self.items_to_scrape >= MAX_ITEMS_PER_PAGE {
            self.items_to_scrape / MAX_ITEMS_PER_PAGE + 1
        } else {
            1
        }
    }

    /// Style as the `style_exact` parameter expects it: title case, `+` for spaces.
    pub fn style_param(&self) -> String {
        title_case(&self.style).replace(' ', "+")
    }

    /// URL of the 1-based results `page`.
    pub fn page_url(&self, page: usize) -> String {
        format!(
            "{SEARCH_ORIGIN}/search/?type=all&limit={}&format_exact={FORMAT}&style_exact={}&ships_from={}&year={}&page={}",
            self.items_per_page(),
            self.style_param(),
            self.country,
            self.year,
            page
        )
    }

    pub fn page_urls(&self) -> Vec<String> {
        (1..=self.pages_to_scrape()).map(|page| self.page_url(page)).collect()
    }

    /// Rejects queries asking for more items than the marketplace lists.
    pub fn validate_against(&self, max_items: usize) -> ExtractResult<()> {
        debug!(
            "Given the current filtering there are {} possible releases to retrieve",
            max_items
        );
        if self.items_to_scrape > max_items {
            return Err(ExtractError::InvalidQuery {
                reason: format!(
                    "{} items is more than actually available in the marketplace",
                    self.items_to_scrape
                ),
            });
        }
        Ok(())
    }

    /// Keep only as many links as were asked for.
    pub fn take_items(&self, links: Vec<String>) -> Vec<String> {
        links.into_iter().take(self.items_to_scrape).collect()
    }
}

/// Capitalise the first letter of every word, lowercase the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Total number of results reported by a search page.
pub fn pagination_total<D: ParsedDocument>(document: &D) -> ExtractResult<usize> {
    let node = document.first("pagination_total", PAGINATION_TOTAL)?;
    pagination_total_from(&node.text_content())
}

/// Absolute item URLs of every result on a search page, in page order.
pub fn item_links<D: ParsedDocument>(document: &D) -> ExtractResult<Vec<String>> {
    document
        .query(RESULT_LINK)?
        .into_iter()
        .map(|link| {
            let href = link.attribute("href").ok_or_else(|| {
                ExtractError::shape_mismatch("item_links", "a.search_result_title[href]")
            })?;
            absolute_url(SEARCH_ORIGIN, &href)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_html;

    const RESULTS_PAGE: &str = r#"
    <html>
    <body>
        <div class="pagination"><strong class="pagination_total">
            1 – 25 of 1,204
        </strong></div>
        <ul>
            <li><a class="search_result_title" href="/sell/item/1001">Drukqs</a></li>
            <li><a class="search_result_title" href="/sell/item/1002">Selected Ambient Works 85-92</a></li>
            <li><a class="search_result_title" href="/sell/item/1003">Syro</a></li>
        </ul>
    </body>
    </html>
    "#;

    #[test]
    fn test_page_size_and_count() {
        let query = |n| SearchQuery::new("techno", 2001, "Germany", n).unwrap();

        assert_eq!(query(1).items_per_page(), 25);
        assert_eq!(query(25).items_per_page(), 25);
        assert_eq!(query(26).items_per_page(), 50);
        assert_eq!(query(101).items_per_page(), 250);
        assert_eq!(query(600).items_per_page(), 250);

        assert_eq!(query(249).pages_to_scrape(), 1);
        assert_eq!(query(250).pages_to_scrape(), 2);
        assert_eq!(query(600).pages_to_scrape(), 3);
    }

    #[test]
    fn test_page_url() {
        let query = SearchQuery::new("drum n bass", 1999, "UK", 60).unwrap();
        assert_eq!(query.style_param(), "Drum+N+Bass");
        assert_eq!(
            query.page_url(1),
            "https://www.discogs.com/search/?type=all&limit=100&format_exact=Vinyl&style_exact=Drum+N+Bass&ships_from=UK&year=1999&page=1"
        );
        assert_eq!(query.page_urls().len(), 1);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("hIP-hop"), "Hip-Hop");
        assert_eq!(title_case("deep house"), "Deep House");
    }

    #[test]
    fn test_invalid_queries() {
        assert!(matches!(
            SearchQuery::new(" ", 2001, "Germany", 10),
            Err(ExtractError::InvalidQuery { .. })
        ));
        assert!(SearchQuery::new("techno", 2001, "Germany", 0).is_err());

        let query = SearchQuery::new("techno", 2001, "Germany", 500).unwrap();
        assert!(query.validate_against(1204).is_ok());
        assert!(matches!(
            query.validate_against(499),
            Err(ExtractError::InvalidQuery { .. })
        ));
    }

    #[test]
    fn test_results_page() {
        let doc = parse_html(RESULTS_PAGE);
        assert_eq!(pagination_total(&doc).unwrap(), 1204);

        let links = item_links(&doc).unwrap();
        assert_eq!(
            links,
            vec![
                "https://www.discogs.com/sell/item/1001",
                "https://www.discogs.com/sell/item/1002",
                "https://www.discogs.com/sell/item/1003",
            ]
        );

        let query = SearchQuery::new("techno", 2001, "Germany", 2).unwrap();
        assert_eq!(query.take_items(links).len(), 2);
    }

    #[test]
    fn test_results_page_without_total() {
        let doc = parse_html("<html><body></body></html>");
        assert!(pagination_total(&doc).unwrap_err().is_shape_mismatch());
        assert!(item_links(&doc).unwrap().is_empty());
    }
}
