//! Field extractors for the two page layouts
//!
//! Each extractor borrows a parsed document and exposes one accessor per field.

mod listing;
pub mod patterns;
mod search_result;

pub use listing::*;
pub use search_result::*;

use crate::error::{ExtractError, ExtractResult};

/// Resolve a site-relative href against a fixed origin.
pub(crate) fn absolute_url(origin: &str, href: &str) -> ExtractResult<String> {
    let base = url::Url::parse(origin).map_err(|source| ExtractError::InvalidUrl {
        url: origin.to_string(),
        source,
    })?;

    base.join(href.trim())
        .map(|absolute| absolute.to_string())
        .map_err(|source| ExtractError::InvalidUrl {
            url: href.to_string(),
            source,
        })
}
