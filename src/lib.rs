//! Discogs page field extraction
//!
//! Pulls structured fields out of already-parsed Discogs pages:
//! - Marketplace item pages (artist, grading, rating counts, format)
//! - Master release pages reached from search results
//! - Marketplace search pages (result totals, item links, page URLs)

pub mod config;
pub mod document;
pub mod error;
pub mod extractors;
pub mod marketplace_search;
pub mod record;

pub use config::*;
pub use document::*;
pub use error::*;
pub use extractors::*;
pub use marketplace_search::*;
pub use record::*;
