//! Text rules applied to extracted node text
//!
//! One function per rule so a format change on the site breaks exactly one
//! test. Update the regex here and add the new sample to the tests below.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ExtractError, ExtractResult};

static VOTES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"of (\S+) votes").unwrap());

static HAVE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\((\S+) have").unwrap());

static WANT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r", (\S+) want").unwrap());

static VINYL_FORMAT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Vinyl, (.*)").unwrap());

static PAGINATION_TOTAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"of (.*)").unwrap());

/// Join all whitespace-separated words with single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn strip_currency(text: &str) -> String {
    text.replace('€', "").trim().to_string()
}

/// Literal `\xa` left behind by a mangled non-breaking space.
pub fn strip_byte_artifact(text: &str) -> String {
    text.replace("\\xa", "")
}

fn capture(field: &str, re: &Regex, text: &str) -> ExtractResult<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ExtractError::pattern_mismatch(field, re.as_str(), text))
}

/// `"... of 12 votes"` -> `"12"`
pub fn votes_from(text: &str) -> ExtractResult<String> {
    capture("votes", &VOTES, text)
}

/// `"(7 have, 9 want)"` -> `"7"`
pub fn have_from(text: &str) -> ExtractResult<String> {
    capture("have", &HAVE, text)
}

/// `"(7 have, 9 want)"` -> `"9"`
pub fn want_from(text: &str) -> ExtractResult<String> {
    capture("want", &WANT, text)
}

pub fn is_limited_edition(release_info: &str) -> bool {
    release_info.contains("Limited Edition")
}

/// First descriptor after `Vinyl, `, without its trailing comma.
pub fn release_format_from(release_info: &str) -> ExtractResult<String> {
    let rest = capture("release_format", &VINYL_FORMAT, release_info)?;
    rest.split_whitespace()
        .next()
        .map(|token| token.replace(',', ""))
        .ok_or_else(|| {
            ExtractError::pattern_mismatch("release_format", VINYL_FORMAT.as_str(), release_info)
        })
}

/// `"[m12345]"` -> `"12345"`
pub fn master_id_from(button_text: &str) -> String {
    button_text
        .replace(['[', ']'], "")
        .replace('m', "")
        .trim()
        .to_string()
}

/// `"1 – 250 of 12,345"` -> `12345`
pub fn pagination_total_from(text: &str) -> ExtractResult<usize> {
    let total = capture("pagination_total", &PAGINATION_TOTAL, text.trim())?.replace(',', "");
    total
        .trim()
        .parse()
        .map_err(|e| ExtractError::parse_error("pagination_total", &total, e))
}

pub fn parse_count(field: &str, text: &str) -> ExtractResult<u32> {
    text.trim()
        .parse()
        .map_err(|e| ExtractError::parse_error(field, text, e))
}
