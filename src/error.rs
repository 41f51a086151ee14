//! Extraction error types
//!
//! Every accessor reports which field failed and why, so callers can tell a
//! layout change apart from a text format change.

use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// Expected node is absent: page layout drift or the wrong page type.
    #[error("document shape mismatch: '{field}' not found via selector '{selector}'")]
    ShapeMismatch { field: String, selector: String },

    /// A regex expected to match the extracted text did not.
    #[error("pattern mismatch: '{field}' did not match /{pattern}/ in {text:?}")]
    PatternMismatch {
        field: String,
        pattern: String,
        text: String,
    },

    #[error("parse error: '{field}' is not numeric ({text:?}): {source}")]
    ParseError {
        field: String,
        text: String,
        source: ParseIntError,
    },

    #[error("invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("invalid URL: {url} - {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("invalid search query: {reason}")]
    InvalidQuery { reason: String },
}

pub type ExtractResult<T> = Result<T, ExtractError>;

impl ExtractError {
    pub fn shape_mismatch(field: &str, selector: &str) -> Self {
        Self::ShapeMismatch {
            field: field.to_string(),
            selector: selector.to_string(),
        }
    }

    pub fn pattern_mismatch(field: &str, pattern: &str, text: &str) -> Self {
        Self::PatternMismatch {
            field: field.to_string(),
            pattern: pattern.to_string(),
            text: text.to_string(),
        }
    }

    pub fn parse_error(field: &str, text: &str, source: ParseIntError) -> Self {
        Self::ParseError {
            field: field.to_string(),
            text: text.to_string(),
            source,
        }
    }

    /// True when the page simply lacks the node (as opposed to text drift).
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, Self::ShapeMismatch { .. })
    }

    pub fn is_pattern_mismatch(&self) -> bool {
        matches!(self, Self::PatternMismatch { .. })
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError { .. })
    }
}
