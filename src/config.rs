//! Extractor configuration
//!
//! Site origins are fixed. The only tunable is how soft-failing fields react
//! to an extraction error.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ExtractResult;

/// Origin used for release and master links.
pub const SITE_ORIGIN: &str = "https://discogs.com";

/// Origin used by marketplace search pages and their item links.
pub const SEARCH_ORIGIN: &str = "https://www.discogs.com";

/// Placeholder for a field that failed under [`FailurePolicy::Sentinel`].
pub const UNAVAILABLE: &str = "unavailable";

/// Placeholder for a field the page intentionally does not carry.
pub const NOT_AVAILABLE: &str = "N/A";

/// What a soft-failing accessor does when extraction fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Propagate the error to the caller.
    Raise,
    /// Log the error and return [`UNAVAILABLE`].
    Sentinel,
}

impl FailurePolicy {
    pub fn apply(self, field: &str, result: ExtractResult<String>) -> ExtractResult<String> {
        match (self, result) {
            (_, Ok(value)) => Ok(value),
            (Self::Raise, Err(e)) => Err(e),
            (Self::Sentinel, Err(e)) => {
                warn!("{} could not be scraped, using '{}': {}", field, UNAVAILABLE, e);
                Ok(UNAVAILABLE.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Policy for the search-page price, the one field that historically
    /// never raised.
    #[serde(default = "default_price_failure")]
    pub price_failure: FailurePolicy,
}

fn default_price_failure() -> FailurePolicy {
    FailurePolicy::Sentinel
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            price_failure: default_price_failure(),
        }
    }
}

impl ExtractorConfig {
    /// Every field raises, price included.
    pub fn strict() -> Self {
        Self {
            price_failure: FailurePolicy::Raise,
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;

    #[test]
    fn test_policy_apply() {
        let err = || Err(ExtractError::shape_mismatch("price", "span.price"));

        assert_eq!(
            FailurePolicy::Sentinel.apply("price", err()).unwrap(),
            UNAVAILABLE
        );
        assert!(FailurePolicy::Raise
            .apply("price", err())
            .unwrap_err()
            .is_shape_mismatch());
        assert_eq!(
            FailurePolicy::Raise.apply("price", Ok("12.00".into())).unwrap(),
            "12.00"
        );
    }

    #[test]
    fn test_config_from_json() {
        let config = ExtractorConfig::from_json(r#"{"price_failure": "raise"}"#).unwrap();
        assert_eq!(config, ExtractorConfig::strict());

        let config = ExtractorConfig::from_json("{}").unwrap();
        assert_eq!(config.price_failure, FailurePolicy::Sentinel);

        assert!(ExtractorConfig::from_json(r#"{"price_failure": "ignore"}"#).is_err());
    }
}
