// Moderation thresholds and the category price ceiling table.
//
// Everything the rule engine compares against is injected through
// ModerationConfig so tests can move the boundaries.

use super::moderation_service::ModerationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Maximum plausible price per listing category.
pub const DEFAULT_PRICE_CEILINGS: &[(&str, i64)] = &[
    ("디지털/가전", 10_000_000),
    ("가구/인테리어", 5_000_000),
    ("생활/주방", 2_000_000),
    ("의류", 1_000_000),
    ("잡화", 1_000_000),
    ("도서", 500_000),
    ("스포츠/레저", 3_000_000),
    ("취미/게임", 2_000_000),
    ("뷰티/미용", 1_000_000),
    ("반려동물용품", 1_000_000),
    ("티켓/교환권", 1_000_000),
    ("기타", 1_000_000),
];

/// Configuration for listing moderation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationConfig {
    /// Prices strictly below this are flagged
    pub min_price: i64,
    /// Ceiling for categories missing from `price_ceilings`
    pub default_price_ceiling: i64,
    /// Category name -> maximum price
    pub price_ceilings: BTreeMap<String, i64>,
    /// Distinct suspicious matches needed to flag a listing
    pub suspicious_match_threshold: usize,
    /// Titles with fewer characters are flagged
    pub min_title_chars: usize,
    /// Descriptions with fewer characters are flagged
    pub min_description_chars: usize,
    /// Longest word an admin may add to a list
    pub max_word_chars: usize,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            min_price: 100,
            default_price_ceiling: 5_000_000,
            price_ceilings: DEFAULT_PRICE_CEILINGS
                .iter()
                .map(|(category, ceiling)| (category.to_string(), *ceiling))
                .collect(),
            suspicious_match_threshold: 3,
            min_title_chars: 5,
            min_description_chars: 10,
            max_word_chars: 50,
        }
    }
}

impl ModerationConfig {
    /// Ceiling for a category, falling back to the default.
    pub fn price_ceiling(&self, category: &str) -> i64 {
        self.price_ceilings
            .get(category)
            .copied()
            .unwrap_or(self.default_price_ceiling)
    }

    /// Defaults overridden by any `MODERATION_*` environment variables.
    pub fn from_env() -> Result<Self, ModerationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ModerationError> {
        let mut config = Self::default();

        override_with(&lookup, "MODERATION_MIN_PRICE", &mut config.min_price)?;
        override_with(
            &lookup,
            "MODERATION_DEFAULT_PRICE_CEILING",
            &mut config.default_price_ceiling,
        )?;
        override_with(
            &lookup,
            "MODERATION_SUSPICIOUS_THRESHOLD",
            &mut config.suspicious_match_threshold,
        )?;
        override_with(&lookup, "MODERATION_MIN_TITLE_CHARS", &mut config.min_title_chars)?;
        override_with(
            &lookup,
            "MODERATION_MIN_DESCRIPTION_CHARS",
            &mut config.min_description_chars,
        )?;
        override_with(&lookup, "MODERATION_MAX_WORD_CHARS", &mut config.max_word_chars)?;

        if let Some(raw) = lookup("MODERATION_PRICE_CEILINGS") {
            // JSON object, e.g. {"도서": 300000}; merged over the defaults
            let extra: BTreeMap<String, i64> = serde_json::from_str(&raw).map_err(|e| {
                ModerationError::Config(format!("MODERATION_PRICE_CEILINGS: {}", e))
            })?;
            config.price_ceilings.extend(extra);
        }

        if config.suspicious_match_threshold == 0 {
            return Err(ModerationError::Config(
                "MODERATION_SUSPICIOUS_THRESHOLD must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }
}

fn override_with<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    target: &mut T,
) -> Result<(), ModerationError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if let Some(raw) = lookup(key) {
        *target = raw
            .trim()
            .parse()
            .map_err(|e| ModerationError::Config(format!("{}: {}", key, e)))?;
        tracing::info!(key, value = raw.trim(), "Moderation setting overridden");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_ceiling_lookup() {
        let config = ModerationConfig::default();
        assert_eq!(config.price_ceiling("디지털/가전"), 10_000_000);
        assert_eq!(config.price_ceiling("도서"), 500_000);
        assert_eq!(config.price_ceiling("없는 카테고리"), 5_000_000);
    }

    #[test]
    fn test_env_overrides() {
        let config = ModerationConfig::from_lookup(lookup_from(&[
            ("MODERATION_MIN_PRICE", "1000"),
            ("MODERATION_SUSPICIOUS_THRESHOLD", " 2 "),
            ("MODERATION_PRICE_CEILINGS", r#"{"도서": 300000, "자동차": 90000000}"#),
        ]))
        .unwrap();

        assert_eq!(config.min_price, 1000);
        assert_eq!(config.suspicious_match_threshold, 2);
        assert_eq!(config.price_ceiling("도서"), 300_000);
        assert_eq!(config.price_ceiling("자동차"), 90_000_000);
        // Untouched values keep their defaults
        assert_eq!(config.min_title_chars, 5);
        assert_eq!(config.price_ceiling("의류"), 1_000_000);
    }

    #[test]
    fn test_invalid_env_value_is_config_error() {
        let result =
            ModerationConfig::from_lookup(lookup_from(&[("MODERATION_MIN_PRICE", "cheap")]));
        assert!(matches!(result, Err(ModerationError::Config(_))));

        let result = ModerationConfig::from_lookup(lookup_from(&[(
            "MODERATION_SUSPICIOUS_THRESHOLD",
            "0",
        )]));
        assert!(matches!(result, Err(ModerationError::Config(_))));
    }
}
