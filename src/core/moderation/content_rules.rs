// Listing rule evaluation.
//
// Pure and synchronous: takes a listing and a word snapshot, returns a
// verdict. No I/O and no failure path, since it runs inline on every
// listing submission.

use super::moderation_config::ModerationConfig;
use super::moderation_models::{ListingDraft, ModerationVerdict, ReviewFlag};
use super::moderation_service::ModerationError;
use super::word_cache::WordSnapshot;
use regex::Regex;

/// Korean mobile number: 01X, then 3-4 digits, then 4 digits, optional separators.
const PHONE_PATTERN: &str = r"01[0-9][-.\s]?[0-9]{3,4}[-.\s]?[0-9]{4}";

/// KakaoTalk mention followed by a handle, e.g. "카톡 abc123" or "카카오 id: my_id".
/// Applied to lower-cased text.
const MESSENGER_PATTERN: &str =
    r"(?:카카오톡|카카오|카톡|kakaotalk|kakao)\s*(?:id|아이디|톡)?\s*[:：]?\s*[a-z0-9_]+";

/// Compiled rule set.
#[derive(Debug, Clone)]
pub struct ContentRules {
    config: ModerationConfig,
    phone: Regex,
    messenger: Regex,
}

impl ContentRules {
    pub fn new(config: ModerationConfig) -> Result<Self, ModerationError> {
        let phone = Regex::new(PHONE_PATTERN)
            .map_err(|e| ModerationError::Config(format!("phone pattern: {}", e)))?;
        let messenger = Regex::new(MESSENGER_PATTERN)
            .map_err(|e| ModerationError::Config(format!("messenger pattern: {}", e)))?;

        Ok(Self {
            config,
            phone,
            messenger,
        })
    }

    pub fn config(&self) -> &ModerationConfig {
        &self.config
    }

    /// Run every check against the listing; checks never short-circuit.
    pub fn evaluate(&self, listing: &ListingDraft, words: &WordSnapshot) -> ModerationVerdict {
        let text = format!("{} {}", listing.title, listing.description).to_lowercase();
        let mut verdict = ModerationVerdict::clean();

        let banned = find_matches(&text, &words.banned);
        if !banned.is_empty() {
            verdict.push(
                ReviewFlag::BannedWords,
                format!("contains banned words: {}", banned.join(", ")),
            );
        }

        let suspicious = find_matches(&text, &words.suspicious);
        if suspicious.len() >= self.config.suspicious_match_threshold {
            verdict.push(
                ReviewFlag::SuspiciousWords,
                format!("contains multiple suspicious words: {}", suspicious.join(", ")),
            );
        }

        let ceiling = self.config.price_ceiling(&listing.category);
        if listing.price > ceiling {
            verdict.push(
                ReviewFlag::PriceAboveCeiling,
                format!(
                    "price {} exceeds the {} ceiling for category '{}'",
                    listing.price, ceiling, listing.category
                ),
            );
        }

        if listing.price < self.config.min_price {
            verdict.push(
                ReviewFlag::PriceBelowFloor,
                format!(
                    "abnormally low price: {} (minimum {})",
                    listing.price, self.config.min_price
                ),
            );
        }

        let title_chars = listing.title.chars().count();
        if title_chars < self.config.min_title_chars {
            verdict.push(
                ReviewFlag::TitleTooShort,
                format!(
                    "title too short: {} characters (minimum {})",
                    title_chars, self.config.min_title_chars
                ),
            );
        }

        let description_chars = listing.description.chars().count();
        if description_chars < self.config.min_description_chars {
            verdict.push(
                ReviewFlag::DescriptionTooShort,
                format!(
                    "description too short: {} characters (minimum {})",
                    description_chars, self.config.min_description_chars
                ),
            );
        }

        if self.phone.is_match(&text) {
            verdict.push(
                ReviewFlag::PhoneNumber,
                "possible phone number in listing text".to_string(),
            );
        }

        if self.messenger.is_match(&text) {
            verdict.push(
                ReviewFlag::MessengerId,
                "possible messenger ID in listing text".to_string(),
            );
        }

        verdict
    }
}

/// Distinct words that occur anywhere in `text`, in list order.
/// Plain substring search: no word boundaries.
fn find_matches<'a>(text: &str, words: &'a [String]) -> Vec<&'a str> {
    let mut matches: Vec<&str> = Vec::new();
    for word in words {
        if word.is_empty() || matches.contains(&word.as_str()) {
            continue;
        }
        if text.contains(word.as_str()) {
            matches.push(word);
        }
    }
    matches
}
