// Moderation domain models - data structures for listing risk scoring.
//
// These are pure domain types with no storage or transport dependencies.
// Category keys live here; their display labels live in category_labels.rs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which of the two independent word collections an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordList {
    /// A single match is enough to flag a listing
    Banned,
    /// Only flags a listing when several co-occur
    Suspicious,
}

impl WordList {
    pub fn as_str(&self) -> &'static str {
        match self {
            WordList::Banned => "banned",
            WordList::Suspicious => "suspicious",
        }
    }

    /// Machine keys of every category valid for this list.
    pub fn category_keys(&self) -> Vec<&'static str> {
        match self {
            WordList::Banned => BannedCategory::all().iter().map(|c| c.as_str()).collect(),
            WordList::Suspicious => SuspiciousCategory::all()
                .iter()
                .map(|c| c.as_str())
                .collect(),
        }
    }

    /// Whether `key` belongs to this list's category enumeration.
    pub fn accepts_category(&self, key: &str) -> bool {
        match self {
            WordList::Banned => BannedCategory::parse(key).is_some(),
            WordList::Suspicious => SuspiciousCategory::parse(key).is_some(),
        }
    }
}

impl std::fmt::Display for WordList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categories for banned words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BannedCategory {
    Illegal,
    Adult,
    Weapon,
    PersonalInfo,
    IllegalService,
    Medicine,
}

impl BannedCategory {
    /// Convert to the key used in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            BannedCategory::Illegal => "ILLEGAL",
            BannedCategory::Adult => "ADULT",
            BannedCategory::Weapon => "WEAPON",
            BannedCategory::PersonalInfo => "PERSONAL_INFO",
            BannedCategory::IllegalService => "ILLEGAL_SERVICE",
            BannedCategory::Medicine => "MEDICINE",
        }
    }

    /// Parse a category from its storage key.
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.as_str() == s)
    }

    pub fn all() -> Vec<BannedCategory> {
        vec![
            BannedCategory::Illegal,
            BannedCategory::Adult,
            BannedCategory::Weapon,
            BannedCategory::PersonalInfo,
            BannedCategory::IllegalService,
            BannedCategory::Medicine,
        ]
    }
}

/// Categories for suspicious words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuspiciousCategory {
    UrgentSale,
    Payment,
    Contact,
    Claim,
}

impl SuspiciousCategory {
    /// Convert to the key used in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            SuspiciousCategory::UrgentSale => "URGENT_SALE",
            SuspiciousCategory::Payment => "PAYMENT",
            SuspiciousCategory::Contact => "CONTACT",
            SuspiciousCategory::Claim => "CLAIM",
        }
    }

    /// Parse a category from its storage key.
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.as_str() == s)
    }

    pub fn all() -> Vec<SuspiciousCategory> {
        vec![
            SuspiciousCategory::UrgentSale,
            SuspiciousCategory::Payment,
            SuspiciousCategory::Contact,
            SuspiciousCategory::Claim,
        ]
    }
}

/// A stored word in either list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    pub id: i64,
    /// Trimmed, original casing
    pub word: String,
    /// Category storage key
    pub category: String,
    /// Administrator who added the word, if any
    pub created_by: Option<u64>,
    pub created_at: DateTime<Utc>,
}

/// A word about to be inserted into a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWord {
    pub word: String,
    pub category: String,
    #[serde(default)]
    pub created_by: Option<u64>,
}

impl NewWord {
    pub fn new(word: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            category: category.into(),
            created_by: None,
        }
    }
}

/// The listing fields inspected before a listing goes public.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: i64,
    #[serde(default)]
    pub category: String,
}

impl ListingDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: i64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            price,
            category: category.into(),
        }
    }
}

/// Machine-readable kind of a triggered rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewFlag {
    BannedWords,
    SuspiciousWords,
    PriceAboveCeiling,
    PriceBelowFloor,
    TitleTooShort,
    DescriptionTooShort,
    PhoneNumber,
    MessengerId,
}

impl std::fmt::Display for ReviewFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewFlag::BannedWords => write!(f, "Banned Words"),
            ReviewFlag::SuspiciousWords => write!(f, "Suspicious Words"),
            ReviewFlag::PriceAboveCeiling => write!(f, "Price Above Ceiling"),
            ReviewFlag::PriceBelowFloor => write!(f, "Price Below Floor"),
            ReviewFlag::TitleTooShort => write!(f, "Title Too Short"),
            ReviewFlag::DescriptionTooShort => write!(f, "Description Too Short"),
            ReviewFlag::PhoneNumber => write!(f, "Phone Number"),
            ReviewFlag::MessengerId => write!(f, "Messenger ID"),
        }
    }
}

/// Lifecycle state a listing enters after evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingStatus {
    ForSale,
    PendingReview,
}

/// Result of evaluating one listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModerationVerdict {
    /// Whether a human has to approve the listing
    pub needs_review: bool,
    /// Human-readable explanations, in rule order
    pub reasons: Vec<String>,
    /// Kind of each reason, same order as `reasons`
    pub flags: Vec<ReviewFlag>,
}

impl ModerationVerdict {
    /// A verdict with nothing triggered.
    pub fn clean() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, flag: ReviewFlag, reason: String) {
        self.flags.push(flag);
        self.reasons.push(reason);
        self.needs_review = true;
    }

    pub fn has_flag(&self, flag: ReviewFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn listing_status(&self) -> ListingStatus {
        if self.needs_review {
            ListingStatus::PendingReview
        } else {
            ListingStatus::ForSale
        }
    }
}

/// A category key with its display label, for admin pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOption {
    pub key: &'static str,
    pub label: &'static str,
}

/// Both category enumerations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCatalog {
    pub banned: Vec<CategoryOption>,
    pub suspicious: Vec<CategoryOption>,
}
