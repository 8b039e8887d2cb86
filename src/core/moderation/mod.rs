// Core moderation module - contains listing risk-scoring business logic.

pub mod category_labels;
pub mod content_rules;
pub mod default_words;
pub mod moderation_config;
pub mod moderation_models;
pub mod moderation_service;
pub mod word_cache;

pub use moderation_config::{ModerationConfig, DEFAULT_PRICE_CEILINGS};
pub use moderation_models::*;
pub use moderation_service::*;
pub use word_cache::{WordCache, WordSnapshot};
