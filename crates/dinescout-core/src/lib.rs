//! Domain types and configuration shared by every `dinescout` crate.
//!
//! Holds the restaurant document model, the search intents and the filters
//! they translate into, the cuisine vocabulary used by image search, and the
//! environment-driven application config.

pub mod app_config;
pub mod config;
pub mod pagination;
pub mod restaurant;
pub mod search;
pub mod vocabulary;

pub use app_config::{
    AppConfig, Environment, StoreBackend, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_SEARCH_RADIUS,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use pagination::{normalize_page, PageRequest, PaginatedResult, PAGE_SIZE};
pub use restaurant::{Cuisines, Location, Numeric, RestaurantRecord, UserRating};
pub use search::{BoundingBox, QueryError, RestaurantFilter, SearchIntent, TextMatcher};
pub use vocabulary::{extract_search_tags, is_cuisine_term, ClassifierConcept, CUISINE_TERMS};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
