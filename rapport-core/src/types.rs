//! Re-export of foundational types from `rapport-types`.
// Consolidated re-exports so downstream crates can depend on `rapport-core` only

pub use rapport_types::{Capability, ConnectorKey, RapportError};

pub use rapport_types::config::{
    CacheConfig, RapportConfig, DEFAULT_INDICATOR_TTL, DEFAULT_PROVIDER_TIMEOUT,
};

pub use rapport_types::report::{
    AssetQuote, AssetRecommendation, AssetSpec, IndicatorSnapshot, MarketSnapshot,
    RecommendationCounts, Stance,
};

pub use rapport_types::Outcome;

pub use rust_decimal::Decimal;
