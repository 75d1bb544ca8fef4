//! Shared leaf types for the rapport workspace.
//!
//! Everything here is plain data: the [`Outcome`] value-or-absent channel
//! every fetched figure travels through, the [`RapportError`] taxonomy,
//! capability and connector identifiers, configuration, and the
//! [`MarketSnapshot`] dataset handed to the report composer.
#![warn(missing_docs)]

pub mod capability;
pub mod config;
pub mod connector;
pub mod error;
pub mod outcome;
pub mod report;

pub use capability::Capability;
pub use config::{CacheConfig, RapportConfig};
pub use connector::ConnectorKey;
pub use error::RapportError;
pub use outcome::Outcome;
pub use report::{
    AssetQuote, AssetRecommendation, AssetSpec, IndicatorSnapshot, MarketSnapshot,
    RecommendationCounts, Stance,
};

pub use rust_decimal::Decimal;
