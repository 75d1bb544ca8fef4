//! Rapport aggregates unreliable market feeds into a failure-safe PDF report.
//!
//! Overview
//! - Routes the four report sections (prices, sentiment, dominance,
//!   volatility) to one connector implementing the `rapport_core` contracts.
//! - Bounds every provider call with its own deadline and settles the calls
//!   independently: a slow or broken feed renders as `N/A`, never as an
//!   error and never at its siblings' expense.
//! - Composes the normalized snapshot into a paginated PDF in a fixed
//!   section order; an unexpected composition failure falls back to a
//!   one-page failure notice, so [`Rapport::generate_pdf`] cannot fail.
//!
//! Key behaviors and trade-offs
//! - Per-call timeout (default 9s): bounds each section without cross-feed
//!   cancellation; an optional request-level deadline caps the whole
//!   aggregation as a second belt.
//! - Caching: [`RapportBuilder::with_cache`] wraps the connector in the
//!   short-TTL middleware; only successes are memoized, so an outage is
//!   retried on the next report instead of pinned.
//! - Determinism: asset rows follow the configured roster order regardless
//!   of fetch completion order, and the same snapshot always serializes to
//!   the same bytes.
//!
//! Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use rapport::Rapport;
//!
//! let connector = Arc::new(rapport_feeds::FeedsConnector::new_raw());
//! let rapport = Rapport::builder()
//!     .with_connector(connector)
//!     .with_cache(rapport::CacheConfig::default())
//!     .build()?;
//! let pdf = rapport.generate_pdf().await; // always a renderable PDF
//! ```
//!
//! See `rapport/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod reference;

/// Report composition and the failure-safe renderer.
pub mod compose;

pub use compose::{CONTENT_DISPOSITION, CONTENT_TYPE};
pub use core::{Rapport, RapportBuilder};
pub use reference::{counts_for, recommendations_for};

// Re-export core types for convenience
pub use rapport_core::connector::{
    DominanceProvider, FeedConnector, PriceProvider, SentimentProvider, VolatilityProvider,
};
pub use rapport_core::{
    AssetQuote, AssetRecommendation, AssetSpec, CacheConfig, Capability, ConnectorKey, Decimal,
    IndicatorSnapshot, MarketSnapshot, Outcome, RapportConfig, RapportError, RecommendationCounts,
    Stance,
};
pub use rapport_middleware::{CacheMiddleware, ConnectorBuilder};
pub use rapport_pdf::{DrawCmd, LayoutError, Page, PageGeometry, SealedDocument};
