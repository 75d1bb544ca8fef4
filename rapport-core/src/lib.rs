//! rapport-core
//!
//! Core traits and utilities shared across the rapport ecosystem.
//!
//! - `connector`: the `FeedConnector` trait and capability provider traits.
//! - `middleware`: the `Middleware` trait implemented by connector wrappers.
//! - `series`: pure helpers that turn raw upstream series into indicator
//!   snapshots.
//! - `types`: consolidated re-exports of the shared leaf types.
//!
//! Provider traits are `async` via `async-trait` and are expected to run
//! under a Tokio 1.x runtime, which is what the rest of the workspace uses.
#![warn(missing_docs)]

/// Connector capability traits and the primary `FeedConnector` interface.
pub mod connector;
/// Middleware trait implemented by connector wrappers.
pub mod middleware;
/// Series math shared by adapters that derive movements from raw readings.
pub mod series;
pub mod types;

pub use connector::{
    DominanceProvider, FeedConnector, PriceProvider, SentimentProvider, VolatilityProvider,
};
pub use middleware::Middleware;
pub use series::{percent_change, snapshot_from_closes, snapshot_from_newest_first};
pub use types::*;
