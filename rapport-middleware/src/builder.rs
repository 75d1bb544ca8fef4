//! Builder for composing connectors with middleware layers.
//!
//! # Middleware Ordering Convention
//!
//! Middleware layers form an "onion" around the raw connector:
//!
//! ```text
//! Caller
//!     ↓
//! Outermost Middleware (e.g., Cache - answers repeats without going deeper)
//!     ↓
//! Raw Connector (e.g., live feeds - makes actual API calls)
//! ```
//!
//! The `layers` vector stores middleware in **outermost-first** order (last
//! added = outermost), and they are **applied in reverse** during `build()`
//! to construct the proper nesting: `layers[0](layers[1](...(raw)))`.

use std::sync::Arc;

use rapport_core::Middleware;
use rapport_core::connector::FeedConnector;
use rapport_types::CacheConfig;

use crate::cache::CacheMiddleware;

/// Generic middleware builder for composing a connector with layered wrappers.
///
/// See [module-level documentation](self) for details on middleware ordering.
pub struct ConnectorBuilder {
    raw: Arc<dyn FeedConnector>,
    /// Middleware layers in outermost-first order.
    layers: Vec<Box<dyn Middleware>>,
}

impl ConnectorBuilder {
    /// Create a new builder from a raw, unwrapped connector.
    #[must_use]
    pub fn new(raw: Arc<dyn FeedConnector>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// Add or replace the caching layer.
    ///
    /// Adds cache middleware at the outermost position (index 0) so repeated
    /// calls are answered before any other layer or the raw connector runs.
    ///
    /// If cache middleware already exists, it is removed and replaced.
    #[must_use]
    pub fn with_cache(mut self, cfg: &CacheConfig) -> Self {
        self.layers.retain(|m| m.name() != "CachingMiddleware");
        // Insert at position 0 to make this the outermost layer
        self.layers.insert(0, Box::new(CacheMiddleware::new(*cfg)));
        self
    }

    /// Remove the caching layer if present.
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.layers.retain(|m| m.name() != "CachingMiddleware");
        self
    }

    /// Add an arbitrary middleware layer at the outermost position.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn Middleware>) -> Self {
        self.layers.insert(0, layer);
        self
    }

    /// Build the wrapped connector.
    ///
    /// Applies the layers in reverse order (innermost to outermost) so that
    /// `layers[0]` ends up as the outermost wrapper around the raw connector.
    #[must_use]
    pub fn build(self) -> Arc<dyn FeedConnector> {
        let mut acc: Arc<dyn FeedConnector> = Arc::clone(&self.raw);
        // Reverse iteration: apply innermost middleware first, outermost last
        for m in self.layers.into_iter().rev() {
            acc = m.apply(acc);
        }
        acc
    }
}
