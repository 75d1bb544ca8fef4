use std::sync::Arc;

use rapport_core::CacheConfig;
use rapport_core::connector::FeedConnector;
use rapport_middleware::ConnectorBuilder as GenericConnectorBuilder;

use crate::FeedsConnector;

/// Builder type alias specialized for the live feeds connector.
pub type FeedsConnectorBuilder = GenericConnectorBuilder;

impl FeedsConnector {
    /// Returns an unconfigured builder with the default connector.
    ///
    /// Customize with the builder methods before calling `.build()`.
    #[must_use]
    pub fn new() -> FeedsConnectorBuilder {
        let raw: Arc<dyn FeedConnector> = Arc::new(Self::new_default());
        GenericConnectorBuilder::new(raw)
    }

    /// Returns a builder with the default short-TTL cache over the
    /// slow-moving indicator feeds.
    ///
    /// Users can further customize before calling `.build()`.
    #[must_use]
    pub fn cached() -> FeedsConnectorBuilder {
        let raw: Arc<dyn FeedConnector> = Arc::new(Self::new_default());
        GenericConnectorBuilder::new(raw).with_cache(&CacheConfig::default())
    }

    /// Expert-only: construct an unwrapped connector for manual composition.
    #[must_use]
    pub fn new_raw() -> Self {
        Self::new_default()
    }
}
