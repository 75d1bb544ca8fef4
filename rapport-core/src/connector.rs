use async_trait::async_trait;

use crate::RapportError;
pub use rapport_types::ConnectorKey;
use rapport_types::report::{AssetQuote, AssetSpec, IndicatorSnapshot};
use rapport_types::Capability;

/// Focused role trait for connectors that provide per-asset market rows.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetch one quote row per requested asset, preserving request order.
    ///
    /// Implementations should settle each figure independently: a row whose
    /// weekly change could not be determined still carries the price that
    /// could. Only a failure of the whole batch is reported as `Err`.
    async fn asset_quotes(&self, assets: &[AssetSpec]) -> Result<Vec<AssetQuote>, RapportError>;
}

/// Focused role trait for connectors that provide the sentiment index.
#[async_trait]
pub trait SentimentProvider: Send + Sync {
    /// Fetch the current sentiment reading and its recent movements.
    async fn sentiment(&self) -> Result<IndicatorSnapshot, RapportError>;
}

/// Focused role trait for connectors that provide the BTC dominance ratio.
#[async_trait]
pub trait DominanceProvider: Send + Sync {
    /// Fetch the current dominance percentage.
    async fn dominance(&self) -> Result<IndicatorSnapshot, RapportError>;
}

/// Focused role trait for connectors that provide a volatility index level.
#[async_trait]
pub trait VolatilityProvider: Send + Sync {
    /// Fetch the current volatility reading and its recent movements.
    async fn volatility(&self) -> Result<IndicatorSnapshot, RapportError>;
}

/// The umbrella trait implemented by every market-data connector.
///
/// Capabilities are advertised through the `as_*_provider` accessors: a
/// connector that returns `Some` for an accessor commits to serving that
/// capability. Wrappers that delegate the accessors to an inner connector
/// inherit its capability surface automatically, including the answer given
/// by [`FeedConnector::supports`].
pub trait FeedConnector: Send + Sync {
    /// A stable identifier (e.g., "rapport-feeds").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Whether this connector can serve the given capability.
    ///
    /// Derived from the accessors; connectors normally do not override this.
    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Prices => self.as_price_provider().is_some(),
            Capability::Sentiment => self.as_sentiment_provider().is_some(),
            Capability::Dominance => self.as_dominance_provider().is_some(),
            Capability::Volatility => self.as_volatility_provider().is_some(),
            _ => false,
        }
    }

    /// Advertise price capability by returning a usable trait object reference when supported.
    fn as_price_provider(&self) -> Option<&dyn PriceProvider> {
        None
    }
    /// If implemented, returns a trait object for the sentiment index.
    fn as_sentiment_provider(&self) -> Option<&dyn SentimentProvider> {
        None
    }
    /// If implemented, returns a trait object for the dominance ratio.
    fn as_dominance_provider(&self) -> Option<&dyn DominanceProvider> {
        None
    }
    /// If implemented, returns a trait object for the volatility index.
    fn as_volatility_provider(&self) -> Option<&dyn VolatilityProvider> {
        None
    }
}

/// Generate `as_*_provider` accessors for a wrapper that implements
/// `FeedConnector` by delegating to an inner field.
///
/// The wrapper must itself implement every provider trait; each generated
/// accessor advertises the wrapper as the provider exactly when the inner
/// connector advertises itself.
#[macro_export]
macro_rules! feed_connector_accessors {
    ($inner:ident) => {
        fn as_price_provider(&self) -> Option<&dyn $crate::connector::PriceProvider> {
            if self.$inner.as_price_provider().is_some() {
                Some(self as &dyn $crate::connector::PriceProvider)
            } else {
                None
            }
        }
        fn as_sentiment_provider(&self) -> Option<&dyn $crate::connector::SentimentProvider> {
            if self.$inner.as_sentiment_provider().is_some() {
                Some(self as &dyn $crate::connector::SentimentProvider)
            } else {
                None
            }
        }
        fn as_dominance_provider(&self) -> Option<&dyn $crate::connector::DominanceProvider> {
            if self.$inner.as_dominance_provider().is_some() {
                Some(self as &dyn $crate::connector::DominanceProvider)
            } else {
                None
            }
        }
        fn as_volatility_provider(&self) -> Option<&dyn $crate::connector::VolatilityProvider> {
            if self.$inner.as_volatility_provider().is_some() {
                Some(self as &dyn $crate::connector::VolatilityProvider)
            } else {
                None
            }
        }
    };
}
