//! Caching middleware for feed connectors.
//!
//! Wraps a connector and serves repeated capability calls from per-capability
//! TTL stores. Only successful results are stored; there is no negative
//! caching, so a failed call reaches the inner connector again on the next
//! attempt instead of pinning the failure until some entry expires.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use serde_json::json;

use rapport_core::Middleware;
use rapport_core::connector::{
    DominanceProvider, FeedConnector, PriceProvider, SentimentProvider, VolatilityProvider,
};
use rapport_types::report::{AssetQuote, AssetSpec, IndicatorSnapshot};
use rapport_types::{CacheConfig, Capability, RapportError};

/// Minimal async store interface the caching connector works against.
#[async_trait]
trait CacheStore<K, V>: Send + Sync {
    async fn get(&self, key: &K) -> Option<V>;
    async fn put(&self, key: K, value: V);
}

/// TTL store backed by moka's future-aware cache.
struct MokaStore<K, V> {
    inner: Cache<K, V>,
}

impl<K, V> MokaStore<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn new(capacity: u64, ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();
        Self { inner }
    }
}

#[async_trait]
impl<K, V> CacheStore<K, V> for MokaStore<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> Option<V> {
        self.inner.get(key).await
    }

    async fn put(&self, key: K, value: V) {
        self.inner.insert(key, value).await;
    }
}

/// Shared handle to an optional per-capability store. Values are held behind
/// `Arc` so hits clone a pointer, not the payload.
type SharedStore<V> = Option<Arc<dyn CacheStore<String, Arc<V>>>>;

/// Key for capabilities that take no arguments; each has its own store.
const INDICATOR_KEY: &str = "current";

fn price_key(assets: &[AssetSpec]) -> String {
    assets
        .iter()
        .map(|spec| format!("{}:{}", spec.id, spec.symbol))
        .collect::<Vec<_>>()
        .join(",")
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Declarative caching layer for [`ConnectorBuilder`](crate::ConnectorBuilder).
///
/// Holds the retention config; `apply` wraps the inner connector in a caching
/// connector that intercepts the cacheable capabilities.
pub struct CacheMiddleware {
    cfg: CacheConfig,
}

impl CacheMiddleware {
    /// Create a caching layer from the given per-capability retention config.
    #[must_use]
    pub const fn new(cfg: CacheConfig) -> Self {
        Self { cfg }
    }
}

impl Middleware for CacheMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn FeedConnector>) -> Arc<dyn FeedConnector> {
        Arc::new(CachingConnector::new(inner, &self.cfg))
    }

    fn name(&self) -> &'static str {
        "CachingMiddleware"
    }

    fn config_json(&self) -> serde_json::Value {
        json!({
            "prices_ttl_ms": self.cfg.prices_ttl.map(millis),
            "sentiment_ttl_ms": self.cfg.sentiment_ttl.map(millis),
            "dominance_ttl_ms": self.cfg.dominance_ttl.map(millis),
            "volatility_ttl_ms": self.cfg.volatility_ttl.map(millis),
            "capacity": self.cfg.capacity,
        })
    }
}

struct Stores {
    prices: SharedStore<Vec<AssetQuote>>,
    sentiment: SharedStore<IndicatorSnapshot>,
    dominance: SharedStore<IndicatorSnapshot>,
    volatility: SharedStore<IndicatorSnapshot>,
}

/// Connector wrapper that serves cacheable capabilities from TTL stores and
/// delegates everything else to the inner connector.
struct CachingConnector {
    inner: Arc<dyn FeedConnector>,
    stores: Stores,
}

impl CachingConnector {
    fn maybe_store<V>(cfg: &CacheConfig, capability: Capability) -> SharedStore<V>
    where
        V: Send + Sync + 'static,
    {
        let ttl = cfg.ttl_for(capability)?;
        // A zero TTL means "do not cache", same as no TTL at all
        if ttl.is_zero() {
            return None;
        }
        Some(Arc::new(MokaStore::new(cfg.capacity, ttl)))
    }

    fn new(inner: Arc<dyn FeedConnector>, cfg: &CacheConfig) -> Self {
        let stores = Stores {
            prices: Self::maybe_store(cfg, Capability::Prices),
            sentiment: Self::maybe_store(cfg, Capability::Sentiment),
            dominance: Self::maybe_store(cfg, Capability::Dominance),
            volatility: Self::maybe_store(cfg, Capability::Volatility),
        };
        Self { inner, stores }
    }
}

impl FeedConnector for CachingConnector {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn vendor(&self) -> &'static str {
        self.inner.vendor()
    }

    rapport_core::feed_connector_accessors!(inner);
}

#[async_trait]
impl PriceProvider for CachingConnector {
    async fn asset_quotes(&self, assets: &[AssetSpec]) -> Result<Vec<AssetQuote>, RapportError> {
        let inner = self
            .inner
            .as_price_provider()
            .ok_or_else(|| RapportError::unsupported(Capability::Prices.as_str()))?;
        let Some(store) = &self.stores.prices else {
            return inner.asset_quotes(assets).await;
        };

        let key = price_key(assets);
        if let Some(hit) = store.get(&key).await {
            #[cfg(feature = "tracing")]
            tracing::debug!(capability = %Capability::Prices, "cache hit");
            return Ok((*hit).clone());
        }
        let value = inner.asset_quotes(assets).await?;
        store.put(key, Arc::new(value.clone())).await;
        Ok(value)
    }
}

#[async_trait]
impl SentimentProvider for CachingConnector {
    async fn sentiment(&self) -> Result<IndicatorSnapshot, RapportError> {
        let inner = self
            .inner
            .as_sentiment_provider()
            .ok_or_else(|| RapportError::unsupported(Capability::Sentiment.as_str()))?;
        let Some(store) = &self.stores.sentiment else {
            return inner.sentiment().await;
        };

        let key = INDICATOR_KEY.to_owned();
        if let Some(hit) = store.get(&key).await {
            #[cfg(feature = "tracing")]
            tracing::debug!(capability = %Capability::Sentiment, "cache hit");
            return Ok(*hit);
        }
        let value = inner.sentiment().await?;
        store.put(key, Arc::new(value)).await;
        Ok(value)
    }
}

#[async_trait]
impl DominanceProvider for CachingConnector {
    async fn dominance(&self) -> Result<IndicatorSnapshot, RapportError> {
        let inner = self
            .inner
            .as_dominance_provider()
            .ok_or_else(|| RapportError::unsupported(Capability::Dominance.as_str()))?;
        let Some(store) = &self.stores.dominance else {
            return inner.dominance().await;
        };

        let key = INDICATOR_KEY.to_owned();
        if let Some(hit) = store.get(&key).await {
            #[cfg(feature = "tracing")]
            tracing::debug!(capability = %Capability::Dominance, "cache hit");
            return Ok(*hit);
        }
        let value = inner.dominance().await?;
        store.put(key, Arc::new(value)).await;
        Ok(value)
    }
}

#[async_trait]
impl VolatilityProvider for CachingConnector {
    async fn volatility(&self) -> Result<IndicatorSnapshot, RapportError> {
        let inner = self
            .inner
            .as_volatility_provider()
            .ok_or_else(|| RapportError::unsupported(Capability::Volatility.as_str()))?;
        let Some(store) = &self.stores.volatility else {
            return inner.volatility().await;
        };

        let key = INDICATOR_KEY.to_owned();
        if let Some(hit) = store.get(&key).await {
            #[cfg(feature = "tracing")]
            tracing::debug!(capability = %Capability::Volatility, "cache hit");
            return Ok(*hit);
        }
        let value = inner.volatility().await?;
        store.put(key, Arc::new(value)).await;
        Ok(value)
    }
}
