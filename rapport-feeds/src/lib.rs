//! rapport-feeds
//!
//! Live connector that implements `FeedConnector` over public market-data
//! HTTP feeds: a batched markets listing (with a per-asset series fallback
//! for the weekly change) for prices, the Fear & Greed index for sentiment,
//! a global snapshot for BTC dominance, and daily ^VIX closes for
//! volatility.
#![warn(missing_docs)]

/// Adapter seams and the production HTTP adapter.
pub mod adapter;
mod builder;

pub use builder::FeedsConnectorBuilder;

use std::collections::HashMap;
use std::sync::Arc;

#[cfg(feature = "test-adapters")]
use adapter::CloneArcAdapters;
use adapter::{ChartFeed, GlobalFeed, MarketRow, MarketsFeed, RealAdapter, SentimentFeed, VixFeed};
use async_trait::async_trait;
use futures::future::join_all;
use rapport_core::connector::{
    DominanceProvider, FeedConnector, PriceProvider, SentimentProvider, VolatilityProvider,
};
use rapport_core::{
    AssetQuote, AssetSpec, ConnectorKey, IndicatorSnapshot, Outcome, RapportError, percent_change,
    snapshot_from_closes, snapshot_from_newest_first,
};
use rust_decimal::Decimal;

/// Recent sentiment readings requested per snapshot, newest first.
const SENTIMENT_WINDOW: u32 = 8;
/// Trailing range, in days, for the volatility close series.
const VIX_WINDOW_DAYS: u32 = 8;
/// Days of history behind the per-asset weekly-change fallback.
const WEEKLY_SERIES_DAYS: u32 = 7;

#[cfg(not(feature = "test-adapters"))]
type AdapterArc = Arc<RealAdapter>;

#[cfg(feature = "test-adapters")]
type MarketsAdapter = Arc<dyn MarketsFeed>;
#[cfg(not(feature = "test-adapters"))]
type MarketsAdapter = AdapterArc;

#[cfg(feature = "test-adapters")]
type ChartAdapter = Arc<dyn ChartFeed>;
#[cfg(not(feature = "test-adapters"))]
type ChartAdapter = AdapterArc;

#[cfg(feature = "test-adapters")]
type SentimentAdapter = Arc<dyn SentimentFeed>;
#[cfg(not(feature = "test-adapters"))]
type SentimentAdapter = AdapterArc;

#[cfg(feature = "test-adapters")]
type GlobalAdapter = Arc<dyn GlobalFeed>;
#[cfg(not(feature = "test-adapters"))]
type GlobalAdapter = AdapterArc;

#[cfg(feature = "test-adapters")]
type VixAdapter = Arc<dyn VixFeed>;
#[cfg(not(feature = "test-adapters"))]
type VixAdapter = AdapterArc;

/// Public connector type. Production users construct with
/// `FeedsConnector::new_default()` or one of the builder presets.
pub struct FeedsConnector {
    markets: MarketsAdapter,
    chart: ChartAdapter,
    sentiment: SentimentAdapter,
    global: GlobalAdapter,
    vix: VixAdapter,
}

impl FeedsConnector {
    /// Static connector key for configuration and logs.
    pub const KEY: ConnectorKey = ConnectorKey::new("rapport-feeds");

    fn looks_like_not_found(msg: &str) -> bool {
        let m = msg.to_ascii_lowercase();
        m.contains("not found") || m.contains("no data") || m.contains("no matches")
    }

    fn normalize_error(e: RapportError, what: &str) -> RapportError {
        match e {
            RapportError::Connector { connector: _, msg } => {
                if Self::looks_like_not_found(&msg) {
                    RapportError::not_found(what.to_string())
                } else {
                    RapportError::connector("rapport-feeds", msg)
                }
            }
            RapportError::Other(msg) => RapportError::connector("rapport-feeds", msg),
            other => other,
        }
    }

    /// Build with a fresh HTTP client inside.
    ///
    /// # Panics
    /// Panics if the underlying HTTP client cannot be constructed.
    #[must_use]
    pub fn new_default() -> Self {
        let a = RealAdapter::new_default();
        Self::from_adapter(&a)
    }

    /// Build from an existing `reqwest::Client`.
    #[must_use]
    pub fn new_with_client(client: reqwest::Client) -> Self {
        let a = RealAdapter::new(client);
        Self::from_adapter(&a)
    }

    /// For tests/injection (requires the `test-adapters` feature).
    ///
    /// Accepts a borrowed adapter to avoid unnecessary moves.
    #[cfg(feature = "test-adapters")]
    pub fn from_adapter<A: CloneArcAdapters + 'static>(adapter: &A) -> Self {
        Self {
            markets: adapter.clone_arc_markets(),
            chart: adapter.clone_arc_chart(),
            sentiment: adapter.clone_arc_sentiment(),
            global: adapter.clone_arc_global(),
            vix: adapter.clone_arc_vix(),
        }
    }

    #[cfg(not(feature = "test-adapters"))]
    /// Build from a concrete `RealAdapter` by cloning it into shared handles.
    pub fn from_adapter(adapter: &RealAdapter) -> Self {
        let shared = Arc::new(adapter.clone());
        Self {
            markets: Arc::clone(&shared),
            chart: Arc::clone(&shared),
            sentiment: Arc::clone(&shared),
            global: Arc::clone(&shared),
            vix: shared,
        }
    }
}

fn quote_from_row(symbol: &str, row: &MarketRow) -> AssetQuote {
    AssetQuote {
        symbol: symbol.to_string(),
        price: Outcome::from(row.current_price),
        change_24h: Outcome::from(row.change_24h),
        change_7d: Outcome::from(row.change_7d),
        market_cap: Outcome::from(row.market_cap),
        volume_24h: Outcome::from(row.total_volume),
    }
}

/// Percent change across a price series, oldest first.
fn weekly_change(series: &[Decimal]) -> Option<Decimal> {
    let (first, last) = (series.first()?, series.last()?);
    percent_change(*first, *last)
}

#[async_trait]
impl PriceProvider for FeedsConnector {
    async fn asset_quotes(&self, assets: &[AssetSpec]) -> Result<Vec<AssetQuote>, RapportError> {
        if assets.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<String> = assets.iter().map(|a| a.id.clone()).collect();
        let rows = self
            .markets
            .markets(&ids)
            .await
            .map_err(|e| Self::normalize_error(e, "markets listing"))?;
        let by_id: HashMap<&str, &MarketRow> =
            rows.iter().map(|row| (row.id.as_str(), row)).collect();

        let mut quotes: Vec<AssetQuote> = assets
            .iter()
            .map(|spec| match by_id.get(spec.id.as_str()) {
                Some(row) => quote_from_row(&spec.symbol, row),
                None => AssetQuote::unavailable(&spec.symbol),
            })
            .collect();

        // The listing sometimes omits the weekly change even for known rows;
        // derive it from each asset's own price series instead.
        let missing_weekly: Vec<usize> = quotes
            .iter()
            .enumerate()
            .filter(|(i, quote)| {
                quote.change_7d.is_unavailable() && by_id.contains_key(assets[*i].id.as_str())
            })
            .map(|(i, _)| i)
            .collect();
        if missing_weekly.is_empty() {
            return Ok(quotes);
        }

        let fallbacks = missing_weekly.iter().map(|&i| {
            let id = assets[i].id.clone();
            async move { (i, self.chart.price_series(&id, WEEKLY_SERIES_DAYS).await) }
        });
        for (i, fetched) in join_all(fallbacks).await {
            match fetched {
                Ok(series) => {
                    if let Some(change) = weekly_change(&series) {
                        quotes[i].change_7d = Outcome::Value(change);
                    }
                }
                // One asset's series failure must not disturb the others.
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        asset = %assets[i].id,
                        error = %_e,
                        "weekly change fallback failed"
                    );
                }
            }
        }
        Ok(quotes)
    }
}

#[async_trait]
impl SentimentProvider for FeedsConnector {
    async fn sentiment(&self) -> Result<IndicatorSnapshot, RapportError> {
        let series = self
            .sentiment
            .sentiment_series(SENTIMENT_WINDOW)
            .await
            .map_err(|e| Self::normalize_error(e, "sentiment series"))?;
        Ok(snapshot_from_newest_first(&series, 1, 7))
    }
}

#[async_trait]
impl DominanceProvider for FeedsConnector {
    async fn dominance(&self) -> Result<IndicatorSnapshot, RapportError> {
        let share = self
            .global
            .btc_dominance()
            .await
            .map_err(|e| Self::normalize_error(e, "btc dominance"))?;
        // The ratio has no historical endpoint, so the movements stay unset.
        Ok(IndicatorSnapshot {
            current: Outcome::Value(share),
            change_1d: Outcome::Unavailable,
            change_7d: Outcome::Unavailable,
        })
    }
}

#[async_trait]
impl VolatilityProvider for FeedsConnector {
    async fn volatility(&self) -> Result<IndicatorSnapshot, RapportError> {
        let closes = self
            .vix
            .vix_closes(VIX_WINDOW_DAYS)
            .await
            .map_err(|e| Self::normalize_error(e, "volatility closes"))?;
        Ok(snapshot_from_closes(&closes))
    }
}

impl FeedConnector for FeedsConnector {
    fn name(&self) -> &'static str {
        "rapport-feeds"
    }
    fn vendor(&self) -> &'static str {
        "CoinGecko / Alternative.me / Yahoo Finance"
    }

    fn as_price_provider(&self) -> Option<&dyn PriceProvider> {
        Some(self as &dyn PriceProvider)
    }
    fn as_sentiment_provider(&self) -> Option<&dyn SentimentProvider> {
        Some(self as &dyn SentimentProvider)
    }
    fn as_dominance_provider(&self) -> Option<&dyn DominanceProvider> {
        Some(self as &dyn DominanceProvider)
    }
    fn as_volatility_provider(&self) -> Option<&dyn VolatilityProvider> {
        Some(self as &dyn VolatilityProvider)
    }
}
