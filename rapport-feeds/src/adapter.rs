//! Adapter seams between the connector and its upstream HTTP feeds.
//!
//! Each upstream concern gets a narrow trait so tests can inject closures in
//! place of network calls; [`RealAdapter`] is the production implementation
//! backed by a shared `reqwest::Client` with a hard per-request deadline.

use std::collections::HashMap;
use std::str::FromStr;
#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;
use rapport_core::{DEFAULT_PROVIDER_TIMEOUT, RapportError};
use rust_decimal::Decimal;
use serde::Deserialize;
use url::Url;

/// Browser-like agent; some public endpoints reject the reqwest default.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

const DEFAULT_MARKETS_BASE: &str = "https://api.coingecko.com/api/v3/";
const DEFAULT_SENTIMENT_BASE: &str = "https://api.alternative.me/";
const DEFAULT_VOLATILITY_BASE: &str = "https://query1.finance.yahoo.com/";

/// One row of the upstream markets listing.
///
/// Every figure is optional; a missing field settles as an unavailable leaf
/// downstream instead of failing the batch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MarketRow {
    /// Upstream asset identifier (e.g. `"bitcoin"`).
    #[serde(default)]
    pub id: String,
    /// Last trade price in USD.
    #[serde(default)]
    pub current_price: Option<Decimal>,
    /// Percent change over the last 24 hours.
    #[serde(default, rename = "price_change_percentage_24h_in_currency")]
    pub change_24h: Option<Decimal>,
    /// Percent change over the last 7 days; only present when requested.
    #[serde(default, rename = "price_change_percentage_7d_in_currency")]
    pub change_7d: Option<Decimal>,
    /// Market capitalization in USD.
    #[serde(default)]
    pub market_cap: Option<Decimal>,
    /// Traded volume over the last 24 hours, in USD.
    #[serde(default)]
    pub total_volume: Option<Decimal>,
}

/// Markets-listing abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait MarketsFeed: Send + Sync {
    /// Fetch one listing row per known id; unknown ids are simply absent.
    async fn markets(&self, ids: &[String]) -> Result<Vec<MarketRow>, RapportError>;
}

/// Per-asset price-series abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait ChartFeed: Send + Sync {
    /// Fetch up to `days` of prices for one asset, oldest first.
    async fn price_series(&self, id: &str, days: u32) -> Result<Vec<Decimal>, RapportError>;
}

/// Sentiment-series abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait SentimentFeed: Send + Sync {
    /// Fetch the most recent `limit` index readings, newest first.
    async fn sentiment_series(&self, limit: u32) -> Result<Vec<Decimal>, RapportError>;
}

/// Global-ratio abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait GlobalFeed: Send + Sync {
    /// Fetch BTC's current share of total market capitalization, in percent.
    async fn btc_dominance(&self) -> Result<Decimal, RapportError>;
}

/// Volatility-index abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait VixFeed: Send + Sync {
    /// Fetch up to `days` daily closes for the volatility index, oldest
    /// first. Market holidays leave no close, so the series may be shorter.
    async fn vix_closes(&self, days: u32) -> Result<Vec<Decimal>, RapportError>;
}

#[derive(Debug, Deserialize)]
struct FngEnvelope {
    #[serde(default)]
    data: Vec<FngSample>,
}

#[derive(Debug, Deserialize)]
struct FngSample {
    // The index value arrives as a decimal string.
    #[serde(default)]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GlobalEnvelope {
    data: Option<GlobalData>,
}

#[derive(Debug, Deserialize)]
struct GlobalData {
    #[serde(default)]
    market_cap_percentage: HashMap<String, Decimal>,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    // `[timestamp, price]` pairs, oldest first.
    #[serde(default)]
    prices: Vec<(f64, Option<Decimal>)>,
}

#[derive(Debug, Deserialize)]
struct YahooChartEnvelope {
    chart: Option<YahooChart>,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooChartResult>>,
}

#[derive(Debug, Deserialize)]
struct YahooChartResult {
    indicators: Option<YahooIndicators>,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Option<Vec<YahooQuoteBlock>>,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteBlock {
    close: Option<Vec<Option<Decimal>>>,
}

/// Production adapter: one shared HTTP client, three overridable base URLs.
///
/// Cloning is cheap (the client is internally pooled) and the adapter keeps
/// no mutable state, so one instance can serve concurrent calls.
#[derive(Clone)]
pub struct RealAdapter {
    client: reqwest::Client,
    markets_base: Url,
    sentiment_base: Url,
    volatility_base: Url,
}

impl RealAdapter {
    /// Build an adapter with a fresh client using the standard per-request
    /// deadline and a static user agent.
    ///
    /// # Panics
    /// Panics if the underlying HTTP client cannot be constructed.
    #[must_use]
    pub fn new_default() -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_PROVIDER_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build reqwest client for rapport-feeds");
        Self::new(client)
    }

    /// Wrap an existing `reqwest::Client`. The caller is responsible for
    /// configuring a request timeout; without one a stalled upstream holds
    /// the call until the orchestrator deadline fires.
    ///
    /// # Panics
    /// Panics if the built-in base URLs fail to parse, which cannot happen
    /// for the shipped constants.
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        let parse = |base: &str| Url::parse(base).expect("default base URL is valid");
        Self {
            client,
            markets_base: parse(DEFAULT_MARKETS_BASE),
            sentiment_base: parse(DEFAULT_SENTIMENT_BASE),
            volatility_base: parse(DEFAULT_VOLATILITY_BASE),
        }
    }

    /// Point the markets and per-asset chart endpoints at a different base.
    /// The base must end with a trailing slash for joins to resolve under it.
    #[must_use]
    pub fn with_markets_base(mut self, base: Url) -> Self {
        self.markets_base = base;
        self
    }

    /// Point the sentiment-series endpoint at a different base.
    #[must_use]
    pub fn with_sentiment_base(mut self, base: Url) -> Self {
        self.sentiment_base = base;
        self
    }

    /// Point the volatility-chart endpoint at a different base.
    #[must_use]
    pub fn with_volatility_base(mut self, base: Url) -> Self {
        self.volatility_base = base;
        self
    }

    /// One bounded GET returning the body as text. Transport failures and
    /// non-success statuses map to `Connector`; parsing happens separately
    /// so malformed payloads stay distinguishable as `Data`.
    async fn fetch_text(&self, url: Url, what: &str) -> Result<String, RapportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(&e, what))?;
        let status = response.status();
        if !status.is_success() {
            return Err(RapportError::connector(
                "rapport-feeds",
                format!("{what}: HTTP {status}"),
            ));
        }
        response.text().await.map_err(|e| transport_error(&e, what))
    }
}

fn transport_error(e: &reqwest::Error, what: &str) -> RapportError {
    if e.is_timeout() {
        RapportError::connector("rapport-feeds", format!("{what}: timed out"))
    } else {
        RapportError::connector("rapport-feeds", format!("{what}: {e}"))
    }
}

fn parse_json<T: serde::de::DeserializeOwned>(body: &str, what: &str) -> Result<T, RapportError> {
    serde_json::from_str(body).map_err(|e| RapportError::Data(format!("{what}: {e}")))
}

fn join_url(base: &Url, path: &str) -> Result<Url, RapportError> {
    base.join(path)
        .map_err(|e| RapportError::InvalidArg(format!("endpoint {path}: {e}")))
}

#[async_trait]
impl MarketsFeed for RealAdapter {
    async fn markets(&self, ids: &[String]) -> Result<Vec<MarketRow>, RapportError> {
        let mut url = join_url(&self.markets_base, "coins/markets")?;
        url.query_pairs_mut()
            .append_pair("vs_currency", "usd")
            .append_pair("ids", &ids.join(","))
            .append_pair("price_change_percentage", "24h,7d");
        let body = self.fetch_text(url, "markets listing").await?;
        parse_json(&body, "markets listing")
    }
}

#[async_trait]
impl ChartFeed for RealAdapter {
    async fn price_series(&self, id: &str, days: u32) -> Result<Vec<Decimal>, RapportError> {
        let what = format!("price series for {id}");
        let mut url = join_url(&self.markets_base, &format!("coins/{id}/market_chart"))?;
        url.query_pairs_mut()
            .append_pair("vs_currency", "usd")
            .append_pair("days", &days.to_string());
        let body = self.fetch_text(url, &what).await?;
        let envelope: ChartEnvelope = parse_json(&body, &what)?;
        Ok(envelope
            .prices
            .into_iter()
            .filter_map(|(_, price)| price)
            .collect())
    }
}

#[async_trait]
impl SentimentFeed for RealAdapter {
    async fn sentiment_series(&self, limit: u32) -> Result<Vec<Decimal>, RapportError> {
        let mut url = join_url(&self.sentiment_base, "fng/")?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("format", "json");
        let body = self.fetch_text(url, "sentiment series").await?;
        let envelope: FngEnvelope = parse_json(&body, "sentiment series")?;
        // Unparseable samples drop out of the window rather than failing it.
        Ok(envelope
            .data
            .into_iter()
            .filter_map(|sample| sample.value)
            .filter_map(|value| Decimal::from_str(&value).ok())
            .collect())
    }
}

#[async_trait]
impl GlobalFeed for RealAdapter {
    async fn btc_dominance(&self) -> Result<Decimal, RapportError> {
        let url = join_url(&self.markets_base, "global")?;
        let body = self.fetch_text(url, "global market snapshot").await?;
        let envelope: GlobalEnvelope = parse_json(&body, "global market snapshot")?;
        envelope
            .data
            .and_then(|data| data.market_cap_percentage.get("btc").copied())
            .ok_or_else(|| {
                RapportError::Data("global market snapshot: no btc dominance figure".into())
            })
    }
}

#[async_trait]
impl VixFeed for RealAdapter {
    async fn vix_closes(&self, days: u32) -> Result<Vec<Decimal>, RapportError> {
        // The caret in ^VIX percent-encodes as %5E during the join.
        let mut url = join_url(&self.volatility_base, "v8/finance/chart/^VIX")?;
        url.query_pairs_mut()
            .append_pair("range", &format!("{days}d"))
            .append_pair("interval", "1d");
        let body = self.fetch_text(url, "volatility closes").await?;
        let envelope: YahooChartEnvelope = parse_json(&body, "volatility closes")?;
        let closes = envelope
            .chart
            .and_then(|chart| chart.result)
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|result| result.indicators)
            .and_then(|indicators| indicators.quote)
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|quote| quote.close)
            .unwrap_or_default();
        // Null closes mark market holidays; drop them.
        Ok(closes.into_iter().flatten().collect())
    }
}

/* -------- Test-only lightweight adapter constructors ------- */

#[cfg(feature = "test-adapters")]
impl dyn MarketsFeed {
    /// Build a `MarketsFeed` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn MarketsFeed>
    where
        F: Send + Sync + 'static + Fn(Vec<String>) -> Result<Vec<MarketRow>, RapportError>,
    {
        struct FnMarkets<F>(F);
        #[async_trait]
        impl<F> MarketsFeed for FnMarkets<F>
        where
            F: Send + Sync + 'static + Fn(Vec<String>) -> Result<Vec<MarketRow>, RapportError>,
        {
            async fn markets(&self, ids: &[String]) -> Result<Vec<MarketRow>, RapportError> {
                (self.0)(ids.to_vec())
            }
        }
        Arc::new(FnMarkets(f))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn ChartFeed {
    /// Build a `ChartFeed` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn ChartFeed>
    where
        F: Send + Sync + 'static + Fn(String, u32) -> Result<Vec<Decimal>, RapportError>,
    {
        struct FnChart<F>(F);
        #[async_trait]
        impl<F> ChartFeed for FnChart<F>
        where
            F: Send + Sync + 'static + Fn(String, u32) -> Result<Vec<Decimal>, RapportError>,
        {
            async fn price_series(
                &self,
                id: &str,
                days: u32,
            ) -> Result<Vec<Decimal>, RapportError> {
                (self.0)(id.to_string(), days)
            }
        }
        Arc::new(FnChart(f))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn SentimentFeed {
    /// Build a `SentimentFeed` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn SentimentFeed>
    where
        F: Send + Sync + 'static + Fn(u32) -> Result<Vec<Decimal>, RapportError>,
    {
        struct FnSentiment<F>(F);
        #[async_trait]
        impl<F> SentimentFeed for FnSentiment<F>
        where
            F: Send + Sync + 'static + Fn(u32) -> Result<Vec<Decimal>, RapportError>,
        {
            async fn sentiment_series(&self, limit: u32) -> Result<Vec<Decimal>, RapportError> {
                (self.0)(limit)
            }
        }
        Arc::new(FnSentiment(f))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn GlobalFeed {
    /// Build a `GlobalFeed` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn GlobalFeed>
    where
        F: Send + Sync + 'static + Fn() -> Result<Decimal, RapportError>,
    {
        struct FnGlobal<F>(F);
        #[async_trait]
        impl<F> GlobalFeed for FnGlobal<F>
        where
            F: Send + Sync + 'static + Fn() -> Result<Decimal, RapportError>,
        {
            async fn btc_dominance(&self) -> Result<Decimal, RapportError> {
                (self.0)()
            }
        }
        Arc::new(FnGlobal(f))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn VixFeed {
    /// Build a `VixFeed` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn VixFeed>
    where
        F: Send + Sync + 'static + Fn(u32) -> Result<Vec<Decimal>, RapportError>,
    {
        struct FnVix<F>(F);
        #[async_trait]
        impl<F> VixFeed for FnVix<F>
        where
            F: Send + Sync + 'static + Fn(u32) -> Result<Vec<Decimal>, RapportError>,
        {
            async fn vix_closes(&self, days: u32) -> Result<Vec<Decimal>, RapportError> {
                (self.0)(days)
            }
        }
        Arc::new(FnVix(f))
    }
}

/// Splits a concrete adapter into the five shared feed handles.
///
/// Every accessor defaults to an unsupported stub, so test combos override
/// only the feeds they exercise.
#[cfg(feature = "test-adapters")]
pub trait CloneArcAdapters {
    /// Markets-listing handle.
    fn clone_arc_markets(&self) -> Arc<dyn MarketsFeed> {
        <dyn MarketsFeed>::from_fn(|_| Err(RapportError::unsupported("prices/markets")))
    }
    /// Per-asset chart handle.
    fn clone_arc_chart(&self) -> Arc<dyn ChartFeed> {
        <dyn ChartFeed>::from_fn(|_, _| Err(RapportError::unsupported("prices/series")))
    }
    /// Sentiment-series handle.
    fn clone_arc_sentiment(&self) -> Arc<dyn SentimentFeed> {
        <dyn SentimentFeed>::from_fn(|_| Err(RapportError::unsupported("sentiment")))
    }
    /// Global-ratio handle.
    fn clone_arc_global(&self) -> Arc<dyn GlobalFeed> {
        <dyn GlobalFeed>::from_fn(|| Err(RapportError::unsupported("dominance")))
    }
    /// Volatility-chart handle.
    fn clone_arc_vix(&self) -> Arc<dyn VixFeed> {
        <dyn VixFeed>::from_fn(|_| Err(RapportError::unsupported("volatility")))
    }
}

#[cfg(feature = "test-adapters")]
impl CloneArcAdapters for RealAdapter {
    fn clone_arc_markets(&self) -> Arc<dyn MarketsFeed> {
        Arc::new(self.clone()) as Arc<dyn MarketsFeed>
    }
    fn clone_arc_chart(&self) -> Arc<dyn ChartFeed> {
        Arc::new(self.clone()) as Arc<dyn ChartFeed>
    }
    fn clone_arc_sentiment(&self) -> Arc<dyn SentimentFeed> {
        Arc::new(self.clone()) as Arc<dyn SentimentFeed>
    }
    fn clone_arc_global(&self) -> Arc<dyn GlobalFeed> {
        Arc::new(self.clone()) as Arc<dyn GlobalFeed>
    }
    fn clone_arc_vix(&self) -> Arc<dyn VixFeed> {
        Arc::new(self.clone()) as Arc<dyn VixFeed>
    }
}
