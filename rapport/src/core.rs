use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use rapport_core::connector::FeedConnector;
use rapport_core::{
    AssetQuote, AssetSpec, CacheConfig, Capability, IndicatorSnapshot, MarketSnapshot,
    RapportConfig, RapportError,
};
use rapport_middleware::ConnectorBuilder;

use crate::compose;
use crate::reference;

/// Orchestrator that gathers every report section from one connector under
/// per-call deadlines and renders the result into a PDF.
pub struct Rapport {
    pub(crate) connector: Arc<dyn FeedConnector>,
    pub(crate) cfg: RapportConfig,
}

impl std::fmt::Debug for Rapport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rapport")
            .field("connector", &self.connector.name())
            .field("cfg", &self.cfg)
            .finish()
    }
}

/// Builder for constructing a `Rapport` orchestrator with custom configuration.
pub struct RapportBuilder {
    connector: Option<Arc<dyn FeedConnector>>,
    cache: Option<CacheConfig>,
    cfg: RapportConfig,
}

impl Default for RapportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RapportBuilder {
    /// Create a new builder with sensible defaults.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no connector; you must register one via [`with_connector`].
    /// - Defaults: the standard seven-asset roster, a 9s per-call timeout,
    ///   no request-level deadline, no caching layer.
    ///
    /// [`with_connector`]: RapportBuilder::with_connector
    #[must_use]
    pub fn new() -> Self {
        Self {
            connector: None,
            cache: None,
            cfg: RapportConfig::default(),
        }
    }

    /// Register the connector every section is fetched through.
    ///
    /// Registering again replaces the previous connector.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn FeedConnector>) -> Self {
        self.connector = Some(c);
        self
    }

    /// Wrap the connector in the short-TTL caching middleware.
    ///
    /// Behavior and trade-offs:
    /// - Only successful results are memoized, so a feed outage is retried on
    ///   the next report rather than pinned until some entry expires.
    /// - The default policy caches only the slow-moving indicator feeds.
    #[must_use]
    pub const fn with_cache(mut self, cfg: CacheConfig) -> Self {
        self.cache = Some(cfg);
        self
    }

    /// Replace the asset roster.
    ///
    /// Roster order is presentation order: the price table renders one row
    /// per entry in exactly this order, independent of fetch completion.
    #[must_use]
    pub fn assets(mut self, assets: Vec<AssetSpec>) -> Self {
        self.cfg.assets = assets;
        self
    }

    /// Set the per-provider-call timeout.
    ///
    /// A call exceeding it settles as unavailable for its section without
    /// blocking or cancelling the sibling calls.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Set an overall deadline for one snapshot aggregation.
    ///
    /// A second belt over the per-call timeout: when exceeded, every section
    /// that has not settled renders unavailable.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Build the `Rapport` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connector has been registered, the roster
    /// is empty, or the provider timeout is zero.
    pub fn build(self) -> Result<Rapport, RapportError> {
        let Some(raw) = self.connector else {
            return Err(RapportError::InvalidArg(
                "no connector registered; add one via with_connector(...)".to_string(),
            ));
        };
        if self.cfg.assets.is_empty() {
            return Err(RapportError::InvalidArg(
                "empty asset roster; the report needs at least one asset".to_string(),
            ));
        }
        if self.cfg.provider_timeout.is_zero() {
            return Err(RapportError::InvalidArg(
                "provider timeout must be positive".to_string(),
            ));
        }
        let connector = match self.cache {
            Some(cfg) => ConnectorBuilder::new(raw).with_cache(&cfg).build(),
            None => raw,
        };
        Ok(Rapport {
            connector,
            cfg: self.cfg,
        })
    }
}

/// Apply an optional deadline to a whole aggregation.
pub(crate) async fn with_request_deadline<T, Fut>(
    deadline: Option<Duration>,
    fut: Fut,
) -> Result<T, RapportError>
where
    Fut: core::future::Future<Output = T>,
{
    match deadline {
        Some(d) => (tokio::time::timeout(d, fut).await)
            .map_err(|_| RapportError::request_timeout("request")),
        None => Ok(fut.await),
    }
}

/// Re-align provider rows to the configured roster.
///
/// Output order follows the roster regardless of the order rows came back
/// in; roster symbols the provider did not cover get a placeholder row.
fn align_roster(roster: &[AssetSpec], rows: Vec<AssetQuote>) -> Vec<AssetQuote> {
    let mut by_symbol: HashMap<String, AssetQuote> = rows
        .into_iter()
        .map(|row| (row.symbol.clone(), row))
        .collect();
    roster
        .iter()
        .map(|spec| {
            by_symbol
                .remove(&spec.symbol)
                .unwrap_or_else(|| AssetQuote::unavailable(&spec.symbol))
        })
        .collect()
}

fn note_failure(_capability: Capability, _e: &RapportError) {
    #[cfg(feature = "tracing")]
    if _e.is_actionable() {
        tracing::warn!(
            capability = %_capability,
            error = %_e,
            "feed failed; section renders unavailable",
        );
    }
}

fn absorb(
    capability: Capability,
    res: Result<IndicatorSnapshot, RapportError>,
) -> IndicatorSnapshot {
    match res {
        Ok(snap) => snap,
        Err(e) => {
            note_failure(capability, &e);
            IndicatorSnapshot::unavailable()
        }
    }
}

impl Rapport {
    /// Start building a new `Rapport` instance.
    #[must_use]
    pub fn builder() -> RapportBuilder {
        RapportBuilder::new()
    }

    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "rapport::core::provider_call_with_timeout",
            skip(fut),
            fields(connector = connector_name, capability = %capability),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: Capability,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, RapportError>
    where
        Fut: core::future::Future<Output = Result<T, RapportError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(RapportError::provider_timeout(connector_name, capability.as_str())))
    }

    /// Gather every report section, dated today (UTC).
    pub async fn snapshot(&self) -> MarketSnapshot {
        self.snapshot_for_date(Utc::now().date_naive()).await
    }

    /// Gather every report section for a caller-chosen report date.
    ///
    /// Settle-all aggregation: the four capability calls run concurrently,
    /// each bounded by the per-call timeout; one call's failure or timeout
    /// never prevents the others' results from reaching the snapshot. The
    /// output shape is always complete: a failed section carries unavailable
    /// leaves, and the static recommendation rows are attached regardless.
    /// Given identical upstream answers and the same date, two calls return
    /// identical snapshots.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "rapport::core::snapshot", skip(self), fields(date = %report_date)),
    )]
    pub async fn snapshot_for_date(&self, report_date: NaiveDate) -> MarketSnapshot {
        let timeout = self.cfg.provider_timeout;
        let name = self.connector.name();

        let prices = async {
            match self.connector.as_price_provider() {
                Some(p) => {
                    Self::provider_call_with_timeout(
                        name,
                        Capability::Prices,
                        timeout,
                        p.asset_quotes(&self.cfg.assets),
                    )
                    .await
                }
                None => Err(RapportError::unsupported(Capability::Prices.as_str())),
            }
        };
        let sentiment = async {
            match self.connector.as_sentiment_provider() {
                Some(p) => {
                    Self::provider_call_with_timeout(
                        name,
                        Capability::Sentiment,
                        timeout,
                        p.sentiment(),
                    )
                    .await
                }
                None => Err(RapportError::unsupported(Capability::Sentiment.as_str())),
            }
        };
        let dominance = async {
            match self.connector.as_dominance_provider() {
                Some(p) => {
                    Self::provider_call_with_timeout(
                        name,
                        Capability::Dominance,
                        timeout,
                        p.dominance(),
                    )
                    .await
                }
                None => Err(RapportError::unsupported(Capability::Dominance.as_str())),
            }
        };
        let volatility = async {
            match self.connector.as_volatility_provider() {
                Some(p) => {
                    Self::provider_call_with_timeout(
                        name,
                        Capability::Volatility,
                        timeout,
                        p.volatility(),
                    )
                    .await
                }
                None => Err(RapportError::unsupported(Capability::Volatility.as_str())),
            }
        };

        let joined = with_request_deadline(
            self.cfg.request_timeout,
            futures::future::join4(prices, sentiment, dominance, volatility),
        )
        .await;
        let (prices, sentiment, dominance, volatility) = joined.unwrap_or_else(|_| {
            (
                Err(RapportError::request_timeout(Capability::Prices.as_str())),
                Err(RapportError::request_timeout(Capability::Sentiment.as_str())),
                Err(RapportError::request_timeout(Capability::Dominance.as_str())),
                Err(RapportError::request_timeout(Capability::Volatility.as_str())),
            )
        });

        let assets = match prices {
            Ok(rows) => align_roster(&self.cfg.assets, rows),
            Err(e) => {
                note_failure(Capability::Prices, &e);
                self.cfg
                    .assets
                    .iter()
                    .map(|spec| AssetQuote::unavailable(&spec.symbol))
                    .collect()
            }
        };

        MarketSnapshot {
            report_date,
            assets,
            sentiment: absorb(Capability::Sentiment, sentiment),
            dominance: absorb(Capability::Dominance, dominance),
            volatility: absorb(Capability::Volatility, volatility),
            recommendations: reference::recommendations_for(&self.cfg.assets),
        }
    }

    /// Generate the finished report as PDF bytes, dated today (UTC).
    ///
    /// Never fails: feed problems already surfaced as unavailable leaves in
    /// the snapshot, and a composition error falls back to the one-page
    /// failure notice.
    pub async fn generate_pdf(&self) -> Vec<u8> {
        let snapshot = self.snapshot().await;
        match compose::compose(&snapshot) {
            Ok(doc) => doc.to_bytes(),
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::error!(error = %e, "composition failed; rendering failure notice");
                compose::failure_document(&e.to_string()).to_bytes()
            }
        }
    }
}
