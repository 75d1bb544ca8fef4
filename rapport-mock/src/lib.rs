use async_trait::async_trait;
use rapport_core::connector::{
    DominanceProvider, FeedConnector, PriceProvider, SentimentProvider, VolatilityProvider,
};
use rapport_core::types::{AssetQuote, AssetSpec, IndicatorSnapshot, RapportError};

mod fixtures;

pub mod dynamic;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};

/// Mock connector for CI-safe examples. Provides deterministic data from static fixtures.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn maybe_fail_or_timeout(symbol: &str, capability: &'static str) -> Result<(), RapportError> {
        match symbol {
            "FAIL" => Err(RapportError::connector(
                "rapport-mock",
                format!("forced failure: {capability}"),
            )),
            "TIMEOUT" => {
                // Simulate brief latency; orchestrator may time out depending on config
                // Keep short to avoid slowing tests excessively
                let () = std::thread::sleep(std::time::Duration::from_millis(200));
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl FeedConnector for MockConnector {
    fn name(&self) -> &'static str {
        "rapport-mock"
    }
    fn vendor(&self) -> &'static str {
        "Mock"
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

#[async_trait]
impl PriceProvider for MockConnector {
    async fn asset_quotes(&self, assets: &[AssetSpec]) -> Result<Vec<AssetQuote>, RapportError> {
        let mut rows = Vec::with_capacity(assets.len());
        for spec in assets {
            Self::maybe_fail_or_timeout(&spec.symbol, "prices")?;
            let row = fixtures::markets::by_id(&spec.id, &spec.symbol)
                .unwrap_or_else(|| AssetQuote::unavailable(&spec.symbol));
            rows.push(row);
        }
        Ok(rows)
    }
}

#[async_trait]
impl SentimentProvider for MockConnector {
    async fn sentiment(&self) -> Result<IndicatorSnapshot, RapportError> {
        Ok(fixtures::indicators::sentiment())
    }
}

#[async_trait]
impl DominanceProvider for MockConnector {
    async fn dominance(&self) -> Result<IndicatorSnapshot, RapportError> {
        Ok(fixtures::indicators::dominance())
    }
}

#[async_trait]
impl VolatilityProvider for MockConnector {
    async fn volatility(&self) -> Result<IndicatorSnapshot, RapportError> {
        Ok(fixtures::indicators::volatility())
    }
}
