use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use rapport_core::connector::{
    DominanceProvider, FeedConnector, PriceProvider, SentimentProvider, VolatilityProvider,
};
use rapport_core::types::{AssetQuote, AssetSpec, Capability, IndicatorSnapshot, RapportError};

/// Instruction for how a capability call should behave.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(RapportError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
    /// Return the provided value after the given delay (simulate a slow feed).
    Slow(Duration, T),
}

#[derive(Default)]
struct InternalState {
    price_rule: Option<MockBehavior<Vec<AssetQuote>>>,
    sentiment_rule: Option<MockBehavior<IndicatorSnapshot>>,
    dominance_rule: Option<MockBehavior<IndicatorSnapshot>>,
    volatility_rule: Option<MockBehavior<IndicatorSnapshot>>,
    calls: HashMap<Capability, u32>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `asset_quotes` calls.
    pub async fn set_price_behavior(&self, behavior: MockBehavior<Vec<AssetQuote>>) {
        let mut guard = self.state.lock().await;
        guard.price_rule = Some(behavior);
    }

    /// Set the behavior for `sentiment` calls.
    pub async fn set_sentiment_behavior(&self, behavior: MockBehavior<IndicatorSnapshot>) {
        let mut guard = self.state.lock().await;
        guard.sentiment_rule = Some(behavior);
    }

    /// Set the behavior for `dominance` calls.
    pub async fn set_dominance_behavior(&self, behavior: MockBehavior<IndicatorSnapshot>) {
        let mut guard = self.state.lock().await;
        guard.dominance_rule = Some(behavior);
    }

    /// Set the behavior for `volatility` calls.
    pub async fn set_volatility_behavior(&self, behavior: MockBehavior<IndicatorSnapshot>) {
        let mut guard = self.state.lock().await;
        guard.volatility_rule = Some(behavior);
    }

    /// Number of times the given capability has been invoked on the connector.
    pub async fn call_count(&self, capability: Capability) -> u32 {
        let guard = self.state.lock().await;
        guard.calls.get(&capability).copied().unwrap_or(0)
    }

    /// Clear all configured behaviors and the call log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.price_rule = None;
        guard.sentiment_rule = None;
        guard.dominance_rule = None;
        guard.volatility_rule = None;
        guard.calls.clear();
    }
}

/// A connector that defers all behavior to an external controller.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn FeedConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn FeedConnector>, controller)
    }
}

async fn settle<T>(
    behavior: Option<MockBehavior<T>>,
    capability: Capability,
) -> Result<T, RapportError> {
    match behavior {
        Some(MockBehavior::Return(v)) => Ok(v),
        Some(MockBehavior::Fail(e)) => Err(e),
        Some(MockBehavior::Hang) => {
            std::future::pending::<()>().await;
            unreachable!()
        }
        Some(MockBehavior::Slow(delay, v)) => {
            tokio::time::sleep(delay).await;
            Ok(v)
        }
        None => Err(RapportError::unsupported(capability.as_str())),
    }
}

impl FeedConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
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
impl PriceProvider for DynamicMockConnector {
    async fn asset_quotes(&self, _assets: &[AssetSpec]) -> Result<Vec<AssetQuote>, RapportError> {
        // Acquire behavior snapshot without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            *guard.calls.entry(Capability::Prices).or_insert(0) += 1;
            guard.price_rule.clone()
        };
        settle(behavior, Capability::Prices).await
    }
}

#[async_trait]
impl SentimentProvider for DynamicMockConnector {
    async fn sentiment(&self) -> Result<IndicatorSnapshot, RapportError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            *guard.calls.entry(Capability::Sentiment).or_insert(0) += 1;
            guard.sentiment_rule.clone()
        };
        settle(behavior, Capability::Sentiment).await
    }
}

#[async_trait]
impl DominanceProvider for DynamicMockConnector {
    async fn dominance(&self) -> Result<IndicatorSnapshot, RapportError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            *guard.calls.entry(Capability::Dominance).or_insert(0) += 1;
            guard.dominance_rule.clone()
        };
        settle(behavior, Capability::Dominance).await
    }
}

#[async_trait]
impl VolatilityProvider for DynamicMockConnector {
    async fn volatility(&self) -> Result<IndicatorSnapshot, RapportError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            *guard.calls.entry(Capability::Volatility).or_insert(0) += 1;
            guard.volatility_rule.clone()
        };
        settle(behavior, Capability::Volatility).await
    }
}
