use std::sync::Arc;

use rapport_core::connector::{FeedConnector, SentimentProvider as _, VolatilityProvider as _};
use rapport_core::types::{CacheConfig, Capability};
use rapport_middleware::ConnectorBuilder;
use rapport_mock::MockConnector;

#[tokio::test]
async fn empty_builder_returns_raw_behavior() {
    let raw: Arc<dyn FeedConnector> = Arc::new(MockConnector::new());
    let built = ConnectorBuilder::new(Arc::clone(&raw)).build();

    assert_eq!(built.name(), raw.name());
    assert_eq!(built.vendor(), raw.vendor());

    let direct = raw
        .as_volatility_provider()
        .expect("volatility provider")
        .volatility()
        .await
        .expect("direct ok");
    let routed = built
        .as_volatility_provider()
        .expect("volatility provider")
        .volatility()
        .await
        .expect("routed ok");
    assert_eq!(direct, routed);
}

#[tokio::test]
async fn caching_wrapper_forwards_identity_and_capabilities() {
    let raw: Arc<dyn FeedConnector> = Arc::new(MockConnector::new());
    let wrapped = ConnectorBuilder::new(raw)
        .with_cache(&CacheConfig::default())
        .build();

    assert_eq!(wrapped.name(), "rapport-mock");
    assert_eq!(wrapped.vendor(), "Mock");
    for capability in [
        Capability::Prices,
        Capability::Sentiment,
        Capability::Dominance,
        Capability::Volatility,
    ] {
        assert!(wrapped.supports(capability), "missing {capability}");
    }

    let snap = wrapped
        .as_sentiment_provider()
        .expect("sentiment provider")
        .sentiment()
        .await
        .expect("sentiment ok");
    let direct = MockConnector::new().sentiment().await.expect("direct ok");
    assert_eq!(snap, direct);
}
