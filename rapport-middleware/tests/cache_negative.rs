use rapport_core::connector::{DominanceProvider as _, SentimentProvider as _};
use rapport_core::types::{CacheConfig, Capability, IndicatorSnapshot, Outcome, RapportError};
use rapport_middleware::ConnectorBuilder;
use rapport_mock::{DynamicMockConnector, MockBehavior};
use rust_decimal::Decimal;

#[tokio::test]
async fn failures_are_never_cached() {
    let (raw, controller) = DynamicMockConnector::new_with_controller("feeds");
    controller
        .set_sentiment_behavior(MockBehavior::Fail(RapportError::connector(
            "feeds", "upstream 500",
        )))
        .await;

    // Default config enables sentiment caching; only successes may be stored
    let wrapped = ConnectorBuilder::new(raw)
        .with_cache(&CacheConfig::default())
        .build();
    let sp = wrapped.as_sentiment_provider().expect("sentiment provider");

    assert!(sp.sentiment().await.is_err());
    assert!(sp.sentiment().await.is_err());
    assert_eq!(
        controller.call_count(Capability::Sentiment).await,
        2,
        "errors must not be cached"
    );

    // Once the feed recovers, the fresh value lands and is then served cached
    controller
        .set_sentiment_behavior(MockBehavior::Return(IndicatorSnapshot {
            current: Outcome::Value(Decimal::from(61)),
            change_1d: Outcome::Unavailable,
            change_7d: Outcome::Unavailable,
        }))
        .await;
    let recovered = sp.sentiment().await.expect("recovered");
    assert_eq!(recovered.current, Outcome::Value(Decimal::from(61)));
    assert_eq!(controller.call_count(Capability::Sentiment).await, 3);

    let _ = sp.sentiment().await.expect("cached");
    assert_eq!(controller.call_count(Capability::Sentiment).await, 3);
}

#[tokio::test]
async fn benign_not_found_is_not_cached_either() {
    let (raw, controller) = DynamicMockConnector::new_with_controller("feeds");
    controller
        .set_dominance_behavior(MockBehavior::Fail(RapportError::not_found(
            "global market data",
        )))
        .await;

    let wrapped = ConnectorBuilder::new(raw)
        .with_cache(&CacheConfig::default())
        .build();
    let dp = wrapped.as_dominance_provider().expect("dominance provider");

    assert!(matches!(
        dp.dominance().await,
        Err(RapportError::NotFound { .. })
    ));
    assert!(matches!(
        dp.dominance().await,
        Err(RapportError::NotFound { .. })
    ));
    assert_eq!(controller.call_count(Capability::Dominance).await, 2);
}
