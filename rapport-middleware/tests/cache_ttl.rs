use std::time::Duration;

use rapport_core::connector::SentimentProvider as _;
use rapport_core::types::{CacheConfig, Capability, IndicatorSnapshot, Outcome};
use rapport_middleware::ConnectorBuilder;
use rapport_mock::{DynamicMockConnector, MockBehavior};
use rust_decimal::Decimal;

fn snapshot(level: i64) -> IndicatorSnapshot {
    IndicatorSnapshot {
        current: Outcome::Value(Decimal::from(level)),
        change_1d: Outcome::Unavailable,
        change_7d: Outcome::Unavailable,
    }
}

fn cfg(ttl: Duration) -> CacheConfig {
    let mut cfg = CacheConfig::default();
    cfg.sentiment_ttl = Some(ttl);
    cfg
}

// The cache expires against the wall clock, so these tests sleep for real
// instead of using the paused test clock.
#[tokio::test]
async fn ttl_expiration_causes_refetch() {
    let (raw, controller) = DynamicMockConnector::new_with_controller("feeds");
    controller
        .set_sentiment_behavior(MockBehavior::Return(snapshot(64)))
        .await;

    let wrapped = ConnectorBuilder::new(raw)
        .with_cache(&cfg(Duration::from_millis(50)))
        .build();
    let sp = wrapped.as_sentiment_provider().expect("sentiment provider");

    let _ = sp.sentiment().await.expect("miss -> fetch");
    assert_eq!(controller.call_count(Capability::Sentiment).await, 1);
    let _ = sp.sentiment().await.expect("hit");
    assert_eq!(controller.call_count(Capability::Sentiment).await, 1);

    tokio::time::sleep(Duration::from_millis(80)).await;
    let _ = sp.sentiment().await.expect("expired -> refetch");
    assert_eq!(controller.call_count(Capability::Sentiment).await, 2);
}

#[tokio::test]
async fn ttl_zero_disables_caching() {
    let (raw, controller) = DynamicMockConnector::new_with_controller("feeds");
    controller
        .set_sentiment_behavior(MockBehavior::Return(snapshot(64)))
        .await;

    let wrapped = ConnectorBuilder::new(raw)
        .with_cache(&cfg(Duration::ZERO))
        .build();
    let sp = wrapped.as_sentiment_provider().expect("sentiment provider");

    let _ = sp.sentiment().await.expect("first ok");
    let _ = sp.sentiment().await.expect("second ok");
    assert_eq!(
        controller.call_count(Capability::Sentiment).await,
        2,
        "no caching when ttl is zero"
    );
}

#[tokio::test]
async fn fresh_value_replaces_expired_entry() {
    let (raw, controller) = DynamicMockConnector::new_with_controller("feeds");
    controller
        .set_sentiment_behavior(MockBehavior::Return(snapshot(60)))
        .await;

    let wrapped = ConnectorBuilder::new(raw)
        .with_cache(&cfg(Duration::from_millis(50)))
        .build();
    let sp = wrapped.as_sentiment_provider().expect("sentiment provider");

    let first = sp.sentiment().await.expect("first ok");
    assert_eq!(first.current, Outcome::Value(Decimal::from(60)));

    controller
        .set_sentiment_behavior(MockBehavior::Return(snapshot(70)))
        .await;
    let cached = sp.sentiment().await.expect("still cached");
    assert_eq!(cached.current, Outcome::Value(Decimal::from(60)));

    tokio::time::sleep(Duration::from_millis(80)).await;
    let refreshed = sp.sentiment().await.expect("refetched");
    assert_eq!(refreshed.current, Outcome::Value(Decimal::from(70)));
}
