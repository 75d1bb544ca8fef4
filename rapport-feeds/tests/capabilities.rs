use rapport_core::connector::{ConnectorKey, FeedConnector};
use rapport_core::types::Capability;
use rapport_feeds::FeedsConnector;

#[test]
fn feeds_connector_advertises_all_capabilities() {
    let feeds = FeedsConnector::new_default();
    assert!(feeds.as_price_provider().is_some());
    assert!(feeds.as_sentiment_provider().is_some());
    assert!(feeds.as_dominance_provider().is_some());
    assert!(feeds.as_volatility_provider().is_some());
    for capability in [
        Capability::Prices,
        Capability::Sentiment,
        Capability::Dominance,
        Capability::Volatility,
    ] {
        assert!(feeds.supports(capability));
    }
}

#[test]
fn connector_identity_is_stable() {
    let feeds = FeedsConnector::new_raw();
    assert_eq!(feeds.name(), "rapport-feeds");
    assert_eq!(feeds.key(), ConnectorKey::new("rapport-feeds"));
    assert_eq!(feeds.key(), FeedsConnector::KEY);
    assert_eq!(feeds.vendor(), "CoinGecko / Alternative.me / Yahoo Finance");
}
