#![cfg(feature = "test-adapters")]

use std::sync::Arc;

use rapport_core::RapportError;
use rapport_core::connector::{
    DominanceProvider, PriceProvider, SentimentProvider, VolatilityProvider,
};
use rapport_core::types::AssetSpec;
use rapport_feeds::{FeedsConnector, adapter};

struct MarketsOnly {
    markets: Arc<dyn adapter::MarketsFeed>,
}
impl adapter::CloneArcAdapters for MarketsOnly {
    fn clone_arc_markets(&self) -> Arc<dyn adapter::MarketsFeed> {
        self.markets.clone()
    }
}

struct SentimentOnly {
    sentiment: Arc<dyn adapter::SentimentFeed>,
}
impl adapter::CloneArcAdapters for SentimentOnly {
    fn clone_arc_sentiment(&self) -> Arc<dyn adapter::SentimentFeed> {
        self.sentiment.clone()
    }
}

struct GlobalOnly {
    global: Arc<dyn adapter::GlobalFeed>,
}
impl adapter::CloneArcAdapters for GlobalOnly {
    fn clone_arc_global(&self) -> Arc<dyn adapter::GlobalFeed> {
        self.global.clone()
    }
}

struct VixOnly {
    vix: Arc<dyn adapter::VixFeed>,
}
impl adapter::CloneArcAdapters for VixOnly {
    fn clone_arc_vix(&self) -> Arc<dyn adapter::VixFeed> {
        self.vix.clone()
    }
}

struct NoAdapters;
impl adapter::CloneArcAdapters for NoAdapters {}

fn roster() -> Vec<AssetSpec> {
    vec![AssetSpec::new("bitcoin", "BTC")]
}

#[tokio::test]
async fn opaque_errors_become_connector_errors() {
    let markets =
        <dyn adapter::MarketsFeed>::from_fn(|_| Err(RapportError::Other("boom".into())));
    let feeds = FeedsConnector::from_adapter(&MarketsOnly { markets });

    let err = feeds.asset_quotes(&roster()).await.expect_err("must fail");
    match err {
        RapportError::Connector { connector, msg } => {
            assert_eq!(connector, "rapport-feeds");
            assert_eq!(msg, "boom");
        }
        other => panic!("expected connector error, got {other:?}"),
    }
}

#[tokio::test]
async fn upstream_not_found_messages_map_to_not_found() {
    let sentiment = <dyn adapter::SentimentFeed>::from_fn(|_| {
        Err(RapportError::connector("alternative.me", "404 Not Found"))
    });
    let feeds = FeedsConnector::from_adapter(&SentimentOnly { sentiment });

    let err = feeds.sentiment().await.expect_err("must fail");
    match err {
        RapportError::NotFound { what } => assert_eq!(what, "sentiment series"),
        other => panic!("expected not-found error, got {other:?}"),
    }
}

#[tokio::test]
async fn no_data_messages_map_to_not_found() {
    let vix = <dyn adapter::VixFeed>::from_fn(|_| {
        Err(RapportError::connector(
            "yahoo",
            "No data found, symbol may be delisted",
        ))
    });
    let feeds = FeedsConnector::from_adapter(&VixOnly { vix });

    let err = feeds.volatility().await.expect_err("must fail");
    match err {
        RapportError::NotFound { what } => assert_eq!(what, "volatility closes"),
        other => panic!("expected not-found error, got {other:?}"),
    }
}

#[tokio::test]
async fn foreign_connector_failures_are_rebranded() {
    let global = <dyn adapter::GlobalFeed>::from_fn(|| {
        Err(RapportError::connector("someone-else", "HTTP 503"))
    });
    let feeds = FeedsConnector::from_adapter(&GlobalOnly { global });

    let err = feeds.dominance().await.expect_err("must fail");
    match err {
        RapportError::Connector { connector, msg } => {
            assert_eq!(connector, "rapport-feeds");
            assert_eq!(msg, "HTTP 503");
        }
        other => panic!("expected connector error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_handles_surface_as_unsupported() {
    let feeds = FeedsConnector::from_adapter(&NoAdapters);

    let err = feeds.asset_quotes(&roster()).await.expect_err("must fail");
    match err {
        RapportError::Unsupported { capability } => assert_eq!(capability, "prices/markets"),
        other => panic!("expected unsupported error, got {other:?}"),
    }

    let err = feeds.sentiment().await.expect_err("must fail");
    match err {
        RapportError::Unsupported { capability } => assert_eq!(capability, "sentiment"),
        other => panic!("expected unsupported error, got {other:?}"),
    }
}
