use httpmock::prelude::*;
use rapport_core::RapportError;
use rapport_core::connector::{DominanceProvider, PriceProvider, SentimentProvider, VolatilityProvider};
use rapport_core::types::{AssetSpec, Outcome};
use rapport_feeds::FeedsConnector;
use rapport_feeds::adapter::RealAdapter;
use rust_decimal::Decimal;
use url::Url;

fn base(server: &MockServer) -> Url {
    Url::parse(&server.base_url()).expect("mock server URL parses")
}

fn dec(s: &str) -> Decimal {
    s.parse().expect("decimal literal")
}

#[tokio::test]
async fn markets_listing_maps_rows_end_to_end() {
    let server = MockServer::start_async().await;
    let listing = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/coins/markets")
                .query_param("vs_currency", "usd")
                .query_param("ids", "bitcoin,ethereum")
                .query_param("price_change_percentage", "24h,7d");
            then.status(200)
                .header("content-type", "application/json")
                .body(
                    r#"[
                  {"id":"bitcoin","current_price":65000.5,
                   "price_change_percentage_24h_in_currency":1.85,
                   "price_change_percentage_7d_in_currency":5.25,
                   "market_cap":1280000000000,"total_volume":35000000000},
                  {"id":"ethereum","current_price":3400.25,
                   "price_change_percentage_24h_in_currency":-0.4,
                   "price_change_percentage_7d_in_currency":2.1,
                   "market_cap":408000000000,"total_volume":18000000000}
                ]"#,
                );
        })
        .await;

    let adapter = RealAdapter::new(reqwest::Client::new()).with_markets_base(base(&server));
    let feeds = FeedsConnector::from_adapter(&adapter);

    let roster = vec![
        AssetSpec::new("bitcoin", "BTC"),
        AssetSpec::new("ethereum", "ETH"),
    ];
    let quotes = feeds.asset_quotes(&roster).await.expect("mocked listing succeeds");

    listing.assert_async().await;
    assert_eq!(quotes[0].symbol, "BTC");
    assert_eq!(quotes[0].price, Outcome::Value(dec("65000.5")));
    assert_eq!(quotes[0].change_24h, Outcome::Value(dec("1.85")));
    assert_eq!(quotes[0].market_cap, Outcome::Value(dec("1280000000000")));
    assert_eq!(quotes[1].symbol, "ETH");
    assert_eq!(quotes[1].change_24h, Outcome::Value(dec("-0.4")));
    assert_eq!(quotes[1].change_7d, Outcome::Value(dec("2.1")));
}

#[tokio::test]
async fn missing_weekly_change_falls_back_to_the_price_series() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/coins/markets");
            then.status(200)
                .header("content-type", "application/json")
                .body(
                    r#"[{"id":"bitcoin","current_price":110.0,
                     "price_change_percentage_24h_in_currency":1.0,
                     "market_cap":1000,"total_volume":100}]"#,
                );
        })
        .await;
    let chart = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/coins/bitcoin/market_chart")
                .query_param("vs_currency", "usd")
                .query_param("days", "7");
            then.status(200)
                .header("content-type", "application/json")
                .body(
                    r#"{"prices":[[1700000000000,100.0],
                                [1700086400000,105.0],
                                [1700172800000,110.0]]}"#,
                );
        })
        .await;

    let adapter = RealAdapter::new(reqwest::Client::new()).with_markets_base(base(&server));
    let feeds = FeedsConnector::from_adapter(&adapter);

    let quotes = feeds
        .asset_quotes(&[AssetSpec::new("bitcoin", "BTC")])
        .await
        .expect("mocked listing succeeds");

    chart.assert_async().await;
    assert_eq!(quotes[0].change_7d, Outcome::Value(Decimal::from(10)));
}

#[tokio::test]
async fn sentiment_series_is_parsed_and_derived() {
    let server = MockServer::start_async().await;
    let fng = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/fng/")
                .query_param("limit", "8")
                .query_param("format", "json");
            then.status(200)
                .header("content-type", "application/json")
                .body(
                    r#"{"name":"Fear and Greed Index","data":[
                  {"value":"64","value_classification":"Greed","timestamp":"1755820800"},
                  {"value":"61","value_classification":"Greed","timestamp":"1755734400"},
                  {"value":"59","value_classification":"Greed","timestamp":"1755648000"},
                  {"value":"55","value_classification":"Greed","timestamp":"1755561600"},
                  {"value":"50","value_classification":"Neutral","timestamp":"1755475200"},
                  {"value":"48","value_classification":"Neutral","timestamp":"1755388800"},
                  {"value":"45","value_classification":"Fear","timestamp":"1755302400"},
                  {"value":"70","value_classification":"Greed","timestamp":"1755216000"}
                ]}"#,
                );
        })
        .await;

    let adapter = RealAdapter::new(reqwest::Client::new()).with_sentiment_base(base(&server));
    let feeds = FeedsConnector::from_adapter(&adapter);

    let snapshot = feeds.sentiment().await.expect("mocked feed succeeds");

    fng.assert_async().await;
    assert_eq!(snapshot.current, Outcome::Value(Decimal::from(64)));
    assert_eq!(snapshot.change_1d, Outcome::Value(Decimal::from(3)));
    assert_eq!(snapshot.change_7d, Outcome::Value(Decimal::from(-6)));
}

#[tokio::test]
async fn unparseable_sentiment_samples_drop_out_of_the_window() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/fng/");
            then.status(200)
                .header("content-type", "application/json")
                .body(
                    r#"{"data":[{"value":"64"},{"value":"oops"},{"value":null},{"value":"59"}]}"#,
                );
        })
        .await;

    let adapter = RealAdapter::new(reqwest::Client::new()).with_sentiment_base(base(&server));
    let feeds = FeedsConnector::from_adapter(&adapter);

    let snapshot = feeds.sentiment().await.expect("mocked feed succeeds");

    // The surviving window is [64, 59].
    assert_eq!(snapshot.current, Outcome::Value(Decimal::from(64)));
    assert_eq!(snapshot.change_1d, Outcome::Value(Decimal::from(5)));
    assert!(snapshot.change_7d.is_unavailable());
}

#[tokio::test]
async fn dominance_reads_the_global_market_share() {
    let server = MockServer::start_async().await;
    let global = server
        .mock_async(|when, then| {
            when.method(GET).path("/global");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"data":{"market_cap_percentage":{"btc":54.3,"eth":17.2}}}"#);
        })
        .await;

    let adapter = RealAdapter::new(reqwest::Client::new()).with_markets_base(base(&server));
    let feeds = FeedsConnector::from_adapter(&adapter);

    let snapshot = feeds.dominance().await.expect("mocked feed succeeds");

    global.assert_async().await;
    assert_eq!(snapshot.current, Outcome::Value(dec("54.3")));
    assert!(snapshot.change_1d.is_unavailable());
    assert!(snapshot.change_7d.is_unavailable());
}

#[tokio::test]
async fn http_errors_surface_as_connector_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/global");
            then.status(503);
        })
        .await;

    let adapter = RealAdapter::new(reqwest::Client::new()).with_markets_base(base(&server));
    let feeds = FeedsConnector::from_adapter(&adapter);

    let err = feeds.dominance().await.expect_err("must fail");
    match err {
        RapportError::Connector { connector, msg } => {
            assert_eq!(connector, "rapport-feeds");
            assert!(msg.contains("HTTP 503"), "unexpected message: {msg}");
        }
        other => panic!("expected connector error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_payloads_surface_as_data_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/global");
            then.status(200)
                .header("content-type", "text/html")
                .body("<html>upstream maintenance page</html>");
        })
        .await;

    let adapter = RealAdapter::new(reqwest::Client::new()).with_markets_base(base(&server));
    let feeds = FeedsConnector::from_adapter(&adapter);

    let err = feeds.dominance().await.expect_err("must fail");
    assert!(matches!(err, RapportError::Data(_)), "got {err:?}");
}

#[tokio::test]
async fn a_stalled_upstream_times_out_as_a_connector_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/global");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"data":{"market_cap_percentage":{"btc":54.3}}}"#)
                .delay(std::time::Duration::from_millis(500));
        })
        .await;

    // Client deadline well under the mocked delay.
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_millis(50))
        .build()
        .expect("client builds");
    let adapter = RealAdapter::new(client).with_markets_base(base(&server));
    let feeds = FeedsConnector::from_adapter(&adapter);

    let err = feeds.dominance().await.expect_err("must time out");
    match err {
        RapportError::Connector { connector, msg } => {
            assert_eq!(connector, "rapport-feeds");
            assert!(msg.contains("timed out"), "unexpected message: {msg}");
        }
        other => panic!("expected connector error, got {other:?}"),
    }
}

#[tokio::test]
async fn volatility_closes_survive_null_holidays() {
    let server = MockServer::start_async().await;
    let chart = server
        .mock_async(|when, then| {
            when.method(GET)
                .query_param("range", "8d")
                .query_param("interval", "1d");
            then.status(200)
                .header("content-type", "application/json")
                .body(
                    r#"{"chart":{"result":[{"meta":{"symbol":"^VIX"},
                     "indicators":{"quote":[{"close":[20.0,null,22.0,24.0,null,21.0,18.0,25.0]}]}}],
                     "error":null}}"#,
                );
        })
        .await;

    let adapter = RealAdapter::new(reqwest::Client::new()).with_volatility_base(base(&server));
    let feeds = FeedsConnector::from_adapter(&adapter);

    let snapshot = feeds.volatility().await.expect("mocked feed succeeds");

    chart.assert_async().await;
    // Nulls drop out: the series is [20, 22, 24, 21, 18, 25].
    assert_eq!(snapshot.current, Outcome::Value(Decimal::from(25)));
    assert_eq!(snapshot.change_1d, Outcome::Value(Decimal::from(7)));
    assert_eq!(snapshot.change_7d, Outcome::Value(Decimal::from(5)));
}
