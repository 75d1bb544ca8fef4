//! Composition of normalized snapshots into the fixed report structure.

use chrono::NaiveDate;
use rapport::compose::{compose, failure_document};
use rapport::{
    AssetQuote, AssetSpec, DrawCmd, IndicatorSnapshot, MarketSnapshot, Outcome, SealedDocument,
    recommendations_for,
};
use rust_decimal::Decimal;
use std::str::FromStr;

fn report_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 27).unwrap()
}

fn dec(s: &str) -> Outcome<Decimal> {
    Outcome::Value(Decimal::from_str(s).unwrap())
}

/// All text runs across all pages, in placement order.
fn text_runs(doc: &SealedDocument) -> Vec<String> {
    doc.pages()
        .iter()
        .flat_map(|page| page.commands())
        .filter_map(|cmd| match cmd {
            DrawCmd::Text { text, .. } => Some(text.clone()),
            DrawCmd::Rect { .. } => None,
        })
        .collect()
}

fn page_texts(doc: &SealedDocument, idx: usize) -> Vec<String> {
    doc.pages()[idx]
        .commands()
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCmd::Text { text, .. } => Some(text.clone()),
            DrawCmd::Rect { .. } => None,
        })
        .collect()
}

fn empty_snapshot() -> MarketSnapshot {
    let roster = AssetSpec::default_roster();
    MarketSnapshot {
        report_date: report_date(),
        assets: roster
            .iter()
            .map(|spec| AssetQuote::unavailable(&spec.symbol))
            .collect(),
        sentiment: IndicatorSnapshot::unavailable(),
        dominance: IndicatorSnapshot::unavailable(),
        volatility: IndicatorSnapshot::unavailable(),
        recommendations: recommendations_for(&roster),
    }
}

#[test]
fn partial_row_renders_value_and_placeholder_side_by_side() {
    let mut snapshot = empty_snapshot();
    snapshot.assets = vec![AssetQuote {
        symbol: "SYM".to_string(),
        price: dec("100"),
        change_24h: dec("5"),
        change_7d: Outcome::Unavailable,
        market_cap: Outcome::Unavailable,
        volume_24h: Outcome::Unavailable,
    }];
    snapshot.recommendations = Vec::new();

    let doc = compose(&snapshot).unwrap();
    let texts = text_runs(&doc);
    let sym = texts.iter().position(|t| t == "SYM").unwrap();
    assert_eq!(texts[sym + 1], "$100.00");
    assert_eq!(texts[sym + 2], "+5.00%");
    assert_eq!(texts[sym + 3], "N/A");
}

#[test]
fn all_failed_snapshot_still_carries_the_full_structure() {
    let doc = compose(&empty_snapshot()).unwrap();
    let texts = text_runs(&doc);

    let heading_positions: Vec<usize> = [
        "Kryptopriser og utvikling:",
        "Markedsindikatorer:",
        "Analytikeranbefalinger:",
        "Kommentarer og forbehold:",
    ]
    .iter()
    .map(|h| texts.iter().position(|t| t == *h).unwrap())
    .collect();
    assert!(heading_positions.windows(2).all(|w| w[0] < w[1]));

    // Seven asset rows with five unavailable figures each.
    let na_cells = texts.iter().filter(|t| t.as_str() == "N/A").count();
    assert!(na_cells >= 7 * 5 + 3 * 3);

    // The static recommendation rows survive a total feed outage.
    assert!(texts.iter().any(|t| t == "Hold (51%)"));
    assert!(texts.iter().any(|t| t == "Sell (55%)"));
}

#[test]
fn indicator_rows_use_their_stated_precision() {
    let mut snapshot = empty_snapshot();
    snapshot.sentiment = IndicatorSnapshot {
        current: dec("61.4"),
        change_1d: dec("2"),
        change_7d: dec("-3"),
    };
    snapshot.dominance = IndicatorSnapshot {
        current: dec("59.849"),
        change_1d: Outcome::Unavailable,
        change_7d: Outcome::Unavailable,
    };
    snapshot.volatility = IndicatorSnapshot {
        current: dec("16.39"),
        change_1d: dec("-0.21"),
        change_7d: dec("1.02"),
    };

    let doc = compose(&snapshot).unwrap();
    let texts = text_runs(&doc);
    let fng = texts.iter().position(|t| t == "Fear & Greed Index").unwrap();
    assert_eq!(texts[fng + 1], "61");
    assert_eq!(texts[fng + 2], "2");
    assert_eq!(texts[fng + 3], "-3");

    let dom = texts.iter().position(|t| t == "BTC Dominance %").unwrap();
    assert_eq!(texts[dom + 1], "59.85");
    assert_eq!(texts[dom + 2], "N/A");

    let vix = texts.iter().position(|t| t == "VIX Index").unwrap();
    assert_eq!(texts[vix + 1], "16.39");
    assert_eq!(texts[vix + 2], "-0.21");
}

#[test]
fn title_carries_the_report_date() {
    let doc = compose(&empty_snapshot()).unwrap();
    let texts = text_runs(&doc);
    assert_eq!(texts[0], "Daglig Kryptomarked Rapport \u{2013} 2026-08-27");
}

#[test]
fn commentary_opens_its_own_page() {
    let doc = compose(&empty_snapshot()).unwrap();
    assert_eq!(doc.page_count(), 2);
    let second = page_texts(&doc, 1);
    assert_eq!(second[0], "Kommentarer og forbehold:");
    assert!(second.len() > 1);
}

#[test]
fn identical_snapshots_render_to_identical_bytes() {
    let snapshot = empty_snapshot();
    let a = compose(&snapshot).unwrap().to_bytes();
    let b = compose(&snapshot).unwrap().to_bytes();
    assert_eq!(a, b);
}

#[test]
fn failure_document_states_the_reason() {
    let doc = failure_document("upstream contract violated");
    assert_eq!(doc.page_count(), 1);
    let texts = page_texts(&doc, 0);
    assert_eq!(texts[0], "Rapportgenerering feilet.");
    assert_eq!(texts[1], "upstream contract violated");
}

#[test]
fn failure_document_defaults_an_empty_reason() {
    let doc = failure_document("   ");
    let texts = page_texts(&doc, 0);
    assert_eq!(texts[1], "Ukjent feil");
}

#[test]
fn failure_document_wraps_a_long_reason() {
    let reason = "feil ".repeat(200);
    let doc = failure_document(&reason);
    let texts = page_texts(&doc, 0);
    // Many wrapped lines, all on the single notice page.
    assert_eq!(doc.page_count(), 1);
    assert!(texts.len() > 3);
}
