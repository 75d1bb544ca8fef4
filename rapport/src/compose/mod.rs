//! Report composition: the fixed section order over the layout engine, and
//! the failure-safe renderer behind it.
//!
//! The composer does no I/O and cannot fail on missing data; every figure
//! arrives pre-normalized as an [`Outcome`](rapport_core::Outcome) and
//! renders as its value or the `N/A` marker. The only failure channel left
//! is a layout contract violation, which is a programming error; the
//! orchestrator boundary turns even that into [`failure_document`] so the
//! caller always receives a renderable PDF.

mod format;

pub use format::{NA, num, pct, usd};

use rapport_core::{IndicatorSnapshot, MarketSnapshot, RecommendationCounts};
use rapport_pdf::{Document, FontFace, LayoutError, PageGeometry, SealedDocument};
use rust_decimal::RoundingStrategy;

/// MIME type of the generated payload, for the serving boundary.
pub const CONTENT_TYPE: &str = "application/pdf";
/// Disposition hint naming the file inline, for the serving boundary.
pub const CONTENT_DISPOSITION: &str = "inline; filename=kryptorapport.pdf";

const TITLE_PREFIX: &str = "Daglig Kryptomarked Rapport";
const TITLE_SIZE: f32 = 20.0;
const TITLE_ADVANCE: f32 = 40.0;
const HEADING_SIZE: f32 = 14.0;
const HEADING_ADVANCE: f32 = 22.0;
const SECTION_GAP: f32 = 24.0;
const TABLE_ROW_HEIGHT: f32 = 20.0;
const TABLE_FONT_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 12.0;
const BODY_LINE_HEIGHT: f32 = 16.0;

const COMMENTARY: &str = "\
- Verdier som ikke kunne hentes i tide eller feilet vises som N/A (fail-safe).\n\
- 24h og 7d endring hentes fra CoinGecko /coins/markets; VIX hentes fra Yahoo Finance.\n\
- BTC-dominanse og Fear & Greed caches i 5 minutter for stabilitet.\n\
- Rapporten er informativ og ikke investeringsråd.";

/// Render a snapshot into the finished, sealed report document.
///
/// Section order is fixed: title, price table, indicator table,
/// recommendation table, then the commentary on a fresh page. Page breaks
/// inside a section are the layout engine's concern, not the composer's.
///
/// # Errors
/// Only on a layout contract violation, which indicates a bug in the fixed
/// section metrics rather than a runtime condition.
pub fn compose(snapshot: &MarketSnapshot) -> Result<SealedDocument, LayoutError> {
    let geometry = PageGeometry::default();
    let mut doc = Document::new(geometry)?;

    doc.text_line(
        &format!(
            "{TITLE_PREFIX} \u{2013} {}",
            snapshot.report_date.format("%Y-%m-%d")
        ),
        FontFace::HelveticaBold,
        TITLE_SIZE,
        TITLE_ADVANCE,
    )?;

    doc.text_line(
        "Kryptopriser og utvikling:",
        FontFace::HelveticaBold,
        HEADING_SIZE,
        HEADING_ADVANCE,
    )?;
    let price_rows: Vec<Vec<String>> = snapshot
        .assets
        .iter()
        .map(|q| {
            vec![
                q.symbol.clone(),
                usd(q.price),
                pct(q.change_24h),
                pct(q.change_7d),
                usd(q.market_cap),
                usd(q.volume_24h),
            ]
        })
        .collect();
    doc.table(
        &[
            "Symbol",
            "Pris",
            "Endring 24h",
            "Endring 7d",
            "Markedsverdi",
            "Volum 24h",
        ],
        &price_rows,
        &[60.0, 90.0, 95.0, 95.0, 120.0, 120.0],
        TABLE_ROW_HEIGHT,
        FontFace::Helvetica,
        TABLE_FONT_SIZE,
    )?;
    doc.vspace(SECTION_GAP);

    doc.text_line(
        "Markedsindikatorer:",
        FontFace::HelveticaBold,
        HEADING_SIZE,
        HEADING_ADVANCE,
    )?;
    let indicator_rows = vec![
        indicator_row("Fear & Greed Index", &snapshot.sentiment, 0),
        indicator_row("BTC Dominance %", &snapshot.dominance, 2),
        indicator_row("VIX Index", &snapshot.volatility, 2),
    ];
    doc.table(
        &["Indikator", "Verdi", "Endring 1d", "Endring 7d"],
        &indicator_rows,
        &[160.0, 100.0, 100.0, 100.0],
        TABLE_ROW_HEIGHT,
        FontFace::Helvetica,
        TABLE_FONT_SIZE,
    )?;
    doc.vspace(SECTION_GAP);

    doc.text_line(
        "Analytikeranbefalinger:",
        FontFace::HelveticaBold,
        HEADING_SIZE,
        HEADING_ADVANCE,
    )?;
    let rec_rows: Vec<Vec<String>> = snapshot
        .recommendations
        .iter()
        .map(|rec| {
            vec![
                rec.symbol.clone(),
                rec.counts.buy.to_string(),
                rec.counts.hold.to_string(),
                rec.counts.sell.to_string(),
                consensus_cell(rec.counts),
            ]
        })
        .collect();
    doc.table(
        &["Symbol", "Kjøp", "Hold", "Selg", "Konsensus"],
        &rec_rows,
        &[60.0, 80.0, 80.0, 80.0, 120.0],
        TABLE_ROW_HEIGHT,
        FontFace::Helvetica,
        TABLE_FONT_SIZE,
    )?;

    // Commentary always opens its own page.
    doc.break_page();
    doc.text_line(
        "Kommentarer og forbehold:",
        FontFace::HelveticaBold,
        HEADING_SIZE,
        HEADING_ADVANCE,
    )?;
    doc.paragraph(
        COMMENTARY,
        FontFace::Helvetica,
        BODY_SIZE,
        BODY_LINE_HEIGHT,
        geometry.content_width(),
    )?;

    Ok(doc.seal())
}

fn indicator_row(name: &str, snap: &IndicatorSnapshot, decimals: u32) -> Vec<String> {
    vec![
        name.to_owned(),
        num(snap.current, decimals),
        num(snap.change_1d, decimals),
        num(snap.change_7d, decimals),
    ]
}

fn consensus_cell(counts: RecommendationCounts) -> String {
    match counts.consensus() {
        Some((stance, share)) => {
            let share = share.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
            format!("{stance} ({share}%)")
        }
        None => NA.to_owned(),
    }
}

/// One-page notice stating that report generation failed.
///
/// Always succeeds; there is no further fallback layer beneath it. An empty
/// reason renders as `Ukjent feil`.
#[must_use]
pub fn failure_document(reason: &str) -> SealedDocument {
    let reason = reason.trim();
    let reason = if reason.is_empty() {
        "Ukjent feil"
    } else {
        reason
    };
    try_failure(reason).unwrap_or_else(|_| SealedDocument::blank())
}

fn try_failure(reason: &str) -> Result<SealedDocument, LayoutError> {
    let geometry = PageGeometry::default();
    let mut doc = Document::new(geometry)?;
    // Title at y 800, reason wrapped from y 770.
    doc.vspace(20.0);
    doc.text_line("Rapportgenerering feilet.", FontFace::Helvetica, 18.0, 30.0)?;
    doc.paragraph(
        reason,
        FontFace::Helvetica,
        BODY_SIZE,
        BODY_LINE_HEIGHT,
        geometry.content_width(),
    )?;
    Ok(doc.seal())
}
