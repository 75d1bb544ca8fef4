//! Report payload types shared by providers, the aggregation pipeline, and
//! the document composer.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::outcome::Outcome;

/// A tracked asset: upstream identifier plus the ticker shown in the report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetSpec {
    /// Identifier understood by the market-data upstream (e.g. `"bitcoin"`).
    pub id: String,
    /// Ticker rendered in the report (e.g. `"BTC"`).
    pub symbol: String,
}

impl AssetSpec {
    /// Creates a spec from an upstream id and a display ticker.
    pub fn new(id: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
        }
    }

    /// The default asset roster, in presentation order.
    #[must_use]
    pub fn default_roster() -> Vec<Self> {
        vec![
            Self::new("bitcoin", "BTC"),
            Self::new("ethereum", "ETH"),
            Self::new("injective-protocol", "INJ"),
            Self::new("fetch-ai", "FET"),
            Self::new("dogecoin", "DOGE"),
            Self::new("ripple", "XRP"),
            Self::new("solana", "SOL"),
        ]
    }
}

/// One row of the price table. Every numeric field settles independently, so
/// a feed that returns price but no weekly change still yields a useful row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetQuote {
    /// Display ticker, taken from the [`AssetSpec`] roster.
    pub symbol: String,
    /// Spot price in USD.
    pub price: Outcome<Decimal>,
    /// Percent change over the last 24 hours.
    pub change_24h: Outcome<Decimal>,
    /// Percent change over the last 7 days.
    pub change_7d: Outcome<Decimal>,
    /// Market capitalization in USD.
    pub market_cap: Outcome<Decimal>,
    /// Trading volume over the last 24 hours, in USD.
    pub volume_24h: Outcome<Decimal>,
}

impl AssetQuote {
    /// A roster-aligned placeholder row with every field unavailable.
    pub fn unavailable(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            price: Outcome::Unavailable,
            change_24h: Outcome::Unavailable,
            change_7d: Outcome::Unavailable,
            market_cap: Outcome::Unavailable,
            volume_24h: Outcome::Unavailable,
        }
    }
}

/// Current value of a market indicator plus its short- and long-window
/// movements. Each field settles independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// Most recent reading.
    pub current: Outcome<Decimal>,
    /// Movement versus the previous reading.
    pub change_1d: Outcome<Decimal>,
    /// Movement versus the reading seven periods back.
    pub change_7d: Outcome<Decimal>,
}

impl IndicatorSnapshot {
    /// A snapshot with every field unavailable.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            current: Outcome::Unavailable,
            change_1d: Outcome::Unavailable,
            change_7d: Outcome::Unavailable,
        }
    }
}

impl Default for IndicatorSnapshot {
    fn default() -> Self {
        Self::unavailable()
    }
}

/// Analyst stance on an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stance {
    /// Majority of analysts recommend buying.
    Buy,
    /// Majority of analysts recommend holding.
    Hold,
    /// Majority of analysts recommend selling.
    Sell,
}

impl Stance {
    /// Label rendered in the report.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "Buy",
            Self::Hold => "Hold",
            Self::Sell => "Sell",
        }
    }
}

impl core::fmt::Display for Stance {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tally of analyst calls for one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationCounts {
    /// Analysts voting buy.
    pub buy: u32,
    /// Analysts voting hold.
    pub hold: u32,
    /// Analysts voting sell.
    pub sell: u32,
}

impl RecommendationCounts {
    /// Creates a tally from raw counts.
    #[must_use]
    pub const fn new(buy: u32, hold: u32, sell: u32) -> Self {
        Self { buy, hold, sell }
    }

    /// Total number of analyst calls.
    #[must_use]
    pub const fn total(self) -> u32 {
        self.buy + self.hold + self.sell
    }

    /// The plurality stance and its share of all calls, as a percentage.
    ///
    /// Ties resolve in favor of the earlier stance in buy, hold, sell order.
    /// Returns `None` when there are no calls at all.
    #[must_use]
    pub fn consensus(self) -> Option<(Stance, Decimal)> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let mut best = (Stance::Buy, self.buy);
        for candidate in [(Stance::Hold, self.hold), (Stance::Sell, self.sell)] {
            if candidate.1 > best.1 {
                best = candidate;
            }
        }
        let share = Decimal::from(best.1) * Decimal::from(100u32) / Decimal::from(total);
        Some((best.0, share))
    }
}

/// Analyst tally for one roster asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecommendation {
    /// Display ticker, matching the price table.
    pub symbol: String,
    /// Vote tally behind the rendered consensus.
    pub counts: RecommendationCounts,
}

/// Everything the composer needs to render one report.
///
/// Produced by the aggregation pipeline. Per-field [`Outcome`]s record which
/// sources settled in time; the composer renders the rest as placeholders
/// rather than failing the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Date stamped into the report title.
    pub report_date: NaiveDate,
    /// One row per roster asset, in roster order.
    pub assets: Vec<AssetQuote>,
    /// Fear & Greed sentiment index.
    pub sentiment: IndicatorSnapshot,
    /// BTC dominance percentage.
    pub dominance: IndicatorSnapshot,
    /// Volatility index level.
    pub volatility: IndicatorSnapshot,
    /// Analyst consensus rows, in roster order.
    pub recommendations: Vec<AssetRecommendation>,
}
