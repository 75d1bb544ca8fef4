use core::fmt;
use serde::{Deserialize, Serialize};

/// High-level capability labels for provider discovery, errors, and cache keys.
///
/// One label per report section fed by a live upstream; the static
/// recommendation table is not a capability because nothing is fetched for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Per-asset prices with 24h/7d changes, market cap, and volume.
    Prices,
    /// Fear & Greed sentiment index series.
    Sentiment,
    /// BTC share of total market capitalization.
    Dominance,
    /// Volatility index daily closes.
    Volatility,
}

impl Capability {
    /// Stable lowercase label used in errors, logs, and cache keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prices => "prices",
            Self::Sentiment => "sentiment",
            Self::Dominance => "dominance",
            Self::Volatility => "volatility",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
