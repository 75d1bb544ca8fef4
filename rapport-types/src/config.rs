use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::capability::Capability;
use crate::report::AssetSpec;

/// Default per-provider-call timeout.
///
/// Chosen to leave headroom under a typical 10s serverless invocation budget
/// while still tolerating a slow upstream.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(9);

/// Default cache retention for the slow-moving indicator feeds.
pub const DEFAULT_INDICATOR_TTL: Duration = Duration::from_secs(300);

/// Tuning knobs for report generation.
///
/// All fields have conservative defaults; construct with
/// `RapportConfig::default()` and override selectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct RapportConfig {
    /// Assets covered by the report, in presentation order.
    pub assets: Vec<AssetSpec>,
    /// Upper bound on each individual provider call. A call that exceeds it
    /// settles as a `ProviderTimeout` error instead of blocking the report.
    pub provider_timeout: Duration,
    /// Optional upper bound on an entire snapshot request. `None` means only
    /// the per-call bound applies.
    pub request_timeout: Option<Duration>,
}

impl Default for RapportConfig {
    fn default() -> Self {
        Self {
            assets: AssetSpec::default_roster(),
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            request_timeout: None,
        }
    }
}

/// Per-capability retention policy for the caching middleware.
///
/// A `None` TTL disables caching for that capability entirely. The defaults
/// cache only the indicator feeds: prices move too fast to be worth reusing,
/// while sentiment and dominance barely change within a five-minute window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct CacheConfig {
    /// Retention for per-asset market rows.
    pub prices_ttl: Option<Duration>,
    /// Retention for the sentiment index series.
    pub sentiment_ttl: Option<Duration>,
    /// Retention for the dominance ratio.
    pub dominance_ttl: Option<Duration>,
    /// Retention for volatility index closes.
    pub volatility_ttl: Option<Duration>,
    /// Maximum entries per capability store.
    pub capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            prices_ttl: None,
            sentiment_ttl: Some(DEFAULT_INDICATOR_TTL),
            dominance_ttl: Some(DEFAULT_INDICATOR_TTL),
            volatility_ttl: None,
            capacity: 16,
        }
    }
}

impl CacheConfig {
    /// Retention configured for `capability`, if any.
    #[must_use]
    pub const fn ttl_for(&self, capability: Capability) -> Option<Duration> {
        match capability {
            Capability::Prices => self.prices_ttl,
            Capability::Sentiment => self.sentiment_ttl,
            Capability::Dominance => self.dominance_ttl,
            Capability::Volatility => self.volatility_ttl,
        }
    }

    /// Disables caching for every capability.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            prices_ttl: None,
            sentiment_ttl: None,
            dominance_ttl: None,
            volatility_ttl: None,
            capacity: 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cache_only_indicators() {
        let cfg = CacheConfig::default();
        assert_eq!(cfg.ttl_for(Capability::Prices), None);
        assert_eq!(
            cfg.ttl_for(Capability::Sentiment),
            Some(DEFAULT_INDICATOR_TTL)
        );
        assert_eq!(
            cfg.ttl_for(Capability::Dominance),
            Some(DEFAULT_INDICATOR_TTL)
        );
        assert_eq!(cfg.ttl_for(Capability::Volatility), None);
    }

    #[test]
    fn disabled_caches_nothing() {
        let cfg = CacheConfig::disabled();
        for capability in [
            Capability::Prices,
            Capability::Sentiment,
            Capability::Dominance,
            Capability::Volatility,
        ] {
            assert_eq!(cfg.ttl_for(capability), None);
        }
    }

    #[test]
    fn default_config_has_full_roster_and_nine_second_bound() {
        let cfg = RapportConfig::default();
        assert_eq!(cfg.assets.len(), 7);
        assert_eq!(cfg.provider_timeout, Duration::from_secs(9));
        assert_eq!(cfg.request_timeout, None);
    }
}
