//! Static analyst reference table.
//!
//! These tallies are editorial reference data shipped with the report, not
//! fetched from an upstream; the consensus column derives from them at
//! render time. Assets outside the table simply get no recommendation row.

use rapport_core::{AssetRecommendation, AssetSpec, RecommendationCounts};

/// Analyst vote tally for a roster symbol, if the table covers it.
#[must_use]
pub fn counts_for(symbol: &str) -> Option<RecommendationCounts> {
    let counts = match symbol {
        "BTC" => RecommendationCounts::new(12, 18, 5),
        "ETH" => RecommendationCounts::new(20, 9, 3),
        "INJ" => RecommendationCounts::new(11, 6, 2),
        "FET" => RecommendationCounts::new(7, 10, 4),
        "DOGE" => RecommendationCounts::new(3, 6, 11),
        "XRP" => RecommendationCounts::new(6, 13, 6),
        "SOL" => RecommendationCounts::new(16, 7, 2),
        _ => return None,
    };
    Some(counts)
}

/// Recommendation rows for a roster, in roster order.
///
/// Symbols without reference data are omitted rather than padded, so the
/// recommendation table only carries rows with a real tally behind them.
#[must_use]
pub fn recommendations_for(roster: &[AssetSpec]) -> Vec<AssetRecommendation> {
    roster
        .iter()
        .filter_map(|spec| {
            counts_for(&spec.symbol).map(|counts| AssetRecommendation {
                symbol: spec.symbol.clone(),
                counts,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapport_core::Stance;

    #[test]
    fn majorities_match_the_published_stances() {
        let expected = [
            ("BTC", Stance::Hold),
            ("ETH", Stance::Buy),
            ("INJ", Stance::Buy),
            ("FET", Stance::Hold),
            ("DOGE", Stance::Sell),
            ("XRP", Stance::Hold),
            ("SOL", Stance::Buy),
        ];
        for (symbol, stance) in expected {
            let counts = counts_for(symbol).unwrap();
            let (majority, _) = counts.consensus().unwrap();
            assert_eq!(majority, stance, "{symbol}");
        }
    }

    #[test]
    fn unknown_symbols_are_omitted() {
        let roster = vec![
            AssetSpec::new("bitcoin", "BTC"),
            AssetSpec::new("pepe", "PEPE"),
        ];
        let rows = recommendations_for(&roster);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].symbol, "BTC");
    }

    #[test]
    fn rows_follow_roster_order() {
        let rows = recommendations_for(&AssetSpec::default_roster());
        let symbols: Vec<&str> = rows.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, ["BTC", "ETH", "INJ", "FET", "DOGE", "XRP", "SOL"]);
    }
}
