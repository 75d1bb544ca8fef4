use std::str::FromStr;

use rapport_core::types::{AssetQuote, Outcome};
use rust_decimal::Decimal;

pub fn by_id(id: &str, symbol: &str) -> Option<AssetQuote> {
    match id {
        "bitcoin" => Some(row(
            symbol,
            "65432.10",
            "1.85",
            "5.23",
            "1284500000000",
            "35210000000",
        )),
        "ethereum" => Some(row(
            symbol,
            "3412.55",
            "-0.42",
            "2.10",
            "410200000000",
            "18450000000",
        )),
        "injective-protocol" => Some(row(
            symbol,
            "24.87",
            "3.12",
            "-1.05",
            "2430000000",
            "145000000",
        )),
        "fetch-ai" => Some(row(
            symbol,
            "1.32",
            "-2.20",
            "4.60",
            "3340000000",
            "210000000",
        )),
        "dogecoin" => Some(row(
            symbol,
            "0.1385",
            "0.95",
            "-3.40",
            "19850000000",
            "1120000000",
        )),
        "ripple" => Some(row(
            symbol,
            "0.5241",
            "0.18",
            "1.75",
            "28900000000",
            "1340000000",
        )),
        "solana" => Some(row(
            symbol,
            "158.40",
            "2.45",
            "8.91",
            "73500000000",
            "2980000000",
        )),
        _ => None,
    }
}

fn dec(s: &str) -> Outcome<Decimal> {
    Outcome::Value(Decimal::from_str(s).unwrap())
}

fn row(sym: &str, px: &str, d24: &str, d7: &str, cap: &str, vol: &str) -> AssetQuote {
    AssetQuote {
        symbol: sym.to_string(),
        price: dec(px),
        change_24h: dec(d24),
        change_7d: dec(d7),
        market_cap: dec(cap),
        volume_24h: dec(vol),
    }
}
