use std::str::FromStr;

use rapport_core::types::{IndicatorSnapshot, Outcome};
use rust_decimal::Decimal;

fn dec(s: &str) -> Outcome<Decimal> {
    Outcome::Value(Decimal::from_str(s).unwrap())
}

pub fn sentiment() -> IndicatorSnapshot {
    IndicatorSnapshot {
        current: dec("64"),
        change_1d: dec("2"),
        change_7d: dec("-3"),
    }
}

/// Dominance mirrors the live connector shape: a point-in-time ratio with no
/// historical movement figures.
pub fn dominance() -> IndicatorSnapshot {
    IndicatorSnapshot {
        current: dec("54.3"),
        change_1d: Outcome::Unavailable,
        change_7d: Outcome::Unavailable,
    }
}

pub fn volatility() -> IndicatorSnapshot {
    IndicatorSnapshot {
        current: dec("16.39"),
        change_1d: dec("-0.21"),
        change_7d: dec("1.02"),
    }
}
