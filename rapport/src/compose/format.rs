//! Cell formatting for the report tables.
//!
//! Grouping is pinned to the en-US style (comma thousands, dot decimal) so
//! the same snapshot always renders to the same bytes regardless of the host
//! locale.

use rapport_core::{Decimal, Outcome};
use rust_decimal::RoundingStrategy;

/// Marker rendered for any figure that could not be obtained.
pub const NA: &str = "N/A";

/// `value` at exactly `decimals` fraction digits with grouped thousands.
fn grouped(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{rounded:.prec$}", prec = decimals as usize);
    let (sign, digits) = plain
        .strip_prefix('-')
        .map_or(("", plain.as_str()), |rest| ("-", rest));
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    let mut out = String::with_capacity(plain.len() + int_part.len() / 3);
    out.push_str(sign);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// USD amount: `$` plus grouped thousands at two decimals.
#[must_use]
pub fn usd(value: Outcome<Decimal>) -> String {
    match value {
        Outcome::Value(v) => format!("${}", grouped(v, 2)),
        Outcome::Unavailable => NA.to_owned(),
    }
}

/// Percentage at two decimals with an explicit sign on non-negative values.
#[must_use]
pub fn pct(value: Outcome<Decimal>) -> String {
    match value {
        Outcome::Value(v) => {
            let rounded = v.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            let body = format!("{:.2}", rounded.abs());
            if rounded < Decimal::ZERO {
                format!("-{body}%")
            } else {
                format!("+{body}%")
            }
        }
        Outcome::Unavailable => NA.to_owned(),
    }
}

/// Plain grouped number at the given precision, no sign prefix.
#[must_use]
pub fn num(value: Outcome<Decimal>, decimals: u32) -> String {
    match value {
        Outcome::Value(v) => grouped(v, decimals),
        Outcome::Unavailable => NA.to_owned(),
    }
}
