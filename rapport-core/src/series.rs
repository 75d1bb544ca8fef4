use rapport_types::report::IndicatorSnapshot;
use rapport_types::Outcome;
use rust_decimal::Decimal;

/// Percent change from `earliest` to `latest`.
///
/// Returns `None` when `earliest` is zero or negative, since a percentage
/// against a non-positive base is meaningless and would divide by zero.
///
/// Examples
///
/// ```
/// use rapport_core::percent_change;
/// use rust_decimal::Decimal;
///
/// let earliest = Decimal::from(200);
/// let latest = Decimal::from(230);
/// assert_eq!(percent_change(earliest, latest), Some(Decimal::from(15)));
/// assert_eq!(percent_change(Decimal::ZERO, latest), None);
/// ```
#[must_use]
pub fn percent_change(earliest: Decimal, latest: Decimal) -> Option<Decimal> {
    if earliest <= Decimal::ZERO {
        return None;
    }
    Some((latest - earliest) / earliest * Decimal::ONE_HUNDRED)
}

/// Build an indicator snapshot from a newest-first series of readings.
///
/// `values[0]` is the current reading. The short and long movements are the
/// absolute differences against the readings `short_lag` and `long_lag`
/// positions back; a movement whose reference reading is missing settles as
/// unavailable rather than failing the snapshot.
///
/// Examples
///
/// ```
/// use rapport_core::snapshot_from_newest_first;
/// use rapport_types::Outcome;
/// use rust_decimal::Decimal;
///
/// let d = |v: i64| Decimal::from(v);
/// let series = vec![d(64), d(61), d(59), d(55), d(50), d(48), d(45), d(70)];
/// let snap = snapshot_from_newest_first(&series, 1, 7);
/// assert_eq!(snap.current, Outcome::Value(d(64)));
/// assert_eq!(snap.change_1d, Outcome::Value(d(3)));
/// assert_eq!(snap.change_7d, Outcome::Value(d(-6)));
///
/// // A short series still settles what it can.
/// let snap = snapshot_from_newest_first(&series[..3], 1, 7);
/// assert_eq!(snap.change_1d, Outcome::Value(d(3)));
/// assert_eq!(snap.change_7d, Outcome::Unavailable);
/// ```
#[must_use]
pub fn snapshot_from_newest_first(
    values: &[Decimal],
    short_lag: usize,
    long_lag: usize,
) -> IndicatorSnapshot {
    let current = match values.first() {
        Some(v) => *v,
        None => return IndicatorSnapshot::unavailable(),
    };
    let movement = |lag: usize| -> Outcome<Decimal> {
        match values.get(lag) {
            Some(reference) if lag > 0 => Outcome::Value(current - *reference),
            _ => Outcome::Unavailable,
        }
    };
    IndicatorSnapshot {
        current: Outcome::Value(current),
        change_1d: movement(short_lag),
        change_7d: movement(long_lag),
    }
}

/// Build an indicator snapshot from oldest-first daily closes.
///
/// The current reading is the last close. The short movement is the change
/// since the previous close; the long movement is the change across the whole
/// window. Both need at least two closes to settle.
#[must_use]
pub fn snapshot_from_closes(values: &[Decimal]) -> IndicatorSnapshot {
    let (Some(last), Some(first)) = (values.last(), values.first()) else {
        return IndicatorSnapshot::unavailable();
    };
    if values.len() < 2 {
        return IndicatorSnapshot {
            current: Outcome::Value(*last),
            change_1d: Outcome::Unavailable,
            change_7d: Outcome::Unavailable,
        };
    }
    let previous = values[values.len() - 2];
    IndicatorSnapshot {
        current: Outcome::Value(*last),
        change_1d: Outcome::Value(*last - previous),
        change_7d: Outcome::Value(*last - *first),
    }
}
