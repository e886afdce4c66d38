//! Date comparison logic for predicates

use chrono::{DateTime, Datelike, Months, TimeDelta, Utc};
use serde_json::Value;

use super::coerce::{split_pair, to_count};
use super::types::Operator;
use crate::record::instant_from_value;

/// Compare a field against a date predicate.
///
/// `equals` and `not_equals` compare calendar days (UTC). The relative
/// operators are measured from `now`.
pub fn compare_date(
    field_value: &Value,
    operator: &Operator,
    filter_value: &Value,
    now: DateTime<Utc>,
) -> bool {
    let value = match instant_from_value(field_value) {
        Some(instant) => instant,
        None => return matches!(operator, Operator::IsNull),
    };

    match operator {
        Operator::Equals => {
            instant_from_value(filter_value).is_some_and(|t| value.date_naive() == t.date_naive())
        }
        Operator::NotEquals => {
            instant_from_value(filter_value).is_some_and(|t| value.date_naive() != t.date_naive())
        }
        Operator::Before => instant_from_value(filter_value).is_some_and(|t| value < t),
        Operator::After => instant_from_value(filter_value).is_some_and(|t| value > t),
        Operator::Between => {
            date_range(filter_value).is_some_and(|(start, end)| value >= start && value <= end)
        }
        Operator::LastDays => days_from(now, filter_value, false)
            .is_some_and(|start| value >= start && value <= now),
        Operator::NextDays => days_from(now, filter_value, true)
            .is_some_and(|end| value >= now && value <= end),
        Operator::ThisMonth => value.year() == now.year() && value.month() == now.month(),
        Operator::LastMonth => now
            .checked_sub_months(Months::new(1))
            .is_some_and(|prev| value.year() == prev.year() && value.month() == prev.month()),
        Operator::ThisYear => value.year() == now.year(),
        Operator::IsNull => false,
        Operator::IsNotNull => true,
        _ => false,
    }
}

/// Parse an inclusive `start,end` range.
pub(crate) fn date_range(filter_value: &Value) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let (start, end) = split_pair(filter_value)?;
    Some((instant_from_value(&start)?, instant_from_value(&end)?))
}

/// The instant `n` days before (or after) `now`.
fn days_from(now: DateTime<Utc>, filter_value: &Value, forward: bool) -> Option<DateTime<Utc>> {
    let delta = TimeDelta::try_days(to_count(filter_value)?)?;
    if forward {
        now.checked_add_signed(delta)
    } else {
        now.checked_sub_signed(delta)
    }
}
