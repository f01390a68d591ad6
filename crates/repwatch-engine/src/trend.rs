//! Period-over-period trend with capped growth.

use repwatch_core::ScoringConfig;

use crate::round1;
use crate::types::{Trend, TrendDirection};

/// Compare a current value against the previous period's.
///
/// `None` or zero for `previous` means there is no prior data and yields a
/// flat 0% trend. Otherwise the raw percent change is capped at
/// `config.small_previous_cap` when `|previous|` is below
/// `config.small_previous_threshold`, and at `config.trend_cap` in all other
/// cases. The sign is kept when capping. The percent is rounded to one decimal.
#[must_use]
pub fn compute_trend(current: f64, previous: Option<f64>, config: &ScoringConfig) -> Trend {
    let Some(previous) = previous.filter(|p| p.abs() > 0.0) else {
        return Trend::flat();
    };

    let raw = (current - previous) / previous * 100.0;
    let cap = if previous.abs() < config.small_previous_threshold {
        config.small_previous_cap
    } else {
        config.trend_cap
    };

    let capped_at_limit = raw.abs() > cap;
    let percent = if capped_at_limit { cap.copysign(raw) } else { raw };

    let direction = if current > previous {
        TrendDirection::Up
    } else if current < previous {
        TrendDirection::Down
    } else {
        TrendDirection::Flat
    };

    Trend {
        direction,
        percent: round1(percent),
        capped_at_limit,
    }
}
