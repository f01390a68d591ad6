//! Coarse triage level from score and issue volume.

use repwatch_core::AlertThresholds;

use crate::types::AlertLevel;

/// Map a score and high-severity mention counts onto an alert level.
///
/// Levels are tried in order (critical, warning, good) and the first match
/// wins. Anything that matches none of them, such as the 50-70 "fair" band,
/// is a warning.
#[must_use]
pub fn classify_alert(
    score: f64,
    critical_count: usize,
    high_count: usize,
    thresholds: &AlertThresholds,
) -> AlertLevel {
    if score < thresholds.critical_score || critical_count >= thresholds.critical_count {
        return AlertLevel::Critical;
    }
    if score < thresholds.warning_score || high_count >= thresholds.high_count {
        return AlertLevel::Warning;
    }
    if score >= thresholds.good_score
        && critical_count < thresholds.critical_count
        && high_count < thresholds.high_count
    {
        return AlertLevel::Good;
    }
    AlertLevel::Warning
}
