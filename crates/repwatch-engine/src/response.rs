//! Response plan and overall health derived from the alert level.

use repwatch_core::{ResponsePolicies, ResponsePolicy};

use crate::types::{AlertLevel, HealthAssessment, HealthStatus};

/// The configured response for an alert level.
#[must_use]
pub fn response_policy(alert: AlertLevel, policies: &ResponsePolicies) -> &ResponsePolicy {
    match alert {
        AlertLevel::Critical => &policies.critical,
        AlertLevel::Warning => &policies.warning,
        AlertLevel::Good => &policies.good,
    }
}

/// Combine score and alert level into one health verdict.
///
/// A critical alert overrides the score: a product at 85 with a flood of
/// critical mentions is still in crisis.
#[must_use]
pub fn assess_health(score: f64, alert: AlertLevel) -> HealthAssessment {
    let (status, summary) = if alert == AlertLevel::Critical {
        (
            HealthStatus::Critical,
            "Critical - Immediate attention required",
        )
    } else if score >= 80.0 {
        (HealthStatus::Healthy, "Healthy - Reputation is strong")
    } else if score >= 60.0 {
        (HealthStatus::Stable, "Stable - Minor improvements needed")
    } else if score >= 40.0 {
        (HealthStatus::AtRisk, "At Risk - Significant issues present")
    } else {
        (HealthStatus::Damaged, "Damaged - Urgent intervention required")
    };
    HealthAssessment {
        status,
        summary: summary.to_string(),
    }
}
