//! Bucketing mentions into the current and previous analysis periods.

use chrono::{DateTime, Duration, Utc};
use repwatch_core::Mention;

use crate::error::EngineError;

/// Two back-to-back periods of `days` days ending at `end`.
///
/// The current period is `[end - days, end]` and the previous one is
/// `[end - 2 * days, end - days)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisWindow {
    end: DateTime<Utc>,
    days: u32,
    current_start: DateTime<Utc>,
    previous_start: DateTime<Utc>,
}

/// Mentions borrowed from the caller's slice, grouped by period.
#[derive(Debug, Default)]
pub struct PeriodSplit<'a> {
    pub current: Vec<&'a Mention>,
    pub previous: Vec<&'a Mention>,
    /// Mentions that fall in neither period.
    pub outside: usize,
}

impl AnalysisWindow {
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] if `days` is zero or the window
    /// start would fall outside the representable date range.
    pub fn new(end: DateTime<Utc>, days: u32) -> Result<Self, EngineError> {
        if days == 0 {
            return Err(EngineError::InvalidInput(
                "analysis window must span at least one day".to_string(),
            ));
        }

        let span = Duration::days(i64::from(days));
        let out_of_range = || {
            EngineError::InvalidInput(format!(
                "analysis window of {days} days ending {end} is out of range"
            ))
        };
        let current_start = end.checked_sub_signed(span).ok_or_else(out_of_range)?;
        let previous_start = current_start
            .checked_sub_signed(span)
            .ok_or_else(out_of_range)?;

        Ok(Self {
            end,
            days,
            current_start,
            previous_start,
        })
    }

    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    #[must_use]
    pub fn days(&self) -> u32 {
        self.days
    }

    #[must_use]
    pub fn current_start(&self) -> DateTime<Utc> {
        self.current_start
    }

    #[must_use]
    pub fn previous_start(&self) -> DateTime<Utc> {
        self.previous_start
    }

    #[must_use]
    pub fn split<'a>(&self, mentions: &'a [Mention]) -> PeriodSplit<'a> {
        let mut split = PeriodSplit::default();
        for mention in mentions {
            let ts = mention.timestamp;
            if ts >= self.current_start && ts <= self.end {
                split.current.push(mention);
            } else if ts >= self.previous_start && ts < self.current_start {
                split.previous.push(mention);
            } else {
                split.outside += 1;
            }
        }
        split
    }
}
