//! Shared draw types passed between the fetcher, the engine and the publisher.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Values at or above this threshold classify as [`Verdict::Big`].
pub const BIG_THRESHOLD: i64 = 5;

/// One upstream draw, newest-first in any list the fetcher returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResult {
    /// Period (issue) number, ASCII decimal digits only.
    pub period: String,
    /// Observed outcome. Upstream convention is 0-9 but nothing here enforces it.
    pub number: i32,
    /// Upstream draw time, passed through as-is.
    pub draw_time: Option<String>,
}

/// Binary classification of a value against [`BIG_THRESHOLD`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Big,
    Small,
}

impl Verdict {
    pub fn classify(value: i64) -> Self {
        if value >= BIG_THRESHOLD {
            Verdict::Big
        } else {
            Verdict::Small
        }
    }

    pub fn is_big(self) -> bool {
        self == Verdict::Big
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Big => "BIG",
            Verdict::Small => "SMALL",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome values in draw order, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberSeries(Vec<i32>);

impl NumberSeries {
    pub fn new(values: Vec<i32>) -> Self {
        Self(values)
    }

    pub fn from_draws(draws: &[DrawResult]) -> Self {
        Self(draws.iter().map(|d| d.number).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[i32] {
        &self.0
    }

    /// The newest `n` values (fewer if the series is shorter).
    pub fn newest(&self, n: usize) -> &[i32] {
        &self.0[..n.min(self.0.len())]
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PeriodError {
    #[error("period {0:?} is not a decimal number")]
    NotNumeric(String),
    #[error("period {0:?} has no successor")]
    Overflow(String),
}

/// The period that follows `period`.
///
/// The period is read as a number, so leading zeros are not preserved:
/// `"007"` becomes `"8"`.
pub fn next_period(period: &str) -> Result<String, PeriodError> {
    if period.is_empty() || !period.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PeriodError::NotNumeric(period.to_string()));
    }
    let value: u128 = period
        .parse()
        .map_err(|_| PeriodError::Overflow(period.to_string()))?;
    value
        .checked_add(1)
        .map(|next| next.to_string())
        .ok_or_else(|| PeriodError::Overflow(period.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(period: &str, number: i32) -> DrawResult {
        DrawResult {
            period: period.into(),
            number,
            draw_time: None,
        }
    }

    #[test]
    fn classify_threshold() {
        assert_eq!(Verdict::classify(4), Verdict::Small);
        assert_eq!(Verdict::classify(5), Verdict::Big);
        assert_eq!(Verdict::classify(9), Verdict::Big);
        assert_eq!(Verdict::classify(-3), Verdict::Small);
    }

    #[test]
    fn verdict_serialises_uppercase() {
        assert_eq!(serde_json::to_string(&Verdict::Big).unwrap(), "\"BIG\"");
        assert_eq!(serde_json::to_string(&Verdict::Small).unwrap(), "\"SMALL\"");
    }

    #[test]
    fn series_from_draws_keeps_order() {
        let draws = vec![draw("3", 7), draw("2", 1), draw("1", 4)];
        let series = NumberSeries::from_draws(&draws);
        assert_eq!(series.values(), &[7, 1, 4]);
        assert_eq!(series.newest(2), &[7, 1]);
        assert_eq!(series.newest(10), &[7, 1, 4]);
    }

    #[test]
    fn next_period_increments() {
        assert_eq!(next_period("20250101100010001").unwrap(), "20250101100010002");
        assert_eq!(next_period("9").unwrap(), "10");
        assert_eq!(next_period("007").unwrap(), "8");
    }

    #[test]
    fn next_period_rejects_non_numeric() {
        assert_eq!(next_period("12a"), Err(PeriodError::NotNumeric("12a".into())));
        assert_eq!(next_period(""), Err(PeriodError::NotNumeric("".into())));
        assert!(matches!(next_period("-5"), Err(PeriodError::NotNumeric(_))));
    }

    #[test]
    fn next_period_overflow() {
        let max = u128::MAX.to_string();
        assert_eq!(next_period(&max), Err(PeriodError::Overflow(max.clone())));
        let huge = "9".repeat(50);
        assert!(matches!(next_period(&huge), Err(PeriodError::Overflow(_))));
    }
}
