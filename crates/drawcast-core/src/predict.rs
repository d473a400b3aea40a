//! High/low prediction from the ten most recent draws.
//!
//! # Formula
//!
//! With the series ordered most-recent-first, take `a = v[0]`, `b = v[4]`
//! and `c = v[9]`:
//!
//! 1. `sum = a + b`, reduced once to `sum / 10 + sum % 10` when it has two digits
//! 2. `result = |sum - c|`
//! 3. `result` reduced once more when it has two digits
//! 4. `BIG` when `result >= 5`, otherwise `SMALL`
//!
//! Fewer than ten values yield a fixed default instead of an error.

use serde::{Deserialize, Serialize};

use crate::draw::{NumberSeries, Verdict};

/// Number of newest values the formula looks at.
pub const WINDOW: usize = 10;

pub const FORMULA: &str = "(first + fifth) - last";

const DEFAULT_DERIVED: i64 = 7;
const INSUFFICIENT_DATA: &str = "Insufficient data";

const BASE_CONFIDENCE: u8 = 70;
const EDGE_CONFIDENCE: u8 = 85;
const OUTER_CONFIDENCE: u8 = 75;
pub const MIN_CONFIDENCE: u8 = 55;
pub const MAX_CONFIDENCE: u8 = 95;

/// The engine's verdict for the next draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub verdict: Verdict,
    pub derived_number: i64,
    pub confidence: u8,
    pub calculation: Calculation,
}

/// How the prediction was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Calculation {
    Derived(Trace),
    Insufficient { error: String },
}

/// Every operand and intermediate value of one formula evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    pub formula: String,
    pub first_number: i64,
    pub fifth_number: i64,
    pub last_number: i64,
    pub sum_before_reduction: i64,
    pub sum_after_reduction: i64,
    pub subtraction: i64,
    pub final_result: i64,
    pub explanation: String,
}

/// Evaluate the formula over the newest [`WINDOW`] values of `series`.
///
/// Total over any input: operands are widened to `i64`, so out-of-range
/// upstream values change the arithmetic but never panic.
pub fn predict(series: &NumberSeries) -> Prediction {
    if series.len() < WINDOW {
        tracing::debug!(available = series.len(), "insufficient draws, using default prediction");
        return Prediction {
            verdict: Verdict::Big,
            derived_number: DEFAULT_DERIVED,
            confidence: BASE_CONFIDENCE,
            calculation: Calculation::Insufficient {
                error: INSUFFICIENT_DATA.to_string(),
            },
        };
    }

    let window = series.newest(WINDOW);
    let first = i64::from(window[0]);
    let fifth = i64::from(window[4]);
    let last = i64::from(window[WINDOW - 1]);

    let raw_sum = first + fifth;
    let sum = reduce_digits(raw_sum);
    let subtraction = sum - last;
    let result = reduce_digits(subtraction.abs());

    let verdict = Verdict::classify(result);
    let confidence = confidence_for(result);

    Prediction {
        verdict,
        derived_number: result,
        confidence,
        calculation: Calculation::Derived(Trace {
            formula: FORMULA.to_string(),
            first_number: first,
            fifth_number: fifth,
            last_number: last,
            sum_before_reduction: raw_sum,
            sum_after_reduction: sum,
            subtraction,
            final_result: result,
            explanation: format!("({first} + {fifth}) - {last} = {result} → {verdict}"),
        }),
    }
}

/// Single digit-sum pass for values of two or more digits.
fn reduce_digits(n: i64) -> i64 {
    if n >= 10 { n / 10 + n % 10 } else { n }
}

fn confidence_for(result: i64) -> u8 {
    let confidence = if result == 0 || result == 9 {
        EDGE_CONFIDENCE
    } else if result <= 2 || result >= 7 {
        OUTER_CONFIDENCE
    } else {
        BASE_CONFIDENCE
    };
    confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[i32]) -> NumberSeries {
        NumberSeries::new(values.to_vec())
    }

    fn trace(p: &Prediction) -> &Trace {
        match &p.calculation {
            Calculation::Derived(t) => t,
            Calculation::Insufficient { .. } => panic!("expected a derived trace"),
        }
    }

    #[test]
    fn worked_example() {
        let p = predict(&series(&[5, 8, 4, 5, 4, 6, 4, 8, 5, 2]));
        let t = trace(&p);
        assert_eq!((t.first_number, t.fifth_number, t.last_number), (5, 4, 2));
        assert_eq!(t.sum_before_reduction, 9);
        assert_eq!(t.sum_after_reduction, 9);
        assert_eq!(t.subtraction, 7);
        assert_eq!(t.final_result, 7);
        assert_eq!(p.derived_number, 7);
        assert_eq!(p.verdict, Verdict::Big);
        assert_eq!(p.confidence, 75);
        assert_eq!(t.explanation, "(5 + 4) - 2 = 7 → BIG");
    }

    #[test]
    fn zero_result_is_small_with_edge_confidence() {
        let p = predict(&series(&[0, 9, 9, 9, 9, 9, 9, 9, 9, 9]));
        assert_eq!(p.derived_number, 0);
        assert_eq!(p.verdict, Verdict::Small);
        assert_eq!(p.confidence, 85);
    }

    #[test]
    fn two_digit_sum_is_reduced() {
        // 8 + 7 = 15 -> 6; 6 - 1 = 5
        let p = predict(&series(&[8, 0, 0, 0, 7, 0, 0, 0, 0, 1]));
        let t = trace(&p);
        assert_eq!(t.sum_before_reduction, 15);
        assert_eq!(t.sum_after_reduction, 6);
        assert_eq!(p.derived_number, 5);
        assert_eq!(p.verdict, Verdict::Big);
        assert_eq!(p.confidence, 70);
    }

    #[test]
    fn negative_subtraction_is_negated() {
        // 1 + 1 = 2; 2 - 9 = -7 -> 7
        let p = predict(&series(&[1, 0, 0, 0, 1, 0, 0, 0, 0, 9]));
        let t = trace(&p);
        assert_eq!(t.subtraction, -7);
        assert_eq!(t.final_result, 7);
        assert_eq!(p.verdict, Verdict::Big);
    }

    #[test]
    fn only_first_ten_values_are_used() {
        let base = [5, 8, 4, 5, 4, 6, 4, 8, 5, 2];
        let mut longer = base.to_vec();
        longer.extend([9, 9, 9, 9, 9]);
        assert_eq!(predict(&series(&base)), predict(&series(&longer)));
    }

    #[test]
    fn insufficient_data_returns_default() {
        for len in 0..WINDOW {
            let p = predict(&series(&vec![3; len]));
            assert_eq!(p.verdict, Verdict::Big);
            assert_eq!(p.derived_number, 7);
            assert_eq!(p.confidence, 70);
            assert_eq!(
                p.calculation,
                Calculation::Insufficient {
                    error: "Insufficient data".into()
                }
            );
        }
    }

    #[test]
    fn all_digit_operands_stay_in_range() {
        for a in 0..=9 {
            for b in 0..=9 {
                for c in 0..=9 {
                    let p = predict(&series(&[a, 1, 2, 3, b, 4, 5, 6, 7, c]));
                    assert!(
                        (0..=9).contains(&p.derived_number),
                        "a={a} b={b} c={c} gave {}",
                        p.derived_number
                    );
                    assert_eq!(p.verdict.is_big(), p.derived_number >= 5);
                    assert!((MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&p.confidence));
                }
            }
        }
    }

    #[test]
    fn confidence_bands() {
        assert_eq!(confidence_for(0), 85);
        assert_eq!(confidence_for(9), 85);
        assert_eq!(confidence_for(1), 75);
        assert_eq!(confidence_for(2), 75);
        assert_eq!(confidence_for(7), 75);
        assert_eq!(confidence_for(8), 75);
        assert_eq!(confidence_for(3), 70);
        assert_eq!(confidence_for(6), 70);
    }

    #[test]
    fn out_of_range_values_do_not_panic() {
        let p = predict(&series(&[i32::MAX, 0, 0, 0, i32::MAX, 0, 0, 0, 0, i32::MIN]));
        assert!(p.derived_number >= 0);
        let p = predict(&series(&[-50, 0, 0, 0, -3, 0, 0, 0, 0, 4]));
        // -53 is not reduced; |-53 - 4| = 57 -> 12
        assert_eq!(p.derived_number, 12);
        assert_eq!(p.verdict, Verdict::Big);
    }

    #[test]
    fn trace_serialises_flat() {
        let p = predict(&series(&[5, 8, 4, 5, 4, 6, 4, 8, 5, 2]));
        let json = serde_json::to_value(&p.calculation).unwrap();
        assert_eq!(json["formula"], "(first + fifth) - last");
        assert_eq!(json["final_result"], 7);

        let p = predict(&series(&[1, 2]));
        let json = serde_json::to_value(&p.calculation).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Insufficient data" }));
    }
}
