//! Label statistics shared by every mining step.

use serde::{Deserialize, Serialize};

/// Positive/negative transaction totals over the full input.
///
/// Computed once by the preprocessor and threaded unchanged into every
/// chi-square computation at every recursion depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassTotals {
    pub positive: usize,
    pub negative: usize,
}

impl ClassTotals {
    pub fn record(&mut self, positive: bool) {
        if positive {
            self.positive += 1;
        } else {
            self.negative += 1;
        }
    }
}

/// Empirical probability of the positive label given the itemset.
///
/// Zero support yields 0 rather than NaN.
pub fn confidence(support: usize, pos_count: usize) -> f64 {
    if support == 0 {
        0.0
    } else {
        pos_count as f64 / support as f64
    }
}

/// Goodness-of-fit chi-square of an itemset's observed label split
/// `(pos_count, support - pos_count)` against the global class totals.
///
/// The expected counts are the raw totals, not rescaled to the observed
/// total. Downstream rankings depend on the resulting values, so this keeps
/// the historical formula even though a textbook goodness-of-fit test would
/// rescale.
pub fn chi_square(support: usize, pos_count: usize, totals: &ClassTotals) -> f64 {
    let observed = [pos_count as f64, (support - pos_count) as f64];
    let expected = [totals.positive as f64, totals.negative as f64];
    observed
        .iter()
        .zip(expected.iter())
        .map(|(o, e)| (o - e) * (o - e) / e)
        .sum()
}
