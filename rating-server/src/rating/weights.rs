//! Weighted averaging shared by every rating stage.

/// Sum of `value * weight` divided by the sum of weights.
///
/// Pairs beyond the shorter slice are ignored. A zero weight sum divides by
/// one instead, so an all-zero weighting yields `0.0` rather than NaN.
pub fn weighted_average(values: &[f64], weights: &[f64]) -> f64 {
    let (sum, total) = values
        .iter()
        .zip(weights)
        .fold((0.0, 0.0), |(sum, total), (value, weight)| {
            (sum + value * weight, total + weight)
        });
    sum / if total == 0.0 { 1.0 } else { total }
}

/// Running weighted sum for compositions whose terms are discovered one at a
/// time and may be skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedSum {
    sum: f64,
    total: f64,
    terms: usize,
}

impl WeightedSum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: f64, weight: f64) {
        self.sum += value * weight;
        self.total += weight;
        self.terms += 1;
    }

    /// The weighted average, or `None` if no term was added.
    pub fn average(&self) -> Option<f64> {
        if self.terms == 0 {
            return None;
        }
        Some(self.sum / if self.total == 0.0 { 1.0 } else { self.total })
    }
}
