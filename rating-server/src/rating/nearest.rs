//! Two-nearest selection over travel times.

use super::weights::weighted_average;

/// One selected target and its travel time.
#[derive(Debug, Clone, PartialEq)]
pub struct Nearest<K> {
    pub id: K,
    pub time: f64,
}

/// The two smallest travel times in a set, nearest first.
///
/// Sparse input is a normal case: fewer than two candidates yields `Empty`
/// or `One` rather than padding with sentinels.
#[derive(Debug, Clone, PartialEq)]
pub enum NearestPair<K> {
    Empty,
    One(Nearest<K>),
    Two(Nearest<K>, Nearest<K>),
}

impl<K> NearestPair<K> {
    pub fn first(&self) -> Option<&Nearest<K>> {
        match self {
            NearestPair::Empty => None,
            NearestPair::One(first) | NearestPair::Two(first, _) => Some(first),
        }
    }

    pub fn second(&self) -> Option<&Nearest<K>> {
        match self {
            NearestPair::Two(_, second) => Some(second),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, NearestPair::Empty)
    }

    /// Both slots as times, with `+inf` standing in for unfilled slots.
    pub fn times_or_infinity(&self) -> [f64; 2] {
        [
            self.first().map_or(f64::INFINITY, |n| n.time),
            self.second().map_or(f64::INFINITY, |n| n.time),
        ]
    }

    /// Weighted average of the filled slots.
    ///
    /// `weights` applies to (nearest, second-nearest). An unfilled slot drops
    /// out of both the numerator and the denominator; `Empty` gives `None`.
    pub fn weighted(&self, weights: (f64, f64)) -> Option<f64> {
        match self {
            NearestPair::Empty => None,
            NearestPair::One(first) => Some(first.time),
            NearestPair::Two(first, second) => Some(weighted_average(
                &[first.time, second.time],
                &[weights.0, weights.1],
            )),
        }
    }
}

/// Select the two smallest times in a single pass.
///
/// Comparisons are strict, so among equal times the entry seen first wins.
/// Callers pass a deterministically ordered sequence (e.g. a `BTreeMap`).
pub fn two_nearest<K>(items: impl IntoIterator<Item = (K, f64)>) -> NearestPair<K> {
    let mut first: Option<Nearest<K>> = None;
    let mut second: Option<Nearest<K>> = None;

    for (id, time) in items {
        let candidate = Nearest { id, time };
        match &first {
            Some(best) if time >= best.time => {
                if second.as_ref().is_none_or(|s| time < s.time) {
                    second = Some(candidate);
                }
            }
            _ => {
                second = first.take();
                first = Some(candidate);
            }
        }
    }

    match (first, second) {
        (None, _) => NearestPair::Empty,
        (Some(first), None) => NearestPair::One(first),
        (Some(first), Some(second)) => NearestPair::Two(first, second),
    }
}
