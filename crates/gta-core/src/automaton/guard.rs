//! Half-open guard intervals.

/// A left-open, right-closed interval `(low, high]` gating one transition.
///
/// Bounds use IEEE-754 infinities for the unbounded ends. A value equal to
/// `low` belongs to the previous interval of a partition, never this one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guard {
    low: f64,
    high: f64,
}

impl Guard {
    /// The whole real line.
    pub const FULL: Guard = Guard {
        low: f64::NEG_INFINITY,
        high: f64::INFINITY,
    };

    /// Build a guard; `None` unless `low < high` (so NaN bounds are rejected).
    pub fn new(low: f64, high: f64) -> Option<Self> {
        if low < high {
            Some(Guard { low, high })
        } else {
            None
        }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// `low < value <= high`.
    #[inline]
    pub fn matches(&self, value: f64) -> bool {
        self.low < value && value <= self.high
    }

    pub fn is_low_unbounded(&self) -> bool {
        self.low == f64::NEG_INFINITY
    }

    pub fn is_high_unbounded(&self) -> bool {
        self.high == f64::INFINITY
    }

    /// Same low bound, high bound pushed to `+inf`.
    pub(crate) fn with_unbounded_high(self) -> Guard {
        Guard {
            low: self.low,
            high: f64::INFINITY,
        }
    }
}

impl std::fmt::Display for Guard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}]", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_open_right_closed() {
        let g = Guard::new(0.0, 1.0).unwrap();
        assert!(!g.matches(0.0));
        assert!(g.matches(1e-300));
        assert!(g.matches(1.0));
        assert!(!g.matches(1.000_000_1));
    }

    #[test]
    fn test_unbounded_ends() {
        let low = Guard::new(f64::NEG_INFINITY, 0.0).unwrap();
        assert!(low.matches(-1e308));
        assert!(low.matches(f64::MIN));
        assert!(!low.matches(f64::NEG_INFINITY));
        assert!(low.is_low_unbounded());

        let high = Guard::new(0.0, f64::INFINITY).unwrap();
        assert!(high.matches(f64::MAX));
        assert!(high.matches(f64::INFINITY));
        assert!(high.is_high_unbounded());
    }

    #[test]
    fn test_nan_never_matches() {
        assert!(!Guard::FULL.matches(f64::NAN));
    }

    #[test]
    fn test_rejects_empty_and_nan() {
        assert!(Guard::new(1.0, 1.0).is_none());
        assert!(Guard::new(2.0, 1.0).is_none());
        assert!(Guard::new(f64::NAN, 1.0).is_none());
        assert!(Guard::new(f64::INFINITY, f64::INFINITY).is_none());
    }
}
