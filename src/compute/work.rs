/*!
 * Work Ranges
 *
 * The inclusive range a background computation runs over
 */

use crate::core::{LessonError, LessonResult};
use serde::{Deserialize, Serialize};

/// Inclusive integer range `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSpec {
    min: u64,
    max: u64,
}

impl WorkSpec {
    /// Create a spec, rejecting inverted ranges
    pub fn new(min: u64, max: u64) -> LessonResult<Self> {
        if min > max {
            return Err(LessonError::Configuration(format!(
                "work range is inverted: [{}, {}]",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub fn min(&self) -> u64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> u64 {
        self.max
    }

    /// Number of integers covered by the range
    ///
    /// `[0, u64::MAX]` holds one more integer than `u64` can count, so it
    /// saturates at `u64::MAX`.
    #[inline]
    pub fn len(&self) -> u64 {
        (self.max - self.min).saturating_add(1)
    }

    /// Always false: a valid spec covers at least one integer
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Sum of `sqrt(i)` for every `i` in the range, accumulated in ascending order
pub fn sum_of_square_roots(spec: &WorkSpec) -> f64 {
    (spec.min..=spec.max).fold(0.0, |acc, i| acc + (i as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_point_ranges() {
        assert_eq!(sum_of_square_roots(&WorkSpec::new(0, 0).unwrap()), 0.0);
        assert_eq!(sum_of_square_roots(&WorkSpec::new(4, 4).unwrap()), 2.0);
    }

    #[test]
    fn test_ascending_accumulation() {
        let spec = WorkSpec::new(1, 9).unwrap();
        let mut expected = 0.0;
        for i in 1..=9u64 {
            expected += (i as f64).sqrt();
        }
        assert_eq!(sum_of_square_roots(&spec), expected);
        assert_eq!(spec.len(), 9);
    }

    #[test]
    fn test_len_of_full_domain_saturates() {
        assert_eq!(WorkSpec::new(0, u64::MAX).unwrap().len(), u64::MAX);
        assert_eq!(WorkSpec::new(1, u64::MAX).unwrap().len(), u64::MAX);
        assert_eq!(WorkSpec::new(u64::MAX, u64::MAX).unwrap().len(), 1);
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(matches!(
            WorkSpec::new(5, 4),
            Err(LessonError::Configuration(_))
        ));
    }
}
