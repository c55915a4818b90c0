//! Duty-cycle sequence: the ordered engine-starting periods with the 1-based
//! indexing contract the IEEE 1115 worksheets use.

use crate::sizing::error::SizingError;

/// One step of the engine-starting profile.
#[derive(Debug, Clone, PartialEq)]
pub struct DutyPeriod {
    /// Length of the period in seconds (> 0).
    pub duration_s: f64,
    /// Load drawn during the period in amps (>= 0).
    pub amps: f64,
    /// Start-attempt cycle this period belongs to (1-based, non-decreasing).
    pub cycle: u32,
}

/// Ordered, immutable sequence of duty periods.
///
/// All lookups are 1-based: period 1 is the first period, matching the
/// numbering of the standard's worked tables. Every accessor bounds-checks
/// and fails fast on an out-of-range index.
#[derive(Debug, Clone)]
pub struct DutyCycle {
    periods: Vec<DutyPeriod>,
}

impl DutyCycle {
    pub fn new(periods: Vec<DutyPeriod>) -> Self {
        Self { periods }
    }

    /// Total number of periods.
    pub fn period_count(&self) -> usize {
        self.periods.len()
    }

    /// Validates a 1-based index, naming the offending argument on failure.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::PeriodOutOfRange`] when `index` is not in
    /// `[1, period_count]`.
    pub fn check_period(&self, index: usize, name: &'static str) -> Result<(), SizingError> {
        if index < 1 || index > self.periods.len() {
            return Err(SizingError::PeriodOutOfRange {
                name,
                index,
                period_count: self.periods.len(),
            });
        }
        Ok(())
    }

    /// The period at a 1-based index.
    pub fn period_at(&self, index: usize) -> Result<&DutyPeriod, SizingError> {
        self.check_period(index, "period")?;
        Ok(&self.periods[index - 1])
    }

    /// Load in amps at a 1-based period index.
    pub fn amps_at(&self, index: usize) -> Result<f64, SizingError> {
        Ok(self.period_at(index)?.amps)
    }

    /// Start-attempt cycle number at a 1-based period index.
    pub fn cycle_at(&self, index: usize) -> Result<u32, SizingError> {
        Ok(self.period_at(index)?.cycle)
    }

    /// Sum of durations over periods `[first, last]`, both inclusive and
    /// 1-based.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::PeriodOutOfRange`] when either bound is out of
    /// range, or [`SizingError::PeriodOrder`] when `first > last`.
    pub fn cumulative_duration(&self, first: usize, last: usize) -> Result<f64, SizingError> {
        self.check_period(first, "firstPeriod")?;
        self.check_period(last, "lastPeriod")?;
        if first > last {
            return Err(SizingError::PeriodOrder { first, last });
        }
        Ok(self.periods[first - 1..last]
            .iter()
            .map(|p| p.duration_s)
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duty() -> DutyCycle {
        DutyCycle::new(vec![
            DutyPeriod {
                duration_s: 10.0,
                amps: 450.0,
                cycle: 1,
            },
            DutyPeriod {
                duration_s: 50.0,
                amps: 8.0,
                cycle: 1,
            },
            DutyPeriod {
                duration_s: 10.0,
                amps: 450.0,
                cycle: 2,
            },
        ])
    }

    #[test]
    fn one_based_lookup() {
        let d = duty();
        assert_eq!(d.period_count(), 3);
        assert_eq!(d.amps_at(1).unwrap(), 450.0);
        assert_eq!(d.amps_at(2).unwrap(), 8.0);
        assert_eq!(d.cycle_at(3).unwrap(), 2);
    }

    #[test]
    fn rejects_out_of_range_indices() {
        let d = duty();
        assert!(matches!(
            d.period_at(0),
            Err(SizingError::PeriodOutOfRange { index: 0, .. })
        ));
        assert!(matches!(
            d.period_at(4),
            Err(SizingError::PeriodOutOfRange { index: 4, .. })
        ));
    }

    #[test]
    fn cumulative_duration_sums_inclusive_range() {
        let d = duty();
        assert_eq!(d.cumulative_duration(1, 1).unwrap(), 10.0);
        assert_eq!(d.cumulative_duration(1, 2).unwrap(), 60.0);
        assert_eq!(d.cumulative_duration(1, 3).unwrap(), 70.0);
        assert_eq!(d.cumulative_duration(2, 3).unwrap(), 60.0);
    }

    #[test]
    fn cumulative_duration_is_monotone_in_last() {
        let d = duty();
        let mut previous = 0.0;
        for last in 1..=d.period_count() {
            let total = d.cumulative_duration(1, last).unwrap();
            assert!(total >= previous);
            previous = total;
        }
    }

    #[test]
    fn cumulative_duration_validates_bounds_and_order() {
        let d = duty();
        assert!(matches!(
            d.cumulative_duration(0, 2),
            Err(SizingError::PeriodOutOfRange { .. })
        ));
        assert!(matches!(
            d.cumulative_duration(1, 4),
            Err(SizingError::PeriodOutOfRange { .. })
        ));
        assert!(matches!(
            d.cumulative_duration(3, 2),
            Err(SizingError::PeriodOrder { first: 3, last: 2 })
        ));
    }
}
