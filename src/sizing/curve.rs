//! Discharge-characteristic curve: supportable current as a function of
//! discharge duration, interpolated with a natural cubic spline.

use crate::sizing::error::SizingError;

/// Minimum number of discharge samples a cubic fit needs.
pub const MIN_SAMPLES: usize = 4;

/// A battery discharge characteristic built from (duration, current) samples.
///
/// The curve answers "what current can the cell sustain for `d` seconds" at
/// any duration, not only at the tabulated points. Queries inside the sampled
/// range evaluate the spline segment covering them; queries outside the range
/// continue the boundary segment's cubic polynomial instead of clamping, so
/// short test durations below the first tabulated sample still land on the
/// smooth curve.
#[derive(Debug, Clone)]
pub struct DischargeCurve {
    durations_s: Vec<f64>,
    amps: Vec<f64>,
    /// Spline second derivatives at each knot (natural end conditions).
    second_derivs: Vec<f64>,
}

impl DischargeCurve {
    /// Fits a natural cubic spline through the given (duration_s, current_a)
    /// samples.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::InsufficientData`] when fewer than
    /// [`MIN_SAMPLES`] samples are supplied or the durations are not strictly
    /// increasing.
    pub fn from_samples(samples: &[(f64, f64)]) -> Result<Self, SizingError> {
        if samples.len() < MIN_SAMPLES {
            return Err(SizingError::InsufficientData {
                detail: format!(
                    "cubic interpolation needs at least {MIN_SAMPLES} samples, got {}",
                    samples.len()
                ),
            });
        }
        for (i, pair) in samples.windows(2).enumerate() {
            if pair[1].0 <= pair[0].0 {
                return Err(SizingError::InsufficientData {
                    detail: format!(
                        "durations must be strictly increasing, but sample {} ({:.3} s) follows {:.3} s",
                        i + 2,
                        pair[1].0,
                        pair[0].0
                    ),
                });
            }
        }

        let durations_s: Vec<f64> = samples.iter().map(|s| s.0).collect();
        let amps: Vec<f64> = samples.iter().map(|s| s.1).collect();
        let second_derivs = natural_second_derivatives(&durations_s, &amps);

        Ok(Self {
            durations_s,
            amps,
            second_derivs,
        })
    }

    /// Number of samples the curve was fitted through.
    pub fn sample_count(&self) -> usize {
        self.durations_s.len()
    }

    /// Interpolated (or extrapolated) current in amps at `duration_s`.
    pub fn current_at(&self, duration_s: f64) -> f64 {
        let i = self.segment_index(duration_s);
        let (x0, x1) = (self.durations_s[i], self.durations_s[i + 1]);
        let h = x1 - x0;
        // Second-derivative form of the segment cubic. With a and b allowed
        // outside [0, 1] this is the polynomial continuation used for
        // extrapolation beyond the sampled range.
        let a = (x1 - duration_s) / h;
        let b = (duration_s - x0) / h;
        a * self.amps[i]
            + b * self.amps[i + 1]
            + ((a * a * a - a) * self.second_derivs[i]
                + (b * b * b - b) * self.second_derivs[i + 1])
                * h
                * h
                / 6.0
    }

    /// Kt factor at `duration_s`: nominal capacity divided by the current the
    /// curve supports for that duration.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::NonPositiveCurrent`] when the curve evaluates
    /// to a current <= 0 there.
    pub fn kt_factor(&self, duration_s: f64, nominal_capacity_ah: f64) -> Result<f64, SizingError> {
        let amps = self.current_at(duration_s);
        if amps <= 0.0 {
            return Err(SizingError::NonPositiveCurrent { duration_s, amps });
        }
        Ok(nominal_capacity_ah / amps)
    }

    /// Index of the spline segment evaluated for `duration_s`.
    ///
    /// Out-of-range durations map to the first or last segment, whose
    /// polynomial then extrapolates.
    fn segment_index(&self, duration_s: f64) -> usize {
        let upper = self.durations_s.partition_point(|&d| d <= duration_s);
        upper.clamp(1, self.durations_s.len() - 1) - 1
    }
}

/// Solves the natural-spline tridiagonal system for the second derivatives at
/// each knot (second derivative pinned to zero at both ends).
fn natural_second_derivatives(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut m = vec![0.0; n];
    let mut u = vec![0.0; n];

    // Forward sweep of the Thomas algorithm.
    for i in 1..n - 1 {
        let sig = (xs[i] - xs[i - 1]) / (xs[i + 1] - xs[i - 1]);
        let p = sig * m[i - 1] + 2.0;
        m[i] = (sig - 1.0) / p;
        let slope_right = (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i]);
        let slope_left = (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
        u[i] = (6.0 * (slope_right - slope_left) / (xs[i + 1] - xs[i - 1]) - sig * u[i - 1]) / p;
    }

    // Back substitution; m[n-1] stays 0 (natural boundary).
    m[n - 1] = 0.0;
    for i in (1..n - 1).rev() {
        m[i] = m[i] * m[i + 1] + u[i];
    }
    m[0] = 0.0;
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(samples: &[(f64, f64)]) -> DischargeCurve {
        DischargeCurve::from_samples(samples).unwrap()
    }

    #[test]
    fn rejects_too_few_samples() {
        let err = DischargeCurve::from_samples(&[(1.0, 10.0), (2.0, 9.0), (3.0, 8.0)]);
        assert!(matches!(err, Err(SizingError::InsufficientData { .. })));
    }

    #[test]
    fn rejects_unordered_durations() {
        let err = DischargeCurve::from_samples(&[
            (1.0, 10.0),
            (5.0, 9.0),
            (5.0, 8.0),
            (10.0, 7.0),
        ]);
        assert!(matches!(err, Err(SizingError::InsufficientData { .. })));
    }

    #[test]
    fn reproduces_samples_at_knots() {
        let samples = [(1.0, 100.0), (10.0, 90.0), (100.0, 50.0), (1000.0, 20.0)];
        let c = curve(&samples);
        for (d, a) in samples {
            assert!((c.current_at(d) - a).abs() < 1e-9, "knot at {d} s");
        }
    }

    #[test]
    fn is_exact_on_linear_data() {
        // A natural spline through collinear samples has zero curvature
        // everywhere, so interpolation and extrapolation are both the line.
        let samples: Vec<(f64, f64)> = (1..=5).map(|i| (i as f64, 2.0 * i as f64 + 1.0)).collect();
        let c = curve(&samples);
        for d in [0.2, 1.5, 3.25, 4.9, 7.0] {
            assert!((c.current_at(d) - (2.0 * d + 1.0)).abs() < 1e-9, "at {d}");
        }
    }

    #[test]
    fn extrapolates_below_first_sample() {
        let samples = [(1.0, 100.0), (10.0, 90.0), (100.0, 50.0), (1000.0, 20.0)];
        let c = curve(&samples);
        // Below the shortest sample the boundary cubic keeps rising above the
        // first knot's value rather than clamping to it.
        let below = c.current_at(0.5);
        assert!(below > 100.0, "expected continuation above 100, got {below}");
    }

    #[test]
    fn kt_factor_divides_nominal_capacity() {
        let samples = [(1.0, 100.0), (10.0, 90.0), (100.0, 50.0), (1000.0, 20.0)];
        let c = curve(&samples);
        let kt = c.kt_factor(10.0, 100.0).unwrap();
        assert!((kt - 100.0 / 90.0).abs() < 1e-9);
    }

    #[test]
    fn kt_factor_rejects_non_positive_current() {
        // Steep linear decay crosses zero at d = 10; the spline follows it.
        let samples: Vec<(f64, f64)> =
            (1..=5).map(|i| (i as f64, 100.0 - 10.0 * i as f64)).collect();
        let c = curve(&samples);
        let err = c.kt_factor(20.0, 100.0);
        assert!(matches!(
            err,
            Err(SizingError::NonPositiveCurrent { .. })
        ));
    }
}
