//! Error taxonomy for the sizing computation.
//!
//! Every variant is fatal to the run: the computation is deterministic and
//! side-effect free, so nothing is retried and no partial result is surfaced.

use std::error;
use std::fmt;

/// Failure raised by the sizing core.
#[derive(Debug, Clone, PartialEq)]
pub enum SizingError {
    /// A 1-based period or section index fell outside `[1, period_count]`.
    PeriodOutOfRange {
        /// Name of the offending argument (e.g. `"numberOfSections"`).
        name: &'static str,
        /// The rejected index.
        index: usize,
        /// Number of periods in the duty cycle.
        period_count: usize,
    },
    /// A cumulative-duration query with `first > last`.
    PeriodOrder { first: usize, last: usize },
    /// The discharge curve produced a current <= 0, making the Kt factor undefined.
    NonPositiveCurrent { duration_s: f64, amps: f64 },
    /// The discharge-sample set cannot support the interpolation method.
    InsufficientData { detail: String },
    /// Every candidate section was skipped, leaving no maximum to report.
    AllSectionsSkipped,
}

impl fmt::Display for SizingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PeriodOutOfRange {
                name,
                index,
                period_count,
            } => write!(
                f,
                "{name}={index} unfit (not in [1, {period_count}] range)"
            ),
            Self::PeriodOrder { first, last } => write!(
                f,
                "cumulative duration: firstPeriod ({first}) > lastPeriod ({last})"
            ),
            Self::NonPositiveCurrent { duration_s, amps } => write!(
                f,
                "discharge curve yields {amps:.4} A at {duration_s:.1} s; Kt factor is undefined for currents <= 0"
            ),
            Self::InsufficientData { detail } => {
                write!(f, "discharge samples unusable: {detail}")
            }
            Self::AllSectionsSkipped => write!(
                f,
                "every section was skipped; the duty cycle yields no sizing candidate"
            ),
        }
    }
}

impl error::Error for SizingError {}
