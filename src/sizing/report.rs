//! Final aggregation: worst-case section plus allowances, margins, and the
//! battery count.

use std::fmt;

use crate::sizing::error::SizingError;
use crate::sizing::types::{SectionOutcome, SizingParameters};

/// Final sizing result for one run.
///
/// Carries the factors that produced it so the report can be rendered
/// without reaching back into the configuration.
#[derive(Debug, Clone)]
pub struct SizingReport {
    /// Largest evaluated section total (Ah).
    pub max_section_size_ah: f64,
    /// Random-load allowance added to the maximum (Ah).
    pub random_size_ah: f64,
    /// `max_section_size_ah + random_size_ah`.
    pub uncorrected_size_ah: f64,
    /// Installation design margin applied.
    pub design_margin: f64,
    /// End-of-life aging factor applied.
    pub aging_factor: f64,
    /// `uncorrected_size_ah * design_margin * aging_factor`.
    pub corrected_size_ah: f64,
    /// Final tolerance applied before the battery count.
    pub final_tolerance: f64,
    /// Number of battery blocks required.
    pub batteries_required: u32,
    /// Cycle number of the last sized section, for reporting.
    pub tested_cycles: u32,
}

/// Combines the evaluated section totals into the final report.
///
/// The battery count truncates toward zero, mirroring the integer conversion
/// in the source worksheet formula:
/// `floor((corrected * tolerance + nominal) / nominal)`.
///
/// # Errors
///
/// Returns [`SizingError::AllSectionsSkipped`] when no section was evaluated,
/// which indicates a degenerate duty cycle rather than a zero-size answer.
pub fn aggregate(
    outcomes: &[SectionOutcome],
    params: &SizingParameters,
    tested_cycles: u32,
) -> Result<SizingReport, SizingError> {
    let max_section_size_ah = outcomes
        .iter()
        .filter_map(SectionOutcome::total_ah)
        .fold(None, |acc: Option<f64>, total| {
            Some(acc.map_or(total, |m| m.max(total)))
        })
        .ok_or(SizingError::AllSectionsSkipped)?;

    let uncorrected_size_ah = max_section_size_ah + params.random_size_ah;
    let corrected_size_ah = uncorrected_size_ah * params.design_margin * params.aging_factor;
    let batteries_required = ((corrected_size_ah * params.final_tolerance
        + params.nominal_capacity_ah)
        / params.nominal_capacity_ah) as u32;

    Ok(SizingReport {
        max_section_size_ah,
        random_size_ah: params.random_size_ah,
        uncorrected_size_ah,
        design_margin: params.design_margin,
        aging_factor: params.aging_factor,
        corrected_size_ah,
        final_tolerance: params.final_tolerance,
        batteries_required,
        tested_cycles,
    })
}

impl fmt::Display for SizingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Result testing {} cycle{}",
            self.tested_cycles,
            if self.tested_cycles == 1 { "" } else { "s" }
        )?;
        writeln!(
            f,
            "Maximum section size: {:.2} + Random size: {:.2}",
            self.max_section_size_ah, self.random_size_ah
        )?;
        writeln!(f, " = Uncorrected size: {:.2} Ah", self.uncorrected_size_ah)?;
        writeln!(
            f,
            "Uncorrected size: {:.2} x Design margin: {:.2} x Aging factor: {:.2}",
            self.uncorrected_size_ah, self.design_margin, self.aging_factor
        )?;
        writeln!(f, " = Size: {:.2} Ah", self.corrected_size_ah)?;
        write!(
            f,
            "Number of batteries required: {} (with a {:.1}% tolerance)",
            self.batteries_required,
            100.0 * (1.0 - self.final_tolerance)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(nominal: f64, tolerance: f64) -> SizingParameters {
        SizingParameters {
            nominal_capacity_ah: nominal,
            derating_factor_on_temp: 1.0,
            design_margin: 1.1,
            aging_factor: 1.2,
            final_tolerance: tolerance,
            random_size_ah: 5.0,
            number_of_sections: 2,
        }
    }

    fn evaluated(section: usize, total_ah: f64) -> SectionOutcome {
        SectionOutcome::Evaluated {
            section,
            trace: Vec::new(),
            total_ah,
        }
    }

    #[test]
    fn takes_maximum_over_evaluated_sections() {
        let outcomes = vec![
            SectionOutcome::Skipped { section: 1 },
            evaluated(2, 40.0),
            evaluated(3, 90.0),
            evaluated(4, 60.0),
        ];
        let report = aggregate(&outcomes, &params(100.0, 0.9), 2).unwrap();
        assert_eq!(report.max_section_size_ah, 90.0);
        assert_eq!(report.uncorrected_size_ah, 95.0);
        assert!((report.corrected_size_ah - 95.0 * 1.1 * 1.2).abs() < 1e-9);
    }

    #[test]
    fn skipped_sections_never_contribute() {
        // A skipped section carries no total, even if a smaller evaluated
        // total follows it.
        let outcomes = vec![SectionOutcome::Skipped { section: 1 }, evaluated(2, 10.0)];
        let report = aggregate(&outcomes, &params(100.0, 0.9), 1).unwrap();
        assert_eq!(report.max_section_size_ah, 10.0);
    }

    #[test]
    fn all_skipped_is_an_error() {
        let outcomes = vec![
            SectionOutcome::Skipped { section: 1 },
            SectionOutcome::Skipped { section: 2 },
        ];
        let err = aggregate(&outcomes, &params(100.0, 0.9), 1);
        assert!(matches!(err, Err(SizingError::AllSectionsSkipped)));
    }

    #[test]
    fn battery_count_truncates_toward_zero() {
        // corrected = (145 + 5) * 1.1 * 1.2 = 198; 198 * 0.9 + 100 = 278.2;
        // 278.2 / 100 truncates to 2, not rounds to 3.
        let report = aggregate(&[evaluated(1, 145.0)], &params(100.0, 0.9), 1).unwrap();
        assert_eq!(report.batteries_required, 2);
    }

    #[test]
    fn battery_count_is_monotone_in_corrected_size() {
        let mut previous = 0;
        for total in [10.0, 50.0, 100.0, 200.0, 400.0, 800.0] {
            let report = aggregate(&[evaluated(1, total)], &params(100.0, 0.9), 1).unwrap();
            assert!(report.batteries_required >= previous);
            previous = report.batteries_required;
        }
    }

    #[test]
    fn display_reports_tolerance_percentage() {
        let report = aggregate(&[evaluated(1, 100.0)], &params(100.0, 0.9), 3).unwrap();
        let text = report.to_string();
        assert!(text.starts_with("Result testing 3 cycles"));
        assert!(text.contains("(with a 10.0% tolerance)"));
    }
}
