//! Orchestrates one sizing run: every candidate section, then the final
//! aggregation.

use crate::sizing::curve::DischargeCurve;
use crate::sizing::duty::DutyCycle;
use crate::sizing::error::SizingError;
use crate::sizing::report::{SizingReport, aggregate};
use crate::sizing::section::size_section;
use crate::sizing::types::{SectionOutcome, SizingParameters};

/// Everything one run produces: the per-section outcomes (for diagnostic
/// display or export) and the final report.
#[derive(Debug, Clone)]
pub struct SizingRun {
    pub outcomes: Vec<SectionOutcome>,
    pub report: SizingReport,
}

/// Sizes the battery bank against the full duty cycle.
///
/// Evaluates sections `1..=number_of_sections` against the discharge curve,
/// then aggregates the non-skipped totals into the final report. The run
/// either completes whole or fails; no partial report is returned.
///
/// # Errors
///
/// Fails fast on the first [`SizingError`] from any stage, including an
/// out-of-range `number_of_sections`.
pub fn run_sizing(
    curve: &DischargeCurve,
    duty: &DutyCycle,
    params: &SizingParameters,
) -> Result<SizingRun, SizingError> {
    duty.check_period(params.number_of_sections, "numberOfSections")?;

    let mut outcomes = Vec::with_capacity(params.number_of_sections);
    for section in 1..=params.number_of_sections {
        outcomes.push(size_section(
            section,
            duty,
            curve,
            params.nominal_capacity_ah,
            params.derating_factor_on_temp,
        )?);
    }

    let tested_cycles = duty.cycle_at(params.number_of_sections)?;
    let report = aggregate(&outcomes, params, tested_cycles)?;
    Ok(SizingRun { outcomes, report })
}
