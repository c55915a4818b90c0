//! Per-section sizing: the skip rule and the superposition fold over the
//! periods a section covers.

use crate::sizing::curve::DischargeCurve;
use crate::sizing::duty::DutyCycle;
use crate::sizing::error::SizingError;
use crate::sizing::types::{PeriodContribution, SectionOutcome};

/// Sizes one candidate section ending at 1-based period `section`.
///
/// A section is skipped when it is not the last period and the load right
/// after it is higher: the later section then dominates the maximum, so this
/// one needs no standalone requirement.
///
/// When evaluated, periods `1..=section` each contribute their step change in
/// load, converted to Ah by the Kt factor taken over the time remaining from
/// that period to the section end, derated for temperature. The section total
/// is the sum of those contributions.
///
/// # Errors
///
/// Returns [`SizingError::PeriodOutOfRange`] when `section` is not a valid
/// period index, or propagates [`SizingError::NonPositiveCurrent`] from a Kt
/// lookup on a pathological curve.
pub fn size_section(
    section: usize,
    duty: &DutyCycle,
    curve: &DischargeCurve,
    nominal_capacity_ah: f64,
    derating_factor_on_temp: f64,
) -> Result<SectionOutcome, SizingError> {
    duty.check_period(section, "section")?;

    if section < duty.period_count() && duty.amps_at(section)? < duty.amps_at(section + 1)? {
        return Ok(SectionOutcome::Skipped { section });
    }

    let mut previous_load = 0.0;
    let trace = (1..=section)
        .map(|period| {
            let p = duty.period_at(period)?;
            let load_amps = p.amps;
            let change_in_load_amps = load_amps - previous_load;
            previous_load = load_amps;

            let remaining_s = duty.cumulative_duration(period, section)?;
            let kt = curve.kt_factor(remaining_s, nominal_capacity_ah)?;

            Ok(PeriodContribution {
                period,
                load_amps,
                change_in_load_amps,
                duration_s: p.duration_s,
                remaining_s,
                kt,
                temp_derating: derating_factor_on_temp,
                required_size_ah: change_in_load_amps * kt * derating_factor_on_temp,
            })
        })
        .collect::<Result<Vec<_>, SizingError>>()?;

    let total_ah = trace.iter().map(|c| c.required_size_ah).sum();
    Ok(SectionOutcome::Evaluated {
        section,
        trace,
        total_ah,
    })
}
