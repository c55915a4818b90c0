//! Core sizing value types: run parameters, per-period trace rows, and
//! per-section outcomes.

/// Sizing parameters supplied by the external definition file.
///
/// Passed by reference into the sizing functions; the core never owns or
/// mutates configuration state.
#[derive(Debug, Clone)]
pub struct SizingParameters {
    /// Nominal capacity of one battery block in Ah (> 0).
    pub nominal_capacity_ah: f64,
    /// Temperature derating factor applied to every contribution (> 0).
    pub derating_factor_on_temp: f64,
    /// Installation design margin (typically >= 1).
    pub design_margin: f64,
    /// End-of-life aging factor (typically >= 1).
    pub aging_factor: f64,
    /// Final tolerance applied before the battery count (0 < t <= 1).
    pub final_tolerance: f64,
    /// Random-load allowance in Ah (>= 0).
    pub random_size_ah: f64,
    /// Number of candidate sections to evaluate (1-based, <= period count).
    pub number_of_sections: usize,
}

/// One period's contribution to a section's required capacity.
///
/// The section total is the superposition of these step-change
/// contributions; a period whose load drops below the previous one carries a
/// negative `change_in_load_amps` and credits capacity back.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodContribution {
    /// 1-based period index within the duty cycle.
    pub period: usize,
    /// Load during the period in amps.
    pub load_amps: f64,
    /// Step change relative to the previous period's load.
    pub change_in_load_amps: f64,
    /// The period's own duration in seconds.
    pub duration_s: f64,
    /// Time from the start of this period to the end of the section.
    pub remaining_s: f64,
    /// Kt factor evaluated at `remaining_s`.
    pub kt: f64,
    /// Temperature derating factor applied.
    pub temp_derating: f64,
    /// `change_in_load_amps * kt * temp_derating`, in Ah.
    pub required_size_ah: f64,
}

/// Ordered per-period contributions for one evaluated section.
pub type SectionTrace = Vec<PeriodContribution>;

/// Result of examining one candidate section.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionOutcome {
    /// The section's terminal load is lower than the next period's load, so a
    /// later section dominates and this one needs no standalone evaluation.
    Skipped { section: usize },
    /// The section was evaluated; `total_ah` is the sum of the trace's
    /// required sizes.
    Evaluated {
        section: usize,
        trace: SectionTrace,
        total_ah: f64,
    },
}

impl SectionOutcome {
    /// 1-based section index this outcome belongs to.
    pub fn section(&self) -> usize {
        match self {
            Self::Skipped { section } | Self::Evaluated { section, .. } => *section,
        }
    }

    /// The section total in Ah, or `None` for a skipped section.
    pub fn total_ah(&self) -> Option<f64> {
        match self {
            Self::Skipped { .. } => None,
            Self::Evaluated { total_ah, .. } => Some(*total_ah),
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}
