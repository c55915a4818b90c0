/// Discharge-characteristic interpolation model.
pub mod curve;
pub mod duty;
pub mod error;
pub mod report;
/// Per-section skip rule and superposition accumulation.
pub mod section;
pub mod types;
