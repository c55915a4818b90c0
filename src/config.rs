//! JSON sizing-definition file: parameters, data-file names, validation.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::sizing::types::SizingParameters;

/// Top-level sizing definition parsed from a JSON file.
///
/// Field names match the definition-file schema, e.g. `nominalCapacity`
/// and `csvFileNames.startingCycles`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SizingDefinition {
    /// Free-text test title printed in the run banner.
    pub title: String,
    /// Nominal capacity of one battery block (Ah).
    pub nominal_capacity: f64,
    /// Number of candidate sections to evaluate.
    pub number_of_sections: usize,
    /// Print the per-section trace tables.
    #[serde(default)]
    pub verbose: bool,
    /// Temperature derating factor.
    pub derating_factor_on_temp: f64,
    /// Random-load allowance (Ah).
    pub random_size: f64,
    /// Installation design margin.
    pub design_margin: f64,
    /// End-of-life aging factor.
    pub aging_factor: f64,
    /// Final tolerance applied before the battery count.
    pub final_tolerance: f64,
    /// Paths of the two CSV data files.
    pub csv_file_names: CsvFileNames,
}

/// CSV data-file paths referenced by the definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CsvFileNames {
    /// Duty-cycle file: (time, amps, cycle) rows.
    pub starting_cycles: PathBuf,
    /// Discharge-curve file: (duration, amps) rows.
    pub amps_by_duration_file_name: PathBuf,
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"csvFileNames.startingCycles"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl SizingDefinition {
    /// Parses a definition from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the JSON is
    /// invalid.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "definition".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_json_str(&content)
    }

    /// Parses a definition from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the JSON is invalid or contains unknown
    /// fields.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError {
            field: "json".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all numeric fields and returns a list of errors.
    ///
    /// Returns an empty vector if the definition is valid. The
    /// `numberOfSections <= periodCount` bound needs the loaded duty cycle
    /// and is checked by the sizing run instead.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.nominal_capacity <= 0.0 {
            errors.push(ConfigError {
                field: "nominalCapacity".into(),
                message: "must be > 0".into(),
            });
        }
        if self.number_of_sections == 0 {
            errors.push(ConfigError {
                field: "numberOfSections".into(),
                message: "must be >= 1".into(),
            });
        }
        if self.derating_factor_on_temp <= 0.0 {
            errors.push(ConfigError {
                field: "deratingFactorOnTemp".into(),
                message: "must be > 0".into(),
            });
        }
        if self.random_size < 0.0 {
            errors.push(ConfigError {
                field: "randomSize".into(),
                message: "must be >= 0".into(),
            });
        }
        if self.design_margin <= 0.0 {
            errors.push(ConfigError {
                field: "designMargin".into(),
                message: "must be > 0".into(),
            });
        }
        if self.aging_factor <= 0.0 {
            errors.push(ConfigError {
                field: "agingFactor".into(),
                message: "must be > 0".into(),
            });
        }
        if !(self.final_tolerance > 0.0 && self.final_tolerance <= 1.0) {
            errors.push(ConfigError {
                field: "finalTolerance".into(),
                message: "must be in (0.0, 1.0]".into(),
            });
        }

        errors
    }

    /// Checks that both referenced data files exist, reporting each missing
    /// one with its config key.
    pub fn data_file_errors(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let files = [
            ("csvFileNames.startingCycles", &self.csv_file_names.starting_cycles),
            (
                "csvFileNames.ampsByDurationFileName",
                &self.csv_file_names.amps_by_duration_file_name,
            ),
        ];
        for (field, path) in files {
            if !path.is_file() {
                errors.push(ConfigError {
                    field: field.into(),
                    message: format!("no such file \"{}\"", path.display()),
                });
            }
        }
        errors
    }

    /// The immutable parameter value object handed to the sizing core.
    pub fn parameters(&self) -> SizingParameters {
        SizingParameters {
            nominal_capacity_ah: self.nominal_capacity,
            derating_factor_on_temp: self.derating_factor_on_temp,
            design_margin: self.design_margin,
            aging_factor: self.aging_factor,
            final_tolerance: self.final_tolerance,
            random_size_ah: self.random_size,
            number_of_sections: self.number_of_sections,
        }
    }
}
