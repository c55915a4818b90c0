//! CSV readers for the two data files: the discharge characteristic and the
//! starting duty cycle. The first column of both files is an `HH:MM:SS[.S]`
//! timestamp converted to seconds.

use std::path::Path;

use crate::io::time::parse_hms;
use crate::sizing::duty::DutyPeriod;

/// Loads (duration_s, amps) discharge samples from a headered CSV file.
///
/// Validates that durations are positive and strictly increasing and that
/// currents are non-negative.
///
/// # Errors
///
/// Returns a message naming the file and the offending 1-based data row.
pub fn load_discharge_samples(path: &Path) -> Result<Vec<(f64, f64)>, String> {
    let mut reader = open(path)?;
    let mut samples = Vec::new();

    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| at(path, row, &e.to_string()))?;
        if record.len() != 2 {
            return Err(at(path, row, &format!("expected 2 columns, got {}", record.len())));
        }
        let duration_s = parse_hms(&record[0]).map_err(|e| at(path, row, &e))?;
        let amps = parse_amps(&record[1]).map_err(|e| at(path, row, &e))?;

        if duration_s <= 0.0 {
            return Err(at(path, row, "duration must be > 0"));
        }
        if let Some(&(previous, _)) = samples.last()
            && duration_s <= previous
        {
            return Err(at(
                path,
                row,
                &format!("duration {duration_s:.3} s does not increase past {previous:.3} s"),
            ));
        }
        samples.push((duration_s, amps));
    }

    Ok(samples)
}

/// Loads (duration, amps, cycle) duty periods from a headered CSV file.
///
/// Validates that durations are positive, currents non-negative, and cycle
/// numbers positive and non-decreasing in file order.
///
/// # Errors
///
/// Returns a message naming the file and the offending 1-based data row.
pub fn load_duty_periods(path: &Path) -> Result<Vec<DutyPeriod>, String> {
    let mut reader = open(path)?;
    let mut periods: Vec<DutyPeriod> = Vec::new();

    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| at(path, row, &e.to_string()))?;
        if record.len() != 3 {
            return Err(at(path, row, &format!("expected 3 columns, got {}", record.len())));
        }
        let duration_s = parse_hms(&record[0]).map_err(|e| at(path, row, &e))?;
        let amps = parse_amps(&record[1]).map_err(|e| at(path, row, &e))?;
        let cycle: u32 = record[2]
            .trim()
            .parse()
            .map_err(|_| at(path, row, &format!("bad cycle number \"{}\"", &record[2])))?;

        if duration_s <= 0.0 {
            return Err(at(path, row, "duration must be > 0"));
        }
        if cycle == 0 {
            return Err(at(path, row, "cycle numbers are 1-based"));
        }
        if let Some(previous) = periods.last()
            && cycle < previous.cycle
        {
            return Err(at(
                path,
                row,
                &format!("cycle {cycle} decreases after cycle {}", previous.cycle),
            ));
        }
        periods.push(DutyPeriod {
            duration_s,
            amps,
            cycle,
        });
    }

    Ok(periods)
}

fn open(path: &Path) -> Result<csv::Reader<std::fs::File>, String> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| format!("cannot read \"{}\": {e}", path.display()))
}

fn parse_amps(text: &str) -> Result<f64, String> {
    let amps: f64 = text
        .trim()
        .parse()
        .map_err(|_| format!("bad current \"{}\"", text.trim()))?;
    if amps < 0.0 {
        return Err(format!("current must be >= 0, got {amps}"));
    }
    Ok(amps)
}

/// Prefixes an error with the file name and 1-based data row number.
fn at(path: &Path, row: usize, message: &str) -> String {
    format!("\"{}\" row {}: {message}", path.display(), row + 1)
}
