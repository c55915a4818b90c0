//! `HH:MM:SS[.S]` timestamp conversion used by both CSV data files and the
//! verbose trace tables.

/// Parses an `HH:MM:SS` string (seconds may carry a fractional part) into
/// seconds.
///
/// # Errors
///
/// Returns a description of the malformed component on failure.
pub fn parse_hms(text: &str) -> Result<f64, String> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    let [h, m, s] = parts.as_slice() else {
        return Err(format!("expected HH:MM:SS, got \"{}\"", text.trim()));
    };
    let hours: u32 = h
        .parse()
        .map_err(|_| format!("bad hours in \"{}\"", text.trim()))?;
    let minutes: u32 = m
        .parse()
        .map_err(|_| format!("bad minutes in \"{}\"", text.trim()))?;
    let seconds: f64 = s
        .parse()
        .map_err(|_| format!("bad seconds in \"{}\"", text.trim()))?;
    if seconds < 0.0 {
        return Err(format!("negative seconds in \"{}\"", text.trim()));
    }
    Ok(f64::from(hours) * 3600.0 + f64::from(minutes) * 60.0 + seconds)
}

/// Formats seconds back as `HH:MM:SS.S` for the trace tables.
pub fn format_hms(seconds: f64) -> String {
    let whole = seconds as u64;
    let h = whole / 3600;
    let m = (whole % 3600) / 60;
    let s = seconds - 3600.0 * h as f64 - 60.0 * m as f64;
    format!("{h:02}:{m:02}:{s:04.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_seconds() {
        assert_eq!(parse_hms("00:00:10").unwrap(), 10.0);
        assert_eq!(parse_hms("01:02:03.5").unwrap(), 3723.5);
        assert_eq!(parse_hms("10:00:00").unwrap(), 36000.0);
    }

    #[test]
    fn rejects_malformed_timestamps() {
        assert!(parse_hms("10").is_err());
        assert!(parse_hms("1:2").is_err());
        assert!(parse_hms("aa:00:00").is_err());
        assert!(parse_hms("00:00:-5").is_err());
    }

    #[test]
    fn formats_back_to_hms() {
        assert_eq!(format_hms(10.0), "00:00:10.0");
        assert_eq!(format_hms(3723.5), "01:02:03.5");
        assert_eq!(format_hms(59.96), "00:00:60.0");
    }

    #[test]
    fn round_trips_whole_second_values() {
        for s in [0.0, 1.0, 75.0, 3600.0, 5025.5] {
            assert_eq!(parse_hms(&format_hms(s)).unwrap(), s);
        }
    }
}
