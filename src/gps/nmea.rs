// src/gps/nmea.rs
//! NMEA GPGGA sentence parsing

use super::data::GpsFix;
use crate::error::{GpsError, Result};
use chrono::NaiveTime;

/// Parse a line if it is a GPGGA sentence.
///
/// Returns `None` for every other sentence type, `Some(Err(_))` for a
/// malformed GPGGA sentence and `Some(Ok(fix))` on success.
pub fn parse_if_gpgga(line: &str) -> Option<Result<GpsFix>> {
    if line.starts_with("$GPGGA") {
        Some(parse_gpgga(line))
    } else {
        None
    }
}

/// Parse a GPGGA (Global Positioning System Fix Data) sentence
pub fn parse_gpgga(line: &str) -> Result<GpsFix> {
    let parts: Vec<&str> = line.split(',').collect();

    if parts.len() < 15 {
        return Err(GpsError::Parse(format!(
            "truncated GPGGA sentence ({} fields)",
            parts.len()
        )));
    }

    let timestamp = parse_time(parts[1])?;

    // Latitude (field 2 and 3), longitude (field 4 and 5)
    let latitude = parse_coordinate(parts[2], parts[3], "S")?;
    let longitude = parse_coordinate(parts[4], parts[5], "W")?;

    // Number of satellites (field 7)
    let satellites = if parts[7].is_empty() {
        0
    } else {
        parts[7]
            .parse::<u32>()
            .map_err(|_| GpsError::Parse(format!("invalid satellite count '{}'", parts[7])))?
    };

    // Altitude above mean sea level (field 9)
    let altitude = if parts[9].is_empty() {
        None
    } else {
        Some(
            parts[9]
                .parse::<f64>()
                .map_err(|_| GpsError::Parse(format!("invalid altitude '{}'", parts[9])))?,
        )
    };

    Ok(GpsFix {
        timestamp,
        latitude,
        longitude,
        altitude,
        satellites,
    })
}

/// Parse a `hhmmss[.sss]` time-of-day field; the fractional part is dropped.
fn parse_time(field: &str) -> Result<NaiveTime> {
    let digits = field.split('.').next().unwrap_or("");
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GpsError::Parse(format!("invalid time field '{}'", field)));
    }

    let hour: u32 = digits[0..2].parse().unwrap_or(0);
    let minute: u32 = digits[2..4].parse().unwrap_or(0);
    let second: u32 = digits[4..6].parse().unwrap_or(0);

    NaiveTime::from_hms_opt(hour, minute, second)
        .ok_or_else(|| GpsError::Parse(format!("time field '{}' out of range", field)))
}

/// Convert a `ddmm.mmmm` coordinate plus hemisphere into signed decimal
/// degrees. Empty fields mean no fix yet and convert to 0.0.
fn parse_coordinate(value: &str, hemisphere: &str, negative: &str) -> Result<f64> {
    if value.is_empty() || hemisphere.is_empty() {
        return Ok(0.0);
    }

    let raw = value
        .parse::<f64>()
        .map_err(|_| GpsError::Parse(format!("invalid coordinate '{}'", value)))?;

    let degrees = (raw / 100.0) as i32;
    let minutes = raw % 100.0;
    let mut decimal = degrees as f64 + minutes / 60.0;
    if hemisphere == negative {
        decimal = -decimal;
    }

    Ok(decimal)
}
