// src/gps/data.rs
//! GPS fix record and log line formatting

use chrono::NaiveTime;

/// A single position fix parsed from one GPGGA sentence.
///
/// Built per sentence, rendered to a log line, then discarded; nothing
/// here is accumulated across reads.
#[derive(Debug, Clone, PartialEq)]
pub struct GpsFix {
    pub timestamp: NaiveTime,
    pub latitude: f64,       // decimal degrees, south negative
    pub longitude: f64,      // decimal degrees, west negative
    pub altitude: Option<f64>, // meters above mean sea level
    pub satellites: u32,
}

impl GpsFix {
    /// Render the fix as one log file line.
    ///
    /// Coordinates carry exactly six decimal digits; an absent altitude
    /// renders as `0`.
    pub fn log_line(&self) -> String {
        format!(
            "{}, Lat: {:.6}, Lon: {:.6}, Alt: {}, Sats: {}",
            self.timestamp.format("%H:%M:%S"),
            self.latitude,
            self.longitude,
            Self::format_altitude(self.altitude),
            self.satellites
        )
    }

    fn format_altitude(altitude: Option<f64>) -> String {
        match altitude {
            Some(alt) => format!("{}", alt),
            None => "0".to_string(),
        }
    }
}
