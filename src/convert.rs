// src/convert.rs
//! Batch conversion of a fix log into CSV

use crate::error::{GpsError, Result};
use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::Path,
};

pub const CSV_HEADER: [&str; 5] = [
    "Timestamp",
    "Latitude",
    "Longitude",
    "Altitude",
    "Satellites",
];

/// Outcome of one conversion run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConvertSummary {
    pub rows_written: usize,
    pub lines_skipped: usize,
}

/// Split one log line back into its five fields.
///
/// The line must carry at least five comma-separated segments; segment 0
/// is the timestamp taken verbatim (trimmed), segments 1-4 contribute the
/// trimmed text after their `:` tag. No numeric validation is performed;
/// the fields stay text.
pub fn parse_log_line(line: &str) -> Result<[String; 5]> {
    let parts: Vec<&str> = line.split(',').collect();

    if parts.len() < 5 {
        return Err(GpsError::Parse(format!(
            "expected 5 comma-separated fields, got {}",
            parts.len()
        )));
    }

    let tagged = |segment: &str| {
        segment
            .split_once(':')
            .map(|(_, value)| value.trim().to_string())
            .ok_or_else(|| GpsError::Parse(format!("missing ':' in segment '{}'", segment.trim())))
    };

    Ok([
        parts[0].trim().to_string(),
        tagged(parts[1])?,
        tagged(parts[2])?,
        tagged(parts[3])?,
        tagged(parts[4])?,
    ])
}

/// Convert log lines from `input` into CSV rows on `output`.
///
/// Writes the header first, then one row per well-formed line. A malformed
/// line is reported with its content and skipped; an I/O error on the
/// reader aborts the conversion.
pub fn convert_stream<R: BufRead, W: Write>(input: R, output: W) -> Result<ConvertSummary> {
    let mut writer = csv::Writer::from_writer(output);
    writer.write_record(CSV_HEADER)?;

    let mut summary = ConvertSummary::default();
    for line in input.lines() {
        let line = line?;
        match parse_log_line(&line) {
            Ok(fields) => {
                writer.write_record(&fields)?;
                summary.rows_written += 1;
            }
            Err(e) => {
                eprintln!("Skipping malformed line: {} ({})", line.trim_end(), e);
                summary.lines_skipped += 1;
            }
        }
    }

    writer.flush()?;
    Ok(summary)
}

/// Convert the log file at `log_path` into a CSV file at `csv_path`,
/// overwriting any existing output.
pub fn convert_log_to_csv(log_path: &Path, csv_path: &Path) -> Result<ConvertSummary> {
    // Input is opened first so a missing log never leaves a stray output file.
    let input = File::open(log_path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => {
            GpsError::Other(format!("Log file '{}' not found", log_path.display()))
        }
        _ => GpsError::Io(e),
    })?;

    let output = File::create(csv_path)?;
    let summary = convert_stream(BufReader::new(input), output)?;

    println!(
        "Successfully converted '{}' to '{}'",
        log_path.display(),
        csv_path.display()
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gps::GpsFix;
    use chrono::NaiveTime;

    fn convert_to_string(input: &str) -> (String, ConvertSummary) {
        let mut output = Vec::new();
        let summary = convert_stream(input.as_bytes(), &mut output).unwrap();
        (String::from_utf8(output).unwrap(), summary)
    }

    #[test]
    fn test_concrete_line_conversion() {
        let (csv, summary) =
            convert_to_string("123456, Lat: 12.345678, Lon: 98.765432, Alt: 123.4, Sats: 7\n");

        assert_eq!(
            csv,
            "Timestamp,Latitude,Longitude,Altitude,Satellites\n\
             123456,12.345678,98.765432,123.4,7\n"
        );
        assert_eq!(summary.rows_written, 1);
        assert_eq!(summary.lines_skipped, 0);
    }

    #[test]
    fn test_log_line_round_trips() {
        let fix = GpsFix {
            timestamp: NaiveTime::from_hms_opt(8, 15, 30).unwrap(),
            latitude: -33.868820,
            longitude: 151.209290,
            altitude: Some(58.0),
            satellites: 11,
        };

        let fields = parse_log_line(&fix.log_line()).unwrap();

        assert_eq!(fields[0], "08:15:30");
        assert_eq!(fields[1], "-33.868820");
        assert_eq!(fields[2], "151.209290");
        assert_eq!(fields[3], "58");
        assert_eq!(fields[4], "11");
    }

    #[test]
    fn test_malformed_lines_are_skipped_in_place() {
        let input = "\
123456, Lat: 1.000000, Lon: 2.000000, Alt: 3, Sats: 4
this line is junk
123457, Lat: 1.100000, Lon: 2.100000, Alt: 3, Sats: 5

123458, Lat: 1.200000, Lon: 2.200000, Alt: 3, Sats: 6
";
        let (csv, summary) = convert_to_string(input);

        assert_eq!(summary.rows_written, 3);
        assert_eq!(summary.lines_skipped, 2);
        // header + one row per well-formed line, in original order
        let rows: Vec<&str> = csv.lines().collect();
        assert_eq!(rows.len(), 4);
        assert!(rows[1].starts_with("123456,"));
        assert!(rows[2].starts_with("123457,"));
        assert!(rows[3].starts_with("123458,"));
    }

    #[test]
    fn test_too_few_segments_is_an_error() {
        assert!(parse_log_line("123456, Lat: 1.0, Lon: 2.0, Alt: 3").is_err());
        assert!(parse_log_line("").is_err());
    }

    #[test]
    fn test_missing_colon_tag_is_an_error() {
        assert!(parse_log_line("123456, 1.000000, Lon: 2.000000, Alt: 3, Sats: 4").is_err());
    }

    #[test]
    fn test_missing_input_creates_no_output() {
        let log_path = std::env::temp_dir().join("gps_logger_no_such_log.txt");
        let csv_path = std::env::temp_dir().join("gps_logger_should_not_exist.csv");
        let _ = std::fs::remove_file(&log_path);
        let _ = std::fs::remove_file(&csv_path);

        let result = convert_log_to_csv(&log_path, &csv_path);

        match result {
            Err(e) => assert!(e.to_string().contains("not found")),
            Ok(_) => panic!("conversion of a missing log must fail"),
        }
        assert!(!csv_path.exists());
    }

    #[test]
    fn test_file_to_file_conversion() {
        let log_path = std::env::temp_dir().join("gps_logger_convert_test.txt");
        let csv_path = std::env::temp_dir().join("gps_logger_convert_test.csv");
        std::fs::write(
            &log_path,
            "123456, Lat: 12.345678, Lon: 98.765432, Alt: 123.4, Sats: 7\nbroken\n",
        )
        .unwrap();

        let summary = convert_log_to_csv(&log_path, &csv_path).unwrap();

        assert_eq!(summary, ConvertSummary { rows_written: 1, lines_skipped: 1 });
        let csv = std::fs::read_to_string(&csv_path).unwrap();
        assert!(csv.ends_with("123456,12.345678,98.765432,123.4,7\n"));

        let _ = std::fs::remove_file(&log_path);
        let _ = std::fs::remove_file(&csv_path);
    }
}
