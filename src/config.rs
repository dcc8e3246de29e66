// src/config.rs
//! Persisted defaults for the logger and converter

use crate::error::{GpsError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_PORT: &str = "/dev/ttyACM0";
pub const DEFAULT_BAUDRATE: u32 = 9600;
pub const DEFAULT_LOG_FILE: &str = "gps_log.txt";
pub const DEFAULT_CSV_FILE: &str = "gps_data.csv";

/// Last-used port, baud rate and file names, offered as defaults on the
/// next run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub serial_port: String,
    pub baudrate: u32,
    pub log_file: String,
    pub csv_file: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            serial_port: DEFAULT_PORT.to_string(),
            baudrate: DEFAULT_BAUDRATE,
            log_file: DEFAULT_LOG_FILE.to_string(),
            csv_file: DEFAULT_CSV_FILE.to_string(),
        }
    }
}

impl LoggerConfig {
    /// Load configuration from the config file, falling back to defaults
    /// when no file exists yet.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .map_err(|e| GpsError::Other(format!("Failed to read config file: {}", e)))?;

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| GpsError::Other(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to the config file.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| GpsError::Other(format!("Failed to create config directory: {}", e)))?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| GpsError::Other(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, contents)
            .map_err(|e| GpsError::Other(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| GpsError::Other("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home)
            .join(".config")
            .join("gps-logger")
            .join("config.json"))
    }

    /// Update serial port settings
    pub fn update_serial(&mut self, port: String, baudrate: u32) {
        self.serial_port = port;
        self.baudrate = baudrate;
    }

    /// Update log and CSV file names
    pub fn update_files(&mut self, log_file: String, csv_file: String) {
        self.log_file = log_file;
        self.csv_file = csv_file;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggerConfig::default();

        assert_eq!(config.serial_port, "/dev/ttyACM0");
        assert_eq!(config.baudrate, 9600);
        assert_eq!(config.log_file, "gps_log.txt");
        assert_eq!(config.csv_file, "gps_data.csv");
    }

    #[test]
    fn test_update_serial() {
        let mut config = LoggerConfig::default();
        config.update_serial("/dev/ttyUSB0".to_string(), 115200);
        assert_eq!(config.serial_port, "/dev/ttyUSB0");
        assert_eq!(config.baudrate, 115200);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let mut config = LoggerConfig::default();
        config.update_files("track.txt".to_string(), "track.csv".to_string());

        let json = serde_json::to_string(&config).unwrap();
        let restored: LoggerConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.log_file, "track.txt");
        assert_eq!(restored.csv_file, "track.csv");
        assert_eq!(restored.serial_port, config.serial_port);
    }
}
