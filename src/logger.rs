// src/logger.rs
//! Serial acquisition loop: read GPGGA sentences, append fixes to a log file

use crate::{
    error::{GpsError, Result},
    gps::nmea,
};
use std::{
    io,
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio_serial::SerialPortBuilderExt;

/// Upper bound on one read attempt; keeps the loop responsive to ctrl-c.
const READ_TIMEOUT: Duration = Duration::from_millis(500);

/// Pause between read attempts; GPS units emit sentences at well under 10 Hz.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Owns the serial connection for the lifetime of one logging run.
pub struct GpsLogger {
    running: Arc<AtomicBool>,
}

impl GpsLogger {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Stop the loop cooperatively; observed between iterations.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Read GPGGA sentences from `port` and append one log line per fix to
    /// `log_path` until interrupted or the port fails.
    ///
    /// Failure to open the port ends the run; per-line decode and parse
    /// failures are reported and skipped. The serial handle is released by
    /// scope on every exit path.
    pub async fn run(&self, port: &str, baudrate: u32, log_path: &Path) -> Result<()> {
        println!("Connecting to GPS on {} at {} baud...", port, baudrate);

        let serial = tokio_serial::new(port, baudrate)
            .timeout(READ_TIMEOUT)
            .open_native_async()
            .map_err(|e| {
                GpsError::Connection(format!("Failed to open serial port {}: {}", port, e))
            })?;

        println!(
            "Logging GPS data to {}. Press Ctrl+C to stop.",
            log_path.display()
        );

        let mut reader = BufReader::new(serial);
        let mut line = String::new();

        while self.running.load(Ordering::Relaxed) {
            line.clear();

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    println!("\nLogging stopped by user.");
                    break;
                }
                read = tokio::time::timeout(READ_TIMEOUT, reader.read_line(&mut line)) => {
                    match read {
                        // No complete line inside the window; try again.
                        Err(_) => continue,
                        Ok(Ok(0)) => {
                            eprintln!("Serial port closed.");
                            break;
                        }
                        Ok(Ok(_)) => {
                            if let Some(parsed) = nmea::parse_if_gpgga(line.trim()) {
                                match parsed {
                                    Ok(fix) => {
                                        let log_line = fix.log_line();
                                        println!("{}", log_line);
                                        append_line(log_path, &log_line).await?;
                                    }
                                    Err(e) => eprintln!("{}", e),
                                }
                            }
                        }
                        Ok(Err(e)) if e.kind() == io::ErrorKind::InvalidData => {
                            eprintln!("Decode error: {}", e);
                        }
                        Ok(Err(e)) => return Err(GpsError::Io(e)),
                    }
                }
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }

        Ok(())
    }
}

impl Default for GpsLogger {
    fn default() -> Self {
        Self::new()
    }
}

/// Append one line to the log file.
///
/// The handle never outlives one write: the file is opened, written,
/// flushed and closed per line, so every logged fix is durable even if the
/// process dies between sentences.
async fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;

    file.write_all(line.as_bytes()).await?;
    file.write_all(b"\n").await?;
    file.flush().await?;

    Ok(())
}
