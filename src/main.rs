// src/main.rs
//! GPS Logger - serial NMEA fix logging and log-to-CSV conversion

use clap::{Parser, Subcommand};
use gps_logger::{config::LoggerConfig, convert, logger::GpsLogger, Result};
use std::io::{self, Write};
use std::path::Path;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log GPS fixes from a serial device to a text file
    Log {
        /// Serial port to read from
        #[arg(long)]
        port: Option<String>,

        /// Baud rate for the serial connection
        #[arg(long)]
        baudrate: Option<u32>,

        /// Log file to append fixes to
        #[arg(long)]
        output: Option<String>,
    },
    /// Convert a previously written log file to CSV
    Convert {
        /// Input log file
        #[arg(long)]
        input: Option<String>,

        /// Output CSV file
        #[arg(long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = LoggerConfig::load().unwrap_or_default();

    match cli.command {
        Some(Command::Log {
            port,
            baudrate,
            output,
        }) => {
            let port = port.unwrap_or_else(|| config.serial_port.clone());
            let baudrate = baudrate.unwrap_or(config.baudrate);
            let output = output.unwrap_or_else(|| config.log_file.clone());
            run_log(&port, baudrate, &output).await;
        }
        Some(Command::Convert { input, output }) => {
            let input = input.unwrap_or_else(|| config.log_file.clone());
            let output = output.unwrap_or_else(|| config.csv_file.clone());
            run_convert(&input, &output);
        }
        None => run_menu(&mut config).await?,
    }

    Ok(())
}

/// Interactive mode: choose an operation, prompting for its parameters
/// with the configured values as defaults.
async fn run_menu(config: &mut LoggerConfig) -> Result<()> {
    println!("Select an option:");
    println!("1. Log GPS data");
    println!("2. Convert log file to CSV");
    let choice = prompt("Enter 1 or 2")?;

    match choice.as_str() {
        "1" => {
            let port = prompt_with_default("Enter serial port", &config.serial_port)?;
            let baud_input = prompt_with_default("Enter baud rate", &config.baudrate.to_string())?;
            let baudrate = baud_input.parse().unwrap_or(config.baudrate);
            let log_file = prompt_with_default("Enter log file name", &config.log_file)?;

            config.update_serial(port.clone(), baudrate);
            let csv_file = config.csv_file.clone();
            config.update_files(log_file.clone(), csv_file);
            if let Err(e) = config.save() {
                eprintln!("Warning: could not save configuration: {}", e);
            }

            run_log(&port, baudrate, &log_file).await;
        }
        "2" => {
            let log_file = prompt_with_default("Enter log file name", &config.log_file)?;
            let csv_file = prompt_with_default("Enter output CSV file name", &config.csv_file)?;

            config.update_files(log_file.clone(), csv_file.clone());
            if let Err(e) = config.save() {
                eprintln!("Warning: could not save configuration: {}", e);
            }

            run_convert(&log_file, &csv_file);
        }
        _ => println!("Invalid choice."),
    }

    Ok(())
}

async fn run_log(port: &str, baudrate: u32, log_file: &str) {
    let logger = GpsLogger::new();
    if let Err(e) = logger.run(port, baudrate, Path::new(log_file)).await {
        eprintln!("{}", e);
    }
}

fn run_convert(log_file: &str, csv_file: &str) {
    if let Err(e) = convert::convert_log_to_csv(Path::new(log_file), Path::new(csv_file)) {
        eprintln!("{}", e);
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn prompt_with_default(label: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} (default {})", label, default))?;
    Ok(if input.is_empty() {
        default.to_string()
    } else {
        input
    })
}
