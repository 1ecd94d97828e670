//! Configuration structures for the room allocator
//!
//! This module contains the command line arguments, the partial configuration
//! file format and the merged [`HotelConfig`] with its validation logic.

use super::OutputFormat;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Booking request limits
pub mod booking_limits {
    /// Smallest number of rooms a single request may ask for
    pub const MIN_ROOMS_PER_REQUEST: i64 = 1;

    /// Largest number of rooms a single request may ask for
    pub const MAX_ROOMS_PER_REQUEST: i64 = 5;

    /// Probability that random occupancy marks a room as booked
    pub const DEFAULT_OCCUPANCY_RATE: f64 = 0.3;
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hotel-room-allocator",
    version = "0.1.0",
    about = "Hotel Room Allocator - Books rooms close to the lift",
    long_about = "Allocates hotel rooms to booking requests. Each request asks for 1 to 5 rooms; the allocator prefers placing the whole request on a single floor and otherwise picks the rooms nearest to the lift across floors.

EXAMPLES:
    # Book 3 rooms in a freshly seeded hotel
    hotel-room-allocator --book 3

    # Simulate 30% occupancy, then run two requests and show the grid
    hotel-room-allocator --random --seed 42 --book 4 --book 2 --show-rooms --output-format text

    # Keep room state between runs
    hotel-room-allocator --state-file rooms.json --book 5

    # Free every room in a saved state file
    hotel-room-allocator --state-file rooms.json --reset

    # Generate configuration template
    hotel-room-allocator --print-config > my-config.json

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Number of rooms to book; may be repeated to run several requests in order
    #[arg(
        long = "book",
        value_name = "COUNT",
        allow_negative_numbers = true,
        help = "Book COUNT rooms (repeatable)",
        long_help = "Run a booking request for COUNT rooms. Repeat the flag to run several requests in order. Valid counts are 1 to 5."
    )]
    pub book: Vec<i64>,

    /// Randomly occupy rooms before booking
    #[arg(long, help = "Randomly occupy rooms before running bookings")]
    pub random: bool,

    /// Reset every room to available before booking
    #[arg(long, help = "Reset every room to available before running bookings")]
    pub reset: bool,

    /// Probability that random occupancy books a room (0.0-1.0)
    #[arg(
        long,
        help = "Random occupancy rate (0.0-1.0)",
        long_help = "Probability that --random marks any single room as booked. Range: 0.0-1.0. Default: 0.3"
    )]
    pub occupancy_rate: Option<f64>,

    /// Random seed for reproducible occupancy
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// JSON file holding room state between runs
    #[arg(long, help = "Path to a JSON room state file")]
    pub state_file: Option<String>,

    /// Output format for outcomes and room listings
    #[arg(
        long,
        help = "Output format (json or text)",
        long_help = "Output format for booking outcomes and room listings. Supported formats: json, text. Default: json"
    )]
    pub output_format: Option<String>,

    /// Print every room after the session
    #[arg(long, help = "Print all rooms after running the session")]
    pub show_rooms: bool,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Directory for daily-rolling JSON log files
    #[arg(
        long,
        value_name = "DIR",
        help = "Also write JSON log files to DIR",
        long_help = "Write JSON log lines to daily-rolling files in DIR in addition to the console."
    )]
    pub log_dir: Option<String>,

    /// Dry run mode - validate configuration without touching any rooms
    #[arg(long, help = "Validate configuration without running the session")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Random seed for reproducible occupancy
    pub seed: Option<u64>,

    /// Probability that random occupancy books a room (0.0-1.0)
    pub occupancy_rate: Option<f64>,

    /// Output format for outcomes and room listings
    pub output_format: Option<String>,

    /// JSON file holding room state between runs
    pub state_file: Option<String>,

    /// Randomly occupy rooms before booking
    pub random_occupy: Option<bool>,

    /// Reset every room to available before booking
    pub reset: Option<bool>,

    /// Booking requests to run, in order
    pub bookings: Option<Vec<i64>>,

    /// Print every room after the session
    pub show_rooms: Option<bool>,
}

/// Configuration for a room allocation session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HotelConfig {
    /// Random seed for reproducible occupancy
    pub seed: Option<u64>,

    /// Probability that random occupancy books a room (0.0-1.0)
    pub occupancy_rate: f64,

    /// Output format for outcomes and room listings
    pub output_format: String,

    /// JSON file holding room state between runs
    pub state_file: Option<String>,

    /// Randomly occupy rooms before booking
    pub random_occupy: bool,

    /// Reset every room to available before booking
    pub reset: bool,

    /// Booking requests to run, in order
    pub bookings: Vec<i64>,

    /// Print every room after the session
    pub show_rooms: bool,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for the session configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Percentage value is out of range
    #[error("Invalid percentage for {field}: {value} (must be between 0.0 and 1.0)")]
    InvalidPercentage {
        /// Name of the field with invalid percentage
        field: String,
        /// The invalid percentage value
        value: f64,
    },

    /// Output format is not recognised
    #[error("Unknown output format: {0} (supported: json, text)")]
    InvalidOutputFormat(String),
}

impl Default for HotelConfig {
    fn default() -> Self {
        Self {
            seed: None,
            occupancy_rate: booking_limits::DEFAULT_OCCUPANCY_RATE,
            output_format: "json".to_string(),
            state_file: None,
            random_occupy: false,
            reset: false,
            bookings: Vec::new(),
            show_rooms: false,
        }
    }
}

impl HotelConfig {
    /// Create a new configuration from command line arguments and optional config file
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::from_cli_args(args)
    }

    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            seed: config_file.seed.or(defaults.seed),
            occupancy_rate: config_file.occupancy_rate.unwrap_or(defaults.occupancy_rate),
            output_format: config_file.output_format.unwrap_or(defaults.output_format),
            state_file: config_file.state_file.or(defaults.state_file),
            random_occupy: config_file.random_occupy.unwrap_or(defaults.random_occupy),
            reset: config_file.reset.unwrap_or(defaults.reset),
            bookings: config_file.bookings.unwrap_or(defaults.bookings),
            show_rooms: config_file.show_rooms.unwrap_or(defaults.show_rooms),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = args.occupancy_rate {
            config.occupancy_rate = value;
        }
        if let Some(value) = args.output_format {
            config.output_format = value;
        }
        if let Some(value) = args.state_file {
            config.state_file = Some(value);
        }

        // Flags can only switch behaviour on
        config.random_occupy |= args.random;
        config.reset |= args.reset;
        config.show_rooms |= args.show_rooms;

        if !args.book.is_empty() {
            config.bookings = args.book;
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    ///
    /// Booking counts are not checked here: an out-of-range request is a
    /// rejected booking, not a broken configuration.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(0.0..=1.0).contains(&self.occupancy_rate) {
            return Err(ConfigValidationError::InvalidPercentage {
                field: "occupancy_rate".to_string(),
                value: self.occupancy_rate,
            });
        }

        self.get_output_format()
            .map_err(|_| ConfigValidationError::InvalidOutputFormat(self.output_format.clone()))?;

        Ok(())
    }

    /// Get the output format as an enum value
    pub fn get_output_format(&self) -> Result<OutputFormat, String> {
        self.output_format.parse()
    }
}
