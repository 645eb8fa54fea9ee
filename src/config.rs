//! Configuration management for the face rig application

use crate::constants::{
    DEFAULT_BAUD_RATE, DEFAULT_EXPONENTIAL_ALPHA, DEFAULT_JAW_OPEN_THRESHOLD, DEFAULT_MEDIAN_WINDOW,
    DEFAULT_MOVING_AVERAGE_WINDOW, DEFAULT_SEND_INTERVAL_MS,
};
use crate::driver::DriverConfig;
use crate::filters::{create_filter, DeltaFilter};
use crate::table::{self, ServoConfig};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Serial link configuration
    pub serial: SerialConfig,

    /// Control loop configuration
    pub control: ControlConfig,

    /// Filter configuration
    pub filter: FilterConfig,

    /// Servo table configuration
    pub table: TableConfig,
}

/// Serial link parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Port name, e.g. `/dev/ttyUSB0` (may be overridden on the command line)
    pub port: Option<String>,

    /// Baud rate
    pub baud_rate: u32,
}

/// Control loop parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlConfig {
    /// Minimum time between evaluated frames in milliseconds
    pub send_interval_ms: u64,

    /// Lip separation above which the jaw opens
    pub jaw_open_threshold: f64,

    /// Measure x/y deltas in the face-local (roll-corrected) frame
    pub roll_correction: bool,
}

/// Filter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Default filter type
    pub default_filter: String,

    /// Moving average window size
    pub moving_average_window: usize,

    /// Median filter window size
    pub median_window: usize,

    /// Exponential filter alpha value
    pub exponential_alpha: f64,
}

/// Servo table configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableConfig {
    /// Path to a servo table file; the built-in table is used when unset
    pub path: Option<PathBuf>,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud_rate: DEFAULT_BAUD_RATE,
        }
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            send_interval_ms: DEFAULT_SEND_INTERVAL_MS,
            jaw_open_threshold: DEFAULT_JAW_OPEN_THRESHOLD,
            roll_correction: false,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            default_filter: "none".to_string(),
            moving_average_window: DEFAULT_MOVING_AVERAGE_WINDOW,
            median_window: DEFAULT_MEDIAN_WINDOW,
            exponential_alpha: DEFAULT_EXPONENTIAL_ALPHA,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Create a filter from configuration
    pub fn create_filter(&self) -> Result<Box<dyn DeltaFilter>> {
        use crate::filters::{exponential::ExponentialFilter, median::MedianFilter, moving_average::MovingAverageFilter};

        match self.filter.default_filter.as_str() {
            "moving_average" => Ok(Box::new(MovingAverageFilter::new(self.filter.moving_average_window))),
            "median" => Ok(Box::new(MedianFilter::new(self.filter.median_window))),
            "exponential" => Ok(Box::new(ExponentialFilter::new(self.filter.exponential_alpha))),
            name => create_filter(name),
        }
    }

    /// Load the servo table named by the configuration, or the built-in one
    pub fn load_table(&self) -> Result<Vec<ServoConfig>> {
        let servos = match &self.table.path {
            Some(path) => table::parse_table(&std::fs::read_to_string(path)?)?,
            None => table::default_table(),
        };
        table::validate_table(&servos)?;
        Ok(servos)
    }

    /// Driver settings derived from the control section
    pub fn driver_config(&self) -> DriverConfig {
        DriverConfig {
            send_interval: Duration::from_millis(self.control.send_interval_ms),
            jaw_open_threshold: self.control.jaw_open_threshold,
            roll_correction: self.control.roll_correction,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.serial.baud_rate == 0 {
            return Err(Error::ConfigError("Baud rate must be greater than 0".to_string()));
        }

        if self.control.jaw_open_threshold <= 0.0 {
            return Err(Error::ConfigError(
                "Jaw open threshold must be greater than 0".to_string(),
            ));
        }

        if self.filter.moving_average_window == 0 {
            return Err(Error::ConfigError(
                "Moving average window size must be greater than 0".to_string(),
            ));
        }
        if self.filter.median_window == 0 || self.filter.median_window % 2 == 0 {
            return Err(Error::ConfigError(
                "Median window size must be odd and greater than 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.filter.exponential_alpha) {
            return Err(Error::ConfigError(
                "Exponential alpha must be between 0.0 and 1.0".to_string(),
            ));
        }

        if let Some(path) = &self.table.path {
            if !path.exists() {
                return Err(Error::ConfigError(format!(
                    "Servo table file not found: {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Face Rig Configuration

# Serial link
serial:
  port: "/dev/ttyUSB0"
  baud_rate: 115200

# Control loop
control:
  send_interval_ms: 20
  jaw_open_threshold: 0.07
  roll_correction: false

# Delta filtering
filter:
  default_filter: "none"
  moving_average_window: 5
  median_window: 5
  exponential_alpha: 0.5

# Servo table (omit path to use the built-in table)
table:
  path: null
"#;
