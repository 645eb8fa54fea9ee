//! Constants used throughout the application

/// Number of landmarks in a complete face mesh
pub const NUM_FACE_LANDMARKS: usize = 468;

/// Number of landmarks when iris refinement is enabled
pub const NUM_REFINED_LANDMARKS: usize = 478;

/// Minimum time between evaluated frames in milliseconds
pub const DEFAULT_SEND_INTERVAL_MS: u64 = 20;

/// Lip separation (normalized y) above which the jaw is considered open
pub const DEFAULT_JAW_OPEN_THRESHOLD: f64 = 0.07;

/// Default serial baud rate
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Serial write timeout in milliseconds
pub const SERIAL_TIMEOUT_MS: u64 = 10;

/// Commands understood by the rig firmware beyond per-servo angles
pub const RESET_COMMAND: &str = "reset";
pub const JAW_OPEN_COMMAND: &str = "jaw_open";
pub const JAW_CLOSE_COMMAND: &str = "jaw_close";

/// Default window sizes for filters
pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 5;
pub const DEFAULT_MEDIAN_WINDOW: usize = 5;

/// Default filter parameters
pub const DEFAULT_EXPONENTIAL_ALPHA: f64 = 0.5;

/// Numeric precision epsilon
pub const EPSILON: f64 = 1e-10;
