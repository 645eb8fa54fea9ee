//! Face rig control library for driving an animatronic face from facial
//! landmarks.
//!
//! This library converts real-time facial landmark positions into servo-angle
//! commands over a serial link:
//! 1. Landmark frames arrive from an external detector (468-point face mesh)
//! 2. A declarative servo table measures per-feature geometry (axis deltas
//!    and 2D distances between landmark pairs)
//! 3. Deltas are optionally filtered and linearly mapped to servo angles
//! 4. Changed angles are emitted as text commands to the rig firmware
//!
//! # Examples
//!
//! ## Driving the rig from recorded frames
//!
//! ```no_run
//! use face_rig::config::Config;
//! use face_rig::driver::FaceRigDriver;
//! use face_rig::serial::SerialLink;
//! use face_rig::source::{FrameSource, JsonlSource};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let link = SerialLink::open("/dev/ttyUSB0", 115_200)?;
//!
//! let mut driver = FaceRigDriver::new(config.load_table()?, Box::new(link), config.driver_config())?;
//! driver.reset()?;
//!
//! let mut source = JsonlSource::from_path("session.jsonl")?;
//! while let Some(frame) = source.next_frame()? {
//!     driver.process_frame(&frame);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Evaluating a single servo by hand
//!
//! ```
//! use face_rig::mapping::ResolvedServo;
//! use face_rig::table::default_table;
//! use face_rig::landmarks::{Landmark, LandmarkFrame};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let servo = ResolvedServo::resolve(default_table().remove(0))?;
//!
//! let frame = LandmarkFrame::new(vec![Landmark::new(0.5, 0.5, 0.0); 478]);
//! if let Some(delta) = servo.measure(&frame, None) {
//!     let angle = servo.angle_for(delta);
//!     println!("{}", servo.command(angle));
//! }
//! # Ok(())
//! # }
//! ```

/// Landmark types and the face mesh topology
pub mod landmarks;

/// Geometric helpers: range mapping, distance, roll correction
pub mod geometry;

/// Declarative servo configuration table and its text format
pub mod table;

/// Per-servo evaluation from frame to angle command
pub mod mapping;

/// Delta smoothing filters
pub mod filters;

/// Serial command transport
pub mod serial;

/// Throttled evaluation loop
pub mod driver;

/// Landmark frame input sources
pub mod source;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
