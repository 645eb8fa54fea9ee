//! Per-servo evaluation: from a landmark frame to a rounded servo angle.

use crate::geometry::{distance_2d, map_range, rotate_about};
use crate::landmarks::{topology, LandmarkFrame};
use crate::table::{Axis, ServoConfig};
use crate::{Error, Result};
use std::fmt;

/// A single angle command for one servo.
///
/// Serializes to the wire format the rig firmware parses:
/// `<channel>:<pin>,<angle>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServoCommand {
    pub channel: String,
    pub pin: u8,
    pub angle: i32,
}

impl fmt::Display for ServoCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{},{}", self.channel, self.pin, self.angle)
    }
}

/// A servo config with its landmark names resolved to topology indices.
///
/// Resolution happens once at table load; evaluation is then a pair of array
/// lookups per frame.
#[derive(Debug, Clone)]
pub struct ResolvedServo {
    config: ServoConfig,
    source_index: usize,
    reference_index: usize,
}

impl ResolvedServo {
    pub fn resolve(config: ServoConfig) -> Result<Self> {
        let source_index = topology::index_of(&config.source)
            .ok_or_else(|| Error::Table(format!("unknown landmark {:?}", config.source)))?;
        let reference_index = topology::index_of(&config.reference)
            .ok_or_else(|| Error::Table(format!("unknown landmark {:?}", config.reference)))?;
        Ok(Self {
            config,
            source_index,
            reference_index,
        })
    }

    pub fn config(&self) -> &ServoConfig {
        &self.config
    }

    /// Measure this servo's delta on a frame.
    ///
    /// Returns `None` when either landmark is missing from the frame, which
    /// skips the servo for this pass without affecting the others. When a
    /// roll angle is supplied, x/y deltas are taken after rotating the source
    /// point into the face-local frame; distance deltas are
    /// rotation-invariant and use the raw points.
    pub fn measure(&self, frame: &LandmarkFrame, roll: Option<f64>) -> Option<f64> {
        let source = frame.get(self.source_index)?;
        let reference = frame.get(self.reference_index)?;

        let delta = match self.config.axis {
            Axis::Distance => distance_2d(source, reference),
            axis => {
                let source = match roll {
                    Some(angle) => rotate_about(source, reference, -angle),
                    None => *source,
                };
                let horizontal = axis == Axis::X;
                (source.axis_value(horizontal) - reference.axis_value(horizontal)).abs()
            }
        };

        Some(delta)
    }

    /// Map a measured delta onto the servo's angle range, rounded to a whole
    /// degree
    pub fn angle_for(&self, delta: f64) -> i32 {
        let cfg = &self.config;
        map_range(delta, cfg.delta_min, cfg.delta_max, cfg.closed, cfg.open).round() as i32
    }

    /// Build the wire command for an angle
    pub fn command(&self, angle: i32) -> ServoCommand {
        ServoCommand {
            channel: self.config.channel.clone(),
            pin: self.config.pin,
            angle,
        }
    }
}
