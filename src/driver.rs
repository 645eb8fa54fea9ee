//! The throttled evaluation loop that turns landmark frames into commands.
//!
//! Each pass over a frame measures every table entry, maps the deltas to
//! angles, and emits a command only for servos whose rounded angle changed
//! since the last successful send. Passes are rate-limited by a send
//! interval; frames arriving inside the interval are dropped whole.

use crate::constants::{
    DEFAULT_JAW_OPEN_THRESHOLD, DEFAULT_SEND_INTERVAL_MS, JAW_CLOSE_COMMAND, JAW_OPEN_COMMAND, RESET_COMMAND,
};
use crate::filters::{DeltaFilter, NoFilter};
use crate::geometry::roll_angle;
use crate::landmarks::{topology, LandmarkFrame};
use crate::mapping::ResolvedServo;
use crate::serial::CommandSink;
use crate::table::ServoConfig;
use crate::Result;
use log::{debug, trace, warn};
use std::time::{Duration, Instant};

/// Driver tuning knobs
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Minimum time between evaluated frames
    pub send_interval: Duration,
    /// Lip separation above which the jaw opens
    pub jaw_open_threshold: f64,
    /// Measure x/y deltas in the face-local (roll-corrected) frame
    pub roll_correction: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            send_interval: Duration::from_millis(DEFAULT_SEND_INTERVAL_MS),
            jaw_open_threshold: DEFAULT_JAW_OPEN_THRESHOLD,
            roll_correction: false,
        }
    }
}

struct ServoEntry {
    servo: ResolvedServo,
    filter: Box<dyn DeltaFilter>,
    // Last angle actually delivered to the sink. Pin numbers repeat across
    // controller channels, so this state is per entry, not per pin.
    last_angle: Option<i32>,
}

/// Maps landmark frames to rig commands through a [`CommandSink`]
pub struct FaceRigDriver {
    entries: Vec<ServoEntry>,
    sink: Box<dyn CommandSink>,
    config: DriverConfig,
    last_eval: Option<Instant>,
    jaw_open: Option<bool>,
}

impl FaceRigDriver {
    /// Create a driver with unfiltered deltas
    pub fn new(table: Vec<ServoConfig>, sink: Box<dyn CommandSink>, config: DriverConfig) -> Result<Self> {
        Self::with_filters(table, sink, config, || Ok(Box::new(NoFilter)))
    }

    /// Create a driver with one filter instance per table entry
    pub fn with_filters<F>(
        table: Vec<ServoConfig>,
        sink: Box<dyn CommandSink>,
        config: DriverConfig,
        mut make_filter: F,
    ) -> Result<Self>
    where
        F: FnMut() -> Result<Box<dyn DeltaFilter>>,
    {
        let mut entries = Vec::with_capacity(table.len());
        for cfg in table {
            entries.push(ServoEntry {
                servo: ResolvedServo::resolve(cfg)?,
                filter: make_filter()?,
                last_angle: None,
            });
        }

        Ok(Self {
            entries,
            sink,
            config,
            last_eval: None,
            jaw_open: None,
        })
    }

    /// Put the rig into its neutral pose and forget cached state
    pub fn reset(&mut self) -> Result<()> {
        self.sink.send(RESET_COMMAND)?;
        for entry in &mut self.entries {
            entry.last_angle = None;
            entry.filter.reset();
        }
        self.jaw_open = None;
        self.last_eval = None;
        Ok(())
    }

    /// Evaluate one landmark frame. Returns the number of commands sent.
    ///
    /// Incomplete frames and frames inside the send interval are dropped.
    /// Send failures are logged and the pass continues; the failed servo's
    /// cache is left untouched so the command is retried on the next change.
    pub fn process_frame(&mut self, frame: &LandmarkFrame) -> usize {
        if !frame.is_complete() {
            debug!("Dropping incomplete frame ({} landmarks)", frame.len());
            return 0;
        }

        let now = Instant::now();
        if let Some(last) = self.last_eval {
            if now.duration_since(last) < self.config.send_interval {
                trace!("Frame inside send interval, skipped");
                return 0;
            }
        }
        self.last_eval = Some(now);

        let roll = self.measure_roll(frame);
        let mut sent = 0;

        for entry in &mut self.entries {
            let Some(delta) = entry.servo.measure(frame, roll) else {
                trace!("Servo pin {} skipped: landmark missing", entry.servo.config().pin);
                continue;
            };

            let angle = entry.servo.angle_for(entry.filter.apply(delta));
            if entry.last_angle == Some(angle) {
                continue;
            }

            let command = entry.servo.command(angle);
            match self.sink.send(&command.to_string()) {
                Ok(()) => {
                    entry.last_angle = Some(angle);
                    sent += 1;
                }
                Err(e) => warn!("Failed to send {command}: {e}"),
            }
        }

        sent + self.update_jaw(frame)
    }

    /// Face roll from the eye-outer pair, when enabled and both points exist
    fn measure_roll(&self, frame: &LandmarkFrame) -> Option<f64> {
        if !self.config.roll_correction {
            return None;
        }
        let left = frame.get(topology::LEFT_EYE_OUTER)?;
        let right = frame.get(topology::RIGHT_EYE_OUTER)?;
        Some(roll_angle(left, right))
    }

    /// Jaw state from lip separation, emitted on transitions only
    fn update_jaw(&mut self, frame: &LandmarkFrame) -> usize {
        let (Some(upper), Some(lower)) = (frame.get(topology::UPPER_LIP), frame.get(topology::LOWER_LIP)) else {
            return 0;
        };

        let open = lower.y - upper.y >= self.config.jaw_open_threshold;
        if self.jaw_open == Some(open) {
            return 0;
        }

        let command = if open { JAW_OPEN_COMMAND } else { JAW_CLOSE_COMMAND };
        match self.sink.send(command) {
            Ok(()) => {
                self.jaw_open = Some(open);
                1
            }
            Err(e) => {
                warn!("Failed to send {command}: {e}");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::Landmark;
    use crate::table::default_table;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingSink {
        sent: Arc<Mutex<Vec<String>>>,
    }

    impl CommandSink for RecordingSink {
        fn send(&mut self, command: &str) -> Result<()> {
            self.sent.lock().unwrap().push(command.to_string());
            Ok(())
        }
    }

    fn unthrottled() -> DriverConfig {
        DriverConfig {
            send_interval: Duration::ZERO,
            ..DriverConfig::default()
        }
    }

    fn neutral_frame() -> LandmarkFrame {
        LandmarkFrame::new(vec![Landmark::new(0.5, 0.5, 0.0); 478])
    }

    #[test]
    fn test_reset_emits_command() {
        let sink = RecordingSink::default();
        let mut driver = FaceRigDriver::new(default_table(), Box::new(sink.clone()), unthrottled()).unwrap();

        driver.reset().unwrap();
        assert_eq!(*sink.sent.lock().unwrap(), vec!["reset".to_string()]);
    }

    #[test]
    fn test_identical_frames_send_once() {
        let sink = RecordingSink::default();
        let mut driver = FaceRigDriver::new(default_table(), Box::new(sink.clone()), unthrottled()).unwrap();

        let frame = neutral_frame();
        let first = driver.process_frame(&frame);
        assert!(first > 0);

        // Same geometry again: every angle is cached, nothing is sent
        assert_eq!(driver.process_frame(&frame), 0);
    }

    #[test]
    fn test_incomplete_frame_dropped() {
        let sink = RecordingSink::default();
        let mut driver = FaceRigDriver::new(default_table(), Box::new(sink.clone()), unthrottled()).unwrap();

        let frame = LandmarkFrame::new(vec![Landmark::new(0.5, 0.5, 0.0); 200]);
        assert_eq!(driver.process_frame(&frame), 0);
        assert!(sink.sent.lock().unwrap().is_empty());
    }
}
