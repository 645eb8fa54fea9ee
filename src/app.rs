//! Main application module: wires a frame source to the rig driver.

use crate::config::Config;
use crate::driver::FaceRigDriver;
use crate::serial::CommandSink;
use crate::source::FrameSource;
use crate::Result;
use log::{debug, info};
use std::time::{Duration, Instant};

/// Summary of one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Frames read from the source
    pub frames: u64,
    /// Commands delivered to the sink
    pub commands: u64,
}

/// Main application struct
pub struct FaceRigApp {
    driver: FaceRigDriver,
    source: Box<dyn FrameSource>,
}

impl FaceRigApp {
    /// Build the app from configuration plus a frame source and command sink
    pub fn new(config: &Config, source: Box<dyn FrameSource>, sink: Box<dyn CommandSink>) -> Result<Self> {
        config.validate()?;

        let table = config.load_table()?;
        info!("Loaded servo table with {} entries", table.len());

        let driver = FaceRigDriver::with_filters(table, sink, config.driver_config(), || config.create_filter())?;

        Ok(Self { driver, source })
    }

    /// Run until the frame source is exhausted
    pub fn run(&mut self) -> Result<RunStats> {
        info!("Resetting rig to neutral pose");
        self.driver.reset()?;

        let mut stats = RunStats::default();
        let started = Instant::now();
        let mut last_report = Instant::now();

        while let Some(frame) = self.source.next_frame()? {
            stats.frames += 1;
            stats.commands += self.driver.process_frame(&frame) as u64;

            if last_report.elapsed() >= Duration::from_secs(1) {
                let fps = stats.frames as f64 / started.elapsed().as_secs_f64();
                debug!(
                    "{} frames, {} commands ({fps:.1} fps)",
                    stats.frames, stats.commands
                );
                last_report = Instant::now();
            }
        }

        info!(
            "End of input: {} frames processed, {} commands sent",
            stats.frames, stats.commands
        );
        Ok(stats)
    }
}
