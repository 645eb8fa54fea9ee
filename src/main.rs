//! Face rig driver: maps facial landmark frames to servo commands over serial.

use anyhow::{bail, Result};
use clap::Parser;
use face_rig::app::FaceRigApp;
use face_rig::config::Config;
use face_rig::serial::{CommandSink, NullSink, SerialLink};
use face_rig::source::{FrameSource, JsonlSource};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Serial port the rig is connected to (e.g. /dev/ttyUSB0)
    #[arg(short, long)]
    port: Option<String>,

    /// Serial baud rate
    #[arg(short, long)]
    baud: Option<u32>,

    /// Landmark frame file to play back (JSON Lines); stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Servo table file (built-in table when omitted)
    #[arg(short, long)]
    table: Option<PathBuf>,

    /// Delta filter type (none, moving_average, median, exponential)
    #[arg(short, long)]
    filter: Option<String>,

    /// Minimum time between evaluated frames in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Measure x/y deltas in the face-local (roll-corrected) frame
    #[arg(long)]
    roll_correction: bool,

    /// Log commands instead of opening a serial port
    #[arg(long)]
    dry_run: bool,

    /// List available serial ports and exit
    #[arg(long)]
    list_ports: bool,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Face Rig Driver");

    if args.list_ports {
        for port in SerialLink::available_ports()? {
            println!("{}", port.port_name);
        }
        return Ok(());
    }

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {config_path}");
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {e}. Using defaults.");
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Command line options override the configuration file
    if let Some(port) = args.port {
        config.serial.port = Some(port);
    }
    if let Some(baud) = args.baud {
        config.serial.baud_rate = baud;
    }
    if let Some(table) = args.table {
        config.table.path = Some(table);
    }
    if let Some(filter) = args.filter {
        config.filter.default_filter = filter;
    }
    if let Some(interval) = args.interval_ms {
        config.control.send_interval_ms = interval;
    }
    if args.roll_correction {
        config.control.roll_correction = true;
    }

    let sink: Box<dyn CommandSink> = if args.dry_run {
        info!("Dry run: commands will be logged, not transmitted");
        Box::new(NullSink)
    } else {
        let Some(port) = config.serial.port.clone() else {
            bail!("no serial port given; use --port, a config file, or --dry-run");
        };
        Box::new(SerialLink::open(&port, config.serial.baud_rate)?)
    };

    let source: Box<dyn FrameSource> = match &args.input {
        Some(path) => {
            info!("Playing back frames from {}", path.display());
            Box::new(JsonlSource::from_path(path)?)
        }
        None => {
            info!("Reading frames from stdin");
            Box::new(JsonlSource::stdin())
        }
    };

    // Create and run application
    let mut app = FaceRigApp::new(&config, source, sink)?;
    let stats = app.run()?;

    info!("Done: {} frames, {} commands", stats.frames, stats.commands);
    Ok(())
}
