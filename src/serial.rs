//! Serial command transport for the rig controller boards.
//!
//! Commands are short newline-terminated text lines; the master board applies
//! `servo_debug` commands itself and forwards `slave_debug` commands to the
//! second board. The pipeline only sees the [`CommandSink`] trait, so tests
//! and dry runs substitute their own sinks.

use crate::constants::SERIAL_TIMEOUT_MS;
use crate::Result;
use log::{debug, info};
use serialport::{SerialPort, SerialPortInfo};
use std::io::Write;
use std::time::Duration;

/// Destination for rig commands
pub trait CommandSink: Send {
    /// Transmit one command
    fn send(&mut self, command: &str) -> Result<()>;
}

/// A serial port connection to the rig
pub struct SerialLink {
    port: Box<dyn SerialPort>,
}

impl SerialLink {
    /// Open the named port at the given baud rate
    pub fn open(port_name: &str, baud_rate: u32) -> Result<Self> {
        info!("Opening serial port {port_name} at {baud_rate} baud");

        let port = serialport::new(port_name, baud_rate)
            .timeout(Duration::from_millis(SERIAL_TIMEOUT_MS))
            .open()?;

        Ok(Self { port })
    }

    /// Enumerate serial ports present on the system
    pub fn available_ports() -> Result<Vec<SerialPortInfo>> {
        Ok(serialport::available_ports()?)
    }
}

impl CommandSink for SerialLink {
    fn send(&mut self, command: &str) -> Result<()> {
        debug!("TX {command}");
        self.port.write_all(command.as_bytes())?;
        self.port.write_all(b"\n")?;
        self.port.flush()?;
        Ok(())
    }
}

/// Dry-run sink that logs commands instead of transmitting them
pub struct NullSink;

impl CommandSink for NullSink {
    fn send(&mut self, command: &str) -> Result<()> {
        debug!("TX (dry run) {command}");
        Ok(())
    }
}
