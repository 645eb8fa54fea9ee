//! Build script for detecting system dependencies and providing installation guidance.
//!
//! The serial transport links against libudev on Linux (via the serialport
//! crate); this script checks for it and prints helpful hints if it is missing.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    check_pkg_config();
    check_libudev();

    println!(
        "cargo:rustc-env=BUILD_TARGET={}",
        env::var("TARGET").unwrap_or_default()
    );
}

fn check_libudev() {
    // Only needed on Linux
    if !env::var("TARGET").unwrap_or_default().contains("linux") {
        return;
    }

    let output = Command::new("pkg-config").args(["--modversion", "libudev"]).output();

    match output {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            println!("cargo:warning=Found libudev version: {}", version.trim());
        }
        _ => {
            println!("cargo:warning=libudev not found via pkg-config. Serial port enumeration may fail.");
            println!("cargo:warning=On Ubuntu: sudo apt-get install libudev-dev");
            println!("cargo:warning=On Fedora: sudo dnf install systemd-devel");
        }
    }
}

fn check_pkg_config() {
    let output = Command::new("pkg-config").arg("--version").output();

    match output {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            println!("cargo:warning=Found pkg-config version: {}", version.trim());
        }
        _ => {
            println!("cargo:warning=pkg-config not found. This is required to find system libraries.");
            println!("cargo:warning=On Ubuntu: sudo apt-get install pkg-config");
        }
    }
}
