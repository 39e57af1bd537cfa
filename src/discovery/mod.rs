pub mod udev_discovery;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub devnode: PathBuf,
    pub name: String,
    pub is_touchpad: bool,
}

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("udev error: {0}")]
    UdevError(#[source] io::Error),

    #[error("no input event devices found")]
    NotFound,

    #[error("invalid selection {input:?}, expected a number in [0-{max}]")]
    InvalidSelection { input: String, max: usize },

    #[error("prompt I/O failed: {0}")]
    Prompt(#[source] io::Error),
}

pub trait DeviceDiscovery {
    fn find_devices() -> Result<Vec<DeviceInfo>, DiscoveryError>;
}

/// Prints `devices` to `output` and reads the chosen index from `input`.
pub fn select_device<R: BufRead, W: Write>(
    devices: &[DeviceInfo],
    mut input: R,
    mut output: W,
) -> Result<PathBuf, DiscoveryError> {
    if devices.is_empty() {
        return Err(DiscoveryError::NotFound);
    }
    let max = devices.len() - 1;

    writeln!(output, "Available devices:").map_err(DiscoveryError::Prompt)?;
    for (i, device) in devices.iter().enumerate() {
        let marker = if device.is_touchpad { " [touchpad]" } else { "" };
        writeln!(
            output,
            "{:>2}: {}:    {}{}",
            i,
            device.devnode.display(),
            device.name,
            marker
        )
        .map_err(DiscoveryError::Prompt)?;
    }
    write!(output, "Select the device event number [0-{}]: ", max).map_err(DiscoveryError::Prompt)?;
    output.flush().map_err(DiscoveryError::Prompt)?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(DiscoveryError::Prompt)?;
    let choice = line.trim();
    match choice.parse::<usize>() {
        Ok(n) if n <= max => Ok(devices[n].devnode.clone()),
        _ => Err(DiscoveryError::InvalidSelection {
            input: choice.to_string(),
            max,
        }),
    }
}
