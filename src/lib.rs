//! Decode a Linux evdev touchpad stream into single-point position/pressure
//! samples, and introspect what the device declares it can report.
//!
//! ```no_run
//! let mut touchpad = touchpadlib::initialize("/dev/input/event5".as_ref())?;
//! let sample = touchpad.decode_next()?;
//! println!("{}", sample);
//! touchpad.close()?;
//! # Ok::<(), touchpadlib::InputError>(())
//! ```

pub mod bitset;
pub mod capabilities;
pub mod discovery;
pub mod error;
pub mod grab;
pub mod input;
pub mod names;
pub mod privilege;
pub mod touchpad;

pub use bitset::CodeSet;
pub use capabilities::{query_capabilities, CapabilityReport, DriverVersion, EventKind};
pub use error::{InputError, Result};
pub use grab::test_exclusive_access;
pub use input::evdev_backend::DeviceHandle;
pub use input::{AbsCalibration, EventSource, InputId, RepeatSettings};
pub use touchpad::{decode_into, decode_next, RawEventRecord, TouchpadEvent};

use std::path::Path;
use tracing::{info, warn};

/// A device that has been opened, introspected and grab-probed.
///
/// Owns its source; dropping it releases the device.
#[derive(Debug)]
pub struct Touchpad<S: EventSource = DeviceHandle> {
    source: S,
    capabilities: CapabilityReport,
}

impl<S: EventSource> Touchpad<S> {
    pub fn capabilities(&self) -> &CapabilityReport {
        &self.capabilities
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Blocks until the next batch arrives. See [`touchpad::decode_next`].
    pub fn decode_next(&mut self) -> Result<TouchpadEvent> {
        decode_next(&mut self.source)
    }

    pub fn decode_into(&mut self, event: &mut TouchpadEvent) -> Result<()> {
        decode_into(&mut self.source, event)
    }
}

impl Touchpad<DeviceHandle> {
    pub fn close(self) -> Result<()> {
        self.source.close()
    }
}

/// Opens `path`, builds its capability report and probes exclusive access.
///
/// On any failure the device is closed before the error is returned.
pub fn initialize(path: &Path) -> Result<Touchpad<DeviceHandle>> {
    warn_if_unprivileged(privilege::has_root_privileges());
    let handle = DeviceHandle::open(path)?;
    initialize_source(handle)
}

fn warn_if_unprivileged(is_root: bool) {
    if !is_root {
        warn!("Not running as root, no devices may be available.");
    }
}

/// Runs the introspection and grab probe on an already-open source.
/// `source` is dropped if either step fails.
pub fn initialize_source<S: EventSource>(mut source: S) -> Result<Touchpad<S>> {
    let capabilities = query_capabilities(&source)?;
    test_exclusive_access(&mut source)?;
    info!(
        name = capabilities.name(),
        touchpad = capabilities.is_touchpad_capable(),
        "input device ready"
    );
    Ok(Touchpad {
        source,
        capabilities,
    })
}
