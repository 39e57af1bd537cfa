pub mod evdev_backend;
pub(crate) mod ioctl;

use crate::bitset::CodeSet;
use std::io;

/// Bus/vendor/product/version identity of an input device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputId {
    pub bustype: u16,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
}

/// Calibration tuple of one absolute axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbsCalibration {
    pub value: i32,
    pub min: i32,
    pub max: i32,
    pub fuzz: i32,
    pub flat: i32,
    pub resolution: i32,
}

/// Key repeat timing, as reported by `EVIOCGREP`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepeatSettings {
    pub delay: u32,
    pub period: u32,
}

/// Queries and reads issued against an open input device.
///
/// `DeviceHandle` is the real implementation; anything else implementing
/// this (a recorded stream, a test double) can be decoded the same way.
pub trait EventSource {
    /// Packed driver version (`major << 16 | minor << 8 | patch`).
    fn driver_version(&self) -> io::Result<i32>;
    fn input_id(&self) -> io::Result<InputId>;
    fn name(&self) -> io::Result<String>;
    /// Event types the device declares, as a set of type numbers.
    fn supported_types(&self) -> io::Result<CodeSet>;
    /// Codes declared for `event_type`, bounded by `max_code`.
    fn supported_codes(&self, event_type: u16, max_code: u16) -> io::Result<CodeSet>;
    fn abs_calibration(&self, code: u16) -> io::Result<AbsCalibration>;
    fn repeat_settings(&self) -> io::Result<RepeatSettings>;
    /// Acquire (`true`) or release (`false`) exclusive event delivery.
    fn set_grab(&mut self, grab: bool) -> io::Result<()>;
    /// One blocking read of raw event records into `buf`; returns the byte count.
    fn read_raw(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}
