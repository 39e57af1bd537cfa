#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::io;
use std::rc::Rc;
use touchpadlib::{AbsCalibration, CodeSet, EventSource, InputId, RawEventRecord, RepeatSettings};

pub const EV_SYN: u16 = 0x00;
pub const EV_KEY: u16 = 0x01;
pub const EV_ABS: u16 = 0x03;
pub const EV_REP: u16 = 0x14;
pub const EV_PWR: u16 = 0x16;
pub const EV_FF_STATUS: u16 = 0x17;

pub const ABS_X: u16 = 0x00;
pub const ABS_Y: u16 = 0x01;
pub const ABS_PRESSURE: u16 = 0x18;
pub const SYN_REPORT: u16 = 0x00;

/// Scripted stand-in for an evdev node.
#[derive(Debug, Default)]
pub struct MockDevice {
    pub version: i32,
    pub id: InputId,
    pub name: String,
    pub types: Vec<u16>,
    pub codes: BTreeMap<u16, Vec<u16>>,
    pub abs: BTreeMap<u16, AbsCalibration>,
    pub repeat: RepeatSettings,
    /// Query name that should fail, if any.
    pub fail_query: Option<&'static str>,
    pub deny_grab: bool,
    pub reads: VecDeque<io::Result<Vec<u8>>>,
    pub grab_calls: Rc<RefCell<Vec<bool>>>,
    pub queried_types: Rc<RefCell<Vec<u16>>>,
    pub dropped: Rc<Cell<bool>>,
}

impl MockDevice {
    /// A touchpad declaring only SYN and absolute X, Y, pressure.
    pub fn touchpad() -> Self {
        let mut abs = BTreeMap::new();
        for (code, max) in [(ABS_X, 1345), (ABS_Y, 865), (ABS_PRESSURE, 255)] {
            abs.insert(
                code,
                AbsCalibration {
                    value: 0,
                    min: 0,
                    max,
                    fuzz: 0,
                    flat: 0,
                    resolution: if code == ABS_PRESSURE { 0 } else { 12 },
                },
            );
        }
        // Drop impl rules out struct update syntax.
        let mut device = Self::default();
        device.version = 0x0001_0001;
        device.id = InputId {
            bustype: 0x18,
            vendor: 0x6cb,
            product: 0xcdaa,
            version: 0x100,
        };
        device.name = "Mock TouchPad".into();
        device.types = vec![EV_SYN, EV_ABS];
        device.codes = BTreeMap::from([(EV_ABS, vec![ABS_X, ABS_Y, ABS_PRESSURE])]);
        device.abs = abs;
        device
    }

    pub fn push_batch(&mut self, batch: &[RawEventRecord]) {
        let bytes = batch.iter().flat_map(|r| r.to_bytes()).collect();
        self.reads.push_back(Ok(bytes));
    }

    pub fn push_bytes(&mut self, bytes: Vec<u8>) {
        self.reads.push_back(Ok(bytes));
    }

    fn check(&self, query: &'static str) -> io::Result<()> {
        if self.fail_query == Some(query) {
            Err(io::Error::other(format!("mock {} failure", query)))
        } else {
            Ok(())
        }
    }
}

impl Drop for MockDevice {
    fn drop(&mut self) {
        self.dropped.set(true);
    }
}

impl EventSource for MockDevice {
    fn driver_version(&self) -> io::Result<i32> {
        self.check("version")?;
        Ok(self.version)
    }

    fn input_id(&self) -> io::Result<InputId> {
        self.check("id")?;
        Ok(self.id)
    }

    fn name(&self) -> io::Result<String> {
        self.check("name")?;
        Ok(self.name.clone())
    }

    fn supported_types(&self) -> io::Result<CodeSet> {
        self.check("types")?;
        Ok(self.types.iter().copied().collect())
    }

    fn supported_codes(&self, event_type: u16, max_code: u16) -> io::Result<CodeSet> {
        self.check("codes")?;
        self.queried_types.borrow_mut().push(event_type);
        Ok(self
            .codes
            .get(&event_type)
            .map(|codes| codes.iter().copied().filter(|&c| c <= max_code).collect())
            .unwrap_or_default())
    }

    fn abs_calibration(&self, code: u16) -> io::Result<AbsCalibration> {
        self.check("abs")?;
        Ok(self.abs.get(&code).copied().unwrap_or_default())
    }

    fn repeat_settings(&self) -> io::Result<RepeatSettings> {
        self.check("repeat")?;
        Ok(self.repeat)
    }

    fn set_grab(&mut self, grab: bool) -> io::Result<()> {
        self.grab_calls.borrow_mut().push(grab);
        if grab && self.deny_grab {
            return Err(io::Error::from_raw_os_error(16)); // EBUSY
        }
        Ok(())
    }

    fn read_raw(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.reads.pop_front() {
            Some(Ok(bytes)) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                Ok(n)
            }
            Some(Err(e)) => Err(e),
            None => Ok(0),
        }
    }
}

pub fn abs(code: u16, value: i32, seconds: i64, microseconds: i64) -> RawEventRecord {
    RawEventRecord::new(EV_ABS, code, value, seconds, microseconds)
}

pub fn syn(seconds: i64, microseconds: i64) -> RawEventRecord {
    RawEventRecord::new(EV_SYN, SYN_REPORT, 0, seconds, microseconds)
}
