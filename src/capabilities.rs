use crate::bitset::CodeSet;
use crate::error::{InputError, Result};
use crate::input::{AbsCalibration, EventSource, InputId, RepeatSettings};
use evdev::{AbsoluteAxisType, EventType};
use std::collections::BTreeMap;
use tracing::debug;

/// The fixed set of event types a device may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    Synchronization,
    Key,
    Relative,
    Absolute,
    Misc,
    Switch,
    Led,
    Sound,
    Repeat,
    ForceFeedback,
    Power,
    ForceFeedbackStatus,
}

impl EventKind {
    pub const ALL: [EventKind; 12] = [
        EventKind::Synchronization,
        EventKind::Key,
        EventKind::Relative,
        EventKind::Absolute,
        EventKind::Misc,
        EventKind::Switch,
        EventKind::Led,
        EventKind::Sound,
        EventKind::Repeat,
        EventKind::ForceFeedback,
        EventKind::Power,
        EventKind::ForceFeedbackStatus,
    ];

    /// Kernel `EV_*` number.
    pub fn type_code(self) -> u16 {
        match self {
            EventKind::Synchronization => EventType::SYNCHRONIZATION.0,
            EventKind::Key => EventType::KEY.0,
            EventKind::Relative => EventType::RELATIVE.0,
            EventKind::Absolute => EventType::ABSOLUTE.0,
            EventKind::Misc => EventType::MISC.0,
            EventKind::Switch => EventType::SWITCH.0,
            EventKind::Led => EventType::LED.0,
            EventKind::Sound => EventType::SOUND.0,
            EventKind::Repeat => EventType::REPEAT.0,
            EventKind::ForceFeedback => EventType::FORCEFEEDBACK.0,
            EventKind::Power => EventType::POWER.0,
            EventKind::ForceFeedbackStatus => EventType::FORCEFEEDBACKSTATUS.0,
        }
    }

    /// Inverse of `type_code`; `None` for numbers outside the fixed set.
    pub fn from_type_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.type_code() == code)
    }

    /// Highest code defined for this type (`*_MAX` in the kernel headers).
    /// `None` for power, which defines no codes.
    pub fn max_code(self) -> Option<u16> {
        match self {
            EventKind::Synchronization => Some(0x0f),
            EventKind::Key => Some(0x2ff),
            EventKind::Relative => Some(0x0f),
            EventKind::Absolute => Some(0x3f),
            EventKind::Misc => Some(0x07),
            EventKind::Switch => Some(0x10),
            EventKind::Led => Some(0x0f),
            EventKind::Sound => Some(0x07),
            EventKind::Repeat => Some(0x01),
            EventKind::ForceFeedback => Some(0x7f),
            EventKind::Power => None,
            EventKind::ForceFeedbackStatus => Some(0x01),
        }
    }
}

/// Driver version unpacked from the `EVIOCGVERSION` word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverVersion {
    pub major: u16,
    pub minor: u8,
    pub patch: u8,
}

impl From<i32> for DriverVersion {
    fn from(packed: i32) -> Self {
        Self {
            major: (packed >> 16) as u16,
            minor: ((packed >> 8) & 0xff) as u8,
            patch: (packed & 0xff) as u8,
        }
    }
}

impl std::fmt::Display for DriverVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Immutable snapshot of what a device declares it can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityReport {
    driver_version: DriverVersion,
    id: InputId,
    name: String,
    codes: BTreeMap<EventKind, CodeSet>,
    abs: BTreeMap<u16, AbsCalibration>,
    repeat: Option<RepeatSettings>,
}

impl CapabilityReport {
    pub fn driver_version(&self) -> DriverVersion {
        self.driver_version
    }

    pub fn id(&self) -> InputId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared types, in `EV_*` order. Repeat is included when declared.
    pub fn types(&self) -> impl Iterator<Item = EventKind> + '_ {
        let repeat = self.repeat.map(|_| EventKind::Repeat);
        let mut kinds: Vec<EventKind> = self.codes.keys().copied().chain(repeat).collect();
        kinds.sort_by_key(|k| k.type_code());
        kinds.into_iter()
    }

    pub fn supports_type(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::Repeat => self.repeat.is_some(),
            _ => self.codes.contains_key(&kind),
        }
    }

    /// Code set for a declared type. `None` when the type is not declared,
    /// and always `None` for repeat, which carries timing instead.
    pub fn codes(&self, kind: EventKind) -> Option<&CodeSet> {
        self.codes.get(&kind)
    }

    pub fn supports(&self, kind: EventKind, code: u16) -> bool {
        self.codes(kind).is_some_and(|set| set.contains(code))
    }

    pub fn abs_calibration(&self, code: u16) -> Option<&AbsCalibration> {
        self.abs.get(&code)
    }

    /// Absolute axes with their calibration, ascending by code.
    pub fn abs_axes(&self) -> impl Iterator<Item = (u16, &AbsCalibration)> {
        self.abs.iter().map(|(&code, cal)| (code, cal))
    }

    pub fn repeat(&self) -> Option<RepeatSettings> {
        self.repeat
    }

    /// True when the device reports legacy absolute X and Y.
    pub fn is_touchpad_capable(&self) -> bool {
        self.supports(EventKind::Absolute, AbsoluteAxisType::ABS_X.0)
            && self.supports(EventKind::Absolute, AbsoluteAxisType::ABS_Y.0)
    }
}

fn query<T>(what: &'static str, result: std::io::Result<T>) -> Result<T> {
    result.map_err(|source| InputError::QueryFailed {
        query: what,
        source,
    })
}

/// Builds a `CapabilityReport` from read-only queries against `source`.
pub fn query_capabilities<S: EventSource + ?Sized>(source: &S) -> Result<CapabilityReport> {
    let driver_version = DriverVersion::from(query("version", source.driver_version())?);
    let id = query("device id", source.input_id())?;
    let name = query("device name", source.name())?;
    debug!(%driver_version, ?id, %name, "queried device identity");

    let types = query("event types", source.supported_types())?;

    let mut codes = BTreeMap::new();
    let mut abs = BTreeMap::new();
    let mut repeat = None;

    for kind in EventKind::ALL {
        if !types.contains(kind.type_code()) {
            continue;
        }
        let set = match (kind, kind.max_code()) {
            (EventKind::Repeat, _) => {
                repeat = Some(query("repeat settings", source.repeat_settings())?);
                continue;
            }
            // EVIOCGBIT rejects these types with EINVAL.
            (EventKind::Synchronization | EventKind::ForceFeedbackStatus, _) | (_, None) => {
                CodeSet::new()
            }
            (_, Some(max)) => query("event codes", source.supported_codes(kind.type_code(), max))?,
        };
        if kind == EventKind::Absolute {
            for code in set.iter() {
                abs.insert(code, query("abs calibration", source.abs_calibration(code))?);
            }
        }
        debug!(?kind, count = set.len(), "queried event codes");
        codes.insert(kind, set);
    }

    Ok(CapabilityReport {
        driver_version,
        id,
        name,
        codes,
        abs,
        repeat,
    })
}
