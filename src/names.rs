//! Human-readable names for event types and codes, for diagnostics only.
//!
//! Code names come from the `evdev` crate's constant tables and are collected
//! once into an immutable map on first use. Nothing here feeds back into
//! decoding.

use crate::capabilities::{CapabilityReport, EventKind};
use crate::input::AbsCalibration;
use crate::touchpad::RawEventRecord;
use evdev::{
    AbsoluteAxisType, Key, LedType, MiscType, RelativeAxisType, SoundType, SwitchType,
    Synchronization,
};
use std::collections::HashMap;
use std::fmt::Write;
use std::sync::OnceLock;

const UNKNOWN: &str = "?";

const REPEAT_NAMES: &[(u16, &str)] = &[(0x00, "REP_DELAY"), (0x01, "REP_PERIOD")];

const FF_NAMES: &[(u16, &str)] = &[
    (0x50, "FF_RUMBLE"),
    (0x51, "FF_PERIODIC"),
    (0x52, "FF_CONSTANT"),
    (0x53, "FF_SPRING"),
    (0x54, "FF_FRICTION"),
    (0x55, "FF_DAMPER"),
    (0x56, "FF_INERTIA"),
    (0x57, "FF_RAMP"),
    (0x58, "FF_SQUARE"),
    (0x59, "FF_TRIANGLE"),
    (0x5a, "FF_SINE"),
    (0x5b, "FF_SAW_UP"),
    (0x5c, "FF_SAW_DOWN"),
    (0x5d, "FF_CUSTOM"),
    (0x60, "FF_GAIN"),
    (0x61, "FF_AUTOCENTER"),
];

const FF_STATUS_NAMES: &[(u16, &str)] = &[(0x00, "FF_STATUS_STOPPED"), (0x01, "FF_STATUS_PLAYING")];

const CALIBRATION_LABELS: [&str; 6] = ["Value", "Min  ", "Max  ", "Fuzz ", "Flat ", "Resolution "];

pub fn event_type_name(event_type: u16) -> &'static str {
    match EventKind::from_type_code(event_type) {
        Some(EventKind::Synchronization) => "EV_SYN",
        Some(EventKind::Key) => "EV_KEY",
        Some(EventKind::Relative) => "EV_REL",
        Some(EventKind::Absolute) => "EV_ABS",
        Some(EventKind::Misc) => "EV_MSC",
        Some(EventKind::Switch) => "EV_SW",
        Some(EventKind::Led) => "EV_LED",
        Some(EventKind::Sound) => "EV_SND",
        Some(EventKind::Repeat) => "EV_REP",
        Some(EventKind::ForceFeedback) => "EV_FF",
        Some(EventKind::Power) => "EV_PWR",
        Some(EventKind::ForceFeedbackStatus) => "EV_FF_STATUS",
        None => UNKNOWN,
    }
}

/// Name of `code` under `event_type`, or `"?"`.
pub fn code_name(event_type: u16, code: u16) -> &'static str {
    code_table()
        .get(&(event_type, code))
        .map(String::as_str)
        .unwrap_or(UNKNOWN)
}

fn code_table() -> &'static HashMap<(u16, u16), String> {
    static TABLE: OnceLock<HashMap<(u16, u16), String>> = OnceLock::new();
    TABLE.get_or_init(build_code_table)
}

fn build_code_table() -> HashMap<(u16, u16), String> {
    let mut table = HashMap::new();
    for kind in EventKind::ALL {
        let Some(max) = kind.max_code() else {
            continue;
        };
        let ty = kind.type_code();
        for code in 0..=max {
            let name = match kind {
                EventKind::Synchronization => format!("{:?}", Synchronization(code)),
                EventKind::Key => format!("{:?}", Key(code)),
                EventKind::Relative => format!("{:?}", RelativeAxisType(code)),
                EventKind::Absolute => format!("{:?}", AbsoluteAxisType(code)),
                EventKind::Misc => format!("{:?}", MiscType(code)),
                EventKind::Switch => format!("{:?}", SwitchType(code)),
                EventKind::Led => format!("{:?}", LedType(code)),
                EventKind::Sound => format!("{:?}", SoundType(code)),
                EventKind::Repeat => literal(REPEAT_NAMES, code),
                EventKind::ForceFeedback => literal(FF_NAMES, code),
                EventKind::ForceFeedbackStatus => literal(FF_STATUS_NAMES, code),
                EventKind::Power => continue,
            };
            if is_constant_name(&name) {
                table.insert((ty, code), name);
            }
        }
    }
    table
}

fn literal(names: &[(u16, &str)], code: u16) -> String {
    names
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, n)| n.to_string())
        .unwrap_or_default()
}

// evdev formats unnamed codes as "unknown key: N".
fn is_constant_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// One raw record in the `EV_ABS(ABS_X, 120)` form.
pub fn describe_record(record: &RawEventRecord) -> String {
    let type_name = event_type_name(record.event_type);
    match code_name(record.event_type, record.code) {
        UNKNOWN => format!("{}(0x{:X}, {})", type_name, record.code, record.value),
        name => format!("{}({}, {})", type_name, name, record.value),
    }
}

/// Value, min and max always; fuzz, flat and resolution when non-zero.
pub fn format_calibration(cal: &AbsCalibration) -> String {
    let fields = [cal.value, cal.min, cal.max, cal.fuzz, cal.flat, cal.resolution];
    let mut out = String::new();
    for (k, (label, value)) in CALIBRATION_LABELS.iter().zip(fields).enumerate() {
        if k < 3 || value != 0 {
            let _ = writeln!(out, "      {} {:6}", label, value);
        }
    }
    out
}

/// Renders a report in the layout evtest prints on startup.
pub fn format_report(report: &CapabilityReport) -> String {
    let mut out = String::new();
    let id = report.id();
    let _ = writeln!(out, "Input driver version is {}", report.driver_version());
    let _ = writeln!(
        out,
        "Input device ID: bus 0x{:x} vendor 0x{:x} product 0x{:x} version 0x{:x}",
        id.bustype, id.vendor, id.product, id.version
    );
    let _ = writeln!(out, "Input device name: \"{}\"", report.name());
    let _ = writeln!(out, "Supported events:");

    for kind in report.types() {
        let Some(codes) = report.codes(kind) else {
            continue;
        };
        let ty = kind.type_code();
        let _ = writeln!(out, "  Event type {} ({})", ty, event_type_name(ty));
        for code in codes.iter() {
            let _ = writeln!(out, "    Event code {} ({})", code, code_name(ty, code));
            if let Some(cal) = report.abs_calibration(code).filter(|_| kind == EventKind::Absolute) {
                out.push_str(&format_calibration(cal));
            }
        }
    }

    if let Some(repeat) = report.repeat() {
        let ty = EventKind::Repeat.type_code();
        let _ = writeln!(out, "Key repeat handling:");
        let _ = writeln!(out, "  Repeat type {} ({})", ty, event_type_name(ty));
        for (code, value) in [(0u16, repeat.delay), (1, repeat.period)] {
            let _ = writeln!(out, "    Repeat code {} ({})", code, code_name(ty, code));
            let _ = writeln!(out, "      Value {:6}", value);
        }
    }
    out
}
