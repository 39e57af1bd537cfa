mod common;

use common::*;
use touchpadlib::names::format_report;
use touchpadlib::{query_capabilities, EventKind, InputError, RepeatSettings};

#[test]
fn touchpad_reports_exactly_its_axes() {
    let mut device = MockDevice::touchpad();
    device.types.push(EV_KEY);

    let report = query_capabilities(&device).unwrap();

    let abs: Vec<u16> = report.codes(EventKind::Absolute).unwrap().iter().collect();
    assert_eq!(abs, vec![ABS_X, ABS_Y, ABS_PRESSURE]);
    assert!(report.codes(EventKind::Synchronization).unwrap().is_empty());
    assert!(report.codes(EventKind::Key).unwrap().is_empty());
    assert!(report.codes(EventKind::Relative).is_none());
    assert!(!report.supports_type(EventKind::Relative));
    assert!(report.is_touchpad_capable());

    let kinds: Vec<EventKind> = report.types().collect();
    assert_eq!(
        kinds,
        vec![EventKind::Synchronization, EventKind::Key, EventKind::Absolute]
    );
}

#[test]
fn identity_is_recorded() {
    let report = query_capabilities(&MockDevice::touchpad()).unwrap();
    assert_eq!(report.name(), "Mock TouchPad");
    assert_eq!(report.driver_version().to_string(), "1.0.1");
    assert_eq!(report.id().vendor, 0x6cb);
}

#[test]
fn calibration_fetched_for_each_abs_code() {
    let report = query_capabilities(&MockDevice::touchpad()).unwrap();

    let axes: Vec<(u16, i32)> = report.abs_axes().map(|(c, cal)| (c, cal.max)).collect();
    assert_eq!(axes, vec![(ABS_X, 1345), (ABS_Y, 865), (ABS_PRESSURE, 255)]);
    assert_eq!(report.abs_calibration(ABS_X).unwrap().resolution, 12);
    assert!(report.abs_calibration(0x35).is_none());
}

#[test]
fn sync_power_and_ff_status_bitmasks_are_not_queried() {
    let mut device = MockDevice::touchpad();
    device.types.extend([EV_PWR, EV_FF_STATUS]);
    let queried = device.queried_types.clone();

    let report = query_capabilities(&device).unwrap();
    assert_eq!(*queried.borrow(), vec![EV_ABS]);
    assert!(report.codes(EventKind::Power).unwrap().is_empty());
    assert!(report.codes(EventKind::ForceFeedbackStatus).unwrap().is_empty());
    assert!(report.supports_type(EventKind::ForceFeedbackStatus));
}

#[test]
fn repeat_carries_timing_instead_of_codes() {
    let mut device = MockDevice::touchpad();
    device.types.push(EV_REP);
    device.repeat = RepeatSettings {
        delay: 250,
        period: 33,
    };
    let queried = device.queried_types.clone();

    let report = query_capabilities(&device).unwrap();
    assert!(report.supports_type(EventKind::Repeat));
    assert!(report.codes(EventKind::Repeat).is_none());
    assert_eq!(report.repeat(), Some(device.repeat));
    assert!(!queried.borrow().contains(&EV_REP));
}

#[test]
fn any_failed_query_fails_the_build() {
    for (query, expected) in [
        ("version", "version"),
        ("id", "device id"),
        ("name", "device name"),
        ("types", "event types"),
        ("codes", "event codes"),
        ("abs", "abs calibration"),
        ("repeat", "repeat settings"),
    ] {
        let mut device = MockDevice::touchpad();
        device.types.push(EV_REP);
        device.fail_query = Some(query);
        match query_capabilities(&device) {
            Err(InputError::QueryFailed { query, .. }) => assert_eq!(query, expected),
            other => panic!("{}: expected QueryFailed, got {:?}", query, other),
        }
    }
}

#[test]
fn report_renders_like_evtest() {
    let mut device = MockDevice::touchpad();
    device.types.push(EV_REP);
    device.repeat = RepeatSettings {
        delay: 250,
        period: 33,
    };
    let text = format_report(&query_capabilities(&device).unwrap());

    assert!(text.starts_with("Input driver version is 1.0.1\n"));
    assert!(text.contains("Input device ID: bus 0x18 vendor 0x6cb product 0xcdaa version 0x100\n"));
    assert!(text.contains("Input device name: \"Mock TouchPad\"\n"));
    assert!(text.contains("  Event type 0 (EV_SYN)\n  Event type 3 (EV_ABS)\n    Event code 0 (ABS_X)\n"));
    assert!(text.contains("    Event code 24 (ABS_PRESSURE)\n      Value      0\n      Min        0\n      Max      255\n"));
    assert!(text.contains("  Repeat type 20 (EV_REP)\n    Repeat code 0 (REP_DELAY)\n      Value    250\n"));
}
