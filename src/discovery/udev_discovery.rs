use super::{DeviceDiscovery, DeviceInfo, DiscoveryError};
use std::path::PathBuf;

pub struct UdevDiscovery;

impl DeviceDiscovery for UdevDiscovery {
    /// All `/dev/input/event*` nodes, ordered by event number.
    fn find_devices() -> Result<Vec<DeviceInfo>, DiscoveryError> {
        let mut enumerator = udev::Enumerator::new().map_err(DiscoveryError::UdevError)?;

        enumerator
            .match_subsystem("input")
            .map_err(DiscoveryError::UdevError)?;

        enumerator
            .match_sysname("event*")
            .map_err(DiscoveryError::UdevError)?;

        let mut results = Vec::new();

        for device in enumerator
            .scan_devices()
            .map_err(DiscoveryError::UdevError)?
        {
            let Some(devnode) = device.devnode() else {
                continue;
            };

            let name = device
                .parent()
                .and_then(|p| p.attribute_value("name").map(|n| n.to_string_lossy().into_owned()))
                .unwrap_or_else(|| "???".to_string());

            let is_touchpad = device
                .property_value("ID_INPUT_TOUCHPAD")
                .is_some_and(|v| v == "1");

            results.push(DeviceInfo {
                devnode: PathBuf::from(devnode),
                name,
                is_touchpad,
            });
        }

        results.sort_by_key(|d| event_number(&d.devnode));

        if results.is_empty() {
            Err(DiscoveryError::NotFound)
        } else {
            Ok(results)
        }
    }
}

fn event_number(devnode: &std::path::Path) -> u32 {
    devnode
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_prefix("event"))
        .and_then(|n| n.parse().ok())
        .unwrap_or(u32::MAX)
}
