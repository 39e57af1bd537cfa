use crate::error::{InputError, Result};
use crate::input::EventSource;
use tracing::{debug, warn};

/// Grabs and immediately ungrabs `source` to check that exclusive access
/// is available. Nothing is held once this returns.
pub fn test_exclusive_access<S: EventSource + ?Sized>(source: &mut S) -> Result<()> {
    source.set_grab(true).map_err(|e| {
        debug!(error = %e, "exclusive grab refused");
        InputError::GrabDenied(e)
    })?;

    // The probe result stands even if the release fails.
    if let Err(e) = source.set_grab(false) {
        warn!(error = %e, "failed to release probe grab");
    }
    debug!("exclusive grab available");
    Ok(())
}
