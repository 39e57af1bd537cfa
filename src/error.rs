use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Hint attached to permission failures when the process is not root.
pub const ROOT_HINT: &str = "Try running as root instead.";

#[derive(Error, Debug)]
pub enum InputError {
    #[error("device not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("you do not have access to {}{}", .path.display(), .hint.map(|h| format!(". {}", h)).unwrap_or_default())]
    PermissionDenied {
        path: PathBuf,
        hint: Option<&'static str>,
    },

    #[error("open failed: {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("close failed: {0}")]
    Close(#[source] io::Error),

    #[error("can't get {query}: {source}")]
    QueryFailed {
        query: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("grab denied: {0}")]
    GrabDenied(#[source] io::Error),

    #[error("expected {expected} bytes, got {got}")]
    ShortRead { expected: usize, got: usize },

    #[error("read error: {0}")]
    Read(#[source] io::Error),
}

impl InputError {
    /// True for failures of the open/close lifecycle.
    pub fn is_resource_error(&self) -> bool {
        matches!(
            self,
            InputError::NotFound { .. }
                | InputError::PermissionDenied { .. }
                | InputError::Open { .. }
                | InputError::Close(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, InputError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_message_carries_hint() {
        let err = InputError::PermissionDenied {
            path: PathBuf::from("/dev/input/event3"),
            hint: Some(ROOT_HINT),
        };
        assert_eq!(
            err.to_string(),
            "you do not have access to /dev/input/event3. Try running as root instead."
        );

        let err = InputError::PermissionDenied {
            path: PathBuf::from("/dev/input/event3"),
            hint: None,
        };
        assert_eq!(err.to_string(), "you do not have access to /dev/input/event3");
    }

    #[test]
    fn short_read_message() {
        let err = InputError::ShortRead {
            expected: 24,
            got: 3,
        };
        assert_eq!(err.to_string(), "expected 24 bytes, got 3");
        assert!(!err.is_resource_error());
    }
}
