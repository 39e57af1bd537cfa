use super::ioctl::{eviocgabs, eviocgbit, eviocgname, EVIOCGID, EVIOCGRAB, EVIOCGREP, EVIOCGVERSION};
use super::{AbsCalibration, EventSource, InputId, RepeatSettings};
use crate::bitset::{kernel_words_for, CodeSet};
use crate::error::{InputError, Result, ROOT_HINT};
use crate::privilege::has_root_privileges;
use std::fs::File;
use std::io::{self, Read};
use std::os::fd::{AsRawFd, IntoRawFd};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Highest event type number (`EV_MAX`).
const EV_MAX: u16 = 0x1f;
const NAME_LEN: usize = 256;

/// Exclusive owner of one open evdev character device.
///
/// The descriptor is released when the handle is dropped, so every early
/// return that discards a handle also closes it. `close` does the same
/// explicitly and reports the OS result.
#[derive(Debug)]
pub struct DeviceHandle {
    file: File,
    path: PathBuf,
}

impl DeviceHandle {
    /// Opens `path` read-only with blocking reads.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| open_error(path, e, has_root_privileges()))?;
        debug!(path = %path.display(), "opened input device");

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn close(self) -> Result<()> {
        let fd = self.file.into_raw_fd();
        let ret = unsafe { libc::close(fd) };
        if ret < 0 {
            Err(InputError::Close(io::Error::last_os_error()))
        } else {
            debug!(path = %self.path.display(), "closed input device");
            Ok(())
        }
    }

    /// Issues a read-direction ioctl whose argument is a pointer to `arg`.
    fn ioctl_read<T>(&self, request: libc::c_ulong, arg: &mut T) -> io::Result<libc::c_int> {
        let ret = unsafe {
            libc::ioctl(
                self.file.as_raw_fd(),
                request as _,
                arg as *mut T as *mut libc::c_void,
            )
        };
        if ret < 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(ret)
        }
    }

    fn query_bits(&self, event_type: u16, max_code: u16) -> io::Result<CodeSet> {
        let mut words = vec![0 as libc::c_ulong; kernel_words_for(max_code)];
        let len = std::mem::size_of_val(words.as_slice()) as u32;
        let ret = unsafe {
            libc::ioctl(
                self.file.as_raw_fd(),
                eviocgbit(event_type, len) as _,
                words.as_mut_ptr(),
            )
        };
        if ret < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(CodeSet::from_kernel_words(&words, max_code))
    }
}

/// Classifies a failed open. The root hint is only offered to non-root callers.
fn open_error(path: &Path, e: io::Error, is_root: bool) -> InputError {
    let path = path.to_path_buf();
    match e.kind() {
        io::ErrorKind::NotFound => InputError::NotFound { path },
        io::ErrorKind::PermissionDenied => InputError::PermissionDenied {
            path,
            hint: (!is_root).then_some(ROOT_HINT),
        },
        _ => InputError::Open { path, source: e },
    }
}

impl EventSource for DeviceHandle {
    fn driver_version(&self) -> io::Result<i32> {
        let mut version: libc::c_int = 0;
        self.ioctl_read(EVIOCGVERSION, &mut version)?;
        Ok(version)
    }

    fn input_id(&self) -> io::Result<InputId> {
        let mut id = [0u16; 4];
        self.ioctl_read(EVIOCGID, &mut id)?;
        Ok(InputId {
            bustype: id[0],
            vendor: id[1],
            product: id[2],
            version: id[3],
        })
    }

    fn name(&self) -> io::Result<String> {
        let mut buf = [0u8; NAME_LEN];
        self.ioctl_read(eviocgname(NAME_LEN as u32), &mut buf)?;
        let end = buf.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
        Ok(String::from_utf8_lossy(&buf[..end]).into_owned())
    }

    fn supported_types(&self) -> io::Result<CodeSet> {
        self.query_bits(0, EV_MAX)
    }

    fn supported_codes(&self, event_type: u16, max_code: u16) -> io::Result<CodeSet> {
        self.query_bits(event_type, max_code)
    }

    fn abs_calibration(&self, code: u16) -> io::Result<AbsCalibration> {
        let mut abs = [0i32; 6];
        self.ioctl_read(eviocgabs(code), &mut abs)?;
        Ok(AbsCalibration {
            value: abs[0],
            min: abs[1],
            max: abs[2],
            fuzz: abs[3],
            flat: abs[4],
            resolution: abs[5],
        })
    }

    fn repeat_settings(&self) -> io::Result<RepeatSettings> {
        let mut rep = [0u32; 2];
        self.ioctl_read(EVIOCGREP, &mut rep)?;
        Ok(RepeatSettings {
            delay: rep[0],
            period: rep[1],
        })
    }

    fn set_grab(&mut self, grab: bool) -> io::Result<()> {
        // EVIOCGRAB takes its flag by value, not by pointer.
        let ret = unsafe {
            libc::ioctl(
                self.file.as_raw_fd(),
                EVIOCGRAB as _,
                grab as libc::c_ulong,
            )
        };
        if ret < 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(())
        }
    }

    fn read_raw(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}
