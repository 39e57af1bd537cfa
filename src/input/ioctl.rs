// EVDEV ioctl numbers computed from the Linux _IOC macro:
//   _IOC(dir, type, nr, size) = (dir << 30) | (size << 16) | (type << 8) | nr
//   type = 'E' = 0x45
//
//   EVIOCGVERSION   = _IOR('E', 0x01, int)
//   EVIOCGID        = _IOR('E', 0x02, struct input_id)
//   EVIOCGREP       = _IOR('E', 0x03, unsigned int[2])
//   EVIOCGNAME(len) = _IOC(_IOC_READ, 'E', 0x06, len)
//   EVIOCGBIT(t, len) = _IOC(_IOC_READ, 'E', 0x20 + t, len)
//   EVIOCGABS(abs)  = _IOR('E', 0x40 + abs, struct input_absinfo)
//   EVIOCGRAB       = _IOW('E', 0x90, int)

const IOC_WRITE: u32 = 1;
const IOC_READ: u32 = 2;
const EVDEV: u32 = b'E' as u32;

const fn ioc(dir: u32, ty: u32, nr: u32, size: u32) -> libc::c_ulong {
    ((dir << 30) | (size << 16) | (ty << 8) | nr) as libc::c_ulong
}

pub const EVIOCGVERSION: libc::c_ulong = ioc(IOC_READ, EVDEV, 0x01, 4);
pub const EVIOCGID: libc::c_ulong = ioc(IOC_READ, EVDEV, 0x02, 8);
pub const EVIOCGREP: libc::c_ulong = ioc(IOC_READ, EVDEV, 0x03, 8);
pub const EVIOCGRAB: libc::c_ulong = ioc(IOC_WRITE, EVDEV, 0x90, 4);

pub fn eviocgname(len: u32) -> libc::c_ulong {
    ioc(IOC_READ, EVDEV, 0x06, len)
}

pub fn eviocgbit(event_type: u16, len: u32) -> libc::c_ulong {
    ioc(IOC_READ, EVDEV, 0x20 + event_type as u32, len)
}

pub fn eviocgabs(code: u16) -> libc::c_ulong {
    ioc(IOC_READ, EVDEV, 0x40 + code as u32, 24)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Values as produced by <linux/input.h>.
    #[test]
    fn request_numbers_match_kernel_headers() {
        assert_eq!(EVIOCGVERSION, 0x8004_4501);
        assert_eq!(EVIOCGID, 0x8008_4502);
        assert_eq!(EVIOCGREP, 0x8008_4503);
        assert_eq!(EVIOCGRAB, 0x4004_4590);
        assert_eq!(eviocgname(256), 0x8100_4506);
        assert_eq!(eviocgbit(0, 4), 0x8004_4520);
        assert_eq!(eviocgbit(3, 8), 0x8008_4523);
        assert_eq!(eviocgabs(0x18), 0x8018_4558);
    }
}
