use crate::error::{InputError, Result};
use crate::input::EventSource;
use crate::names::describe_record;
use evdev::{AbsoluteAxisType, EventType};
use tracing::{enabled, trace, warn, Level};

/// Records requested per read.
pub const BATCH_RECORDS: usize = 64;

/// Value of an axis field no record in the batch updated.
pub const UNSET: i32 = -1;

const LONG: usize = std::mem::size_of::<libc::c_long>();

/// Size of one `struct input_event` on this platform.
pub const RECORD_SIZE: usize = 2 * LONG + 8;

const _: () = assert!(RECORD_SIZE == std::mem::size_of::<libc::input_event>());

/// One kernel `struct input_event`, decoded from native byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawEventRecord {
    pub seconds: i64,
    pub microseconds: i64,
    pub event_type: u16,
    pub code: u16,
    pub value: i32,
}

impl RawEventRecord {
    pub fn new(event_type: u16, code: u16, value: i32, seconds: i64, microseconds: i64) -> Self {
        Self {
            seconds,
            microseconds,
            event_type,
            code,
            value,
        }
    }

    /// Decodes one record; `bytes` must hold at least `RECORD_SIZE` bytes.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < RECORD_SIZE {
            return None;
        }
        let mut long = [0u8; LONG];
        long.copy_from_slice(&bytes[..LONG]);
        let seconds = libc::c_long::from_ne_bytes(long) as i64;
        long.copy_from_slice(&bytes[LONG..2 * LONG]);
        let microseconds = libc::c_long::from_ne_bytes(long) as i64;

        let tail = &bytes[2 * LONG..RECORD_SIZE];
        Some(Self {
            seconds,
            microseconds,
            event_type: u16::from_ne_bytes([tail[0], tail[1]]),
            code: u16::from_ne_bytes([tail[2], tail[3]]),
            value: i32::from_ne_bytes([tail[4], tail[5], tail[6], tail[7]]),
        })
    }

    /// Encodes in the kernel layout. Timestamps wider than `c_long` truncate.
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut out = [0u8; RECORD_SIZE];
        out[..LONG].copy_from_slice(&(self.seconds as libc::c_long).to_ne_bytes());
        out[LONG..2 * LONG].copy_from_slice(&(self.microseconds as libc::c_long).to_ne_bytes());
        out[2 * LONG..2 * LONG + 2].copy_from_slice(&self.event_type.to_ne_bytes());
        out[2 * LONG + 2..2 * LONG + 4].copy_from_slice(&self.code.to_ne_bytes());
        out[2 * LONG + 4..].copy_from_slice(&self.value.to_ne_bytes());
        out
    }
}

/// Iterates the whole records in `bytes`; a trailing partial record is skipped.
pub fn records(bytes: &[u8]) -> impl Iterator<Item = RawEventRecord> + '_ {
    bytes
        .chunks_exact(RECORD_SIZE)
        .filter_map(RawEventRecord::from_bytes)
}

/// Single-point touchpad sample folded from one batch of records.
///
/// `x`, `y` and `pressure` hold `UNSET` when the batch carried no record
/// for that axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchpadEvent {
    x: i32,
    y: i32,
    pressure: i32,
    seconds: i64,
    microseconds: i64,
}

impl Default for TouchpadEvent {
    fn default() -> Self {
        Self {
            x: UNSET,
            y: UNSET,
            pressure: UNSET,
            seconds: 0,
            microseconds: 0,
        }
    }
}

impl TouchpadEvent {
    /// Heap-allocates a reset event for callers that keep one across reads.
    pub fn allocate() -> Box<Self> {
        Box::default()
    }

    pub fn release(self: Box<Self>) {
        drop(self);
    }

    pub fn from_batch(batch: &[RawEventRecord]) -> Self {
        let mut event = Self::default();
        event.refill(batch.iter().copied());
        event
    }

    /// Resets to the sentinel state, then folds `batch` in arrival order.
    ///
    /// The timestamp comes from the first record. Each axis keeps the last
    /// value seen for it. No sync boundaries are honoured: two reports in
    /// one batch merge.
    pub fn refill<I: IntoIterator<Item = RawEventRecord>>(&mut self, batch: I) {
        *self = Self::default();
        for (i, record) in batch.into_iter().enumerate() {
            if i == 0 {
                self.seconds = record.seconds;
                self.microseconds = record.microseconds;
            }
            if record.event_type != EventType::ABSOLUTE.0 {
                continue;
            }
            match AbsoluteAxisType(record.code) {
                AbsoluteAxisType::ABS_X => self.x = record.value,
                AbsoluteAxisType::ABS_Y => self.y = record.value,
                AbsoluteAxisType::ABS_PRESSURE => self.pressure = record.value,
                _ => {}
            }
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn pressure(&self) -> i32 {
        self.pressure
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn microseconds(&self) -> i64 {
        self.microseconds
    }
}

impl std::fmt::Display for TouchpadEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ABS_X {}\tABS_Y {}\tABS_PRESSURE {}\tseconds {}\tmicroseconds {}",
            self.x, self.y, self.pressure, self.seconds, self.microseconds
        )
    }
}

/// Reads one batch from `source` and folds it into `event`.
///
/// `event` is left untouched when the read fails or is shorter than one
/// record.
pub fn decode_into<S: EventSource + ?Sized>(source: &mut S, event: &mut TouchpadEvent) -> Result<()> {
    let mut buf = [0u8; RECORD_SIZE * BATCH_RECORDS];
    let got = source.read_raw(&mut buf).map_err(InputError::Read)?;
    if got < RECORD_SIZE {
        warn!(expected = RECORD_SIZE, got, "short read from input device");
        return Err(InputError::ShortRead {
            expected: RECORD_SIZE,
            got,
        });
    }

    let batch = &buf[..got];
    if enabled!(Level::TRACE) {
        for record in records(batch) {
            trace!("  {}", describe_record(&record));
        }
    }
    event.refill(records(batch));
    trace!(records = got / RECORD_SIZE, %event, "decoded batch");
    Ok(())
}

/// Reads one batch from `source` and returns a fresh sample.
pub fn decode_next<S: EventSource + ?Sized>(source: &mut S) -> Result<TouchpadEvent> {
    let mut event = TouchpadEvent::default();
    decode_into(source, &mut event)?;
    Ok(event)
}
