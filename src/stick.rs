use byteorder::{ByteOrder, NativeEndian};
use glob::{glob, GlobError, PatternError};
use libc;

use std::fs::{self, File};
use std::io::{self, Read};
use std::mem;
use std::path::Path;

/// The name the kernel gives the Sense Hat joystick input device.
const JOYSTICK_NAME: &str = "Raspberry Pi Sense HAT Joystick";

// Linux input event constants, see linux/input-event-codes.h
const EV_KEY: u16 = 0x01;
const KEY_ENTER: u16 = 28;
const KEY_UP: u16 = 103;
const KEY_LEFT: u16 = 105;
const KEY_RIGHT: u16 = 106;
const KEY_DOWN: u16 = 108;

/// The direction the joystick was pushed in. Pushing the stick in is
/// `Middle`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Middle,
}

/// What happened to the joystick in that direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Action {
    Released,
    Pressed,
    Held,
}

/// A single joystick event.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InputEvent {
    pub direction: Direction,
    pub action: Action,
}

/// A blocking source of joystick events.
pub trait EventSource {
    /// Blocks until the next joystick event arrives.
    fn wait_for_event(&mut self) -> Result<InputEvent, StickError>;
}

/// Represents the joystick.
#[derive(Debug)]
pub struct Stick {
    device: File,
}

/// The errors which can occur when reading the joystick.
#[derive(Debug)]
pub enum StickError {
    MissingJoystick,
    Disconnected,
    GlobError(GlobError),
    PatternError(PatternError),
    Io(io::Error),
}

impl Stick {
    /// Try to open the joystick.
    ///
    /// Scans the input devices in sysfs for the one named after the Sense
    /// Hat joystick and opens its event device.
    pub fn new() -> Result<Self, StickError> {
        for entry in glob("/sys/class/input/event*")? {
            let dir = entry?;
            if !is_joystick(&dir) {
                continue;
            }
            if let Some(name) = dir.file_name() {
                let path = Path::new("/dev/input").join(name);
                info!("using joystick {}", path.display());
                return Ok(Stick { device: File::open(path)? });
            }
        }
        Err(StickError::MissingJoystick)
    }
}

impl EventSource for Stick {
    fn wait_for_event(&mut self) -> Result<InputEvent, StickError> {
        next_event(&mut self.device)
    }
}

/// Reads raw input records until one decodes to a joystick event.
fn next_event<R: Read>(reader: &mut R) -> Result<InputEvent, StickError> {
    let mut buf = vec![0u8; event_size()];
    loop {
        match reader.read_exact(&mut buf) {
            Ok(()) => {}
            Err(ref e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Err(StickError::Disconnected);
            }
            Err(e) => return Err(StickError::from(e)),
        }
        if let Some(event) = decode_event(&buf) {
            return Ok(event);
        }
    }
}

fn is_joystick(dir: &Path) -> bool {
    fs::read_to_string(dir.join("device").join("name"))
        .map(|name| name.trim() == JOYSTICK_NAME)
        .unwrap_or(false)
}

/// Size in bytes of a `struct input_event` on this platform.
fn event_size() -> usize {
    mem::size_of::<libc::input_event>()
}

/// Decodes a raw `struct input_event`.
///
/// The record starts with a `struct timeval`, followed by the 16-bit
/// type and code and the 32-bit value. Returns `None` for records that
/// are not joystick key events.
pub fn decode_event(buf: &[u8]) -> Option<InputEvent> {
    let offset = mem::size_of::<libc::timeval>();
    if buf.len() < offset + 8 {
        return None;
    }
    let kind = NativeEndian::read_u16(&buf[offset..]);
    let code = NativeEndian::read_u16(&buf[offset + 2..]);
    let value = NativeEndian::read_i32(&buf[offset + 4..]);
    if kind != EV_KEY {
        trace!("skipping input record type {}", kind);
        return None;
    }
    let direction = match code {
        KEY_UP => Direction::Up,
        KEY_DOWN => Direction::Down,
        KEY_LEFT => Direction::Left,
        KEY_RIGHT => Direction::Right,
        KEY_ENTER => Direction::Middle,
        _ => {
            trace!("skipping key code {}", code);
            return None;
        }
    };
    let action = match value {
        0 => Action::Released,
        1 => Action::Pressed,
        2 => Action::Held,
        _ => return None,
    };
    Some(InputEvent { direction, action })
}

impl From<GlobError> for StickError {
    fn from(err: GlobError) -> Self {
        StickError::GlobError(err)
    }
}

impl From<PatternError> for StickError {
    fn from(err: PatternError) -> Self {
        StickError::PatternError(err)
    }
}

impl From<io::Error> for StickError {
    fn from(err: io::Error) -> Self {
        StickError::Io(err)
    }
}
