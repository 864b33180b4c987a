use framebuffer::{Framebuffer, FramebufferError};
use glob::{glob, GlobError, PatternError};

use std::fmt;

/// A rgb888 color pixel.
///
/// A pixel on the sensehat LED matrix is actually a hex565.
/// That means a pixel is 16-bit instead of 24-bit.
/// (5 for red, 6 for green, 5 for blue, 5+6+5=16)
pub type Pixel = (u8, u8, u8);

/// Number of pixels on the LED matrix.
pub const PIXEL_COUNT: usize = 64;

/// Size in bytes of a rgb565 frame.
const FRAME_BYTES: usize = PIXEL_COUNT * 2;

/// The image orientation.
/// 0°, 90°, 180°, 270°
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Orientation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

/// Something which can show a full frame of pixels.
pub trait LedMatrix {
    /// Updates the entire matrix from exactly 64 pixels in row-major order.
    fn set_pixels(&mut self, pixel_list: &[Pixel]) -> Result<(), DisplayError>;
}

/// Represents the LED matrix.
pub struct Display {
    framebuffer: Framebuffer,
    frame: [u8; FRAME_BYTES],
    orientation: Orientation,
}

/// The errors which can occur when using the display.
#[derive(Debug)]
pub enum DisplayError {
    MissingFramebuffer,
    OutOfBounds(usize, usize),
    WrongPixelCount(usize),
    GlobError(GlobError),
    PatternError(PatternError),
    FramebufferError(FramebufferError),
}

impl Display {
    /// Try to create a new Display object.
    ///
    /// Will open the sensehat framebuffer and map it to memory.
    pub fn new() -> Result<Self, DisplayError> {
        // The id of the sensehat framebuffer
        let rpi_sense_fb = b"RPi-Sense FB";

        let framebuffer = glob("/dev/fb*")?
            .filter_map(Result::ok)
            .filter_map(|file| {
                let fb = Framebuffer::new(&*file.to_string_lossy()).ok()?;
                Some((file, fb))
            })
            .find(|&(_, ref fb)| {
                let id = fb.fix_screen_info.id;
                rpi_sense_fb[..] == id[..rpi_sense_fb.len()]
            });
        match framebuffer {
            Some((file, fb)) => {
                info!("using LED matrix framebuffer {}", file.display());
                Ok(Self {
                    framebuffer: fb,
                    frame: [0; FRAME_BYTES],
                    orientation: Orientation::default(),
                })
            }
            None => Err(DisplayError::MissingFramebuffer),
        }
    }

    /// Sets the orientation of the display. The default orientation is with
    /// the HDMI port facing downwards on the Raspberry Pi 3 model B.
    pub fn set_rotation(&mut self, ori: Orientation, redraw: bool) {
        self.orientation = ori;
        if redraw {
            self.draw();
        }
    }

    /// Sets a single LED matrix pixel at the given (x, y) coordinate
    /// to the given color.
    pub fn set_pixel(&mut self, x: usize, y: usize, p: Pixel) -> Result<(), DisplayError> {
        let pos = pixel_offset(x, y)?;
        write_pixel(&mut self.frame, pos, p);
        self.draw();
        Ok(())
    }

    /// Sets the entire LED matrix to a single color, defaults to blank/off.
    pub fn clear(&mut self, color: Option<Pixel>) {
        let c = color.unwrap_or((0, 0, 0));
        for pos in (0..PIXEL_COUNT).map(|x| x * 2) {
            write_pixel(&mut self.frame, pos, c);
        }
        self.draw();
    }

    /// Writes the frame to the framebuffer, rotated to the orientation.
    fn draw(&mut self) {
        let rotated = rotate_frame(&self.frame, self.orientation);
        self.framebuffer.write_frame(&rotated);
    }
}

impl LedMatrix for Display {
    fn set_pixels(&mut self, pixel_list: &[Pixel]) -> Result<(), DisplayError> {
        self.frame = encode_frame(pixel_list)?;
        self.draw();
        Ok(())
    }
}

impl Default for Orientation {
    fn default() -> Self { Orientation::Deg0 }
}

/// Encodes 64 row-major pixels into an unrotated rgb565 frame.
pub fn encode_frame(pixel_list: &[Pixel]) -> Result<[u8; FRAME_BYTES], DisplayError> {
    if pixel_list.len() != PIXEL_COUNT {
        return Err(DisplayError::WrongPixelCount(pixel_list.len()));
    }
    let mut frame = [0; FRAME_BYTES];
    for (pos, pixel) in (0..PIXEL_COUNT).map(|x| x * 2).zip(pixel_list.iter()) {
        write_pixel(&mut frame, pos, *pixel);
    }
    Ok(frame)
}

/// Returns the byte position of the (x, y) pixel in an unrotated frame.
pub fn pixel_offset(x: usize, y: usize) -> Result<usize, DisplayError> {
    if x > 7 || y > 7 {
        return Err(DisplayError::OutOfBounds(x, y));
    }
    Ok(2 * (x + 8 * y))
}

/// Moves every pixel of an unrotated frame to where it lands for the
/// given orientation.
pub fn rotate_frame(frame: &[u8; FRAME_BYTES], ori: Orientation) -> [u8; FRAME_BYTES] {
    if ori == Orientation::Deg0 {
        // No need to flip the image as this is the default orientation.
        return *frame;
    }
    let mut temp = [0; FRAME_BYTES];
    let mut i = 0;
    for y in 0..8 {
        for x in 0..8 {
            let cor = rotation_func(ori, x, y);
            temp[cor] = frame[i];
            temp[cor + 1] = frame[i + 1];
            i += 2;
        }
    }
    temp
}

/// Helper function for mapping a (x, y) coordinate on the
/// 2D LED matrix to a 1D position on the frame.
/// A pixel in the frame is actually 16-bit, but since we can
/// only write to the framebuffer with u8 slices, we have to
/// split up each pixel in two. This function returns the position
/// of the 8 LSB of a pixel.
fn rotation_func(ori: Orientation, x: usize, y: usize) -> usize {
    use self::Orientation::*;
    match ori {
        Deg0 => 2 * (x + 8 * y),
        Deg90 => 2 * ((7 - y) + 8 * x),
        Deg180 => 126 - 2 * (x + 8 * y),
        Deg270 => 2 * (y + 8 * (7 - x)),
    }
}

fn write_pixel(frame: &mut [u8; FRAME_BYTES], pos: usize, p: Pixel) {
    let (msb, lsb) = convert_pixel(p);
    frame[pos] = lsb;
    frame[pos + 1] = msb;
}

/// Converts a rgb888 pixel into a rgb565 pixel
fn convert_pixel(p: Pixel) -> (u8, u8) {
    let r = p.0 & 0xF8;
    let g = p.1 >> 2;
    let b = p.2 >> 3;
    (r | (g >> 3), (g << 5) | b)
}

impl fmt::Debug for Display {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Display {{ framebuffer: {:?} orientation: {:?} }}",
            self.framebuffer,
            self.orientation)
    }
}

impl From<GlobError> for DisplayError {
    fn from(err: GlobError) -> Self {
        DisplayError::GlobError(err)
    }
}

impl From<PatternError> for DisplayError {
    fn from(err: PatternError) -> Self {
        DisplayError::PatternError(err)
    }
}

impl From<FramebufferError> for DisplayError {
    fn from(err: FramebufferError) -> Self {
        DisplayError::FramebufferError(err)
    }
}
