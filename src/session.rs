use canvas::{Canvas, CanvasError, MATRIX_SIZE};
use color::{to_pixel, ColorError, HsbChannel, HsbColor};
use display::{DisplayError, LedMatrix, Pixel};
use settings::Settings;
use stick::{Action, Direction, EventSource, InputEvent, StickError};

use std::fmt;
use std::io;

/// What the joystick currently controls.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Mode {
    /// Directions move the cursor.
    Cursor,
    /// Up / down change the selected pen channel, left / right select
    /// the channel.
    Color,
    /// Directions move the cursor and paint the pen color where it lands.
    Drawing,
}

/// An interactive drawing session on the LED matrix.
#[derive(Debug, Clone)]
pub struct Session {
    canvas: Canvas,
    cursor: (usize, usize),
    pen: HsbColor,
    mode: Mode,
    channel: HsbChannel,
    step: f64,
}

/// Errors that this crate can return
#[derive(Debug)]
pub enum PenError {
    CanvasError(CanvasError),
    /// The canvas is not the size of the LED matrix.
    CanvasSize(usize, usize),
    ColorError(ColorError),
    DisplayError(DisplayError),
    StickError(StickError),
    Io(io::Error),
}

/// A shortcut for Results that can return `T` or `PenError`
pub type PenResult<T> = Result<T, PenError>;

impl Session {
    pub fn new(settings: &Settings) -> Self {
        Session {
            canvas: Canvas::new(settings.width, settings.height),
            cursor: (0, 0),
            pen: settings.pen,
            mode: Mode::default(),
            channel: HsbChannel::default(),
            step: settings.step,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn pen(&self) -> HsbColor {
        self.pen
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn channel(&self) -> HsbChannel {
        self.channel
    }

    /// Paints the pen color into the canvas at the cursor.
    pub fn apply(&mut self) -> PenResult<()> {
        let (x, y) = self.cursor;
        self.canvas.set(x, y, &self.pen)?;
        Ok(())
    }

    /// Updates the session for one joystick event. Only presses do
    /// anything.
    pub fn handle(&mut self, event: &InputEvent) -> PenResult<()> {
        if event.action != Action::Pressed {
            return Ok(());
        }

        let color_mode = self.mode == Mode::Color;
        match event.direction {
            Direction::Middle => {
                self.mode = self.mode.next();
                debug!("switched to {} mode", self.mode.label());
                return Ok(());
            }
            Direction::Up if color_mode => self.adjust(self.step),
            Direction::Down if color_mode => self.adjust(-self.step),
            Direction::Left if color_mode => self.channel = self.channel.prev(),
            Direction::Right if color_mode => self.channel = self.channel.next(),
            Direction::Up => self.cursor.1 = self.cursor.1.saturating_sub(1),
            Direction::Down => {
                let last = self.canvas.height().saturating_sub(1);
                self.cursor.1 = last.min(self.cursor.1 + 1);
            }
            Direction::Left => self.cursor.0 = self.cursor.0.saturating_sub(1),
            Direction::Right => {
                let last = self.canvas.width().saturating_sub(1);
                self.cursor.0 = last.min(self.cursor.0 + 1);
            }
        }

        if self.mode == Mode::Drawing {
            self.apply()?;
        }
        Ok(())
    }

    /// Renders the canvas for the LED matrix. Outside of drawing mode the
    /// cursor is shown in the pen color on top of the canvas.
    pub fn frame(&self) -> PenResult<Vec<Pixel>> {
        let mut rgb = self.canvas.render_rgb();
        if self.mode != Mode::Drawing {
            let (x, y) = self.cursor;
            if let Some(cell) = rgb.get_mut(y * self.canvas.width() + x) {
                *cell = self.pen.rgb();
            }
        }
        rgb.into_iter()
            .map(|c| to_pixel(c).map_err(PenError::from))
            .collect()
    }

    /// Shows the current frame, then blocks for and handles the next event.
    pub fn tick<M, E>(&mut self, matrix: &mut M, events: &mut E) -> PenResult<()>
    where
        M: LedMatrix,
        E: EventSource,
    {
        let frame = self.frame()?;
        matrix.set_pixels(&frame)?;
        let event = events.wait_for_event()?;
        debug!("{:?} {:?}", event.direction, event.action);
        self.handle(&event)
    }

    /// Runs the session until the display, the joystick or `on_frame`
    /// fails. `on_frame` is called before every frame is shown.
    ///
    /// The canvas must be the size of the LED matrix.
    pub fn run<M, E, F>(&mut self, matrix: &mut M, events: &mut E, mut on_frame: F) -> PenResult<()>
    where
        M: LedMatrix,
        E: EventSource,
        F: FnMut(&Session) -> PenResult<()>,
    {
        let (width, height) = self.canvas.dimensions();
        if (width, height) != (MATRIX_SIZE, MATRIX_SIZE) {
            return Err(PenError::CanvasSize(width, height));
        }
        loop {
            on_frame(&*self)?;
            self.tick(matrix, events)?;
        }
    }

    fn adjust(&mut self, delta: f64) {
        let value = (self.pen.channel(self.channel) + delta).max(0.0).min(1.0);
        self.pen.set_channel(self.channel, value);
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(&Settings::default())
    }
}

/// The status block printed to the terminal.
impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", "-".repeat(40))?;
        writeln!(f, "In {} command mode.", self.mode.label())?;
        if self.mode == Mode::Color {
            writeln!(f, "{}.", self.pen)?;
            writeln!(
                f,
                "{} to {:.2}",
                self.channel.label(),
                self.pen.channel(self.channel)
            )?;
        }
        writeln!(f, "Cursor at pos: {}, {}", self.cursor.0, self.cursor.1)
    }
}

impl Mode {
    pub fn next(&self) -> Self {
        match *self {
            Mode::Cursor => Mode::Color,
            Mode::Color => Mode::Drawing,
            Mode::Drawing => Mode::Cursor,
        }
    }

    pub fn label(&self) -> &'static str {
        match *self {
            Mode::Cursor => "cursor",
            Mode::Color => "color",
            Mode::Drawing => "drawing",
        }
    }
}

impl Default for Mode {
    fn default() -> Self { Mode::Cursor }
}

impl fmt::Display for PenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            PenError::CanvasError(ref err) => write!(f, "{}", err),
            PenError::CanvasSize(width, height) => write!(
                f,
                "a {}x{} canvas does not fit the {}x{} LED matrix",
                width, height, MATRIX_SIZE, MATRIX_SIZE
            ),
            PenError::ColorError(ref err) => write!(f, "{}", err),
            PenError::DisplayError(ref err) => write!(f, "display: {:?}", err),
            PenError::StickError(ref err) => write!(f, "joystick: {:?}", err),
            PenError::Io(ref err) => write!(f, "terminal: {}", err),
        }
    }
}

impl From<CanvasError> for PenError {
    fn from(err: CanvasError) -> Self {
        PenError::CanvasError(err)
    }
}

impl From<ColorError> for PenError {
    fn from(err: ColorError) -> Self {
        PenError::ColorError(err)
    }
}

impl From<DisplayError> for PenError {
    fn from(err: DisplayError) -> Self {
        PenError::DisplayError(err)
    }
}

impl From<StickError> for PenError {
    fn from(err: StickError) -> Self {
        PenError::StickError(err)
    }
}

impl From<io::Error> for PenError {
    fn from(err: io::Error) -> Self {
        PenError::Io(err)
    }
}
