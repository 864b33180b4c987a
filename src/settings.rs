use canvas::MATRIX_SIZE;
use color::HsbColor;
use display::Orientation;

/// Settings for a drawing session
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Canvas width in pixels. `Session::run` only accepts the 8x8 of
    /// the LED matrix.
    pub width: usize,
    /// Canvas height in pixels, see `width`
    pub height: usize,
    /// How far one up / down press moves the selected pen channel
    pub step: f64,
    /// Pen color at startup
    pub pen: HsbColor,
    /// LED matrix orientation
    pub rotation: Orientation,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            width: MATRIX_SIZE,
            height: MATRIX_SIZE,
            step: 0.01,
            pen: HsbColor::new(1.0, 1.0, 1.0),
            rotation: Orientation::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!((settings.width, settings.height), (8, 8));
        assert_eq!(settings.step, 0.01);
        assert_eq!(settings.pen.rgb(), (255, 0, 0));
        assert_eq!(settings.rotation, Orientation::Deg0);
    }
}
