use color::{HsbColor, Rgb};

use std::fmt;

/// Width and height of the Sense Hat LED matrix.
pub const MATRIX_SIZE: usize = 8;

/// The in-memory framebuffer: a grid of `HsbColor`s mirrored to the LED
/// matrix.
///
/// Cells are stored row-major, so the cell at (`x`, `y`) lives at index
/// `y * width + x`, which is also the pixel index on the matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<HsbColor>,
}

/// The errors which can occur when addressing the canvas.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CanvasError {
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

impl Canvas {
    /// Creates a `width` x `height` canvas with every cell black.
    pub fn new(width: usize, height: usize) -> Self {
        Canvas {
            width,
            height,
            cells: vec![HsbColor::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns the color of the cell at the given (`x`, `y`) coordinate.
    pub fn get(&self, x: usize, y: usize) -> Result<HsbColor, CanvasError> {
        let index = self.index_of(x, y)?;
        Ok(self.cells[index])
    }

    /// Overwrites the cell at the given (`x`, `y`) coordinate with a copy
    /// of `color`.
    pub fn set(&mut self, x: usize, y: usize, color: &HsbColor) -> Result<(), CanvasError> {
        let index = self.index_of(x, y)?;
        self.cells[index] = *color;
        Ok(())
    }

    /// Converts every cell to rgb, row 0 first and each row left to right.
    pub fn render_rgb(&self) -> Vec<Rgb> {
        self.cells.iter().map(HsbColor::rgb).collect()
    }

    /// Returns an independent copy of the canvas.
    pub fn copy(&self) -> Canvas {
        self.clone()
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, CanvasError> {
        if x >= self.width || y >= self.height {
            return Err(CanvasError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::new(MATRIX_SIZE, MATRIX_SIZE)
    }
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CanvasError::OutOfBounds { x, y, width, height } => write!(
                f,
                "pixel ({}, {}) is outside of the {}x{} canvas",
                x, y, width, height
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_canvas_renders_black() {
        let canvas = Canvas::default();
        assert_eq!(canvas.dimensions(), (8, 8));
        let rgb = canvas.render_rgb();
        assert_eq!(rgb.len(), 64);
        assert!(rgb.iter().all(|p| *p == (0, 0, 0)));
    }

    #[test]
    fn set_then_get_returns_equal_color() {
        let mut canvas = Canvas::default();
        let color = HsbColor::new(0.3, 0.6, 0.9);
        canvas.set(3, 5, &color).unwrap();
        assert_eq!(canvas.get(3, 5).unwrap(), color);
        assert_eq!(canvas.get(5, 3).unwrap(), HsbColor::default());
    }

    #[test]
    fn set_copies_the_color() {
        let mut canvas = Canvas::default();
        let mut color = HsbColor::new(0.0, 1.0, 1.0);
        canvas.set(0, 0, &color).unwrap();
        color.b = 0.0;
        assert_eq!(canvas.get(0, 0).unwrap().b, 1.0);
    }

    #[test]
    fn render_is_row_major() {
        let mut canvas = Canvas::new(3, 2);
        let red = HsbColor::new(0.0, 1.0, 1.0);
        canvas.set(2, 0, &red).unwrap();
        canvas.set(0, 1, &red).unwrap();
        let rgb = canvas.render_rgb();
        assert_eq!(rgb.len(), 6);
        for (i, p) in rgb.iter().enumerate() {
            if i == 2 || i == 3 {
                assert_eq!(*p, (255, 0, 0), "index {}", i);
            } else {
                assert_eq!(*p, (0, 0, 0), "index {}", i);
            }
        }
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let mut canvas = Canvas::default();
        let err = CanvasError::OutOfBounds { x: 8, y: 0, width: 8, height: 8 };
        assert_eq!(canvas.get(8, 0), Err(err));
        assert_eq!(canvas.set(8, 0, &HsbColor::default()), Err(err));
        assert!(canvas.get(0, 8).is_err());
        assert_eq!(err.to_string(), "pixel (8, 0) is outside of the 8x8 canvas");
    }

    #[test]
    fn copy_is_independent() {
        let mut canvas = Canvas::default();
        let blue = HsbColor::new(2.0 / 3.0, 1.0, 1.0);
        canvas.set(1, 1, &blue).unwrap();

        let copy = canvas.copy();
        canvas.set(1, 1, &HsbColor::default()).unwrap();
        canvas.set(7, 7, &blue).unwrap();

        assert_eq!(copy.dimensions(), canvas.dimensions());
        assert_eq!(copy.get(1, 1).unwrap(), blue);
        assert_eq!(copy.get(7, 7).unwrap(), HsbColor::default());
    }
}
