//! Display buffer.
use std::fmt::{self, Write};

/// Monochrome screen buffer that sprites are drawn to.
///
/// Coordinates must already be wrapped to the display size by the caller.
pub struct Display {
    width: usize,
    height: usize,
    /// Row-major pixels, `true` is lit.
    pixels: Box<[bool]>,
    /// Set whenever a pixel is written, so hosts know to redraw.
    dirty: bool,
}

impl Display {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; width * height].into_boxed_slice(),
            dirty: false,
        }
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Turn all pixels off, and forget any pending redraw.
    pub fn reset(&mut self) {
        self.pixels.fill(false);
        self.dirty = false;
    }

    #[inline(always)]
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[x + y * self.width]
    }

    /// Writes always mark the display as dirty, even when the pixel
    /// keeps its value.
    #[inline(always)]
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        self.pixels[x + y * self.width] = on;
        self.dirty = true;
    }

    #[inline(always)]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Row-major pixel buffer for blitting to a host surface.
    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    /// Render the pixels as text, `#` for lit and `.` for unlit.
    pub fn dump(&self) -> Result<String, fmt::Error> {
        let mut buf = String::with_capacity((self.width + 1) * self.height);

        for row in self.pixels.chunks(self.width) {
            for px in row {
                if *px {
                    write!(buf, "#")?;
                } else {
                    write!(buf, ".")?;
                }
            }
            writeln!(buf)?;
        }

        Ok(buf)
    }
}
