//! Drawing capabilities consumed by the fractal core
//!
//! The core never touches pixels directly: it issues lines, triangle fills,
//! blits and read-backs through [`Canvas`]. [`Framebuffer`] is the software
//! implementation used both headless and behind the SDL window.

use super::{DisplayError, PixelBuffer};
use crate::geometry::Vec2;

/// Which color a draw call uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    /// The renderer's constant foreground color
    Ink,
    /// Black, used to punch holes into already painted geometry
    Background,
}

pub trait Canvas {
    fn draw_line(&mut self, p1: Vec2, p2: Vec2, paint: Paint);

    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, paint: Paint);

    /// Copy a full-size image over the framebuffer
    fn blit(&mut self, image: &PixelBuffer);

    /// Read the framebuffer back into `into`, resizing it if needed
    fn capture(&self, into: &mut PixelBuffer);

    /// Fill the framebuffer with black
    fn clear(&mut self);

    /// Reallocate the framebuffer for a new viewport
    fn resize(&mut self, width: u32, height: u32) -> Result<(), DisplayError>;

    fn present(&mut self) -> Result<(), DisplayError>;
}

/// Software framebuffer with a fixed ink color
#[derive(Debug)]
pub struct Framebuffer {
    buffer: PixelBuffer,
    ink: (u8, u8, u8),
    presented: u64,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32, ink: (u8, u8, u8)) -> Self {
        Self {
            buffer: PixelBuffer::with_size(width, height),
            ink,
            presented: 0,
        }
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn ink(&self) -> (u8, u8, u8) {
        self.ink
    }

    /// Number of frames presented so far
    pub fn presented(&self) -> u64 {
        self.presented
    }

    fn color(&self, paint: Paint) -> (u8, u8, u8) {
        match paint {
            Paint::Ink => self.ink,
            Paint::Background => (0, 0, 0),
        }
    }
}

impl Canvas for Framebuffer {
    fn draw_line(&mut self, p1: Vec2, p2: Vec2, paint: Paint) {
        let (r, g, b) = self.color(paint);
        self.buffer.line(
            p1.x.round() as i32,
            p1.y.round() as i32,
            p2.x.round() as i32,
            p2.y.round() as i32,
            r,
            g,
            b,
        );
    }

    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, paint: Paint) {
        let (r, g, bl) = self.color(paint);
        self.buffer
            .fill_polygon(&[a.as_tuple(), b.as_tuple(), c.as_tuple()], r, g, bl);
    }

    fn blit(&mut self, image: &PixelBuffer) {
        self.buffer.copy_from(image);
    }

    fn capture(&self, into: &mut PixelBuffer) {
        if into.width() != self.buffer.width() || into.height() != self.buffer.height() {
            into.resize(self.buffer.width(), self.buffer.height());
        }
        into.copy_from(&self.buffer);
    }

    fn clear(&mut self) {
        self.buffer.clear(0, 0, 0);
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), DisplayError> {
        self.buffer.resize(width, height);
        Ok(())
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.presented += 1;
        Ok(())
    }
}
