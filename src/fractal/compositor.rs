use crate::display::{Canvas, PixelBuffer};

/// Keeps everything painted by finished steps as one captured image.
///
/// Each frame starts by blitting that image, so earlier levels never need to
/// be re-rendered. The read-back is the expensive part and happens once per
/// step, never once per frame.
#[derive(Debug, Clone)]
pub struct Compositor {
    background: PixelBuffer,
    captures: u64,
}

impl Compositor {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            background: PixelBuffer::with_size(width, height),
            captures: 0,
        }
    }

    pub fn background(&self) -> &PixelBuffer {
        &self.background
    }

    /// Number of read-backs since the last reset
    pub fn captures(&self) -> u64 {
        self.captures
    }

    /// Blit the static background over the whole canvas
    pub fn draw_background(&self, canvas: &mut impl Canvas) {
        canvas.blit(&self.background);
    }

    /// Replace the background with what the canvas currently shows
    pub fn capture(&mut self, canvas: &impl Canvas) {
        canvas.capture(&mut self.background);
        self.captures += 1;
    }

    /// Blank background at the given resolution
    pub fn reset(&mut self, width: u32, height: u32) {
        if self.background.width() == width && self.background.height() == height {
            self.background.clear(0, 0, 0);
        } else {
            self.background.resize(width, height);
        }
        self.captures = 0;
    }
}
