//! Sierpinski subdivision engine and its level-driven animation
//!
//! [`LevelScheduler`] owns the queue of leaf triangles and the level counters,
//! [`Interpolator`] animates one step's batch of center triangles,
//! [`Compositor`] keeps the painted history as a captured background, and
//! [`Controller`] drives the three once per frame.

mod compositor;
mod controller;
mod interpolator;
mod scheduler;

pub use compositor::Compositor;
pub use controller::{Command, Controller, Flow, Viewport};
pub use interpolator::{AnimationBatch, FillStyle, Frame, Interpolator};
pub use scheduler::LevelScheduler;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::display::DisplayError;

/// Default recursion depth after which the animation stops
pub const DEFAULT_MAX_DEPTH: u32 = 8;
/// Pixels kept free around the seed triangle
pub const DEFAULT_MIN_MARGIN: f32 = 20.0;
/// Interpolation parameter increment per frame
pub const DEFAULT_ANIMATION_STEP: f32 = 0.03;

#[derive(Debug, Error)]
pub enum FractalError {
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },

    /// Level counters and queue disagree; the level bookkeeping is broken
    #[error("subdivision queue holds {available} triangles but the level needs {requested}")]
    EmptySubdivisionQueue { requested: usize, available: usize },

    #[error(transparent)]
    Display(#[from] DisplayError),
}

/// Tunables of the animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub max_depth: u32,
    pub min_margin: f32,
    pub animation_step: f32,
    pub fill_style: FillStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            min_margin: DEFAULT_MIN_MARGIN,
            animation_step: DEFAULT_ANIMATION_STEP,
            fill_style: FillStyle::Solid,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::Cell;

    use crate::display::{Canvas, DisplayError, Paint, PixelBuffer};
    use crate::geometry::{Triangle, Vec2};

    /// Canvas double that records every call
    #[derive(Debug, Default)]
    pub struct RecordingCanvas {
        pub width: u32,
        pub height: u32,
        pub lines: Vec<(Vec2, Vec2, Paint)>,
        pub fills: Vec<(Triangle, Paint)>,
        pub blits: usize,
        pub captures: Cell<usize>,
        pub clears: usize,
        pub presents: usize,
        pub resizes: Vec<(u32, u32)>,
        /// Make the next resize fail like a texture allocation error
        pub fail_resize: bool,
    }

    impl RecordingCanvas {
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                ..Self::default()
            }
        }

        /// Forget recorded draw calls, keep the size
        pub fn reset_log(&mut self) {
            *self = Self::new(self.width, self.height);
        }

        pub fn draw_calls(&self) -> usize {
            self.lines.len() + self.fills.len() + self.blits
        }
    }

    impl Canvas for RecordingCanvas {
        fn draw_line(&mut self, p1: Vec2, p2: Vec2, paint: Paint) {
            self.lines.push((p1, p2, paint));
        }

        fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, paint: Paint) {
            self.fills.push((Triangle::new(a, b, c), paint));
        }

        fn blit(&mut self, _image: &PixelBuffer) {
            self.blits += 1;
        }

        fn capture(&self, into: &mut PixelBuffer) {
            self.captures.set(self.captures.get() + 1);
            if into.width() != self.width || into.height() != self.height {
                into.resize(self.width, self.height);
            }
        }

        fn clear(&mut self) {
            self.clears += 1;
        }

        fn resize(&mut self, width: u32, height: u32) -> Result<(), DisplayError> {
            if self.fail_resize {
                return Err(DisplayError::Sdl("texture allocation failed".to_string()));
            }
            self.width = width;
            self.height = height;
            self.resizes.push((width, height));
            Ok(())
        }

        fn present(&mut self) -> Result<(), DisplayError> {
            self.presents += 1;
            Ok(())
        }
    }
}
