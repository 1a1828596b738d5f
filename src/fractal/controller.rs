use tracing::{debug, info, warn};

use super::{Compositor, FractalError, Frame, Interpolator, LevelScheduler, Settings};
use crate::display::Canvas;
use crate::geometry::Triangle;

/// Drawable area in pixels, both sides in `1..=MAX_SIDE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    /// Fallback used while the window reports a degenerate size
    pub const MIN: Self = Self {
        width: 1,
        height: 1,
    };

    /// Largest side accepted; matches the usual GPU texture limit
    pub const MAX_SIDE: u32 = 16_384;

    pub fn new(width: u32, height: u32) -> Result<Self, FractalError> {
        let valid = 1..=Self::MAX_SIDE;
        if !valid.contains(&width) || !valid.contains(&height) {
            return Err(FractalError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Initial triangle for this viewport
    pub fn seed(&self, margin: f32) -> Triangle {
        Triangle::equilateral_in(self.width as f32, self.height as f32, margin)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Edges are growing; a level completes when t passes 1
    Animating,
    /// Terminal: only the captured background is re-presented
    MaxDepthReached,
    /// Viewport is degenerate or oversized; frames draw nothing until a valid resize
    Suspended,
}

/// Requests from the keyboard and the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Reset,
    Quit,
    Resize { width: u32, height: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Glues scheduler, interpolator and compositor into a per-frame cycle
#[derive(Debug)]
pub struct Controller {
    settings: Settings,
    viewport: Viewport,
    suspended: bool,
    scheduler: LevelScheduler,
    interpolator: Interpolator,
    compositor: Compositor,
    phase: Phase,
}

impl Controller {
    pub fn new(settings: Settings, viewport: Viewport) -> Self {
        let seed = viewport.seed(settings.min_margin);
        let mut interpolator = Interpolator::new(settings.animation_step, settings.fill_style);
        interpolator.restart(seed);

        Self {
            settings,
            viewport,
            suspended: false,
            scheduler: LevelScheduler::new(seed),
            interpolator,
            compositor: Compositor::new(viewport.width(), viewport.height()),
            phase: Phase::Animating,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scheduler(&self) -> &LevelScheduler {
        &self.scheduler
    }

    pub fn interpolator(&self) -> &Interpolator {
        &self.interpolator
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn depth(&self) -> u32 {
        self.scheduler.depth()
    }

    /// Run exactly one frame: backdrop, then the animation overlay, then present.
    ///
    /// When t passes 1 the batch is rasterized, the next level is scheduled
    /// and the result is captured as the new backdrop, all within this frame.
    pub fn tick(&mut self, canvas: &mut impl Canvas) -> Result<Phase, FractalError> {
        match self.phase {
            Phase::Suspended => return Ok(self.phase),
            Phase::MaxDepthReached => self.compositor.draw_background(canvas),
            Phase::Animating => {
                self.compositor.draw_background(canvas);
                if let Frame::Complete { rasterized } = self.interpolator.advance(canvas) {
                    self.complete_step(canvas, rasterized)?;
                }
            },
        }

        canvas.present()?;
        Ok(self.phase)
    }

    fn complete_step(
        &mut self,
        canvas: &mut impl Canvas,
        rasterized: usize,
    ) -> Result<(), FractalError> {
        let hole = self.interpolator.hole_paint();
        self.interpolator.batch_mut().set_paint(hole);
        let report = self.scheduler.begin_step(self.interpolator.batch_mut())?;
        self.compositor.capture(&*canvas);

        debug!(
            depth = report.depth,
            rasterized,
            leaves = self.scheduler.queue_len(),
            batch = self.interpolator.batch().len(),
            "level complete"
        );

        if report.depth > self.settings.max_depth {
            self.interpolator.discard();
            self.phase = Phase::MaxDepthReached;
            info!(
                depth = report.depth,
                max_depth = self.settings.max_depth,
                "maximum depth reached, holding final image"
            );
        }
        Ok(())
    }

    pub fn handle(
        &mut self,
        canvas: &mut impl Canvas,
        command: Command,
    ) -> Result<Flow, FractalError> {
        match command {
            Command::Reset => self.reset(canvas),
            Command::Resize { width, height } => self.resize(canvas, width, height)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Back to a single seed triangle at depth 0 on a black background
    pub fn reset(&mut self, canvas: &mut impl Canvas) {
        canvas.clear();
        let seed = self.viewport.seed(self.settings.min_margin);
        self.scheduler.reseed(seed);
        self.interpolator.restart(seed);
        self.compositor
            .reset(self.viewport.width(), self.viewport.height());
        self.phase = if self.suspended {
            Phase::Suspended
        } else {
            Phase::Animating
        };
        info!(
            width = self.viewport.width(),
            height = self.viewport.height(),
            "animation reset"
        );
    }

    /// Adopt a new viewport. Captured pixels are meaningless at another
    /// resolution, so this always resets.
    pub fn resize(
        &mut self,
        canvas: &mut impl Canvas,
        width: u32,
        height: u32,
    ) -> Result<(), FractalError> {
        let (viewport, suspended) = match Viewport::new(width, height) {
            Ok(viewport) => (viewport, false),
            Err(err) => {
                warn!(%err, "clamping viewport to 1x1 until a valid resize arrives");
                (Viewport::MIN, true)
            },
        };
        canvas.resize(viewport.width(), viewport.height())?;
        self.viewport = viewport;
        self.suspended = suspended;
        self.reset(canvas);
        Ok(())
    }
}
