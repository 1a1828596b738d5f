mod canvas;
mod pixel_buffer;

pub use canvas::{Canvas, Framebuffer, Paint};
pub use pixel_buffer::PixelBuffer;

use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas as SdlCanvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;
use thiserror::Error;

use crate::geometry::Vec2;

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;

#[derive(Debug, Error)]
pub enum DisplayError {
    /// SDL reports its failures as plain strings
    #[error("SDL: {0}")]
    Sdl(String),
}

impl From<String> for DisplayError {
    fn from(message: String) -> Self {
        Self::Sdl(message)
    }
}

/// How big the window should be when it opens
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowSize {
    Fixed(u32, u32),
    /// Fraction of the desktop's smaller side, as a square
    DesktopFraction(f32),
}

pub struct Display {
    canvas: SdlCanvas<Window>,
    event_pump: EventPump,
    width: u32,
    height: u32,
}

pub struct RenderTarget<'a> {
    texture: Texture<'a>,
    width: u32,
    height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Keycode),
    Resized { width: u32, height: u32 },
}

impl Display {
    /// Open a resizable window. vsync=true locks presentation to the monitor refresh.
    pub fn open(
        title: &str,
        size: WindowSize,
        vsync: bool,
    ) -> Result<(Self, TextureCreator<WindowContext>), DisplayError> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let (width, height) = match size {
            WindowSize::Fixed(w, h) => (w, h),
            WindowSize::DesktopFraction(fraction) => {
                let mode = video_subsystem.desktop_display_mode(0)?;
                let side = (mode.w.min(mode.h).max(1) as f32 * fraction).max(1.0) as u32;
                (side, side)
            },
        };

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder.build().map_err(|e| e.to_string())?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump()?;

        Ok((
            Self {
                canvas,
                event_pump,
                width,
                height,
            },
            texture_creator,
        ))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn present(
        &mut self,
        target: &mut RenderTarget,
        buffer: &PixelBuffer,
    ) -> Result<(), DisplayError> {
        if buffer.width() != target.width || buffer.height() != target.height {
            // Mid-resize; the next frame will match
            return Ok(());
        }
        target
            .texture
            .update(None, buffer.as_bytes(), buffer.width() as usize * 4)
            .map_err(|e| e.to_string())?;

        self.canvas.copy(&target.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(k), ..
                } => events.push(InputEvent::KeyDown(k)),
                Event::Window {
                    win_event: WindowEvent::SizeChanged(w, h),
                    ..
                } => {
                    let (width, height) = (w.max(0) as u32, h.max(0) as u32);
                    self.width = width;
                    self.height = height;
                    events.push(InputEvent::Resized { width, height });
                },
                _ => {},
            }
        }

        events
    }
}

impl<'a> RenderTarget<'a> {
    /// Create a streaming texture matching the framebuffer resolution
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self, DisplayError> {
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGBA8888, width, height)
            .map_err(|e| e.to_string())?;
        Ok(Self {
            texture,
            width,
            height,
        })
    }
}

// ============================================================================
// Screen
// ============================================================================

/// The window as a [`Canvas`]: software framebuffer + streaming texture
pub struct Screen<'a> {
    display: Display,
    texture_creator: &'a TextureCreator<WindowContext>,
    target: RenderTarget<'a>,
    frame: Framebuffer,
}

impl<'a> Screen<'a> {
    pub fn new(
        display: Display,
        texture_creator: &'a TextureCreator<WindowContext>,
        ink: (u8, u8, u8),
    ) -> Result<Self, DisplayError> {
        let (width, height) = (display.width().max(1), display.height().max(1));
        let target = RenderTarget::with_size(texture_creator, width, height)?;
        Ok(Self {
            display,
            texture_creator,
            target,
            frame: Framebuffer::new(width, height, ink),
        })
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        self.display.poll_events()
    }
}

impl Canvas for Screen<'_> {
    fn draw_line(&mut self, p1: Vec2, p2: Vec2, paint: Paint) {
        self.frame.draw_line(p1, p2, paint);
    }

    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, paint: Paint) {
        self.frame.fill_triangle(a, b, c, paint);
    }

    fn blit(&mut self, image: &PixelBuffer) {
        self.frame.blit(image);
    }

    fn capture(&self, into: &mut PixelBuffer) {
        self.frame.capture(into);
    }

    fn clear(&mut self) {
        self.frame.clear();
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), DisplayError> {
        self.target = RenderTarget::with_size(self.texture_creator, width, height)?;
        self.frame.resize(width, height)
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.display.present(&mut self.target, self.frame.buffer())
    }
}
