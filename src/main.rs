// Accessors kept for tests and for embedding the controller elsewhere
#![allow(dead_code)]

mod cli;
mod config;
mod display;
mod fractal;
mod geometry;
mod util;

use clap::Parser;
use sdl2::keyboard::Keycode;
use std::process::ExitCode;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::ConfigError;
use display::{Display, DisplayError, InputEvent, Screen};
use fractal::{Command, Controller, Flow, FractalError, Viewport};
use util::FpsCounter;

const WINDOW_TITLE: &str = "Sierpinski Triangle";
const FPS_REPORT_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Display(#[from] DisplayError),
    #[error(transparent)]
    Fractal(#[from] FractalError),
}

/// Keyboard and window events that mean something to the animation
fn command_for(event: &InputEvent) -> Option<Command> {
    match *event {
        InputEvent::Quit | InputEvent::KeyDown(Keycode::Escape) => Some(Command::Quit),
        InputEvent::KeyDown(Keycode::Return | Keycode::KpEnter) => Some(Command::Reset),
        InputEvent::Resized { width, height } => Some(Command::Resize { width, height }),
        InputEvent::KeyDown(_) => None,
    }
}

fn init_tracing(filter: Option<&str>) {
    let filter = filter
        .and_then(|f| EnvFilter::try_new(f).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let config = cli.resolve()?;
    if let Some(path) = &cli.save_config {
        config.save(path)?;
        info!(path = %path.display(), "config written");
        return Ok(());
    }

    let (display, texture_creator) =
        Display::open(WINDOW_TITLE, config.window_size(), config.vsync)?;
    let viewport = Viewport::new(display.width(), display.height())?;
    let mut screen = Screen::new(display, &texture_creator, config.ink())?;
    let mut controller = Controller::new(config.animation, viewport);

    info!(
        width = viewport.width(),
        height = viewport.height(),
        vsync = config.vsync,
        max_depth = config.animation.max_depth,
        fill_style = ?config.animation.fill_style,
        "starting"
    );
    info!("controls: Enter = restart, Escape = quit, resize window = restart at new size");

    let mut fps_counter = FpsCounter::new(120);

    'main: loop {
        fps_counter.tick();

        let commands: Vec<Command> = screen
            .poll_events()
            .iter()
            .filter_map(command_for)
            .collect();

        for command in commands {
            if controller.handle(&mut screen, command)? == Flow::Quit {
                info!("quit requested");
                break 'main;
            }
        }

        controller.tick(&mut screen)?;

        if fps_counter.report_due(FPS_REPORT_INTERVAL) {
            let (min_fps, max_fps) = fps_counter.min_max_fps();
            debug!(
                avg = fps_counter.avg_fps() as u32,
                min = min_fps as u32,
                max = max_fps as u32,
                depth = controller.depth(),
                phase = ?controller.phase(),
                "frame rate"
            );
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log.as_deref());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "fatal");
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(command_for(&InputEvent::Quit), Some(Command::Quit));
        assert_eq!(
            command_for(&InputEvent::KeyDown(Keycode::Escape)),
            Some(Command::Quit)
        );
        assert_eq!(
            command_for(&InputEvent::KeyDown(Keycode::Return)),
            Some(Command::Reset)
        );
        assert_eq!(command_for(&InputEvent::KeyDown(Keycode::Space)), None);
        assert_eq!(
            command_for(&InputEvent::Resized {
                width: 800,
                height: 600
            }),
            Some(Command::Resize {
                width: 800,
                height: 600
            })
        );
    }
}
