//! Command line flags
//!
//! Flags override the JSON config file, which overrides the defaults.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, ConfigError};
use crate::fractal::FillStyle;

#[derive(Debug, Parser)]
#[command(name = "sierpinski", version)]
#[command(about = "Animate the construction of a Sierpinski triangle")]
pub struct Cli {
    /// JSON config file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Window width (default: share of the desktop)
    #[arg(long, short = 'w')]
    pub width: Option<u32>,

    /// Window height (default: share of the desktop)
    #[arg(long, short = 'H')]
    pub height: Option<u32>,

    /// Window resolution as WxH, e.g. 1024x768
    #[arg(long, short = 'r', value_parser = parse_resolution, conflicts_with_all = ["width", "height"])]
    pub resolution: Option<(u32, u32)>,

    /// Recursion depth at which the animation stops
    #[arg(long, short = 'd')]
    pub max_depth: Option<u32>,

    /// Pixels kept free around the initial triangle
    #[arg(long)]
    pub margin: Option<f32>,

    /// Animation parameter increment per frame
    #[arg(long)]
    pub step: Option<f32>,

    /// Draw triangle outlines instead of filled triangles
    #[arg(long)]
    pub outline: bool,

    /// Disable VSync for uncapped framerate
    #[arg(long)]
    pub no_vsync: bool,

    /// Write the merged configuration to this JSON file and exit
    #[arg(long)]
    pub save_config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "sierpinski=trace" (falls back to RUST_LOG)
    #[arg(long)]
    pub log: Option<String>,
}

/// Parse WxH format (e.g., 1920x1080)
fn parse_resolution(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{}'", value))?;
    let w = w.trim().parse::<u32>().map_err(|e| format!("bad width: {}", e))?;
    let h = h.trim().parse::<u32>().map_err(|e| format!("bad height: {}", e))?;
    Ok((w, h))
}

impl Cli {
    /// Merge file config (if any) with the flags and validate the result
    pub fn resolve(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply(&self, config: &mut Config) {
        if let Some((w, h)) = self.resolution {
            config.width = Some(w);
            config.height = Some(h);
        }
        if let Some(w) = self.width {
            config.width = Some(w);
        }
        if let Some(h) = self.height {
            config.height = Some(h);
        }
        if let Some(depth) = self.max_depth {
            config.animation.max_depth = depth;
        }
        if let Some(margin) = self.margin {
            config.animation.min_margin = margin;
        }
        if let Some(step) = self.step {
            config.animation.animation_step = step;
        }
        if self.outline {
            config.animation.fill_style = FillStyle::Outline;
        }
        if self.no_vsync {
            config.vsync = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::WindowSize;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sierpinski").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_flags_gives_defaults() {
        let config = parse(&[]).resolve().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_flags_override() {
        let config = parse(&[
            "--resolution",
            "800x600",
            "--max-depth",
            "5",
            "--margin",
            "10",
            "--step",
            "0.05",
            "--outline",
            "--no-vsync",
        ])
        .resolve()
        .unwrap();
        assert_eq!(config.window_size(), WindowSize::Fixed(800, 600));
        assert_eq!(config.animation.max_depth, 5);
        assert_eq!(config.animation.min_margin, 10.0);
        assert_eq!(config.animation.animation_step, 0.05);
        assert_eq!(config.animation.fill_style, FillStyle::Outline);
        assert!(!config.vsync);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(parse(&["--max-depth", "40"]).resolve().is_err());
        assert!(parse(&["--step", "0"]).resolve().is_err());
    }

    #[test]
    fn test_resolution_parsing() {
        assert_eq!(parse_resolution("1920x1080"), Ok((1920, 1080)));
        assert_eq!(parse_resolution("640X480"), Ok((640, 480)));
        assert!(parse_resolution("1920").is_err());
        assert!(parse_resolution("axb").is_err());
        assert!(Cli::try_parse_from(["sierpinski", "-r", "800x600", "-w", "100"]).is_err());
    }
}
