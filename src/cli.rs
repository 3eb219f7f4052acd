use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::{
    parse_color, parse_depth, parse_dimension, parse_format, parse_pen_mode, parse_scene, Options,
};
use crate::logging::LogLevel;

/// Render test scenes into a bit-packed bitmap
#[derive(Parser, Debug, Default)]
#[command(name = "bitgfx")]
#[command(version)]
#[command(about = "Render scenes into a bit-packed 1/2/4/8 bpp bitmap", long_about = None)]
pub struct Cli {
    /// Configuration file with key = value lines
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Bitmap size (e.g., 128x64)
    #[arg(short, long, value_name = "WIDTHxHEIGHT")]
    pub size: Option<String>,

    /// Bits per pixel (1, 2, 4, 8)
    #[arg(short, long, value_name = "BPP")]
    pub bpp: Option<String>,

    /// Pen color, decimal or 0x hex
    #[arg(long, value_name = "COLOR")]
    pub color: Option<String>,

    /// Pen mode (replace, erase, invert, blend)
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Line thickness in pixels
    #[arg(short, long, value_name = "PIXELS")]
    pub thickness: Option<u16>,

    /// Scene to render (demo, checker, blit)
    #[arg(long, value_name = "SCENE")]
    pub scene: Option<String>,

    /// Output format (ascii, png)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Output file; ASCII goes to stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Log level (nothing, error, warning, info, debug, all)
    #[arg(short, long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Shorthand for --log-level debug
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Merge CLI arguments into the options struct
    pub fn merge_into_options(&self, mut opts: Options) -> Result<Options> {
        if let Some(ref size) = self.size {
            opts.size = parse_dimension(size).context("Invalid size")?;
        }

        if let Some(ref bpp) = self.bpp {
            opts.depth = parse_depth(bpp)?;
        }

        if let Some(ref color) = self.color {
            opts.color = parse_color(color)?;
        }

        if let Some(ref mode) = self.mode {
            opts.mode = parse_pen_mode(mode)?;
        }

        if let Some(thickness) = self.thickness {
            if thickness == 0 {
                anyhow::bail!("Thickness must be positive");
            }
            opts.thickness = thickness;
        }

        if let Some(ref scene) = self.scene {
            opts.scene = parse_scene(scene)?;
        }

        if let Some(ref format) = self.format {
            opts.format = parse_format(format)?;
        }

        if let Some(ref output) = self.output {
            opts.output = Some(output.clone());
        }

        if let Some(ref level) = self.log_level {
            opts.log_level = LogLevel::parse(level)?;
        }
        if self.verbose {
            opts.log_level = LogLevel::Debug;
        }

        Ok(opts)
    }
}
