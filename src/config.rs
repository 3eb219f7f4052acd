use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::graphics::{BitDepth, Color, Dim, PenMode};
use crate::logging::LogLevel;
use crate::scene::Scene;

/// Options for a render run, set via config file or CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub size: Dim,
    pub depth: BitDepth,
    pub color: Color,
    pub mode: PenMode,
    pub thickness: u16,
    pub scene: Scene,
    pub format: OutputFormat,
    /// Destination file; stdout when absent (ASCII only).
    pub output: Option<PathBuf>,
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Ascii,
    Png,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            size: Dim::new(128, 64),
            depth: BitDepth::One,
            color: 1,
            mode: PenMode::Replace,
            thickness: 1,
            scene: Scene::Demo,
            format: OutputFormat::Ascii,
            output: None,
            log_level: LogLevel::Info,
        }
    }
}

/// Load options from a `key = value` file, or defaults when no file is given
pub fn load_config(path: Option<&Path>) -> Result<Options> {
    let Some(path) = path else {
        return Ok(Options::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    apply_config(&text, Options::default())
        .with_context(|| format!("Invalid config file {}", path.display()))
}

/// Apply `key = value` lines from `text` on top of `opts`
///
/// Blank lines and `#` comments are skipped. Unknown keys are logged and
/// ignored.
pub fn apply_config(text: &str, mut opts: Options) -> Result<Options> {
    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            anyhow::bail!("line {}: expected key = value", line_no);
        };
        let key = key.trim();
        apply_key(&mut opts, key, value.trim(), line_no)
            .with_context(|| format!("line {}: bad value for '{}'", line_no, key))?;
    }
    Ok(opts)
}

fn apply_key(opts: &mut Options, key: &str, value: &str, line_no: usize) -> Result<()> {
    match key {
        "size" => opts.size = parse_dimension(value)?,
        "bpp" => opts.depth = parse_depth(value)?,
        "color" => opts.color = parse_color(value)?,
        "mode" => opts.mode = parse_pen_mode(value)?,
        "thickness" => opts.thickness = parse_thickness(value)?,
        "scene" => opts.scene = parse_scene(value)?,
        "format" => opts.format = parse_format(value)?,
        "output" => opts.output = Some(PathBuf::from(value)),
        "log_level" => opts.log_level = LogLevel::parse(value)?,
        other => log::warn!("Ignoring unknown config key '{}' on line {}", other, line_no),
    }
    Ok(())
}

/// Parse a dimension string in the format "WIDTHxHEIGHT"
pub fn parse_dimension(s: &str) -> Result<Dim> {
    let parts: Vec<&str> = s.split(['x', 'X']).collect();
    if parts.len() != 2 {
        anyhow::bail!("Dimension must be in WIDTHxHEIGHT format");
    }

    let width: u16 = parts[0].trim().parse().context("Invalid width value")?;
    let height: u16 = parts[1].trim().parse().context("Invalid height value")?;

    if width == 0 || height == 0 {
        anyhow::bail!("Dimension values must be positive");
    }
    if width > i16::MAX as u16 || height > i16::MAX as u16 {
        anyhow::bail!("Dimension values must not exceed {}", i16::MAX);
    }

    Ok(Dim::new(width, height))
}

/// Parse a bit depth ("1", "2", "4", "8", optionally suffixed with "bpp")
pub fn parse_depth(s: &str) -> Result<BitDepth> {
    let digits = s.trim().trim_end_matches("bpp");
    let bits: u32 = digits.parse().context("Invalid bit depth")?;
    Ok(BitDepth::from_bits(bits)?)
}

/// Parse a color in decimal or `0x` hex
pub fn parse_color(s: &str) -> Result<Color> {
    let s = s.trim();
    let color = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => Color::from_str_radix(hex, 16).context("Invalid hex color")?,
        None => s.parse().context("Invalid color")?,
    };
    Ok(color)
}

pub fn parse_pen_mode(s: &str) -> Result<PenMode> {
    match s.to_lowercase().as_str() {
        "replace" | "set" => Ok(PenMode::Replace),
        "erase" | "clear" => Ok(PenMode::Erase),
        "invert" | "xor" => Ok(PenMode::Invert),
        "blend" | "or" => Ok(PenMode::Blend),
        _ => anyhow::bail!(
            "Invalid pen mode: {}. Valid options: replace, erase, invert, blend",
            s
        ),
    }
}

pub fn parse_scene(s: &str) -> Result<Scene> {
    Scene::from_name(&s.to_lowercase()).with_context(|| {
        format!(
            "Invalid scene: {}. Valid options: {}",
            s,
            Scene::ALL.map(Scene::name).join(", ")
        )
    })
}

pub fn parse_format(s: &str) -> Result<OutputFormat> {
    match s.to_lowercase().as_str() {
        "ascii" | "text" => Ok(OutputFormat::Ascii),
        "png" => Ok(OutputFormat::Png),
        _ => anyhow::bail!("Invalid output format: {}. Valid options: ascii, png", s),
    }
}

fn parse_thickness(s: &str) -> Result<u16> {
    let thickness: u16 = s.parse().context("Invalid thickness")?;
    if thickness == 0 {
        anyhow::bail!("Thickness must be positive");
    }
    Ok(thickness)
}
