//! Display sinks
//!
//! A `Display` receives a finished bitmap and puts it somewhere: a terminal,
//! an image file, or an in-memory frame list. Panel drivers implement the same
//! trait over their own transport.

use std::convert::Infallible;
use std::io::Write;
use std::path::{Path, PathBuf};

use image::{GrayImage, Luma};

use crate::graphics::bitmap::Bitmap;
use crate::graphics::depth::{BitDepth, Color, Word};
use crate::graphics::geometry::{Coord, Point};

/// "Show current buffer" hook.
pub trait Display {
    type Error;

    fn show<S: AsRef<[Word]>>(&mut self, bmap: &Bitmap<S>) -> Result<(), Self::Error>;
}

/// Gray ramp, darkest first.
const RAMP: &[u8] = b".:-=+*#%@";

fn ramp_char(color: Color, depth: BitDepth) -> char {
    let index = color as usize * (RAMP.len() - 1) / depth.max_color() as usize;
    RAMP[index] as char
}

fn gray_level(color: Color, depth: BitDepth) -> u8 {
    (color * 255 / depth.max_color()) as u8
}

/// Renders one character per pixel, one line per row.
#[derive(Debug)]
pub struct AsciiDisplay<W> {
    out: W,
}

impl<W: Write> AsciiDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Display for AsciiDisplay<W> {
    type Error = std::io::Error;

    fn show<S: AsRef<[Word]>>(&mut self, bmap: &Bitmap<S>) -> Result<(), Self::Error> {
        let depth = bmap.depth();
        let mut line = String::with_capacity(usize::from(bmap.width()) + 1);
        for y in 0..bmap.height() as Coord {
            line.clear();
            let mut cursor = bmap.cursor_unchecked(Point::new(0, y));
            for _ in 0..bmap.width() {
                line.push(ramp_char(bmap.next_pixel(&mut cursor), depth));
            }
            line.push('\n');
            self.out.write_all(line.as_bytes())?;
        }
        self.out.flush()
    }
}

/// Writes each shown bitmap to an 8-bit grayscale image file.
///
/// The format follows the file extension.
#[derive(Debug, Clone)]
pub struct PngDisplay {
    path: PathBuf,
}

impl PngDisplay {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Display for PngDisplay {
    type Error = image::ImageError;

    fn show<S: AsRef<[Word]>>(&mut self, bmap: &Bitmap<S>) -> Result<(), Self::Error> {
        log::debug!("Writing {}x{} frame to {}", bmap.width(), bmap.height(), self.path.display());
        to_gray_image(bmap).save(&self.path)
    }
}

/// Collects copies of the raw packed words of every shown bitmap.
#[derive(Debug, Default, Clone)]
pub struct FrameCapture {
    frames: Vec<Vec<Word>>,
}

impl FrameCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Vec<Word>] {
        &self.frames
    }

    pub fn last(&self) -> Option<&[Word]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl Display for FrameCapture {
    type Error = Infallible;

    fn show<S: AsRef<[Word]>>(&mut self, bmap: &Bitmap<S>) -> Result<(), Self::Error> {
        self.frames.push(bmap.words().to_vec());
        Ok(())
    }
}

/// Expand a bitmap to 8-bit gray, scaling each color to the full range.
pub fn to_gray_image<S: AsRef<[Word]>>(bmap: &Bitmap<S>) -> GrayImage {
    let depth = bmap.depth();
    GrayImage::from_fn(u32::from(bmap.width()), u32::from(bmap.height()), |x, y| {
        let cursor = bmap.cursor_unchecked(Point::new(x as Coord, y as Coord));
        Luma([gray_level(bmap.pixel_at(&cursor), depth)])
    })
}
