//! Bit-packed bitmap engine
//!
//! Key concepts:
//! - `Bitmap`: row-major packed pixels at 1, 2, 4 or 8 bits per pixel
//! - `Cursor`: (word, shift) address of one pixel, built by its bitmap
//! - `Pen`: color, combine mode and thickness used by drawing calls
//! - Run engine: horizontal runs split into prefix, whole words and suffix
//! - `Api`: per-depth table of function pointers for runtime dispatch

pub mod api;
pub mod bitmap;
pub mod cursor;
pub mod depth;
pub mod display;
pub mod draw;
pub mod geometry;
pub mod pen;
pub mod pixel;
pub mod run;
pub mod transform;

pub use api::{api, Api, ApiBitmap, API_VERSION};
pub use bitmap::{Bitmap, BitmapError};
pub use cursor::Cursor;
pub use depth::{required_size, BitDepth, Color, Word, WORD_BITS};
pub use display::{to_gray_image, AsciiDisplay, Display, FrameCapture, PngDisplay};
pub use geometry::{Bounds, Coord, Dim, Point, Size};
pub use pen::{Pen, PenMode};
pub use pixel::{combine_pixel, draw_pixel_group};
pub use run::RunSplit;
