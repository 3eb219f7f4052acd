//! bitgfx: bit-packed 1/2/4/8 bpp bitmap graphics
//!
//! The engine lives in [`graphics`]; the remaining modules make up the
//! command-line renderer.

pub mod cli;
pub mod config;
pub mod graphics;
pub mod logging;
pub mod scene;

pub use cli::Cli;
pub use config::Options;
pub use graphics::{BitDepth, Bitmap, BitmapError, Cursor, Pen, PenMode};
pub use logging::LogLevel;
