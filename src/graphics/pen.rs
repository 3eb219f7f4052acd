//! Pen: current drawing attributes of a bitmap

use crate::graphics::depth::Color;
use crate::graphics::geometry::Size;

/// How a drawn value merges with the bits already in the bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PenMode {
    /// Overwrite the pixel field with the color.
    #[default]
    Replace,
    /// Clear the bits set in the color; the color acts as a bit-clear mask.
    Erase,
    /// XOR the color into the pixel.
    Invert,
    /// OR the color into the pixel.
    Blend,
}

impl PenMode {
    pub const FLAG_ERASE: u16 = 1 << 0;
    pub const FLAG_INVERT: u16 = 1 << 1;
    pub const FLAG_BLEND: u16 = 1 << 2;

    /// Decodes raw pen flags. Replace is the absence of any flag; when
    /// several flags are set, erase wins over invert, invert over blend.
    pub fn from_flags(flags: u16) -> Self {
        if flags & Self::FLAG_ERASE != 0 {
            PenMode::Erase
        } else if flags & Self::FLAG_INVERT != 0 {
            PenMode::Invert
        } else if flags & Self::FLAG_BLEND != 0 {
            PenMode::Blend
        } else {
            PenMode::Replace
        }
    }

    pub fn flags(self) -> u16 {
        match self {
            PenMode::Replace => 0,
            PenMode::Erase => Self::FLAG_ERASE,
            PenMode::Invert => Self::FLAG_INVERT,
            PenMode::Blend => Self::FLAG_BLEND,
        }
    }
}

/// Color, combine mode and thickness used by drawing calls.
///
/// Thickness only matters to shape drawing (lines); the run engine ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pen {
    color: Color,
    mode: PenMode,
    thickness: Size,
}

impl Pen {
    pub const fn new(color: Color, mode: PenMode, thickness: Size) -> Self {
        Self {
            color,
            mode,
            thickness,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn mode(&self) -> PenMode {
        self.mode
    }

    pub fn thickness(&self) -> Size {
        self.thickness
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_mode(mut self, mode: PenMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_thickness(mut self, thickness: Size) -> Self {
        self.thickness = thickness;
        self
    }
}

impl Default for Pen {
    fn default() -> Self {
        Self::new(1, PenMode::Replace, 1)
    }
}
