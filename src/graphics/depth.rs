//! Pixel densities and packed-word arithmetic
//!
//! Pixels are packed least-significant first into 32-bit words. Every row
//! starts on a word boundary, so a row occupies `columns` whole words.

use crate::graphics::geometry::{Dim, Size};
use crate::graphics::BitmapError;

/// Storage unit of a bitmap.
pub type Word = u32;

/// Pixel value. Only the low `bits_per_pixel` bits are meaningful.
pub type Color = u32;

/// Number of bits in a storage word.
pub const WORD_BITS: u32 = Word::BITS;

/// Mask with the low `bits` bits set. `bits` may be a full word.
pub(crate) const fn low_mask(bits: u32) -> Word {
    if bits >= WORD_BITS {
        Word::MAX
    } else {
        (1 << bits) - 1
    }
}

/// Supported bits per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BitDepth {
    #[default]
    One = 1,
    Two = 2,
    Four = 4,
    Eight = 8,
}

impl BitDepth {
    pub const ALL: [BitDepth; 4] = [BitDepth::One, BitDepth::Two, BitDepth::Four, BitDepth::Eight];

    pub fn from_bits(bits: u32) -> Result<Self, BitmapError> {
        match bits {
            1 => Ok(BitDepth::One),
            2 => Ok(BitDepth::Two),
            4 => Ok(BitDepth::Four),
            8 => Ok(BitDepth::Eight),
            other => Err(BitmapError::InvalidBitDepth(other)),
        }
    }

    pub const fn bits(self) -> u32 {
        self as u32
    }

    pub const fn pixels_per_word(self) -> u32 {
        WORD_BITS / self.bits()
    }

    /// Mask covering one pixel field at shift 0.
    pub const fn pixel_mask(self) -> Word {
        low_mask(self.bits())
    }

    /// Largest color representable at this depth.
    pub const fn max_color(self) -> Color {
        self.pixel_mask()
    }

    /// Words per row for a bitmap `width` pixels wide.
    pub const fn columns(self, width: Size) -> usize {
        (width as usize * self.bits() as usize).div_ceil(WORD_BITS as usize)
    }

    /// Words needed to hold a bitmap of `dim` at this depth.
    pub const fn required_words(self, dim: Dim) -> usize {
        self.columns(dim.width) * dim.height as usize
    }

    /// Repeats `color` across every pixel slot of a word.
    pub fn tile(self, color: Color) -> Word {
        let field = color & self.pixel_mask();
        (0..WORD_BITS)
            .step_by(self.bits() as usize)
            .fold(0, |pattern, shift| pattern | (field << shift))
    }

    /// Rescales a color read at `self` for drawing at `target`.
    ///
    /// Linear in the bit counts with integer truncation:
    /// `color * target_bits / source_bits`. Equal depths pass through.
    pub fn rescale(self, color: Color, target: BitDepth) -> Color {
        if self == target {
            color
        } else {
            color * target.bits() / self.bits()
        }
    }
}

impl std::fmt::Display for BitDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}bpp", self.bits())
    }
}

/// Words needed to hold a bitmap of `dim` at `depth`.
pub fn required_size(dim: Dim, depth: BitDepth) -> usize {
    depth.required_words(dim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(BitDepth::One, 32, 0x1)]
    #[case(BitDepth::Two, 16, 0x3)]
    #[case(BitDepth::Four, 8, 0xF)]
    #[case(BitDepth::Eight, 4, 0xFF)]
    fn test_depth_constants(#[case] depth: BitDepth, #[case] ppw: u32, #[case] mask: Word) {
        assert_eq!(depth.pixels_per_word(), ppw);
        assert_eq!(depth.pixel_mask(), mask);
        assert_eq!(depth.max_color(), mask);
    }

    #[test]
    fn test_from_bits() {
        for depth in BitDepth::ALL {
            assert_eq!(BitDepth::from_bits(depth.bits()).unwrap(), depth);
        }
        assert_eq!(BitDepth::from_bits(3), Err(BitmapError::InvalidBitDepth(3)));
        assert!(BitDepth::from_bits(16).is_err());
    }

    #[rstest]
    #[case(BitDepth::One, 32, 1)]
    #[case(BitDepth::One, 33, 2)]
    #[case(BitDepth::Two, 17, 2)]
    #[case(BitDepth::Four, 8, 1)]
    #[case(BitDepth::Eight, 5, 2)]
    #[case(BitDepth::Eight, 0, 0)]
    fn test_columns(#[case] depth: BitDepth, #[case] width: Size, #[case] columns: usize) {
        assert_eq!(depth.columns(width), columns);
    }

    #[test]
    fn test_required_size() {
        assert_eq!(required_size(Dim::new(128, 64), BitDepth::One), 4 * 64);
        assert_eq!(required_size(Dim::new(10, 3), BitDepth::Four), 2 * 3);
    }

    #[test]
    fn test_tile() {
        assert_eq!(BitDepth::One.tile(1), 0xFFFF_FFFF);
        assert_eq!(BitDepth::Two.tile(0b01), 0x5555_5555);
        assert_eq!(BitDepth::Four.tile(0xA), 0xAAAA_AAAA);
        assert_eq!(BitDepth::Eight.tile(0x3C), 0x3C3C_3C3C);
        // bits above the pixel field are dropped
        assert_eq!(BitDepth::Four.tile(0x1F), 0xFFFF_FFFF);
    }

    #[test]
    fn test_rescale_truncates() {
        // 8bpp down to 1bpp divides by eight, rounding toward zero
        assert_eq!(BitDepth::Eight.rescale(7, BitDepth::One), 0);
        assert_eq!(BitDepth::Eight.rescale(8, BitDepth::One), 1);
        assert_eq!(BitDepth::Eight.rescale(15, BitDepth::One), 1);
        assert_eq!(BitDepth::Eight.rescale(255, BitDepth::One), 31);
        assert_eq!(BitDepth::Four.rescale(15, BitDepth::Two), 7);
        assert_eq!(BitDepth::One.rescale(1, BitDepth::Eight), 8);
        assert_eq!(BitDepth::Two.rescale(3, BitDepth::Two), 3);
    }

    #[test]
    fn test_low_mask() {
        assert_eq!(low_mask(0), 0);
        assert_eq!(low_mask(4), 0xF);
        assert_eq!(low_mask(31), 0x7FFF_FFFF);
        assert_eq!(low_mask(32), 0xFFFF_FFFF);
    }
}
