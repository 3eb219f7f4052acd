//! Word-level pixel operations
//!
//! The four pen modes are applied either to one pixel field or to a group of
//! fields within a word. Partial-word writes and whole-word writes share
//! `draw_pixel_group`, differing only in the mask handed to Replace.

use crate::graphics::bitmap::Bitmap;
use crate::graphics::cursor::Cursor;
use crate::graphics::depth::{BitDepth, Color, Word};
use crate::graphics::pen::PenMode;

/// Combine one pixel field at `shift` into `word`.
///
/// Erase, Invert and Blend treat the color as a bit pattern (clear, XOR, OR);
/// Replace overwrites the field.
pub fn combine_pixel(word: &mut Word, color: Color, shift: u32, depth: BitDepth, mode: PenMode) {
    let field = depth.pixel_mask() << shift;
    let data = (color & depth.pixel_mask()) << shift;
    draw_pixel_group(word, data, field, mode);
}

/// Combine `pattern` into `word`.
///
/// Replace clears the bits in `mask` and then ORs in `pattern`; `pattern` must
/// not have bits outside `mask`. The other modes ignore `mask` and apply their
/// bitwise operation across the whole word.
pub fn draw_pixel_group(word: &mut Word, pattern: Word, mask: Word, mode: PenMode) {
    match mode {
        PenMode::Erase => *word &= !pattern,
        PenMode::Invert => *word ^= pattern,
        PenMode::Blend => *word |= pattern,
        PenMode::Replace => {
            *word &= !mask;
            *word |= pattern;
        }
    }
}

impl<S: AsRef<[Word]>> Bitmap<S> {
    /// Pixel under the cursor.
    pub fn pixel_at(&self, cursor: &Cursor) -> Color {
        self.debug_check_cursor(cursor);
        (self.word(cursor.word_index()) >> cursor.shift()) & self.depth().pixel_mask()
    }

    /// Pixel under the cursor, then step the cursor right.
    pub fn next_pixel(&self, cursor: &mut Cursor) -> Color {
        let color = self.pixel_at(cursor);
        cursor.inc_x();
        color
    }
}

impl<S: AsRef<[Word]> + AsMut<[Word]>> Bitmap<S> {
    /// Combine `color` into the pixel under the cursor using the pen mode.
    pub fn draw_pixel_at(&mut self, cursor: &Cursor, color: Color) {
        let mode = self.pen().mode();
        self.combine_at(cursor, color, mode);
    }

    /// Draw the pen color under the cursor, then step the cursor right.
    pub fn draw_next_pixel(&mut self, cursor: &mut Cursor) {
        let color = self.pen().color();
        self.draw_pixel_at(cursor, color);
        cursor.inc_x();
    }

    pub(crate) fn combine_at(&mut self, cursor: &Cursor, color: Color, mode: PenMode) {
        self.debug_check_cursor(cursor);
        let depth = self.depth();
        combine_pixel(self.word_mut(cursor.word_index()), color, cursor.shift(), depth, mode);
    }
}
