//! Pixel cursor
//!
//! A `Cursor` addresses one pixel of a bitmap as a (word index, bit shift)
//! pair. It carries the bitmap's depth and row stride so it can move on its
//! own, but holds no reference to the pixels; every read or write goes through
//! the `Bitmap` it was created from.
//!
//! Moving horizontally crosses word boundaries transparently but never wraps
//! rows. Moving vertically steps a whole row of words and keeps the shift,
//! since every row starts word-aligned.

use crate::graphics::depth::{BitDepth, WORD_BITS};

/// Transient pixel address inside a bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    depth: BitDepth,
    columns: usize,
    word: usize,
    shift: u32,
}

impl Cursor {
    /// Cursor for pixel column `x` of the row containing word `word`.
    pub(crate) fn at(depth: BitDepth, columns: usize, word: usize, x: usize) -> Self {
        let shift = (x % depth.pixels_per_word() as usize) as u32 * depth.bits();
        Self {
            depth,
            columns,
            word,
            shift,
        }
    }

    pub fn depth(&self) -> BitDepth {
        self.depth
    }

    /// Row stride, in words, of the bitmap this cursor walks.
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn word_index(&self) -> usize {
        self.word
    }

    /// Bit offset of the current pixel within its word.
    pub fn shift(&self) -> u32 {
        self.shift
    }

    pub fn is_aligned(&self) -> bool {
        self.shift == 0
    }

    pub fn inc_x(&mut self) {
        self.shift += self.depth.bits();
        if self.shift == WORD_BITS {
            self.word += 1;
            self.shift = 0;
        }
    }

    pub fn dec_x(&mut self) {
        if self.shift == 0 {
            self.word -= 1;
            self.shift = WORD_BITS - self.depth.bits();
        } else {
            self.shift -= self.depth.bits();
        }
    }

    pub fn inc_y(&mut self) {
        self.word += self.columns;
    }

    pub fn dec_y(&mut self) {
        self.word -= self.columns;
    }

    /// Move right by `pixels` in one step.
    pub fn advance_x(&mut self, pixels: usize) {
        let position = self.bit_position() + pixels * self.depth.bits() as usize;
        self.set_bit_position(position);
    }

    /// Move left by `pixels` in one step.
    pub fn retreat_x(&mut self, pixels: usize) {
        let position = self.bit_position() - pixels * self.depth.bits() as usize;
        self.set_bit_position(position);
    }

    /// Step to the start of the next word.
    pub(crate) fn next_word(&mut self) {
        self.word += 1;
        self.shift = 0;
    }

    pub(crate) fn advanced(mut self, pixels: usize) -> Self {
        self.advance_x(pixels);
        self
    }

    pub(crate) fn retreated(mut self, pixels: usize) -> Self {
        self.retreat_x(pixels);
        self
    }

    /// Absolute bit offset from the start of storage.
    pub(crate) fn bit_position(&self) -> usize {
        self.word * WORD_BITS as usize + self.shift as usize
    }

    fn set_bit_position(&mut self, position: usize) {
        self.word = position / WORD_BITS as usize;
        self.shift = (position % WORD_BITS as usize) as u32;
    }
}
