//! Boundary-aware run engine
//!
//! Every horizontal run is split once into three regions relative to the
//! 32-bit word grid:
//!
//! 1. **prefix**: pixels from the start up to the next word boundary
//!    (none when the run already starts aligned),
//! 2. **aligned**: whole words,
//! 3. **suffix**: leftover pixels after the last whole word.
//!
//! Aligned words are processed a word at a time. Prefix and suffix are
//! partial-word writes through the same masked word primitive, or single
//! pixels where source and destination alignment differ.
//!
//! None of these operations check that the run stays inside the bitmap
//! beyond `debug_assert!`s and slice indexing; callers validate points and
//! widths up front.

use crate::graphics::bitmap::Bitmap;
use crate::graphics::cursor::Cursor;
use crate::graphics::depth::{low_mask, BitDepth, Word, WORD_BITS};
use crate::graphics::pen::PenMode;
use crate::graphics::pixel::draw_pixel_group;

/// Decomposition of a run into prefix, aligned words and suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSplit {
    /// Pixels before the first word boundary.
    pub prefix: usize,
    /// Whole words after the prefix.
    pub aligned: usize,
    /// Pixels after the last whole word.
    pub suffix: usize,
}

impl RunSplit {
    /// Split a run of `width` pixels starting at bit `shift` of a word.
    pub fn new(depth: BitDepth, shift: u32, width: usize) -> Self {
        let per_word = depth.pixels_per_word() as usize;
        let to_boundary = ((WORD_BITS - shift) / depth.bits()) as usize % per_word;
        let prefix = to_boundary.min(width);
        let aligned = (width - prefix) / per_word;
        let suffix = width - prefix - aligned * per_word;
        Self {
            prefix,
            aligned,
            suffix,
        }
    }

    /// Pixels covered by the split.
    pub fn width(&self, depth: BitDepth) -> usize {
        self.prefix + self.aligned * depth.pixels_per_word() as usize + self.suffix
    }

    /// The regions of a run starting at `start`, lowest address first.
    fn chunks(self, start: Cursor) -> impl DoubleEndedIterator<Item = Chunk> {
        let per_word = start.depth().pixels_per_word() as usize;
        let first_aligned = start.word_index() + usize::from(self.prefix > 0);

        let prefix = (self.prefix > 0).then(|| Chunk {
            offset: 0,
            word: start.word_index(),
            shift: start.shift(),
            pixels: self.prefix,
        });
        let aligned = (0..self.aligned).map(move |i| Chunk {
            offset: self.prefix + i * per_word,
            word: first_aligned + i,
            shift: 0,
            pixels: per_word,
        });
        let suffix = (self.suffix > 0).then(|| Chunk {
            offset: self.prefix + self.aligned * per_word,
            word: first_aligned + self.aligned,
            shift: 0,
            pixels: self.suffix,
        });

        prefix.into_iter().chain(aligned).chain(suffix)
    }
}

/// Contiguous pixels of a run that share one source word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Chunk {
    /// Pixels from the start of the run.
    offset: usize,
    word: usize,
    shift: u32,
    pixels: usize,
}

impl<S: AsRef<[Word]>> Bitmap<S> {
    pub(crate) fn debug_check_run(&self, cursor: &Cursor, width: usize) {
        self.debug_check_cursor(cursor);
        debug_assert!(
            cursor.bit_position() + width * self.bits_per_pixel() as usize
                <= self.words().len() * WORD_BITS as usize,
            "run of {} pixels overruns bitmap storage",
            width
        );
    }
}

impl<S: AsRef<[Word]> + AsMut<[Word]>> Bitmap<S> {
    /// Draw `width` pixels of the pen color and leave the cursor after them.
    pub fn draw_hline(&mut self, cursor: &mut Cursor, width: usize) {
        let pen = self.pen();
        let pattern = self.depth().tile(pen.color());
        self.pattern_run(cursor, width, pattern, pen.mode());
    }

    /// Draw `width` pixels taken from a word-sized `pattern`.
    ///
    /// Each pixel receives the field of `pattern` at its own bit position, so
    /// the pattern stays anchored to the word grid. Uses the pen mode.
    pub fn draw_pattern(&mut self, cursor: &mut Cursor, width: usize, pattern: Word) {
        let mode = self.pen().mode();
        self.pattern_run(cursor, width, pattern, mode);
    }

    /// Bitwise-invert `width` pixels regardless of the pen.
    pub fn invert_hline(&mut self, cursor: &mut Cursor, width: usize) {
        self.pattern_run(cursor, width, Word::MAX, PenMode::Invert);
    }

    /// Zero `width` pixels regardless of the pen.
    pub fn clear_hline(&mut self, cursor: &mut Cursor, width: usize) {
        self.pattern_run(cursor, width, Word::MAX, PenMode::Erase);
    }

    /// Copy `width` pixels from `src` at `src_cursor` to `dest` in this bitmap,
    /// combining with the pen mode, and leave `dest` after the run.
    ///
    /// Equal depths copy whole words wherever the source is aligned. Mixed
    /// depths copy pixel by pixel with the color rescaled.
    pub fn draw_cursor<T: AsRef<[Word]>>(
        &mut self,
        dest: &mut Cursor,
        src: &Bitmap<T>,
        src_cursor: &Cursor,
        width: usize,
    ) {
        let mode = self.pen().mode();
        self.copy_run(dest, src, src_cursor, width, mode);
    }

    /// Move `width` pixels right by `distance` within the row.
    ///
    /// Vacated pixels are zeroed. The cursor ends at the new start of the run.
    pub fn shift_right(&mut self, cursor: &mut Cursor, width: usize, distance: usize) {
        self.debug_check_run(cursor, width + distance);
        let dest = cursor.advanced(distance);
        self.move_run_descending(*cursor, dest, width);
        *cursor = dest;
    }

    /// Move `width` pixels left by `distance` within the row.
    ///
    /// Vacated pixels are zeroed. The cursor ends at the new start of the run.
    pub fn shift_left(&mut self, cursor: &mut Cursor, width: usize, distance: usize) {
        let dest = cursor.retreated(distance);
        self.debug_check_run(&dest, width + distance);
        self.move_run_ascending(*cursor, dest, width);
        *cursor = dest;
    }

    pub(crate) fn pattern_run(
        &mut self,
        cursor: &mut Cursor,
        width: usize,
        pattern: Word,
        mode: PenMode,
    ) {
        self.debug_check_run(cursor, width);
        let split = RunSplit::new(self.depth(), cursor.shift(), width);

        if split.prefix > 0 {
            self.pattern_partial(cursor, split.prefix, pattern, mode);
        }
        for _ in 0..split.aligned {
            draw_pixel_group(self.word_mut(cursor.word_index()), pattern, Word::MAX, mode);
            cursor.next_word();
        }
        if split.suffix > 0 {
            self.pattern_partial(cursor, split.suffix, pattern, mode);
        }
    }

    /// Pattern write of `pixels` pixels that fit in the cursor's word.
    fn pattern_partial(&mut self, cursor: &mut Cursor, pixels: usize, pattern: Word, mode: PenMode) {
        let mask = low_mask(pixels as u32 * self.bits_per_pixel()) << cursor.shift();
        draw_pixel_group(self.word_mut(cursor.word_index()), pattern & mask, mask, mode);
        cursor.advance_x(pixels);
    }

    pub(crate) fn copy_run<T: AsRef<[Word]>>(
        &mut self,
        dest: &mut Cursor,
        src: &Bitmap<T>,
        src_cursor: &Cursor,
        width: usize,
        mode: PenMode,
    ) {
        self.debug_check_run(dest, width);
        src.debug_check_run(src_cursor, width);
        let mut from = *src_cursor;

        if src.depth() != self.depth() {
            for _ in 0..width {
                self.copy_pixel(dest, src, &mut from, mode);
            }
            return;
        }

        let per_word = self.depth().pixels_per_word() as usize;
        let split = RunSplit::new(src.depth(), from.shift(), width);

        for _ in 0..split.prefix {
            self.copy_pixel(dest, src, &mut from, mode);
        }

        for _ in 0..split.aligned {
            let value = src.word(from.word_index());
            let shift = dest.shift();
            draw_pixel_group(
                self.word_mut(dest.word_index()),
                value << shift,
                Word::MAX << shift,
                mode,
            );
            if shift != 0 {
                draw_pixel_group(
                    self.word_mut(dest.word_index() + 1),
                    value >> (WORD_BITS - shift),
                    low_mask(shift),
                    mode,
                );
            }
            dest.advance_x(per_word);
            from.next_word();
        }

        for _ in 0..split.suffix {
            self.copy_pixel(dest, src, &mut from, mode);
        }
    }

    fn copy_pixel<T: AsRef<[Word]>>(
        &mut self,
        dest: &mut Cursor,
        src: &Bitmap<T>,
        from: &mut Cursor,
        mode: PenMode,
    ) {
        let color = src.depth().rescale(src.next_pixel(from), self.depth());
        self.combine_at(dest, color, mode);
        dest.inc_x();
    }

    /// Move a run to `dest` when `dest` is at or after `src`: the highest
    /// addressed region goes first so no source bits are overwritten unread.
    pub(crate) fn move_run_descending(&mut self, src: Cursor, dest: Cursor, width: usize) {
        let split = RunSplit::new(self.depth(), src.shift(), width);
        for chunk in split.chunks(src).rev() {
            self.move_chunk(chunk, dest);
        }
    }

    /// Move a run to `dest` when `dest` is at or before `src` (or does not
    /// overlap it): the lowest addressed region goes first.
    pub(crate) fn move_run_ascending(&mut self, src: Cursor, dest: Cursor, width: usize) {
        let split = RunSplit::new(self.depth(), src.shift(), width);
        for chunk in split.chunks(src) {
            self.move_chunk(chunk, dest);
        }
    }

    /// Lift a chunk out of its word (zeroing it) and drop it at its place
    /// relative to `dest`.
    fn move_chunk(&mut self, chunk: Chunk, dest: Cursor) {
        let mask = low_mask(chunk.pixels as u32 * self.bits_per_pixel());
        let word = self.word_mut(chunk.word);
        let value = (*word >> chunk.shift) & mask;
        *word &= !(mask << chunk.shift);
        self.put_bits(dest.advanced(chunk.offset), value, mask);
    }

    /// Write the low-aligned field `value`/`mask` at the cursor, spilling into
    /// the next word when it crosses a boundary.
    fn put_bits(&mut self, at: Cursor, value: Word, mask: Word) {
        let shift = at.shift();
        let word = self.word_mut(at.word_index());
        *word = (*word & !(mask << shift)) | (value << shift);

        if shift > 0 {
            let spill = mask >> (WORD_BITS - shift);
            if spill != 0 {
                let next = self.word_mut(at.word_index() + 1);
                *next = (*next & !spill) | (value >> (WORD_BITS - shift));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{Color, Dim, Point};
    use rstest::rstest;

    fn row_pixels<S: AsRef<[Word]>>(bmap: &Bitmap<S>, y: i16) -> Vec<Color> {
        let mut cursor = bmap.cursor(Point::new(0, y)).unwrap();
        (0..bmap.width()).map(|_| bmap.next_pixel(&mut cursor)).collect()
    }

    fn noisy(dim: Dim, depth: BitDepth) -> Bitmap {
        let mut bmap = Bitmap::new(dim, depth).unwrap();
        let mut seed: u32 = 0x9E37_79B9;
        for word in bmap.words_mut() {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            *word = seed;
        }
        bmap
    }

    #[rstest]
    #[case(BitDepth::One, 0, 40, RunSplit { prefix: 0, aligned: 1, suffix: 8 })]
    #[case(BitDepth::One, 5, 40, RunSplit { prefix: 27, aligned: 0, suffix: 13 })]
    #[case(BitDepth::One, 5, 10, RunSplit { prefix: 10, aligned: 0, suffix: 0 })]
    #[case(BitDepth::Two, 6, 50, RunSplit { prefix: 13, aligned: 2, suffix: 5 })]
    #[case(BitDepth::Four, 28, 9, RunSplit { prefix: 1, aligned: 1, suffix: 0 })]
    #[case(BitDepth::Eight, 0, 3, RunSplit { prefix: 0, aligned: 0, suffix: 3 })]
    #[case(BitDepth::Eight, 8, 0, RunSplit { prefix: 0, aligned: 0, suffix: 0 })]
    fn test_run_split(
        #[case] depth: BitDepth,
        #[case] shift: u32,
        #[case] width: usize,
        #[case] expected: RunSplit,
    ) {
        let split = RunSplit::new(depth, shift, width);
        assert_eq!(split, expected);
        assert_eq!(split.width(depth), width);
    }

    #[test]
    fn test_hline_full_word_then_invert() {
        let mut bmap = Bitmap::new(Dim::new(32, 1), BitDepth::One).unwrap();
        bmap.set_pen_color(1).unwrap();

        let mut cursor = bmap.cursor(Point::new(0, 0)).unwrap();
        bmap.draw_hline(&mut cursor, 32);
        assert_eq!(bmap.words(), &[0xFFFF_FFFF]);

        let mut cursor = bmap.cursor(Point::new(0, 0)).unwrap();
        bmap.invert_hline(&mut cursor, 32);
        assert_eq!(bmap.words(), &[0x0000_0000]);
    }

    #[test]
    fn test_hline_4bpp_pattern() {
        let mut bmap = Bitmap::new(Dim::new(8, 1), BitDepth::Four).unwrap();
        bmap.set_pen_color(0xA).unwrap();

        let mut cursor = bmap.cursor(Point::new(0, 0)).unwrap();
        bmap.draw_hline(&mut cursor, 8);
        assert_eq!(bmap.words(), &[0xAAAA_AAAA]);
    }

    #[test]
    fn test_shift_right_2bpp_aligned() {
        let mut bmap = Bitmap::new(Dim::new(16, 1), BitDepth::Two).unwrap();
        bmap.words_mut()[0] = 0b11_10_01_11;

        let mut cursor = bmap.cursor(Point::new(0, 0)).unwrap();
        bmap.shift_right(&mut cursor, 4, 2);
        assert_eq!(bmap.words(), &[0b11_10_01_11_00_00]);
        assert_eq!(cursor, bmap.cursor(Point::new(2, 0)).unwrap());
    }

    #[test]
    fn test_hline_leaves_cursor_after_run() {
        let mut bmap = Bitmap::new(Dim::new(100, 2), BitDepth::Two).unwrap();
        let mut cursor = bmap.cursor(Point::new(7, 1)).unwrap();
        bmap.draw_hline(&mut cursor, 61);
        assert_eq!(cursor, bmap.cursor(Point::new(68, 1)).unwrap());
    }

    #[rstest]
    #[case(BitDepth::One)]
    #[case(BitDepth::Two)]
    #[case(BitDepth::Four)]
    #[case(BitDepth::Eight)]
    fn test_hline_replace_touches_only_run(#[case] depth: BitDepth) {
        let width = 70u16;
        let color = depth.max_color() / 2 + 1;
        for start in 0..width {
            for run in [0, 1, 7, 16, 33, (width - start) as usize] {
                let run = run.min((width - start) as usize);
                let mut bmap = noisy(Dim::new(width, 3), depth);
                bmap.set_pen_color(color).unwrap();
                let before = row_pixels(&bmap, 1);

                let mut cursor = bmap.cursor(Point::new(start as i16, 1)).unwrap();
                bmap.draw_hline(&mut cursor, run);

                let after = row_pixels(&bmap, 1);
                for x in 0..width as usize {
                    let inside = x >= start as usize && x < start as usize + run;
                    let expected = if inside { color } else { before[x] };
                    assert_eq!(after[x], expected, "depth {depth} start {start} run {run} x {x}");
                }
            }
        }
    }

    #[test]
    fn test_draw_pattern_anchored_to_word_grid() {
        let mut bmap = Bitmap::new(Dim::new(16, 1), BitDepth::Four).unwrap();
        let mut cursor = bmap.cursor(Point::new(3, 0)).unwrap();
        bmap.draw_pattern(&mut cursor, 10, 0x7654_3210);
        let pixels = row_pixels(&bmap, 0);
        assert_eq!(pixels, vec![0, 0, 0, 3, 4, 5, 6, 7, 0, 1, 2, 3, 4, 0, 0, 0]);
    }

    #[rstest]
    #[case(PenMode::Erase)]
    #[case(PenMode::Invert)]
    #[case(PenMode::Blend)]
    fn test_hline_modes_match_pixel_loop(#[case] mode: PenMode) {
        let mut fast = noisy(Dim::new(90, 1), BitDepth::Two);
        fast.set_pen_color(0b10).unwrap();
        fast.set_pen_mode(mode);
        let mut slow = fast.clone();

        let mut cursor = fast.cursor(Point::new(13, 0)).unwrap();
        fast.draw_hline(&mut cursor, 70);

        let mut cursor = slow.cursor(Point::new(13, 0)).unwrap();
        for _ in 0..70 {
            slow.draw_next_pixel(&mut cursor);
        }
        assert_eq!(fast.words(), slow.words());
    }

    #[test]
    fn test_clear_hline_ignores_pen() {
        let mut bmap = Bitmap::new(Dim::new(48, 1), BitDepth::One).unwrap();
        bmap.fill(1).unwrap();
        bmap.set_pen_mode(PenMode::Blend);

        let mut cursor = bmap.cursor(Point::new(4, 0)).unwrap();
        bmap.clear_hline(&mut cursor, 40);
        assert_eq!(bmap.words(), &[0x0000_000F, 0xFFFF_F000]);
    }

    #[test]
    fn test_invert_is_involution() {
        let original = noisy(Dim::new(77, 2), BitDepth::Four);
        let mut bmap = original.clone();
        for _ in 0..2 {
            let mut cursor = bmap.cursor(Point::new(9, 1)).unwrap();
            bmap.invert_hline(&mut cursor, 60);
        }
        assert_eq!(bmap, original);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(0, 5)]
    #[case(3, 0)]
    #[case(7, 21)]
    #[case(31, 1)]
    fn test_draw_cursor_same_depth(#[case] src_x: i16, #[case] dest_x: i16) {
        let src = noisy(Dim::new(100, 1), BitDepth::One);
        let mut dest = Bitmap::new(Dim::new(100, 1), BitDepth::One).unwrap();

        let src_cursor = src.cursor(Point::new(src_x, 0)).unwrap();
        let mut dest_cursor = dest.cursor(Point::new(dest_x, 0)).unwrap();
        dest.draw_cursor(&mut dest_cursor, &src, &src_cursor, 66);
        assert_eq!(dest_cursor, dest.cursor(Point::new(dest_x + 66, 0)).unwrap());

        let from = row_pixels(&src, 0);
        let to = row_pixels(&dest, 0);
        for i in 0..100usize {
            let inside = i >= dest_x as usize && i < dest_x as usize + 66;
            let expected = if inside { from[i - dest_x as usize + src_x as usize] } else { 0 };
            assert_eq!(to[i], expected, "pixel {i}");
        }
    }

    #[test]
    fn test_draw_cursor_cross_depth_truncates() {
        // 8bpp -> 1bpp keeps v / 8, then the destination field takes bit 0
        let mut src = Bitmap::new(Dim::new(16, 1), BitDepth::Eight).unwrap();
        let values: Vec<Color> = (0..16).collect();
        let mut cursor = src.cursor(Point::new(0, 0)).unwrap();
        for &v in &values {
            src.draw_pixel_at(&cursor, v);
            cursor.inc_x();
        }

        let mut dest = Bitmap::new(Dim::new(16, 1), BitDepth::One).unwrap();
        let src_cursor = src.cursor(Point::new(0, 0)).unwrap();
        let mut dest_cursor = dest.cursor(Point::new(0, 0)).unwrap();
        dest.draw_cursor(&mut dest_cursor, &src, &src_cursor, 16);

        let copied = row_pixels(&dest, 0);
        let expected: Vec<Color> = values.iter().map(|v| (v / 8) & 1).collect();
        assert_eq!(copied, expected);
        assert_eq!(&copied[..8], &[0; 8]);
        assert_eq!(&copied[8..], &[1; 8]);
    }

    #[test]
    fn test_draw_cursor_blend_mode() {
        let mut src = Bitmap::new(Dim::new(64, 1), BitDepth::One).unwrap();
        src.words_mut().copy_from_slice(&[0x0000_FFFF, 0xFFFF_0000]);
        let mut dest = Bitmap::new(Dim::new(64, 1), BitDepth::One).unwrap();
        dest.words_mut().copy_from_slice(&[0xF000_0000, 0x0000_000F]);
        dest.set_pen_mode(PenMode::Blend);

        let src_cursor = src.cursor(Point::new(0, 0)).unwrap();
        let mut dest_cursor = dest.cursor(Point::new(0, 0)).unwrap();
        dest.draw_cursor(&mut dest_cursor, &src, &src_cursor, 64);
        assert_eq!(dest.words(), &[0xF000_FFFF, 0xFFFF_000F]);
    }

    #[rstest]
    #[case(PenMode::Erase)]
    #[case(PenMode::Invert)]
    #[case(PenMode::Blend)]
    fn test_draw_cursor_modes_unaligned_dest(#[case] mode: PenMode) {
        let src = noisy(Dim::new(64, 1), BitDepth::One);
        let mut dest = Bitmap::new(Dim::new(64, 1), BitDepth::One).unwrap();
        dest.words_mut().copy_from_slice(&[0x0F0F_3C3C, 0xA5A5_5A5A]);
        dest.set_pen_mode(mode);

        let src_row = row_pixels(&src, 0);
        let mut expected = row_pixels(&dest, 0);
        for (i, s) in src_row.iter().take(50).enumerate() {
            let d = &mut expected[5 + i];
            *d = match mode {
                PenMode::Erase => *d & !s & 1,
                PenMode::Invert => *d ^ s,
                PenMode::Blend => *d | s,
                PenMode::Replace => *s,
            };
        }

        // aligned source words land across two destination words
        let src_cursor = src.cursor(Point::new(0, 0)).unwrap();
        let mut dest_cursor = dest.cursor(Point::new(5, 0)).unwrap();
        dest.draw_cursor(&mut dest_cursor, &src, &src_cursor, 50);
        assert_eq!(row_pixels(&dest, 0), expected);
        assert_eq!(dest_cursor, dest.cursor(Point::new(55, 0)).unwrap());
    }

    #[rstest]
    #[case(BitDepth::One, 3, 50, 7)]
    #[case(BitDepth::Two, 0, 40, 16)]
    #[case(BitDepth::Four, 5, 20, 3)]
    #[case(BitDepth::Eight, 2, 9, 5)]
    #[case(BitDepth::One, 10, 12, 40)]
    fn test_shift_right_then_left(
        #[case] depth: BitDepth,
        #[case] start: i16,
        #[case] width: usize,
        #[case] distance: usize,
    ) {
        let original = noisy(Dim::new(80, 1), depth);
        let before = row_pixels(&original, 0);
        let mut bmap = original.clone();

        let mut cursor = bmap.cursor(Point::new(start, 0)).unwrap();
        bmap.shift_right(&mut cursor, width, distance);

        let shifted = row_pixels(&bmap, 0);
        let s = start as usize;
        for x in 0..80 {
            let expected = if x >= s + distance && x < s + distance + width {
                before[x - distance]
            } else if x >= s && x < s + width {
                0
            } else {
                before[x]
            };
            assert_eq!(shifted[x], expected, "after shift_right, x {x}");
        }

        bmap.shift_left(&mut cursor, width, distance);
        assert_eq!(cursor, bmap.cursor(Point::new(start, 0)).unwrap());

        let restored = row_pixels(&bmap, 0);
        for x in 0..80 {
            let expected = if x >= s && x < s + width {
                before[x]
            } else if x >= s + distance && x < s + distance + width {
                0
            } else {
                before[x]
            };
            assert_eq!(restored[x], expected, "after shift_left, x {x}");
        }
    }
}
