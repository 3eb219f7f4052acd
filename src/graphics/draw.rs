//! Point-addressed drawing
//!
//! Everything here validates or clips its coordinates and then drives the run
//! engine a row at a time:
//! - pixels and rectangles reject out-of-bounds input with `BitmapError`,
//! - bitmap blits validate the source region and clip to the destination,
//! - lines clip per pixel, so endpoints may lie outside the bitmap.

use crate::graphics::bitmap::{Bitmap, BitmapError};
use crate::graphics::cursor::Cursor;
use crate::graphics::depth::{BitDepth, Color, Word};
use crate::graphics::geometry::{Coord, Dim, Point};
use crate::graphics::pixel::combine_pixel;

impl<S: AsRef<[Word]>> Bitmap<S> {
    /// Color of the pixel at `p`.
    pub fn get_pixel(&self, p: Point) -> Result<Color, BitmapError> {
        let cursor = self.cursor(p)?;
        Ok(self.pixel_at(&cursor))
    }

    fn check_region(&self, p: Point, d: Dim) -> Result<(), BitmapError> {
        if !self.contains_region(p, d) {
            return Err(BitmapError::RegionOutOfBounds {
                point: p,
                size: d,
                dim: self.dim(),
            });
        }
        Ok(())
    }

    /// Pixel at `(x, y)`, already known to be inside the bitmap.
    fn pixel_xy(&self, x: i32, y: i32) -> Color {
        let cursor = self.cursor_unchecked(Point::new(x as Coord, y as Coord));
        self.pixel_at(&cursor)
    }
}

impl<S: AsRef<[Word]> + AsMut<[Word]>> Bitmap<S> {
    /// Draw the pen color at `p`.
    pub fn draw_pixel(&mut self, p: Point) -> Result<(), BitmapError> {
        let cursor = self.cursor(p)?;
        let color = self.pen().color();
        self.draw_pixel_at(&cursor, color);
        Ok(())
    }

    /// Fill the `d` region at `p` with the pen.
    pub fn draw_rectangle(&mut self, p: Point, d: Dim) -> Result<(), BitmapError> {
        self.for_each_row(p, d, |bmap, cursor, _| bmap.draw_hline(cursor, d.width as usize))
    }

    /// Invert every pixel of the `d` region at `p`.
    pub fn invert_rectangle(&mut self, p: Point, d: Dim) -> Result<(), BitmapError> {
        self.for_each_row(p, d, |bmap, cursor, _| bmap.invert_hline(cursor, d.width as usize))
    }

    /// Zero every pixel of the `d` region at `p`.
    pub fn clear_rectangle(&mut self, p: Point, d: Dim) -> Result<(), BitmapError> {
        self.for_each_row(p, d, |bmap, cursor, _| bmap.clear_hline(cursor, d.width as usize))
    }

    /// Fill the `d` region at `p` with two alternating 1-bit patterns.
    ///
    /// Bit `k` of a pattern selects the pen color (1) or color zero (0) for
    /// pixel slot `k` of each word. The first `pattern_height` rows use
    /// `odd`, the next `pattern_height` rows use `even`, and so on.
    pub fn fill_pattern(
        &mut self,
        p: Point,
        d: Dim,
        odd: Word,
        even: Word,
        pattern_height: u16,
    ) -> Result<(), BitmapError> {
        if pattern_height == 0 {
            return Err(BitmapError::InvalidPatternHeight);
        }
        let depth = self.depth();
        let color = self.pen().color();
        let odd = expand_mask(depth, odd, color);
        let even = expand_mask(depth, even, color);
        let band = usize::from(pattern_height);

        self.for_each_row(p, d, |bmap, cursor, row| {
            let pattern = if (row / band) % 2 == 0 { odd } else { even };
            bmap.draw_pattern(cursor, d.width as usize, pattern);
        })
    }

    /// Blit the whole of `src` with its top-left corner at `p_dest`.
    pub fn draw_bitmap<T: AsRef<[Word]>>(
        &mut self,
        p_dest: Point,
        src: &Bitmap<T>,
    ) -> Result<(), BitmapError> {
        self.draw_sub_bitmap(p_dest, src, Point::origin(), src.dim())
    }

    /// Blit the `d_src` region of `src` at `p_src` to `p_dest`.
    ///
    /// The source region must lie inside `src`; the destination is clipped.
    /// Pixels combine with this bitmap's pen mode and are rescaled when the
    /// depths differ.
    pub fn draw_sub_bitmap<T: AsRef<[Word]>>(
        &mut self,
        p_dest: Point,
        src: &Bitmap<T>,
        p_src: Point,
        d_src: Dim,
    ) -> Result<(), BitmapError> {
        src.check_region(p_src, d_src)?;

        let x0 = i32::from(p_dest.x).max(0);
        let y0 = i32::from(p_dest.y).max(0);
        let x1 = (i32::from(p_dest.x) + i32::from(d_src.width)).min(i32::from(self.width()));
        let y1 = (i32::from(p_dest.y) + i32::from(d_src.height)).min(i32::from(self.height()));
        if x1 <= x0 || y1 <= y0 {
            return Ok(());
        }

        let width = (x1 - x0) as usize;
        let src_x = i32::from(p_src.x) + x0 - i32::from(p_dest.x);
        let src_y = i32::from(p_src.y) + y0 - i32::from(p_dest.y);

        let mut dest_line = self.cursor(Point::new(x0 as Coord, y0 as Coord))?;
        let mut src_line = src.cursor(Point::new(src_x as Coord, src_y as Coord))?;
        for _ in y0..y1 {
            let mut dest = dest_line;
            self.draw_cursor(&mut dest, src, &src_line, width);
            dest_line.inc_y();
            src_line.inc_y();
        }
        Ok(())
    }

    /// Draw a line from `p1` to `p2` with the pen, clipping to the bitmap.
    ///
    /// Thickness spreads across the minor axis, centered on the ideal line.
    /// Horizontal lines go straight to `draw_hline`.
    pub fn draw_line(&mut self, p1: Point, p2: Point) {
        let thickness = i32::from(self.pen().thickness().max(1));
        let half = (thickness - 1) / 2;
        let (x1, y1) = (i32::from(p1.x), i32::from(p1.y));
        let (x2, y2) = (i32::from(p2.x), i32::from(p2.y));

        if y1 == y2 {
            let left = x1.min(x2);
            let span = (x1 - x2).abs() + 1;
            for y in y1 - half..y1 - half + thickness {
                self.clipped_hline(left, y, span);
            }
            return;
        }

        let dx = (x2 - x1).abs();
        let dy = -(y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let x_major = dx >= -dy;
        let mut err = dx + dy;
        let (mut x, mut y) = (x1, y1);

        loop {
            if x_major {
                for yy in y - half..y - half + thickness {
                    self.clipped_pixel(x, yy);
                }
            } else {
                self.clipped_hline(x - half, y, thickness);
            }

            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Flood the 4-connected region around `p` that shares its color.
    ///
    /// Spans are painted with the pen through `draw_hline`. A pen that would
    /// leave the region's color unchanged is rejected with a warning.
    pub fn draw_pour(&mut self, p: Point) -> Result<(), BitmapError> {
        let seed = self.cursor(p)?;
        let target = self.pixel_at(&seed);

        let pen = self.pen();
        let mut probe: Word = target;
        combine_pixel(&mut probe, pen.color(), 0, self.depth(), pen.mode());
        if probe == target {
            log::warn!(
                "Pour at {:?} ignored: {:?} with color {:#x} leaves color {:#x} unchanged",
                p,
                pen.mode(),
                pen.color(),
                target
            );
            return Ok(());
        }

        let width = i32::from(self.width());
        let height = i32::from(self.height());
        let mut pending = vec![(i32::from(p.x), i32::from(p.y))];

        while let Some((x, y)) = pending.pop() {
            if self.pixel_xy(x, y) != target {
                continue;
            }
            let mut left = x;
            while left > 0 && self.pixel_xy(left - 1, y) == target {
                left -= 1;
            }
            let mut right = x;
            while right + 1 < width && self.pixel_xy(right + 1, y) == target {
                right += 1;
            }

            let mut cursor = self.cursor_unchecked(Point::new(left as Coord, y as Coord));
            self.draw_hline(&mut cursor, (right - left + 1) as usize);

            for ny in [y - 1, y + 1] {
                if ny < 0 || ny >= height {
                    continue;
                }
                let mut in_span = false;
                for nx in left..=right {
                    let matches = self.pixel_xy(nx, ny) == target;
                    if matches && !in_span {
                        pending.push((nx, ny));
                    }
                    in_span = matches;
                }
            }
        }
        Ok(())
    }

    /// Validate a region and call `row` with a cursor at the start of each of
    /// its rows, along with the row's index within the region.
    fn for_each_row<F>(&mut self, p: Point, d: Dim, mut row: F) -> Result<(), BitmapError>
    where
        F: FnMut(&mut Self, &mut Cursor, usize),
    {
        self.check_region(p, d)?;
        if d.is_empty() {
            return Ok(());
        }
        let mut line = self.cursor(p)?;
        for index in 0..usize::from(d.height) {
            let mut cursor = line;
            row(self, &mut cursor, index);
            line.inc_y();
        }
        Ok(())
    }

    fn clipped_hline(&mut self, x: i32, y: i32, width: i32) {
        if y < 0 || y >= i32::from(self.height()) {
            return;
        }
        let left = x.max(0);
        let right = (x + width).min(i32::from(self.width()));
        if right <= left {
            return;
        }
        let mut cursor = self.cursor_unchecked(Point::new(left as Coord, y as Coord));
        self.draw_hline(&mut cursor, (right - left) as usize);
    }

    fn clipped_pixel(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x >= i32::from(self.width()) || y >= i32::from(self.height()) {
            return;
        }
        let cursor = self.cursor_unchecked(Point::new(x as Coord, y as Coord));
        let color = self.pen().color();
        self.draw_pixel_at(&cursor, color);
    }
}

/// Word pattern with `color` in every pixel slot whose bit is set in `mask`.
fn expand_mask(depth: BitDepth, mask: Word, color: Color) -> Word {
    let field = color & depth.pixel_mask();
    (0..depth.pixels_per_word())
        .filter(|slot| mask & (1 << slot) != 0)
        .fold(0, |pattern, slot| pattern | (field << (slot * depth.bits())))
}
