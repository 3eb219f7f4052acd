//! Whole-bitmap flips and region shifts

use crate::graphics::bitmap::{Bitmap, BitmapError};
use crate::graphics::depth::Word;
use crate::graphics::geometry::{Coord, Dim, Point};
use crate::graphics::pen::PenMode;

impl<S: AsRef<[Word]> + AsMut<[Word]>> Bitmap<S> {
    /// Mirror every row left to right.
    pub fn flip_x(&mut self) {
        let width = self.width() as Coord;
        for y in 0..self.height() as Coord {
            let mut left = self.cursor_unchecked(Point::new(0, y));
            let mut right = self.cursor_unchecked(Point::new(width - 1, y));
            for _ in 0..width / 2 {
                let a = self.pixel_at(&left);
                let b = self.pixel_at(&right);
                self.combine_at(&left, b, PenMode::Replace);
                self.combine_at(&right, a, PenMode::Replace);
                left.inc_x();
                right.dec_x();
            }
        }
    }

    /// Mirror the rows top to bottom by swapping whole rows of words.
    pub fn flip_y(&mut self) {
        let columns = self.columns();
        let height = self.height() as usize;
        let words = self.words_mut();
        for y in 0..height / 2 {
            let (top, rest) = words.split_at_mut((height - 1 - y) * columns);
            top[y * columns..(y + 1) * columns].swap_with_slice(&mut rest[..columns]);
        }
    }

    /// Rotate by 180 degrees.
    pub fn flip_xy(&mut self) {
        self.flip_x();
        self.flip_y();
    }

    /// Move the `d` region at `p` by `shift`.
    ///
    /// Both the region and its destination must lie inside the bitmap.
    /// Destination pixels are overwritten; pixels the region vacates are
    /// zeroed.
    pub fn shift(&mut self, shift: Point, p: Point, d: Dim) -> Result<(), BitmapError> {
        // saturated corners land outside any bitmap and are rejected below
        let target = Point::new(p.x.saturating_add(shift.x), p.y.saturating_add(shift.y));
        for corner in [p, target] {
            if !self.contains_region(corner, d) {
                return Err(BitmapError::RegionOutOfBounds {
                    point: corner,
                    size: d,
                    dim: self.dim(),
                });
            }
        }
        if d.is_empty() {
            return Ok(());
        }

        let width = usize::from(d.width);
        let rows = p.y..p.y + d.height as Coord;

        if shift.y == 0 {
            let distance = usize::from(shift.x.unsigned_abs());
            for y in rows {
                let mut cursor = self.cursor_unchecked(Point::new(p.x, y));
                if shift.x > 0 {
                    self.shift_right(&mut cursor, width, distance);
                } else if shift.x < 0 {
                    self.shift_left(&mut cursor, width, distance);
                }
            }
            return Ok(());
        }

        // rows never overlap themselves here; order them so no source row is
        // overwritten before it moves
        let rows: Box<dyn Iterator<Item = Coord>> = if shift.y > 0 {
            Box::new(rows.rev())
        } else {
            Box::new(rows)
        };
        for y in rows {
            let src = self.cursor_unchecked(Point::new(p.x, y));
            let dest = self.cursor_unchecked(Point::new(target.x, y + shift.y));
            self.move_run_ascending(src, dest, width);
        }
        Ok(())
    }
}
