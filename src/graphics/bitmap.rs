//! Packed pixel buffer
//!
//! A `Bitmap` owns (or borrows) a run of 32-bit words holding pixels at a fixed
//! bit depth, plus the pen used by every drawing call on it.
//!
//! Key concepts:
//! - Storage: any `AsRef<[Word]>` (`Vec<Word>` by default). Driver-owned memory
//!   such as `&mut [Word]` or a fixed array works as well.
//! - Rows: each row starts on a word boundary and spans `columns` words.
//! - Margins: border insets reserved for callers; the engine ignores them.
//! - Cursors: built only through `cursor` (checked) or `cursor_unchecked`
//!   (debug-asserted).

use crate::graphics::cursor::Cursor;
use crate::graphics::depth::{BitDepth, Color, Word, WORD_BITS};
use crate::graphics::geometry::{Coord, Dim, Point};
use crate::graphics::pen::{Pen, PenMode};

/// Errors raised by bitmap operations that validate their input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BitmapError {
    #[error("Invalid bitmap dimensions: {width}x{height}")]
    InvalidDimensions { width: u16, height: u16 },

    #[error("Unsupported bit depth: {0} bits per pixel")]
    InvalidBitDepth(u32),

    #[error("Storage too small: {required} words required, {actual} available")]
    StorageTooSmall { required: usize, actual: usize },

    #[error("Point {point:?} outside {dim:?} bitmap")]
    PointOutOfBounds { point: Point, dim: Dim },

    #[error("Region {size:?} at {point:?} outside {dim:?} bitmap")]
    RegionOutOfBounds { point: Point, size: Dim, dim: Dim },

    #[error("Color {color:#x} out of range for {depth}")]
    ColorOutOfRange { color: Color, depth: BitDepth },

    #[error("Pattern height must be non-zero")]
    InvalidPatternHeight,
}

/// Packed 1/2/4/8 bpp pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap<S = Vec<Word>> {
    data: S,
    dim: Dim,
    depth: BitDepth,
    columns: usize,
    margin_top_left: Dim,
    margin_bottom_right: Dim,
    pen: Pen,
}

impl Bitmap<Vec<Word>> {
    /// Allocate a zeroed bitmap.
    pub fn new(dim: Dim, depth: BitDepth) -> Result<Self, BitmapError> {
        check_dim(dim)?;
        let words = depth.required_words(dim);
        log::debug!(
            "Allocating {}x{} bitmap at {} ({} words)",
            dim.width,
            dim.height,
            depth,
            words
        );
        Ok(Self::assemble(vec![0; words], dim, depth))
    }
}

impl<S: AsRef<[Word]>> Bitmap<S> {
    /// Wrap caller-supplied storage.
    ///
    /// The storage may be larger than `dim` needs; only the leading
    /// `required_size` words are addressed.
    pub fn with_storage(data: S, dim: Dim, depth: BitDepth) -> Result<Self, BitmapError> {
        check_dim(dim)?;
        check_capacity(data.as_ref().len(), dim, depth)?;
        Ok(Self::assemble(data, dim, depth))
    }

    fn assemble(data: S, dim: Dim, depth: BitDepth) -> Self {
        Self {
            data,
            dim,
            depth,
            columns: depth.columns(dim.width),
            margin_top_left: Dim::default(),
            margin_bottom_right: Dim::default(),
            pen: Pen::default(),
        }
    }

    /// Rebind to new storage and dimensions without reallocating.
    ///
    /// Returns the storage previously in use.
    pub fn set_data(&mut self, data: S, dim: Dim) -> Result<S, BitmapError> {
        check_dim(dim)?;
        check_capacity(data.as_ref().len(), dim, self.depth)?;
        log::debug!(
            "Rebinding bitmap storage: {}x{} -> {}x{}",
            self.dim.width,
            self.dim.height,
            dim.width,
            dim.height
        );
        self.dim = dim;
        self.columns = self.depth.columns(dim.width);
        Ok(std::mem::replace(&mut self.data, data))
    }

    /// Change the effective size within the current storage capacity.
    ///
    /// Existing words are reinterpreted, not moved.
    pub fn set_dim(&mut self, dim: Dim) -> Result<(), BitmapError> {
        check_dim(dim)?;
        check_capacity(self.data.as_ref().len(), dim, self.depth)?;
        self.dim = dim;
        self.columns = self.depth.columns(dim.width);
        Ok(())
    }

    pub fn into_storage(self) -> S {
        self.data
    }

    pub fn dim(&self) -> Dim {
        self.dim
    }

    pub fn width(&self) -> u16 {
        self.dim.width
    }

    pub fn height(&self) -> u16 {
        self.dim.height
    }

    pub fn x_max(&self) -> Coord {
        self.dim.width as Coord - 1
    }

    pub fn y_max(&self) -> Coord {
        self.dim.height as Coord - 1
    }

    pub fn depth(&self) -> BitDepth {
        self.depth
    }

    pub fn bits_per_pixel(&self) -> u32 {
        self.depth.bits()
    }

    /// Words per row.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// The addressed words, row-major.
    pub fn words(&self) -> &[Word] {
        &self.data.as_ref()[..self.depth.required_words(self.dim)]
    }

    pub fn pen(&self) -> Pen {
        self.pen
    }

    pub fn margin_top_left(&self) -> Dim {
        self.margin_top_left
    }

    pub fn margin_bottom_right(&self) -> Dim {
        self.margin_bottom_right
    }

    pub fn margin_left(&self) -> u16 {
        self.margin_top_left.width
    }

    pub fn margin_right(&self) -> u16 {
        self.margin_bottom_right.width
    }

    pub fn margin_top(&self) -> u16 {
        self.margin_top_left.height
    }

    pub fn margin_bottom(&self) -> u16 {
        self.margin_bottom_right.height
    }

    pub fn set_margins(&mut self, top_left: Dim, bottom_right: Dim) {
        self.margin_top_left = top_left;
        self.margin_bottom_right = bottom_right;
    }

    /// Set the pen. The color must fit the bitmap's depth.
    pub fn set_pen(&mut self, pen: Pen) -> Result<(), BitmapError> {
        check_color(pen.color(), self.depth)?;
        self.pen = pen;
        Ok(())
    }

    pub fn set_pen_color(&mut self, color: Color) -> Result<(), BitmapError> {
        check_color(color, self.depth)?;
        self.pen = self.pen.with_color(color);
        Ok(())
    }

    pub fn set_pen_mode(&mut self, mode: PenMode) {
        self.pen = self.pen.with_mode(mode);
    }

    pub fn set_pen_thickness(&mut self, thickness: u16) {
        self.pen = self.pen.with_thickness(thickness);
    }

    pub fn x_visible(&self, x: Coord) -> bool {
        x >= 0 && (x as i32) < i32::from(self.dim.width)
    }

    pub fn y_visible(&self, y: Coord) -> bool {
        y >= 0 && (y as i32) < i32::from(self.dim.height)
    }

    pub fn contains(&self, p: Point) -> bool {
        self.x_visible(p.x) && self.y_visible(p.y)
    }

    /// Whether the `size` region at `p` lies entirely inside the bitmap.
    pub fn contains_region(&self, p: Point, size: Dim) -> bool {
        p.x >= 0
            && p.y >= 0
            && p.x as i32 + i32::from(size.width) <= i32::from(self.dim.width)
            && p.y as i32 + i32::from(size.height) <= i32::from(self.dim.height)
    }

    /// Clamp `p` into the bitmap.
    pub fn bound_point(&self, p: Point) -> Point {
        Point::new(p.x.clamp(0, self.x_max()), p.y.clamp(0, self.y_max()))
    }

    /// Index of the word holding the pixel at `p`.
    pub fn address_of(&self, p: Point) -> usize {
        p.y as usize * self.columns + (p.x as usize * self.depth.bits() as usize) / WORD_BITS as usize
    }

    /// Cursor at `p`, rejecting points outside the bitmap.
    pub fn cursor(&self, p: Point) -> Result<Cursor, BitmapError> {
        if !self.contains(p) {
            return Err(BitmapError::PointOutOfBounds {
                point: p,
                dim: self.dim,
            });
        }
        Ok(Cursor::at(self.depth, self.columns, self.address_of(p), p.x as usize))
    }

    /// Cursor at `p` without a release-mode bounds check.
    ///
    /// Debug builds assert that `p` is inside the bitmap.
    pub fn cursor_unchecked(&self, p: Point) -> Cursor {
        debug_assert!(
            self.contains(p),
            "cursor point {:?} outside {:?} bitmap",
            p,
            self.dim
        );
        Cursor::at(self.depth, self.columns, self.address_of(p), p.x as usize)
    }

    pub(crate) fn word(&self, index: usize) -> Word {
        self.data.as_ref()[index]
    }

    pub(crate) fn debug_check_cursor(&self, cursor: &Cursor) {
        debug_assert_eq!(cursor.depth(), self.depth, "cursor depth does not match bitmap");
        debug_assert_eq!(cursor.columns(), self.columns, "cursor row stride does not match bitmap");
    }
}

impl<S: AsRef<[Word]> + AsMut<[Word]>> Bitmap<S> {
    /// The addressed words, row-major, mutable.
    pub fn words_mut(&mut self) -> &mut [Word] {
        let len = self.depth.required_words(self.dim);
        &mut self.data.as_mut()[..len]
    }

    pub(crate) fn word_mut(&mut self, index: usize) -> &mut Word {
        &mut self.data.as_mut()[index]
    }

    /// Zero every pixel.
    pub fn clear(&mut self) {
        self.words_mut().fill(0);
    }

    /// Set every pixel to `color`, ignoring the pen mode.
    ///
    /// Padding bits at the end of each row are filled as well.
    pub fn fill(&mut self, color: Color) -> Result<(), BitmapError> {
        check_color(color, self.depth)?;
        let pattern = self.depth.tile(color);
        self.words_mut().fill(pattern);
        Ok(())
    }
}

/// Points address pixels with `Coord`, so neither side may exceed its range.
fn check_dim(dim: Dim) -> Result<(), BitmapError> {
    let max = Coord::MAX as u16;
    if dim.is_empty() || dim.width > max || dim.height > max {
        return Err(BitmapError::InvalidDimensions {
            width: dim.width,
            height: dim.height,
        });
    }
    Ok(())
}

fn check_capacity(available: usize, dim: Dim, depth: BitDepth) -> Result<(), BitmapError> {
    let required = depth.required_words(dim);
    if available < required {
        return Err(BitmapError::StorageTooSmall {
            required,
            actual: available,
        });
    }
    Ok(())
}

fn check_color(color: Color, depth: BitDepth) -> Result<(), BitmapError> {
    if color > depth.max_color() {
        return Err(BitmapError::ColorOutOfRange { color, depth });
    }
    Ok(())
}
