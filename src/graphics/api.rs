//! Per-depth dispatch table
//!
//! Generic code picks a depth at compile time through `Bitmap`'s type
//! parameters and `BitDepth` values. Callers that only learn the depth at
//! runtime (a display driver probing its panel, a plugin host) can instead
//! fetch the immutable table for that depth with [`api`] and call through
//! plain function pointers.

use crate::graphics::bitmap::{Bitmap, BitmapError};
use crate::graphics::cursor::Cursor;
use crate::graphics::depth::{required_size, BitDepth, Color, Word};
use crate::graphics::geometry::{Dim, Point};

/// Version of the table layout; bumped whenever an entry is added or changed.
pub const API_VERSION: u32 = 0x0001_0000;

/// Owned bitmap type the table operates on.
pub type ApiBitmap = Bitmap<Vec<Word>>;

/// Function table for one bit depth.
pub struct Api {
    pub version: u32,
    pub bits_per_pixel: BitDepth,

    pub required_size: fn(Dim) -> usize,
    pub new_bitmap: fn(Dim) -> Result<ApiBitmap, BitmapError>,
    pub set_data: fn(&mut ApiBitmap, Vec<Word>, Dim) -> Result<Vec<Word>, BitmapError>,
    pub bound_point: fn(&ApiBitmap, Point) -> Point,

    pub flip_x: fn(&mut ApiBitmap),
    pub flip_y: fn(&mut ApiBitmap),
    pub flip_xy: fn(&mut ApiBitmap),
    pub shift: fn(&mut ApiBitmap, Point, Point, Dim) -> Result<(), BitmapError>,

    pub cursor: fn(&ApiBitmap, Point) -> Result<Cursor, BitmapError>,
    pub cursor_inc_x: fn(&mut Cursor),
    pub cursor_dec_x: fn(&mut Cursor),
    pub cursor_inc_y: fn(&mut Cursor),
    pub cursor_dec_y: fn(&mut Cursor),
    pub cursor_get_pixel: fn(&ApiBitmap, &mut Cursor) -> Color,
    pub cursor_draw_pixel: fn(&mut ApiBitmap, &mut Cursor),
    pub cursor_draw_hline: fn(&mut ApiBitmap, &mut Cursor, usize),
    pub cursor_invert_hline: fn(&mut ApiBitmap, &mut Cursor, usize),
    pub cursor_clear_hline: fn(&mut ApiBitmap, &mut Cursor, usize),
    pub cursor_draw_cursor: fn(&mut ApiBitmap, &mut Cursor, &ApiBitmap, &Cursor, usize),
    pub cursor_draw_pattern: fn(&mut ApiBitmap, &mut Cursor, usize, Word),
    pub cursor_shift_right: fn(&mut ApiBitmap, &mut Cursor, usize, usize),
    pub cursor_shift_left: fn(&mut ApiBitmap, &mut Cursor, usize, usize),

    pub get_pixel: fn(&ApiBitmap, Point) -> Result<Color, BitmapError>,
    pub draw_pixel: fn(&mut ApiBitmap, Point) -> Result<(), BitmapError>,
    pub draw_line: fn(&mut ApiBitmap, Point, Point),
    pub draw_rectangle: fn(&mut ApiBitmap, Point, Dim) -> Result<(), BitmapError>,
    pub invert_rectangle: fn(&mut ApiBitmap, Point, Dim) -> Result<(), BitmapError>,
    pub clear_rectangle: fn(&mut ApiBitmap, Point, Dim) -> Result<(), BitmapError>,
    pub draw_pour: fn(&mut ApiBitmap, Point) -> Result<(), BitmapError>,
    pub fill_pattern: fn(&mut ApiBitmap, Point, Dim, Word, Word, u16) -> Result<(), BitmapError>,
    pub draw_bitmap: fn(&mut ApiBitmap, Point, &ApiBitmap) -> Result<(), BitmapError>,
    pub draw_sub_bitmap: fn(&mut ApiBitmap, Point, &ApiBitmap, Point, Dim) -> Result<(), BitmapError>,
}

macro_rules! api_table {
    ($depth:expr) => {
        Api {
            version: API_VERSION,
            bits_per_pixel: $depth,

            required_size: |dim| required_size(dim, $depth),
            new_bitmap: |dim| Bitmap::new(dim, $depth),
            set_data: ApiBitmap::set_data,
            bound_point: ApiBitmap::bound_point,

            flip_x: ApiBitmap::flip_x,
            flip_y: ApiBitmap::flip_y,
            flip_xy: ApiBitmap::flip_xy,
            shift: ApiBitmap::shift,

            cursor: ApiBitmap::cursor,
            cursor_inc_x: Cursor::inc_x,
            cursor_dec_x: Cursor::dec_x,
            cursor_inc_y: Cursor::inc_y,
            cursor_dec_y: Cursor::dec_y,
            cursor_get_pixel: ApiBitmap::next_pixel,
            cursor_draw_pixel: ApiBitmap::draw_next_pixel,
            cursor_draw_hline: ApiBitmap::draw_hline,
            cursor_invert_hline: ApiBitmap::invert_hline,
            cursor_clear_hline: ApiBitmap::clear_hline,
            cursor_draw_cursor: ApiBitmap::draw_cursor::<Vec<Word>>,
            cursor_draw_pattern: ApiBitmap::draw_pattern,
            cursor_shift_right: ApiBitmap::shift_right,
            cursor_shift_left: ApiBitmap::shift_left,

            get_pixel: ApiBitmap::get_pixel,
            draw_pixel: ApiBitmap::draw_pixel,
            draw_line: ApiBitmap::draw_line,
            draw_rectangle: ApiBitmap::draw_rectangle,
            invert_rectangle: ApiBitmap::invert_rectangle,
            clear_rectangle: ApiBitmap::clear_rectangle,
            draw_pour: ApiBitmap::draw_pour,
            fill_pattern: ApiBitmap::fill_pattern,
            draw_bitmap: ApiBitmap::draw_bitmap::<Vec<Word>>,
            draw_sub_bitmap: ApiBitmap::draw_sub_bitmap::<Vec<Word>>,
        }
    };
}

static API_1BPP: Api = api_table!(BitDepth::One);
static API_2BPP: Api = api_table!(BitDepth::Two);
static API_4BPP: Api = api_table!(BitDepth::Four);
static API_8BPP: Api = api_table!(BitDepth::Eight);

/// The dispatch table for `depth`.
pub fn api(depth: BitDepth) -> &'static Api {
    match depth {
        BitDepth::One => &API_1BPP,
        BitDepth::Two => &API_2BPP,
        BitDepth::Four => &API_4BPP,
        BitDepth::Eight => &API_8BPP,
    }
}

impl std::fmt::Debug for Api {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Api")
            .field("version", &format_args!("{:#x}", self.version))
            .field("bits_per_pixel", &self.bits_per_pixel)
            .finish_non_exhaustive()
    }
}

impl Api {
    /// Whether `bmap` was built at this table's depth.
    pub fn supports<S: AsRef<[Word]>>(&self, bmap: &Bitmap<S>) -> bool {
        bmap.depth() == self.bits_per_pixel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_match_depth() {
        for depth in BitDepth::ALL {
            let table = api(depth);
            assert_eq!(table.version, API_VERSION);
            assert_eq!(table.bits_per_pixel, depth);
            assert_eq!(
                (table.required_size)(Dim::new(64, 3)),
                required_size(Dim::new(64, 3), depth)
            );

            let bmap = (table.new_bitmap)(Dim::new(10, 10)).unwrap();
            assert_eq!(bmap.depth(), depth);
            assert!(table.supports(&bmap));
        }
        assert!(!api(BitDepth::One).supports(&Bitmap::new(Dim::new(1, 1), BitDepth::Two).unwrap()));
    }

    #[test]
    fn test_draw_through_table() {
        let table = api(BitDepth::Four);
        let mut bmap = (table.new_bitmap)(Dim::new(8, 2)).unwrap();
        bmap.set_pen_color(0xA).unwrap();

        let mut cursor = (table.cursor)(&bmap, Point::new(0, 1)).unwrap();
        (table.cursor_draw_hline)(&mut bmap, &mut cursor, 8);
        assert_eq!(bmap.words(), &[0, 0xAAAA_AAAA]);

        (table.flip_y)(&mut bmap);
        assert_eq!((table.get_pixel)(&bmap, Point::new(7, 0)), Ok(0xA));

        (table.clear_rectangle)(&mut bmap, Point::origin(), Dim::new(8, 2)).unwrap();
        assert_eq!(bmap.words(), &[0, 0]);
    }
}
