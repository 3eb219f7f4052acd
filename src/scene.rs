//! Built-in scenes rendered by the command-line tool
//!
//! Each scene draws with the bitmap's current pen and exercises a different
//! slice of the engine: shapes and pour, pattern fills, and blits with
//! transforms.

use crate::graphics::{Bitmap, BitmapError, Coord, Dim, Point, Word};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scene {
    /// Frame, diagonals, a filled and an inverted block, then a pour.
    Demo,
    /// Single-pixel checkerboard.
    Checker,
    /// A small sprite tiled across the bitmap, mirrored and nudged.
    Blit,
}

impl Scene {
    pub const ALL: [Scene; 3] = [Scene::Demo, Scene::Checker, Scene::Blit];

    pub fn name(self) -> &'static str {
        match self {
            Scene::Demo => "demo",
            Scene::Checker => "checker",
            Scene::Blit => "blit",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|scene| scene.name() == name)
    }
}

/// Draw `scene` into `bmap`.
pub fn render<S>(scene: Scene, bmap: &mut Bitmap<S>) -> Result<(), BitmapError>
where
    S: AsRef<[Word]> + AsMut<[Word]>,
{
    log::debug!(
        "Rendering {} scene into {}x{} {} bitmap",
        scene.name(),
        bmap.width(),
        bmap.height(),
        bmap.depth()
    );
    match scene {
        Scene::Demo => demo(bmap),
        Scene::Checker => checker(bmap),
        Scene::Blit => blit(bmap),
    }
}

fn demo<S>(bmap: &mut Bitmap<S>) -> Result<(), BitmapError>
where
    S: AsRef<[Word]> + AsMut<[Word]>,
{
    // placement math in i32; every result is back inside the bitmap
    let (w, h) = (i32::from(bmap.width()), i32::from(bmap.height()));
    let at = |x: i32, y: i32| Point::new(x as Coord, y as Coord);
    let (right, bottom) = (bmap.x_max(), bmap.y_max());

    bmap.draw_line(Point::new(0, 0), Point::new(right, 0));
    bmap.draw_line(Point::new(right, 0), Point::new(right, bottom));
    bmap.draw_line(Point::new(right, bottom), Point::new(0, bottom));
    bmap.draw_line(Point::new(0, bottom), Point::new(0, 0));
    bmap.draw_line(Point::new(0, 0), Point::new(right, bottom));
    bmap.draw_line(Point::new(right, 0), Point::new(0, bottom));

    let block = Dim::new((w / 4) as u16, (h / 4) as u16);
    bmap.draw_rectangle(at(w * 3 / 8, h * 3 / 8), block)?;
    bmap.invert_rectangle(at(w / 8, h * 5 / 8), block)?;

    // left wedge between the frame and the diagonals
    if w > 4 && h > 4 {
        bmap.draw_pour(at(1, h / 2))?;
    }
    Ok(())
}

fn checker<S>(bmap: &mut Bitmap<S>) -> Result<(), BitmapError>
where
    S: AsRef<[Word]> + AsMut<[Word]>,
{
    let dim = bmap.dim();
    bmap.fill_pattern(Point::origin(), dim, 0x5555_5555, 0xAAAA_AAAA, 1)
}

fn blit<S>(bmap: &mut Bitmap<S>) -> Result<(), BitmapError>
where
    S: AsRef<[Word]> + AsMut<[Word]>,
{
    const SPRITE: u16 = 8;
    const STEP: Coord = 12;

    let mut sprite = Bitmap::new(Dim::new(SPRITE, SPRITE), bmap.depth())?;
    sprite.set_pen(bmap.pen())?;
    sprite.draw_rectangle(Point::new(0, 0), Dim::new(SPRITE, 2))?;
    sprite.draw_rectangle(Point::new(0, 0), Dim::new(2, SPRITE))?;
    sprite.draw_line(Point::new(2, 2), Point::new(7, 7));

    let (w, h) = (bmap.width() as Coord, bmap.height() as Coord);
    for y in (0..h).step_by(STEP as usize) {
        for x in (0..w).step_by(STEP as usize) {
            bmap.draw_bitmap(Point::new(x, y), &sprite)?;
        }
    }

    bmap.flip_x();
    if w > 2 && h > 2 {
        let region = Dim::new((w - 2) as u16, (h - 2) as u16);
        bmap.shift(Point::new(1, 1), Point::origin(), region)?;
    }
    Ok(())
}
