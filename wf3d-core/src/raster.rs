/// Pixel sink abstraction and incremental line rasterization
use nalgebra::Point2;

/// RGBA draw color, 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// A 2D pixel sink the rasterizer draws into.
///
/// Plotted coordinates normally fall in `[0, width) x [0, height)`, but a
/// clipped endpoint can sit exactly on the window's far edge, so `plot`
/// may receive `x == width` or `y == height`. Implementations must ignore
/// plots outside their bounds.
pub trait DrawSurface {
    fn set_draw_color(&mut self, color: Rgba);
    fn plot(&mut self, x: i32, y: i32);
}

/// Rasterize a segment by stepping a unit direction vector.
///
/// Plots `floor(length)` pixels starting at `p0`, truncating each position
/// to integers. The endpoint `p1` itself is not plotted; segments shorter
/// than one pixel plot nothing.
pub fn draw_line<S>(surface: &mut S, p0: Point2<f32>, p1: Point2<f32>)
where
    S: DrawSurface + ?Sized,
{
    let direction = p1 - p0;
    let length = direction.norm();
    let steps = length.floor() as u32;
    if steps == 0 {
        return;
    }
    let step = direction / length;
    let mut cursor = p0;
    for _ in 0..steps {
        surface.plot(cursor.x as i32, cursor.y as i32);
        cursor += step;
    }
}
