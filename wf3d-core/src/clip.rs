/// Cohen-Sutherland line clipping against the viewport rectangle
use bitflags::bitflags;
use nalgebra::Point2;

bitflags! {
    /// Region code of a raster point relative to the clip window.
    ///
    /// TOP means past the window's far y edge (`y > height`; raster y grows
    /// downward), BOTTOM means `y < 0`. The two bits of each axis are
    /// mutually exclusive by construction.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct OutCode: u8 {
        const LEFT   = 0b0001;
        const RIGHT  = 0b0010;
        const BOTTOM = 0b0100;
        const TOP    = 0b1000;
    }
}

/// The closed clip window `[0, width] x [0, height]` in raster space.
///
/// The window spans the full image, so a clipped endpoint may sit exactly
/// on `width` or `height`, one past the last pixel; sinks are expected to
/// ignore such plots.
#[derive(Clone, Copy, Debug)]
pub struct ClipRect {
    pub width: f32,
    pub height: f32,
}

impl ClipRect {
    pub fn new(image_width: u32, image_height: u32) -> Self {
        Self {
            width: image_width as f32,
            height: image_height as f32,
        }
    }

    /// Classify a point against the four window boundaries.
    pub fn outcode(&self, p: &Point2<f32>) -> OutCode {
        let mut code = OutCode::empty();
        if p.y > self.height {
            code |= OutCode::TOP;
        } else if p.y < 0.0 {
            code |= OutCode::BOTTOM;
        }
        if p.x > self.width {
            code |= OutCode::RIGHT;
        } else if p.x < 0.0 {
            code |= OutCode::LEFT;
        }
        code
    }

    /// Trim a segment to the clip window.
    ///
    /// Returns the clipped endpoints in their original order, or `None`
    /// when the segment lies entirely outside the window.
    pub fn clip_segment(&self, mut segment: [Point2<f32>; 2]) -> Option<[Point2<f32>; 2]> {
        let mut codes = segment.map(|p| self.outcode(&p));
        // A segment crosses at most four boundaries of a convex rectangle;
        // the cap keeps non-finite input from looping forever.
        let mut remaining = 4;
        loop {
            if (codes[0] | codes[1]).is_empty() {
                return Some(segment);
            }
            if !(codes[0] & codes[1]).is_empty() {
                return None;
            }
            if remaining == 0 {
                return None;
            }
            remaining -= 1;

            // Both endpoints can be outside in different regions; clip the
            // first one first.
            let outside = if !codes[0].is_empty() { 0 } else { 1 };
            let moved = self.intersect(&segment, codes[outside]);
            segment[outside] = moved;
            codes[outside] = self.outcode(&moved);
        }
    }

    /// Intersection of the segment's line with the first boundary the
    /// outcode violates, in fixed priority TOP, BOTTOM, RIGHT, LEFT.
    fn intersect(&self, segment: &[Point2<f32>; 2], code: OutCode) -> Point2<f32> {
        let [p0, p1] = *segment;
        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        // When a TOP/BOTTOM clip is reachable the endpoints straddle that
        // boundary, so dy != 0; likewise dx != 0 for RIGHT/LEFT. A vertical
        // segment keeps its x here because dx = 0.
        if code.contains(OutCode::TOP) {
            Point2::new(p0.x + dx * (self.height - p0.y) / dy, self.height)
        } else if code.contains(OutCode::BOTTOM) {
            Point2::new(p0.x + dx * (0.0 - p0.y) / dy, 0.0)
        } else if code.contains(OutCode::RIGHT) {
            Point2::new(self.width, p0.y + dy * (self.width - p0.x) / dx)
        } else {
            Point2::new(0.0, p0.y + dy * (0.0 - p0.x) / dx)
        }
    }
}
