/// Scene driver: project triangle edges, clip them, rasterize the rest
use crate::clip::ClipRect;
use crate::geometry::Mesh;
use crate::projection::Camera;
use crate::raster::{draw_line, DrawSurface, Rgba};

/// Vertex index pairs forming the sides of a triangle.
const EDGES: [(usize, usize); 3] = [(0, 1), (0, 2), (1, 2)];

/// Draw one mesh's wireframe.
///
/// Each triangle's edges are drawn in white when both endpoints project as
/// visible; edges with an invisible endpoint are skipped silently, and the
/// survivors are clipped to the image rectangle before rasterization.
/// Edges are drawn in triangle order with no depth sorting, so overlapping
/// geometry does not occlude.
pub fn render_mesh<S>(camera: &Camera, mesh: &Mesh, surface: &mut S)
where
    S: DrawSurface + ?Sized,
{
    let window = ClipRect::new(camera.image_width, camera.image_height);
    for triangle in &mesh.triangles {
        surface.set_draw_color(Rgba::WHITE);
        let projected = triangle.vertices.map(|v| camera.project_to_raster(&v));
        for (a, b) in EDGES {
            if let (Some(p0), Some(p1)) = (projected[a], projected[b]) {
                if let Some([q0, q1]) = window.clip_segment([p0, p1]) {
                    draw_line(surface, q0, q1);
                }
            }
        }
    }
}

/// Draw every mesh in the scene, in order.
pub fn render_scene<S>(camera: &Camera, meshes: &[Mesh], surface: &mut S)
where
    S: DrawSurface + ?Sized,
{
    for mesh in meshes {
        render_mesh(camera, mesh, surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Triangle;
    use nalgebra::Point3;

    #[derive(Default)]
    struct Recorder {
        colors: Vec<Rgba>,
        pixels: Vec<(i32, i32)>,
    }

    impl DrawSurface for Recorder {
        fn set_draw_color(&mut self, color: Rgba) {
            self.colors.push(color);
        }

        fn plot(&mut self, x: i32, y: i32) {
            self.pixels.push((x, y));
        }
    }

    impl Recorder {
        /// Number of contiguous pixel runs; a gap wider than one pixel
        /// starts a new run.
        fn runs(&self) -> usize {
            let mut runs = 0;
            let mut prev: Option<(i32, i32)> = None;
            for &(x, y) in &self.pixels {
                if let Some((px, py)) = prev {
                    if (x - px).abs() > 1 || (y - py).abs() > 1 {
                        runs += 1;
                    }
                } else {
                    runs = 1;
                }
                prev = Some((x, y));
            }
            runs
        }
    }

    fn triangle_mesh(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_triangle(Triangle::from_points(a, b, c));
        mesh
    }

    #[test]
    fn centered_triangle_draws_three_edges_in_white() {
        let camera = Camera::default();
        let mesh = triangle_mesh(
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.866, -0.5, 0.0),
            Point3::new(-0.866, -0.5, 0.0),
        );
        let mut surface = Recorder::default();
        render_mesh(&camera, &mesh, &mut surface);

        assert_eq!(surface.colors, vec![Rgba::WHITE]);
        assert_eq!(surface.runs(), 3);
        for &(x, y) in &surface.pixels {
            assert!((0..600).contains(&x), "x out of bounds: {x}");
            assert!((0..400).contains(&y), "y out of bounds: {y}");
        }
    }

    #[test]
    fn edges_touching_an_invisible_vertex_are_skipped() {
        let camera = Camera::default();
        // The third vertex sits behind the eye, killing two of the edges.
        let mesh = triangle_mesh(
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.866, -0.5, 0.0),
            Point3::new(0.0, 0.0, 10.0),
        );
        let mut surface = Recorder::default();
        render_mesh(&camera, &mesh, &mut surface);

        assert!(!surface.pixels.is_empty());
        assert_eq!(surface.runs(), 1);
    }

    #[test]
    fn band_edges_are_clipped_to_the_image() {
        let camera = Camera::default();
        // First vertex projects past the right image edge but stays visible
        // (landscape overscan band); its edges must be trimmed at x = 600.
        let mesh = triangle_mesh(
            Point3::new(9.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, -1.0, 0.0),
        );
        let mut surface = Recorder::default();
        render_mesh(&camera, &mesh, &mut surface);

        let max_x = surface.pixels.iter().map(|p| p.0).max().unwrap();
        assert_eq!(max_x, 600, "clip should stop the band edges at the window");
        // Both band edges were drawn, not skipped.
        assert!(surface.pixels.len() > 600);
    }

    #[test]
    fn render_scene_visits_every_mesh() {
        let camera = Camera::default();
        let near_triangle = triangle_mesh(
            Point3::new(0.0, 1.0, 1.0),
            Point3::new(1.0, -0.5, 1.0),
            Point3::new(-1.0, -0.5, 1.0),
        );
        let far_triangle = triangle_mesh(
            Point3::new(0.0, 1.0, -1.0),
            Point3::new(1.0, -0.5, -1.0),
            Point3::new(-1.0, -0.5, -1.0),
        );

        let mut separate = 0;
        for mesh in [&near_triangle, &far_triangle] {
            let mut surface = Recorder::default();
            render_mesh(&camera, mesh, &mut surface);
            separate += surface.pixels.len();
        }

        let mut combined = Recorder::default();
        render_scene(
            &camera,
            &[near_triangle, far_triangle],
            &mut combined,
        );
        assert_eq!(combined.colors.len(), 2);
        assert_eq!(combined.pixels.len(), separate);
    }
}
