/// Triangle-mesh geometry for wireframe rendering
use nalgebra::{Point3, Vector3};

/// A triangle face: three world-space corners plus the facet normal.
///
/// The wireframe pipeline only reads the corners; normals are kept
/// because STL files carry one per facet.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub normal: Vector3<f32>,
    pub vertices: [Point3<f32>; 3],
}

impl Triangle {
    pub fn new(normal: Vector3<f32>, vertices: [Point3<f32>; 3]) -> Self {
        Self { normal, vertices }
    }

    /// Build a triangle from its corners, deriving the normal from the
    /// counter-clockwise winding.
    pub fn from_points(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        let normal = (b - a).cross(&(c - a)).normalize();
        Self {
            normal,
            vertices: [a, b, c],
        }
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Axis-aligned bounds over every vertex, or `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<Aabb> {
        let mut points = self.triangles.iter().flat_map(|t| t.vertices.iter());
        let first = *points.next()?;
        let mut min = first;
        let mut max = first;
        for p in points {
            min.coords = min.coords.inf(&p.coords);
            max.coords = max.coords.sup(&p.coords);
        }
        Some(Aabb { min, max })
    }

    /// Create a simple cube mesh for testing
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let corners = [
            Point3::new(-h, -h, -h),
            Point3::new(h, -h, -h),
            Point3::new(h, h, -h),
            Point3::new(-h, h, -h),
            Point3::new(-h, -h, h),
            Point3::new(h, -h, h),
            Point3::new(h, h, h),
            Point3::new(-h, h, h),
        ];
        // Quads wound counter-clockwise as seen from outside the cube.
        let faces: [([usize; 4], Vector3<f32>); 6] = [
            ([4, 5, 6, 7], Vector3::z()),  // front
            ([0, 3, 2, 1], -Vector3::z()), // back
            ([3, 7, 6, 2], Vector3::y()),  // top
            ([0, 1, 5, 4], -Vector3::y()), // bottom
            ([1, 2, 6, 5], Vector3::x()),  // right
            ([0, 4, 7, 3], -Vector3::x()), // left
        ];

        let mut mesh = Self::with_capacity(faces.len() * 2);
        for (quad, normal) in faces {
            let [a, b, c, d] = quad.map(|i| corners[i]);
            mesh.add_triangle(Triangle::new(normal, [a, b, c]));
            mesh.add_triangle(Triangle::new(normal, [a, c, d]));
        }
        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

/// Axis-aligned bounding box of a mesh
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Aabb {
    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn half_extent(&self) -> Vector3<f32> {
        (self.max - self.min) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cube_has_twelve_triangles() {
        let mesh = Mesh::cube(2.0);
        assert_eq!(mesh.triangles.len(), 12);
    }

    #[test]
    fn cube_windings_match_face_normals() {
        let mesh = Mesh::cube(2.0);
        for triangle in &mesh.triangles {
            let [a, b, c] = triangle.vertices;
            let derived = (b - a).cross(&(c - a)).normalize();
            assert_relative_eq!(derived, triangle.normal, epsilon = 1e-6);
        }
    }

    #[test]
    fn bounding_box_spans_the_cube() {
        let mesh = Mesh::cube(4.0);
        let aabb = mesh.bounding_box().unwrap();
        assert_relative_eq!(aabb.min, Point3::new(-2.0, -2.0, -2.0));
        assert_relative_eq!(aabb.max, Point3::new(2.0, 2.0, 2.0));
        assert_relative_eq!(aabb.center(), Point3::origin());
        assert_relative_eq!(aabb.half_extent(), Vector3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn bounding_box_of_empty_mesh_is_none() {
        assert!(Mesh::new().bounding_box().is_none());
    }

    #[test]
    fn from_points_derives_the_winding_normal() {
        let t = Triangle::from_points(
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert_relative_eq!(t.normal, Vector3::z());
    }
}
