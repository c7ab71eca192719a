/// Camera pose, look-at basis, and the world-to-raster transform chain
use nalgebra::{Matrix3, Matrix4, Point2, Point3, Vector3, Vector4};

/// A pinhole camera with a fixed pose.
///
/// Every derived quantity (basis, matrices, viewport half-extents) is
/// computed once at construction; to move the camera, build a new one.
/// Treat the fields as read-only.
#[derive(Debug, Clone)]
pub struct Camera {
    pub from: Point3<f32>,
    pub at: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub image_width: u32,
    pub image_height: u32,
    /// Viewport half-extents: `top = tan(fov/2)`, `right = top * aspect`.
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub axis_x: Vector3<f32>,
    pub axis_y: Vector3<f32>,
    pub axis_z: Vector3<f32>,
    pub cam_to_world: Matrix4<f32>,
    pub world_to_camera: Matrix4<f32>,
    projection: Matrix4<f32>,
    normalization: Matrix4<f32>,
}

impl Camera {
    /// Precondition: `0 < near < far`, nonzero image dimensions, `from != at`,
    /// and `up` not parallel to the view direction.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        from: Point3<f32>,
        at: Point3<f32>,
        up: Vector3<f32>,
        fov: f32,
        near: f32,
        far: f32,
        image_width: u32,
        image_height: u32,
    ) -> Self {
        debug_assert!(
            near > 0.0 && near < far,
            "near/far planes must satisfy 0 < near < far"
        );
        debug_assert!(
            image_width > 0 && image_height > 0,
            "image dimensions must be nonzero"
        );

        let (axis_x, axis_y, axis_z) = Self::orthonormal_basis(from, at, up);
        let cam_to_world = Matrix4::from_columns(&[
            axis_x.to_homogeneous(),
            axis_y.to_homogeneous(),
            axis_z.to_homogeneous(),
            from.to_homogeneous(),
        ]);
        // The rotation part is orthonormal, so the inverse is its transpose
        // with the translation counter-rotated.
        let inv_rotation = Matrix3::from_columns(&[axis_x, axis_y, axis_z]).transpose();
        let mut world_to_camera = inv_rotation.to_homogeneous();
        let back = inv_rotation * -from.coords;
        world_to_camera.set_column(3, &Vector4::new(back.x, back.y, back.z, 1.0));

        let aspect = image_width as f32 / image_height as f32;
        let top = (fov.to_radians() / 2.0).tan();
        let right = top * aspect;
        let bottom = -top;
        let left = -right;

        // Screen space: x and y scaled onto the near plane, depth untouched.
        let projection = Matrix4::new(
            near, 0.0, 0.0, 0.0, //
            0.0, near, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        );
        // Frustum normalization: near-plane rectangle to [-1,1] on x/y,
        // depth [near,far] to [-1,1], homogeneous divide by -z.
        let normalization = Matrix4::new(
            2.0 / (near * (right - left)),
            0.0,
            0.0,
            0.0,
            0.0,
            2.0 / (near * (top - bottom)),
            0.0,
            0.0,
            0.0,
            0.0,
            -(far + near) / (far - near),
            -2.0 * far * near / (far - near),
            0.0,
            0.0,
            -1.0,
            0.0,
        );

        Self {
            from,
            at,
            up,
            fov,
            near,
            far,
            image_width,
            image_height,
            left,
            right,
            top,
            bottom,
            axis_x,
            axis_y,
            axis_z,
            cam_to_world,
            world_to_camera,
            projection,
            normalization,
        }
    }

    /// Gram-Schmidt look-at basis: `axis_z` points from `at` back to `from`,
    /// `axis_y` is `up` with its `axis_z` component removed.
    fn orthonormal_basis(
        from: Point3<f32>,
        at: Point3<f32>,
        up: Vector3<f32>,
    ) -> (Vector3<f32>, Vector3<f32>, Vector3<f32>) {
        let gaze = from - at;
        debug_assert!(gaze.norm_squared() > 0.0, "from and at must be distinct");
        let axis_z = gaze.normalize();
        let rejected = up - (up.dot(&axis_z) / axis_z.dot(&axis_z)) * axis_z;
        debug_assert!(
            rejected.norm_squared() > 1e-12,
            "up must not be parallel to the view direction"
        );
        let axis_y = rejected.normalize();
        let axis_x = axis_y.cross(&axis_z).normalize();
        (axis_x, axis_y, axis_z)
    }

    /// Project a world-space point to raster coordinates.
    ///
    /// Returns `None` for points outside the view volume: behind the eye,
    /// nearer than `near`, farther than `far`, or past the `right`/`top`
    /// bounds. The bounds are the tan-based half-extents, so a landscape
    /// camera admits a horizontal band whose raster x lies outside
    /// `[0, image_width]`; the line clipper trims those segments.
    pub fn project_to_raster(&self, world: &Point3<f32>) -> Option<Point2<f32>> {
        let p_camera = self.world_to_camera.transform_point(world);
        // The camera looks down -z; the eye plane has no forward projection.
        if p_camera.z >= 0.0 {
            return None;
        }
        let p_screen = self.projection.transform_point(&p_camera);
        let ndc = self.normalization.transform_point(&p_screen);
        if ndc.x.abs() > self.right || ndc.y.abs() > self.top || ndc.z.abs() > 1.0 {
            return None;
        }
        Some(Point2::new(
            (1.0 + ndc.x) / 2.0 * self.image_width as f32,
            (1.0 - ndc.y) / 2.0 * self.image_height as f32,
        ))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Point3::new(0.0, 0.0, 5.0),
            Point3::origin(),
            Vector3::y(),
            90.0,
            0.1,
            100.0,
            600,
            400,
        )
    }
}
