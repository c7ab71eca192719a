/// Orbit camera control around a focus point
use nalgebra::{Point3, Vector3};
use std::f32::consts::FRAC_PI_2;
use wf3d_core::Camera;

/// Interactive orbit pose: yaw and pitch around a target at a distance.
///
/// The camera itself is a fixed value; this state builds a fresh one per
/// pose change.
#[derive(Clone, Copy, Debug)]
pub struct OrbitState {
    pub target: Point3<f32>,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl OrbitState {
    /// Pitch stays short of +-90 degrees so `up` never parallels the
    /// view direction, which the camera basis requires.
    const MAX_PITCH: f32 = FRAC_PI_2 - 0.01;

    const MIN_DISTANCE: f32 = 0.05;

    pub fn new(target: Point3<f32>, distance: f32) -> Self {
        Self {
            target,
            distance: distance.max(Self::MIN_DISTANCE),
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Start at a distance that frames a sphere of `radius` around the
    /// target in a vertical field of view of `fov` degrees.
    pub fn framing(target: Point3<f32>, radius: f32, fov: f32) -> Self {
        let distance = radius / (fov.to_radians() / 2.0).tan() + radius;
        Self::new(target, distance)
    }

    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw += d_yaw;
        self.pitch = (self.pitch + d_pitch).clamp(-Self::MAX_PITCH, Self::MAX_PITCH);
    }

    pub fn zoom(&mut self, factor: f32) {
        self.distance = (self.distance * factor).max(Self::MIN_DISTANCE);
    }

    /// Eye position on the orbit sphere; yaw 0, pitch 0 looks down -z.
    pub fn eye(&self) -> Point3<f32> {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target
            + Vector3::new(
                self.distance * cos_pitch * sin_yaw,
                self.distance * sin_pitch,
                self.distance * cos_pitch * cos_yaw,
            )
    }

    /// Build the camera for the current pose.
    pub fn camera(
        &self,
        fov: f32,
        near: f32,
        far: f32,
        image_width: u32,
        image_height: u32,
    ) -> Camera {
        Camera::new(
            self.eye(),
            self.target,
            Vector3::y(),
            fov,
            near,
            far,
            image_width,
            image_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn resting_pose_sits_on_positive_z() {
        let orbit = OrbitState::new(Point3::origin(), 5.0);
        assert_relative_eq!(orbit.eye(), Point3::new(0.0, 0.0, 5.0), epsilon = 1e-6);
    }

    #[test]
    fn pitch_is_clamped_short_of_the_pole() {
        let mut orbit = OrbitState::new(Point3::origin(), 5.0);
        for _ in 0..100 {
            orbit.rotate(0.0, 0.5);
        }
        assert!(orbit.pitch < FRAC_PI_2);
        // The camera at the clamped pole must still be constructible and
        // keep the target centered.
        let camera = orbit.camera(60.0, 0.1, 100.0, 80, 24);
        let raster = camera.project_to_raster(&Point3::origin()).unwrap();
        assert_relative_eq!(raster.x, 40.0, epsilon = 1e-2);
        assert_relative_eq!(raster.y, 12.0, epsilon = 1e-2);
    }

    #[test]
    fn zoom_never_collapses_onto_the_target() {
        let mut orbit = OrbitState::new(Point3::origin(), 1.0);
        for _ in 0..200 {
            orbit.zoom(0.5);
        }
        assert!(orbit.distance >= 0.05);
    }

    #[test]
    fn framing_backs_off_past_the_radius() {
        let orbit = OrbitState::framing(Point3::origin(), 2.0, 60.0);
        assert!(orbit.distance > 2.0);
    }
}
