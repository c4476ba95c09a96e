//! Thin-lens camera for ray generation.

use crate::random::{gen_range, random_in_unit_disk};
use rand::RngCore;
use rayz_math::{Ray, Vec3};

/// Camera placement and lens parameters.
///
/// A builder for [`Camera`]: adjust with the `with_*` methods, then call
/// [`CameraSettings::build`] once before rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSettings {
    // Placement
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub vup: Vec3,

    // Optics
    pub vfov: f32,         // Vertical field of view in degrees
    pub aspect_ratio: f32, // Viewport width / height
    pub aperture: f32,     // Lens diameter, 0 = pinhole
    pub focus_dist: f32,   // Distance from camera to plane of perfect focus

    // Shutter interval
    pub time0: f32,
    pub time1: f32,
}

impl CameraSettings {
    /// Pinhole camera at the origin looking down -Z with a 90 degree FOV.
    pub fn new() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            aspect_ratio: 16.0 / 9.0,
            aperture: 0.0,
            focus_dist: 1.0,
            time0: 0.0,
            time1: 0.0,
        }
    }

    /// Eye point, target and the world direction that should read as up.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Field of view in degrees, lens diameter and focus distance.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    /// Set the viewport aspect ratio (width / height).
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set the shutter open and close times.
    pub fn with_shutter(mut self, time0: f32, time1: f32) -> Self {
        self.time0 = time0;
        self.time1 = time1;
        self
    }

    /// Derive the camera frame and viewport.
    pub fn build(&self) -> Camera {
        let viewport_height = 2.0 * (0.5 * self.vfov.to_radians()).tan();
        let viewport_width = self.aspect_ratio * viewport_height;

        // Orthonormal frame: w points back at the eye, u right, v up
        let w = (self.look_from - self.look_at)
            .try_normalize()
            .unwrap_or(Vec3::Z);
        // vup parallel to the view direction leaves the frame undefined
        let u = self
            .vup
            .cross(w)
            .try_normalize()
            .unwrap_or_else(|| w.any_orthonormal_vector());
        let v = w.cross(u);

        let origin = self.look_from;
        let horizontal = self.focus_dist * viewport_width * u;
        let vertical = self.focus_dist * viewport_height * v;
        let lower_left_corner = origin - horizontal / 2.0 - vertical / 2.0 - self.focus_dist * w;

        Camera {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: self.aperture / 2.0,
            time0: self.time0,
            time1: self.time1,
        }
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable camera; many threads may generate rays from it at once.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
    time0: f32,
    time1: f32,
}

impl Camera {
    /// Ray through the normalized viewport position (s, t).
    ///
    /// (0, 0) is the lower-left corner and (1, 1) the upper-right. The origin
    /// is jittered over the lens disk and the time is drawn uniformly from
    /// the shutter interval.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let ray_origin = self.origin + offset;
        let ray_direction =
            self.lower_left_corner + s * self.horizontal + t * self.vertical - ray_origin;
        let ray_time = gen_range(rng, self.time0, self.time1);

        Ray::new(ray_origin, ray_direction, ray_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_camera_frame_is_orthonormal() {
        let camera = CameraSettings::new()
            .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
            .build();

        assert!((camera.u.length() - 1.0).abs() < 1e-5);
        assert!((camera.v.length() - 1.0).abs() < 1e-5);
        assert!((camera.w.length() - 1.0).abs() < 1e-5);
        assert!(camera.u.dot(camera.v).abs() < 1e-5);
        assert!(camera.u.dot(camera.w).abs() < 1e-5);
        assert!(camera.v.dot(camera.w).abs() < 1e-5);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = CameraSettings::new()
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0)
            .with_aspect_ratio(1.0)
            .build();
        let mut rng = StdRng::seed_from_u64(42);

        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(ray.origin(), Vec3::ZERO);
        assert!(ray.direction().abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-6));
        assert_eq!(camera.w, Vec3::Z);
    }

    #[test]
    fn test_viewport_corners() {
        // 90 degree vertical FOV at focus distance 1 spans [-1, 1] vertically
        let camera = CameraSettings::new()
            .with_lens(90.0, 0.0, 1.0)
            .with_aspect_ratio(2.0)
            .build();
        let mut rng = StdRng::seed_from_u64(1);

        let lower_left = camera.get_ray(0.0, 0.0, &mut rng);
        assert!(lower_left
            .direction()
            .abs_diff_eq(Vec3::new(-2.0, -1.0, -1.0), 1e-5));

        let upper_right = camera.get_ray(1.0, 1.0, &mut rng);
        assert!(upper_right
            .direction()
            .abs_diff_eq(Vec3::new(2.0, 1.0, -1.0), 1e-5));
    }

    #[test]
    fn test_aperture_jitters_origin_within_lens() {
        let camera = CameraSettings::new()
            .with_position(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y)
            .with_lens(40.0, 2.0, 5.0)
            .build();
        let mut rng = StdRng::seed_from_u64(9);

        let mut moved = false;
        for _ in 0..50 {
            let ray = camera.get_ray(0.5, 0.5, &mut rng);
            let offset = ray.origin() - camera.origin;
            assert!(offset.length() < 1.0 + 1e-5);
            assert!(offset.z.abs() < 1e-5);
            // Every lens sample still converges on the focus plane
            let focus_point = ray.at(1.0);
            assert!(focus_point.abs_diff_eq(Vec3::ZERO, 1e-4));
            moved |= offset.length() > 1e-3;
        }
        assert!(moved);
    }

    #[test]
    fn test_ray_time_within_shutter() {
        let camera = CameraSettings::new().with_shutter(0.25, 0.75).build();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..200 {
            let time = camera.get_ray(0.3, 0.6, &mut rng).time();
            assert!((0.25..=0.75).contains(&time));
        }

        let instant = CameraSettings::new().with_shutter(0.5, 0.5).build();
        assert_eq!(instant.get_ray(0.5, 0.5, &mut rng).time(), 0.5);
    }

    #[test]
    fn test_degenerate_up_vector_stays_finite() {
        let camera = CameraSettings::new()
            .with_position(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0), Vec3::Y)
            .build();
        let mut rng = StdRng::seed_from_u64(3);

        let ray = camera.get_ray(0.2, 0.8, &mut rng);
        assert!(ray.direction().is_finite());
    }
}
