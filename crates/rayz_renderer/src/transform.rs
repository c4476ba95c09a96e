//! Instance wrappers that move a hittable without copying it.
//!
//! Rays are taken into the child's local frame, the child is intersected
//! there, and the resulting point and normal are taken back to world space.
//! The child's front-face decision is kept: rigid motions preserve the sign
//! of the ray/normal dot product.

use crate::hittable::{HitRecord, Hittable};
use rayz_math::{Aabb, Interval, Mat3, Ray, Vec3};
use std::sync::Arc;

/// Offsets a hittable by a fixed vector.
pub struct Translate {
    object: Arc<dyn Hittable>,
    offset: Vec3,
}

impl Translate {
    pub fn new(object: Arc<dyn Hittable>, offset: Vec3) -> Self {
        Self { object, offset }
    }
}

impl Hittable for Translate {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let moved = Ray::new(ray.origin() - self.offset, ray.direction(), ray.time());
        if !self.object.hit(&moved, ray_t, rec) {
            return false;
        }

        rec.p += self.offset;
        true
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Option<Aabb> {
        self.object
            .bounding_box(time0, time1)
            .map(|bbox| bbox.translate(self.offset))
    }
}

/// Rotates a hittable about the world Y axis.
pub struct RotateY {
    object: Arc<dyn Hittable>,
    /// Local to world
    rotation: Mat3,
    /// World to local
    inverse: Mat3,
}

impl RotateY {
    /// `angle` is in degrees, counter-clockwise when looking down -Y.
    pub fn new(object: Arc<dyn Hittable>, angle: f32) -> Self {
        let rotation = Mat3::from_rotation_y(angle.to_radians());
        Self {
            object,
            rotation,
            // Orthonormal, so the transpose is the inverse
            inverse: rotation.transpose(),
        }
    }
}

impl Hittable for RotateY {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let rotated = Ray::new(
            self.inverse * ray.origin(),
            self.inverse * ray.direction(),
            ray.time(),
        );
        if !self.object.hit(&rotated, ray_t, rec) {
            return false;
        }

        rec.p = self.rotation * rec.p;
        rec.normal = self.rotation * rec.normal;
        true
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Option<Aabb> {
        let bbox = self.object.bounding_box(time0, time1)?;
        let corners = bbox.corners().map(|corner| self.rotation * corner);
        Aabb::enclosing(&corners)
    }
}
