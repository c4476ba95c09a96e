//! Surfaces a ray can strike, and the record of where it struck.

use crate::material::{Material, ScatterResult};
use rand::RngCore;
use rayz_math::{Aabb, Interval, Ray, Vec3};
use std::sync::Arc;

/// Stand-in referenced by a record before anything has been hit. Absorbs.
struct Unassigned;

impl Material for Unassigned {
    fn scatter(&self, _: &Ray, _: &HitRecord, _: &mut dyn RngCore) -> Option<ScatterResult> {
        None
    }
}

static UNASSIGNED: Unassigned = Unassigned;

/// Geometry and shading inputs at a ray/surface intersection.
///
/// The record borrows the material of the surface that was hit, so it cannot
/// outlive the scene.
#[derive(Clone)]
pub struct HitRecord<'a> {
    pub p: Vec3,
    /// Unit normal on the side the ray arrived from
    pub normal: Vec3,
    pub material: &'a dyn Material,
    /// Texture coordinates, each in [0, 1] for the built-in primitives
    pub u: f32,
    pub v: f32,
    pub t: f32,
    /// True when the ray arrived against the outward normal
    pub front_face: bool,
}

impl Default for HitRecord<'_> {
    fn default() -> Self {
        Self {
            p: Vec3::ZERO,
            normal: Vec3::ZERO,
            material: &UNASSIGNED,
            u: 0.0,
            v: 0.0,
            t: 0.0,
            front_face: false,
        }
    }
}

impl HitRecord<'_> {
    /// Store `outward_normal` (unit length) oriented against `ray`.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = outward_normal.dot(ray.direction()) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Anything with a surface.
pub trait Hittable: Send + Sync {
    /// Intersect `ray` with parameters strictly inside `ray_t`.
    ///
    /// On a hit, fills `rec` and returns true. On a miss, returns false and
    /// `rec` keeps whatever it held before.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool;

    /// Bounds over the shutter interval `[time0, time1]`, or `None` when the
    /// object is unbounded.
    fn bounding_box(&self, time0: f32, time1: f32) -> Option<Aabb>;
}

/// Ordered collection that reports the nearest hit of its members.
///
/// The search window shrinks to each accepted `t` and roots must lie strictly
/// inside it, so among members at exactly the same distance the first one
/// added wins.
#[derive(Clone, Default)]
pub struct HittableList {
    objects: Vec<Arc<dyn Hittable>>,
}

impl HittableList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let mut nearest: Option<f32> = None;

        for object in &self.objects {
            let window = ray_t.with_max(nearest.unwrap_or(ray_t.max));
            if object.hit(ray, window, rec) {
                nearest = Some(rec.t);
            }
        }

        nearest.is_some()
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Option<Aabb> {
        if self.objects.is_empty() {
            return None;
        }
        self.objects.iter().try_fold(Aabb::EMPTY, |acc, object| {
            let bbox = object.bounding_box(time0, time1)?;
            Some(Aabb::surrounding(&acc, &bbox))
        })
    }
}
