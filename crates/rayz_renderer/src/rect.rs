//! Axis-aligned rectangles and boxes built from them.

use crate::hittable::{HitRecord, Hittable, HittableList};
use crate::Material;
use rayz_math::{Aabb, Interval, Ray, Vec3};
use std::sync::Arc;

/// Which coordinate plane a rectangle lies in.
///
/// The plane is named after its two free axes; the third axis is fixed at `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    Xy,
    Xz,
    Yz,
}

impl Plane {
    /// Component indices as (first free axis, second free axis, fixed axis).
    #[inline]
    fn axes(self) -> (usize, usize, usize) {
        match self {
            Plane::Xy => (0, 1, 2),
            Plane::Xz => (0, 2, 1),
            Plane::Yz => (1, 2, 0),
        }
    }

    /// Unit vector along the fixed axis.
    fn normal(self) -> Vec3 {
        match self {
            Plane::Xy => Vec3::Z,
            Plane::Xz => Vec3::Y,
            Plane::Yz => Vec3::X,
        }
    }
}

/// Rectangle `[a0, a1] x [b0, b1]` in one coordinate plane, at `k` along
/// the remaining axis.
///
/// The outward normal is the positive fixed axis. (u, v) are the free
/// coordinates normalized to the rectangle's extents.
pub struct AxisRect {
    plane: Plane,
    a: Interval,
    b: Interval,
    k: f32,
    material: Arc<dyn Material>,
}

impl AxisRect {
    pub fn new(
        plane: Plane,
        a: Interval,
        b: Interval,
        k: f32,
        material: Arc<dyn Material>,
    ) -> Self {
        Self {
            plane,
            a,
            b,
            k,
            material,
        }
    }

    /// Rectangle in the XY plane at z = k.
    pub fn xy(x0: f32, x1: f32, y0: f32, y1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        Self::new(Plane::Xy, Interval::new(x0, x1), Interval::new(y0, y1), k, material)
    }

    /// Rectangle in the XZ plane at y = k.
    pub fn xz(x0: f32, x1: f32, z0: f32, z1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        Self::new(Plane::Xz, Interval::new(x0, x1), Interval::new(z0, z1), k, material)
    }

    /// Rectangle in the YZ plane at x = k.
    pub fn yz(y0: f32, y1: f32, z0: f32, z1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        Self::new(Plane::Yz, Interval::new(y0, y1), Interval::new(z0, z1), k, material)
    }
}

impl Hittable for AxisRect {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let (ia, ib, ik) = self.plane.axes();
        let origin = ray.origin();
        let direction = ray.direction();

        // Parallel to the plane
        if direction[ik] == 0.0 {
            return false;
        }

        let t = (self.k - origin[ik]) / direction[ik];
        if !ray_t.surrounds(t) {
            return false;
        }

        let a = origin[ia] + t * direction[ia];
        let b = origin[ib] + t * direction[ib];
        if !self.a.contains(a) || !self.b.contains(b) {
            return false;
        }

        rec.u = (a - self.a.min) / self.a.size();
        rec.v = (b - self.b.min) / self.b.size();
        rec.t = t;
        rec.set_face_normal(ray, self.plane.normal());
        rec.material = &*self.material;
        rec.p = ray.at(t);

        true
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        let (ia, ib, ik) = self.plane.axes();
        let mut lo = Vec3::ZERO;
        let mut hi = Vec3::ZERO;
        lo[ia] = self.a.min;
        hi[ia] = self.a.max;
        lo[ib] = self.b.min;
        hi[ib] = self.b.max;
        lo[ik] = self.k;
        hi[ik] = self.k;

        // from_points pads the flat axis
        Some(Aabb::from_points(lo, hi))
    }
}

/// Axis-aligned box made of six rectangles.
pub struct Cuboid {
    box_min: Vec3,
    box_max: Vec3,
    sides: HittableList,
}

impl Cuboid {
    /// Box spanning the corners `p0` (minimum) and `p1` (maximum).
    pub fn new(p0: Vec3, p1: Vec3, material: Arc<dyn Material>) -> Self {
        let (box_min, box_max) = (p0.min(p1), p0.max(p1));
        let mut sides = HittableList::new();

        let xs = Interval::new(box_min.x, box_max.x);
        let ys = Interval::new(box_min.y, box_max.y);
        let zs = Interval::new(box_min.z, box_max.z);
        let faces = [
            (Plane::Xy, xs, ys, box_max.z),
            (Plane::Xy, xs, ys, box_min.z),
            (Plane::Xz, xs, zs, box_max.y),
            (Plane::Xz, xs, zs, box_min.y),
            (Plane::Yz, ys, zs, box_max.x),
            (Plane::Yz, ys, zs, box_min.x),
        ];
        for (plane, a, b, k) in faces {
            sides.add(Arc::new(AxisRect::new(plane, a, b, k, material.clone())));
        }

        Self {
            box_min,
            box_max,
            sides,
        }
    }
}

impl Hittable for Cuboid {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        self.sides.hit(ray, ray_t, rec)
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        Some(Aabb::from_points(self.box_min, self.box_max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Lambertian;

    fn material() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Vec3::splat(0.73)))
    }

    fn range() -> Interval {
        Interval::new(0.001, f32::INFINITY)
    }

    #[test]
    fn test_xy_rect_hit_and_uv() {
        let rect = AxisRect::xy(0.0, 2.0, 0.0, 4.0, -3.0, material());
        let ray = Ray::new(Vec3::new(0.5, 3.0, 0.0), Vec3::NEG_Z, 0.0);
        let mut rec = HitRecord::default();

        assert!(rect.hit(&ray, range(), &mut rec));
        assert!((rec.t - 3.0).abs() < 1e-6);
        assert!((rec.u - 0.25).abs() < 1e-6);
        assert!((rec.v - 0.75).abs() < 1e-6);
        assert_eq!(rec.p, Vec3::new(0.5, 3.0, -3.0));
        // Ray travels along -z, so it sees the +z face
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_xz_rect_back_face() {
        let rect = AxisRect::xz(213.0, 343.0, 227.0, 332.0, 554.0, material());
        let ray = Ray::new(Vec3::new(278.0, 0.0, 278.0), Vec3::Y, 0.0);
        let mut rec = HitRecord::default();

        assert!(rect.hit(&ray, range(), &mut rec));
        assert!((rec.t - 554.0).abs() < 1e-3);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::NEG_Y);
    }

    #[test]
    fn test_yz_rect_misses_outside_bounds() {
        let rect = AxisRect::yz(0.0, 1.0, 0.0, 1.0, 5.0, material());
        let mut rec = HitRecord::default();

        let outside = Ray::new(Vec3::new(0.0, 2.0, 0.5), Vec3::X, 0.0);
        assert!(!rect.hit(&outside, range(), &mut rec));

        let inside = Ray::new(Vec3::new(0.0, 0.5, 0.5), Vec3::X, 0.0);
        assert!(rect.hit(&inside, range(), &mut rec));
        assert_eq!(rec.normal, Vec3::NEG_X);
    }

    #[test]
    fn test_rect_parallel_ray_misses() {
        let rect = AxisRect::xy(-1.0, 1.0, -1.0, 1.0, 0.0, material());
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::X, 0.0);
        let mut rec = HitRecord::default();

        assert!(!rect.hit(&ray, range(), &mut rec));
    }

    #[test]
    fn test_rect_crossing_on_range_ends_misses() {
        let rect = AxisRect::xy(-1.0, 1.0, -1.0, 1.0, -3.0, material());
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z, 0.0);
        let mut rec = HitRecord::default();

        // The crossing is at t = 3 exactly
        assert!(!rect.hit(&ray, Interval::new(3.0, f32::INFINITY), &mut rec));
        assert!(!rect.hit(&ray, Interval::new(0.001, 3.0), &mut rec));
        assert!(rect.hit(&ray, Interval::new(0.001, 3.001), &mut rec));
        assert_eq!(rec.t, 3.0);
    }

    #[test]
    fn test_rect_behind_ray_misses() {
        let rect = AxisRect::xy(-1.0, 1.0, -1.0, 1.0, 5.0, material());
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z, 0.0);
        let mut rec = HitRecord::default();

        assert!(!rect.hit(&ray, range(), &mut rec));
    }

    #[test]
    fn test_rect_bounding_box_is_padded() {
        let rect = AxisRect::xz(0.0, 555.0, 0.0, 555.0, 0.0, material());
        let bbox = rect.bounding_box(0.0, 1.0).unwrap();

        assert!(bbox.y.size() > 0.0);
        assert_eq!(bbox.x, Interval::new(0.0, 555.0));
        assert_eq!(bbox.z, Interval::new(0.0, 555.0));
    }

    #[test]
    fn test_cuboid_nearest_face() {
        let cuboid = Cuboid::new(Vec3::ZERO, Vec3::splat(2.0), material());
        let ray = Ray::new(Vec3::new(1.0, 1.0, 10.0), Vec3::NEG_Z, 0.0);
        let mut rec = HitRecord::default();

        assert!(cuboid.hit(&ray, range(), &mut rec));
        assert!((rec.t - 8.0).abs() < 1e-5);
        assert_eq!(rec.normal, Vec3::Z);

        let bbox = cuboid.bounding_box(0.0, 1.0).unwrap();
        assert_eq!(bbox.min(), Vec3::ZERO);
        assert_eq!(bbox.max(), Vec3::splat(2.0));
    }

    #[test]
    fn test_cuboid_hit_from_inside() {
        let cuboid = Cuboid::new(Vec3::splat(-1.0), Vec3::ONE, material());
        let ray = Ray::new(Vec3::ZERO, Vec3::X, 0.0);
        let mut rec = HitRecord::default();

        assert!(cuboid.hit(&ray, range(), &mut rec));
        assert!((rec.t - 1.0).abs() < 1e-6);
        assert!(!rec.front_face);
    }
}
