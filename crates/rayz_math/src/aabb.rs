use crate::{Interval, Vec3};

/// Thinnest extent an axis may have; flat primitives are padded to it.
const MIN_EXTENT: f32 = 0.0001;

/// Axis-aligned box stored as one [`Interval`] per axis.
///
/// Every constructor except [`Aabb::surrounding`] pads flat axes, so a
/// rectangle lying in a coordinate plane still has a box with volume.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// The box around nothing.
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        let thicken = |axis: Interval| {
            if axis.size() < MIN_EXTENT {
                axis.expand(MIN_EXTENT)
            } else {
                axis
            }
        };
        Self {
            x: thicken(x),
            y: thicken(y),
            z: thicken(z),
        }
    }

    /// Box with opposite corners `a` and `b`, given in any order.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let (lo, hi) = (a.min(b), a.max(b));
        Self::new(
            Interval::new(lo.x, hi.x),
            Interval::new(lo.y, hi.y),
            Interval::new(lo.z, hi.z),
        )
    }

    /// Smallest box enclosing all of `points`, or `None` for an empty slice.
    pub fn enclosing(points: &[Vec3]) -> Option<Aabb> {
        let (first, rest) = points.split_first()?;
        let (lo, hi) = rest
            .iter()
            .fold((*first, *first), |(lo, hi), &p| (lo.min(p), hi.max(p)));
        Some(Aabb::from_points(lo, hi))
    }

    /// Union of two boxes.
    pub fn surrounding(a: &Aabb, b: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&a.x, &b.x),
            y: Interval::surrounding(&a.y, &b.y),
            z: Interval::surrounding(&a.z, &b.z),
        }
    }

    pub fn min(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    pub fn max(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// All eight corners; bit i of the index picks max over min on axis i.
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min(), self.max());
        std::array::from_fn(|i| {
            Vec3::new(
                if i & 1 == 0 { lo.x } else { hi.x },
                if i & 2 == 0 { lo.y } else { hi.y },
                if i & 4 == 0 { lo.z } else { hi.z },
            )
        })
    }

    /// The same box moved by `offset`.
    pub fn translate(&self, offset: Vec3) -> Aabb {
        Aabb::from_points(self.min() + offset, self.max() + offset)
    }
}
