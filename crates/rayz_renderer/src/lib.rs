//! Rayz renderer - CPU path tracing
//!
//! A Monte Carlo path tracer in the style of the "Ray Tracing in One
//! Weekend" series: spheres, axis-aligned rectangles and boxes, instance
//! transforms, four material models and procedural or image textures.

mod bucket;
mod camera;
mod hittable;
mod image_io;
mod material;
mod perlin;
pub mod random;
mod rect;
mod renderer;
mod sphere;
mod texture;
mod transform;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, CameraSettings};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use image_io::{save_rgb8, ImageData, ImageIoError, ImageIoResult};
pub use material::{
    reflect, refract, Color, Dielectric, DiffuseLight, Lambertian, Material, Metal, ScatterResult,
};
pub use perlin::{Perlin, DEFAULT_PERLIN_SEED};
pub use rect::{AxisRect, Cuboid, Plane};
pub use renderer::{
    color_to_rgb8, linear_to_gamma, ray_color, render, render_pixel, ImageBuffer, RenderConfig,
    SELF_INTERSECTION_BIAS,
};
pub use sphere::{MovingSphere, Sphere};
pub use texture::{CheckerTexture, ImageTexture, NoiseTexture, SolidColor, Texture};
pub use transform::{RotateY, Translate};

/// Re-export Vec3 and common math types from rayz_math
pub use rayz_math::{Aabb, Interval, Ray, Vec3};
