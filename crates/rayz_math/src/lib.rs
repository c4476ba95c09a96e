//! Rayz math - vectors, rays, intervals and bounding boxes.
//!
//! Vector algebra comes straight from `glam`; `Vec3` doubles as point and
//! linear RGB color throughout the renderer.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
