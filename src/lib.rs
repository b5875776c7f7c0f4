//! Whitted-style ray tracer
//!
//! Rays are cast from an eye point through every pixel and shaded with a Phong model against a
//! single point light. Reflection and refraction bounce them up to a caller supplied depth.

use nalgebra::Vector3;

pub mod cameras;
pub mod config;
pub mod error;
pub mod objects;
pub mod render;
pub mod scene;
pub mod tracer;
pub mod utils;

pub type Vec3 = Vector3<f64>;
pub type Point = Vec3;
pub type Color = Vec3;

/// Prelude
pub mod prelude {
    pub use crate::cameras::{Camera, CameraConfig};
    pub use crate::config::{load_config, RenderConfig};
    pub use crate::error::{ConfigError, Error};
    pub use crate::objects::{Material, Sphere, Surface, SurfaceObj};
    pub use crate::render::{render, Framebuffer, RenderSettings};
    pub use crate::scene::{Scene, SceneConfig};
    pub use crate::tracer::Tracer;
    pub use crate::{Color, Point, Ray, Vec3};
}

/// The ray in ray tracing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub orig: Point,
    pub dir: Vec3,
}
impl Ray {
    /// The direction is stored as given; see [`Ray::normalized`]
    pub fn new(orig: Point, dir: Vec3) -> Self {
        Self { orig, dir }
    }

    pub fn position_at(&self, t: f64) -> Point {
        self.orig + t * self.dir
    }

    /// Same origin, unit length direction
    pub fn normalized(&self) -> Self {
        Self {
            orig: self.orig,
            dir: self.dir.normalize(),
        }
    }
}
