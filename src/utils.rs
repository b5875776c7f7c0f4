//! Utils

use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::{Color, Vec3};

/// A vector as it appears in config files, `[x, y, z]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SerdeVector(pub f64, pub f64, pub f64);
impl From<SerdeVector> for Vec3 {
    fn from(v: SerdeVector) -> Self {
        Vec3::new(v.0, v.1, v.2)
    }
}
impl From<Vec3> for SerdeVector {
    fn from(v: Vec3) -> Self {
        Self(v[0], v[1], v[2])
    }
}

/// `incident + 2(n.i)n`
///
/// Not a mirror reflection: the tangent part is kept and the normal part is tripled, so
/// `(0, 0, -1)` against `+z` becomes `(0, 0, -3)`.
pub fn reflect(incident: &Vec3, normal: &Vec3) -> Vec3 {
    *incident + 2.0 * normal.dot(incident) * *normal
}

/// Bend `incident` through a boundary with refraction ratio `n = n1 / n2`
///
/// Returns `None` when `sin^2(theta_t)` exceeds one (total internal reflection).
pub fn refract(incident: &Vec3, normal: &Vec3, n: f64) -> Option<Vec3> {
    let cos_i = normal.dot(incident);
    let sin_t2 = n * n * (1.0 * cos_i * cos_i);
    if sin_t2 > 1.0 {
        return None;
    }
    let cos_t = (1.0 - sin_t2).sqrt();
    Some(n * *incident + (n * cos_i * cos_t) * *normal)
}

/// Convert a linear color into an 8-bit pixel
///
/// Channels are clamped to [0, 1]. NaN channels come out black.
pub fn get_pixel(color: &Color) -> Rgb<u8> {
    Rgb([
        scale_color(color[0]),
        scale_color(color[1]),
        scale_color(color[2]),
    ])
}

/// scale the color to between 0 and 255
fn scale_color(val: f64) -> u8 {
    if val.is_nan() {
        return 0;
    }
    (255.0 * val.clamp(0.0, 1.0)).round() as u8
}
