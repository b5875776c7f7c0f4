//! Recursive color accumulation
use crate::{objects::Surface, scene::Scene, Color, Point, Ray};

/// Color returned for rays that escape the scene
pub const BACKGROUND: Color = Color::new(0.0, 0.0, 1.0);
/// Stand-in for "infinitely far". Hits at or beyond it count as misses.
pub const MISS_DISTANCE: f64 = 100_000.0;
/// Light reaching a point whose shadow ray is blocked
pub const SHADOW_ATTENUATION: f64 = 0.5;
/// Weight of each reflected and refracted contribution
pub const SECONDARY_WEIGHT: f64 = 0.3;
pub const AIR_INDEX: f64 = 1.0;
pub const WATER_INDEX: f64 = 1.33;

/// The nearest surface along a ray
pub struct Hit<'a> {
    pub surface: &'a (dyn Surface + Send + Sync),
    pub t: f64,
}

/// Traces rays against a borrowed scene
#[derive(Clone, Copy)]
pub struct Tracer<'a> {
    scene: &'a Scene,
}
impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self { scene }
    }

    /// Nearest surface struck by `ray`, whose direction must already be unit length
    ///
    /// Equal distances resolve to the later surface in scene order.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<Hit<'a>> {
        let mut min_t = MISS_DISTANCE;
        let mut nearest = None;
        for obj in self.scene.surfaces() {
            if let Some(t) = obj.intersect(ray) {
                if t <= min_t {
                    min_t = t;
                    nearest = Some(Hit {
                        surface: &**obj,
                        t,
                    });
                }
            }
        }
        nearest.filter(|hit| hit.t < MISS_DISTANCE)
    }

    /// 1.0 if `point` sees the light, [`SHADOW_ATTENUATION`] otherwise
    ///
    /// Any surface along the shadow ray blocks, including ones past the light.
    pub fn shadow_factor(&self, point: &Point) -> f64 {
        let to_light = (self.scene.light() - point).normalize();
        let shadow_ray = Ray::new(*point, to_light);
        let blocked = self
            .scene
            .surfaces()
            .iter()
            .filter_map(|obj| obj.intersect(&shadow_ray))
            .any(|t| t < MISS_DISTANCE);
        if blocked {
            SHADOW_ATTENUATION
        } else {
            1.0
        }
    }

    /// Color seen along `ray`, following up to `depth` reflection/refraction bounces
    pub fn trace(&self, ray: &Ray, depth: u32) -> Color {
        let ray = ray.normalized();
        let Some(hit) = self.nearest_hit(&ray) else {
            return BACKGROUND;
        };

        let surface = hit.surface;
        let light = self.scene.light();
        let point = ray.position_at(hit.t);
        let normal = surface.normal_at(&point).normalize();
        let shadow = self.shadow_factor(&point);

        let local =
            surface.material().ambient + shadow * surface.local_color(&point, light, &ray.orig);
        if depth == 0 {
            return local;
        }

        // The hit position, not the ray direction, seeds both secondary rays
        let reflection = surface.reflect(&point, &normal);
        let refraction = surface.refract(AIR_INDEX, WATER_INDEX, &point, &normal);
        local
            + SECONDARY_WEIGHT * self.trace(&Ray::new(point, reflection), depth - 1)
            + SECONDARY_WEIGHT * self.trace(&Ray::new(point, refraction), depth - 1)
    }
}
