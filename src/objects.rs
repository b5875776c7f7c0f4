//! Objects
//!
//! Everything a ray can strike implements [`Surface`]. Spheres are the only variant for now.
use crate::{
    utils::{self, SerdeVector},
    Color, Point, Ray, Vec3,
};
use serde::{Deserialize, Serialize};

pub type SurfaceObj = Box<dyn Surface + Send + Sync>;

/// Hits at or closer than this are treated as self intersections
pub const HIT_EPSILON: f64 = 0.01;

/// A hittable, shadable object
pub trait Surface {
    /// Nearest parametric distance beyond [`HIT_EPSILON`] at which `ray` strikes this surface
    ///
    /// `ray.dir` is expected to be unit length.
    fn intersect(&self, ray: &Ray) -> Option<f64>;

    /// Outward normal at a point on the surface, not necessarily unit length
    fn normal_at(&self, point: &Point) -> Vec3;

    fn material(&self) -> &Material;

    fn name(&self) -> &str;

    /// Phong diffuse and specular response at `point`. Ambient is left to the caller.
    fn local_color(&self, point: &Point, light: &Point, viewer: &Point) -> Color {
        let material = self.material();
        let normal = self.normal_at(point).normalize();
        let to_viewer = (viewer - point).normalize();
        let to_light = (light - point).normalize();
        let reflected = (-to_light + 2.0 * to_light.dot(&normal) * normal).normalize();

        let diffuse = to_light.dot(&normal).max(0.0);
        let specular = to_viewer.dot(&reflected).max(0.0).powf(material.shininess);
        diffuse * material.diffuse + specular * material.specular
    }

    fn reflect(&self, incident: &Vec3, normal: &Vec3) -> Vec3 {
        utils::reflect(incident, normal)
    }

    /// Direction through a boundary from index `n1` into index `n2`
    ///
    /// Falls back to [`Surface::reflect`] under total internal reflection.
    fn refract(&self, n1: f64, n2: f64, incident: &Vec3, normal: &Vec3) -> Vec3 {
        utils::refract(incident, normal, n1 / n2).unwrap_or_else(|| self.reflect(incident, normal))
    }
}

/// Phong material coefficients
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    /// Phong exponent. Values below one widen the highlight.
    pub shininess: f64,
}
impl Material {
    pub fn new(ambient: Color, diffuse: Color, specular: Color, shininess: f64) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }

    pub fn emerald() -> Self {
        Self::new(
            Color::new(0.0215, 0.1745, 0.0215),
            Color::new(0.07568, 0.61424, 0.07568),
            Color::new(0.633, 0.727811, 0.633),
            0.6,
        )
    }

    pub fn copper() -> Self {
        Self::new(
            Color::new(0.19125, 0.0735, 0.0225),
            Color::new(0.7038, 0.27048, 0.0828),
            Color::new(0.256777, 0.137622, 0.086014),
            0.1,
        )
    }

    pub fn from_config(config: MaterialConfig) -> Self {
        match config {
            MaterialConfig::Phong(c) => Self::new(
                c.ambient.into(),
                c.diffuse.into(),
                c.specular.into(),
                c.shininess,
            ),
            MaterialConfig::Emerald => Self::emerald(),
            MaterialConfig::Copper => Self::copper(),
        }
    }
}

/// Config for materials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MaterialConfig {
    Phong(PhongConfig),
    Emerald,
    Copper,
}

/// Explicit Phong coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhongConfig {
    pub ambient: SerdeVector,
    pub diffuse: SerdeVector,
    pub specular: SerdeVector,
    pub shininess: f64,
}

pub struct Sphere {
    pub name: String,
    pub center: Point,
    pub radius: f64,
    pub material: Material,
}
impl Sphere {
    pub fn new(center: Point, radius: f64, material: Material) -> Self {
        debug_assert!(radius > 0.0, "sphere radius must be positive");
        Self {
            name: String::from("sphere"),
            center,
            radius,
            material,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn from_config(config: SphereConfig) -> Self {
        let sphere = Self::new(
            config.center.into(),
            config.radius,
            Material::from_config(config.material),
        );
        match config.name {
            Some(name) => sphere.with_name(name),
            None => sphere,
        }
    }
}
impl Surface for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        // |O + tD - C|^2 = r^2 with |D| = 1
        let oc = ray.orig - self.center;
        let b = 2.0 * ray.dir.dot(&oc);
        let c = oc.norm_squared() - self.radius * self.radius;
        let discriminant = b * b - 4.0 * c;
        if discriminant < 0.0 {
            return None;
        }
        if discriminant == 0.0 {
            let t = -b / 2.0;
            return (t > HIT_EPSILON).then_some(t);
        }

        // Both roots must lie in front of the origin, so rays starting inside never hit
        let sqrtd = discriminant.sqrt();
        let t1 = (-b + sqrtd) / 2.0;
        let t2 = (-b - sqrtd) / 2.0;
        if t1 > HIT_EPSILON && t2 > HIT_EPSILON {
            Some(t1.min(t2))
        } else {
            None
        }
    }

    fn normal_at(&self, point: &Point) -> Vec3 {
        point - self.center
    }

    fn material(&self) -> &Material {
        &self.material
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Sphere config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub center: SerdeVector,
    pub radius: f64,
    pub material: MaterialConfig,
}

/// Config for any surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SurfaceConfig {
    Sphere(SphereConfig),
}

/// Generator from config
pub struct Generator;
impl Generator {
    pub fn from_config(config: SurfaceConfig) -> SurfaceObj {
        match config {
            SurfaceConfig::Sphere(c) => Box::new(Sphere::from_config(c)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn unit_sphere() -> Sphere {
        Sphere::new(Point::zeros(), 1.0, Material::emerald())
    }

    #[test]
    fn head_on_hit_is_distance_minus_radius() {
        for radius in [0.5, 1.0, 2.0] {
            let sphere = Sphere::new(Point::zeros(), radius, Material::copper());
            let ray = Ray::new(Point::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
            let t = sphere.intersect(&ray).unwrap();
            assert!((t - (5.0 - radius)).abs() < EPS, "radius {radius}: t = {t}");
        }
    }

    #[test]
    fn ray_pointing_away_misses() {
        let ray = Ray::new(Point::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(unit_sphere().intersect(&ray).is_none());
    }

    #[test]
    fn ray_passing_beside_misses() {
        let ray = Ray::new(Point::new(3.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(unit_sphere().intersect(&ray).is_none());
    }

    #[test]
    fn ray_from_inside_misses() {
        let sphere = Sphere::new(Point::zeros(), 2.0, Material::emerald());
        for origin in [Point::zeros(), Point::new(0.5, -0.5, 1.0)] {
            let ray = Ray::new(origin, Vec3::new(0.0, 0.0, 1.0));
            assert!(sphere.intersect(&ray).is_none());
        }
    }

    #[test]
    fn tangent_ray_hits_only_in_front() {
        let sphere = unit_sphere();
        let ahead = Ray::new(Point::new(1.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let t = sphere.intersect(&ahead).unwrap();
        assert!((t - 5.0).abs() < EPS);

        let behind = Ray::new(Point::new(1.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.intersect(&behind).is_none());
    }

    #[test]
    fn ray_starting_on_surface_does_not_hit_itself() {
        let sphere = unit_sphere();
        let ray = Ray::new(Point::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn normal_points_outward_unnormalized() {
        let sphere = Sphere::new(Point::new(1.0, 0.0, 0.0), 2.0, Material::emerald());
        assert_eq!(
            sphere.normal_at(&Point::new(1.0, 2.0, 0.0)),
            Vec3::new(0.0, 2.0, 0.0)
        );
    }

    #[test]
    fn local_color_light_and_viewer_along_normal() {
        let sphere = unit_sphere();
        let point = Point::new(0.0, 0.0, 1.0);
        let light = Point::new(0.0, 0.0, 10.0);
        let color = sphere.local_color(&point, &light, &Point::new(0.0, 0.0, 5.0));
        let m = Material::emerald();
        assert!((color - (m.diffuse + m.specular)).norm() < EPS);
    }

    #[test]
    fn local_color_is_black_when_light_is_behind() {
        let sphere = unit_sphere();
        let point = Point::new(0.0, 0.0, 1.0);
        let light = Point::new(0.0, 0.0, -10.0);
        let color = sphere.local_color(&point, &light, &Point::new(0.0, 0.0, 5.0));
        assert!(color.norm() < EPS);
    }

    #[test]
    fn local_color_grazing_light() {
        // Light at 60 degrees from the normal, viewer along the mirrored direction
        let sphere = unit_sphere();
        let point = Point::new(0.0, 0.0, 1.0);
        let s = 3f64.sqrt() / 2.0;
        let light = point + 4.0 * Vec3::new(s, 0.0, 0.5);
        let viewer = point + 2.0 * Vec3::new(-s, 0.0, 0.5);
        let color = sphere.local_color(&point, &light, &viewer);
        let m = Material::emerald();
        assert!((color - (0.5 * m.diffuse + m.specular)).norm() < 1e-9);
    }

    #[test]
    fn reflect_uses_literal_formula_for_perpendicular_incident() {
        // incident + 2(n.i)n = (0, 0, -1) + 2 * -1 * (0, 0, 1)
        let r = unit_sphere().reflect(&Vec3::new(0.0, 0.0, -1.0), &Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(r, Vec3::new(0.0, 0.0, -3.0));
    }

    #[test]
    fn refract_follows_literal_formula() {
        let sphere = unit_sphere();
        let incident = Vec3::new(0.0, 0.0, 1.0);
        let normal = Vec3::new(0.0, 0.0, 1.0);
        let n: f64 = 1.0 / 1.33;
        let cos_t = (1.0 - n * n).sqrt();
        let expected = n * incident + n * cos_t * normal;
        assert!((sphere.refract(1.0, 1.33, &incident, &normal) - expected).norm() < EPS);
    }

    #[test]
    fn refract_falls_back_to_reflection() {
        let sphere = unit_sphere();
        let incident = Vec3::new(0.0, 0.0, 3.0);
        let normal = Vec3::new(0.0, 0.0, 1.0);
        let r = sphere.refract(1.0, 1.33, &incident, &normal);
        assert!(r.iter().all(|c| c.is_finite()));
        assert_eq!(r, sphere.reflect(&incident, &normal));
    }

    #[test]
    fn sphere_from_yaml_config() {
        let yaml = r#"
type: Sphere
name: sph1
center: [2.0, 0.0, 0.0]
radius: 1.0
material:
  type: Phong
  ambient: [0.1, 0.1, 0.1]
  diffuse: [0.5, 0.5, 0.5]
  specular: [1.0, 1.0, 1.0]
  shininess: 8.0
"#;
        let config: SurfaceConfig = serde_yaml::from_str(yaml).unwrap();
        let obj = Generator::from_config(config);
        assert_eq!(obj.name(), "sph1");
        assert_eq!(obj.material().shininess, 8.0);
        assert_eq!(obj.normal_at(&Point::new(3.0, 0.0, 0.0)), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn preset_material_from_yaml() {
        let config: MaterialConfig = serde_yaml::from_str("type: Copper").unwrap();
        assert_eq!(Material::from_config(config), Material::copper());
    }
}
