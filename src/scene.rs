//! Scene: the surfaces and the single point light
use serde::{Deserialize, Serialize};

use crate::{
    objects::{Generator, MaterialConfig, SphereConfig, SurfaceConfig, SurfaceObj},
    utils::SerdeVector,
    Point,
};

/// Ordered surfaces plus one point light
///
/// Built once before rendering, then only read.
pub struct Scene {
    surfaces: Vec<SurfaceObj>,
    light: Point,
}
impl Scene {
    pub fn new(light: Point) -> Self {
        Self {
            surfaces: Vec::new(),
            light,
        }
    }

    pub fn add(&mut self, boxed_obj: SurfaceObj) {
        self.surfaces.push(boxed_obj)
    }

    pub fn with(mut self, boxed_obj: SurfaceObj) -> Self {
        self.add(boxed_obj);
        self
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub fn surfaces(&self) -> &[SurfaceObj] {
        &self.surfaces
    }

    pub fn light(&self) -> &Point {
        &self.light
    }

    pub fn from_config(config: SceneConfig) -> Self {
        let mut s = Self::new(config.light.into());
        for obj_cfg in config.objects {
            let obj = Generator::from_config(obj_cfg);
            tracing::debug!(name = obj.name(), "adding surface");
            s.add(obj);
        }
        tracing::info!(surfaces = s.len(), light = ?s.light, "scene built");
        s
    }
}

/// Scene Config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub light: SerdeVector,
    pub objects: Vec<SurfaceConfig>,
}
impl Default for SceneConfig {
    /// An emerald sphere and a copper sphere either side of the origin
    fn default() -> Self {
        Self {
            light: SerdeVector(5.0, 5.0, 5.0),
            objects: vec![
                SurfaceConfig::Sphere(SphereConfig {
                    name: Some(String::from("emerald")),
                    center: SerdeVector(2.0, 0.0, 0.0),
                    radius: 1.0,
                    material: MaterialConfig::Emerald,
                }),
                SurfaceConfig::Sphere(SphereConfig {
                    name: Some(String::from("copper")),
                    center: SerdeVector(-2.0, 0.0, 0.0),
                    radius: 1.0,
                    material: MaterialConfig::Copper,
                }),
            ],
        }
    }
}
