//! Render configuration, read from YAML
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    cameras::CameraConfig,
    error::ConfigError,
    objects::SurfaceConfig,
    render::RenderSettings,
    scene::SceneConfig,
    Vec3,
};

/// Everything needed to produce one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Reflection/refraction bounces per primary ray
    #[serde(default)]
    pub depth: u32,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub scene: SceneConfig,
}

fn default_width() -> u32 {
    640
}

fn default_height() -> u32 {
    480
}

fn default_output() -> PathBuf {
    PathBuf::from("render.png")
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            depth: 0,
            output: default_output(),
            camera: CameraConfig::default(),
            scene: SceneConfig::default(),
        }
    }
}

impl RenderConfig {
    pub fn settings(&self, progress: bool) -> RenderSettings {
        RenderSettings {
            width: self.width,
            height: self.height,
            depth: self.depth,
            progress,
        }
    }

    /// Reject configs the tracer cannot handle
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Validation(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }

        let camera = &self.camera;
        let view = Vec3::from(camera.look_at) - Vec3::from(camera.eye);
        if view.norm() == 0.0 {
            return Err(ConfigError::Validation(
                "camera eye and look_at must differ".to_string(),
            ));
        }
        let v_up: Vec3 = camera.v_up.into();
        if view.cross(&v_up).norm() == 0.0 {
            return Err(ConfigError::Validation(
                "camera v_up must not be parallel to the view direction".to_string(),
            ));
        }
        if camera.near.is_nan() || camera.near <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "camera near plane must be positive, got {}",
                camera.near
            )));
        }
        if !(0.0..180.0).contains(&camera.vertical_fov_deg) || camera.vertical_fov_deg == 0.0 {
            return Err(ConfigError::Validation(format!(
                "vertical field of view must be in (0, 180), got {}",
                camera.vertical_fov_deg
            )));
        }

        for (i, obj) in self.scene.objects.iter().enumerate() {
            match obj {
                SurfaceConfig::Sphere(sphere) => {
                    if sphere.radius.is_nan() || sphere.radius <= 0.0 {
                        return Err(ConfigError::Validation(format!(
                            "object {i}: sphere radius must be positive, got {}",
                            sphere.radius
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Load configuration from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RenderConfig, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: RenderConfig = serde_yaml::from_str(&content)?;
    config.validate()?;

    tracing::info!(path = %path.display(), objects = config.scene.objects.len(), "loaded config");
    Ok(config)
}
