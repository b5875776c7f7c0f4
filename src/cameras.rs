//! Cameras and configs for cameras
//!
//! A pinhole camera that maps window pixels onto points of its near plane, the way
//! `gluUnProject` does for a `gluLookAt` view with a `gluPerspective` projection at window
//! depth zero.
use crate::utils::SerdeVector;
use crate::{Point, Ray, Vec3};
use serde::{Deserialize, Serialize};

/// Camera Config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub eye: SerdeVector,
    pub look_at: SerdeVector,
    pub v_up: SerdeVector,
    pub vertical_fov_deg: f64,
    /// Distance from the eye to the near plane
    pub near: f64,
}
impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: SerdeVector(0.0, 5.0, 5.0),
            look_at: SerdeVector(0.0, 0.0, 0.0),
            v_up: SerdeVector(0.0, 1.0, 0.0),
            vertical_fov_deg: 60.0,
            near: 0.1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    eye: Point,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    vertical_fov_deg: f64,
    near: f64,
}
impl Camera {
    pub fn new(eye: Point, look_at: Point, v_up: Vec3, vertical_fov_deg: f64, near: f64) -> Self {
        // Calculate the viewing vectors
        let forward = (look_at - eye).normalize();
        let right = forward.cross(&v_up).normalize();
        let up = right.cross(&forward);
        Self {
            eye,
            forward,
            right,
            up,
            vertical_fov_deg,
            near,
        }
    }

    pub fn from_config(config: CameraConfig) -> Self {
        Self::new(
            config.eye.into(),
            config.look_at.into(),
            config.v_up.into(),
            config.vertical_fov_deg,
            config.near,
        )
    }

    pub fn eye(&self) -> &Point {
        &self.eye
    }

    /// World position on the near plane under window pixel `(win_x, win_y)`
    ///
    /// The window origin is the bottom-left corner.
    pub fn near_point(&self, win_x: f64, win_y: f64, width: u32, height: u32) -> Point {
        let aspect_ratio = width as f64 / height as f64;
        let half_height = self.near * (self.vertical_fov_deg.to_radians() / 2.0).tan();
        let half_width = aspect_ratio * half_height;

        let ndc_x = 2.0 * win_x / width as f64 - 1.0;
        let ndc_y = 2.0 * win_y / height as f64 - 1.0;
        self.eye
            + self.near * self.forward
            + ndc_x * half_width * self.right
            + ndc_y * half_height * self.up
    }

    /// Ray from the eye through the near plane point of a window pixel
    pub fn primary_ray(&self, win_x: f64, win_y: f64, width: u32, height: u32) -> Ray {
        let near = self.near_point(win_x, win_y, width, height);
        Ray::new(self.eye, near - self.eye)
    }
}
