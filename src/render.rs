//! Render a full frame
use std::time::Instant;

use image::RgbImage;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::{cameras::Camera, scene::Scene, tracer::Tracer, utils, Color};

/// Frame size, bounce budget and progress reporting for one render
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub progress: bool,
}

/// Unclamped colors, row-major, top row first
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}
impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::zeros(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Clamp into an 8-bit image
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| utils::get_pixel(&self.get(x, y)))
    }
}

/// Trace every pixel of the frame, rows in parallel
pub fn render(scene: &Scene, camera: &Camera, settings: &RenderSettings) -> Framebuffer {
    let RenderSettings {
        width,
        height,
        depth,
        progress,
    } = *settings;
    if width == 0 || height == 0 {
        tracing::warn!(width, height, "empty frame, nothing to trace");
        return Framebuffer::new(width, height);
    }
    tracing::info!(width, height, depth, surfaces = scene.len(), "rendering");
    let start = Instant::now();

    let bar = if progress {
        let bar = ProgressBar::new(height as u64);
        if let Ok(style) =
            ProgressStyle::with_template("{bar:40} {pos}/{len} rows [{elapsed_precise}]")
        {
            bar.set_style(style);
        }
        bar
    } else {
        ProgressBar::hidden()
    };

    let tracer = Tracer::new(scene);
    let mut framebuffer = Framebuffer::new(width, height);
    framebuffer
        .pixels
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(row, pixels)| {
            // Window coordinates count rows from the bottom
            let win_y = (height as usize - 1 - row) as f64;
            for (col, pixel) in pixels.iter_mut().enumerate() {
                let ray = camera.primary_ray(col as f64, win_y, width, height);
                *pixel = tracer.trace(&ray, depth);
            }
            bar.inc(1);
        });
    bar.finish_and_clear();

    tracing::info!(elapsed = ?start.elapsed(), "render finished");
    framebuffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cameras::CameraConfig, scene::SceneConfig, tracer::BACKGROUND};

    fn settings(width: u32, height: u32) -> RenderSettings {
        RenderSettings {
            width,
            height,
            depth: 0,
            progress: false,
        }
    }

    #[test]
    fn empty_scene_renders_background() {
        let scene = Scene::new(crate::Point::new(0.0, 10.0, 0.0));
        let camera = Camera::from_config(CameraConfig::default());
        let fb = render(&scene, &camera, &settings(8, 6));
        assert_eq!((fb.width(), fb.height()), (8, 6));
        assert_eq!(fb.pixels().len(), 48);
        assert!(fb.pixels().iter().all(|c| *c == BACKGROUND));
        let image = fb.to_image();
        assert_eq!(image.dimensions(), (8, 6));
        assert_eq!(*image.get_pixel(3, 2), image::Rgb([0, 0, 255]));
    }

    #[test]
    fn zero_sized_frame_is_empty() {
        let scene = Scene::from_config(SceneConfig::default());
        let camera = Camera::from_config(CameraConfig::default());
        for (width, height) in [(0, 4), (4, 0), (0, 0)] {
            let fb = render(&scene, &camera, &settings(width, height));
            assert_eq!((fb.width(), fb.height()), (width, height));
            assert!(fb.pixels().is_empty());
        }
    }

    #[test]
    fn spheres_appear_left_and_right_of_center() {
        let scene = Scene::from_config(SceneConfig::default());
        let camera = Camera::from_config(CameraConfig::default());
        let fb = render(&scene, &camera, &settings(64, 64));

        // Eye at (0, 5, 5) looking at the origin: copper on the left, emerald on the right
        let left = fb.get(10, 32);
        let right = fb.get(53, 32);
        let center = fb.get(32, 32);
        assert_eq!(center, BACKGROUND);
        assert_ne!(left, BACKGROUND);
        assert_ne!(right, BACKGROUND);
        assert!(left[0] > left[1], "copper is red dominant: {left:?}");
        assert!(right[1] > right[0], "emerald is green dominant: {right:?}");
    }

    #[test]
    fn parallel_render_matches_sequential_trace() {
        let scene = Scene::from_config(SceneConfig::default());
        let camera = Camera::from_config(CameraConfig::default());
        let fb = render(&scene, &camera, &settings(16, 12));
        let tracer = Tracer::new(&scene);
        for y in 0..12 {
            for x in 0..16 {
                let ray = camera.primary_ray(x as f64, (11 - y) as f64, 16, 12);
                assert_eq!(fb.get(x, y), tracer.trace(&ray, 0));
            }
        }
    }
}
