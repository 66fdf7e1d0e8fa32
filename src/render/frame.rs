use std::time::Instant;

use image::RgbImage;
use rayon::prelude::*;

use crate::domain::Scene;
use crate::math::{sample_jitter, Ray, Vec3};

use super::marcher::{ray_march, MarchOutcome};
use super::settings::{MarchTuning, RenderSettings};
use super::shading::{background_color, shade_hit, to_rgb};
use super::view::View;
use super::volumetric::integrate_clouds;

/// Timing and step statistics for one rendered frame, for an external
/// performance readout.
#[derive(Clone, Copy, Debug)]
pub struct FrameStats {
    pub frame_time_ms: f32,
    pub fps: f32,
    pub rays: u64,
    pub avg_march_steps: f32,
    pub max_march_steps: u32,
}

struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    fn new(view: &View, aspect_ratio: f32) -> Self {
        let theta = view.vertical_fov_deg.to_radians();
        let h = (theta * 0.5).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect_ratio * viewport_height;

        let w = (view.origin - view.target).normalize();
        let u = view.up.cross(w).normalize();
        let v = w.cross(u);

        let horizontal = u * viewport_width;
        let vertical = v * viewport_height;
        let lower_left_corner =
            view.origin - (horizontal * 0.5) - (vertical * 0.5) - w;

        Self {
            origin: view.origin,
            lower_left_corner,
            horizontal,
            vertical,
        }
    }

    fn get_ray(&self, u: f32, v: f32) -> Ray {
        let direction = (self.lower_left_corner + (self.horizontal * u) + (self.vertical * v)
            - self.origin)
            .normalize();
        Ray {
            origin: self.origin,
            direction,
        }
    }
}

/// One pixel of work: sphere-trace the solid scene, shade hit or
/// background, then composite the volumetric pass over it. Pure function
/// of the inputs; every pixel is independent.
pub fn trace_pixel(scene: &Scene, ray: Ray, tuning: &MarchTuning) -> (Vec3, u32) {
    let outcome = ray_march(scene, ray, tuning);
    let steps = outcome.steps();

    let (solid, segment_end) = match &outcome {
        MarchOutcome::Hit(hit) => (shade_hit(scene, hit, ray, tuning), hit.t),
        MarchOutcome::Miss { .. } => (background_color(scene, ray.direction), tuning.max_distance),
    };

    let clouds = integrate_clouds(scene, ray, segment_end, tuning);
    let color = (solid * (1.0 - clouds.alpha)) + clouds.color;

    (color, steps)
}

/// Render a full frame: a rayon scanline map of `trace_pixel` with
/// hash-jittered supersampling, flattened into an 8-bit RGB buffer.
pub fn render_frame(settings: &RenderSettings, view: &View, scene: &Scene) -> (RgbImage, FrameStats) {
    let started = Instant::now();

    let width = settings.width.max(1) as usize;
    let height = settings.height.max(1) as usize;
    let aspect_ratio = settings.width as f32 / settings.height as f32;
    let camera = Camera::new(view, aspect_ratio);
    let sample_count = settings.samples_per_pixel.max(1);
    let width_f = settings.width.max(1) as f32;
    let height_f = settings.height.max(1) as f32;
    let tuning = settings.tuning;

    let mut pixels = vec![(Vec3::splat(0.0), 0u32); width * height];

    pixels
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let y_u32 = y as u32;
            for (x, slot) in row.iter_mut().enumerate() {
                let x_u32 = x as u32;
                let mut accumulated = Vec3::splat(0.0);
                let mut steps = 0u32;
                for sample_index in 0..sample_count {
                    let jitter_x = sample_jitter(x_u32, y_u32, sample_index, 0);
                    let jitter_y = sample_jitter(x_u32, y_u32, sample_index, 1);
                    let u = (x_u32 as f32 + jitter_x) / width_f;
                    let v = ((settings.height - 1 - y_u32) as f32 + jitter_y) / height_f;
                    let ray = camera.get_ray(u, v);
                    let (color, sample_steps) = trace_pixel(scene, ray, &tuning);
                    accumulated = accumulated + color;
                    steps = steps.max(sample_steps);
                }
                *slot = (accumulated / sample_count as f32, steps);
            }
        });

    let mut image = RgbImage::new(settings.width, settings.height);
    let mut total_steps = 0u64;
    let mut max_steps = 0u32;
    for y in 0..height {
        for x in 0..width {
            let (color, steps) = pixels[(y * width) + x];
            total_steps += steps as u64;
            max_steps = max_steps.max(steps);
            image.put_pixel(x as u32, y as u32, to_rgb(color));
        }
    }

    let elapsed = started.elapsed();
    let frame_time_ms = elapsed.as_secs_f32() * 1000.0;
    let rays = (width * height) as u64 * sample_count as u64;
    let stats = FrameStats {
        frame_time_ms,
        fps: if frame_time_ms > 0.0 {
            1000.0 / frame_time_ms
        } else {
            f32::INFINITY
        },
        rays,
        avg_march_steps: total_steps as f32 / (width * height) as f32,
        max_march_steps: max_steps,
    };

    (image, stats)
}
