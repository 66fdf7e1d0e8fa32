use crate::domain::{CloudLayer, Scene};
use crate::math::{fbm, Ray, Vec3};

use super::settings::MarchTuning;

const DENSITY_EPSILON: f32 = 1e-3;
const ALPHA_SATURATION: f32 = 0.99;
const LIGHT_MARCH_STEPS: u32 = 4;
const FBM_OCTAVES: u32 = 5;

/// Front-to-back accumulated cloud color and opacity along one ray
/// segment. `color` is premultiplied by alpha; alpha only ever grows and
/// stays within [0, 1].
#[derive(Clone, Copy, Debug)]
pub struct VolumeSample {
    pub color: Vec3,
    pub alpha: f32,
}

impl VolumeSample {
    pub const CLEAR: Self = Self {
        color: Vec3::splat(0.0),
        alpha: 0.0,
    };
}

/// Step a fixed budget through the cloud slab between the camera and the
/// solid hit (or the far clip), compositing density samples front to back.
/// Independent of the solid tracer; the caller blends the result over the
/// shaded surface.
pub fn integrate_clouds(
    scene: &Scene,
    ray: Ray,
    segment_end: f32,
    tuning: &MarchTuning,
) -> VolumeSample {
    let Some(layer) = &scene.clouds else {
        return VolumeSample::CLEAR;
    };

    // Clip the march to where the ray actually crosses the slab.
    let Some((enter, exit)) = slab_span(layer, ray, segment_end) else {
        return VolumeSample::CLEAR;
    };

    let steps = tuning.volume_steps.max(1);
    let dt = (exit - enter) / steps as f32;
    if !dt.is_finite() || dt <= 0.0 {
        return VolumeSample::CLEAR;
    }

    let sun = scene.sun_direction().map(|d| -d);
    let ambient = scene.sky_top * 0.35;

    let mut accumulated = VolumeSample::CLEAR;
    let mut t = enter + (dt * 0.5);

    for _ in 0..steps {
        let p = ray.at(t);
        let density = sample_density(layer, p);

        if density > DENSITY_EPSILON {
            let lit = match sun {
                Some(to_light) => {
                    let transmittance = light_transmittance(layer, p, to_light);
                    let phase = phase_forward(ray.direction.dot(to_light), layer.scattering);
                    (layer.color * (transmittance * phase)) + ambient
                }
                None => ambient,
            };

            let step_alpha = (1.0 - (-density * dt * 1.5).exp()).clamp(0.0, 1.0);
            let remaining = 1.0 - accumulated.alpha;
            accumulated.color = accumulated.color + (lit * (step_alpha * remaining));
            accumulated.alpha = (accumulated.alpha + (step_alpha * remaining)).clamp(0.0, 1.0);

            if accumulated.alpha >= ALPHA_SATURATION {
                break;
            }
        }

        t += dt;
    }

    accumulated
}

/// Noise density at a point: fbm shaped by the coverage threshold and a
/// parabolic height window across the slab.
pub fn sample_density(layer: &CloudLayer, p: Vec3) -> f32 {
    let height_fraction = (p.y - layer.base_height) / layer.thickness;
    if !(0.0..=1.0).contains(&height_fraction) {
        return 0.0;
    }
    let window = (4.0 * height_fraction * (1.0 - height_fraction)).clamp(0.0, 1.0);

    let q = (p + layer.drift) * layer.scale;
    let base = fbm(q, FBM_OCTAVES);
    let thresholded = base - (1.0 - layer.coverage);
    if thresholded <= 0.0 {
        return 0.0;
    }

    thresholded * window * layer.density
}

/// Short march toward the light to estimate how much cloud shadows this
/// sample; Beer-Lambert falloff on the accumulated density.
fn light_transmittance(layer: &CloudLayer, origin: Vec3, to_light: Vec3) -> f32 {
    let step = layer.thickness / (LIGHT_MARCH_STEPS as f32 + 1.0);
    let mut accumulated = 0.0;

    for i in 1..=LIGHT_MARCH_STEPS {
        let p = origin + (to_light * (step * i as f32));
        accumulated += sample_density(layer, p) * step;
    }

    (-layer.light_absorption * accumulated).exp().clamp(0.0, 1.0)
}

/// Henyey-Greenstein phase lobe; `g` in [0, 0.95] favors forward
/// scattering toward the light.
fn phase_forward(cos_theta: f32, g: f32) -> f32 {
    let g2 = g * g;
    let denom = (1.0 + g2 - (2.0 * g * cos_theta)).max(1e-4);
    (1.0 - g2) / (4.0 * std::f32::consts::PI * denom.powf(1.5))
}

/// Slab entry/exit parameters along the ray, clipped to `[0, segment_end]`.
fn slab_span(layer: &CloudLayer, ray: Ray, segment_end: f32) -> Option<(f32, f32)> {
    let top = layer.base_height + layer.thickness;

    if ray.direction.y.abs() < 1e-5 {
        // Grazing the slab horizontally: inside or outside for the whole
        // segment.
        if ray.origin.y >= layer.base_height && ray.origin.y <= top {
            return Some((0.0, segment_end));
        }
        return None;
    }

    let t0 = (layer.base_height - ray.origin.y) / ray.direction.y;
    let t1 = (top - ray.origin.y) / ray.direction.y;
    let enter = t0.min(t1).max(0.0);
    let exit = t0.max(t1).min(segment_end);
    if exit <= enter {
        return None;
    }
    Some((enter, exit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Light, LightKind, Material, MaterialId, Primitive, SdfNode};

    fn overcast_layer() -> CloudLayer {
        CloudLayer {
            base_height: 2.0,
            thickness: 2.0,
            scale: 0.35,
            coverage: 1.0,
            density: 5.0,
            color: Vec3::splat(1.0),
            light_absorption: 1.2,
            scattering: 0.4,
            drift: Vec3::splat(0.0),
        }
    }

    fn cloudy_scene(layer: CloudLayer) -> Scene {
        Scene {
            id: "test",
            root: SdfNode::Primitive {
                shape: Primitive::Sphere { radius: 0.1 },
                center: Vec3::new(0.0, -50.0, 0.0),
                scale: 1.0,
                material: MaterialId(0),
            },
            materials: vec![Material::matte("grey", Vec3::splat(0.8))],
            lights: vec![Light {
                name: "sun",
                kind: LightKind::Directional {
                    direction: Vec3::new(0.3, -1.0, 0.2),
                    color: Vec3::splat(1.0),
                    intensity: 1.0,
                },
            }],
            sky_top: Vec3::new(0.5, 0.7, 0.9),
            sky_bottom: Vec3::new(0.95, 0.97, 1.0),
            fog_density: 0.0,
            shading: Default::default(),
            clouds: Some(layer),
        }
    }

    fn up_ray() -> Ray {
        Ray {
            origin: Vec3::new(0.0, 0.0, 0.0),
            direction: Vec3::new(0.0, 1.0, 0.0),
        }
    }

    #[test]
    fn alpha_is_monotone_and_clamped_per_step_budget() {
        let scene = cloudy_scene(overcast_layer());
        let tuning = MarchTuning::default();

        // Growing the segment can only grow the accumulated alpha.
        let mut previous = 0.0;
        for end in [3.0_f32, 4.0, 6.0, 10.0] {
            let sample = integrate_clouds(&scene, up_ray(), end, &tuning);
            assert!((0.0..=1.0).contains(&sample.alpha));
            assert!(sample.alpha + 1e-4 >= previous, "alpha regressed");
            previous = sample.alpha;
        }
    }

    #[test]
    fn opaque_layer_saturates_before_budget_exhausts() {
        let mut layer = overcast_layer();
        layer.density = 50.0;
        let scene = cloudy_scene(layer);
        let sample = integrate_clouds(&scene, up_ray(), 10.0, &MarchTuning::default());
        assert!(sample.alpha >= ALPHA_SATURATION - 1e-3, "alpha {}", sample.alpha);
    }

    #[test]
    fn ray_missing_the_slab_accumulates_nothing() {
        let scene = cloudy_scene(overcast_layer());
        let down = Ray {
            origin: Vec3::new(0.0, 0.0, 0.0),
            direction: Vec3::new(0.0, -1.0, 0.0),
        };
        let sample = integrate_clouds(&scene, down, 10.0, &MarchTuning::default());
        assert_eq!(sample.alpha, 0.0);
    }

    #[test]
    fn solid_hit_in_front_of_slab_clips_the_march() {
        let scene = cloudy_scene(overcast_layer());
        let sample = integrate_clouds(&scene, up_ray(), 1.5, &MarchTuning::default());
        // The slab starts at y=2; a hit at t=1.5 leaves nothing to march.
        assert_eq!(sample.alpha, 0.0);
    }

    #[test]
    fn zero_coverage_means_clear_sky() {
        let mut layer = overcast_layer();
        layer.coverage = 0.0;
        let scene = cloudy_scene(layer);
        let sample = integrate_clouds(&scene, up_ray(), 10.0, &MarchTuning::default());
        assert_eq!(sample.alpha, 0.0);
    }

    #[test]
    fn density_respects_height_window() {
        let layer = overcast_layer();
        assert_eq!(sample_density(&layer, Vec3::new(0.0, 0.5, 0.0)), 0.0);
        assert_eq!(sample_density(&layer, Vec3::new(0.0, 9.0, 0.0)), 0.0);
        // Mid-slab with full coverage must find some density.
        let mid = sample_density(&layer, Vec3::new(0.3, 3.0, 0.7));
        assert!(mid > 0.0);
    }

    #[test]
    fn phase_favors_forward_scattering() {
        let forward = phase_forward(1.0, 0.4);
        let backward = phase_forward(-1.0, 0.4);
        assert!(forward > backward);
    }
}
