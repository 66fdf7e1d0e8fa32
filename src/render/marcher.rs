use crate::domain::{MaterialId, Scene};
use crate::math::{Ray, Vec3};

use super::settings::MarchTuning;

/// Smallest advance per step; keeps degenerate fields (distance stuck at
/// zero without crossing the threshold) from stalling the loop.
const MIN_STEP: f32 = 0.0003;

#[derive(Clone, Copy, Debug)]
pub struct HitRecord {
    pub t: f32,
    pub point: Vec3,
    pub normal: Vec3,
    pub material: MaterialId,
    pub steps: u32,
}

/// Result of one sphere-trace. Exhausting the step budget and leaving the
/// far clip are both plain misses; the caller renders background either way.
#[derive(Clone, Copy, Debug)]
pub enum MarchOutcome {
    Hit(HitRecord),
    Miss { traveled: f32, steps: u32 },
}

impl MarchOutcome {
    pub fn steps(&self) -> u32 {
        match self {
            Self::Hit(hit) => hit.steps,
            Self::Miss { steps, .. } => *steps,
        }
    }

}

/// Sphere tracing: advance by the field's own distance estimate until the
/// surface threshold is crossed or a hard bound trips. The step counter is
/// the termination guarantee; a field that violates the lower-bound
/// contract oversteps visually but cannot loop forever.
pub fn ray_march(scene: &Scene, ray: Ray, tuning: &MarchTuning) -> MarchOutcome {
    let mut traveled = 0.0_f32;

    for step in 0..tuning.max_steps {
        if traveled > tuning.max_distance {
            return MarchOutcome::Miss {
                traveled,
                steps: step,
            };
        }

        let p = ray.at(traveled);
        let sample = scene.sample(p);
        if !sample.distance.is_finite() {
            return MarchOutcome::Miss {
                traveled,
                steps: step,
            };
        }

        if sample.distance.abs() < tuning.surface_threshold {
            let normal = estimate_normal(scene, p, tuning.normal_epsilon);
            return MarchOutcome::Hit(HitRecord {
                t: traveled,
                point: p,
                normal,
                material: sample.material,
                steps: step,
            });
        }

        traveled += sample.distance.abs().max(MIN_STEP) * tuning.step_scale;
    }

    MarchOutcome::Miss {
        traveled,
        steps: tuning.max_steps,
    }
}

/// Central-difference gradient of the distance field, normalized. A
/// near-zero gradient (flat or degenerate field) falls back to straight up
/// instead of dividing by zero.
pub fn estimate_normal(scene: &Scene, p: Vec3, epsilon: f32) -> Vec3 {
    let e = epsilon;
    let dx = scene.distance(p + Vec3::new(e, 0.0, 0.0)) - scene.distance(p - Vec3::new(e, 0.0, 0.0));
    let dy = scene.distance(p + Vec3::new(0.0, e, 0.0)) - scene.distance(p - Vec3::new(0.0, e, 0.0));
    let dz = scene.distance(p + Vec3::new(0.0, 0.0, e)) - scene.distance(p - Vec3::new(0.0, 0.0, e));

    let gradient = Vec3::new(dx, dy, dz);
    let magnitude = gradient.length();
    if !magnitude.is_finite() || magnitude < 1e-8 {
        return Vec3::new(0.0, 1.0, 0.0);
    }
    gradient / magnitude
}

/// Binary occlusion: any surface between the point and the light blocks it
/// completely. `max_t` limits the march to the light's distance.
pub fn hard_shadow(scene: &Scene, origin: Vec3, to_light: Vec3, max_t: f32, tuning: &MarchTuning) -> f32 {
    let limit = max_t.min(tuning.shadow_max_distance);
    let mut t = tuning.ray_bias;

    for _ in 0..tuning.shadow_max_steps {
        if t >= limit {
            break;
        }
        let h = scene.distance(origin + (to_light * t));
        if !h.is_finite() {
            break;
        }
        if h < tuning.surface_threshold {
            return 0.0;
        }
        t += h.max(MIN_STEP);
    }

    1.0
}

/// Penumbra approximation: track the smallest cone ratio `k*h/t` along the
/// shadow ray. Larger `k` sharpens the penumbra. Heuristic, not physical.
pub fn soft_shadow(
    scene: &Scene,
    origin: Vec3,
    to_light: Vec3,
    max_t: f32,
    k: f32,
    tuning: &MarchTuning,
) -> f32 {
    let limit = max_t.min(tuning.shadow_max_distance);
    let mut attenuation = 1.0_f32;
    let mut t = tuning.ray_bias;

    for _ in 0..tuning.shadow_max_steps {
        if t >= limit {
            break;
        }

        let h = scene.distance(origin + (to_light * t));
        if !h.is_finite() {
            break;
        }
        if h < tuning.surface_threshold * 0.9 {
            return 0.0;
        }

        attenuation = attenuation.min((k * h / t).clamp(0.0, 1.0));
        t += h.clamp(0.015, 0.45);
    }

    attenuation.clamp(0.0, 1.0)
}

/// Stepped occlusion proxy: sample the field at increasing offsets along
/// the normal and accumulate how far each sample falls short of the open
/// field, with decaying weights. The `1 - 3*occlusion` mapping is folklore
/// kept for visual parity.
pub fn ambient_occlusion(scene: &Scene, point: Vec3, normal: Vec3, intensity: f32, tuning: &MarchTuning) -> f32 {
    let mut occlusion = 0.0_f32;
    let mut weight = 1.0_f32;
    let mut offset = 0.02_f32;

    for _ in 0..tuning.ao_samples.max(1) {
        let sampled = scene.distance(point + (normal * offset));
        if sampled.is_finite() {
            occlusion += (offset - sampled).max(0.0) * weight;
        }
        weight *= 0.6;
        offset += 0.035;
    }

    (1.0 - (3.0 * occlusion * intensity)).clamp(0.0, 1.0)
}
