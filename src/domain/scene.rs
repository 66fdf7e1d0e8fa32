use crate::math::Vec3;

use super::light::Light;
use super::material::{Material, MaterialId};
use super::node::{SdfNode, SdfSample};

/// Per-frame shadow/occlusion switches resolved from the frame parameters.
#[derive(Clone, Copy, Debug)]
pub struct ShadingOptions {
    pub soft_shadows: bool,
    pub shadow_sharpness: f32,
    pub ambient_occlusion: bool,
    pub ao_intensity: f32,
}

impl Default for ShadingOptions {
    fn default() -> Self {
        Self {
            soft_shadows: true,
            shadow_sharpness: 24.0,
            ambient_occlusion: true,
            ao_intensity: 1.0,
        }
    }
}

/// Noise-driven cloud slab for the volumetric pass.
#[derive(Clone, Copy, Debug)]
pub struct CloudLayer {
    pub base_height: f32,
    pub thickness: f32,
    pub scale: f32,
    pub coverage: f32,
    pub density: f32,
    pub color: Vec3,
    pub light_absorption: f32,
    /// Forward-scattering anisotropy for the phase term, in [0, 0.95].
    pub scattering: f32,
    /// World-space noise offset accumulated from elapsed time (wind drift).
    pub drift: Vec3,
}

/// A fully composed frame scene: the distance-field graph plus everything
/// shading needs. Rebuilt from the frame parameters and elapsed time, never
/// mutated between pixels.
#[derive(Clone, Debug)]
pub struct Scene {
    pub id: &'static str,
    pub root: SdfNode,
    pub materials: Vec<Material>,
    pub lights: Vec<Light>,
    pub sky_top: Vec3,
    pub sky_bottom: Vec3,
    pub fog_density: f32,
    pub shading: ShadingOptions,
    pub clouds: Option<CloudLayer>,
}

impl Scene {
    pub fn sample(&self, p: Vec3) -> SdfSample {
        self.root.evaluate(p)
    }

    pub fn distance(&self, p: Vec3) -> f32 {
        self.root.distance(p)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    /// Direction of sunlight for the background glow: the first directional
    /// light, if the scene has one.
    pub fn sun_direction(&self) -> Option<Vec3> {
        self.lights.iter().find_map(|light| match light.kind {
            super::light::LightKind::Directional { direction, .. } => {
                Some(direction.normalize())
            }
            super::light::LightKind::Point { .. } => None,
        })
    }
}
