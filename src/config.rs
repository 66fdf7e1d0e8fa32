use serde::Deserialize;
use std::path::Path;

use crate::math::Vec3;

/// One frame request, as read from stdin. Marching/camera knobs are
/// optional and fall back to the quality preset; scene parameters carry
/// their own defaults so a minimal request only names size, output and
/// scene.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrameConfig {
    pub width: u32,
    pub height: u32,
    pub output_path: String,
    pub scene: String,
    #[serde(default)]
    pub elapsed_time: f32,
    #[serde(default = "default_quality")]
    pub quality: String,
    #[serde(default = "default_samples_per_pixel")]
    pub samples_per_pixel: u16,

    pub camera_origin: Option<[f32; 3]>,
    pub camera_target: Option<[f32; 3]>,
    pub orbit_angle: Option<f32>,
    #[serde(default = "default_orbit_distance")]
    pub orbit_distance: f32,

    pub max_steps: Option<u32>,
    pub surface_threshold: Option<f32>,
    pub max_distance: Option<f32>,
    pub step_scale: Option<f32>,
    pub volume_steps: Option<u32>,

    #[serde(flatten)]
    pub params: SceneParams,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderBatchConfig {
    pub frames: Vec<RenderFrameConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IncomingConfig {
    Single(RenderFrameConfig),
    Batch(RenderBatchConfig),
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SdfType {
    #[default]
    Sphere,
    Box,
    Torus,
    Cylinder,
    Capsule,
    Octahedron,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BooleanOpParam {
    #[default]
    Union,
    Subtract,
    Intersect,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FractalType {
    #[default]
    Mandelbulb,
    Julia,
    Sierpinski,
    MengerCube,
    Kleinian,
}

/// The shared parameter surface the scene presets consume.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneParams {
    pub sdf_type: SdfType,
    pub boolean_op: BooleanOpParam,
    pub smooth_factor: f32,

    pub fractal_type: FractalType,
    pub power: f32,
    pub iterations: u32,
    pub bailout_radius: f32,
    pub fractal_scale: f32,
    pub fractal_offset: f32,

    pub light_position: [f32; 3],
    pub light_color: [f32; 3],
    pub light_intensity: f32,
    pub enable_soft_shadows: bool,
    pub shadow_sharpness: f32,
    pub enable_ao: bool,
    pub ao_intensity: f32,

    pub cloud_density: f32,
    pub cloud_coverage: f32,
    pub cloud_scale: f32,
    pub light_absorption: f32,
    pub scattering_coefficient: f32,

    pub object_scale: f32,
    pub object_offset: [f32; 3],
    pub object_color: [f32; 3],
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            sdf_type: SdfType::Sphere,
            boolean_op: BooleanOpParam::Union,
            smooth_factor: 0.25,

            fractal_type: FractalType::Mandelbulb,
            power: 8.0,
            iterations: 12,
            bailout_radius: 2.0,
            fractal_scale: 2.0,
            fractal_offset: 2.0,

            light_position: [4.0, 5.0, -3.0],
            light_color: [1.0, 0.96, 0.9],
            light_intensity: 1.0,
            enable_soft_shadows: true,
            shadow_sharpness: 24.0,
            enable_ao: true,
            ao_intensity: 1.0,

            cloud_density: 0.8,
            cloud_coverage: 0.5,
            cloud_scale: 0.35,
            light_absorption: 1.2,
            scattering_coefficient: 0.45,

            object_scale: 1.0,
            object_offset: [0.0, 0.0, 0.0],
            object_color: [0.82, 0.3, 0.24],
        }
    }
}

const fn default_samples_per_pixel() -> u16 {
    1
}

const fn default_orbit_distance() -> f32 {
    4.0
}

fn default_quality() -> String {
    "balanced".to_string()
}

pub fn validate_config(config: &RenderFrameConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.width == 0 || config.height == 0 {
        return Err("width and height must be positive".into());
    }

    let output_parent = Path::new(&config.output_path)
        .parent()
        .ok_or("outputPath must include a parent directory")?;
    if !output_parent.as_os_str().is_empty() && !output_parent.exists() {
        return Err(format!(
            "output directory does not exist: {}",
            output_parent.display()
        )
        .into());
    }

    if config.samples_per_pixel == 0 {
        return Err("samplesPerPixel must be at least 1".into());
    }

    if config.scene.trim().is_empty() {
        return Err("scene must be a non-empty identifier".into());
    }

    if !config.elapsed_time.is_finite() {
        return Err("elapsedTime must be finite".into());
    }

    if let Some(steps) = config.max_steps {
        if steps == 0 {
            return Err("maxSteps must be at least 1".into());
        }
    }
    if let Some(threshold) = config.surface_threshold {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err("surfaceThreshold must be finite and > 0".into());
        }
    }
    if let Some(distance) = config.max_distance {
        if !distance.is_finite() || distance <= 0.0 {
            return Err("maxDistance must be finite and > 0".into());
        }
    }
    if let Some(scale) = config.step_scale {
        if !scale.is_finite() || scale <= 0.0 || scale > 2.0 {
            return Err("stepScale must be finite and in (0, 2]".into());
        }
    }
    if let Some(steps) = config.volume_steps {
        if steps == 0 || steps > 64 {
            return Err("volumeSteps must be in 1..=64".into());
        }
    }

    match (config.camera_origin, config.camera_target) {
        (Some(origin), Some(target)) => {
            if !is_finite_vec3(origin) || !is_finite_vec3(target) {
                return Err("camera vectors must contain finite values".into());
            }
            if (vec3_from(origin) - vec3_from(target)).length() < 0.0001 {
                return Err("cameraOrigin must differ from cameraTarget".into());
            }
        }
        (Some(_), None) | (None, Some(_)) => {
            return Err("cameraOrigin and cameraTarget must be given together".into());
        }
        (None, None) => {}
    }
    if let Some(angle) = config.orbit_angle {
        if !angle.is_finite() {
            return Err("orbitAngle must be finite".into());
        }
    }
    if !config.orbit_distance.is_finite() || config.orbit_distance <= 0.0 {
        return Err("orbitDistance must be finite and > 0".into());
    }

    validate_params(&config.params)?;
    Ok(())
}

fn validate_params(params: &SceneParams) -> Result<(), Box<dyn std::error::Error>> {
    if !params.smooth_factor.is_finite() || params.smooth_factor < 0.0 {
        return Err("smoothFactor must be finite and >= 0".into());
    }
    if params.iterations == 0 {
        return Err("iterations must be at least 1".into());
    }
    if !params.power.is_finite() || params.power < 1.0 {
        return Err("power must be finite and >= 1".into());
    }
    if !params.bailout_radius.is_finite() || params.bailout_radius <= 1.0 {
        return Err("bailoutRadius must be finite and > 1".into());
    }
    if !params.fractal_scale.is_finite() || params.fractal_scale <= 0.0 {
        return Err("fractalScale must be finite and > 0".into());
    }
    if !is_finite_vec3(params.light_position)
        || !is_finite_vec3(params.light_color)
        || !is_finite_vec3(params.object_offset)
        || !is_finite_vec3(params.object_color)
    {
        return Err("vector parameters must contain finite values".into());
    }
    if !params.light_intensity.is_finite() || params.light_intensity <= 0.0 {
        return Err("lightIntensity must be finite and > 0".into());
    }
    if !params.shadow_sharpness.is_finite() || params.shadow_sharpness <= 0.0 {
        return Err("shadowSharpness must be finite and > 0".into());
    }
    if !params.ao_intensity.is_finite() || params.ao_intensity < 0.0 {
        return Err("aoIntensity must be finite and >= 0".into());
    }
    if !params.cloud_density.is_finite() || params.cloud_density < 0.0 {
        return Err("cloudDensity must be finite and >= 0".into());
    }
    if !params.cloud_coverage.is_finite() || !(0.0..=1.0).contains(&params.cloud_coverage) {
        return Err("cloudCoverage must be within [0, 1]".into());
    }
    if !params.cloud_scale.is_finite() || params.cloud_scale <= 0.0 {
        return Err("cloudScale must be finite and > 0".into());
    }
    if !params.light_absorption.is_finite() || params.light_absorption < 0.0 {
        return Err("lightAbsorption must be finite and >= 0".into());
    }
    if !params.scattering_coefficient.is_finite()
        || !(0.0..1.0).contains(&params.scattering_coefficient)
    {
        return Err("scatteringCoefficient must be within [0, 1)".into());
    }
    if !params.object_scale.is_finite() || params.object_scale <= 0.0 {
        return Err("objectScale must be finite and > 0".into());
    }
    Ok(())
}

pub fn vec3_from(value: [f32; 3]) -> Vec3 {
    Vec3::new(value[0], value[1], value[2])
}

fn is_finite_vec3(value: [f32; 3]) -> bool {
    value[0].is_finite() && value[1].is_finite() && value[2].is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_frame() -> RenderFrameConfig {
        serde_json::from_str(
            r#"{
                "width": 64,
                "height": 48,
                "outputPath": "out.png",
                "scene": "primitive_stage"
            }"#,
        )
        .expect("minimal config parses")
    }

    #[test]
    fn minimal_frame_validates_with_defaults() {
        let frame = minimal_frame();
        assert!(validate_config(&frame).is_ok());
        assert_eq!(frame.params.sdf_type, SdfType::Sphere);
        assert_eq!(frame.samples_per_pixel, 1);
    }

    #[test]
    fn parses_flattened_scene_parameters() {
        let frame: RenderFrameConfig = serde_json::from_str(
            r#"{
                "width": 64,
                "height": 48,
                "outputPath": "out.png",
                "scene": "boolean_lab",
                "sdfType": "torus",
                "booleanOp": "subtract",
                "smoothFactor": 0.1,
                "fractalType": "mengerCube",
                "volumeSteps": 16
            }"#,
        )
        .expect("config parses");
        assert_eq!(frame.params.sdf_type, SdfType::Torus);
        assert_eq!(frame.params.boolean_op, BooleanOpParam::Subtract);
        assert_eq!(frame.params.fractal_type, FractalType::MengerCube);
        assert_eq!(frame.volume_steps, Some(16));
    }

    #[test]
    fn batch_config_parses() {
        let incoming: IncomingConfig = serde_json::from_str(
            r#"{"frames": [
                {"width": 8, "height": 8, "outputPath": "a.png", "scene": "fractal_garden"},
                {"width": 8, "height": 8, "outputPath": "b.png", "scene": "cloud_harbor"}
            ]}"#,
        )
        .expect("batch parses");
        match incoming {
            IncomingConfig::Batch(batch) => assert_eq!(batch.frames.len(), 2),
            IncomingConfig::Single(_) => panic!("expected batch"),
        }
    }

    #[test]
    fn rejects_zero_dimensions() {
        let mut frame = minimal_frame();
        frame.width = 0;
        assert!(validate_config(&frame).is_err());
    }

    #[test]
    fn rejects_half_specified_camera() {
        let mut frame = minimal_frame();
        frame.camera_origin = Some([0.0, 0.0, 3.0]);
        assert!(validate_config(&frame).is_err());
    }

    #[test]
    fn rejects_coincident_camera_vectors() {
        let mut frame = minimal_frame();
        frame.camera_origin = Some([1.0, 1.0, 1.0]);
        frame.camera_target = Some([1.0, 1.0, 1.0]);
        assert!(validate_config(&frame).is_err());
    }

    #[test]
    fn rejects_out_of_range_volume_steps() {
        let mut frame = minimal_frame();
        frame.volume_steps = Some(0);
        assert!(validate_config(&frame).is_err());
        frame.volume_steps = Some(200);
        assert!(validate_config(&frame).is_err());
    }

    #[test]
    fn absent_volume_steps_stays_unset() {
        let frame = minimal_frame();
        assert_eq!(frame.volume_steps, None);
        assert!(validate_config(&frame).is_ok());
    }

    #[test]
    fn rejects_non_finite_step_scale() {
        let mut frame = minimal_frame();
        frame.step_scale = Some(f32::NAN);
        assert!(validate_config(&frame).is_err());
    }
}
