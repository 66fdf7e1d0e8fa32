use crate::config::RenderFrameConfig;

/// Hard bounds and step sizes for every bounded loop in the pipeline.
/// These are the termination guarantees: the tracer, shadow, AO and volume
/// marches never exceed them no matter what the distance field returns.
#[derive(Clone, Copy, Debug)]
pub struct MarchTuning {
    pub max_steps: u32,
    pub surface_threshold: f32,
    pub max_distance: f32,
    pub step_scale: f32,
    pub shadow_max_steps: u32,
    pub shadow_max_distance: f32,
    pub ao_samples: u32,
    pub volume_steps: u32,
    pub normal_epsilon: f32,
    pub ray_bias: f32,
}

#[derive(Clone, Debug)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u32,
    pub output_path: String,
    pub tuning: MarchTuning,
}

impl RenderSettings {
    pub fn from_frame(frame: &RenderFrameConfig) -> Self {
        Self {
            width: frame.width,
            height: frame.height,
            samples_per_pixel: frame.samples_per_pixel.max(1) as u32,
            output_path: frame.output_path.clone(),
            tuning: MarchTuning::from_frame(frame),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum QualityPreset {
    Preview,
    Balanced,
    Final,
}

impl MarchTuning {
    pub fn from_frame(frame: &RenderFrameConfig) -> Self {
        let mut tuning = match parse_quality(&frame.quality) {
            QualityPreset::Preview => Self {
                max_steps: 96,
                surface_threshold: 0.0008,
                max_distance: 42.0,
                step_scale: 1.2,
                shadow_max_steps: 32,
                shadow_max_distance: 20.0,
                ao_samples: 4,
                volume_steps: 12,
                normal_epsilon: 0.0015,
                ray_bias: 0.004,
            },
            QualityPreset::Balanced => Self {
                max_steps: 160,
                surface_threshold: 0.0005,
                max_distance: 42.0,
                step_scale: 1.0,
                shadow_max_steps: 64,
                shadow_max_distance: 24.0,
                ao_samples: 5,
                volume_steps: 24,
                normal_epsilon: 0.001,
                ray_bias: 0.003,
            },
            QualityPreset::Final => Self {
                max_steps: 280,
                surface_threshold: 0.00035,
                max_distance: 48.0,
                step_scale: 0.9,
                shadow_max_steps: 96,
                shadow_max_distance: 28.0,
                ao_samples: 5,
                volume_steps: 32,
                normal_epsilon: 0.0008,
                ray_bias: 0.003,
            },
        };

        if let Some(max_steps) = frame.max_steps {
            tuning.max_steps = max_steps.max(1);
        }
        if let Some(threshold) = frame.surface_threshold {
            tuning.surface_threshold = threshold;
        }
        if let Some(max_distance) = frame.max_distance {
            tuning.max_distance = max_distance;
        }
        if let Some(step_scale) = frame.step_scale {
            tuning.step_scale = step_scale;
        }
        if let Some(volume_steps) = frame.volume_steps {
            tuning.volume_steps = volume_steps.clamp(1, 64);
        }

        tuning
    }
}

impl Default for MarchTuning {
    fn default() -> Self {
        Self {
            max_steps: 160,
            surface_threshold: 0.0005,
            max_distance: 42.0,
            step_scale: 1.0,
            shadow_max_steps: 64,
            shadow_max_distance: 24.0,
            ao_samples: 5,
            volume_steps: 24,
            normal_epsilon: 0.001,
            ray_bias: 0.003,
        }
    }
}

fn parse_quality(value: &str) -> QualityPreset {
    if value.eq_ignore_ascii_case("preview") {
        return QualityPreset::Preview;
    }
    if value.eq_ignore_ascii_case("final") {
        return QualityPreset::Final;
    }
    QualityPreset::Balanced
}
