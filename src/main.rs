use std::io::{self, Read};

use log::{debug, info};

use mirage::config::{validate_config, IncomingConfig};
use mirage::domain::presets::build_scene;
use mirage::render::{
    cpu_capabilities, render_frame, validate_scene_against_capabilities, RenderSettings, View,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut raw = String::new();
    io::stdin().read_to_string(&mut raw)?;

    let incoming: IncomingConfig = serde_json::from_str(&raw)?;
    let frames = match incoming {
        IncomingConfig::Single(frame) => vec![frame],
        IncomingConfig::Batch(batch) => batch.frames,
    };
    if frames.is_empty() {
        return Err("frames array must not be empty".into());
    }

    for frame in &frames {
        validate_config(frame)?;
    }

    let capabilities = cpu_capabilities();
    let total = frames.len();

    for (index, frame) in frames.iter().enumerate() {
        let settings = RenderSettings::from_frame(frame);
        let view = View::from_frame(frame);

        // Scenes depend on the frame parameters and elapsed time, so each
        // frame composes its own.
        let scene = build_scene(&frame.scene, &frame.params, frame.elapsed_time)
            .map_err(|error| format!("Failed to build scene '{}': {error}", frame.scene))?;
        validate_scene_against_capabilities(&scene, capabilities).map_err(|error| {
            format!("Scene '{}' is not supported by this renderer: {error}", scene.id)
        })?;
        debug!(
            "frame {}/{}: scene '{}' {}x{} quality '{}'",
            index + 1,
            total,
            scene.id,
            settings.width,
            settings.height,
            frame.quality
        );

        let (image, stats) = render_frame(&settings, &view, &scene);
        image.save(&settings.output_path)?;

        info!(
            "[{}/{}] rendered scene '{}' in {:.1} ms ({:.1} fps, avg {:.1} steps, max {}): {}",
            index + 1,
            total,
            scene.id,
            stats.frame_time_ms,
            stats.fps,
            stats.avg_march_steps,
            stats.max_march_steps,
            settings.output_path
        );
    }

    Ok(())
}
