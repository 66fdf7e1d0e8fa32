mod boolean_lab;
mod cloud_harbor;
mod fractal_garden;
mod primitive_stage;

use crate::config::SceneParams;
use crate::domain::Scene;

pub fn build_scene(scene_id: &str, params: &SceneParams, elapsed: f32) -> Result<Scene, String> {
    if scene_id.eq_ignore_ascii_case(primitive_stage::SCENE_ID) {
        return Ok(primitive_stage::build(params, elapsed));
    }
    if scene_id.eq_ignore_ascii_case(boolean_lab::SCENE_ID) {
        return Ok(boolean_lab::build(params, elapsed));
    }
    if scene_id.eq_ignore_ascii_case(fractal_garden::SCENE_ID) {
        return Ok(fractal_garden::build(params, elapsed));
    }
    if scene_id.eq_ignore_ascii_case(cloud_harbor::SCENE_ID) {
        return Ok(cloud_harbor::build(params, elapsed));
    }

    Err(format!("unknown scene identifier: {scene_id}"))
}
