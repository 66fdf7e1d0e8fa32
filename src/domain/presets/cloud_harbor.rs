use crate::config::{vec3_from, SceneParams};
use crate::domain::{
    BooleanOp, CloudLayer, Material, MaterialId, Primitive, Scene, SdfNode,
};
use crate::math::Vec3;

use super::primitive_stage::{shading_options, stage_lights};

pub const SCENE_ID: &str = "cloud_harbor";

const WATER_Y: f32 = -0.6;

/// A small island under a drifting noise-cloud deck; the volumetric pass
/// does most of the work here.
pub fn build(params: &SceneParams, elapsed: f32) -> Scene {
    let water_material = MaterialId(0);
    let island_material = MaterialId(1);

    let island = SdfNode::Boolean {
        op: BooleanOp::Union,
        smooth_k: 0.35,
        left: Box::new(SdfNode::Primitive {
            shape: Primitive::Sphere { radius: 0.8 },
            center: Vec3::new(0.0, WATER_Y - 0.35, 0.0) + vec3_from(params.object_offset),
            scale: params.object_scale,
            material: island_material,
        }),
        right: Box::new(SdfNode::Primitive {
            shape: Primitive::Sphere { radius: 0.45 },
            center: Vec3::new(0.7, WATER_Y - 0.2, 0.4) + vec3_from(params.object_offset),
            scale: params.object_scale,
            material: island_material,
        }),
    };

    let root = SdfNode::Boolean {
        op: BooleanOp::Union,
        smooth_k: 0.0,
        left: Box::new(island),
        right: Box::new(SdfNode::Plane {
            y: WATER_Y,
            material: water_material,
        }),
    };

    Scene {
        id: SCENE_ID,
        root,
        materials: vec![
            Material::glossy("harbor_water", Vec3::new(0.25, 0.4, 0.55)),
            Material::matte("harbor_island", Vec3::new(0.55, 0.48, 0.38)),
        ],
        lights: stage_lights(params),
        sky_top: Vec3::new(0.45, 0.65, 0.92),
        sky_bottom: Vec3::new(0.92, 0.94, 0.99),
        fog_density: 0.02,
        shading: shading_options(params),
        clouds: Some(CloudLayer {
            base_height: 2.2,
            thickness: 2.4,
            scale: params.cloud_scale,
            coverage: params.cloud_coverage,
            density: params.cloud_density,
            color: Vec3::new(0.98, 0.98, 1.0),
            light_absorption: params.light_absorption,
            scattering: params.scattering_coefficient.clamp(0.0, 0.95),
            drift: Vec3::new(elapsed * 0.05, 0.0, elapsed * 0.02),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cloud_layer_tracks_parameters() {
        let mut params = SceneParams::default();
        params.cloud_coverage = 0.8;
        params.cloud_density = 1.5;
        let scene = build(&params, 10.0);
        let clouds = scene.clouds.expect("harbor carries clouds");
        assert_eq!(clouds.coverage, 0.8);
        assert_eq!(clouds.density, 1.5);
        // Drift accumulates with elapsed time.
        assert!(clouds.drift.x > 0.0);
    }

    #[test]
    fn island_breaks_the_water_surface() {
        let scene = build(&SceneParams::default(), 0.0);
        // Inside the island body.
        assert!(scene.distance(Vec3::new(0.0, WATER_Y - 0.4, 0.0)) < 0.0);
        // Open water far away.
        assert!(scene.distance(Vec3::new(8.0, 0.5, 8.0)) > 0.0);
    }
}
