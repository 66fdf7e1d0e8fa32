use crate::config::{vec3_from, BooleanOpParam, SceneParams};
use crate::domain::{BooleanOp, Material, MaterialId, Primitive, Scene, SdfNode};
use crate::math::Vec3;

use super::primitive_stage::{shading_options, shape_for, stage_lights};

pub const SCENE_ID: &str = "boolean_lab";

const FLOOR_Y: f32 = -0.75;

/// The selected primitive combined with an orbiting sphere through the
/// selected boolean, so smooth seams and carving are visible from every
/// operator.
pub fn build(params: &SceneParams, elapsed: f32) -> Scene {
    let floor_material = MaterialId(0);
    let body_material = MaterialId(1);
    let tool_material = MaterialId(2);

    let center = Vec3::new(0.0, FLOOR_Y + 0.85, 0.0) + vec3_from(params.object_offset);
    let orbit = elapsed * 0.6;
    let tool_center = center + Vec3::new(0.45 * orbit.cos(), 0.15, 0.45 * orbit.sin());

    let combined = SdfNode::Boolean {
        op: boolean_for(params.boolean_op),
        smooth_k: params.smooth_factor,
        left: Box::new(SdfNode::Primitive {
            shape: Primitive::Sphere { radius: 0.38 },
            center: tool_center,
            scale: 1.0,
            material: tool_material,
        }),
        right: Box::new(SdfNode::Primitive {
            shape: shape_for(params.sdf_type),
            center,
            scale: params.object_scale,
            material: body_material,
        }),
    };

    let root = SdfNode::Boolean {
        op: BooleanOp::Union,
        smooth_k: 0.0,
        left: Box::new(combined),
        right: Box::new(SdfNode::Plane {
            y: FLOOR_Y,
            material: floor_material,
        }),
    };

    Scene {
        id: SCENE_ID,
        root,
        materials: vec![
            Material::matte("lab_floor", Vec3::new(0.90, 0.91, 0.94)),
            Material::glossy("lab_body", vec3_from(params.object_color)),
            Material::glossy("lab_tool", Vec3::new(0.25, 0.45, 0.85)),
        ],
        lights: stage_lights(params),
        sky_top: Vec3::new(0.48, 0.66, 0.9),
        sky_bottom: Vec3::new(0.96, 0.97, 1.0),
        fog_density: 0.015,
        shading: shading_options(params),
        clouds: None,
    }
}

fn boolean_for(op: BooleanOpParam) -> BooleanOp {
    match op {
        BooleanOpParam::Union => BooleanOp::Union,
        BooleanOpParam::Subtract => BooleanOp::Subtraction,
        BooleanOpParam::Intersect => BooleanOp::Intersection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtract_carves_the_tool_out_of_the_body() {
        let mut params = SceneParams::default();
        params.boolean_op = BooleanOpParam::Subtract;
        params.smooth_factor = 0.0;
        let scene = build(&params, 0.0);

        // At elapsed 0 the tool sphere sits at body center + (0.45, 0.15, 0);
        // its center must now be outside the solid.
        let tool_center = Vec3::new(0.45, FLOOR_Y + 1.0, 0.0);
        assert!(scene.distance(tool_center) > 0.0);
    }

    #[test]
    fn union_keeps_both_bodies() {
        let mut params = SceneParams::default();
        params.boolean_op = BooleanOpParam::Union;
        params.smooth_factor = 0.0;
        let scene = build(&params, 0.0);

        let body_center = Vec3::new(0.0, FLOOR_Y + 0.85, 0.0);
        let tool_center = Vec3::new(0.45, FLOOR_Y + 1.0, 0.0);
        assert!(scene.distance(body_center) < 0.0);
        assert!(scene.distance(tool_center) < 0.0);
    }
}
