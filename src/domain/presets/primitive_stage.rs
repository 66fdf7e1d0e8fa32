use crate::config::{vec3_from, SceneParams, SdfType};
use crate::domain::{
    Light, LightKind, Material, MaterialId, Primitive, Scene, SdfNode, ShadingOptions,
};
use crate::math::Vec3;

pub const SCENE_ID: &str = "primitive_stage";

const FLOOR_Y: f32 = -0.75;

pub fn build(params: &SceneParams, elapsed: f32) -> Scene {
    let floor_material = MaterialId(0);
    let object_material = MaterialId(1);

    // Slow bob so the stage reads as alive in live previews.
    let bob = 0.04 * (elapsed * 0.8).sin();
    let center = Vec3::new(0.0, FLOOR_Y + 0.85 + bob, 0.0) + vec3_from(params.object_offset);

    let root = SdfNode::Boolean {
        op: crate::domain::BooleanOp::Union,
        smooth_k: 0.0,
        left: Box::new(SdfNode::Primitive {
            shape: shape_for(params.sdf_type),
            center,
            scale: params.object_scale,
            material: object_material,
        }),
        right: Box::new(SdfNode::Plane {
            y: FLOOR_Y,
            material: floor_material,
        }),
    };

    Scene {
        id: SCENE_ID,
        root,
        materials: vec![
            Material::matte("stage_floor", Vec3::new(0.93, 0.94, 0.96)),
            Material::glossy("stage_object", vec3_from(params.object_color)),
        ],
        lights: stage_lights(params),
        sky_top: Vec3::new(0.5, 0.71, 0.94),
        sky_bottom: Vec3::new(0.98, 0.99, 1.0),
        fog_density: 0.015,
        shading: shading_options(params),
        clouds: None,
    }
}

pub fn shape_for(sdf_type: SdfType) -> Primitive {
    match sdf_type {
        SdfType::Sphere => Primitive::Sphere { radius: 0.5 },
        SdfType::Box => Primitive::Box {
            half_extents: Vec3::new(0.42, 0.42, 0.42),
        },
        SdfType::Torus => Primitive::Torus {
            major_radius: 0.5,
            minor_radius: 0.18,
        },
        SdfType::Cylinder => Primitive::Cylinder {
            radius: 0.35,
            half_height: 0.5,
        },
        SdfType::Capsule => Primitive::Capsule {
            radius: 0.3,
            half_height: 0.35,
        },
        SdfType::Octahedron => Primitive::Octahedron { size: 0.6 },
    }
}

pub fn stage_lights(params: &SceneParams) -> Vec<Light> {
    vec![
        Light {
            name: "key_lamp",
            kind: LightKind::Point {
                position: vec3_from(params.light_position),
                color: vec3_from(params.light_color),
                intensity: params.light_intensity,
                falloff: 0.012,
            },
        },
        Light {
            name: "sky_fill",
            kind: LightKind::Directional {
                direction: Vec3::new(-0.28, -1.0, -0.56).normalize(),
                color: Vec3::new(0.70, 0.84, 1.0),
                intensity: 0.25,
            },
        },
    ]
}

pub fn shading_options(params: &SceneParams) -> ShadingOptions {
    ShadingOptions {
        soft_shadows: params.enable_soft_shadows,
        shadow_sharpness: params.shadow_sharpness,
        ambient_occlusion: params.enable_ao,
        ao_intensity: params.ao_intensity,
    }
}
