use crate::config::{vec3_from, FractalType, SceneParams};
use crate::domain::{BooleanOp, Fractal, Material, MaterialId, Scene, SdfNode};
use crate::math::Vec3;

use super::primitive_stage::{shading_options, stage_lights};

pub const SCENE_ID: &str = "fractal_garden";

const FLOOR_Y: f32 = -1.05;

pub fn build(params: &SceneParams, _elapsed: f32) -> Scene {
    let floor_material = MaterialId(0);
    let fractal_material = MaterialId(1);

    let center = Vec3::new(0.0, FLOOR_Y + 1.05, 0.0) + vec3_from(params.object_offset);

    let root = SdfNode::Boolean {
        op: BooleanOp::Union,
        smooth_k: 0.0,
        left: Box::new(SdfNode::Fractal {
            kind: fractal_for(params),
            center,
            scale: params.object_scale,
            material: fractal_material,
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
            Material::matte("garden_floor", Vec3::new(0.88, 0.89, 0.92)),
            Material::glossy("garden_fractal", vec3_from(params.object_color)),
        ],
        lights: stage_lights(params),
        sky_top: Vec3::new(0.42, 0.58, 0.86),
        sky_bottom: Vec3::new(0.95, 0.96, 1.0),
        fog_density: 0.03,
        shading: shading_options(params),
        clouds: None,
    }
}

fn fractal_for(params: &SceneParams) -> Fractal {
    match params.fractal_type {
        FractalType::Mandelbulb => Fractal::Mandelbulb {
            power: params.power,
            iterations: params.iterations,
            bailout: params.bailout_radius,
        },
        FractalType::Julia => Fractal::Julia {
            // A pure-vector constant keeps the quadratic quaternion orbit
            // well behaved; x steers the overall shape.
            c: Vec3::new(-0.2, 0.6, 0.2),
            iterations: params.iterations,
            bailout: params.bailout_radius,
        },
        FractalType::Sierpinski => Fractal::Sierpinski {
            scale: params.fractal_scale,
            offset: params.fractal_offset,
            iterations: params.iterations,
        },
        FractalType::MengerCube => Fractal::MengerCube {
            iterations: params.iterations.min(8),
        },
        FractalType::Kleinian => Fractal::Kleinian {
            scale: params.fractal_scale,
            offset: params.fractal_offset.min(0.5),
            iterations: params.iterations.min(8),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_fractal_type_yields_finite_field() {
        for fractal_type in [
            FractalType::Mandelbulb,
            FractalType::Julia,
            FractalType::Sierpinski,
            FractalType::MengerCube,
            FractalType::Kleinian,
        ] {
            let mut params = SceneParams::default();
            params.fractal_type = fractal_type;
            params.fractal_offset = if fractal_type == FractalType::Kleinian {
                0.0
            } else {
                2.0
            };
            let scene = build(&params, 0.0);
            for i in 0..16 {
                let p = Vec3::new((i as f32 * 0.41) - 3.0, 0.4, (i as f32 * 0.23) - 1.5);
                assert!(
                    scene.distance(p).is_finite(),
                    "{fractal_type:?} produced a non-finite distance at {p:?}"
                );
            }
        }
    }
}
