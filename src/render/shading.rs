use image::Rgb;

use crate::domain::{Material, Scene};
use crate::math::{mix, Ray, Vec3};

use super::marcher::{ambient_occlusion, hard_shadow, soft_shadow, HitRecord};
use super::settings::MarchTuning;

const FALLBACK_ALBEDO: Vec3 = Vec3::new(0.8, 0.8, 0.8);

/// Shade a solid hit: ambient plus the sum over lights of diffuse and
/// specular terms scaled by attenuation and shadowing, darkened by ambient
/// occlusion, then faded into the fog with distance. Output is linear HDR;
/// tone mapping happens at the buffer boundary.
pub fn shade_hit(scene: &Scene, hit: &HitRecord, ray: Ray, tuning: &MarchTuning) -> Vec3 {
    let material = scene
        .material(hit.material)
        .copied()
        .unwrap_or(Material::matte("fallback", FALLBACK_ALBEDO));

    let view = (-ray.direction).normalize();
    let shadow_origin = hit.point + (hit.normal * (tuning.ray_bias * 1.5));

    let mut color = material.albedo * material.ambient;

    for light in &scene.lights {
        let sample = light.sample(hit.point);
        let lambert = hit.normal.dot(sample.to_light).max(0.0);
        if lambert <= 0.0 {
            continue;
        }

        let shadow = if scene.shading.soft_shadows {
            soft_shadow(
                scene,
                shadow_origin,
                sample.to_light,
                sample.distance,
                scene.shading.shadow_sharpness,
                tuning,
            )
        } else {
            hard_shadow(scene, shadow_origin, sample.to_light, sample.distance, tuning)
        };
        if shadow <= 0.0 {
            continue;
        }

        let diffuse = material.albedo * (material.diffuse * lambert);

        let half_vector = (sample.to_light + view).normalize();
        let spec_angle = hit.normal.dot(half_vector).max(0.0);
        let specular = Vec3::splat(material.specular * spec_angle.powf(material.shininess));

        color = color + ((diffuse + specular) * sample.radiance * shadow);
    }

    if scene.shading.ambient_occlusion {
        let ao = ambient_occlusion(
            scene,
            hit.point + (hit.normal * (tuning.ray_bias * 2.0)),
            hit.normal,
            scene.shading.ao_intensity,
            tuning,
        );
        color = color * ao;
    }

    apply_fog(scene, color, ray.direction, hit.t)
}

/// Exponential distance fog toward the sky color in the ray direction.
pub fn apply_fog(scene: &Scene, color: Vec3, direction: Vec3, distance: f32) -> Vec3 {
    if scene.fog_density <= 0.0 {
        return color;
    }
    let fog = 1.0 - (-scene.fog_density * distance).exp();
    mix(color, background_color(scene, direction), fog.clamp(0.0, 1.0))
}

/// Sky gradient for miss pixels, with a glow around the sun direction when
/// the scene has a directional light.
pub fn background_color(scene: &Scene, direction: Vec3) -> Vec3 {
    let unit = direction.normalize();
    let t = 0.5 * (unit.y + 1.0);
    let base = mix(scene.sky_bottom, scene.sky_top, t.clamp(0.0, 1.0));

    match scene.sun_direction() {
        Some(sun_direction) => {
            let alignment = unit.dot(-sun_direction).max(0.0);
            let glow = Vec3::new(1.0, 0.96, 0.9) * (alignment.powf(420.0) * 4.0);
            base + glow
        }
        None => base,
    }
}

/// Reinhard tone curve plus gamma, producing the final 8-bit pixel.
pub fn to_rgb(color: Vec3) -> Rgb<u8> {
    let mapped = tone_map(color);
    let corrected = Vec3::new(
        mapped.x.powf(1.0 / 2.2),
        mapped.y.powf(1.0 / 2.2),
        mapped.z.powf(1.0 / 2.2),
    )
    .clamp01();
    Rgb([
        (corrected.x * 255.999) as u8,
        (corrected.y * 255.999) as u8,
        (corrected.z * 255.999) as u8,
    ])
}

pub fn tone_map(color: Vec3) -> Vec3 {
    Vec3::new(
        reinhard(color.x),
        reinhard(color.y),
        reinhard(color.z),
    )
}

fn reinhard(channel: f32) -> f32 {
    let c = channel.max(0.0);
    c / (c + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Light, LightKind, MaterialId, Primitive, SdfNode, ShadingOptions,
    };
    use crate::render::marcher::HitRecord;

    fn lit_sphere_scene() -> Scene {
        Scene {
            id: "test",
            root: SdfNode::Primitive {
                shape: Primitive::Sphere { radius: 0.5 },
                center: Vec3::splat(0.0),
                scale: 1.0,
                material: MaterialId(0),
            },
            materials: vec![Material::matte("red", Vec3::new(0.9, 0.1, 0.1))],
            lights: vec![Light {
                name: "sun",
                kind: LightKind::Directional {
                    direction: Vec3::new(0.0, 0.0, -1.0),
                    color: Vec3::splat(1.0),
                    intensity: 1.0,
                },
            }],
            sky_top: Vec3::new(0.5, 0.7, 0.9),
            sky_bottom: Vec3::new(0.95, 0.97, 1.0),
            fog_density: 0.0,
            shading: ShadingOptions {
                soft_shadows: false,
                shadow_sharpness: 24.0,
                ambient_occlusion: false,
                ao_intensity: 1.0,
            },
            clouds: None,
        }
    }

    fn front_hit() -> HitRecord {
        HitRecord {
            t: 2.5,
            point: Vec3::new(0.0, 0.0, 0.5),
            normal: Vec3::new(0.0, 0.0, 1.0),
            material: MaterialId(0),
            steps: 4,
        }
    }

    #[test]
    fn front_lit_point_matches_lambert_expectation() {
        let scene = lit_sphere_scene();
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 3.0),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        let color = shade_hit(&scene, &front_hit(), ray, &MarchTuning::default());

        // ambient + diffuse with lambert == 1, no specular on matte.
        let expected = Vec3::new(0.9, 0.1, 0.1) * (0.08 + 0.92);
        assert!((color - expected).length() < 1e-4, "got {color:?}");
    }

    #[test]
    fn light_behind_surface_contributes_nothing() {
        let mut scene = lit_sphere_scene();
        scene.lights[0].kind = LightKind::Directional {
            direction: Vec3::new(0.0, 0.0, 1.0),
            color: Vec3::splat(1.0),
            intensity: 1.0,
        };
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 3.0),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        let color = shade_hit(&scene, &front_hit(), ray, &MarchTuning::default());
        let ambient_only = Vec3::new(0.9, 0.1, 0.1) * 0.08;
        assert!((color - ambient_only).length() < 1e-5);
    }

    #[test]
    fn fog_pulls_color_toward_sky_with_distance() {
        let mut scene = lit_sphere_scene();
        scene.fog_density = 0.5;
        let direction = Vec3::new(0.0, 0.0, -1.0);
        let near = apply_fog(&scene, Vec3::splat(0.0), direction, 0.1);
        let far = apply_fog(&scene, Vec3::splat(0.0), direction, 20.0);
        let sky = background_color(&scene, direction);
        assert!((far - sky).length() < (near - sky).length());
    }

    #[test]
    fn tone_map_compresses_into_unit_range() {
        let bright = tone_map(Vec3::new(10.0, 1.0, 0.0));
        assert!(bright.x < 1.0 && bright.x > 0.9);
        assert!((bright.y - 0.5).abs() < 1e-6);
        assert_eq!(bright.z, 0.0);
    }

    #[test]
    fn background_gradient_interpolates_vertically() {
        let scene = lit_sphere_scene();
        let up = background_color(&scene, Vec3::new(0.0, 1.0, 0.001));
        let down = background_color(&scene, Vec3::new(0.0, -1.0, 0.001));
        assert!((up - scene.sky_top).length() < 0.05);
        assert!((down - scene.sky_bottom).length() < 0.05);
    }
}
