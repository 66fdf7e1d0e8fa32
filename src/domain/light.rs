use crate::math::Vec3;

#[derive(Clone, Copy, Debug)]
pub enum LightKind {
    Directional {
        direction: Vec3,
        color: Vec3,
        intensity: f32,
    },
    Point {
        position: Vec3,
        color: Vec3,
        intensity: f32,
        /// Quadratic falloff coefficient; 0 disables attenuation.
        falloff: f32,
    },
}

#[derive(Clone, Copy, Debug)]
pub struct Light {
    pub name: &'static str,
    pub kind: LightKind,
}

/// Per-point view of a light: direction toward it, attenuated radiance, and
/// distance to the emitter (infinite for directional lights).
#[derive(Clone, Copy, Debug)]
pub struct LightSample {
    pub to_light: Vec3,
    pub radiance: Vec3,
    pub distance: f32,
}

impl Light {
    pub fn sample(&self, point: Vec3) -> LightSample {
        match self.kind {
            LightKind::Directional {
                direction,
                color,
                intensity,
            } => LightSample {
                to_light: (-direction).normalize(),
                radiance: color * intensity,
                distance: f32::INFINITY,
            },
            LightKind::Point {
                position,
                color,
                intensity,
                falloff,
            } => {
                let offset = position - point;
                let distance = offset.length().max(1e-4);
                let attenuation = 1.0 / (1.0 + (falloff * distance * distance));
                LightSample {
                    to_light: offset / distance,
                    radiance: color * (intensity * attenuation),
                    distance,
                }
            }
        }
    }

    pub fn validate_physical(&self) -> Result<(), String> {
        match self.kind {
            LightKind::Directional {
                direction,
                color,
                intensity,
            } => {
                validate_vec3_finite(direction, "direction")?;
                validate_vec3_finite(color, "color")?;
                validate_vec3_non_negative(color, "color")?;
                if direction.length() < 0.0001 {
                    return Err("direction vector length must be > 0".into());
                }
                validate_intensity(intensity)?;
            }
            LightKind::Point {
                position,
                color,
                intensity,
                falloff,
            } => {
                validate_vec3_finite(position, "position")?;
                validate_vec3_finite(color, "color")?;
                validate_vec3_non_negative(color, "color")?;
                validate_intensity(intensity)?;
                if !falloff.is_finite() || falloff < 0.0 {
                    return Err(format!("falloff must be finite and >= 0, got {falloff}"));
                }
            }
        }
        Ok(())
    }
}

fn validate_intensity(intensity: f32) -> Result<(), String> {
    if !intensity.is_finite() || intensity <= 0.0 {
        return Err(format!("intensity must be finite and > 0, got {intensity}"));
    }
    Ok(())
}

fn validate_vec3_finite(value: Vec3, field: &str) -> Result<(), String> {
    if !value.is_finite() {
        return Err(format!(
            "{field} components must be finite, got ({}, {}, {})",
            value.x, value.y, value.z
        ));
    }
    Ok(())
}

fn validate_vec3_non_negative(value: Vec3, field: &str) -> Result<(), String> {
    if value.x < 0.0 || value.y < 0.0 || value.z < 0.0 {
        return Err(format!(
            "{field} components must be >= 0, got ({}, {}, {})",
            value.x, value.y, value.z
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directional_light() -> Light {
        Light {
            name: "test",
            kind: LightKind::Directional {
                direction: Vec3::new(0.5, -1.0, 0.1),
                color: Vec3::new(1.0, 0.9, 0.8),
                intensity: 1.0,
            },
        }
    }

    #[test]
    fn validates_directional_light() {
        assert!(directional_light().validate_physical().is_ok());
    }

    #[test]
    fn rejects_non_finite_intensity() {
        let mut light = directional_light();
        match &mut light.kind {
            LightKind::Directional { intensity, .. } => *intensity = f32::NAN,
            LightKind::Point { .. } => unreachable!(),
        }
        assert!(light.validate_physical().is_err());
    }

    #[test]
    fn rejects_negative_color_component() {
        let mut light = directional_light();
        match &mut light.kind {
            LightKind::Directional { color, .. } => *color = Vec3::new(-0.1, 0.8, 0.9),
            LightKind::Point { .. } => unreachable!(),
        }
        assert!(light.validate_physical().is_err());
    }

    #[test]
    fn point_light_attenuates_with_distance() {
        let light = Light {
            name: "lamp",
            kind: LightKind::Point {
                position: Vec3::new(0.0, 2.0, 0.0),
                color: Vec3::splat(1.0),
                intensity: 1.0,
                falloff: 0.5,
            },
        };
        let near = light.sample(Vec3::new(0.0, 1.5, 0.0));
        let far = light.sample(Vec3::new(0.0, -4.0, 0.0));
        assert!(near.radiance.x > far.radiance.x);
        assert!((near.to_light.y - 1.0).abs() < 1e-6);
        assert!((far.distance - 6.0).abs() < 1e-5);
    }
}
