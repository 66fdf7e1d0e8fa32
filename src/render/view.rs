use crate::config::{vec3_from, RenderFrameConfig};
use crate::math::Vec3;

#[derive(Clone, Copy, Debug)]
pub struct View {
    pub origin: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub vertical_fov_deg: f32,
}

const DEFAULT_TARGET: Vec3 = Vec3::new(0.0, 0.0, 0.0);
const DEFAULT_EYE_HEIGHT: f32 = 1.1;

impl View {
    /// Explicit camera vectors win; otherwise the camera orbits the target
    /// at `orbit_distance`, driven by the pointer-derived `orbit_angle`.
    pub fn from_frame(frame: &RenderFrameConfig) -> Self {
        let (origin, target) = match (frame.camera_origin, frame.camera_target) {
            (Some(origin), Some(target)) => (vec3_from(origin), vec3_from(target)),
            _ => {
                let angle = frame.orbit_angle.unwrap_or(0.6);
                let distance = frame.orbit_distance;
                let origin = DEFAULT_TARGET
                    + Vec3::new(
                        distance * angle.sin(),
                        DEFAULT_EYE_HEIGHT,
                        distance * angle.cos(),
                    );
                (origin, DEFAULT_TARGET)
            }
        };

        Self {
            origin,
            target,
            up: Vec3::new(0.0, 1.0, 0.0),
            vertical_fov_deg: 38.0,
        }
    }
}
