use crate::math::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

/// Resolved surface appearance for a hit point.
#[derive(Clone, Copy, Debug)]
pub struct Material {
    pub name: &'static str,
    pub albedo: Vec3,
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub shininess: f32,
}

impl Material {
    pub fn matte(name: &'static str, albedo: Vec3) -> Self {
        Self {
            name,
            albedo,
            ambient: 0.08,
            diffuse: 0.92,
            specular: 0.0,
            shininess: 16.0,
        }
    }

    pub fn glossy(name: &'static str, albedo: Vec3) -> Self {
        Self {
            name,
            albedo,
            ambient: 0.06,
            diffuse: 0.85,
            specular: 0.35,
            shininess: 64.0,
        }
    }
}
