use crate::domain::Scene;

pub const MAX_LIGHTS: usize = 8;
pub const MAX_MATERIALS: usize = 32;
pub const MAX_GRAPH_DEPTH: usize = 16;

#[derive(Clone, Copy, Debug)]
pub struct RendererCapabilities {
    pub max_lights: usize,
    pub max_materials: usize,
    pub max_graph_depth: usize,
}

pub fn cpu_capabilities() -> RendererCapabilities {
    RendererCapabilities {
        max_lights: MAX_LIGHTS,
        max_materials: MAX_MATERIALS,
        max_graph_depth: MAX_GRAPH_DEPTH,
    }
}

pub fn validate_scene_against_capabilities(
    scene: &Scene,
    capabilities: RendererCapabilities,
) -> Result<(), String> {
    if scene.lights.is_empty() {
        return Err("scene must carry at least one light".into());
    }
    if scene.lights.len() > capabilities.max_lights {
        return Err(format!(
            "scene has {} lights but renderer supports at most {}",
            scene.lights.len(),
            capabilities.max_lights
        ));
    }
    if scene.materials.len() > capabilities.max_materials {
        return Err(format!(
            "scene has {} materials but renderer supports at most {}",
            scene.materials.len(),
            capabilities.max_materials
        ));
    }
    if scene.root.depth() > capabilities.max_graph_depth {
        return Err(format!(
            "scene graph depth {} exceeds renderer cap {}",
            scene.root.depth(),
            capabilities.max_graph_depth
        ));
    }

    for light in &scene.lights {
        light
            .validate_physical()
            .map_err(|error| format!("light '{}' is invalid: {error}", light.name))?;
    }

    let mut missing = None;
    scene.root.for_each_material(&mut |id| {
        if scene.material(id).is_none() && missing.is_none() {
            missing = Some(id);
        }
    });
    if let Some(id) = missing {
        return Err(format!("scene graph references missing material id {}", id.0));
    }

    if !scene.fog_density.is_finite() || scene.fog_density < 0.0 {
        return Err("fog density must be finite and >= 0".into());
    }

    if let Some(clouds) = &scene.clouds {
        if !clouds.thickness.is_finite() || clouds.thickness <= 0.0 {
            return Err("cloud layer thickness must be finite and > 0".into());
        }
        if !(0.0..=1.0).contains(&clouds.coverage) {
            return Err("cloud coverage must be within [0, 1]".into());
        }
        if !(0.0..1.0).contains(&clouds.scattering) {
            return Err("cloud scattering must be within [0, 1)".into());
        }
    }

    Ok(())
}
