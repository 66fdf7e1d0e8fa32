use crate::math::Vec3;

/// Closed-form signed distance primitives. Points are expected in object
/// space (already translated/scaled by the owning node); distances are
/// negative inside the surface.
#[derive(Clone, Copy, Debug)]
pub enum Primitive {
    Sphere { radius: f32 },
    Box { half_extents: Vec3 },
    Torus { major_radius: f32, minor_radius: f32 },
    Cylinder { radius: f32, half_height: f32 },
    Capsule { radius: f32, half_height: f32 },
    Octahedron { size: f32 },
}

impl Primitive {
    pub fn distance(self, p: Vec3) -> f32 {
        match self {
            Self::Sphere { radius } => sd_sphere(p, radius),
            Self::Box { half_extents } => sd_box(p, half_extents),
            Self::Torus {
                major_radius,
                minor_radius,
            } => sd_torus(p, major_radius, minor_radius),
            Self::Cylinder {
                radius,
                half_height,
            } => sd_cylinder(p, radius, half_height),
            Self::Capsule {
                radius,
                half_height,
            } => sd_capsule(p, radius, half_height),
            Self::Octahedron { size } => sd_octahedron(p, size),
        }
    }
}

fn sd_sphere(p: Vec3, radius: f32) -> f32 {
    p.length() - radius
}

fn sd_box(p: Vec3, half_extents: Vec3) -> f32 {
    let q = p.abs() - half_extents;
    let outside = q.max(Vec3::splat(0.0));
    outside.length() + q.max_component().min(0.0)
}

fn sd_torus(p: Vec3, major_radius: f32, minor_radius: f32) -> f32 {
    let ring = Vec3::new(p.x, 0.0, p.z).length() - major_radius;
    (ring * ring + p.y * p.y).sqrt() - minor_radius
}

fn sd_cylinder(p: Vec3, radius: f32, half_height: f32) -> f32 {
    let dx = Vec3::new(p.x, 0.0, p.z).length() - radius;
    let dy = p.y.abs() - half_height;
    let outside_x = dx.max(0.0);
    let outside_y = dy.max(0.0);
    dx.max(dy).min(0.0) + (outside_x * outside_x + outside_y * outside_y).sqrt()
}

fn sd_capsule(p: Vec3, radius: f32, half_height: f32) -> f32 {
    // Distance to the vertical segment from -h to +h on the y axis.
    let y = p.y.clamp(-half_height, half_height);
    (p - Vec3::new(0.0, y, 0.0)).length() - radius
}

fn sd_octahedron(p: Vec3, size: f32) -> f32 {
    let q = p.abs();
    // L1 cone approximation, scaled back to a Euclidean bound.
    (q.x + q.y + q.z - size) * 0.577_350_26
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-5;

    #[test]
    fn sphere_distance_is_exact() {
        let sphere = Primitive::Sphere { radius: 0.5 };
        let samples = [
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, -1.5, 0.0),
            Vec3::new(0.3, 0.4, 0.0),
            Vec3::new(0.1, 0.0, 0.0),
        ];
        for p in samples {
            assert!(
                (sphere.distance(p) - (p.length() - 0.5)).abs() < TOLERANCE,
                "wrong distance at {p:?}"
            );
        }
    }

    #[test]
    fn box_distance_matches_face_and_corner() {
        let shape = Primitive::Box {
            half_extents: Vec3::splat(1.0),
        };
        // Straight out of a face.
        assert!((shape.distance(Vec3::new(2.0, 0.0, 0.0)) - 1.0).abs() < TOLERANCE);
        // Out of a corner: Euclidean distance to (1,1,1).
        let corner = shape.distance(Vec3::new(2.0, 2.0, 2.0));
        assert!((corner - 3.0_f32.sqrt()).abs() < TOLERANCE);
        // Inside is negative.
        assert!(shape.distance(Vec3::splat(0.0)) < 0.0);
    }

    #[test]
    fn torus_distance_on_ring_axis() {
        let shape = Primitive::Torus {
            major_radius: 1.0,
            minor_radius: 0.25,
        };
        // On the ring circle itself the distance is -minor_radius.
        assert!((shape.distance(Vec3::new(1.0, 0.0, 0.0)) + 0.25).abs() < TOLERANCE);
        // At the center of the torus hole.
        assert!((shape.distance(Vec3::splat(0.0)) - 0.75).abs() < TOLERANCE);
    }

    #[test]
    fn capsule_matches_sphere_at_caps() {
        let shape = Primitive::Capsule {
            radius: 0.3,
            half_height: 0.5,
        };
        // Above the top cap the capsule behaves like a sphere at (0, 0.5, 0).
        let p = Vec3::new(0.0, 1.5, 0.0);
        assert!((shape.distance(p) - 0.7).abs() < TOLERANCE);
        // Sideways at mid-height it behaves like an infinite cylinder.
        assert!((shape.distance(Vec3::new(1.0, 0.0, 0.0)) - 0.7).abs() < TOLERANCE);
    }

    #[test]
    fn cylinder_inside_and_outside_signs() {
        let shape = Primitive::Cylinder {
            radius: 0.5,
            half_height: 1.0,
        };
        assert!(shape.distance(Vec3::splat(0.0)) < 0.0);
        assert!((shape.distance(Vec3::new(0.0, 2.0, 0.0)) - 1.0).abs() < TOLERANCE);
        assert!((shape.distance(Vec3::new(2.0, 0.0, 0.0)) - 1.5).abs() < TOLERANCE);
    }

    #[test]
    fn octahedron_is_a_conservative_bound() {
        let shape = Primitive::Octahedron { size: 1.0 };
        // On a vertex the estimate must be zero-ish and never positive
        // beyond the true distance.
        assert!(shape.distance(Vec3::new(1.0, 0.0, 0.0)).abs() < 1e-4);
        assert!(shape.distance(Vec3::splat(0.0)) < 0.0);
        let outside = shape.distance(Vec3::new(3.0, 0.0, 0.0));
        assert!(outside > 0.0 && outside <= 2.0 + TOLERANCE);
    }
}
