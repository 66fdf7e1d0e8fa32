use crate::math::Vec3;

use super::fractal::Fractal;
use super::material::MaterialId;
use super::ops::BooleanOp;
use super::primitive::Primitive;

/// One sample of the scene distance field: a conservative lower bound on
/// the Euclidean distance to the nearest surface plus the material that
/// owns that surface.
#[derive(Clone, Copy, Debug)]
pub struct SdfSample {
    pub distance: f32,
    pub material: MaterialId,
}

/// Composable scene graph. Leaves place a primitive or a fractal estimator
/// in world space (translate + uniform scale); interior nodes combine two
/// subtrees with a hard or smooth boolean.
#[derive(Clone, Debug)]
pub enum SdfNode {
    Primitive {
        shape: Primitive,
        center: Vec3,
        scale: f32,
        material: MaterialId,
    },
    Fractal {
        kind: Fractal,
        center: Vec3,
        scale: f32,
        material: MaterialId,
    },
    /// Horizontal floor plane at a fixed height.
    Plane { y: f32, material: MaterialId },
    Boolean {
        op: BooleanOp,
        smooth_k: f32,
        left: Box<SdfNode>,
        right: Box<SdfNode>,
    },
}

impl SdfNode {
    pub fn evaluate(&self, p: Vec3) -> SdfSample {
        match self {
            Self::Primitive {
                shape,
                center,
                scale,
                material,
            } => {
                let local = (p - *center) / scale.max(1e-6);
                SdfSample {
                    distance: shape.distance(local) * scale.max(1e-6),
                    material: *material,
                }
            }
            Self::Fractal {
                kind,
                center,
                scale,
                material,
            } => {
                let local = (p - *center) / scale.max(1e-6);
                SdfSample {
                    distance: kind.distance(local) * scale.max(1e-6),
                    material: *material,
                }
            }
            Self::Plane { y, material } => SdfSample {
                distance: p.y - y,
                material: *material,
            },
            Self::Boolean {
                op,
                smooth_k,
                left,
                right,
            } => {
                let a = left.evaluate(p);
                let b = right.evaluate(p);
                SdfSample {
                    distance: op.combine(a.distance, b.distance, *smooth_k),
                    material: winning_material(*op, a, b),
                }
            }
        }
    }

    pub fn distance(&self, p: Vec3) -> f32 {
        self.evaluate(p).distance
    }

    /// Depth of the graph; used by scene validation to cap recursion.
    pub fn depth(&self) -> usize {
        match self {
            Self::Boolean { left, right, .. } => 1 + left.depth().max(right.depth()),
            _ => 1,
        }
    }

    pub fn for_each_material(&self, f: &mut impl FnMut(MaterialId)) {
        match self {
            Self::Primitive { material, .. }
            | Self::Fractal { material, .. }
            | Self::Plane { material, .. } => f(*material),
            Self::Boolean { left, right, .. } => {
                left.for_each_material(f);
                right.for_each_material(f);
            }
        }
    }
}

/// Which child's material shows on the combined surface. Union keeps the
/// closer surface; subtraction exposes the carved body; intersection keeps
/// the farther (binding) surface.
fn winning_material(op: BooleanOp, a: SdfSample, b: SdfSample) -> MaterialId {
    match op {
        BooleanOp::Union => {
            if a.distance <= b.distance {
                a.material
            } else {
                b.material
            }
        }
        BooleanOp::Subtraction => b.material,
        BooleanOp::Intersection => {
            if a.distance >= b.distance {
                a.material
            } else {
                b.material
            }
        }
    }
}
