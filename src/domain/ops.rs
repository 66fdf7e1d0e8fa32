/// Boolean combinators over two signed distances. The smooth variants blend
/// the hard min/max with a quadratic polynomial controlled by `k`; as `k`
/// approaches zero they converge to the hard forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Subtraction,
    Intersection,
}

impl BooleanOp {
    /// Hard combination when `smooth_k` is zero (or negative), blended
    /// otherwise.
    pub fn combine(self, d1: f32, d2: f32, smooth_k: f32) -> f32 {
        if smooth_k > 0.0 {
            match self {
                Self::Union => smooth_union(d1, d2, smooth_k),
                Self::Subtraction => smooth_subtraction(d1, d2, smooth_k),
                Self::Intersection => smooth_intersection(d1, d2, smooth_k),
            }
        } else {
            match self {
                Self::Union => union(d1, d2),
                Self::Subtraction => subtraction(d1, d2),
                Self::Intersection => intersection(d1, d2),
            }
        }
    }
}

pub fn union(d1: f32, d2: f32) -> f32 {
    d1.min(d2)
}

pub fn subtraction(d1: f32, d2: f32) -> f32 {
    (-d1).max(d2)
}

pub fn intersection(d1: f32, d2: f32) -> f32 {
    d1.max(d2)
}

pub fn smooth_union(d1: f32, d2: f32, k: f32) -> f32 {
    let h = (0.5 + (0.5 * (d2 - d1) / k)).clamp(0.0, 1.0);
    lerp(d2, d1, h) - (k * h * (1.0 - h))
}

pub fn smooth_subtraction(d1: f32, d2: f32, k: f32) -> f32 {
    let h = (0.5 - (0.5 * (d2 + d1) / k)).clamp(0.0, 1.0);
    lerp(d2, -d1, h) + (k * h * (1.0 - h))
}

pub fn smooth_intersection(d1: f32, d2: f32, k: f32) -> f32 {
    let h = (0.5 - (0.5 * (d2 - d1) / k)).clamp(0.0, 1.0);
    lerp(d2, d1, h) + (k * h * (1.0 - h))
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + ((b - a) * t)
}
