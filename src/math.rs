use std::ops::{Add, Div, Mul, Neg, Sub};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    pub fn dot(self, rhs: Self) -> f32 {
        (self.x * rhs.x) + (self.y * rhs.y) + (self.z * rhs.z)
    }

    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            (self.y * rhs.z) - (self.z * rhs.y),
            (self.z * rhs.x) - (self.x * rhs.z),
            (self.x * rhs.y) - (self.y * rhs.x),
        )
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return self;
        }
        self / len
    }

    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    pub fn max(self, rhs: Self) -> Self {
        Self::new(self.x.max(rhs.x), self.y.max(rhs.y), self.z.max(rhs.z))
    }

    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor(), self.z.floor())
    }

    pub fn max_component(self) -> f32 {
        self.x.max(self.y).max(self.z)
    }

    pub fn clamp01(self) -> Self {
        Self::new(
            self.x.clamp(0.0, 1.0),
            self.y.clamp(0.0, 1.0),
            self.z.clamp(0.0, 1.0),
        )
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vec3> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: Vec3) -> Self::Output {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Div<f32> for Vec3 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[derive(Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(self, t: f32) -> Vec3 {
        self.origin + (self.direction * t)
    }
}

pub fn mix(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    (a * (1.0 - t)) + (b * t)
}

fn fract(v: f32) -> f32 {
    v - v.floor()
}

fn hash31(p: Vec3) -> f32 {
    let n = p.dot(Vec3::new(127.1, 311.7, 74.7));
    fract(n.sin() * 43758.5453)
}

fn smoothstep01(t: f32) -> f32 {
    t * t * (3.0 - (2.0 * t))
}

/// Lattice value noise in [0, 1], trilinearly interpolated with a
/// smoothstep fade on the fractional coordinate.
pub fn value_noise(p: Vec3) -> f32 {
    let cell = p.floor();
    let f = p - cell;
    let u = smoothstep01(f.x);
    let v = smoothstep01(f.y);
    let w = smoothstep01(f.z);

    let corner = |dx: f32, dy: f32, dz: f32| hash31(cell + Vec3::new(dx, dy, dz));

    let x00 = corner(0.0, 0.0, 0.0) + ((corner(1.0, 0.0, 0.0) - corner(0.0, 0.0, 0.0)) * u);
    let x10 = corner(0.0, 1.0, 0.0) + ((corner(1.0, 1.0, 0.0) - corner(0.0, 1.0, 0.0)) * u);
    let x01 = corner(0.0, 0.0, 1.0) + ((corner(1.0, 0.0, 1.0) - corner(0.0, 0.0, 1.0)) * u);
    let x11 = corner(0.0, 1.0, 1.0) + ((corner(1.0, 1.0, 1.0) - corner(0.0, 1.0, 1.0)) * u);

    let y0 = x00 + ((x10 - x00) * v);
    let y1 = x01 + ((x11 - x01) * v);
    y0 + ((y1 - y0) * w)
}

/// Fractal accumulation of value noise: each octave doubles the frequency
/// and halves the amplitude. Normalized so the result stays within [0, 1].
pub fn fbm(p: Vec3, octaves: u32) -> f32 {
    let mut total = 0.0;
    let mut amplitude = 0.5;
    let mut frequency = 1.0;
    let mut norm = 0.0;

    for _ in 0..octaves.max(1) {
        total += value_noise(p * frequency) * amplitude;
        norm += amplitude;
        amplitude *= 0.5;
        frequency *= 2.0;
    }

    total / norm
}

pub fn hash_u32(mut value: u32) -> u32 {
    value ^= value >> 16;
    value = value.wrapping_mul(0x7feb_352d);
    value ^= value >> 15;
    value = value.wrapping_mul(0x846c_a68b);
    value ^= value >> 16;
    value
}

pub fn random01(seed: u32) -> f32 {
    hash_u32(seed) as f32 / u32::MAX as f32
}

pub fn sample_jitter(x: u32, y: u32, sample: u32, axis: u32) -> f32 {
    let seed = x
        .wrapping_mul(1973)
        .wrapping_add(y.wrapping_mul(9277))
        .wrapping_add(sample.wrapping_mul(26699))
        .wrapping_add(axis.wrapping_mul(104_729))
        ^ 0x68bc_21eb;
    random01(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_of_zero_vector_stays_zero() {
        let v = Vec3::splat(0.0).normalize();
        assert_eq!(v, Vec3::splat(0.0));
    }

    #[test]
    fn value_noise_stays_in_unit_range() {
        for i in 0..64 {
            let p = Vec3::new(i as f32 * 0.37, i as f32 * -0.21, i as f32 * 1.13);
            let n = value_noise(p);
            assert!((0.0..=1.0).contains(&n), "noise out of range: {n}");
        }
    }

    #[test]
    fn fbm_stays_in_unit_range_and_is_deterministic() {
        let p = Vec3::new(1.7, -2.3, 0.9);
        let a = fbm(p, 5);
        let b = fbm(p, 5);
        assert_eq!(a, b);
        assert!((0.0..=1.0).contains(&a));
    }

    #[test]
    fn sample_jitter_is_deterministic_and_bounded() {
        let a = sample_jitter(3, 7, 1, 0);
        let b = sample_jitter(3, 7, 1, 0);
        assert_eq!(a, b);
        assert!((0.0..=1.0).contains(&a));
    }
}
