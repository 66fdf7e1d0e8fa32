use crate::math::Vec3;

/// Hard cap on escape-time loops regardless of what the config asks for.
pub const MAX_FRACTAL_ITERATIONS: u32 = 50;

/// Iterative distance estimators for self-similar sets. Each returns a
/// conservative lower bound on the distance to the set; a point that never
/// escapes within the iteration cap yields the last computed estimate.
#[derive(Clone, Copy, Debug)]
pub enum Fractal {
    Mandelbulb {
        power: f32,
        iterations: u32,
        bailout: f32,
    },
    Julia {
        c: Vec3,
        iterations: u32,
        bailout: f32,
    },
    Sierpinski {
        scale: f32,
        offset: f32,
        iterations: u32,
    },
    MengerCube {
        iterations: u32,
    },
    Kleinian {
        scale: f32,
        offset: f32,
        iterations: u32,
    },
}

impl Fractal {
    pub fn distance(self, p: Vec3) -> f32 {
        match self {
            Self::Mandelbulb {
                power,
                iterations,
                bailout,
            } => de_mandelbulb(p, power, cap(iterations), bailout),
            Self::Julia {
                c,
                iterations,
                bailout,
            } => de_julia(p, c, cap(iterations), bailout),
            Self::Sierpinski {
                scale,
                offset,
                iterations,
            } => de_sierpinski(p, scale, offset, cap(iterations)),
            Self::MengerCube { iterations } => de_menger(p, cap(iterations)),
            Self::Kleinian {
                scale,
                offset,
                iterations,
            } => de_kleinian(p, scale, offset, cap(iterations)),
        }
    }
}

fn cap(iterations: u32) -> u32 {
    iterations.clamp(1, MAX_FRACTAL_ITERATIONS)
}

/// Power-n bulb. Iterates the triplex power map, accumulating the running
/// derivative, and derives the bound from the escape radius.
fn de_mandelbulb(p: Vec3, power: f32, iterations: u32, bailout: f32) -> f32 {
    let mut z = p;
    let mut dr = 1.0_f32;
    let mut r = z.length().max(1e-8);

    for _ in 0..iterations {
        if r > bailout {
            break;
        }

        let theta = (z.z / r).clamp(-1.0, 1.0).acos();
        let phi = z.y.atan2(z.x);
        dr = r.powf(power - 1.0) * power * dr + 1.0;

        let zr = r.powf(power);
        let new_theta = theta * power;
        let new_phi = phi * power;
        z = Vec3::new(
            zr * new_theta.sin() * new_phi.cos(),
            zr * new_theta.sin() * new_phi.sin(),
            zr * new_theta.cos(),
        ) + p;
        r = z.length().max(1e-8);
    }

    0.5 * r.ln() * r / dr
}

/// Quadratic quaternion Julia set with a pure-vector constant; the scalar
/// quaternion component stays zero under z^2 + c for this choice of c.
fn de_julia(p: Vec3, c: Vec3, iterations: u32, bailout: f32) -> f32 {
    let mut qr = 0.0_f32;
    let mut qv = p;
    let mut dr = 1.0_f32;
    let mut r = (qr * qr + qv.dot(qv)).sqrt().max(1e-8);

    for _ in 0..iterations {
        if r > bailout {
            break;
        }

        dr = 2.0 * r * dr + 1.0;

        // q^2 = (qr^2 - |qv|^2, 2 qr qv)
        let new_qr = qr * qr - qv.dot(qv);
        let new_qv = qv * (2.0 * qr);
        qr = new_qr;
        qv = new_qv + c;
        r = (qr * qr + qv.dot(qv)).sqrt().max(1e-8);
    }

    0.5 * r.ln() * r / dr
}

/// Tetrahedral folding system: reflect into the fundamental domain, scale
/// toward a vertex, and unscale the residual distance.
fn de_sierpinski(p: Vec3, scale: f32, offset: f32, iterations: u32) -> f32 {
    let vertex = Vec3::new(1.0, 1.0, 1.0);
    let mut z = p;
    let mut de_factor = 1.0_f32;

    for _ in 0..iterations {
        if z.dot(z) > 1000.0 {
            break;
        }

        if z.x + z.y < 0.0 {
            let x = -z.y;
            z.y = -z.x;
            z.x = x;
        }
        if z.x + z.z < 0.0 {
            let x = -z.z;
            z.z = -z.x;
            z.x = x;
        }
        if z.y + z.z < 0.0 {
            let y = -z.z;
            z.z = -z.y;
            z.y = y;
        }

        z = (z * scale) - (vertex * (scale - 1.0));
        de_factor *= scale;
    }

    (z.length() - offset) / de_factor
}

/// Canonical Menger sponge carve on a unit cube: each level subtracts the
/// cross-shaped tunnels of a 3x subdivision.
fn de_menger(p: Vec3, iterations: u32) -> f32 {
    let q = p.abs() - Vec3::splat(1.0);
    let mut distance = q.max(Vec3::splat(0.0)).length() + q.max_component().min(0.0);
    let mut scale = 1.0;

    for _ in 0..iterations {
        let cell = Vec3::new(
            (p.x * scale).rem_euclid(2.0),
            (p.y * scale).rem_euclid(2.0),
            (p.z * scale).rem_euclid(2.0),
        ) - Vec3::splat(1.0);
        scale *= 3.0;
        let r = (Vec3::splat(1.0) - (cell.abs() * 3.0)).abs();

        let da = r.x.max(r.y);
        let db = r.y.max(r.z);
        let dc = r.x.max(r.z);
        let carved = (da.min(db).min(dc) - 1.0) / scale;
        distance = distance.max(carved);
    }

    distance
}

/// Kleinian-style fold: wrap into the unit cell, invert through the sphere,
/// accumulate the inversion scale. The residual plane distance divided by
/// the accumulated scale bounds the true distance.
fn de_kleinian(p: Vec3, scale: f32, offset: f32, iterations: u32) -> f32 {
    let mut z = p;
    let mut total_scale = 1.0_f32;

    for _ in 0..iterations {
        z = Vec3::new(wrap_unit(z.x), wrap_unit(z.y), wrap_unit(z.z));

        let r2 = z.dot(z).max(1e-8);
        let k = scale / r2;
        z = z * k;
        total_scale *= k;
    }

    ((0.25 * z.z.abs() / total_scale) - offset).max(p.length() - 2.5)
}

fn wrap_unit(v: f32) -> f32 {
    -1.0 + 2.0 * (0.5 * v + 0.5 - (0.5 * v + 0.5).floor())
}
