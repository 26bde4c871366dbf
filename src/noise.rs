//! Fractal value noise seeded deterministically from the RNG stream.
//! Used for coastline jitter and hill relief.

use crate::rng::hash2;

#[inline]
fn smootherstep(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Simplex-like 2D gradient noise (Perlin-style, 16 evenly-spaced unit
/// gradients for isotropy). Gradients are seeded entirely from `hash2`,
/// which derives from the RNG's LCG step — no external noise crate.
#[inline]
pub fn simplex(x: f64, y: f64, seed: u32) -> f64 {
    let ix = x.floor() as i32;
    let iy = y.floor() as i32;
    let fx = x - ix as f64;
    let fy = y - iy as f64;
    let sx = smootherstep(fx);
    let sy = smootherstep(fy);

    #[inline]
    fn grad(hash: u32, dx: f64, dy: f64) -> f64 {
        match hash & 15 {
            0 => dx,
            1 => 0.924 * dx + 0.383 * dy,
            2 => 0.707 * (dx + dy),
            3 => 0.383 * dx + 0.924 * dy,
            4 => dy,
            5 => -0.383 * dx + 0.924 * dy,
            6 => 0.707 * (-dx + dy),
            7 => -0.924 * dx + 0.383 * dy,
            8 => -dx,
            9 => -0.924 * dx - 0.383 * dy,
            10 => 0.707 * (-dx - dy),
            11 => -0.383 * dx - 0.924 * dy,
            12 => -dy,
            13 => 0.383 * dx - 0.924 * dy,
            14 => 0.707 * (dx - dy),
            _ => 0.924 * dx - 0.383 * dy,
        }
    }

    let v00 = grad(hash2(ix, iy, seed), fx, fy);
    let v10 = grad(hash2(ix + 1, iy, seed), fx - 1.0, fy);
    let v01 = grad(hash2(ix, iy + 1, seed), fx, fy - 1.0);
    let v11 = grad(hash2(ix + 1, iy + 1, seed), fx - 1.0, fy - 1.0);

    let a = lerp(v00, v10, sx);
    let b = lerp(v01, v11, sx);
    lerp(a, b, sy) * 1.414
}

/// Fractal Brownian Motion: `Σ 2^-i · simplex(2^i x, 2^i y) / Σ 2^-i`, i = 0..octaves-1.
pub fn fbm(x: f64, y: f64, seed: u32, octaves: u32) -> f64 {
    let mut sum = 0.0;
    let mut norm = 0.0;
    let mut amp = 1.0;
    let mut freq = 1.0;
    for i in 0..octaves {
        sum += simplex(x * freq, y * freq, seed.wrapping_add(i)) * amp;
        norm += amp;
        amp *= 0.5;
        freq *= 2.0;
    }
    if norm > 0.0 { sum / norm } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fbm_is_bounded() {
        for i in 0..200 {
            let x = i as f64 * 0.137;
            let y = i as f64 * 0.211;
            let v = fbm(x, y, 7, 4);
            assert!(v.abs() <= 1.5, "fbm out of expected range: {v}");
        }
    }

    #[test]
    fn fbm_is_deterministic_per_seed() {
        let a = fbm(3.25, 1.75, 42, 5);
        let b = fbm(3.25, 1.75, 42, 5);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_give_different_fields() {
        let a = fbm(3.25, 1.75, 1, 5);
        let b = fbm(3.25, 1.75, 2, 5);
        assert_ne!(a, b);
    }
}
