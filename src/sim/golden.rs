//! Golden operator: `cos(πn) · cos(πφn)`
//!
//! Because φ is irrational the two factors never line up again, so the sequence
//! over integer n never repeats while staying fully reproducible. Used for hub
//! placement and other timed effects that should look organic.

use glam::DVec2;

use crate::error::{SimResult, ensure_finite};

/// The golden ratio φ = (1 + √5) / 2
pub const PHI: f64 = 1.618_033_988_749_895;

/// `cos(π·t)` with `t` reduced mod 2 first.
///
/// The remainder is exact for non-negative `t`, so large arguments don't lose
/// accuracy inside `cos`.
#[inline]
fn cos_pi(t: f64) -> f64 {
    (std::f64::consts::PI * t.rem_euclid(2.0)).cos()
}

/// Sample the golden operator at `n`; always within [-1, 1]
pub fn golden_value(n: f64) -> SimResult<f64> {
    let n = ensure_finite(n, "oscillator input")?;
    // φn mod 2, taken on φn/2 so the product stays finite for any finite n
    let phase = 2.0 * (0.5 * PHI * n).rem_euclid(1.0);
    Ok(cos_pi(n) * cos_pi(phase))
}

/// Fixed world position of the `n`th golden hub
pub fn hub_position(n: f64, world_size: f64) -> SimResult<DVec2> {
    let n = ensure_finite(n, "hub index")?;
    let world_size = ensure_finite(world_size, "world size")?;
    Ok(DVec2::new(
        (n.sin() * 0.5 + 0.5) * world_size,
        ((n * PHI).cos() * 0.5 + 0.5) * world_size,
    ))
}

/// Ring radius multiplier for the `n`th hub, in [0.6, 1.0]
pub fn hub_ring_scale(n: f64) -> SimResult<f64> {
    Ok(0.8 + golden_value(n)? * 0.2)
}
