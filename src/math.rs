//! Shared Math Helpers
//!
//! Interpolation and deterministic scatter used across the vignette systems.

use glam::Vec3;

/// Linear interpolation between a and b.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite smoothstep of t in [0, 1].
#[inline]
pub fn smoothstep01(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Smoothstep remapped over [edge0, edge1].
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    smoothstep01((x - edge0) / (edge1 - edge0))
}

/// Frame-rate independent smoothing factor: 1 - e^(-rate * dt).
///
/// Multiplying a per-frame correction by this converges toward the target
/// at the same speed regardless of frame timing.
#[inline]
pub fn damp_alpha(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt).exp()
}

/// Shortest signed angle from `from` to `to`, normalized to [-PI, PI].
pub fn angle_delta(from: f32, to: f32) -> f32 {
    let mut diff = to - from;
    while diff > std::f32::consts::PI {
        diff -= 2.0 * std::f32::consts::PI;
    }
    while diff < -std::f32::consts::PI {
        diff += 2.0 * std::f32::consts::PI;
    }
    diff
}

/// Deterministic scatter in [-0.5, 0.5) from a seed.
///
/// Same sin-hash the terrain scatter uses; keeps prop tumbling reproducible
/// without carrying an RNG.
#[inline]
pub fn hash_scatter(seed: f32) -> f32 {
    // rem_euclid keeps the fractional part in [0, 1) for negative inputs.
    ((seed * 12.9898).sin() * 43758.5453).rem_euclid(1.0) - 0.5
}

/// Scatter vector with independent per-axis hashes, scaled to `magnitude`.
pub fn scatter_vec3(seed: f32, magnitude: f32) -> Vec3 {
    Vec3::new(
        hash_scatter(seed) * magnitude,
        hash_scatter(seed + 17.31) * magnitude,
        hash_scatter(seed + 41.77) * magnitude,
    )
}
