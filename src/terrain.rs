//! Shore Terrain Sampling
//!
//! Height and road-mask provider for the picnic shore. The ground rises from
//! the water line through a noisy shore band, flattens over a plateau, and
//! carries a sinuous dirt road carved slightly below grade. Everything that
//! needs ground contact (locomotion, prop floor checks, decoration
//! placement) samples through the [`Terrain`] trait.

use glam::Vec2;

use crate::math::{lerp, smoothstep};

/// Ground sampling interface consumed by locomotion and prop physics.
pub trait Terrain {
    /// Ground height at a world-space (x, z) point.
    fn height_at(&self, x: f32, z: f32) -> f32;

    /// Road-ness of a point, in [0, 1]. Used to bias decoration placement
    /// away from the path.
    fn road_mask_at(&self, x: f32, z: f32) -> f32;
}

/// One terrain sample: height plus road mask, computed together since the
/// road both lowers the ground and masks decorations.
#[derive(Debug, Clone, Copy)]
pub struct TerrainSample {
    pub height: f32,
    pub road_mask: f32,
}

/// Procedural shore terrain matching the picnic scene layout.
#[derive(Debug, Clone)]
pub struct ShoreTerrain {
    /// World z of the water's edge; land extends toward +z.
    pub shore_z: f32,
    /// Width of the band over which the shore rises to full land height.
    pub shore_band: f32,
    /// Height of the lowest shore point, just above water level.
    pub shore_low: f32,
    /// Base land height above the shore low.
    pub land_base: f32,
    /// Amplitude of the rolling ground noise.
    pub noise_amp: f32,
    /// Center of the flattened plateau.
    pub plateau_center: Vec2,
    /// Distance from plateau center where flattening is full.
    pub plateau_inner: f32,
    /// Distance where plateau influence fades out.
    pub plateau_outer: f32,
    /// Extra height the plateau adds.
    pub plateau_height: f32,
    /// Half-width of the road surface.
    pub road_half: f32,
    /// Blend distance from road edge to untouched ground.
    pub road_blend: f32,
}

impl Default for ShoreTerrain {
    fn default() -> Self {
        let shore_z = -1.8;
        Self {
            shore_z,
            shore_band: 2.8,
            shore_low: -0.215,
            land_base: 0.08,
            noise_amp: 0.045,
            plateau_center: Vec2::new(-0.6, shore_z + 3.1),
            plateau_inner: 0.9,
            plateau_outer: 2.2,
            plateau_height: 0.35,
            road_half: 0.28,
            road_blend: 0.24,
        }
    }
}

impl ShoreTerrain {
    /// Sample height and road mask together.
    pub fn sample(&self, x: f32, z: f32) -> TerrainSample {
        let shore_t = smoothstep(0.0, self.shore_band, z - self.shore_z);
        let base_noise =
            (x * 0.35).sin() * (z * 0.4).cos() * 0.6 + ((x + z) * 0.2).sin() * 0.4;

        let dist = Vec2::new(x, z).distance(self.plateau_center);
        let plateau_t = 1.0 - smoothstep(self.plateau_inner, self.plateau_outer, dist);
        let mut noise = base_noise * self.noise_amp * (1.0 - plateau_t * 0.5);
        noise *= smoothstep(0.25, 1.0, shore_t);

        let mut height = self.shore_low + (self.land_base + noise) * shore_t;
        height += self.plateau_height * plateau_t;

        // Road meanders across the plateau approach, sunk 3cm below grade.
        let road_base_z = self.plateau_center.y - 0.2;
        let road_z = road_base_z + (x * 0.45).sin() * 0.35;
        let road_distance = (z - road_z).abs();
        let road_mask =
            (1.0 - smoothstep(self.road_half, self.road_half + self.road_blend, road_distance))
                * shore_t;
        height = lerp(height, height - 0.03, road_mask);

        TerrainSample {
            height: height.max(self.shore_low),
            road_mask,
        }
    }
}

impl Terrain for ShoreTerrain {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        self.sample(x, z).height
    }

    fn road_mask_at(&self, x: f32, z: f32) -> f32 {
        self.sample(x, z).road_mask
    }
}

/// Constant-height terrain for tests.
#[derive(Debug, Clone, Copy)]
pub struct FlatTerrain(pub f32);

impl Terrain for FlatTerrain {
    fn height_at(&self, _x: f32, _z: f32) -> f32 {
        self.0
    }

    fn road_mask_at(&self, _x: f32, _z: f32) -> f32 {
        0.0
    }
}
