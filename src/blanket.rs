//! Picnic Blanket Press Field
//!
//! A vertex grid over the blanket footprint whose vertical displacement
//! dents under nearby characters and relaxes back exponentially. Props
//! resting on the blanket use [`BlanketPress::surface_height_at`] as
//! their floor instead of the bare ground.

use glam::{Vec2, Vec3};

use crate::config::BlanketConfig;
use crate::math::damp_alpha;
use crate::terrain::Terrain;

/// Cloth displacement state for the blanket's top surface.
#[derive(Debug)]
pub struct BlanketPress {
    cfg: BlanketConfig,
    /// Resting height of the cloth top (ground at center plus lift).
    rest_height: f32,
    /// Per-vertex vertical offset from rest, row-major (cols+1) x (rows+1).
    displacements: Vec<f32>,
}

impl BlanketPress {
    pub fn new(cfg: BlanketConfig, terrain: &dyn Terrain) -> Self {
        let (cols, rows) = cfg.segments;
        let rest_height = terrain.height_at(cfg.center.x, cfg.center.z) + cfg.lift;
        Self {
            cfg,
            rest_height,
            displacements: vec![0.0; (cols + 1) * (rows + 1)],
        }
    }

    fn vertex_world(&self, col: usize, row: usize) -> Vec2 {
        let (cols, rows) = self.cfg.segments;
        Vec2::new(
            self.cfg.center.x + (col as f32 / cols as f32 - 0.5) * self.cfg.size.x,
            self.cfg.center.z + (row as f32 / rows as f32 - 0.5) * self.cfg.size.y,
        )
    }

    /// Dent the cloth under each character and relax everything else.
    ///
    /// Each vertex eases toward a quadratic-falloff target depth from its
    /// nearest presser, clamped at the configured sag limit.
    pub fn update(&mut self, pressers: &[Vec3], dt: f32) {
        let (cols, rows) = self.cfg.segments;
        let smoothing = damp_alpha(self.cfg.press_stiffness, dt);

        for row in 0..=rows {
            for col in 0..=cols {
                let v = self.vertex_world(col, row);
                let mut target = 0.0f32;
                for p in pressers {
                    let dist = Vec2::new(v.x - p.x, v.y - p.z).length();
                    if dist < self.cfg.press_radius {
                        let t = 1.0 - dist / self.cfg.press_radius;
                        target = target.min(-self.cfg.press_strength * t * t);
                    }
                }
                target = target.max(self.cfg.min_down);

                let i = row * (cols + 1) + col;
                self.displacements[i] += (target - self.displacements[i]) * smoothing;
            }
        }
    }

    /// Whether a point lies over the blanket footprint.
    pub fn covers(&self, x: f32, z: f32) -> bool {
        (x - self.cfg.center.x).abs() <= self.cfg.size.x * 0.5
            && (z - self.cfg.center.z).abs() <= self.cfg.size.y * 0.5
    }

    /// Bilinear displacement sample at a world point inside the footprint.
    fn displacement_at(&self, x: f32, z: f32) -> f32 {
        let (cols, rows) = self.cfg.segments;
        let u = ((x - self.cfg.center.x) / self.cfg.size.x + 0.5) * cols as f32;
        let w = ((z - self.cfg.center.z) / self.cfg.size.y + 0.5) * rows as f32;
        let c0 = (u.floor() as usize).min(cols - 1);
        let r0 = (w.floor() as usize).min(rows - 1);
        let fu = (u - c0 as f32).clamp(0.0, 1.0);
        let fw = (w - r0 as f32).clamp(0.0, 1.0);

        let at = |c: usize, r: usize| self.displacements[r * (cols + 1) + c];
        let top = at(c0, r0) * (1.0 - fu) + at(c0 + 1, r0) * fu;
        let bottom = at(c0, r0 + 1) * (1.0 - fu) + at(c0 + 1, r0 + 1) * fu;
        top * (1.0 - fw) + bottom * fw
    }

    /// Resting height for props: the cloth top where it covers the point,
    /// never below the ground itself.
    pub fn surface_height_at(&self, x: f32, z: f32, terrain: &dyn Terrain) -> f32 {
        let ground = terrain.height_at(x, z);
        if self.covers(x, z) {
            ground.max(self.rest_height + self.displacement_at(x, z))
        } else {
            ground
        }
    }

    /// Per-vertex world heights for presentation, row-major.
    pub fn vertex_heights(&self) -> impl Iterator<Item = (Vec2, f32)> + '_ {
        let (cols, rows) = self.cfg.segments;
        (0..=rows).flat_map(move |row| {
            (0..=cols).map(move |col| {
                let v = self.vertex_world(col, row);
                let i = row * (cols + 1) + col;
                (v, self.rest_height + self.displacements[i])
            })
        })
    }
}
