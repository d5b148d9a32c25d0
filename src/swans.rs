//! Swan Story
//!
//! Two swans glide the lake on a looping three-phase parametric route:
//! tracing a heart together, circling close, then drifting apart on a
//! wider circle before the loop restarts. Pure time-driven state.

use glam::{Vec2, Vec3};

use crate::math::{lerp, smoothstep01};

const HEART_DURATION: f32 = 18.0;
const HUG_DURATION: f32 = 10.0;
const SEPARATE_DURATION: f32 = 14.0;
const STORY_TOTAL: f32 = HEART_DURATION + HUG_DURATION + SEPARATE_DURATION;
/// Seconds ahead to sample for the heading.
const LOOK_AHEAD: f32 = 0.03;

/// Presentation transform for one swan.
#[derive(Debug, Clone, Copy)]
pub struct SwanPose {
    pub position: Vec3,
    pub yaw: f32,
    /// Gentle side-to-side roll.
    pub roll: f32,
}

/// The looping two-swan choreography over a rectangular water patch.
#[derive(Debug)]
pub struct SwanStory {
    water_center: Vec2,
    water_level: f32,
    heart_scale: f32,
    hug_radius: f32,
    separate_radius: f32,
    time: f32,
}

impl SwanStory {
    pub fn new(water_center: Vec2, water_size: Vec2, water_level: f32) -> Self {
        let min_size = water_size.x.min(water_size.y);
        Self {
            water_center,
            water_level,
            heart_scale: 0.18 * min_size,
            hug_radius: 0.22 * min_size,
            separate_radius: 0.35 * min_size,
            time: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.time += dt;
    }

    /// Planar route position at a story time for one swan. The second swan
    /// runs the same curve phase-shifted, with the shift itself easing
    /// between phases so the hand-offs are seamless.
    fn route_at(&self, time: f32, swan: usize) -> Vec2 {
        let t = time.rem_euclid(STORY_TOTAL);
        let shifted = swan != 0;

        if t < HEART_DURATION {
            let phase = t / HEART_DURATION;
            let base = phase * std::f32::consts::TAU;
            let offset = lerp(std::f32::consts::PI, 0.0, smoothstep01(phase));
            let a = base + if shifted { offset } else { 0.0 };
            let (sin, cos) = a.sin_cos();
            // Classic heart parametrics, normalized to unit extent
            // (x spans +-16, y +-17 raw) so the scale fits the lake.
            let x = sin * sin * sin;
            let y = (13.0 * cos
                - 5.0 * (2.0 * a).cos()
                - 2.0 * (3.0 * a).cos()
                - (4.0 * a).cos())
                / 17.0;
            return self.water_center + Vec2::new(x * self.heart_scale, y * self.heart_scale * 0.8);
        }

        if t < HEART_DURATION + HUG_DURATION {
            let phase = (t - HEART_DURATION) / HUG_DURATION;
            let a = phase * std::f32::consts::TAU + if shifted { 0.6 } else { 0.0 };
            return self.water_center + Vec2::new(a.cos(), a.sin()) * self.hug_radius;
        }

        let phase = (t - HEART_DURATION - HUG_DURATION) / SEPARATE_DURATION;
        let offset = lerp(0.6, std::f32::consts::PI, smoothstep01(phase));
        let a = phase * std::f32::consts::TAU + if shifted { offset } else { 0.0 };
        self.water_center + Vec2::new(a.cos(), a.sin()) * self.separate_radius
    }

    /// Current transform for swan 0 or 1: route position with a wave bob,
    /// heading taken from a slightly-ahead route sample.
    pub fn pose(&self, swan: usize) -> SwanPose {
        let here = self.route_at(self.time, swan);
        let ahead = self.route_at(self.time + LOOK_AHEAD, swan);
        let dir = ahead - here;
        let yaw = if dir != Vec2::ZERO {
            dir.x.atan2(dir.y)
        } else {
            0.0
        };
        let bob = (self.time * 2.0 + swan as f32).sin() * 0.01;
        SwanPose {
            position: Vec3::new(here.x, self.water_level + 0.06 + bob, here.y),
            yaw,
            roll: (self.time * 1.3 + swan as f32).sin() * 0.02,
        }
    }
}
