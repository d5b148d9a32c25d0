//! Kiss Sequence
//!
//! Timed choreography bringing the pair together: a blend factor that
//! rises, holds, and falls again drives both positions, the hug/tilt pose,
//! and a decorative heart marker derived from the same timer.

use glam::{Vec2, Vec3};

use crate::character::{Character, CharacterMode};
use crate::config::KissConfig;
use crate::math::smoothstep01;

#[derive(Debug, Clone, Copy)]
enum KissState {
    Idle,
    Active {
        elapsed: f32,
        start: [Vec3; 2],
        target: [Vec3; 2],
    },
}

/// Derived heart-marker transform for presentation. Exists only while the
/// sequence is active; every field is a pure function of the timer.
#[derive(Debug, Clone, Copy)]
pub struct KissMarker {
    pub position: Vec3,
    pub scale: f32,
    pub opacity: f32,
}

/// The pair-scoped kiss state machine.
#[derive(Debug)]
pub struct KissSequencer {
    state: KissState,
    cooldown: f32,
}

impl KissSequencer {
    pub fn new() -> Self {
        Self {
            state: KissState::Idle,
            cooldown: 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, KissState::Active { .. })
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown
    }

    /// Try to start the sequence. Every precondition blocks independently:
    /// pair distance, mutual facing, elapsed cooldown, and neither party
    /// seated or already kissing. Returns whether the sequence started.
    pub fn try_start(&mut self, characters: &mut [Character], cfg: &KissConfig) -> bool {
        if self.is_active() || self.cooldown > 0.0 || characters.len() < 2 {
            return false;
        }
        let (a, b) = (&characters[0], &characters[1]);
        if a.mode != CharacterMode::Free || b.mode != CharacterMode::Free {
            return false;
        }

        let to_b = b.position - a.position;
        let planar = Vec2::new(to_b.x, to_b.z);
        let dist = planar.length();
        if dist >= cfg.distance_threshold || dist < 1e-4 {
            return false;
        }
        let axis = Vec3::new(planar.x / dist, 0.0, planar.y / dist);
        if a.forward().dot(axis) <= cfg.facing_dot || b.forward().dot(-axis) <= cfg.facing_dot {
            return false;
        }

        let mid = (a.position + b.position) * 0.5;
        let half = axis * (cfg.pair_separation * 0.5);
        self.state = KissState::Active {
            elapsed: 0.0,
            start: [a.position, b.position],
            target: [mid - half, mid + half],
        };
        characters[0].mode = CharacterMode::Kissing;
        characters[1].mode = CharacterMode::Kissing;
        true
    }

    /// Advance the choreography one frame. Positions blend from start to
    /// target and back as the factor rises and falls, both characters are
    /// re-faced toward each other, and the hug/tilt pose follows the factor.
    pub fn update(&mut self, characters: &mut [Character], cfg: &KissConfig, dt: f32) {
        self.cooldown = (self.cooldown - dt).max(0.0);

        let KissState::Active {
            elapsed,
            start,
            target,
        } = self.state
        else {
            return;
        };
        let elapsed = elapsed + dt;

        if elapsed >= cfg.duration {
            for c in characters.iter_mut().take(2) {
                c.mode = CharacterMode::Free;
                c.pose.head_tilt = 0.0;
                c.pose.arm_hug = 0.0;
            }
            self.state = KissState::Idle;
            self.cooldown = cfg.cooldown;
            return;
        }

        let factor = blend_factor(elapsed / cfg.duration, cfg);
        for i in 0..2 {
            characters[i].position = start[i].lerp(target[i], factor);
        }

        // Face partners directly; the blend keeps this from popping.
        for i in 0..2 {
            let other = characters[1 - i].position;
            let d = other - characters[i].position;
            if Vec2::new(d.x, d.z) != Vec2::ZERO {
                characters[i].yaw = d.x.atan2(d.z);
            }
            // Tilt heads to opposite sides so they do not collide.
            let side = if i == 0 { 1.0 } else { -1.0 };
            characters[i].pose.head_tilt = cfg.head_tilt * factor * side;
            characters[i].pose.arm_hug = cfg.arm_hug * factor;
        }

        self.state = KissState::Active {
            elapsed,
            start,
            target,
        };
    }

    /// The heart marker, derived entirely from the sequence timer: pops in,
    /// rises above the pair, and fades toward the end.
    pub fn marker(&self, characters: &[Character], cfg: &KissConfig) -> Option<KissMarker> {
        let KissState::Active { elapsed, .. } = self.state else {
            return None;
        };
        if characters.len() < 2 {
            return None;
        }
        let progress = elapsed / cfg.duration;
        let mid = (characters[0].position + characters[1].position) * 0.5;
        Some(KissMarker {
            position: mid + Vec3::new(0.0, 0.55 + cfg.marker_rise * progress, 0.0),
            scale: smoothstep01(progress / 0.2),
            opacity: 1.0 - smoothstep01((progress - 0.7) / 0.3),
        })
    }
}

impl Default for KissSequencer {
    fn default() -> Self {
        Self::new()
    }
}

/// Three-phase blend: eased rise, full hold, eased fall.
fn blend_factor(progress: f32, cfg: &KissConfig) -> f32 {
    if progress < cfg.ease_in_end {
        smoothstep01(progress / cfg.ease_in_end)
    } else if progress < cfg.hold_end {
        1.0
    } else {
        1.0 - smoothstep01((progress - cfg.hold_end) / (1.0 - cfg.hold_end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::FlatTerrain;

    fn facing_pair() -> Vec<Character> {
        let terrain = FlatTerrain(0.0);
        let mut a = Character::new(Vec2::new(0.0, 0.0), &terrain);
        let mut b = Character::new(Vec2::new(0.0, 0.5), &terrain);
        a.yaw = 0.0; // facing +z, toward b
        b.yaw = std::f32::consts::PI; // facing -z, toward a
        vec![a, b]
    }

    #[test]
    fn test_starts_when_all_preconditions_hold() {
        let mut seq = KissSequencer::new();
        let mut pair = facing_pair();
        assert!(seq.try_start(&mut pair, &KissConfig::default()));
        assert_eq!(pair[0].mode, CharacterMode::Kissing);
        assert_eq!(pair[1].mode, CharacterMode::Kissing);
    }

    #[test]
    fn test_each_precondition_blocks_independently() {
        let cfg = KissConfig::default();

        // Too far apart.
        let mut pair = facing_pair();
        pair[1].position.z = 2.0;
        assert!(!KissSequencer::new().try_start(&mut pair, &cfg));

        // Not facing.
        let mut pair = facing_pair();
        pair[1].yaw = 0.0;
        assert!(!KissSequencer::new().try_start(&mut pair, &cfg));

        // Cooldown running.
        let mut pair = facing_pair();
        let mut seq = KissSequencer::new();
        seq.cooldown = 1.0;
        assert!(!seq.try_start(&mut pair, &cfg));

        // One party seated.
        let mut pair = facing_pair();
        pair[0].mode = CharacterMode::Seated {
            from: pair[0].position,
            elapsed: 0.0,
        };
        assert!(!KissSequencer::new().try_start(&mut pair, &cfg));
    }

    #[test]
    fn test_full_sequence_returns_to_free_with_cooldown() {
        let cfg = KissConfig::default();
        let mut seq = KissSequencer::new();
        let mut pair = facing_pair();
        assert!(seq.try_start(&mut pair, &cfg));

        let dt = 1.0 / 60.0;
        let steps = (cfg.duration / dt).ceil() as usize + 2;
        for _ in 0..steps {
            seq.update(&mut pair, &cfg, dt);
        }
        assert!(!seq.is_active());
        assert_eq!(pair[0].mode, CharacterMode::Free);
        assert_eq!(pair[1].mode, CharacterMode::Free);
        assert!(seq.cooldown_remaining() > 0.0);
        assert_eq!(pair[0].pose.arm_hug, 0.0);
    }

    #[test]
    fn test_blend_rises_holds_falls() {
        let cfg = KissConfig::default();
        assert_eq!(blend_factor(0.0, &cfg), 0.0);
        assert_eq!(blend_factor((cfg.ease_in_end + cfg.hold_end) * 0.5, &cfg), 1.0);
        assert_eq!(blend_factor(1.0, &cfg), 0.0);
        let mid_rise = blend_factor(cfg.ease_in_end * 0.5, &cfg);
        assert!(mid_rise > 0.0 && mid_rise < 1.0);
    }

    #[test]
    fn test_pair_converges_during_hold() {
        let cfg = KissConfig::default();
        let mut seq = KissSequencer::new();
        let mut pair = facing_pair();
        assert!(seq.try_start(&mut pair, &cfg));

        let dt = 1.0 / 60.0;
        let hold_mid = cfg.duration * (cfg.ease_in_end + cfg.hold_end) * 0.5;
        let steps = (hold_mid / dt) as usize;
        for _ in 0..steps {
            seq.update(&mut pair, &cfg, dt);
        }
        let dist = pair[0].position.distance(pair[1].position);
        assert!((dist - cfg.pair_separation).abs() < 0.02);
    }

    #[test]
    fn test_marker_derived_from_timer() {
        let cfg = KissConfig::default();
        let mut seq = KissSequencer::new();
        let mut pair = facing_pair();
        assert!(seq.marker(&pair, &cfg).is_none());
        assert!(seq.try_start(&mut pair, &cfg));

        seq.update(&mut pair, &cfg, 0.05);
        let early = seq.marker(&pair, &cfg).unwrap();
        seq.update(&mut pair, &cfg, cfg.duration * 0.5);
        let late = seq.marker(&pair, &cfg).unwrap();
        assert!(late.position.y > early.position.y);
        assert!(early.scale < 1.0);
        assert_eq!(late.scale, 1.0);
    }
}
