//! Character Locomotion & Pose State
//!
//! Per-character position/yaw update from camera-relative input, the
//! cosmetic limb-swing pose, and the mutually exclusive higher-priority
//! modes (seated, kissing) that override free movement.

use glam::{Vec2, Vec3};

use crate::config::{LocomotionConfig, SeatConfig};
use crate::input::MoveKeys;
use crate::math::{angle_delta, damp_alpha, lerp, smoothstep01};
use crate::props::{Hand, PropId};
use crate::terrain::Terrain;
use crate::world::WorldBounds;

/// Local hand-anchor offset from the character origin (right hand;
/// left mirrors x).
const HAND_OFFSET: Vec3 = Vec3::new(0.21, 0.18, 0.16);

/// Exclusive movement mode. Free is the initial and default state;
/// Seated and Kissing override locomotion entirely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CharacterMode {
    Free,
    Seated {
        /// Position when the sit started, blended toward the seat anchor.
        from: Vec3,
        /// Seconds since the sit started.
        elapsed: f32,
    },
    Kissing,
}

/// Cosmetic limb rotations layered over the rest pose. Explicit typed
/// fields; presentation applies them relative to each limb's rest pose.
#[derive(Debug, Clone, Copy, Default)]
pub struct LimbPose {
    /// Walking arm swing (radians, right arm; left is negated).
    pub arm_swing: f32,
    /// Walking leg swing (radians, opposite phase to the arms).
    pub leg_swing: f32,
    /// Kiss hug angle, both arms forward.
    pub arm_hug: f32,
    /// Kiss head tilt.
    pub head_tilt: f32,
    /// 0 = standing, 1 = fully folded into the sitting pose.
    pub seat_fold: f32,
    /// Arms extended to carry a held prop, per hand.
    pub hold_extend: [bool; 2],
}

/// One controllable avatar.
#[derive(Debug, Clone)]
pub struct Character {
    pub position: Vec3,
    /// Facing yaw in radians; forward is (sin yaw, 0, cos yaw).
    pub yaw: f32,
    pub mode: CharacterMode,
    /// Held props, indexed right = 0, left = 1.
    pub hands: [Option<PropId>; 2],
    pub pose: LimbPose,
    /// Smoothed 0..1 walk intensity driving the limb swing.
    swing_level: f32,
}

impl Character {
    pub fn new(spawn: Vec2, terrain: &dyn Terrain) -> Self {
        Self {
            position: Vec3::new(spawn.x, terrain.height_at(spawn.x, spawn.y), spawn.y),
            yaw: 0.0,
            mode: CharacterMode::Free,
            hands: [None, None],
            pose: LimbPose::default(),
            swing_level: 0.0,
        }
    }

    /// Horizontal forward vector for the current yaw.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }

    /// World position of a hand anchor.
    pub fn hand_anchor(&self, hand: Hand) -> Vec3 {
        let local = match hand {
            Hand::Right => HAND_OFFSET,
            Hand::Left => Vec3::new(-HAND_OFFSET.x, HAND_OFFSET.y, HAND_OFFSET.z),
        };
        let (sin, cos) = self.yaw.sin_cos();
        self.position
            + Vec3::new(
                local.x * cos + local.z * sin,
                local.y,
                -local.x * sin + local.z * cos,
            )
    }

    /// First free hand, right preferred.
    pub fn free_hand(&self) -> Option<Hand> {
        if self.hands[0].is_none() {
            Some(Hand::Right)
        } else if self.hands[1].is_none() {
            Some(Hand::Left)
        } else {
            None
        }
    }

    /// First occupied hand, right preferred.
    pub fn occupied_hand(&self) -> Option<(Hand, PropId)> {
        if let Some(id) = self.hands[0] {
            Some((Hand::Right, id))
        } else {
            self.hands[1].map(|id| (Hand::Left, id))
        }
    }

    pub fn hand_slot(&self, hand: Hand) -> Option<PropId> {
        match hand {
            Hand::Right => self.hands[0],
            Hand::Left => self.hands[1],
        }
    }

    pub fn set_hand_slot(&mut self, hand: Hand, prop: Option<PropId>) {
        match hand {
            Hand::Right => self.hands[0] = prop,
            Hand::Left => self.hands[1] = prop,
        }
    }

    pub fn is_seated(&self) -> bool {
        matches!(self.mode, CharacterMode::Seated { .. })
    }

    /// Free-mode movement from held keys, camera-relative.
    ///
    /// Input maps onto the camera's horizontal forward/right basis so
    /// controls are screen-relative. Position is bounds-clamped and
    /// ground-snapped; yaw eases toward the heading and holds when idle.
    pub fn update_locomotion(
        &mut self,
        keys: &MoveKeys,
        camera_yaw: f32,
        terrain: &dyn Terrain,
        bounds: &WorldBounds,
        cfg: &LocomotionConfig,
        dt: f32,
        time: f32,
    ) {
        let moving = if self.mode == CharacterMode::Free {
            let dir = keys.direction();
            if dir != Vec2::ZERO {
                let (sin, cos) = camera_yaw.sin_cos();
                let cam_forward = Vec3::new(sin, 0.0, cos);
                let cam_right = Vec3::new(cos, 0.0, -sin);
                let world_dir = (cam_forward * dir.y + cam_right * dir.x).normalize();

                self.position += world_dir * cfg.walk_speed * dt;
                self.position = bounds.clamp_xz(self.position);
                self.position.y = terrain.height_at(self.position.x, self.position.z);

                let desired_yaw = world_dir.x.atan2(world_dir.z);
                self.yaw += angle_delta(self.yaw, desired_yaw) * damp_alpha(cfg.turn_rate, dt);
                true
            } else {
                false
            }
        } else {
            false
        };

        // Limb swing oscillates with wall-clock time while moving and
        // decays when idle.
        let target = if moving { 1.0 } else { 0.0 };
        self.swing_level += (target - self.swing_level) * damp_alpha(cfg.swing_decay, dt);
        let swing = (time * cfg.swing_frequency).sin() * cfg.swing_amplitude * self.swing_level;
        self.pose.arm_swing = swing;
        self.pose.leg_swing = -swing;
    }

    /// Toggle the seat. Entering requires being within the seat radius;
    /// out of range is a no-op. Exit is immediate. Returns true if the
    /// mode changed.
    pub fn try_toggle_sit(&mut self, seat: &SeatConfig) -> bool {
        match self.mode {
            CharacterMode::Free => {
                let d = Vec2::new(
                    self.position.x - seat.anchor.x,
                    self.position.z - seat.anchor.z,
                );
                if d.length() <= seat.sit_radius {
                    self.mode = CharacterMode::Seated {
                        from: self.position,
                        elapsed: 0.0,
                    };
                    true
                } else {
                    false
                }
            }
            CharacterMode::Seated { .. } => {
                self.mode = CharacterMode::Free;
                self.pose.seat_fold = 0.0;
                true
            }
            CharacterMode::Kissing => false,
        }
    }

    /// Drive the seated blend: eased slide onto the anchor, turn toward
    /// the water, fold the limbs into the sitting pose.
    pub fn update_seated(
        &mut self,
        seat: &SeatConfig,
        terrain: &dyn Terrain,
        cfg: &LocomotionConfig,
        dt: f32,
    ) {
        let CharacterMode::Seated { from, elapsed } = self.mode else {
            return;
        };
        let elapsed = elapsed + dt;
        let t = smoothstep01(elapsed / seat.blend_duration);

        let anchor_y = terrain.height_at(seat.anchor.x, seat.anchor.z);
        let target = Vec3::new(seat.anchor.x, anchor_y, seat.anchor.z);
        self.position = Vec3::new(
            lerp(from.x, target.x, t),
            lerp(from.y, target.y, t),
            lerp(from.z, target.z, t),
        );

        let face = Vec2::new(
            seat.face_target.x - self.position.x,
            seat.face_target.y - self.position.z,
        );
        if face != Vec2::ZERO {
            let desired_yaw = face.x.atan2(face.y);
            self.yaw += angle_delta(self.yaw, desired_yaw) * damp_alpha(cfg.turn_rate, dt);
        }

        self.pose.seat_fold = t;
        self.mode = CharacterMode::Seated { from, elapsed };
    }
}
