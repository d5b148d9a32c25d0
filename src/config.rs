//! Vignette Configuration
//!
//! Centralized tuning parameters for the whole vignette. The thresholds and
//! timings here are tuned "feel" constants with no deeper derivation, so
//! they are kept as data: `Default` carries the shipped values and
//! [`PicnicConfig::load`] overrides them from a JSON file.

use std::fmt;
use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::world::WorldBounds;

/// Prop physics and hand-interaction tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Downward acceleration applied to free props (m/s²).
    pub gravity: f32,
    /// Velocity kept (and reflected) when a prop hits a world wall.
    pub wall_restitution: f32,
    /// Vertical velocity kept on a ground bounce.
    pub ground_bounce: f32,
    /// Horizontal velocity multiplier applied on ground contact.
    pub ground_friction: f32,
    /// Per-frame angular velocity multiplier.
    pub angular_damping: f32,
    /// Planar impulse when a character shoves a prop aside.
    pub knockback_impulse: f32,
    /// Upward kick added with the knockback impulse.
    pub knockback_up_kick: f32,
    /// Seconds before the same prop can be knocked again.
    pub knockback_cooldown: f32,
    /// Magnitude of the randomized tumble after a knock.
    pub knockback_spin: f32,
    /// Extra reach beyond touching distance for the pickup query.
    pub pickup_margin: f32,
    /// Forward offset of the drop point from the character.
    pub drop_forward: f32,
    /// Sideways offset of the drop point, sign per hand.
    pub drop_side: f32,
    /// Launch speed of a dropped prop (forward and up).
    pub drop_speed: f32,
    /// Magnitude of the randomized tumble on drop.
    pub drop_spin: f32,
    /// Seconds a dropped prop ignores knockback.
    pub drop_cooldown: f32,
    /// Small lift keeping resting props out of z-fighting with the ground.
    pub ground_epsilon: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 3.2,
            wall_restitution: 0.3,
            ground_bounce: 0.2,
            ground_friction: 0.85,
            angular_damping: 0.92,
            knockback_impulse: 0.9,
            knockback_up_kick: 0.6,
            knockback_cooldown: 0.35,
            knockback_spin: 3.2,
            pickup_margin: 0.2,
            drop_forward: 0.6,
            drop_side: 0.25,
            drop_speed: 0.2,
            drop_spin: 1.2,
            drop_cooldown: 0.5,
            ground_epsilon: 0.02,
        }
    }
}

/// Character movement and cosmetic limb-swing tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocomotionConfig {
    /// Walking speed (m/s).
    pub walk_speed: f32,
    /// Exponential turn rate toward the movement heading.
    pub turn_rate: f32,
    /// Collision radius used for prop knockback and pickup range.
    pub character_radius: f32,
    /// Limb swing frequency while walking (rad/s of wall-clock time).
    pub swing_frequency: f32,
    /// Peak limb swing angle (radians).
    pub swing_amplitude: f32,
    /// Exponential decay rate of the swing when idle.
    pub swing_decay: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: 1.1,
            turn_rate: 12.0,
            character_radius: 0.22,
            swing_frequency: 7.0,
            swing_amplitude: 0.55,
            swing_decay: 8.0,
        }
    }
}

/// One character's seat on the blanket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatConfig {
    /// World-space seat anchor.
    pub anchor: Vec3,
    /// How close the character must be for the sit command to take.
    pub sit_radius: f32,
    /// Duration of the eased slide onto the seat (seconds).
    pub blend_duration: f32,
    /// World point a seated character turns to face (the water's center).
    pub face_target: Vec2,
}

impl SeatConfig {
    fn at(anchor: Vec3) -> Self {
        Self {
            anchor,
            sit_radius: 0.7,
            blend_duration: 0.4,
            face_target: Vec2::new(0.0, -6.0),
        }
    }
}

/// Kiss sequence gating and choreography tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KissConfig {
    /// Maximum planar distance between the pair.
    pub distance_threshold: f32,
    /// Minimum forward-vector dot toward the partner, for both.
    pub facing_dot: f32,
    /// Total sequence duration (seconds).
    pub duration: f32,
    /// Fraction of the duration spent easing in.
    pub ease_in_end: f32,
    /// Fraction of the duration where the hold phase ends.
    pub hold_end: f32,
    /// Final separation between the pair along their connecting axis.
    pub pair_separation: f32,
    /// Seconds before the sequence can re-trigger.
    pub cooldown: f32,
    /// Peak head tilt (radians).
    pub head_tilt: f32,
    /// Peak arm hug angle (radians).
    pub arm_hug: f32,
    /// How far the heart marker rises over the sequence.
    pub marker_rise: f32,
}

impl Default for KissConfig {
    fn default() -> Self {
        Self {
            distance_threshold: 0.6,
            facing_dot: 0.6,
            duration: 1.6,
            ease_in_end: 0.25,
            hold_end: 0.62,
            pair_separation: 0.32,
            cooldown: 2.0,
            head_tilt: 0.22,
            arm_hug: 0.6,
            marker_rise: 0.35,
        }
    }
}

/// One quiz question: prompt, fixed answer options, index of the right one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct: u8,
}

/// Quiz sign placement, pacing, and question content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// World position of the sign.
    pub sign_position: Vec3,
    /// Radius a character must stay within to keep the quiz active.
    pub trigger_radius: f32,
    /// Question text reveal rate (characters per second).
    pub typing_speed: f32,
    /// Delay after a correct answer before advancing (seconds).
    pub advance_delay: f32,
    /// Duration of the wrong-answer shake (seconds).
    pub shake_duration: f32,
    /// The questions, asked in order.
    pub questions: Vec<QuizQuestion>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            sign_position: Vec3::new(3.6, 0.0, 2.8),
            trigger_radius: 1.2,
            typing_speed: 24.0,
            advance_delay: 0.8,
            shake_duration: 0.5,
            questions: vec![
                QuizQuestion {
                    prompt: "Where did we watch the swans for the first time?".into(),
                    options: vec![
                        "The city fountain".into(),
                        "The lake by the pines".into(),
                        "The river bridge".into(),
                    ],
                    correct: 1,
                },
                QuizQuestion {
                    prompt: "What did I spill on the blanket that day?".into(),
                    options: vec![
                        "The red soda".into(),
                        "The lemonade".into(),
                        "Nothing, you caught it".into(),
                    ],
                    correct: 0,
                },
                QuizQuestion {
                    prompt: "And what comes after the forest path?".into(),
                    options: vec![
                        "The long way home".into(),
                        "A new clearing, together".into(),
                        "More questions".into(),
                    ],
                    correct: 1,
                },
            ],
        }
    }
}

/// Blanket press-field tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlanketConfig {
    /// Blanket center on the ground.
    pub center: Vec3,
    /// Blanket extent (width, depth).
    pub size: Vec2,
    /// Vertex grid resolution (columns, rows).
    pub segments: (usize, usize),
    /// Radius around a character that dents the cloth.
    pub press_radius: f32,
    /// Peak dent depth.
    pub press_strength: f32,
    /// Exponential relaxation rate of the dent field.
    pub press_stiffness: f32,
    /// Deepest permanent sag allowed.
    pub min_down: f32,
    /// How far the cloth sits above the ground.
    pub lift: f32,
}

impl Default for BlanketConfig {
    fn default() -> Self {
        Self {
            center: Vec3::new(1.2, 0.0, 0.3),
            size: Vec2::new(1.8, 1.2),
            segments: (16, 12),
            press_radius: 0.55,
            press_strength: 0.08,
            press_stiffness: 12.0,
            min_down: -0.008,
            lift: 0.01,
        }
    }
}

/// Expansion-area unlock and reveal tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Bounds the world grows to when the quiz completes.
    pub expansion_bounds: WorldBounds,
    /// Fade/scale-in duration (seconds).
    pub duration: f32,
    /// Starting scale of the expansion geometry.
    pub start_scale: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            expansion_bounds: WorldBounds::new(-8.6, 4.4, -1.4, 7.2),
            duration: 2.4,
            start_scale: 0.92,
        }
    }
}

/// Full vignette configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PicnicConfig {
    /// Initial playable rectangle.
    pub bounds: WorldBounds,
    pub physics: PhysicsConfig,
    pub locomotion: LocomotionConfig,
    /// Seats for player one and player two.
    pub seats: [SeatConfig; 2],
    pub kiss: KissConfig,
    pub quiz: QuizConfig,
    pub blanket: BlanketConfig,
    pub reveal: RevealConfig,
    /// Spawn positions for the heart and the two cans.
    pub heart_spawn: Vec2,
    pub red_can_spawn: Vec2,
    pub gray_can_spawn: Vec2,
    /// Starting positions of the characters.
    pub spawn_one: Vec2,
    pub spawn_two: Vec2,
    /// Whether player two exists this session.
    pub two_players: bool,
}

impl Default for PicnicConfig {
    fn default() -> Self {
        let picnic_z = 0.0;
        Self {
            bounds: WorldBounds::new(-4.4, 4.4, -1.4, 3.6),
            physics: PhysicsConfig::default(),
            locomotion: LocomotionConfig::default(),
            seats: [
                SeatConfig::at(Vec3::new(0.9, 0.0, picnic_z + 0.5)),
                SeatConfig::at(Vec3::new(1.5, 0.0, picnic_z + 0.5)),
            ],
            kiss: KissConfig::default(),
            quiz: QuizConfig::default(),
            blanket: BlanketConfig::default(),
            reveal: RevealConfig::default(),
            heart_spawn: Vec2::new(-0.6, picnic_z + 0.05),
            red_can_spawn: Vec2::new(0.5, picnic_z - 0.15),
            gray_can_spawn: Vec2::new(0.15, picnic_z - 0.35),
            spawn_one: Vec2::new(0.0, picnic_z + 0.9),
            spawn_two: Vec2::new(0.6, picnic_z + 1.1),
            two_players: true,
        }
    }
}

impl PicnicConfig {
    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: PicnicConfig = serde_json::from_str(&text)?;
        Ok(config)
    }
}

/// Errors that can occur while loading a config file.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {e}"),
            ConfigError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}
