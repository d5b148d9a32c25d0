//! Interactive core of a shore-picnic vignette.
//!
//! Everything here is deterministic per-frame state: a pair of avatars
//! walking a shore terrain, physics-driven picnic props they can pick up,
//! throw, and open, and the story sequencers layered on top (sitting,
//! the kiss choreography, a quiz sign that unlocks an expansion area).
//! Rendering, audio, and raw input handling live in the host; the host
//! feeds [`input::InputFrame`]s into a [`session::PicnicSession`] and
//! reads its presentation queries after each update.

pub mod blanket;
pub mod character;
pub mod config;
pub mod effects;
pub mod input;
pub mod math;
pub mod props;
pub mod sequence;
pub mod session;
pub mod swans;
pub mod terrain;
pub mod world;

pub use character::{Character, CharacterMode, LimbPose};
pub use config::{ConfigError, PicnicConfig};
pub use input::{Command, InputFrame, MoveKeys, PlayerId};
pub use props::{Hand, Prop, PropId, PropKind, PropSystem};
pub use session::{PicnicSession, PropTransform};
pub use world::WorldBounds;
