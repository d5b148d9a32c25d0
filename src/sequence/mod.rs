//! Interaction Sequencers
//!
//! Small explicit state machines layered above base locomotion: the kiss
//! choreography, the quiz sign gating the area unlock, and the one-shot
//! reveal transition the unlock plays.

mod kiss;
mod quiz;
mod reveal;

pub use kiss::{KissMarker, KissSequencer};
pub use quiz::{QuizSequencer, QuizState, QuizView};
pub use reveal::Reveal;
