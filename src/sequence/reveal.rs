//! Reveal Transition
//!
//! One-shot eased fade/scale-in of the expansion area, played once when
//! the quiz completes. After the timer finishes the materials are pinned
//! fully opaque and blending is switched off for good.

use crate::config::RevealConfig;
use crate::math::{lerp, smoothstep01};

#[derive(Debug, Clone, Copy, PartialEq)]
enum RevealState {
    Hidden,
    Fading { elapsed: f32 },
    Done,
}

#[derive(Debug)]
pub struct Reveal {
    state: RevealState,
}

impl Reveal {
    pub fn new() -> Self {
        Self {
            state: RevealState::Hidden,
        }
    }

    /// Begin the fade. Ignored if already running or finished.
    pub fn start(&mut self) {
        if self.state == RevealState::Hidden {
            self.state = RevealState::Fading { elapsed: 0.0 };
        }
    }

    pub fn update(&mut self, cfg: &RevealConfig, dt: f32) {
        if let RevealState::Fading { elapsed } = self.state {
            let elapsed = elapsed + dt;
            self.state = if elapsed >= cfg.duration {
                RevealState::Done
            } else {
                RevealState::Fading { elapsed }
            };
        }
    }

    pub fn is_started(&self) -> bool {
        self.state != RevealState::Hidden
    }

    /// Eased 0..1 transition progress.
    pub fn progress(&self, cfg: &RevealConfig) -> f32 {
        match self.state {
            RevealState::Hidden => 0.0,
            RevealState::Fading { elapsed } => smoothstep01(elapsed / cfg.duration),
            RevealState::Done => 1.0,
        }
    }

    /// Expansion-geometry opacity.
    pub fn opacity(&self, cfg: &RevealConfig) -> f32 {
        self.progress(cfg)
    }

    /// Expansion-geometry scale, growing from the configured start scale.
    pub fn scale(&self, cfg: &RevealConfig) -> f32 {
        lerp(cfg.start_scale, 1.0, self.progress(cfg))
    }

    /// Once true, presentation can drop transparency on the expansion
    /// materials permanently.
    pub fn blending_done(&self) -> bool {
        self.state == RevealState::Done
    }
}

impl Default for Reveal {
    fn default() -> Self {
        Self::new()
    }
}
