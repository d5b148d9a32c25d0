//! Logical Input Interface
//!
//! The core never sees device events. The host latches held movement keys
//! and edge-triggered commands into an [`InputFrame`] once per frame,
//! before the session update runs.

use glam::Vec2;

/// Identifies one of the two controllable characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// Index into per-character arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

/// Held movement key state for one character.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveKeys {
    /// Movement intent as a normalized (right, forward) vector.
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.forward {
            dir.y += 1.0;
        }
        if self.backward {
            dir.y -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if dir != Vec2::ZERO { dir.normalize() } else { dir }
    }

    /// Whether any movement key is held.
    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// Discrete, edge-triggered command delivered exactly once.
///
/// Commands with no eligible target are silent no-ops in the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pick up the character's current hint target, right hand preferred.
    PickUp(PlayerId),
    /// Drop a held prop, right hand first.
    Drop(PlayerId),
    /// Open a held can (one-way).
    OpenCan(PlayerId),
    /// Sit down on / stand up from the character's seat.
    ToggleSit(PlayerId),
    /// Start the kiss sequence if both characters are eligible.
    Kiss,
    /// Highlight a quiz answer option.
    QuizSelect(u8),
    /// Confirm the highlighted quiz answer.
    QuizConfirm,
}

/// Everything the core reads from the host for one frame.
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    /// Held movement keys, indexed by [`PlayerId::index`].
    pub moves: [MoveKeys; 2],
    /// Commands that fired since the previous frame, in order.
    pub commands: Vec<Command>,
}

impl InputFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience for scripted drivers and tests.
    pub fn with_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_normalized() {
        let keys = MoveKeys {
            forward: true,
            right: true,
            ..Default::default()
        };
        let dir = keys.direction();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.x > 0.0 && dir.y > 0.0);
    }

    #[test]
    fn test_opposed_keys_cancel() {
        let keys = MoveKeys {
            forward: true,
            backward: true,
            ..Default::default()
        };
        assert_eq!(keys.direction(), Vec2::ZERO);
        assert!(keys.any());
    }

    #[test]
    fn test_player_index() {
        assert_eq!(PlayerId::One.index(), 0);
        assert_eq!(PlayerId::Two.index(), 1);
    }
}
