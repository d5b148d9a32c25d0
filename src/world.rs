//! World Bounds
//!
//! Axis-aligned playable rectangle constraining character and prop
//! horizontal movement. Mutated exactly once, when the quiz completion
//! unlocks the expansion area; bounds only ever grow.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Horizontal playable rectangle on the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl WorldBounds {
    pub fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    /// Whether a point's horizontal components lie inside the rectangle.
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.z >= self.min_z && p.z <= self.max_z
    }

    /// Clamp the horizontal components of a position to the rectangle.
    pub fn clamp_xz(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            p.x.clamp(self.min_x, self.max_x),
            p.y,
            p.z.clamp(self.min_z, self.max_z),
        )
    }

    /// Grow to the component-wise union with `other`.
    ///
    /// The union construction guarantees the playable area is monotonic:
    /// no call can ever shrink an axis.
    pub fn expand_to(&mut self, other: &WorldBounds) {
        self.min_x = self.min_x.min(other.min_x);
        self.max_x = self.max_x.max(other.max_x);
        self.min_z = self.min_z.min(other.min_z);
        self.max_z = self.max_z.max(other.max_z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_inside_is_identity() {
        let bounds = WorldBounds::new(-4.4, 4.4, -1.4, 3.6);
        let p = Vec3::new(1.0, 0.3, 2.0);
        assert_eq!(bounds.clamp_xz(p), p);
    }

    #[test]
    fn test_clamp_outside() {
        let bounds = WorldBounds::new(-4.4, 4.4, -1.4, 3.6);
        let p = bounds.clamp_xz(Vec3::new(-10.0, 0.5, 9.0));
        assert_eq!(p, Vec3::new(-4.4, 0.5, 3.6));
    }

    #[test]
    fn test_expand_only_grows() {
        let mut bounds = WorldBounds::new(-4.4, 4.4, -1.4, 3.6);
        let before = bounds;

        // A rectangle fully inside the current one changes nothing.
        bounds.expand_to(&WorldBounds::new(-1.0, 1.0, 0.0, 1.0));
        assert_eq!(bounds, before);

        // A wider rectangle grows each affected axis.
        bounds.expand_to(&WorldBounds::new(-8.0, 4.4, -1.4, 6.0));
        assert_eq!(bounds.min_x, -8.0);
        assert_eq!(bounds.max_z, 6.0);
        assert_eq!(bounds.max_x, before.max_x);
        assert!(bounds.min_x <= before.min_x);
    }
}
