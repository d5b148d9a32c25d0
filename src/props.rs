//! Prop Physics & Interaction Engine
//!
//! Owns the pickable picnic props (the heart and the two soda cans) and
//! their full lifecycle: free-body integration against terrain and world
//! bounds, character knockback, and the held-in-hand state driven by
//! pickup / drop / open commands.
//!
//! A prop is either **free** (simulated here every frame) or **held**
//! (simulation suspended, transform owned by a character hand anchor) —
//! never both. Props are created once at session setup and never destroyed.

use glam::Vec3;

use crate::config::PhysicsConfig;
use crate::input::PlayerId;
use crate::math::{hash_scatter, scatter_vec3};
use crate::world::WorldBounds;

/// A character's prop-holding attachment point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Right,
    Left,
}

impl Hand {
    /// Sign of the sideways drop offset for this hand.
    #[inline]
    pub fn side_sign(self) -> f32 {
        match self {
            Hand::Right => 1.0,
            Hand::Left => -1.0,
        }
    }
}

/// What kind of prop this is. Only cans can be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
    Heart,
    Can,
}

/// Stable handle into the prop list. Props are never removed, so an id
/// stays valid for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropId(pub usize);

/// A pickable, physically simulated world object.
#[derive(Debug, Clone)]
pub struct Prop {
    pub kind: PropKind,
    /// UI label shown by the pickup hint.
    pub label: &'static str,
    /// Photo album unlocked by carrying this prop (hearts only).
    pub gift_album_id: Option<&'static str>,
    /// World position of the prop's center. Stale while held.
    pub position: Vec3,
    /// Euler rotation. While held this is the fixed in-hand pose.
    pub rotation: Vec3,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    /// Planar collision radius.
    pub radius: f32,
    /// Center-to-rest-surface distance.
    pub half_height: f32,
    /// Seconds until knockback may trigger again.
    pub cooldown: f32,
    /// Which hand holds this prop, if any.
    pub held_by: Option<(PlayerId, Hand)>,
    /// One-way opened flag (cans only).
    pub opened: bool,
}

impl Prop {
    /// Whether the free-body integrator should touch this prop.
    #[inline]
    pub fn is_free(&self) -> bool {
        self.held_by.is_none()
    }

    /// The fixed local pose a prop takes when parented to a hand.
    ///
    /// Cans keep their label turned outward; hearts lie flat against
    /// the palm. Attach semantics are idempotent: every pickup resets
    /// to exactly this pose.
    pub fn held_pose(&self) -> Vec3 {
        match self.kind {
            PropKind::Can => Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
            PropKind::Heart => Vec3::new(std::f32::consts::FRAC_PI_2, 0.0, 0.0),
        }
    }
}

/// Blueprint for one prop at session setup.
pub struct PropSpec {
    pub kind: PropKind,
    pub label: &'static str,
    pub gift_album_id: Option<&'static str>,
    pub spawn_x: f32,
    pub spawn_z: f32,
    pub radius: f32,
    pub half_height: f32,
}

/// Manages every prop in the scene.
pub struct PropSystem {
    props: Vec<Prop>,
    config: PhysicsConfig,
    /// Seed stream for deterministic scatter (knock spins, drop tumbles).
    scatter_seed: f32,
}

impl PropSystem {
    /// Create the prop set, resting each prop on the surface at its spawn.
    pub fn new(
        config: PhysicsConfig,
        specs: Vec<PropSpec>,
        surface: &dyn Fn(f32, f32) -> f32,
    ) -> Self {
        let ground_epsilon = config.ground_epsilon;
        let props = specs
            .into_iter()
            .map(|spec| {
                let y = surface(spec.spawn_x, spec.spawn_z) + spec.half_height + ground_epsilon;
                Prop {
                    kind: spec.kind,
                    label: spec.label,
                    gift_album_id: spec.gift_album_id,
                    position: Vec3::new(spec.spawn_x, y, spec.spawn_z),
                    rotation: Vec3::ZERO,
                    velocity: Vec3::ZERO,
                    angular_velocity: Vec3::ZERO,
                    radius: spec.radius,
                    half_height: spec.half_height,
                    cooldown: 0.0,
                    held_by: None,
                    opened: false,
                }
            })
            .collect();

        Self {
            props,
            config,
            scatter_seed: 0.0,
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn get(&self, id: PropId) -> &Prop {
        &self.props[id.0]
    }

    pub fn get_mut(&mut self, id: PropId) -> &mut Prop {
        &mut self.props[id.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PropId, &Prop)> {
        self.props.iter().enumerate().map(|(i, p)| (PropId(i), p))
    }

    /// Next value from the deterministic scatter stream.
    fn next_seed(&mut self) -> f32 {
        self.scatter_seed += 1.0;
        self.scatter_seed
    }

    /// Integrate every free prop and resolve collisions.
    ///
    /// Runs a fixed order per prop: cooldown tick, gravity +
    /// position step, wall clamp with reflected velocity, floor snap with
    /// bounce and friction, character knockback, angular damping.
    /// Character positions must already be final for this frame.
    pub fn update(
        &mut self,
        dt: f32,
        bounds: &WorldBounds,
        surface: &dyn Fn(f32, f32) -> f32,
        characters: &[Vec3],
        character_radius: f32,
    ) {
        let cfg = self.config.clone();
        let mut seed = self.scatter_seed;

        for prop in &mut self.props {
            if !prop.is_free() {
                continue;
            }
            if prop.cooldown > 0.0 {
                prop.cooldown = (prop.cooldown - dt).max(0.0);
            }

            prop.velocity.y -= cfg.gravity * dt;
            prop.position += prop.velocity * dt;

            // Inelastic wall bounce: clamp and reflect the offending axis.
            if prop.position.x < bounds.min_x {
                prop.position.x = bounds.min_x;
                prop.velocity.x *= -cfg.wall_restitution;
            } else if prop.position.x > bounds.max_x {
                prop.position.x = bounds.max_x;
                prop.velocity.x *= -cfg.wall_restitution;
            }
            if prop.position.z < bounds.min_z {
                prop.position.z = bounds.min_z;
                prop.velocity.z *= -cfg.wall_restitution;
            } else if prop.position.z > bounds.max_z {
                prop.position.z = bounds.max_z;
                prop.velocity.z *= -cfg.wall_restitution;
            }

            let floor_y = surface(prop.position.x, prop.position.z) + prop.half_height;
            if prop.position.y < floor_y {
                prop.position.y = floor_y;
                if prop.velocity.y < 0.0 {
                    prop.velocity.y *= -cfg.ground_bounce;
                }
                prop.velocity.x *= cfg.ground_friction;
                prop.velocity.z *= cfg.ground_friction;
            }

            for &char_pos in characters {
                Self::apply_knockback(prop, char_pos, character_radius, &cfg, &mut seed);
            }

            prop.angular_velocity *= cfg.angular_damping;
            prop.rotation += prop.angular_velocity * dt;
        }

        self.scatter_seed = seed;
    }

    /// Shove a prop away from a character standing inside it.
    fn apply_knockback(
        prop: &mut Prop,
        char_pos: Vec3,
        character_radius: f32,
        cfg: &PhysicsConfig,
        seed: &mut f32,
    ) {
        let dx = prop.position.x - char_pos.x;
        let dz = prop.position.z - char_pos.z;
        let dist = (dx * dx + dz * dz).sqrt();
        if dist >= character_radius + prop.radius || prop.cooldown > 0.0 {
            return;
        }

        *seed += 1.0;
        let (dir_x, dir_z) = if dist < 1e-4 {
            // Standing exactly on the prop: pick an arbitrary direction.
            let angle = (hash_scatter(*seed) + 0.5) * std::f32::consts::TAU;
            (angle.cos(), angle.sin())
        } else {
            (dx / dist, dz / dist)
        };

        prop.velocity.x += dir_x * cfg.knockback_impulse;
        prop.velocity.z += dir_z * cfg.knockback_impulse;
        prop.velocity.y += cfg.knockback_up_kick;
        prop.angular_velocity = scatter_vec3(*seed + 5.13, cfg.knockback_spin);
        prop.cooldown = cfg.knockback_cooldown;
    }

    /// Nearest free prop within pickup range of a character, if any.
    ///
    /// Ties resolve to the first prop encountered; exact ties are
    /// arbitrary by design.
    pub fn nearest_candidate(&self, char_pos: Vec3, character_radius: f32) -> Option<PropId> {
        let mut nearest = None;
        let mut nearest_dist = f32::INFINITY;
        for (i, prop) in self.props.iter().enumerate() {
            if !prop.is_free() {
                continue;
            }
            let dx = prop.position.x - char_pos.x;
            let dz = prop.position.z - char_pos.z;
            let dist = (dx * dx + dz * dz).sqrt();
            let range = character_radius + prop.radius + self.config.pickup_margin;
            if dist < range && dist < nearest_dist {
                nearest_dist = dist;
                nearest = Some(PropId(i));
            }
        }
        nearest
    }

    /// Suspend simulation and parent the prop to a hand.
    ///
    /// Returns false (and does nothing) if the prop is already held, so a
    /// prop can never end up in two hands.
    pub fn attach(&mut self, id: PropId, player: PlayerId, hand: Hand) -> bool {
        let prop = &mut self.props[id.0];
        if prop.held_by.is_some() {
            return false;
        }
        prop.held_by = Some((player, hand));
        prop.velocity = Vec3::ZERO;
        prop.angular_velocity = Vec3::ZERO;
        prop.position = Vec3::ZERO;
        prop.rotation = prop.held_pose();
        true
    }

    /// Return a held prop to world space at the drop point.
    ///
    /// The drop point is offset forward and sideways from the character;
    /// the prop leaves with a small forward+up velocity, a randomized
    /// tumble, and a cooldown so it is not instantly knocked back.
    pub fn detach(
        &mut self,
        id: PropId,
        char_pos: Vec3,
        char_forward: Vec3,
        hand: Hand,
        surface: &dyn Fn(f32, f32) -> f32,
    ) {
        if self.props[id.0].held_by.is_none() {
            return;
        }
        let seed = self.next_seed();
        let cfg = self.config.clone();
        let prop = &mut self.props[id.0];

        let right = Vec3::new(char_forward.z, 0.0, -char_forward.x);
        let side = cfg.drop_side * hand.side_sign();
        let drop_x = char_pos.x + char_forward.x * cfg.drop_forward + right.x * side;
        let drop_z = char_pos.z + char_forward.z * cfg.drop_forward + right.z * side;

        prop.held_by = None;
        prop.position = Vec3::new(
            drop_x,
            surface(drop_x, drop_z) + prop.half_height + cfg.ground_epsilon,
            drop_z,
        );
        prop.velocity = Vec3::new(
            char_forward.x * cfg.drop_speed,
            cfg.drop_speed,
            char_forward.z * cfg.drop_speed,
        );
        prop.angular_velocity = scatter_vec3(seed, cfg.drop_spin);
        prop.cooldown = cfg.drop_cooldown;
    }

    /// One-way open of a can. Returns true only on the closed->opened
    /// transition; no-op for hearts and already-open cans.
    pub fn open(&mut self, id: PropId) -> bool {
        let prop = &mut self.props[id.0];
        if prop.kind != PropKind::Can || prop.opened {
            return false;
        }
        prop.opened = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhysicsConfig;

    fn flat_surface() -> impl Fn(f32, f32) -> f32 {
        |_, _| 0.0
    }

    fn test_system() -> PropSystem {
        let surface = flat_surface();
        PropSystem::new(
            PhysicsConfig::default(),
            vec![
                PropSpec {
                    kind: PropKind::Heart,
                    label: "heart",
                    gift_album_id: Some("first_picnic"),
                    spawn_x: -0.6,
                    spawn_z: 0.05,
                    radius: 0.08,
                    half_height: 0.08,
                },
                PropSpec {
                    kind: PropKind::Can,
                    label: "red can",
                    gift_album_id: None,
                    spawn_x: 0.5,
                    spawn_z: -0.15,
                    radius: 0.06,
                    half_height: 0.1,
                },
            ],
            &surface,
        )
    }

    fn wide_bounds() -> WorldBounds {
        WorldBounds::new(-100.0, 100.0, -100.0, 100.0)
    }

    #[test]
    fn test_gravity_step_exact() {
        let mut system = test_system();
        let surface = flat_surface();
        // Lift the prop so it's in free fall with no collisions.
        system.get_mut(PropId(0)).position.y = 10.0;
        let dt = 1.0 / 60.0;
        let gravity = system.config().gravity;

        system.update(dt, &wide_bounds(), &surface, &[], 0.22);

        let vy = system.get(PropId(0)).velocity.y;
        assert!((vy - (-gravity * dt)).abs() < 1e-6);
    }

    #[test]
    fn test_never_below_floor() {
        let mut system = test_system();
        let surface = flat_surface();
        system.get_mut(PropId(0)).velocity = Vec3::new(0.4, -3.0, -0.2);

        for _ in 0..600 {
            system.update(1.0 / 60.0, &wide_bounds(), &surface, &[], 0.22);
            for (_, prop) in system.iter() {
                assert!(prop.position.y >= prop.half_height - 1e-4);
            }
        }
    }

    #[test]
    fn test_wall_bounce_reflects() {
        let mut system = test_system();
        let surface = flat_surface();
        let bounds = WorldBounds::new(-1.0, 1.0, -1.0, 1.0);
        let prop = system.get_mut(PropId(0));
        prop.position = Vec3::new(0.99, 5.0, 0.0);
        prop.velocity = Vec3::new(3.0, 0.0, 0.0);

        system.update(1.0 / 60.0, &bounds, &surface, &[], 0.22);

        let prop = system.get(PropId(0));
        assert_eq!(prop.position.x, 1.0);
        assert!(prop.velocity.x < 0.0, "velocity should reflect");
        assert!(
            prop.velocity.x.abs() < 3.0 * 0.31,
            "reflection is scaled by wall restitution"
        );
    }

    #[test]
    fn test_knockback_pushes_away_and_cools_down() {
        let mut system = test_system();
        let surface = flat_surface();
        let char_pos = Vec3::new(-0.7, 0.0, 0.05); // just left of the heart

        system.update(1.0 / 60.0, &wide_bounds(), &surface, &[char_pos], 0.22);

        let prop = system.get(PropId(0));
        assert!(prop.velocity.x > 0.0, "pushed away from the character");
        assert!(prop.velocity.y > 0.0, "upward kick applied");
        assert!(prop.cooldown > 0.0);

        // A second frame in contact must not re-trigger while cooling down.
        let vel_before = system.get(PropId(0)).velocity;
        system.update(1.0 / 60.0, &wide_bounds(), &surface, &[char_pos], 0.22);
        let prop = system.get(PropId(0));
        // Only gravity/friction act, no fresh impulse.
        assert!(prop.velocity.x <= vel_before.x + 1e-4);
    }

    #[test]
    fn test_nearest_candidate_range() {
        let system = test_system();
        // Far away: no candidate.
        assert_eq!(
            system.nearest_candidate(Vec3::new(10.0, 0.0, 10.0), 0.22),
            None
        );
        // Near the heart: heart wins.
        assert_eq!(
            system.nearest_candidate(Vec3::new(-0.6, 0.0, 0.1), 0.22),
            Some(PropId(0))
        );
    }

    #[test]
    fn test_nearest_candidate_skips_held() {
        let mut system = test_system();
        assert!(system.attach(PropId(0), PlayerId::One, Hand::Right));
        assert_eq!(
            system.nearest_candidate(Vec3::new(-0.6, 0.0, 0.1), 0.22),
            None
        );
    }

    #[test]
    fn test_attach_is_exclusive() {
        let mut system = test_system();
        assert!(system.attach(PropId(0), PlayerId::One, Hand::Right));
        assert!(!system.attach(PropId(0), PlayerId::Two, Hand::Left));
        assert_eq!(
            system.get(PropId(0)).held_by,
            Some((PlayerId::One, Hand::Right))
        );
    }

    #[test]
    fn test_held_props_are_not_simulated() {
        let mut system = test_system();
        let surface = flat_surface();
        system.attach(PropId(0), PlayerId::One, Hand::Right);
        let before = system.get(PropId(0)).clone();

        system.update(1.0 / 60.0, &wide_bounds(), &surface, &[], 0.22);

        let after = system.get(PropId(0));
        assert_eq!(after.position, before.position);
        assert_eq!(after.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_pickup_drop_pickup_restores_held_pose() {
        let mut system = test_system();
        let surface = flat_surface();

        system.attach(PropId(1), PlayerId::One, Hand::Right);
        let first_pose = system.get(PropId(1)).rotation;

        system.detach(
            PropId(1),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Hand::Right,
            &surface,
        );
        assert!(system.get(PropId(1)).is_free());

        system.attach(PropId(1), PlayerId::One, Hand::Left);
        assert_eq!(system.get(PropId(1)).rotation, first_pose);
        assert_eq!(system.get(PropId(1)).position, Vec3::ZERO);
    }

    #[test]
    fn test_drop_placement_offsets() {
        let mut system = test_system();
        let surface = flat_surface();
        system.attach(PropId(1), PlayerId::One, Hand::Right);

        let char_pos = Vec3::new(1.0, 0.0, 2.0);
        let forward = Vec3::new(0.0, 0.0, 1.0);
        system.detach(PropId(1), char_pos, forward, Hand::Right, &surface);

        let prop = system.get(PropId(1));
        // forward*0.6 lands at z = 2.6; right hand offsets along +x.
        assert!((prop.position.z - 2.6).abs() < 1e-5);
        assert!((prop.position.x - 1.25).abs() < 1e-5);
        assert!(prop.velocity.y > 0.0);
        assert!(prop.cooldown > 0.0);
    }

    #[test]
    fn test_noop_drop_leaves_scatter_stream_untouched() {
        let surface = flat_surface();
        let mut plain = test_system();
        let mut with_noop = test_system();

        // A drop command for a prop nobody holds must not consume a seed.
        with_noop.detach(
            PropId(0),
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 1.0),
            Hand::Right,
            &surface,
        );

        for system in [&mut plain, &mut with_noop] {
            system.attach(PropId(1), PlayerId::One, Hand::Right);
            system.detach(
                PropId(1),
                Vec3::ZERO,
                Vec3::new(0.0, 0.0, 1.0),
                Hand::Right,
                &surface,
            );
        }
        assert_eq!(
            plain.get(PropId(1)).angular_velocity,
            with_noop.get(PropId(1)).angular_velocity
        );
    }

    #[test]
    fn test_open_is_one_way_and_cans_only() {
        let mut system = test_system();
        assert!(!system.open(PropId(0)), "hearts cannot be opened");
        assert!(system.open(PropId(1)));
        assert!(!system.open(PropId(1)), "second open is a no-op");
        assert!(system.get(PropId(1)).opened);
    }
}
