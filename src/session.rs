//! Picnic Session
//!
//! The explicit context object owning every subsystem and the one
//! per-frame update that runs them in a fixed order: latched input,
//! sequencers and locomotion, prop physics and hand commands, pose
//! overrides, then ambient state (effects, blanket, swans, reveal).
//! Presentation reads happen only after [`PicnicSession::update`] returns.

use glam::{Vec2, Vec3};

use crate::blanket::BlanketPress;
use crate::character::{Character, CharacterMode};
use crate::config::PicnicConfig;
use crate::effects::{EffectSystem, OpenBurst};
use crate::input::{Command, InputFrame, PlayerId};
use crate::props::{Hand, PropId, PropKind, PropSpec, PropSystem};
use crate::sequence::{KissMarker, KissSequencer, QuizSequencer, QuizView, Reveal};
use crate::swans::{SwanPose, SwanStory};
use crate::terrain::{ShoreTerrain, Terrain};
use crate::world::WorldBounds;

/// Lake placement shared by the seat face target and the swan route.
const WATER_CENTER: Vec2 = Vec2::new(0.0, -6.0);
const WATER_SIZE: Vec2 = Vec2::new(9.0, 7.0);
const WATER_LEVEL: f32 = -0.18;

/// World-space transform of a prop for presentation.
#[derive(Debug, Clone, Copy)]
pub struct PropTransform {
    pub position: Vec3,
    pub rotation: Vec3,
    /// Set while the prop is parented to a hand.
    pub held: bool,
}

/// The whole interactive vignette state.
pub struct PicnicSession {
    config: PicnicConfig,
    terrain: ShoreTerrain,
    bounds: WorldBounds,
    characters: Vec<Character>,
    props: PropSystem,
    kiss: KissSequencer,
    quiz: QuizSequencer,
    reveal: Reveal,
    blanket: BlanketPress,
    swans: SwanStory,
    effects: EffectSystem,
    /// Wall-clock seconds since session start.
    time: f32,
}

impl PicnicSession {
    pub fn new(config: PicnicConfig) -> Self {
        let terrain = ShoreTerrain::default();
        let blanket = BlanketPress::new(config.blanket.clone(), &terrain);

        let mut characters = vec![Character::new(config.spawn_one, &terrain)];
        if config.two_players {
            characters.push(Character::new(config.spawn_two, &terrain));
        }

        let specs = vec![
            PropSpec {
                kind: PropKind::Heart,
                label: "plush heart",
                gift_album_id: Some("picnic_album"),
                spawn_x: config.heart_spawn.x,
                spawn_z: config.heart_spawn.y,
                radius: 0.08,
                half_height: 0.08,
            },
            PropSpec {
                kind: PropKind::Can,
                label: "red soda",
                gift_album_id: None,
                spawn_x: config.red_can_spawn.x,
                spawn_z: config.red_can_spawn.y,
                radius: 0.06,
                half_height: 0.1,
            },
            PropSpec {
                kind: PropKind::Can,
                label: "gray soda",
                gift_album_id: None,
                spawn_x: config.gray_can_spawn.x,
                spawn_z: config.gray_can_spawn.y,
                radius: 0.06,
                half_height: 0.1,
            },
        ];
        let props = {
            let terrain_ref = &terrain;
            let blanket_ref = &blanket;
            PropSystem::new(config.physics.clone(), specs, &|x, z| {
                blanket_ref.surface_height_at(x, z, terrain_ref)
            })
        };

        log::info!(
            "picnic session started: {} character(s), {} props, {} quiz questions",
            characters.len(),
            props.len(),
            config.quiz.questions.len()
        );

        Self {
            bounds: config.bounds,
            terrain,
            characters,
            props,
            kiss: KissSequencer::new(),
            quiz: QuizSequencer::new(),
            reveal: Reveal::new(),
            blanket,
            swans: SwanStory::new(WATER_CENTER, WATER_SIZE, WATER_LEVEL),
            effects: EffectSystem::new(),
            time: 0.0,
            config,
        }
    }

    /// Advance the whole session by one frame.
    ///
    /// `camera_yaw` is the host camera's horizontal orientation, used to
    /// make movement input screen-relative.
    pub fn update(&mut self, input: &InputFrame, camera_yaw: f32, dt: f32) {
        self.time += dt;

        // Stage 1: sequencer commands, then locomotion, so character
        // transforms are final before physics reads them.
        for command in &input.commands {
            match *command {
                Command::ToggleSit(player) => self.handle_toggle_sit(player),
                Command::Kiss => {
                    if self.kiss.try_start(&mut self.characters, &self.config.kiss) {
                        log::debug!("kiss sequence started");
                    }
                }
                Command::QuizSelect(option) => self.quiz.select(option, &self.config.quiz),
                Command::QuizConfirm => self.quiz.confirm(&self.config.quiz),
                _ => {}
            }
        }

        for (i, character) in self.characters.iter_mut().enumerate() {
            match character.mode {
                CharacterMode::Free => character.update_locomotion(
                    &input.moves[i],
                    camera_yaw,
                    &self.terrain,
                    &self.bounds,
                    &self.config.locomotion,
                    dt,
                    self.time,
                ),
                CharacterMode::Seated { .. } => character.update_seated(
                    &self.config.seats[i],
                    &self.terrain,
                    &self.config.locomotion,
                    dt,
                ),
                CharacterMode::Kissing => {}
            }
        }
        self.kiss.update(&mut self.characters, &self.config.kiss, dt);

        let near_sign = self.characters.iter().any(|c| {
            let d = Vec2::new(
                c.position.x - self.config.quiz.sign_position.x,
                c.position.z - self.config.quiz.sign_position.z,
            );
            d.length() <= self.config.quiz.trigger_radius
        });
        if self.quiz.update(near_sign, &self.config.quiz, dt) {
            self.unlock_expansion();
        }

        // Stage 2: prop physics against final character positions, then
        // hand commands mutating held state.
        let char_positions: Vec<Vec3> = self.characters.iter().map(|c| c.position).collect();
        {
            let terrain = &self.terrain;
            let blanket = &self.blanket;
            self.props.update(
                dt,
                &self.bounds,
                &|x, z| blanket.surface_height_at(x, z, terrain),
                &char_positions,
                self.config.locomotion.character_radius,
            );
        }

        for command in &input.commands {
            match *command {
                Command::PickUp(player) => self.handle_pick_up(player),
                Command::Drop(player) => self.handle_drop(player),
                Command::OpenCan(player) => self.handle_open_can(player),
                _ => {}
            }
        }

        // Stage 3: pose overrides layered after held-state changes.
        for character in &mut self.characters {
            character.pose.hold_extend = [character.hands[0].is_some(), character.hands[1].is_some()];
        }

        // Stage 4: ambient state.
        self.blanket.update(&char_positions, dt);
        self.swans.update(dt);
        self.effects.update(dt);
        self.reveal.update(&self.config.reveal, dt);
    }

    fn character_mut(&mut self, player: PlayerId) -> Option<&mut Character> {
        self.characters.get_mut(player.index())
    }

    fn handle_toggle_sit(&mut self, player: PlayerId) {
        if self.kiss.is_active() {
            return;
        }
        let seat = self.config.seats[player.index()].clone();
        if let Some(character) = self.character_mut(player) {
            if character.try_toggle_sit(&seat) {
                log::debug!("player {:?} toggled sitting", player);
            }
        }
    }

    fn handle_pick_up(&mut self, player: PlayerId) {
        let Some(character) = self.characters.get(player.index()) else {
            return;
        };
        let Some(hand) = character.free_hand() else {
            return;
        };
        let Some(id) = self
            .props
            .nearest_candidate(character.position, self.config.locomotion.character_radius)
        else {
            return;
        };
        if self.props.attach(id, player, hand) {
            self.characters[player.index()].set_hand_slot(hand, Some(id));
            log::debug!("player {:?} picked up {}", player, self.props.get(id).label);
        }
    }

    fn handle_drop(&mut self, player: PlayerId) {
        let Some(character) = self.characters.get(player.index()) else {
            return;
        };
        let Some((hand, id)) = character.occupied_hand() else {
            return;
        };
        let (pos, forward) = (character.position, character.forward());
        {
            let terrain = &self.terrain;
            let blanket = &self.blanket;
            self.props.detach(id, pos, forward, hand, &|x, z| {
                blanket.surface_height_at(x, z, terrain)
            });
        }
        self.characters[player.index()].set_hand_slot(hand, None);
    }

    fn handle_open_can(&mut self, player: PlayerId) {
        let Some(character) = self.characters.get(player.index()) else {
            return;
        };
        // Right hand first, then left; only an unopened can qualifies.
        for hand in [Hand::Right, Hand::Left] {
            if let Some(id) = character.hand_slot(hand) {
                if self.props.open(id) {
                    let origin = self.characters[player.index()].hand_anchor(hand);
                    self.effects.spawn_open_burst(origin);
                    log::debug!("player {:?} opened {}", player, self.props.get(id).label);
                    return;
                }
            }
        }
    }

    fn unlock_expansion(&mut self) {
        self.bounds.expand_to(&self.config.reveal.expansion_bounds);
        self.reveal.start();
        log::info!("quiz completed, expansion area unlocked");
    }

    // --- presentation queries, read-only ---

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn bounds(&self) -> &WorldBounds {
        &self.bounds
    }

    pub fn terrain(&self) -> &dyn Terrain {
        &self.terrain
    }

    pub fn config(&self) -> &PicnicConfig {
        &self.config
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn props(&self) -> &PropSystem {
        &self.props
    }

    /// World transform for a prop, resolving held props to their hand
    /// anchor each frame.
    pub fn prop_transform(&self, id: PropId) -> PropTransform {
        let prop = self.props.get(id);
        match prop.held_by {
            Some((player, hand)) => {
                let character = &self.characters[player.index()];
                PropTransform {
                    position: character.hand_anchor(hand),
                    rotation: prop.rotation + Vec3::new(0.0, character.yaw, 0.0),
                    held: true,
                }
            }
            None => PropTransform {
                position: prop.position,
                rotation: prop.rotation,
                held: false,
            },
        }
    }

    /// The prop a player's pickup hint should point at, if any.
    pub fn pickup_hint(&self, player: PlayerId) -> Option<(PropId, &'static str)> {
        let character = self.characters.get(player.index())?;
        character.free_hand()?;
        let id = self
            .props
            .nearest_candidate(character.position, self.config.locomotion.character_radius)?;
        Some((id, self.props.get(id).label))
    }

    /// Which player is carrying a gift prop, gating the photo overlay.
    pub fn heart_holder(&self) -> Option<PlayerId> {
        for (_, prop) in self.props.iter() {
            if prop.gift_album_id.is_some() {
                if let Some((player, _)) = prop.held_by {
                    return Some(player);
                }
            }
        }
        None
    }

    pub fn kiss_marker(&self) -> Option<KissMarker> {
        self.kiss.marker(&self.characters, &self.config.kiss)
    }

    pub fn quiz_view(&self) -> QuizView<'_> {
        self.quiz.view(&self.config.quiz)
    }

    pub fn quiz_completed(&self) -> bool {
        self.quiz.is_completed()
    }

    pub fn reveal_opacity(&self) -> f32 {
        self.reveal.opacity(&self.config.reveal)
    }

    pub fn reveal_scale(&self) -> f32 {
        self.reveal.scale(&self.config.reveal)
    }

    pub fn reveal_blending_done(&self) -> bool {
        self.reveal.blending_done()
    }

    pub fn blanket(&self) -> &BlanketPress {
        &self.blanket
    }

    pub fn swan_poses(&self) -> [SwanPose; 2] {
        [self.swans.pose(0), self.swans.pose(1)]
    }

    pub fn open_bursts(&self) -> &[OpenBurst] {
        self.effects.bursts()
    }
}
