//! Session Tests - Frame Ordering, Bounds Growth, and Command Plumbing
//!
//! End-to-end scenarios driven purely through the public session API:
//! scripted input frames in, presentation queries out.

use glam::{Vec2, Vec3};
use shore_picnic::config::QuizConfig;
use shore_picnic::terrain::Terrain;
use shore_picnic::{
    Command, InputFrame, MoveKeys, PicnicConfig, PicnicSession, PlayerId, PropId,
};

const DT: f32 = 1.0 / 60.0;

fn idle(session: &mut PicnicSession, frames: usize) {
    for _ in 0..frames {
        session.update(&InputFrame::new(), 0.0, DT);
    }
}

fn send(session: &mut PicnicSession, command: Command) {
    session.update(&InputFrame::new().with_command(command), 0.0, DT);
}

/// Hold movement keys toward a planar target until close enough.
fn walk_to(session: &mut PicnicSession, player: PlayerId, target: Vec2) {
    for _ in 0..3000 {
        let pos = session.characters()[player.index()].position;
        let delta = Vec2::new(target.x - pos.x, target.y - pos.z);
        if delta.length() < 0.12 {
            return;
        }
        let mut frame = InputFrame::new();
        frame.moves[player.index()] = MoveKeys {
            forward: delta.y > 0.04,
            backward: delta.y < -0.04,
            right: delta.x > 0.04,
            left: delta.x < -0.04,
        };
        session.update(&frame, 0.0, DT);
    }
    panic!("{player:?} never reached ({}, {})", target.x, target.y);
}

/// Walk toward a prop's live position (it can get knocked around en
/// route), stopping inside hint range but outside knockback range.
fn walk_near_prop(session: &mut PicnicSession, player: PlayerId, prop: PropId) {
    for _ in 0..3000 {
        let target = session.props().get(prop).position;
        let pos = session.characters()[player.index()].position;
        let delta = Vec2::new(target.x - pos.x, target.z - pos.z);
        if delta.length() < 0.35 {
            return;
        }
        let mut frame = InputFrame::new();
        frame.moves[player.index()] = MoveKeys {
            forward: delta.y > 0.04,
            backward: delta.y < -0.04,
            right: delta.x > 0.04,
            left: delta.x < -0.04,
        };
        session.update(&frame, 0.0, DT);
    }
    panic!("{player:?} never caught up with {prop:?}");
}

fn complete_quiz(session: &mut PicnicSession, quiz: &QuizConfig) {
    let sign = Vec2::new(quiz.sign_position.x, quiz.sign_position.z);
    walk_to(session, PlayerId::One, sign);
    for question in &quiz.questions {
        // Wait out the typing animation.
        for _ in 0..1200 {
            if session.quiz_view().options.is_some() {
                break;
            }
            session.update(&InputFrame::new(), 0.0, DT);
        }
        assert!(session.quiz_view().options.is_some(), "typing stuck");
        send(session, Command::QuizSelect(question.correct));
        send(session, Command::QuizConfirm);
        idle(session, 90);
        if session.quiz_completed() {
            return;
        }
    }
    panic!("quiz never completed");
}

// ============================================================================
// Pickup / drop through real walking
// ============================================================================

#[test]
fn test_walk_pick_up_carry_and_drop() {
    let config = PicnicConfig::default();
    let mut session = PicnicSession::new(config);

    // Out of range: command does nothing.
    send(&mut session, Command::PickUp(PlayerId::One));
    assert!(session.characters()[0].hands[0].is_none());
    assert_eq!(session.heart_holder(), None);

    walk_near_prop(&mut session, PlayerId::One, PropId(0));
    assert!(session.pickup_hint(PlayerId::One).is_some());

    send(&mut session, Command::PickUp(PlayerId::One));
    let held = session.characters()[0].hands[0].expect("heart in right hand");
    assert_eq!(session.heart_holder(), Some(PlayerId::One));

    // Carrying: the prop rides the hand anchor while the character walks.
    let mut frame = InputFrame::new();
    frame.moves[0] = MoveKeys {
        forward: true,
        ..Default::default()
    };
    session.update(&frame, 0.0, DT);
    let transform = session.prop_transform(held);
    assert!(transform.held);
    let anchor_dist = transform
        .position
        .distance(session.characters()[0].position);
    assert!(anchor_dist < 0.5, "held prop stays near the character");

    send(&mut session, Command::Drop(PlayerId::One));
    assert!(session.props().get(held).is_free());
    assert!(session.characters()[0].hands.iter().all(Option::is_none));
    assert!(session.bounds().contains(session.props().get(held).position));
}

#[test]
fn test_both_hands_then_pickup_is_noop() {
    let config = PicnicConfig::default();
    let mut session = PicnicSession::new(config);

    walk_near_prop(&mut session, PlayerId::One, PropId(0));
    send(&mut session, Command::PickUp(PlayerId::One));
    walk_near_prop(&mut session, PlayerId::One, PropId(1));
    send(&mut session, Command::PickUp(PlayerId::One));
    assert!(session.characters()[0].hands.iter().all(Option::is_some));

    // A third pickup has no free hand and changes nothing.
    walk_near_prop(&mut session, PlayerId::One, PropId(2));
    assert!(session.pickup_hint(PlayerId::One).is_none());
    let before: Vec<_> = session.characters()[0].hands.to_vec();
    send(&mut session, Command::PickUp(PlayerId::One));
    assert_eq!(session.characters()[0].hands.to_vec(), before);
    assert!(session.props().get(PropId(2)).is_free());
}

// ============================================================================
// Kiss scenario from a cold start
// ============================================================================

#[test]
fn test_kiss_scenario_same_frame_start_and_timed_finish() {
    let config = PicnicConfig::default();
    let kiss = config.kiss.clone();
    let mut session = PicnicSession::new(config);

    // Walk the two onto a meeting line, then close the gap with keys
    // aimed at each other so locomotion leaves them mutually facing.
    walk_to(&mut session, PlayerId::One, Vec2::new(-0.45, 1.6));
    walk_to(&mut session, PlayerId::Two, Vec2::new(0.45, 1.6));
    let keys_toward = |from: Vec3, to: Vec3| MoveKeys {
        forward: to.z - from.z > 0.03,
        backward: to.z - from.z < -0.03,
        right: to.x - from.x > 0.03,
        left: to.x - from.x < -0.03,
    };
    for _ in 0..120 {
        let a = session.characters()[0].position;
        let b = session.characters()[1].position;
        if Vec2::new(a.x - b.x, a.z - b.z).length() < 0.34 {
            break;
        }
        let mut frame = InputFrame::new();
        frame.moves[0] = keys_toward(a, b);
        frame.moves[1] = keys_toward(b, a);
        session.update(&frame, 0.0, DT);
    }

    let a = session.characters()[0].position;
    let b = session.characters()[1].position;
    assert!(Vec2::new(a.x - b.x, a.z - b.z).length() < kiss.distance_threshold);

    session.update(&InputFrame::new().with_command(Command::Kiss), 0.0, DT);
    // Both flip to Kissing within the same frame.
    assert!(session.kiss_marker().is_some());
    assert!(
        session.characters().iter().all(|c| c.mode
            == shore_picnic::CharacterMode::Kissing)
    );

    idle(&mut session, (kiss.duration / DT) as usize + 5);
    assert!(session.kiss_marker().is_none());
    assert!(
        session
            .characters()
            .iter()
            .all(|c| c.mode == shore_picnic::CharacterMode::Free)
    );

    // Cooldown blocks an immediate re-trigger.
    send(&mut session, Command::Kiss);
    assert!(session.kiss_marker().is_none());
}

// ============================================================================
// Quiz completion, bounds monotonicity, reveal
// ============================================================================

#[test]
fn test_quiz_unlocks_expansion_exactly_once() {
    let config = PicnicConfig::default();
    let quiz = config.quiz.clone();
    let expansion = config.reveal.expansion_bounds;
    let initial = config.bounds;
    let mut session = PicnicSession::new(config);

    complete_quiz(&mut session, &quiz);

    let unlocked = *session.bounds();
    assert_eq!(unlocked.min_x, expansion.min_x.min(initial.min_x));
    assert_eq!(unlocked.max_z, expansion.max_z.max(initial.max_z));

    // Repeat confirms after completion change nothing.
    send(&mut session, Command::QuizSelect(0));
    send(&mut session, Command::QuizConfirm);
    assert_eq!(*session.bounds(), unlocked);

    // Reveal plays out and pins.
    idle(&mut session, 300);
    assert_eq!(session.reveal_opacity(), 1.0);
    assert_eq!(session.reveal_scale(), 1.0);
    assert!(session.reveal_blending_done());
}

#[test]
fn test_bounds_min_x_is_monotonic_across_a_full_run() {
    let config = PicnicConfig::default();
    let quiz = config.quiz.clone();
    let mut session = PicnicSession::new(config);

    let mut min_x = session.bounds().min_x;
    for _ in 0..300 {
        session.update(&InputFrame::new(), 0.0, DT);
        assert!(session.bounds().min_x <= min_x);
        min_x = session.bounds().min_x;
    }

    complete_quiz(&mut session, &quiz);
    for _ in 0..300 {
        session.update(&InputFrame::new(), 0.0, DT);
        assert!(session.bounds().min_x <= min_x);
        min_x = session.bounds().min_x;
    }
}

// ============================================================================
// Frame-order guarantees observable from outside
// ============================================================================

#[test]
fn test_props_never_sink_below_surface_during_play() {
    let config = PicnicConfig::default();
    let mut session = PicnicSession::new(config);

    // Stomp around the prop cluster to trigger knockbacks for a while.
    let waypoints = [
        Vec2::new(-0.6, 0.05),
        Vec2::new(0.5, -0.15),
        Vec2::new(0.15, -0.35),
        Vec2::new(-0.3, -0.2),
    ];
    for target in waypoints.iter().cycle().take(12) {
        walk_to(&mut session, PlayerId::One, *target);
        for (id, prop) in session.props().iter() {
            if prop.is_free() {
                let transform = session.prop_transform(id);
                let floor = session
                    .terrain()
                    .height_at(transform.position.x, transform.position.z);
                assert!(
                    transform.position.y >= floor + prop.half_height - 1e-3,
                    "prop {id:?} sank below the surface"
                );
                assert!(session.bounds().contains(transform.position));
            }
        }
    }
}

#[test]
fn test_seated_character_ignores_movement_keys() {
    let config = PicnicConfig::default();
    let seat = config.seats[0].anchor;
    let mut session = PicnicSession::new(config);

    walk_to(&mut session, PlayerId::One, Vec2::new(seat.x, seat.z));
    send(&mut session, Command::ToggleSit(PlayerId::One));
    idle(&mut session, 60);
    let seated_pos = session.characters()[0].position;
    assert!(seated_pos.distance(Vec3::new(seat.x, seated_pos.y, seat.z)) < 0.05);

    let mut frame = InputFrame::new();
    frame.moves[0] = MoveKeys {
        forward: true,
        ..Default::default()
    };
    for _ in 0..60 {
        session.update(&frame, 0.0, DT);
    }
    assert!(session.characters()[0].position.distance(seated_pos) < 1e-3);

    // Standing back up restores control.
    send(&mut session, Command::ToggleSit(PlayerId::One));
    for _ in 0..60 {
        session.update(&frame, 0.0, DT);
    }
    assert!(session.characters()[0].position.distance(seated_pos) > 0.3);
}
