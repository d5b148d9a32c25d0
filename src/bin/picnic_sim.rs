//! Picnic Sim - Headless Scripted Demo
//!
//! Run with: `cargo run --bin picnic_sim [config.json]`
//!
//! Drives a session through a scripted afternoon at 60 Hz: player one
//! walks to the plush heart and carries it, both sit on the blanket,
//! a can gets opened, the pair kisses, and player one answers the quiz
//! at the sign to unlock the expansion area. State milestones are
//! reported through the logger (`RUST_LOG=info` or `debug`).

use std::process::ExitCode;

use glam::Vec2;

use shore_picnic::{
    Command, InputFrame, MoveKeys, PicnicConfig, PicnicSession, PlayerId,
};

const DT: f32 = 1.0 / 60.0;

fn main() -> ExitCode {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match PicnicConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("failed to load config {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => PicnicConfig::default(),
    };

    let heart_spawn = config.heart_spawn;
    let can_spawn = config.red_can_spawn;
    let seat = config.seats[0].anchor;
    let kiss_frames = (config.kiss.duration / DT) as usize + 10;
    let sign = config.quiz.sign_position;
    let questions = config.quiz.questions.clone();
    let mut session = PicnicSession::new(config);

    walk_player_to(&mut session, PlayerId::One, heart_spawn);
    send(&mut session, Command::PickUp(PlayerId::One));
    if let Some(player) = session.heart_holder() {
        log::info!("heart carried by {player:?}");
    }

    // Carry the heart to the blanket and sit down with it.
    walk_player_to(&mut session, PlayerId::One, Vec2::new(seat.x, seat.z));
    send(&mut session, Command::ToggleSit(PlayerId::One));
    idle(&mut session, 60);
    send(&mut session, Command::ToggleSit(PlayerId::One));
    send(&mut session, Command::Drop(PlayerId::One));

    // Crack a soda.
    walk_player_to(&mut session, PlayerId::One, can_spawn);
    send(&mut session, Command::PickUp(PlayerId::One));
    send(&mut session, Command::OpenCan(PlayerId::One));
    log::info!("open bursts live: {}", session.open_bursts().len());
    send(&mut session, Command::Drop(PlayerId::One));

    // Meet in the middle for the kiss.
    if session.characters().len() > 1 {
        let meet = Vec2::new(0.0, 1.0);
        walk_player_to(&mut session, PlayerId::One, meet - Vec2::new(0.2, 0.0));
        walk_player_to(&mut session, PlayerId::Two, meet + Vec2::new(0.2, 0.0));
        face_each_other(&mut session);
        send(&mut session, Command::Kiss);
        idle(&mut session, kiss_frames);
    }

    // Answer the quiz at the sign.
    walk_player_to(&mut session, PlayerId::One, Vec2::new(sign.x, sign.z));
    for question in &questions {
        wait_for_options(&mut session);
        send(&mut session, Command::QuizSelect(question.correct));
        send(&mut session, Command::QuizConfirm);
        idle(&mut session, 90);
        if session.quiz_completed() {
            break;
        }
    }

    idle(&mut session, 240);
    log::info!(
        "demo finished at t={:.1}s, bounds=({:.1}..{:.1}, {:.1}..{:.1}), reveal done: {}",
        session.time(),
        session.bounds().min_x,
        session.bounds().max_x,
        session.bounds().min_z,
        session.bounds().max_z,
        session.reveal_blending_done()
    );
    ExitCode::SUCCESS
}

fn idle(session: &mut PicnicSession, frames: usize) {
    for _ in 0..frames {
        session.update(&InputFrame::new(), 0.0, DT);
    }
}

fn send(session: &mut PicnicSession, command: Command) {
    session.update(&InputFrame::new().with_command(command), 0.0, DT);
}

/// Hold movement keys toward a target point until the character is close,
/// giving up after a generous frame budget.
fn walk_player_to(session: &mut PicnicSession, player: PlayerId, target: Vec2) {
    for _ in 0..3000 {
        let pos = session.characters()[player.index()].position;
        let delta = Vec2::new(target.x - pos.x, target.y - pos.z);
        if delta.length() < 0.15 {
            return;
        }
        let mut frame = InputFrame::new();
        frame.moves[player.index()] = MoveKeys {
            forward: delta.y > 0.05,
            backward: delta.y < -0.05,
            right: delta.x > 0.05,
            left: delta.x < -0.05,
        };
        session.update(&frame, 0.0, DT);
    }
    log::warn!("{player:?} did not reach ({:.2}, {:.2})", target.x, target.y);
}

/// Point the pair directly at each other so the kiss preconditions hold.
fn face_each_other(session: &mut PicnicSession) {
    // Nudge each player toward the other for a few frames; locomotion
    // turns them to face their heading.
    for _ in 0..20 {
        let a = session.characters()[0].position;
        let b = session.characters()[1].position;
        let mut frame = InputFrame::new();
        frame.moves[0] = MoveKeys {
            right: b.x > a.x,
            left: b.x < a.x,
            ..Default::default()
        };
        frame.moves[1] = MoveKeys {
            right: a.x > b.x,
            left: a.x < b.x,
            ..Default::default()
        };
        session.update(&frame, 0.0, DT);
    }
}

fn wait_for_options(session: &mut PicnicSession) {
    for _ in 0..1200 {
        if session.quiz_view().options.is_some() || session.quiz_completed() {
            return;
        }
        session.update(&InputFrame::new(), 0.0, DT);
    }
}
