use task_arcade::config::RunnerTuning;
use task_arcade::entities::*;
use task_arcade::games::runner::*;
use task_arcade::games::RunnerGame;
use task_arcade::input::FrameInput;
use task_arcade::session::Session;

use rand::rngs::StdRng;
use rand::SeedableRng;

const FPS: u32 = 60;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn make_state(t: &RunnerTuning) -> RunnerState {
    init_state(t, &mut seeded_rng())
}

fn obstacle_over_orb(s: &RunnerState) -> Obstacle {
    let p = s.orb.body.pos;
    Obstacle {
        rect: Rect::new(p.x - 20.0, p.y - 30.0, 60.0, 60.0),
        kind: ObstacleKind::Middle,
        sway: None,
        hue: 0.0,
        alive: true,
    }
}

fn collectible_on_orb(s: &RunnerState) -> Collectible {
    Collectible {
        pos: s.orb.body.pos,
        radius: 8.0,
        angle: 0.0,
        hue: 120.0,
        alive: true,
    }
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_defaults() {
    let t = RunnerTuning::default();
    let s = make_state(&t);
    assert_eq!(s.orb.body.pos, Vec2::new(80.0, 200.0));
    assert_eq!(s.orb.gravity_direction, 1.0);
    assert_eq!(s.time_left, 120);
    assert_eq!(s.stars.len(), 50);
    assert!(s.obstacles.is_empty());
    assert!(s.collectibles.is_empty());
    assert_eq!(s.score.score(), 0);
}

// ── Gravity flip ──────────────────────────────────────────────────────────────

#[test]
fn activation_flips_gravity_and_zeroes_vertical_speed() {
    let t = RunnerTuning::default();
    let mut s = make_state(&t);
    s.orb.body.vel.y = 5.0;
    tick(&mut s, &t, FPS, &FrameInput::activate(), &mut seeded_rng());
    assert_eq!(s.orb.gravity_direction, -1.0);
    assert_eq!(s.orb.body.vel.y, 0.0);

    tick(&mut s, &t, FPS, &FrameInput::activate(), &mut seeded_rng());
    assert_eq!(s.orb.gravity_direction, 1.0);
    assert_eq!(s.orb.body.vel.y, 0.0);
}

#[test]
fn flip_works_pinned_against_a_wall() {
    let t = RunnerTuning::default();
    let mut s = make_state(&t);
    s.orb.body.pos.y = s.height - s.orb.radius;
    flip_gravity(&mut s);
    assert_eq!(s.orb.gravity_direction, -1.0);
    assert_eq!(s.orb.body.vel.y, 0.0);
    assert!(!s.sparks.is_empty());
}

#[test]
fn vertical_speed_is_clamped() {
    let t = RunnerTuning::default();
    let mut s = make_state(&t);
    s.orb.body.pos.y = 100.0;
    s.orb.body.vel.y = 9.9;
    tick(&mut s, &t, FPS, &FrameInput::idle(), &mut seeded_rng());
    assert_eq!(s.orb.body.vel.y, 10.0);
    assert_eq!(s.orb.body.pos.y, 110.0);
}

#[test]
fn orb_stops_at_floor() {
    let t = RunnerTuning::default();
    let mut s = make_state(&t);
    s.orb.body.pos.y = 385.0;
    s.orb.body.vel.y = 8.0;
    tick(&mut s, &t, FPS, &FrameInput::idle(), &mut seeded_rng());
    assert_eq!(s.orb.body.pos.y, 388.0);
    assert_eq!(s.orb.body.vel.y, 0.0);
}

// ── Obstacles and collectibles ────────────────────────────────────────────────

#[test]
fn hit_breaks_combo_and_clamps_score_at_zero() {
    let t = RunnerTuning::default();
    let mut s = make_state(&t);
    s.score.add(20);
    s.score.extend_combo();
    s.score.extend_combo();
    let ob = obstacle_over_orb(&s);
    s.obstacles.push(ob);

    tick(&mut s, &t, FPS, &FrameInput::idle(), &mut seeded_rng());
    assert_eq!(s.score.score(), 0);
    assert_eq!(s.score.combo(), 0);
    assert_eq!(s.score.max_combo(), 2);
    assert!(s.obstacles.is_empty());
}

#[test]
fn hit_subtracts_penalty() {
    let t = RunnerTuning::default();
    let mut s = make_state(&t);
    s.score.add(120);
    let ob = obstacle_over_orb(&s);
    s.obstacles.push(ob);
    tick(&mut s, &t, FPS, &FrameInput::idle(), &mut seeded_rng());
    assert_eq!(s.score.score(), 70);
}

#[test]
fn collect_extends_combo_and_scores() {
    let t = RunnerTuning::default();
    let mut s = make_state(&t);
    let c = collectible_on_orb(&s);
    s.collectibles.push(c);
    tick(&mut s, &t, FPS, &FrameInput::idle(), &mut seeded_rng());
    assert_eq!(s.score.combo(), 1);
    assert_eq!(s.score.score(), 10);
    assert!(s.collectibles.is_empty());
}

#[test]
fn collect_points_grow_every_five_combo() {
    let t = RunnerTuning::default();
    assert_eq!(collect_points(&t, 1), 10);
    assert_eq!(collect_points(&t, 4), 10);
    assert_eq!(collect_points(&t, 5), 15);
    assert_eq!(collect_points(&t, 10), 20);
}

#[test]
fn obstacles_scroll_and_expire_off_screen() {
    let t = RunnerTuning::default();
    let mut s = make_state(&t);
    s.obstacles.push(Obstacle {
        rect: Rect::new(-78.0, 0.0, 30.0, 60.0),
        kind: ObstacleKind::Top,
        sway: None,
        hue: 0.0,
        alive: true,
    });
    tick(&mut s, &t, FPS, &FrameInput::idle(), &mut seeded_rng());
    assert!(s.obstacles.is_empty());
    assert_eq!(s.score.score(), 0);
}

#[test]
fn spawns_follow_their_timers() {
    let t = RunnerTuning::default();
    let mut s = make_state(&t);
    let mut rng = seeded_rng();
    for _ in 0..40 {
        tick(&mut s, &t, FPS, &FrameInput::idle(), &mut rng);
    }
    assert_eq!(s.collectibles.len(), 1);
    assert!(s.obstacles.is_empty());
}

// ── Clock ─────────────────────────────────────────────────────────────────────

#[test]
fn clock_reaching_zero_ends_survived_with_combo_bonus() {
    let t = RunnerTuning::default();
    let mut s = make_state(&t);
    s.time_left = 1;
    s.frame = 59;
    s.score.add(100);
    for _ in 0..3 {
        s.score.extend_combo();
    }

    tick(&mut s, &t, FPS, &FrameInput::idle(), &mut seeded_rng());
    assert_eq!(s.time_left, 0);
    assert_eq!(s.phase, SessionPhase::GameOver);
    assert_eq!(s.outcome, Some(Outcome::Survived));
    assert_eq!(s.end_bonus, 60);
    assert_eq!(s.score.score(), 160);
}

#[test]
fn clock_ticks_once_per_second() {
    let t = RunnerTuning::default();
    let mut s = make_state(&t);
    let mut rng = seeded_rng();
    for _ in 0..FPS {
        tick(&mut s, &t, FPS, &FrameInput::idle(), &mut rng);
    }
    assert_eq!(s.time_left, 119);
    assert!((s.speed - 3.02).abs() < 1e-5);
}

// ── Rank / session ────────────────────────────────────────────────────────────

#[test]
fn rank_by_absolute_score() {
    let t = RunnerTuning::default();
    assert_eq!(rank_for(&t, 2500), "Neon legend!");
    assert_eq!(rank_for(&t, 600), "Smooth flier!");
    assert_eq!(rank_for(&t, 0), "Keep flipping!");
}

#[test]
fn restart_discards_entities_and_counters() {
    let mut game = RunnerGame::new(RunnerTuning::default(), FPS, 9);
    for i in 0..300 {
        let input = if i % 25 == 0 {
            FrameInput::activate()
        } else {
            FrameInput::idle()
        };
        game.update(&input);
    }
    game.reset(false);
    let s = game.state();
    assert_eq!(s.score.score(), 0);
    assert_eq!(s.score.combo(), 0);
    assert_eq!(s.score.max_combo(), 0);
    assert_eq!(s.time_left, 120);
    assert!(s.obstacles.is_empty());
    assert!(s.collectibles.is_empty());
    assert!(s.sparks.is_empty());
    assert_eq!(s.phase, SessionPhase::Running);
}

#[test]
fn same_seed_and_inputs_replay_identically() {
    let run = || {
        let mut game = RunnerGame::new(RunnerTuning::default(), FPS, 77);
        for i in 0..1200 {
            let input = if i % 37 == 0 {
                FrameInput::activate()
            } else {
                FrameInput::idle()
            };
            game.update(&input);
        }
        (game.score(), game.state().clone())
    };
    assert_eq!(run(), run());
}
