use task_arcade::config::InvaderTuning;
use task_arcade::entities::*;
use task_arcade::games::invader::*;
use task_arcade::games::InvaderGame;
use task_arcade::input::FrameInput;
use task_arcade::session::Session;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Default tuning with enemy fire switched off so outcomes are scripted.
fn quiet_tuning() -> InvaderTuning {
    InvaderTuning {
        enemy_fire_chance: 0.0,
        ..InvaderTuning::default()
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// A state with a single live enemy at (100, 100).
fn make_state(t: &InvaderTuning) -> InvaderState {
    let mut s = init_state(t);
    for e in s.enemies.iter_mut() {
        e.alive = false;
    }
    s.enemies[0] = Enemy {
        rect: Rect::new(100.0, 100.0, 30.0, 20.0),
        row: 0,
        alive: true,
    };
    s
}

fn player_bullet(x: f32, y: f32) -> Bullet {
    Bullet {
        rect: Rect::new(x, y, 4.0, 10.0),
        owner: BulletOwner::Player,
        alive: true,
    }
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_builds_full_formation() {
    let t = InvaderTuning::default();
    let s = init_state(&t);
    assert_eq!(s.enemies.len(), 15);
    assert_eq!(s.alive_enemies(), 15);
    assert_eq!(s.enemies[0].rect, Rect::new(30.0, 50.0, 30.0, 20.0));
    assert_eq!(s.enemies[6].rect.x, 30.0 + 45.0);
    assert_eq!(s.enemies[6].row, 1);
}

#[test]
fn init_state_player_centred_near_bottom() {
    let s = init_state(&InvaderTuning::default());
    assert_eq!(s.player, Rect::new(180.0, 350.0, 40.0, 20.0));
    assert_eq!(s.lives.remaining(), 5);
    assert_eq!(s.score.score(), 0);
    assert_eq!(s.phase, SessionPhase::Running);
    assert!(s.bullets.is_empty());
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn move_player_clamps_at_both_edges() {
    let t = InvaderTuning::default();
    let mut s = init_state(&t);
    s.player.x = 3.0;
    move_player(&mut s, &t, -1.0);
    assert_eq!(s.player.x, 0.0);

    s.player.x = 355.0;
    move_player(&mut s, &t, 1.0);
    assert_eq!(s.player.x, 360.0);
}

#[test]
fn player_shoot_caps_bullets_in_flight() {
    let t = InvaderTuning::default();
    let mut s = init_state(&t);
    for _ in 0..t.max_bullets {
        assert!(player_shoot(&mut s, &t));
    }
    assert!(!player_shoot(&mut s, &t));
    assert_eq!(s.player_bullets(), t.max_bullets);
}

#[test]
fn held_keys_move_and_activation_fires() {
    let t = quiet_tuning();
    let mut s = init_state(&t);
    let mut rng = seeded_rng();
    let input = FrameInput {
        left: true,
        ..FrameInput::activate()
    };
    tick(&mut s, &t, &input, &mut rng);
    assert_eq!(s.player.x, 172.0);
    assert_eq!(s.player_bullets(), 1);
}

// ── Collisions ────────────────────────────────────────────────────────────────

#[test]
fn player_bullet_leaving_top_is_removed() {
    let t = quiet_tuning();
    let mut s = init_state(&t);
    s.bullets.push(player_bullet(5.0, 5.0));
    tick(&mut s, &t, &FrameInput::idle(), &mut seeded_rng());
    assert!(s.bullets.is_empty());
}

#[test]
fn bullet_destroys_enemy_and_scores_row_points() {
    let t = quiet_tuning();
    let mut s = init_state(&t);
    // Under enemy 0 (row 0) after one 10 px step.
    s.bullets.push(player_bullet(40.0, 70.0));
    tick(&mut s, &t, &FrameInput::idle(), &mut seeded_rng());
    assert!(!s.enemies[0].alive);
    assert_eq!(s.score.score(), 40);
    assert!(s.bullets.is_empty());
    assert_eq!(s.phase, SessionPhase::Running);
}

#[test]
fn points_for_row_falls_back_to_last_entry() {
    let t = InvaderTuning::default();
    assert_eq!(points_for_row(&t, 0), 40);
    assert_eq!(points_for_row(&t, 2), 20);
    assert_eq!(points_for_row(&t, 7), 20);
    assert_eq!(formation_value(&t), 450);
}

#[test]
fn formation_reverses_and_drops_at_margin() {
    let t = quiet_tuning();
    let mut s = make_state(&t);
    s.enemies[0].rect.x = 360.0; // right edge at 390 = width - margin
    tick(&mut s, &t, &FrameInput::idle(), &mut seeded_rng());
    assert_eq!(s.direction, -1.0);
    assert_eq!(s.enemies[0].rect.y, 115.0);
    assert!((s.enemies[0].rect.x - 359.4).abs() < 1e-4);
}

// ── Terminal transitions ──────────────────────────────────────────────────────

#[test]
fn clearing_last_enemy_ends_game_survived_on_that_tick() {
    let t = quiet_tuning();
    let mut s = make_state(&t);
    s.bullets.push(player_bullet(110.0, 115.0));
    assert_eq!(s.phase, SessionPhase::Running);

    tick(&mut s, &t, &FrameInput::idle(), &mut seeded_rng());
    assert_eq!(s.alive_enemies(), 0);
    assert_eq!(s.phase, SessionPhase::GameOver);
    assert_eq!(s.outcome, Some(Outcome::Survived));
}

#[test]
fn losing_last_life_ends_game_on_next_tick() {
    let t = quiet_tuning();
    let mut s = init_state(&t);
    s.lives.set_remaining(1);
    s.bullets.push(Bullet {
        rect: Rect::new(190.0, 345.0, 4.0, 10.0),
        owner: BulletOwner::Enemy,
        alive: true,
    });

    tick(&mut s, &t, &FrameInput::idle(), &mut seeded_rng());
    assert_eq!(s.lives.remaining(), 0);
    assert_eq!(s.phase, SessionPhase::GameOver);
    assert_eq!(s.outcome, Some(Outcome::Failed));
}

#[test]
fn formation_reaching_player_row_fails() {
    let t = quiet_tuning();
    let mut s = make_state(&t);
    s.enemies[0].rect.y = 331.0; // bottom at 351 > player.y
    tick(&mut s, &t, &FrameInput::idle(), &mut seeded_rng());
    assert_eq!(s.outcome, Some(Outcome::Failed));
}

#[test]
fn tick_is_noop_after_game_over() {
    let t = quiet_tuning();
    let mut s = init_state(&t);
    s.phase = SessionPhase::GameOver;
    let before = s.clone();
    tick(&mut s, &t, &FrameInput::activate(), &mut seeded_rng());
    assert_eq!(s, before);
}

// ── Rank / session ────────────────────────────────────────────────────────────

#[test]
fn rank_uses_ratio_of_formation_value() {
    let t = InvaderTuning::default();
    assert_eq!(rank_for(&t, 450), "Flawless defense!");
    assert_eq!(rank_for(&t, 320), "Ace pilot!");
    assert_eq!(rank_for(&t, 0), "Invaded...");
}

#[test]
fn reset_restores_initial_state() {
    let mut game = InvaderGame::new(quiet_tuning(), 7);
    for _ in 0..30 {
        game.update(&FrameInput::activate());
    }
    game.state_mut().lives.set_remaining(2);
    game.reset(false);
    assert_eq!(game.state(), &init_state(game.tuning()));
    assert_eq!(game.score(), 0);
}

#[test]
fn same_seed_and_inputs_replay_identically() {
    let run = || {
        let mut game = InvaderGame::new(InvaderTuning::default(), 1234);
        for frame in 0..600u32 {
            let base = if frame % 12 == 0 {
                FrameInput::activate()
            } else {
                FrameInput::idle()
            };
            let input = FrameInput {
                right: frame % 90 < 45,
                left: frame % 90 >= 45,
                ..base
            };
            game.update(&input);
        }
        game.state().clone()
    };
    assert_eq!(run(), run());
}
