use task_arcade::celebration::*;
use task_arcade::config::{ArcadeConfig, CelebrationTuning};
use task_arcade::display::RecordingSurface;
use task_arcade::entities::*;
use task_arcade::session::Session;

use rand::rngs::StdRng;
use rand::SeedableRng;

const FPS: u32 = 60;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn run_to_end(c: &mut Celebration) -> CelebrationState {
    let mut state = c.state;
    for _ in 0..10_000 {
        state = c.tick();
        if state != CelebrationState::Playing {
            break;
        }
    }
    state
}

#[test]
fn preset_follows_priority() {
    let tuning = CelebrationTuning::default();
    let low = on_task_completed(Priority::Low, &tuning, FPS, &mut seeded_rng());
    let medium = on_task_completed(Priority::Medium, &tuning, FPS, &mut seeded_rng());
    let high = on_task_completed(Priority::High, &tuning, FPS, &mut seeded_rng());

    assert_eq!(low.confetti.len(), 15);
    assert_eq!(medium.confetti.len(), 50);
    assert_eq!(high.confetti.len(), 150);
    assert_eq!(low.timer.remaining, 90);
    assert_eq!(medium.timer.remaining, 150);
    assert_eq!(high.timer.remaining, 210);
}

#[test]
fn message_comes_from_the_priority_pool() {
    let tuning = CelebrationTuning::default();
    for seed in 0..20 {
        let c = on_task_completed(Priority::Medium, &tuning, FPS, &mut StdRng::seed_from_u64(seed));
        assert!(tuning.medium.messages.contains(&c.message));
    }
}

#[test]
fn high_priority_offers_games_when_animation_ends() {
    let tuning = CelebrationTuning::default();
    let mut c = on_task_completed(Priority::High, &tuning, FPS, &mut seeded_rng());
    assert!(c.offered_games().is_empty());

    for _ in 0..209 {
        assert_eq!(c.tick(), CelebrationState::Playing);
    }
    assert_eq!(c.tick(), CelebrationState::OfferingGames);
    assert!(c.is_visible());
    assert_eq!(c.offered_games(), &GameKind::ALL);
}

#[test]
fn lower_priorities_just_finish() {
    let tuning = CelebrationTuning::default();
    for priority in [Priority::Low, Priority::Medium] {
        let mut c = on_task_completed(priority, &tuning, FPS, &mut seeded_rng());
        assert_eq!(run_to_end(&mut c), CelebrationState::Done);
        assert!(!c.is_visible());
        assert!(c.offered_games().is_empty());
    }
}

#[test]
fn launch_only_when_offered() {
    let config = ArcadeConfig::default();
    let mut c = on_task_completed(Priority::High, &config.celebration, FPS, &mut seeded_rng());
    assert!(c
        .launch(GameKind::Batting, RecordingSurface::new(), &config, 1)
        .is_none());

    run_to_end(&mut c);
    let driver = c
        .launch(GameKind::Batting, RecordingSurface::new(), &config, 1)
        .expect("batting on offer");
    assert_eq!(driver.session().kind(), GameKind::Batting);
    assert!(!driver.is_visible());
    assert_eq!(c.state, CelebrationState::Done);
}

#[test]
fn dismiss_hides_without_launching() {
    let config = ArcadeConfig::default();
    let mut c = on_task_completed(Priority::High, &config.celebration, FPS, &mut seeded_rng());
    run_to_end(&mut c);
    c.dismiss();
    assert!(!c.is_visible());
    assert!(c
        .launch(GameKind::Runner, RecordingSurface::new(), &config, 1)
        .is_none());
}
