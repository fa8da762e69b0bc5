use task_arcade::config::ArcadeConfig;
use task_arcade::score::*;

// ── ScoreTracker ──────────────────────────────────────────────────────────────

#[test]
fn penalty_clamps_at_zero() {
    let mut s = ScoreTracker::new();
    s.add(30);
    s.penalize(50);
    assert_eq!(s.score(), 0);
    s.penalize(50);
    assert_eq!(s.score(), 0);
}

#[test]
fn failure_resets_combo_but_keeps_max() {
    let mut s = ScoreTracker::new();
    for _ in 0..4 {
        s.extend_combo();
    }
    s.break_combo();
    assert_eq!(s.combo(), 0);
    assert_eq!(s.max_combo(), 4);

    assert_eq!(s.extend_combo(), 1);
    assert_eq!(s.max_combo(), 4);
}

#[test]
fn penalty_also_breaks_combo() {
    let mut s = ScoreTracker::new();
    s.add(100);
    s.extend_combo();
    s.penalize(10);
    assert_eq!(s.score(), 90);
    assert_eq!(s.combo(), 0);
    assert_eq!(s.max_combo(), 1);
}

#[test]
fn add_does_not_touch_combo() {
    let mut s = ScoreTracker::new();
    s.add(7);
    assert_eq!(s.score(), 7);
    assert_eq!(s.combo(), 0);
}

// ── Resource ──────────────────────────────────────────────────────────────────

#[test]
fn resource_counts_down_to_exhaustion() {
    let mut r = Resource::new(2);
    assert!(r.consume());
    assert_eq!(r.remaining(), 1);
    assert!(r.consume());
    assert!(r.is_exhausted());
    assert!(!r.consume());
    assert_eq!(r.remaining(), 0);
}

#[test]
fn set_remaining_never_exceeds_initial() {
    let mut r = Resource::new(5);
    r.set_remaining(9);
    assert_eq!(r.remaining(), 5);
    r.set_remaining(1);
    assert_eq!(r.remaining(), 1);
    assert_eq!(r.initial(), 5);
}

// ── RankLadder ────────────────────────────────────────────────────────────────

fn ratio_ladder() -> RankLadder {
    RankLadder::new(&[(0.4, "Good"), (0.9, "Great"), (0.7, "Fine")], "Try again")
}

#[test]
fn tiers_are_sorted_highest_first() {
    let ladder = ratio_ladder();
    let mins: Vec<f32> = ladder.tiers.iter().map(|t| t.min).collect();
    assert_eq!(mins, vec![0.9, 0.7, 0.4]);
    assert!(ladder.is_well_formed());
}

#[test]
fn lower_bounds_are_inclusive() {
    let ladder = ratio_ladder();
    assert_eq!(ladder.rank(0.9), "Great");
    assert_eq!(ladder.rank(0.89), "Fine");
    assert_eq!(ladder.rank(0.4), "Good");
    assert_eq!(ladder.rank(0.39), "Try again");
}

#[test]
fn every_ratio_maps_to_exactly_one_label() {
    let ladder = ratio_ladder();
    let labels = ["Great", "Fine", "Good", "Try again"];
    for i in 0..=100 {
        let label = ladder.rank(i as f32 / 100.0);
        assert_eq!(labels.iter().filter(|l| **l == label).count(), 1);
    }
}

#[test]
fn duplicate_thresholds_are_not_well_formed() {
    let ladder = RankLadder::new(&[(1.0, "A"), (1.0, "B")], "C");
    assert!(!ladder.is_well_formed());
}

#[test]
fn default_ladders_are_well_formed() {
    let config = ArcadeConfig::default();
    assert!(config.invader.rank.is_well_formed());
    assert!(config.runner.rank.is_well_formed());
    assert!(config.batting.rank.is_well_formed());
    assert!(config.free_throw.rank.is_well_formed());
}
