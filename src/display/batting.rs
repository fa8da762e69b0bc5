use crate::config::BattingTuning;
use crate::entities::{Rect, Rgba, SessionPhase, Vec2};
use crate::error::Result;
use crate::games::batting::{ball_screen_position, BattingState};
use crate::physics::depth_scale;

use super::{draw_game_over, draw_hud, draw_result, draw_tutorial, Surface, TextStyle, TutorialRule};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SKY: Rgba = Rgba::rgb(26, 42, 74);
const C_GRASS: Rgba = Rgba::rgb(34, 120, 50);
const C_DIRT: Rgba = Rgba::rgb(160, 110, 60);
const C_ZONE: Rgba = Rgba::rgb(255, 255, 255);
const C_BALL: Rgba = Rgba::WHITE;
const C_CURSOR: Rgba = Rgba::YELLOW;
const C_BASE_EMPTY: Rgba = Rgba::GREY;
const C_BASE_RUNNER: Rgba = Rgba::YELLOW;

const BALL_RADIUS: f32 = 6.0;

/// Render one complete frame.
pub fn render(
    surface: &mut dyn Surface,
    state: &BattingState,
    t: &BattingTuning,
    rank: &str,
) -> Result<()> {
    let size = Vec2::new(t.width, t.height);
    surface.begin_frame(size, C_SKY)?;

    draw_field(surface, t);
    draw_scoreboard(surface, state, t);

    if state.phase == SessionPhase::Tutorial {
        draw_tutorial(
            surface,
            size,
            "Batting Challenge",
            Rgba::GREEN,
            &[
                TutorialRule {
                    title: "Aim",
                    desc: "Move the mouse or arrow keys to place the bat",
                },
                TutorialRule {
                    title: "Swing",
                    desc: "Space or click when the ball reaches the zone",
                },
                TutorialRule {
                    title: "Score",
                    desc: "Runs count over three innings; three outs end an inning",
                },
            ],
            t.start_button,
        );
        return surface.present();
    }

    // Pitcher
    let mound = state.pitcher.pos;
    let lean = if state.pitcher.throwing { 6.0 } else { 0.0 };
    surface.fill_circle(Vec2::new(mound.x + lean, mound.y - 20.0), 8.0, Rgba::rgb(255, 220, 180));
    surface.fill_rect(Rect::new(mound.x - 8.0 + lean, mound.y - 12.0, 16.0, 24.0), Rgba::WHITE);

    if let Some(ball) = state.ball.as_ref().filter(|b| b.active) {
        let pos = ball_screen_position(ball, t);
        let radius = BALL_RADIUS * depth_scale(ball.depth, 0.4, 1.6);
        surface.fill_circle(pos, radius, C_BALL);
    }

    if let Some(b) = state.batted.as_ref().filter(|b| b.active) {
        let radius = BALL_RADIUS * depth_scale(b.depth, 1.6, 0.3).max(0.2);
        surface.fill_circle(b.body.pos, radius, C_BALL);
    }

    // Batter and bat
    let bp = state.batter.pos;
    surface.fill_circle(Vec2::new(bp.x + 40.0, bp.y - 50.0), 10.0, Rgba::rgb(255, 220, 180));
    surface.fill_rect(Rect::new(bp.x + 30.0, bp.y - 40.0, 20.0, 45.0), Rgba::rgb(30, 60, 160));
    let swing = if state.batter.swinging {
        state.batter.swing_frame as f32 / t.swing_frames.max(1) as f32
    } else {
        0.0
    };
    let angle = -1.2 + swing * 2.6;
    let grip = Vec2::new(bp.x + 35.0, bp.y - 30.0);
    surface.line(
        grip,
        Vec2::new(grip.x - angle.cos() * 50.0, grip.y - angle.sin() * 50.0),
        Rgba::rgb(200, 150, 90),
    );

    // Meet cursor
    let c = state.cursor;
    surface.stroke_rect(Rect::new(c.x - 12.0, c.y - 12.0, 24.0, 24.0), C_CURSOR);
    surface.line(Vec2::new(c.x - 16.0, c.y), Vec2::new(c.x + 16.0, c.y), C_CURSOR);
    surface.line(Vec2::new(c.x, c.y - 16.0), Vec2::new(c.x, c.y + 16.0), C_CURSOR);

    if let Some(banner) = &state.pitch_banner {
        surface.text(
            Vec2::new(t.width / 2.0, 90.0),
            &banner.text,
            TextStyle::new(banner.color.with_alpha(banner.alpha(30)), 16.0).bold(),
        );
    }
    if let Some(result) = &state.result {
        draw_result(surface, result, Vec2::new(t.width / 2.0, 200.0));
    }

    if state.phase == SessionPhase::GameOver {
        draw_game_over(
            surface,
            size,
            "Game set!",
            &format!("{} runs", state.runs.score()),
            rank,
        );
    }

    surface.present()
}

fn draw_field(surface: &mut dyn Surface, t: &BattingTuning) {
    surface.fill_rect(Rect::new(0.0, 140.0, t.width, t.height - 140.0), C_GRASS);
    surface.fill_circle(t.release_point.into(), 30.0, C_DIRT);
    let plate: Vec2 = t.vanishing_point.into();
    surface.fill_rect(Rect::new(plate.x - 60.0, plate.y + 40.0, 120.0, 40.0), C_DIRT);
    surface.stroke_rect(t.strike_zone, C_ZONE.with_alpha(0.5));
}

fn draw_scoreboard(surface: &mut dyn Surface, state: &BattingState, t: &BattingTuning) {
    draw_hud(
        surface,
        Vec2::new(10.0, 20.0),
        &format!("Inning {}/{}", state.inning, t.innings),
        Rgba::WHITE,
    );
    draw_hud(
        surface,
        Vec2::new(10.0, 40.0),
        &format!("Runs: {}", state.runs.score()),
        Rgba::YELLOW,
    );
    let empty = t.outs_per_inning.saturating_sub(state.outs) as usize;
    let outs = "●".repeat(state.outs as usize) + &"○".repeat(empty);
    draw_hud(surface, Vec2::new(10.0, 60.0), &format!("Out {}", outs), Rgba::RED);
    if t.count_rules {
        draw_hud(
            surface,
            Vec2::new(10.0, 80.0),
            &format!("B {}  S {}", state.balls, state.strikes),
            Rgba::GREEN,
        );
    }

    // Base diamond, top-right
    let centre = Vec2::new(t.width - 50.0, 50.0);
    let spots = [
        Vec2::new(centre.x + 20.0, centre.y),
        Vec2::new(centre.x, centre.y - 20.0),
        Vec2::new(centre.x - 20.0, centre.y),
    ];
    for (spot, occupied) in spots.iter().zip(state.bases) {
        let color = if occupied { C_BASE_RUNNER } else { C_BASE_EMPTY };
        surface.fill_rect(Rect::new(spot.x - 6.0, spot.y - 6.0, 12.0, 12.0), color);
    }
}
