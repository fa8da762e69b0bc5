use crate::config::FreeThrowTuning;
use crate::entities::{Rect, Rgba, SessionPhase, Vec2};
use crate::error::Result;
use crate::games::free_throw::{FreeThrowState, ShotPhase};

use super::{draw_game_over, draw_hud, draw_result, draw_tutorial, Surface, TextStyle, TutorialRule};

const C_GYM: Rgba = Rgba::rgb(44, 24, 16);
const C_FLOOR: Rgba = Rgba::rgb(139, 90, 43);
const C_FLOOR_SEAM: Rgba = Rgba::rgb(107, 68, 35);
const C_BOARD: Rgba = Rgba {
    r: 255,
    g: 255,
    b: 255,
    a: 0.9,
};
const C_RIM: Rgba = Rgba::RED;
const C_BALL: Rgba = Rgba::rgb(255, 102, 0);
const C_ACCENT: Rgba = Rgba::ORANGE;

const GAUGE: Rect = Rect::new(430.0, 100.0, 30.0, 200.0);

/// Render one complete frame.
pub fn render(
    surface: &mut dyn Surface,
    state: &FreeThrowState,
    t: &FreeThrowTuning,
    rank: &str,
) -> Result<()> {
    let size = Vec2::new(t.width, t.height);
    surface.begin_frame(size, C_GYM)?;

    if state.phase == SessionPhase::Tutorial {
        draw_tutorial(
            surface,
            size,
            "Free Throw",
            C_ACCENT,
            &[
                TutorialRule {
                    title: "Pick the angle",
                    desc: "Space or click stops the swinging arrow",
                },
                TutorialRule {
                    title: "Pick the power",
                    desc: "Press again to stop the gauge and shoot",
                },
                TutorialRule {
                    title: "Score",
                    desc: "Swish 3, clean make 2, off the rim 1",
                },
            ],
            t.start_button,
        );
        return surface.present();
    }

    // Floor
    surface.fill_rect(Rect::new(0.0, 380.0, t.width, t.height - 380.0), C_FLOOR);
    let mut x = 0.0;
    while x < t.width {
        surface.line(Vec2::new(x, 380.0), Vec2::new(x, t.height), C_FLOOR_SEAM);
        x += 50.0;
    }

    // Backboard, rim, net
    let board = Rect::new(t.hoop_x - 60.0, 50.0, 120.0, 80.0);
    surface.fill_rect(board, C_BOARD);
    surface.stroke_rect(Rect::new(t.hoop_x - 30.0, 70.0, 60.0, 45.0), C_RIM);
    let left = state.hoop_left(t);
    let right = state.hoop_right(t);
    surface.line(Vec2::new(left, t.rim_y), Vec2::new(right, t.rim_y), C_RIM);
    for i in 0..=8 {
        let nx = left + t.hoop_width / 8.0 * i as f32;
        surface.line(
            Vec2::new(nx, t.rim_y),
            Vec2::new(t.hoop_x, t.rim_y + t.net_height),
            Rgba::WHITE,
        );
    }

    // Aim arrow
    if matches!(state.shot, ShotPhase::AngleSelect | ShotPhase::PowerSelect) {
        let origin = state.ball.body.pos;
        let rad = state.angle.value.to_radians();
        let tip = Vec2::new(origin.x + rad.cos() * 80.0, origin.y - rad.sin() * 80.0);
        surface.line(origin, tip, C_ACCENT);
    }

    let ball = &state.ball;
    surface.fill_circle(
        Vec2::new(ball.body.pos.x, 395.0),
        ball.radius * 0.5,
        Rgba::BLACK.with_alpha(0.3),
    );
    surface.fill_circle(ball.body.pos, ball.radius, C_BALL);
    surface.line(
        Vec2::new(ball.body.pos.x - ball.radius, ball.body.pos.y),
        Vec2::new(ball.body.pos.x + ball.radius, ball.body.pos.y),
        Rgba::BLACK,
    );

    for s in &state.sparks {
        surface.fill_circle(s.body.pos, 4.0, s.color.with_alpha(s.life));
    }

    draw_gauges(surface, state);

    draw_hud(
        surface,
        Vec2::new(20.0, 80.0),
        &format!("Score: {}  Shots: {}", state.score.score(), state.shots.remaining()),
        Rgba::WHITE,
    );

    if let Some(result) = &state.result {
        draw_result(surface, result, Vec2::new(t.width / 2.0, 220.0));
    }

    let hint = match state.shot {
        ShotPhase::AngleSelect => Some("Space / click to lock the angle"),
        ShotPhase::PowerSelect => Some("Space / click to shoot"),
        _ => None,
    };
    if let Some(hint) = hint {
        surface.text(Vec2::new(t.width / 2.0, 430.0), hint, TextStyle::new(Rgba::GREY, 12.0));
    }

    if state.phase == SessionPhase::GameOver {
        draw_game_over(
            surface,
            size,
            "Final buzzer!",
            &format!("{} pts", state.score.score()),
            rank,
        );
    }

    surface.present()
}

fn draw_gauges(surface: &mut dyn Surface, state: &FreeThrowState) {
    surface.fill_rect(GAUGE, Rgba::BLACK.with_alpha(0.5));
    let filled = state.power.fraction() * GAUGE.h;
    let color = if state.power.fraction() > 0.66 {
        Rgba::RED
    } else if state.power.fraction() > 0.33 {
        Rgba::YELLOW
    } else {
        Rgba::GREEN
    };
    surface.fill_rect(Rect::new(GAUGE.x, GAUGE.bottom() - filled, GAUGE.w, filled), color);
    surface.stroke_rect(GAUGE, Rgba::WHITE);
    surface.text(
        Vec2::new(GAUGE.center().x, GAUGE.bottom() + 20.0),
        "POWER",
        TextStyle::new(Rgba::WHITE, 12.0).bold(),
    );

    surface.text(
        Vec2::new(20.0, 30.0),
        &format!("Angle: {}°", state.angle.value.round() as i32),
        TextStyle::new(C_ACCENT, 16.0).left().bold(),
    );
    let (label, color) = match state.shot {
        ShotPhase::AngleSelect => ("> Set the angle!", C_ACCENT),
        ShotPhase::PowerSelect => ("> Set the power!", Rgba::GREEN),
        _ => ("", Rgba::WHITE),
    };
    if !label.is_empty() {
        surface.text(Vec2::new(20.0, 55.0), label, TextStyle::new(color, 14.0).left().bold());
    }
}
