use crate::entities::{Rect, Rgba, SessionPhase, Vec2};
use crate::error::Result;
use crate::games::runner::{ObstacleKind, RunnerState};
use crate::physics::sine_offset;

use super::{draw_game_over, draw_hud, Surface, TextStyle};

const C_BACKGROUND: Rgba = Rgba::rgb(10, 10, 26);
const C_BORDER: Rgba = Rgba::rgb(0, 255, 255);

/// Render one complete frame.
pub fn render(surface: &mut dyn Surface, state: &RunnerState, rank: &str) -> Result<()> {
    let size = Vec2::new(state.width, state.height);
    surface.begin_frame(size, C_BACKGROUND)?;

    // Screen shake is a pure function of the frame so rendering stays
    // side-effect free.
    let shake = Vec2::new(
        sine_offset(state.frame, 1.7, 0.0, state.shake),
        sine_offset(state.frame, 2.3, 1.0, state.shake),
    );
    let at = |p: Vec2| Vec2::new(p.x + shake.x, p.y + shake.y);

    for star in &state.stars {
        let twinkle = 0.5 + sine_offset(state.frame, 0.05, star.brightness * 10.0, 0.5);
        surface.fill_circle(at(star.pos), star.size, Rgba::WHITE.with_alpha(twinkle));
    }

    // Neon rails
    let glow = 0.6 + state.pulse.sin() * 0.3;
    surface.line(
        at(Vec2::new(0.0, 0.0)),
        at(Vec2::new(state.width, 0.0)),
        C_BORDER.with_alpha(glow),
    );
    surface.line(
        at(Vec2::new(0.0, state.height)),
        at(Vec2::new(state.width, state.height)),
        C_BORDER.with_alpha(glow),
    );

    for ob in state.obstacles.iter().filter(|o| o.alive) {
        let lightness = if ob.kind == ObstacleKind::Moving { 0.6 } else { 0.5 };
        let color = Rgba::hsl(ob.hue, 1.0, lightness);
        let r = ob.rect;
        let rect = Rect::new(r.x + shake.x, r.y + shake.y, r.w, r.h);
        surface.fill_rect(rect, color.with_alpha(0.7));
        surface.stroke_rect(rect, color);
    }

    for c in state.collectibles.iter().filter(|c| c.alive) {
        let color = Rgba::hsl(c.hue, 1.0, 0.6);
        surface.fill_circle(at(c.pos), c.radius, color.with_alpha(0.8));
        let spoke = Vec2::new(c.angle.cos() * c.radius, c.angle.sin() * c.radius);
        surface.line(
            at(Vec2::new(c.pos.x - spoke.x, c.pos.y - spoke.y)),
            at(Vec2::new(c.pos.x + spoke.x, c.pos.y + spoke.y)),
            Rgba::WHITE,
        );
    }

    let trail_len = state.orb.trail.len().max(1) as f32;
    for (i, &(pos, hue)) in state.orb.trail.iter().enumerate() {
        let fade = 1.0 - i as f32 / trail_len;
        surface.fill_circle(
            at(pos),
            state.orb.radius * fade,
            Rgba::hsl(hue, 1.0, 0.5).with_alpha(fade * 0.5),
        );
    }

    for s in &state.sparks {
        surface.fill_circle(at(s.body.pos), 3.0, s.color.with_alpha(s.life));
    }

    let orb_color = Rgba::hsl(state.orb.hue, 1.0, 0.6);
    surface.fill_circle(at(state.orb.body.pos), state.orb.radius + 4.0, orb_color.with_alpha(0.3));
    surface.fill_circle(at(state.orb.body.pos), state.orb.radius, orb_color);
    // Arrow showing which way gravity pulls
    let tip = Vec2::new(
        state.orb.body.pos.x,
        state.orb.body.pos.y + state.orb.gravity_direction * state.orb.radius * 0.7,
    );
    surface.line(at(state.orb.body.pos), at(tip), Rgba::WHITE);

    draw_hud(
        surface,
        Vec2::new(10.0, 25.0),
        &format!("Score: {}", state.score.score()),
        Rgba::CYAN,
    );
    if state.score.combo() > 1 {
        draw_hud(
            surface,
            Vec2::new(10.0, 45.0),
            &format!("{} combo!", state.score.combo()),
            Rgba::MAGENTA,
        );
    }
    let clock = if state.time_left <= 10 { Rgba::RED } else { Rgba::WHITE };
    surface.text(
        Vec2::new(state.width - 10.0, 25.0),
        &format!("{}:{:02}", state.time_left / 60, state.time_left % 60),
        TextStyle::new(clock, 16.0).right().bold(),
    );

    if state.phase == SessionPhase::GameOver {
        let score_line = if state.end_bonus > 0 {
            format!("{} pts (combo bonus +{})", state.score.score(), state.end_bonus)
        } else {
            format!("{} pts", state.score.score())
        };
        draw_game_over(surface, size, "Time up!", &score_line, rank);
    }

    surface.present()
}
