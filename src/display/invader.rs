use crate::entities::{Rect, Rgba, SessionPhase, Vec2};
use crate::error::Result;
use crate::games::invader::{BulletOwner, Enemy, InvaderState};

use super::{draw_game_over, draw_hud, Surface, TextStyle};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Rgba = Rgba::rgb(0, 0, 0);
const C_PLAYER: Rgba = Rgba::GREEN;
const C_BULLET_PLAYER: Rgba = Rgba::YELLOW;
const C_BULLET_ENEMY: Rgba = Rgba::RED;
const C_ROWS: [Rgba; 3] = [Rgba::MAGENTA, Rgba::CYAN, Rgba::ORANGE];

/// Render one complete frame.
pub fn render(surface: &mut dyn Surface, state: &InvaderState, rank: &str) -> Result<()> {
    let size = Vec2::new(state.width, state.height);
    surface.begin_frame(size, C_BACKGROUND)?;

    for enemy in state.enemies.iter().filter(|e| e.alive) {
        draw_enemy(surface, enemy);
    }
    for bullet in state.bullets.iter().filter(|b| b.alive) {
        let color = match bullet.owner {
            BulletOwner::Player => C_BULLET_PLAYER,
            BulletOwner::Enemy => C_BULLET_ENEMY,
        };
        surface.fill_rect(bullet.rect, color);
    }
    draw_player(surface, state.player);

    draw_hud(
        surface,
        Vec2::new(10.0, 20.0),
        &format!("Score: {}", state.score.score()),
        Rgba::WHITE,
    );
    surface.text(
        Vec2::new(state.width - 10.0, 20.0),
        &format!("Lives: {}", "♥".repeat(state.lives.remaining() as usize)),
        TextStyle::new(Rgba::RED, 16.0).right().bold(),
    );

    if state.phase == SessionPhase::GameOver {
        let headline = if state.alive_enemies() == 0 {
            "Formation cleared!"
        } else {
            "Game over"
        };
        draw_game_over(
            surface,
            size,
            headline,
            &format!("{} pts", state.score.score()),
            rank,
        );
    }

    surface.present()
}

fn draw_enemy(surface: &mut dyn Surface, enemy: &Enemy) {
    let color = C_ROWS[enemy.row % C_ROWS.len()];
    let r = enemy.rect;
    surface.fill_rect(r, color);
    // Eyes
    let eye = Rgba::BLACK;
    surface.fill_rect(Rect::new(r.x + r.w * 0.2, r.y + r.h * 0.3, 4.0, 4.0), eye);
    surface.fill_rect(Rect::new(r.right() - r.w * 0.2 - 4.0, r.y + r.h * 0.3, 4.0, 4.0), eye);
}

fn draw_player(surface: &mut dyn Surface, player: Rect) {
    surface.fill_rect(
        Rect::new(player.x, player.y + player.h / 2.0, player.w, player.h / 2.0),
        C_PLAYER,
    );
    // Turret
    surface.fill_rect(
        Rect::new(player.x + player.w / 2.0 - 4.0, player.y, 8.0, player.h / 2.0),
        C_PLAYER,
    );
}
