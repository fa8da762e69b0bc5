use crate::celebration::{Celebration, CelebrationState, STAGE};
use crate::entities::{Rect, Rgba, Vec2};
use crate::error::Result;

use super::{Surface, TextStyle};

const C_BACKDROP: Rgba = Rgba::rgb(20, 16, 30);

pub fn render(surface: &mut dyn Surface, celebration: &Celebration) -> Result<()> {
    surface.begin_frame(STAGE, C_BACKDROP)?;

    for piece in &celebration.confetti {
        surface.fill_rect(
            Rect::new(piece.body.pos.x, piece.body.pos.y, 6.0, 4.0),
            piece.color.with_alpha(piece.life.max(0.3)),
        );
    }

    // Cat
    let c = Vec2::new(STAGE.x / 2.0, 170.0);
    surface.fill_circle(c, 40.0, Rgba::ORANGE);
    for side in [-1.0, 1.0] {
        surface.line(
            Vec2::new(c.x + side * 35.0, c.y - 20.0),
            Vec2::new(c.x + side * 25.0, c.y - 55.0),
            Rgba::ORANGE,
        );
    }
    surface.fill_circle(Vec2::new(c.x - 14.0, c.y - 8.0), 4.0, Rgba::BLACK);
    surface.fill_circle(Vec2::new(c.x + 14.0, c.y - 8.0), 4.0, Rgba::BLACK);

    surface.text(
        Vec2::new(STAGE.x / 2.0, 260.0),
        &celebration.message,
        TextStyle::new(Rgba::YELLOW, 24.0).bold(),
    );

    if celebration.state == CelebrationState::OfferingGames {
        surface.text(
            Vec2::new(STAGE.x / 2.0, 300.0),
            "Play a game?",
            TextStyle::new(Rgba::WHITE, 16.0),
        );
        for (i, kind) in celebration.offered_games().iter().enumerate() {
            surface.text(
                Vec2::new(STAGE.x / 2.0, 325.0 + i as f32 * 18.0),
                &format!("[{}] {}", i + 1, kind.title()),
                TextStyle::new(Rgba::CYAN, 14.0),
            );
        }
    }

    surface.present()
}
