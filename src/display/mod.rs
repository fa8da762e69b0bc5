//! Rendering layer.
//!
//! Games draw onto a `Surface`, a minimal 2D contract in logical surface
//! coordinates. Each per-game `render` receives an immutable view of the
//! game state; no game logic is performed here, this module only
//! translates state into drawing commands.

pub mod batting;
pub mod celebration;
pub mod free_throw;
pub mod invader;
pub mod runner;
pub mod terminal;

use crate::entities::{Rect, ResultEvent, Rgba, Vec2};
use crate::error::Result;

// ── Surface contract ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub color: Rgba,
    /// Nominal font size in logical pixels.
    pub size: f32,
    pub align: Align,
    pub bold: bool,
}

impl TextStyle {
    pub fn new(color: Rgba, size: f32) -> Self {
        Self {
            color,
            size,
            align: Align::Center,
            bold: false,
        }
    }

    pub fn left(mut self) -> Self {
        self.align = Align::Left;
        self
    }

    pub fn right(mut self) -> Self {
        self.align = Align::Right;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// A 2D drawing surface of fixed logical size.
///
/// Primitive calls are buffered; only `begin_frame`, `present` and
/// `set_visible` touch the host and can fail.
pub trait Surface {
    fn begin_frame(&mut self, size: Vec2, background: Rgba) -> Result<()>;
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    fn stroke_rect(&mut self, rect: Rect, color: Rgba);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn line(&mut self, from: Vec2, to: Vec2, color: Rgba);
    fn text(&mut self, at: Vec2, text: &str, style: TextStyle);
    fn present(&mut self) -> Result<()>;
    fn set_visible(&mut self, visible: bool) -> Result<()>;
}

// ── Recording surface ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Begin { size: Vec2, background: Rgba },
    FillRect { rect: Rect, color: Rgba },
    StrokeRect { rect: Rect, color: Rgba },
    FillCircle { center: Vec2, radius: f32, color: Rgba },
    Line { from: Vec2, to: Vec2, color: Rgba },
    Text { at: Vec2, text: String, style: TextStyle },
}

/// Keeps every command of the current frame in memory. Used headless and in
/// tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    pub visible: bool,
    pub frames_presented: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// All text drawn this frame, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }
}

impl Surface for RecordingSurface {
    fn begin_frame(&mut self, size: Vec2, background: Rgba) -> Result<()> {
        self.commands.clear();
        self.commands.push(DrawCommand::Begin { size, background });
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::StrokeRect { rect, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::FillCircle { center, radius, color });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn text(&mut self, at: Vec2, text: &str, style: TextStyle) {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_string(),
            style,
        });
    }

    fn present(&mut self) -> Result<()> {
        self.frames_presented += 1;
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) -> Result<()> {
        self.visible = visible;
        Ok(())
    }
}

// ── Shared overlays ───────────────────────────────────────────────────────────

/// Frames over which a result popup fades out.
pub const RESULT_FADE: u32 = 20;

const C_OVERLAY: Rgba = Rgba {
    r: 0,
    g: 0,
    b: 0,
    a: 0.85,
};
const C_HINT: Rgba = Rgba::GREY;

/// Popup text centred at `at`, fading with its countdown.
pub fn draw_result(surface: &mut dyn Surface, event: &ResultEvent, at: Vec2) {
    let alpha = event.alpha(RESULT_FADE);
    let size = if event.big { 36.0 } else { 28.0 };
    surface.text(at, &event.text, TextStyle::new(event.color.with_alpha(alpha), size).bold());
}

/// One line of a tutorial screen: heading plus description.
pub struct TutorialRule<'a> {
    pub title: &'a str,
    pub desc: &'a str,
}

/// Full-screen "how to play" card with a start button.
pub fn draw_tutorial(
    surface: &mut dyn Surface,
    size: Vec2,
    title: &str,
    accent: Rgba,
    rules: &[TutorialRule<'_>],
    button: Rect,
) {
    surface.fill_rect(Rect::new(0.0, 0.0, size.x, size.y), C_OVERLAY);
    surface.text(
        Vec2::new(size.x / 2.0, 50.0),
        title,
        TextStyle::new(accent, 28.0).bold(),
    );
    surface.text(
        Vec2::new(size.x / 2.0, 80.0),
        "~ How to play ~",
        TextStyle::new(Rgba::WHITE, 16.0),
    );

    let mut y = 120.0;
    for (i, rule) in rules.iter().enumerate() {
        surface.text(
            Vec2::new(50.0, y),
            &format!("{}.", i + 1),
            TextStyle::new(accent, 20.0).left().bold(),
        );
        surface.text(
            Vec2::new(90.0, y),
            rule.title,
            TextStyle::new(Rgba::CYAN, 16.0).left().bold(),
        );
        surface.text(
            Vec2::new(90.0, y + 22.0),
            rule.desc,
            TextStyle::new(Rgba::WHITE, 14.0).left(),
        );
        y += 60.0;
    }

    surface.fill_rect(button, accent);
    surface.text(
        button.center(),
        "Start game!",
        TextStyle::new(Rgba::WHITE, 18.0).bold(),
    );
    surface.text(
        Vec2::new(size.x / 2.0, button.y - 12.0),
        "Space, click or tap to begin",
        TextStyle::new(C_HINT, 13.0),
    );
}

/// Final score and rank card.
pub fn draw_game_over(
    surface: &mut dyn Surface,
    size: Vec2,
    headline: &str,
    score_line: &str,
    rank: &str,
) {
    let card = Rect::new(size.x * 0.1, size.y * 0.3, size.x * 0.8, size.y * 0.4);
    surface.fill_rect(card, C_OVERLAY);
    surface.stroke_rect(card, Rgba::WHITE);

    let cx = size.x / 2.0;
    surface.text(
        Vec2::new(cx, card.y + 30.0),
        headline,
        TextStyle::new(Rgba::RED, 28.0).bold(),
    );
    surface.text(
        Vec2::new(cx, card.y + 70.0),
        score_line,
        TextStyle::new(Rgba::YELLOW, 22.0),
    );
    surface.text(
        Vec2::new(cx, card.y + 105.0),
        rank,
        TextStyle::new(Rgba::ORANGE, 18.0).bold(),
    );
    surface.text(
        Vec2::new(cx, card.bottom() - 15.0),
        "[R] Restart   [M] Menu   [Q] Quit",
        TextStyle::new(C_HINT, 12.0),
    );
}

/// Small corner readout.
pub fn draw_hud(surface: &mut dyn Surface, at: Vec2, text: &str, color: Rgba) {
    surface.text(at, text, TextStyle::new(color, 16.0).left().bold());
}
