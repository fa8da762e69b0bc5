//! Terminal back-end: rasterises logical drawing commands into a character
//! cell grid and flushes it with crossterm.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::entities::{Rect, Rgba, Vec2};
use crate::error::{GameError, Result};

use super::{Align, Surface, TextStyle};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    fg: Rgba,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        fg: Rgba::WHITE,
    };
}

/// Shade glyph for a fill of the given opacity.
fn shade(alpha: f32) -> Option<char> {
    match alpha {
        a if a >= 0.75 => Some('█'),
        a if a >= 0.45 => Some('▓'),
        a if a >= 0.2 => Some('░'),
        _ => None,
    }
}

fn to_color(c: Rgba, background: Rgba) -> Color {
    let mix = |fg: u8, bg: u8| (fg as f32 * c.a + bg as f32 * (1.0 - c.a)).round() as u8;
    Color::Rgb {
        r: mix(c.r, background.r),
        g: mix(c.g, background.g),
        b: mix(c.b, background.b),
    }
}

pub struct TerminalSurface<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    logical: Vec2,
    background: Rgba,
    cells: Vec<Cell>,
    visible: bool,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Result<Self> {
        if cols == 0 || rows == 0 {
            return Err(GameError::SurfaceUnavailable(format!(
                "terminal is {}x{}",
                cols, rows
            )));
        }
        Ok(Self {
            out,
            cols,
            rows,
            logical: Vec2::new(cols as f32, rows as f32),
            background: Rgba::BLACK,
            cells: vec![Cell::BLANK; cols as usize * rows as usize],
            visible: false,
        })
    }

    pub fn resize(&mut self, cols: u16, rows: u16) -> Result<()> {
        if cols == 0 || rows == 0 {
            return Err(GameError::SurfaceUnavailable("terminal collapsed to zero size".into()));
        }
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![Cell::BLANK; cols as usize * rows as usize];
        Ok(())
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    /// Map a terminal cell back to the logical surface (cell centre).
    pub fn to_logical(&self, col: u16, row: u16) -> Vec2 {
        Vec2::new(
            (col as f32 + 0.5) * self.logical.x / self.cols as f32,
            (row as f32 + 0.5) * self.logical.y / self.rows as f32,
        )
    }

    fn to_cell(&self, p: Vec2) -> (i32, i32) {
        (
            (p.x * self.cols as f32 / self.logical.x).floor() as i32,
            (p.y * self.rows as f32 / self.logical.y).floor() as i32,
        )
    }

    fn put(&mut self, col: i32, row: i32, ch: char, fg: Rgba) {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return;
        }
        let idx = row as usize * self.cols as usize + col as usize;
        self.cells[idx] = Cell { ch, fg };
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn begin_frame(&mut self, size: Vec2, background: Rgba) -> Result<()> {
        if size.x <= 0.0 || size.y <= 0.0 {
            return Err(GameError::SurfaceUnavailable("empty logical surface".into()));
        }
        self.logical = size;
        self.background = background;
        self.cells.fill(Cell::BLANK);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let Some(ch) = shade(color.a) else { return };
        let (c0, r0) = self.to_cell(Vec2::new(rect.x, rect.y));
        let (c1, r1) = self.to_cell(Vec2::new(rect.right(), rect.bottom()));
        for row in r0..=r1.max(r0) {
            for col in c0..=c1.max(c0) {
                self.put(col, row, ch, color.with_alpha(1.0));
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba) {
        let (c0, r0) = self.to_cell(Vec2::new(rect.x, rect.y));
        let (c1, r1) = self.to_cell(Vec2::new(rect.right(), rect.bottom()));
        for col in c0..=c1 {
            self.put(col, r0, '─', color);
            self.put(col, r1, '─', color);
        }
        for row in r0..=r1 {
            self.put(c0, row, '│', color);
            self.put(c1, row, '│', color);
        }
        self.put(c0, r0, '┌', color);
        self.put(c1, r0, '┐', color);
        self.put(c0, r1, '└', color);
        self.put(c1, r1, '┘', color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        let Some(ch) = shade(color.a) else { return };
        let (c0, r0) = self.to_cell(Vec2::new(center.x - radius, center.y - radius));
        let (c1, r1) = self.to_cell(Vec2::new(center.x + radius, center.y + radius));
        let mut drawn = false;
        for row in r0..=r1 {
            for col in c0..=c1 {
                let p = self.to_logical(col.max(0) as u16, row.max(0) as u16);
                if p.distance(center) <= radius {
                    self.put(col, row, ch, color.with_alpha(1.0));
                    drawn = true;
                }
            }
        }
        // Sub-cell circles still show up as a dot.
        if !drawn {
            let (col, row) = self.to_cell(center);
            self.put(col, row, '•', color.with_alpha(1.0));
        }
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Rgba) {
        let (c0, r0) = self.to_cell(from);
        let (c1, r1) = self.to_cell(to);
        let steps = (c1 - c0).abs().max((r1 - r0).abs()).max(1);
        let ch = if r0 == r1 {
            '─'
        } else if c0 == c1 {
            '│'
        } else if (c1 - c0).signum() == (r1 - r0).signum() {
            '╲'
        } else {
            '╱'
        };
        for i in 0..=steps {
            let f = i as f32 / steps as f32;
            let col = c0 as f32 + (c1 - c0) as f32 * f;
            let row = r0 as f32 + (r1 - r0) as f32 * f;
            self.put(col.round() as i32, row.round() as i32, ch, color);
        }
    }

    fn text(&mut self, at: Vec2, text: &str, style: TextStyle) {
        if style.color.a < 0.2 {
            return;
        }
        let (col, row) = self.to_cell(at);
        let len = text.chars().count() as i32;
        let start = match style.align {
            Align::Left => col,
            Align::Center => col - len / 2,
            Align::Right => col - len,
        };
        for (i, ch) in text.chars().enumerate() {
            self.put(start + i as i32, row, ch, style.color);
        }
    }

    fn present(&mut self) -> Result<()> {
        if !self.visible {
            return Ok(());
        }
        let bg = to_color(self.background, Rgba::BLACK);
        self.out.queue(style::SetBackgroundColor(bg))?;
        for row in 0..self.rows {
            self.out.queue(cursor::MoveTo(0, row))?;
            let mut current: Option<Rgba> = None;
            for col in 0..self.cols {
                let cell = self.cells[row as usize * self.cols as usize + col as usize];
                if current != Some(cell.fg) {
                    self.out
                        .queue(style::SetForegroundColor(to_color(cell.fg, self.background)))?;
                    current = Some(cell.fg);
                }
                self.out.queue(Print(cell.ch))?;
            }
        }
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()?;
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) -> Result<()> {
        self.visible = visible;
        if !visible {
            self.out.queue(style::ResetColor)?;
            self.out.queue(terminal::Clear(terminal::ClearType::All))?;
            self.out.flush()?;
        }
        Ok(())
    }
}
