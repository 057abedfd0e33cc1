//! Rendering layer — all terminal output lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state. No game logic is performed; this module only translates
//! field coordinates into terminal cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::{Balloon, Bullet, Field, GameState, Player};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_WALL: Color = Color::DarkBlue;
const C_HUD: Color = Color::Yellow;
const C_TITLE: Color = Color::Cyan;
const C_PLAYER: Color = Color::DarkYellow; // orange body
const C_CANNON: Color = Color::Grey;
const C_BALLOON: Color = Color::Green;
const C_BULLET: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

const FILL: &str = "█";
const BULLET: &str = "●";

/// Smallest terminal the field can be drawn into.
pub const MIN_COLS: u16 = 20;
pub const MIN_ROWS: u16 = 10;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps the centred field (y up) onto terminal cells (row 0 at the top).
///
/// Row 0 holds the HUD and the last row the controls hint; the wall is drawn
/// one cell inside those, and the field fills the interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    pub fn from_terminal() -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self::new(cols, rows))
    }

    pub fn is_usable(&self) -> bool {
        self.cols >= MIN_COLS && self.rows >= MIN_ROWS
    }

    fn wall_top(&self) -> u16 {
        1
    }

    fn wall_bottom(&self) -> u16 {
        self.rows.saturating_sub(2)
    }

    fn inner_left(&self) -> u16 {
        1
    }

    fn inner_right(&self) -> u16 {
        self.cols.saturating_sub(2)
    }

    fn inner_top(&self) -> u16 {
        self.wall_top() + 1
    }

    fn inner_bottom(&self) -> u16 {
        self.wall_bottom().saturating_sub(1)
    }

    fn inner_span(lo: u16, hi: u16) -> f32 {
        hi.saturating_sub(lo) as f32
    }

    /// Terminal column for field `x`, clamped to the interior.
    pub fn col(&self, field: &Field, x: i32) -> u16 {
        let t = (x + field.half_width()) as f32 / field.width as f32;
        let span = Self::inner_span(self.inner_left(), self.inner_right());
        let col = self.inner_left() as f32 + (t * span).round();
        col.clamp(self.inner_left() as f32, self.inner_right() as f32) as u16
    }

    /// Terminal row for field `y`, clamped to the interior.
    pub fn row(&self, field: &Field, y: i32) -> u16 {
        let t = (field.half_height() - y) as f32 / field.height as f32;
        let span = Self::inner_span(self.inner_top(), self.inner_bottom());
        let row = self.inner_top() as f32 + (t * span).round();
        row.clamp(self.inner_top() as f32, self.inner_bottom() as f32) as u16
    }

    /// Field coordinates of a cell's centre.
    pub fn cell_center(&self, field: &Field, col: u16, row: u16) -> (f32, f32) {
        let x_span = Self::inner_span(self.inner_left(), self.inner_right()).max(1.0);
        let y_span = Self::inner_span(self.inner_top(), self.inner_bottom()).max(1.0);
        let x = (col as f32 - self.inner_left() as f32) / x_span * field.width as f32
            - field.half_width() as f32;
        let y = field.half_height() as f32
            - (row as f32 - self.inner_top() as f32) / y_span * field.height as f32;
        (x, y)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    if !view.is_usable() {
        out.queue(cursor::MoveTo(0, 0))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(format!("Terminal too small ({}x{})", view.cols, view.rows)))?;
        out.queue(style::ResetColor)?;
        out.flush()?;
        return Ok(());
    }

    draw_wall(out, view)?;
    draw_balloon(out, &state.balloon, state.field(), view)?;
    draw_player(out, &state.player, state.field(), view)?;
    for bullet in &state.bullets {
        draw_bullet(out, bullet, state.field(), view)?;
    }
    draw_hud(out, state, view)?;
    draw_controls_hint(out, view)?;

    if state.is_over() {
        draw_game_over(out, state, view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Wall ──────────────────────────────────────────────────────────────────────

fn draw_wall<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let top = view.wall_top();
    let bottom = view.wall_bottom();

    out.queue(style::SetForegroundColor(C_WALL))?;

    out.queue(cursor::MoveTo(0, top))?;
    out.queue(Print(format!("┏{}┓", "━".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("┗{}┛", "━".repeat(w.saturating_sub(2)))))?;

    for row in top + 1..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("┃"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("┃"))?;
    }

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Fill every cell whose centre lies inside the circle. The centre cell is
/// always drawn so small circles never vanish at low resolution.
fn draw_disc<W: Write>(
    out: &mut W,
    field: &Field,
    view: &Viewport,
    (x, y, radius): (i32, i32, i32),
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;

    let r2 = (radius as f32).powi(2);
    for row in view.row(field, y + radius)..=view.row(field, y - radius) {
        for col in view.col(field, x - radius)..=view.col(field, x + radius) {
            let (cx, cy) = view.cell_center(field, col, row);
            let dx = cx - x as f32;
            let dy = cy - y as f32;
            if dx * dx + dy * dy <= r2 {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print(glyph))?;
            }
        }
    }

    out.queue(cursor::MoveTo(view.col(field, x), view.row(field, y)))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_player<W: Write>(
    out: &mut W,
    player: &Player,
    field: &Field,
    view: &Viewport,
) -> std::io::Result<()> {
    draw_disc(out, field, view, (player.x, player.y, player.radius), FILL, C_PLAYER)?;

    // Barrel: a rectangle running left from the centre, drawn over the body.
    let half = player.cannon_height / 2;
    let left = view.col(field, player.x - player.cannon_width);
    let right = view.col(field, player.x);
    out.queue(style::SetForegroundColor(C_CANNON))?;
    for row in view.row(field, player.y + half)..=view.row(field, player.y - half) {
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(Print("▬".repeat((right - left + 1) as usize)))?;
    }
    Ok(())
}

fn draw_balloon<W: Write>(
    out: &mut W,
    balloon: &Balloon,
    field: &Field,
    view: &Viewport,
) -> std::io::Result<()> {
    draw_disc(out, field, view, (balloon.x, balloon.y, balloon.radius), FILL, C_BALLOON)
}

fn draw_bullet<W: Write>(
    out: &mut W,
    bullet: &Bullet,
    field: &Field,
    view: &Viewport,
) -> std::io::Result<()> {
    draw_disc(out, field, view, (bullet.x, bullet.y, bullet.radius), BULLET, C_BULLET)
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!("Shots missed: {}", state.shots_missed)))?;

    let title = "BALLOON SHOOTER";
    let tx = (view.cols / 2).saturating_sub(title.len() as u16 / 2);
    out.queue(cursor::MoveTo(tx, 0))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print(title))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("↑ ↓ / W S : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

pub fn game_over_text(shots_missed: u32) -> String {
    format!("Well Done! You missed {shots_missed} shots")
}

fn draw_game_over<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let message = game_over_text(state.shots_missed);
    let bar = "═".repeat(message.chars().count() + 2);
    let top = format!("╔{bar}╗");
    let middle = format!("║ {message} ║");
    let bottom = format!("╚{bar}╝");
    let lines: &[(&str, Color)] = &[
        (&top, Color::Yellow),
        (&middle, Color::Yellow),
        (&bottom, Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::init_state;
    use crate::config::GameConfig;
    use crate::entities::GameStatus;

    fn rendered(state: &GameState, view: &Viewport) -> String {
        let mut buf: Vec<u8> = Vec::new();
        render(&mut buf, state, view).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn field_corners_map_to_interior_corners() {
        let field = Field::default();
        let view = Viewport::new(80, 24);
        assert_eq!(view.col(&field, -500), 1);
        assert_eq!(view.col(&field, 500), 78);
        assert_eq!(view.row(&field, 300), 2);
        assert_eq!(view.row(&field, -300), 21);
    }

    #[test]
    fn positions_outside_field_are_clamped() {
        let field = Field::default();
        let view = Viewport::new(80, 24);
        assert_eq!(view.col(&field, -900), 1);
        assert_eq!(view.row(&field, 900), 2);
    }

    #[test]
    fn cell_center_inverts_mapping() {
        let field = Field::default();
        let view = Viewport::new(80, 24);
        let (x, y) = view.cell_center(&field, view.col(&field, 0), view.row(&field, 0));
        assert!(x.abs() < 10.0, "x = {x}");
        assert!(y.abs() < 20.0, "y = {y}");
    }

    #[test]
    fn hud_reports_misses() {
        let mut state = init_state(GameConfig::default());
        state.shots_missed = 4;
        let out = rendered(&state, &Viewport::new(80, 24));
        assert!(out.contains("Shots missed: 4"));
        assert!(!out.contains("Well Done!"));
    }

    #[test]
    fn game_over_shows_summary() {
        let mut state = init_state(GameConfig::default());
        state.shots_missed = 3;
        state.status = GameStatus::GameOver;
        let out = rendered(&state, &Viewport::new(80, 24));
        assert!(out.contains("Well Done! You missed 3 shots"));
    }

    #[test]
    fn tiny_terminal_gets_a_notice() {
        let state = init_state(GameConfig::default());
        let out = rendered(&state, &Viewport::new(10, 5));
        assert!(out.contains("Terminal too small"));
    }
}
