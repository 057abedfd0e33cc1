//! All game entity types — pure data, no logic.
//!
//! Coordinates are field units on a plane centred at the origin with `y`
//! pointing up.

use std::time::Duration;

use crate::config::GameConfig;

pub use crate::config::Field;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Reload gate for the cannon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FireState {
    Ready,
    /// Fire requests are ignored until simulated time reaches `ready_at`.
    Cooling { ready_at: Duration },
}

// ── Movers ────────────────────────────────────────────────────────────────────

/// The cannon. Moves vertically only; `x` is fixed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub radius: i32,
    /// Barrel extends this far to the left of the centre.
    pub cannon_width: i32,
    pub cannon_height: i32,
    pub speed: i32,
    /// -1, 0 or 1, latched from the held move key.
    pub direction: i32,
}

/// The target. Drifts up and down in bursts, bouncing off the walls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Balloon {
    pub x: i32,
    pub y: i32,
    pub radius: i32,
    pub speed: i32,
    /// -1 or 1 once the first burst has been rolled.
    pub direction: i32,
    pub move_frames_remaining: u32,
    pub move_frames_default: u32,
}

/// A cannon ball. Travels left at constant speed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
    pub radius: i32,
    pub speed: i32,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Input sampled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    /// -1 (down), 0 or 1 (up).
    pub direction: i32,
    pub firing: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state. Cloneable so pure update functions can return a
/// new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub player: Player,
    pub balloon: Balloon,
    /// Live bullets in firing order.
    pub bullets: Vec<Bullet>,
    pub shots_missed: u32,
    pub fire: FireState,
    pub trigger_held: bool,
    pub status: GameStatus,
    pub frame: u64,
    /// Simulated time, advanced by one frame period per tick.
    pub elapsed: Duration,
}

impl GameState {
    pub fn field(&self) -> &Field {
        &self.config.field
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}
