//! Balloon Shooter: move the cannon, pop the balloon.
//!
//! - `entities`: pure game data
//! - `collision`: bounding-box geometry
//! - `compute`: motion rules, fire gate and the per-frame tick
//! - `input`: latched key state sampled once per tick
//! - `clock`: fixed-period frame scheduling
//! - `config`: tunables loaded from JSON
//! - `display`: crossterm render adapter

pub mod clock;
pub mod collision;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod input;

pub use config::GameConfig;
pub use entities::{GameState, GameStatus, TickInput};
