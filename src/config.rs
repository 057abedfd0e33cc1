//! Game tunables.
//!
//! Defaults reproduce the classic 1000×600 field. A JSON file named by
//! `BALLOON_SHOOTER_CONFIG` may override any subset of them.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clock::frame_period;

/// Environment variable holding the optional config file path.
pub const CONFIG_ENV: &str = "BALLOON_SHOOTER_CONFIG";

// ── Defaults ──────────────────────────────────────────────────────────────────

pub const FIELD_WIDTH: i32 = 1000;
pub const FIELD_HEIGHT: i32 = 600;
pub const WALL_THICKNESS: i32 = 5;
/// Largest accepted field side; keeps all derived coordinates inside `i32`.
pub const MAX_FIELD_EXTENT: i32 = 1 << 20;

pub const FRAME_RATE: u32 = 60;
pub const RELOAD_MS: u64 = 250;

pub const PLAYER_X: i32 = 400;
pub const PLAYER_RADIUS: i32 = 60;
pub const PLAYER_SPEED: i32 = 10;
pub const CANNON_WIDTH: i32 = 100;
pub const CANNON_HEIGHT: i32 = 20;

pub const BALLOON_X: i32 = -400;
pub const BALLOON_RADIUS: i32 = 40;
pub const BALLOON_SPEED: i32 = 5;
pub const BALLOON_MOVE_FRAMES: u32 = 10;

pub const BULLET_RADIUS: i32 = 20;
/// Bullet speed as a multiple of the balloon speed.
pub const BULLET_SPEED_FACTOR: i32 = 10;

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "config read error: {err}"),
            ConfigError::Parse(err) => write!(f, "config parse error: {err}"),
            ConfigError::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

// ── Sections ──────────────────────────────────────────────────────────────────

/// Play-field extents, centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Field {
    pub width: i32,
    pub height: i32,
    /// Drawn border thickness; has no effect on the simulation.
    pub wall_thickness: i32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            wall_thickness: WALL_THICKNESS,
        }
    }
}

impl Field {
    pub fn half_width(&self) -> i32 {
        self.width / 2
    }

    pub fn half_height(&self) -> i32 {
        self.height / 2
    }

    /// True if a circle of `radius` centred at height `y` lies inside the
    /// vertical bounds (touching a wall is allowed).
    pub fn fits_vertically(&self, y: i32, radius: i32) -> bool {
        y + radius <= self.half_height() && y - radius >= -self.half_height()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub x: i32,
    pub radius: i32,
    pub speed: i32,
    pub cannon_width: i32,
    pub cannon_height: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            x: PLAYER_X,
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            cannon_width: CANNON_WIDTH,
            cannon_height: CANNON_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalloonConfig {
    pub x: i32,
    pub radius: i32,
    pub speed: i32,
    /// Frames the balloon commits to a rolled direction.
    pub move_frames: u32,
}

impl Default for BalloonConfig {
    fn default() -> Self {
        Self {
            x: BALLOON_X,
            radius: BALLOON_RADIUS,
            speed: BALLOON_SPEED,
            move_frames: BALLOON_MOVE_FRAMES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub radius: i32,
    pub speed_factor: i32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            radius: BULLET_RADIUS,
            speed_factor: BULLET_SPEED_FACTOR,
        }
    }
}

// ── Top level ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field: Field,
    pub player: PlayerConfig,
    pub balloon: BalloonConfig,
    pub bullet: BulletConfig,
    pub frame_rate: u32,
    pub reload_ms: u64,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field: Field::default(),
            player: PlayerConfig::default(),
            balloon: BalloonConfig::default(),
            bullet: BulletConfig::default(),
            frame_rate: FRAME_RATE,
            reload_ms: RELOAD_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load from the file named by `BALLOON_SHOOTER_CONFIG`, or use defaults
    /// when the variable is unset.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let config = Self::from_path(Path::new(&path))?;
                log::info!("Loaded config from {}", Path::new(&path).display());
                Ok(config)
            }
            None => {
                log::info!("Using default config");
                Ok(Self::default())
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the simulation cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| -> Result<(), ConfigError> {
            Err(ConfigError::Invalid(reason))
        };

        if self.field.width <= 0 || self.field.height <= 0 {
            return invalid(format!(
                "field must be non-empty, got {}x{}",
                self.field.width, self.field.height
            ));
        }
        if self.field.width > MAX_FIELD_EXTENT || self.field.height > MAX_FIELD_EXTENT {
            return invalid(format!(
                "field sides are limited to {MAX_FIELD_EXTENT}, got {}x{}",
                self.field.width, self.field.height
            ));
        }
        if self.field.width % 2 != 0 || self.field.height % 2 != 0 {
            return invalid(format!(
                "field dimensions must be even, got {}x{}",
                self.field.width, self.field.height
            ));
        }
        if self.frame_rate == 0 {
            return invalid("frame_rate must be positive".to_string());
        }

        let sizes = [
            ("player.radius", self.player.radius),
            ("player.speed", self.player.speed),
            ("player.cannon_width", self.player.cannon_width),
            ("player.cannon_height", self.player.cannon_height),
            ("balloon.radius", self.balloon.radius),
            ("balloon.speed", self.balloon.speed),
            ("bullet.radius", self.bullet.radius),
            ("bullet.speed_factor", self.bullet.speed_factor),
        ];
        for (name, value) in sizes {
            if value <= 0 {
                return invalid(format!("{name} must be positive, got {value}"));
            }
        }
        if self.balloon.move_frames == 0 {
            return invalid("balloon.move_frames must be positive".to_string());
        }

        // Both movers start at y = 0. A rejected player step is a no-op, so
        // one step of room is enough. The balloon is bounced off a wall
        // without a second check, so it needs a step of room on both sides.
        let height = self.field.height;
        let player_span = self
            .player
            .radius
            .checked_mul(2)
            .and_then(|d| d.checked_add(self.player.speed));
        if player_span.map_or(true, |span| span > height) {
            return invalid(format!(
                "player (radius {}, speed {}) does not fit a field of height {height}",
                self.player.radius, self.player.speed
            ));
        }
        let balloon_span = self
            .balloon
            .radius
            .checked_add(self.balloon.speed)
            .and_then(|d| d.checked_mul(2));
        if balloon_span.map_or(true, |span| span > height) {
            return invalid(format!(
                "balloon (radius {}, speed {}) does not fit a field of height {height}",
                self.balloon.radius, self.balloon.speed
            ));
        }
        if self.bullet.radius > height / 2 {
            return invalid(format!(
                "bullet.radius = {} does not fit a field of height {height}",
                self.bullet.radius
            ));
        }
        if self.player.cannon_width > self.field.width || self.player.cannon_height > height {
            return invalid("cannon is larger than the field".to_string());
        }
        let bullet_speed = self.balloon.speed.checked_mul(self.bullet.speed_factor);
        if bullet_speed.map_or(true, |speed| speed > self.field.width) {
            return invalid(format!(
                "bullet speed (balloon.speed {} x bullet.speed_factor {}) exceeds the field width",
                self.balloon.speed, self.bullet.speed_factor
            ));
        }

        let half_width = self.field.half_width();
        for (name, x) in [("player.x", self.player.x), ("balloon.x", self.balloon.x)] {
            if !(-half_width..=half_width).contains(&x) {
                return invalid(format!("{name} = {x} lies outside the field"));
            }
        }
        if self.balloon.x >= self.player.x {
            return invalid("balloon must sit left of the player".to_string());
        }

        Ok(())
    }

    /// Simulated time per tick.
    pub fn frame_period(&self) -> Duration {
        frame_period(self.frame_rate)
    }

    pub fn reload_delay(&self) -> Duration {
        Duration::from_millis(self.reload_ms)
    }

    pub fn bullet_speed(&self) -> i32 {
        self.balloon.speed.saturating_mul(self.bullet.speed_factor)
    }
}
