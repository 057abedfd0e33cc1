//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current state
//! (and, where needed, an RNG handle) and returns a brand-new value. Side
//! effects are limited to the injected RNG and log output.

use rand::Rng;

use crate::collision::check_hit;
use crate::config::GameConfig;
use crate::entities::{
    Balloon, Bullet, Field, FireState, GameState, GameStatus, Player, TickInput,
};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the opening state: both movers centred vertically, no bullets.
pub fn init_state(config: GameConfig) -> GameState {
    let player = Player {
        x: config.player.x,
        y: 0,
        radius: config.player.radius,
        cannon_width: config.player.cannon_width,
        cannon_height: config.player.cannon_height,
        speed: config.player.speed,
        direction: 0,
    };
    // A zero countdown makes the first tick roll a direction.
    let balloon = Balloon {
        x: config.balloon.x,
        y: 0,
        radius: config.balloon.radius,
        speed: config.balloon.speed,
        direction: 1,
        move_frames_remaining: 0,
        move_frames_default: config.balloon.move_frames,
    };
    GameState {
        config,
        player,
        balloon,
        bullets: Vec::new(),
        shots_missed: 0,
        fire: FireState::Ready,
        trigger_held: false,
        status: GameStatus::Playing,
        frame: 0,
        elapsed: std::time::Duration::ZERO,
    }
}

/// A bullet leaving the cannon's centre.
pub fn spawn_bullet(player: &Player, config: &GameConfig) -> Bullet {
    Bullet {
        x: player.x,
        y: player.y,
        radius: config.bullet.radius,
        speed: config.bullet_speed(),
    }
}

// ── Motion rules ─────────────────────────────────────────────────────────────

/// Step the player along its latched direction. A step that would push the
/// cannon through a wall is dropped entirely.
pub fn move_player(player: &Player, field: &Field) -> Player {
    let new_y = player.y + player.direction * player.speed;
    if !field.fits_vertically(new_y, player.radius) {
        return player.clone();
    }
    Player {
        y: new_y,
        ..player.clone()
    }
}

/// Drift in bursts of `move_frames_default` ticks, re-rolling the direction
/// between bursts. A move that would cross a wall turns the balloon inward
/// and restarts the burst.
pub fn move_balloon(balloon: &Balloon, field: &Field, rng: &mut impl Rng) -> Balloon {
    let mut direction = balloon.direction;
    let mut remaining = balloon.move_frames_remaining;

    if remaining == 0 {
        remaining = balloon.move_frames_default;
        direction = if rng.gen_bool(0.5) { 1 } else { -1 };
    }
    remaining = remaining.saturating_sub(1);

    let half_height = field.half_height();
    let prospective = balloon.y + direction * balloon.speed;
    if prospective + balloon.radius > half_height {
        direction = -1;
        remaining = balloon.move_frames_default;
    } else if prospective - balloon.radius < -half_height {
        direction = 1;
        remaining = balloon.move_frames_default;
    }

    Balloon {
        y: balloon.y + direction * balloon.speed,
        direction,
        move_frames_remaining: remaining,
        ..balloon.clone()
    }
}

pub fn move_bullet(bullet: &Bullet) -> Bullet {
    Bullet {
        x: bullet.x - bullet.speed,
        ..bullet.clone()
    }
}

/// Past the left wall: the shot missed.
pub fn bullet_out_of_bounds(bullet: &Bullet, field: &Field) -> bool {
    bullet.x < -field.half_width()
}

// ── Fire gate ────────────────────────────────────────────────────────────────

/// Reopen an expired reload window, then fire if the trigger is held and
/// the cannon is ready. At most one bullet per call; requests while cooling
/// are dropped, not queued.
pub fn check_create_bullet(state: &GameState) -> GameState {
    let fire = match state.fire {
        FireState::Cooling { ready_at } if ready_at <= state.elapsed => FireState::Ready,
        other => other,
    };

    if fire != FireState::Ready || !state.trigger_held {
        return GameState {
            fire,
            ..state.clone()
        };
    }

    let bullet = spawn_bullet(&state.player, &state.config);
    log::debug!(
        "frame {}: fired from y={} ({} in flight)",
        state.frame,
        bullet.y,
        state.bullets.len() + 1
    );
    let mut bullets = state.bullets.clone();
    bullets.push(bullet);

    GameState {
        bullets,
        fire: FireState::Cooling {
            ready_at: state.elapsed + state.config.reload_delay(),
        },
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame. All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// A finished game is returned unchanged.
pub fn tick(state: &GameState, input: &TickInput, rng: &mut impl Rng) -> GameState {
    if state.is_over() {
        return state.clone();
    }

    let field = state.config.field;
    let frame = state.frame + 1;
    let elapsed = state.elapsed + state.config.frame_period();

    // ── 1. Player ────────────────────────────────────────────────────────────
    let player = move_player(
        &Player {
            direction: input.direction.signum(),
            ..state.player.clone()
        },
        &field,
    );

    // ── 2. Balloon ───────────────────────────────────────────────────────────
    let balloon = move_balloon(&state.balloon, &field, rng);

    // ── 3. Fire gate ─────────────────────────────────────────────────────────
    let state = check_create_bullet(&GameState {
        player,
        balloon,
        trigger_held: input.firing,
        frame,
        elapsed,
        ..state.clone()
    });

    // ── 4. Bullets: advance, retire misses, test for a hit ───────────────────
    let mut bullets = Vec::with_capacity(state.bullets.len());
    let mut shots_missed = state.shots_missed;
    let mut status = GameStatus::Playing;

    let mut pending = state.bullets.iter();
    for bullet in pending.by_ref() {
        let bullet = move_bullet(bullet);

        if bullet_out_of_bounds(&bullet, &field) {
            shots_missed += 1;
            log::debug!("frame {frame}: shot missed ({shots_missed} so far)");
            continue;
        }

        if check_hit(&bullet, &state.balloon) {
            log::info!(
                "frame {frame}: balloon hit at y={} after {shots_missed} misses",
                state.balloon.y
            );
            status = GameStatus::GameOver;
            bullets.push(bullet);
            break;
        }

        bullets.push(bullet);
    }
    // Bullets after the hit are not evaluated this tick.
    bullets.extend(pending.cloned());

    GameState {
        bullets,
        shots_missed,
        status,
        ..state
    }
}
