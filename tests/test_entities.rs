use std::time::Duration;

use balloon_shooter::compute::init_state;
use balloon_shooter::config::GameConfig;
use balloon_shooter::entities::*;

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
    assert_eq!(FireState::Ready, FireState::Ready);
    assert_ne!(
        FireState::Cooling { ready_at: Duration::from_millis(1) },
        FireState::Cooling { ready_at: Duration::from_millis(2) }
    );

    // Clone must produce an equal value
    let bullet = Bullet { x: 1, y: 2, radius: 20, speed: 50 };
    assert_eq!(bullet.clone(), bullet);
}

#[test]
fn default_tick_input_is_idle() {
    let input = TickInput::default();
    assert_eq!(input.direction, 0);
    assert!(!input.firing);
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(GameConfig::default());
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.y = 99;
    cloned.shots_missed = 7;
    cloned.bullets.push(Bullet { x: 5, y: 5, radius: 20, speed: 50 });
    cloned.status = GameStatus::GameOver;

    assert_eq!(original.player.y, 0);
    assert_eq!(original.shots_missed, 0);
    assert!(original.bullets.is_empty());
    assert!(!original.is_over());
}

#[test]
fn field_accessor_reads_config() {
    let state = init_state(GameConfig::default());
    assert_eq!(state.field().width, 1000);
    assert_eq!(state.field().height, 600);
}
