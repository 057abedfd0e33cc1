use std::io::Write;

use balloon_shooter::config::{ConfigError, GameConfig};

#[test]
fn empty_object_yields_defaults() {
    let config = GameConfig::from_json_str("{}").unwrap();
    assert_eq!(config, GameConfig::default());
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = GameConfig::from_json_str(
        r#"{ "balloon": { "speed": 7 }, "reload_ms": 100, "seed": 9 }"#,
    )
    .unwrap();
    assert_eq!(config.balloon.speed, 7);
    assert_eq!(config.balloon.radius, 40);
    assert_eq!(config.bullet_speed(), 70);
    assert_eq!(config.reload_ms, 100);
    assert_eq!(config.seed, Some(9));
    assert_eq!(config.player, GameConfig::default().player);
}

#[test]
fn round_trips_through_json() {
    let config = GameConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(GameConfig::from_json_str(&json).unwrap(), config);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = GameConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().starts_with("config parse error"));
}

#[test]
fn rejects_non_positive_radius() {
    let err = GameConfig::from_json_str(r#"{ "player": { "radius": 0 } }"#).unwrap_err();
    match err {
        ConfigError::Invalid(reason) => assert!(reason.contains("player.radius")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn rejects_odd_field() {
    let err = GameConfig::from_json_str(r#"{ "field": { "width": 999 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn rejects_zero_frame_rate() {
    let err = GameConfig::from_json_str(r#"{ "frame_rate": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn rejects_balloon_too_big_for_field() {
    let err =
        GameConfig::from_json_str(r#"{ "balloon": { "radius": 300 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn balloon_needs_a_step_of_room_beyond_each_wall() {
    // 2 * (40 + 15) = 110 > 100: a bounce off one wall would cross the other.
    let err = GameConfig::from_json_str(
        r#"{ "field": { "height": 100 }, "player": { "radius": 20 },
             "balloon": { "radius": 40, "speed": 15 } }"#,
    )
    .unwrap_err();
    match err {
        ConfigError::Invalid(reason) => assert!(reason.contains("balloon")),
        other => panic!("unexpected error: {other}"),
    }

    // 2 * (35 + 15) = 100 fits exactly.
    let config = GameConfig::from_json_str(
        r#"{ "field": { "height": 100 }, "player": { "radius": 20 },
             "balloon": { "radius": 35, "speed": 15 } }"#,
    )
    .unwrap();
    assert_eq!(config.field.height, 100);
}

#[test]
fn extreme_values_are_rejected_not_overflowed() {
    for json in [
        r#"{ "balloon": { "x": -2147483648 } }"#,
        r#"{ "player": { "x": -2147483648 } }"#,
        r#"{ "balloon": { "radius": 2147483647 } }"#,
        r#"{ "balloon": { "speed": 2147483647 } }"#,
        r#"{ "player": { "radius": 2147483647 } }"#,
        r#"{ "bullet": { "speed_factor": 2147483647 } }"#,
        r#"{ "bullet": { "radius": 2147483647 } }"#,
        r#"{ "player": { "cannon_width": 2147483647 } }"#,
        r#"{ "field": { "width": 2147483646, "height": 2147483646 } }"#,
    ] {
        let err = GameConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{json}");
    }
}

#[test]
fn rejects_movers_outside_field() {
    let err = GameConfig::from_json_str(r#"{ "player": { "x": 600 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn rejects_balloon_right_of_player() {
    let err = GameConfig::from_json_str(r#"{ "balloon": { "x": 450 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn loads_from_file() {
    let path = std::env::temp_dir().join(format!(
        "balloon_shooter_config_{}.json",
        std::process::id()
    ));
    {
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{ "frame_rate": 30 }}"#).unwrap();
    }
    let config = GameConfig::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.frame_rate, 30);
}

#[test]
fn missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("balloon_shooter_definitely_missing.json");
    let err = GameConfig::from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
