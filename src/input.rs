//! Latched key state.
//!
//! Key events arrive asynchronously from the input thread; the game loop
//! folds them into an `InputLatch` and samples it once per tick. Events only
//! ever touch these flags, never the game geometry.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::entities::TickInput;

/// A key is considered held if its last press/repeat event arrived within
/// this many frames. Covers terminals that never emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so at 60 FPS a window of 8 frames
/// (≈133 ms) is always refreshed before expiry.
pub const HOLD_WINDOW: u64 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Up,
    Down,
    Fire,
}

/// Map a terminal key to a game control.
pub fn control_for(code: KeyCode) -> Option<Control> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Control::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Control::Down),
        KeyCode::Char(' ') => Some(Control::Fire),
        _ => None,
    }
}

/// Move direction and trigger, latched from key events.
///
/// Both move keys write the same latch: pressing Up sets +1, pressing Down
/// sets -1, releasing either clears it. Holding both and releasing one
/// therefore stops the cannon.
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    direction: i32,
    firing: bool,
    /// Frame each held control was last seen (press or repeat).
    last_seen: HashMap<Control, u64>,
    /// The terminal sends release events, so keys never expire.
    reports_release: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_release_reporting(reports_release: bool) -> Self {
        Self {
            reports_release,
            ..Self::default()
        }
    }

    pub fn press(&mut self, control: Control, frame: u64) {
        self.last_seen.insert(control, frame);
        match control {
            Control::Up => self.direction = 1,
            Control::Down => self.direction = -1,
            Control::Fire => self.firing = true,
        }
    }

    /// Key-repeat keeps a held key alive without re-latching it.
    pub fn repeat(&mut self, control: Control, frame: u64) {
        if self.last_seen.contains_key(&control) {
            self.last_seen.insert(control, frame);
        } else {
            self.press(control, frame);
        }
    }

    pub fn release(&mut self, control: Control) {
        self.last_seen.remove(&control);
        match control {
            Control::Up | Control::Down => self.direction = 0,
            Control::Fire => self.firing = false,
        }
    }

    /// Release every key not seen within `HOLD_WINDOW` frames. A no-op when
    /// the terminal reports releases itself.
    ///
    /// An expired move key only stops the cannon if the other move key has
    /// gone quiet too; otherwise direction follows the key still held.
    pub fn expire(&mut self, frame: u64) {
        if self.reports_release {
            return;
        }
        let stale: Vec<Control> = self
            .last_seen
            .iter()
            .filter(|&(_, &last)| frame.saturating_sub(last) > HOLD_WINDOW)
            .map(|(&control, _)| control)
            .collect();

        let mut move_expired = false;
        for control in stale {
            self.last_seen.remove(&control);
            match control {
                Control::Up | Control::Down => move_expired = true,
                Control::Fire => self.firing = false,
            }
        }
        if move_expired {
            self.direction = if self.last_seen.contains_key(&Control::Down) {
                -1
            } else if self.last_seen.contains_key(&Control::Up) {
                1
            } else {
                0
            };
        }
    }

    /// Fold one terminal key event into the latch. Returns false for keys
    /// that are not game controls.
    pub fn apply(&mut self, event: &KeyEvent, frame: u64) -> bool {
        let Some(control) = control_for(event.code) else {
            return false;
        };
        match event.kind {
            KeyEventKind::Press => self.press(control, frame),
            KeyEventKind::Repeat => self.repeat(control, frame),
            KeyEventKind::Release => self.release(control),
        }
        true
    }

    pub fn sample(&self) -> TickInput {
        TickInput {
            direction: self.direction,
            firing: self.firing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    #[test]
    fn press_and_release_latch_direction() {
        let mut latch = InputLatch::new();
        latch.press(Control::Up, 0);
        assert_eq!(latch.sample().direction, 1);
        latch.release(Control::Up);
        assert_eq!(latch.sample().direction, 0);
        latch.press(Control::Down, 1);
        assert_eq!(latch.sample().direction, -1);
    }

    #[test]
    fn releasing_either_move_key_stops() {
        let mut latch = InputLatch::new();
        latch.press(Control::Up, 0);
        latch.press(Control::Down, 0);
        assert_eq!(latch.sample().direction, -1);
        latch.release(Control::Up);
        assert_eq!(latch.sample().direction, 0);
    }

    #[test]
    fn trigger_follows_fire_key() {
        let mut latch = InputLatch::new();
        latch.press(Control::Fire, 0);
        assert!(latch.sample().firing);
        latch.release(Control::Fire);
        assert!(!latch.sample().firing);
    }

    #[test]
    fn keys_expire_without_release_reporting() {
        let mut latch = InputLatch::new();
        latch.press(Control::Fire, 10);
        latch.expire(10 + HOLD_WINDOW);
        assert!(latch.sample().firing);
        latch.expire(11 + HOLD_WINDOW);
        assert!(!latch.sample().firing);
    }

    #[test]
    fn repeat_refreshes_hold() {
        let mut latch = InputLatch::new();
        latch.press(Control::Up, 0);
        latch.repeat(Control::Up, 5);
        latch.expire(5 + HOLD_WINDOW);
        assert_eq!(latch.sample().direction, 1);
    }

    #[test]
    fn expiry_releases_each_key_independently() {
        let mut latch = InputLatch::new();
        latch.press(Control::Down, 0);
        latch.press(Control::Fire, 4);
        latch.expire(1 + HOLD_WINDOW);
        assert_eq!(latch.sample(), TickInput { direction: 0, firing: true });
    }

    #[test]
    fn expired_tap_leaves_held_key_in_charge() {
        let mut latch = InputLatch::new();
        latch.press(Control::Up, 0);
        latch.press(Control::Down, 5);
        latch.expire(9);
        assert_eq!(latch.sample().direction, -1);

        latch.repeat(Control::Down, 12);
        latch.expire(15);
        assert_eq!(latch.sample().direction, -1);

        latch.expire(12 + HOLD_WINDOW + 1);
        assert_eq!(latch.sample().direction, 0);
    }

    #[test]
    fn release_reporting_disables_expiry() {
        let mut latch = InputLatch::with_release_reporting(true);
        latch.press(Control::Up, 0);
        latch.press(Control::Fire, 0);
        // Held through the OS repeat delay with no repeat event yet.
        for frame in 1..=30 {
            latch.expire(frame);
        }
        assert_eq!(latch.sample(), TickInput { direction: 1, firing: true });

        latch.apply(&key(KeyCode::Up, KeyEventKind::Release), 31);
        latch.apply(&key(KeyCode::Char(' '), KeyEventKind::Release), 31);
        assert_eq!(latch.sample(), TickInput::default());
    }

    #[test]
    fn apply_maps_terminal_keys() {
        let mut latch = InputLatch::new();
        assert!(latch.apply(&key(KeyCode::Char(' '), KeyEventKind::Press), 0));
        assert!(latch.apply(&key(KeyCode::Char('w'), KeyEventKind::Press), 0));
        assert!(!latch.apply(&key(KeyCode::Char('x'), KeyEventKind::Press), 0));
        assert_eq!(latch.sample(), TickInput { direction: 1, firing: true });

        latch.apply(&key(KeyCode::Up, KeyEventKind::Release), 1);
        assert_eq!(latch.sample().direction, 0);
    }
}
