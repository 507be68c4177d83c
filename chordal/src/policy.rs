//! Policies which parameterize the chord resolver.
//!
//! Every method of [`ChordPolicy`] has a default, so a keyboard only overrides the rules it
//! cares about. [`TablePolicy`] covers the common case with static tables.

use embassy_time::Duration;

use crate::action::Action;
use crate::config::TapHoldConfig;
use crate::event::KeyPos;
use crate::keycode::KeyCode;
use crate::modifier::HidModifiers;
use crate::tap_hold::TapHoldKey;

pub trait ChordPolicy {
    /// Whether pressing `other` while `tap_hold` is pending is a deliberate chord, resolving it as hold.
    ///
    /// Returning `false` leaves the decision to the same-hand/opposite-hand fallback.
    fn is_chord(&self, _tap_hold: KeyCode, _other: KeyCode) -> bool {
        false
    }

    /// Whether a same-hand key press still resolves the pending key as hold
    fn same_hand_exception(&self, _key: KeyPos, _other: KeyPos) -> bool {
        false
    }

    /// How long `key` stays pending. Zero resolves it as hold unless a chord partner
    /// arrives at the same instant.
    fn timeout(&self, _key: &TapHoldKey, config: &TapHoldConfig) -> Duration {
        config.timeout
    }

    /// Whether a fast second press of `key` repeats its tap. Otherwise the second press
    /// within the quick tap term is forced to hold.
    fn quick_tap_eligible(&self, _key: &TapHoldKey) -> bool {
        false
    }

    /// Streak window of `key`, zero disables the streak for it
    fn streak_timeout(&self, key: &TapHoldKey, config: &TapHoldConfig) -> Duration {
        match key.hold {
            Action::LayerOn(_) => Duration::from_ticks(0),
            hold if hold.modifiers().shift() => config.shift_streak_timeout,
            _ => config.streak_timeout,
        }
    }

    /// Whether typing `keycode` with `mods` held keeps the streak going
    fn streak_continues(&self, keycode: KeyCode, mods: HidModifiers) -> bool {
        let typing = keycode.is_alpha()
            || matches!(
                keycode,
                KeyCode::Comma | KeyCode::Dot | KeyCode::Quote | KeyCode::Space
            );
        let allowed = HidModifiers::new()
            .with_left_shift(true)
            .with_right_shift(true)
            .with_right_alt(true);
        typing && mods.only(allowed)
    }

    /// Held modifiers which disable the streak, Ctrl, GUI and left Alt by default
    fn streak_blocked(&self, mods: HidModifiers) -> bool {
        mods.ctrl() || mods.gui() || mods.left_alt()
    }
}

/// A policy using only the default rules
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultPolicy;

impl ChordPolicy for DefaultPolicy {}

/// Data-driven policy built from static tables.
#[derive(Clone, Copy, Debug, Default)]
pub struct TablePolicy {
    /// Tap keycodes of keys that never wait, their timeout is zero
    pub force_hold: &'static [KeyCode],
    /// Tap keycodes of keys whose fast second press repeats the tap
    pub quick_tap: &'static [KeyCode],
    /// `(tap keycode, other keycode)` pairs which always chord, whatever hand `other` is on
    pub chords: &'static [(KeyCode, KeyCode)],
    /// Rows on which a same-hand press still chords, thumb clusters usually
    pub chord_rows: &'static [u8],
}

impl ChordPolicy for TablePolicy {
    fn is_chord(&self, tap_hold: KeyCode, other: KeyCode) -> bool {
        self.chords.contains(&(tap_hold, other))
    }

    fn same_hand_exception(&self, key: KeyPos, other: KeyPos) -> bool {
        self.chord_rows.contains(&key.row) || self.chord_rows.contains(&other.row)
    }

    fn timeout(&self, key: &TapHoldKey, config: &TapHoldConfig) -> Duration {
        if self.force_hold.contains(&key.tap_keycode()) {
            Duration::from_ticks(0)
        } else {
            config.timeout
        }
    }

    fn quick_tap_eligible(&self, key: &TapHoldKey) -> bool {
        self.quick_tap.contains(&key.tap_keycode())
    }
}
