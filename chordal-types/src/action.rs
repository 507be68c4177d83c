//! Keyboard actions.
//!
//! Key types:
//! - [`Action`] - Single operations that keyboards send or execute
//! - [`KeyAction`] - What a key position does: a single action, a tap-hold pair, or the repeat key

use serde::{Deserialize, Serialize};

use crate::keycode::KeyCode;
use crate::modifier::{HidModifiers, ModifierCombination};

/// A KeyAction is the action at a keyboard position, stored in keymap.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyAction {
    /// No action.
    No,
    /// Transparent action, next layer will be checked.
    Transparent,
    /// A single action, triggered when pressed and cancelled when released.
    Single(Action),
    /// Dual-role key: (tap_action, hold_action)
    TapHold(Action, Action),
    /// Sends the keycode once on press, then again at an accelerating rate while held.
    Repeat(KeyCode),
}

impl KeyAction {
    pub fn is_tap_hold(&self) -> bool {
        matches!(self, KeyAction::TapHold(_, _))
    }

    /// The keycode a tap of this key produces, used by policy tables to identify keys.
    pub fn keycode(&self) -> Option<KeyCode> {
        match self {
            KeyAction::Single(a) | KeyAction::TapHold(a, _) => a.keycode(),
            KeyAction::Repeat(k) => Some(*k),
            KeyAction::No | KeyAction::Transparent => None,
        }
    }
}

/// A single basic action that a keyboard can execute.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Do nothing.
    No,
    /// A normal key stroke.
    Key(KeyCode),
    /// Key stroke with modifier combination triggered, e.g. `(` is `Kc9` with shift.
    KeyWithModifier(KeyCode, ModifierCombination),
    /// Modifier combination, held while the action is active.
    Modifier(ModifierCombination),
    /// Activate a layer while the action is active.
    LayerOn(u8),
}

impl Action {
    pub fn keycode(&self) -> Option<KeyCode> {
        match self {
            Action::Key(k) | Action::KeyWithModifier(k, _) => Some(*k),
            _ => None,
        }
    }

    /// Modifiers this action holds while active.
    pub fn modifiers(&self) -> HidModifiers {
        match self {
            Action::Key(k) => k.to_hid_modifiers(),
            Action::KeyWithModifier(k, m) => k.to_hid_modifiers() | m.to_hid_modifiers(),
            Action::Modifier(m) => m.to_hid_modifiers(),
            Action::No | Action::LayerOn(_) => HidModifiers::new(),
        }
    }
}
