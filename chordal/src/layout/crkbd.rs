//! Corne (crkbd) `split_3x6_3` layout with home row mods.
//!
//! The matrix is 4x12. Rows 0..3 are the finger rows, the three thumb keys of each half
//! are on row 3, columns 3..6 on the left and 6..9 on the right.

use crate::action::KeyAction;
use crate::keycode::KeyCode;
use crate::modifier::ModifierCombination as M;
use crate::policy::TablePolicy;
use crate::{a, k, layer, lt, mo, mt, rp, shifted};

pub const ROW: usize = 4;
pub const COL: usize = 12;
pub const NUM_LAYER: usize = 7;

pub const BASE: u8 = 0;
pub const NAVIGATION: u8 = 1;
pub const NUMBER: u8 = 2;
pub const SYMBOLS: u8 = 3;
pub const FUNCTION: u8 = 4;
pub const MEDIA: u8 = 5;
pub const OTHER: u8 = 6;

/// Thumb row
pub const THUMB_ROW: u8 = 3;

/// Chord policy of the layout.
///
/// The media thumb never waits. The home row letters and the Space and Backspace thumbs tap
/// again on a quick second press, so doubled letters type. Left Ctrl chords with the
/// clipboard keys of its own hand and every thumb chords.
pub const POLICY: TablePolicy = TablePolicy {
    force_hold: &[KeyCode::Escape],
    quick_tap: &[
        KeyCode::A,
        KeyCode::S,
        KeyCode::D,
        KeyCode::F,
        KeyCode::J,
        KeyCode::K,
        KeyCode::L,
        KeyCode::Quote,
        KeyCode::Space,
        KeyCode::Backspace,
    ],
    chords: &[
        (KeyCode::D, KeyCode::Z),
        (KeyCode::D, KeyCode::X),
        (KeyCode::D, KeyCode::C),
        (KeyCode::D, KeyCode::V),
    ],
    chord_rows: &[THUMB_ROW],
};

#[rustfmt::skip]
pub const fn get_keymap() -> [[[KeyAction; COL]; ROW]; NUM_LAYER] {
    [
        // Base
        layer!([
            [a!(No), k!(Q), k!(W), k!(E), k!(R), k!(T), k!(Y), k!(U), k!(I), k!(O), k!(P), a!(No)],
            [a!(No), mt!(A, M::LGUI), mt!(S, M::LALT), mt!(D, M::LCTRL), mt!(F, M::LSHIFT), k!(G), k!(H), mt!(J, M::RSHIFT), mt!(K, M::RCTRL), mt!(L, M::RALT), mt!(Quote, M::RGUI), a!(No)],
            [a!(No), k!(Z), k!(X), k!(C), k!(V), k!(B), k!(N), k!(M), k!(Comma), k!(Dot), k!(Slash), a!(No)],
            [a!(No), a!(No), a!(No), lt!(MEDIA, Escape), lt!(NAVIGATION, Tab), mo!(OTHER), lt!(SYMBOLS, Enter), lt!(NUMBER, Space), lt!(FUNCTION, Backspace), a!(No), a!(No), a!(No)]
        ]),
        // Navigation
        layer!([
            [a!(Transparent), a!(No), a!(No), a!(No), a!(No), a!(No), rp!(Backspace), a!(No), a!(No), a!(No), a!(No), a!(No)],
            [a!(Transparent), k!(LGui), k!(LAlt), k!(LCtrl), k!(LShift), a!(No), k!(Left), k!(Down), k!(Up), k!(Right), a!(No), a!(No)],
            [a!(Transparent), a!(No), a!(No), a!(No), a!(No), a!(No), k!(Insert), k!(Home), k!(PageUp), k!(PageDown), k!(End), a!(No)],
            [a!(No), a!(No), a!(No), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(No), a!(No), a!(No)]
        ]),
        // Number
        layer!([
            [a!(Transparent), k!(LeftBracket), k!(Kc7), k!(Kc8), k!(Kc9), k!(RightBracket), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No)],
            [a!(Transparent), k!(Semicolon), k!(Kc4), k!(Kc5), k!(Kc6), k!(Equal), a!(No), k!(RShift), k!(RCtrl), k!(RAlt), k!(RGui), a!(No)],
            [a!(Transparent), k!(Grave), k!(Kc1), k!(Kc2), k!(Kc3), k!(Backslash), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No)],
            [a!(No), a!(No), a!(No), a!(Transparent), k!(Kc0), k!(Minus), a!(Transparent), a!(Transparent), a!(Transparent), a!(No), a!(No), a!(No)]
        ]),
        // Symbols
        layer!([
            [a!(Transparent), k!(LeftBracket), shifted!(Kc7), shifted!(Kc8), shifted!(Kc9), k!(RightBracket), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No)],
            [a!(Transparent), shifted!(Semicolon), shifted!(Kc4), shifted!(Kc5), shifted!(Kc6), shifted!(Equal), a!(No), k!(RShift), k!(RCtrl), k!(RAlt), k!(RGui), a!(No)],
            [a!(Transparent), shifted!(Grave), shifted!(Kc1), shifted!(Kc2), shifted!(Kc3), shifted!(Backslash), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No)],
            [a!(No), a!(No), a!(No), shifted!(Kc9), shifted!(Kc0), shifted!(Minus), a!(Transparent), a!(Transparent), a!(Transparent), a!(No), a!(No), a!(No)]
        ]),
        // Function
        layer!([
            [a!(Transparent), k!(F12), k!(F7), k!(F8), k!(F9), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No)],
            [a!(Transparent), k!(F11), k!(F4), k!(F5), k!(F6), a!(No), a!(No), k!(RShift), k!(RCtrl), k!(RAlt), k!(RGui), a!(No)],
            [a!(Transparent), k!(F10), k!(F1), k!(F2), k!(F3), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No)],
            [a!(No), a!(No), a!(No), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(No), a!(No), a!(No)]
        ]),
        // Media, track keys are not on the keyboard page
        layer!([
            [a!(Transparent), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No)],
            [a!(Transparent), k!(LGui), k!(LAlt), k!(LCtrl), k!(LShift), a!(No), a!(No), k!(KbVolumeDown), k!(KbVolumeUp), a!(No), a!(No), a!(No)],
            [a!(Transparent), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No)],
            [a!(No), a!(No), a!(No), a!(Transparent), a!(Transparent), a!(Transparent), a!(No), a!(No), k!(KbMute), a!(No), a!(No), a!(No)]
        ]),
        // Other, boot and lighting keys are not supported
        layer!([
            [a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No)],
            [a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No)],
            [a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No)],
            [a!(No), a!(No), a!(No), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(No), a!(No), a!(No)]
        ]),
    ]
}
