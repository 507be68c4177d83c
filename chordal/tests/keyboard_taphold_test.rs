#[macro_use]
pub mod common;

mod tap_hold_test {
    use crate::common::{KC_LCTRL, KC_LGUI, KC_LSHIFT, KC_RCTRL, create_crkbd_keyboard, run_key_sequence_test};

    #[test]
    fn test_taphold_tap() {
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [1, 1, true, 10],   // Press mt!(A, LGui)
                [1, 1, false, 100], // Release A before hold timeout
            ],
            expected_reports: [
                [0, [kc8!(A), 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        }
    }

    #[test]
    fn test_taphold_hold() {
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [1, 1, true, 10],    // Press mt!(A, LGui)
                [1, 1, false, 1100], // Release A after hold timeout
            ],
            expected_reports: [
                [KC_LGUI, [0, 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        }
    }

    #[test]
    fn test_taphold_opposite_hand_key_holds() {
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [1, 4, true, 10],  // Press mt!(F, LShift)
                [0, 7, true, 40],  // Press U on the right half
                [0, 7, false, 30], // Release U
                [1, 4, false, 20], // Release F
            ],
            expected_reports: [
                [KC_LSHIFT, [0, 0, 0, 0, 0, 0]],
                [KC_LSHIFT, [kc8!(U), 0, 0, 0, 0, 0]],
                [KC_LSHIFT, [0, 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        }
    }

    #[test]
    fn test_taphold_same_hand_key_taps() {
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [1, 3, true, 10],  // Press mt!(D, LCtrl)
                [0, 3, true, 40],  // Press E, same hand
                [1, 3, false, 30], // Release D
                [0, 3, false, 20], // Release E
            ],
            expected_reports: [
                [0, [kc8!(D), 0, 0, 0, 0, 0]],
                [0, [kc8!(D), kc8!(E), 0, 0, 0, 0]],
                [0, [kc8!(E), 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        }
    }

    #[test]
    fn test_taphold_declared_chord_holds_on_same_hand() {
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [1, 3, true, 10],  // Press mt!(D, LCtrl)
                [2, 3, true, 40],  // Press C, Ctrl+C is a chord
                [2, 3, false, 30], // Release C
                [1, 3, false, 20], // Release D
            ],
            expected_reports: [
                [KC_LCTRL, [0, 0, 0, 0, 0, 0]],
                [KC_LCTRL, [kc8!(C), 0, 0, 0, 0, 0]],
                [KC_LCTRL, [0, 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        }
    }

    #[test]
    fn test_taphold_hold_then_same_hand_key() {
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [1, 4, true, 10],    // Press mt!(F, LShift)
                [1, 5, true, 1100],  // Press G after the timeout
                [1, 5, false, 30],   // Release G
                [1, 4, false, 20],   // Release F
            ],
            expected_reports: [
                [KC_LSHIFT, [0, 0, 0, 0, 0, 0]],
                [KC_LSHIFT, [kc8!(G), 0, 0, 0, 0, 0]],
                [KC_LSHIFT, [0, 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        }
    }

    #[test]
    fn test_layer_tap_hold_tap() {
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [3, 4, true, 10],   // Press lt!(NAVIGATION, Tab)
                [3, 4, false, 100], // Release
            ],
            expected_reports: [
                [0, [kc8!(Tab), 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        }
    }

    #[test]
    fn test_layer_tap_hold_opposite_hand() {
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [3, 7, true, 10],  // Press lt!(NUMBER, Space) on the right thumb
                [0, 2, true, 50],  // Press W position, 7 on the number layer
                [0, 2, false, 30], // Release 7
                [3, 7, false, 20], // Release the thumb
            ],
            expected_reports: [
                [0, [kc8!(Kc7), 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        }
    }

    #[test]
    fn test_layer_tap_hold_thumb_chords_on_same_hand() {
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [3, 4, true, 10],  // Press lt!(NAVIGATION, Tab) on the left thumb
                [1, 1, true, 50],  // Press A position, LGui on the navigation layer
                [1, 1, false, 30], // Release LGui
                [3, 4, false, 20], // Release the thumb
            ],
            expected_reports: [
                [KC_LGUI, [0, 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        }
    }

    #[test]
    fn test_layer_released_before_layered_key() {
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [3, 7, true, 10],  // Press lt!(NUMBER, Space)
                [0, 2, true, 50],  // Press 7
                [3, 7, false, 30], // Release the thumb first
                [0, 2, false, 20], // Release 7, from the layer it was pressed on
            ],
            expected_reports: [
                [0, [kc8!(Kc7), 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        }
    }

    #[test]
    fn test_force_hold_key_never_waits() {
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [3, 3, true, 10],  // Press lt!(MEDIA, Escape)
                [1, 7, true, 50],  // Press J position, volume down on the media layer
                [1, 7, false, 30], // Release
                [3, 3, false, 20], // Release Esc
            ],
            expected_reports: [
                [0, [kc8!(KbVolumeDown), 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        }
    }

    #[test]
    fn test_force_hold_key_tapped_at_the_same_instant() {
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [3, 3, true, 10], // Press lt!(MEDIA, Escape)
                [3, 3, false, 0], // Release in the same tick
            ],
            expected_reports: [
                [0, [kc8!(Escape), 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        }
    }

    #[test]
    fn test_force_hold_key_with_synchronous_partner() {
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [3, 3, true, 10],  // Press lt!(MEDIA, Escape)
                [1, 8, true, 0],   // Press K position in the same tick, volume up
                [1, 8, false, 30], // Release
                [3, 3, false, 20], // Release Esc
            ],
            expected_reports: [
                [0, [kc8!(KbVolumeUp), 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        }
    }

    #[test]
    fn test_two_home_row_mods_held() {
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [1, 3, true, 10],  // Press mt!(D, LCtrl)
                [1, 8, true, 40],  // Press mt!(K, RCtrl), D holds
                [0, 1, true, 40],  // Press Q, K holds
                [0, 1, false, 30], // Release Q
                [1, 8, false, 10], // Release K
                [1, 3, false, 10], // Release D
            ],
            expected_reports: [
                [KC_LCTRL, [0, 0, 0, 0, 0, 0]],
                [KC_LCTRL | KC_RCTRL, [0, 0, 0, 0, 0, 0]],
                [KC_LCTRL | KC_RCTRL, [kc8!(Q), 0, 0, 0, 0, 0]],
                [KC_LCTRL | KC_RCTRL, [0, 0, 0, 0, 0, 0]],
                [KC_LCTRL, [0, 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        }
    }
}
