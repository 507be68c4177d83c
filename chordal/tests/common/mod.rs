#[macro_use]
pub mod test_macro;

use chordal::config::KeyboardConfig;
use chordal::event::KeyEvent;
use chordal::keyboard::Keyboard;
use chordal::layout::crkbd::{self, COL, NUM_LAYER, POLICY, ROW};
use chordal::action::KeyAction;
use chordal::policy::{ChordPolicy, TablePolicy};
use embassy_time::Instant;
use log::debug;
use usbd_hid::descriptor::KeyboardReport;

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub(crate) const KC_LCTRL: u8 = 1 << 0;
pub(crate) const KC_LSHIFT: u8 = 1 << 1;
pub(crate) const KC_LGUI: u8 = 1 << 3;
pub(crate) const KC_RCTRL: u8 = 1 << 4;
pub(crate) const KC_RSHIFT: u8 = 1 << 5;

/// How long the keyboard keeps ticking after the last key event
pub const SETTLE_MS: u64 = 2000;

static CRKBD_KEYMAP: [[[KeyAction; COL]; ROW]; NUM_LAYER] = crkbd::get_keymap();

#[derive(Debug, Clone)]
pub struct TestKeyPress {
    pub row: u8,
    pub col: u8,
    pub pressed: bool,
    pub delay: u64, // Delay before this key event in milliseconds
}

pub fn create_crkbd_keyboard() -> Keyboard<'static, TablePolicy, ROW, COL, NUM_LAYER> {
    create_crkbd_keyboard_with_config(KeyboardConfig::default())
}

pub fn create_crkbd_keyboard_with_config(config: KeyboardConfig) -> Keyboard<'static, TablePolicy, ROW, COL, NUM_LAYER> {
    Keyboard::new(&CRKBD_KEYMAP, POLICY, config)
}

/// Feed the key sequence to the keyboard on a simulated 1ms tick and collect every report.
///
/// The clock starts at 0. An event is processed before the tick of the same millisecond.
pub fn run_key_sequence<P: ChordPolicy, const ROW_: usize, const COL_: usize, const NUM_LAYER_: usize>(
    keyboard: &mut Keyboard<'_, P, ROW_, COL_, NUM_LAYER_>,
    key_sequence: &[TestKeyPress],
) -> Vec<KeyboardReport> {
    let mut reports = Vec::new();
    let mut now = 0;
    for key in key_sequence {
        let at = now + key.delay;
        while now + 1 < at {
            now += 1;
            keyboard.tick(Instant::from_millis(now));
            drain_reports(keyboard, &mut reports);
        }
        now = at;
        keyboard.process_event(KeyEvent::key(key.row, key.col, key.pressed, Instant::from_millis(now)));
        keyboard.tick(Instant::from_millis(now));
        drain_reports(keyboard, &mut reports);
    }
    for _ in 0..SETTLE_MS {
        now += 1;
        keyboard.tick(Instant::from_millis(now));
        drain_reports(keyboard, &mut reports);
    }
    reports
}

fn drain_reports<P: ChordPolicy, const ROW_: usize, const COL_: usize, const NUM_LAYER_: usize>(
    keyboard: &mut Keyboard<'_, P, ROW_, COL_, NUM_LAYER_>,
    reports: &mut Vec<KeyboardReport>,
) {
    while let Some(report) = keyboard.take_report() {
        debug!("Report #{}: {:?}", reports.len(), report);
        reports.push(report);
    }
}

// run a keyboard test, input is a seq of key events with delay, use expected reports to verify
pub fn run_key_sequence_test<P: ChordPolicy, const ROW_: usize, const COL_: usize, const NUM_LAYER_: usize>(
    keyboard: &mut Keyboard<'_, P, ROW_, COL_, NUM_LAYER_>,
    key_sequence: &[TestKeyPress],
    expected_reports: &[KeyboardReport],
) {
    let reports = run_key_sequence(keyboard, key_sequence);
    for (report_index, (expected, report)) in expected_reports.iter().zip(reports.iter()).enumerate() {
        assert_eq!(
            expected, report,
            "on #{} reports, expected left but actually right",
            report_index
        );
    }
    assert_eq!(
        expected_reports.len(),
        reports.len(),
        "expected {} reports, got {:?}",
        expected_reports.len(),
        reports
    );
}
