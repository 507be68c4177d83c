pub mod common;

use chordal::channel::{KEY_EVENT_CHANNEL, KEYBOARD_REPORT_CHANNEL};
use chordal::event::KeyEvent;
use embassy_futures::block_on;
use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Instant, MockDriver};

use crate::common::{KC_LGUI, create_crkbd_keyboard};

// The mock driver and the channels are global, keep a single test in this binary
#[test]
fn test_keyboard_run() {
    let driver = MockDriver::get();
    driver.reset();
    KEY_EVENT_CHANNEL.clear();
    KEYBOARD_REPORT_CHANNEL.clear();

    let mut keyboard = create_crkbd_keyboard();
    let result = block_on(select(keyboard.run(), async {
        // A plain key is reported when its event is received
        KEY_EVENT_CHANNEL.send(KeyEvent::key(0, 1, true, Instant::now())).await;
        KEY_EVENT_CHANNEL.send(KeyEvent::key(0, 1, false, Instant::now())).await;
        let report = KEYBOARD_REPORT_CHANNEL.receive().await;
        assert_eq!((report.modifier, report.keycodes), (0, [kc8!(Q), 0, 0, 0, 0, 0]));
        let report = KEYBOARD_REPORT_CHANNEL.receive().await;
        assert_eq!((report.modifier, report.keycodes), (0, [0; 6]));

        // A tap-hold key is resolved by the ticker once the timeout passes
        KEY_EVENT_CHANNEL.send(KeyEvent::key(1, 1, true, Instant::now())).await;
        driver.advance(Duration::from_millis(1000));
        let report = KEYBOARD_REPORT_CHANNEL.receive().await;
        assert_eq!((report.modifier, report.keycodes), (KC_LGUI, [0; 6]));

        KEY_EVENT_CHANNEL.send(KeyEvent::key(1, 1, false, Instant::now())).await;
        let report = KEYBOARD_REPORT_CHANNEL.receive().await;
        assert_eq!((report.modifier, report.keycodes), (0, [0; 6]));
    }));
    assert!(matches!(result, Either::Second(())));
}
