//! Exposed channels which can be used to share data between the matrix scanner, the keyboard and the HID writer

use embassy_sync::channel::Channel;
pub use embassy_sync::{blocking_mutex, channel};
use usbd_hid::descriptor::KeyboardReport;

use crate::event::KeyEvent;
use crate::{EVENT_CHANNEL_SIZE, REPORT_CHANNEL_SIZE, RawMutex};

/// Channel for key events from the matrix scanner
pub static KEY_EVENT_CHANNEL: Channel<RawMutex, KeyEvent, EVENT_CHANNEL_SIZE> = Channel::new();
/// Channel for keyboard reports from the keyboard to the hid writer
pub static KEYBOARD_REPORT_CHANNEL: Channel<RawMutex, KeyboardReport, REPORT_CHANNEL_SIZE> = Channel::new();
