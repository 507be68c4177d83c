//! # Chordal
//!
//! Tap-hold chord resolution and accelerating key repeat for keyboard firmware.
//!
//! Key events go through the [`tap_hold::ChordResolver`] first. It decides whether a dual-role
//! key is tapped or held, forwarding everything else. The repeat key is handled by the
//! [`repeat::RepeatController`], which schedules its taps on the [`scheduler::Scheduler`].
//! [`keyboard::Keyboard`] ties them together with a [`keymap::KeyMap`] and the HID output.

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod channel;
pub mod config;
pub mod event;
pub mod hid;
pub mod keyboard;
pub mod keymap;
pub mod layout;
pub mod layout_macro;
pub mod policy;
pub mod repeat;
pub mod scheduler;
pub mod tap_hold;

pub use chordal_types::{action, keycode, modifier};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// Mutex used by the static channels
pub type RawMutex = CriticalSectionRawMutex;

/// Capacity of the key event channel
pub const EVENT_CHANNEL_SIZE: usize = 16;
/// Capacity of the keyboard report channel
pub const REPORT_CHANNEL_SIZE: usize = 16;
