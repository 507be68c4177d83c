//! # Chordal Types
//!
//! Plain data types shared by the chordal firmware core and the layouts built on it.
//!
//! ## Modules
//!
//! - [`action`] - What a key does: single actions, tap-hold pairs and the repeat key
//! - [`keycode`] - HID keyboard page keycodes
//! - [`modifier`] - Modifier combinations and the HID modifier byte
//!
//! The crate is `no_std` and allocation free, every type is `Copy`.

#![no_std]

pub mod action;
pub mod keycode;
pub mod modifier;
