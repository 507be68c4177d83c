//! HID output state.
//!
//! [`ActionOutput`] is the output side of the chord resolver and the repeat controller.
//! [`HidState`] tracks held actions and turns every change into a keyboard report.

use heapless::{Deque, Vec};
use usbd_hid::descriptor::KeyboardReport;

use crate::action::Action;
use crate::keycode::KeyCode;
use crate::modifier::HidModifiers;

/// Max number of actions held at the same time
pub const MAX_HELD_ACTIONS: usize = 16;
/// Max number of reports waiting to be taken
pub const REPORT_QUEUE_SIZE: usize = 32;
/// Keycode slots in a boot keyboard report
const REPORT_KEYCODES: usize = 6;

/// Sink of resolved actions. Every method is fire-and-forget.
pub trait ActionOutput {
    /// Press and release `action`
    fn emit_tap(&mut self, action: Action) {
        self.activate_hold(action);
        self.deactivate_hold(action);
    }

    /// Press `action` and keep it active
    fn activate_hold(&mut self, action: Action);

    /// Release an action activated by [`ActionOutput::activate_hold`]
    fn deactivate_hold(&mut self, action: Action);

    /// Modifiers currently sent to the host
    fn active_modifiers(&self) -> HidModifiers;
}

/// Held keys and modifiers, and the reports generated from them
pub struct HidState {
    held: Vec<Action, MAX_HELD_ACTIONS>,
    reports: Deque<KeyboardReport, REPORT_QUEUE_SIZE>,
}

impl Default for HidState {
    fn default() -> Self {
        Self::new()
    }
}

impl HidState {
    pub fn new() -> Self {
        Self {
            held: Vec::new(),
            reports: Deque::new(),
        }
    }

    /// Hold `action`. Layer actions and `No` are not part of the report and are ignored.
    pub fn press(&mut self, action: Action) {
        let keycode = match action {
            Action::Key(k) | Action::KeyWithModifier(k, _) => Some(k),
            Action::Modifier(_) => None,
            Action::No | Action::LayerOn(_) => return,
        };
        if let Some(k) = keycode {
            if !k.is_modifier() && self.held_keycodes().count() >= REPORT_KEYCODES {
                warn!("Too many keys pressed, dropping {:?}", k);
                return;
            }
        }
        if self.held.push(action).is_err() {
            error!("Held action buffer is full, dropping {:?}", action);
            return;
        }
        self.push_report();
    }

    /// Release one instance of `action`, a release of an action which isn't held is ignored
    pub fn release(&mut self, action: Action) {
        if matches!(action, Action::No | Action::LayerOn(_)) {
            return;
        }
        match self.held.iter().position(|a| *a == action) {
            Some(i) => {
                self.held.remove(i);
                self.push_report();
            }
            None => debug!("Releasing {:?} which is not held", action),
        }
    }

    /// Modifiers of all held actions
    pub fn modifiers(&self) -> HidModifiers {
        self.held
            .iter()
            .fold(HidModifiers::new(), |mods, action| mods | action.modifiers())
    }

    /// Snapshot of the current state
    pub fn report(&self) -> KeyboardReport {
        let mut keycodes = [0u8; REPORT_KEYCODES];
        for (slot, k) in keycodes.iter_mut().zip(self.held_keycodes()) {
            *slot = k as u8;
        }
        KeyboardReport {
            modifier: self.modifiers().into_bits(),
            reserved: 0,
            leds: 0,
            keycodes,
        }
    }

    /// Take the oldest queued report
    pub fn take_report(&mut self) -> Option<KeyboardReport> {
        self.reports.pop_front()
    }

    fn held_keycodes(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.held.iter().filter_map(|a| a.keycode()).filter(|k| !k.is_modifier())
    }

    fn push_report(&mut self) {
        if self.reports.is_full() {
            warn!("Report queue is full, dropping the oldest report");
            self.reports.pop_front();
        }
        let report = self.report();
        // Not full here
        let _ = self.reports.push_back(report);
    }
}
