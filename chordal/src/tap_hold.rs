//! Tap-hold chord resolution.
//!
//! A tap-hold key is pending from its press until it is released, another key is pressed,
//! or its timeout passes. A release makes it a tap. A timeout makes it a hold. An
//! interrupting key press is decided by the [`ChordPolicy`]: a declared chord or a key on
//! the other hand holds, a key on the same hand taps.
//!
//! Two shortcuts skip the pending phase. A second press of the key just tapped is a quick
//! tap, and a press right after a typing key continues a streak and taps.

use embassy_time::{Duration, Instant};
use heapless::Vec;

use crate::action::{Action, KeyAction};
use crate::config::TapHoldConfig;
use crate::event::{Hand, KeyEvent, KeyPos};
use crate::hid::ActionOutput;
use crate::keycode::KeyCode;
use crate::modifier::HidModifiers;
use crate::policy::ChordPolicy;

/// Max number of tap-hold keys which are resolved and still held
pub const MAX_ACTIVE_KEYS: usize = 16;

/// A tap-hold key at a position, as found in the keymap when it was pressed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TapHoldKey {
    pub pos: KeyPos,
    pub tap: Action,
    pub hold: Action,
}

impl TapHoldKey {
    pub fn from_action(pos: KeyPos, action: KeyAction) -> Option<Self> {
        match action {
            KeyAction::TapHold(tap, hold) => Some(Self { pos, tap, hold }),
            _ => None,
        }
    }

    /// Keycode identifying this key in policy tables
    pub fn tap_keycode(&self) -> KeyCode {
        self.tap.keycode().unwrap_or(KeyCode::No)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    Tap,
    Hold,
}

/// What the resolver did with an event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// The event belonged to a tap-hold key and is fully handled
    Consumed,
    /// The event is not a tap-hold event, process it normally with the given action
    Forwarded(KeyAction),
}

/// Environment of the resolver: keymap lookup and the action output
pub trait ChordContext: ActionOutput {
    /// Action of the key in `event` on the current layers. A release must return the
    /// action the key was pressed with.
    fn lookup(&mut self, event: &KeyEvent) -> KeyAction;
}

#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct PendingChord {
    key: TapHoldKey,
    pressed_at: Instant,
    deadline: Instant,
}

impl PendingChord {
    /// A zero timeout still leaves room for a chord partner reported at the same instant
    fn expired(&self, now: Instant) -> bool {
        now >= self.deadline && now > self.pressed_at
    }
}

/// A resolved tap-hold key, still physically held
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct ActiveKey {
    pos: KeyPos,
    /// Action to deactivate on release
    action: Action,
    tapped: bool,
}

pub struct ChordResolver<P: ChordPolicy> {
    config: TapHoldConfig,
    policy: P,
    rows: u8,
    cols: u8,
    pending: Option<PendingChord>,
    /// Time of the last streak-continuing key
    streak: Option<Instant>,
    /// Position and release time of the last tapped tap-hold key
    last_tap: Option<(KeyPos, Instant)>,
    active: Vec<ActiveKey, MAX_ACTIVE_KEYS>,
}

impl<P: ChordPolicy> ChordResolver<P> {
    /// `rows` and `cols` are the matrix size, used to tell the hands apart
    pub fn new(config: TapHoldConfig, policy: P, rows: u8, cols: u8) -> Self {
        Self {
            config,
            policy,
            rows,
            cols,
            pending: None,
            streak: None,
            last_tap: None,
            active: Vec::new(),
        }
    }

    /// Position of the pending tap-hold key
    pub fn pending_key(&self) -> Option<KeyPos> {
        self.pending.map(|p| p.key.pos)
    }

    /// When the pending key resolves as hold if nothing else happens
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.deadline)
    }

    /// Process one key event, in arrival order.
    pub fn handle_event<C: ChordContext>(&mut self, event: KeyEvent, ctx: &mut C) -> Outcome {
        if let Some(pending) = self.pending {
            if pending.expired(event.time) {
                debug!("Tap-hold key {:?} timed out before {:?}", pending.key.pos, event.pos);
                self.resolve_hold(pending.key, ctx);
            }
        }

        if event.pressed {
            self.on_press(event, ctx)
        } else {
            self.on_release(event, ctx)
        }
    }

    /// Expire the pending key. Call this once per tick.
    pub fn tick<C: ChordContext>(&mut self, now: Instant, ctx: &mut C) {
        if let Some(pending) = self.pending {
            if pending.expired(now) {
                debug!("Tap-hold key {:?} timed out", pending.key.pos);
                self.resolve_hold(pending.key, ctx);
            }
        }
    }

    fn on_press<C: ChordContext>(&mut self, event: KeyEvent, ctx: &mut C) -> Outcome {
        if let Some(pending) = self.pending {
            if pending.key.pos == event.pos {
                warn!("Duplicate press of pending key {:?}", event.pos);
                return Outcome::Consumed;
            }
            let other = ctx.lookup(&event);
            match self.decide(&pending, event.pos, other) {
                Resolution::Hold => self.resolve_hold(pending.key, ctx),
                Resolution::Tap => self.resolve_tap(pending.key, event.time, ctx),
            }
        }

        if self.active.iter().any(|a| a.pos == event.pos) {
            warn!("Duplicate press of held key {:?}", event.pos);
            return Outcome::Consumed;
        }

        // Look up again, a hold may have switched the layer
        let action = ctx.lookup(&event);
        match TapHoldKey::from_action(event.pos, action) {
            Some(key) => {
                self.press_tap_hold(key, event.time, ctx);
                Outcome::Consumed
            }
            None => {
                self.on_other_key(action, event.time, ctx);
                Outcome::Forwarded(action)
            }
        }
    }

    fn on_release<C: ChordContext>(&mut self, event: KeyEvent, ctx: &mut C) -> Outcome {
        let action = ctx.lookup(&event);

        if let Some(pending) = self.pending {
            if pending.key.pos == event.pos {
                self.pending = None;
                debug!("Tap-hold key {:?} released, tap", event.pos);
                let mods = ctx.active_modifiers();
                ctx.emit_tap(pending.key.tap);
                self.record_streak(pending.key.tap.keycode(), mods, event.time);
                self.last_tap = Some((event.pos, event.time));
                return Outcome::Consumed;
            }
        }

        if let Some(i) = self.active.iter().position(|a| a.pos == event.pos) {
            let active = self.active.remove(i);
            ctx.deactivate_hold(active.action);
            if active.tapped {
                self.last_tap = Some((event.pos, event.time));
            }
            return Outcome::Consumed;
        }

        if action.is_tap_hold() {
            warn!("Release of tap-hold key {:?} without press", event.pos);
            return Outcome::Consumed;
        }
        Outcome::Forwarded(action)
    }

    fn press_tap_hold<C: ChordContext>(&mut self, key: TapHoldKey, now: Instant, ctx: &mut C) {
        let mods = ctx.active_modifiers();

        if let Some((pos, tapped_at)) = self.last_tap {
            if pos == key.pos && now.saturating_duration_since(tapped_at) < self.config.quick_tap_term {
                if self.policy.quick_tap_eligible(&key) {
                    debug!("Quick tap of {:?}", key.pos);
                    self.resolve_tap(key, now, ctx);
                } else {
                    debug!("Quick tap of {:?}, forced hold", key.pos);
                    self.resolve_hold(key, ctx);
                }
                return;
            }
        }

        let streak_timeout = self.policy.streak_timeout(&key, &self.config);
        if let Some(last) = self.streak {
            if streak_timeout > Duration::from_ticks(0)
                && now.saturating_duration_since(last) < streak_timeout
                && !self.policy.streak_blocked(mods)
            {
                debug!("Streak continues, tap {:?}", key.pos);
                self.resolve_tap(key, now, ctx);
                return;
            }
        }

        let timeout = self.policy.timeout(&key, &self.config);
        debug!("Tap-hold key {:?} pending", key.pos);
        self.pending = Some(PendingChord {
            key,
            pressed_at: now,
            deadline: now + timeout,
        });
    }

    /// Decide a pending key interrupted by a press of `other_pos`
    fn decide(&self, pending: &PendingChord, other_pos: KeyPos, other: KeyAction) -> Resolution {
        let tap_keycode = pending.key.tap_keycode();
        if let Some(other_keycode) = other.keycode() {
            if self.policy.is_chord(tap_keycode, other_keycode) {
                debug!("Chord {:?} + {:?}, hold", tap_keycode, other_keycode);
                return Resolution::Hold;
            }
        }

        let hand = Hand::of(pending.key.pos, self.rows, self.cols);
        let other_hand = Hand::of(other_pos, self.rows, self.cols);
        if hand != other_hand {
            debug!("Opposite hand key {:?} pressed, hold", other_pos);
            Resolution::Hold
        } else if self.policy.same_hand_exception(pending.key.pos, other_pos) {
            debug!("Same hand key {:?} pressed on a chord row, hold", other_pos);
            Resolution::Hold
        } else {
            debug!("Same hand key {:?} pressed, tap", other_pos);
            Resolution::Tap
        }
    }

    /// Tap a key which is still held, its tap action stays active until release
    fn resolve_tap<C: ChordContext>(&mut self, key: TapHoldKey, now: Instant, ctx: &mut C) {
        self.pending = None;
        let mods = ctx.active_modifiers();
        self.activate(key.pos, key.tap, true, ctx);
        self.record_streak(key.tap.keycode(), mods, now);
    }

    fn resolve_hold<C: ChordContext>(&mut self, key: TapHoldKey, ctx: &mut C) {
        self.pending = None;
        debug!("Tap-hold key {:?} resolved as hold", key.pos);
        self.activate(key.pos, key.hold, false, ctx);
        self.streak = None;
        self.last_tap = None;
    }

    fn activate<C: ChordContext>(&mut self, pos: KeyPos, action: Action, tapped: bool, ctx: &mut C) {
        if self.active.is_full() {
            error!("Too many held tap-hold keys, tapping {:?} instead", action);
            ctx.emit_tap(action);
            return;
        }
        ctx.activate_hold(action);
        let _ = self.active.push(ActiveKey { pos, action, tapped });
    }

    /// Pressing a key which isn't tap-hold breaks the quick tap and may extend the streak
    fn on_other_key<C: ChordContext>(&mut self, action: KeyAction, now: Instant, ctx: &mut C) {
        self.last_tap = None;
        let mods = match action {
            KeyAction::Single(a) => ctx.active_modifiers() | a.modifiers(),
            _ => ctx.active_modifiers(),
        };
        self.record_streak(action.keycode(), mods, now);
    }

    fn record_streak(&mut self, keycode: Option<KeyCode>, mods: HidModifiers, now: Instant) {
        self.streak = match keycode {
            Some(k) if self.policy.streak_continues(k, mods) => Some(now),
            _ => None,
        };
    }
}
