use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Instant, Ticker};
use usbd_hid::descriptor::KeyboardReport;

use crate::action::{Action, KeyAction};
use crate::channel::{KEY_EVENT_CHANNEL, KEYBOARD_REPORT_CHANNEL};
use crate::config::KeyboardConfig;
use crate::event::KeyEvent;
use crate::hid::{ActionOutput, HidState};
use crate::keymap::KeyMap;
use crate::modifier::HidModifiers;
use crate::policy::ChordPolicy;
use crate::repeat::{RepeatController, RepeatTask};
use crate::scheduler::Scheduler;
use crate::tap_hold::{ChordContext, ChordResolver, Outcome};

/// The keyboard: chord resolution, key repeat and layers on top of a keymap.
///
/// Feed it key events with [`Keyboard::process_event`], call [`Keyboard::tick`] at the tick
/// interval and take the reports with [`Keyboard::take_report`]. [`Keyboard::run`] does all of
/// this with the static channels.
pub struct Keyboard<'a, P: ChordPolicy, const ROW: usize, const COL: usize, const NUM_LAYER: usize> {
    /// Keymap
    keymap: KeyMap<'a, ROW, COL, NUM_LAYER>,
    /// Pending and held tap-hold keys
    resolver: ChordResolver<P>,
    /// Repeat key state
    repeat: RepeatController,
    /// Deferred repeat taps
    scheduler: Scheduler<RepeatTask>,
    /// Held keys and queued reports
    hid: HidState,
    tick_interval: Duration,
}

/// Layer actions go to the keymap, everything else to the hid state
struct KeyboardOutput<'k, 'a, const ROW: usize, const COL: usize, const NUM_LAYER: usize> {
    keymap: &'k mut KeyMap<'a, ROW, COL, NUM_LAYER>,
    hid: &'k mut HidState,
}

impl<const ROW: usize, const COL: usize, const NUM_LAYER: usize> ActionOutput
    for KeyboardOutput<'_, '_, ROW, COL, NUM_LAYER>
{
    fn activate_hold(&mut self, action: Action) {
        match action {
            Action::LayerOn(layer) => {
                self.keymap.activate_layer(layer).ok();
            }
            _ => self.hid.press(action),
        }
    }

    fn deactivate_hold(&mut self, action: Action) {
        match action {
            Action::LayerOn(layer) => {
                self.keymap.deactivate_layer(layer).ok();
            }
            _ => self.hid.release(action),
        }
    }

    fn active_modifiers(&self) -> HidModifiers {
        self.hid.modifiers()
    }
}

impl<const ROW: usize, const COL: usize, const NUM_LAYER: usize> ChordContext
    for KeyboardOutput<'_, '_, ROW, COL, NUM_LAYER>
{
    fn lookup(&mut self, event: &KeyEvent) -> KeyAction {
        self.keymap.get_action_with_layer_cache(event)
    }
}

impl<'a, P: ChordPolicy, const ROW: usize, const COL: usize, const NUM_LAYER: usize>
    Keyboard<'a, P, ROW, COL, NUM_LAYER>
{
    pub fn new(layers: &'a [[[KeyAction; COL]; ROW]; NUM_LAYER], policy: P, config: KeyboardConfig) -> Self {
        Self {
            keymap: KeyMap::new(layers),
            resolver: ChordResolver::new(config.behavior.tap_hold, policy, ROW as u8, COL as u8),
            repeat: RepeatController::new(config.behavior.repeat),
            scheduler: Scheduler::new(),
            hid: HidState::new(),
            tick_interval: config.tick_interval,
        }
    }

    pub fn keymap(&self) -> &KeyMap<'a, ROW, COL, NUM_LAYER> {
        &self.keymap
    }

    pub fn resolver(&self) -> &ChordResolver<P> {
        &self.resolver
    }

    /// Modifiers currently held
    pub fn modifiers(&self) -> HidModifiers {
        self.hid.modifiers()
    }

    /// Process one key event, in arrival order
    pub fn process_event(&mut self, event: KeyEvent) {
        let Self {
            keymap,
            resolver,
            repeat,
            scheduler,
            hid,
            ..
        } = self;
        let mut out = KeyboardOutput { keymap, hid };

        match resolver.handle_event(event, &mut out) {
            Outcome::Consumed => {}
            Outcome::Forwarded(KeyAction::Single(action)) => {
                if event.pressed {
                    out.activate_hold(action);
                } else {
                    out.deactivate_hold(action);
                }
            }
            Outcome::Forwarded(KeyAction::Repeat(keycode)) => {
                repeat.on_key_event(&event, keycode, scheduler, &mut out);
            }
            Outcome::Forwarded(action) => {
                trace!("Nothing to do for {:?} at {:?}", action, event.pos);
            }
        }
    }

    /// Expire the pending tap-hold key and run due repeat taps
    pub fn tick(&mut self, now: Instant) {
        let Self {
            keymap,
            resolver,
            repeat,
            scheduler,
            hid,
            ..
        } = self;
        let mut out = KeyboardOutput { keymap, hid };

        resolver.tick(now, &mut out);
        scheduler.tick(now, |task| repeat.fire(task, &mut out));
    }

    /// Take the oldest report which is not sent yet
    pub fn take_report(&mut self) -> Option<KeyboardReport> {
        self.hid.take_report()
    }

    /// Main keyboard task. It receives key events from `KEY_EVENT_CHANNEL`, ticks at the
    /// configured interval and sends the reports to `KEYBOARD_REPORT_CHANNEL`.
    pub async fn run(&mut self) {
        let mut ticker = Ticker::every(self.tick_interval);
        loop {
            match select(KEY_EVENT_CHANNEL.receive(), ticker.next()).await {
                Either::First(event) => self.process_event(event),
                Either::Second(_) => self.tick(Instant::now()),
            }

            while let Some(report) = self.take_report() {
                KEYBOARD_REPORT_CHANNEL.send(report).await;
            }
        }
    }
}
