//! Accelerating key repeat.
//!
//! The repeat key taps once on press, again after `init_delay`, then at the intervals of
//! the delay table. The last interval is kept once the table is exhausted.

use embassy_time::Duration;

use crate::action::Action;
use crate::config::RepeatConfig;
use crate::event::{KeyEvent, KeyPos};
use crate::hid::ActionOutput;
use crate::keycode::KeyCode;
use crate::scheduler::{Scheduler, TaskToken};

/// Deferred task payload of a repeat session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RepeatTask {
    pub keycode: KeyCode,
    /// Number of scheduled taps so far, saturating at the delay table length
    count: usize,
}

#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct RepeatSession {
    pos: KeyPos,
    token: TaskToken,
}

pub struct RepeatController {
    config: RepeatConfig,
    session: Option<RepeatSession>,
}

impl RepeatController {
    pub fn new(config: RepeatConfig) -> Self {
        Self { config, session: None }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Handle a press or release of a repeat key sending `keycode`
    pub fn on_key_event<O: ActionOutput, const N: usize>(
        &mut self,
        event: &KeyEvent,
        keycode: KeyCode,
        scheduler: &mut Scheduler<RepeatTask, N>,
        out: &mut O,
    ) {
        if event.pressed {
            if let Some(session) = self.session {
                debug!("Repeat session of {:?} is active, ignoring {:?}", session.pos, event.pos);
                return;
            }
            out.emit_tap(Action::Key(keycode));
            let task = RepeatTask { keycode, count: 0 };
            match scheduler.schedule(event.time, self.config.init_delay, task) {
                Ok(token) => {
                    debug!("Repeat of {:?} started", keycode);
                    self.session = Some(RepeatSession { pos: event.pos, token });
                }
                Err(e) => error!("Failed to start repeating {:?}: {:?}", keycode, e),
            }
        } else {
            match self.session {
                Some(session) if session.pos == event.pos => {
                    self.session = None;
                    scheduler.cancel(session.token);
                    debug!("Repeat of {:?} stopped", keycode);
                }
                _ => debug!("Release of repeat key {:?} without session", event.pos),
            }
        }
    }

    /// Run one scheduled repeat, returning the delay until the next one
    pub fn fire<O: ActionOutput>(&self, task: &mut RepeatTask, out: &mut O) -> Option<Duration> {
        out.emit_tap(Action::Key(task.keycode));
        let delays = self.config.delays;
        if delays.is_empty() {
            return None;
        }
        task.count = (task.count + 1).min(delays.len());
        Some(Duration::from_millis(delays[task.count - 1] as u64))
    }
}
