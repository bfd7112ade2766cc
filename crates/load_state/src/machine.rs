//! Pure transition logic for a single page load.
//!
//! The machine owns the current [`LoadState`] and folds [`LoadEvent`]s into it
//! one at a time. It performs no I/O and never fails:
//!
//!   * Events that make no sense in the current state (progress while idle,
//!     a finish after the attempt already failed, ...) are ignored and the
//!     last valid state is kept. The page driver may still deliver events
//!     from a superseded attempt.
//!   * Progress fractions are clamped into `[0.0, 1.0]` and never move
//!     backwards within an attempt.
//!   * Losing connectivity always wins and discards in-flight progress.
//!     Regaining it returns to idle; a new attempt needs a fresh
//!     `LoadStarted`.

use std::mem;

use strum::Display;
use tracing::{debug, info, warn};

use crate::{
    config::LoadConfig,
    event::LoadEvent,
    state::{LoadState, Percent},
    UNKNOWN_ERROR_MESSAGE,
};

/// Why an event was dropped without changing the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum IgnoreReason {
    /// Progress, finish or failure without a load in flight.
    NotLoading,
    /// Load events while offline; connectivity has to come back first.
    Offline,
    /// Connectivity restored while already online.
    AlreadyOnline,
}

/// Outcome of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The state was replaced; `to` must be published.
    Changed { from: LoadState, to: LoadState },
    /// The event was valid but produced a state equal to the current one.
    Unchanged,
    /// The event was dropped.
    Ignored(IgnoreReason),
}

impl Transition {
    /// The state to hand to observers, if any.
    pub fn published(&self) -> Option<&LoadState> {
        match self {
            Transition::Changed { to, .. } => Some(to),
            _ => None,
        }
    }

    pub fn is_changed(&self) -> bool {
        matches!(self, Transition::Changed { .. })
    }
}

#[derive(Debug, Clone)]
pub struct LoadStateMachine {
    current: LoadState,
    attempt: u64,
    unknown_error_message: String,
}

impl Default for LoadStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadStateMachine {
    pub fn new() -> Self {
        Self::with_unknown_error_message(UNKNOWN_ERROR_MESSAGE)
    }

    pub fn from_config(config: &LoadConfig) -> Self {
        Self::with_unknown_error_message(config.unknown_error_message.clone())
    }

    /// `message` replaces blank failure causes reported by the driver.
    pub fn with_unknown_error_message(message: impl Into<String>) -> Self {
        Self {
            current: LoadState::Idle,
            attempt: 0,
            unknown_error_message: message.into(),
        }
    }

    pub fn current(&self) -> &LoadState {
        &self.current
    }

    /// Number of load attempts started so far.
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Back to idle. The attempt counter keeps counting.
    pub fn reset(&mut self) -> Transition {
        self.replace(LoadState::Idle)
    }

    pub fn apply(&mut self, event: LoadEvent) -> Transition {
        let name = event.name();
        let next = match (&self.current, event) {
            (_, LoadEvent::ConnectivityLost) => LoadState::Offline,
            (LoadState::Offline, LoadEvent::ConnectivityRestored) => LoadState::Idle,
            (_, LoadEvent::ConnectivityRestored) => {
                return self.ignore(name, IgnoreReason::AlreadyOnline)
            }
            (LoadState::Offline, _) => return self.ignore(name, IgnoreReason::Offline),
            (_, LoadEvent::LoadStarted) => {
                self.attempt += 1;
                info!(attempt = self.attempt, "load attempt started");
                LoadState::Progressing {
                    percent: Percent::ZERO,
                }
            }
            (LoadState::Progressing { percent }, LoadEvent::LoadProgressed { fraction }) => {
                LoadState::Progressing {
                    percent: Percent::clamped(fraction).max(*percent),
                }
            }
            (LoadState::Progressing { .. }, LoadEvent::LoadFinished) => LoadState::Success,
            (LoadState::Progressing { .. }, LoadEvent::LoadFailed { message }) => {
                LoadState::Error {
                    message: self.failure_message(message),
                }
            }
            _ => return self.ignore(name, IgnoreReason::NotLoading),
        };

        self.replace(next)
    }

    fn replace(&mut self, next: LoadState) -> Transition {
        if next == self.current {
            return Transition::Unchanged;
        }
        let from = mem::replace(&mut self.current, next.clone());
        debug!(from = %from, to = %next, attempt = self.attempt, "load state changed");
        Transition::Changed { from, to: next }
    }

    fn ignore(&self, event: &'static str, reason: IgnoreReason) -> Transition {
        debug!(event, state = %self.current, %reason, "ignoring load event");
        Transition::Ignored(reason)
    }

    fn failure_message(&self, message: String) -> String {
        if message.trim().is_empty() {
            warn!(
                attempt = self.attempt,
                "driver reported a load failure without a message"
            );
            return self.unknown_error_message.clone();
        }
        message
    }
}
