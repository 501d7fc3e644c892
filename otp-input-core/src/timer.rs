// File:    timer.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: Resend cooldown with attempt accounting and best-effort persistence.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! The resend timer.
//!
//! The timer is either idle (`remaining == 0`) or counting down one second per [`ResendTimer::tick`].
//! A resend is allowed only while idle, below the attempt limit, and not disabled. Only one resend
//! can be in flight at a time; the attempt counter moves strictly after the action succeeds.
//!
//! With a storage key configured, `remaining` and `attempts` are written to
//! `{key}:remaining` and `{key}:attempts` and restored on construction, so a countdown survives a
//! restart. Storage errors are logged and otherwise ignored.

use crate::config::ResendConfig;
use crate::storage::{KeyValueStorage, NoopStorage};
use log::{debug, info, warn};
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::time::Duration;

/// How often [`ResendTimer::tick`] is expected to be called.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Formats the remaining seconds for display.
pub type FormatFn = Box<dyn Fn(u32) -> String>;

/// Default countdown format, `M:SS`.
#[must_use]
pub fn format_seconds(total: u32) -> String {
    format!("{}:{:02}", total / 60, total % 60)
}

/// Snapshot of the timer counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimerState {
    /// Seconds left before a resend is allowed.
    pub remaining: u32,
    /// Successful resends so far.
    pub attempts: u32,
}

/// Whether the cooldown is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    /// No cooldown; a resend may be allowed.
    Idle,
    /// Cooling down.
    Counting {
        /// Seconds left.
        remaining: u32,
    },
}

/// Why a resend was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResendBlock {
    /// The cooldown is still running.
    CoolingDown {
        /// Seconds left.
        remaining: u32,
    },
    /// The attempt limit has been reached.
    AttemptsExhausted {
        /// The configured limit.
        max_attempts: u32,
    },
    /// Resending is disabled.
    Disabled,
    /// Another resend has not finished yet.
    InFlight,
}

impl fmt::Display for ResendBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CoolingDown { remaining } => write!(f, "cooling down ({remaining}s left)"),
            Self::AttemptsExhausted { max_attempts } => {
                write!(f, "attempt limit of {max_attempts} reached")
            }
            Self::Disabled => f.write_str("resend is disabled"),
            Self::InFlight => f.write_str("a resend is already in progress"),
        }
    }
}

/// Result of a resend request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResendOutcome {
    /// The action succeeded and the cooldown restarted.
    Sent {
        /// Successful resends including this one.
        attempts: u32,
    },
    /// The request was not allowed; nothing ran.
    Blocked(ResendBlock),
    /// The action failed; the timer stays idle so it can be retried.
    Failed(String),
}

/// Proof that [`ResendTimer::begin_resend`] admitted a resend.
#[derive(Debug)]
#[must_use = "a started resend must be finished with `finish_resend`"]
pub struct ResendTicket {
    _admitted: (),
}

struct Persistence {
    key: String,
    storage: Box<dyn KeyValueStorage>,
}

impl Persistence {
    fn entry(&self, field: &str) -> String {
        format!("{}:{field}", self.key)
    }

    fn read(&self, field: &str) -> Option<u32> {
        let entry = self.entry(field);
        let raw = match self.storage.get(&entry) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => return None,
            Err(e) => {
                warn!("Could not read '{entry}': {e}");
                return None;
            }
        };
        match raw.trim().parse::<i64>() {
            Ok(n) => Some(u32::try_from(n.max(0)).unwrap_or(u32::MAX)),
            Err(e) => {
                warn!("Ignoring unreadable '{entry}' = {raw:?}: {e}");
                None
            }
        }
    }

    fn write(&mut self, field: &str, value: u32) {
        let entry = self.entry(field);
        if let Err(e) = self.storage.set(&entry, &value.to_string()) {
            warn!("Could not persist '{entry}': {e}");
        }
    }
}

/// Cooldown and attempt counter gating a resend action.
pub struct ResendTimer {
    config: ResendConfig,
    state: TimerState,
    in_flight: bool,
    persistence: Option<Persistence>,
    format: FormatFn,
}

impl ResendTimer {
    /// Creates a timer that keeps its state in memory only.
    #[must_use]
    pub fn new(config: ResendConfig) -> Self {
        Self::with_storage(config, NoopStorage)
    }

    /// Creates a timer persisting to `storage` when the config names a storage key.
    ///
    /// Persisted counters take priority over the configured defaults.
    #[must_use]
    pub fn with_storage(config: ResendConfig, storage: impl KeyValueStorage + 'static) -> Self {
        let persistence = config
            .attempts_storage_key
            .clone()
            .map(|key| Persistence {
                key,
                storage: Box::new(storage),
            });
        let default_remaining = if config.auto_start { config.seconds } else { 0 };
        let state = persistence.as_ref().map_or(
            TimerState {
                remaining: default_remaining,
                attempts: 0,
            },
            |p| TimerState {
                remaining: p.read("remaining").unwrap_or(default_remaining),
                attempts: p.read("attempts").unwrap_or(0),
            },
        );
        debug!(
            "resend timer created: remaining={} attempts={}",
            state.remaining, state.attempts
        );
        Self {
            config,
            state,
            in_flight: false,
            persistence,
            format: Box::new(format_seconds),
        }
    }

    /// Replaces the countdown formatter.
    #[must_use]
    pub fn with_format(mut self, format: impl Fn(u32) -> String + 'static) -> Self {
        self.format = Box::new(format);
        self
    }

    /// The configuration this timer was built from.
    #[must_use]
    pub const fn config(&self) -> &ResendConfig {
        &self.config
    }

    /// Current counters.
    #[must_use]
    pub const fn state(&self) -> TimerState {
        self.state
    }

    /// Seconds left in the cooldown.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.state.remaining
    }

    /// Successful resends so far.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.state.attempts
    }

    /// Whether a resend is currently running.
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Idle or counting.
    #[must_use]
    pub const fn phase(&self) -> TimerPhase {
        match self.state.remaining {
            0 => TimerPhase::Idle,
            remaining => TimerPhase::Counting { remaining },
        }
    }

    /// Whether ticks should keep coming.
    #[must_use]
    pub const fn is_counting(&self) -> bool {
        self.state.remaining > 0
    }

    /// Blocks or unblocks resending.
    pub const fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
    }

    /// Advances the cooldown by one second. Does nothing while idle.
    pub fn tick(&mut self) -> TimerPhase {
        if self.state.remaining == 0 {
            return TimerPhase::Idle;
        }
        self.state.remaining -= 1;
        let remaining = self.state.remaining;
        if let Some(p) = self.persistence.as_mut() {
            p.write("remaining", remaining);
        }
        self.phase()
    }

    /// Restarts the cooldown at the configured number of seconds.
    pub fn start(&mut self) {
        self.state.remaining = self.config.seconds;
        let seconds = self.config.seconds;
        if let Some(p) = self.persistence.as_mut() {
            p.write("remaining", seconds);
        }
    }

    /// Checks whether a resend would be admitted right now.
    ///
    /// # Errors
    ///
    /// Returns the first reason the resend is blocked.
    pub const fn check_resend(&self) -> Result<(), ResendBlock> {
        if self.config.disabled {
            return Err(ResendBlock::Disabled);
        }
        if self.in_flight {
            return Err(ResendBlock::InFlight);
        }
        if self.state.remaining > 0 {
            return Err(ResendBlock::CoolingDown {
                remaining: self.state.remaining,
            });
        }
        if let Some(max_attempts) = self.config.max_attempts {
            if self.state.attempts >= max_attempts {
                return Err(ResendBlock::AttemptsExhausted { max_attempts });
            }
        }
        Ok(())
    }

    /// Whether the resend control should be enabled.
    #[must_use]
    pub const fn can_resend(&self) -> bool {
        self.check_resend().is_ok()
    }

    /// Admits a resend and marks it in flight.
    ///
    /// # Errors
    ///
    /// Returns why the resend is blocked; the timer is unchanged in that case.
    pub fn begin_resend(&mut self) -> Result<ResendTicket, ResendBlock> {
        self.check_resend()?;
        self.in_flight = true;
        Ok(ResendTicket { _admitted: () })
    }

    /// Completes a resend started with [`Self::begin_resend`].
    ///
    /// On success the attempt counter increments and the cooldown restarts, both persisted.
    /// On failure only the in-flight mark is cleared.
    pub fn finish_resend(
        &mut self,
        ticket: ResendTicket,
        result: Result<(), String>,
    ) -> ResendOutcome {
        let ResendTicket { _admitted: () } = ticket;
        self.in_flight = false;
        match result {
            Ok(()) => {
                self.state.attempts = self.state.attempts.saturating_add(1);
                let attempts = self.state.attempts;
                if let Some(p) = self.persistence.as_mut() {
                    p.write("attempts", attempts);
                }
                self.start();
                info!(
                    "Resend #{attempts} succeeded; cooling down for {}s",
                    self.config.seconds
                );
                ResendOutcome::Sent { attempts }
            }
            Err(e) => {
                warn!("Resend failed: {e}");
                ResendOutcome::Failed(e)
            }
        }
    }

    /// Runs `action` if a resend is allowed and records its outcome.
    ///
    /// The exclusive borrow held across the await, together with the in-flight mark, keeps at
    /// most one resend running.
    pub async fn resend<F, Fut, E>(&mut self, action: F) -> ResendOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: fmt::Display,
    {
        let ticket = match self.begin_resend() {
            Ok(ticket) => ticket,
            Err(block) => {
                debug!("resend blocked: {block}");
                return ResendOutcome::Blocked(block);
            }
        };
        let result = action().await.map_err(|e| e.to_string());
        self.finish_resend(ticket, result)
    }

    /// Countdown text while counting, empty while idle.
    #[must_use]
    pub fn status_text(&self) -> String {
        if self.state.remaining > 0 {
            (self.format)(self.state.remaining)
        } else {
            String::new()
        }
    }

    /// Text for the resend control.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.config.label
    }
}

impl fmt::Debug for ResendTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResendTimer")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("in_flight", &self.in_flight)
            .field(
                "storage_key",
                &self.persistence.as_ref().map(|p| p.key.as_str()),
            )
            .finish_non_exhaustive()
    }
}
