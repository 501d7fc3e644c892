// File:    value.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: The canonical code value, its ownership mode, and the change/completion notifications.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Value ownership and the commit protocol.

use crate::chars::{char_count, truncate_chars};
use log::debug;
use std::fmt;

type Listener = Box<dyn FnMut(&str)>;

/// Notification hooks invoked by the store.
#[derive(Default)]
pub struct Callbacks {
    on_change: Option<Listener>,
    on_complete: Option<Listener>,
    on_invalid_char: Option<Listener>,
}

impl Callbacks {
    /// Creates a set with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with every committed value.
    #[must_use]
    pub fn on_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Called with the full value when it reaches the configured length.
    #[must_use]
    pub fn on_complete(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Called with the raw character whenever input is rejected.
    #[must_use]
    pub fn on_invalid_char(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_invalid_char = Some(Box::new(f));
        self
    }

    fn change(&mut self, value: &str) {
        if let Some(f) = self.on_change.as_mut() {
            f(value);
        }
    }

    fn complete(&mut self, value: &str) {
        if let Some(f) = self.on_complete.as_mut() {
            f(value);
        }
    }

    fn invalid(&mut self, raw: &str) {
        if let Some(f) = self.on_invalid_char.as_mut() {
            f(raw);
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_change", &self.on_change.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .field("on_invalid_char", &self.on_invalid_char.is_some())
            .finish()
    }
}

/// Who owns the canonical value. Fixed when the store is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueMode {
    /// The caller owns the value; commits only propose a new one.
    Controlled,
    /// The store owns the value.
    Uncontrolled,
}

/// Holds the canonical value and runs the commit protocol.
#[derive(Debug)]
pub struct ValueStore {
    mode: ValueMode,
    length: usize,
    /// Controlled: the last externally supplied value. Uncontrolled: the value itself.
    value: String,
    /// Whether the last committed or observed value was full.
    complete: bool,
    callbacks: Callbacks,
}

impl ValueStore {
    /// Creates a store that owns its value, seeded from `default_value`.
    ///
    /// A full default value does not fire completion.
    #[must_use]
    pub fn uncontrolled(length: usize, default_value: &str, callbacks: Callbacks) -> Self {
        let value = truncate_chars(default_value, length);
        let complete = char_count(&value) == length;
        Self {
            mode: ValueMode::Uncontrolled,
            length,
            value,
            complete,
            callbacks,
        }
    }

    /// Creates a store that mirrors a caller-owned value.
    ///
    /// Completion fires immediately when `value` is already full.
    #[must_use]
    pub fn controlled(length: usize, value: &str, callbacks: Callbacks) -> Self {
        let mut store = Self {
            mode: ValueMode::Controlled,
            length,
            value: String::new(),
            complete: false,
            callbacks,
        };
        store.observe_external(value);
        store
    }

    /// The ownership mode.
    #[must_use]
    pub const fn mode(&self) -> ValueMode {
        self.mode
    }

    /// The configured cell count.
    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }

    /// The current canonical value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the current value fills every cell.
    #[must_use]
    pub fn is_full(&self) -> bool {
        char_count(&self.value) == self.length
    }

    /// Feeds a new caller-owned value into a controlled store, truncated to the cell count.
    ///
    /// Fires completion once when the value transitions into the full state.
    /// Uncontrolled stores ignore this.
    pub fn observe_external(&mut self, value: &str) {
        if self.mode == ValueMode::Uncontrolled {
            debug!("ignoring external value for uncontrolled input");
            return;
        }
        self.value = truncate_chars(value, self.length);
        let full = self.is_full();
        if full && !self.complete {
            self.callbacks.complete(&self.value);
        }
        self.complete = full;
    }

    /// Commits `next` (truncated to the cell count).
    ///
    /// Uncontrolled stores keep it; controlled stores only report it. Change listeners always
    /// run, completion listeners run on the transition into the full state.
    pub fn commit(&mut self, next: &str) {
        let next = truncate_chars(next, self.length);
        debug!("commit {next:?} ({:?})", self.mode);
        if self.mode == ValueMode::Uncontrolled {
            self.value.clone_from(&next);
        }
        self.callbacks.change(&next);
        let full = char_count(&next) == self.length;
        if full && !self.complete {
            self.callbacks.complete(&next);
        }
        self.complete = full;
    }

    /// Re-signals completion for a full value, even if it already fired.
    ///
    /// Returns whether the listener ran.
    pub fn submit_if_complete(&mut self) -> bool {
        if !self.is_full() {
            return false;
        }
        let value = self.value.clone();
        self.callbacks.complete(&value);
        true
    }

    /// Reports a rejected character.
    pub fn reject(&mut self, raw: &str) {
        debug!("rejected character {raw:?}");
        self.callbacks.invalid(raw);
    }
}
