// File:    widget.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: The OTP input facade: raw event dispatch, imperative handle, and render state.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! The OTP input widget.
//!
//! [`OtpInput`] ties the value store, edit engine, cell projection and focus controller together.
//! A rendering layer feeds it [`InputEvent`]s and reads back cells and attributes.

use crate::cells::{MaskPolicy, project_cells};
use crate::chars::AllowedChars;
use crate::config::{InputKind, OtpConfig};
use crate::engine::{Direction, EditEngine};
use crate::error::OtpError;
use crate::focus::{FocusController, FocusRequest};
use crate::value::{Callbacks, ValueMode, ValueStore};
use log::debug;
use serde::Serialize;
use std::fmt;

/// Keys with special meaning inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Delete the character or step back.
    Backspace,
    /// Focus the previous cell.
    ArrowLeft,
    /// Focus the next cell.
    ArrowRight,
    /// Submit.
    Enter,
    /// Anything else; ignored.
    Other,
}

/// A raw event from the rendering layer, addressed to one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The cell content changed to `text`.
    Input {
        /// Target cell.
        index: usize,
        /// New raw content of the cell.
        text: String,
    },
    /// Text was pasted into the cell.
    Paste {
        /// Target cell.
        index: usize,
        /// Clipboard text.
        text: String,
    },
    /// A key was pressed in the cell.
    Key {
        /// Target cell.
        index: usize,
        /// The key.
        key: Key,
    },
}

/// Attributes the rendering layer passes through to a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellAttributes {
    /// `{name}-{index}` when the widget has a name.
    pub id: Option<String>,
    /// Keyboard hint.
    pub input_mode: &'static str,
    /// Input type.
    pub input_type: &'static str,
    /// Validation pattern.
    pub pattern: Option<&'static str>,
    /// Autofill hint.
    pub auto_complete: &'static str,
    /// Accessible label.
    pub aria_label: String,
    /// Placeholder for an empty cell.
    pub placeholder: String,
    /// Whether the cell accepts input.
    pub disabled: bool,
}

/// Render state of the widget at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Canonical value.
    pub value: String,
    /// Displayed cells, masked if applicable.
    pub cells: Vec<String>,
    /// Whether every cell is filled.
    pub complete: bool,
}

/// A segmented one-time-code input.
pub struct OtpInput {
    store: ValueStore,
    engine: EditEngine,
    kind: InputKind,
    mask: MaskPolicy,
    name: Option<String>,
    placeholder: Option<String>,
    disabled: bool,
    focus: Box<dyn FocusController>,
}

impl OtpInput {
    /// Builds a widget from `config`.
    ///
    /// The mode is controlled when `config.value` is set and uncontrolled otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`OtpError::InvalidLength`] when the configured length is zero.
    pub fn new(
        config: &OtpConfig,
        callbacks: Callbacks,
        focus: impl FocusController + 'static,
    ) -> Result<Self, OtpError> {
        config.validate()?;
        let store = match &config.value {
            Some(value) => ValueStore::controlled(config.length, value, callbacks),
            None => ValueStore::uncontrolled(
                config.length,
                config.default_value.as_deref().unwrap_or_default(),
                callbacks,
            ),
        };
        let mut input = Self {
            store,
            engine: EditEngine::new(config.allowed()?),
            kind: config.kind,
            mask: config.mask_policy(),
            name: config.name.clone(),
            placeholder: config.placeholder.clone(),
            disabled: config.disabled,
            focus: Box::new(focus),
        };
        if config.auto_focus {
            input.request(Some(FocusRequest::Cell(0)));
        }
        Ok(input)
    }

    /// Replaces the acceptance rule, e.g. with [`AllowedChars::Custom`].
    #[must_use]
    pub fn with_allowed(mut self, allowed: AllowedChars) -> Self {
        self.engine = EditEngine::new(allowed);
        self
    }

    /// Number of cells.
    #[must_use]
    pub const fn length(&self) -> usize {
        self.store.length()
    }

    /// Who owns the value.
    #[must_use]
    pub const fn mode(&self) -> ValueMode {
        self.store.mode()
    }

    /// Whether edit events are ignored.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Enables or disables editing.
    pub const fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Whether every cell is filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.store.is_full()
    }

    /// Dispatches a raw event. Ignored while disabled.
    pub fn handle(&mut self, event: InputEvent) {
        if self.disabled {
            debug!("input disabled; dropping {event:?}");
            return;
        }
        let request = match event {
            InputEvent::Input { index, text } => {
                self.engine.edit_single(&mut self.store, index, &text)
            }
            InputEvent::Paste { index, text } => self.engine.paste(&mut self.store, index, &text),
            InputEvent::Key { index, key } => match key {
                Key::Backspace => self.engine.backspace(&mut self.store, index),
                Key::ArrowLeft => self.engine.navigate(&self.store, index, Direction::Left),
                Key::ArrowRight => self.engine.navigate(&self.store, index, Direction::Right),
                Key::Enter => {
                    self.engine.submit(&mut self.store);
                    None
                }
                Key::Other => None,
            },
        };
        self.request(request);
    }

    /// Feeds the caller's latest value in controlled mode.
    ///
    /// Completion fires when this makes the value full.
    pub fn sync_value(&mut self, value: &str) {
        self.store.observe_external(value);
    }

    /// Focuses cell `index`. Out-of-range indices are ignored.
    pub fn focus(&mut self, index: usize) {
        if index < self.length() {
            self.request(Some(FocusRequest::Cell(index)));
        }
    }

    /// Removes focus from every cell.
    pub fn blur(&mut self) {
        self.request(Some(FocusRequest::BlurAll));
    }

    /// Empties the value and focuses the first cell.
    pub fn clear(&mut self) {
        self.store.commit("");
        self.focus(0);
    }

    /// Sets the value, truncated to the cell count.
    ///
    /// In controlled mode this only notifies; the caller decides whether to adopt it.
    pub fn set_value(&mut self, value: &str) {
        self.store.commit(value);
    }

    /// The current value.
    #[must_use]
    pub fn get_value(&self) -> &str {
        self.store.value()
    }

    /// One entry per cell, unmasked.
    #[must_use]
    pub fn cells(&self) -> Vec<String> {
        project_cells(self.store.value(), self.length())
    }

    /// One entry per cell as it should be displayed.
    ///
    /// `any_focused` comes from the rendering layer.
    #[must_use]
    pub fn display_cells(&self, any_focused: bool) -> Vec<String> {
        self.mask.apply(self.cells(), any_focused)
    }

    /// Pass-through attributes for cell `index`.
    #[must_use]
    pub fn cell_attributes(&self, index: usize) -> CellAttributes {
        CellAttributes {
            id: self.name.as_ref().map(|name| format!("{name}-{index}")),
            input_mode: self.kind.input_mode(),
            input_type: self.kind.input_type(),
            pattern: self.kind.pattern(),
            auto_complete: "one-time-code",
            aria_label: format!("OTP digit {}", index + 1),
            placeholder: self.placeholder.clone().unwrap_or_default(),
            disabled: self.disabled,
        }
    }

    /// Captures the render state.
    #[must_use]
    pub fn snapshot(&self, any_focused: bool) -> Snapshot {
        Snapshot {
            value: self.store.value().to_string(),
            cells: self.display_cells(any_focused),
            complete: self.is_complete(),
        }
    }

    fn request(&mut self, request: Option<FocusRequest>) {
        if let Some(request) = request {
            debug!("focus request {request:?}");
            self.focus.apply(request);
        }
    }
}

impl fmt::Debug for OtpInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OtpInput")
            .field("store", &self.store)
            .field("engine", &self.engine)
            .field("kind", &self.kind)
            .field("mask", &self.mask)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}
