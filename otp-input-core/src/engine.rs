// File:    engine.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: Turns raw cell events into committed values and focus requests.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! The edit engine.
//!
//! The value is a left-packed sequence of characters, not a row of sparse slots: deleting the
//! character under a cell shifts the following characters one cell to the left.

use crate::chars::{AllowedChars, graphemes, last_char, sanitize_input_char, split_allowed};
use crate::focus::FocusRequest;
use crate::value::ValueStore;
use log::debug;

/// Direction of an arrow-key move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards cell 0.
    Left,
    /// Towards the last cell.
    Right,
}

/// Characters stripped from pasted text before distribution.
fn is_paste_separator(c: char) -> bool {
    c.is_whitespace() || c == '-' || c == '_'
}

/// Replaces `remove` characters of `value` starting at `index` with `insert`.
///
/// When `index` lies past the end of `value`, the insertion is appended.
fn splice(value: &str, index: usize, remove: usize, insert: &[&str]) -> String {
    let chars = graphemes(value);
    let head = index.min(chars.len());
    let tail = (index + remove).min(chars.len());
    let mut next = chars[..head].concat();
    next.push_str(&insert.concat());
    next.push_str(&chars[tail..].concat());
    next
}

/// Applies edit events to a [`ValueStore`] according to an acceptance rule.
#[derive(Debug, Clone, Default)]
pub struct EditEngine {
    allowed: AllowedChars,
}

impl EditEngine {
    /// Creates an engine using `allowed` for validation.
    #[must_use]
    pub const fn new(allowed: AllowedChars) -> Self {
        Self { allowed }
    }

    /// The acceptance rule in use.
    #[must_use]
    pub const fn allowed(&self) -> &AllowedChars {
        &self.allowed
    }

    /// Handles the content of cell `index` changing to `raw`.
    ///
    /// Empty `raw` deletes the character at `index`. Otherwise the last character of `raw` is
    /// validated and written into the cell; focus then advances unless this is the last cell.
    pub fn edit_single(
        &self,
        store: &mut ValueStore,
        index: usize,
        raw: &str,
    ) -> Option<FocusRequest> {
        if out_of_range(store, index) {
            return None;
        }
        let Some(ch) = last_char(raw) else {
            let next = splice(store.value(), index, 1, &[]);
            store.commit(&next);
            return None;
        };
        let Some(accepted) = sanitize_input_char(ch, &self.allowed) else {
            store.reject(ch);
            return None;
        };
        let next = splice(store.value(), index, 1, &[accepted.as_str()]);
        store.commit(&next);
        (index + 1 < store.length()).then_some(FocusRequest::Cell(index + 1))
    }

    /// Distributes pasted text across the cells starting at `index`.
    ///
    /// Separators are stripped and rejected characters skipped; whatever does not fit is dropped.
    /// Focus lands after the last written cell, clamped to the last cell.
    pub fn paste(&self, store: &mut ValueStore, index: usize, raw: &str) -> Option<FocusRequest> {
        if raw.is_empty() || out_of_range(store, index) {
            return None;
        }
        let stripped: String = raw.chars().filter(|&c| !is_paste_separator(c)).collect();
        let mut accepted = split_allowed(&stripped, &self.allowed);
        accepted.truncate(store.length() - index);
        let insert: Vec<&str> = accepted.iter().map(String::as_str).collect();
        let next = splice(store.value(), index, insert.len(), &insert);
        store.commit(&next);
        Some(FocusRequest::Cell(
            (index + insert.len()).min(store.length() - 1),
        ))
    }

    /// Handles backspace in cell `index`.
    ///
    /// An empty cell moves focus left; a filled one loses its character and keeps focus.
    pub fn backspace(&self, store: &mut ValueStore, index: usize) -> Option<FocusRequest> {
        if out_of_range(store, index) {
            return None;
        }
        if graphemes(store.value()).get(index).is_none() {
            return index.checked_sub(1).map(FocusRequest::Cell);
        }
        let next = splice(store.value(), index, 1, &[]);
        store.commit(&next);
        None
    }

    /// Moves focus one cell in `direction`, staying inside the row. The value is untouched.
    #[must_use]
    pub fn navigate(
        &self,
        store: &ValueStore,
        index: usize,
        direction: Direction,
    ) -> Option<FocusRequest> {
        if out_of_range(store, index) {
            return None;
        }
        let target = match direction {
            Direction::Left => index.checked_sub(1)?,
            Direction::Right => index + 1,
        };
        (target < store.length()).then_some(FocusRequest::Cell(target))
    }

    /// Re-signals completion on an explicit submit when the value is full.
    pub fn submit(&self, store: &mut ValueStore) -> bool {
        store.submit_if_complete()
    }
}

fn out_of_range(store: &ValueStore, index: usize) -> bool {
    let out = index >= store.length();
    if out {
        debug!("ignoring event for cell {index} of {}", store.length());
    }
    out
}
