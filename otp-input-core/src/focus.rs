// File:    focus.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: Focus requests issued by the edit engine and the controllers that receive them.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Focus control.
//!
//! The core never owns input focus. It only asks the rendering layer to move it.

use std::cell::RefCell;
use std::rc::Rc;

/// A focus change requested by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusRequest {
    /// Move focus to the cell at this index.
    Cell(usize),
    /// Remove focus from every cell.
    BlurAll,
}

/// Receives focus requests. Implemented by the rendering layer.
pub trait FocusController {
    /// Moves input focus to cell `index`.
    fn focus(&mut self, index: usize);
    /// Removes input focus from all cells.
    fn blur_all(&mut self);

    /// Dispatches a [`FocusRequest`].
    fn apply(&mut self, request: FocusRequest) {
        match request {
            FocusRequest::Cell(index) => self.focus(index),
            FocusRequest::BlurAll => self.blur_all(),
        }
    }
}

/// Drops every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFocus;

impl FocusController for NoopFocus {
    fn focus(&mut self, _index: usize) {}
    fn blur_all(&mut self) {}
}

/// Keeps an ordered log of requests.
///
/// Clones share the same log, so a host can hand one clone to the widget and read from the other.
#[derive(Debug, Clone, Default)]
pub struct FocusRecorder {
    log: Rc<RefCell<Vec<FocusRequest>>>,
}

impl FocusRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<FocusRequest> {
        self.log.borrow().clone()
    }

    /// The most recent request.
    #[must_use]
    pub fn last(&self) -> Option<FocusRequest> {
        self.log.borrow().last().copied()
    }

    /// The cell that should hold focus after replaying the log, if any.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        match self.last() {
            Some(FocusRequest::Cell(index)) => Some(index),
            Some(FocusRequest::BlurAll) | None => None,
        }
    }

    /// Clears the log and returns what it held.
    pub fn take(&self) -> Vec<FocusRequest> {
        self.log.borrow_mut().drain(..).collect()
    }
}

impl FocusController for FocusRecorder {
    fn focus(&mut self, index: usize) {
        self.log.borrow_mut().push(FocusRequest::Cell(index));
    }

    fn blur_all(&mut self) {
        self.log.borrow_mut().push(FocusRequest::BlurAll);
    }
}
