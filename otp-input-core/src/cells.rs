// File:    cells.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: Projects the canonical value onto the fixed-length row of cells, with optional masking.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Cell projection and masking.

use crate::chars::graphemes;
use serde::{Deserialize, Serialize};

/// Splits `value` into exactly `length` cells, padding with empty strings.
///
/// Characters beyond `length` are not shown.
#[must_use]
pub fn project_cells(value: &str, length: usize) -> Vec<String> {
    let mut cells = vec![String::new(); length];
    for (cell, ch) in cells.iter_mut().zip(graphemes(value)) {
        ch.clone_into(cell);
    }
    cells
}

/// How filled cells are obscured on display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskPolicy {
    /// Replacement shown instead of each entered character; `None` disables masking.
    pub mask: Option<String>,
    /// Show the real characters while any cell has focus.
    pub reveal_on_focus: bool,
}

impl MaskPolicy {
    /// Returns whether characters are currently obscured.
    ///
    /// `any_focused` is supplied by the rendering layer, which owns real input focus.
    #[must_use]
    pub const fn is_active(&self, any_focused: bool) -> bool {
        self.mask.is_some() && (!self.reveal_on_focus || !any_focused)
    }

    /// Applies the mask to projected cells. Empty cells stay empty.
    #[must_use]
    pub fn apply(&self, cells: Vec<String>, any_focused: bool) -> Vec<String> {
        match &self.mask {
            Some(mask) if self.is_active(any_focused) => cells
                .into_iter()
                .map(|c| if c.is_empty() { c } else { mask.clone() })
                .collect(),
            _ => cells,
        }
    }
}
