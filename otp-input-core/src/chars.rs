// File:    chars.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: Character normalization and acceptance rules for OTP cells.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Character validation.
//!
//! A "character" here is one extended grapheme cluster, so a cell always holds exactly one
//! user-perceived character even when it is made of several code points.

use regex::Regex;
use std::fmt;
use std::rc::Rc;
use unicode_segmentation::UnicodeSegmentation;

/// Code points of the digit zero in each supported decimal-digit block.
///
/// Every block is ten contiguous code points, zero through nine.
const DIGIT_ZEROS: [u32; 20] = [
    0x0660, // Arabic-Indic
    0x06F0, // Extended Arabic-Indic
    0x07C0, // NKo
    0x0966, // Devanagari
    0x09E6, // Bengali
    0x0A66, // Gurmukhi
    0x0AE6, // Gujarati
    0x0B66, // Oriya
    0x0BE6, // Tamil
    0x0C66, // Telugu
    0x0CE6, // Kannada
    0x0D66, // Malayalam
    0x0DE6, // Sinhala
    0x0E50, // Thai
    0x0ED0, // Lao
    0x0F20, // Tibetan
    0x1040, // Myanmar
    0x17E0, // Khmer
    0x1810, // Mongolian
    0xFF10, // Fullwidth
];

/// Predicate type used by [`AllowedChars::Custom`].
pub type CharPredicate = Rc<dyn Fn(&str) -> bool>;

/// The rule deciding whether a normalized character may occupy a cell.
#[derive(Clone, Default)]
pub enum AllowedChars {
    /// Exactly one ASCII digit.
    #[default]
    Digits,
    /// Any single character.
    AnyChar,
    /// A single character contained in the given set.
    OneOf(String),
    /// A single character matched by the regular expression (unanchored, like `Regex::is_match`).
    Pattern(Regex),
    /// A caller-supplied predicate over a single character.
    Custom(CharPredicate),
}

impl AllowedChars {
    /// Builds a rule from a closure.
    pub fn custom(predicate: impl Fn(&str) -> bool + 'static) -> Self {
        Self::Custom(Rc::new(predicate))
    }

    /// Returns whether `grapheme` (already normalized) passes this rule.
    #[must_use]
    pub fn accepts(&self, grapheme: &str) -> bool {
        if !is_single_grapheme(grapheme) {
            return false;
        }
        match self {
            Self::Digits => grapheme.len() == 1 && grapheme.as_bytes()[0].is_ascii_digit(),
            Self::AnyChar => true,
            Self::OneOf(set) => set.graphemes(true).any(|g| g == grapheme),
            Self::Pattern(re) => re.is_match(grapheme),
            Self::Custom(predicate) => predicate(grapheme),
        }
    }
}

impl fmt::Debug for AllowedChars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digits => f.write_str("Digits"),
            Self::AnyChar => f.write_str("AnyChar"),
            Self::OneOf(set) => f.debug_tuple("OneOf").field(set).finish(),
            Self::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Maps a non-ASCII decimal digit to its ASCII equivalent; other characters pass through.
#[must_use]
pub fn normalize_digit(c: char) -> char {
    let code = u32::from(c);
    DIGIT_ZEROS
        .iter()
        .find(|&&zero| (zero..zero + 10).contains(&code))
        .and_then(|&zero| char::from_digit(code - zero, 10))
        .unwrap_or(c)
}

/// Normalizes one character and tests it against `allowed`.
///
/// Returns `None` for empty input or when the rule rejects the normalized character.
#[must_use]
pub fn sanitize_input_char(raw: &str, allowed: &AllowedChars) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    let normalized: String = raw.chars().map(normalize_digit).collect();
    allowed.accepts(&normalized).then_some(normalized)
}

/// Sanitizes every character of `input`, dropping the rejected ones and keeping order.
#[must_use]
pub fn split_allowed(input: &str, allowed: &AllowedChars) -> Vec<String> {
    input
        .graphemes(true)
        .filter_map(|g| sanitize_input_char(g, allowed))
        .collect()
}

/// Splits `value` into its characters.
#[must_use]
pub fn graphemes(value: &str) -> Vec<&str> {
    value.graphemes(true).collect()
}

/// Counts the characters of `value`.
#[must_use]
pub fn char_count(value: &str) -> usize {
    value.graphemes(true).count()
}

/// Keeps at most `max` characters of `value`.
#[must_use]
pub fn truncate_chars(value: &str, max: usize) -> String {
    value.graphemes(true).take(max).collect()
}

/// Returns the last character of `value`, if any.
#[must_use]
pub fn last_char(value: &str) -> Option<&str> {
    value.graphemes(true).next_back()
}

fn is_single_grapheme(value: &str) -> bool {
    let mut it = value.graphemes(true);
    it.next().is_some() && it.next().is_none()
}
