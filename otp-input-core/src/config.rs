// File:    config.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: Serializable configuration for the input widget and its resend timer.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Widget configuration.
//!
//! Everything that can be expressed as data lives here; closures (listeners, the resend action,
//! the countdown formatter) are supplied in code.

use crate::cells::MaskPolicy;
use crate::chars::AllowedChars;
use crate::error::OtpError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default number of cells.
pub const DEFAULT_LENGTH: usize = 6;
/// Default resend cooldown in seconds.
pub const DEFAULT_RESEND_SECONDS: u32 = 30;

/// What kind of characters the cells expect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Digits only, with a numeric keyboard affordance.
    #[default]
    Number,
    /// Any single character.
    Text,
}

impl InputKind {
    /// The `inputmode` hint for each cell.
    #[must_use]
    pub const fn input_mode(self) -> &'static str {
        match self {
            Self::Number => "numeric",
            Self::Text => "text",
        }
    }

    /// The input `type` attribute for each cell.
    #[must_use]
    pub const fn input_type(self) -> &'static str {
        match self {
            Self::Number => "tel",
            Self::Text => "text",
        }
    }

    /// The validation pattern attribute, if any.
    #[must_use]
    pub const fn pattern(self) -> Option<&'static str> {
        match self {
            Self::Number => Some("[0-9]*"),
            Self::Text => None,
        }
    }
}

/// Configuration of the resend cooldown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResendConfig {
    /// Cooldown length in seconds.
    pub seconds: u32,
    /// Start counting down as soon as the timer is created.
    pub auto_start: bool,
    /// Upper bound on successful resends, if any.
    pub max_attempts: Option<u32>,
    /// Prefix of the persisted `remaining`/`attempts` entries. `None` keeps state in memory.
    pub attempts_storage_key: Option<String>,
    /// Blocks the resend action entirely.
    pub disabled: bool,
    /// Text for the resend control.
    pub label: String,
}

impl Default for ResendConfig {
    fn default() -> Self {
        Self {
            seconds: DEFAULT_RESEND_SECONDS,
            auto_start: true,
            max_attempts: None,
            attempts_storage_key: None,
            disabled: false,
            label: "Resend".to_string(),
        }
    }
}

/// Configuration of one OTP input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtpConfig {
    /// Number of cells.
    pub length: usize,
    /// Caller-owned value. Its presence selects controlled mode.
    pub value: Option<String>,
    /// Initial value in uncontrolled mode.
    pub default_value: Option<String>,
    /// Expected character kind.
    #[serde(rename = "type")]
    pub kind: InputKind,
    /// Set of accepted characters, overriding the rule implied by `kind`.
    pub allowed_chars: Option<String>,
    /// Regular expression a single character must match; takes precedence over `allowed_chars`.
    pub allowed_pattern: Option<String>,
    /// Replacement shown instead of entered characters.
    pub mask: Option<String>,
    /// Show real characters while a cell has focus.
    pub reveal_on_focus: bool,
    /// Base for per-cell ids (`{name}-{index}`).
    pub name: Option<String>,
    /// Placeholder for empty cells.
    pub placeholder: Option<String>,
    /// Focus the first cell on creation.
    pub auto_focus: bool,
    /// Ignore all edit events.
    pub disabled: bool,
    /// Resend cooldown; `None` means no resend control.
    pub resend: Option<ResendConfig>,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            value: None,
            default_value: None,
            kind: InputKind::Number,
            allowed_chars: None,
            allowed_pattern: None,
            mask: None,
            reveal_on_focus: false,
            name: None,
            placeholder: None,
            auto_focus: false,
            disabled: false,
            resend: None,
        }
    }
}

impl OtpConfig {
    /// The acceptance rule: `allowed_pattern`, then `allowed_chars`, then the default for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`OtpError::Pattern`] when `allowed_pattern` does not compile.
    pub fn allowed(&self) -> Result<AllowedChars, OtpError> {
        if let Some(pattern) = &self.allowed_pattern {
            return Ok(AllowedChars::Pattern(Regex::new(pattern)?));
        }
        Ok(match (&self.allowed_chars, self.kind) {
            (Some(set), _) => AllowedChars::OneOf(set.clone()),
            (None, InputKind::Number) => AllowedChars::Digits,
            (None, InputKind::Text) => AllowedChars::AnyChar,
        })
    }

    /// The masking policy.
    #[must_use]
    pub fn mask_policy(&self) -> MaskPolicy {
        MaskPolicy {
            mask: self.mask.clone(),
            reveal_on_focus: self.reveal_on_focus,
        }
    }

    /// Checks the preconditions that cannot be expressed in the type.
    ///
    /// # Errors
    ///
    /// Returns [`OtpError::InvalidLength`] when `length` is zero, or [`OtpError::Pattern`] when
    /// `allowed_pattern` does not compile.
    pub fn validate(&self) -> Result<(), OtpError> {
        if self.length == 0 {
            return Err(OtpError::InvalidLength {
                length: self.length,
            });
        }
        self.allowed()?;
        Ok(())
    }
}

/// Loads and validates a configuration from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or fails validation.
pub fn load_config(path: &Path) -> Result<OtpConfig, OtpError> {
    let raw = fs::read_to_string(path)?;
    let config: OtpConfig = serde_json::from_str(&raw)?;
    config.validate()?;
    Ok(config)
}
