// File:    lib.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: The main library crate for otp-input-core, a headless segmented one-time-code input.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! # OTP Input Core Library
//!
//! A headless state machine for segmented one-time-code inputs: a fixed row of single-character
//! cells backed by one logical value, with paste distribution, character validation, focus
//! requests, and a resend cooldown whose counters can be persisted across restarts.
//!
//! Rendering is left to the host. It feeds [`widget::InputEvent`]s into a [`widget::OtpInput`],
//! moves real focus when asked through a [`focus::FocusController`], and calls
//! [`timer::ResendTimer::tick`] once per second while the cooldown is running.

/// Projection of the value onto cells, and masking.
pub mod cells;
/// Character normalization and acceptance rules.
pub mod chars;
/// Serializable widget and resend configuration.
pub mod config;
/// Translation of raw cell events into committed values and focus moves.
pub mod engine;
/// Error types.
pub mod error;
/// Focus requests and controllers.
pub mod focus;
/// Key/value storage backends for timer persistence.
pub mod storage;
/// The resend cooldown and attempt counter.
pub mod timer;
/// Value ownership and change/completion notifications.
pub mod value;
/// The widget facade and its imperative handle.
pub mod widget;

pub use config::{InputKind, OtpConfig, ResendConfig};
pub use error::{OtpError, StorageError};
pub use timer::ResendTimer;
pub use value::Callbacks;
pub use widget::{InputEvent, Key, OtpInput};
