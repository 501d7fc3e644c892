// File:    command.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: Parses the line-oriented session commands fed to `otp-input run`.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use std::num::ParseIntError;
use thiserror::Error;

/// One session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Type { index: usize, text: String },
    Paste { index: usize, text: String },
    Backspace(usize),
    Left(usize),
    Right(usize),
    Enter(usize),
    Focus(usize),
    Blur,
    Clear,
    Set(String),
    Sync(String),
    Get,
    Tick(u32),
    Resend,
    Status,
    Show,
    Json,
    Quit,
}

#[derive(Debug, Error)]
pub(crate) enum CommandError {
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("'{value}' is not a valid number: {source}")]
    InvalidNumber {
        value: String,
        source: ParseIntError,
    },
}

fn number<T>(value: &str) -> Result<T, CommandError>
where
    T: std::str::FromStr<Err = ParseIntError>,
{
    value.parse().map_err(|source| CommandError::InvalidNumber {
        value: value.to_string(),
        source,
    })
}

/// Splits off the leading cell index; the remainder is kept verbatim.
fn indexed<'a>(command: &'static str, args: &'a str) -> Result<(usize, &'a str), CommandError> {
    let (index, rest) = args.split_once(' ').unwrap_or((args, ""));
    if index.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            argument: "a cell index",
        });
    }
    Ok((number(index)?, rest))
}

fn index_only(command: &'static str, args: &str) -> Result<usize, CommandError> {
    indexed(command, args).map(|(index, _)| index)
}

fn optional_index(args: &str) -> Result<usize, CommandError> {
    if args.is_empty() { Ok(0) } else { number(args) }
}

impl Command {
    /// Parses one line. Blank lines and `#` comments yield `None`.
    pub(crate) fn parse_line(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let (name, args) = line.split_once(' ').unwrap_or((line, ""));
        let args = args.trim_start();
        let command = match name {
            "type" => {
                let (index, text) = indexed("type", args)?;
                Self::Type {
                    index,
                    text: text.to_string(),
                }
            }
            "paste" => {
                let (index, text) = indexed("paste", args)?;
                Self::Paste {
                    index,
                    text: text.to_string(),
                }
            }
            "backspace" => Self::Backspace(index_only("backspace", args)?),
            "left" => Self::Left(index_only("left", args)?),
            "right" => Self::Right(index_only("right", args)?),
            "enter" => Self::Enter(optional_index(args)?),
            "focus" => Self::Focus(optional_index(args)?),
            "blur" => Self::Blur,
            "clear" => Self::Clear,
            "set" => Self::Set(args.to_string()),
            "sync" => Self::Sync(args.to_string()),
            "get" => Self::Get,
            "tick" => Self::Tick(if args.is_empty() { 1 } else { number(args)? }),
            "resend" => Self::Resend,
            "status" => Self::Status,
            "show" => Self::Show,
            "json" => Self::Json,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}
