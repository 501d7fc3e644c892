// File:    session.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: A terminal rendering layer that drives an OTP input and its resend timer.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use crate::command::Command;
use log::{debug, info};
use otp_input_core::focus::{FocusRecorder, FocusRequest};
use otp_input_core::storage::JsonFileStorage;
use otp_input_core::timer::{ResendOutcome, TICK_INTERVAL};
use otp_input_core::{Callbacks, InputEvent, Key, OtpConfig, OtpError, OtpInput, ResendTimer};
use std::path::Path;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{Instant, Interval, interval_at};

/// How the simulated resend action behaves.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Delivery {
    pub(crate) delay: Duration,
    pub(crate) fail: bool,
}

impl Delivery {
    async fn send(self) -> Result<(), String> {
        tokio::time::sleep(self.delay).await;
        if self.fail {
            return Err("code delivery failed".to_string());
        }
        println!("code sent");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Prints every notification the widget emits.
fn printing_callbacks() -> Callbacks {
    Callbacks::new()
        .on_change(|value| println!("change: {value}"))
        .on_complete(|value| println!("complete: {value}"))
        .on_invalid_char(|raw| println!("invalid: {raw}"))
}

/// Builds the resend timer described by `config`, persisting to `state` when given.
pub(crate) fn build_timer(config: &OtpConfig, state: Option<&Path>) -> Option<ResendTimer> {
    let resend = config.resend.clone()?;
    let mut timer = match state {
        Some(path) => ResendTimer::with_storage(resend, JsonFileStorage::new(path)),
        None => ResendTimer::new(resend),
    };
    if config.disabled {
        timer.set_disabled(true);
    }
    Some(timer)
}

/// Waits for the next tick, or forever when no ticker is armed.
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

/// One widget plus its timer, rendered as text.
pub(crate) struct Session {
    input: OtpInput,
    focus: FocusRecorder,
    focused: Option<usize>,
    timer: Option<ResendTimer>,
    placeholder: String,
    delivery: Delivery,
}

impl Session {
    pub(crate) fn new(
        config: &OtpConfig,
        state: Option<&Path>,
        delivery: Delivery,
    ) -> Result<Self, OtpError> {
        let focus = FocusRecorder::new();
        let input = OtpInput::new(config, printing_callbacks(), focus.clone())?;
        Ok(Self {
            input,
            focus,
            focused: None,
            timer: build_timer(config, state),
            placeholder: config
                .placeholder
                .clone()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| "_".to_string()),
            delivery,
        })
    }

    pub(crate) const fn input(&self) -> &OtpInput {
        &self.input
    }

    pub(crate) fn input_mut(&mut self) -> &mut OtpInput {
        &mut self.input
    }

    /// Replays the focus requests issued since the last call and returns the focused cell.
    fn settle_focus(&mut self) -> Option<usize> {
        if let Some(last) = self.focus.take().pop() {
            self.focused = match last {
                FocusRequest::Cell(index) => Some(index),
                FocusRequest::BlurAll => None,
            };
        }
        self.focused
    }

    /// The cell row, e.g. `[1 2 _ _ _ _] focus=2`.
    pub(crate) fn render(&mut self) -> String {
        let focused = self.settle_focus();
        let cells: Vec<String> = self
            .input
            .display_cells(focused.is_some())
            .into_iter()
            .map(|c| if c.is_empty() { self.placeholder.clone() } else { c })
            .collect();
        let mut line = format!("[{}]", cells.join(" "));
        if let Some(index) = focused {
            line.push_str(&format!(" focus={index}"));
        }
        line
    }

    fn timer_status(&self) -> String {
        let Some(timer) = &self.timer else {
            return "resend: not configured".to_string();
        };
        let state = timer.state();
        match timer.check_resend() {
            Ok(()) => format!("{}: ready (attempts {})", timer.label(), state.attempts),
            Err(_) if timer.is_counting() => format!(
                "{}: {} (attempts {})",
                timer.label(),
                timer.status_text(),
                state.attempts
            ),
            Err(block) => format!(
                "{}: unavailable, {block} (attempts {})",
                timer.label(),
                state.attempts
            ),
        }
    }

    fn is_counting(&self) -> bool {
        self.timer.as_ref().is_some_and(ResendTimer::is_counting)
    }

    /// Arms the ticker while the cooldown runs and drops it once it stops.
    fn sync_ticker(&self, ticker: &mut Option<Interval>) {
        match (self.is_counting(), ticker.is_some()) {
            (true, false) => {
                debug!("arming resend ticker");
                *ticker = Some(interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL));
            }
            (false, true) => {
                debug!("stopping resend ticker");
                *ticker = None;
            }
            _ => {}
        }
    }

    fn tick(&mut self, count: u32) {
        if let Some(timer) = self.timer.as_mut() {
            for _ in 0..count {
                timer.tick();
            }
        }
    }

    async fn resend(&mut self) {
        let delivery = self.delivery;
        let Some(timer) = self.timer.as_mut() else {
            println!("resend: not configured");
            return;
        };
        match timer.resend(|| delivery.send()).await {
            ResendOutcome::Sent { attempts } => println!("resend: sent (attempt {attempts})"),
            ResendOutcome::Blocked(block) => println!("resend: blocked, {block}"),
            ResendOutcome::Failed(e) => println!("resend: failed, {e}"),
        }
    }

    async fn apply(&mut self, command: Command) -> Flow {
        debug!("applying {command:?}");
        match command {
            Command::Type { index, text } => self.input.handle(InputEvent::Input { index, text }),
            Command::Paste { index, text } => self.input.handle(InputEvent::Paste { index, text }),
            Command::Backspace(index) => self.key(index, Key::Backspace),
            Command::Left(index) => self.key(index, Key::ArrowLeft),
            Command::Right(index) => self.key(index, Key::ArrowRight),
            Command::Enter(index) => self.key(index, Key::Enter),
            Command::Focus(index) => self.input.focus(index),
            Command::Blur => self.input.blur(),
            Command::Clear => self.input.clear(),
            Command::Set(value) => self.input.set_value(&value),
            Command::Sync(value) => self.input.sync_value(&value),
            Command::Get => {
                println!("value: {}", self.input.get_value());
                return Flow::Continue;
            }
            Command::Tick(count) => {
                self.tick(count);
                println!("{}", self.timer_status());
                return Flow::Continue;
            }
            Command::Resend => {
                self.resend().await;
                println!("{}", self.timer_status());
                return Flow::Continue;
            }
            Command::Status => {
                println!("{}", self.timer_status());
                return Flow::Continue;
            }
            Command::Json => {
                let any_focused = self.settle_focus().is_some();
                let snapshot = self.input.snapshot(any_focused);
                match serde_json::to_string(&snapshot) {
                    Ok(json) => println!("{json}"),
                    Err(e) => println!("error: {e}"),
                }
                return Flow::Continue;
            }
            Command::Show => {}
            Command::Quit => return Flow::Quit,
        }
        println!("{}", self.render());
        Flow::Continue
    }

    fn key(&mut self, index: usize, key: Key) {
        self.input.handle(InputEvent::Key { index, key });
    }

    /// Processes commands from `reader` until it ends or `quit` arrives, ticking the timer in
    /// real time meanwhile.
    pub(crate) async fn run<R>(mut self, reader: R) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        let mut ticker: Option<Interval> = None;
        self.sync_ticker(&mut ticker);
        println!("{}", self.render());
        if self.timer.is_some() {
            println!("{}", self.timer_status());
        }

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    match Command::parse_line(&line) {
                        Ok(Some(command)) => {
                            if self.apply(command).await == Flow::Quit {
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(e) => println!("error: {e}"),
                    }
                }
                () = next_tick(&mut ticker) => {
                    self.tick(1);
                    println!("{}", self.timer_status());
                }
            }
            self.sync_ticker(&mut ticker);
        }
        info!("Session ended with value '{}'", self.input.get_value());
        Ok(())
    }
}
