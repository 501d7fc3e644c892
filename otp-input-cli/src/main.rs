#![deny(missing_docs)]
//! A command-line host for the OTP input core: drives a one-time-code input from a script or
//! stdin, renders its cells, and runs the resend cooldown in real time.

use clap::{Parser, Subcommand};
use log::{error, info};
use otp_input_core::config::load_config;
use otp_input_core::storage::{JsonFileStorage, KeyValueStorage};
use otp_input_core::{InputEvent, OtpConfig};
use session::{Delivery, Session};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::BufReader;

mod command;
mod session;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "EXAMPLES:\n  \n# Type a code interactively\notp-input run\n\n# Replay a script with a persisted resend timer\notp-input --config ./otp.json --state ./otp_state.json run --script ./session.txt\n\n# Check whether a pasted code fills the input\notp-input check 123-456\n\n# Inspect the persisted resend timer\notp-input --state ./otp_state.json timer status --key login"
)]
struct Cli {
    /// Path to the JSON input configuration. Defaults to a 6-digit numeric input.
    #[arg(long, global = true, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Path to the JSON file holding persisted resend timer state.
    #[arg(long, global = true, value_name = "STATE_FILE")]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an input session, reading one command per line
    #[command(
        after_help = "COMMANDS:\n  type <i> [text]   paste <i> <text>   backspace <i>   left <i>   right <i>\n  enter [i]   focus [i]   blur   clear   set <value>   sync <value>   get\n  tick [n]   resend   status   show   json   quit"
    )]
    Run {
        /// Read commands from this file instead of stdin
        #[arg(long, value_name = "SCRIPT_FILE")]
        script: Option<PathBuf>,

        /// Simulated delivery time of a resent code, in milliseconds
        #[arg(long, default_value_t = 0)]
        resend_delay_ms: u64,

        /// Make every simulated code delivery fail
        #[arg(long)]
        fail_resend: bool,
    },
    /// Paste a code into a fresh input and report whether it is complete
    Check {
        /// The code to paste
        code: String,
    },
    /// Inspect or reset persisted resend timer state
    Timer {
        #[command(subcommand)]
        command: TimerCommands,
    },
}

#[derive(Subcommand)]
enum TimerCommands {
    /// Show the persisted remaining seconds and attempt count
    Status {
        /// The attempts storage key used by the input
        #[arg(long)]
        key: String,
    },
    /// Zero the persisted remaining seconds and attempt count
    Reset {
        /// The attempts storage key used by the input
        #[arg(long)]
        key: String,
    },
}

fn require_state(state: Option<&Path>) -> &Path {
    state.unwrap_or_else(|| {
        error!("A --state path is required for this command.");
        std::process::exit(1);
    })
}

fn session_or_exit(config: &OtpConfig, state: Option<&Path>, delivery: Delivery) -> Session {
    Session::new(config, state, delivery).unwrap_or_else(|e| {
        error!("Failed to create the input: {e}");
        std::process::exit(1);
    })
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path).unwrap_or_else(|e| {
            error!("Failed to load configuration '{}': {e}", path.display());
            std::process::exit(1);
        }),
        None => OtpConfig::default(),
    };
    let state = cli.state.as_deref();

    match cli.command {
        Commands::Run {
            script,
            resend_delay_ms,
            fail_resend,
        } => {
            let delivery = Delivery {
                delay: Duration::from_millis(resend_delay_ms),
                fail: fail_resend,
            };
            let session = session_or_exit(&config, state, delivery);
            let result = match script {
                Some(path) => match tokio::fs::File::open(&path).await {
                    Ok(file) => session.run(BufReader::new(file)).await,
                    Err(e) => {
                        error!("Failed to open script '{}': {e}", path.display());
                        std::process::exit(1);
                    }
                },
                None => session.run(BufReader::new(tokio::io::stdin())).await,
            };
            if let Err(e) = result {
                error!("Session aborted: {e}");
                std::process::exit(1);
            }
        }
        Commands::Check { code } => {
            let mut session = session_or_exit(&config, None, Delivery::default());
            session
                .input_mut()
                .handle(InputEvent::Paste { index: 0, text: code });
            println!("{}", session.render());
            if session.input().is_complete() {
                println!("complete");
            } else {
                println!("incomplete");
                std::process::exit(1);
            }
        }
        Commands::Timer { command } => {
            let path = require_state(state);
            let mut storage = JsonFileStorage::new(path);
            match command {
                TimerCommands::Status { key } => {
                    for field in ["remaining", "attempts"] {
                        match storage.get(&format!("{key}:{field}")) {
                            Ok(Some(value)) => println!("{field}: {value}"),
                            Ok(None) => println!("{field}: unset"),
                            Err(e) => {
                                error!("Failed to read timer state: {e}");
                                std::process::exit(1);
                            }
                        }
                    }
                }
                TimerCommands::Reset { key } => {
                    for field in ["remaining", "attempts"] {
                        if let Err(e) = storage.set(&format!("{key}:{field}"), "0") {
                            error!("Failed to reset timer state: {e}");
                            std::process::exit(1);
                        }
                    }
                    info!("Reset resend timer '{key}' in '{}'", path.display());
                    println!("Timer '{key}' reset.");
                }
            }
        }
    }
}
