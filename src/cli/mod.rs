//! Command-line front end. Each invocation runs a single command against the
//! challenges stored in the data directory.

pub mod commands;
pub mod context;
pub mod output;

use thiserror::Error;

use crate::errors::ChallengeError;

pub use context::{CliMode, ShellContext};

/// Set to a non-zero value to skip confirmations and colours.
pub const SCRIPT_ENV: &str = "CHALLENGE_CORE_CLI_SCRIPT";

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] ChallengeError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Unknown command `{0}`")]
    UnknownCommand(String),
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

pub type CliResult<T = ()> = Result<T, CliError>;

/// Runs one command with the data directory taken from the environment.
pub fn run<I, S>(args: I) -> CliResult
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let mut context = ShellContext::new(CliMode::from_env())?;
    commands::dispatch(&mut context, &args)
}
