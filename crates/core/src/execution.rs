use std::process::{Command, Stdio};

use log::info;

use crate::error::{Error, Result};

/// Builds a process from command-line tokens. The first token is the
/// program; no shell is involved, so tokens are passed through verbatim.
///
/// # Errors
///
/// Returns [`Error::EmptyCommand`] when there are no tokens.
pub fn build_command(tokens: &[String]) -> Result<Command> {
    let Some((program, arguments)) = tokens.split_first() else {
        return Err(Error::EmptyCommand);
    };

    let mut command = Command::new(program);
    command.args(arguments);
    Ok(command)
}

/// Executes a command attached to the current terminal.
///
/// # Errors
///
/// Returns an error if the command cannot be spawned or exits with a
/// non-zero status.
pub fn execute_command(mut command: Command) -> Result<()> {
    let command = command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    let status = command.spawn()?.wait()?;
    info!("Command exited with {status}");

    if status.success() {
        Ok(())
    } else {
        Err(Error::SubProcessExit(status.code()))
    }
}

/// Builds and executes a command from tokens.
///
/// # Errors
///
/// See [`build_command`] and [`execute_command`].
pub fn execute_tokens(tokens: &[String]) -> Result<()> {
    execute_command(build_command(tokens)?)
}
