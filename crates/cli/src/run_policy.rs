//! What happens to a command once it has been selected.

use rust_menus_core::error::Error;
use rust_menus_core::resolver::ResolvedCommand;

/// Whether the session ends after the command or returns to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Exit,
    Inplace,
}

/// The command's own `inplace` setting wins over the command-line flag.
#[must_use]
pub fn run_mode(inplace_arg: bool, resolved: &ResolvedCommand) -> RunMode {
    if resolved.inplace.unwrap_or(inplace_arg) {
        RunMode::Inplace
    } else {
        RunMode::Exit
    }
}

/// Shell-quoted display form of a resolved command, passwords masked.
#[must_use]
pub fn display_command(resolved: &ResolvedCommand) -> String {
    shlex::try_join(resolved.display.iter().map(String::as_str))
        .unwrap_or_else(|_| resolved.display.join(" "))
}

/// Process exit status mirroring the result of the executed command.
#[must_use]
pub fn exit_status(result: &Result<(), Error>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(Error::SubProcessExit(Some(code))) => u8::try_from(*code).unwrap_or(1),
        Err(_) => 1,
    }
}
