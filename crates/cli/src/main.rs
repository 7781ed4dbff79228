use std::io::{stdout, Write};
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};
use rust_menus_cli::cli_args::Args;
use rust_menus_cli::menu_screen::{self, ScreenGuard, SessionEnd};
use rust_menus_cli::run_policy::{display_command, exit_status, run_mode, RunMode};
use rust_menus_core::error::{Error, Result};
use rust_menus_core::navigation::Navigator;
use rust_menus_core::resolver::ResolvedCommand;
use rust_menus_core::session::SessionState;
use rust_menus_core::suggestions::SuggestionProvider;
use rust_menus_core::{execution, file_handling};

/// Load the menu definition and the value history
fn initialize(args: &Args) -> Result<Navigator> {
    let menu_path = args.menu_path();
    debug!("Menu path: `{menu_path}`");
    let (menu, values) = file_handling::load_menu(&menu_path)?;

    let history_path = args.history_path();
    debug!("History path: `{history_path}`");
    let history = file_handling::get_history(&history_path)?;

    let state = SessionState::new(values, history, SuggestionProvider::from_env());
    Ok(Navigator::new(menu, state))
}

fn save_history(args: &Args, navigator: &Navigator) -> Result<()> {
    if args.skip_history_save {
        info!("Skipping history save was specified. Not writing history.");
        return Ok(());
    }

    file_handling::write_history(&args.history_path(), &navigator.state().history)
}

fn run_command(args: &Args, resolved: &ResolvedCommand) -> Result<()> {
    println!("Executing command:\n{}", display_command(resolved));

    if args.dry_run {
        println!("Dry run is specified, not executing.");
        return Ok(());
    }

    stdout().flush()?;
    execution::execute_tokens(&resolved.tokens)
}

fn execute() -> Result<u8> {
    let args = Args::parse();
    let mut navigator = initialize(&args)?;
    let mut has_results = false;

    loop {
        let session_end = {
            let _screen = ScreenGuard::enter()?;
            menu_screen::select_command(&mut navigator, has_results)?
        };

        let SessionEnd::Execute(resolved) = session_end else {
            return Ok(0);
        };

        save_history(&args, &navigator)?;
        let result = run_command(&args, &resolved);

        match run_mode(args.inplace, &resolved) {
            RunMode::Exit => {
                return match result {
                    Err(e) if !matches!(e, Error::SubProcessExit(_)) => Err(e),
                    other => Ok(exit_status(&other)),
                };
            }
            RunMode::Inplace => {
                match &result {
                    Ok(()) => println!("Command finished successfully."),
                    Err(e) => eprintln!("{e}"),
                }
                has_results = true;
                println!("Press any key to return to the menu.");
                menu_screen::pause()?;
            }
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(status) => ExitCode::from(status),
        Err(e) if e.is_configuration() => {
            eprintln!("Invalid menu definition. {e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
