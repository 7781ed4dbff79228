//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the
//! `clap` crate and resolves the paths the arguments point at.

use clap::Parser;
use rust_menus_core::config;

/// Command-line arguments for the rust-menus CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use rust_menus_cli::cli_args::Args;
///
/// let args = Args::parse_from(["rmenu", "--dry-run", "git"]);
/// assert!(args.dry_run);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
#[allow(clippy::struct_excessive_bools)] // silence clippy's warning on this struct
pub struct Args {
    /// Directory holding `menus/` and the value history.
    ///
    /// If not provided, defaults to `$RUST_MENUS_HOME` or `~/.rust-menus`.
    #[arg(long, short = 'c')]
    pub config_dir: Option<String>,

    /// Path to the file that stores previously entered values.
    ///
    /// If not provided, defaults to `history.yml` inside the config directory.
    #[arg(long, short = 'H')]
    pub history_path: Option<String>,

    /// Print the selected command instead of executing it.
    #[arg(long, short = 'd', action)]
    pub dry_run: bool,

    /// Return to the menu after each command instead of exiting.
    ///
    /// A command's own `inplace` setting takes precedence.
    #[arg(long, short = 'i', action)]
    pub inplace: bool,

    /// Do not save entered values to the history file.
    #[arg(long, short = 's', action)]
    pub skip_history_save: bool,

    /// Name of a menu in the config directory, or a path to a menu YAML file.
    pub menu: String,
}

impl Args {
    /// Resolved configuration directory.
    #[must_use]
    pub fn config_dir(&self) -> String {
        config::get_config_dir(&self.config_dir)
    }

    /// Resolved path of the menu file.
    #[must_use]
    pub fn menu_path(&self) -> String {
        config::get_menu_path(&self.menu, &self.config_dir())
    }

    /// Resolved path of the history file.
    #[must_use]
    pub fn history_path(&self) -> String {
        config::get_history_path(&self.history_path, &self.config_dir())
    }
}
