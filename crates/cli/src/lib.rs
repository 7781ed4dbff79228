//! Rust Menus CLI Library
//!
//! This crate provides the terminal front end of rust-menus: keyboard-driven
//! menus that build shell commands out of flags, valued arguments and
//! command templates loaded from a YAML menu definition.
//!
//! # Key Features
//!
//! - **Shortcut Navigation**: Typed keys activate sub-menus, arguments and commands
//! - **Value Editing**: Text, tags and choice editors with fuzzy-matched suggestions
//! - **Edit Mode**: Toggle between unsetting and re-editing argument values
//! - **Run Policies**: Exit after the command, or return to the menu in place
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`menu_screen`]: The interactive menu screen and value editor
//! - [`run_policy`]: What happens to a command once it has been selected
//!
//! # Examples
//!
//! The CLI binary (`rmenu`) takes the name of a menu from the configuration
//! directory, or a path to a menu file:
//!
//! ```bash
//! # Open ~/.rust-menus/menus/git.yml
//! rmenu git
//!
//! # Open a menu file directly and return to it after each command
//! rmenu --inplace ./menus/cargo.yml
//!
//! # Show the command that would run without executing it
//! rmenu --dry-run git
//! ```

pub mod cli_args;
pub mod menu_screen;
pub mod run_policy;
