//! Rust Menus Core Library
//!
//! This crate provides the core of rust-menus, a keyboard-driven launcher
//! that builds command lines from nested menus of flags, values and choices
//! described in YAML.
//!
//! # Key Features
//!
//! - **Menu Definitions**: Parse and validate YAML menu trees
//! - **Navigation**: Shortcut-key state machine with normal and edit modes
//! - **Template Resolution**: Explicit references and scoped wildcard inclusion
//! - **Suggestions and History**: Candidate values from lists, helper commands and past input
//! - **Error Handling**: One error type classifying configuration and runtime failures
//!
//! # Examples
//!
//! Loading a menu and resolving a command without any interaction:
//!
//! ```no_run
//! use rust_menus_core::file_handling::load_menu;
//! use rust_menus_core::menu::menu_chain;
//! use rust_menus_core::resolver::Resolver;
//!
//! let (menu, values) = load_menu("/home/me/.rust-menus/menus/git.yml")?;
//! let chain = menu_chain(&menu, &[]);
//! if let Some(command) = menu.commands.get("s") {
//!     let resolved = Resolver::new(command, &chain).render(&values)?;
//!     println!("{resolved}");
//! }
//! # Ok::<(), rust_menus_core::error::Error>(())
//! ```

pub mod arguments;
pub mod config;
pub mod display;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod history;
pub mod menu;
pub mod menu_definitions;
pub mod navigation;
pub mod resolver;
pub mod session;
pub mod suggestions;
