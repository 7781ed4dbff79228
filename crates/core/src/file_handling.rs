//! File handling for rust-menus menu definitions and value history.
//!
//! This module reads menu files into validated menu trees and reads and
//! writes the per-argument history of entered values.

use std::fs::{self, File};
use std::path::Path;

use log::debug;

use crate::arguments::ArgumentStore;
use crate::error::{Error, Result};
use crate::history::HistoryStore;
use crate::menu::{build_menu_tree, Menu};
use crate::menu_definitions::MenuDefinition;

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    File::open(path).map_err(|e| Error::io_error(file_description.to_string(), path.to_string(), e))
}

/// Reads a menu definition without validating it.
///
/// # Errors
///
/// Returns [`Error::MenuNotFound`] if there is no file at `menu_path`, or
/// an error if the file cannot be read or is not a valid menu definition.
pub fn get_menu_definition(menu_path: &str) -> Result<MenuDefinition> {
    if !Path::new(menu_path).exists() {
        return Err(Error::MenuNotFound(menu_path.to_string()));
    }

    let reader = get_reader("menu", menu_path)?;
    serde_yaml::from_reader(reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "menu".to_string(),
            menu_path.to_string(),
            e,
        )
    })
}

/// Loads a menu file and builds the validated menu tree with its initial
/// argument values.
///
/// # Errors
///
/// See [`get_menu_definition`]; configuration errors found while building
/// the tree are returned too.
///
/// # Examples
///
/// ```no_run
/// use rust_menus_core::file_handling::load_menu;
///
/// let (menu, values) = load_menu("/home/me/.rust-menus/menus/git.yml")?;
/// println!("Loaded {} with {} arguments", menu.name, values.len());
/// # Ok::<(), rust_menus_core::error::Error>(())
/// ```
pub fn load_menu(menu_path: &str) -> Result<(Menu, ArgumentStore)> {
    let definition = get_menu_definition(menu_path)?;
    let loaded = build_menu_tree(&definition)?;
    debug!("Loaded menu `{}` from {menu_path}", definition.name);
    Ok(loaded)
}

/// Reads the value history. A missing file is an empty history.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn get_history(history_path: &str) -> Result<HistoryStore> {
    if !Path::new(history_path).exists() {
        return Ok(HistoryStore::default());
    }

    let reader = get_reader("history", history_path)?;
    serde_yaml::from_reader(reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "history".to_string(),
            history_path.to_string(),
            e,
        )
    })
}

/// Writes the value history, creating the parent directory if needed.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn write_history(history_path: &str, history: &HistoryStore) -> Result<()> {
    if let Some(parent) = Path::new(history_path).parent() {
        fs::create_dir_all(parent)
            .map_err(|e| Error::io_error("history".to_string(), history_path.to_string(), e))?;
    }

    let f = File::create(history_path)
        .map_err(|e| Error::io_error("history".to_string(), history_path.to_string(), e))?;

    serde_yaml::to_writer(f, history).map_err(|e| {
        Error::yaml_error(
            "writing".to_string(),
            "history".to_string(),
            history_path.to_string(),
            e,
        )
    })
}
