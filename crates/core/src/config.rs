//! Configuration path utilities for rust-menus.
//!
//! This module resolves where menu definitions and the value history live,
//! expanding shell shortcuts like `~` in paths.

use std::path::Path;

/// Default directory holding `menus/` and the history file
const DEFAULT_CONFIG_DIR: &str = "~/.rust-menus";
/// Environment variable overriding the default configuration directory
pub const CONFIG_DIR_ENV: &str = "RUST_MENUS_HOME";
/// Sub-directory of the configuration directory holding menu files
const MENUS_DIR: &str = "menus";
/// File name of the value history inside the configuration directory
const HISTORY_FILE: &str = "history.yml";

/// Default shell used to run suggestion commands
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Resolves the configuration directory.
///
/// An explicit directory wins, then `$RUST_MENUS_HOME`, then
/// `~/.rust-menus`. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use rust_menus_core::config::get_config_dir;
///
/// let custom = get_config_dir(&Some("/etc/menus".to_string()));
/// assert_eq!(custom, "/etc/menus");
/// ```
pub fn get_config_dir(config_dir_arg: &Option<String>) -> String {
    let config_dir = match config_dir_arg {
        Some(config_dir) => config_dir.clone(),
        None => std::env::var(CONFIG_DIR_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string()),
    };

    shellexpand::tilde(&config_dir).to_string()
}

/// Resolves the file of the menu named `menu`.
///
/// Anything that looks like a path (contains a separator or ends in
/// `.yml`/`.yaml`) is used as is; a bare name is looked up as
/// `<config_dir>/menus/<menu>.yml`.
///
/// # Examples
///
/// ```
/// use rust_menus_core::config::get_menu_path;
///
/// assert_eq!(get_menu_path("git", "/home/me/.rust-menus"), "/home/me/.rust-menus/menus/git.yml");
/// assert_eq!(get_menu_path("./git.yaml", "/home/me/.rust-menus"), "./git.yaml");
/// ```
pub fn get_menu_path(menu: &str, config_dir: &str) -> String {
    let is_path = menu.contains(std::path::MAIN_SEPARATOR)
        || menu.ends_with(".yml")
        || menu.ends_with(".yaml");

    if is_path {
        return shellexpand::tilde(menu).to_string();
    }

    Path::new(config_dir)
        .join(MENUS_DIR)
        .join(format!("{menu}.yml"))
        .to_string_lossy()
        .to_string()
}

/// Resolves the history file path, defaulting to `<config_dir>/history.yml`.
pub fn get_history_path(history_path_arg: &Option<String>, config_dir: &str) -> String {
    match history_path_arg {
        Some(history_path) => shellexpand::tilde(history_path).to_string(),
        None => Path::new(config_dir)
            .join(HISTORY_FILE)
            .to_string_lossy()
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_dir_with_custom_path() {
        let custom_path = Some("/custom/menus".to_string());
        assert_eq!(get_config_dir(&custom_path), "/custom/menus");
    }

    #[test]
    fn test_get_config_dir_with_tilde() {
        let result = get_config_dir(&Some("~/my-menus".to_string()));
        assert!(!result.starts_with('~'));
        assert!(result.ends_with("my-menus"));
    }

    #[test]
    fn test_get_config_dir_with_none() {
        let result = get_config_dir(&None);
        assert!(!result.starts_with('~'));
    }

    #[test]
    fn test_get_menu_path_by_name() {
        assert_eq!(get_menu_path("git", "/cfg"), "/cfg/menus/git.yml");
    }

    #[test]
    fn test_get_menu_path_with_explicit_file() {
        assert_eq!(get_menu_path("/tmp/git.yml", "/cfg"), "/tmp/git.yml");
        assert_eq!(get_menu_path("git.yaml", "/cfg"), "git.yaml");

        let expanded = get_menu_path("~/menus/git.yml", "/cfg");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("menus/git.yml"));
    }

    #[test]
    fn test_get_history_path() {
        assert_eq!(get_history_path(&None, "/cfg"), "/cfg/history.yml");
        assert_eq!(
            get_history_path(&Some("/tmp/h.yml".to_string()), "/cfg"),
            "/tmp/h.yml"
        );
    }

    #[test]
    fn test_default_shell_constant() {
        assert_eq!(DEFAULT_SHELL, "/bin/bash");
    }
}
