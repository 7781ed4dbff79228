//! Candidate values for arguments, from static lists or helper commands.

use std::process::{Command, Stdio};

use log::{debug, warn};

use crate::arguments::SuggestionSource;
use crate::config::DEFAULT_SHELL;
use crate::error::{Error, Result};

/// Runs suggestion sources. Helper commands are executed synchronously
/// through `shell -c`; a hanging helper blocks the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionProvider {
    shell: String,
}

impl Default for SuggestionProvider {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

impl SuggestionProvider {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    /// Uses `$SHELL`, falling back to [`DEFAULT_SHELL`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(std::env::var("SHELL").unwrap_or_else(|_| DEFAULT_SHELL.to_string()))
    }

    /// Candidate values for `source`. Failures are logged and yield no
    /// candidates so the caller can fall back to free-form entry.
    #[must_use]
    pub fn candidates(&self, source: &SuggestionSource) -> Vec<String> {
        match source {
            SuggestionSource::Values(values) => values.clone(),
            SuggestionSource::Command(command) => self.run(command).unwrap_or_else(|e| {
                warn!("{e}");
                Vec::new()
            }),
        }
    }

    /// Runs a helper command and splits its standard output into candidates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Suggestion`] if the command cannot be spawned or exits
    /// with a non-zero status.
    pub fn run(&self, command: &str) -> Result<Vec<String>> {
        debug!("Running suggestion command `{command}` with `{}`", self.shell);

        let output = Command::new(&self.shell)
            .args(["-c", command])
            .stdin(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| Error::suggestion_error(command, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::suggestion_error(
                command,
                format!("{} {}", output.status, stderr.trim()),
            ));
        }

        Ok(parse_candidates(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// One candidate per non-blank line.
#[must_use]
pub fn parse_candidates(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> SuggestionProvider {
        SuggestionProvider::new("sh")
    }

    #[test]
    fn test_static_values_are_returned_unchanged() {
        let values = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        assert_eq!(
            provider().candidates(&SuggestionSource::Values(values.clone())),
            values
        );
    }

    #[test]
    fn test_parse_candidates_discards_blank_lines() {
        assert_eq!(
            parse_candidates("main\n\n  feature/x  \r\n\n"),
            vec!["main", "feature/x"]
        );
        assert!(parse_candidates("").is_empty());
    }

    #[test]
    fn test_command_output_becomes_candidates() {
        let source = SuggestionSource::Command("printf 'main\\n\\ndemo\\n'".to_string());
        assert_eq!(provider().candidates(&source), vec!["main", "demo"]);
    }

    #[test]
    fn test_failing_command_degrades_to_empty() {
        let source = SuggestionSource::Command("echo partial; exit 3".to_string());
        assert!(provider().candidates(&source).is_empty());
        assert!(matches!(
            provider().run("exit 3"),
            Err(Error::Suggestion { .. })
        ));
    }

    #[test]
    fn test_missing_shell_degrades_to_empty() {
        let provider = SuggestionProvider::new("/this/shell/does/not/exist");
        let source = SuggestionSource::Command("echo hi".to_string());
        assert!(provider.candidates(&source).is_empty());
    }
}
