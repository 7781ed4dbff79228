//! Turns a command template into the final list of command-line tokens.

use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use log::{debug, info};

use crate::arguments::{Argument, ArgumentStore, Kind};
use crate::error::{Error, Result};
use crate::menu::{Command, IncludePattern, Menu, TemplateElement};
use crate::menu_definitions::IncludeScope;
use crate::session::{SessionState, ValueEditor};

/// A fully resolved command, ready to be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    pub name: String,
    /// Tokens passed to the process, passwords included verbatim.
    pub tokens: Vec<String>,
    /// Same tokens with passwords masked.
    pub display: Vec<String>,
    pub inplace: Option<bool>,
}

impl Display for ResolvedCommand {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.display.join(" "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Command,
    Menu,
    Ancestor,
}

#[derive(Debug, Clone, Copy)]
struct Scope<'a> {
    level: Level,
    arguments: &'a IndexMap<String, Argument>,
}

impl Scope<'_> {
    fn included_by(&self, scope: IncludeScope) -> bool {
        matches!(
            (scope, self.level),
            (IncludeScope::All, Level::Menu | Level::Ancestor)
                | (IncludeScope::Menu, Level::Menu)
                | (IncludeScope::Ancestors, Level::Ancestor)
        )
    }
}

/// Resolves one command against the menus enclosing it.
pub struct Resolver<'a> {
    command: &'a Command,
    /// Innermost first: command-local arguments, own menu, then ancestors.
    scopes: Vec<Scope<'a>>,
}

impl<'a> Resolver<'a> {
    /// `chain` runs from the root menu down to the menu owning `command`.
    #[must_use]
    pub fn new(command: &'a Command, chain: &[&'a Menu]) -> Self {
        let mut scopes = vec![Scope {
            level: Level::Command,
            arguments: &command.arguments,
        }];

        for (depth, &menu) in chain.iter().rev().enumerate() {
            scopes.push(Scope {
                level: if depth == 0 { Level::Menu } else { Level::Ancestor },
                arguments: &menu.arguments,
            });
        }

        Self { command, scopes }
    }

    /// The innermost argument registered under `key`.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&'a Argument> {
        self.scopes
            .iter()
            .find_map(|scope| scope.arguments.get(key))
    }

    fn referenced(&self, key: &str) -> Result<&'a Argument> {
        self.lookup(key).ok_or_else(|| Error::Resolution {
            command: self.command.name.clone(),
            key: key.to_string(),
        })
    }

    /// Active arguments pulled in by a wildcard marker, outermost menu
    /// first. A key shadowed by an inner scope of the same selection is
    /// skipped, as is any key the template references explicitly.
    #[must_use]
    pub fn included(
        &self,
        pattern: &IncludePattern,
        scope: IncludeScope,
        values: &ArgumentStore,
    ) -> Vec<&'a Argument> {
        let referenced = self.command.referenced_keys();
        let mut claimed: HashSet<&str> = HashSet::new();
        let mut per_scope = Vec::new();

        for candidate in self.scopes.iter().filter(|s| s.included_by(scope)) {
            let mut found = Vec::new();
            for (key, argument) in candidate.arguments {
                if !claimed.insert(key.as_str()) {
                    continue;
                }
                if pattern.matches(key) && !referenced.contains(key.as_str()) && values.is_active(argument.id) {
                    found.push(argument);
                }
            }
            per_scope.push(found);
        }

        per_scope.into_iter().rev().flatten().collect()
    }

    /// Renders the template from current values without prompting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Resolution`] for a reference that does not resolve,
    /// or a render error from a custom argument template.
    pub fn render(&self, values: &ArgumentStore) -> Result<ResolvedCommand> {
        let mut tokens = Vec::new();
        let mut display = Vec::new();

        for element in &self.command.template {
            let arguments = match element {
                TemplateElement::Literal(literal) => {
                    tokens.push(literal.clone());
                    display.push(literal.clone());
                    continue;
                }
                TemplateElement::Reference(key) => vec![self.referenced(key)?],
                TemplateElement::Include { pattern, scope } => self.included(pattern, *scope, values),
            };

            for argument in arguments {
                let value = values.get(argument.id);
                tokens.extend(argument.render(value)?);
                display.extend(argument.render_for_display(value)?);
            }
        }

        Ok(ResolvedCommand {
            name: self.command.name.clone(),
            tokens,
            display,
            inplace: self.command.inplace,
        })
    }

    /// Prompts for referenced arguments that are still unset, then renders.
    /// Returns `Ok(None)` when the user cancels a prompt.
    ///
    /// # Errors
    ///
    /// See [`Resolver::render`]; editor failures are propagated too.
    pub fn resolve(
        &self,
        state: &mut SessionState,
        editor: &mut dyn ValueEditor,
    ) -> Result<Option<ResolvedCommand>> {
        for element in &self.command.template {
            let TemplateElement::Reference(key) = element else {
                continue;
            };
            let argument = self.referenced(key)?;
            if argument.kind() == Kind::Flag || state.values.is_active(argument.id) {
                continue;
            }

            debug!("Prompting for unset argument `{key}` of `{}`", self.command.name);
            if !state.edit(argument, editor)? {
                info!("Command `{}` cancelled", self.command.name);
                return Ok(None);
            }
        }

        let resolved = self.render(&state.values)?;
        info!("Resolved `{}`: {resolved}", resolved.name);
        Ok(Some(resolved))
    }
}
