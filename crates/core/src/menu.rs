//! The menu tree: menus owning arguments, commands and sub-menus.
//!
//! The tree is built once from a [`MenuDefinition`] and never changes shape
//! afterwards. Argument values live apart from it in an [`ArgumentStore`].

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use leon::Template;

use crate::arguments::{Argument, ArgumentSpec, ArgumentStore, ArgumentValue, NamedStyle, SuggestionSource};
use crate::error::{Error, Result};
use crate::menu_definitions::{
    ArgumentDefinition, CommandDefinition, Configuration, IncludeScope, MenuDefinition,
    SuggestionsDefinition, TemplateElementDefinition,
};

/// Which argument keys a wildcard-inclusion marker pulls in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncludePattern {
    All,
    Prefix(String),
    Exact(String),
}

impl IncludePattern {
    fn parse(pattern: &str) -> Option<Self> {
        if pattern == "*" {
            return Some(Self::All);
        }

        match pattern.strip_suffix('*') {
            Some(prefix) if !prefix.contains('*') => Some(Self::Prefix(prefix.to_string())),
            Some(_) => None,
            None if pattern.is_empty() || pattern.contains('*') => None,
            None => Some(Self::Exact(pattern.to_string())),
        }
    }

    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        match self {
            IncludePattern::All => true,
            IncludePattern::Prefix(prefix) => key.starts_with(prefix.as_str()),
            IncludePattern::Exact(exact) => key == exact,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateElement {
    Literal(String),
    /// Reference to an argument by key, looked up from the command outward.
    Reference(String),
    Include {
        pattern: IncludePattern,
        scope: IncludeScope,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub key: String,
    pub name: String,
    pub description: String,
    pub template: Vec<TemplateElement>,
    /// Arguments declared inline in the template, keyed by name.
    pub arguments: IndexMap<String, Argument>,
    pub inplace: Option<bool>,
}

impl Command {
    /// Keys referenced explicitly anywhere in the template.
    #[must_use]
    pub fn referenced_keys(&self) -> HashSet<&str> {
        self.template
            .iter()
            .filter_map(|element| match element {
                TemplateElement::Reference(key) => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOrder {
    pub arguments: bool,
    pub commands: bool,
    pub menus: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    pub key: String,
    pub name: String,
    pub description: String,
    pub arguments: IndexMap<String, Argument>,
    pub commands: IndexMap<String, Command>,
    pub menus: IndexMap<String, Menu>,
    pub sort: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Menu,
    Argument,
    Command,
}

/// A selectable item of a menu, with its shortcut key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry<'a> {
    Menu(&'a str, &'a Menu),
    Argument(&'a str, &'a Argument),
    Command(&'a str, &'a Command),
}

impl<'a> Entry<'a> {
    #[must_use]
    pub fn key(&self) -> &'a str {
        match self {
            Entry::Menu(key, _) | Entry::Argument(key, _) | Entry::Command(key, _) => key,
        }
    }

    #[must_use]
    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Menu(..) => EntryKind::Menu,
            Entry::Argument(..) => EntryKind::Argument,
            Entry::Command(..) => EntryKind::Command,
        }
    }
}

/// Entries split by whether their key starts with the input buffer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchPartition<'a> {
    pub matching: Vec<Entry<'a>>,
    pub non_matching: Vec<Entry<'a>>,
}

/// Case-sensitive prefix match used for highlighting and selection.
#[must_use]
pub fn key_matches(key: &str, buffer: &str) -> bool {
    key.starts_with(buffer)
}

fn sorted_keys<V>(map: &IndexMap<String, V>, sort: bool) -> Vec<&String> {
    let mut keys: Vec<&String> = map.keys().collect();
    if sort {
        keys.sort_by_key(|key| key.to_lowercase());
    }
    keys
}

impl Menu {
    /// Visible entries: sub-menus, then arguments, then commands, each
    /// section ordered per the menu's sort configuration.
    #[must_use]
    pub fn entries(&self) -> Vec<Entry<'_>> {
        let menus = sorted_keys(&self.menus, self.sort.menus)
            .into_iter()
            .map(|key| Entry::Menu(key, &self.menus[key]));
        let arguments = sorted_keys(&self.arguments, self.sort.arguments)
            .into_iter()
            .map(|key| Entry::Argument(key, &self.arguments[key]));
        let commands = sorted_keys(&self.commands, self.sort.commands)
            .into_iter()
            .map(|key| Entry::Command(key, &self.commands[key]));

        menus.chain(arguments).chain(commands).collect()
    }

    #[must_use]
    pub fn entry(&self, key: &str) -> Option<Entry<'_>> {
        if let Some((key, menu)) = self.menus.get_key_value(key) {
            return Some(Entry::Menu(key, menu));
        }
        if let Some((key, argument)) = self.arguments.get_key_value(key) {
            return Some(Entry::Argument(key, argument));
        }
        self.commands
            .get_key_value(key)
            .map(|(key, command)| Entry::Command(key, command))
    }

    #[must_use]
    pub fn partition(&self, buffer: &str) -> MatchPartition<'_> {
        let (matching, non_matching) = self
            .entries()
            .into_iter()
            .partition(|entry| key_matches(entry.key(), buffer));

        MatchPartition {
            matching,
            non_matching,
        }
    }

    /// Follows a path of sub-menu keys down from this menu.
    #[must_use]
    pub fn descendant(&self, path: &[String]) -> Option<&Menu> {
        path.iter()
            .try_fold(self, |menu, key| menu.menus.get(key))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty() && self.commands.is_empty() && self.menus.is_empty()
    }
}

/// Menus from the root down to the menu at `path`, outermost first.
#[must_use]
pub fn menu_chain<'a>(root: &'a Menu, path: &[String]) -> Vec<&'a Menu> {
    let mut chain = vec![root];
    let mut current = root;
    for key in path {
        match current.menus.get(key) {
            Some(menu) => {
                chain.push(menu);
                current = menu;
            }
            None => break,
        }
    }
    chain
}

/// Builds the validated menu tree and the initial argument values.
///
/// # Errors
///
/// Returns a configuration error naming the offending menu, command and key
/// when the definition is inconsistent.
pub fn build_menu_tree(definition: &MenuDefinition) -> Result<(Menu, ArgumentStore)> {
    let mut builder = Builder {
        store: ArgumentStore::default(),
        names: Vec::new(),
        scopes: Vec::new(),
    };
    let root = builder.menu(String::new(), definition, &Configuration::default())?;

    Ok((root, builder.store))
}

struct Builder {
    store: ArgumentStore,
    names: Vec<String>,
    /// Argument keys of every menu on the current path, outermost first.
    scopes: Vec<HashSet<String>>,
}

impl Builder {
    fn location(&self) -> String {
        format!("menu `{}`", self.names.join(" > "))
    }

    fn command_location(&self, key: &str) -> String {
        format!("{}, command `{}`", self.location(), key)
    }

    fn menu(
        &mut self,
        key: String,
        definition: &MenuDefinition,
        inherited: &Configuration,
    ) -> Result<Menu> {
        let configuration = definition
            .configuration
            .map_or(*inherited, |declared| declared.over(inherited));
        self.names.push(definition.name.clone());

        let location = self.location();
        check_keys(&location, definition)?;

        let style = NamedStyle {
            separator: configuration.named_arguments_style.separator,
            multi_style: configuration.named_arguments_style.multi_style,
        };

        let mut arguments = IndexMap::new();
        for (argument_key, argument_definition) in &definition.arguments {
            let argument = self.argument(&location, argument_key, argument_definition, style)?;
            arguments.insert(argument_key.clone(), argument);
        }
        self.scopes.push(arguments.keys().cloned().collect());

        let mut commands = IndexMap::new();
        for (command_key, command_definition) in &definition.commands {
            let command = self.command(command_key, command_definition, style)?;
            commands.insert(command_key.clone(), command);
        }

        let mut menus = IndexMap::new();
        for (menu_key, menu_definition) in &definition.menus {
            let menu = self.menu(menu_key.clone(), menu_definition, &configuration)?;
            menus.insert(menu_key.clone(), menu);
        }

        self.scopes.pop();
        self.names.pop();

        Ok(Menu {
            key,
            name: definition.name.clone(),
            description: definition.description.clone(),
            arguments,
            commands,
            menus,
            sort: SortOrder {
                arguments: configuration.sort_arguments,
                commands: configuration.sort_commands,
                menus: configuration.sort_menus,
            },
        })
    }

    fn command(
        &mut self,
        key: &str,
        definition: &CommandDefinition,
        style: NamedStyle,
    ) -> Result<Command> {
        let location = self.command_location(key);
        let mut arguments: IndexMap<String, Argument> = IndexMap::new();
        let mut template = Vec::with_capacity(definition.template.len());
        let inline: HashSet<&str> = definition
            .template
            .iter()
            .filter_map(|element| match element {
                TemplateElementDefinition::Argument(argument) => Some(definition_name(argument)),
                _ => None,
            })
            .collect();

        for element in &definition.template {
            template.push(match element {
                TemplateElementDefinition::Literal(literal) => TemplateElement::Literal(literal.to_string()),
                TemplateElementDefinition::Include(include) => TemplateElement::Include {
                    pattern: IncludePattern::parse(&include.include).ok_or_else(|| {
                        Error::InvalidIncludePattern {
                            location: location.clone(),
                            pattern: include.include.clone(),
                        }
                    })?,
                    scope: include.scope,
                },
                TemplateElementDefinition::Reference(reference) => {
                    let known = inline.contains(reference.varname.as_str())
                        || self
                            .scopes
                            .iter()
                            .any(|scope| scope.contains(&reference.varname));
                    if !known {
                        return Err(Error::UnknownArgument {
                            location,
                            key: reference.varname.clone(),
                        });
                    }
                    TemplateElement::Reference(reference.varname.clone())
                }
                TemplateElementDefinition::Argument(argument_definition) => {
                    let name = definition_name(argument_definition).to_string();
                    if arguments.contains_key(&name) {
                        return Err(Error::DuplicateKey { location, key: name });
                    }
                    let argument = self.argument(&location, &name, argument_definition, style)?;
                    arguments.insert(name.clone(), argument);
                    TemplateElement::Reference(name)
                }
            });
        }

        Ok(Command {
            key: key.to_string(),
            name: definition.name.clone(),
            description: definition.description.clone(),
            template,
            arguments,
            inplace: definition.inplace,
        })
    }

    fn argument(
        &mut self,
        location: &str,
        key: &str,
        definition: &ArgumentDefinition,
        style: NamedStyle,
    ) -> Result<Argument> {
        if key.is_empty() {
            return Err(Error::EmptyKey {
                location: location.to_string(),
            });
        }

        let (spec, description, group, template, initial) = match definition {
            ArgumentDefinition::Shorthand(token) => (
                ArgumentSpec::Flag {
                    token: token.clone(),
                },
                String::new(),
                None,
                None,
                ArgumentValue::Flag(false),
            ),
            ArgumentDefinition::Flag(flag) => (
                ArgumentSpec::Flag {
                    token: flag.flag.clone(),
                },
                flag.description.clone(),
                flag.group.clone(),
                flag.template.clone(),
                ArgumentValue::Flag(flag.on),
            ),
            ArgumentDefinition::Choice(choice) => {
                if choice.choices.is_empty() {
                    return Err(Error::EmptyChoices {
                        location: location.to_string(),
                        key: key.to_string(),
                    });
                }
                if let Some(unknown) = choice.selected.iter().find(|s| !choice.choices.contains(*s)) {
                    return Err(Error::UnknownChoice {
                        location: location.to_string(),
                        key: key.to_string(),
                        value: unknown.clone(),
                    });
                }
                let limit = if choice.multi { usize::MAX } else { 1 };
                let selected: IndexSet<String> = choice.selected.iter().take(limit).cloned().collect();
                (
                    ArgumentSpec::Choice {
                        name: choice.name.clone(),
                        choices: choice.choices.clone(),
                        multi: choice.multi,
                        separator: choice.separator.unwrap_or(style.separator),
                    },
                    choice.description.clone(),
                    choice.group.clone(),
                    choice.template.clone(),
                    ArgumentValue::Many(selected),
                )
            }
            ArgumentDefinition::Value(value) => {
                if value.password && value.multi {
                    return Err(Error::MultiPassword {
                        location: location.to_string(),
                        key: key.to_string(),
                    });
                }
                let defaults = value.default.as_ref().map(|d| d.values()).unwrap_or_default();
                let initial = if value.multi {
                    ArgumentValue::Many(defaults.into_iter().collect())
                } else {
                    ArgumentValue::Single(defaults.into_iter().next())
                };
                (
                    ArgumentSpec::Value {
                        name: value.name.clone(),
                        multi: value.multi,
                        password: value.password,
                        suggestions: value.suggestions.as_ref().map(|s| match s {
                            SuggestionsDefinition::Values { values } => SuggestionSource::Values(values.clone()),
                            SuggestionsDefinition::Command { command } => SuggestionSource::Command(command.clone()),
                        }),
                        style: NamedStyle {
                            separator: value.separator.unwrap_or(style.separator),
                            multi_style: value.multi_style.unwrap_or(style.multi_style),
                        },
                    },
                    value.description.clone(),
                    value.group.clone(),
                    value.template.clone(),
                    initial,
                )
            }
        };

        if let Some(templates) = &template {
            let allowed: &[&str] = match spec {
                ArgumentSpec::Flag { .. } => &["flag"],
                _ => &["name", "value"],
            };
            check_template_keys(location, key, templates, allowed)?;
        }

        Ok(Argument {
            id: self.store.allocate(initial),
            key: key.to_string(),
            description,
            group,
            spec,
            template,
        })
    }
}

fn definition_name(definition: &ArgumentDefinition) -> &str {
    match definition {
        ArgumentDefinition::Shorthand(token) => token,
        ArgumentDefinition::Flag(flag) => &flag.flag,
        ArgumentDefinition::Choice(choice) => &choice.name,
        ArgumentDefinition::Value(value) => &value.name,
    }
}

/// Keys must be non-empty and unique across arguments, commands and menus
/// of one menu, since they share the same shortcut namespace.
fn check_keys(location: &str, definition: &MenuDefinition) -> Result<()> {
    let mut seen = HashSet::new();
    let keys = definition
        .arguments
        .keys()
        .chain(definition.commands.keys())
        .chain(definition.menus.keys());

    for key in keys {
        if key.is_empty() {
            return Err(Error::EmptyKey {
                location: location.to_string(),
            });
        }
        if !seen.insert(key.as_str()) {
            return Err(Error::DuplicateKey {
                location: location.to_string(),
                key: key.clone(),
            });
        }
    }

    Ok(())
}

fn check_template_keys(location: &str, key: &str, templates: &[String], allowed: &[&str]) -> Result<()> {
    for template in templates {
        let parsed = Template::parse(template)?;
        let unknown = parsed
            .keys()
            .map(|k| k.to_string())
            .find(|k| !allowed.contains(&k.as_str()));
        if let Some(placeholder) = unknown {
            return Err(Error::InvalidTemplateKey {
                location: location.to_string(),
                key: key.to_string(),
                placeholder,
            });
        }
    }
    Ok(())
}
