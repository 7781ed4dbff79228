//! Configuration input structures.
//!
//! These types mirror the YAML menu documents one to one. They carry no
//! behavior beyond deserialization; [`crate::menu::build_menu_tree`] turns
//! them into the validated in-memory model.

use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::Error;

/// How a named argument and its value are laid out in the command tokens.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    /// `--name=value`
    #[default]
    Equal,
    /// `--name value`
    Space,
}

/// How multiple values of one argument are rendered.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(try_from = "String")]
pub enum MultiStyle {
    /// One rendering per value: `--tag=a --tag=b`
    #[default]
    Repeat,
    /// A single rendering with the values joined: `--tag=a,b`
    Join(char),
}

impl TryFrom<String> for MultiStyle {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == "repeat" {
            return Ok(Self::Repeat);
        }

        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Self::Join(c)),
            _ => Err(Error::InvalidMultiStyle(value)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NamedArgumentsStyle {
    pub separator: Separator,
    pub multi_style: MultiStyle,
}

/// Menu-wide settings in effect for one menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Configuration {
    pub sort_arguments: bool,
    pub sort_commands: bool,
    pub sort_menus: bool,
    pub named_arguments_style: NamedArgumentsStyle,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct NamedArgumentsStyleDefinition {
    pub separator: Option<Separator>,
    pub multi_style: Option<MultiStyle>,
}

/// A `configuration` block as written. Fields left out keep the value
/// inherited from the parent menu.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigurationDefinition {
    pub sort_arguments: Option<bool>,
    pub sort_commands: Option<bool>,
    pub sort_menus: Option<bool>,
    pub named_arguments_style: NamedArgumentsStyleDefinition,
}

impl ConfigurationDefinition {
    /// Settings of a menu declaring this block under a parent using `inherited`.
    #[must_use]
    pub fn over(&self, inherited: &Configuration) -> Configuration {
        let style = &self.named_arguments_style;
        Configuration {
            sort_arguments: self.sort_arguments.unwrap_or(inherited.sort_arguments),
            sort_commands: self.sort_commands.unwrap_or(inherited.sort_commands),
            sort_menus: self.sort_menus.unwrap_or(inherited.sort_menus),
            named_arguments_style: NamedArgumentsStyle {
                separator: style
                    .separator
                    .unwrap_or(inherited.named_arguments_style.separator),
                multi_style: style
                    .multi_style
                    .unwrap_or(inherited.named_arguments_style.multi_style),
            },
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum SuggestionsDefinition {
    Values { values: Vec<String> },
    Command { command: String },
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FlagDefinition {
    pub flag: String,
    #[serde(default)]
    pub description: String,
    pub group: Option<String>,
    pub template: Option<Vec<String>>,
    #[serde(default)]
    pub on: bool,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ChoiceDefinition {
    pub name: String,
    pub choices: Vec<String>,
    #[serde(default)]
    pub multi: bool,
    #[serde(default)]
    pub description: String,
    pub group: Option<String>,
    #[serde(default)]
    pub selected: Vec<String>,
    pub separator: Option<Separator>,
    pub template: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum DefaultValue {
    One(String),
    Many(Vec<String>),
}

impl DefaultValue {
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        match self {
            DefaultValue::One(value) => vec![value.clone()],
            DefaultValue::Many(values) => values.clone(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ValueDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub group: Option<String>,
    #[serde(default)]
    pub multi: bool,
    #[serde(default)]
    pub password: bool,
    pub default: Option<DefaultValue>,
    pub suggestions: Option<SuggestionsDefinition>,
    pub separator: Option<Separator>,
    pub multi_style: Option<MultiStyle>,
    pub template: Option<Vec<String>>,
}

/// One entry of a menu's `arguments` mapping.
///
/// A bare string is shorthand for a flag token. Variant order matters for
/// untagged deserialization: choices must be tried before plain values.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ArgumentDefinition {
    Shorthand(String),
    Flag(FlagDefinition),
    Choice(ChoiceDefinition),
    Value(ValueDefinition),
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IncludeScope {
    /// The command's own menu and every ancestor.
    #[default]
    All,
    /// Only the command's own menu.
    Menu,
    /// Only the ancestors of the command's menu.
    Ancestors,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct IncludeDefinition {
    pub include: String,
    #[serde(default)]
    pub scope: IncludeScope,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReferenceDefinition {
    pub varname: String,
}

/// A plain YAML scalar used as a literal token: `[sleep, 5]` or `[head, -n, 10]`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Display for Scalar {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Text(text) => formatter.write_str(text),
            Scalar::Integer(number) => write!(formatter, "{number}"),
            Scalar::Float(number) => write!(formatter, "{number}"),
            Scalar::Bool(value) => write!(formatter, "{value}"),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum TemplateElementDefinition {
    Literal(Scalar),
    Include(IncludeDefinition),
    Reference(ReferenceDefinition),
    Argument(ArgumentDefinition),
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CommandDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub template: Vec<TemplateElementDefinition>,
    pub inplace: Option<bool>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MenuDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub configuration: Option<ConfigurationDefinition>,
    #[serde(default)]
    pub arguments: IndexMap<String, ArgumentDefinition>,
    #[serde(default)]
    pub commands: IndexMap<String, CommandDefinition>,
    #[serde(default)]
    pub menus: IndexMap<String, MenuDefinition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_style_from_string() {
        assert_eq!(
            MultiStyle::try_from("repeat".to_string()).unwrap(),
            MultiStyle::Repeat
        );
        assert_eq!(
            MultiStyle::try_from(",".to_string()).unwrap(),
            MultiStyle::Join(',')
        );
        assert!(matches!(
            MultiStyle::try_from("::".to_string()),
            Err(Error::InvalidMultiStyle(_))
        ));
        assert!(MultiStyle::try_from(String::new()).is_err());
    }

    #[test]
    fn test_argument_definition_variants() {
        let yaml = r#"
"-v": "--verbose"
"-f": { flag: "--force", description: "Force it" }
"-c": { name: "--color", choices: [auto, never] }
"-n": { name: "--name", default: "x" }
"-m": { name: "--tag", multi: true, default: [a, b], multi_style: "," }
"#;
        let arguments: IndexMap<String, ArgumentDefinition> = serde_yaml::from_str(yaml).unwrap();

        assert!(matches!(&arguments["-v"], ArgumentDefinition::Shorthand(flag) if flag == "--verbose"));
        assert!(matches!(&arguments["-f"], ArgumentDefinition::Flag(f) if f.flag == "--force"));
        assert!(matches!(&arguments["-c"], ArgumentDefinition::Choice(c) if c.choices.len() == 2));

        let ArgumentDefinition::Value(name) = &arguments["-n"] else {
            panic!("expected a value argument");
        };
        assert_eq!(name.default, Some(DefaultValue::One("x".to_string())));

        let ArgumentDefinition::Value(tag) = &arguments["-m"] else {
            panic!("expected a value argument");
        };
        assert!(tag.multi);
        assert_eq!(tag.multi_style, Some(MultiStyle::Join(',')));
        assert_eq!(
            tag.default.as_ref().map(DefaultValue::values),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_template_element_variants() {
        let yaml = r#"["git", {include: "*"}, {include: "-f", scope: ancestors}, {varname: "-n"}, {name: "branch_name"}]"#;
        let elements: Vec<TemplateElementDefinition> = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(elements.len(), 5);
        assert!(matches!(&elements[0], TemplateElementDefinition::Literal(Scalar::Text(l)) if l == "git"));
        assert!(matches!(
            &elements[1],
            TemplateElementDefinition::Include(IncludeDefinition { include, scope: IncludeScope::All }) if include == "*"
        ));
        assert!(matches!(
            &elements[2],
            TemplateElementDefinition::Include(IncludeDefinition { scope: IncludeScope::Ancestors, .. })
        ));
        assert!(matches!(&elements[3], TemplateElementDefinition::Reference(r) if r.varname == "-n"));
        assert!(matches!(
            &elements[4],
            TemplateElementDefinition::Argument(ArgumentDefinition::Value(v)) if v.name == "branch_name"
        ));
    }

    #[test]
    fn test_menu_definition_defaults() {
        let menu: MenuDefinition = serde_yaml::from_str("name: empty").unwrap();
        assert_eq!(menu.name, "empty");
        assert!(menu.configuration.is_none());
        assert!(menu.arguments.is_empty());
        assert!(menu.commands.is_empty());
        assert!(menu.menus.is_empty());
    }

    #[test]
    fn test_configuration_block() {
        let yaml = r#"
sort_arguments: true
named_arguments_style:
  separator: space
  multi_style: ";"
"#;
        let definition: ConfigurationDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(definition.sort_arguments, Some(true));
        assert_eq!(definition.sort_commands, None);

        let configuration = definition.over(&Configuration::default());
        assert!(configuration.sort_arguments);
        assert!(!configuration.sort_commands);
        assert_eq!(
            configuration.named_arguments_style.separator,
            Separator::Space
        );
        assert_eq!(
            configuration.named_arguments_style.multi_style,
            MultiStyle::Join(';')
        );
    }

    #[test]
    fn test_partial_configuration_keeps_inherited_fields() {
        let inherited = Configuration {
            sort_menus: true,
            named_arguments_style: NamedArgumentsStyle {
                separator: Separator::Space,
                multi_style: MultiStyle::Join(','),
            },
            ..Configuration::default()
        };
        let definition: ConfigurationDefinition =
            serde_yaml::from_str("{ sort_commands: true, named_arguments_style: { multi_style: repeat } }")
                .unwrap();

        let configuration = definition.over(&inherited);
        assert!(configuration.sort_commands);
        assert!(configuration.sort_menus);
        assert_eq!(configuration.named_arguments_style.separator, Separator::Space);
        assert_eq!(configuration.named_arguments_style.multi_style, MultiStyle::Repeat);
    }

    #[test]
    fn test_scalar_literals() {
        let command: CommandDefinition =
            serde_yaml::from_str("{ name: wait, template: [sleep, 5, head, -n, 1.5, true] }").unwrap();
        let literals: Vec<String> = command
            .template
            .iter()
            .map(|element| match element {
                TemplateElementDefinition::Literal(scalar) => scalar.to_string(),
                other => panic!("expected a literal, got {other:?}"),
            })
            .collect();
        assert_eq!(literals, vec!["sleep", "5", "head", "-n", "1.5", "true"]);
    }
}
