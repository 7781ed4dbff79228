//! Argument model, argument values and their rendering into command tokens.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use indexmap::IndexSet;
use leon::Template;

use crate::error::Result;
use crate::menu_definitions::{MultiStyle, Separator};

/// Index of an argument's value inside an [`ArgumentStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArgumentId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Flag,
    Single,
    Multi,
    Choice,
    Password,
}

impl Display for Kind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(match self {
            Kind::Flag => "flag",
            Kind::Single => "value",
            Kind::Multi => "values",
            Kind::Choice => "choice",
            Kind::Password => "password",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionSource {
    Values(Vec<String>),
    Command(String),
}

/// Separator and multi-value style after merging the argument's own
/// settings with the menu configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NamedStyle {
    pub separator: Separator,
    pub multi_style: MultiStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentSpec {
    Flag {
        token: String,
    },
    Value {
        name: String,
        multi: bool,
        password: bool,
        suggestions: Option<SuggestionSource>,
        style: NamedStyle,
    },
    Choice {
        name: String,
        choices: Vec<String>,
        multi: bool,
        separator: Separator,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub id: ArgumentId,
    pub key: String,
    pub description: String,
    pub group: Option<String>,
    pub spec: ArgumentSpec,
    /// Leon templates replacing the default rendering, one token each.
    pub template: Option<Vec<String>>,
}

impl Argument {
    #[must_use]
    pub fn kind(&self) -> Kind {
        match &self.spec {
            ArgumentSpec::Flag { .. } => Kind::Flag,
            ArgumentSpec::Value { password: true, .. } => Kind::Password,
            ArgumentSpec::Value { multi: true, .. } => Kind::Multi,
            ArgumentSpec::Value { .. } => Kind::Single,
            ArgumentSpec::Choice { .. } => Kind::Choice,
        }
    }

    /// The flag token or the argument name.
    #[must_use]
    pub fn name(&self) -> &str {
        match &self.spec {
            ArgumentSpec::Flag { token } => token,
            ArgumentSpec::Value { name, .. } | ArgumentSpec::Choice { name, .. } => name,
        }
    }

    /// Arguments whose name is not an option render as their bare value.
    #[must_use]
    pub fn is_positional(&self) -> bool {
        !matches!(self.spec, ArgumentSpec::Flag { .. }) && !self.name().starts_with('-')
    }

    #[must_use]
    pub fn accepts_many(&self) -> bool {
        match &self.spec {
            ArgumentSpec::Flag { .. } => false,
            ArgumentSpec::Value { multi, .. } | ArgumentSpec::Choice { multi, .. } => *multi,
        }
    }

    #[must_use]
    pub fn suggestions(&self) -> Option<&SuggestionSource> {
        match &self.spec {
            ArgumentSpec::Value { suggestions, .. } => suggestions.as_ref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn empty_value(&self) -> ArgumentValue {
        match self.kind() {
            Kind::Flag => ArgumentValue::Flag(false),
            Kind::Single | Kind::Password => ArgumentValue::Single(None),
            Kind::Multi | Kind::Choice => ArgumentValue::Many(IndexSet::new()),
        }
    }

    /// Renders the tokens this argument contributes to a command line.
    ///
    /// # Errors
    ///
    /// Returns an error if a custom argument template fails to render.
    pub fn render(&self, value: &ArgumentValue) -> Result<Vec<String>> {
        RENDERERS[self.kind() as usize](self, value, false)
    }

    /// Same as [`Argument::render`] with password values masked, for logs
    /// and display.
    ///
    /// # Errors
    ///
    /// Returns an error if a custom argument template fails to render.
    pub fn render_for_display(&self, value: &ArgumentValue) -> Result<Vec<String>> {
        RENDERERS[self.kind() as usize](self, value, true)
    }
}

impl Display for Argument {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.description.is_empty() {
            write!(formatter, "`{}`", self.name())
        } else {
            write!(formatter, "`{}` ({})", self.name(), self.description)
        }
    }
}

type Renderer = fn(&Argument, &ArgumentValue, bool) -> Result<Vec<String>>;

/// Rendering strategy per [`Kind`], indexed by discriminant.
const RENDERERS: [Renderer; 5] = [
    render_flag,
    render_single,
    render_multi,
    render_choice,
    render_single,
];

fn render_flag(argument: &Argument, value: &ArgumentValue, _mask: bool) -> Result<Vec<String>> {
    if !value.is_active() {
        return Ok(Vec::new());
    }

    let mut context = HashMap::new();
    context.insert("flag".to_string(), argument.name().to_string());

    match &argument.template {
        Some(templates) => render_templates(templates, &context),
        None => Ok(vec![argument.name().to_string()]),
    }
}

fn render_single(argument: &Argument, value: &ArgumentValue, mask: bool) -> Result<Vec<String>> {
    let ArgumentValue::Single(Some(value)) = value else {
        return Ok(Vec::new());
    };

    let separator = match &argument.spec {
        ArgumentSpec::Value { style, .. } => style.separator,
        ArgumentSpec::Choice { separator, .. } => *separator,
        ArgumentSpec::Flag { .. } => Separator::Equal,
    };

    let value = if mask && argument.kind() == Kind::Password {
        mask_value(value)
    } else {
        value.clone()
    };

    render_named(argument, &value, separator)
}

fn render_multi(argument: &Argument, value: &ArgumentValue, _mask: bool) -> Result<Vec<String>> {
    let ArgumentSpec::Value { style, .. } = &argument.spec else {
        return Ok(Vec::new());
    };
    let values = value.values();

    if values.is_empty() {
        return Ok(Vec::new());
    }

    match style.multi_style {
        MultiStyle::Repeat => render_each(argument, &values, style.separator),
        MultiStyle::Join(joiner) => {
            let joined = values.join(joiner.to_string().as_str());
            render_named(argument, &joined, style.separator)
        }
    }
}

fn render_choice(argument: &Argument, value: &ArgumentValue, _mask: bool) -> Result<Vec<String>> {
    let ArgumentSpec::Choice { separator, .. } = &argument.spec else {
        return Ok(Vec::new());
    };

    render_each(argument, &value.values(), *separator)
}

fn render_each(argument: &Argument, values: &[String], separator: Separator) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    for value in values {
        tokens.extend(render_named(argument, value, separator)?);
    }
    Ok(tokens)
}

fn render_named(argument: &Argument, value: &str, separator: Separator) -> Result<Vec<String>> {
    if let Some(templates) = &argument.template {
        let mut context = HashMap::new();
        context.insert("name".to_string(), argument.name().to_string());
        context.insert("value".to_string(), value.to_string());
        return render_templates(templates, &context);
    }

    if argument.is_positional() {
        return Ok(vec![value.to_string()]);
    }

    Ok(match separator {
        Separator::Equal => vec![format!("{}={}", argument.name(), value)],
        Separator::Space => vec![argument.name().to_string(), value.to_string()],
    })
}

fn render_templates(templates: &[String], context: &HashMap<String, String>) -> Result<Vec<String>> {
    let mut tokens = Vec::with_capacity(templates.len());
    for template in templates {
        tokens.push(Template::parse(template)?.render(&context)?);
    }
    Ok(tokens)
}

fn mask_value(value: &str) -> String {
    "*".repeat(value.chars().count().min(40))
}

/// The current state of an argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentValue {
    Flag(bool),
    Single(Option<String>),
    Many(IndexSet<String>),
}

impl ArgumentValue {
    /// True when the argument contributes at least one token.
    #[must_use]
    pub fn is_active(&self) -> bool {
        match self {
            ArgumentValue::Flag(on) => *on,
            ArgumentValue::Single(value) => value.is_some(),
            ArgumentValue::Many(values) => !values.is_empty(),
        }
    }

    #[must_use]
    pub fn values(&self) -> Vec<String> {
        match self {
            ArgumentValue::Flag(_) => Vec::new(),
            ArgumentValue::Single(value) => value.iter().cloned().collect(),
            ArgumentValue::Many(values) => values.iter().cloned().collect(),
        }
    }

    /// Drops empty strings so that an empty entry never counts as set.
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            ArgumentValue::Single(Some(value)) if value.is_empty() => ArgumentValue::Single(None),
            ArgumentValue::Many(values) => {
                ArgumentValue::Many(values.into_iter().filter(|v| !v.is_empty()).collect())
            }
            other => other,
        }
    }
}

/// Mutable values of every argument of a menu tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentStore {
    values: Vec<ArgumentValue>,
}

impl ArgumentStore {
    pub(crate) fn allocate(&mut self, initial: ArgumentValue) -> ArgumentId {
        self.values.push(initial.normalized());
        ArgumentId(self.values.len() - 1)
    }

    /// # Panics
    ///
    /// Panics if `id` was not allocated by this store.
    #[must_use]
    pub fn get(&self, id: ArgumentId) -> &ArgumentValue {
        &self.values[id.0]
    }

    pub fn set(&mut self, id: ArgumentId, value: ArgumentValue) {
        self.values[id.0] = value.normalized();
    }

    pub fn toggle_flag(&mut self, id: ArgumentId) {
        if let ArgumentValue::Flag(on) = &mut self.values[id.0] {
            *on = !*on;
        }
    }

    pub fn clear(&mut self, argument: &Argument) {
        self.values[argument.id.0] = argument.empty_value();
    }

    #[must_use]
    pub fn is_active(&self, id: ArgumentId) -> bool {
        self.get(id).is_active()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
