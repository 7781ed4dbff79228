//! Text shown next to menu entries.

use crate::arguments::{Argument, ArgumentValue, Kind};

/// Longest value shown in full; longer values are shortened in the middle.
pub const MAX_DISPLAY_WIDTH: usize = 40;
const ELLIPSIS: &str = "...";

/// Renders one value for the menu screen.
///
/// Unset values are blank, an empty string is shown as `""`, passwords are
/// masked and anything longer than [`MAX_DISPLAY_WIDTH`] keeps only its
/// head and tail.
#[must_use]
pub fn render_value(value: Option<&str>, obfuscate: bool) -> String {
    let Some(value) = value else {
        return String::new();
    };
    if value.is_empty() {
        return "\"\"".to_string();
    }

    let length = value.chars().count();
    if obfuscate {
        return "*".repeat(length.min(MAX_DISPLAY_WIDTH));
    }
    if length <= MAX_DISPLAY_WIDTH {
        return value.to_string();
    }

    let keep = (MAX_DISPLAY_WIDTH - ELLIPSIS.len()) / 2;
    let head: String = value.chars().take(keep).collect();
    let tail: String = value.chars().skip(length - keep).collect();
    format!("{head}{ELLIPSIS}{tail}")
}

/// The argument's name followed by its current value, if any.
#[must_use]
pub fn describe_argument(argument: &Argument, value: &ArgumentValue) -> String {
    let password = argument.kind() == Kind::Password;
    match value {
        ArgumentValue::Flag(_) => argument.name().to_string(),
        ArgumentValue::Single(single) => format!(
            "{}={}",
            argument.name(),
            render_value(single.as_deref(), password)
        ),
        ArgumentValue::Many(values) if argument.accepts_many() => {
            let rendered: Vec<String> = values.iter().map(|v| render_value(Some(v), false)).collect();
            format!("{}=[{}]", argument.name(), rendered.join(", "))
        }
        ArgumentValue::Many(values) => format!(
            "{}={}",
            argument.name(),
            render_value(values.first().map(String::as_str), false)
        ),
    }
}

/// Splits `key` into the part already typed and the rest, or `None` when
/// the key does not start with `buffer`.
#[must_use]
pub fn split_key<'a>(key: &'a str, buffer: &str) -> Option<(&'a str, &'a str)> {
    key.strip_prefix(buffer).map(|rest| (&key[..buffer.len()], rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments::{ArgumentId, ArgumentSpec, NamedStyle};

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(None, false), "");
        assert_eq!(render_value(Some(""), false), "\"\"");
        assert_eq!(render_value(Some("main"), false), "main");
        assert_eq!(render_value(Some("secret"), true), "******");
    }

    #[test]
    fn test_render_value_truncates_long_values() {
        let value: String = ('a'..='z').chain('A'..='Z').collect();
        let rendered = render_value(Some(&value), false);
        assert_eq!(rendered, "abcdefghijklmnopqr...IJKLMNOPQRSTUVWXYZ");
        assert_eq!(rendered.chars().count(), 18 + 3 + 18);

        let exact = "x".repeat(MAX_DISPLAY_WIDTH);
        assert_eq!(render_value(Some(&exact), false), exact);
        assert_eq!(render_value(Some(&"x".repeat(90)), true).len(), MAX_DISPLAY_WIDTH);
    }

    #[test]
    fn test_describe_argument() {
        let argument = Argument {
            id: ArgumentId(0),
            key: "-p".to_string(),
            description: String::new(),
            group: None,
            spec: ArgumentSpec::Value {
                name: "--password".to_string(),
                multi: false,
                password: true,
                suggestions: None,
                style: NamedStyle::default(),
            },
            template: None,
        };
        assert_eq!(
            describe_argument(&argument, &ArgumentValue::Single(Some("abc".to_string()))),
            "--password=***"
        );
        assert_eq!(describe_argument(&argument, &ArgumentValue::Single(None)), "--password=");
    }

    #[test]
    fn test_split_key() {
        assert_eq!(split_key("-f", "-"), Some(("-", "f")));
        assert_eq!(split_key("-f", ""), Some(("", "-f")));
        assert_eq!(split_key("-f", "x"), None);
    }
}
