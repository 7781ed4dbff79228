//! Recently entered values per argument name.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

/// Maximum number of values kept per argument.
pub const HISTORY_LIMIT: usize = 50;

/// Values entered for one argument, most recent first.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct History {
    values: VecDeque<String>,
}

impl History {
    /// Records a value. Empty values and repeats of the latest value are
    /// ignored.
    pub fn add(&mut self, value: &str) {
        if value.is_empty() || self.values.front().is_some_and(|v| v == value) {
            return;
        }

        self.values.push_front(value.to_string());
        self.values.truncate(HISTORY_LIMIT);
    }

    pub fn values(&self) -> impl Iterator<Item = &String> {
        self.values.iter()
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

/// Histories for every argument, keyed by argument name.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct HistoryStore {
    entries: HashMap<String, History>,
}

impl HistoryStore {
    pub fn record<'a>(&mut self, name: &str, values: impl IntoIterator<Item = &'a String>) {
        let history = self.entries.entry(name.to_string()).or_default();
        for value in values {
            history.add(value);
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&History> {
        self.entries.get(name)
    }

    /// Distinct previous values for `name`, most recent first.
    #[must_use]
    pub fn recent(&self, name: &str) -> Vec<String> {
        let mut seen = Vec::new();
        if let Some(history) = self.get(name) {
            for value in history.values() {
                if !seen.contains(value) {
                    seen.push(value.clone());
                }
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_ignores_empty_and_repeated_values() {
        let mut history = History::default();
        history.add("");
        assert!(history.is_empty());

        history.add("test");
        history.add("test");
        assert_eq!(history.len(), 1);

        history.add("other");
        assert_eq!(
            history.values().collect::<Vec<_>>(),
            vec!["other", "test"]
        );
    }

    #[test]
    fn test_add_is_bounded() {
        let mut history = History::default();
        for i in 0..(HISTORY_LIMIT + 10) {
            history.add(&i.to_string());
        }
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(
            history.values().next().map(String::as_str),
            Some((HISTORY_LIMIT + 9).to_string().as_str())
        );
    }

    #[test]
    fn test_recent_is_distinct_and_most_recent_first() {
        let mut store = HistoryStore::default();
        let values = ["a".to_string(), "b".to_string(), "a".to_string()];
        store.record("--name", &values);

        assert_eq!(store.recent("--name"), vec!["a", "b"]);
        assert!(store.recent("--other").is_empty());
    }

    #[test]
    fn test_yaml_round_trip_shape() {
        let mut store = HistoryStore::default();
        store.record("--name", &["x".to_string()]);
        let yaml = serde_yaml::to_string(&store).unwrap();
        assert!(yaml.contains("--name"));
        let parsed: HistoryStore = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, store);
    }
}
