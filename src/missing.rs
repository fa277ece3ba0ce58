//! The set of unanswered inputs a partial computation still depends on.

use std::collections::BTreeMap;

/// Maps each missing variable to a weight counting how many paths through the rule tree reach
/// it. Ordered, so that two evaluations of the same tree produce identical sets.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct MissingVariables(BTreeMap<String, u32>);

impl MissingVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set containing only `name`, with weight 1.
    pub fn single(name: &str) -> Self {
        let mut map = BTreeMap::new();
        map.insert(name.to_string(), 1);
        Self(map)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn weight(&self, name: &str) -> Option<u32> {
        self.0.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Adds every variable of `other` into this set, summing weights of variables in both.
    pub fn merge(&mut self, other: &MissingVariables) {
        for (name, weight) in &other.0 {
            *self.0.entry(name.clone()).or_insert(0) += weight;
        }
    }

    /// Unions any number of sets.
    pub fn merge_all<'a>(sets: impl IntoIterator<Item = &'a MissingVariables>) -> MissingVariables {
        let mut result = MissingVariables::new();
        for set in sets {
            result.merge(set);
        }
        result
    }
}
