//! Named rules, the unit of a rule-calculation model.

use std::collections::BTreeMap;

use crate::{node::expression::Expression, unit::Unit};

/// A named rule. Rule names are dotted paths such as `contract . kind`, where each segment names
/// a child of the rule before it.
///
/// A rule without a formula is a question: its value must come from the situation.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Rule {
    name: String,
    formula: Option<Expression>,
    options: Option<Vec<String>>,
    unit: Option<Unit>,
}

impl Rule {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), formula: None, options: None, unit: None }
    }

    pub fn with_formula(mut self, formula: Expression) -> Self {
        self.formula = Some(formula);
        self
    }

    /// Declares the answers this rule accepts.
    pub fn with_options<S: Into<String>>(mut self, options: impl IntoIterator<Item = S>) -> Self {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// The unit given to numeric answers to this rule.
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit.non_empty();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn formula(&self) -> Option<&Expression> {
        self.formula.as_ref()
    }

    pub fn options(&self) -> Option<&[String]> {
        self.options.as_deref()
    }

    pub fn unit(&self) -> Option<&Unit> {
        self.unit.as_ref()
    }
}

/// All rules of a model, by name.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct RuleSet(BTreeMap<String, Rule>);

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule, replacing any rule with the same name.
    pub fn insert(&mut self, rule: Rule) {
        self.0.insert(rule.name.clone(), rule);
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        let mut rules = RuleSet::new();
        for rule in iter {
            rules.insert(rule);
        }
        rules
    }
}
