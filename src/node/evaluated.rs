use num_traits::Zero;
use rust_decimal::Decimal;

use crate::{missing::MissingVariables, unit::Unit, value::Value};

/// The state of an evaluated node. Besides a concrete value, a rule can legitimately not apply, or
/// not be computable yet because some of its inputs are unanswered.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum NodeValue {
    Value(Value),
    Inapplicable,
    Indeterminate,
}

impl NodeValue {
    pub fn is_inapplicable(&self) -> bool {
        matches!(self, Self::Inapplicable)
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Self::Indeterminate)
    }

    pub fn as_value(&self) -> Option<&Value> {
        if let Self::Value(v) = self { Some(v) } else { None }
    }

    pub fn as_number(&self) -> Option<Decimal> {
        self.as_value().and_then(Value::as_number)
    }

    pub fn as_boolean(&self) -> Option<bool> {
        self.as_value().and_then(Value::as_boolean)
    }

    /// Returns true for the number zero, in any scale.
    pub fn is_zero(&self) -> bool {
        self.as_number().is_some_and(|n| n.is_zero())
    }
}

impl From<Value> for NodeValue {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

impl From<Decimal> for NodeValue {
    fn from(d: Decimal) -> Self {
        Self::Value(Value::Number(d))
    }
}

impl From<bool> for NodeValue {
    fn from(b: bool) -> Self {
        Self::Value(Value::Boolean(b))
    }
}

/// The result of evaluating any expression node.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct EvaluatedNode {
    pub value: NodeValue,
    pub unit: Option<Unit>,

    /// The unanswered inputs this result depends on. Never empty when `value` is indeterminate.
    pub missing_variables: MissingVariables,

    /// The display symbol of the operation which produced this node, if any.
    pub symbol: Option<String>,

    /// The evaluated children this result was computed from.
    pub explanation: Vec<EvaluatedNode>,
}

impl EvaluatedNode {
    /// A node with no children and nothing missing.
    pub fn leaf(value: NodeValue, unit: Option<Unit>) -> Self {
        Self {
            value,
            unit: unit.and_then(Unit::non_empty),
            missing_variables: MissingVariables::new(),
            symbol: None,
            explanation: vec![],
        }
    }

    /// An indeterminate leaf, waiting on `missing_variables`.
    pub fn indeterminate(missing_variables: MissingVariables) -> Self {
        Self {
            value: NodeValue::Indeterminate,
            unit: None,
            missing_variables,
            symbol: None,
            explanation: vec![],
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing_variables.is_empty()
    }
}
