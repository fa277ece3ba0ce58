use rust_decimal::Decimal;

use crate::{error::ParseError, unit::Unit, value::Value};

use super::{evaluated::NodeValue, operation::OperationNode, operator::OperationKind};

/// A node of a parsed rule. Built once and never mutated; every evaluation pass reads it afresh.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Expression {
    Constant { value: NodeValue, unit: Option<Unit> },
    Reference(String),
    Operation(OperationNode),
}

impl Expression {
    pub fn constant(value: impl Into<NodeValue>) -> Self {
        Self::Constant { value: value.into(), unit: None }
    }

    pub fn number(n: impl Into<Decimal>) -> Self {
        let n: Decimal = n.into();
        Self::constant(n)
    }

    /// A number with a unit, written in the `a.b/c` notation.
    pub fn quantity(n: impl Into<Decimal>, unit: &str) -> Result<Self, ParseError> {
        let n: Decimal = n.into();
        Ok(Self::Constant {
            value: NodeValue::from(n),
            unit: Unit::parse(unit)?.non_empty(),
        })
    }

    pub fn text(text: &str) -> Self {
        Self::constant(Value::from(text))
    }

    pub fn boolean(b: bool) -> Self {
        Self::constant(b)
    }

    /// A constant which does not apply, as produced by a rule disabled for the current situation.
    pub fn inapplicable() -> Self {
        Self::Constant { value: NodeValue::Inapplicable, unit: None }
    }

    pub fn reference(name: &str) -> Self {
        Self::Reference(name.to_string())
    }

    /// Builds the operation written `left <token> right`.
    pub fn operation(token: &str, left: Expression, right: Expression) -> Result<Self, ParseError> {
        Ok(Self::Operation(OperationNode::parse(token, left, right)?))
    }

    pub fn binary(kind: OperationKind, left: Expression, right: Expression) -> Self {
        Self::Operation(OperationNode::new(kind, left, right))
    }
}
