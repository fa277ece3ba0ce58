//! The twelve binary operators of the rule language, with their source tokens, display symbols
//! and value functions.

use core::cmp::Ordering;

use num_traits::Zero;
use rust_decimal::Decimal;

use crate::error::OperationError;
use crate::value::Value;

use super::evaluated::NodeValue;

#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
pub enum OperationKind {
    Mul,
    Div,
    Add,
    Sub,
    Lt,
    Lte,
    Gt,
    Gte,
    Eq,
    Neq,
    And,
    Or,
}

impl OperationKind {
    pub const ALL: [OperationKind; 12] = [
        Self::Mul, Self::Div, Self::Add, Self::Sub,
        Self::Lt, Self::Lte, Self::Gt, Self::Gte,
        Self::Eq, Self::Neq, Self::And, Self::Or,
    ];

    /// The token which writes this operator in a rule's source.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Mul => "*",
            Self::Div => "/",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Eq => "=",
            Self::Neq => "!=",
            Self::And => "and",
            Self::Or => "or",
        }
    }

    /// The symbol shown when an evaluated operation is explained. Operators without a dedicated
    /// glyph show their token.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Mul => "×",
            Self::Div => "∕",
            Self::Sub => "−",
            Self::Lte => "≤",
            Self::Gte => "≥",
            Self::Neq => "≠",
            Self::Add | Self::Lt | Self::Gt | Self::Eq | Self::And | Self::Or => self.token(),
        }
    }

    pub fn from_token(token: &str) -> Option<OperationKind> {
        Self::ALL.iter().copied().find(|k| k.token() == token)
    }

    /// Returns true for `Mul` and `Div`, whose units are inferred rather than reconciled.
    pub fn is_multiplicative(&self) -> bool {
        matches!(self, Self::Mul | Self::Div)
    }

    /// Returns true for `Add` and `Sub`.
    pub fn is_additive(&self) -> bool {
        matches!(self, Self::Add | Self::Sub)
    }

    pub fn is_arithmetic(&self) -> bool {
        self.is_multiplicative() || self.is_additive()
    }

    pub fn is_ordering(&self) -> bool {
        matches!(self, Self::Lt | Self::Lte | Self::Gt | Self::Gte)
    }

    /// Applies this operator's value function.
    ///
    /// Arithmetic and ordering read an inapplicable operand as zero, and give an indeterminate
    /// result for an indeterminate one. Equality and the logical operators read both through
    /// [absent_to_false], so they are defined for any operands.
    pub fn apply(&self, left: &NodeValue, right: &NodeValue) -> Result<NodeValue, OperationError> {
        match self {
            Self::Mul | Self::Div | Self::Add | Self::Sub => {
                let (a, b) = match (absent_to_zero(left), absent_to_zero(right)) {
                    (Some(a), Some(b)) => (a, b),
                    _ => return Ok(NodeValue::Indeterminate),
                };
                match (&a, &b) {
                    (Value::Number(a), Value::Number(b)) => self.arithmetic(*a, *b),
                    _ => Err(self.mismatch(&a, &b)),
                }
            }

            Self::Lt | Self::Lte | Self::Gt | Self::Gte => {
                let (a, b) = match (absent_to_zero(left), absent_to_zero(right)) {
                    (Some(a), Some(b)) => (a, b),
                    _ => return Ok(NodeValue::Indeterminate),
                };
                let ordering = compare(&a, &b).ok_or_else(|| self.mismatch(&a, &b))?;
                Ok(NodeValue::from(match self {
                    Self::Lt => ordering == Ordering::Less,
                    Self::Lte => ordering != Ordering::Greater,
                    Self::Gt => ordering == Ordering::Greater,
                    _ => ordering != Ordering::Less,
                }))
            }

            Self::Eq => Ok(NodeValue::from(absent_to_false(left) == absent_to_false(right))),
            Self::Neq => Ok(NodeValue::from(absent_to_false(left) != absent_to_false(right))),

            Self::And | Self::Or => {
                let (a, b) = (absent_to_false(left), absent_to_false(right));
                match (a.as_boolean(), b.as_boolean()) {
                    (Some(a), Some(b)) => Ok(NodeValue::from(if *self == Self::And { a && b } else { a || b })),
                    _ => Err(self.mismatch(&a, &b)),
                }
            }
        }
    }

    fn arithmetic(&self, a: Decimal, b: Decimal) -> Result<NodeValue, OperationError> {
        let result = match self {
            Self::Mul => a.checked_mul(b),
            // Dividing by zero is not an error in a rule, the quotient just doesn't exist
            Self::Div if b.is_zero() => return Ok(NodeValue::Inapplicable),
            Self::Div => a.checked_div(b),
            Self::Add => a.checked_add(b),
            Self::Sub => a.checked_sub(b),
            _ => unreachable!("{:?} is not arithmetic", self),
        };

        result
            .map(|n| NodeValue::Value(Value::Number(n)))
            .ok_or(OperationError::Overflow { operator: self.token() })
    }

    fn mismatch(&self, left: &Value, right: &Value) -> OperationError {
        OperationError::TypeMismatch {
            operator: self.token(),
            left: left.type_name(),
            right: right.type_name(),
        }
    }
}

/// Reads inapplicable and indeterminate values as `false`. This is the only coercion applied by
/// the equality and logical operators.
pub fn absent_to_false(value: &NodeValue) -> Value {
    match value {
        NodeValue::Value(v) => v.clone(),
        NodeValue::Inapplicable | NodeValue::Indeterminate => Value::Boolean(false),
    }
}

/// Reads an inapplicable value as a zero amount. Indeterminate values have no reading.
fn absent_to_zero(value: &NodeValue) -> Option<Value> {
    match value {
        NodeValue::Value(v) => Some(v.clone()),
        NodeValue::Inapplicable => Some(Value::Number(Decimal::zero())),
        NodeValue::Indeterminate => None,
    }
}

/// Orders two values of the same type. Values of different types are unordered.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
        (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
