//! Error types. None of these escape an evaluation pass: evaluation reports its outcomes through
//! the value lattice and logs anything it recovers from. They surface only from construction
//! (parsing tokens, units and answers) and from the collaborators that evaluation wraps.

use thiserror::Error;

use crate::unit::Unit;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    #[error("unit error: cannot convert {from} to {to}")]
    Incompatible { from: String, to: String },

    #[error("unit error: converting {from} to {to} overflowed")]
    Overflow { from: String, to: String },

    #[error("unit error: malformed unit '{0}'")]
    Malformed(String),
}

impl UnitError {
    pub fn incompatible(from: &Unit, to: &Unit) -> Self {
        Self::Incompatible { from: from.to_string(), to: to.to_string() }
    }

    pub fn overflow(from: &Unit, to: &Unit) -> Self {
        Self::Overflow { from: from.to_string(), to: to.to_string() }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("date error: '{0}' is not a dd/mm/yyyy date")]
    Invalid(String),
}

/// Raised by an operator's value function when its operands cannot be combined.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    #[error("operation error: '{operator}' cannot combine {left} and {right}")]
    TypeMismatch { operator: &'static str, left: &'static str, right: &'static str },

    #[error("operation error: '{operator}' overflowed")]
    Overflow { operator: &'static str },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("parse error: unknown operator '{0}'")]
    UnknownOperator(String),

    #[error("parse error: empty expression")]
    EmptyExpression,

    #[error("parse error: unterminated text '{0}'")]
    UnterminatedText(String),

    #[error(transparent)]
    Unit(#[from] UnitError),
}
