#![forbid(unsafe_code)]

pub mod date;
pub mod decimal_ext;
pub mod engine;
pub mod error;
pub mod evaluate;
pub mod log;
pub mod missing;
pub mod node;
pub mod rule;
pub mod situation;
pub mod unit;
pub mod value;

#[cfg(test)]
pub mod tests;

pub use crate::{
    engine::{Engine, EvaluationSettings},
    evaluate::Evaluator,
    missing::MissingVariables,
    node::{
        evaluated::{EvaluatedNode, NodeValue},
        expression::Expression,
        operation::{evaluate_operation, OperationNode},
        operator::OperationKind,
    },
    rule::{Rule, RuleSet},
    situation::{Answer, Situation},
    unit::Unit,
    value::Value,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
