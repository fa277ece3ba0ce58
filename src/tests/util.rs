use core::cell::RefCell;
use std::collections::BTreeMap;

use crate::{
    evaluate::Evaluator,
    log::{Logger, RecordingLogger},
    node::operation::evaluate_operation,
    EvaluatedNode, Expression, MissingVariables,
};

macro_rules! dec {
    ($l:literal) => { <rust_decimal::Decimal as core::str::FromStr>::from_str(stringify!($l)).unwrap() };
}

macro_rules! num {
    ($l:literal) => { crate::Expression::number(dec!($l)) };
    ($l:literal, $u:literal) => { crate::Expression::quantity(dec!($l), $u).unwrap() };
}

macro_rules! op {
    ($l:expr, $t:literal, $r:expr $(,)?) => { crate::Expression::operation($t, $l, $r).unwrap() };
}

macro_rules! number {
    ($l:literal) => { crate::NodeValue::from(dec!($l)) };
}

/// An evaluator with canned values for references, which records every reference it is asked
/// to evaluate. Evaluating a reference without a canned value panics, so a test can prove an
/// operand was never touched.
#[derive(Default)]
pub struct Stub {
    values: BTreeMap<String, EvaluatedNode>,
    calls: RefCell<Vec<String>>,
    pub logger: RecordingLogger,
}

impl Stub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, node: EvaluatedNode) -> Self {
        self.values.insert(name.to_string(), node);
        self
    }

    /// Gives `name` an indeterminate value, waiting on `name` itself.
    pub fn with_question(self, name: &str) -> Self {
        self.with(name, EvaluatedNode::indeterminate(MissingVariables::single(name)))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn run(&self, expression: &Expression) -> EvaluatedNode {
        self.evaluate(expression)
    }
}

impl Evaluator for Stub {
    fn evaluate(&self, node: &Expression) -> EvaluatedNode {
        match node {
            Expression::Constant { value, unit } => EvaluatedNode::leaf(value.clone(), unit.clone()),
            Expression::Reference(name) => {
                self.calls.borrow_mut().push(name.clone());
                self.values
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| panic!("'{}' should not have been evaluated", name))
            }
            Expression::Operation(operation) => evaluate_operation(self, operation),
        }
    }

    fn logger(&self) -> &dyn Logger {
        &self.logger
    }
}
