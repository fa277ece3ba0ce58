//! An abstraction for something which can evaluate the nodes of a rule tree.
//!
//! The [Engine](crate::Engine) is the implementation used in practice. Operation nodes only ever
//! see this trait, so they can be evaluated against any source of operand values, such as a
//! stub which records which operands were actually evaluated.

use crate::{log::Logger, node::{evaluated::EvaluatedNode, expression::Expression}};

pub trait Evaluator {
    /// Evaluates any node of a rule tree. Must be re-entrant, since operation nodes call back
    /// into it for their operands, and must have no side effects besides logging.
    fn evaluate(&self, node: &Expression) -> EvaluatedNode;

    /// Where recoverable problems met during evaluation are reported.
    fn logger(&self) -> &dyn Logger;
}
