//! Binary operation nodes, and their evaluation.
//!
//! Evaluating an operation is lazy: the left operand is evaluated first, and the right operand
//! is skipped entirely if the left one already decides the result. Once both are known, the
//! operands' units are reconciled, the operator's value function is applied, and percentages are
//! given their relative meaning.
//!
//! Nothing in here fails. An operation which cannot be computed evaluates to one of the
//! non-concrete states of [NodeValue], and anything recovered from along the way is reported to
//! the evaluator's logger.

use rust_decimal::Decimal;

use crate::{
    date::{is_date_literal, to_date},
    decimal_ext::DecimalExtensions,
    error::{OperationError, ParseError, UnitError},
    evaluate::Evaluator,
    log::{warning, Logger},
    missing::MissingVariables,
    unit::{convert_value, infer_unit, serialize_unit, Unit},
    value::Value,
};

use super::{
    evaluated::{EvaluatedNode, NodeValue},
    expression::Expression,
    operator::OperationKind,
};

/// An operator applied to exactly two operands. Order matters, since subtraction, division and
/// the orderings are not commutative.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct OperationNode {
    kind: OperationKind,
    symbol: String,
    operands: Box<(Expression, Expression)>,
}

impl OperationNode {
    pub fn new(kind: OperationKind, left: Expression, right: Expression) -> Self {
        Self {
            kind,
            symbol: kind.symbol().to_string(),
            operands: Box::new((left, right)),
        }
    }

    /// Builds the operation for a source token, as the parser does once both operands are parsed.
    pub fn parse(token: &str, left: Expression, right: Expression) -> Result<Self, ParseError> {
        let kind = OperationKind::from_token(token)
            .ok_or_else(|| ParseError::UnknownOperator(token.to_string()))?;
        Ok(Self::new(kind, left, right))
    }

    /// Replaces the symbol shown when this operation is explained.
    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.symbol = symbol.to_string();
        self
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn left(&self) -> &Expression {
        &self.operands.0
    }

    pub fn right(&self) -> &Expression {
        &self.operands.1
    }

    fn evaluated(
        &self,
        value: NodeValue,
        unit: Option<Unit>,
        missing_variables: MissingVariables,
        explanation: Vec<EvaluatedNode>,
    ) -> EvaluatedNode {
        EvaluatedNode {
            value,
            unit: unit.and_then(Unit::non_empty),
            missing_variables,
            symbol: Some(self.symbol.clone()),
            explanation,
        }
    }
}

/// An operand on its way through reconciliation. Conversion changes these, never the evaluated
/// children kept in the explanation.
#[derive(Debug, Clone)]
struct Operand {
    value: NodeValue,
    unit: Option<Unit>,
}

impl Operand {
    fn of(node: &EvaluatedNode) -> Self {
        Self { value: node.value.clone(), unit: node.unit.clone() }
    }

    fn convert_to(&self, target: &Unit) -> Result<Operand, UnitError> {
        Ok(Self {
            value: convert_value(&self.value, self.unit.as_ref(), target)?,
            unit: Some(target.clone()),
        })
    }

    fn is_percent(&self) -> bool {
        self.unit.as_ref().is_some_and(Unit::is_percent)
    }
}

/// Evaluates an operation node, using `evaluator` for its operands.
pub fn evaluate_operation<E: Evaluator + ?Sized>(evaluator: &E, node: &OperationNode) -> EvaluatedNode {
    let kind = node.kind();

    let left = evaluator.evaluate(node.left());
    if let Some(value) = left_shortcut(kind, &left.value) {
        let missing = left.missing_variables.clone();
        return node.evaluated(value, None, missing, vec![left]);
    }

    let right = evaluator.evaluate(node.right());
    if let Some(value) = right_shortcut(kind, &right.value) {
        let missing = right.missing_variables.clone();
        return node.evaluated(value, None, missing, vec![left, right]);
    }

    let missing = MissingVariables::merge_all([&left.missing_variables, &right.missing_variables]);
    let indeterminate = left.value.is_indeterminate() || right.value.is_indeterminate();

    let (mut l, mut r) = (Operand::of(&left), Operand::of(&right));

    // Adding a percentage to a quantity raises it by that percentage, so the units must not be
    // reconciled: % and the quantity's unit are deliberately different
    let percent_adjustment = kind.is_additive() && r.is_percent() && !l.is_percent();

    if !kind.is_multiplicative() && !percent_adjustment {
        (l, r) = reconcile_units(evaluator.logger(), node, l, r);
    }

    let value = if indeterminate {
        NodeValue::Indeterminate
    } else {
        combine(evaluator.logger(), node, &l.value, &r.value)
    };

    let (value, unit) = post_process(evaluator.logger(), node, value, &l, &r, percent_adjustment);
    node.evaluated(value, unit, missing, vec![left, right])
}

/// Decides the operation from its left operand alone, if possible.
fn left_shortcut(kind: OperationKind, left: &NodeValue) -> Option<NodeValue> {
    use OperationKind::*;

    match left {
        NodeValue::Inapplicable if matches!(kind, Lte | Gte | Div | Mul | Sub | And) => {
            Some(if kind == And { NodeValue::from(false) } else { NodeValue::Inapplicable })
        }
        // 0 * x and 0 / x are both 0
        v if v.is_zero() && matches!(kind, Div | Mul) => Some(v.clone()),
        v if kind == And && v.as_boolean() == Some(false) => Some(v.clone()),
        v if kind == Or && v.as_boolean() == Some(true) => Some(v.clone()),
        _ => None,
    }
}

/// Decides the operation from its right operand alone, if possible. Unlike the left side, a zero
/// only decides multiplication: x / 0 is handled by the division itself.
fn right_shortcut(kind: OperationKind, right: &NodeValue) -> Option<NodeValue> {
    use OperationKind::*;

    match right {
        NodeValue::Inapplicable if matches!(kind, Lte | Gte | Div | Mul | And) => {
            Some(if kind == And { NodeValue::from(false) } else { NodeValue::Inapplicable })
        }
        v if v.is_zero() && kind == Mul => Some(v.clone()),
        v if kind == And && v.as_boolean() == Some(false) => Some(v.clone()),
        v if kind == Or && v.as_boolean() == Some(true) => Some(v.clone()),
        _ => None,
    }
}

/// Converts one operand into the other's unit, preferring the left operand's unit. A failed
/// conversion is logged and the operands are returned unconverted.
fn reconcile_units(logger: &dyn Logger, node: &OperationNode, left: Operand, right: Operand) -> (Operand, Operand) {
    let converted = if let Some(target) = &left.unit {
        right.convert_to(target).map(|r| (left.clone(), r))
    } else if let Some(target) = &right.unit {
        left.convert_to(target).map(|l| (l, right.clone()))
    } else {
        return (left, right);
    };

    match converted {
        Ok(pair) => pair,
        Err(e) => {
            warning(
                logger,
                &format!(
                    "In the expression '{}', the left operand (unit: {}) cannot be reconciled with the right operand (unit: {})",
                    node.kind().token(),
                    serialize_unit(left.unit.as_ref()),
                    serialize_unit(right.unit.as_ref()),
                ),
                &e,
            );
            (left, right)
        }
    }
}

/// Applies the operator's value function to reconciled operands.
fn combine(logger: &dyn Logger, node: &OperationNode, left: &NodeValue, right: &NodeValue) -> NodeValue {
    let kind = node.kind();

    // Ordering or scaling against something which doesn't exist gives nothing
    if (kind.is_ordering() || kind.is_multiplicative()) && right.is_inapplicable() {
        return NodeValue::Inapplicable;
    }

    if let (Some(a), Some(b)) = (date_text(left), date_text(right)) {
        match (to_date(a), to_date(b)) {
            (Ok(a), Ok(b)) => {
                return apply(logger, node, &NodeValue::from(Value::Date(a)), &NodeValue::from(Value::Date(b)));
            }
            (Err(e), _) | (_, Err(e)) => warning(
                logger,
                &format!("In the expression '{}', the dates are compared as text", kind.token()),
                &e,
            ),
        }
    }

    apply(logger, node, left, right)
}

fn date_text(value: &NodeValue) -> Option<&str> {
    value.as_value().and_then(Value::as_text).filter(|t| is_date_literal(t))
}

fn apply(logger: &dyn Logger, node: &OperationNode, left: &NodeValue, right: &NodeValue) -> NodeValue {
    match node.kind().apply(left, right) {
        Ok(value) => value,
        Err(e) => {
            warning(
                logger,
                &format!("The expression '{}' does not apply to its operands", node.kind().token()),
                &e,
            );
            NodeValue::Inapplicable
        }
    }
}

/// Gives percentages their relative meaning, and works out the unit of the result.
fn post_process(
    logger: &dyn Logger,
    node: &OperationNode,
    value: NodeValue,
    left: &Operand,
    right: &Operand,
    percent_adjustment: bool,
) -> (NodeValue, Option<Unit>) {
    let kind = node.kind();
    let inferred = infer_unit(kind, [left.unit.as_ref(), right.unit.as_ref()]);

    // 5% * 200 is 10, not 1000 percent: one percent atom is cancelled by dividing by 100
    if kind == OperationKind::Mul {
        if let Some(unit) = inferred.as_ref().filter(|u| u.has_percent_numerator()) {
            let value = match value {
                NodeValue::Value(Value::Number(n)) => NodeValue::from(n.from_percent()),
                other => other,
            };
            return (value, unit.multiply(&Unit::percent().inverse()).non_empty());
        }
    }

    if percent_adjustment {
        let value = match (&value, amount(&left.value), amount(&right.value)) {
            (NodeValue::Value(_), Some(base), Some(percent)) => {
                match base.adjust_by_percent(percent, kind == OperationKind::Add) {
                    Some(adjusted) => NodeValue::from(adjusted),
                    None => {
                        warning(
                            logger,
                            &format!("The expression '{}' does not apply to its operands", kind.token()),
                            &OperationError::Overflow { operator: kind.token() },
                        );
                        NodeValue::Inapplicable
                    }
                }
            }
            _ => value,
        };
        return (value, left.unit.clone());
    }

    if kind.is_arithmetic() {
        (value, inferred)
    } else {
        (value, None)
    }
}

/// Reads an operand of a percentage adjustment as a number, an inapplicable operand being zero.
fn amount(value: &NodeValue) -> Option<Decimal> {
    match value {
        NodeValue::Inapplicable => Some(Decimal::ZERO),
        other => other.as_number(),
    }
}
