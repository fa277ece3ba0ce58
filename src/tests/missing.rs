use crate::{EvaluatedNode, Expression, MissingVariables, NodeValue, Unit};

use super::util::Stub;

#[test]
fn test_indeterminate_operand_propagates() {
    let stub = Stub::new().with_question("v");

    for token in ["+", "-", "*", "/", "<", ">="] {
        let result = stub.run(&Expression::operation(token, num!(4), Expression::reference("v")).unwrap());
        assert_eq!(result.value, NodeValue::Indeterminate, "4 {} v", token);
        assert_eq!(result.missing_variables, MissingVariables::single("v"));
    }
}

#[test]
fn test_missing_sets_are_merged() {
    let stub = Stub::new().with_question("u").with_question("v");

    let result = stub.run(&op!(Expression::reference("u"), "+", Expression::reference("v")));
    assert_eq!(result.value, NodeValue::Indeterminate);
    assert_eq!(result.missing_variables.names().collect::<Vec<_>>(), vec!["u", "v"]);

    // The same input reached twice weighs twice
    let result = stub.run(&op!(
        op!(Expression::reference("u"), "*", num!(2)),
        "-",
        Expression::reference("u"),
    ));
    assert_eq!(result.missing_variables.weight("u"), Some(2));
    assert_eq!(result.missing_variables.len(), 1);
}

#[test]
fn test_indeterminate_still_has_a_unit() {
    let salary = EvaluatedNode {
        unit: Some(Unit::parse("€/month").unwrap()),
        ..EvaluatedNode::indeterminate(MissingVariables::single("salary"))
    };
    let stub = Stub::new().with("salary", salary);

    let result = stub.run(&op!(Expression::reference("salary"), "+", num!(100, "€/month")));
    assert_eq!(result.value, NodeValue::Indeterminate);
    assert_eq!(result.unit, Some(Unit::parse("€/month").unwrap()));

    let result = stub.run(&op!(Expression::reference("salary"), "*", num!(12, "month")));
    assert_eq!(result.value, NodeValue::Indeterminate);
    assert_eq!(result.unit, Some(Unit::atom("€")));
}

#[test]
fn test_logical_operators_wait_for_missing_inputs() {
    let stub = Stub::new().with_question("u").with_question("v");

    for token in ["=", "!="] {
        let result = stub.run(&Expression::operation(token, num!(5), Expression::reference("v")).unwrap());
        assert_eq!(result.value, NodeValue::Indeterminate, "5 {} v", token);
        assert_eq!(result.missing_variables, MissingVariables::single("v"));
    }

    let result = stub.run(&op!(Expression::reference("v"), "=", Expression::boolean(false)));
    assert_eq!(result.value, NodeValue::Indeterminate);

    let result = stub.run(&op!(Expression::reference("u"), "=", Expression::reference("v")));
    assert_eq!(result.value, NodeValue::Indeterminate);
    assert_eq!(result.missing_variables.len(), 2);

    let result = stub.run(&op!(Expression::boolean(true), "and", Expression::reference("v")));
    assert_eq!(result.value, NodeValue::Indeterminate);
    assert!(!result.is_complete());

    let result = stub.run(&op!(Expression::reference("v"), "or", Expression::boolean(false)));
    assert_eq!(result.value, NodeValue::Indeterminate);
    assert!(result.missing_variables.contains("v"));

    // Decided by the right operand alone
    let result = stub.run(&op!(Expression::reference("v"), "or", Expression::boolean(true)));
    assert_eq!(result.value, NodeValue::from(true));
    assert!(result.is_complete());
}

#[test]
fn test_merge() {
    let mut a = MissingVariables::single("a");
    a.merge(&MissingVariables::single("b"));
    a.merge(&MissingVariables::single("a"));

    assert_eq!(a.weight("a"), Some(2));
    assert_eq!(a.weight("b"), Some(1));
    assert_eq!(a.weight("c"), None);

    let all = MissingVariables::merge_all([&a, &MissingVariables::new(), &MissingVariables::single("c")]);
    assert_eq!(all.names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert!(MissingVariables::merge_all(Vec::<&MissingVariables>::new()).is_empty());
}
