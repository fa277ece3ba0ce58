use crate::{
    error::{DateError, OperationError, ParseError, UnitError},
    log::{warning, RecordingLogger},
    Expression, Unit,
};

#[test]
fn test_error_display_is_prefixed() {
    assert_eq!(
        UnitError::incompatible(&Unit::atom("kg"), &Unit::parse("m/s").unwrap()).to_string(),
        "unit error: cannot convert kg to m/s",
    );
    assert_eq!(UnitError::Malformed("m/".to_string()).to_string(), "unit error: malformed unit 'm/'");
    assert_eq!(
        UnitError::overflow(&Unit::atom("km"), &Unit::atom("m")).to_string(),
        "unit error: converting km to m overflowed",
    );
    assert_eq!(
        DateError::Invalid("1/1/20".to_string()).to_string(),
        "date error: '1/1/20' is not a dd/mm/yyyy date",
    );
    assert_eq!(
        OperationError::TypeMismatch { operator: "<", left: "number", right: "text" }.to_string(),
        "operation error: '<' cannot combine number and text",
    );
    assert_eq!(OperationError::Overflow { operator: "*" }.to_string(), "operation error: '*' overflowed");
    assert_eq!(ParseError::UnknownOperator("^".to_string()).to_string(), "parse error: unknown operator '^'");
    assert_eq!(ParseError::EmptyExpression.to_string(), "parse error: empty expression");
}

#[test]
fn test_unit_errors_pass_through_parse_errors() {
    let err = ParseError::from(UnitError::Malformed("a/b/c".to_string()));
    assert_eq!(err.to_string(), "unit error: malformed unit 'a/b/c'");

    assert_eq!(
        Expression::quantity(1, "a/b/c"),
        Err(ParseError::Unit(UnitError::Malformed("a/b/c".to_string()))),
    );
}

#[test]
fn test_warning_includes_cause() {
    let logger = RecordingLogger::default();
    warning(&logger, "Something was skipped", &DateError::Invalid("x".to_string()));

    assert_eq!(
        logger.messages(),
        vec!["Something was skipped\n  caused by: date error: 'x' is not a dd/mm/yyyy date".to_string()],
    );
}
