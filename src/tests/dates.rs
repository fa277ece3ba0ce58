use chrono::NaiveDate;

use crate::{
    date::{is_date_literal, to_date},
    error::DateError,
    Expression, NodeValue,
};

use super::util::Stub;

#[test]
fn test_dates_are_compared_as_dates() {
    let stub = Stub::new();

    // As text, "02/..." sorts after "01/..."
    let result = stub.run(&op!(Expression::text("02/01/2020"), "<", Expression::text("01/01/2021")));
    assert_eq!(result.value, NodeValue::from(true));

    let result = stub.run(&op!(Expression::text("15/06/2021"), ">=", Expression::text("15/06/2021")));
    assert_eq!(result.value, NodeValue::from(true));

    let result = stub.run(&op!(Expression::text("01/01/2020"), "=", Expression::text("01/01/2020")));
    assert_eq!(result.value, NodeValue::from(true));

    let result = stub.run(&op!(Expression::text("01/01/2020"), "!=", Expression::text("02/01/2020")));
    assert_eq!(result.value, NodeValue::from(true));

    assert!(stub.logger.is_empty());
}

#[test]
fn test_impossible_dates_are_compared_as_text() {
    let stub = Stub::new();

    let result = stub.run(&op!(Expression::text("31/02/2020"), "<", Expression::text("01/03/2020")));
    assert_eq!(result.value, NodeValue::from(false));

    let messages = stub.logger.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("compared as text"));
    assert!(messages[0].contains("'31/02/2020' is not a dd/mm/yyyy date"));
}

#[test]
fn test_only_two_dates_are_coerced() {
    let stub = Stub::new();

    // A date against plain text is ordinary text comparison
    let result = stub.run(&op!(Expression::text("01/01/2020"), "<", Expression::text("later")));
    assert_eq!(result.value, NodeValue::from(true));

    let result = stub.run(&op!(Expression::text("01/01/2020"), "=", num!(1)));
    assert_eq!(result.value, NodeValue::from(false));
    assert!(stub.logger.is_empty());
}

#[test]
fn test_embedded_dates_are_compared_as_text() {
    let stub = Stub::new();

    let result = stub.run(&op!(Expression::text("due 02/01/2020"), "<", Expression::text("due 01/01/2021")));
    assert_eq!(result.value, NodeValue::from(false));

    let result = stub.run(&op!(Expression::text("01/01/2020 "), "<", Expression::text("02/01/2019")));
    assert_eq!(result.value, NodeValue::from(true));

    assert!(stub.logger.is_empty());
}

#[test]
fn test_date_literals() {
    assert!(is_date_literal("01/12/2020"));
    assert!(is_date_literal("31/02/2020"));
    assert!(!is_date_literal("1/12/2020"));
    assert!(!is_date_literal("01/12/20"));
    assert!(!is_date_literal("on 01/12/2020"));
    assert!(!is_date_literal("2020-12-01"));

    assert_eq!(to_date("01/12/2020"), Ok(NaiveDate::from_ymd_opt(2020, 12, 1).unwrap()));
    assert_eq!(to_date("29/02/2020"), Ok(NaiveDate::from_ymd_opt(2020, 2, 29).unwrap()));
    assert_eq!(to_date("29/02/2021"), Err(DateError::Invalid("29/02/2021".to_string())));
    assert_eq!(to_date("2021"), Err(DateError::Invalid("2021".to_string())));
}
