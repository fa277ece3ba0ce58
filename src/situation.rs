//! Answers to a model's questions, and the check that an answer is one of the options a question
//! declares.

use core::str::FromStr;
use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::{error::ParseError, rule::RuleSet, value::Value};

/// An answer to a question, as given by whoever fills in the questionnaire. Text answers are
/// expressions, so `'employee'` is the text employee while `employee` names an option.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Answer {
    Number(Decimal),
    Text(String),
}

impl From<Decimal> for Answer {
    fn from(d: Decimal) -> Self {
        Self::Number(d)
    }
}

impl From<i64> for Answer {
    fn from(i: i64) -> Self {
        Self::Number(Decimal::from(i))
    }
}

impl From<&str> for Answer {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Answers by rule name.
pub type Situation = BTreeMap<String, Answer>;

/// A text answer, once read as an expression.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum ParsedAnswer {
    Constant(Value),
    Reference(String),
}

/// Reads a text answer. Quoted text is a text constant, `true`/`yes` and `false`/`no` are
/// booleans, decimal literals are numbers and anything else refers to a rule or option by name.
pub fn parse_answer(text: &str) -> Result<ParsedAnswer, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::EmptyExpression);
    }

    if let Some(quote) = text.chars().next().filter(|c| *c == '\'' || *c == '"') {
        return if text.len() >= 2 && text.ends_with(quote) {
            Ok(ParsedAnswer::Constant(Value::Text(text[1..text.len() - 1].to_string())))
        } else {
            Err(ParseError::UnterminatedText(text.to_string()))
        };
    }

    Ok(match text {
        "true" | "yes" => ParsedAnswer::Constant(Value::Boolean(true)),
        "false" | "no" => ParsedAnswer::Constant(Value::Boolean(false)),
        _ => match Decimal::from_str(text) {
            Ok(n) => ParsedAnswer::Constant(Value::Number(n)),
            Err(_) => ParsedAnswer::Reference(text.to_string()),
        },
    })
}

/// Checks that `answer` is acceptable for the question `dotted_name`.
///
/// Numbers are always accepted, and so is anything for a question without declared options.
/// Otherwise the answer must be one of the options. An option which has since been turned into a
/// rule of its own, `<dotted_name> . <option>`, is accepted too, so that situations saved against
/// an older model stay valid.
pub fn is_a_valid_option(rules: &RuleSet, dotted_name: &str, answer: &Answer) -> Result<bool, ParseError> {
    let text = match answer {
        Answer::Number(_) => return Ok(true),
        Answer::Text(t) => t,
    };

    let parsed = parse_answer(text)?;
    let options = match rules.get(dotted_name).and_then(|r| r.options()) {
        Some(options) if !options.is_empty() => options,
        _ => return Ok(true),
    };

    Ok(match parsed {
        ParsedAnswer::Constant(Value::Text(t)) => options.iter().any(|o| unquote(o) == t),
        ParsedAnswer::Constant(_) => options.iter().any(|o| o == text.trim()),
        ParsedAnswer::Reference(name) => {
            options.iter().any(|o| *o == name)
                || rules.contains(&format!("{} . {}", dotted_name, name))
        }
    })
}

fn unquote(option: &str) -> &str {
    let option = option.trim();
    for quote in ['\'', '"'] {
        if let Some(inner) = option.strip_prefix(quote).and_then(|o| o.strip_suffix(quote)) {
            return inner;
        }
    }
    option
}
