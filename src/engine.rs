//! The engine evaluates the rules of a model against a situation.

use core::cell::Cell;
use std::rc::Rc;

use crate::{
    evaluate::Evaluator,
    log::{warning, Logger, TracingLogger},
    missing::MissingVariables,
    node::{
        evaluated::{EvaluatedNode, NodeValue},
        expression::Expression,
        operation::evaluate_operation,
    },
    rule::{Rule, RuleSet},
    situation::{is_a_valid_option, parse_answer, Answer, ParsedAnswer, Situation},
    value::Value,
};

/// Settings which control evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationSettings {
    /// How many rule references may be nested while evaluating one rule. Models are acyclic, so
    /// this is only reached through a reference cycle.
    pub max_depth: usize,

    /// Whether [Engine::set_situation] drops answers which aren't one of their question's options.
    pub check_situation_options: bool,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            max_depth: 256,
            check_situation_options: true,
        }
    }
}

pub struct Engine {
    rules: RuleSet,
    situation: Situation,
    settings: EvaluationSettings,
    logger: Rc<dyn Logger>,
    depth: Cell<usize>,
}

impl Engine {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            situation: Situation::new(),
            settings: EvaluationSettings::default(),
            logger: Rc::new(TracingLogger),
            depth: Cell::new(0),
        }
    }

    pub fn with_settings(mut self, settings: EvaluationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_logger(mut self, logger: Rc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn situation(&self) -> &Situation {
        &self.situation
    }

    pub fn settings(&self) -> &EvaluationSettings {
        &self.settings
    }

    /// Replaces the current answers. Unless disabled in the settings, answers which are not one
    /// of their question's options are dropped with a warning.
    #[tracing::instrument(skip_all, fields(answers = situation.len()))]
    pub fn set_situation(&mut self, situation: Situation) -> &mut Self {
        let mut accepted = Situation::new();

        for (name, answer) in situation {
            if self.settings.check_situation_options {
                match is_a_valid_option(&self.rules, &name, &answer) {
                    Ok(true) => (),
                    Ok(false) => {
                        self.logger.warn(&format!(
                            "The answer {:?} to '{}' is not one of its options, and is ignored",
                            answer, name,
                        ));
                        continue;
                    }
                    Err(e) => {
                        warning(
                            self.logger.as_ref(),
                            &format!("The answer to '{}' cannot be read, and is ignored", name),
                            &e,
                        );
                        continue;
                    }
                }
            }

            accepted.insert(name, answer);
        }

        self.situation = accepted;
        self
    }

    /// Evaluates the rule named `name`.
    #[tracing::instrument(skip(self))]
    pub fn evaluate_rule(&self, name: &str) -> EvaluatedNode {
        self.evaluate_reference(name)
    }

    fn evaluate_reference(&self, name: &str) -> EvaluatedNode {
        let rule = match self.rules.get(name) {
            Some(rule) => rule,
            None => {
                self.logger.warn(&format!("The rule '{}' does not exist", name));
                return EvaluatedNode::indeterminate(MissingVariables::single(name));
            }
        };

        if let Some(answer) = self.situation.get(name) {
            return self.evaluate_answer(rule, answer);
        }

        let formula = match rule.formula() {
            Some(formula) => formula,
            // A question nobody has answered yet
            None => {
                return EvaluatedNode {
                    unit: rule.unit().cloned(),
                    ..EvaluatedNode::indeterminate(MissingVariables::single(name))
                }
            }
        };

        let depth = self.depth.get();
        if depth >= self.settings.max_depth {
            self.logger.warn(&format!(
                "Evaluating '{}' nests more than {} references, the rules are probably cyclic",
                name, self.settings.max_depth,
            ));
            return EvaluatedNode::indeterminate(MissingVariables::single(name));
        }

        self.depth.set(depth + 1);
        let evaluated = self.evaluate(formula);
        self.depth.set(depth);

        EvaluatedNode {
            value: evaluated.value.clone(),
            unit: evaluated.unit.clone().or_else(|| rule.unit().cloned()),
            missing_variables: evaluated.missing_variables.clone(),
            symbol: None,
            explanation: vec![evaluated],
        }
    }

    fn evaluate_answer(&self, rule: &Rule, answer: &Answer) -> EvaluatedNode {
        let value = match answer {
            Answer::Number(n) => Value::Number(*n),
            Answer::Text(text) => match parse_answer(text) {
                Ok(ParsedAnswer::Constant(value)) => value,
                Ok(ParsedAnswer::Reference(option)) => Value::Text(option),
                Err(e) => {
                    warning(
                        self.logger.as_ref(),
                        &format!("The answer to '{}' cannot be read", rule.name()),
                        &e,
                    );
                    return EvaluatedNode::indeterminate(MissingVariables::single(rule.name()));
                }
            },
        };

        let unit = match value {
            Value::Number(_) => rule.unit().cloned(),
            _ => None,
        };
        EvaluatedNode::leaf(NodeValue::Value(value), unit)
    }
}

impl Evaluator for Engine {
    fn evaluate(&self, node: &Expression) -> EvaluatedNode {
        match node {
            Expression::Constant { value, unit } => EvaluatedNode::leaf(value.clone(), unit.clone()),
            Expression::Reference(name) => self.evaluate_reference(name),
            Expression::Operation(operation) => evaluate_operation(self, operation),
        }
    }

    fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }
}
