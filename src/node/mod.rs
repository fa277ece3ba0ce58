pub mod evaluated;
pub mod expression;
pub mod operation;
pub mod operator;
