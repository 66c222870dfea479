//! Error types for boolean filter parsing.

use thiserror::Error;

/// Errors raised while interpreting filter clauses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid expression: {0:?}")]
    InvalidExpression(String),
}

pub type Result<T> = std::result::Result<T, FilterError>;
