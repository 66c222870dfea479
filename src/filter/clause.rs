//! Clause grammar for boolean filters.
//!
//! Grammar (first match wins):
//!
//!   "=true"  | "!=false"  -> accept true
//!   "=false" | "!=true"   -> accept false
//!   "not-" NAME           -> accept false
//!   NAME                  -> accept true
//!
//! Comparison forms must span the whole clause, so `=truest` is read as a
//! bare token. The empty clause is rejected.

use std::fmt;

use winnow::combinator::{alt, eof, preceded, terminated};
use winnow::prelude::*;
use winnow::token::rest;

use crate::error::{FilterError, Result};

/// Prefix marking a bare token as negated.
pub const NEGATION_PREFIX: &str = "not-";

/// One parsed filter clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// `=true` / `=false`
    Equals(bool),
    /// `!=true` / `!=false`
    NotEquals(bool),
    /// `not-name`
    Absent(String),
    /// `name`
    Present(String),
}

impl Clause {
    /// The boolean outcome this clause adds to a filter.
    pub fn outcome(&self) -> bool {
        match self {
            Clause::Equals(value) => *value,
            Clause::NotEquals(value) => !*value,
            Clause::Absent(_) => false,
            Clause::Present(_) => true,
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Equals(value) => write!(f, "={}", value),
            Clause::NotEquals(value) => write!(f, "!={}", value),
            Clause::Absent(name) => write!(f, "{}{}", NEGATION_PREFIX, name),
            Clause::Present(name) => write!(f, "{}", name),
        }
    }
}

// Concrete error type for the grammar fns
type PResult<T> = std::result::Result<T, winnow::error::ErrMode<winnow::error::ContextError>>;

/// `!=` yields true (negated), `=` yields false.
fn operator(input: &mut &str) -> PResult<bool> {
    alt(("!=".value(true), "=".value(false))).parse_next(input)
}

fn literal(input: &mut &str) -> PResult<bool> {
    alt(("true".value(true), "false".value(false))).parse_next(input)
}

fn comparison(input: &mut &str) -> PResult<Clause> {
    terminated((operator, literal), eof)
        .map(|(negated, value)| {
            if negated {
                Clause::NotEquals(value)
            } else {
                Clause::Equals(value)
            }
        })
        .parse_next(input)
}

fn absent(input: &mut &str) -> PResult<Clause> {
    preceded(NEGATION_PREFIX, rest)
        .map(|name: &str| Clause::Absent(name.to_string()))
        .parse_next(input)
}

fn present(input: &mut &str) -> PResult<Clause> {
    rest.map(|name: &str| Clause::Present(name.to_string()))
        .parse_next(input)
}

fn clause(input: &mut &str) -> PResult<Clause> {
    alt((comparison, absent, present)).parse_next(input)
}

/// Parse a single filter clause.
pub fn parse_clause(input: &str) -> Result<Clause> {
    if input.is_empty() {
        return Err(FilterError::InvalidExpression(input.to_string()));
    }

    let mut remaining = input;
    clause(&mut remaining).map_err(|_| FilterError::InvalidExpression(input.to_string()))
}
