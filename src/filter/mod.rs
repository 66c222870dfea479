//! Boolean filter accumulated from textual clauses.
//!
//! Each clause adds one accepted outcome; clauses never remove outcomes, so
//! repeated clauses widen the match set:
//!
//!   container        - accept true
//!   not-container    - accept false
//!   =true, =false    - accept the literal
//!   !=true, !=false  - accept the negated literal
//!
//! Typical use: parse every clause, call `enable`, then evaluate subjects.

pub mod clause;


use std::fmt;

use crate::error::Result;

pub use clause::{Clause, NEGATION_PREFIX, parse_clause};

/// Set of accepted boolean outcomes, plus a readiness marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoolFilter {
    accepts_true: bool,
    accepts_false: bool,
    enabled: bool,
}

impl BoolFilter {
    /// Empty filter: matches nothing, not enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every clause, then enable the filter.
    ///
    /// Stops at the first invalid clause.
    pub fn from_clauses<I, S>(clauses: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::new();
        for clause in clauses {
            filter.parse(clause.as_ref())?;
        }
        filter.enable();
        Ok(filter)
    }

    /// Union the outcome of one clause into the accepted set.
    ///
    /// An empty clause is rejected and leaves the filter untouched.
    pub fn parse(&mut self, input: &str) -> Result<()> {
        let clause = parse_clause(input)?;
        self.accept(clause.outcome());
        Ok(())
    }

    fn accept(&mut self, outcome: bool) {
        if outcome {
            self.accepts_true = true;
        } else {
            self.accepts_false = true;
        }
    }

    /// Mark the filter ready for evaluation. Idempotent; does not freeze the
    /// accepted set.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// True when no clause has been accepted yet.
    pub fn is_empty(&self) -> bool {
        !self.accepts_true && !self.accepts_false
    }

    /// Representative value: true whenever true is accepted.
    pub fn value(&self) -> bool {
        self.accepts_true
    }

    /// Whether `subject` is in the accepted set.
    pub fn filter(&self, subject: bool) -> bool {
        self.accepts(subject)
    }

    pub fn accepts(&self, outcome: bool) -> bool {
        if outcome {
            self.accepts_true
        } else {
            self.accepts_false
        }
    }

    /// A missing key counts as false, so it matches unless true is accepted.
    pub fn match_if_key_missing(&self) -> bool {
        !self.accepts_true
    }
}

impl fmt::Display for BoolFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.accepts_true, self.accepts_false) {
            (false, false) => write!(f, "{{}}"),
            (true, false) => write!(f, "{{true}}"),
            (false, true) => write!(f, "{{false}}"),
            (true, true) => write!(f, "{{true, false}}"),
        }
    }
}
