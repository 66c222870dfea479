//! Boolean filters built from command-line style clauses.
//!
//! Clauses such as `dangling`, `not-dangling` or `=true` accumulate into a
//! [`BoolFilter`], which then matches observed boolean properties.

pub mod app;
pub mod config;
pub mod error;
pub mod filter;

pub use error::{FilterError, Result};
pub use filter::{BoolFilter, Clause, parse_clause};
