//! Configuration and invariant-violation errors.
//!
//! Fizzles (category 1) and run exhaustion (category 2) are not errors: a
//! fizzling codelet returns `CodeletOutcome::Fizzle` and an exhausted run
//! returns `Answer::NoAnswer`. Only configuration problems and broken
//! structural invariants surface here.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopycatError {
    UnknownFormula(String),
    EmptyString(&'static str),
    StringTooLong { which: &'static str, length: usize },
    InvalidCharacter { which: &'static str, ch: char },
    BrokenInvariant(String),
}

impl fmt::Display for CopycatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFormula(name) => {
                write!(f, "unknown temperature formula: {name:?}")
            }
            Self::EmptyString(which) => write!(f, "{which} string must not be empty"),
            Self::StringTooLong { which, length } => {
                write!(f, "{which} string has length {length}, exceeding the maximum")
            }
            Self::InvalidCharacter { which, ch } => {
                write!(f, "{which} string contains {ch:?}, which is not a letter")
            }
            Self::BrokenInvariant(detail) => write!(f, "broken invariant: {detail}"),
        }
    }
}

impl std::error::Error for CopycatError {}
