// Tue Jan 13 2026 - Alex

use crate::automaton::AutomatonError;
use crate::pattern::ParseError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("pattern {index}: {source}")]
    Parse {
        index: usize,
        #[source]
        source: ParseError,
    },

    #[error("pattern {index} matches the empty buffer; set ALLOWEMPTY to permit it")]
    MatchesEmpty { index: usize },

    #[error("too many patterns: {count} exceeds the limit of {limit}")]
    TooManyPatterns { count: usize, limit: usize },

    #[error(
        "automaton too large{}: {states} states exceeds the limit of {limit}",
        pattern_suffix(.index)
    )]
    AutomatonTooLarge {
        index: Option<usize>,
        states: usize,
        limit: usize,
    },

    #[error("incompatible database format: {0}")]
    IncompatibleFormat(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompileErrorKind {
    Parse,
    Unsupported,
    MatchesEmpty,
    TooManyPatterns,
    AutomatonTooLarge,
    IncompatibleFormat,
    InvalidConfig,
    Serialization,
}

fn pattern_suffix(index: &Option<usize>) -> String {
    index.map(|i| format!(" (pattern {})", i)).unwrap_or_default()
}

impl CompileError {
    pub fn kind(&self) -> CompileErrorKind {
        match self {
            CompileError::Parse { source, .. } if source.is_unsupported() => {
                CompileErrorKind::Unsupported
            }
            CompileError::Parse { .. } => CompileErrorKind::Parse,
            CompileError::MatchesEmpty { .. } => CompileErrorKind::MatchesEmpty,
            CompileError::TooManyPatterns { .. } => CompileErrorKind::TooManyPatterns,
            CompileError::AutomatonTooLarge { .. } => CompileErrorKind::AutomatonTooLarge,
            CompileError::IncompatibleFormat(_) => CompileErrorKind::IncompatibleFormat,
            CompileError::InvalidConfig(_) => CompileErrorKind::InvalidConfig,
            CompileError::Serialization(_) => CompileErrorKind::Serialization,
        }
    }

    /// Index of the offending pattern, when the failure is tied to one.
    pub fn pattern_index(&self) -> Option<usize> {
        match self {
            CompileError::Parse { index, .. } => Some(*index),
            CompileError::MatchesEmpty { index } => Some(*index),
            CompileError::AutomatonTooLarge { index, .. } => *index,
            _ => None,
        }
    }

    pub(crate) fn from_automaton(index: Option<usize>, err: AutomatonError) -> Self {
        CompileError::AutomatonTooLarge {
            index,
            states: err.states(),
            limit: err.limit(),
        }
    }
}
