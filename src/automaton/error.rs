// Tue Jan 13 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    #[error("NFA too large: {states} states exceeds the limit of {limit}")]
    NfaTooLarge { states: usize, limit: usize },
    #[error("DFA too large: {states} states exceeds the limit of {limit}")]
    DfaTooLarge { states: usize, limit: usize },
}

impl AutomatonError {
    pub fn states(&self) -> usize {
        match self {
            AutomatonError::NfaTooLarge { states, .. } => *states,
            AutomatonError::DfaTooLarge { states, .. } => *states,
        }
    }

    pub fn limit(&self) -> usize {
        match self {
            AutomatonError::NfaTooLarge { limit, .. } => *limit,
            AutomatonError::DfaTooLarge { limit, .. } => *limit,
        }
    }
}
