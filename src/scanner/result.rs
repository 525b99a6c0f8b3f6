// Tue Jan 13 2026 - Alex

use crate::automaton::PatternId;
use serde::{Deserialize, Serialize};

/// One reported match. `start` is only meaningful for patterns compiled
/// with SOM_LEFTMOST; other patterns report 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Match {
    #[serde(rename = "patternId")]
    pub pattern: PatternId,
    #[serde(rename = "offsetStart")]
    pub start: usize,
    #[serde(rename = "offsetEnd")]
    pub end: usize,
}

impl Match {
    pub fn new(pattern: PatternId, start: usize, end: usize) -> Self {
        Self { pattern, start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn as_tuple(&self) -> (PatternId, u64, u64) {
        (self.pattern, self.start as u64, self.end as u64)
    }
}

/// Output layout for a finished scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultShape {
    /// One `Match` per hit.
    #[default]
    Records,
    /// `(pattern, start, end)` triples.
    Tuples,
    /// Triples flattened into one array.
    Flat,
    /// Number of hits only.
    Count,
}

impl ResultShape {
    /// Numeric codes used by older callers: 1 selects tuples, 2 the flat
    /// array, anything else records.
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => ResultShape::Tuples,
            2 => ResultShape::Flat,
            _ => ResultShape::Records,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShapedMatches {
    Records(Vec<Match>),
    Tuples(Vec<(PatternId, u64, u64)>),
    Flat(Vec<u64>),
    Count(usize),
}

impl ShapedMatches {
    pub fn len(&self) -> usize {
        match self {
            ShapedMatches::Records(v) => v.len(),
            ShapedMatches::Tuples(v) => v.len(),
            ShapedMatches::Flat(v) => v.len() / 3,
            ShapedMatches::Count(n) => *n,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn shape(matches: Vec<Match>, shape: ResultShape) -> ShapedMatches {
    match shape {
        ResultShape::Records => ShapedMatches::Records(matches),
        ResultShape::Tuples => ShapedMatches::Tuples(matches.iter().map(Match::as_tuple).collect()),
        ResultShape::Flat => ShapedMatches::Flat(
            matches
                .iter()
                .flat_map(|m| [m.pattern as u64, m.start as u64, m.end as u64])
                .collect(),
        ),
        ResultShape::Count => ShapedMatches::Count(matches.len()),
    }
}
