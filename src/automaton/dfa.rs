// Tue Jan 13 2026 - Alex

use crate::automaton::classes::ByteClasses;
use crate::automaton::error::AutomatonError;
use crate::automaton::nfa::{Nfa, PatternId, State, StateId};
use crate::automaton::sparse::SparseSet;
use crate::pattern::byteset::is_word_byte;
use crate::pattern::LookContext;
use ahash::RandomState;
use indexmap::IndexSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Class of the byte just consumed, as far as anchors can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prev {
    Start,
    Newline,
    Word,
    Other,
}

impl Prev {
    pub fn classify(byte: u8) -> Prev {
        if byte == b'\n' {
            Prev::Newline
        } else if is_word_byte(byte) {
            Prev::Word
        } else {
            Prev::Other
        }
    }

    pub fn representative(self) -> Option<u8> {
        match self {
            Prev::Start => None,
            Prev::Newline => Some(b'\n'),
            Prev::Word => Some(b'a'),
            Prev::Other => Some(b' '),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub next: u32,
    /// Index into the match set table of the patterns ending at the
    /// offset where this transition is taken. 0 means none.
    pub matches: u32,
}

/// Dense transition table. Each row has one column per byte class plus a
/// trailing column used when the last byte of the input is `\n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dfa {
    classes: ByteClasses,
    stride: usize,
    transitions: Vec<Transition>,
    eoi: Vec<u32>,
    match_sets: Vec<Vec<PatternId>>,
    start: u32,
}

impl Dfa {
    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn state_count(&self) -> usize {
        self.eoi.len()
    }

    pub fn classes(&self) -> &ByteClasses {
        &self.classes
    }

    #[inline]
    pub fn next(&self, state: u32, byte: u8, final_newline: bool) -> Transition {
        let column = if final_newline {
            self.stride - 1
        } else {
            self.classes.get(byte) as usize
        };
        self.transitions[state as usize * self.stride + column]
    }

    #[inline]
    pub fn matches(&self, index: u32) -> &[PatternId] {
        &self.match_sets[index as usize]
    }

    /// Patterns matching at the end of the input when the scan stops in
    /// `state`.
    #[inline]
    pub fn eoi_matches(&self, state: u32) -> &[PatternId] {
        self.matches(self.eoi[state as usize])
    }

    pub fn validate(&self, pattern_count: usize) -> Result<(), String> {
        self.classes.validate()?;

        let states = self.state_count();
        if self.stride != self.classes.len() + 1 {
            return Err(format!(
                "DFA stride {} does not match {} classes",
                self.stride,
                self.classes.len()
            ));
        }
        if self.transitions.len() != states * self.stride {
            return Err(format!(
                "DFA has {} transitions, expected {}",
                self.transitions.len(),
                states * self.stride
            ));
        }
        if self.start as usize >= states {
            return Err(format!("DFA start state {} out of range", self.start));
        }
        if self.match_sets.first().map_or(true, |set| !set.is_empty()) {
            return Err("DFA match set 0 must be empty".to_string());
        }

        let sets = self.match_sets.len() as u32;
        for t in &self.transitions {
            if t.next as usize >= states || t.matches >= sets {
                return Err(format!("DFA transition {:?} out of range", t));
            }
        }
        if self.eoi.iter().any(|&m| m >= sets) {
            return Err("DFA end-of-input match set out of range".to_string());
        }
        if self
            .match_sets
            .iter()
            .flatten()
            .any(|&p| p as usize >= pattern_count)
        {
            return Err("DFA reports an unknown pattern".to_string());
        }

        Ok(())
    }
}

type Interner<T> = IndexSet<T, RandomState>;

/// Subset construction over the part of `nfa` reachable from `root`.
/// `root` is re-entered at every offset, so the result finds matches
/// starting anywhere.
pub fn determinize(nfa: &Nfa, root: StateId, limit: usize) -> Result<Dfa, AutomatonError> {
    let classes = nfa.byte_classes();
    let reps = classes.representatives();
    let stride = classes.len() + 1;
    // Without anchors the look-behind class never changes the closure.
    let has_looks = nfa.anchors().next().is_some();

    let mut keys: Interner<(Vec<StateId>, Prev)> = IndexSet::with_hasher(RandomState::new());
    let mut match_sets: Interner<Vec<PatternId>> = IndexSet::with_hasher(RandomState::new());
    keys.insert((Vec::new(), Prev::Start));
    match_sets.insert(Vec::new());

    let mut transitions = Vec::new();
    let mut eoi = Vec::new();
    let mut closure = SparseSet::new(nfa.len());
    let mut stack = Vec::new();
    let mut seeds = Vec::new();

    let mut index = 0;
    while let Some((set, prev)) = keys.get_index(index).cloned() {
        index += 1;

        seeds.clear();
        seeds.extend_from_slice(&set);
        seeds.push(root);
        let before = prev.representative();

        for column in 0..stride {
            let (byte, next_is_last) = if column + 1 == stride {
                (b'\n', true)
            } else {
                (reps[column], false)
            };

            if has_looks || column == 0 {
                let ctx = LookContext {
                    prev: before,
                    next: Some(byte),
                    next_is_last,
                };
                nfa.closure(&seeds, &ctx, &mut closure, &mut stack);
            }

            let found = accepted(nfa, &closure);
            let (matches, _) = match_sets.insert_full(found);

            let next_set: Vec<StateId> = closure
                .iter()
                .filter_map(|id| match nfa.state(id) {
                    State::ByteSet { set, next } if set.contains(byte) => Some(*next),
                    _ => None,
                })
                .sorted_unstable()
                .dedup()
                .collect();
            let next_prev = if has_looks { Prev::classify(byte) } else { Prev::Other };

            let (next, inserted) = keys.insert_full((next_set, next_prev));
            if inserted && keys.len() > limit {
                return Err(AutomatonError::DfaTooLarge {
                    states: keys.len(),
                    limit,
                });
            }

            transitions.push(Transition {
                next: next as u32,
                matches: matches as u32,
            });
        }

        let ctx = LookContext {
            prev: before,
            next: None,
            next_is_last: false,
        };
        nfa.closure(&seeds, &ctx, &mut closure, &mut stack);
        let (matches, _) = match_sets.insert_full(accepted(nfa, &closure));
        eoi.push(matches as u32);
    }

    log::debug!(
        "determinized {} DFA states over {} byte classes ({} match sets)",
        keys.len(),
        classes.len(),
        match_sets.len()
    );

    Ok(Dfa {
        classes,
        stride,
        transitions,
        eoi,
        match_sets: match_sets.into_iter().collect(),
        start: 0,
    })
}

fn accepted(nfa: &Nfa, closure: &SparseSet) -> Vec<PatternId> {
    closure
        .iter()
        .filter_map(|id| match nfa.state(id) {
            State::Match { tag } => Some(tag.pattern),
            _ => None,
        })
        .sorted_unstable()
        .dedup()
        .collect()
}
