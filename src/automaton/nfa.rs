// Tue Jan 13 2026 - Alex

use crate::automaton::classes::ByteClasses;
use crate::automaton::sparse::SparseSet;
use crate::pattern::byteset::WORD;
use crate::pattern::{AnchorKind, ByteSet, LookContext};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

pub type StateId = u32;
pub type PatternId = u32;

/// Placeholder target for a transition that has not been patched yet.
pub const HOLE: StateId = StateId::MAX;

/// How the start offset of a match is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchKind {
    /// Start offset is not tracked and reported as 0.
    Default,
    /// Start offset is the leftmost one for the reported end.
    Leftmost,
}

/// Carried by the accepting state of each pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AcceptTag {
    pub pattern: PatternId,
    pub kind: MatchKind,
    pub single_match: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum State {
    ByteSet { set: ByteSet, next: StateId },
    Split { alternates: Vec<StateId> },
    Epsilon { next: StateId },
    Look { kind: AnchorKind, next: StateId },
    Match { tag: AcceptTag },
    Fail,
}

impl State {
    pub fn targets(&self) -> Vec<StateId> {
        match self {
            State::ByteSet { next, .. } | State::Epsilon { next } | State::Look { next, .. } => {
                vec![*next]
            }
            State::Split { alternates } => alternates.clone(),
            State::Match { .. } | State::Fail => Vec::new(),
        }
    }

    /// Shifts every target by `offset`, used when merging fragments.
    pub fn relocate(&mut self, offset: StateId) {
        match self {
            State::ByteSet { next, .. } | State::Epsilon { next } | State::Look { next, .. } => {
                *next += offset
            }
            State::Split { alternates } => {
                for alt in alternates.iter_mut() {
                    *alt += offset;
                }
            }
            State::Match { .. } | State::Fail => {}
        }
    }
}

/// Combined automaton: all states live in one arena and refer to each
/// other by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nfa {
    states: Vec<State>,
    start: StateId,
}

impl Nfa {
    pub fn new(states: Vec<State>, start: StateId) -> Self {
        Self { states, start }
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[inline]
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id as usize]
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn anchors(&self) -> impl Iterator<Item = AnchorKind> + '_ {
        self.states.iter().filter_map(|s| match s {
            State::Look { kind, .. } => Some(*kind),
            _ => None,
        })
    }

    /// Byte classes that keep every transition set, `\n` and the word
    /// bytes distinguishable.
    pub fn byte_classes(&self) -> ByteClasses {
        let mut sets: AHashSet<ByteSet> = self
            .states
            .iter()
            .filter_map(|s| match s {
                State::ByteSet { set, .. } => Some(*set),
                _ => None,
            })
            .collect();
        sets.insert(ByteSet::single(b'\n'));
        sets.insert(*WORD);

        ByteClasses::from_sets(sets.iter())
    }

    /// Epsilon closure of `seeds` at a position described by `ctx`. The
    /// result keeps discovery order.
    pub fn closure(
        &self,
        seeds: &[StateId],
        ctx: &LookContext,
        set: &mut SparseSet,
        stack: &mut Vec<StateId>,
    ) {
        set.clear();

        for &seed in seeds {
            stack.push(seed);

            while let Some(id) = stack.pop() {
                if !set.insert(id) {
                    continue;
                }

                match self.state(id) {
                    State::Split { alternates } => stack.extend(alternates.iter().rev()),
                    State::Epsilon { next } => stack.push(*next),
                    State::Look { kind, next } => {
                        if kind.is_satisfied(ctx) {
                            stack.push(*next);
                        }
                    }
                    State::ByteSet { .. } | State::Match { .. } | State::Fail => {}
                }
            }
        }
    }

    /// Checks that every state reference stays inside the arena.
    pub fn validate(&self, pattern_count: usize) -> Result<(), String> {
        let len = self.states.len();

        if self.start as usize >= len {
            return Err(format!("start state {} out of range", self.start));
        }

        for (id, state) in self.states.iter().enumerate() {
            if let Some(target) = state.targets().into_iter().find(|&t| t as usize >= len) {
                return Err(format!("state {} points at missing state {}", id, target));
            }
            if let State::Match { tag } = state {
                if tag.pattern as usize >= pattern_count {
                    return Err(format!("state {} accepts unknown pattern {}", id, tag.pattern));
                }
            }
        }

        Ok(())
    }
}
