// Tue Jan 13 2026 - Alex

use crate::automaton::error::AutomatonError;
use crate::automaton::nfa::{AcceptTag, MatchKind, PatternId, State, StateId, HOLE};
use crate::pattern::{Ast, PatternFlags};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Self-contained automaton for one pattern. State ids are local to the
/// fragment until the combiner relocates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfaFragment {
    pub tag: AcceptTag,
    pub states: Vec<State>,
    pub start: StateId,
}

impl NfaFragment {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// NFA state allowance shared by every fragment of one compile. Builders
/// charge it on every allocation.
#[derive(Debug)]
pub struct StateBudget {
    used: AtomicUsize,
    limit: usize,
}

impl StateBudget {
    pub fn new(limit: usize) -> Self {
        Self {
            used: AtomicUsize::new(0),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn used(&self) -> usize {
        self.used.load(Ordering::Relaxed)
    }

    pub fn charge(&self, states: usize) -> Result<(), AutomatonError> {
        let used = self.used.fetch_add(states, Ordering::Relaxed) + states;
        if used > self.limit {
            return Err(AutomatonError::NfaTooLarge {
                states: used,
                limit: self.limit,
            });
        }
        Ok(())
    }
}

/// Entry state plus the transitions still waiting for a target.
struct Partial {
    start: StateId,
    holes: Vec<StateId>,
}

struct Builder<'b> {
    states: Vec<State>,
    budget: &'b StateBudget,
}

pub fn build(
    ast: &Ast,
    pattern: PatternId,
    flags: PatternFlags,
    budget: &StateBudget,
) -> Result<NfaFragment, AutomatonError> {
    let tag = AcceptTag {
        pattern,
        kind: if flags.contains(PatternFlags::SOM_LEFTMOST) {
            MatchKind::Leftmost
        } else {
            MatchKind::Default
        },
        single_match: flags.contains(PatternFlags::SINGLEMATCH),
    };

    let mut builder = Builder {
        states: Vec::new(),
        budget,
    };

    let body = builder.compile(ast)?;
    let accept = builder.push(State::Match { tag })?;
    builder.patch_all(&body.holes, accept);

    Ok(NfaFragment {
        tag,
        states: builder.states,
        start: body.start,
    })
}

impl Builder<'_> {
    fn push(&mut self, state: State) -> Result<StateId, AutomatonError> {
        self.budget.charge(1)?;
        self.states.push(state);
        Ok((self.states.len() - 1) as StateId)
    }

    fn patch(&mut self, hole: StateId, target: StateId) {
        match &mut self.states[hole as usize] {
            State::ByteSet { next, .. } | State::Epsilon { next } | State::Look { next, .. } => {
                *next = target;
            }
            State::Split { alternates } => {
                if let Some(slot) = alternates.iter_mut().find(|alt| **alt == HOLE) {
                    *slot = target;
                }
            }
            State::Match { .. } | State::Fail => {}
        }
    }

    fn patch_all(&mut self, holes: &[StateId], target: StateId) {
        for &hole in holes {
            self.patch(hole, target);
        }
    }

    fn compile(&mut self, ast: &Ast) -> Result<Partial, AutomatonError> {
        match ast {
            Ast::Empty => self.empty(),
            Ast::Literal(set) => {
                let id = self.push(State::ByteSet { set: *set, next: HOLE })?;
                Ok(Partial { start: id, holes: vec![id] })
            }
            Ast::Anchor(kind) => {
                let id = self.push(State::Look { kind: *kind, next: HOLE })?;
                Ok(Partial { start: id, holes: vec![id] })
            }
            Ast::Concat(items) => {
                let mut iter = items.iter();
                let mut result = match iter.next() {
                    Some(first) => self.compile(first)?,
                    None => return self.empty(),
                };
                for item in iter {
                    let next = self.compile(item)?;
                    self.patch_all(&result.holes, next.start);
                    result.holes = next.holes;
                }
                Ok(result)
            }
            Ast::Alternation(items) => {
                if items.is_empty() {
                    return self.empty();
                }
                let split = self.push(State::Split {
                    alternates: Vec::with_capacity(items.len()),
                })?;
                let mut holes = Vec::new();
                for item in items {
                    let branch = self.compile(item)?;
                    if let State::Split { alternates } = &mut self.states[split as usize] {
                        alternates.push(branch.start);
                    }
                    holes.extend(branch.holes);
                }
                Ok(Partial { start: split, holes })
            }
            Ast::Repetition { child, min, max } => self.repetition(child, *min, *max),
        }
    }

    fn empty(&mut self) -> Result<Partial, AutomatonError> {
        let id = self.push(State::Epsilon { next: HOLE })?;
        Ok(Partial { start: id, holes: vec![id] })
    }

    /// `child` or nothing.
    fn optional(&mut self, child: Partial) -> Result<Partial, AutomatonError> {
        let split = self.push(State::Split {
            alternates: vec![child.start, HOLE],
        })?;
        let mut holes = child.holes;
        holes.push(split);
        Ok(Partial { start: split, holes })
    }

    fn repetition(
        &mut self,
        child: &Ast,
        min: u32,
        max: Option<u32>,
    ) -> Result<Partial, AutomatonError> {
        if max == Some(0) {
            return self.empty();
        }

        // Mandatory copies. With an unbounded max the last one becomes the
        // loop body, so one fewer is emitted here.
        let mandatory = match max {
            None if min > 0 => min - 1,
            _ => min,
        };

        let mut head: Option<Partial> = None;
        for _ in 0..mandatory {
            let copy = self.compile(child)?;
            head = Some(self.chain(head, copy));
        }

        let tail = match max {
            None => {
                let body = self.compile(child)?;
                if min == 0 {
                    // x*
                    let split = self.push(State::Split {
                        alternates: vec![body.start, HOLE],
                    })?;
                    self.patch_all(&body.holes, split);
                    Some(Partial { start: split, holes: vec![split] })
                } else {
                    // x+
                    let split = self.push(State::Split {
                        alternates: vec![body.start, HOLE],
                    })?;
                    self.patch_all(&body.holes, split);
                    Some(Partial { start: body.start, holes: vec![split] })
                }
            }
            Some(max) => {
                // x{0,n} as (x(x(x)?)?)?
                let mut nested: Option<Partial> = None;
                for _ in min..max {
                    let copy = self.compile(child)?;
                    let inner = match nested.take() {
                        Some(inner) => {
                            self.patch_all(&copy.holes, inner.start);
                            Partial { start: copy.start, holes: inner.holes }
                        }
                        None => copy,
                    };
                    nested = Some(self.optional(inner)?);
                }
                nested
            }
        };

        let result = match (head, tail) {
            (Some(head), Some(tail)) => self.chain(Some(head), tail),
            (Some(part), None) | (None, Some(part)) => part,
            (None, None) => return self.empty(),
        };
        Ok(result)
    }

    fn chain(&mut self, head: Option<Partial>, next: Partial) -> Partial {
        match head {
            Some(head) => {
                self.patch_all(&head.holes, next.start);
                Partial { start: head.start, holes: next.holes }
            }
            None => next,
        }
    }
}
