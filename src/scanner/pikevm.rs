// Tue Jan 13 2026 - Alex

use crate::automaton::{MatchKind, Nfa, SparseSet, State, StateId};
use crate::pattern::LookContext;
use crate::scanner::result::Match;

/// Thread lists for one simulation. Threads are kept in ascending order
/// of start offset, so the first thread to claim a state carries the
/// leftmost start for it.
#[derive(Debug, Clone)]
pub struct Threads {
    set: SparseSet,
    starts: Vec<usize>,
    stack: Vec<StateId>,
    current: Vec<(StateId, usize)>,
    next: Vec<(StateId, usize)>,
}

impl Threads {
    pub fn new(states: usize) -> Self {
        Self {
            set: SparseSet::new(states),
            starts: vec![0; states],
            stack: Vec::new(),
            current: Vec::new(),
            next: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.set.capacity()
    }

    pub fn resize(&mut self, states: usize) {
        self.set.resize(states);
        self.starts.resize(states, 0);
        self.reset();
    }

    pub fn reset(&mut self) {
        self.set.clear();
        self.stack.clear();
        self.current.clear();
        self.next.clear();
    }
}

/// Simulates the part of the NFA reachable from `root`, starting a new
/// thread at every offset.
pub struct PikeVm<'a> {
    nfa: &'a Nfa,
    root: StateId,
}

impl<'a> PikeVm<'a> {
    pub fn new(nfa: &'a Nfa, root: StateId) -> Self {
        Self { nfa, root }
    }

    /// Processes offset `pos`: appends the matches ending there to `out`
    /// and moves the threads over the byte at `pos`, if any.
    pub fn step(&self, threads: &mut Threads, input: &[u8], pos: usize, out: &mut Vec<Match>) {
        let ctx = LookContext::at(input, pos);
        threads.set.clear();

        let mut seeds = std::mem::take(&mut threads.current);
        for &(seed, start) in &seeds {
            self.add(threads, seed, start, &ctx);
        }
        self.add(threads, self.root, pos, &ctx);
        seeds.clear();
        threads.current = seeds;

        for id in threads.set.iter() {
            if let State::Match { tag } = self.nfa.state(id) {
                let start = match tag.kind {
                    MatchKind::Leftmost => threads.starts[id as usize],
                    MatchKind::Default => 0,
                };
                out.push(Match::new(tag.pattern, start, pos));
            }
        }

        if let Some(&byte) = input.get(pos) {
            threads.next.clear();
            for id in threads.set.iter() {
                if let State::ByteSet { set, next } = self.nfa.state(id) {
                    if set.contains(byte) {
                        threads.next.push((*next, threads.starts[id as usize]));
                    }
                }
            }
            std::mem::swap(&mut threads.current, &mut threads.next);
        }
    }

    fn add(&self, threads: &mut Threads, seed: StateId, start: usize, ctx: &LookContext) {
        threads.stack.push(seed);

        while let Some(id) = threads.stack.pop() {
            if !threads.set.insert(id) {
                continue;
            }
            threads.starts[id as usize] = start;

            match self.nfa.state(id) {
                State::Split { alternates } => threads.stack.extend(alternates.iter().rev()),
                State::Epsilon { next } => threads.stack.push(*next),
                State::Look { kind, next } => {
                    if kind.is_satisfied(ctx) {
                        threads.stack.push(*next);
                    }
                }
                State::ByteSet { .. } | State::Match { .. } | State::Fail => {}
            }
        }
    }
}
