// Tue Jan 13 2026 - Alex

use crate::database::{Database, PatternInfo};
use crate::pattern::PatternFlags;
use crate::scanner::result::Match;
use crate::scanner::ScanOptions;

/// Returned by match callbacks to keep going or stop the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matching {
    Continue,
    Terminate,
}

/// Filters raw matches before they reach the caller: SINGLEMATCH
/// suppression and scan mode limits.
pub struct MatchReporter<'a> {
    patterns: &'a [PatternInfo],
    seen: &'a mut Vec<bool>,
    limit: Option<usize>,
    reported: usize,
    /// Single-match patterns still waiting for their first hit, tracked
    /// only when every pattern is single-match.
    pending_single: Option<usize>,
}

impl<'a> MatchReporter<'a> {
    pub fn new(db: &'a Database, options: &ScanOptions, seen: &'a mut Vec<bool>) -> Self {
        seen.clear();
        seen.resize(db.pattern_count(), false);

        Self {
            patterns: db.patterns(),
            seen,
            limit: options.mode.limit(),
            reported: 0,
            pending_single: db.all_single_match().then(|| db.pattern_count()),
        }
    }

    pub fn reported(&self) -> usize {
        self.reported
    }

    pub fn report<F>(&mut self, m: Match, on_match: &mut F) -> Matching
    where
        F: FnMut(Match) -> Matching,
    {
        let index = m.pattern as usize;
        let single = self
            .patterns
            .get(index)
            .map_or(false, |info| info.flags.contains(PatternFlags::SINGLEMATCH));

        if single {
            match self.seen.get_mut(index) {
                Some(seen) if *seen => return Matching::Continue,
                Some(seen) => *seen = true,
                None => {}
            }
        }

        if on_match(m) == Matching::Terminate {
            return Matching::Terminate;
        }
        self.reported += 1;

        if self.limit.map_or(false, |limit| self.reported >= limit) {
            return Matching::Terminate;
        }

        if let Some(pending) = self.pending_single.as_mut() {
            *pending = pending.saturating_sub(1);
            if *pending == 0 {
                return Matching::Terminate;
            }
        }

        Matching::Continue
    }
}
