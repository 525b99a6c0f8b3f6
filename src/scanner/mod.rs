// Tue Jan 13 2026 - Alex

pub mod pikevm;
pub mod reporter;
pub mod result;
pub mod scratch;

pub use pikevm::{PikeVm, Threads};
pub use reporter::{MatchReporter, Matching};
pub use result::{shape, Match, ResultShape, ShapedMatches};
pub use scratch::{PooledScratch, Scratch, ScratchPool};

use crate::database::Database;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScanMode {
    #[default]
    CollectAll,
    StopAtFirst,
    StopAtN(usize),
}

impl ScanMode {
    /// Maximum number of reports, if bounded.
    pub fn limit(self) -> Option<usize> {
        match self {
            ScanMode::CollectAll => None,
            ScanMode::StopAtFirst => Some(1),
            ScanMode::StopAtN(n) => Some(n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScanOptions {
    pub mode: ScanMode,
}

impl ScanOptions {
    pub fn new(mode: ScanMode) -> Self {
        Self { mode }
    }

    pub fn stop_at_first() -> Self {
        Self::new(ScanMode::StopAtFirst)
    }

    pub fn stop_at(count: usize) -> Self {
        Self::new(ScanMode::StopAtN(count))
    }
}

/// Scans `input` and collects every reported match.
pub fn scan(db: &Database, input: &[u8], options: &ScanOptions) -> Vec<Match> {
    let mut scratch = Scratch::new(db);
    let mut matches = Vec::new();
    scan_with(db, input, options, &mut scratch, |m| {
        matches.push(m);
        Matching::Continue
    });
    matches
}

/// Single pass over `input`, feeding matches to `on_match` in order of
/// end offset, then pattern id. Returns `Terminate` when the scan stopped
/// before the end of the input.
pub fn scan_with<F>(
    db: &Database,
    input: &[u8],
    options: &ScanOptions,
    scratch: &mut Scratch,
    mut on_match: F,
) -> Matching
where
    F: FnMut(Match) -> Matching,
{
    if input.is_empty() || db.is_empty() || options.mode.limit() == Some(0) {
        return Matching::Continue;
    }

    scratch.prepare(db);
    let Scratch {
        threads,
        pending,
        seen,
    } = scratch;

    let mut reporter = MatchReporter::new(db, options, seen);
    let vm = db.simulated_start().map(|root| PikeVm::new(db.nfa(), root));
    let dfa = db.dfa();
    let mut state = dfa.map_or(0, |dfa| dfa.start());

    for pos in 0..=input.len() {
        pending.clear();

        if let Some(dfa) = dfa {
            let found = match input.get(pos) {
                Some(&byte) => {
                    let final_newline = byte == b'\n' && pos + 1 == input.len();
                    let t = dfa.next(state, byte, final_newline);
                    state = t.next;
                    dfa.matches(t.matches)
                }
                None => dfa.eoi_matches(state),
            };
            pending.extend(found.iter().map(|&pattern| Match::new(pattern, 0, pos)));
        }

        if let Some(vm) = &vm {
            vm.step(threads, input, pos, pending);
        }

        if pending.len() > 1 {
            pending.sort_unstable_by_key(|m| m.pattern);
        }

        for &m in pending.iter() {
            if reporter.report(m, &mut on_match) == Matching::Terminate {
                log::trace!(
                    "scan stopped at offset {} of {} after {} matches",
                    pos,
                    input.len(),
                    reporter.reported()
                );
                return Matching::Terminate;
            }
        }
    }

    log::trace!("scanned {} bytes, {} matches", input.len(), reporter.reported());
    Matching::Continue
}

/// Reusable scanner bound to one database.
pub struct Scanner<'db> {
    db: &'db Database,
    scratch: Scratch,
}

impl<'db> Scanner<'db> {
    pub fn new(db: &'db Database) -> Self {
        Self {
            db,
            scratch: Scratch::new(db),
        }
    }

    pub fn database(&self) -> &'db Database {
        self.db
    }

    pub fn scan(&mut self, input: &[u8], options: &ScanOptions) -> Vec<Match> {
        let mut matches = Vec::new();
        self.scan_with(input, options, |m| {
            matches.push(m);
            Matching::Continue
        });
        matches
    }

    pub fn scan_with<F>(&mut self, input: &[u8], options: &ScanOptions, on_match: F) -> Matching
    where
        F: FnMut(Match) -> Matching,
    {
        scan_with(self.db, input, options, &mut self.scratch, on_match)
    }
}

/// Scans every buffer in parallel. Results keep the order of `inputs`.
pub fn scan_many<I>(db: &Database, inputs: &[I], options: &ScanOptions) -> Vec<Vec<Match>>
where
    I: AsRef<[u8]> + Sync,
{
    let pool = ScratchPool::new();

    inputs
        .par_iter()
        .map(|input| {
            let mut scratch = pool.get(db);
            let mut matches = Vec::new();
            scan_with(db, input.as_ref(), options, &mut scratch, |m| {
                matches.push(m);
                Matching::Continue
            });
            matches
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, EnginePolicy};
    use crate::database::CompileError;
    use crate::pattern::{Pattern, PatternFlags};
    use std::time::{Duration, Instant};

    fn compile(patterns: &[(&str, PatternFlags)]) -> Database {
        let patterns: Vec<Pattern> = patterns
            .iter()
            .map(|(source, flags)| Pattern::new(source).with_flags(*flags))
            .collect();
        Database::compile(&patterns).unwrap()
    }

    fn compile_nfa(patterns: &[(&str, PatternFlags)]) -> Database {
        let patterns: Vec<Pattern> = patterns
            .iter()
            .map(|(source, flags)| Pattern::new(source).with_flags(*flags))
            .collect();
        let config = Config::default().with_engine(EnginePolicy::Nfa);
        Database::compile_with_config(&patterns, &config).unwrap()
    }

    #[test]
    fn test_som_single_match_near_miss() {
        let flags = PatternFlags::SOM_LEFTMOST | PatternFlags::SINGLEMATCH;
        let db = compile(&[("test.*stuff", flags)]);
        let found = scan(
            &db,
            b"some stuff over here test anything goes here and stuf",
            &ScanOptions::default(),
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_som_single_match_hit() {
        let flags = PatternFlags::SOM_LEFTMOST | PatternFlags::SINGLEMATCH;
        let db = compile(&[("test.*stuff", flags)]);
        let found = scan(&db, b"test XXXX stuff", &ScanOptions::default());
        assert_eq!(found, vec![Match::new(0, 0, 15)]);
    }

    #[test]
    fn test_no_matches_for_absent_literals() {
        let db = compile(&[("alpha", PatternFlags::empty()), ("beta", PatternFlags::empty())]);
        assert!(scan(&db, b"gamma delta epsilon", &ScanOptions::default()).is_empty());
    }

    #[test]
    fn test_exact_literal_buffer() {
        let db = compile(&[("hello", PatternFlags::empty())]);
        let found = scan(&db, b"hello", &ScanOptions::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].end, 5);
    }

    #[test]
    fn test_empty_input_and_empty_set() {
        let db = compile(&[("a", PatternFlags::empty())]);
        assert!(scan(&db, b"", &ScanOptions::default()).is_empty());

        let empty = Database::compile(&[]).unwrap();
        assert!(scan(&empty, b"anything", &ScanOptions::default()).is_empty());
    }

    #[test]
    fn test_ordering_by_end_then_pattern() {
        let db = compile(&[
            ("bc", PatternFlags::SOM_LEFTMOST),
            ("c", PatternFlags::empty()),
            ("ab", PatternFlags::empty()),
        ]);
        let found = scan(&db, b"abc", &ScanOptions::default());
        assert_eq!(
            found,
            vec![Match::new(2, 0, 2), Match::new(0, 1, 3), Match::new(1, 0, 3)]
        );
    }

    #[test]
    fn test_single_match_reports_once() {
        let db = compile(&[
            ("ab", PatternFlags::SINGLEMATCH),
            ("b", PatternFlags::empty()),
        ]);
        let found = scan(&db, b"ab ab ab", &ScanOptions::default());
        assert_eq!(found.iter().filter(|m| m.pattern == 0).count(), 1);
        assert_eq!(found.iter().filter(|m| m.pattern == 1).count(), 3);
    }

    #[test]
    fn test_scan_modes() {
        let db = compile(&[("a", PatternFlags::empty())]);
        let input = b"aaaa";
        assert_eq!(scan(&db, input, &ScanOptions::default()).len(), 4);
        assert_eq!(scan(&db, input, &ScanOptions::stop_at_first()), vec![Match::new(0, 0, 1)]);
        assert_eq!(scan(&db, input, &ScanOptions::stop_at(3)).len(), 3);
        assert!(scan(&db, input, &ScanOptions::stop_at(0)).is_empty());
    }

    #[test]
    fn test_callback_termination() {
        let db = compile(&[("x", PatternFlags::empty())]);
        let mut scratch = Scratch::new(&db);
        let mut seen = Vec::new();
        let status = scan_with(&db, b"xxxx", &ScanOptions::default(), &mut scratch, |m| {
            seen.push(m.end);
            if seen.len() == 2 {
                Matching::Terminate
            } else {
                Matching::Continue
            }
        });
        assert_eq!(status, Matching::Terminate);
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn test_leftmost_start_is_minimal() {
        let db = compile(&[("a.*b", PatternFlags::SOM_LEFTMOST)]);
        let found = scan(&db, b"xa a b b", &ScanOptions::default());
        assert_eq!(found, vec![Match::new(0, 1, 6), Match::new(0, 1, 8)]);
    }

    #[test]
    fn test_caseless_and_multiline() {
        let db = compile(&[
            ("^error$", PatternFlags::CASELESS | PatternFlags::MULTILINE),
            ("warn", PatternFlags::empty()),
        ]);
        let found = scan(&db, b"ok\nERROR\nWARN\nwarn", &ScanOptions::default());
        assert_eq!(found, vec![Match::new(0, 0, 8), Match::new(1, 0, 18)]);
    }

    #[test]
    fn test_dotall() {
        let plain = compile(&[("a.b", PatternFlags::empty())]);
        assert!(scan(&plain, b"a\nb", &ScanOptions::default()).is_empty());

        let dotall = compile(&[("a.b", PatternFlags::DOTALL)]);
        assert_eq!(scan(&dotall, b"a\nb", &ScanOptions::default()).len(), 1);
    }

    #[test]
    fn test_allow_empty_reports_every_offset() {
        let db = compile(&[("x*", PatternFlags::ALLOWEMPTY)]);
        let ends: Vec<usize> = scan(&db, b"ab", &ScanOptions::default())
            .iter()
            .map(|m| m.end)
            .collect();
        assert_eq!(ends, vec![0, 1, 2]);
    }

    #[test]
    fn test_engines_agree() {
        let patterns = [
            ("foo|bar", PatternFlags::empty()),
            (r"\d{2,3}", PatternFlags::empty()),
            (r"\bis\b", PatternFlags::CASELESS),
            ("end$", PatternFlags::empty()),
            ("^line", PatternFlags::MULTILINE),
        ];
        let input = b"This is foo 1234 bar\nline two IS the end\n";
        let dfa = compile(&patterns);
        let nfa = compile_nfa(&patterns);
        assert!(dfa.dfa().is_some());
        assert!(nfa.dfa().is_none());
        assert_eq!(
            scan(&dfa, input, &ScanOptions::default()),
            scan(&nfa, input, &ScanOptions::default())
        );
    }

    #[test]
    fn test_fallback_still_matches() {
        let patterns = vec![Pattern::new("(a|b)*a(a|b){12}")];
        let config = Config::default().with_max_dfa_states(64);
        let db = Database::compile_with_config(&patterns, &config).unwrap();
        assert!(db.dfa().is_none());

        let input = b"baaaaaaaaaaaaab";
        let found = scan(&db, input, &ScanOptions::default());
        // Needs an 'a' exactly 13 bytes before the end.
        assert_eq!(found, vec![Match::new(0, 0, 14), Match::new(0, 0, 15)]);
    }

    /// Wildcard-heavy patterns whose partial matches overlap freely.
    fn overlapping_wildcards(count: usize) -> Vec<Pattern> {
        let letter = |n: usize| (b'a' + (n % 26) as u8) as char;
        (0..count)
            .map(|i| {
                let (first, middle, last) = (letter(i), letter(i * 7 + 3), letter(i * 11 + 5));
                Pattern::new(&format!("{}.*{}.*{}[a-z]{{3}}", first, middle, last))
            })
            .collect()
    }

    fn noise(len: usize) -> Vec<u8> {
        let alphabet = b"abcdefghijklmnopqrstuvwxyz  \n";
        let mut seed: u32 = 0x9e37_79b9;
        (0..len)
            .map(|_| {
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                alphabet[(seed >> 16) as usize % alphabet.len()]
            })
            .collect()
    }

    #[test]
    fn test_fallback_with_many_overlapping_wildcards() {
        let patterns = overlapping_wildcards(200);
        let started = Instant::now();

        let ceiling = Config::default().with_max_dfa_states(500);
        let auto = Database::compile_with_config(&patterns, &ceiling).unwrap();
        assert!(auto.dfa().is_none());
        assert!(auto.patterns().iter().all(|info| info.engine == crate::automaton::Engine::Nfa));

        let strict = Config::default()
            .with_engine(EnginePolicy::Dfa)
            .with_max_dfa_states(500);
        let err = Database::compile_with_config(&patterns, &strict).unwrap_err();
        assert!(matches!(err, CompileError::AutomatonTooLarge { index: None, limit: 500, .. }));

        let simulated = Config::default().with_engine(EnginePolicy::Nfa);
        let nfa = Database::compile_with_config(&patterns, &simulated).unwrap();
        let input = noise(8 * 1024);
        let found = scan(&auto, &input, &ScanOptions::default());
        assert!(!found.is_empty());
        assert_eq!(found, scan(&nfa, &input, &ScanOptions::default()));
        assert!(found.windows(2).all(|w| (w[0].end, w[0].pattern) < (w[1].end, w[1].pattern)));

        assert!(started.elapsed() < Duration::from_secs(30));
    }

    #[test]
    fn test_scanner_and_scan_many() {
        let db = compile(&[("ab", PatternFlags::SOM_LEFTMOST), ("c", PatternFlags::empty())]);
        let mut scanner = Scanner::new(&db);
        assert_eq!(scanner.scan(b"abc", &ScanOptions::default()).len(), 2);
        assert_eq!(scanner.scan(b"zzz", &ScanOptions::default()).len(), 0);

        let inputs: Vec<&[u8]> = vec![&b"ab"[..], &b""[..], &b"cc"[..], &b"xabx"[..]];
        let results = scan_many(&db, &inputs, &ScanOptions::default());
        assert_eq!(
            results,
            vec![
                vec![Match::new(0, 0, 2)],
                vec![],
                vec![Match::new(1, 0, 1), Match::new(1, 0, 2)],
                vec![Match::new(0, 1, 3)],
            ]
        );
    }
}
