// Tue Jan 15 2026 - Alex

pub mod automaton;
pub mod config;
pub mod database;
pub mod pattern;
pub mod scanner;
pub mod utils;

pub use automaton::Engine;
pub use config::{Config, EnginePolicy};
pub use database::{CompileError, CompileErrorKind, Database, PatternInfo};
pub use pattern::{ParseError, ParseErrorKind, Pattern, PatternFlags};
pub use scanner::{
    scan_many, scan_with, Match, Matching, ResultShape, ScanMode, ScanOptions, Scanner, Scratch,
    ScratchPool, ShapedMatches,
};

/// Compiles `patterns` into one database. `flags[i]` applies to
/// `patterns[i]`; an empty `flags` slice means no flags at all.
pub fn compile<S: AsRef<str>>(
    patterns: &[S],
    flags: &[PatternFlags],
) -> Result<Database, CompileError> {
    if !flags.is_empty() && flags.len() != patterns.len() {
        return Err(CompileError::InvalidConfig(format!(
            "{} patterns but {} flag sets",
            patterns.len(),
            flags.len()
        )));
    }

    let patterns: Vec<Pattern> = patterns
        .iter()
        .enumerate()
        .map(|(i, source)| {
            let flags = flags.get(i).copied().unwrap_or_default();
            Pattern::new(source.as_ref()).with_flags(flags)
        })
        .collect();

    Database::compile(&patterns)
}

pub fn scan(db: &Database, input: &[u8], options: &ScanOptions) -> Vec<Match> {
    scanner::scan(db, input, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use regex::bytes::Regex;

    const ORACLE_PATTERNS: &[&str] = &[
        "ab+c",
        "a.c",
        "(foo|ba[rz])x?",
        r"\d+\s",
        "[^ab ]{2}",
        "(a|b)*b",
        "c{2,3}",
        "(?i)Ab",
    ];

    /// Ends at which `pattern` has some match, according to the regex crate.
    fn oracle_ends(pattern: &str, input: &[u8]) -> Vec<usize> {
        let re = Regex::new(&format!("(?-u)(?:{})\\z", pattern)).unwrap();
        (0..=input.len()).filter(|&end| re.is_match(&input[..end])).collect()
    }

    fn ends_for(found: &[Match], pattern: u32) -> Vec<usize> {
        found.iter().filter(|m| m.pattern == pattern).map(|m| m.end).collect()
    }

    fn oracle_db(policy: EnginePolicy, flags: PatternFlags) -> Database {
        let patterns: Vec<Pattern> = ORACLE_PATTERNS
            .iter()
            .map(|p| Pattern::new(p).with_flags(flags))
            .collect();
        Database::compile_with_config(&patterns, &Config::default().with_engine(policy)).unwrap()
    }

    #[test]
    fn test_top_level_compile_and_scan() -> anyhow::Result<()> {
        utils::logging::init_for_tests();

        let db = compile(&["foo", "ba+r"], &[PatternFlags::empty(), PatternFlags::SOM_LEFTMOST])?;
        let found = scan(&db, b"xfoo baaar", &ScanOptions::default());
        assert_eq!(found, vec![Match::new(0, 0, 4), Match::new(1, 5, 10)]);

        let err = compile(&["a", "b"], &[PatternFlags::CASELESS]).unwrap_err();
        assert_eq!(err.kind(), CompileErrorKind::InvalidConfig);
        Ok(())
    }

    #[test]
    fn test_pattern_literals() -> anyhow::Result<()> {
        let pattern: Pattern = "/test.*stuff/HL".parse()?;
        let db = Database::compile(&[pattern])?;
        assert_eq!(
            db.scan(b"test XXXX stuff and more stuff", &ScanOptions::default()),
            vec![Match::new(0, 0, 15)]
        );
        Ok(())
    }

    #[test]
    fn test_recompile_is_deterministic() -> anyhow::Result<()> {
        let first = compile(ORACLE_PATTERNS, &[])?;
        let second = compile(ORACLE_PATTERNS, &[])?;
        assert_eq!(first, second);
        assert_eq!(first.serialize()?, second.serialize()?);
        Ok(())
    }

    #[test]
    fn test_against_regex_oracle() {
        let input = b"abbc a-c foo barx baz 12 \nAB ccc cc bab";
        for policy in [EnginePolicy::Auto, EnginePolicy::Nfa] {
            let db = oracle_db(policy, PatternFlags::empty());
            let found = scan(&db, input, &ScanOptions::default());
            for (id, pattern) in ORACLE_PATTERNS.iter().enumerate() {
                assert_eq!(
                    ends_for(&found, id as u32),
                    oracle_ends(pattern, input),
                    "pattern {} under {:?}",
                    pattern,
                    policy
                );
            }
        }
    }

    fn input_strategy() -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(prop::sample::select(b"abcfoxrz1 \nA".to_vec()), 0..40)
    }

    proptest! {
        #[test]
        fn prop_engines_agree(input in input_strategy()) {
            let dfa = oracle_db(EnginePolicy::Auto, PatternFlags::empty());
            let nfa = oracle_db(EnginePolicy::Nfa, PatternFlags::empty());
            prop_assert_eq!(
                scan(&dfa, &input, &ScanOptions::default()),
                scan(&nfa, &input, &ScanOptions::default())
            );
        }

        #[test]
        fn prop_matches_oracle(input in input_strategy()) {
            let db = oracle_db(EnginePolicy::Auto, PatternFlags::empty());
            let found = scan(&db, &input, &ScanOptions::default());
            for (id, pattern) in ORACLE_PATTERNS.iter().enumerate() {
                prop_assert_eq!(ends_for(&found, id as u32), oracle_ends(pattern, &input));
            }
        }

        #[test]
        fn prop_leftmost_start_is_minimal(input in input_strategy()) {
            let db = oracle_db(EnginePolicy::Auto, PatternFlags::SOM_LEFTMOST);
            let found = scan(&db, &input, &ScanOptions::default());
            for m in found {
                let pattern = ORACLE_PATTERNS[m.pattern as usize];
                let exact = Regex::new(&format!("(?-u)^(?:{})\\z", pattern)).unwrap();
                prop_assert!(exact.is_match(&input[m.start..m.end]));
                prop_assert!((0..m.start).all(|s| !exact.is_match(&input[s..m.end])));
            }
        }

        #[test]
        fn prop_single_match_reports_once(input in input_strategy()) {
            let db = oracle_db(EnginePolicy::Auto, PatternFlags::SINGLEMATCH);
            let found = scan(&db, &input, &ScanOptions::default());
            for id in 0..ORACLE_PATTERNS.len() as u32 {
                prop_assert!(found.iter().filter(|m| m.pattern == id).count() <= 1);
            }
        }
    }
}
