// Tue Jan 13 2026 - Alex

pub mod error;
pub mod serialize;

pub use error::{CompileError, CompileErrorKind};
pub use serialize::{FORMAT_VERSION, MAGIC};

use crate::automaton::{
    build, combine, Dfa, Engine, Nfa, NfaFragment, PatternId, StateBudget, StateId,
};
use crate::config::Config;
use crate::pattern::{Pattern, PatternFlags};
use crate::scanner::{self, Match, ScanOptions};
use crate::utils::logging::scoped_timer;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Compile-time facts about one pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternInfo {
    pub id: PatternId,
    pub source: String,
    pub flags: PatternFlags,
    /// Every match starts at offset 0.
    pub anchored: bool,
    pub min_width: usize,
    /// `None` when unbounded.
    pub max_width: Option<usize>,
    pub engine: Engine,
}

/// Immutable compiled pattern set. Cheap to share between threads; each
/// scan brings its own scratch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    patterns: Vec<PatternInfo>,
    nfa: Nfa,
    dfa: Option<Dfa>,
    simulated_start: Option<StateId>,
}

impl Database {
    pub fn compile(patterns: &[Pattern]) -> Result<Self, CompileError> {
        Self::compile_with_config(patterns, &Config::default())
    }

    pub fn compile_with_config(
        patterns: &[Pattern],
        config: &Config,
    ) -> Result<Self, CompileError> {
        config.validate().map_err(CompileError::InvalidConfig)?;

        if patterns.len() > config.max_patterns {
            return Err(CompileError::TooManyPatterns {
                count: patterns.len(),
                limit: config.max_patterns,
            });
        }

        let _timer = scoped_timer("compile");
        let budget = StateBudget::new(config.max_nfa_states);
        // Global start plus the two engine group entries.
        budget
            .charge(3)
            .map_err(|err| CompileError::from_automaton(None, err))?;

        let prepared: Vec<(PatternInfo, NfaFragment)> = if config.parallel_compile {
            let results: Vec<Result<_, CompileError>> = patterns
                .par_iter()
                .enumerate()
                .map(|(index, pattern)| prepare(index, pattern, &budget))
                .collect();
            // Lowest failing index wins, whatever order the workers finished in.
            results.into_iter().collect::<Result<_, _>>()?
        } else {
            patterns
                .iter()
                .enumerate()
                .map(|(index, pattern)| prepare(index, pattern, &budget))
                .collect::<Result<_, _>>()?
        };
        let (mut infos, fragments): (Vec<PatternInfo>, Vec<NfaFragment>) =
            prepared.into_iter().unzip();
        log::debug!("parsed {} patterns into {} NFA states", infos.len(), budget.used());

        let combined = combine(fragments, config.engine, config.max_dfa_states)
            .map_err(|err| CompileError::from_automaton(None, err))?;

        for (info, engine) in infos.iter_mut().zip(&combined.engines) {
            info.engine = *engine;
        }

        let db = Database {
            patterns: infos,
            nfa: combined.nfa,
            dfa: combined.dfa,
            simulated_start: combined.simulated_start,
        };
        log::debug!(
            "compiled database: {} patterns, {} NFA states, {} DFA states",
            db.pattern_count(),
            db.nfa_state_count(),
            db.dfa_state_count().unwrap_or(0)
        );

        Ok(db)
    }

    pub fn scan(&self, input: &[u8], options: &ScanOptions) -> Vec<Match> {
        scanner::scan(self, input, options)
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub fn patterns(&self) -> &[PatternInfo] {
        &self.patterns
    }

    pub fn pattern(&self, id: PatternId) -> Option<&PatternInfo> {
        self.patterns.get(id as usize)
    }

    pub fn engine(&self, id: PatternId) -> Option<Engine> {
        self.pattern(id).map(|info| info.engine)
    }

    pub fn nfa(&self) -> &Nfa {
        &self.nfa
    }

    pub fn dfa(&self) -> Option<&Dfa> {
        self.dfa.as_ref()
    }

    pub fn simulated_start(&self) -> Option<StateId> {
        self.simulated_start
    }

    pub fn nfa_state_count(&self) -> usize {
        self.nfa.len()
    }

    pub fn dfa_state_count(&self) -> Option<usize> {
        self.dfa.as_ref().map(Dfa::state_count)
    }

    /// True when every pattern reports at most once per scan.
    pub fn all_single_match(&self) -> bool {
        !self.patterns.is_empty()
            && self
                .patterns
                .iter()
                .all(|info| info.flags.contains(PatternFlags::SINGLEMATCH))
    }

    /// One-line description of the database.
    pub fn info(&self) -> String {
        format!(
            "Version: {} Patterns: {} NFA states: {} DFA states: {}",
            FORMAT_VERSION,
            self.pattern_count(),
            self.nfa_state_count(),
            self.dfa_state_count()
                .map_or_else(|| "none".to_string(), |n| n.to_string())
        )
    }

    /// Structural consistency check, run on every deserialized database.
    pub fn validate(&self) -> Result<(), String> {
        let count = self.patterns.len();

        if let Some((index, info)) = self
            .patterns
            .iter()
            .enumerate()
            .find(|(i, info)| info.id as usize != *i)
        {
            return Err(format!("pattern at index {} has id {}", index, info.id));
        }

        self.nfa.validate(count)?;

        if let Some(dfa) = &self.dfa {
            dfa.validate(count)?;
        }
        if let Some(start) = self.simulated_start {
            if start as usize >= self.nfa.len() {
                return Err(format!("simulated start {} out of range", start));
            }
        }

        let uses_dfa = self.patterns.iter().any(|p| p.engine == Engine::Dfa);
        let uses_nfa = self.patterns.iter().any(|p| p.engine == Engine::Nfa);
        if uses_dfa && self.dfa.is_none() {
            return Err("patterns assigned to a missing DFA".to_string());
        }
        if uses_nfa && self.simulated_start.is_none() {
            return Err("patterns assigned to a missing NFA entry".to_string());
        }

        Ok(())
    }
}

fn prepare(
    index: usize,
    pattern: &Pattern,
    budget: &StateBudget,
) -> Result<(PatternInfo, NfaFragment), CompileError> {
    let flags = pattern.flags();
    let ast = pattern
        .parse()
        .map_err(|source| CompileError::Parse { index, source })?;

    if ast.is_nullable() && !flags.contains(PatternFlags::ALLOWEMPTY) {
        return Err(CompileError::MatchesEmpty { index });
    }

    let fragment = build(&ast, index as PatternId, flags, budget)
        .map_err(|err| CompileError::from_automaton(Some(index), err))?;

    let info = PatternInfo {
        id: index as PatternId,
        source: pattern.source().to_string(),
        flags,
        anchored: ast.is_anchored(),
        min_width: ast.min_width(),
        max_width: ast.max_width(),
        engine: Engine::Nfa,
    };

    Ok((info, fragment))
}
