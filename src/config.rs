// Tue Jan 13 2026 - Alex

use serde::{Deserialize, Serialize};

/// Which execution engine the compiler may build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnginePolicy {
    /// Determinize what can be determinized, fall back to NFA simulation
    /// when the DFA grows past `max_dfa_states`.
    #[default]
    Auto,
    Nfa,
    /// Like `Auto` but a DFA over the ceiling is a compile error.
    Dfa,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_patterns: usize,
    pub max_nfa_states: usize,
    pub max_dfa_states: usize,
    pub engine: EnginePolicy,
    pub parallel_compile: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_patterns: 100_000,
            max_nfa_states: 1_000_000,
            max_dfa_states: 10_000,
            engine: EnginePolicy::Auto,
            parallel_compile: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_patterns(mut self, limit: usize) -> Self {
        self.max_patterns = limit;
        self
    }

    pub fn with_max_nfa_states(mut self, limit: usize) -> Self {
        self.max_nfa_states = limit;
        self
    }

    pub fn with_max_dfa_states(mut self, limit: usize) -> Self {
        self.max_dfa_states = limit;
        self
    }

    pub fn with_engine(mut self, engine: EnginePolicy) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_parallel_compile(mut self, enabled: bool) -> Self {
        self.parallel_compile = enabled;
        self
    }

    pub fn from_json(text: &str) -> Result<Self, String> {
        let config: Config = serde_json::from_str(text).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_patterns == 0 {
            return Err("max_patterns must be greater than 0".to_string());
        }
        if self.max_nfa_states < 3 {
            return Err("max_nfa_states must be at least 3".to_string());
        }
        if self.max_dfa_states == 0 {
            return Err("max_dfa_states must be greater than 0".to_string());
        }
        if self.max_nfa_states > u32::MAX as usize - 1 || self.max_dfa_states > u32::MAX as usize {
            return Err("state limits must fit in 32 bits".to_string());
        }
        Ok(())
    }
}
