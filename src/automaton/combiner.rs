// Tue Jan 13 2026 - Alex

use crate::automaton::builder::NfaFragment;
use crate::automaton::dfa::{determinize, Dfa};
use crate::automaton::error::AutomatonError;
use crate::automaton::nfa::{MatchKind, Nfa, State, StateId};
use crate::config::EnginePolicy;
use serde::{Deserialize, Serialize};

/// Engine a pattern runs on at scan time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Engine {
    Dfa,
    Nfa,
}

#[derive(Debug, Clone)]
pub struct CombinedAutomaton {
    pub nfa: Nfa,
    pub dfa: Option<Dfa>,
    /// Entry of the patterns simulated by the NFA, if any.
    pub simulated_start: Option<StateId>,
    /// Indexed by pattern id.
    pub engines: Vec<Engine>,
}

/// Merges per-pattern fragments into one arena and picks engines.
///
/// The arena ends with three split states: the global start reaching
/// every pattern, the group of patterns eligible for the DFA, and the
/// group that needs start offsets.
pub fn combine(
    fragments: Vec<NfaFragment>,
    policy: EnginePolicy,
    max_dfa_states: usize,
) -> Result<CombinedAutomaton, AutomatonError> {
    let total: usize = fragments.iter().map(NfaFragment::len).sum();
    let mut states = Vec::with_capacity(total + 3);
    let mut all = Vec::with_capacity(fragments.len());
    let mut engines = Vec::with_capacity(fragments.len());
    let mut deterministic = Vec::new();
    let mut leftmost = Vec::new();

    for fragment in fragments {
        let offset = states.len() as StateId;
        let start = fragment.start + offset;
        states.extend(fragment.states.into_iter().map(|mut state| {
            state.relocate(offset);
            state
        }));

        all.push(start);
        match fragment.tag.kind {
            MatchKind::Default => {
                deterministic.push(start);
                engines.push(Engine::Dfa);
            }
            MatchKind::Leftmost => {
                leftmost.push(start);
                engines.push(Engine::Nfa);
            }
        }
    }

    let pattern_count = all.len();
    let global = states.len() as StateId;
    let dfa_group = global + 1;
    let vm_group = global + 2;
    let has_deterministic = !deterministic.is_empty();
    let has_leftmost = !leftmost.is_empty();

    states.push(State::Split { alternates: all });
    states.push(State::Split { alternates: deterministic });
    states.push(State::Split { alternates: leftmost });

    let nfa = Nfa::new(states, global);
    log::debug!("combined {} patterns into {} NFA states", pattern_count, nfa.len());

    if policy == EnginePolicy::Nfa {
        return Ok(simulate_all(nfa, pattern_count));
    }
    if !has_deterministic {
        return Ok(CombinedAutomaton {
            nfa,
            dfa: None,
            simulated_start: has_leftmost.then_some(vm_group),
            engines,
        });
    }

    match determinize(&nfa, dfa_group, max_dfa_states) {
        Ok(dfa) => Ok(CombinedAutomaton {
            nfa,
            dfa: Some(dfa),
            simulated_start: has_leftmost.then_some(vm_group),
            engines,
        }),
        Err(err @ AutomatonError::DfaTooLarge { .. }) if policy == EnginePolicy::Auto => {
            log::warn!("{}; falling back to NFA simulation for all patterns", err);
            Ok(simulate_all(nfa, pattern_count))
        }
        Err(err) => Err(err),
    }
}

fn simulate_all(nfa: Nfa, pattern_count: usize) -> CombinedAutomaton {
    let start = nfa.start();
    CombinedAutomaton {
        nfa,
        dfa: None,
        simulated_start: (pattern_count > 0).then_some(start),
        engines: vec![Engine::Nfa; pattern_count],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::builder::{build, StateBudget};
    use crate::pattern::{parse, PatternFlags};

    fn fragments(patterns: &[(&str, PatternFlags)]) -> Vec<NfaFragment> {
        let budget = StateBudget::new(10_000);
        patterns
            .iter()
            .enumerate()
            .map(|(id, (source, flags))| {
                let ast = parse(source, *flags).unwrap();
                build(&ast, id as u32, *flags, &budget).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_engine_split() {
        let frags = fragments(&[
            ("abc", PatternFlags::empty()),
            ("a.*c", PatternFlags::SOM_LEFTMOST),
        ]);
        let combined = combine(frags, EnginePolicy::Auto, 1_000).unwrap();
        assert!(combined.dfa.is_some());
        assert_eq!(combined.engines, vec![Engine::Dfa, Engine::Nfa]);
        assert_eq!(combined.simulated_start, Some(combined.nfa.start() + 2));
        assert!(combined.nfa.validate(2).is_ok());
    }

    #[test]
    fn test_nfa_policy() {
        let frags = fragments(&[("abc", PatternFlags::empty())]);
        let combined = combine(frags, EnginePolicy::Nfa, 1_000).unwrap();
        assert!(combined.dfa.is_none());
        assert_eq!(combined.simulated_start, Some(combined.nfa.start()));
        assert_eq!(combined.engines, vec![Engine::Nfa]);
    }

    #[test]
    fn test_fallback_when_dfa_too_large() {
        let frags = fragments(&[
            ("(a|b)*a(a|b){12}", PatternFlags::empty()),
            ("xyz", PatternFlags::SOM_LEFTMOST),
        ]);
        let combined = combine(frags.clone(), EnginePolicy::Auto, 64).unwrap();
        assert!(combined.dfa.is_none());
        assert_eq!(combined.simulated_start, Some(combined.nfa.start()));
        assert_eq!(combined.engines, vec![Engine::Nfa, Engine::Nfa]);

        let err = combine(frags, EnginePolicy::Dfa, 64).unwrap_err();
        assert!(matches!(err, AutomatonError::DfaTooLarge { limit: 64, .. }));
    }

    #[test]
    fn test_empty_set() {
        let combined = combine(Vec::new(), EnginePolicy::Auto, 10).unwrap();
        assert!(combined.dfa.is_none());
        assert!(combined.simulated_start.is_none());
        assert!(combined.engines.is_empty());
    }
}
