// Tue Jan 13 2026 - Alex

pub mod builder;
pub mod classes;
pub mod combiner;
pub mod dfa;
pub mod error;
pub mod nfa;
pub mod sparse;

pub use builder::{build, NfaFragment, StateBudget};
pub use classes::ByteClasses;
pub use combiner::{combine, CombinedAutomaton, Engine};
pub use dfa::{determinize, Dfa, Prev, Transition};
pub use error::AutomatonError;
pub use nfa::{AcceptTag, MatchKind, Nfa, PatternId, State, StateId, HOLE};
pub use sparse::SparseSet;
