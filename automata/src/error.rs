use crate::{StateIndex, SymbolIndex};

/// Distinguishes the two kinds of indices an automaton hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// A [`StateIndex`].
    State,
    /// A [`SymbolIndex`].
    Symbol,
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexKind::State => write!(f, "state"),
            IndexKind::Symbol => write!(f, "symbol"),
        }
    }
}

/// The reasons for which an automaton is rejected as input to an algorithm.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidReason {
    /// No initial state has been designated.
    #[error("no initial state")]
    MissingInitial,
    /// The automaton is not complete.
    #[error("transition from state {state} on symbol {symbol} is not set")]
    MissingTransition {
        /// Source of the missing transition.
        state: StateIndex,
        /// Symbol of the missing transition.
        symbol: SymbolIndex,
    },
    /// After refinement, no block contains the initial state.
    #[error("initial state {0} is not contained in any class")]
    InitialClassNotFound(StateIndex),
}

/// Errors raised by operations on a [`crate::Dfa`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AutomatonError {
    /// An operation referenced a state or symbol that is not registered.
    #[error("unknown {kind} index {index}, only {bound} are registered")]
    UnknownIndex {
        /// Whether a state or a symbol was referenced.
        kind: IndexKind,
        /// The offending index.
        index: usize,
        /// Number of registered states or symbols respectively.
        bound: usize,
    },
    /// The automaton violates a precondition of the invoked algorithm.
    #[error("invalid automaton: {0}")]
    InvalidAutomaton(#[from] InvalidReason),
}
