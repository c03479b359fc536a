use crate::{Dfa, StateIndex, SymbolIndex};

/// Implemented by objects that classify finite words, given as sequences of
/// [`SymbolIndex`], into accepted and rejected ones.
#[impl_tools::autoimpl(for<T: trait + ?Sized> &T, &mut T)]
pub trait Acceptor {
    /// Returns the state that is reached by reading `word` from the initial state,
    /// or `None` if the run gets stuck on a missing transition or there is no
    /// initial state.
    fn reached(&self, word: &[SymbolIndex]) -> Option<StateIndex>;

    /// Whether the given state is accepting. Unknown states are rejecting.
    fn state_accepts(&self, state: StateIndex) -> bool;

    /// Returns true if the run on `word` ends in an accepting state. Runs that
    /// get stuck reject.
    fn accepts(&self, word: &[SymbolIndex]) -> bool {
        self.reached(word)
            .map(|q| self.state_accepts(q))
            .unwrap_or(false)
    }
}

impl Acceptor for Dfa {
    fn reached(&self, word: &[SymbolIndex]) -> Option<StateIndex> {
        let mut current = self.initial()?;
        for &sym in word {
            current = self.successor(current, sym)?;
        }
        Some(current)
    }

    fn state_accepts(&self, state: StateIndex) -> bool {
        self.is_accepting(state).unwrap_or(false)
    }
}
