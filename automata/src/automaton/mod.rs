//! The [`Dfa`] type and the [`Acceptor`] abstraction.

use tracing::trace;

use crate::{
    labels::Labels, Alphabet, AutomatonError, IndexKind, InvalidReason, StateIndex, SymbolIndex,
};

mod acceptor;
pub use acceptor::Acceptor;

/// The outgoing transitions and the acceptance flag of a single state.
#[derive(Clone, Debug, PartialEq, Eq)]
struct StateRecord {
    edges: Vec<Option<StateIndex>>,
    accepting: bool,
}

impl StateRecord {
    fn new(symbols: usize, accepting: bool) -> Self {
        Self {
            edges: vec![None; symbols],
            accepting,
        }
    }
}

/// A deterministic finite automaton over an [`Alphabet`] of string labels.
///
/// States are stored in an arena of records addressed by [`StateIndex`], every
/// state also carries a unique label. The transition table is dense: each state
/// has exactly one entry per symbol of the alphabet. An entry may be unset, in
/// which case the automaton is partial. Partial automata can be turned into
/// complete ones with [`Dfa::complete`], which is required before minimizing.
///
/// Registering states or symbols is idempotent and existing indices never
/// change; adding a symbol extends every state by an unset entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dfa {
    alphabet: Alphabet,
    names: Labels,
    states: Vec<StateRecord>,
    initial: Option<StateIndex>,
}

impl Dfa {
    /// Creates an automaton without any states over the given alphabet.
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            ..Default::default()
        }
    }

    /// Returns a reference to the alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Returns true if there are no states at all.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Adds the symbol `label` to the alphabet if it is not yet present and returns
    /// its index. A new symbol appends an unset transition to every state.
    pub fn add_symbol(&mut self, label: &str) -> SymbolIndex {
        let (sym, new) = self.alphabet.insert(label);
        if new {
            trace!("adding symbol {label} with index {sym}");
            for state in &mut self.states {
                state.edges.push(None);
            }
        }
        sym
    }

    /// Adds a rejecting state labeled `label` without any transitions unless a state
    /// with that label exists, returns the index of the state.
    pub fn add_state(&mut self, label: &str) -> StateIndex {
        self.insert_state(label).0
    }

    /// Like [`Dfa::add_state`], but additionally reports whether the state was new.
    pub fn insert_state(&mut self, label: &str) -> (StateIndex, bool) {
        let (q, new) = self.names.intern(label);
        if new {
            debug_assert_eq!(q, self.states.len());
            self.states
                .push(StateRecord::new(self.alphabet.len(), false));
        }
        (q, new)
    }

    /// Looks up the index of the state labeled `label`.
    pub fn state_index(&self, label: &str) -> Option<StateIndex> {
        self.names.index_of(label)
    }

    /// Returns the label of state `q`.
    pub fn state_label(&self, q: StateIndex) -> Result<&str, AutomatonError> {
        self.names.label(q).ok_or(AutomatonError::UnknownIndex {
            kind: IndexKind::State,
            index: q,
            bound: self.size(),
        })
    }

    /// Iterates over all state indices.
    pub fn state_indices(&self) -> std::ops::Range<StateIndex> {
        0..self.size()
    }

    /// Iterates over all states together with their labels.
    pub fn states(&self) -> impl Iterator<Item = (StateIndex, &str)> + '_ {
        self.names.iter()
    }

    /// The initial state, if one has been set.
    pub fn initial(&self) -> Option<StateIndex> {
        self.initial
    }

    /// Designates `q` as the initial state.
    pub fn set_initial(&mut self, q: StateIndex) -> Result<(), AutomatonError> {
        self.check_state(q)?;
        self.initial = Some(q);
        Ok(())
    }

    /// Returns the target of the transition from `q` on `sym`, which is `None` if
    /// the transition is not set.
    pub fn transition(
        &self,
        q: StateIndex,
        sym: SymbolIndex,
    ) -> Result<Option<StateIndex>, AutomatonError> {
        self.check_state(q)?;
        self.check_symbol(sym)?;
        Ok(self.states[q].edges[sym])
    }

    /// Sets the transition from `q` on `sym` to `target` and returns the previous
    /// target.
    pub fn set_transition(
        &mut self,
        q: StateIndex,
        sym: SymbolIndex,
        target: StateIndex,
    ) -> Result<Option<StateIndex>, AutomatonError> {
        self.check_state(q)?;
        self.check_symbol(sym)?;
        self.check_state(target)?;
        Ok(self.states[q].edges[sym].replace(target))
    }

    /// Same as [`Dfa::transition`] but without error reporting, unknown indices
    /// and unset transitions both give `None`.
    pub fn successor(&self, q: StateIndex, sym: SymbolIndex) -> Option<StateIndex> {
        self.states.get(q)?.edges.get(sym).copied().flatten()
    }

    /// Returns whether `q` is accepting.
    pub fn is_accepting(&self, q: StateIndex) -> Result<bool, AutomatonError> {
        self.check_state(q)?;
        Ok(self.states[q].accepting)
    }

    /// Sets the acceptance flag of `q` and returns the previous one.
    pub fn set_accepting(&mut self, q: StateIndex, accepting: bool) -> Result<bool, AutomatonError> {
        self.check_state(q)?;
        Ok(std::mem::replace(&mut self.states[q].accepting, accepting))
    }

    /// Iterates over the indices of all accepting states.
    pub fn accepting_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.state_indices().filter(|q| self.states[*q].accepting)
    }

    /// Iterates over the indices of all rejecting states.
    pub fn rejecting_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.state_indices().filter(|q| !self.states[*q].accepting)
    }

    /// Iterates over all transitions `(source, symbol, target)` that are set, ordered
    /// by source and then symbol.
    pub fn transitions(&self) -> impl Iterator<Item = (StateIndex, SymbolIndex, StateIndex)> + '_ {
        self.states.iter().enumerate().flat_map(|(q, state)| {
            state
                .edges
                .iter()
                .enumerate()
                .filter_map(move |(sym, target)| target.map(|p| (q, sym, p)))
        })
    }

    /// Iterates over all `(state, symbol)` pairs whose transition is not set.
    pub fn unset_transitions(&self) -> impl Iterator<Item = (StateIndex, SymbolIndex)> + '_ {
        self.states.iter().enumerate().flat_map(|(q, state)| {
            state
                .edges
                .iter()
                .enumerate()
                .filter(|(_, target)| target.is_none())
                .map(move |(sym, _)| (q, sym))
        })
    }

    /// Returns true if every state has a transition on every symbol.
    pub fn is_complete(&self) -> bool {
        self.unset_transitions().next().is_none()
    }

    /// Replaces every unset transition with a transition to `default` and returns
    /// how many transitions were filled in.
    pub fn complete(&mut self, default: StateIndex) -> Result<usize, AutomatonError> {
        self.check_state(default)?;
        let mut filled = 0;
        for state in &mut self.states {
            for edge in state.edges.iter_mut().filter(|e| e.is_none()) {
                *edge = Some(default);
                filled += 1;
            }
        }
        trace!("completed automaton with {filled} transitions to {default}");
        Ok(filled)
    }

    /// Returns a completed copy of `self`, see [`Dfa::complete`].
    pub fn completed(&self, default: StateIndex) -> Result<Dfa, AutomatonError> {
        let mut copy = self.clone();
        copy.complete(default)?;
        Ok(copy)
    }

    /// Returns true if the word given as symbol labels is accepted. Words that
    /// contain symbols outside the alphabet are rejected.
    pub fn accepts_labels<S: AsRef<str>>(&self, word: &[S]) -> bool {
        self.alphabet
            .translate(word)
            .map(|w| self.accepts(&w))
            .unwrap_or(false)
    }

    /// Returns the transition row of `q`. Callers must ensure `q` is a valid index.
    pub(crate) fn row(&self, q: StateIndex) -> &[Option<StateIndex>] {
        &self.states[q].edges
    }

    /// Returns the reason why `self` is not a valid input for minimization.
    pub(crate) fn check_minimizable(&self) -> Result<StateIndex, InvalidReason> {
        let initial = self.initial.ok_or(InvalidReason::MissingInitial)?;
        match self.unset_transitions().next() {
            Some((state, symbol)) => Err(InvalidReason::MissingTransition { state, symbol }),
            None => Ok(initial),
        }
    }

    fn check_state(&self, q: StateIndex) -> Result<(), AutomatonError> {
        if q < self.size() {
            Ok(())
        } else {
            Err(AutomatonError::UnknownIndex {
                kind: IndexKind::State,
                index: q,
                bound: self.size(),
            })
        }
    }

    fn check_symbol(&self, sym: SymbolIndex) -> Result<(), AutomatonError> {
        if self.alphabet.contains(sym) {
            Ok(())
        } else {
            Err(AutomatonError::UnknownIndex {
                kind: IndexKind::Symbol,
                index: sym,
                bound: self.alphabet.len(),
            })
        }
    }
}
