//! Library for working with deterministic finite automata over string-labeled
//! alphabets.
//!
//! The central type is [`Dfa`], a dense transition table whose states and symbols
//! are addressed by integer indices, with a bijection back to their labels. On top
//! of it the crate provides
//! - Hopcroft's partition refinement ([`Dfa::minimize`], [`algorithms::minimize_with`]),
//! - a column-shape comparison of minimized automata ([`equivalence::columns_match`])
//!   as well as a full language equivalence check ([`equivalence::language_equivalent`]),
//! - conversion to and from a small textual format, to DOT and to a transition table.
#![warn(missing_docs)]

/// Type used for maps from labels to indices.
pub type Map<K, V> = ahash::AHashMap<K, V>;
/// Type used for sets of states.
pub type Set<T> = ahash::AHashSet<T>;

/// Index of a state in a [`Dfa`].
pub type StateIndex = usize;

/// Index of a symbol in an [`Alphabet`].
pub type SymbolIndex = usize;

mod labels;

pub mod alphabet;
pub use alphabet::Alphabet;

mod error;
pub use error::{AutomatonError, IndexKind, InvalidReason};

pub mod automaton;
pub use automaton::{Acceptor, Dfa};

/// Algorithms that operate on whole automata, most notably minimization.
pub mod algorithms;
pub use algorithms::{Block, Partition, RefinementEvent};

pub mod equivalence;

/// Conversion of automata into other representations.
pub mod convert;
pub use convert::{ParseError, ParseErrorKind, ToDot};

/// Commonly used items, meant to be glob imported.
pub mod prelude {
    pub use crate::{
        algorithms::{minimize_with, RefinementEvent},
        equivalence::{columns_match, language_equivalent},
        Acceptor, Alphabet, AutomatonError, Dfa, StateIndex, SymbolIndex, ToDot,
    };
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::Dfa;

    /// The six state example from the wikipedia article on DFA minimization,
    /// with states `a` to `f` mapped to indices `0` to `5`. It minimizes to
    /// three states.
    pub fn wiki_dfa() -> Dfa {
        Dfa::from_text(
            "0 1
            * a -> b c
            b -> a d
            ! c -> e f
            ! d -> e f
            ! e -> e f
            f -> f f",
        )
        .expect("wiki dfa is well formed")
    }

    /// Accepts all words over `{a, b}` where the number of `a`s is divisible by three.
    pub fn a_mod_three() -> Dfa {
        Dfa::from_text(
            "a b
            * ! 0 -> 1 0
            1 -> 2 1
            2 -> 0 2",
        )
        .expect("mod three dfa is well formed")
    }

    /// Same language as [`a_mod_three`], but the initial state has a behaviorally
    /// identical twin `3`.
    pub fn a_mod_three_redundant() -> Dfa {
        Dfa::from_text(
            "a b
            * ! 0 -> 1 0
            1 -> 2 1
            2 -> 3 2
            ! 3 -> 1 3",
        )
        .expect("redundant mod three dfa is well formed")
    }
}
