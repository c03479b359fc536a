//! Incremental construction of deterministic finite automata from words that are
//! labeled as positive or negative.
#![warn(missing_docs)]

use itertools::Itertools;

/// Labeled words and samples thereof.
pub mod sample;
pub use sample::{LabeledWord, Polarity, Sample, SampleParseError};

mod prefixtree;
pub use prefixtree::IncrementalBuilder;

/// Errors that can occur while learning an automaton.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LearnError {
    /// A word ends in a state that has already been decided with the opposite
    /// polarity.
    #[error("{}", conflict_message(.word, .state, .asserted))]
    Conflict {
        /// The offending word.
        word: Vec<String>,
        /// Label of the state in which the word ends.
        state: String,
        /// The polarity that the word asserted.
        asserted: Polarity,
    },
    /// An error in the underlying automaton.
    #[error(transparent)]
    Automaton(#[from] dfa::AutomatonError),
}

fn conflict_message(word: &[String], state: &str, asserted: &Polarity) -> String {
    let (expected, actual) = match asserted {
        Polarity::Positive => ("accepted", "rejects"),
        Polarity::Negative => ("rejected", "accepts"),
    };
    format!(
        "word \"{}\" must be {expected}, but state {state} {actual} it",
        word.iter().join(" ")
    )
}
