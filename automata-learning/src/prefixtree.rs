use dfa::{Alphabet, AutomatonError, Dfa, InvalidReason, StateIndex};
use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    sample::{LabeledWord, Polarity, Sample},
    LearnError,
};

/// Builds a [`Dfa`] from labeled words, one word at a time.
///
/// Every word is read from the initial state. Whenever a transition is missing,
/// a fresh state is allocated, labeled by its index and with an acceptance flag
/// that matches the polarity of the word. The state in which a word ends is
/// marked as *decided* and takes the polarity of that word. A later word that ends
/// in a decided state with the opposite polarity is a conflict, which leaves the
/// acceptance flag untouched. States passed through along the way are never
/// decided.
///
/// The automaton that is built up in this way is a prefix tree and thus usually
/// partial, see [`IncrementalBuilder::completed`] and
/// [`IncrementalBuilder::minimized`].
#[derive(Debug, Clone, Default)]
pub struct IncrementalBuilder {
    dfa: Dfa,
    decided: Vec<bool>,
}

impl IncrementalBuilder {
    /// Creates a builder for an empty automaton over an empty alphabet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder whose automaton starts out with the given alphabet. Symbols
    /// that occur in consumed words are added as needed.
    pub fn with_alphabet(alphabet: Alphabet) -> Self {
        Self {
            dfa: Dfa::new(alphabet),
            decided: vec![],
        }
    }

    /// Feeds a single word with the given polarity into the automaton and returns
    /// the state in which the word ends.
    pub fn consume<S: AsRef<str>>(
        &mut self,
        polarity: Polarity,
        word: &[S],
    ) -> Result<StateIndex, LearnError> {
        let symbols = word
            .iter()
            .map(|sym| self.dfa.add_symbol(sym.as_ref()))
            .collect_vec();

        let mut q = match self.dfa.initial() {
            Some(q) => q,
            None => {
                let q = self.allocate(polarity)?;
                self.dfa.set_initial(q)?;
                q
            }
        };
        for sym in symbols {
            q = match self.dfa.successor(q, sym) {
                Some(p) => p,
                None => {
                    let p = self.allocate(polarity)?;
                    self.dfa.set_transition(q, sym, p)?;
                    p
                }
            };
        }

        let accepting = polarity.is_positive();
        if self.decided[q] && self.dfa.is_accepting(q)? != accepting {
            let word: Vec<String> = word.iter().map(|sym| sym.as_ref().to_string()).collect();
            let state = self.dfa.state_label(q)?.to_string();
            debug!("word \"{}\" conflicts in state {state}", word.join(" "));
            return Err(LearnError::Conflict {
                word,
                state,
                asserted: polarity,
            });
        }
        self.dfa.set_accepting(q, accepting)?;
        self.decided[q] = true;
        trace!("state {q} is now decided as {polarity}");
        Ok(q)
    }

    /// Consumes a [`LabeledWord`], see [`IncrementalBuilder::consume`].
    pub fn consume_word(&mut self, word: &LabeledWord) -> Result<StateIndex, LearnError> {
        self.consume(word.polarity, &word.word)
    }

    /// Consumes the words of `sample` in order, stopping at the first conflict.
    /// Returns the number of consumed words.
    pub fn consume_sample(&mut self, sample: &Sample) -> Result<usize, LearnError> {
        for (i, word) in sample.words().enumerate() {
            self.consume_word(word).map_err(|err| {
                debug!("stopping after {i} words");
                err
            })?;
        }
        debug!(
            "consumed {} words, automaton has {} states",
            sample.len(),
            self.dfa.size()
        );
        Ok(sample.len())
    }

    /// The automaton built so far.
    pub fn automaton(&self) -> &Dfa {
        &self.dfa
    }

    /// Consumes the builder and returns the automaton built so far.
    pub fn into_inner(self) -> Dfa {
        self.dfa
    }

    /// Returns true if some consumed word ended in `q`.
    pub fn is_decided(&self, q: StateIndex) -> bool {
        self.decided.get(q).copied().unwrap_or(false)
    }

    /// Iterates over all states in which some consumed word ended.
    pub fn decided_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.decided
            .iter()
            .enumerate()
            .filter_map(|(q, decided)| decided.then_some(q))
    }

    /// Returns a copy of the automaton in which every missing transition leads
    /// back to the initial state.
    pub fn completed(&self) -> Result<Dfa, LearnError> {
        let initial = self
            .dfa
            .initial()
            .ok_or(AutomatonError::InvalidAutomaton(InvalidReason::MissingInitial))?;
        Ok(self.dfa.completed(initial)?)
    }

    /// Completes the automaton as [`IncrementalBuilder::completed`] does and
    /// minimizes the result.
    pub fn minimized(&self) -> Result<Dfa, LearnError> {
        Ok(self.completed()?.minimize()?)
    }

    /// Adds an undecided state whose acceptance matches `polarity`.
    fn allocate(&mut self, polarity: Polarity) -> Result<StateIndex, LearnError> {
        let q = self.dfa.add_state(&self.dfa.size().to_string());
        self.dfa.set_accepting(q, polarity.is_positive())?;
        self.decided.push(false);
        trace!("allocated state {q} for {polarity} word");
        Ok(q)
    }
}

#[cfg(test)]
mod tests {
    use dfa::{Acceptor, Map};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::IncrementalBuilder;
    use crate::{LabeledWord, LearnError, Polarity, Sample};

    const SYMBOLS: [&str; 3] = ["a", "b", "c"];

    /// Turns generated words into a sample, every word keeps the polarity of its
    /// first occurrence.
    fn consistent_sample(words: Vec<(Vec<usize>, bool)>) -> Sample {
        let mut seen = Map::default();
        words
            .into_iter()
            .map(|(word, positive)| {
                let word = word.into_iter().map(|sym| SYMBOLS[sym]).collect::<Vec<_>>();
                let positive = *seen.entry(word.clone()).or_insert(positive);
                LabeledWord::new(Polarity::from(positive), word)
            })
            .collect()
    }

    #[test_log::test]
    fn conflict_is_detected() {
        let mut builder = IncrementalBuilder::new();
        let q = builder.consume(Polarity::Positive, &["a", "b"]).unwrap();
        let err = builder.consume(Polarity::Negative, &["a", "b"]).unwrap_err();
        assert_eq!(
            err,
            LearnError::Conflict {
                word: vec!["a".into(), "b".into()],
                state: "2".into(),
                asserted: Polarity::Negative,
            }
        );
        assert_eq!(err.to_string(), "word \"a b\" must be rejected, but state 2 accepts it");
        // the acceptance flag is left untouched
        assert!(builder.automaton().is_accepting(q).unwrap());
    }

    #[test_log::test]
    fn repeating_a_word_is_no_conflict() {
        let mut builder = IncrementalBuilder::new();
        let first = builder.consume(Polarity::Positive, &["a", "b"]).unwrap();
        let second = builder.consume(Polarity::Positive, &["a", "b"]).unwrap();
        assert_eq!(first, second);
        assert_eq!(builder.automaton().size(), 3);
    }

    #[test]
    fn states_are_labeled_by_index() {
        let mut builder = IncrementalBuilder::new();
        builder.consume(Polarity::Negative, &["x", "y"]).unwrap();
        builder.consume(Polarity::Positive, &["y"]).unwrap();
        let dfa = builder.automaton();
        assert_eq!(
            dfa.states().collect::<Vec<_>>(),
            vec![(0, "0"), (1, "1"), (2, "2"), (3, "3")]
        );
        assert_eq!(
            dfa.alphabet().symbols().collect::<Vec<_>>(),
            vec![(0, "x"), (1, "y")]
        );
        assert_eq!(dfa.initial(), Some(0));
        assert_eq!(
            dfa.transitions().collect::<Vec<_>>(),
            vec![(0, 0, 1), (0, 1, 3), (1, 1, 2)]
        );
    }

    #[test]
    fn transit_states_are_not_decided() {
        let mut builder = IncrementalBuilder::new();
        builder.consume(Polarity::Positive, &["a", "a", "a"]).unwrap();
        assert_eq!(builder.decided_states().collect::<Vec<_>>(), vec![3]);
        assert!(!builder.is_decided(1));
        // transit states may still be decided later on, with either polarity
        builder.consume(Polarity::Negative, &["a"]).unwrap();
        assert!(builder.is_decided(1));
        assert!(!builder.automaton().is_accepting(1).unwrap());
    }

    #[test]
    fn empty_word_decides_initial_state() {
        let mut builder = IncrementalBuilder::new();
        let q = builder.consume::<&str>(Polarity::Negative, &[]).unwrap();
        assert_eq!(q, 0);
        assert!(builder.is_decided(0));
        assert!(matches!(
            builder.consume::<&str>(Polarity::Positive, &[]),
            Err(LearnError::Conflict { .. })
        ));
    }

    #[test_log::test]
    fn every_word_keeps_its_polarity() {
        let sample: Sample = "+ a b
            - a
            + b b a
            - b
            +
            - a b a"
            .parse()
            .unwrap();
        let mut builder = IncrementalBuilder::new();
        assert_eq!(builder.consume_sample(&sample), Ok(6));

        let completed = builder.completed().unwrap();
        let minimized = builder.minimized().unwrap();
        assert!(completed.is_complete());
        assert!(minimized.size() <= completed.size());
        for LabeledWord { polarity, word } in sample.words() {
            assert_eq!(builder.automaton().accepts_labels(word), polarity.is_positive());
            assert_eq!(completed.accepts_labels(word), polarity.is_positive());
            assert_eq!(minimized.accepts_labels(word), polarity.is_positive());
        }
    }

    #[test]
    fn sample_stops_at_first_conflict() {
        let sample: Sample = "+ a\n- a\n- b".parse().unwrap();
        let mut builder = IncrementalBuilder::new();
        assert!(matches!(
            builder.consume_sample(&sample),
            Err(LearnError::Conflict { .. })
        ));
        let dfa = builder.automaton();
        // nothing after the conflicting word is consumed
        assert_eq!(dfa.size(), 2);
        assert_eq!(dfa.alphabet().len(), 1);
        let a = dfa.alphabet().translate(&["a"]).unwrap();
        assert!(dfa.accepts(&a));
        assert_eq!(builder.decided_states().collect::<Vec<_>>(), vec![1]);
    }

    proptest! {
        #[test]
        fn consistent_samples_keep_their_polarities(
            words in prop::collection::vec(
                (prop::collection::vec(0usize..SYMBOLS.len(), 0..6), any::<bool>()),
                1..24,
            )
        ) {
            let sample = consistent_sample(words);
            let mut builder = IncrementalBuilder::new();
            prop_assert_eq!(builder.consume_sample(&sample), Ok(sample.len()));

            let completed = builder.completed().unwrap();
            let minimized = builder.minimized().unwrap();
            for LabeledWord { polarity, word } in sample.words() {
                let expected = polarity.is_positive();
                for dfa in [builder.automaton(), &completed, &minimized] {
                    prop_assert_eq!(dfa.accepts_labels(word), expected, "word {:?}", word);
                }
            }
        }
    }

    #[test]
    fn nothing_consumed() {
        let builder = IncrementalBuilder::new();
        assert!(builder.automaton().is_empty());
        assert!(matches!(
            builder.minimized(),
            Err(LearnError::Automaton(_))
        ));
    }
}
