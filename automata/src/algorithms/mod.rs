use std::collections::BTreeSet;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::{AutomatonError, Dfa, InvalidReason, StateIndex};

mod partition_refinement;
pub use partition_refinement::RefinementEvent;
use partition_refinement::partition_refinement;

/// A set of states that are considered equivalent.
pub type Block = BTreeSet<StateIndex>;

/// A partition of the states of an automaton into disjoint, non-empty [`Block`]s.
/// Blocks are kept sorted by their minimal element, which is what determines the
/// index of the block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition(Vec<Block>);

impl Partition {
    /// Creates a partition from the given blocks, empty blocks are dropped.
    pub fn new<I, B>(blocks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: IntoIterator<Item = StateIndex>,
    {
        let blocks: BTreeSet<Block> = blocks
            .into_iter()
            .map(|b| b.into_iter().collect::<Block>())
            .filter(|b| !b.is_empty())
            .collect();
        debug_assert!(
            blocks.iter().flatten().all_unique(),
            "blocks of a partition must be disjoint"
        );
        Self(blocks.into_iter().collect())
    }

    /// The number of blocks.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the partition has no blocks.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the blocks, ordered by their minimal element.
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.0.iter()
    }

    /// Returns the block with the given index.
    pub fn get(&self, id: usize) -> Option<&Block> {
        self.0.get(id)
    }

    /// Returns the index of the block that contains `q`.
    pub fn class_of(&self, q: StateIndex) -> Option<usize> {
        self.0.iter().position(|b| b.contains(&q))
    }
}

impl Dfa {
    /// Computes the minimal automaton using Hopcroft's algorithm, see
    /// [`minimize_with`] for details.
    pub fn minimize(&self) -> Result<Dfa, AutomatonError> {
        minimize_with(self, |_| {})
    }

    /// Builds the quotient of `self` with respect to `partition`. Every block becomes
    /// one state, labeled with its index, whose transitions and acceptance are taken
    /// from the block's minimal member.
    pub fn quotient(&self, partition: &Partition) -> Result<Dfa, AutomatonError> {
        let initial = self.initial().ok_or(InvalidReason::MissingInitial)?;

        let mut class = vec![None; self.size()];
        for (id, block) in partition.iter().enumerate() {
            for &q in block {
                if let Some(slot) = class.get_mut(q) {
                    *slot = Some(id);
                }
            }
        }

        let mut out = Dfa::new(self.alphabet().clone());
        for id in 0..partition.len() {
            out.add_state(&id.to_string());
        }

        for (id, block) in partition.iter().enumerate() {
            let Some(&representative) = block.first() else {
                continue;
            };
            out.set_accepting(id, self.is_accepting(representative)?)?;
            for sym in self.alphabet().universe() {
                let target = self
                    .transition(representative, sym)?
                    .ok_or(InvalidReason::MissingTransition {
                        state: representative,
                        symbol: sym,
                    })?;
                let target_class = class.get(target).copied().flatten().ok_or(
                    AutomatonError::UnknownIndex {
                        kind: crate::IndexKind::State,
                        index: target,
                        bound: self.size(),
                    },
                )?;
                out.set_transition(id, sym, target_class)?;
            }
        }

        let initial_class = class
            .get(initial)
            .copied()
            .flatten()
            .ok_or(InvalidReason::InitialClassNotFound(initial))?;
        out.set_initial(initial_class)?;
        Ok(out)
    }
}

/// Minimizes `dfa` with Hopcroft's partition refinement and returns a fresh
/// automaton, `dfa` itself is not modified. The `observer` is called for every
/// step of the refinement, which allows inspecting intermediate partitions.
///
/// The states of the result are the blocks of the coarsest stable partition,
/// numbered in the order of their minimal original member. Consequently
/// minimizing the same automaton twice yields identical automata.
///
/// Fails with [`AutomatonError::InvalidAutomaton`] if `dfa` has no initial state
/// or is not complete.
pub fn minimize_with<F>(dfa: &Dfa, observer: F) -> Result<Dfa, AutomatonError>
where
    F: FnMut(RefinementEvent<'_>),
{
    dfa.check_minimizable()?;
    let partition = partition_refinement(dfa, observer);
    debug!(
        "minimization reduced {} states to {}",
        dfa.size(),
        partition.len()
    );
    trace!("final partition {:?}", partition);
    dfa.quotient(&partition)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use crate::{
        tests::{a_mod_three, a_mod_three_redundant, wiki_dfa},
        Acceptor, AutomatonError, Dfa, InvalidReason, SymbolIndex,
    };

    #[test]
    fn dfa_minimization() {
        let dfa = wiki_dfa();
        assert_eq!(dfa.size(), 6);
        let min = dfa.minimize().unwrap();
        assert_eq!(min.size(), 3);
        assert_eq!(min.initial(), Some(0));
        assert_eq!(min.accepting_states().collect::<Vec<_>>(), vec![1]);
        assert_eq!(
            min.transitions().collect::<Vec<_>>(),
            vec![
                (0, 0, 0),
                (0, 1, 1),
                (1, 0, 1),
                (1, 1, 2),
                (2, 0, 2),
                (2, 1, 2)
            ]
        );
    }

    #[test]
    fn minimization_is_deterministic() {
        let dfa = a_mod_three_redundant();
        let first = dfa.minimize().unwrap();
        let second = dfa.minimize().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.size(), 3);
    }

    #[test]
    fn minimization_is_idempotent() {
        for dfa in [wiki_dfa(), a_mod_three(), a_mod_three_redundant()] {
            let min = dfa.minimize().unwrap();
            let again = min.minimize().unwrap();
            assert_eq!(again.size(), min.size());
            assert_eq!(again, min);
        }
    }

    #[test]
    fn all_accepting_collapses_to_one_state() {
        let dfa = Dfa::from_text(
            "a b
            * ! p -> q r
            ! q -> r p
            ! r -> r r",
        )
        .unwrap();
        let min = dfa.minimize().unwrap();
        assert_eq!(min.size(), 1);
        assert_eq!(min.initial(), Some(0));
        assert!(min.is_accepting(0).unwrap());
        assert_eq!(min.transitions().collect::<Vec<_>>(), vec![(0, 0, 0), (0, 1, 0)]);
    }

    #[test]
    fn incomplete_input_is_rejected_until_completed() {
        let mut dfa = Dfa::from_text(
            "a b
            * 0 -> 1 0
            ! 1 -> 2 1",
        )
        .unwrap();
        assert_eq!(dfa.unset_transitions().count(), 2);
        assert!(matches!(
            dfa.minimize(),
            Err(AutomatonError::InvalidAutomaton(
                InvalidReason::MissingTransition { state: 2, .. }
            ))
        ));

        let initial = dfa.initial().unwrap();
        assert_eq!(dfa.complete(initial), Ok(2));
        assert_eq!(dfa.unset_transitions().count(), 0);
        assert!(dfa.minimize().is_ok());
    }

    #[test]
    fn missing_initial_is_rejected() {
        let mut dfa = Dfa::new(crate::alphabet!("a"));
        let q = dfa.add_state("q");
        dfa.set_transition(q, 0, q).unwrap();
        assert_eq!(
            dfa.minimize(),
            Err(AutomatonError::InvalidAutomaton(InvalidReason::MissingInitial))
        );
        assert_eq!(
            Dfa::default().minimize(),
            Err(AutomatonError::InvalidAutomaton(InvalidReason::MissingInitial))
        );
    }

    #[test]
    fn input_is_not_modified() {
        let dfa = a_mod_three_redundant();
        let copy = dfa.clone();
        let _ = dfa.minimize().unwrap();
        assert_eq!(dfa, copy);
    }

    /// Builds a complete automaton over `symbols` symbols from a flat table of
    /// targets and acceptance flags, with state 0 as initial state.
    fn from_table(symbols: usize, table: &[usize], accepting: &[bool]) -> Dfa {
        let mut dfa = Dfa::new((0..symbols).map(|s| s.to_string()).collect());
        for q in 0..accepting.len() {
            dfa.add_state(&q.to_string());
        }
        for (q, &acc) in accepting.iter().enumerate() {
            dfa.set_accepting(q, acc).unwrap();
            for sym in 0..symbols {
                dfa.set_transition(q, sym, table[q * symbols + sym] % accepting.len())
                    .unwrap();
            }
        }
        dfa.set_initial(0).unwrap();
        dfa
    }

    fn words_up_to(symbols: usize, length: usize) -> Vec<Vec<SymbolIndex>> {
        let mut all = vec![vec![]];
        let mut last = vec![vec![]];
        for _ in 0..length {
            last = last
                .iter()
                .flat_map(|w: &Vec<SymbolIndex>| {
                    (0..symbols).map(move |s| {
                        let mut w = w.clone();
                        w.push(s);
                        w
                    })
                })
                .collect();
            all.extend(last.iter().cloned());
        }
        all
    }

    proptest! {
        #[test]
        fn minimization_preserves_acceptance(
            (table, accepting) in (1usize..8).prop_flat_map(|n| (
                prop::collection::vec(0usize..n, n * 2),
                prop::collection::vec(any::<bool>(), n),
            ))
        ) {
            let dfa = from_table(2, &table, &accepting);
            let min = dfa.minimize().unwrap();
            prop_assert!(min.size() <= dfa.size());
            for word in words_up_to(2, 6) {
                prop_assert_eq!(dfa.accepts(&word), min.accepts(&word), "word {:?}", word);
            }
        }
    }
}
