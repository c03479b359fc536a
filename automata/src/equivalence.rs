//! Comparing automata.
//!
//! Two checks are offered. [`columns_match`] is a cheap structural comparison of
//! two minimized automata that only looks at the shape of their transition
//! tables. It is a necessary condition for the automata to be identical up to
//! renaming of symbols, but it is **not** sufficient for language equivalence:
//! - accepting flags are ignored,
//! - symbol labels are ignored,
//! - every column of the first automaton only needs *some* matching column in the
//!   second one, several columns may be matched by the same column,
//! - states are compared by index, no state correspondence is computed.
//!
//! Callers that need actual language equivalence should use
//! [`language_equivalent`], which walks both automata simultaneously from their
//! initial states and checks every reachable pair of states for agreement.

use std::collections::VecDeque;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::{Acceptor, AutomatonError, Dfa, InvalidReason, Set, StateIndex, SymbolIndex};

/// Returns true if both automata have the same number of symbols and states and
/// every transition column of `left` equals, row for row, some transition column
/// of `right`. See the [module documentation](self) for the limitations of this
/// check.
pub fn columns_match(left: &Dfa, right: &Dfa) -> bool {
    if left.alphabet().len() != right.alphabet().len() {
        debug!(
            "alphabet sizes differ, {} vs {}",
            left.alphabet().len(),
            right.alphabet().len()
        );
        return false;
    }
    if left.size() != right.size() {
        debug!("state counts differ, {} vs {}", left.size(), right.size());
        return false;
    }

    let column = |dfa: &Dfa, sym: SymbolIndex| {
        dfa.state_indices()
            .map(|q| dfa.row(q)[sym])
            .collect_vec()
    };
    let right_columns = right
        .alphabet()
        .universe()
        .map(|sym| column(right, sym))
        .collect_vec();

    left.alphabet().universe().all(|sym| {
        let col = column(left, sym);
        let found = right_columns.iter().any(|other| *other == col);
        if !found {
            trace!("column of symbol {sym} has no counterpart");
        }
        found
    })
}

/// Decides whether `left` and `right` accept the same language. Symbols are matched
/// by their label, so both alphabets must contain the same labels (in any order),
/// otherwise the automata are considered different.
///
/// Both automata must be complete and have an initial state, neither needs to be
/// minimal. Only the parts reachable from the initial states are inspected.
pub fn language_equivalent(left: &Dfa, right: &Dfa) -> Result<bool, AutomatonError> {
    left.check_minimizable()?;
    right.check_minimizable()?;
    if !left.alphabet().same_symbols(right.alphabet()) {
        debug!(
            "alphabets differ, {} vs {}",
            left.alphabet(),
            right.alphabet()
        );
        return Ok(false);
    }
    // maps symbols of `left` to the symbols of `right` with the same label
    let Some(symbols) = left
        .alphabet()
        .symbols()
        .map(|(_, label)| right.alphabet().index_of(label))
        .collect::<Option<Vec<_>>>()
    else {
        return Ok(false);
    };

    let (Some(l0), Some(r0)) = (left.initial(), right.initial()) else {
        return Err(InvalidReason::MissingInitial.into());
    };
    Ok(pair_equivalent(left, right, &symbols, l0, r0))
}

/// Explores the pairs of states reachable from `(p, q)` in lockstep and checks
/// that every pair agrees on acceptance. The explored pairs form the witness
/// relation between the states of both automata.
fn pair_equivalent(
    left: &Dfa,
    right: &Dfa,
    symbols: &[SymbolIndex],
    p: StateIndex,
    q: StateIndex,
) -> bool {
    let mut seen: Set<(StateIndex, StateIndex)> = Set::from_iter([(p, q)]);
    let mut queue = VecDeque::from([(p, q)]);
    while let Some((p, q)) = queue.pop_front() {
        if left.state_accepts(p) != right.state_accepts(q) {
            debug!("states {p} and {q} disagree on acceptance");
            return false;
        }
        for (sym, &other) in symbols.iter().enumerate() {
            if let (Some(p2), Some(q2)) = (left.successor(p, sym), right.successor(q, other)) {
                if seen.insert((p2, q2)) {
                    trace!("pairing {p2} with {q2}");
                    queue.push_back((p2, q2));
                }
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::{columns_match, language_equivalent};
    use crate::{
        tests::{a_mod_three, a_mod_three_redundant, wiki_dfa},
        Dfa,
    };

    #[test_log::test]
    fn redundant_and_minimal_versions_are_equal() {
        let big = a_mod_three_redundant().minimize().unwrap();
        let small = a_mod_three().minimize().unwrap();
        assert_eq!(big.size(), 3);
        assert_eq!(small.size(), 3);
        assert!(columns_match(&big, &small));
        assert!(columns_match(&small, &big));
        assert!(language_equivalent(&big, &small).unwrap());
    }

    #[test]
    fn size_mismatch_is_not_equal() {
        let wiki = wiki_dfa();
        let small = a_mod_three();
        // 6 vs 3 states
        assert!(!columns_match(&wiki, &small));

        let unary = Dfa::from_text(
            "a
            * ! 0 -> 1
            1 -> 2
            2 -> 0",
        )
        .unwrap();
        // same number of states, different number of symbols
        assert!(!columns_match(&unary, &small));
        assert!(!language_equivalent(&unary, &small).unwrap());
    }

    #[test]
    fn column_shape_ignores_acceptance() {
        let flipped = Dfa::from_text(
            "a b
            * 0 -> 1 0
            ! 1 -> 2 1
            2 -> 0 2",
        )
        .unwrap();
        let original = a_mod_three();
        assert!(columns_match(&original, &flipped));
        assert!(!language_equivalent(&original, &flipped).unwrap());
    }

    #[test]
    fn symbols_are_matched_by_label() {
        let swapped = Dfa::from_text(
            "b a
            * ! x -> x y
            y -> y z
            z -> z x",
        )
        .unwrap();
        assert!(language_equivalent(&a_mod_three(), &swapped).unwrap());
        assert!(language_equivalent(&a_mod_three_redundant(), &swapped).unwrap());
    }

    #[test]
    fn incomplete_automata_are_rejected() {
        let partial = Dfa::from_text(
            "a b
            * ! 0 -> 1 0",
        )
        .unwrap();
        assert!(language_equivalent(&partial, &a_mod_three()).is_err());
    }
}
