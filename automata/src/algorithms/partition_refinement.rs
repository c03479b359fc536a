use std::collections::BTreeSet;

use tracing::trace;

use crate::{Dfa, Partition, StateIndex, SymbolIndex};

use super::Block;

/// Reports the progress of [`partition_refinement`] to an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefinementEvent<'a> {
    /// The initial partition, consisting of the non-empty blocks among the accepting
    /// and the rejecting states.
    Initial(&'a [Block]),
    /// A splitter was taken from the work queue.
    Splitter(&'a Block),
    /// A block of the partition has been split in two.
    Split {
        /// The symbol whose pre-image caused the split.
        symbol: SymbolIndex,
        /// The block that was split.
        block: &'a Block,
        /// States of `block` that reach the splitter on `symbol`.
        intersection: &'a Block,
        /// States of `block` that do not reach the splitter on `symbol`.
        difference: &'a Block,
    },
}

/// Hopcroft's partition refinement. Computes the coarsest partition of the states
/// of `dfa` that separates accepting from rejecting states and is compatible with
/// the transitions.
///
/// Both the partition and the work queue are ordered sets of blocks and the
/// lexicographically smallest block is always taken from the queue first, so the
/// result only depends on the input. When a block `Y` that is not queued is split
/// into `X ∩ Y` and `Y \ X`, only the smaller half is queued, the intersection
/// wins ties.
///
/// `dfa` must be complete, missing transitions are treated as leading nowhere.
pub(crate) fn partition_refinement<F>(dfa: &Dfa, mut observer: F) -> Partition
where
    F: FnMut(RefinementEvent<'_>),
{
    let accepting: Block = dfa.accepting_states().collect();
    let rejecting: Block = dfa.rejecting_states().collect();
    let initial: Vec<Block> = [accepting, rejecting]
        .into_iter()
        .filter(|b| !b.is_empty())
        .collect();
    observer(RefinementEvent::Initial(&initial));

    let mut p: BTreeSet<Block> = initial.iter().cloned().collect();
    let mut w: BTreeSet<Block> = initial.into_iter().collect();

    if p.len() < 2 {
        trace!("single initial block, nothing to refine");
        return Partition::new(p);
    }

    while let Some(a) = w.pop_first() {
        trace!("refining with splitter {a:?}");
        observer(RefinementEvent::Splitter(&a));

        for sym in dfa.alphabet().universe() {
            let x: Block = dfa
                .state_indices()
                .filter(|q| preimage_contains(dfa, *q, sym, &a))
                .collect();
            if x.is_empty() {
                continue;
            }

            let splits: Vec<(Block, Block, Block)> = p
                .iter()
                .filter_map(|y| {
                    let (int, diff): (Block, Block) = y.iter().partition(|q| x.contains(*q));
                    (!int.is_empty() && !diff.is_empty()).then(|| (y.clone(), int, diff))
                })
                .collect();

            for (y, int, diff) in splits {
                trace!("splitting {y:?} on symbol {sym} into {int:?} and {diff:?}");
                observer(RefinementEvent::Split {
                    symbol: sym,
                    block: &y,
                    intersection: &int,
                    difference: &diff,
                });

                p.remove(&y);
                p.insert(int.clone());
                p.insert(diff.clone());

                if w.remove(&y) {
                    w.insert(int);
                    w.insert(diff);
                } else if int.len() <= diff.len() {
                    w.insert(int);
                } else {
                    w.insert(diff);
                }
            }
        }
    }

    Partition::new(p)
}

fn preimage_contains(dfa: &Dfa, q: StateIndex, sym: SymbolIndex, a: &Block) -> bool {
    dfa.row(q)[sym].map(|t| a.contains(&t)).unwrap_or(false)
}
