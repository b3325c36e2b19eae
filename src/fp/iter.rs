//! Lazy mining: an explicit-stack iterator replaying the recursive
//! traversal's depth-first order one emission at a time.

use std::hash::Hash;

use super::builder::{build_master_tree, conditional_tree_from_paths};
use super::error::MineError;
use super::mining::{resolve_pattern, Emission, MinerParams, Pattern};
use super::preprocess::{preprocess, Vocabulary};
use super::stats::{chi_square, confidence, ClassTotals};
use super::tree::FpTree;

/// Finds frequent, label-correlated itemsets in the given raw records.
///
/// Each record is `[identifier, item.., label]`; `is_positive` is applied to
/// the trailing token. Preprocessing and the master-tree build happen
/// eagerly (and report [`MineError::InvalidTransaction`] here); mining
/// itself is lazy, driven by the returned iterator.
pub fn find_frequent_itemsets<T, I, F>(
    records: I,
    params: &MinerParams,
    is_positive: F,
) -> Result<FrequentItemsets<T>, MineError>
where
    T: Clone + Eq + Hash,
    I: IntoIterator<Item = Vec<T>>,
    F: Fn(&T) -> bool,
{
    let prepared = preprocess(records, params.minimum_support, is_positive)?;
    let tree = build_master_tree(&prepared.transactions);
    Ok(FrequentItemsets {
        vocabulary: prepared.vocabulary,
        totals: prepared.totals,
        params: *params,
        stack: vec![Frame::enter(tree, Vec::new())],
        failed: false,
    })
}

/// A finite, non-restartable stream of qualifying itemsets.
///
/// Each conditional tree lives in exactly one frame of the internal stack
/// and is dropped when that frame is exhausted, so memory shrinks with the
/// traversal just as it does in the recursive variant. After yielding an
/// `Err` the iterator is fused.
pub struct FrequentItemsets<T> {
    vocabulary: Vocabulary<T>,
    totals: ClassTotals,
    params: MinerParams,
    stack: Vec<Frame>,
    failed: bool,
}

enum Frame {
    /// Iterating a branching tree's items in reverse canonical order.
    Branching {
        tree: FpTree,
        items: Vec<u32>,
        pos: usize,
        suffix: Vec<u32>,
    },
    /// Walking a single chain from leaf to root.
    SinglePath {
        tree: FpTree,
        pos: usize,
        remaining: Vec<u32>,
        suffix: Vec<u32>,
        last_support: usize,
    },
}

impl Frame {
    fn enter(tree: FpTree, suffix: Vec<u32>) -> Self {
        if tree.single_path {
            let pos = tree.item_order.len();
            let remaining = tree.item_order.clone();
            Frame::SinglePath {
                tree,
                pos,
                remaining,
                suffix,
                last_support: 0,
            }
        } else {
            let items: Vec<u32> = tree.item_order.iter().rev().copied().collect();
            Frame::Branching {
                tree,
                items,
                pos: 0,
                suffix,
            }
        }
    }
}

/// Outcome of advancing the top frame by one item.
enum Step {
    Pop,
    Continue,
    Descend {
        conditional: FpTree,
        extended: Vec<u32>,
        emission: Option<Emission>,
    },
    Emit(Emission),
    Fail(MineError),
}

impl<T: Clone> Iterator for FrequentItemsets<T> {
    type Item = Result<Pattern<T>, MineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let params = self.params;
            let totals = self.totals;

            let step = match self.stack.last_mut() {
                None => return None,
                Some(Frame::Branching {
                    tree,
                    items,
                    pos,
                    suffix,
                }) => {
                    if *pos == items.len() {
                        Step::Pop
                    } else {
                        let item = items[*pos];
                        *pos += 1;
                        advance_branching(tree, item, suffix, &params, &totals)
                    }
                }
                Some(Frame::SinglePath {
                    tree,
                    pos,
                    remaining,
                    suffix,
                    last_support,
                }) => {
                    if *pos == 0 {
                        Step::Pop
                    } else {
                        *pos -= 1;
                        advance_single_path(tree, *pos, remaining, suffix, last_support, &params, &totals)
                    }
                }
            };

            match step {
                Step::Pop => {
                    self.stack.pop();
                }
                Step::Continue => {}
                Step::Descend {
                    conditional,
                    extended,
                    emission,
                } => {
                    self.stack.push(Frame::enter(conditional, extended));
                    if let Some(emission) = emission {
                        return Some(Ok(self.resolve(emission)));
                    }
                }
                Step::Emit(emission) => return Some(Ok(self.resolve(emission))),
                Step::Fail(error) => {
                    self.failed = true;
                    return Some(Err(error));
                }
            }
        }
    }
}

impl<T: Clone> FrequentItemsets<T> {
    fn resolve(&self, emission: Emission) -> Pattern<T> {
        resolve_pattern(emission, &self.vocabulary, self.params.include_statistics)
    }
}

fn advance_branching(
    tree: &FpTree,
    item: u32,
    suffix: &[u32],
    params: &MinerParams,
    totals: &ClassTotals,
) -> Step {
    let (support, pos_count) = match tree.item_stats(item) {
        Ok(stats) => stats,
        Err(error) => return Step::Fail(error),
    };
    if support < params.minimum_support || suffix.contains(&item) {
        return Step::Continue;
    }

    let mut extended = Vec::with_capacity(suffix.len() + 1);
    extended.push(item);
    extended.extend_from_slice(suffix);

    let confidence = confidence(support, pos_count);
    let emission = (confidence >= params.minimum_confidence).then(|| Emission {
        items: extended.clone(),
        support,
        pos_count,
        confidence,
        chi_square: chi_square(support, pos_count, totals),
    });

    let paths = match tree.prefix_paths(item) {
        Ok(paths) => paths,
        Err(error) => return Step::Fail(error),
    };
    let conditional = conditional_tree_from_paths(&paths, params.minimum_support);

    Step::Descend {
        conditional,
        extended,
        emission,
    }
}

fn advance_single_path(
    tree: &FpTree,
    pos: usize,
    remaining: &mut Vec<u32>,
    suffix: &[u32],
    last_support: &mut usize,
    params: &MinerParams,
    totals: &ClassTotals,
) -> Step {
    let item = tree.item_order[pos];
    let (support, pos_count) = match tree.item_stats(item) {
        Ok(stats) => stats,
        Err(error) => return Step::Fail(error),
    };
    if *last_support != 0 && *last_support == support {
        return Step::Continue;
    }

    let confidence = confidence(support, pos_count);
    let emission = (confidence >= params.minimum_confidence).then(|| {
        let mut items = remaining.clone();
        items.extend_from_slice(suffix);
        Emission {
            items,
            support,
            pos_count,
            confidence,
            chi_square: chi_square(support, pos_count, totals),
        }
    });
    *last_support = support;
    remaining.pop();

    match emission {
        Some(emission) => Step::Emit(emission),
        None => Step::Continue,
    }
}
