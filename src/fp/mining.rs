//! The recursive miner and its output types.
//!
//! Mining walks a tree's items in reverse canonical order, emits every
//! extension whose confidence clears the threshold, and recurses into a
//! conditional tree per expandable item. A tree that degenerated to a single
//! chain is enumerated directly instead.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

use super::builder::{build_master_tree, conditional_tree_from_paths};
use super::error::MineError;
use super::preprocess::{preprocess, Vocabulary};
use super::stats::{chi_square, confidence, ClassTotals};
use super::tree::FpTree;

/// Thresholds and output shape for one mining run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinerParams {
    /// Minimum absolute transaction count for an item to survive, both
    /// globally and inside every conditional tree.
    pub minimum_support: usize,
    /// Minimum `pos_count / support` for an itemset to be emitted. Below
    /// the threshold the itemset is withheld but still expanded, since a
    /// longer extension may regain confidence.
    pub minimum_confidence: f64,
    /// When false, emitted patterns carry only the bare itemset.
    pub include_statistics: bool,
}

impl Default for MinerParams {
    fn default() -> Self {
        Self {
            minimum_support: 2,
            minimum_confidence: 0.5,
            include_statistics: false,
        }
    }
}

/// Support, label and association figures for one emitted itemset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternStats {
    pub support: usize,
    pub pos_count: usize,
    pub confidence: f64,
    pub chi_square: f64,
}

/// One qualifying itemset, most-specific item first, optionally paired with
/// its statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pattern<T> {
    pub items: Vec<T>,
    pub stats: Option<PatternStats>,
}

/// An emission still in ranked-id space.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Emission {
    pub items: Vec<u32>,
    pub support: usize,
    pub pos_count: usize,
    pub confidence: f64,
    pub chi_square: f64,
}

pub(crate) fn resolve_pattern<T: Clone>(
    emission: Emission,
    vocabulary: &Vocabulary<T>,
    include_statistics: bool,
) -> Pattern<T> {
    Pattern {
        items: emission
            .items
            .iter()
            .map(|&id| vocabulary.item(id).clone())
            .collect(),
        stats: include_statistics.then_some(PatternStats {
            support: emission.support,
            pos_count: emission.pos_count,
            confidence: emission.confidence,
            chi_square: emission.chi_square,
        }),
    }
}

/// Eager, parallel variant of [`find_frequent_itemsets`](super::iter::find_frequent_itemsets).
///
/// Sibling items at every branching level are mined on the rayon pool; they
/// share only read-only access to the parent tree, and the order-preserving
/// merge keeps the result sequence identical to the lazy iterator's.
pub fn find_frequent_itemsets_par<T, I, F>(
    records: I,
    params: &MinerParams,
    is_positive: F,
) -> Result<Vec<Pattern<T>>, MineError>
where
    T: Clone + Eq + Hash,
    I: IntoIterator<Item = Vec<T>>,
    F: Fn(&T) -> bool,
{
    let prepared = preprocess(records, params.minimum_support, is_positive)?;
    let tree = build_master_tree(&prepared.transactions);
    let emissions = mine_recursive(&tree, &[], params, &prepared.totals)?;
    Ok(emissions
        .into_iter()
        .map(|emission| resolve_pattern(emission, &prepared.vocabulary, params.include_statistics))
        .collect())
}

pub(crate) fn mine_recursive(
    tree: &FpTree,
    suffix: &[u32],
    params: &MinerParams,
    totals: &ClassTotals,
) -> Result<Vec<Emission>, MineError> {
    if tree.single_path {
        return mine_single_path(tree, suffix, params, totals);
    }

    let reversed: Vec<u32> = tree.item_order.iter().rev().copied().collect();
    let per_item: Vec<Result<Vec<Emission>, MineError>> = reversed
        .par_iter()
        .map(|&item| {
            let mut out = Vec::new();
            let (support, pos_count) = tree.item_stats(item)?;
            if support < params.minimum_support || suffix.contains(&item) {
                return Ok(out);
            }

            let mut extended = Vec::with_capacity(suffix.len() + 1);
            extended.push(item);
            extended.extend_from_slice(suffix);

            let confidence = confidence(support, pos_count);
            if confidence >= params.minimum_confidence {
                out.push(Emission {
                    items: extended.clone(),
                    support,
                    pos_count,
                    confidence,
                    chi_square: chi_square(support, pos_count, totals),
                });
            }

            let paths = tree.prefix_paths(item)?;
            let conditional = conditional_tree_from_paths(&paths, params.minimum_support);
            out.extend(mine_recursive(&conditional, &extended, params, totals)?);
            Ok(out)
        })
        .collect();

    let mut merged = Vec::new();
    for branch in per_item {
        merged.extend(branch?);
    }
    Ok(merged)
}

/// Direct enumeration of a tree that is one chain of nodes, walked leaf to
/// root with a shrinking remaining set.
///
/// When an item's aggregated support equals the previously computed one, the
/// extra item co-occurs with certainty with its neighbor and the itemset is
/// redundant; the item is skipped outright, leaving `last_support` and the
/// remaining set untouched, which matches the historical enumeration.
pub(crate) fn mine_single_path(
    tree: &FpTree,
    suffix: &[u32],
    params: &MinerParams,
    totals: &ClassTotals,
) -> Result<Vec<Emission>, MineError> {
    let mut out = Vec::new();
    let mut remaining = tree.item_order.clone();
    let mut last_support = 0;

    for index in (0..tree.item_order.len()).rev() {
        let item = tree.item_order[index];
        let (support, pos_count) = tree.item_stats(item)?;
        if last_support != 0 && last_support == support {
            continue;
        }

        let confidence = confidence(support, pos_count);
        if confidence >= params.minimum_confidence {
            let mut items = remaining.clone();
            items.extend_from_slice(suffix);
            out.push(Emission {
                items,
                support,
                pos_count,
                confidence,
                chi_square: chi_square(support, pos_count, totals),
            });
        }
        last_support = support;
        remaining.pop();
    }
    Ok(out)
}
