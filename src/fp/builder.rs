//! Tree construction: the master tree and the per-item conditional rebuild.

use std::collections::HashMap;

use super::preprocess::CanonicalTransaction;
use super::tree::{FpTree, PrefixPath};

/// Builds the master tree from all canonical transactions, each with unit
/// weight. The tree is read-only for the rest of the run.
pub fn build_master_tree(transactions: &[CanonicalTransaction]) -> FpTree {
    let mut tree = FpTree::new();
    for transaction in transactions {
        tree.insert(&transaction.items, 1, usize::from(transaction.positive));
    }
    tree
}

/// Rebuilds a smaller tree from the prefix paths recorded for one item.
///
/// Per-item totals are aggregated across paths, weighted by each path's leaf
/// count (the leaf count already represents the sub-population that reached
/// that point). Items below `minimum_support` are dropped, the survivors get
/// a fresh local rank by the same descending-count / first-seen rule the
/// preprocessor uses, and each path is re-filtered, re-sorted and inserted
/// into a brand-new tree carrying its `(count, pos_count)` leaf weights.
///
/// Rebuilding from scratch sidesteps the count-merging bugs that in-place
/// node removal invites once nodes carry independent positive counts. The
/// conditioning item never appears: prefix paths already exclude it.
pub fn conditional_tree_from_paths(paths: &[PrefixPath], minimum_support: usize) -> FpTree {
    let mut counts: HashMap<u32, usize> = HashMap::new();
    let mut first_seen: HashMap<u32, usize> = HashMap::new();

    for path in paths {
        for &item in &path.items {
            let order = first_seen.len();
            first_seen.entry(item).or_insert(order);
            *counts.entry(item).or_insert(0) += path.count;
        }
    }

    let mut surviving: Vec<(u32, usize)> = counts
        .into_iter()
        .filter(|&(_, count)| count >= minimum_support)
        .collect();
    surviving.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| first_seen[&a.0].cmp(&first_seen[&b.0])));

    let local_rank: HashMap<u32, usize> = surviving
        .into_iter()
        .enumerate()
        .map(|(rank, (item, _))| (item, rank))
        .collect();

    let mut tree = FpTree::new();
    for path in paths {
        let mut filtered: Vec<u32> = path
            .items
            .iter()
            .copied()
            .filter(|item| local_rank.contains_key(item))
            .collect();
        filtered.sort_by_key(|item| local_rank[item]);
        tree.insert(&filtered, path.count, path.pos_count);
    }
    tree
}
