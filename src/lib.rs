//! patmine: label-correlated frequent itemset mining.
//!
//! This crate mines frequent itemsets from binary-labeled transactions with
//! a modified FP-growth: a compact prefix tree over canonicalized
//! transactions, recursive conditional subtrees per expandable item, and
//! emission gated on support and label-confidence, with a chi-square
//! goodness-of-fit figure carried along as a ranking signal.
//!
//! Records enter as token sequences of the form `[identifier, item.., label]`
//! together with a caller-supplied label predicate; log parsing, tokenizing
//! and file I/O belong to the caller.
//!
//! ```
//! use patmine::fp::{find_frequent_itemsets, MinerParams};
//!
//! let records = vec![
//!     vec!["t1", "A", "B", "T"],
//!     vec!["t2", "A", "B", "T"],
//!     vec!["t3", "A", "C", "F"],
//! ];
//! let params = MinerParams {
//!     minimum_support: 1,
//!     minimum_confidence: 0.5,
//!     include_statistics: true,
//! };
//! for pattern in find_frequent_itemsets(records, &params, |&label| label == "T").unwrap() {
//!     let pattern = pattern.unwrap();
//!     println!("{:?} {:?}", pattern.items, pattern.stats);
//! }
//! ```

pub mod fp;

pub use fp::{
    find_frequent_itemsets, find_frequent_itemsets_par, ClassTotals, FrequentItemsets, MineError,
    MinerParams, Pattern, PatternStats,
};
