pub mod builder;
pub mod error;
pub mod iter;
pub mod mining;
pub mod preprocess;
pub mod stats;
pub mod tree;


pub use builder::{build_master_tree, conditional_tree_from_paths};
pub use error::MineError;
pub use iter::{find_frequent_itemsets, FrequentItemsets};
pub use mining::{find_frequent_itemsets_par, MinerParams, Pattern, PatternStats};
pub use preprocess::{preprocess, CanonicalTransaction, Prepared, Vocabulary};
pub use stats::{chi_square, confidence, ClassTotals};
pub use tree::{FpNode, FpTree, PrefixPath, Route};
