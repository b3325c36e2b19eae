//! The prefix tree and its auxiliary traversal indices.
//!
//! Nodes live in an arena and refer to each other by index, which keeps the
//! parent, child and same-item neighbor links free of ownership cycles. The
//! root sits at index 0 and carries no item and no counts.

use std::collections::HashMap;

use super::error::MineError;

/// A single item occurrence with aggregated counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FpNode {
    /// `None` only for the root.
    pub item: Option<u32>,
    /// Number of transactions passing through this node.
    pub count: usize,
    /// Subset of `count` labeled positive. Invariant: `pos_count <= count`.
    pub pos_count: usize,
    pub parent: Option<usize>,
    pub children: HashMap<u32, usize>,
    /// Next node for the same item, threading every occurrence across the
    /// whole tree.
    pub neighbor: Option<usize>,
}

impl FpNode {
    pub fn new_root() -> Self {
        Self {
            item: None,
            count: 0,
            pos_count: 0,
            parent: None,
            children: HashMap::new(),
            neighbor: None,
        }
    }

    pub fn new_item(item: u32, count: usize, pos_count: usize, parent: usize) -> Self {
        Self {
            item: Some(item),
            count,
            pos_count,
            parent: Some(parent),
            children: HashMap::new(),
            neighbor: None,
        }
    }
}

/// Head and tail of the same-item linked list, giving O(1) appends and
/// O(occurrences) enumeration without a full tree walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub head: usize,
    pub tail: usize,
}

/// One root-to-node path recorded for a conditioning item. `items` runs from
/// the root down to the node's parent; the conditioning item itself is not
/// included. `count`/`pos_count` are the leaf node's, i.e. the weight of the
/// sub-population that reached the end of the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixPath {
    pub items: Vec<u32>,
    pub count: usize,
    pub pos_count: usize,
}

#[derive(Debug, Clone)]
pub struct FpTree {
    pub nodes: Vec<FpNode>,
    pub routes: HashMap<u32, Route>,
    /// Distinct items in first-insertion order. This is the canonical mining
    /// order; the iteration order of `routes` is not reliable.
    pub item_order: Vec<u32>,
    /// Cleared the moment any node acquires a second child.
    pub single_path: bool,
    pub root_index: usize,
}

impl Default for FpTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FpTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![FpNode::new_root()],
            routes: HashMap::new(),
            item_order: Vec::new(),
            single_path: true,
            root_index: 0,
        }
    }

    /// Adds a transaction with the given weights, walking from the root and
    /// either incrementing an existing child in place or growing a new node.
    ///
    /// Inserting the same item sequence N times with unit weight is
    /// equivalent to one insert with `count = N`.
    pub fn insert(&mut self, items: &[u32], count: usize, pos_count: usize) {
        let mut current = self.root_index;

        for &item in items {
            if let Some(&child) = self.nodes[current].children.get(&item) {
                self.nodes[child].count += count;
                self.nodes[child].pos_count += pos_count;
                current = child;
            } else {
                let new_index = self.nodes.len();
                self.nodes
                    .push(FpNode::new_item(item, count, pos_count, current));
                self.nodes[current].children.insert(item, new_index);
                if self.nodes[current].children.len() > 1 {
                    self.single_path = false;
                }
                self.append_to_route(item, new_index);
                current = new_index;
            }
        }
    }

    fn append_to_route(&mut self, item: u32, index: usize) {
        match self.routes.get_mut(&item) {
            Some(route) => {
                let tail = route.tail;
                self.nodes[tail].neighbor = Some(index);
                route.tail = index;
            }
            None => {
                // First node for this item; start a new route.
                self.routes.insert(item, Route { head: index, tail: index });
                self.item_order.push(item);
            }
        }
    }

    /// Iterates the nodes on an item's route, without validation.
    pub fn route_nodes(&self, item: u32) -> RouteNodes<'_> {
        RouteNodes {
            tree: self,
            next: self.routes.get(&item).map(|route| route.head),
        }
    }

    /// Aggregates `(support, pos_count)` for an item over its route.
    ///
    /// An item without a route has support 0. A route node carrying a
    /// different item is an [`MineError::InvariantViolation`].
    pub fn item_stats(&self, item: u32) -> Result<(usize, usize), MineError> {
        let Some(route) = self.routes.get(&item) else {
            return Ok((0, 0));
        };

        let mut support = 0;
        let mut pos_count = 0;
        let mut next = Some(route.head);
        while let Some(index) = next {
            let node = &self.nodes[index];
            if node.item != Some(item) {
                return Err(MineError::invariant(format!(
                    "node {index} on the route for item {item} carries item {:?}",
                    node.item
                )));
            }
            support += node.count;
            pos_count += node.pos_count;
            next = node.neighbor;
        }
        Ok((support, pos_count))
    }

    /// Collects the root-to-node paths ending in the given item, one per
    /// route node, each weighted by that node's counts.
    pub fn prefix_paths(&self, item: u32) -> Result<Vec<PrefixPath>, MineError> {
        let Some(route) = self.routes.get(&item) else {
            return Ok(Vec::new());
        };

        let mut paths = Vec::new();
        let mut next = Some(route.head);
        while let Some(index) = next {
            let node = &self.nodes[index];
            if node.item != Some(item) {
                return Err(MineError::invariant(format!(
                    "node {index} on the route for item {item} carries item {:?}",
                    node.item
                )));
            }

            let mut items = Vec::new();
            let mut current = node.parent;
            while let Some(parent_index) = current {
                let parent = &self.nodes[parent_index];
                if let Some(parent_item) = parent.item {
                    items.push(parent_item);
                } else if parent_index != self.root_index {
                    return Err(MineError::invariant(format!(
                        "itemless node {parent_index} below the root on the path for item {item}"
                    )));
                }
                current = parent.parent;
            }
            items.reverse();

            paths.push(PrefixPath {
                items,
                count: node.count,
                pos_count: node.pos_count,
            });
            next = node.neighbor;
        }
        Ok(paths)
    }
}

/// Iterator over the nodes threaded on one item's route.
pub struct RouteNodes<'a> {
    tree: &'a FpTree,
    next: Option<usize>,
}

impl<'a> Iterator for RouteNodes<'a> {
    type Item = &'a FpNode;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        let node = &self.tree.nodes[index];
        self.next = node.neighbor;
        Some(node)
    }
}
