//! Decision tree construction
//!
//! Trees are stored as an arena of nodes addressed by [`NodeId`]. Children are
//! `Option<NodeId>`; an empty pool produces no node.

use super::strategy::{BestSplit, BuildStrategy, OrderSplit, SampledSplit, SplitStrategy, SumSplit};
use super::split::partition;
use crate::catalog::Catalog;
use crate::core::Direction;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;
use tracing::debug;

/// Default number of pool members scored by the sampled strategy
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// Index of a node inside a [`DecisionTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One node of the decision tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// A question that splits `pool` into two non-empty halves
    Branch {
        question: usize,
        pool: Vec<usize>,
        yes: Option<NodeId>,
        no: Option<NodeId>,
    },
    /// A pool no remaining question can split (usually one entry)
    Leaf { pool: Vec<usize> },
}

impl TreeNode {
    /// Entry indices reachable from this node, in catalog order
    #[inline]
    #[must_use]
    pub fn pool(&self) -> &[usize] {
        match self {
            Self::Branch { pool, .. } | Self::Leaf { pool } => pool,
        }
    }

    /// Question asked here, `None` for a leaf
    #[inline]
    #[must_use]
    pub const fn question(&self) -> Option<usize> {
        match self {
            Self::Branch { question, .. } => Some(*question),
            Self::Leaf { .. } => None,
        }
    }

    /// Child in `direction`, `None` for a leaf or an empty side
    #[inline]
    #[must_use]
    pub const fn child(&self, direction: Direction) -> Option<NodeId> {
        match (self, direction) {
            (Self::Branch { yes, .. }, Direction::Yes) => *yes,
            (Self::Branch { no, .. }, Direction::No) => *no,
            (Self::Leaf { .. }, _) => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }
}

/// An immutable binary decision tree over a catalog
#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
    root: Option<NodeId>,
    strategy: BuildStrategy,
}

/// Shape statistics of a built tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeStats {
    pub nodes: usize,
    pub leaves: usize,
    pub max_depth: usize,
    pub mean_depth: f64,
}

impl DecisionTree {
    #[inline]
    #[must_use]
    pub const fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// # Panics
    /// Panics if `id` does not belong to this tree
    #[inline]
    #[must_use]
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    #[must_use]
    pub const fn strategy(&self) -> BuildStrategy {
        self.strategy
    }

    /// Every leaf with its depth (root = 0), in pre-order
    #[must_use]
    pub fn leaves(&self) -> Vec<(NodeId, usize)> {
        let mut leaves = Vec::new();
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 0)).into_iter().collect();

        while let Some((id, depth)) = stack.pop() {
            match self.node(id) {
                TreeNode::Leaf { .. } => leaves.push((id, depth)),
                TreeNode::Branch { yes, no, .. } => {
                    // No first on the stack so yes is visited first
                    stack.extend(no.map(|n| (n, depth + 1)));
                    stack.extend(yes.map(|y| (y, depth + 1)));
                }
            }
        }

        leaves
    }

    /// Node count, leaf count and leaf depths
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let leaves = self.leaves();
        let max_depth = leaves.iter().map(|&(_, d)| d).max().unwrap_or(0);
        let total_depth: usize = leaves.iter().map(|&(_, d)| d).sum();
        let mean_depth = if leaves.is_empty() {
            0.0
        } else {
            total_depth as f64 / leaves.len() as f64
        };

        TreeStats {
            nodes: self.nodes.len(),
            leaves: leaves.len(),
            max_depth,
            mean_depth,
        }
    }

    /// Path of answers from the root to the leaf holding `entry`
    ///
    /// Returns the `(question, direction)` pairs a perfectly consistent player
    /// would give.
    #[must_use]
    pub fn path_to(&self, catalog: &Catalog, entry: usize) -> Vec<(usize, Direction)> {
        let mut path = Vec::new();
        let mut cursor = self.root;

        while let Some(id) = cursor {
            let TreeNode::Branch { question, .. } = self.node(id) else {
                break;
            };
            let direction = Direction::from_bit(catalog.entry(entry).answer(*question));
            path.push((*question, direction));
            cursor = self.node(id).child(direction);
        }

        path
    }
}

/// Builds decision trees over a catalog
///
/// # Examples
/// ```
/// use twenty_questions::catalog::loader::parse_catalog;
/// use twenty_questions::tree::{BuildStrategy, TreeBuilder};
///
/// let catalog = parse_catalog("A\n1 0 1\nB\n1 1 1\nC\n0 0 1\n", "thing\nQ1\nQ2\nQ3\n").unwrap();
/// let tree = TreeBuilder::new(&catalog).build(BuildStrategy::Best);
///
/// let root = tree.node(tree.root().unwrap());
/// assert_eq!(root.question(), Some(0));
/// assert_eq!(tree.stats().leaves, 3);
/// ```
pub struct TreeBuilder<'a> {
    catalog: &'a Catalog,
    sample_size: usize,
    seed: Option<u64>,
}

impl<'a> TreeBuilder<'a> {
    #[must_use]
    pub const fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: None,
        }
    }

    /// Pool members scored per node by the sampled strategy
    #[must_use]
    pub const fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Seed for the sampled strategy's random source
    #[must_use]
    pub const fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Build a tree over every entry of the catalog
    #[must_use]
    pub fn build(&self, strategy: BuildStrategy) -> DecisionTree {
        let start = Instant::now();
        let pool = self.catalog.all_indices();

        let (nodes, root) = match strategy {
            BuildStrategy::Order => self.build_with(OrderSplit, pool),
            BuildStrategy::Best => self.build_with(BestSplit, pool),
            BuildStrategy::Sampled => {
                let rng = self
                    .seed
                    .map_or_else(|| StdRng::from_rng(&mut rand::rng()), StdRng::seed_from_u64);
                self.build_with(SampledSplit::new(rng, self.sample_size), pool)
            }
            BuildStrategy::SumTracked => self.build_with(SumSplit, pool),
        };

        debug!(
            %strategy,
            nodes = nodes.len(),
            elapsed_us = start.elapsed().as_micros(),
            "decision tree built"
        );

        DecisionTree {
            nodes,
            root,
            strategy,
        }
    }

    fn build_with<S: SplitStrategy>(
        &self,
        mut strategy: S,
        pool: Vec<usize>,
    ) -> (Vec<TreeNode>, Option<NodeId>) {
        let mut nodes = Vec::new();
        let state = strategy.root_state(self.catalog, &pool);
        let root = self.build_node(&mut strategy, &mut nodes, pool, state);
        (nodes, root)
    }

    fn build_node<S: SplitStrategy>(
        &self,
        strategy: &mut S,
        nodes: &mut Vec<TreeNode>,
        pool: Vec<usize>,
        state: S::State,
    ) -> Option<NodeId> {
        if pool.is_empty() {
            return None;
        }

        let id = NodeId(nodes.len());

        let question = if pool.len() > 1 {
            strategy.select(self.catalog, &pool, &state)
        } else {
            None
        };

        let Some(question) = question else {
            nodes.push(TreeNode::Leaf { pool });
            return Some(id);
        };

        let (yes_pool, no_pool) = partition(self.catalog, &pool, question);
        let (yes_state, no_state) =
            strategy.child_states(self.catalog, question, state, &yes_pool, &no_pool);

        // Reserve the slot so ids stay in pre-order
        nodes.push(TreeNode::Branch {
            question,
            pool,
            yes: None,
            no: None,
        });

        let yes_child = self.build_node(strategy, nodes, yes_pool, yes_state);
        let no_child = self.build_node(strategy, nodes, no_pool, no_state);

        if let TreeNode::Branch { yes, no, .. } = &mut nodes[id.0] {
            *yes = yes_child;
            *no = no_child;
        }

        Some(id)
    }
}
