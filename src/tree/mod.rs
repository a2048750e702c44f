//! Decision tree engine
//!
//! Builds a binary tree of questions over a catalog and walks it in response
//! to graded answers.

mod builder;
mod navigator;
pub mod split;
mod strategy;
mod truths;

pub use builder::{DEFAULT_SAMPLE_SIZE, DecisionTree, NodeId, TreeBuilder, TreeNode, TreeStats};
pub use navigator::{Deferral, Navigator, NavigatorState};
pub use strategy::{
    BestSplit, BuildStrategy, OrderSplit, SampledSplit, SplitStrategy, SumSplit,
    UnsupportedStrategy,
};
pub use truths::SessionTruths;

pub(crate) use strategy::strip_version_prefix;
