//! Tree inspection command
//!
//! Builds the decision tree with every strategy and reports its shape.

use crate::catalog::Catalog;
use crate::tree::{BuildStrategy, DecisionTree, TreeBuilder, TreeStats};
use std::time::{Duration, Instant};

/// Shape of one strategy's tree
pub struct StrategyReport {
    pub strategy: BuildStrategy,
    pub stats: TreeStats,
    pub root_question: Option<String>,
    pub build_time: Duration,
    /// Entries sitting deepest in the tree, with their depth
    pub deepest: Vec<(String, usize)>,
}

/// Result of inspecting a catalog
pub struct InspectResult {
    pub prompt: String,
    pub entries: usize,
    pub questions: usize,
    /// Names of entries no question can tell apart
    pub duplicates: Vec<Vec<String>>,
    pub reports: Vec<StrategyReport>,
}

/// Build a tree with each strategy and collect its statistics
#[must_use]
pub fn inspect_catalog(catalog: &Catalog, sample_size: usize, seed: Option<u64>) -> InspectResult {
    let builder = TreeBuilder::new(catalog)
        .with_sample_size(sample_size)
        .with_seed(seed);

    let reports = BuildStrategy::ALL
        .iter()
        .map(|&strategy| {
            let start = Instant::now();
            let tree = builder.build(strategy);
            let build_time = start.elapsed();
            report(catalog, &tree, build_time)
        })
        .collect();

    let duplicates = catalog
        .duplicate_groups()
        .into_iter()
        .map(|group| {
            group
                .into_iter()
                .map(|i| catalog.entry(i).name().to_string())
                .collect()
        })
        .collect();

    InspectResult {
        prompt: catalog.prompt().to_string(),
        entries: catalog.entry_count(),
        questions: catalog.question_count(),
        duplicates,
        reports,
    }
}

fn report(catalog: &Catalog, tree: &DecisionTree, build_time: Duration) -> StrategyReport {
    let root_question = tree
        .root()
        .and_then(|root| tree.node(root).question())
        .map(|q| catalog.question(q).text().to_string());

    let mut deepest: Vec<(String, usize)> = tree
        .leaves()
        .into_iter()
        .flat_map(|(id, depth)| {
            tree.node(id)
                .pool()
                .iter()
                .map(move |&e| (catalog.entry(e).name().to_string(), depth))
        })
        .collect();
    deepest.sort_by_key(|(_, depth)| std::cmp::Reverse(*depth));
    deepest.truncate(3);

    StrategyReport {
        strategy: tree.strategy(),
        stats: tree.stats(),
        root_question,
        build_time,
        deepest,
    }
}
