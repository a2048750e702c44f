//! Tree building strategies
//!
//! Defines the `SplitStrategy` trait and the four concrete splitting rules.

use super::split::{question_sums, sample_pool, select_best_question, select_best_sum, splits};
use crate::catalog::Catalog;
use rand::Rng;
use std::fmt;
use thiserror::Error;

/// A rule for choosing the question that splits a pool
///
/// Strategies may carry per-node state down the recursion (the next question
/// index, running yes-counts, ...).
pub trait SplitStrategy {
    /// State attached to every pool during the build
    type State;

    /// State for the full entry pool at the root
    fn root_state(&self, catalog: &Catalog, pool: &[usize]) -> Self::State;

    /// Question to split `pool` (size ≥ 2) by
    ///
    /// Returns `None` when the pool cannot be split any further; the builder
    /// then emits a leaf holding the whole pool.
    fn select(&mut self, catalog: &Catalog, pool: &[usize], state: &Self::State)
    -> Option<usize>;

    /// States for the yes and no halves after splitting by `question`
    fn child_states(
        &self,
        catalog: &Catalog,
        question: usize,
        state: Self::State,
        yes_pool: &[usize],
        no_pool: &[usize],
    ) -> (Self::State, Self::State);
}

/// Selector for the four tree building strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildStrategy {
    /// Questions in catalog order, one per depth level
    Order,
    /// Exhaustive balanced split over the whole pool
    Best,
    /// Balanced split estimated from a random sample of the pool
    Sampled,
    /// Balanced split from incrementally maintained yes-counts
    SumTracked,
}

/// Error for an unrecognised strategy token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("strategy '{0}' not supported (expected order, best, sample, sums or a version like 1.0)")]
pub struct UnsupportedStrategy(pub String);

impl BuildStrategy {
    /// Every strategy, in version order
    pub const ALL: [Self; 4] = [Self::Order, Self::Best, Self::Sampled, Self::SumTracked];

    /// Parse a strategy name or legacy version token
    ///
    /// Supported names: "order", "best", "sample"/"sampled", "sums"/"sum-tracked".
    /// Supported versions (with optional `-v`/`v` prefix): 0.0, 1.0, 1.1, 1.5,
    /// 2.0 (best) and 3.0 (sampled).
    ///
    /// # Errors
    /// Returns `UnsupportedStrategy` for anything else.
    ///
    /// # Examples
    /// ```
    /// use twenty_questions::tree::BuildStrategy;
    ///
    /// assert_eq!(BuildStrategy::from_token("best").unwrap(), BuildStrategy::Best);
    /// assert_eq!(BuildStrategy::from_token("-v1.5").unwrap(), BuildStrategy::SumTracked);
    /// assert!(BuildStrategy::from_token("9.9").is_err());
    /// ```
    pub fn from_token(token: &str) -> Result<Self, UnsupportedStrategy> {
        let normalized = token.trim().to_lowercase();
        let bare = strip_version_prefix(&normalized);

        match bare {
            "order" | "0.0" => Ok(Self::Order),
            "best" | "1.0" | "2.0" => Ok(Self::Best),
            "sample" | "sampled" | "1.1" | "3.0" => Ok(Self::Sampled),
            "sums" | "sum-tracked" | "1.5" => Ok(Self::SumTracked),
            _ => Err(UnsupportedStrategy(token.to_string())),
        }
    }

    /// Canonical CLI name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Best => "best",
            Self::Sampled => "sample",
            Self::SumTracked => "sums",
        }
    }
}

impl fmt::Display for BuildStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strip a leading `-v` or `v` from a version token
pub(crate) fn strip_version_prefix(token: &str) -> &str {
    token
        .strip_prefix("-v")
        .or_else(|| token.strip_prefix('v'))
        .unwrap_or(token)
}

/// Questions strictly in catalog order
///
/// State is the index of the first question still allowed at this depth.
/// Questions that would leave the whole pool on one side are passed over, so
/// every edge shrinks the pool; once the questions run out the pool becomes a
/// leaf.
pub struct OrderSplit;

impl SplitStrategy for OrderSplit {
    type State = usize;

    fn root_state(&self, _catalog: &Catalog, _pool: &[usize]) -> usize {
        0
    }

    fn select(&mut self, catalog: &Catalog, pool: &[usize], next: &usize) -> Option<usize> {
        (*next..catalog.question_count()).find(|&question| splits(catalog, pool, question))
    }

    fn child_states(
        &self,
        _catalog: &Catalog,
        question: usize,
        _state: usize,
        _yes_pool: &[usize],
        _no_pool: &[usize],
    ) -> (usize, usize) {
        (question + 1, question + 1)
    }
}

/// Exhaustive balanced split
pub struct BestSplit;

impl SplitStrategy for BestSplit {
    type State = ();

    fn root_state(&self, _catalog: &Catalog, _pool: &[usize]) {}

    fn select(&mut self, catalog: &Catalog, pool: &[usize], _state: &()) -> Option<usize> {
        let question = select_best_question(catalog, pool);
        splits(catalog, pool, question).then_some(question)
    }

    fn child_states(
        &self,
        _catalog: &Catalog,
        _question: usize,
        _state: (),
        _yes_pool: &[usize],
        _no_pool: &[usize],
    ) -> ((), ()) {
        ((), ())
    }
}

/// Balanced split scored on a random sample of the pool
///
/// Pools smaller than `sample_size` are scored exhaustively. If the sampled
/// winner happens not to split the full pool, the node falls back to the
/// exhaustive choice so the build always terminates.
pub struct SampledSplit<R> {
    rng: R,
    sample_size: usize,
}

impl<R: Rng> SampledSplit<R> {
    pub const fn new(rng: R, sample_size: usize) -> Self {
        Self { rng, sample_size }
    }
}

impl<R: Rng> SplitStrategy for SampledSplit<R> {
    type State = ();

    fn root_state(&self, _catalog: &Catalog, _pool: &[usize]) {}

    fn select(&mut self, catalog: &Catalog, pool: &[usize], _state: &()) -> Option<usize> {
        if pool.len() >= self.sample_size {
            let sample = sample_pool(pool, self.sample_size, &mut self.rng);
            let question = select_best_question(catalog, &sample);
            if splits(catalog, pool, question) {
                return Some(question);
            }
        }
        BestSplit.select(catalog, pool, &())
    }

    fn child_states(
        &self,
        _catalog: &Catalog,
        _question: usize,
        _state: (),
        _yes_pool: &[usize],
        _no_pool: &[usize],
    ) -> ((), ()) {
        ((), ())
    }
}

/// Balanced split from running yes-counts
///
/// The root's per-question yes-counts are computed once. Each child's counts
/// are derived from the parent's: the smaller half is rescanned and the larger
/// half gets the parent counts minus the smaller half's contribution.
pub struct SumSplit;

impl SplitStrategy for SumSplit {
    type State = Vec<usize>;

    fn root_state(&self, catalog: &Catalog, pool: &[usize]) -> Vec<usize> {
        question_sums(catalog, pool)
    }

    fn select(&mut self, _catalog: &Catalog, pool: &[usize], sums: &Vec<usize>) -> Option<usize> {
        let question = select_best_sum(sums, pool.len());
        let yes = sums[question];
        (yes > 0 && yes < pool.len()).then_some(question)
    }

    fn child_states(
        &self,
        catalog: &Catalog,
        _question: usize,
        mut sums: Vec<usize>,
        yes_pool: &[usize],
        no_pool: &[usize],
    ) -> (Vec<usize>, Vec<usize>) {
        let yes_is_smaller = yes_pool.len() <= no_pool.len();
        let smaller = if yes_is_smaller { yes_pool } else { no_pool };

        let smaller_sums = question_sums(catalog, smaller);
        for (sum, departed) in sums.iter_mut().zip(&smaller_sums) {
            *sum -= departed;
        }

        if yes_is_smaller {
            (smaller_sums, sums)
        } else {
            (sums, smaller_sums)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Entry, Question};
    use crate::tree::DEFAULT_SAMPLE_SIZE;
    use crate::tree::split::partition;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn setup_catalog() -> Catalog {
        let entries = vec![
            Entry::from_bits("A", &[1, 0, 1]).unwrap(),
            Entry::from_bits("B", &[1, 1, 1]).unwrap(),
            Entry::from_bits("C", &[0, 0, 1]).unwrap(),
        ];
        let questions = vec![Question::new("Q1"), Question::new("Q2"), Question::new("Q3")];
        Catalog::new("thing", entries, questions).unwrap()
    }

    /// Twenty entries where both questions split the full pool evenly, so the
    /// full pool prefers Q1 but a random half of it often prefers Q2
    fn setup_even_catalog() -> Catalog {
        let entries = (0..20)
            .map(|i| {
                let first = u8::from(i < 10);
                let second = u8::from(i < 5 || (10..15).contains(&i));
                Entry::from_bits(format!("E{i}"), &[first, second]).unwrap()
            })
            .collect();
        let questions = vec![Question::new("Q1"), Question::new("Q2")];
        Catalog::new("thing", entries, questions).unwrap()
    }

    #[test]
    fn from_token_accepts_names() {
        assert_eq!(BuildStrategy::from_token("order"), Ok(BuildStrategy::Order));
        assert_eq!(BuildStrategy::from_token("BEST"), Ok(BuildStrategy::Best));
        assert_eq!(BuildStrategy::from_token("sampled"), Ok(BuildStrategy::Sampled));
        assert_eq!(BuildStrategy::from_token("sum-tracked"), Ok(BuildStrategy::SumTracked));
    }

    #[test]
    fn from_token_accepts_versions() {
        assert_eq!(BuildStrategy::from_token("-v0.0"), Ok(BuildStrategy::Order));
        assert_eq!(BuildStrategy::from_token("v1.0"), Ok(BuildStrategy::Best));
        assert_eq!(BuildStrategy::from_token("1.1"), Ok(BuildStrategy::Sampled));
        assert_eq!(BuildStrategy::from_token("1.5"), Ok(BuildStrategy::SumTracked));
        assert_eq!(BuildStrategy::from_token("-v2.0"), Ok(BuildStrategy::Best));
        assert_eq!(BuildStrategy::from_token("-v3.0"), Ok(BuildStrategy::Sampled));
    }

    #[test]
    fn from_token_rejects_unknown() {
        assert_eq!(
            BuildStrategy::from_token("-v9.0"),
            Err(UnsupportedStrategy("-v9.0".to_string()))
        );
        assert!(BuildStrategy::from_token("").is_err());
        assert!(BuildStrategy::from_token("1").is_err());
    }

    #[test]
    fn name_round_trips() {
        for strategy in BuildStrategy::ALL {
            assert_eq!(BuildStrategy::from_token(strategy.name()), Ok(strategy));
        }
    }

    #[test]
    fn order_split_walks_questions_then_stops() {
        let catalog = setup_catalog();
        let mut order = OrderSplit;
        assert_eq!(order.select(&catalog, &[0, 1, 2], &0), Some(0));
        // Q1 does not separate A from B, Q2 does
        assert_eq!(order.select(&catalog, &[0, 1], &0), Some(1));
        assert_eq!(order.select(&catalog, &[0, 1], &2), None);
        assert_eq!(order.select(&catalog, &[0, 1], &3), None);
        assert_eq!(order.child_states(&catalog, 1, 1, &[0], &[1]), (2, 2));
    }

    #[test]
    fn best_split_refuses_non_splitting_pool() {
        let catalog = setup_catalog();
        let mut best = BestSplit;
        assert_eq!(best.select(&catalog, &[0, 1, 2], &()), Some(0));
        // A and B only differ on Q2
        assert_eq!(best.select(&catalog, &[0, 1], &()), Some(1));
    }

    #[test]
    fn sampled_split_small_pool_matches_best() {
        let catalog = setup_catalog();
        let mut sampled = SampledSplit::new(StdRng::seed_from_u64(3), 10);
        assert_eq!(sampled.select(&catalog, &[0, 1, 2], &()), Some(0));
    }

    #[test]
    fn sampled_split_below_default_size_is_exhaustive() {
        let catalog = setup_even_catalog();
        let pool: Vec<usize> = (0..DEFAULT_SAMPLE_SIZE - 1).collect();
        let expected = select_best_question(&catalog, &pool);
        assert_eq!(expected, 1);

        for seed in 0..20 {
            let mut sampled = SampledSplit::new(StdRng::seed_from_u64(seed), DEFAULT_SAMPLE_SIZE);
            assert_eq!(sampled.select(&catalog, &pool, &()), Some(expected), "seed {seed}");
        }
    }

    #[test]
    fn sampled_split_uses_best_question_of_the_sample() {
        let catalog = setup_even_catalog();
        let pool: Vec<usize> = (0..catalog.entry_count()).collect();
        assert_eq!(select_best_question(&catalog, &pool), 0);

        let mut differs = 0;
        for seed in 0..200 {
            let sample = sample_pool(&pool, DEFAULT_SAMPLE_SIZE, &mut StdRng::seed_from_u64(seed));
            let expected = select_best_question(&catalog, &sample);

            let mut sampled = SampledSplit::new(StdRng::seed_from_u64(seed), DEFAULT_SAMPLE_SIZE);
            assert_eq!(sampled.select(&catalog, &pool, &()), Some(expected), "seed {seed}");

            if expected != 0 {
                differs += 1;
            }
        }
        assert!(differs > 0);
    }

    #[test]
    fn sum_split_child_counts_match_rescan() {
        let catalog = setup_catalog();
        let pool = [0, 1, 2];
        let mut sums = SumSplit;

        let state = sums.root_state(&catalog, &pool);
        assert_eq!(state, vec![2, 1, 3]);

        let question = sums.select(&catalog, &pool, &state).unwrap();
        assert_eq!(question, 0);

        let (yes_pool, no_pool) = partition(&catalog, &pool, question);
        let (yes_sums, no_sums) = sums.child_states(&catalog, question, state, &yes_pool, &no_pool);

        assert_eq!(yes_sums, question_sums(&catalog, &yes_pool));
        assert_eq!(no_sums, question_sums(&catalog, &no_pool));
    }
}
