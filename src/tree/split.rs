//! Balanced-split question selection
//!
//! A question splits a pool well when about half of the pool answers yes.
//! All selectors here score a question by `|yes_count - pool_size / 2|` and
//! keep the first question with a strictly smaller score, so ties go to the
//! earliest question in catalog order.

use crate::catalog::Catalog;
use rand::Rng;

/// Number of pool members answering yes to `question`
#[must_use]
pub fn yes_count(catalog: &Catalog, pool: &[usize], question: usize) -> usize {
    pool.iter()
        .filter(|&&entry| catalog.entry(entry).answer(question))
        .count()
}

/// Whether `question` sends at least one pool member each way
#[must_use]
pub fn splits(catalog: &Catalog, pool: &[usize], question: usize) -> bool {
    let yes = yes_count(catalog, pool, question);
    yes > 0 && yes < pool.len()
}

/// Distance of a yes-count from a perfect half split
#[inline]
#[must_use]
pub fn imbalance(yes_count: usize, pool_size: usize) -> f64 {
    (yes_count as f64 - pool_size as f64 / 2.0).abs()
}

/// Question whose yes-count over `pool` is closest to half the pool
///
/// Scans every question; ties resolve to the lowest index.
///
/// # Examples
/// ```
/// use twenty_questions::catalog::loader::parse_catalog;
/// use twenty_questions::tree::split::select_best_question;
///
/// let catalog = parse_catalog("A\n1 0 1\nB\n1 1 1\nC\n0 0 1\n", "thing\nQ1\nQ2\nQ3\n").unwrap();
///
/// // yes-counts are 2, 1, 3; Q1 and Q2 are both 0.5 from 1.5, Q1 comes first
/// assert_eq!(select_best_question(&catalog, &[0, 1, 2]), 0);
/// ```
#[must_use]
pub fn select_best_question(catalog: &Catalog, pool: &[usize]) -> usize {
    let counts: Vec<usize> = (0..catalog.question_count())
        .map(|question| yes_count(catalog, pool, question))
        .collect();
    select_best_sum(&counts, pool.len())
}

/// Question whose precomputed yes-count is closest to half of `pool_size`
///
/// `sums[q]` must be the yes-count of question `q` over the current pool.
#[must_use]
pub fn select_best_sum(sums: &[usize], pool_size: usize) -> usize {
    let mut best_index = 0;
    let mut best_difference = f64::INFINITY;

    for (question, &count) in sums.iter().enumerate() {
        let difference = imbalance(count, pool_size);
        if difference < best_difference {
            best_index = question;
            best_difference = difference;
        }
    }

    best_index
}

/// Per-question yes-counts over `pool`
#[must_use]
pub fn question_sums(catalog: &Catalog, pool: &[usize]) -> Vec<usize> {
    let mut sums = vec![0; catalog.question_count()];
    for &entry in pool {
        for (sum, &yes) in sums.iter_mut().zip(catalog.entry(entry).answers()) {
            *sum += usize::from(yes);
        }
    }
    sums
}

/// Split `pool` by `question`, preserving pool order on both sides
///
/// Returns `(yes_pool, no_pool)`.
#[must_use]
pub fn partition(catalog: &Catalog, pool: &[usize], question: usize) -> (Vec<usize>, Vec<usize>) {
    pool.iter()
        .partition(|&&entry| catalog.entry(entry).answer(question))
}

/// Draw `size` distinct members of `pool` uniformly at random
///
/// Repeatedly removes a random member from a clone of the pool. Returns the
/// whole pool (in random order) if it has no more than `size` members.
pub fn sample_pool<R: Rng + ?Sized>(pool: &[usize], size: usize, rng: &mut R) -> Vec<usize> {
    let mut remaining = pool.to_vec();
    let mut sample = Vec::with_capacity(size.min(pool.len()));

    while sample.len() < size && !remaining.is_empty() {
        let index = rng.random_range(0..remaining.len());
        sample.push(remaining.swap_remove(index));
    }

    sample
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Entry, Question};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn setup_catalog(rows: &[&[u8]]) -> Catalog {
        let entries = rows
            .iter()
            .enumerate()
            .map(|(i, bits)| Entry::from_bits(format!("E{i}"), bits).unwrap())
            .collect();
        let questions = (0..rows[0].len())
            .map(|q| Question::new(format!("Q{q}")))
            .collect();
        Catalog::new("thing", entries, questions).unwrap()
    }

    /// Reference argmin over every question, first index on ties
    #[allow(clippy::float_cmp)]
    fn brute_force_best(catalog: &Catalog, pool: &[usize]) -> usize {
        let scores: Vec<f64> = (0..catalog.question_count())
            .map(|q| imbalance(yes_count(catalog, pool, q), pool.len()))
            .collect();
        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        scores.iter().position(|&s| s == min).unwrap()
    }

    #[test]
    fn best_question_matches_end_to_end_example() {
        let catalog = setup_catalog(&[&[1, 0, 1], &[1, 1, 1], &[0, 0, 1]]);
        assert_eq!(yes_count(&catalog, &[0, 1, 2], 0), 2);
        assert_eq!(yes_count(&catalog, &[0, 1, 2], 1), 1);
        assert_eq!(yes_count(&catalog, &[0, 1, 2], 2), 3);
        assert_eq!(select_best_question(&catalog, &[0, 1, 2]), 0);
    }

    #[test]
    fn best_question_agrees_with_brute_force() {
        // Every 4x3 matrix whose rows are the binary digits of a seed
        for seed in 0u32..4096 {
            let rows: Vec<Vec<u8>> = (0..4)
                .map(|r| (0..3).map(|c| ((seed >> (r * 3 + c)) & 1) as u8).collect())
                .collect();
            let row_refs: Vec<&[u8]> = rows.iter().map(Vec::as_slice).collect();
            let catalog = setup_catalog(&row_refs);

            for pool in [vec![0, 1, 2, 3], vec![0, 2], vec![1, 2, 3]] {
                assert_eq!(
                    select_best_question(&catalog, &pool),
                    brute_force_best(&catalog, &pool),
                    "seed {seed}, pool {pool:?}"
                );
            }
        }
    }

    #[test]
    fn best_question_prefers_first_on_ties() {
        let catalog = setup_catalog(&[&[1, 1, 0], &[0, 0, 1]]);
        // All three questions split 1/1
        assert_eq!(select_best_question(&catalog, &[0, 1]), 0);
    }

    #[test]
    fn best_sum_uses_exact_half() {
        // Pool of 5: half is 2.5, so 2 and 3 tie and the first wins
        assert_eq!(select_best_sum(&[5, 3, 2, 0], 5), 1);
        assert_eq!(select_best_sum(&[5, 2, 3, 0], 5), 1);
        assert_eq!(select_best_sum(&[0, 5, 4], 5), 2);
    }

    #[test]
    fn question_sums_counts_yes_answers() {
        let catalog = setup_catalog(&[&[1, 0, 1], &[1, 1, 1], &[0, 0, 1]]);
        assert_eq!(question_sums(&catalog, &[0, 1, 2]), vec![2, 1, 3]);
        assert_eq!(question_sums(&catalog, &[2]), vec![0, 0, 1]);
        assert_eq!(question_sums(&catalog, &[]), vec![0, 0, 0]);
    }

    #[test]
    fn partition_preserves_order() {
        let catalog = setup_catalog(&[&[1, 0], &[0, 1], &[1, 1], &[0, 0]]);
        let (yes, no) = partition(&catalog, &[3, 2, 1, 0], 0);
        assert_eq!(yes, vec![2, 0]);
        assert_eq!(no, vec![3, 1]);
    }

    #[test]
    fn splits_detects_uniform_answers() {
        let catalog = setup_catalog(&[&[1, 0], &[1, 1]]);
        assert!(!splits(&catalog, &[0, 1], 0));
        assert!(splits(&catalog, &[0, 1], 1));
        assert!(!splits(&catalog, &[1], 1));
    }

    #[test]
    fn sample_pool_draws_distinct_members() {
        let pool: Vec<usize> = (100..130).collect();
        let mut rng = StdRng::seed_from_u64(7);

        let sample = sample_pool(&pool, 10, &mut rng);
        assert_eq!(sample.len(), 10);

        let mut sorted = sample.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 10);
        assert!(sample.iter().all(|e| pool.contains(e)));
    }

    #[test]
    fn sample_pool_small_pool_returns_everything() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sample = sample_pool(&[4, 5, 6], 10, &mut rng);
        sample.sort_unstable();
        assert_eq!(sample, vec![4, 5, 6]);
    }
}
