//! Automated player for simulations and benchmarks

use super::config::GameMode;
use super::session::Respondent;
use crate::catalog::Catalog;
use crate::core::Answer;
use rand::Rng;
use rustc_hash::FxHashSet;

/// Answers from a known target entry's vector
///
/// Questions listed as mistakes get the wrong direction: hedged in graded
/// modes ("probably" / "probably not"), flat yes/no otherwise. Questions
/// listed as unknown are answered "unknown" in graded modes and truthfully
/// otherwise.
///
/// # Examples
/// ```
/// use twenty_questions::catalog::Catalog;
/// use twenty_questions::game::{GameConfig, GameSession, SimulatedPlayer, run_session};
///
/// let catalog = Catalog::embedded().unwrap();
/// let config = GameConfig::default();
/// let tree = config.build_tree(&catalog);
///
/// let target = catalog.find_entry("Dog").unwrap();
/// let mut player = SimulatedPlayer::new(&catalog, target, config.mode);
/// let mut session = GameSession::new(&catalog, &tree, config);
///
/// let outcome = run_session(&mut session, &mut player).unwrap();
/// assert!(outcome.won);
/// assert_eq!(outcome.name.as_deref(), Some("Dog"));
/// ```
pub struct SimulatedPlayer<'a> {
    catalog: &'a Catalog,
    target: usize,
    graded: bool,
    mistakes: FxHashSet<usize>,
    unknowns: FxHashSet<usize>,
}

impl<'a> SimulatedPlayer<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog, target: usize, mode: GameMode) -> Self {
        Self {
            catalog,
            target,
            graded: mode.accepts_graded(),
            mistakes: FxHashSet::default(),
            unknowns: FxHashSet::default(),
        }
    }

    /// Answer these questions the wrong way
    #[must_use]
    pub fn with_mistakes(mut self, questions: impl IntoIterator<Item = usize>) -> Self {
        self.mistakes.extend(questions);
        self
    }

    /// Answer these questions with "unknown"
    #[must_use]
    pub fn with_unknowns(mut self, questions: impl IntoIterator<Item = usize>) -> Self {
        self.unknowns.extend(questions);
        self
    }

    /// Get each question wrong independently with probability `rate`
    #[must_use]
    pub fn with_noise<R: Rng + ?Sized>(self, rate: f64, rng: &mut R) -> Self {
        let count = self.catalog.question_count();
        let rate = rate.clamp(0.0, 1.0);
        let mistakes: Vec<usize> = (0..count).filter(|_| rng.random_bool(rate)).collect();
        self.with_mistakes(mistakes)
    }

    #[inline]
    #[must_use]
    pub const fn target(&self) -> usize {
        self.target
    }
}

impl Respondent for SimulatedPlayer<'_> {
    fn answer(&mut self, question: usize, _text: &str) -> Answer {
        let truth = self.catalog.entry(self.target).answer(question);

        if self.unknowns.contains(&question) && self.graded {
            Answer::Unknown
        } else if self.mistakes.contains(&question) {
            match (self.graded, truth) {
                (true, true) => Answer::ProbablyNot,
                (true, false) => Answer::Probably,
                (false, _) => Answer::from(!truth),
            }
        } else {
            Answer::from(truth)
        }
    }

    fn confirm(&mut self, entry: usize, _name: &str) -> bool {
        entry == self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameSession, GuessSource, Turn, run_session};
    use crate::tree::BuildStrategy;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn setup_catalog() -> Catalog {
        Catalog::embedded().unwrap()
    }

    #[test]
    fn truthful_player_answers_from_vector() {
        let catalog = setup_catalog();
        let target = catalog.find_entry("Eagle").unwrap();
        let mut player = SimulatedPlayer::new(&catalog, target, GameMode::Graded);

        for question in 0..catalog.question_count() {
            let expected = Answer::from(catalog.entry(target).answer(question));
            assert_eq!(player.answer(question, ""), expected);
        }
        assert!(player.confirm(target, "Eagle"));
        assert!(!player.confirm(target + 1, "Other"));
    }

    #[test]
    fn mistakes_are_hedged_only_in_graded_modes() {
        let catalog = setup_catalog();
        let target = catalog.find_entry("Dog").unwrap();
        // Dog is a mammal (question 0)
        let mut graded =
            SimulatedPlayer::new(&catalog, target, GameMode::Graded).with_mistakes([0]);
        let mut strict =
            SimulatedPlayer::new(&catalog, target, GameMode::Strict).with_mistakes([0]);

        assert_eq!(graded.answer(0, ""), Answer::ProbablyNot);
        assert_eq!(strict.answer(0, ""), Answer::No);
    }

    #[test]
    fn unknowns_only_in_graded_modes() {
        let catalog = setup_catalog();
        let target = catalog.find_entry("Dog").unwrap();
        let mut graded =
            SimulatedPlayer::new(&catalog, target, GameMode::Hybrid).with_unknowns([0]);
        let mut strict =
            SimulatedPlayer::new(&catalog, target, GameMode::Neighbors).with_unknowns([0]);

        assert_eq!(graded.answer(0, ""), Answer::Unknown);
        assert_eq!(strict.answer(0, ""), Answer::Yes);
    }

    #[test]
    fn graded_game_recovers_from_one_hedged_mistake() {
        let catalog = setup_catalog();
        let config = GameConfig::default();
        let tree = config.build_tree(&catalog);

        for target in 0..catalog.entry_count() {
            let root_question = tree.node(tree.root().unwrap()).question().unwrap();
            let mut player =
                SimulatedPlayer::new(&catalog, target, config.mode).with_mistakes([root_question]);
            let mut session = GameSession::new(&catalog, &tree, config);

            let outcome = run_session(&mut session, &mut player).unwrap();
            assert!(outcome.won, "lost {}", catalog.entry(target).name());
            assert!(outcome.backtracks >= 1);
        }
    }

    #[test]
    fn strict_game_loses_after_a_mistake() {
        let catalog = setup_catalog();
        let config = GameConfig::default().with_strategy(BuildStrategy::Best);
        let config = GameConfig {
            mode: GameMode::Strict,
            ..config
        };
        let tree = config.build_tree(&catalog);
        let root_question = tree.node(tree.root().unwrap()).question().unwrap();

        let mut player =
            SimulatedPlayer::new(&catalog, 0, config.mode).with_mistakes([root_question]);
        let mut session = GameSession::new(&catalog, &tree, config);
        let outcome = run_session(&mut session, &mut player).unwrap();

        assert!(!outcome.won);
        let guesses = outcome
            .turns
            .iter()
            .filter(|t| matches!(t, Turn::Guess { source: GuessSource::Tree, .. }))
            .count();
        assert_eq!(guesses, 1);
    }

    #[test]
    fn noise_is_reproducible() {
        let catalog = setup_catalog();
        let mut first_rng = StdRng::seed_from_u64(11);
        let mut second_rng = StdRng::seed_from_u64(11);

        let first =
            SimulatedPlayer::new(&catalog, 0, GameMode::Graded).with_noise(0.3, &mut first_rng);
        let second =
            SimulatedPlayer::new(&catalog, 0, GameMode::Graded).with_noise(0.3, &mut second_rng);
        assert_eq!(first.mistakes, second.mistakes);

        let none =
            SimulatedPlayer::new(&catalog, 0, GameMode::Graded).with_noise(0.0, &mut first_rng);
        assert!(none.mistakes.is_empty());
    }
}
