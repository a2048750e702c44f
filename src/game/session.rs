//! Step-driven game session
//!
//! A [`GameSession`] asks for one reply at a time: call
//! [`prompt`](GameSession::prompt) to see what it wants, then
//! [`respond`](GameSession::respond) with the player's reply. The console
//! loop, the TUI and the simulator all drive the same state machine.

use super::config::{GameConfig, GameMode};
use crate::catalog::Catalog;
use crate::core::Answer;
use crate::neighbors::HammingIndex;
use crate::tree::{DecisionTree, Navigator, NavigatorState};
use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::{debug, trace};

/// Where a guess came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuessSource {
    /// A candidate at the decision tree cursor
    Tree,
    /// A Hamming neighbour of a rejected guess
    Neighbor,
}

/// One spent turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Question {
        question: usize,
        answer: Answer,
    },
    Guess {
        entry: usize,
        correct: bool,
        source: GuessSource,
    },
}

/// Result of a finished game
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameOutcome {
    pub won: bool,
    /// Entry guessed correctly, if any
    pub entry: Option<usize>,
    pub name: Option<String>,
    pub turns: Vec<Turn>,
    pub backtracks: usize,
}

impl GameOutcome {
    #[must_use]
    pub fn questions_asked(&self) -> usize {
        self.turns
            .iter()
            .filter(|t| matches!(t, Turn::Question { .. }))
            .count()
    }

    #[must_use]
    pub fn guesses_made(&self) -> usize {
        self.turns.len() - self.questions_asked()
    }
}

/// What the session is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt<'s> {
    Question {
        /// 1-based turn number
        turn: usize,
        question: usize,
        text: &'s str,
    },
    Guess {
        turn: usize,
        entry: usize,
        name: &'s str,
        source: GuessSource,
    },
    Finished(&'s GameOutcome),
}

/// A player's reply to a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Answer(Answer),
    Confirm(bool),
}

/// Replies the session cannot accept
///
/// A rejected reply does not spend a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("the game is already over")]
    Finished,

    #[error("expected an answer to the question")]
    ExpectedAnswer,

    #[error("expected a yes/no confirmation of the guess")]
    ExpectedConfirmation,

    #[error("'{0}' is not allowed in {1} mode, answer yes or no")]
    GradedNotAllowed(Answer, GameMode),
}

#[derive(Debug)]
enum Phase {
    Asking(usize),
    /// `rest` holds the remaining pool members, next one last
    TreeGuess {
        current: usize,
        rest: Vec<usize>,
    },
    NeighborGuess(usize),
    Finished(GameOutcome),
}

/// Where to resume after a reply has been applied
#[derive(Debug, Clone, Copy)]
enum Step {
    Descend,
    PathFailed,
}

/// One game against a fixed decision tree
pub struct GameSession<'a> {
    catalog: &'a Catalog,
    config: GameConfig,
    navigator: Navigator<'a>,
    neighbors: Option<HammingIndex<'a>>,
    phase: Phase,
    turns: Vec<Turn>,
    rejected: FxHashSet<usize>,
    last_rejected: Option<usize>,
    backtracks: usize,
}

impl<'a> GameSession<'a> {
    /// Start a game on `tree`, which must have been built over `catalog`
    #[must_use]
    pub fn new(catalog: &'a Catalog, tree: &'a DecisionTree, config: GameConfig) -> Self {
        let neighbors = config
            .mode
            .uses_neighbors()
            .then(|| HammingIndex::new(catalog));

        let mut session = Self {
            catalog,
            config,
            navigator: Navigator::new(tree, catalog),
            neighbors,
            // replaced by the first settle below
            phase: Phase::Finished(GameOutcome::default()),
            turns: Vec::new(),
            rejected: FxHashSet::default(),
            last_rejected: None,
            backtracks: 0,
        };
        session.settle(Step::Descend);
        session
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub const fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Live view of the decision tree cursor
    #[inline]
    #[must_use]
    pub const fn navigator(&self) -> &Navigator<'a> {
        &self.navigator
    }

    #[inline]
    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    #[inline]
    #[must_use]
    pub fn turns_used(&self) -> usize {
        self.turns.len()
    }

    #[inline]
    #[must_use]
    pub fn turns_left(&self) -> usize {
        self.config.max_turns.saturating_sub(self.turns.len())
    }

    #[inline]
    #[must_use]
    pub const fn backtracks(&self) -> usize {
        self.backtracks
    }

    #[inline]
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    #[must_use]
    pub const fn outcome(&self) -> Option<&GameOutcome> {
        match &self.phase {
            Phase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// What the session needs next
    #[must_use]
    pub fn prompt(&self) -> Prompt<'_> {
        let turn = self.turns.len() + 1;

        match &self.phase {
            Phase::Finished(outcome) => Prompt::Finished(outcome),
            Phase::Asking(question) => Prompt::Question {
                turn,
                question: *question,
                text: self.catalog.question(*question).text(),
            },
            Phase::TreeGuess { current, .. } => {
                self.guess_prompt(turn, *current, GuessSource::Tree)
            }
            Phase::NeighborGuess(entry) => self.guess_prompt(turn, *entry, GuessSource::Neighbor),
        }
    }

    fn guess_prompt(&self, turn: usize, entry: usize, source: GuessSource) -> Prompt<'_> {
        Prompt::Guess {
            turn,
            entry,
            name: self.catalog.entry(entry).name(),
            source,
        }
    }

    /// Apply a reply to the current prompt
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the reply does not fit the prompt: a
    /// confirmation for a question, an answer for a guess, a hedged answer in
    /// a yes/no mode, or anything once the game is over.
    pub fn respond(&mut self, reply: Reply) -> Result<(), SessionError> {
        let mode = self.config.mode;

        match (&mut self.phase, reply) {
            (Phase::Finished(_), _) => return Err(SessionError::Finished),
            (Phase::Asking(_), Reply::Confirm(_)) => return Err(SessionError::ExpectedAnswer),
            (Phase::TreeGuess { .. } | Phase::NeighborGuess(_), Reply::Answer(_)) => {
                return Err(SessionError::ExpectedConfirmation);
            }
            (Phase::Asking(_), Reply::Answer(answer))
                if !mode.accepts_graded() && !answer.is_definite() =>
            {
                return Err(SessionError::GradedNotAllowed(answer, mode));
            }
            (Phase::Asking(question), Reply::Answer(answer)) => {
                let question = *question;
                self.answer_question(question, answer);
                self.settle(Step::Descend);
            }
            (Phase::TreeGuess { current, rest }, Reply::Confirm(correct)) => {
                let entry = *current;
                let next = if correct { None } else { rest.pop() };
                if let Some(next) = next {
                    *current = next;
                }

                self.record_guess(entry, correct, GuessSource::Tree);
                if !correct && next.is_none() {
                    self.settle(Step::PathFailed);
                }
            }
            (Phase::NeighborGuess(entry), Reply::Confirm(correct)) => {
                let entry = *entry;
                self.record_guess(entry, correct, GuessSource::Neighbor);
                if !correct {
                    self.next_neighbor();
                }
            }
        }

        if !self.is_finished() && self.turns_left() == 0 {
            self.finish(None);
        }
        Ok(())
    }

    fn answer_question(&mut self, question: usize, answer: Answer) {
        self.turns.push(Turn::Question { question, answer });

        if self.config.mode.accepts_graded() {
            self.navigator.advance_graded(answer);
        } else {
            self.navigator.advance(answer.direction());
        }

        trace!(question, %answer, pool = self.navigator.pool_size(), "question answered");
    }

    fn record_guess(&mut self, entry: usize, correct: bool, source: GuessSource) {
        self.turns.push(Turn::Guess {
            entry,
            correct,
            source,
        });

        if correct {
            self.finish(Some(entry));
        } else {
            trace!(entry, ?source, "guess rejected");
            self.rejected.insert(entry);
            self.last_rejected = Some(entry);
        }
    }

    /// Move on from `step` to a phase that can be prompted, or finish
    fn settle(&mut self, mut step: Step) {
        loop {
            if self.turns_left() == 0 {
                self.finish(None);
                return;
            }

            step = match step {
                Step::Descend => match self.tree_phase() {
                    Some(phase) => {
                        self.phase = phase;
                        return;
                    }
                    None => Step::PathFailed,
                },
                Step::PathFailed => match self.config.mode {
                    GameMode::Strict => {
                        self.finish(None);
                        return;
                    }
                    GameMode::Neighbors => {
                        self.start_neighbors();
                        return;
                    }
                    GameMode::Graded | GameMode::Hybrid => {
                        if self.navigator.backtrack() {
                            self.backtracks += 1;
                            Step::Descend
                        } else {
                            if self.config.mode == GameMode::Hybrid {
                                self.start_neighbors();
                            } else {
                                self.finish(None);
                            }
                            return;
                        }
                    }
                },
            };
        }
    }

    /// Question or guess at the cursor, `None` if nothing is left to guess
    ///
    /// A question is only asked while a turn remains for the guess after it.
    fn tree_phase(&self) -> Option<Phase> {
        if let Some(question) = self.navigator.current_question_index()
            && self.navigator.state() == NavigatorState::Active
            && self.turns_left() >= 2
        {
            return Some(Phase::Asking(question));
        }

        let mut rest: Vec<usize> = self
            .navigator
            .candidates()
            .iter()
            .rev()
            .copied()
            .filter(|e| !self.rejected.contains(e))
            .collect();

        rest.pop().map(|current| Phase::TreeGuess { current, rest })
    }

    fn start_neighbors(&mut self) {
        let Some(origin) = self.last_rejected else {
            self.finish(None);
            return;
        };

        if let Some(index) = self.neighbors.as_mut() {
            let found = index.find_neighbors_of_entry(origin);
            debug!(origin, found, "guessing neighbours");
        }
        self.next_neighbor();
    }

    fn next_neighbor(&mut self) {
        let rejected = &self.rejected;
        let next = self.neighbors.as_mut().and_then(|index| {
            std::iter::from_fn(|| index.next_neighbor()).find(|e| !rejected.contains(e))
        });

        match next {
            Some(entry) => self.phase = Phase::NeighborGuess(entry),
            None => self.finish(None),
        }
    }

    fn finish(&mut self, entry: Option<usize>) {
        let outcome = GameOutcome {
            won: entry.is_some(),
            entry,
            name: entry.map(|e| self.catalog.entry(e).name().to_string()),
            turns: self.turns.clone(),
            backtracks: self.backtracks,
        };

        debug!(
            won = outcome.won,
            turns = outcome.turns.len(),
            backtracks = outcome.backtracks,
            "game finished"
        );

        self.phase = Phase::Finished(outcome);
    }
}

/// Anything that can play the player's side of a game
pub trait Respondent {
    /// Answer question `question`
    fn answer(&mut self, question: usize, text: &str) -> Answer;

    /// Whether `entry` is what the player was thinking of
    fn confirm(&mut self, entry: usize, name: &str) -> bool;
}

/// Play `session` to the end with `respondent`
///
/// # Errors
///
/// Returns `SessionError` if the respondent gives a reply the session's mode
/// does not accept.
pub fn run_session<R: Respondent + ?Sized>(
    session: &mut GameSession<'_>,
    respondent: &mut R,
) -> Result<GameOutcome, SessionError> {
    loop {
        let reply = match session.prompt() {
            Prompt::Finished(outcome) => return Ok(outcome.clone()),
            Prompt::Question { question, text, .. } => {
                Reply::Answer(respondent.answer(question, text))
            }
            Prompt::Guess { entry, name, .. } => Reply::Confirm(respondent.confirm(entry, name)),
        };
        session.respond(reply)?;
    }
}
