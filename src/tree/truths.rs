//! Per-session record of answered questions

use crate::core::Answer;
use rustc_hash::FxHashMap;

/// Answers recorded for questions during one game
///
/// Keyed by question index. Navigators consult it to follow an earlier answer
/// instead of asking the same question again on a backtracked path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTruths {
    answers: FxHashMap<usize, Answer>,
}

impl SessionTruths {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `answer` for `question`, replacing any earlier value
    pub fn record(&mut self, question: usize, answer: Answer) {
        self.answers.insert(question, answer);
    }

    /// Recorded answer for `question`
    ///
    /// `Unknown` is never recorded, so a `Some` is always followable.
    #[inline]
    #[must_use]
    pub fn get(&self, question: usize) -> Option<Answer> {
        self.answers
            .get(&question)
            .copied()
            .filter(|&a| a != Answer::Unknown)
    }

    #[inline]
    #[must_use]
    pub fn is_answered(&self, question: usize) -> bool {
        self.get(question).is_some()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Forget every recorded answer
    pub fn clear(&mut self) {
        self.answers.clear();
    }
}
