//! Graded answers to a yes/no question
//!
//! A player may answer with certainty (yes/no), with a hedge (probably /
//! probably not) or not at all (unknown). Two independent properties are
//! derived from each answer:
//! - the [`Direction`] the decision tree descends in
//! - the [`DeferralKind`] under which the untaken branch is remembered
//!
//! Keeping the two apart lets the default direction for "unknown" change
//! without touching backtrack priority.

use std::fmt;

/// Branch of a decision node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Yes,
    No,
}

impl Direction {
    /// The branch not taken
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Yes => Self::No,
            Self::No => Self::Yes,
        }
    }

    /// Direction selected by an answer bit (`true` = yes)
    #[inline]
    #[must_use]
    pub const fn from_bit(bit: bool) -> Self {
        if bit { Self::Yes } else { Self::No }
    }

    #[inline]
    #[must_use]
    pub const fn is_yes(self) -> bool {
        matches!(self, Self::Yes)
    }
}

/// Which backtrack stack a hedged answer is remembered on
///
/// Unknown deferrals are always retried before probable ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeferralKind {
    /// "probably" / "probably not"
    Probable,
    /// "unknown" (lower confidence, retried first)
    Unknown,
}

/// Direction taken when the player does not know the answer
pub const UNKNOWN_DIRECTION: Direction = Direction::No;

/// A player's answer to one question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Answer {
    Yes,
    No,
    Probably,
    ProbablyNot,
    Unknown,
}

impl Answer {
    /// Every answer, in prompt order
    pub const ALL: [Self; 5] = [
        Self::Yes,
        Self::No,
        Self::Probably,
        Self::ProbablyNot,
        Self::Unknown,
    ];

    /// Parse a console answer
    ///
    /// Accepts `y`/`yes`, `n`/`no`, `p`/`prob`/`probably`,
    /// `pn`/`probnot`/`probably-not`/`probably not` and `u`/`?`/`unknown`,
    /// case-insensitively.
    ///
    /// # Examples
    /// ```
    /// use twenty_questions::core::Answer;
    ///
    /// assert_eq!(Answer::parse("Y"), Some(Answer::Yes));
    /// assert_eq!(Answer::parse("probnot"), Some(Answer::ProbablyNot));
    /// assert_eq!(Answer::parse("maybe"), None);
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "y" | "yes" => Some(Self::Yes),
            "n" | "no" => Some(Self::No),
            "p" | "prob" | "probably" => Some(Self::Probably),
            "pn" | "probnot" | "probably-not" | "probably not" => Some(Self::ProbablyNot),
            "u" | "?" | "unknown" | "dunno" => Some(Self::Unknown),
            _ => None,
        }
    }

    /// Branch the tree descends on this answer
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::Yes | Self::Probably => Direction::Yes,
            Self::No | Self::ProbablyNot => Direction::No,
            Self::Unknown => UNKNOWN_DIRECTION,
        }
    }

    /// Stack the untaken branch is remembered on, if any
    #[must_use]
    pub const fn deferral(self) -> Option<DeferralKind> {
        match self {
            Self::Yes | Self::No => None,
            Self::Probably | Self::ProbablyNot => Some(DeferralKind::Probable),
            Self::Unknown => Some(DeferralKind::Unknown),
        }
    }

    /// Truth value recorded for the question in the session
    ///
    /// "Unknown" is stored as the hedge matching its default direction so a
    /// later visit follows it instead of asking again.
    #[must_use]
    pub const fn recorded(self) -> Self {
        match self {
            Self::Unknown => match UNKNOWN_DIRECTION {
                Direction::Yes => Self::Probably,
                Direction::No => Self::ProbablyNot,
            },
            other => other,
        }
    }

    /// Plain yes/no answers
    #[inline]
    #[must_use]
    pub const fn is_definite(self) -> bool {
        matches!(self, Self::Yes | Self::No)
    }

    /// Short console token for this answer
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Yes => "y",
            Self::No => "n",
            Self::Probably => "prob",
            Self::ProbablyNot => "probnot",
            Self::Unknown => "unknown",
        }
    }
}

impl From<bool> for Answer {
    fn from(yes: bool) -> Self {
        if yes { Self::Yes } else { Self::No }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Probably => "probably",
            Self::ProbablyNot => "probably not",
            Self::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for Answer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid answer: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_console_tokens() {
        assert_eq!(Answer::parse("y"), Some(Answer::Yes));
        assert_eq!(Answer::parse("YES"), Some(Answer::Yes));
        assert_eq!(Answer::parse(" n "), Some(Answer::No));
        assert_eq!(Answer::parse("prob"), Some(Answer::Probably));
        assert_eq!(Answer::parse("probnot"), Some(Answer::ProbablyNot));
        assert_eq!(Answer::parse("probably not"), Some(Answer::ProbablyNot));
        assert_eq!(Answer::parse("unknown"), Some(Answer::Unknown));
        assert_eq!(Answer::parse("?"), Some(Answer::Unknown));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Answer::parse("").is_none());
        assert!(Answer::parse("maybe").is_none());
        assert!("yess".parse::<Answer>().is_err());
    }

    #[test]
    fn token_round_trips_through_parse() {
        for answer in Answer::ALL {
            assert_eq!(Answer::parse(answer.token()), Some(answer));
        }
    }

    #[test]
    fn directions_follow_answer() {
        assert_eq!(Answer::Yes.direction(), Direction::Yes);
        assert_eq!(Answer::Probably.direction(), Direction::Yes);
        assert_eq!(Answer::No.direction(), Direction::No);
        assert_eq!(Answer::ProbablyNot.direction(), Direction::No);
        assert_eq!(Answer::Unknown.direction(), Direction::No);
    }

    #[test]
    fn only_hedged_answers_defer() {
        assert_eq!(Answer::Yes.deferral(), None);
        assert_eq!(Answer::No.deferral(), None);
        assert_eq!(Answer::Probably.deferral(), Some(DeferralKind::Probable));
        assert_eq!(Answer::ProbablyNot.deferral(), Some(DeferralKind::Probable));
        assert_eq!(Answer::Unknown.deferral(), Some(DeferralKind::Unknown));
    }

    #[test]
    fn unknown_is_recorded_as_probably_not() {
        assert_eq!(Answer::Unknown.recorded(), Answer::ProbablyNot);
        assert_eq!(Answer::Probably.recorded(), Answer::Probably);
        assert_eq!(Answer::Yes.recorded(), Answer::Yes);
    }

    #[test]
    fn recorded_answer_keeps_direction() {
        for answer in Answer::ALL {
            assert_eq!(answer.recorded().direction(), answer.direction());
        }
    }

    #[test]
    fn direction_opposite() {
        assert_eq!(Direction::Yes.opposite(), Direction::No);
        assert_eq!(Direction::No.opposite(), Direction::Yes);
        assert_eq!(Direction::from_bit(true), Direction::Yes);
        assert!(!Direction::from_bit(false).is_yes());
    }
}
