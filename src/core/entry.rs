//! Entries and questions
//!
//! An Entry is one guessable item: a name plus one answer bit per question.
//! Entries and questions are index-aligned and referenced by index everywhere
//! else; nothing below the catalog copies them.

use std::fmt;

/// A guessable item with its answer vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: String,
    answers: Vec<bool>,
}

/// Error type for invalid answer bits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    EmptyName,
    InvalidBit(u8),
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Entry name must not be empty"),
            Self::InvalidBit(bit) => write!(f, "Answer must be 0 or 1, got {bit}"),
        }
    }
}

impl std::error::Error for EntryError {}

impl Entry {
    /// Create an entry from a name and its answer bits
    ///
    /// # Errors
    /// Returns `EntryError::EmptyName` if the trimmed name is empty.
    pub fn new(name: impl Into<String>, answers: Vec<bool>) -> Result<Self, EntryError> {
        let name: String = name.into().trim().to_string();
        if name.is_empty() {
            return Err(EntryError::EmptyName);
        }
        Ok(Self { name, answers })
    }

    /// Create an entry from 0/1 integers
    ///
    /// # Errors
    /// Returns `EntryError` if the name is empty or any value is not 0 or 1.
    ///
    /// # Examples
    /// ```
    /// use twenty_questions::core::Entry;
    ///
    /// let entry = Entry::from_bits("Dog", &[1, 0, 1]).unwrap();
    /// assert!(entry.answer(0));
    /// assert!(!entry.answer(1));
    ///
    /// assert!(Entry::from_bits("Dog", &[2]).is_err());
    /// ```
    pub fn from_bits(name: impl Into<String>, bits: &[u8]) -> Result<Self, EntryError> {
        let answers = bits
            .iter()
            .map(|&bit| match bit {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(EntryError::InvalidBit(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(name, answers)
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full answer vector
    #[inline]
    #[must_use]
    pub fn answers(&self) -> &[bool] {
        &self.answers
    }

    /// Answer to question `question` (`true` = yes)
    ///
    /// # Panics
    /// Panics if `question` is out of range
    #[inline]
    #[must_use]
    pub fn answer(&self, question: usize) -> bool {
        self.answers[question]
    }

    /// Number of positions at which two answer vectors differ
    #[must_use]
    pub fn hamming_distance(&self, other: &Self) -> usize {
        self.answers
            .iter()
            .zip(&other.answers)
            .filter(|(a, b)| a != b)
            .count()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A yes/no question
///
/// The per-session truth of a question is not stored here; see
/// [`SessionTruths`](crate::tree::SessionTruths).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
}

impl Question {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into().trim().to_string(),
        }
    }

    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
