//! Entry and question catalog
//!
//! Holds the prompt, the entries and the questions of one game universe and
//! guarantees every answer vector is as long as the question list.

mod embedded;
pub mod loader;

pub use embedded::{
    EMBEDDED_ENTRIES, EMBEDDED_ENTRIES_LINES, EMBEDDED_QUESTIONS, EMBEDDED_QUESTIONS_LINES,
};

use crate::core::{Entry, EntryError, Question};
use rustc_hash::FxHashMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while loading or validating a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("entry '{name}' on line {line} has no answer line")]
    MissingAnswers { line: usize, name: String },

    #[error("line {line}: answer '{token}' is not 0 or 1")]
    InvalidToken { line: usize, token: String },

    #[error("line {line}: {source}")]
    InvalidEntry {
        line: usize,
        #[source]
        source: EntryError,
    },

    #[error("entry '{name}' has {found} answers but there are {expected} questions")]
    RaggedAnswers {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("questions file has no prompt line")]
    MissingPrompt,

    #[error("catalog has no entries")]
    NoEntries,

    #[error("catalog has no questions")]
    NoQuestions,
}

/// A validated game universe
#[derive(Debug, Clone)]
pub struct Catalog {
    prompt: String,
    entries: Vec<Entry>,
    questions: Vec<Question>,
}

impl Catalog {
    /// Create a catalog, rejecting empty or ragged input
    ///
    /// Entries sharing an identical answer vector are accepted; they cannot be
    /// told apart by any question and end up in the same tree leaf.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NoEntries`, `CatalogError::NoQuestions` or
    /// `CatalogError::RaggedAnswers`.
    pub fn new(
        prompt: impl Into<String>,
        entries: Vec<Entry>,
        questions: Vec<Question>,
    ) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::NoEntries);
        }
        if questions.is_empty() {
            return Err(CatalogError::NoQuestions);
        }

        let expected = questions.len();
        if let Some(entry) = entries.iter().find(|e| e.answers().len() != expected) {
            return Err(CatalogError::RaggedAnswers {
                name: entry.name().to_string(),
                expected,
                found: entry.answers().len(),
            });
        }

        let catalog = Self {
            prompt: prompt.into(),
            entries,
            questions,
        };

        for group in catalog.duplicate_groups() {
            let names: Vec<&str> = group.iter().map(|&i| catalog.entries[i].name()).collect();
            warn!(entries = ?names, "entries share an identical answer vector");
        }

        debug!(
            entries = catalog.entries.len(),
            questions = catalog.questions.len(),
            "catalog loaded"
        );

        Ok(catalog)
    }

    /// The catalog compiled into the binary
    ///
    /// # Errors
    ///
    /// Only fails if the embedded data files are malformed.
    pub fn embedded() -> Result<Self, CatalogError> {
        loader::parse_catalog(EMBEDDED_ENTRIES, EMBEDDED_QUESTIONS)
    }

    /// Free-text description of what the player should think of
    #[inline]
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[inline]
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// # Panics
    /// Panics if `index` is out of range
    #[inline]
    #[must_use]
    pub fn entry(&self, index: usize) -> &Entry {
        &self.entries[index]
    }

    /// # Panics
    /// Panics if `index` is out of range
    #[inline]
    #[must_use]
    pub fn question(&self, index: usize) -> &Question {
        &self.questions[index]
    }

    #[inline]
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Index of the entry with this name (case-insensitive)
    #[must_use]
    pub fn find_entry(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.entries
            .iter()
            .position(|e| e.name().eq_ignore_ascii_case(name))
    }

    /// Every entry index, in file order
    #[must_use]
    pub fn all_indices(&self) -> Vec<usize> {
        (0..self.entries.len()).collect()
    }

    /// Groups of two or more entries with identical answer vectors
    #[must_use]
    pub fn duplicate_groups(&self) -> Vec<Vec<usize>> {
        let mut by_vector: FxHashMap<&[bool], Vec<usize>> = FxHashMap::default();
        for (i, entry) in self.entries.iter().enumerate() {
            by_vector.entry(entry.answers()).or_default().push(i);
        }

        let mut groups: Vec<Vec<usize>> = by_vector
            .into_values()
            .filter(|group| group.len() > 1)
            .collect();
        groups.sort_unstable();
        groups
    }
}
