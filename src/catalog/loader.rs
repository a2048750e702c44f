//! Catalog loading utilities
//!
//! Parses the two plain-text input formats:
//! - entries: pairs of lines, a name then whitespace-separated 0/1 answers
//! - questions: a prompt line, then one question per line
//!
//! Everything is validated here so the tree builder and the trie can assume
//! well-formed, equal-length answer vectors.

use super::{Catalog, CatalogError};
use crate::core::{Entry, EntryError, Question};
use std::fs;
use std::path::Path;

/// Parse an entries file
///
/// Blank lines between records are ignored. Answer vectors are not checked
/// against a question count here; [`Catalog::new`] does that.
///
/// # Errors
///
/// Returns `CatalogError` if a name has no answer line or an answer token is
/// not `0` or `1`.
///
/// # Examples
/// ```
/// use twenty_questions::catalog::loader::parse_entries;
///
/// let entries = parse_entries("Dog\n1 0 1\nCat\n1 1 0\n").unwrap();
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[1].name(), "Cat");
/// ```
pub fn parse_entries(text: &str) -> Result<Vec<Entry>, CatalogError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let mut entries = Vec::new();

    while let Some((name_line, name)) = lines.next() {
        let (answer_line, answers) = lines.next().ok_or_else(|| CatalogError::MissingAnswers {
            line: name_line,
            name: name.to_string(),
        })?;

        let bits = answers
            .split_whitespace()
            .map(|token| {
                token.parse::<u8>().map_err(|_| CatalogError::InvalidToken {
                    line: answer_line,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let entry = Entry::from_bits(name, &bits).map_err(|e| match e {
            EntryError::InvalidBit(bit) => CatalogError::InvalidToken {
                line: answer_line,
                token: bit.to_string(),
            },
            EntryError::EmptyName => CatalogError::InvalidEntry {
                line: name_line,
                source: EntryError::EmptyName,
            },
        })?;

        entries.push(entry);
    }

    Ok(entries)
}

/// Parse a questions file into its prompt and questions
///
/// # Errors
///
/// Returns `CatalogError::MissingPrompt` if the text has no non-empty line.
pub fn parse_questions(text: &str) -> Result<(String, Vec<Question>), CatalogError> {
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

    let prompt = lines.next().ok_or(CatalogError::MissingPrompt)?.to_string();
    let questions = lines.map(Question::new).collect();

    Ok((prompt, questions))
}

/// Parse both files' contents into a validated catalog
///
/// # Errors
///
/// Returns `CatalogError` if either text is malformed or the two do not agree.
pub fn parse_catalog(entries_text: &str, questions_text: &str) -> Result<Catalog, CatalogError> {
    let entries = parse_entries(entries_text)?;
    let (prompt, questions) = parse_questions(questions_text)?;
    Catalog::new(prompt, entries, questions)
}

/// Load a catalog from an entries file and a questions file
///
/// # Errors
///
/// Returns `CatalogError::Io` if a file cannot be read, or any validation
/// error from [`parse_catalog`].
///
/// # Examples
/// ```no_run
/// use twenty_questions::catalog::loader::load_from_files;
///
/// let catalog = load_from_files("data/entries.txt", "data/questions.txt").unwrap();
/// println!("Loaded {} entries", catalog.entry_count());
/// ```
pub fn load_from_files<P, Q>(entries_path: P, questions_path: Q) -> Result<Catalog, CatalogError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let entries_text = read(entries_path.as_ref())?;
    let questions_text = read(questions_path.as_ref())?;
    parse_catalog(&entries_text, &questions_text)
}

fn read(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ENTRIES: &str = "A\n1 0 1\nB\n1 1 1\nC\n0 0 1\n";
    const QUESTIONS: &str = "thing\nQ1\nQ2\nQ3\n";

    #[test]
    fn parse_entries_preserves_file_order() {
        let entries = parse_entries(ENTRIES).unwrap();
        let names: Vec<&str> = entries.iter().map(Entry::name).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(entries[0].answers(), &[true, false, true]);
    }

    #[test]
    fn parse_entries_skips_blank_lines() {
        let entries = parse_entries("\nA\n1 0\n\n\nB\n0 1\n\n").unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn parse_entries_missing_answer_line() {
        let err = parse_entries("A\n1 0\nB\n").unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MissingAnswers { line: 3, ref name } if name == "B"
        ));
    }

    #[test]
    fn parse_entries_rejects_non_binary_tokens() {
        let err = parse_entries("A\n1 x 0\n").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidToken { line: 2, ref token } if token == "x"));

        let err = parse_entries("A\n1 3 0\n").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidToken { line: 2, ref token } if token == "3"));
    }

    #[test]
    fn parse_questions_splits_prompt() {
        let (prompt, questions) = parse_questions(QUESTIONS).unwrap();
        assert_eq!(prompt, "thing");
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[2].text(), "Q3");
    }

    #[test]
    fn parse_questions_empty_is_error() {
        assert!(matches!(
            parse_questions("\n\n"),
            Err(CatalogError::MissingPrompt)
        ));
    }

    #[test]
    fn parse_catalog_rejects_ragged_vectors() {
        let err = parse_catalog("A\n1 0 1\nB\n1 1\n", QUESTIONS).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::RaggedAnswers { ref name, expected: 3, found: 2 } if name == "B"
        ));
    }

    #[test]
    fn load_from_files_reads_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let entries_path = dir.path().join("entries.txt");
        let questions_path = dir.path().join("questions.txt");
        fs::File::create(&entries_path)
            .unwrap()
            .write_all(ENTRIES.as_bytes())
            .unwrap();
        fs::File::create(&questions_path)
            .unwrap()
            .write_all(QUESTIONS.as_bytes())
            .unwrap();

        let catalog = load_from_files(&entries_path, &questions_path).unwrap();
        assert_eq!(catalog.entry_count(), 3);
        assert_eq!(catalog.question_count(), 3);
        assert_eq!(catalog.prompt(), "thing");
    }

    #[test]
    fn load_from_missing_file_reports_path() {
        let err = load_from_files("/nonexistent/entries.txt", "/nonexistent/q.txt").unwrap_err();
        match err {
            CatalogError::Io { path, .. } => assert!(path.ends_with("entries.txt")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
