//! Formatting utilities for terminal output

use crate::core::Answer;
use crate::game::GuessSource;
use colored::{ColoredString, Colorize};

/// Shown when the tree has no candidate left for the given answers
pub const NO_MATCH: &str = "No entries that match these answers";

/// Shown when every Hamming neighbour has been tried
pub const NO_NEIGHBORS: &str = "No more neighbors";

/// Answer token colored by confidence
#[must_use]
pub fn answer_label(answer: Answer) -> ColoredString {
    let token = answer.token();
    match answer {
        Answer::Yes => token.green().bold(),
        Answer::No => token.red().bold(),
        Answer::Probably => token.green(),
        Answer::ProbablyNot => token.red(),
        Answer::Unknown => token.bright_black(),
    }
}

/// Short tag for where a guess came from
#[must_use]
pub const fn source_tag(source: GuessSource) -> &'static str {
    match source {
        GuessSource::Tree => "tree",
        GuessSource::Neighbor => "neighbor",
    }
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
