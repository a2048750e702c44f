//! Core domain types for twenty questions
//!
//! This module contains the fundamental domain types with zero external dependencies.
//! Entries, questions and answers are plain values; everything that walks them
//! lives in `tree` and `neighbors`.

mod answer;
mod entry;

pub use answer::{Answer, DeferralKind, Direction, UNKNOWN_DIRECTION};
pub use entry::{Entry, EntryError, Question};
