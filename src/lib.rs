//! Twenty Questions
//!
//! A guessing game that builds a binary decision tree over a catalog of
//! entries and yes/no questions, then walks it with the player's answers.
//! Hedged answers leave deferred branches to backtrack into, and rejected
//! guesses can fall back to the nearest entries by Hamming distance.
//!
//! # Quick Start
//!
//! ```rust
//! use twenty_questions::catalog::Catalog;
//! use twenty_questions::game::{GameConfig, GameSession, SimulatedPlayer, run_session};
//!
//! let catalog = Catalog::embedded().unwrap();
//! let config = GameConfig::default();
//! let tree = config.build_tree(&catalog);
//!
//! let target = catalog.find_entry("penguin").unwrap();
//! let mut player = SimulatedPlayer::new(&catalog, target, config.mode);
//! let mut session = GameSession::new(&catalog, &tree, config);
//!
//! let outcome = run_session(&mut session, &mut player).unwrap();
//! assert!(outcome.won);
//! assert!(outcome.turns.len() <= 20);
//! ```

// Core domain types
pub mod core;

// Entry and question data
pub mod catalog;

// Decision tree construction and traversal
pub mod tree;

// Hamming-distance neighbour search
pub mod neighbors;

// Game sessions and modes
pub mod game;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
