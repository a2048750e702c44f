//! Game modes, version tokens and session configuration

use crate::catalog::Catalog;
use crate::tree::{
    BuildStrategy, DEFAULT_SAMPLE_SIZE, DecisionTree, TreeBuilder, strip_version_prefix,
};
use std::fmt;
use thiserror::Error;

/// Default question-and-guess budget
pub const DEFAULT_MAX_TURNS: usize = 20;

/// How answers are interpreted and what happens after a wrong guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// Yes/no only; one wrong guess ends the game
    Strict,
    /// Five graded answers; wrong guesses backtrack to deferred branches
    Graded,
    /// Yes/no only; wrong guesses fall back to Hamming neighbours
    Neighbors,
    /// Graded play, then Hamming neighbours once backtracking runs dry
    Hybrid,
}

impl GameMode {
    pub const ALL: [Self; 4] = [Self::Strict, Self::Graded, Self::Neighbors, Self::Hybrid];

    /// Whether hedged and unknown answers are allowed
    #[inline]
    #[must_use]
    pub const fn accepts_graded(self) -> bool {
        matches!(self, Self::Graded | Self::Hybrid)
    }

    /// Whether rejected guesses lead to neighbour guesses
    #[inline]
    #[must_use]
    pub const fn uses_neighbors(self) -> bool {
        matches!(self, Self::Neighbors | Self::Hybrid)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Graded => "graded",
            Self::Neighbors => "neighbors",
            Self::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognised version token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("version '{0}' not supported (expected 0.0, 1.0, 1.1, 1.5, 2.0, 3.0 or 4.0)")]
pub struct UnsupportedVariant(pub String);

/// A build strategy paired with a game mode, selected by version token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variant {
    pub strategy: BuildStrategy,
    pub mode: GameMode,
}

impl Variant {
    /// Every supported token with its variant
    pub const TABLE: [(&'static str, Self); 7] = [
        ("0.0", Self::new(BuildStrategy::Order, GameMode::Strict)),
        ("1.0", Self::new(BuildStrategy::Best, GameMode::Strict)),
        ("1.1", Self::new(BuildStrategy::Sampled, GameMode::Strict)),
        ("1.5", Self::new(BuildStrategy::SumTracked, GameMode::Strict)),
        ("2.0", Self::new(BuildStrategy::Best, GameMode::Graded)),
        ("3.0", Self::new(BuildStrategy::Sampled, GameMode::Neighbors)),
        ("4.0", Self::new(BuildStrategy::Best, GameMode::Hybrid)),
    ];

    #[must_use]
    pub const fn new(strategy: BuildStrategy, mode: GameMode) -> Self {
        Self { strategy, mode }
    }

    /// Parse a version token such as `-v2.0`, `v1.5` or `3.0`
    ///
    /// # Errors
    /// Returns `UnsupportedVariant` for tokens outside the table.
    ///
    /// # Examples
    /// ```
    /// use twenty_questions::game::{GameMode, Variant};
    /// use twenty_questions::tree::BuildStrategy;
    ///
    /// let variant = Variant::from_token("-v3.0").unwrap();
    /// assert_eq!(variant.strategy, BuildStrategy::Sampled);
    /// assert_eq!(variant.mode, GameMode::Neighbors);
    /// ```
    pub fn from_token(token: &str) -> Result<Self, UnsupportedVariant> {
        let normalized = token.trim().to_lowercase();
        let bare = strip_version_prefix(&normalized);

        Self::TABLE
            .iter()
            .find(|(version, _)| *version == bare)
            .map(|&(_, variant)| variant)
            .ok_or_else(|| UnsupportedVariant(token.to_string()))
    }
}

/// Settings for one game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub mode: GameMode,
    pub strategy: BuildStrategy,
    pub max_turns: usize,
    pub sample_size: usize,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::from_variant(Variant::new(BuildStrategy::Best, GameMode::Graded))
    }
}

impl GameConfig {
    #[must_use]
    pub const fn from_variant(variant: Variant) -> Self {
        Self {
            mode: variant.mode,
            strategy: variant.strategy,
            max_turns: DEFAULT_MAX_TURNS,
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: None,
        }
    }

    #[must_use]
    pub const fn with_strategy(mut self, strategy: BuildStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub const fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Build the decision tree this configuration plays on
    #[must_use]
    pub fn build_tree(&self, catalog: &Catalog) -> DecisionTree {
        TreeBuilder::new(catalog)
            .with_sample_size(self.sample_size)
            .with_seed(self.seed)
            .build(self.strategy)
    }
}
