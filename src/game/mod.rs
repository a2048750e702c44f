//! Game layer
//!
//! Ties a decision tree, its navigator and the neighbour index together into
//! a turn-limited game with four modes.

mod config;
mod player;
mod session;

pub use config::{DEFAULT_MAX_TURNS, GameConfig, GameMode, UnsupportedVariant, Variant};
pub use player::SimulatedPlayer;
pub use session::{
    GameOutcome, GameSession, GuessSource, Prompt, Reply, Respondent, SessionError, Turn,
    run_session,
};
