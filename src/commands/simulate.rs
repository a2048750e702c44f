//! Simulate command
//!
//! Plays one game against a named entry with an automated player and records
//! every step.

use crate::catalog::Catalog;
use crate::game::{
    GameConfig, GameOutcome, GameSession, Prompt, Reply, Respondent, SimulatedPlayer, Turn,
};
use anyhow::{Context, Result, bail};

/// Configuration for simulating a game
pub struct SimulateConfig {
    pub target: String,
    pub game: GameConfig,
    /// Questions the player answers the wrong way
    pub mistakes: Vec<usize>,
    /// Questions the player answers with "unknown"
    pub unknowns: Vec<usize>,
}

impl SimulateConfig {
    #[must_use]
    pub const fn new(target: String, game: GameConfig) -> Self {
        Self {
            target,
            game,
            mistakes: Vec::new(),
            unknowns: Vec::new(),
        }
    }
}

/// Result of a simulated game
pub struct SimulateResult {
    pub target: String,
    pub outcome: GameOutcome,
    pub steps: Vec<SimulatedStep>,
}

/// One turn of a simulated game
pub struct SimulatedStep {
    pub turn: Turn,
    /// Question text or guessed name
    pub text: String,
    pub pool_before: usize,
    pub pool_after: usize,
}

/// Play one game against `config.target`
///
/// # Errors
///
/// Returns an error if:
/// - The target is not in the catalog
/// - A mistake or unknown question index is out of range
pub fn simulate_entry(catalog: &Catalog, config: &SimulateConfig) -> Result<SimulateResult> {
    let target = catalog
        .find_entry(&config.target)
        .with_context(|| format!("'{}' is not in the catalog", config.target))?;

    if let Some(&question) = config
        .mistakes
        .iter()
        .chain(&config.unknowns)
        .find(|&&q| q >= catalog.question_count())
    {
        bail!(
            "question {question} out of range (catalog has {} questions)",
            catalog.question_count()
        );
    }

    let tree = config.game.build_tree(catalog);
    let mut player = SimulatedPlayer::new(catalog, target, config.game.mode)
        .with_mistakes(config.mistakes.iter().copied())
        .with_unknowns(config.unknowns.iter().copied());
    let mut session = GameSession::new(catalog, &tree, config.game);

    let mut steps = Vec::new();

    loop {
        let pool_before = session.navigator().pool_size();

        let (text, reply) = match session.prompt() {
            Prompt::Finished(_) => break,
            Prompt::Question { question, text, .. } => {
                (text.to_string(), Reply::Answer(player.answer(question, text)))
            }
            Prompt::Guess { entry, name, .. } => {
                (name.to_string(), Reply::Confirm(player.confirm(entry, name)))
            }
        };

        session.respond(reply)?;

        if let Some(&turn) = session.turns().last() {
            steps.push(SimulatedStep {
                turn,
                text,
                pool_before,
                pool_after: session.navigator().pool_size(),
            });
        }
    }

    Ok(SimulateResult {
        target: catalog.entry(target).name().to_string(),
        outcome: session.outcome().cloned().unwrap_or_default(),
        steps,
    })
}
