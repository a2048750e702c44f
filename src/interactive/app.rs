//! TUI application state and logic

use crate::catalog::Catalog;
use crate::core::Answer;
use crate::game::{GameConfig, GameSession, GuessSource, Prompt, Reply};
use crate::output::{NO_MATCH, NO_NEIGHBORS};
use crate::tree::DecisionTree;
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

/// Application state
pub struct App<'a> {
    pub catalog: &'a Catalog,
    pub tree: &'a DecisionTree,
    pub config: GameConfig,
    pub session: GameSession<'a>,
    pub history: Vec<HistoryEntry>,
    pub messages: Vec<Message>,
    pub stats: Statistics,
    pub should_quit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Waiting for an answer to a question
    Answer,
    /// Waiting for a yes/no on a guess
    Confirm,
    GameOver,
}

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub text: String,
    pub reply: String,
    pub pool_before: usize,
    pub pool_after: usize,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    pub total_games: usize,
    pub games_won: usize,
    pub total_turns: usize,
}

impl Statistics {
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.games_won as f64 / self.total_games as f64
        }
    }
}

impl<'a> App<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog, tree: &'a DecisionTree, config: GameConfig) -> Self {
        let mut app = Self {
            catalog,
            tree,
            config,
            session: GameSession::new(catalog, tree, config),
            history: Vec::new(),
            messages: Vec::new(),
            stats: Statistics::default(),
            should_quit: false,
        };

        app.add_message(
            &format!(
                "Think of a(n) {} and I will guess it in {} turns.",
                catalog.prompt(),
                config.max_turns
            ),
            MessageStyle::Info,
        );
        if app.session.is_finished() {
            app.record_finish();
        }
        app
    }

    /// What the current prompt expects
    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        match self.session.prompt() {
            Prompt::Question { .. } => InputMode::Answer,
            Prompt::Guess { .. } => InputMode::Confirm,
            Prompt::Finished(_) => InputMode::GameOver,
        }
    }

    /// Apply one key press
    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') => self.new_game(),
            KeyCode::Char(c) => match self.input_mode() {
                InputMode::Answer => match answer_for_key(c) {
                    Some(answer) => self.reply(Reply::Answer(answer)),
                    None => self.add_message(
                        "Keys: y n p(robably) x(probably not) u(nknown)",
                        MessageStyle::Error,
                    ),
                },
                InputMode::Confirm => match c {
                    'y' => self.reply(Reply::Confirm(true)),
                    'n' => self.reply(Reply::Confirm(false)),
                    _ => self.add_message("Was I right? Press y or n", MessageStyle::Error),
                },
                InputMode::GameOver => {
                    self.add_message(
                        "Press 'r' for a new game or 'q' to quit.",
                        MessageStyle::Info,
                    );
                }
            },
            _ => {}
        }
    }

    fn reply(&mut self, reply: Reply) {
        let pool_before = self.session.navigator().pool_size();
        let (text, source) = match self.session.prompt() {
            Prompt::Question { text, .. } => (text.to_string(), None),
            Prompt::Guess { name, source, .. } => (format!("Is it {name}?"), Some(source)),
            Prompt::Finished(_) => return,
        };

        if let Err(e) = self.session.respond(reply) {
            self.add_message(&e.to_string(), MessageStyle::Error);
            return;
        }

        let reply_text = match reply {
            Reply::Answer(answer) => answer.to_string(),
            Reply::Confirm(true) => "yes".to_string(),
            Reply::Confirm(false) => "no".to_string(),
        };
        self.history.push(HistoryEntry {
            text,
            reply: reply_text,
            pool_before,
            pool_after: self.session.navigator().pool_size(),
        });

        if self.session.is_finished() {
            self.record_finish();
        } else if source == Some(GuessSource::Tree)
            && matches!(
                self.session.prompt(),
                Prompt::Guess {
                    source: GuessSource::Neighbor,
                    ..
                }
            )
        {
            self.add_message("Trying close matches...", MessageStyle::Info);
        }
    }

    fn record_finish(&mut self) {
        let Some(outcome) = self.session.outcome() else {
            return;
        };
        let won = outcome.won;
        let turns = outcome.turns.len();
        let name = outcome.name.clone().unwrap_or_default();

        self.stats.total_games += 1;
        self.stats.total_turns += turns;

        if won {
            self.stats.games_won += 1;
            self.add_message(
                &format!("🎉 Got it: {name} in {turns} turns!"),
                MessageStyle::Success,
            );
        } else if turns >= self.config.max_turns {
            self.add_message("⌛ Out of turns.", MessageStyle::Error);
        } else if self.config.mode.uses_neighbors() {
            self.add_message(NO_NEIGHBORS, MessageStyle::Error);
        } else {
            self.add_message(NO_MATCH, MessageStyle::Error);
        }
        self.add_message("Press 'r' for a new game or 'q' to quit.", MessageStyle::Info);
    }

    pub fn new_game(&mut self) {
        self.session = GameSession::new(self.catalog, self.tree, self.config);
        self.history.clear();
        self.messages.clear();
        self.add_message("New game started!", MessageStyle::Info);
        if self.session.is_finished() {
            self.record_finish();
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }
}

const fn answer_for_key(c: char) -> Option<Answer> {
    match c {
        'y' => Some(Answer::Yes),
        'n' => Some(Answer::No),
        'p' => Some(Answer::Probably),
        'x' => Some(Answer::ProbablyNot),
        'u' => Some(Answer::Unknown),
        _ => None,
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                app.should_quit = true;
            } else {
                app.handle_key(key.code);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::loader::parse_catalog;
    use crate::game::{GameMode, Variant};
    use crate::tree::BuildStrategy;

    fn setup_catalog() -> Catalog {
        parse_catalog("Ant\n1 0\nBee\n1 1\nCat\n0 0\n", "thing\nIs it an insect?\nCan it fly?\n")
            .unwrap()
    }

    fn strict() -> GameConfig {
        GameConfig::from_variant(Variant::new(BuildStrategy::Order, GameMode::Strict))
    }

    fn press(app: &mut App<'_>, keys: &str) {
        for c in keys.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn answering_keys_win_the_game() {
        let catalog = setup_catalog();
        let config = strict();
        let tree = config.build_tree(&catalog);
        let mut app = App::new(&catalog, &tree, config);

        assert_eq!(app.input_mode(), InputMode::Answer);
        press(&mut app, "yy");
        assert_eq!(app.input_mode(), InputMode::Confirm);
        press(&mut app, "y");

        assert_eq!(app.input_mode(), InputMode::GameOver);
        assert_eq!(app.stats.total_games, 1);
        assert_eq!(app.stats.games_won, 1);
        assert_eq!(app.history.len(), 3);
        assert_eq!(app.history[0].pool_before, 3);
        assert_eq!(app.history[0].pool_after, 2);
    }

    #[test]
    fn rejected_guess_in_strict_mode_reports_no_match() {
        let catalog = setup_catalog();
        let config = strict();
        let tree = config.build_tree(&catalog);
        let mut app = App::new(&catalog, &tree, config);

        press(&mut app, "nn");

        assert_eq!(app.input_mode(), InputMode::GameOver);
        assert_eq!(app.stats.games_won, 0);
        assert!(app.messages.iter().any(|m| m.text == NO_MATCH));
    }

    #[test]
    fn hedged_keys_rejected_in_strict_mode() {
        let catalog = setup_catalog();
        let config = strict();
        let tree = config.build_tree(&catalog);
        let mut app = App::new(&catalog, &tree, config);

        press(&mut app, "p");

        assert!(app.history.is_empty());
        assert_eq!(app.session.turns_used(), 0);
        assert!(matches!(
            app.messages.last().map(|m| &m.style),
            Some(MessageStyle::Error)
        ));
    }

    #[test]
    fn graded_keys_are_accepted() {
        let catalog = setup_catalog();
        let config = GameConfig {
            mode: GameMode::Graded,
            ..strict()
        };
        let tree = config.build_tree(&catalog);
        let mut app = App::new(&catalog, &tree, config);

        press(&mut app, "p");

        assert_eq!(app.history.len(), 1);
        assert_eq!(app.history[0].reply, Answer::Probably.to_string());
        assert_eq!(app.session.turns_used(), 1);
    }

    #[test]
    fn restart_clears_history_and_quit_stops() {
        let catalog = setup_catalog();
        let config = strict();
        let tree = config.build_tree(&catalog);
        let mut app = App::new(&catalog, &tree, config);

        press(&mut app, "y");
        assert_eq!(app.history.len(), 1);

        press(&mut app, "r");
        assert!(app.history.is_empty());
        assert_eq!(app.session.turns_used(), 0);
        assert!(!app.should_quit);

        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
