//! TUI rendering with ratatui
//!
//! Question prompt, candidate pool, deferred branches and history.

use super::app::{App, InputMode, MessageStyle};
use crate::core::DeferralKind;
use crate::game::{GuessSource, Prompt};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Key help
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_main_panel(f, app, main_chunks[0]);
    render_info_panel(f, app, main_chunks[1]);

    render_keys(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let title = format!(
        "🎯 TWENTY QUESTIONS - think of a(n) {}",
        app.catalog.prompt()
    );
    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_main_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35), // Current prompt
            Constraint::Percentage(30), // Candidates
            Constraint::Percentage(35), // History
        ])
        .split(area);

    render_prompt(f, app, chunks[0]);
    render_candidates(f, app, chunks[1]);
    render_history(f, app, chunks[2]);
}

fn render_prompt(f: &mut Frame, app: &App, area: Rect) {
    let highlight = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let content = match app.session.prompt() {
        Prompt::Question { turn, text, .. } => vec![
            Line::from(format!("Turn {turn}")),
            Line::from(Span::styled(text.to_string(), highlight)),
        ],
        Prompt::Guess {
            turn, name, source, ..
        } => {
            let from = match source {
                GuessSource::Tree => "from the tree",
                GuessSource::Neighbor => "close match",
            };
            vec![
                Line::from(format!("Turn {turn} ({from})")),
                Line::from(vec![
                    Span::raw("Is it "),
                    Span::styled(name.to_string(), highlight),
                    Span::raw("?"),
                ]),
            ]
        }
        Prompt::Finished(outcome) => {
            if outcome.won {
                vec![Line::from(Span::styled(
                    format!(
                        "Got it: {} in {} turns",
                        outcome.name.as_deref().unwrap_or("?"),
                        outcome.turns.len()
                    ),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ))]
            } else {
                vec![Line::from(Span::styled(
                    "Game over",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ))]
            }
        }
    };

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .title(" Current ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}

fn render_candidates(f: &mut Frame, app: &App, area: Rect) {
    let navigator = app.session.navigator();
    let candidates = navigator.candidates();

    let content = if candidates.is_empty() {
        vec![Line::from("No candidates")]
    } else if candidates.len() <= 12 {
        candidates
            .iter()
            .map(|&e| Line::from(format!("  • {}", app.catalog.entry(e).name())))
            .collect()
    } else {
        vec![Line::from(format!("{} candidates remaining", candidates.len()))]
    };

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .title(" Candidates ")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Green)),
    );

    f.render_widget(paragraph, area);
}

fn render_history(f: &mut Frame, app: &App, area: Rect) {
    let history_items: Vec<ListItem> = app
        .history
        .iter()
        .rev()
        .take(8)
        .enumerate()
        .map(|(i, entry)| {
            let content = format!(
                "{}: {} {} ({} → {})",
                app.history.len() - i,
                entry.text,
                entry.reply,
                entry.pool_before,
                entry.pool_after
            );
            ListItem::new(content)
        })
        .collect();

    let history =
        List::new(history_items).block(Block::default().title(" History ").borders(Borders::ALL));

    f.render_widget(history, area);
}

fn render_info_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Pool gauge
            Constraint::Length(3), // Turn gauge
            Constraint::Length(4), // Deferrals
            Constraint::Min(3),    // Messages
        ])
        .split(area);

    render_pool_gauge(f, app, chunks[0]);
    render_turn_gauge(f, app, chunks[1]);
    render_deferrals(f, app, chunks[2]);
    render_messages(f, app, chunks[3]);
}

fn render_pool_gauge(f: &mut Frame, app: &App, area: Rect) {
    let total = app.catalog.entry_count().max(1);
    let remaining = app.session.navigator().pool_size();
    let eliminated_pct = ((total - remaining.min(total)) * 100 / total) as u16;

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Narrowed Down ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(eliminated_pct)
        .label(format!("{remaining}/{total} candidates remain"));

    f.render_widget(gauge, area);
}

fn render_turn_gauge(f: &mut Frame, app: &App, area: Rect) {
    let max = app.config.max_turns.max(1);
    let used = app.session.turns_used().min(max);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Turns ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Yellow))
        .percent((used * 100 / max) as u16)
        .label(format!("{used}/{max} used"));

    f.render_widget(gauge, area);
}

fn render_deferrals(f: &mut Frame, app: &App, area: Rect) {
    let navigator = app.session.navigator();
    let content = vec![
        Line::from(format!(
            "Unknown:  {}",
            navigator.deferrals(DeferralKind::Unknown).len()
        )),
        Line::from(format!(
            "Probable: {}   Backtracks: {}",
            navigator.deferrals(DeferralKind::Probable).len(),
            app.session.backtracks()
        )),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .title(" Deferred Branches ")
            .borders(Borders::ALL),
    );
    f.render_widget(paragraph, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_keys(f: &mut Frame, app: &App, area: Rect) {
    let (title, color) = match app.input_mode() {
        InputMode::Answer if app.config.mode.accepts_graded() => (
            " y: Yes | n: No | p: Probably | x: Probably not | u: Unknown ",
            Color::Yellow,
        ),
        InputMode::Answer => (" y: Yes | n: No ", Color::Yellow),
        InputMode::Confirm => (" Was I right? y: Yes | n: No ", Color::Magenta),
        InputMode::GameOver => (" r: New game | q: Quit ", Color::Green),
    };

    let keys = Paragraph::new(title)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(keys, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let mode_text = format!("Mode: {} / {}", app.config.mode, app.config.strategy);
    let mode = Paragraph::new(mode_text).alignment(Alignment::Center);
    f.render_widget(mode, chunks[0]);

    let stats_text = format!(
        "Games: {} | Win Rate: {:.0}%",
        app.stats.total_games,
        app.stats.win_rate() * 100.0
    );
    let stats = Paragraph::new(stats_text).alignment(Alignment::Center);
    f.render_widget(stats, chunks[1]);

    let turns_text = format!("Turns left: {}", app.session.turns_left());
    let turns = Paragraph::new(turns_text).alignment(Alignment::Center);
    f.render_widget(turns, chunks[2]);

    let help = Paragraph::new("q: Quit | r: Restart")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[3]);
}
