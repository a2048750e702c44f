//! Simple interactive CLI mode
//!
//! Plain console game loop without the TUI

use crate::catalog::Catalog;
use crate::core::Answer;
use crate::game::{GameConfig, GameSession, Prompt, Reply};
use crate::output::print_game_outcome;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, Write};

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error if reading from stdin or writing to stdout fails.
pub fn run_simple(catalog: &Catalog, config: GameConfig) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                 Twenty Questions - Console Mode              ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!(
        "Please think of a(n) {} and I will try to guess it in {} turns.",
        catalog.prompt().bright_yellow().bold(),
        config.max_turns
    );
    if config.mode.accepts_graded() {
        println!("Answer with: y(es), n(o), prob(ably), probnot (probably not), unknown");
    } else {
        println!("Answer with: y(es) or n(o)");
    }
    println!("Commands: 'quit' to exit, 'new' to start over\n");

    let tree = config.build_tree(catalog);

    loop {
        let mut session = GameSession::new(catalog, &tree, config);

        match play_round(&mut session)? {
            RoundEnd::Quit => break,
            RoundEnd::Restart => {
                println!("\n🔄 New game started!\n");
                continue;
            }
            RoundEnd::Finished => {
                if let Some(outcome) = session.outcome() {
                    print_game_outcome(catalog, &config, outcome);
                }
            }
        }

        match get_user_input("Play again? (yes/no)")?.to_lowercase().as_str() {
            "yes" | "y" => println!("\n🔄 New game started!\n"),
            _ => break,
        }
    }

    farewell();
    Ok(())
}

enum RoundEnd {
    Finished,
    Restart,
    Quit,
}

enum Input {
    Reply(Reply),
    Restart,
    Quit,
}

fn play_round(session: &mut GameSession<'_>) -> Result<RoundEnd> {
    loop {
        let input = match session.prompt() {
            Prompt::Finished(_) => return Ok(RoundEnd::Finished),
            Prompt::Question { turn, text, .. } => {
                println!(
                    "{} {}",
                    format!("Q{turn}.").bright_cyan().bold(),
                    text.bright_white()
                );
                println!(
                    "    {}",
                    format!("({} candidates)", session.navigator().pool_size()).bright_black()
                );
                read_answer()?
            }
            Prompt::Guess { turn, name, .. } => {
                println!(
                    "{} Is it {}?",
                    format!("G{turn}.").bright_magenta().bold(),
                    name.bright_yellow().bold()
                );
                read_confirmation()?
            }
        };

        match input {
            Input::Quit => return Ok(RoundEnd::Quit),
            Input::Restart => return Ok(RoundEnd::Restart),
            Input::Reply(reply) => {
                if let Err(e) = session.respond(reply) {
                    println!("{}", e.to_string().red());
                }
                println!();
            }
        }
    }
}

fn farewell() {
    println!("\n👋 Thanks for playing!\n");
}

fn read_answer() -> Result<Input> {
    loop {
        let input = get_user_input("Answer")?.to_lowercase();
        match input.as_str() {
            "quit" | "q" | "exit" => return Ok(Input::Quit),
            "new" => return Ok(Input::Restart),
            other => match Answer::parse(other) {
                Some(answer) => return Ok(Input::Reply(Reply::Answer(answer))),
                None => println!("{} '{other}'", "Unrecognised answer".red()),
            },
        }
    }
}

fn read_confirmation() -> Result<Input> {
    loop {
        match get_user_input("Correct? (y/n)")?.to_lowercase().as_str() {
            "y" | "yes" => return Ok(Input::Reply(Reply::Confirm(true))),
            "n" | "no" => return Ok(Input::Reply(Reply::Confirm(false))),
            "quit" | "q" | "exit" => return Ok(Input::Quit),
            "new" => return Ok(Input::Restart),
            _ => println!("{}", "Please answer y or n".red()),
        }
    }
}

/// Get user input with a prompt
///
/// End of input is treated as "quit".
fn get_user_input(prompt: &str) -> Result<String> {
    print!("{prompt}: ");
    io::stdout().flush().context("failed to flush stdout")?;

    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .context("failed to read from stdin")?;

    if read == 0 {
        return Ok("quit".to_string());
    }
    Ok(input.trim().to_string())
}
