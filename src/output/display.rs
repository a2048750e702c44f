//! Display functions for command results

use super::formatters::{NO_MATCH, NO_NEIGHBORS, answer_label, create_progress_bar, source_tag};
use crate::catalog::Catalog;
use crate::commands::{BenchmarkResult, InspectResult, SimulateResult};
use crate::game::{GameConfig, GameOutcome, Turn};
use colored::Colorize;

/// Print how a finished game ended
pub fn print_game_outcome(catalog: &Catalog, config: &GameConfig, outcome: &GameOutcome) {
    println!("{}", "─".repeat(60).cyan());

    if outcome.won {
        let name = outcome.name.as_deref().unwrap_or("?");
        println!(
            "{}",
            format!(
                "🎉 Got it: {name} in {} turns ({} questions)",
                outcome.turns.len(),
                outcome.questions_asked()
            )
            .green()
            .bold()
        );
    } else if outcome.turns.len() >= config.max_turns {
        println!(
            "{}",
            format!("⌛ Out of turns after {} tries", outcome.turns.len())
                .red()
                .bold()
        );
    } else if config.mode.uses_neighbors() {
        println!("{}", NO_NEIGHBORS.red().bold());
    } else {
        println!("{}", NO_MATCH.red().bold());
    }

    if outcome.backtracks > 0 {
        println!("   Backtracked {} time(s)", outcome.backtracks);
    }

    let rejected: Vec<&str> = outcome
        .turns
        .iter()
        .filter_map(|turn| match *turn {
            Turn::Guess {
                entry,
                correct: false,
                ..
            } => Some(catalog.entry(entry).name()),
            _ => None,
        })
        .collect();
    if !rejected.is_empty() {
        println!("   Wrong guesses: {}", rejected.join(", ").bright_black());
    }

    println!("{}", "─".repeat(60).cyan());
}

/// Print the step-by-step record of a simulated game
pub fn print_simulate_result(result: &SimulateResult, verbose: bool) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Simulating: {}",
        result.target.bright_yellow().bold()
    );
    println!("{}", "─".repeat(60).cyan());

    for (i, step) in result.steps.iter().enumerate() {
        let turn = i + 1;
        match step.turn {
            Turn::Question { answer, .. } => {
                println!("\nTurn {turn:2}: {} {}", step.text, answer_label(answer));
            }
            Turn::Guess {
                correct, source, ..
            } => {
                let mark = if correct { "✅" } else { "❌" };
                println!(
                    "\nTurn {turn:2}: Is it {}? {mark} ({})",
                    step.text.bright_yellow(),
                    source_tag(source)
                );
            }
        }

        if verbose {
            println!(
                "  Candidates: {} → {}",
                step.pool_before, step.pool_after
            );
        }
    }

    println!();
    let outcome = &result.outcome;
    if outcome.won {
        println!(
            "{}",
            format!(
                "✅ Found in {} turns ({} questions, {} backtracks)",
                outcome.turns.len(),
                outcome.questions_asked(),
                outcome.backtracks
            )
            .green()
            .bold()
        );
    } else {
        println!(
            "{}",
            format!("❌ Not found after {} turns", outcome.turns.len())
                .red()
                .bold()
        );
    }
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Entries tested:   {}", result.total_entries);
    println!(
        "   Win rate:         {}",
        format!("{:.1}%", result.win_rate() * 100.0)
            .bright_yellow()
            .bold()
    );
    println!(
        "   Average turns:    {}",
        format!("{:.2}", result.average_turns).bright_yellow().bold()
    );
    println!(
        "   Best case:        {}",
        format!("{}", result.min_turns).green()
    );
    println!(
        "   Worst case:       {}",
        format!("{}", result.max_turns).yellow()
    );
    println!("   Backtracks:       {}", result.total_backtracks);
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Games/second:     {:.1}", result.games_per_second);

    if result.total_entries > 0 {
        println!("\n📈 {}", "Distribution:".bright_cyan().bold());
        let mut turn_counts: Vec<usize> = result.distribution.keys().copied().collect();
        turn_counts.sort_unstable();
        for turns in turn_counts {
            let count = result.distribution[&turns];
            let pct = (count as f64 / result.total_entries as f64) * 100.0;
            let bar = create_progress_bar(pct, 100.0, 40);
            println!("   {turns:2}: {} {count:4} ({pct:5.1}%)", bar.green());
        }
    }

    if !result.hardest.is_empty() {
        println!("\n🐢 {}", "Hardest entries:".bright_cyan().bold());
        for (name, turns) in &result.hardest {
            println!("   {name:<20} {turns} turns");
        }
    }

    if !result.lost_entries.is_empty() {
        println!("\n❌ {}", "Not found:".red().bold());
        println!("   {}", result.lost_entries.join(", "));
    }
}

/// Print the shape of every strategy's tree
pub fn print_inspect_result(result: &InspectResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "CATALOG:".bright_cyan().bold(),
        result.prompt.bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    println!("\n📚 {} entries, {} questions", result.entries, result.questions);

    if !result.duplicates.is_empty() {
        println!("\n⚠️  {}", "Indistinguishable entries:".yellow().bold());
        for group in &result.duplicates {
            println!("   {}", group.join(" = "));
        }
    }

    for report in &result.reports {
        let stats = &report.stats;
        println!(
            "\n🌳 {}",
            report.strategy.name().bright_cyan().bold()
        );
        println!(
            "   Nodes: {}  Leaves: {}  Max depth: {}  Mean depth: {:.2}",
            stats.nodes, stats.leaves, stats.max_depth, stats.mean_depth
        );
        if let Some(question) = &report.root_question {
            println!("   First question: {question}");
        }
        if !report.deepest.is_empty() {
            let deepest: Vec<String> = report
                .deepest
                .iter()
                .map(|(name, depth)| format!("{name} ({depth})"))
                .collect();
            println!("   Deepest: {}", deepest.join(", "));
        }
        println!(
            "   Built in {:.3}ms",
            report.build_time.as_secs_f64() * 1000.0
        );
    }
}
