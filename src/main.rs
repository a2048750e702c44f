//! Twenty Questions - CLI
//!
//! Guessing game with TUI and console modes, plus simulation, benchmark and
//! tree inspection commands.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};
use twenty_questions::{
    catalog::{Catalog, loader::load_from_files},
    commands::{
        BenchmarkConfig, SimulateConfig, inspect_catalog, run_benchmark, run_simple,
        simulate_entry,
    },
    game::{GameConfig, Variant},
    output::{print_benchmark_result, print_inspect_result, print_simulate_result},
    tree::BuildStrategy,
};

#[derive(Parser)]
#[command(
    name = "twenty_questions",
    about = "Twenty questions over a decision tree, with graded answers and backtracking",
    author,
    disable_version_flag = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Version token: 0.0, 1.0, 1.1, 1.5, 2.0 (default), 3.0 or 4.0
    #[arg(short = 'V', long, global = true, default_value = "2.0", allow_hyphen_values = true)]
    variant: String,

    /// Override the tree strategy: order, best, sample, sums
    #[arg(short, long, global = true)]
    strategy: Option<String>,

    /// Entries file (name line, then 0/1 answer line); embedded set when omitted
    #[arg(long, global = true, requires = "questions")]
    entries: Option<PathBuf>,

    /// Questions file (prompt line, then one question per line)
    #[arg(long, global = true, requires = "entries")]
    questions: Option<PathBuf>,

    /// Question and guess budget per game
    #[arg(long, global = true, default_value = "20")]
    max_turns: usize,

    /// Seed for sampled tree builds and benchmark noise
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple CLI mode (console game without TUI)
    Simple,

    /// Play one game against a named entry with a simulated player
    Simulate {
        /// Entry the simulated player is thinking of
        name: String,

        /// Question index the player answers the wrong way (repeatable)
        #[arg(long = "mistake")]
        mistakes: Vec<usize>,

        /// Question index the player answers with "unknown" (repeatable)
        #[arg(long = "unknown")]
        unknowns: Vec<usize>,

        /// Show candidate counts for every turn
        #[arg(long)]
        detail: bool,
    },

    /// Simulate a game for every entry
    Benchmark {
        /// Chance that each answer is a hedged mistake
        #[arg(short, long, default_value = "0.0")]
        noise: f64,
    },

    /// Build the tree with every strategy and report its shape
    Inspect,
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the catalog from `--entries`/`--questions` or the embedded data set
fn load_catalog(cli: &Cli) -> Result<Catalog> {
    match (&cli.entries, &cli.questions) {
        (Some(entries), Some(questions)) => load_from_files(entries, questions)
            .with_context(|| format!("failed to load catalog from {}", entries.display())),
        _ => Catalog::embedded().context("embedded catalog is invalid"),
    }
}

/// Resolve the variant token and overrides into a game configuration
fn game_config(cli: &Cli) -> Result<GameConfig> {
    let variant = Variant::from_token(&cli.variant)?;
    let mut config = GameConfig::from_variant(variant)
        .with_max_turns(cli.max_turns)
        .with_seed(cli.seed);

    if let Some(name) = &cli.strategy {
        config = config.with_strategy(BuildStrategy::from_token(name)?);
    }

    if config.max_turns == 0 {
        bail!("--max-turns must be at least 1");
    }

    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let catalog = load_catalog(&cli)?;
    let config = game_config(&cli)?;

    info!(
        entries = catalog.entry_count(),
        questions = catalog.question_count(),
        mode = %config.mode,
        strategy = %config.strategy,
        "catalog loaded"
    );

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    match command {
        Commands::Play => run_play_command(&catalog, config),
        Commands::Simple => run_simple(&catalog, config),
        Commands::Simulate {
            name,
            mistakes,
            unknowns,
            detail,
        } => run_simulate_command(&catalog, config, name, mistakes, unknowns, detail),
        Commands::Benchmark { noise } => {
            run_benchmark_command(&catalog, config, noise, cli.seed.unwrap_or(0))
        }
        Commands::Inspect => {
            let result = inspect_catalog(&catalog, config.sample_size, cli.seed);
            print_inspect_result(&result);
            Ok(())
        }
    }
}

fn run_simulate_command(
    catalog: &Catalog,
    game: GameConfig,
    name: String,
    mistakes: Vec<usize>,
    unknowns: Vec<usize>,
    detail: bool,
) -> Result<()> {
    let mut config = SimulateConfig::new(name, game);
    config.mistakes = mistakes;
    config.unknowns = unknowns;

    let result = simulate_entry(catalog, &config)?;
    print_simulate_result(&result, detail);
    Ok(())
}

fn run_benchmark_command(catalog: &Catalog, game: GameConfig, noise: f64, seed: u64) -> Result<()> {
    if !(0.0..=1.0).contains(&noise) {
        bail!("--noise must be between 0 and 1, got {noise}");
    }

    println!(
        "Running benchmark on {} entries ({} / {})...",
        catalog.entry_count(),
        game.mode,
        game.strategy
    );

    let mut config = BenchmarkConfig::new(game);
    config.noise = noise;
    config.seed = seed;
    config.show_progress = true;

    let result = run_benchmark(catalog, &config)?;
    print_benchmark_result(&result);
    Ok(())
}

fn run_play_command(catalog: &Catalog, config: GameConfig) -> Result<()> {
    use twenty_questions::interactive::{App, run_tui};

    let tree = config.build_tree(catalog);
    let app = App::new(catalog, &tree, config);
    run_tui(app)
}
