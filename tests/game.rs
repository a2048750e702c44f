//! Full games through the public API

use std::fs;
use std::path::Path;
use twenty_questions::catalog::{Catalog, CatalogError, loader::load_from_files};
use twenty_questions::game::{
    GameConfig, GameMode, GameSession, GuessSource, SimulatedPlayer, Turn, Variant, run_session,
};
use twenty_questions::tree::BuildStrategy;

const CUBE_ENTRIES: &str = "\
Zero
0 0 0
One
0 0 1
Two
0 1 0
Three
0 1 1
Four
1 0 0
Five
1 0 1
Six
1 1 0
Seven
1 1 1
";

const CUBE_QUESTIONS: &str = "\
number
Is it four or more?
Is bit one set?
Is it odd?
";

fn write_catalog(
    dir: &Path,
    entries: &str,
    questions: &str,
) -> (std::path::PathBuf, std::path::PathBuf) {
    let entries_path = dir.join("entries.txt");
    let questions_path = dir.join("questions.txt");
    fs::write(&entries_path, entries).unwrap();
    fs::write(&questions_path, questions).unwrap();
    (entries_path, questions_path)
}

fn setup_cube() -> Catalog {
    let dir = tempfile::tempdir().unwrap();
    let (entries, questions) = write_catalog(dir.path(), CUBE_ENTRIES, CUBE_QUESTIONS);
    load_from_files(entries, questions).unwrap()
}

fn config(token: &str) -> GameConfig {
    GameConfig::from_variant(Variant::from_token(token).unwrap())
}

#[test]
fn catalog_loads_from_files() {
    let catalog = setup_cube();
    assert_eq!(catalog.prompt(), "number");
    assert_eq!(catalog.entry_count(), 8);
    assert_eq!(catalog.question_count(), 3);
    assert_eq!(catalog.find_entry("five"), Some(5));
}

#[test]
fn ragged_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (entries, questions) = write_catalog(dir.path(), "Zero\n0 0\n", CUBE_QUESTIONS);

    let err = load_from_files(entries, questions).unwrap_err();
    assert!(matches!(err, CatalogError::RaggedAnswers { .. }));
}

#[test]
fn missing_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err =
        load_from_files(dir.path().join("nope.txt"), dir.path().join("nada.txt")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn every_variant_finds_every_entry() {
    let catalog = setup_cube();

    for (token, _) in Variant::TABLE {
        let config = config(token).with_seed(Some(3));
        let tree = config.build_tree(&catalog);

        for target in 0..catalog.entry_count() {
            let mut player = SimulatedPlayer::new(&catalog, target, config.mode);
            let mut session = GameSession::new(&catalog, &tree, config);
            let outcome = run_session(&mut session, &mut player).unwrap();

            assert!(outcome.won, "variant {token}, target {target}");
            assert_eq!(outcome.entry, Some(target));
            assert_eq!(outcome.questions_asked(), 3);
            assert_eq!(outcome.guesses_made(), 1);
        }
    }
}

#[test]
fn strict_game_is_lost_after_a_wrong_answer() {
    let catalog = setup_cube();
    let config = config("1.0");
    let tree = config.build_tree(&catalog);

    let mut player = SimulatedPlayer::new(&catalog, 5, config.mode).with_mistakes([1]);
    let mut session = GameSession::new(&catalog, &tree, config);
    let outcome = run_session(&mut session, &mut player).unwrap();

    assert!(!outcome.won);
    assert_eq!(outcome.guesses_made(), 1);
    assert_eq!(outcome.backtracks, 0);
}

#[test]
fn graded_game_recovers_from_a_hedged_mistake() {
    let catalog = setup_cube();
    let config = config("2.0");
    let tree = config.build_tree(&catalog);

    for question in 0..catalog.question_count() {
        let mut player = SimulatedPlayer::new(&catalog, 6, config.mode).with_mistakes([question]);
        let mut session = GameSession::new(&catalog, &tree, config);
        let outcome = run_session(&mut session, &mut player).unwrap();

        assert!(outcome.won, "mistake on question {question}");
        assert_eq!(outcome.entry, Some(6));
        assert!(outcome.backtracks >= 1);
        assert_eq!(outcome.guesses_made(), 2);
    }
}

#[test]
fn neighbor_game_recovers_from_a_flipped_answer() {
    let catalog = setup_cube();
    let config = GameConfig::from_variant(Variant::new(BuildStrategy::Best, GameMode::Neighbors));
    let tree = config.build_tree(&catalog);

    let mut player = SimulatedPlayer::new(&catalog, 3, config.mode).with_mistakes([0]);
    let mut session = GameSession::new(&catalog, &tree, config);
    let outcome = run_session(&mut session, &mut player).unwrap();

    assert!(outcome.won);
    assert_eq!(outcome.entry, Some(3));

    let neighbor_guesses = outcome
        .turns
        .iter()
        .filter(|t| {
            matches!(
                t,
                Turn::Guess {
                    source: GuessSource::Neighbor,
                    ..
                }
            )
        })
        .count();
    // the target is one bit away from the rejected guess
    assert!((1..=3).contains(&neighbor_guesses));
}

#[test]
fn turn_budget_is_never_exceeded() {
    let catalog = Catalog::embedded().unwrap();

    for (token, _) in Variant::TABLE {
        let config = config(token).with_max_turns(3).with_seed(Some(11));
        let tree = config.build_tree(&catalog);

        for target in 0..catalog.entry_count() {
            let mut player = SimulatedPlayer::new(&catalog, target, config.mode);
            let mut session = GameSession::new(&catalog, &tree, config);
            let outcome = run_session(&mut session, &mut player).unwrap();

            assert!(outcome.turns.len() <= 3, "variant {token}, target {target}");
            assert!(matches!(outcome.turns.last(), Some(Turn::Guess { .. }) | None));
        }
    }
}
