//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{
    print_benchmark_result, print_game_outcome, print_inspect_result, print_simulate_result,
};
pub use formatters::{NO_MATCH, NO_NEIGHBORS};
