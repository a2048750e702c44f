//! Command implementations

pub mod benchmark;
pub mod inspect;
pub mod simple;
pub mod simulate;

pub use benchmark::{BenchmarkConfig, BenchmarkResult, EntryResult, run_benchmark};
pub use inspect::{InspectResult, StrategyReport, inspect_catalog};
pub use simple::run_simple;
pub use simulate::{SimulateConfig, SimulateResult, SimulatedStep, simulate_entry};
