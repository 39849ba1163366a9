//! Repetition counting and benchmark evaluation.

pub mod counter;
pub mod evaluation;
pub mod types;

pub use counter::{CounterSettings, RepCounter, DEFAULT_FILTER_ORDER};
pub use evaluation::{evaluate, GroupSummary, RepEvaluation, SetEvaluation};
pub use types::RepError;
