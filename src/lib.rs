//! RepCount - Barbell Exercise Repetition Counting
//!
//! Processes accelerometer/gyroscope time-series recorded by a wrist-worn
//! sensor during weightlifting sets. Provides a zero-phase Butterworth
//! low-pass filter, local-maxima peak detection, per-exercise repetition
//! counting, and an evaluation harness that scores predictions against
//! category-derived ground truth.

pub mod data;
pub mod reps;
pub mod signal;

// Re-export commonly used types
pub use data::types::{Exercise, ExerciseSet, Intensity, SensorChannel};
pub use reps::counter::{CounterSettings, RepCounter};
pub use reps::evaluation::{evaluate, GroupSummary, RepEvaluation, SetEvaluation};
pub use reps::types::RepError;
pub use signal::lowpass::LowPassFilter;
pub use signal::peaks::find_local_maxima;
