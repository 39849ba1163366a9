//! Domain model for labeled sensor sets.

pub mod types;

pub use types::{Exercise, ExerciseSet, Intensity, SensorChannel, DEFAULT_SAMPLING_RATE_HZ};
