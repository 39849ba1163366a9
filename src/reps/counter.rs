//! Per-exercise repetition counting.
//!
//! Composes the low-pass filter and peak detector with a calibrated
//! per-exercise configuration: each lift gets the channel and cutoff that
//! best isolate its repetition cycle. The values were tuned empirically
//! against the benchmark recordings and are fixed at compile time, not
//! learned.

use serde::{Deserialize, Serialize};

use crate::data::types::{Exercise, ExerciseSet, SensorChannel};
use crate::reps::types::RepError;
use crate::signal::lowpass::LowPassFilter;
use crate::signal::peaks::find_local_maxima;

/// Canonical Butterworth order used for counting.
pub const DEFAULT_FILTER_ORDER: usize = 10;

/// Filter configuration for counting one exercise's repetitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CounterSettings {
    /// Channel carrying the repetition cycle for this exercise
    pub channel: SensorChannel,
    /// Low-pass cutoff frequency (Hz)
    pub cutoff_hz: f64,
    /// Butterworth filter order
    pub order: usize,
}

impl CounterSettings {
    /// Calibrated configuration for an exercise.
    ///
    /// Most lifts are dominated by vertical motion and read the
    /// accelerometer magnitude; rows are dominated by rotation of the
    /// wrist and read the gyroscope magnitude instead.
    pub fn for_exercise(exercise: Exercise) -> Self {
        let (channel, cutoff_hz) = match exercise {
            Exercise::Bench => (SensorChannel::AccMagnitude, 0.4),
            Exercise::Squat => (SensorChannel::AccMagnitude, 0.35),
            Exercise::Row => (SensorChannel::GyrMagnitude, 0.65),
            Exercise::Ohp => (SensorChannel::AccMagnitude, 0.35),
            Exercise::Dead => (SensorChannel::AccMagnitude, 0.4),
        };
        Self {
            channel,
            cutoff_hz,
            order: DEFAULT_FILTER_ORDER,
        }
    }

    /// Override the filter order (builder style).
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Override the cutoff frequency (builder style).
    pub fn with_cutoff(mut self, cutoff_hz: f64) -> Self {
        self.cutoff_hz = cutoff_hz;
        self
    }
}

/// Counts repetitions within a single pre-segmented set.
#[derive(Debug, Default)]
pub struct RepCounter;

impl RepCounter {
    /// Create a counter.
    pub fn new() -> Self {
        Self
    }

    /// Count repetitions in one set using its calibrated configuration.
    pub fn count(&self, set: &ExerciseSet) -> Result<u32, RepError> {
        self.count_with(set, &CounterSettings::for_exercise(set.exercise))
    }

    /// Count repetitions in one set with explicit settings.
    ///
    /// Filters the configured channel at the set's sampling rate, then
    /// counts strict local maxima in the smoothed signal. A set with too
    /// few samples yields zero peaks, never an error; only a missing
    /// channel is reported as a failure.
    pub fn count_with(
        &self,
        set: &ExerciseSet,
        settings: &CounterSettings,
    ) -> Result<u32, RepError> {
        let series = set
            .channel(settings.channel)
            .ok_or(RepError::MissingChannel {
                set_id: set.set_id,
                channel: settings.channel,
            })?;

        // A failed filter design degrades to counting the raw channel
        // rather than aborting the set.
        let filtered = match LowPassFilter::new(set.sampling_rate_hz, settings.cutoff_hz, settings.order)
        {
            Ok(filter) => filter.apply(series),
            Err(err) => {
                tracing::warn!(set_id = set.set_id, %err, "filter design failed, counting unfiltered channel");
                series.to_vec()
            }
        };

        let peaks = find_local_maxima(&filtered);
        tracing::debug!(
            set_id = set.set_id,
            exercise = %set.exercise,
            channel = %settings.channel,
            cutoff_hz = settings.cutoff_hz,
            reps = peaks.len(),
            "counted repetitions"
        );

        Ok(peaks.len() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::Intensity;
    use std::f64::consts::PI;

    /// Synthetic magnitude channel: `cycles` full sine periods riding on a
    /// constant baseline, at the device sampling rate. The phase offset
    /// keeps sample points from straddling a crest symmetrically, which
    /// would create a two-sample plateau that strict comparison skips.
    fn cycles_signal(cycles: u32, samples_per_cycle: usize) -> Vec<f64> {
        let n = cycles as usize * samples_per_cycle;
        (0..n)
            .map(|i| 1.0 + (2.0 * PI * i as f64 / samples_per_cycle as f64 + 0.4).sin())
            .collect()
    }

    fn bench_set(signal: Vec<f64>) -> ExerciseSet {
        ExerciseSet::new(1, Exercise::Bench, Intensity::Heavy)
            .with_channel(SensorChannel::AccMagnitude, signal)
    }

    #[test]
    fn test_counts_sine_cycles() {
        // 10 cycles of a 0.25 Hz rep motion at 5 Hz sampling
        let set = bench_set(cycles_signal(10, 20));
        let reps = RepCounter::new().count(&set).unwrap();
        assert!((reps as i64 - 10).abs() <= 1);
    }

    #[test]
    fn test_settings_table() {
        let row = CounterSettings::for_exercise(Exercise::Row);
        assert_eq!(row.channel, SensorChannel::GyrMagnitude);
        assert!((row.cutoff_hz - 0.65).abs() < 1e-12);
        assert_eq!(row.order, DEFAULT_FILTER_ORDER);

        let squat = CounterSettings::for_exercise(Exercise::Squat);
        assert_eq!(squat.channel, SensorChannel::AccMagnitude);
        assert!((squat.cutoff_hz - 0.35).abs() < 1e-12);

        let bench = CounterSettings::for_exercise(Exercise::Bench);
        assert!((bench.cutoff_hz - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_row_reads_gyroscope_channel() {
        // Only the gyroscope magnitude carries a known cycle count; the
        // accelerometer magnitude is flat. A correct lookup counts from
        // the gyroscope alone.
        let set = ExerciseSet::new(3, Exercise::Row, Intensity::Medium)
            .with_channel(SensorChannel::AccMagnitude, vec![1.0; 100])
            .with_channel(SensorChannel::GyrMagnitude, cycles_signal(10, 20));

        let reps = RepCounter::new().count(&set).unwrap();
        assert!((reps as i64 - 10).abs() <= 1);
    }

    #[test]
    fn test_tiny_set_counts_zero() {
        let set = bench_set(vec![1.0]);
        assert_eq!(RepCounter::new().count(&set).unwrap(), 0);

        let empty = bench_set(Vec::new());
        assert_eq!(RepCounter::new().count(&empty).unwrap(), 0);
    }

    #[test]
    fn test_missing_channel_is_an_error() {
        let set = ExerciseSet::new(9, Exercise::Bench, Intensity::Heavy);
        assert!(matches!(
            RepCounter::new().count(&set),
            Err(RepError::MissingChannel { set_id: 9, .. })
        ));
    }

    #[test]
    fn test_bad_cutoff_degrades_to_unfiltered_count() {
        // Cutoff above Nyquist: the counter falls back to the raw channel
        let settings = CounterSettings::for_exercise(Exercise::Bench).with_cutoff(10.0);
        let set = bench_set(cycles_signal(5, 10));

        let reps = RepCounter::new().count_with(&set, &settings).unwrap();
        assert_eq!(reps, 5);
    }

    #[test]
    fn test_order_is_configurable() {
        let settings = CounterSettings::for_exercise(Exercise::Dead).with_order(5);
        let set = bench_set(cycles_signal(8, 20));

        let reps = RepCounter::new().count_with(&set, &settings).unwrap();
        assert!((reps as i64 - 8).abs() <= 1);
    }
}
