//! Core types for labeled exercise sets and their sensor channels.
//!
//! A set is one continuous performance of repeated lifts of a single
//! exercise. Each set carries the six raw IMU channels plus the derived
//! magnitude channels, all sampled on a fixed interval.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::reps::types::RepError;

/// Sampling rate of the recording device (one sample every 200 ms).
pub const DEFAULT_SAMPLING_RATE_HZ: f64 = 1000.0 / 200.0;

/// The barbell exercises the counter is calibrated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exercise {
    /// Bench press
    Bench,
    /// Back squat
    Squat,
    /// Barbell row
    Row,
    /// Overhead press
    Ohp,
    /// Deadlift
    Dead,
}

impl Exercise {
    /// All calibrated exercises, in dataset order.
    pub const ALL: [Exercise; 5] = [
        Exercise::Bench,
        Exercise::Squat,
        Exercise::Row,
        Exercise::Ohp,
        Exercise::Dead,
    ];

    /// Parse a dataset label string.
    ///
    /// Labels outside the calibrated table (including `"rest"` periods)
    /// are rejected rather than silently falling back to a default
    /// configuration.
    pub fn parse(label: &str) -> Result<Self, RepError> {
        match label {
            "bench" => Ok(Exercise::Bench),
            "squat" => Ok(Exercise::Squat),
            "row" => Ok(Exercise::Row),
            "ohp" => Ok(Exercise::Ohp),
            "dead" => Ok(Exercise::Dead),
            other => Err(RepError::UnknownLabel(other.to_string())),
        }
    }

    /// Dataset label for this exercise.
    pub fn label(&self) -> &'static str {
        match self {
            Exercise::Bench => "bench",
            Exercise::Squat => "squat",
            Exercise::Row => "row",
            Exercise::Ohp => "ohp",
            Exercise::Dead => "dead",
        }
    }
}

impl std::fmt::Display for Exercise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Intensity category of a set. Ground-truth repetitions are derived from
/// the category, not measured: heavy sets are performed for 5 reps, all
/// other sets for 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    /// Heavy load, 5 expected repetitions
    Heavy,
    /// Medium load, 10 expected repetitions
    Medium,
}

impl Intensity {
    /// Parse a dataset category string. Any non-heavy category maps to
    /// `Medium`, matching the ground-truth rule `heavy => 5, else => 10`.
    pub fn parse(category: &str) -> Self {
        if category == "heavy" {
            Intensity::Heavy
        } else {
            Intensity::Medium
        }
    }

    /// Expected repetitions for a set of this intensity.
    pub fn expected_reps(&self) -> u32 {
        match self {
            Intensity::Heavy => 5,
            Intensity::Medium => 10,
        }
    }

    /// Dataset category label.
    pub fn label(&self) -> &'static str {
        match self {
            Intensity::Heavy => "heavy",
            Intensity::Medium => "medium",
        }
    }
}

impl std::fmt::Display for Intensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Named numeric channels within a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorChannel {
    /// Accelerometer X axis (g)
    AccX,
    /// Accelerometer Y axis (g)
    AccY,
    /// Accelerometer Z axis (g)
    AccZ,
    /// Gyroscope X axis (deg/s)
    GyrX,
    /// Gyroscope Y axis (deg/s)
    GyrY,
    /// Gyroscope Z axis (deg/s)
    GyrZ,
    /// Derived accelerometer magnitude sqrt(x²+y²+z²)
    AccMagnitude,
    /// Derived gyroscope magnitude sqrt(x²+y²+z²)
    GyrMagnitude,
}

impl SensorChannel {
    /// Display name matching the dataset column naming.
    pub fn name(&self) -> &'static str {
        match self {
            SensorChannel::AccX => "acc_x",
            SensorChannel::AccY => "acc_y",
            SensorChannel::AccZ => "acc_z",
            SensorChannel::GyrX => "gyr_x",
            SensorChannel::GyrY => "gyr_y",
            SensorChannel::GyrZ => "gyr_z",
            SensorChannel::AccMagnitude => "acc_r",
            SensorChannel::GyrMagnitude => "gyr_r",
        }
    }
}

impl std::fmt::Display for SensorChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One labeled lifting set: a contiguous, time-ordered block of sensor
/// samples belonging to a single performed exercise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseSet {
    /// Set identifier from the dataset
    pub set_id: u32,
    /// Exercise performed during this set
    pub exercise: Exercise,
    /// Intensity category (determines expected reps)
    pub intensity: Intensity,
    /// Sampling rate of every channel (Hz)
    pub sampling_rate_hz: f64,
    /// Named channels; read-only once inserted
    channels: HashMap<SensorChannel, Vec<f64>>,
}

impl ExerciseSet {
    /// Create an empty set at the device's default sampling rate.
    pub fn new(set_id: u32, exercise: Exercise, intensity: Intensity) -> Self {
        Self {
            set_id,
            exercise,
            intensity,
            sampling_rate_hz: DEFAULT_SAMPLING_RATE_HZ,
            channels: HashMap::new(),
        }
    }

    /// Override the sampling rate (builder style).
    pub fn with_sampling_rate(mut self, sampling_rate_hz: f64) -> Self {
        self.sampling_rate_hz = sampling_rate_hz;
        self
    }

    /// Attach a channel (builder style). Replaces any existing series
    /// under the same name.
    pub fn with_channel(mut self, channel: SensorChannel, samples: Vec<f64>) -> Self {
        self.channels.insert(channel, samples);
        self
    }

    /// Derive the magnitude channels from the raw axes, where all three
    /// axes of a sensor are present. Existing magnitude channels are left
    /// untouched; derivation happens once, upstream of counting.
    pub fn with_magnitudes(mut self) -> Self {
        use SensorChannel::*;

        if !self.channels.contains_key(&AccMagnitude) {
            if let Some(mag) = self.magnitude_of(AccX, AccY, AccZ) {
                self.channels.insert(AccMagnitude, mag);
            }
        }
        if !self.channels.contains_key(&GyrMagnitude) {
            if let Some(mag) = self.magnitude_of(GyrX, GyrY, GyrZ) {
                self.channels.insert(GyrMagnitude, mag);
            }
        }
        self
    }

    fn magnitude_of(
        &self,
        x: SensorChannel,
        y: SensorChannel,
        z: SensorChannel,
    ) -> Option<Vec<f64>> {
        let (x, y, z) = (
            self.channels.get(&x)?,
            self.channels.get(&y)?,
            self.channels.get(&z)?,
        );
        let len = x.len().min(y.len()).min(z.len());
        Some(
            (0..len)
                .map(|i| (x[i] * x[i] + y[i] * y[i] + z[i] * z[i]).sqrt())
                .collect(),
        )
    }

    /// Get a channel's samples, if present.
    pub fn channel(&self, channel: SensorChannel) -> Option<&[f64]> {
        self.channels.get(&channel).map(Vec::as_slice)
    }

    /// Number of samples in the set (longest channel).
    pub fn len(&self) -> usize {
        self.channels.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Whether the set has no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Duration of the set in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sampling_rate_hz > 0.0 {
            self.len() as f64 / self.sampling_rate_hz
        } else {
            0.0
        }
    }

    /// Expected repetitions from the intensity category.
    pub fn expected_reps(&self) -> u32 {
        self.intensity.expected_reps()
    }
}
