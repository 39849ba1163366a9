//! Benchmark evaluation of the repetition counter.
//!
//! Runs the counter over every labeled set, pairs each prediction with
//! the category-derived ground truth, and aggregates the error. One bad
//! set never aborts the run; it is logged and scored as zero predicted
//! reps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data::types::{Exercise, ExerciseSet, Intensity};
use crate::reps::counter::RepCounter;
use crate::reps::types::RepError;

/// Predicted vs. expected repetitions for one set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetEvaluation {
    /// Exercise label
    pub exercise: Exercise,
    /// Intensity category
    pub intensity: Intensity,
    /// Set identifier
    pub set_id: u32,
    /// Ground-truth repetitions derived from the category
    pub expected: u32,
    /// Repetitions predicted by the counter
    pub predicted: u32,
}

impl SetEvaluation {
    /// Absolute prediction error for this set.
    pub fn absolute_error(&self) -> u32 {
        self.expected.abs_diff(self.predicted)
    }
}

/// Mean expected/predicted reps for one (exercise, intensity) group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Exercise label
    pub exercise: Exercise,
    /// Intensity category
    pub intensity: Intensity,
    /// Number of sets in the group
    pub set_count: usize,
    /// Mean ground-truth repetitions
    pub mean_expected: f64,
    /// Mean predicted repetitions
    pub mean_predicted: f64,
}

/// Result of evaluating the counter over a labeled dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepEvaluation {
    /// Per-set rows, sorted by set identifier
    pub rows: Vec<SetEvaluation>,
    /// Mean of |predicted - expected| across all sets
    pub mean_absolute_error: f64,
    /// When the evaluation ran
    pub evaluated_at: DateTime<Utc>,
}

impl RepEvaluation {
    /// Aggregate mean expected/predicted reps per (exercise, intensity)
    /// group, ordered by exercise then intensity.
    pub fn summary_by_group(&self) -> Vec<GroupSummary> {
        let mut groups: Vec<GroupSummary> = Vec::new();

        for exercise in Exercise::ALL {
            for intensity in [Intensity::Heavy, Intensity::Medium] {
                let rows: Vec<&SetEvaluation> = self
                    .rows
                    .iter()
                    .filter(|r| r.exercise == exercise && r.intensity == intensity)
                    .collect();
                if rows.is_empty() {
                    continue;
                }

                let n = rows.len() as f64;
                groups.push(GroupSummary {
                    exercise,
                    intensity,
                    set_count: rows.len(),
                    mean_expected: rows.iter().map(|r| r.expected as f64).sum::<f64>() / n,
                    mean_predicted: rows.iter().map(|r| r.predicted as f64).sum::<f64>() / n,
                });
            }
        }
        groups
    }
}

/// Evaluate the repetition counter over every set in a labeled dataset.
///
/// Each set is counted independently with its calibrated per-exercise
/// configuration; rows are merged by set identifier so the output is
/// deterministic regardless of computation order. An empty collection has
/// no defined mean error and is rejected.
pub fn evaluate(sets: &[ExerciseSet]) -> Result<RepEvaluation, RepError> {
    if sets.is_empty() {
        return Err(RepError::EmptyDataset);
    }

    let counter = RepCounter::new();
    let mut rows: Vec<SetEvaluation> = sets
        .iter()
        .map(|set| {
            let predicted = match counter.count(set) {
                Ok(reps) => reps,
                Err(err) => {
                    tracing::warn!(set_id = set.set_id, %err, "set failed to count, scoring zero reps");
                    0
                }
            };
            SetEvaluation {
                exercise: set.exercise,
                intensity: set.intensity,
                set_id: set.set_id,
                expected: set.expected_reps(),
                predicted,
            }
        })
        .collect();
    rows.sort_by_key(|r| r.set_id);

    let mean_absolute_error = rows
        .iter()
        .map(|r| r.absolute_error() as f64)
        .sum::<f64>()
        / rows.len() as f64;

    tracing::info!(
        sets = rows.len(),
        mean_absolute_error,
        "evaluated repetition counter"
    );

    Ok(RepEvaluation {
        rows,
        mean_absolute_error,
        evaluated_at: Utc::now(),
    })
}
