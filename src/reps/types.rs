//! Shared error definitions for the counting pipeline.

use thiserror::Error;

use crate::data::types::SensorChannel;

/// Error types for repetition counting and evaluation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RepError {
    /// Exercise label has no calibrated filter configuration
    #[error("no filter configuration for exercise label '{0}'")]
    UnknownLabel(String),

    /// Cutoff frequency violates the Nyquist bound
    #[error("cutoff {cutoff_hz} Hz must lie in (0, {nyquist_hz}) Hz")]
    InvalidCutoff {
        /// Requested cutoff frequency
        cutoff_hz: f64,
        /// Nyquist frequency of the series
        nyquist_hz: f64,
    },

    /// Filter order outside the supported range
    #[error("filter order {order} is invalid, must be at least 1")]
    InvalidOrder {
        /// Requested order
        order: usize,
    },

    /// The set does not carry the configured channel
    #[error("set {set_id} is missing channel '{channel}'")]
    MissingChannel {
        /// Identifier of the offending set
        set_id: u32,
        /// Channel the configuration selects
        channel: SensorChannel,
    },

    /// Evaluation over zero sets has no defined mean error
    #[error("cannot evaluate an empty set collection")]
    EmptyDataset,
}
