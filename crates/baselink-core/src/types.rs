//! Core types for the baseband link simulation engine
//!
//! This module defines the fundamental types shared across the simulation
//! pipeline: the sample alias used for real-valued baseband waveforms, the
//! discrete/continuous output classification of pipeline stages, and the
//! error taxonomy.
//!
//! ## Signal representation
//!
//! The engine works on real-valued baseband signals. Discrete stages (bit
//! sources, encoders, samplers, decoders) produce one value per bit/symbol;
//! continuous stages (filters, channels) produce oversampled waveforms at
//! `sps` samples per symbol period.

use serde::{Deserialize, Serialize};

/// A real-valued signal sample.
pub type Sample = f64;

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;

/// Classification of a pipeline stage's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalKind {
    /// One value per symbol (bit sequences, symbol sequences, sampler output).
    Discrete,
    /// Oversampled waveform at `sps` samples per symbol period.
    Continuous,
}

/// Errors that can occur during configuration or a pipeline run.
///
/// Configuration errors are rejected before a run starts and leave all
/// state untouched. Pipeline errors abort the run; previously computed
/// results remain available (stale).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("unknown variant: {0}")]
    UnknownVariant(String),

    #[error("invalid detector: {0}")]
    InvalidThresholds(String),

    #[error("stage {stage} length mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        stage: usize,
        expected: usize,
        actual: usize,
    },

    #[error("stage {0} produced non-finite samples")]
    NonFiniteOutput(usize),

    #[error("waveform too short to sample: need {required} samples, have {available}")]
    ShortWaveform { required: usize, available: usize },

    #[error("source produced an empty bit sequence")]
    EmptyBitSequence,

    #[error("stage {stage} requires an upstream {missing} stage")]
    MissingUpstream {
        stage: usize,
        missing: &'static str,
    },
}
