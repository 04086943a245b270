//! Sampler — Symbol-Rate Decision Sampling
//!
//! Extracts one sample per symbol period from the receive-filter output.
//! The sampling instant is an integer percentage of the symbol period in
//! `[-50, 50]`; the pipeline's one-symbol base delay (`+sps`) keeps the
//! first instant inside the waveform even at -50%.
//!
//! Instant `k` is `round(offset * sps) + (k + 1) * sps`, for
//! `k = 0 .. n_symbols`. Samples beyond `n_symbols` are truncated; a
//! waveform too short to supply `n_symbols` samples is a shape error.
//!
//! ## Example
//!
//! ```rust
//! use baselink_core::sampler::Sampler;
//!
//! let sampler = Sampler::new(50);
//! let waveform: Vec<f64> = (0..32).map(|i| i as f64).collect();
//! let (samples, instants) = sampler.process(&waveform, 8, 2).unwrap();
//! assert_eq!(instants, vec![12, 20]);
//! assert_eq!(samples, vec![12.0, 20.0]);
//! ```

use crate::types::{SimError, SimResult};
use serde::{Deserialize, Serialize};

/// Default sampling instant, percent of the symbol period.
pub const DEFAULT_INSTANT_PERCENT: i32 = 50;

/// Symbol-rate sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sampler {
    /// Sampling instant within the symbol period, percent in `[-50, 50]`.
    pub instant_percent: i32,
}

impl Sampler {
    /// Create a sampler with the given instant percentage.
    pub fn new(instant_percent: i32) -> Self {
        Self { instant_percent }
    }

    /// Display name, as shown in the sampler variant list.
    pub fn name(&self) -> &'static str {
        "Simple sampler"
    }

    /// Sample indices into a waveform of `available` samples.
    pub fn instants(
        &self,
        available: usize,
        sps: usize,
        n_symbols: usize,
    ) -> SimResult<Vec<usize>> {
        let offset = (self.instant_percent as f64 / 100.0 * sps as f64).round() as i64;
        let mut instants = Vec::with_capacity(n_symbols);
        for k in 0..n_symbols {
            let idx = offset + ((k + 1) * sps) as i64;
            if idx < 0 || idx as usize >= available {
                return Err(SimError::ShortWaveform {
                    required: n_symbols,
                    available: instants.len(),
                });
            }
            instants.push(idx as usize);
        }
        Ok(instants)
    }

    /// Sample the waveform, returning the symbol-rate samples and the
    /// instants they were taken at.
    pub fn process(
        &self,
        waveform: &[f64],
        sps: usize,
        n_symbols: usize,
    ) -> SimResult<(Vec<f64>, Vec<usize>)> {
        let instants = self.instants(waveform.len(), sps, n_symbols)?;
        let samples = instants.iter().map(|&i| waveform[i]).collect();
        Ok((samples, instants))
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(DEFAULT_INSTANT_PERCENT)
    }
}
