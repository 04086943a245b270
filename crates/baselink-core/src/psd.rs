//! Power Spectral Density — Periodogram estimation
//!
//! Two-sided periodogram over a fixed FFT length, returned on a centered
//! frequency axis. Used by the orchestrator to expose a spectrum for every
//! continuous-valued pipeline stage.
//!
//! The estimate is scaled as a density (V²/Hz): the integral of the PSD
//! over the full frequency axis equals the mean power of the analyzed
//! segment. Signals shorter than the FFT length are zero-padded; longer
//! signals are truncated to the leading `n_fft` samples.
//!
//! ## Example
//!
//! ```rust
//! use baselink_core::psd::Periodogram;
//!
//! let fs = 64.0;
//! let signal: Vec<f64> = (0..4096)
//!     .map(|i| (2.0 * std::f64::consts::PI * 4.0 * i as f64 / fs).sin())
//!     .collect();
//! let mut psd = Periodogram::new(8192, fs);
//! let spectrum = psd.estimate(&signal);
//! assert_eq!(spectrum.len(), 8192);
//! // Total power of a unit sinusoid is 1/2
//! let df = fs / 8192.0;
//! let power: f64 = spectrum.iter().sum::<f64>() * df;
//! assert!((power - 0.5).abs() < 1e-9);
//! ```

use crate::fft_utils::{centered_freq_axis, fftshift, FftProcessor};

/// Periodogram PSD estimator for real signals.
#[derive(Debug)]
pub struct Periodogram {
    n_fft: usize,
    sample_rate: f64,
    fft: FftProcessor,
}

impl Periodogram {
    /// Create an estimator with the given FFT length and sample rate.
    pub fn new(n_fft: usize, sample_rate: f64) -> Self {
        Self {
            n_fft,
            sample_rate,
            fft: FftProcessor::new(n_fft),
        }
    }

    /// FFT length.
    pub fn n_fft(&self) -> usize {
        self.n_fft
    }

    /// Centered frequency axis matching [`estimate`](Self::estimate).
    pub fn freq_axis(&self) -> Vec<f64> {
        centered_freq_axis(self.n_fft, self.sample_rate)
    }

    /// Two-sided PSD in linear units (V²/Hz), fftshifted so the DC bin is
    /// at index `n_fft / 2`.
    pub fn estimate(&mut self, signal: &[f64]) -> Vec<f64> {
        let n_seg = signal.len().min(self.n_fft).max(1);
        let spectrum = self.fft.fft_real(signal);
        let scale = 1.0 / (self.sample_rate * n_seg as f64);
        let psd: Vec<f64> = spectrum.iter().map(|c| c.norm_sqr() * scale).collect();
        fftshift(&psd)
    }

    /// PSD in dB/Hz with a -200 dB floor for empty bins.
    pub fn estimate_db(&mut self, signal: &[f64]) -> Vec<f64> {
        self.estimate(signal)
            .iter()
            .map(|&p| if p > 0.0 { 10.0 * p.log10() } else { -200.0 })
            .collect()
    }
}
