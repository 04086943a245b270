//! Transmit Filter — Pulse Formatter
//!
//! Converts a symbol sequence into an oversampled waveform: the symbols are
//! zero-stuffed at `sps`-sample intervals into a buffer with one symbol
//! period of padding on each side, then convolved with the sampled pulse.
//!
//! The output is trimmed so that sample index `(k + 1) * sps` carries
//! symbol `k`'s peak response: short pulses (support `[0, 1)`) need no
//! trim, long pulses (centered at `filt_len / 2`) are advanced by half the
//! kernel length. The constant one-symbol base delay is what the sampler
//! compensates with its `+sps` offset.
//!
//! ## Example
//!
//! ```rust
//! use baselink_core::pulse::Pulse;
//! use baselink_core::tx_filter::PulseFormatter;
//!
//! let tx = PulseFormatter::new(Pulse::RectangularNrz);
//! let waveform = tx.process(&[1.0, -1.0], 4);
//! assert_eq!(waveform.len(), 16); // (2 + 2) * sps
//! assert_eq!(&waveform[4..12], &[1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0]);
//! ```

use crate::pulse::Pulse;
use serde::{Deserialize, Serialize};

/// Full linear convolution, output length `x.len() + h.len() - 1`.
fn convolve(x: &[f64], h: &[f64]) -> Vec<f64> {
    if x.is_empty() || h.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0.0; x.len() + h.len() - 1];
    for (i, &xi) in x.iter().enumerate() {
        if xi == 0.0 {
            continue;
        }
        for (j, &hj) in h.iter().enumerate() {
            out[i + j] += xi * hj;
        }
    }
    out
}

/// Pulse-formatting transmit filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseFormatter {
    /// Pulse shape convolved with the symbol impulses.
    pub pulse: Pulse,
}

impl PulseFormatter {
    /// Create a formatter for the given pulse.
    pub fn new(pulse: Pulse) -> Self {
        Self { pulse }
    }

    /// Shape a symbol sequence into a waveform of `(len + 2) * sps` samples.
    pub fn process(&self, symbols: &[f64], sps: usize) -> Vec<f64> {
        let kernel = self.pulse.waveform(sps);
        let n = kernel.len();

        let mut stuffed = vec![0.0; (symbols.len() + 2) * sps];
        for (k, &x) in symbols.iter().enumerate() {
            stuffed[(k + 1) * sps] = x;
        }

        let full = convolve(&stuffed, &kernel);

        let start = if self.pulse.is_short() { 0 } else { n / 2 };
        full[start..start + stuffed.len()].to_vec()
    }
}

impl Default for PulseFormatter {
    fn default() -> Self {
        Self::new(Pulse::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convolve_known_result() {
        assert_eq!(
            convolve(&[1.0, 2.0, 3.0], &[1.0, 1.0]),
            vec![1.0, 3.0, 5.0, 3.0]
        );
        assert_eq!(convolve(&[2.0], &[0.5, 0.25]), vec![1.0, 0.5]);
    }

    #[test]
    fn test_output_length() {
        let tx = PulseFormatter::new(Pulse::RectangularNrz);
        assert_eq!(tx.process(&[1.0; 10], 64).len(), 12 * 64);

        let tx = PulseFormatter::new(Pulse::Sinc { filt_len: 16 });
        assert_eq!(tx.process(&[1.0; 10], 8).len(), 12 * 8);
    }

    #[test]
    fn test_nrz_occupies_symbol_period() {
        let sps = 8;
        let tx = PulseFormatter::new(Pulse::RectangularNrz);
        let w = tx.process(&[1.0, -1.0, 1.0], sps);
        // Symbol k occupies [(k+1)*sps, (k+2)*sps)
        for i in 0..sps {
            assert_eq!(w[sps + i], 1.0);
            assert_eq!(w[2 * sps + i], -1.0);
            assert_eq!(w[3 * sps + i], 1.0);
        }
        // Leading and trailing symbol periods are padding
        assert!(w[..sps].iter().all(|&x| x == 0.0));
        assert!(w[4 * sps..].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_rz_duty_cycle() {
        let sps = 8;
        let tx = PulseFormatter::new(Pulse::RectangularRz);
        let w = tx.process(&[1.0], sps);
        let on: Vec<usize> = (0..w.len()).filter(|&i| w[i] != 0.0).collect();
        assert_eq!(on, vec![sps + 2, sps + 3, sps + 4, sps + 5]);
    }

    #[test]
    fn test_long_pulse_peak_alignment() {
        let sps = 16;
        let tx = PulseFormatter::new(Pulse::Sinc { filt_len: 16 });
        let w = tx.process(&[1.0, 0.0, 0.0, 1.0], sps);
        // Each symbol's pulse peaks at (k+1)*sps
        assert!((w[sps] - 1.0).abs() < 1e-9);
        assert!((w[4 * sps] - 1.0).abs() < 1e-9);
        // A sinc contributes nothing at the other symbols' instants
        assert!(w[2 * sps].abs() < 1e-9);
        assert!(w[3 * sps].abs() < 1e-9);
    }

    #[test]
    fn test_raised_cosine_nyquist_at_symbol_instants() {
        // RC is a Nyquist pulse: the formatted waveform reproduces the
        // symbols exactly on the symbol-rate sample grid.
        let sps = 8;
        let tx = PulseFormatter::new(Pulse::RaisedCosine {
            filt_len: 16,
            rolloff: 0.5,
        });
        let symbols = vec![1.0, -1.0, -1.0, 1.0, 1.0, 1.0, -1.0, 1.0];
        let w = tx.process(&symbols, sps);
        for (k, &x) in symbols.iter().enumerate() {
            assert!((w[(k + 1) * sps] - x).abs() < 1e-9);
        }
    }

    #[test]
    fn test_superposition() {
        let sps = 8;
        let tx = PulseFormatter::new(Pulse::RaisedCosine {
            filt_len: 16,
            rolloff: 0.5,
        });
        let a = tx.process(&[1.0, 0.0], sps);
        let b = tx.process(&[0.0, -0.5], sps);
        let ab = tx.process(&[1.0, -0.5], sps);
        for i in 0..ab.len() {
            assert!((ab[i] - (a[i] + b[i])).abs() < 1e-12);
        }
    }

    #[test]
    fn test_empty_symbols() {
        let tx = PulseFormatter::new(Pulse::RectangularNrz);
        assert_eq!(tx.process(&[], 8).len(), 16);
    }
}
