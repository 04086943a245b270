//! Receive Filter — Matched Filter
//!
//! Filters the received waveform with the time-reversed transmit pulse.
//! The kernel is energy-normalized so the symbol-rate response of the
//! cascade (transmit pulse -> matched filter) peaks at exactly 1, and the
//! output is trimmed so the kernel's group delay is cancelled and symbol
//! `k`'s peak stays on the `(k + 1) * sps` sample grid.
//!
//! Short pulses use an extended kernel of `(filt_len + 1) * sps` taps with
//! the reversal delay reduced by one symbol period; long pulses reverse
//! over their full `filt_len * sps` support. Both cases reduce to the same
//! additive trim offset of `N/2 - 1` samples.
//!
//! The bypass variant is the default reference receiver.
//!
//! ## Example
//!
//! ```rust
//! use baselink_core::pulse::Pulse;
//! use baselink_core::rx_filter::ReceiveFilter;
//! use baselink_core::tx_filter::PulseFormatter;
//!
//! let sps = 8;
//! let pulse = Pulse::RectangularNrz;
//! let sent = PulseFormatter::new(pulse.clone()).process(&[1.0], sps);
//! let filtered = ReceiveFilter::Matched.process(&sent, &pulse, sps);
//! // Unit peak at the symbol instant
//! assert!((filtered[sps] - 1.0).abs() < 1e-9);
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

/// Receive-side filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiveFilter {
    /// Pass the received waveform through unchanged.
    Bypass,
    /// Filter matched to the transmit pulse.
    Matched,
}

impl ReceiveFilter {
    /// Display name, as shown in the receive-filter variant list.
    pub fn name(&self) -> &'static str {
        match self {
            ReceiveFilter::Bypass => "Bypass",
            ReceiveFilter::Matched => "Matched filter",
        }
    }

    /// Filter the received waveform. `pulse` is the transmit pulse recorded
    /// by the pulse formatter earlier in the pipeline.
    pub fn process(&self, received: &[f64], pulse: &Pulse, sps: usize) -> Vec<f64> {
        if matches!(self, ReceiveFilter::Bypass) || received.is_empty() {
            return received.to_vec();
        }

        let (n, delay) = if pulse.is_short() {
            let n = (pulse.filt_len() + 1) * sps;
            (n, (n - 1) as f64 / sps as f64 - 1.0)
        } else {
            let n = pulse.filt_len() * sps;
            (n, (n - 1) as f64 / sps as f64)
        };

        // Time-reversed pulse, normalized by its energy per symbol period
        let mut kernel: Vec<f64> = (0..n)
            .map(|i| pulse.amplitude(delay - i as f64 / sps as f64))
            .collect();
        let energy = kernel.iter().map(|p| p * p).sum::<f64>() / sps as f64;
        for p in kernel.iter_mut() {
            *p /= energy;
        }

        let full = convolve(received, &kernel);
        let start = n / 2 - 1;
        full[start..start + received.len()]
            .iter()
            .map(|&x| x / sps as f64)
            .collect()
    }
}

impl Default for ReceiveFilter {
    fn default() -> Self {
        ReceiveFilter::Bypass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tx_filter::PulseFormatter;

    #[test]
    fn test_bypass_is_identity() {
        let signal = vec![0.5, -1.0, 2.0];
        let out = ReceiveFilter::Bypass.process(&signal, &Pulse::RectangularNrz, 8);
        assert_eq!(out, signal);
    }

    #[test]
    fn test_matched_nrz_unit_peak_and_zero_isi() {
        let sps = 8;
        let pulse = Pulse::RectangularNrz;
        let sent = PulseFormatter::new(pulse.clone()).process(&[1.0, -1.0, 1.0], sps);
        let out = ReceiveFilter::Matched.process(&sent, &pulse, sps);
        assert_eq!(out.len(), sent.len());
        // Autocorrelation of the rectangle peaks at 1 on the symbol grid
        assert!((out[sps] - 1.0).abs() < 1e-9);
        assert!((out[2 * sps] + 1.0).abs() < 1e-9);
        assert!((out[3 * sps] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_matched_output_is_pulse_autocorrelation() {
        // A single NRZ symbol through the matched filter gives a triangle
        let sps = 8;
        let pulse = Pulse::RectangularNrz;
        let sent = PulseFormatter::new(pulse.clone()).process(&[1.0], sps);
        let out = ReceiveFilter::Matched.process(&sent, &pulse, sps);
        assert!((out[sps] - 1.0).abs() < 1e-9);
        assert!((out[sps / 2] - 0.5).abs() < 1e-9);
        assert!((out[sps + sps / 2] - 0.5).abs() < 1e-9);
        assert!(out[2 * sps].abs() < 1e-9);
    }

    #[test]
    fn test_matched_rrc_pair_combines_to_nyquist() {
        // RRC transmit + RRC matched receive = raised-cosine end to end,
        // so the symbol-rate samples recover the symbols (zero ISI up to
        // the truncation tails).
        let sps = 8;
        let pulse = Pulse::RootRaisedCosine {
            filt_len: 16,
            rolloff: 0.5,
        };
        let symbols = vec![1.0, 1.0, -1.0, 1.0, -1.0, -1.0];
        let sent = PulseFormatter::new(pulse.clone()).process(&symbols, sps);
        let out = ReceiveFilter::Matched.process(&sent, &pulse, sps);
        for (k, &x) in symbols.iter().enumerate() {
            assert!(
                (out[(k + 1) * sps] - x).abs() < 0.03,
                "symbol {} got {}",
                k,
                out[(k + 1) * sps]
            );
        }
    }

    #[test]
    fn test_matched_raised_cosine_keeps_decision_margins() {
        // The RC autocorrelation is not itself Nyquist, so matched
        // filtering an RC waveform leaves residual ISI; the signs at the
        // symbol instants still hold with ample margin.
        let sps = 8;
        let pulse = Pulse::RaisedCosine {
            filt_len: 16,
            rolloff: 0.5,
        };
        let symbols = vec![1.0, -1.0, -1.0, 1.0, 1.0, 1.0, -1.0, 1.0];
        let sent = PulseFormatter::new(pulse.clone()).process(&symbols, sps);
        let out = ReceiveFilter::Matched.process(&sent, &pulse, sps);
        for (k, &x) in symbols.iter().enumerate() {
            assert!(out[(k + 1) * sps] * x > 0.5);
        }
    }

    #[test]
    fn test_output_length_matches_input() {
        let sps = 16;
        for pulse in [
            Pulse::RectangularNrz,
            Pulse::Manchester,
            Pulse::Sinc { filt_len: 16 },
        ] {
            let sent = PulseFormatter::new(pulse.clone()).process(&[1.0; 5], sps);
            let out = ReceiveFilter::Matched.process(&sent, &pulse, sps);
            assert_eq!(out.len(), sent.len());
        }
    }
}
