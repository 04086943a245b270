//! Channel Frequency Response
//!
//! Linear time-invariant channel filtering applied in the frequency domain:
//! FFT, shift to the centered frequency axis, multiply by `H(f)`, inverse
//! shift, inverse FFT, keep the real part. Channel responses model real
//! physical systems, so any imaginary residue after the inverse transform
//! is numerical error and is discarded.
//!
//! The transform length equals the input length; the resulting circular
//! boundary aliasing is an accepted approximation for finite-length
//! simulation.
//!
//! ## Responses
//!
//! | Variant              | `H(f)`                                        |
//! |----------------------|-----------------------------------------------|
//! | Bypass               | 1                                             |
//! | Ideal lowpass        | 1 for `-B <= f < B`, else 0                   |
//! | First-order lowpass  | `1 / (1 + j 2 pi f / f0)`                     |
//! | Second-order bandpass| `1 / (1 + j (v - 1/v))`, `v = (f + eps) / f0` |
//!
//! ## Example
//!
//! ```rust
//! use baselink_core::channel_freq::FrequencyResponse;
//!
//! let ch = FrequencyResponse::IdealLowpass { bandwidth: 2.0 };
//! let signal = vec![1.0, 0.5, -0.25, 0.0, 0.25, -0.5, -1.0, 0.0];
//! let out = ch.process(&signal, 64.0);
//! assert_eq!(out.len(), signal.len());
//! ```

use crate::fft_utils::{fftshift, ifftshift, FftProcessor};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Keeps the `1/v` pole of the bandpass response finite at `f = 0`.
const FREQ_EPS: f64 = 1e-12;

/// LTI channel magnitude/phase response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FrequencyResponse {
    /// Distortionless channel.
    Bypass,
    /// Brick-wall lowpass with two-sided bandwidth `B`.
    IdealLowpass { bandwidth: f64 },
    /// Single-pole (RC) lowpass with cutoff `f0`.
    FirstOrderLowpass { cutoff: f64 },
    /// Double-pole (RLC) bandpass centered at `f0`.
    SecondOrderBandpass { center: f64 },
}

impl FrequencyResponse {
    /// Display name, as shown in the channel variant list.
    pub fn name(&self) -> &'static str {
        match self {
            FrequencyResponse::Bypass => "Bypass",
            FrequencyResponse::IdealLowpass { .. } => "Ideal lowpass",
            FrequencyResponse::FirstOrderLowpass { .. } => "First order lowpass",
            FrequencyResponse::SecondOrderBandpass { .. } => "Second order bandpass",
        }
    }

    /// Complex response at frequency `f` (Hz).
    pub fn response(&self, f: f64) -> Complex64 {
        match *self {
            FrequencyResponse::Bypass => Complex64::new(1.0, 0.0),
            FrequencyResponse::IdealLowpass { bandwidth } => {
                if -bandwidth <= f && f < bandwidth {
                    Complex64::new(1.0, 0.0)
                } else {
                    Complex64::new(0.0, 0.0)
                }
            }
            FrequencyResponse::FirstOrderLowpass { cutoff } => {
                Complex64::new(1.0, 0.0) / Complex64::new(1.0, 2.0 * PI * f / cutoff)
            }
            FrequencyResponse::SecondOrderBandpass { center } => {
                let v = (f + FREQ_EPS) / center;
                Complex64::new(1.0, 0.0) / Complex64::new(1.0, v - 1.0 / v)
            }
        }
    }

    /// Filter a waveform sampled at `sample_rate` through the response.
    pub fn process(&self, signal: &[f64], sample_rate: f64) -> Vec<f64> {
        if matches!(self, FrequencyResponse::Bypass) || signal.is_empty() {
            return signal.to_vec();
        }

        let n = signal.len();
        let mut fft = FftProcessor::new(n);

        let spectrum = fft.fft_real(signal);
        let mut shifted = fftshift(&spectrum);

        let half = (n / 2) as i64;
        for (i, bin) in shifted.iter_mut().enumerate() {
            let f = (i as i64 - half) as f64 * sample_rate / n as f64;
            *bin *= self.response(f);
        }

        let unshifted = ifftshift(&shifted);
        fft.ifft(&unshifted).iter().map(|c| c.re).collect()
    }
}

impl Default for FrequencyResponse {
    fn default() -> Self {
        FrequencyResponse::Bypass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(freq: f64, sample_rate: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| (2.0 * PI * freq * i as f64 / sample_rate).sin())
            .collect()
    }

    fn power(x: &[f64]) -> f64 {
        x.iter().map(|v| v * v).sum::<f64>() / x.len() as f64
    }

    #[test]
    fn test_bypass_is_identity() {
        let ch = FrequencyResponse::Bypass;
        let signal = vec![1.0, -2.0, 3.0, 0.5];
        assert_eq!(ch.process(&signal, 64.0), signal);
    }

    #[test]
    fn test_wideband_ideal_lowpass_is_transparent() {
        let ch = FrequencyResponse::IdealLowpass { bandwidth: 100.0 };
        let signal = tone(3.0, 64.0, 256);
        let out = ch.process(&signal, 64.0);
        for (a, b) in signal.iter().zip(out.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_ideal_lowpass_rejects_out_of_band_tone() {
        let fs = 64.0;
        // Integer number of cycles so the tone sits on an FFT bin
        let in_band = tone(2.0, fs, 256);
        let out_band = tone(24.0, fs, 256);
        let ch = FrequencyResponse::IdealLowpass { bandwidth: 8.0 };

        let kept = ch.process(&in_band, fs);
        let removed = ch.process(&out_band, fs);
        assert!((power(&kept) - power(&in_band)).abs() < 1e-9);
        assert!(power(&removed) < 1e-18);
    }

    #[test]
    fn test_first_order_preserves_dc() {
        let ch = FrequencyResponse::FirstOrderLowpass { cutoff: 2.0 };
        let signal = vec![1.0; 128];
        let out = ch.process(&signal, 64.0);
        for v in out {
            assert!((v - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_first_order_attenuates_high_frequencies() {
        let fs = 64.0;
        let f0 = 1.0;
        let ch = FrequencyResponse::FirstOrderLowpass { cutoff: f0 };
        let signal = tone(16.0, fs, 256);
        let out = ch.process(&signal, fs);
        // |H| = 1/sqrt(1 + (2 pi f / f0)^2) at f = 16
        let expected = 1.0 / (1.0 + (2.0 * PI * 16.0 / f0).powi(2)).sqrt();
        let gain = (power(&out) / power(&signal)).sqrt();
        assert!((gain - expected).abs() < 1e-6);
    }

    #[test]
    fn test_bandpass_blocks_dc_and_passes_center() {
        let fs = 64.0;
        let ch = FrequencyResponse::SecondOrderBandpass { center: 8.0 };

        let dc = vec![1.0; 256];
        let out = ch.process(&dc, fs);
        assert!(power(&out) < 1e-12);

        let centered = tone(8.0, fs, 256);
        let out = ch.process(&centered, fs);
        assert!((power(&out) - power(&centered)).abs() < 1e-6);
    }

    #[test]
    fn test_output_is_finite_and_same_length() {
        let fs = 64.0;
        let signal = tone(5.0, fs, 300); // non-power-of-two length
        for ch in [
            FrequencyResponse::IdealLowpass { bandwidth: 4.0 },
            FrequencyResponse::FirstOrderLowpass { cutoff: 2.0 },
            FrequencyResponse::SecondOrderBandpass { center: 2.0 },
        ] {
            let out = ch.process(&signal, fs);
            assert_eq!(out.len(), signal.len());
            assert!(out.iter().all(|v| v.is_finite()));
        }
    }
}
