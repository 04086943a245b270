//! FFT Utilities
//!
//! Thin wrapper around `rustfft` plus the spectrum bookkeeping the rest of
//! the engine needs: forward/inverse transforms of real signals,
//! `fftshift`/`ifftshift` reordering, and the centered frequency axis used
//! by the channel models and PSD estimator.
//!
//! ## Example
//!
//! ```rust
//! use baselink_core::fft_utils::{FftProcessor, fftshift, centered_freq_axis};
//!
//! let mut fft = FftProcessor::new(8);
//! let signal = vec![1.0; 8];
//! let spectrum = fft.fft_real(&signal);
//! // DC bin carries the full sum
//! assert!((spectrum[0].re - 8.0).abs() < 1e-12);
//!
//! let f = centered_freq_axis(8, 1.0);
//! assert_eq!(f[4], 0.0);
//! let shifted = fftshift(&spectrum);
//! assert!((shifted[4].re - 8.0).abs() < 1e-12);
//! ```

use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::fmt;
use std::sync::Arc;

/// FFT processor for a fixed transform size.
pub struct FftProcessor {
    size: usize,
    fft_forward: Arc<dyn Fft<f64>>,
    fft_inverse: Arc<dyn Fft<f64>>,
    scratch: Vec<Complex64>,
}

impl fmt::Debug for FftProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FftProcessor")
            .field("size", &self.size)
            .finish()
    }
}

impl FftProcessor {
    /// Create a processor for the given transform size.
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft_forward = planner.plan_fft_forward(size);
        let fft_inverse = planner.plan_fft_inverse(size);
        let scratch_len = fft_forward
            .get_inplace_scratch_len()
            .max(fft_inverse.get_inplace_scratch_len());
        let scratch = vec![Complex64::new(0.0, 0.0); scratch_len];

        Self {
            size,
            fft_forward,
            fft_inverse,
            scratch,
        }
    }

    /// Transform size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Forward FFT of a complex buffer, in place.
    pub fn fft_inplace(&mut self, buffer: &mut [Complex64]) {
        self.fft_forward
            .process_with_scratch(buffer, &mut self.scratch);
    }

    /// Forward FFT of a real signal. The input is zero-padded or truncated
    /// to the transform size.
    pub fn fft_real(&mut self, input: &[f64]) -> Vec<Complex64> {
        let mut buffer: Vec<Complex64> = input
            .iter()
            .take(self.size)
            .map(|&x| Complex64::new(x, 0.0))
            .collect();
        buffer.resize(self.size, Complex64::new(0.0, 0.0));
        self.fft_inplace(&mut buffer);
        buffer
    }

    /// Inverse FFT, in place, normalized by `1/N`.
    pub fn ifft_inplace(&mut self, buffer: &mut [Complex64]) {
        self.fft_inverse
            .process_with_scratch(buffer, &mut self.scratch);
        let scale = 1.0 / self.size as f64;
        for sample in buffer.iter_mut() {
            *sample *= scale;
        }
    }

    /// Inverse FFT returning a new buffer.
    pub fn ifft(&mut self, input: &[Complex64]) -> Vec<Complex64> {
        let mut buffer = input.to_vec();
        buffer.resize(self.size, Complex64::new(0.0, 0.0));
        self.ifft_inplace(&mut buffer);
        buffer
    }
}

/// Reorder a spectrum so the zero-frequency bin moves to the center
/// (index `n / 2`).
pub fn fftshift<T: Copy>(x: &[T]) -> Vec<T> {
    let n = x.len();
    let split = (n + 1) / 2;
    x[split..].iter().chain(x[..split].iter()).copied().collect()
}

/// Inverse of [`fftshift`].
pub fn ifftshift<T: Copy>(x: &[T]) -> Vec<T> {
    let n = x.len();
    let split = n / 2;
    x[split..].iter().chain(x[..split].iter()).copied().collect()
}

/// Centered frequency axis in Hz for an `n`-point transform at the given
/// sample rate: bin `i` sits at `(i - n/2) * sample_rate / n`.
pub fn centered_freq_axis(n: usize, sample_rate: f64) -> Vec<f64> {
    let half = (n / 2) as i64;
    (0..n as i64)
        .map(|i| (i - half) as f64 * sample_rate / n as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fft_ifft_roundtrip() {
        let mut fft = FftProcessor::new(64);
        let signal: Vec<f64> = (0..64).map(|i| (i as f64 * 0.3).sin()).collect();
        let spectrum = fft.fft_real(&signal);
        let recovered = fft.ifft(&spectrum);
        for (a, b) in signal.iter().zip(recovered.iter()) {
            assert!((a - b.re).abs() < 1e-10);
            assert!(b.im.abs() < 1e-10);
        }
    }

    #[test]
    fn test_parseval() {
        let mut fft = FftProcessor::new(128);
        let signal: Vec<f64> = (0..128).map(|i| ((i * 7) % 13) as f64 - 6.0).collect();
        let spectrum = fft.fft_real(&signal);
        let time_energy: f64 = signal.iter().map(|x| x * x).sum();
        let freq_energy: f64 = spectrum.iter().map(|c| c.norm_sqr()).sum::<f64>() / 128.0;
        assert!((time_energy - freq_energy).abs() < 1e-8);
    }

    #[test]
    fn test_fftshift_even() {
        let x = vec![0, 1, 2, 3, 4, 5];
        assert_eq!(fftshift(&x), vec![3, 4, 5, 0, 1, 2]);
        assert_eq!(ifftshift(&fftshift(&x)), x);
    }

    #[test]
    fn test_fftshift_odd() {
        let x = vec![0, 1, 2, 3, 4];
        assert_eq!(fftshift(&x), vec![3, 4, 0, 1, 2]);
        assert_eq!(ifftshift(&fftshift(&x)), x);
    }

    #[test]
    fn test_centered_axis() {
        let f = centered_freq_axis(8, 8.0);
        assert_eq!(f, vec![-4.0, -3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0]);
        // Zero lands where fftshift puts the DC bin
        let n = 65536;
        let f = centered_freq_axis(n, 64.0);
        assert_eq!(f[n / 2], 0.0);
        assert_eq!(f.len(), n);
    }

    #[test]
    fn test_fft_real_pads_and_truncates() {
        let mut fft = FftProcessor::new(8);
        assert_eq!(fft.fft_real(&[1.0; 4]).len(), 8);
        assert_eq!(fft.fft_real(&[1.0; 20]).len(), 8);
    }
}
