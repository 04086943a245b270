//! Pulse Shapes — Transmit pulse library
//!
//! Time-domain pulse shapes used by the pulse formatter and the matched
//! filter. Each pulse maps normalized time (in symbol periods) to an
//! amplitude and declares its support length `filt_len` in symbol periods.
//!
//! Short pulses (`filt_len == 1`) are defined piecewise on `[0, 1)`:
//! rectangular NRZ/RZ, Manchester, triangular. Long pulses are symmetric
//! shapes (sinc, raised cosine, ...) centered at `filt_len / 2`, so their
//! sampled support is also `[0, filt_len)`.
//!
//! ## Amplitudes
//!
//! | Pulse              | `filt_len` | Shape                                  |
//! |--------------------|------------|----------------------------------------|
//! | Rectangular NRZ    | 1          | 1 on `[0, 1)`                          |
//! | Rectangular RZ     | 1          | 1 on `[0.25, 0.75)`                    |
//! | Manchester         | 1          | +1 on `[0, 0.5)`, -1 on `[0.5, 1)`     |
//! | Triangular         | 1          | `1 - |2t - 1|` on `[0, 1)`             |
//! | Sinc               | L          | `sinc(t - L/2)`                        |
//! | Squared sinc       | L          | `sinc(t - L/2)^2`                      |
//! | Raised cosine      | L          | textbook RC at `t - L/2`               |
//! | Root raised cosine | L          | textbook RRC at `t - L/2`              |
//!
//! ## Example
//!
//! ```rust
//! use baselink_core::pulse::Pulse;
//!
//! let p = Pulse::RectangularNrz;
//! assert_eq!(p.amplitude(0.5), 1.0);
//! assert_eq!(p.amplitude(1.5), 0.0);
//!
//! let rc = Pulse::RaisedCosine { filt_len: 16, rolloff: 0.5 };
//! // Peak at the center of the support
//! assert!((rc.amplitude(8.0) - 1.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Rolloff offset avoiding the 0/0 singularities of the cosine-roll terms.
const ROLLOFF_EPS: f64 = 1e-12;

/// Default support length for the long pulses, in symbol periods.
pub const DEFAULT_FILT_LEN: usize = 16;

/// Default rolloff factor for the raised-cosine family.
pub const DEFAULT_ROLLOFF: f64 = 0.5;

/// Normalized sinc: `sin(pi x) / (pi x)`, 1 at `x == 0`.
fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

/// Transmit pulse shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Pulse {
    /// Full-width rectangular pulse (non-return-to-zero).
    RectangularNrz,
    /// Half-width rectangular pulse (return-to-zero).
    RectangularRz,
    /// Split-phase pulse: positive then negative half.
    Manchester,
    /// Symmetric triangle spanning one symbol period.
    Triangular,
    /// Ideal Nyquist pulse, truncated to `filt_len` symbol periods.
    Sinc { filt_len: usize },
    /// Squared sinc (triangular spectrum).
    SquaredSinc { filt_len: usize },
    /// Raised-cosine Nyquist pulse.
    RaisedCosine { filt_len: usize, rolloff: f64 },
    /// Root raised cosine; a matched RRC pair combines to a raised cosine.
    RootRaisedCosine { filt_len: usize, rolloff: f64 },
}

impl Pulse {
    /// Display name, as shown in the transmit-filter variant list.
    pub fn name(&self) -> &'static str {
        match self {
            Pulse::RectangularNrz => "Rectangular NRZ",
            Pulse::RectangularRz => "Rectangular RZ",
            Pulse::Manchester => "Manchester",
            Pulse::Triangular => "Triangular",
            Pulse::Sinc { .. } => "Sinc",
            Pulse::SquaredSinc { .. } => "Squared sinc",
            Pulse::RaisedCosine { .. } => "Raised-cosine",
            Pulse::RootRaisedCosine { .. } => "Root-raised-cosine",
        }
    }

    /// Support length in symbol periods.
    pub fn filt_len(&self) -> usize {
        match *self {
            Pulse::RectangularNrz
            | Pulse::RectangularRz
            | Pulse::Manchester
            | Pulse::Triangular => 1,
            Pulse::Sinc { filt_len }
            | Pulse::SquaredSinc { filt_len }
            | Pulse::RaisedCosine { filt_len, .. }
            | Pulse::RootRaisedCosine { filt_len, .. } => filt_len,
        }
    }

    /// Whether this is a single-symbol-period pulse.
    pub fn is_short(&self) -> bool {
        self.filt_len() == 1
    }

    /// Rolloff factor, for the raised-cosine family.
    pub fn rolloff(&self) -> Option<f64> {
        match *self {
            Pulse::RaisedCosine { rolloff, .. } | Pulse::RootRaisedCosine { rolloff, .. } => {
                Some(rolloff)
            }
            _ => None,
        }
    }

    /// Suggested time-axis extent for display, in symbol periods.
    /// No simulation semantics.
    pub fn time_extent(&self) -> f64 {
        match self {
            Pulse::Sinc { .. } => 15.0,
            Pulse::SquaredSinc { .. }
            | Pulse::RaisedCosine { .. }
            | Pulse::RootRaisedCosine { .. } => 10.0,
            _ => 1.5,
        }
    }

    /// Suggested frequency-axis extent for display, in multiples of the
    /// symbol rate. No simulation semantics.
    pub fn freq_extent(&self) -> f64 {
        if self.is_short() {
            15.0
        } else {
            1.5
        }
    }

    /// Amplitude at normalized time `t` (symbol periods).
    pub fn amplitude(&self, t: f64) -> f64 {
        match *self {
            Pulse::RectangularNrz => ((0.0..1.0).contains(&t)) as u8 as f64,
            Pulse::RectangularRz => ((0.25..0.75).contains(&t)) as u8 as f64,
            Pulse::Manchester => {
                ((0.0..0.5).contains(&t)) as u8 as f64 - ((0.5..1.0).contains(&t)) as u8 as f64
            }
            Pulse::Triangular => {
                if (0.0..1.0).contains(&t) {
                    1.0 - (2.0 * t - 1.0).abs()
                } else {
                    0.0
                }
            }
            Pulse::Sinc { filt_len } => sinc(t - filt_len as f64 / 2.0),
            Pulse::SquaredSinc { filt_len } => {
                let x = sinc(t - filt_len as f64 / 2.0);
                x * x
            }
            Pulse::RaisedCosine { filt_len, rolloff } => {
                let r = rolloff + ROLLOFF_EPS;
                let x = t - filt_len as f64 / 2.0;
                sinc(x) * (PI * r * x).cos() / (1.0 - 4.0 * r * r * x * x)
            }
            Pulse::RootRaisedCosine { filt_len, rolloff } => {
                let r = rolloff + ROLLOFF_EPS;
                let x = t - filt_len as f64 / 2.0;
                if x == 0.0 {
                    return 1.0 - r + 4.0 * r / PI;
                }
                let q = 4.0 * r * x;
                if (1.0 - q * q).abs() < 1e-12 {
                    // Limit at x = +-1/(4r)
                    let a = PI / (4.0 * r);
                    return r / 2.0_f64.sqrt()
                        * ((1.0 + 2.0 / PI) * a.sin() + (1.0 - 2.0 / PI) * a.cos());
                }
                (((1.0 - r) * PI * x).sin() + q * ((1.0 + r) * PI * x).cos())
                    / (PI * x * (1.0 - q * q))
            }
        }
    }

    /// Evaluate the amplitude over a slice of normalized times.
    pub fn eval(&self, t: &[f64]) -> Vec<f64> {
        t.iter().map(|&x| self.amplitude(x)).collect()
    }

    /// Sample the pulse on the `filt_len * sps` tap grid used by the
    /// transmit filter.
    pub fn waveform(&self, sps: usize) -> Vec<f64> {
        let n = sps * self.filt_len();
        (0..n)
            .map(|i| self.amplitude(i as f64 / sps as f64))
            .collect()
    }
}

impl Default for Pulse {
    fn default() -> Self {
        Pulse::RectangularNrz
    }
}
