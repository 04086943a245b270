//! # Baselink Core — Baseband Link Simulation Engine
//!
//! This crate simulates an end-to-end digital baseband communication link
//! for pedagogical exploration: a bitstream is line-coded, pulse-shaped,
//! passed through a channel with a configurable frequency response and
//! additive Gaussian noise, filtered at the receiver, sampled once per
//! symbol, and decoded. The engine computes the bit error rate and a power
//! spectrum for every waveform in the chain.
//!
//! ## Signal Flow
//!
//! ```text
//! ┌────────┐  ┌─────────┐  ┌───────────┐  ┌──────────┐  ┌───────┐
//! │ Source │─►│ Encoder │─►│ TX filter │─►│ Chan H(f)│─►│ AWGN  │─┐
//! └────────┘  └─────────┘  └───────────┘  └──────────┘  └───────┘ │
//!    bits       symbols      waveform                             │
//! ┌─────────┐  ┌─────────┐  ┌───────────┐                         │
//! │ Decoder │◄─│ Sampler │◄─│ RX filter │◄────────────────────────┘
//! └─────────┘  └─────────┘  └───────────┘
//!    bits        symbols      waveform
//! ```
//!
//! Each stage is a tagged union over its selectable implementations
//! (e.g. the channel response can be a bypass, an ideal lowpass, or an
//! analog-style pole response). The [`system::SystemSimulator`] owns the
//! chain, the shared timing parameters (`sps`, bit rate, derived sample
//! rate), the RNG seed, and the FFT length, and recomputes the whole
//! pipeline synchronously on every configuration change. Runs are
//! deterministic: the RNG is reseeded at the start of every run, so the
//! same seed and configuration reproduce bit-identical results.
//!
//! ## Example
//!
//! ```rust
//! use baselink_core::system::{ParamValue, SystemSimulator};
//!
//! # fn main() -> Result<(), baselink_core::types::SimError> {
//! let mut sim = SystemSimulator::new()?;
//!
//! // Polar signaling over an AWGN channel with a matched-filter receiver
//! sim.select_variant(SystemSimulator::ENCODER, "Polar")?;
//! sim.select_variant(SystemSimulator::CHANNEL_NOISE, "AWGN")?;
//! sim.set_param(SystemSimulator::CHANNEL_NOISE, "snr_db", ParamValue::Float(8.0))?;
//! sim.select_variant(SystemSimulator::RX_FILTER, "Matched filter")?;
//! sim.set_param(SystemSimulator::SAMPLER, "sampling_instant", ParamValue::Int(0))?;
//!
//! let results = sim.results();
//! assert_eq!(results.data_t.len(), 8);
//! assert!(results.ber < 0.5);
//! # Ok(())
//! # }
//! ```

pub mod ber;
pub mod channel_freq;
pub mod channel_noise;
pub mod fft_utils;
pub mod psd;
pub mod pulse;
pub mod rx_filter;
pub mod sampler;
pub mod signaling;
pub mod source;
pub mod system;
pub mod threshold_detector;
pub mod tx_filter;
pub mod types;

pub use channel_freq::FrequencyResponse;
pub use channel_noise::NoiseChannel;
pub use pulse::Pulse;
pub use rx_filter::ReceiveFilter;
pub use sampler::Sampler;
pub use signaling::SignalingScheme;
pub use source::BitSource;
pub use system::{Param, ParamValue, SimulationResults, Stage, SystemSimulator};
pub use threshold_detector::ThresholdDetector;
pub use tx_filter::PulseFormatter;
pub use types::{Sample, SignalKind, SimError, SimResult};
