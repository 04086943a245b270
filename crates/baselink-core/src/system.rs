//! System Simulator — Pipeline orchestrator
//!
//! Owns the ordered chain of processing stages, the shared timing and
//! frequency parameters, and the results of the last full run. The chain
//! is the classic baseband link:
//!
//! ```text
//! Source -> Encoder -> TX filter -> Channel freq -> Channel noise
//!                                        -> RX filter -> Sampler -> Decoder
//! ```
//!
//! Every configuration mutation (variant switch, stage parameter edit, or
//! shared parameter edit) triggers a full synchronous recomputation; there
//! is no incremental path. Each run reseeds the RNG from the stored seed,
//! so identical configurations reproduce bit-identical waveforms and BER.
//!
//! Stage-to-stage context (the transmit pulse for the matched filter, the
//! signaling scheme for the decoder, the sampling instants) travels in a
//! per-run context owned by the orchestrator; stages never hold references
//! back into the simulator.
//!
//! ## Example
//!
//! ```rust
//! use baselink_core::system::{ParamValue, SystemSimulator};
//!
//! # fn main() -> Result<(), baselink_core::types::SimError> {
//! let mut sim = SystemSimulator::new()?;
//! // Noiseless default chain decodes perfectly
//! assert_eq!(sim.results().ber, 0.0);
//!
//! // Add channel noise and rerun
//! sim.select_variant(SystemSimulator::CHANNEL_NOISE, "AWGN")?;
//! sim.set_param(SystemSimulator::CHANNEL_NOISE, "snr_db", ParamValue::Float(3.0))?;
//! assert!(sim.results().ber <= 1.0);
//! # Ok(())
//! # }
//! ```

use crate::ber::BerTester;
use crate::channel_freq::FrequencyResponse;
use crate::channel_noise::{NoiseChannel, DEFAULT_SNR_DB};
use crate::fft_utils::centered_freq_axis;
use crate::psd::Periodogram;
use crate::pulse::{Pulse, DEFAULT_FILT_LEN, DEFAULT_ROLLOFF};
use crate::rx_filter::ReceiveFilter;
use crate::sampler::Sampler;
use crate::signaling::SignalingScheme;
use crate::source::{BitSource, DEFAULT_N_BITS};
use crate::threshold_detector::ThresholdDetector;
use crate::tx_filter::PulseFormatter;
use crate::types::{SignalKind, SimError, SimResult};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Typed value of a stage parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Bits(Vec<u8>),
}

impl ParamValue {
    fn as_int(&self, name: &str) -> SimResult<i64> {
        match self {
            ParamValue::Int(v) => Ok(*v),
            _ => Err(SimError::InvalidParameter {
                name: name.to_string(),
                reason: "expected an integer value".to_string(),
            }),
        }
    }

    fn as_float(&self, name: &str) -> SimResult<f64> {
        match self {
            ParamValue::Float(v) => Ok(*v),
            ParamValue::Int(v) => Ok(*v as f64),
            _ => Err(SimError::InvalidParameter {
                name: name.to_string(),
                reason: "expected a numeric value".to_string(),
            }),
        }
    }

    fn as_bits(&self, name: &str) -> SimResult<Vec<u8>> {
        match self {
            ParamValue::Bits(v) => Ok(v.clone()),
            _ => Err(SimError::InvalidParameter {
                name: name.to_string(),
                reason: "expected a bit sequence".to_string(),
            }),
        }
    }
}

/// A named stage parameter and its current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub value: ParamValue,
}

impl Param {
    fn new(name: &str, value: ParamValue) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }
}

fn require_finite(name: &str, value: f64) -> SimResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::InvalidParameter {
            name: name.to_string(),
            reason: "must be finite".to_string(),
        })
    }
}

fn require_positive(name: &str, value: f64) -> SimResult<f64> {
    let value = require_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::InvalidParameter {
            name: name.to_string(),
            reason: "must be positive".to_string(),
        })
    }
}

/// One pipeline stage with its active variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stage {
    Source(BitSource),
    Encoder(SignalingScheme),
    TxFilter(PulseFormatter),
    ChannelFrequency(FrequencyResponse),
    ChannelNoise(NoiseChannel),
    RxFilter(ReceiveFilter),
    Sampler(Sampler),
    Decoder,
}

impl Stage {
    /// Fixed role name of this pipeline position.
    pub fn role_name(&self) -> &'static str {
        match self {
            Stage::Source(_) => "Source",
            Stage::Encoder(_) => "Encoder",
            Stage::TxFilter(_) => "Transmit filter",
            Stage::ChannelFrequency(_) => "Channel frequency response",
            Stage::ChannelNoise(_) => "Channel noise",
            Stage::RxFilter(_) => "Receive filter",
            Stage::Sampler(_) => "Sampler",
            Stage::Decoder => "Decoder",
        }
    }

    /// Whether this stage emits a discrete sequence or a waveform.
    pub fn output_kind(&self) -> SignalKind {
        match self {
            Stage::TxFilter(_)
            | Stage::ChannelFrequency(_)
            | Stage::ChannelNoise(_)
            | Stage::RxFilter(_) => SignalKind::Continuous,
            _ => SignalKind::Discrete,
        }
    }

    /// Named variants selectable at this pipeline position.
    pub fn variant_names(&self) -> &'static [&'static str] {
        match self {
            Stage::Source(_) => &["Random bits", "Fixed bit sequence"],
            Stage::Encoder(_) => &["Unipolar", "Polar", "AMI", "MLT-3"],
            Stage::TxFilter(_) => &[
                "Rectangular NRZ",
                "Rectangular RZ",
                "Manchester",
                "Triangular",
                "Sinc",
                "Squared sinc",
                "Raised-cosine",
                "Root-raised-cosine",
            ],
            Stage::ChannelFrequency(_) => &[
                "Bypass",
                "Ideal lowpass",
                "First order lowpass",
                "Second order bandpass",
            ],
            Stage::ChannelNoise(_) => &["Bypass", "AWGN"],
            Stage::RxFilter(_) => &["Bypass", "Matched filter"],
            Stage::Sampler(_) => &["Simple sampler"],
            Stage::Decoder => &["Slicer + uncoder"],
        }
    }

    /// Name of the active variant.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Stage::Source(s) => s.name(),
            Stage::Encoder(s) => s.name(),
            Stage::TxFilter(f) => f.pulse.name(),
            Stage::ChannelFrequency(c) => c.name(),
            Stage::ChannelNoise(c) => c.name(),
            Stage::RxFilter(f) => f.name(),
            Stage::Sampler(s) => s.name(),
            Stage::Decoder => "Slicer + uncoder",
        }
    }

    /// Switch the active variant by name, resetting the stage's parameters
    /// to their defaults.
    pub fn select_variant(&mut self, name: &str) -> SimResult<()> {
        let unknown = || SimError::UnknownVariant(name.to_string());
        *self = match self {
            Stage::Source(_) => Stage::Source(match name {
                "Random bits" => BitSource::Random {
                    n_bits: DEFAULT_N_BITS,
                },
                "Fixed bit sequence" => BitSource::Fixed { bits: vec![0, 1] },
                _ => return Err(unknown()),
            }),
            Stage::Encoder(_) => Stage::Encoder(match name {
                "Unipolar" => SignalingScheme::Unipolar,
                "Polar" => SignalingScheme::Polar,
                "AMI" => SignalingScheme::Ami,
                "MLT-3" => SignalingScheme::Mlt3,
                _ => return Err(unknown()),
            }),
            Stage::TxFilter(_) => Stage::TxFilter(PulseFormatter::new(match name {
                "Rectangular NRZ" => Pulse::RectangularNrz,
                "Rectangular RZ" => Pulse::RectangularRz,
                "Manchester" => Pulse::Manchester,
                "Triangular" => Pulse::Triangular,
                "Sinc" => Pulse::Sinc {
                    filt_len: DEFAULT_FILT_LEN,
                },
                "Squared sinc" => Pulse::SquaredSinc {
                    filt_len: DEFAULT_FILT_LEN,
                },
                "Raised-cosine" => Pulse::RaisedCosine {
                    filt_len: DEFAULT_FILT_LEN,
                    rolloff: DEFAULT_ROLLOFF,
                },
                "Root-raised-cosine" => Pulse::RootRaisedCosine {
                    filt_len: DEFAULT_FILT_LEN,
                    rolloff: DEFAULT_ROLLOFF,
                },
                _ => return Err(unknown()),
            })),
            Stage::ChannelFrequency(_) => Stage::ChannelFrequency(match name {
                "Bypass" => FrequencyResponse::Bypass,
                "Ideal lowpass" => FrequencyResponse::IdealLowpass { bandwidth: 2.0 },
                "First order lowpass" => FrequencyResponse::FirstOrderLowpass { cutoff: 2.0 },
                "Second order bandpass" => FrequencyResponse::SecondOrderBandpass { center: 2.0 },
                _ => return Err(unknown()),
            }),
            Stage::ChannelNoise(_) => Stage::ChannelNoise(match name {
                "Bypass" => NoiseChannel::Bypass,
                "AWGN" => NoiseChannel::Awgn {
                    snr_db: DEFAULT_SNR_DB,
                },
                _ => return Err(unknown()),
            }),
            Stage::RxFilter(_) => Stage::RxFilter(match name {
                "Bypass" => ReceiveFilter::Bypass,
                "Matched filter" => ReceiveFilter::Matched,
                _ => return Err(unknown()),
            }),
            Stage::Sampler(_) => match name {
                "Simple sampler" => Stage::Sampler(Sampler::default()),
                _ => return Err(unknown()),
            },
            Stage::Decoder => match name {
                "Slicer + uncoder" => Stage::Decoder,
                _ => return Err(unknown()),
            },
        };
        Ok(())
    }

    /// Current parameters of the active variant.
    pub fn params(&self) -> Vec<Param> {
        match self {
            Stage::Source(BitSource::Random { n_bits }) => {
                vec![Param::new("n_bits", ParamValue::Int(*n_bits as i64))]
            }
            Stage::Source(BitSource::Fixed { bits }) => {
                vec![Param::new("bits", ParamValue::Bits(bits.clone()))]
            }
            Stage::TxFilter(f) => {
                let mut params = Vec::new();
                if !f.pulse.is_short() {
                    params.push(Param::new(
                        "filt_len",
                        ParamValue::Int(f.pulse.filt_len() as i64),
                    ));
                }
                if let Some(rolloff) = f.pulse.rolloff() {
                    params.push(Param::new("rolloff", ParamValue::Float(rolloff)));
                }
                params
            }
            Stage::ChannelFrequency(FrequencyResponse::IdealLowpass { bandwidth }) => {
                vec![Param::new("bandwidth", ParamValue::Float(*bandwidth))]
            }
            Stage::ChannelFrequency(FrequencyResponse::FirstOrderLowpass { cutoff }) => {
                vec![Param::new("cutoff_frequency", ParamValue::Float(*cutoff))]
            }
            Stage::ChannelFrequency(FrequencyResponse::SecondOrderBandpass { center }) => {
                vec![Param::new("center_frequency", ParamValue::Float(*center))]
            }
            Stage::ChannelNoise(NoiseChannel::Awgn { snr_db }) => {
                vec![Param::new("snr_db", ParamValue::Float(*snr_db))]
            }
            Stage::Sampler(s) => vec![Param::new(
                "sampling_instant",
                ParamValue::Int(s.instant_percent as i64),
            )],
            _ => Vec::new(),
        }
    }

    /// Update one parameter of the active variant. Invalid updates are
    /// rejected without touching the stage.
    pub fn set_param(&mut self, name: &str, value: &ParamValue) -> SimResult<()> {
        match (&mut *self, name) {
            (Stage::Source(BitSource::Random { n_bits }), "n_bits") => {
                let v = value.as_int(name)?;
                if v < 1 {
                    return Err(SimError::InvalidParameter {
                        name: name.to_string(),
                        reason: "must be at least 1".to_string(),
                    });
                }
                *n_bits = v as usize;
            }
            (Stage::Source(BitSource::Fixed { bits }), "bits") => {
                let v = value.as_bits(name)?;
                if v.is_empty() {
                    return Err(SimError::InvalidParameter {
                        name: name.to_string(),
                        reason: "must not be empty".to_string(),
                    });
                }
                if v.iter().any(|&b| b > 1) {
                    return Err(SimError::InvalidParameter {
                        name: name.to_string(),
                        reason: "bits must be 0 or 1".to_string(),
                    });
                }
                *bits = v;
            }
            (Stage::TxFilter(f), "filt_len") => {
                let v = value.as_int(name)?;
                if v < 2 || v % 2 != 0 {
                    return Err(SimError::InvalidParameter {
                        name: name.to_string(),
                        reason: "must be a positive even integer".to_string(),
                    });
                }
                let v = v as usize;
                match &mut f.pulse {
                    Pulse::Sinc { filt_len }
                    | Pulse::SquaredSinc { filt_len }
                    | Pulse::RaisedCosine { filt_len, .. }
                    | Pulse::RootRaisedCosine { filt_len, .. } => *filt_len = v,
                    _ => return Err(SimError::UnknownParameter(name.to_string())),
                }
            }
            (Stage::TxFilter(f), "rolloff") => {
                let v = require_finite(name, value.as_float(name)?)?;
                if !(0.0..=1.0).contains(&v) {
                    return Err(SimError::InvalidParameter {
                        name: name.to_string(),
                        reason: "must be in [0, 1]".to_string(),
                    });
                }
                match &mut f.pulse {
                    Pulse::RaisedCosine { rolloff, .. }
                    | Pulse::RootRaisedCosine { rolloff, .. } => *rolloff = v,
                    _ => return Err(SimError::UnknownParameter(name.to_string())),
                }
            }
            (
                Stage::ChannelFrequency(FrequencyResponse::IdealLowpass { bandwidth }),
                "bandwidth",
            ) => {
                *bandwidth = require_positive(name, value.as_float(name)?)?;
            }
            (
                Stage::ChannelFrequency(FrequencyResponse::FirstOrderLowpass { cutoff }),
                "cutoff_frequency",
            ) => {
                *cutoff = require_positive(name, value.as_float(name)?)?;
            }
            (
                Stage::ChannelFrequency(FrequencyResponse::SecondOrderBandpass { center }),
                "center_frequency",
            ) => {
                *center = require_positive(name, value.as_float(name)?)?;
            }
            (Stage::ChannelNoise(NoiseChannel::Awgn { snr_db }), "snr_db") => {
                *snr_db = require_finite(name, value.as_float(name)?)?;
            }
            (Stage::Sampler(s), "sampling_instant") => {
                let v = value.as_int(name)?;
                if !(-50..=50).contains(&v) {
                    return Err(SimError::InvalidParameter {
                        name: name.to_string(),
                        reason: "must be in [-50, 50] percent".to_string(),
                    });
                }
                s.instant_percent = v as i32;
            }
            _ => return Err(SimError::UnknownParameter(name.to_string())),
        }
        Ok(())
    }
}

/// Derived artifacts recorded while a run walks the pipeline.
#[derive(Debug, Default)]
struct RunContext {
    n_symbols: usize,
    pulse: Option<Pulse>,
    scheme: Option<SignalingScheme>,
    instants: Vec<usize>,
}

/// Outputs of the last successful run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResults {
    /// Time-domain output of each stage.
    pub data_t: Vec<Vec<f64>>,
    /// Power spectral density per stage; `None` for discrete stages.
    pub data_f: Vec<Option<Vec<f64>>>,
    /// Time axis for continuous waveforms, in seconds.
    pub t: Vec<f64>,
    /// Time of each sampling instant, in seconds.
    pub tk: Vec<f64>,
    /// Centered frequency axis for the PSDs, in Hz.
    pub f: Vec<f64>,
    /// Sample indices chosen by the sampler.
    pub instants: Vec<usize>,
    /// End-to-end bit error rate.
    pub ber: f64,
    /// Number of symbols in the run.
    pub n_symbols: usize,
}

/// End-to-end baseband link simulator.
#[derive(Debug)]
pub struct SystemSimulator {
    stages: Vec<Stage>,
    sps: usize,
    bit_rate: f64,
    seed: u64,
    n_fft: usize,
    results: SimulationResults,
}

impl SystemSimulator {
    /// Pipeline position of the bit source.
    pub const SOURCE: usize = 0;
    /// Pipeline position of the line encoder.
    pub const ENCODER: usize = 1;
    /// Pipeline position of the transmit filter.
    pub const TX_FILTER: usize = 2;
    /// Pipeline position of the channel frequency response.
    pub const CHANNEL_FREQUENCY: usize = 3;
    /// Pipeline position of the channel noise.
    pub const CHANNEL_NOISE: usize = 4;
    /// Pipeline position of the receive filter.
    pub const RX_FILTER: usize = 5;
    /// Pipeline position of the sampler.
    pub const SAMPLER: usize = 6;
    /// Pipeline position of the decoder.
    pub const DECODER: usize = 7;

    /// Create a simulator with the default chain and run it once.
    pub fn new() -> SimResult<Self> {
        let mut sim = Self {
            stages: vec![
                Stage::Source(BitSource::default()),
                Stage::Encoder(SignalingScheme::default()),
                Stage::TxFilter(PulseFormatter::default()),
                Stage::ChannelFrequency(FrequencyResponse::default()),
                Stage::ChannelNoise(NoiseChannel::default()),
                Stage::RxFilter(ReceiveFilter::default()),
                Stage::Sampler(Sampler::default()),
                Stage::Decoder,
            ],
            sps: 64,
            bit_rate: 1.0,
            seed: 0,
            n_fft: 1 << 16,
            results: SimulationResults::default(),
        };
        sim.process()?;
        Ok(sim)
    }

    /// Samples per symbol.
    pub fn sps(&self) -> usize {
        self.sps
    }

    /// Bit rate in bit/s.
    pub fn bit_rate(&self) -> f64 {
        self.bit_rate
    }

    /// Symbol rate in symbols/s (binary signaling: equal to the bit rate).
    pub fn symbol_rate(&self) -> f64 {
        self.bit_rate
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sps as f64 * self.symbol_rate()
    }

    /// RNG seed used for every run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// FFT length used for PSD estimation.
    pub fn n_fft(&self) -> usize {
        self.n_fft
    }

    /// The pipeline stages.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Results of the last successful run.
    pub fn results(&self) -> &SimulationResults {
        &self.results
    }

    /// Set the oversampling factor and rerun.
    pub fn set_sps(&mut self, sps: usize) -> SimResult<()> {
        if sps == 0 {
            return Err(SimError::InvalidParameter {
                name: "sps".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        self.sps = sps;
        self.process()
    }

    /// Set the bit rate and rerun.
    pub fn set_bit_rate(&mut self, bit_rate: f64) -> SimResult<()> {
        require_positive("bit_rate", bit_rate)?;
        self.bit_rate = bit_rate;
        self.process()
    }

    /// Set the RNG seed and rerun.
    pub fn set_seed(&mut self, seed: u64) -> SimResult<()> {
        self.seed = seed;
        self.process()
    }

    /// Set the PSD FFT length and rerun.
    pub fn set_n_fft(&mut self, n_fft: usize) -> SimResult<()> {
        if n_fft < 2 {
            return Err(SimError::InvalidParameter {
                name: "n_fft".to_string(),
                reason: "must be at least 2".to_string(),
            });
        }
        self.n_fft = n_fft;
        self.process()
    }

    /// Variant names selectable at a pipeline position.
    pub fn variant_names(&self, stage: usize) -> &'static [&'static str] {
        self.stages[stage].variant_names()
    }

    /// Switch a stage's active variant and rerun. The stage's parameters
    /// reset to the variant defaults.
    pub fn select_variant(&mut self, stage: usize, name: &str) -> SimResult<()> {
        self.stages[stage].select_variant(name)?;
        self.process()
    }

    /// Current parameters of a stage's active variant.
    pub fn params(&self, stage: usize) -> Vec<Param> {
        self.stages[stage].params()
    }

    /// Update one stage parameter and rerun. Invalid values are rejected
    /// without touching any state.
    pub fn set_param(&mut self, stage: usize, name: &str, value: ParamValue) -> SimResult<()> {
        self.stages[stage].set_param(name, &value)?;
        self.process()
    }

    /// Run the full pipeline and publish fresh results. On error the
    /// previous results stay in place.
    pub fn process(&mut self) -> SimResult<()> {
        let sps = self.sps;
        let sample_rate = self.sample_rate();
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut ctx = RunContext::default();
        let mut data_t: Vec<Vec<f64>> = Vec::with_capacity(self.stages.len());

        for (i, stage) in self.stages.iter().enumerate() {
            let input: &[f64] = if i == 0 { &[] } else { &data_t[i - 1] };
            let out = Self::run_stage(i, stage, input, sps, sample_rate, &mut rng, &mut ctx)?;
            if out.iter().any(|v| !v.is_finite()) {
                return Err(SimError::NonFiniteOutput(i));
            }
            data_t.push(out);
        }

        let sent = &data_t[0];
        let recovered = &data_t[data_t.len() - 1];
        if sent.is_empty() {
            return Err(SimError::EmptyBitSequence);
        }
        if sent.len() != recovered.len() {
            return Err(SimError::ShapeMismatch {
                stage: self.stages.len() - 1,
                expected: sent.len(),
                actual: recovered.len(),
            });
        }
        let tx_bits: Vec<bool> = sent.iter().map(|&b| b != 0.0).collect();
        let rx_bits: Vec<bool> = recovered.iter().map(|&b| b != 0.0).collect();
        let mut tester = BerTester::new();
        tester.update(&tx_bits, &rx_bits);

        let mut periodogram = Periodogram::new(self.n_fft, sample_rate);
        let data_f: Vec<Option<Vec<f64>>> = self
            .stages
            .iter()
            .zip(data_t.iter())
            .map(|(stage, data)| match stage.output_kind() {
                SignalKind::Continuous => Some(periodogram.estimate(data)),
                SignalKind::Discrete => None,
            })
            .collect();

        let ts = 1.0 / self.symbol_rate();
        let nt = (ctx.n_symbols + 2) * sps;
        let t: Vec<f64> = (0..nt).map(|i| i as f64 / sample_rate - ts).collect();
        let tk: Vec<f64> = ctx.instants.iter().map(|&i| t[i]).collect();
        let f = centered_freq_axis(self.n_fft, sample_rate);

        self.results = SimulationResults {
            ber: tester.ber(),
            n_symbols: ctx.n_symbols,
            instants: ctx.instants,
            data_t,
            data_f,
            t,
            tk,
            f,
        };
        Ok(())
    }

    /// Detector of the active signaling scheme, as used by the decoder.
    pub fn detector(&self) -> Option<ThresholdDetector> {
        self.stages.iter().find_map(|s| match s {
            Stage::Encoder(scheme) => Some(scheme.detector()),
            _ => None,
        })
    }

    fn run_stage(
        index: usize,
        stage: &Stage,
        input: &[f64],
        sps: usize,
        sample_rate: f64,
        rng: &mut StdRng,
        ctx: &mut RunContext,
    ) -> SimResult<Vec<f64>> {
        match stage {
            Stage::Source(source) => {
                let bits = source.generate(rng);
                if bits.is_empty() {
                    return Err(SimError::EmptyBitSequence);
                }
                Ok(bits.iter().map(|&b| b as f64).collect())
            }
            Stage::Encoder(scheme) => {
                ctx.scheme = Some(*scheme);
                ctx.n_symbols = input.len();
                let bits: Vec<u8> = input.iter().map(|&b| (b != 0.0) as u8).collect();
                Ok(scheme.encode(&bits))
            }
            Stage::TxFilter(formatter) => {
                ctx.pulse = Some(formatter.pulse.clone());
                Ok(formatter.process(input, sps))
            }
            Stage::ChannelFrequency(channel) => Ok(channel.process(input, sample_rate)),
            Stage::ChannelNoise(channel) => channel.process(input, sps, rng),
            Stage::RxFilter(filter) => {
                if matches!(filter, ReceiveFilter::Bypass) {
                    return Ok(input.to_vec());
                }
                let pulse = ctx.pulse.as_ref().ok_or(SimError::MissingUpstream {
                    stage: index,
                    missing: "transmit filter",
                })?;
                Ok(filter.process(input, pulse, sps))
            }
            Stage::Sampler(sampler) => {
                let (samples, instants) = sampler.process(input, sps, ctx.n_symbols)?;
                ctx.instants = instants;
                Ok(samples)
            }
            Stage::Decoder => {
                let scheme = ctx.scheme.ok_or(SimError::MissingUpstream {
                    stage: index,
                    missing: "encoder",
                })?;
                Ok(scheme.decode(input).iter().map(|&b| b as f64).collect())
            }
        }
    }
}
