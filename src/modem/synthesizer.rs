//! Waveform synthesizer
//!
//! Expands every mapped symbol into `samples_per_symbol` carrier samples.
//! The carrier is evaluated at absolute timestamps, so phase is continuous
//! across symbol boundaries for every scheme except where the scheme
//! itself keys the phase.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::carriers::{tone::antipodal_phase, Tone};
use crate::channel::add_noise;
use crate::config::WaveformParameters;
use crate::error::Result;
use crate::iq::IqSet;
use crate::mapper::{self, MappedSymbol};
use crate::scheme::{CarrierRule, ModulationScheme};
use crate::timing::SymbolClock;
use crate::traits::Carrier;

/// Synthesized signal and everything derived alongside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waveform {
    pub scheme: ModulationScheme,
    pub carrier_hz: f64,
    pub symbol_rate: f64,
    pub samples_per_symbol: usize,
    pub symbol_count: usize,
    /// Sample times in seconds
    pub timestamps: Vec<f64>,
    /// Carrier-modulated samples
    pub samples: Vec<f64>,
    /// One level per transmitted bit, held for the bit's share of its symbol
    pub baseband: Vec<f64>,
    /// Mapped symbols in transmit order
    pub symbols: Vec<MappedSymbol>,
    /// Ideal I/Q per symbol
    pub ideal_iq: IqSet,
}

impl Waveform {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sample_rate(&self) -> f64 {
        self.symbol_rate * self.samples_per_symbol as f64
    }

    /// Same waveform with Gaussian noise added to every sample
    pub fn with_noise<R: Rng + ?Sized>(mut self, std_dev: f64, rng: &mut R) -> Result<Self> {
        self.samples = add_noise(&self.samples, std_dev, rng)?;
        Ok(self)
    }
}

/// Waveform synthesizer for one scheme and parameter set
#[derive(Debug, Clone)]
pub struct Synthesizer {
    scheme: ModulationScheme,
    params: WaveformParameters,
    clock: SymbolClock,
}

impl Synthesizer {
    /// Create a synthesizer
    ///
    /// # Errors
    /// `InvalidParameter` if `params` fails validation.
    pub fn new(scheme: ModulationScheme, params: WaveformParameters) -> Result<Self> {
        params.validate()?;
        let clock = params.clock()?;
        Ok(Self { scheme, params, clock })
    }

    pub fn scheme(&self) -> ModulationScheme {
        self.scheme
    }

    pub fn clock(&self) -> &SymbolClock {
        &self.clock
    }

    /// Carrier sample for one mapped symbol at time `t`
    #[inline]
    fn sample(&self, symbol: &MappedSymbol, carrier: &Tone, t: f64) -> f64 {
        match *symbol {
            MappedSymbol::Tone { freq_hz } => self.params.amplitude * Tone::new(freq_hz).at(t).0,
            MappedSymbol::Point(p) => match self.scheme.rule() {
                CarrierRule::Antipodal => {
                    let keyed = carrier.with_phase(antipodal_phase(p.i));
                    p.i.abs() * keyed.phase_at(t).cos()
                }
                CarrierRule::Quadrature => {
                    let (cos, sin) = carrier.at(t);
                    p.i * cos - p.q * sin
                }
                CarrierRule::OnOff | CarrierRule::Tone => p.i * carrier.at(t).0,
            },
        }
    }

    /// Modulate a bit stream
    ///
    /// `bits.len()` must be a whole number of symbols.
    pub fn synthesize(&self, bits: &[u8]) -> Result<Waveform> {
        let symbols = mapper::map_symbols(bits, self.scheme, &self.params)?;

        let sps = self.clock.samples_per_symbol();
        let bps = self.scheme.bits_per_symbol();
        let total = symbols.len() * sps;
        let carrier = Tone::new(self.params.carrier_hz);

        let mut timestamps = Vec::with_capacity(total);
        let mut samples = Vec::with_capacity(total);
        let mut baseband = Vec::with_capacity(total);

        for (k, symbol) in symbols.iter().enumerate() {
            let symbol_bits = &bits[k * bps..(k + 1) * bps];
            for j in 0..sps {
                let t = self.clock.timestamp(k, j);
                timestamps.push(t);
                samples.push(self.sample(symbol, &carrier, t));
                baseband.push(f64::from(symbol_bits[j * bps / sps]));
            }
        }

        debug!(
            scheme = %self.scheme,
            symbols = symbols.len(),
            samples = samples.len(),
            sample_rate = self.clock.sample_rate(),
            "synthesized waveform"
        );

        Ok(Waveform {
            scheme: self.scheme,
            carrier_hz: self.params.carrier_hz,
            symbol_rate: self.clock.symbol_rate(),
            samples_per_symbol: sps,
            symbol_count: symbols.len(),
            timestamps,
            samples,
            baseband,
            ideal_iq: mapper::ideal_iq(&symbols, self.scheme),
            symbols,
        })
    }
}

/// Modulate `bits` under `scheme` with `params`
pub fn synthesize(
    bits: &[u8],
    scheme: ModulationScheme,
    params: &WaveformParameters,
) -> Result<Waveform> {
    Synthesizer::new(scheme, *params)?.synthesize(bits)
}
