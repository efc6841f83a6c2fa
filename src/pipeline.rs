//! Whole-chain recompute and memoization
//!
//! Any parameter change reruns mapping → synthesis → noise → demodulation
//! from scratch. With the noise seed in the inputs the chain is a pure
//! function, so results can be cached by their full input tuple.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::{debug, trace};

use crate::analysis::{count_errors, modulation_error_ratio_db, slice_bits, ErrorCounts};
use crate::bits::truncate_to_symbols;
use crate::config::WaveformParameters;
use crate::error::Result;
use crate::iq::IqSet;
use crate::modem::{CoherentDemodulator, Synthesizer, Waveform};
use crate::scheme::ModulationScheme;

/// Default number of cached simulations
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Result of one full pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    /// Bits actually transmitted (whole symbols only)
    pub bits: Vec<u8>,
    pub params: WaveformParameters,
    pub noise_seed: u64,
    /// Transmitted waveform after the noise channel
    pub waveform: Waveform,
    pub estimated_iq: IqSet,
    /// Hard decisions; `None` for FSK
    pub decided_bits: Option<Vec<u8>>,
    pub errors: Option<ErrorCounts>,
    /// Modulation error ratio of the estimates, dB
    pub mer_db: Option<f64>,
}

/// Run the whole chain
///
/// `bits` is truncated to a whole number of symbols first; noise is drawn
/// from a ChaCha8 stream seeded with `noise_seed`.
pub fn simulate(
    bits: &[u8],
    scheme: ModulationScheme,
    params: &WaveformParameters,
    noise_seed: u64,
) -> Result<Simulation> {
    let used = truncate_to_symbols(bits, scheme);
    let synthesizer = Synthesizer::new(scheme, *params)?;

    let mut rng = ChaCha8Rng::seed_from_u64(noise_seed);
    let waveform = synthesizer
        .synthesize(used)?
        .with_noise(params.noise_std_dev, &mut rng)?;

    let estimated_iq = CoherentDemodulator::new().demodulate(&waveform)?;
    let decided_bits = slice_bits(&estimated_iq, scheme, params.amplitude);
    let errors = decided_bits
        .as_ref()
        .map(|rx| count_errors(used, rx, scheme.bits_per_symbol()));
    let mer_db = modulation_error_ratio_db(&waveform.ideal_iq, &estimated_iq);

    debug!(
        scheme = %scheme,
        bits = used.len(),
        dropped = bits.len() - used.len(),
        noise = params.noise_std_dev,
        bit_errors = errors.map(|e| e.bit_errors),
        "simulation complete"
    );

    Ok(Simulation {
        bits: used.to_vec(),
        params: *params,
        noise_seed,
        waveform,
        estimated_iq,
        decided_bits,
        errors,
        mer_db,
    })
}

/// Full input tuple of a simulation; floats are keyed by bit pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimulationKey {
    bits: Vec<u8>,
    scheme: ModulationScheme,
    carrier_hz: u64,
    symbol_rate: u64,
    samples_per_symbol: usize,
    amplitude: u64,
    noise_std_dev: u64,
    fsk_deviation_hz: u64,
    noise_seed: u64,
}

impl SimulationKey {
    pub fn new(
        bits: &[u8],
        scheme: ModulationScheme,
        params: &WaveformParameters,
        noise_seed: u64,
    ) -> Self {
        Self {
            bits: bits.to_vec(),
            scheme,
            carrier_hz: params.carrier_hz.to_bits(),
            symbol_rate: params.symbol_rate.to_bits(),
            samples_per_symbol: params.samples_per_symbol,
            amplitude: params.amplitude.to_bits(),
            noise_std_dev: params.noise_std_dev.to_bits(),
            fsk_deviation_hz: params.fsk_deviation_hz.to_bits(),
            noise_seed,
        }
    }
}

/// Bounded memo of simulations, evicting the oldest entry first
#[derive(Debug)]
pub struct SimulationCache {
    entries: HashMap<SimulationKey, Arc<Simulation>>,
    order: VecDeque<SimulationKey>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for SimulationCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl SimulationCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// Cached simulation for these inputs, computing it on a miss
    ///
    /// Failed runs are not cached.
    pub fn get_or_compute(
        &mut self,
        bits: &[u8],
        scheme: ModulationScheme,
        params: &WaveformParameters,
        noise_seed: u64,
    ) -> Result<Arc<Simulation>> {
        let key = SimulationKey::new(bits, scheme, params, noise_seed);
        if let Some(sim) = self.entries.get(&key) {
            self.hits += 1;
            trace!(hits = self.hits, "simulation cache hit");
            return Ok(Arc::clone(sim));
        }

        self.misses += 1;
        let sim = Arc::new(simulate(bits, scheme, params, noise_seed)?);

        if self.order.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, Arc::clone(&sim));
        Ok(sim)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::generate_bits_seeded;
    use crate::error::ModemError;

    #[test]
    fn test_simulate_truncates_to_whole_symbols() {
        let bits = generate_bits_seeded(42, 1).unwrap();
        let sim = simulate(&bits, ModulationScheme::Qam16, &WaveformParameters::default(), 0)
            .unwrap();
        assert_eq!(sim.bits.len(), 40);
        assert_eq!(sim.waveform.symbol_count, 10);
        assert_eq!(sim.waveform.samples.len(), 10 * 100);
        assert_eq!(sim.estimated_iq.len(), 10);
    }

    #[test]
    fn test_simulate_noiseless_has_no_errors() {
        let bits = generate_bits_seeded(40, 2).unwrap();
        let sim = simulate(&bits, ModulationScheme::Qpsk, &WaveformParameters::default(), 0)
            .unwrap();
        assert_eq!(sim.decided_bits.as_deref(), Some(&bits[..]));
        assert_eq!(sim.errors.unwrap().bit_errors, 0);
    }

    #[test]
    fn test_simulate_fsk() {
        let bits = generate_bits_seeded(20, 3).unwrap();
        let params = WaveformParameters::default().with_noise(0.2);
        let sim = simulate(&bits, ModulationScheme::Fsk, &params, 9).unwrap();
        assert_eq!(sim.estimated_iq, IqSet::NotApplicable);
        assert_eq!(sim.waveform.ideal_iq, IqSet::NotApplicable);
        assert!(sim.decided_bits.is_none());
        assert!(sim.errors.is_none());
    }

    #[test]
    fn test_simulate_seeded_noise_is_reproducible() {
        let bits = generate_bits_seeded(40, 4).unwrap();
        let params = WaveformParameters::default().with_noise(0.4);
        let a = simulate(&bits, ModulationScheme::Bpsk, &params, 5).unwrap();
        let b = simulate(&bits, ModulationScheme::Bpsk, &params, 5).unwrap();
        let c = simulate(&bits, ModulationScheme::Bpsk, &params, 6).unwrap();
        assert_eq!(a, b);
        assert_ne!(a.waveform.samples, c.waveform.samples);
    }

    #[test]
    fn test_simulate_too_few_bits() {
        let err = simulate(&[1, 0, 1], ModulationScheme::Qam16, &WaveformParameters::default(), 0)
            .unwrap_err();
        assert!(matches!(err, ModemError::InvalidBitLength { len: 0, bits_per_symbol: 4 }));
    }

    #[test]
    fn test_simulate_negative_noise() {
        let params = WaveformParameters::default().with_noise(-1.0);
        let err = simulate(&[1, 0], ModulationScheme::Bpsk, &params, 0).unwrap_err();
        assert!(matches!(err, ModemError::InvalidParameter(_)));
    }

    #[test]
    fn test_cache_hit_returns_same_simulation() {
        let mut cache = SimulationCache::new(4);
        let bits = generate_bits_seeded(16, 1).unwrap();
        let params = WaveformParameters::default().with_noise(0.1);

        let a = cache.get_or_compute(&bits, ModulationScheme::Qpsk, &params, 3).unwrap();
        let b = cache.get_or_compute(&bits, ModulationScheme::Qpsk, &params, 3).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn test_cache_keys_on_every_parameter() {
        let mut cache = SimulationCache::new(16);
        let bits = generate_bits_seeded(16, 1).unwrap();
        let base = WaveformParameters::default();

        cache.get_or_compute(&bits, ModulationScheme::Qpsk, &base, 0).unwrap();
        cache.get_or_compute(&bits, ModulationScheme::Bpsk, &base, 0).unwrap();
        cache.get_or_compute(&bits, ModulationScheme::Qpsk, &base.with_amplitude(2.0), 0).unwrap();
        cache.get_or_compute(&bits, ModulationScheme::Qpsk, &base.with_noise(0.1), 0).unwrap();
        cache.get_or_compute(&bits, ModulationScheme::Qpsk, &base.with_noise(0.1), 1).unwrap();
        assert_eq!(cache.misses(), 5);
        assert_eq!(cache.len(), 5);
    }

    #[test]
    fn test_cache_evicts_oldest() {
        let mut cache = SimulationCache::new(2);
        let params = WaveformParameters::default();
        for seed in 0..3 {
            let bits = generate_bits_seeded(8, seed).unwrap();
            cache.get_or_compute(&bits, ModulationScheme::Bpsk, &params, 0).unwrap();
        }
        assert_eq!(cache.len(), 2);

        let first = generate_bits_seeded(8, 0).unwrap();
        cache.get_or_compute(&first, ModulationScheme::Bpsk, &params, 0).unwrap();
        assert_eq!(cache.hits(), 0);
        assert_eq!(cache.misses(), 4);
    }

    #[test]
    fn test_cache_does_not_store_failures() {
        let mut cache = SimulationCache::default();
        let params = WaveformParameters::default().with_samples_per_symbol(0);
        assert!(cache.get_or_compute(&[1], ModulationScheme::Ask, &params, 0).is_err());
        assert!(cache.is_empty());
    }
}
