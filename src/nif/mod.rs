//! NIF interface for Elixir
//!
//! Exposes the pipeline operations as stateless NIFs. Schemes are passed
//! as atoms (`:ask`, `:fsk`, `:bpsk`, `:qpsk`, `:qam16`) and parameters as
//! a `%ModemLab.WaveformParameters{}` struct. Errors come back as
//! `{:error, reason}` with a readable reason string.

use rustler::types::map::map_new;
use rustler::{Encoder, Env, NifResult, Term};
use std::sync::Mutex;

use crate::bits;
use crate::channel;
use crate::config::WaveformParameters;
use crate::error::ModemError;
use crate::iq::IqSet;
use crate::modem::{self, correlate_with_clock};
use crate::pipeline::{Simulation, SimulationCache};
use crate::scheme::ModulationScheme;
use crate::timing::SymbolClock;

rustler::atoms! {
    ok,
    error,
    not_applicable,
    // Simulation map keys
    bits,
    timestamps,
    samples,
    baseband,
    symbol_count,
    sample_rate,
    ideal_iq,
    estimated_iq,
    decided_bits,
    bit_errors,
    symbol_errors,
    mer_db,
}

lazy_static::lazy_static! {
    static ref CACHE: Mutex<SimulationCache> = Mutex::new(SimulationCache::default());
}

fn to_nif_error(e: ModemError) -> rustler::Error {
    rustler::Error::Term(Box::new(e.to_string()))
}

/// Scheme from an atom or a string tag
fn decode_scheme(term: Term) -> NifResult<ModulationScheme> {
    let tag = term.atom_to_string().or_else(|_| term.decode::<String>())?;
    tag.parse().map_err(to_nif_error)
}

impl Encoder for IqSet {
    fn encode<'a>(&self, env: Env<'a>) -> Term<'a> {
        match self {
            IqSet::Points(points) => points
                .iter()
                .map(|p| p.as_tuple())
                .collect::<Vec<_>>()
                .encode(env),
            IqSet::NotApplicable => not_applicable().encode(env),
        }
    }
}

fn encode_simulation<'a>(env: Env<'a>, sim: &Simulation) -> NifResult<Term<'a>> {
    let w = &sim.waveform;
    map_new(env)
        .map_put(bits(), &sim.bits)?
        .map_put(timestamps(), &w.timestamps)?
        .map_put(samples(), &w.samples)?
        .map_put(baseband(), &w.baseband)?
        .map_put(symbol_count(), w.symbol_count)?
        .map_put(sample_rate(), w.sample_rate())?
        .map_put(ideal_iq(), &w.ideal_iq)?
        .map_put(estimated_iq(), &sim.estimated_iq)?
        .map_put(decided_bits(), &sim.decided_bits)?
        .map_put(bit_errors(), sim.errors.map(|e| e.bit_errors))?
        .map_put(symbol_errors(), sim.errors.map(|e| e.symbol_errors))?
        .map_put(mer_db(), sim.mer_db.filter(|db| db.is_finite()))
}

/// Generate `n` random bits, reproducibly when `seed` is given
#[rustler::nif]
fn generate_bits(n: usize, seed: Option<u64>) -> NifResult<Vec<u8>> {
    match seed {
        Some(seed) => bits::generate_bits_seeded(n, seed),
        None => bits::generate_bits_entropy(n),
    }
    .map_err(to_nif_error)
}

/// Bit count to regenerate after switching to `scheme`
#[rustler::nif]
fn aligned_bit_count<'a>(n: usize, scheme: Term<'a>) -> NifResult<usize> {
    Ok(bits::aligned_bit_count(n, decode_scheme(scheme)?))
}

/// Synthesize a waveform
///
/// Returns `{timestamps, samples, baseband, ideal_iq}`; `ideal_iq` is a
/// list of `{i, q}` or `:not_applicable` for FSK.
#[rustler::nif(schedule = "DirtyCpu")]
fn synthesize<'a>(
    bits: Vec<u8>,
    scheme: Term<'a>,
    params: WaveformParameters,
) -> NifResult<(Vec<f64>, Vec<f64>, Vec<f64>, IqSet)> {
    let scheme = decode_scheme(scheme)?;
    let w = modem::synthesize(&bits, scheme, &params).map_err(to_nif_error)?;
    Ok((w.timestamps, w.samples, w.baseband, w.ideal_iq))
}

/// Add Gaussian noise, reproducibly when `seed` is given
#[rustler::nif(schedule = "DirtyCpu")]
fn add_noise(signal: Vec<f64>, std_dev: f64, seed: Option<u64>) -> NifResult<Vec<f64>> {
    match seed {
        Some(seed) => channel::add_noise_seeded(&signal, std_dev, seed),
        None => channel::add_noise(&signal, std_dev, &mut rand::thread_rng()),
    }
    .map_err(to_nif_error)
}

/// Correlate a signal sampled from t = 0 back to per-symbol I/Q
///
/// Returns `:not_applicable` for FSK.
#[rustler::nif(schedule = "DirtyCpu")]
fn demodulate<'a>(
    scheme: Term<'a>,
    signal: Vec<f64>,
    carrier_hz: f64,
    symbol_rate: f64,
    samples_per_symbol: usize,
) -> NifResult<IqSet> {
    if !decode_scheme(scheme)?.has_constellation() {
        return Ok(IqSet::NotApplicable);
    }
    let clock = SymbolClock::new(symbol_rate, samples_per_symbol).map_err(to_nif_error)?;
    correlate_with_clock(&signal, &clock, carrier_hz)
        .map(IqSet::Points)
        .map_err(to_nif_error)
}

/// Run the whole chain, memoized on the full input tuple
#[rustler::nif(schedule = "DirtyCpu")]
fn simulate<'a>(
    env: Env<'a>,
    bits: Vec<u8>,
    scheme: Term<'a>,
    params: WaveformParameters,
    noise_seed: u64,
) -> NifResult<Term<'a>> {
    let scheme = decode_scheme(scheme)?;
    let sim = CACHE
        .lock()
        .map_err(|_| rustler::Error::Term(Box::new("lock poisoned")))?
        .get_or_compute(&bits, scheme, &params, noise_seed)
        .map_err(to_nif_error)?;

    encode_simulation(env, &sim)
}

/// Drop every memoized simulation
#[rustler::nif]
fn cache_clear() -> rustler::Atom {
    if let Ok(mut cache) = CACHE.lock() {
        cache.clear();
    }
    ok()
}
