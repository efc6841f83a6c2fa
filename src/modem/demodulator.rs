//! Coherent correlation demodulator
//!
//! Mixes each symbol window against local cosine and negative-sine
//! references and integrates over the window. The receiver's carrier is
//! assumed to match the transmitter's exactly in frequency and phase; there
//! is no carrier or timing recovery.

use tracing::debug;

use super::synthesizer::Waveform;
use crate::carriers::Tone;
use crate::error::{ModemError, Result};
use crate::iq::{IqPoint, IqSet};
use crate::timing::SymbolClock;
use crate::traits::Carrier;

/// Mixer gain restoring unit amplitude after `cos² = (1 + cos 2θ) / 2`
const MIXER_GAIN: f64 = 2.0;

/// Correlate `signal` against the carrier, one I/Q estimate per symbol
///
/// `timestamps[n]` is the time of `signal[n]`. A window that runs past the
/// end of the signal is integrated over the samples that exist.
pub fn correlate(
    signal: &[f64],
    timestamps: &[f64],
    carrier_hz: f64,
    samples_per_symbol: usize,
    symbol_count: usize,
) -> Result<Vec<IqPoint>> {
    if samples_per_symbol == 0 {
        return Err(ModemError::param("samples per symbol must be at least 1"));
    }
    if signal.len() != timestamps.len() {
        return Err(ModemError::param(format!(
            "signal has {} samples but {} timestamps",
            signal.len(),
            timestamps.len()
        )));
    }

    let reference = Tone::new(carrier_hz);
    let gain = MIXER_GAIN / samples_per_symbol as f64;

    let estimates: Vec<IqPoint> = (0..symbol_count)
        .map(|k| {
            let start = (k * samples_per_symbol).min(signal.len());
            let end = (start + samples_per_symbol).min(signal.len());

            let (acc_i, acc_q) = signal[start..end]
                .iter()
                .zip(&timestamps[start..end])
                .fold((0.0, 0.0), |(acc_i, acc_q), (&s, &t)| {
                    let (cos, sin) = reference.at(t);
                    (acc_i + s * cos, acc_q - s * sin)
                });

            IqPoint::new(acc_i * gain, acc_q * gain)
        })
        .collect();

    debug!(symbols = estimates.len(), carrier_hz, samples_per_symbol, "correlated I/Q");
    Ok(estimates)
}

/// `correlate` on a signal sampled by `clock` from t = 0
///
/// The symbol count is the number of whole symbols in `signal`.
pub fn correlate_with_clock(
    signal: &[f64],
    clock: &SymbolClock,
    carrier_hz: f64,
) -> Result<Vec<IqPoint>> {
    let sps = clock.samples_per_symbol();
    let symbol_count = signal.len() / sps;
    let timestamps = clock.timestamps(symbol_count);
    correlate(
        &signal[..timestamps.len()],
        &timestamps,
        carrier_hz,
        sps,
        symbol_count,
    )
}

/// Ideal coherent receiver for a synthesized waveform
#[derive(Debug, Clone, Copy, Default)]
pub struct CoherentDemodulator;

impl CoherentDemodulator {
    pub fn new() -> Self {
        Self
    }

    /// Estimate per-symbol I/Q
    ///
    /// Frequency-keyed waveforms have no constellation and yield
    /// `IqSet::NotApplicable`.
    pub fn demodulate(&self, waveform: &Waveform) -> Result<IqSet> {
        if !waveform.scheme.has_constellation() {
            debug!(scheme = %waveform.scheme, "no constellation, skipping correlation");
            return Ok(IqSet::NotApplicable);
        }

        correlate(
            &waveform.samples,
            &waveform.timestamps,
            waveform.carrier_hz,
            waveform.samples_per_symbol,
            waveform.symbol_count,
        )
        .map(IqSet::Points)
    }
}
