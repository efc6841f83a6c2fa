//! Hard decisions and error counting on demodulated I/Q
//!
//! Slices each estimate back to the nearest constellation symbol, unpacks
//! it to bits, and compares against what was sent.

use serde::{Deserialize, Serialize};

use crate::constellations::symbol_to_bits;
use crate::iq::{IqPoint, IqSet};
use crate::mapper::MappedSymbol;
use crate::modem::Waveform;
use crate::scheme::ModulationScheme;
use crate::utils::{mean, power_to_db};

/// Bit and symbol error tallies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorCounts {
    pub bits: usize,
    pub bit_errors: usize,
    pub symbols: usize,
    pub symbol_errors: usize,
}

impl ErrorCounts {
    pub fn bit_error_rate(&self) -> f64 {
        if self.bits == 0 {
            return 0.0;
        }
        self.bit_errors as f64 / self.bits as f64
    }

    pub fn symbol_error_rate(&self) -> f64 {
        if self.symbols == 0 {
            return 0.0;
        }
        self.symbol_errors as f64 / self.symbols as f64
    }
}

/// Hard-decision bits from I/Q estimates
///
/// `amplitude` is the transmit amplitude the estimates are scaled by.
/// Returns `None` when the set is not applicable (FSK).
pub fn slice_bits(estimates: &IqSet, scheme: ModulationScheme, amplitude: f64) -> Option<Vec<u8>> {
    let constellation = scheme.constellation()?;
    let points = estimates.points()?;
    let bps = scheme.bits_per_symbol();
    let unscale = if amplitude > 0.0 { 1.0 / amplitude } else { 0.0 };

    Some(
        points
            .iter()
            .flat_map(|p| {
                let sym = constellation.iq_to_symbol(p.i * unscale, p.q * unscale);
                symbol_to_bits(sym, bps)
            })
            .collect(),
    )
}

/// Compare transmitted and received bits, grouping by symbol
pub fn count_errors(sent: &[u8], received: &[u8], bits_per_symbol: usize) -> ErrorCounts {
    let bps = bits_per_symbol.max(1);
    let n = sent.len().min(received.len());

    let bit_errors = sent[..n]
        .iter()
        .zip(&received[..n])
        .filter(|(a, b)| a != b)
        .count();
    let symbol_errors = sent[..n]
        .chunks(bps)
        .zip(received[..n].chunks(bps))
        .filter(|(a, b)| a != b)
        .count();

    ErrorCounts {
        bits: n,
        bit_errors,
        symbols: n.div_ceil(bps),
        symbol_errors,
    }
}

/// Modulation error ratio in dB
///
/// Mean ideal symbol power over mean squared error vector magnitude.
/// Infinite for a noiseless estimate; `None` for FSK.
pub fn modulation_error_ratio_db(ideal: &IqSet, estimated: &IqSet) -> Option<f64> {
    let mse = ideal.mean_squared_error(estimated)?;
    if mse == 0.0 {
        return Some(f64::INFINITY);
    }
    let power = mean(ideal.points()?.iter().map(|p| p.magnitude().powi(2)));
    Some(power_to_db(power / mse))
}

/// One line of the per-symbol table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolRow {
    pub index: usize,
    /// The symbol's bits, e.g. `"0011"`
    pub bits: String,
    pub ideal: Option<IqPoint>,
    pub estimated: Option<IqPoint>,
    /// FSK transmit frequency
    pub tone_hz: Option<f64>,
}

/// Per-symbol table pairing bits, ideal I/Q and estimated I/Q
pub fn symbol_rows(bits: &[u8], waveform: &Waveform, estimated: &IqSet) -> Vec<SymbolRow> {
    let bps = waveform.scheme.bits_per_symbol();
    let estimates = estimated.points().unwrap_or(&[]);

    waveform
        .symbols
        .iter()
        .enumerate()
        .map(|(k, symbol)| {
            let group = bits.get(k * bps..(k + 1) * bps).unwrap_or(&[]);
            SymbolRow {
                index: k,
                bits: group.iter().map(|b| char::from(b'0' + b)).collect(),
                ideal: symbol.iq(),
                estimated: estimates.get(k).copied(),
                tone_hz: match *symbol {
                    MappedSymbol::Tone { freq_hz } => Some(freq_hz),
                    MappedSymbol::Point(_) => None,
                },
            }
        })
        .collect()
}
