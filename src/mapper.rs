//! Bit-to-symbol mapping
//!
//! Groups a bit stream into symbols and maps each one through the
//! scheme's dispatch table entry.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::WaveformParameters;
use crate::constellations::{bits_to_symbol, Bpsk, Ook, Qam16, Qpsk};
use crate::error::{ModemError, Result};
use crate::iq::{IqPoint, IqSet};
use crate::scheme::ModulationScheme;
use crate::traits::Constellation;

/// Mapping of one symbol
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MappedSymbol {
    /// Constellation point, amplitude already applied
    Point(IqPoint),
    /// FSK transmit frequency; no I/Q
    Tone { freq_hz: f64 },
}

impl MappedSymbol {
    /// Ideal I/Q, or `None` for a tone
    pub fn iq(&self) -> Option<IqPoint> {
        match *self {
            Self::Point(p) => Some(p),
            Self::Tone { .. } => None,
        }
    }
}

fn point<C: Constellation>(c: C, sym: u8, amplitude: f64) -> MappedSymbol {
    MappedSymbol::Point(IqPoint::from(c.symbol_to_iq(sym)).scale(amplitude))
}

pub(crate) fn map_ask(sym: u8, params: &WaveformParameters) -> MappedSymbol {
    point(Ook, sym, params.amplitude)
}

pub(crate) fn map_fsk(sym: u8, params: &WaveformParameters) -> MappedSymbol {
    let deviation = if sym & 0x01 == 1 {
        params.fsk_deviation_hz
    } else {
        -params.fsk_deviation_hz
    };
    MappedSymbol::Tone {
        freq_hz: params.carrier_hz + deviation,
    }
}

pub(crate) fn map_bpsk(sym: u8, params: &WaveformParameters) -> MappedSymbol {
    point(Bpsk, sym, params.amplitude)
}

pub(crate) fn map_qpsk(sym: u8, params: &WaveformParameters) -> MappedSymbol {
    point(Qpsk, sym, params.amplitude)
}

pub(crate) fn map_qam16(sym: u8, params: &WaveformParameters) -> MappedSymbol {
    point(Qam16, sym, params.amplitude)
}

/// Check that `bits` is a non-empty, binary, whole number of symbols
pub fn check_bits(bits: &[u8], scheme: ModulationScheme) -> Result<()> {
    let bps = scheme.bits_per_symbol();
    if bits.is_empty() || bits.len() % bps != 0 {
        return Err(ModemError::InvalidBitLength {
            len: bits.len(),
            bits_per_symbol: bps,
        });
    }
    if let Some(pos) = bits.iter().position(|&b| b > 1) {
        return Err(ModemError::param(format!(
            "bit {} has value {}, expected 0 or 1",
            pos, bits[pos]
        )));
    }
    Ok(())
}

/// Group `bits` into symbols and map each one
///
/// The caller owns the truncation policy: `bits.len()` must already be a
/// multiple of the scheme's bits per symbol.
pub fn map_symbols(
    bits: &[u8],
    scheme: ModulationScheme,
    params: &WaveformParameters,
) -> Result<Vec<MappedSymbol>> {
    check_bits(bits, scheme)?;
    params.validate()?;

    let entry = scheme.entry();
    let symbols: Vec<MappedSymbol> = bits
        .chunks_exact(entry.bits_per_symbol)
        .map(|group| (entry.map)(bits_to_symbol(group), params))
        .collect();

    debug!(scheme = %scheme, bits = bits.len(), symbols = symbols.len(), "mapped symbols");
    Ok(symbols)
}

/// Ideal I/Q of a mapped sequence
pub fn ideal_iq(symbols: &[MappedSymbol], scheme: ModulationScheme) -> IqSet {
    if !scheme.has_constellation() {
        return IqSet::NotApplicable;
    }
    IqSet::Points(symbols.iter().filter_map(MappedSymbol::iq).collect())
}
