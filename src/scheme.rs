//! Modulation schemes and their dispatch table
//!
//! Everything that varies by scheme (bits per symbol, bit mapping,
//! waveform rule, slicer) is looked up here once, instead of branching on
//! the scheme throughout the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::WaveformParameters;
use crate::constellations::{Bpsk, Ook, Qam16, Qpsk};
use crate::error::ModemError;
use crate::mapper::{self, MappedSymbol};
use crate::traits::Constellation;

/// The five supported schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ModulationScheme {
    Ask,
    Fsk,
    Bpsk,
    Qpsk,
    Qam16,
}

/// How a mapped symbol drives the carrier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarrierRule {
    /// `I · cos(2π·fc·t)`
    OnOff,
    /// `A · cos(2π·f·t)` with the symbol's own tone
    Tone,
    /// `A · cos(2π·fc·t + φ)`, φ ∈ {0, π}
    Antipodal,
    /// `I · cos(2π·fc·t) − Q · sin(2π·fc·t)`
    Quadrature,
}

/// One row of the dispatch table
pub struct SchemeEntry {
    pub label: &'static str,
    pub bits_per_symbol: usize,
    pub map: fn(u8, &WaveformParameters) -> MappedSymbol,
    pub rule: CarrierRule,
    pub constellation: Option<&'static dyn Constellation>,
}

static SCHEMES: [SchemeEntry; 5] = [
    SchemeEntry {
        label: "ASK",
        bits_per_symbol: 1,
        map: mapper::map_ask,
        rule: CarrierRule::OnOff,
        constellation: Some(&Ook),
    },
    SchemeEntry {
        label: "FSK",
        bits_per_symbol: 1,
        map: mapper::map_fsk,
        rule: CarrierRule::Tone,
        constellation: None,
    },
    SchemeEntry {
        label: "BPSK",
        bits_per_symbol: 1,
        map: mapper::map_bpsk,
        rule: CarrierRule::Antipodal,
        constellation: Some(&Bpsk),
    },
    SchemeEntry {
        label: "QPSK",
        bits_per_symbol: 2,
        map: mapper::map_qpsk,
        rule: CarrierRule::Quadrature,
        constellation: Some(&Qpsk),
    },
    SchemeEntry {
        label: "QAM16",
        bits_per_symbol: 4,
        map: mapper::map_qam16,
        rule: CarrierRule::Quadrature,
        constellation: Some(&Qam16),
    },
];

impl ModulationScheme {
    pub const ALL: [ModulationScheme; 5] = [
        Self::Ask,
        Self::Fsk,
        Self::Bpsk,
        Self::Qpsk,
        Self::Qam16,
    ];

    /// Dispatch table row for this scheme
    #[inline]
    pub fn entry(self) -> &'static SchemeEntry {
        &SCHEMES[self as usize]
    }

    pub fn bits_per_symbol(self) -> usize {
        self.entry().bits_per_symbol
    }

    pub fn label(self) -> &'static str {
        self.entry().label
    }

    pub fn rule(self) -> CarrierRule {
        self.entry().rule
    }

    /// Constellation used for slicing; `None` for FSK
    pub fn constellation(self) -> Option<&'static dyn Constellation> {
        self.entry().constellation
    }

    /// Whether the scheme carries information in I/Q
    pub fn has_constellation(self) -> bool {
        self.constellation().is_some()
    }
}

impl fmt::Display for ModulationScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ModulationScheme {
    type Err = ModemError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let normalized: String = tag
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_uppercase();

        match normalized.as_str() {
            "ASK" | "OOK" => Ok(Self::Ask),
            "FSK" => Ok(Self::Fsk),
            "BPSK" => Ok(Self::Bpsk),
            "QPSK" => Ok(Self::Qpsk),
            "QAM16" | "16QAM" => Ok(Self::Qam16),
            _ => Err(ModemError::InvalidScheme(tag.to_string())),
        }
    }
}
