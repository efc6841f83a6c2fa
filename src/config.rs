//! Waveform parameters and their defaults
//!
//! One parameter set drives a whole run. It can arrive from Elixir as a
//! `ModemLab.WaveformParameters` struct or from a JSON file.

use rustler::NifStruct;
use serde::{Deserialize, Serialize};

use crate::error::{ModemError, Result};
use crate::timing::SymbolClock;

/// Default carrier frequency (Hz)
pub const DEFAULT_CARRIER_HZ: f64 = 400.0;

/// Default symbol rate (symbols/s)
pub const DEFAULT_SYMBOL_RATE: f64 = 20.0;

/// Default samples per symbol
pub const DEFAULT_SAMPLES_PER_SYMBOL: usize = 100;

/// Default peak amplitude
pub const DEFAULT_AMPLITUDE: f64 = 1.0;

/// Default FSK deviation (Hz)
pub const DEFAULT_FSK_DEVIATION_HZ: f64 = 150.0;

/// Default bit count for a fresh bit stream
pub const DEFAULT_BIT_COUNT: usize = 40;

/// Parameters shared by synthesis, noise and demodulation
#[derive(NifStruct, Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[module = "ModemLab.WaveformParameters"]
#[serde(default)]
pub struct WaveformParameters {
    pub carrier_hz: f64,
    pub symbol_rate: f64,
    pub samples_per_symbol: usize,
    pub amplitude: f64,
    pub fsk_deviation_hz: f64,
    pub noise_std_dev: f64,
}

impl Default for WaveformParameters {
    fn default() -> Self {
        Self {
            carrier_hz: DEFAULT_CARRIER_HZ,
            symbol_rate: DEFAULT_SYMBOL_RATE,
            samples_per_symbol: DEFAULT_SAMPLES_PER_SYMBOL,
            amplitude: DEFAULT_AMPLITUDE,
            fsk_deviation_hz: DEFAULT_FSK_DEVIATION_HZ,
            noise_std_dev: 0.0,
        }
    }
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ModemError::param(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )))
    }
}

impl WaveformParameters {
    /// Check every parameter invariant
    pub fn validate(&self) -> Result<()> {
        self.clock()?;
        non_negative("carrier frequency", self.carrier_hz)?;
        non_negative("amplitude", self.amplitude)?;
        non_negative("FSK deviation", self.fsk_deviation_hz)?;
        non_negative("noise standard deviation", self.noise_std_dev)?;
        Ok(())
    }

    /// Symbol clock for these parameters
    pub fn clock(&self) -> Result<SymbolClock> {
        SymbolClock::new(self.symbol_rate, self.samples_per_symbol)
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> f64 {
        self.symbol_rate * self.samples_per_symbol as f64
    }

    /// Copy with a different noise level
    pub fn with_noise(mut self, std_dev: f64) -> Self {
        self.noise_std_dev = std_dev;
        self
    }

    /// Copy with a different samples-per-symbol
    pub fn with_samples_per_symbol(mut self, sps: usize) -> Self {
        self.samples_per_symbol = sps;
        self
    }

    /// Copy with a different amplitude
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }
}
