//! Fixed-frequency tone
//!
//! Used as the transmit carrier (with a phase offset for BPSK, a shifted
//! frequency for FSK) and as the receiver's local reference.

use crate::traits::Carrier;
use std::f64::consts::PI;

/// Fixed-frequency, fixed-phase oscillator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    freq_hz: f64,
    phase: f64,
}

impl Tone {
    /// Create a tone at `freq_hz` with zero phase offset
    pub fn new(freq_hz: f64) -> Self {
        Self { freq_hz, phase: 0.0 }
    }

    /// Set the phase offset (radians)
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    /// Same tone shifted by `offset_hz`
    pub fn shifted(self, offset_hz: f64) -> Self {
        Self {
            freq_hz: self.freq_hz + offset_hz,
            ..self
        }
    }
}

impl Carrier for Tone {
    fn frequency(&self) -> f64 {
        self.freq_hz
    }

    fn phase_offset(&self) -> f64 {
        self.phase
    }
}

/// Phase of an antipodal symbol lying on the real axis
pub(crate) fn antipodal_phase(i: f64) -> f64 {
    if i < 0.0 { PI } else { 0.0 }
}
