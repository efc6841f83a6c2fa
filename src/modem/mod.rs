//! Transmit and receive halves of the modem
//!
//! The synthesizer turns bits into a carrier-modulated waveform; the
//! demodulator correlates a waveform back to per-symbol I/Q.

mod synthesizer;
mod demodulator;

#[cfg(test)]
mod loopback_tests;

pub use synthesizer::{synthesize, Synthesizer, Waveform};
pub use demodulator::{correlate, correlate_with_clock, CoherentDemodulator};
