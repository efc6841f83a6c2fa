//! Carrier oscillator implementations
//!
//! Currently only a fixed-frequency tone.

pub(crate) mod tone;

pub use tone::Tone;
