//! Core DSP traits for the modulation engine
//!
//! Each trait is one orthogonal axis of the transmit/receive chain:
//! where a symbol sits in the I/Q plane, and what the local oscillator
//! looks like at a given instant.

mod constellation;
mod carrier;

pub use constellation::Constellation;
pub use carrier::Carrier;
