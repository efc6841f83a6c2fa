//! Constellation implementations
//!
//! One per I/Q-bearing scheme:
//! - OOK (1 bit/symbol, ASK on/off keying)
//! - BPSK (1 bit/symbol)
//! - QPSK (2 bits/symbol)
//! - 16-QAM (4 bits/symbol)
//!
//! FSK carries information in frequency and has no constellation.

mod ook;
mod bpsk;
mod qpsk;
mod qam16;

pub use ook::Ook;
pub use bpsk::Bpsk;
pub use qpsk::Qpsk;
pub use qam16::Qam16;

/// Pack a bit group into a symbol index, MSB first
#[inline]
pub fn bits_to_symbol(bits: &[u8]) -> u8 {
    bits.iter().fold(0u8, |acc, &b| (acc << 1) | (b & 1))
}

/// Unpack a symbol index into `width` bits, MSB first
#[inline]
pub fn symbol_to_bits(sym: u8, width: usize) -> impl Iterator<Item = u8> {
    (0..width).rev().map(move |shift| (sym >> shift) & 1)
}
