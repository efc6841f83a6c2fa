//! Constellation trait - Bit group ↔ I/Q mapping
//!
//! Defines how a symbol index maps to a point in the complex baseband
//! plane. Amplitude scaling is applied by the caller.

/// Symbol alphabet mapping trait
///
/// Symbol indices are formed from the symbol's bits MSB first, so the bit
/// group `[1, 0]` is symbol 2.
pub trait Constellation: Send + Sync {
    /// Number of points in the constellation (2 for BPSK, 4 for QPSK, etc.)
    fn order(&self) -> usize;

    /// Bits per symbol (log2 of order)
    fn bits_per_symbol(&self) -> usize {
        (self.order() as f64).log2() as usize
    }

    /// Map a symbol index to unscaled I/Q coordinates
    fn symbol_to_iq(&self, sym: u8) -> (f64, f64);

    /// Decide the nearest symbol from unscaled I/Q coordinates (hard decision)
    fn iq_to_symbol(&self, i: f64, q: f64) -> u8;
}
