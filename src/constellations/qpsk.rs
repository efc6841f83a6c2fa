//! QPSK constellation (2 bits per symbol)
//!
//! Gray-coded, unnormalized corners:
//! 00 → (+1, +1)
//! 01 → (-1, +1)
//! 11 → (-1, -1)
//! 10 → (+1, -1)
//!
//! The first bit selects the sign of Q, the second the sign of I, so
//! neighbouring points differ in exactly one bit.

use crate::traits::Constellation;

/// Quadrature Phase Shift Keying constellation (Gray coded)
#[derive(Debug, Clone, Copy, Default)]
pub struct Qpsk;

impl Constellation for Qpsk {
    fn order(&self) -> usize {
        4
    }

    fn symbol_to_iq(&self, sym: u8) -> (f64, f64) {
        let i = if (sym & 0x01) == 0 { 1.0 } else { -1.0 };
        let q = if (sym & 0x02) == 0 { 1.0 } else { -1.0 };
        (i, q)
    }

    fn iq_to_symbol(&self, i: f64, q: f64) -> u8 {
        let mut sym = 0u8;
        if i < 0.0 { sym |= 0x01; }
        if q < 0.0 { sym |= 0x02; }
        sym
    }
}
