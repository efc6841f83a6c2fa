//! On/off keying constellation (1 bit per symbol)
//!
//! Symbol 0 → carrier off (0, 0)
//! Symbol 1 → carrier on  (1, 0)

use crate::traits::Constellation;

/// On/off keyed amplitude constellation used for ASK
#[derive(Debug, Clone, Copy, Default)]
pub struct Ook;

impl Constellation for Ook {
    fn order(&self) -> usize {
        2
    }

    fn symbol_to_iq(&self, sym: u8) -> (f64, f64) {
        match sym & 0x01 {
            0 => (0.0, 0.0),
            _ => (1.0, 0.0),
        }
    }

    fn iq_to_symbol(&self, i: f64, _q: f64) -> u8 {
        if i >= 0.5 { 1 } else { 0 }
    }
}
