//! Rectangular 16-QAM constellation (4 bits per symbol)
//!
//! Each axis carries a 2-bit Gray-coded level:
//! 00 → +3, 01 → +1, 11 → -1, 10 → -3
//!
//! The first bit pair drives I, the second drives Q. Points are scaled by
//! 1/√10 for unit average symbol power.

use crate::traits::Constellation;

/// Rectangular Gray-coded 16-QAM
#[derive(Debug, Clone, Copy, Default)]
pub struct Qam16;

/// Axis level indexed by the 2-bit Gray code
const AXIS_LEVELS: [f64; 4] = [3.0, 1.0, -3.0, -1.0];

/// 1/√10
pub const QAM16_NORM: f64 = 0.316_227_766_016_837_94;

#[inline]
fn axis_level(pair: u8) -> f64 {
    AXIS_LEVELS[(pair & 0x03) as usize]
}

#[inline]
fn axis_decide(level: f64) -> u8 {
    if level >= 2.0 {
        0b00
    } else if level >= 0.0 {
        0b01
    } else if level >= -2.0 {
        0b11
    } else {
        0b10
    }
}

impl Constellation for Qam16 {
    fn order(&self) -> usize {
        16
    }

    fn symbol_to_iq(&self, sym: u8) -> (f64, f64) {
        let i = axis_level(sym >> 2) * QAM16_NORM;
        let q = axis_level(sym) * QAM16_NORM;
        (i, q)
    }

    fn iq_to_symbol(&self, i: f64, q: f64) -> u8 {
        let i_pair = axis_decide(i / QAM16_NORM);
        let q_pair = axis_decide(q / QAM16_NORM);
        (i_pair << 2) | q_pair
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qam16_norm() {
        assert!((QAM16_NORM - 1.0 / 10f64.sqrt()).abs() < 1e-15);
    }

    #[test]
    fn test_qam16_axis_gray_table() {
        assert_eq!(axis_level(0b00), 3.0);
        assert_eq!(axis_level(0b01), 1.0);
        assert_eq!(axis_level(0b11), -1.0);
        assert_eq!(axis_level(0b10), -3.0);
    }

    #[test]
    fn test_qam16_known_point() {
        // 0011 → I from 00 (+3), Q from 11 (-1)
        let (i, q) = Qam16.symbol_to_iq(0b0011);
        assert!((i - 3.0 / 10f64.sqrt()).abs() < 1e-12);
        assert!((q + 1.0 / 10f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_qam16_unit_average_power() {
        let power: f64 = (0..16u8)
            .map(|sym| {
                let (i, q) = Qam16.symbol_to_iq(sym);
                i * i + q * q
            })
            .sum::<f64>()
            / 16.0;
        assert!((power - 1.0).abs() < 1e-12, "Average power: {}", power);
    }

    #[test]
    fn test_qam16_roundtrip() {
        for sym in 0..16u8 {
            let (i, q) = Qam16.symbol_to_iq(sym);
            let recovered = Qam16.iq_to_symbol(i, q);
            assert_eq!(sym, recovered, "Symbol {} roundtrip failed", sym);
        }
    }

    #[test]
    fn test_qam16_slicer_noise_tolerance() {
        for sym in 0..16u8 {
            let (i, q) = Qam16.symbol_to_iq(sym);
            let recovered = Qam16.iq_to_symbol(i + 0.1, q - 0.08);
            assert_eq!(sym, recovered, "Symbol {} failed with small noise", sym);
        }
    }

    #[test]
    fn test_qam16_order() {
        assert_eq!(Qam16.order(), 16);
        assert_eq!(Qam16.bits_per_symbol(), 4);
    }
}
