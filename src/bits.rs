//! Random bit source
//!
//! The RNG is always supplied by the caller. Seeded ChaCha streams make
//! runs reproducible; the thread RNG is there for interactive use.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::error::{ModemError, Result};
use crate::scheme::ModulationScheme;

/// Generate `n` independent uniform bits from `rng`
pub fn generate_bits<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Vec<u8>> {
    if n == 0 {
        return Err(ModemError::param("bit count must be at least 1"));
    }
    let bits: Vec<u8> = (0..n).map(|_| u8::from(rng.gen_bool(0.5))).collect();
    debug!(n, ones = bits.iter().filter(|&&b| b == 1).count(), "generated bits");
    Ok(bits)
}

/// Reproducible bits from a ChaCha8 stream seeded with `seed`
pub fn generate_bits_seeded(n: usize, seed: u64) -> Result<Vec<u8>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_bits(n, &mut rng)
}

/// Bits from the thread-local entropy-seeded RNG
pub fn generate_bits_entropy(n: usize) -> Result<Vec<u8>> {
    generate_bits(n, &mut rand::thread_rng())
}

/// Largest whole-symbol bit count not above `n`, and never below one symbol
pub fn aligned_bit_count(n: usize, scheme: ModulationScheme) -> usize {
    let bps = scheme.bits_per_symbol();
    ((n / bps) * bps).max(bps)
}

/// Prefix of `bits` holding a whole number of symbols
pub fn truncate_to_symbols(bits: &[u8], scheme: ModulationScheme) -> &[u8] {
    let bps = scheme.bits_per_symbol();
    &bits[..(bits.len() / bps) * bps]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_length_and_values() {
        let bits = generate_bits_seeded(200, 7).unwrap();
        assert_eq!(bits.len(), 200);
        assert!(bits.iter().all(|&b| b <= 1));
    }

    #[test]
    fn test_seeded_is_reproducible() {
        assert_eq!(
            generate_bits_seeded(64, 42).unwrap(),
            generate_bits_seeded(64, 42).unwrap()
        );
    }

    #[test]
    fn test_different_seeds_differ() {
        assert_ne!(
            generate_bits_seeded(64, 1).unwrap(),
            generate_bits_seeded(64, 2).unwrap()
        );
    }

    #[test]
    fn test_entropy_sources_differ() {
        let a = generate_bits_entropy(128).unwrap();
        let b = generate_bits_entropy(128).unwrap();
        assert_eq!(a.len(), b.len());
        // 2^-128 chance of a false failure
        assert_ne!(a, b);
    }

    #[test]
    fn test_roughly_balanced() {
        let bits = generate_bits_seeded(10_000, 3).unwrap();
        let ones = bits.iter().filter(|&&b| b == 1).count() as f64 / bits.len() as f64;
        assert!((ones - 0.5).abs() < 0.03, "fraction of ones: {}", ones);
    }

    #[test]
    fn test_zero_bits_rejected() {
        assert!(matches!(
            generate_bits_seeded(0, 1),
            Err(ModemError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_aligned_bit_count() {
        assert_eq!(aligned_bit_count(40, ModulationScheme::Qam16), 40);
        assert_eq!(aligned_bit_count(42, ModulationScheme::Qam16), 40);
        assert_eq!(aligned_bit_count(3, ModulationScheme::Qam16), 4);
        assert_eq!(aligned_bit_count(17, ModulationScheme::Qpsk), 16);
        assert_eq!(aligned_bit_count(17, ModulationScheme::Bpsk), 17);
    }

    #[test]
    fn test_truncate_to_symbols() {
        let bits = [1, 0, 1, 1, 0, 0, 1];
        assert_eq!(truncate_to_symbols(&bits, ModulationScheme::Qam16), &bits[..4]);
        assert_eq!(truncate_to_symbols(&bits, ModulationScheme::Qpsk), &bits[..6]);
        assert_eq!(truncate_to_symbols(&bits, ModulationScheme::Ask), &bits[..]);
        assert!(truncate_to_symbols(&bits[..3], ModulationScheme::Qam16).is_empty());
    }
}
