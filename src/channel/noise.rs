//! Additive White Gaussian Noise generator
//!
//! Uses the Box-Muller transform for Gaussian samples, one draw per
//! output sample.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::PI;
use tracing::debug;

use crate::error::{ModemError, Result};

/// Uniform draw in (0, 1), re-drawing exact zeros
#[inline]
fn open_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let u: f64 = rng.gen();
        if u > 0.0 {
            return u;
        }
    }
}

/// One standard normal draw via Box-Muller
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u = open_unit(rng);
    let v = open_unit(rng);
    (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos()
}

fn check_std_dev(std_dev: f64) -> Result<()> {
    if std_dev.is_finite() && std_dev >= 0.0 {
        Ok(())
    } else {
        Err(ModemError::param(format!(
            "noise standard deviation must be non-negative, got {}",
            std_dev
        )))
    }
}

/// AWGN generator with fixed standard deviation
pub struct NoiseGenerator<R: Rng> {
    /// Standard deviation (sqrt of noise power)
    std_dev: f64,

    rng: R,
}

impl<R: Rng> NoiseGenerator<R> {
    pub fn new(std_dev: f64, rng: R) -> Result<Self> {
        check_std_dev(std_dev)?;
        Ok(Self { std_dev, rng })
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Next zero-mean Gaussian sample
    pub fn next_sample(&mut self) -> f64 {
        standard_normal(&mut self.rng) * self.std_dev
    }
}

/// Add independent Gaussian noise to every sample
///
/// `std_dev == 0` returns the samples unchanged without touching `rng`.
pub fn add_noise<R: Rng + ?Sized>(samples: &[f64], std_dev: f64, rng: &mut R) -> Result<Vec<f64>> {
    check_std_dev(std_dev)?;
    if std_dev == 0.0 {
        return Ok(samples.to_vec());
    }

    let mut noise = NoiseGenerator::new(std_dev, rng)?;
    let noisy = samples.iter().map(|&s| s + noise.next_sample()).collect();

    debug!(samples = samples.len(), std_dev, "added AWGN");
    Ok(noisy)
}

/// `add_noise` with a ChaCha8 stream seeded from `seed`
pub fn add_noise_seeded(samples: &[f64], std_dev: f64, seed: u64) -> Result<Vec<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    add_noise(samples, std_dev, &mut rng)
}
