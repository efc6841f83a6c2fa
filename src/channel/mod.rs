//! Channel impairments
//!
//! Only additive white Gaussian noise.

pub mod noise;

pub use noise::{add_noise, add_noise_seeded, standard_normal, NoiseGenerator};
