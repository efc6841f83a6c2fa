//! Transmit → channel → receive loopback tests
//!
//! Exercises the synthesizer and the correlator together, first without
//! noise (exact recovery) and then with AWGN (statistical behaviour).

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::bits::generate_bits_seeded;
use crate::config::WaveformParameters;
use crate::iq::{IqPoint, IqSet};
use crate::scheme::ModulationScheme;

const COHERENT: [ModulationScheme; 4] = [
    ModulationScheme::Ask,
    ModulationScheme::Bpsk,
    ModulationScheme::Qpsk,
    ModulationScheme::Qam16,
];

fn assert_close(est: &IqPoint, ideal: &IqPoint, ctx: &str) {
    let tol = |x: f64| 1e-6 * x.abs().max(1.0);
    assert!((est.i - ideal.i).abs() < tol(ideal.i), "{}: I {} vs {}", ctx, est.i, ideal.i);
    assert!((est.q - ideal.q).abs() < tol(ideal.q), "{}: Q {} vs {}", ctx, est.q, ideal.q);
}

#[test]
fn test_noiseless_roundtrip_all_coherent_schemes() {
    let params = WaveformParameters::default().with_amplitude(1.3);
    let bits = generate_bits_seeded(48, 5).unwrap();

    for scheme in COHERENT {
        let waveform = synthesize(&bits, scheme, &params).unwrap();
        let estimated = CoherentDemodulator::new().demodulate(&waveform).unwrap();

        let ideal = waveform.ideal_iq.points().unwrap();
        let est = estimated.points().unwrap();
        assert_eq!(est.len(), ideal.len(), "{}", scheme);
        for (k, (e, i)) in est.iter().zip(ideal).enumerate() {
            assert_close(e, i, &format!("{} symbol {}", scheme, k));
        }
    }
}

#[test]
fn test_noiseless_roundtrip_other_carrier() {
    // 20 baud, 50 samples/symbol: 1000 Hz sample rate, 250 Hz carrier
    let params = WaveformParameters {
        carrier_hz: 250.0,
        samples_per_symbol: 50,
        ..Default::default()
    };
    let bits = generate_bits_seeded(32, 8).unwrap();
    let waveform = synthesize(&bits, ModulationScheme::Qam16, &params).unwrap();
    let estimated = CoherentDemodulator::new().demodulate(&waveform).unwrap();

    for (e, i) in estimated.points().unwrap().iter().zip(waveform.ideal_iq.points().unwrap()) {
        assert_close(e, i, "qam16 @ 250 Hz");
    }
}

#[test]
fn test_fsk_demodulates_to_not_applicable() {
    let bits = generate_bits_seeded(16, 2).unwrap();
    let waveform = synthesize(&bits, ModulationScheme::Fsk, &WaveformParameters::default()).unwrap();
    let estimated = CoherentDemodulator::new().demodulate(&waveform).unwrap();
    assert_eq!(estimated, IqSet::NotApplicable);
}

#[test]
fn test_noise_changes_estimates() {
    let bits = generate_bits_seeded(40, 1).unwrap();
    let params = WaveformParameters::default();
    let clean = synthesize(&bits, ModulationScheme::Bpsk, &params).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let noisy = clean.clone().with_noise(0.3, &mut rng).unwrap();
    assert_ne!(clean.samples, noisy.samples);
    assert_eq!(clean.timestamps, noisy.timestamps);

    let demod = CoherentDemodulator::new();
    let mse = demod
        .demodulate(&noisy)
        .unwrap()
        .mean_squared_error(&clean.ideal_iq)
        .unwrap();
    assert!(mse > 0.0);
}

#[test]
fn test_noise_monotonicity() {
    let params = WaveformParameters::default();
    let demod = CoherentDemodulator::new();
    let levels = [0.05, 0.2, 0.5, 0.8];
    let trials = 20;

    for scheme in COHERENT {
        let mut mean_errors = Vec::new();
        for &std_dev in &levels {
            let mut total = 0.0;
            for trial in 0..trials {
                let bits = generate_bits_seeded(40, trial).unwrap();
                let clean = synthesize(&bits, scheme, &params).unwrap();
                let mut rng = ChaCha8Rng::seed_from_u64(1000 + trial);
                let noisy = clean.clone().with_noise(std_dev, &mut rng).unwrap();
                total += demod
                    .demodulate(&noisy)
                    .unwrap()
                    .mean_squared_error(&clean.ideal_iq)
                    .unwrap();
            }
            mean_errors.push(total / trials as f64);
        }

        for pair in mean_errors.windows(2) {
            assert!(pair[1] > pair[0], "{}: errors not increasing: {:?}", scheme, mean_errors);
        }
    }
}

#[test]
fn test_estimate_variance_matches_theory() {
    // Each component of the estimate has variance 2σ²/N
    let params = WaveformParameters::default();
    let std_dev = 0.5;
    let bits = generate_bits_seeded(2000, 3).unwrap();
    let clean = synthesize(&bits, ModulationScheme::Bpsk, &params).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let noisy = clean.clone().with_noise(std_dev, &mut rng).unwrap();

    let mse = CoherentDemodulator::new()
        .demodulate(&noisy)
        .unwrap()
        .mean_squared_error(&clean.ideal_iq)
        .unwrap();
    let expected = 4.0 * std_dev * std_dev / params.samples_per_symbol as f64;
    assert!((mse - expected).abs() / expected < 0.1, "mse {} expected {}", mse, expected);
}
