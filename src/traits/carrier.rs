//! Carrier trait - Reference oscillator
//!
//! The synthesizer and the correlator evaluate the carrier at absolute
//! timestamps instead of stepping a phase accumulator, so the phase at any
//! sample is a function of its timestamp alone.

/// Carrier oscillator trait
pub trait Carrier: Send + Sync {
    /// Carrier frequency in Hz
    fn frequency(&self) -> f64;

    /// Phase offset in radians
    fn phase_offset(&self) -> f64 {
        0.0
    }

    /// Instantaneous phase at time `t` (seconds)
    fn phase_at(&self, t: f64) -> f64 {
        2.0 * std::f64::consts::PI * self.frequency() * t + self.phase_offset()
    }

    /// (cos, sin) of the carrier at time `t`
    fn at(&self, t: f64) -> (f64, f64) {
        let (sin, cos) = self.phase_at(t).sin_cos();
        (cos, sin)
    }
}
