//! Fixed symbol clock
//!
//! The sample rate is derived, never configured: it is always
//! `symbol_rate * samples_per_symbol`. Timestamps are computed from the
//! symbol index and the sample offset within the symbol, so the time axis
//! is monotonic and continuous across symbol boundaries.

use crate::error::{ModemError, Result};

/// Symbol clock (symbol rate + samples per symbol)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolClock {
    symbol_rate: f64,
    samples_per_symbol: usize,
}

impl SymbolClock {
    /// Create a symbol clock
    ///
    /// # Errors
    /// `InvalidParameter` if `symbol_rate` is not a positive finite number
    /// or `samples_per_symbol` is zero.
    pub fn new(symbol_rate: f64, samples_per_symbol: usize) -> Result<Self> {
        if !(symbol_rate.is_finite() && symbol_rate > 0.0) {
            return Err(ModemError::param(format!(
                "symbol rate must be positive, got {}",
                symbol_rate
            )));
        }
        if samples_per_symbol == 0 {
            return Err(ModemError::param("samples per symbol must be at least 1"));
        }

        Ok(Self {
            symbol_rate,
            samples_per_symbol,
        })
    }

    /// Symbol rate in symbols per second
    pub fn symbol_rate(&self) -> f64 {
        self.symbol_rate
    }

    /// Samples per symbol period
    pub fn samples_per_symbol(&self) -> usize {
        self.samples_per_symbol
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> f64 {
        self.symbol_rate * self.samples_per_symbol as f64
    }

    /// Symbol period in seconds
    pub fn symbol_period(&self) -> f64 {
        1.0 / self.symbol_rate
    }

    /// Timestamp of sample `offset` within symbol `symbol`
    #[inline]
    pub fn timestamp(&self, symbol: usize, offset: usize) -> f64 {
        symbol as f64 / self.symbol_rate + offset as f64 / self.sample_rate()
    }

    /// Timestamps for `symbol_count` whole symbols
    pub fn timestamps(&self, symbol_count: usize) -> Vec<f64> {
        let sps = self.samples_per_symbol;
        let mut out = Vec::with_capacity(symbol_count * sps);
        for k in 0..symbol_count {
            for j in 0..sps {
                out.push(self.timestamp(k, j));
            }
        }
        out
    }
}
