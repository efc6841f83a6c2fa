//! I/Q value types shared by the mapper, synthesizer and demodulator

use serde::{Deserialize, Serialize};

/// One point in the complex baseband plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IqPoint {
    pub i: f64,
    pub q: f64,
}

impl IqPoint {
    pub const fn new(i: f64, q: f64) -> Self {
        Self { i, q }
    }

    /// Scale both components
    #[inline]
    pub fn scale(self, k: f64) -> Self {
        Self::new(self.i * k, self.q * k)
    }

    /// Squared Euclidean distance to `other`
    #[inline]
    pub fn distance_sq(self, other: Self) -> f64 {
        let di = self.i - other.i;
        let dq = self.q - other.q;
        di * di + dq * dq
    }

    pub fn magnitude(self) -> f64 {
        (self.i * self.i + self.q * self.q).sqrt()
    }

    pub fn as_tuple(self) -> (f64, f64) {
        (self.i, self.q)
    }
}

impl From<(f64, f64)> for IqPoint {
    fn from((i, q): (f64, f64)) -> Self {
        Self::new(i, q)
    }
}

/// Per-symbol I/Q list, or an explicit marker that the scheme has none
///
/// FSK keys frequency rather than amplitude or phase, so both its ideal
/// constellation and its demodulated estimates are `NotApplicable`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "points", rename_all = "snake_case")]
pub enum IqSet {
    Points(Vec<IqPoint>),
    NotApplicable,
}

impl IqSet {
    pub fn points(&self) -> Option<&[IqPoint]> {
        match self {
            Self::Points(p) => Some(p),
            Self::NotApplicable => None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, Self::Points(_))
    }

    /// Number of points (zero when not applicable)
    pub fn len(&self) -> usize {
        self.points().map_or(0, |p| p.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mean squared distance between matching points of two sets
    ///
    /// `None` if either set is not applicable, or both are empty.
    pub fn mean_squared_error(&self, other: &IqSet) -> Option<f64> {
        let (a, b) = (self.points()?, other.points()?);
        let n = a.len().min(b.len());
        if n == 0 {
            return None;
        }
        let total: f64 = a.iter().zip(b).map(|(x, y)| x.distance_sq(*y)).sum();
        Some(total / n as f64)
    }
}
