//! Symbol timing
//!
//! Fixed relationship between symbol rate and sample rate for a whole run.

mod clock;

pub use clock::SymbolClock;
