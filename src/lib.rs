//! Modem Lab - digital modulation playground
//!
//! Turns a bit stream into a carrier waveform under ASK, FSK, BPSK, QPSK
//! or 16-QAM, optionally adds Gaussian noise, and recovers per-symbol I/Q
//! by coherent correlation. Rendering and UI state live in Elixir; Rust
//! only handles bits ↔ samples ↔ I/Q.
//!
//! Every stage is a pure function of its inputs. Randomness is always an
//! explicit `rand::Rng` handle so runs can be made reproducible.

pub mod error;
pub mod config;
pub mod iq;
pub mod traits;
pub mod constellations;
pub mod carriers;
pub mod timing;
pub mod scheme;
pub mod bits;
pub mod mapper;
pub mod channel;
pub mod modem;
pub mod analysis;
pub mod pipeline;
pub mod utils;
pub mod nif;

// Re-export core types for convenience
pub use error::{ModemError, Result};
pub use config::WaveformParameters;
pub use iq::{IqPoint, IqSet};
pub use traits::{Carrier, Constellation};
pub use constellations::{Bpsk, Ook, Qam16, Qpsk};
pub use carriers::Tone;
pub use timing::SymbolClock;
pub use scheme::{CarrierRule, ModulationScheme};
pub use bits::{aligned_bit_count, generate_bits, generate_bits_entropy, generate_bits_seeded, truncate_to_symbols};
pub use mapper::{map_symbols, MappedSymbol};
pub use channel::{add_noise, add_noise_seeded, NoiseGenerator};
pub use modem::{correlate, synthesize, CoherentDemodulator, Synthesizer, Waveform};
pub use analysis::{count_errors, modulation_error_ratio_db, slice_bits, symbol_rows, ErrorCounts, SymbolRow};
pub use pipeline::{simulate, Simulation, SimulationCache};

rustler::init!("Elixir.ModemLab.Native");
