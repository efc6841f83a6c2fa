//! Utility functions shared by the library and the CLI

pub mod logging;
mod math;

pub use math::*;
