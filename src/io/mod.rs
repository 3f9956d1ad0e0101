//! Optional file outputs: per-point CSV results and JSON parameter files.

pub mod export;
pub mod params;

pub use export::*;
pub use params::*;
