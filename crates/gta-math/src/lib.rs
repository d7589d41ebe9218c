//! Guarded-automaton toolkit math utilities.

pub mod math;

pub use math::error_metrics::*;
pub use math::stable::*;
