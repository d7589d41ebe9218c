//! Core math modules.

pub mod error_metrics;
pub mod stable;
