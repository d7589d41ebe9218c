//! Guarded timed automata core library.
//!
//! This library provides:
//! - The automaton model, guard normalization, re-estimation and streaming prediction
//! - Codecs for learner output and persisted graph files
//! - The persistence baseline and training-file export
//! - Flat sequence I/O, structured logging and exit codes
//!
//! The binary entry point is in `main.rs`.

pub mod automaton;
pub mod codec;
pub mod exit_codes;
pub mod flat;
pub mod forecast;
pub mod logging;
pub mod pipeline;
pub mod training;
