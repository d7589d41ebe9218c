//! Model codecs.
//!
//! Two text formats carry automata:
//!
//! - learner output, in symbol form or time form, read by [`LearnerParser`]
//!   and normalized on load
//! - the persisted graph file, read and written by [`DotCodec`] without any
//!   further normalization
//!
//! Both readers implement [`ModelReader`]. Guard decoding for learner output
//! is a [`GuardDecoder`] strategy chosen by [`LearnerFormat`].

pub mod dot;
pub mod learner;

pub use dot::DotCodec;
pub use learner::{LearnerParser, LearnerReport};

use std::path::Path;
use std::sync::OnceLock;

use gta_common::{Error, LearnerFormat, Result};
use gta_config::ExperimentConfig;
use regex::Regex;

use crate::automaton::{Automaton, StateId};

/// Something that turns model text into an automaton.
pub trait ModelReader {
    /// Details about what a parse did, beyond the model itself.
    type Report;

    fn parse(&self, text: &str) -> Result<(Automaton, Self::Report)>;

    /// Read and parse a file. I/O failures propagate unchanged.
    fn load(&self, path: &Path) -> Result<(Automaton, Self::Report)> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        self.parse(&text)
    }
}

/// Raw guard fields of one learner transition line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardFields<'a> {
    pub symbol: &'a str,
    pub low: &'a str,
    pub high: &'a str,
}

/// Maps a learner transition's guard fields to raw `(low, high)` bounds.
pub trait GuardDecoder {
    fn decode(&self, fields: GuardFields<'_>, line_no: usize, line: &str) -> Result<(f64, f64)>;
}

/// Symbol form: the symbol indexes the configured alphabet.
#[derive(Debug, Clone, Copy)]
pub struct SymbolGuards<'c> {
    config: &'c ExperimentConfig,
}

impl<'c> SymbolGuards<'c> {
    pub fn new(config: &'c ExperimentConfig) -> Self {
        SymbolGuards { config }
    }
}

impl GuardDecoder for SymbolGuards<'_> {
    fn decode(&self, fields: GuardFields<'_>, line_no: usize, line: &str) -> Result<(f64, f64)> {
        // The bracketed time bounds are unused here but must still be integers.
        parse_encoded(fields.low, line_no, line)?;
        parse_encoded(fields.high, line_no, line)?;
        let bounds =
            self.config
                .symbol_bounds(fields.symbol)
                .ok_or_else(|| Error::UnknownCategory {
                    symbol: fields.symbol.to_string(),
                    line_no,
                })?;
        Ok((bounds.low_bound(), bounds.high_bound()))
    }
}

/// Time form: bounds are encoded as `trunc(value * 10^precision + offset)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGuards {
    offset: f64,
    scale: f64,
}

impl TimeGuards {
    pub fn new(config: &ExperimentConfig) -> Self {
        TimeGuards {
            offset: config.encoding_offset,
            scale: config.decode_scale(),
        }
    }

    /// `(bound - offset) * 10^-precision`.
    pub fn decode_bound(&self, bound: i64) -> f64 {
        (bound as f64 - self.offset) * self.scale
    }
}

impl GuardDecoder for TimeGuards {
    fn decode(&self, fields: GuardFields<'_>, line_no: usize, line: &str) -> Result<(f64, f64)> {
        let low = parse_encoded(fields.low, line_no, line)?;
        let high = parse_encoded(fields.high, line_no, line)?;
        Ok((self.decode_bound(low), self.decode_bound(high)))
    }
}

/// Decoder for a learner format.
pub fn guard_decoder<'c>(
    format: LearnerFormat,
    config: &'c ExperimentConfig,
) -> Box<dyn GuardDecoder + 'c> {
    match format {
        LearnerFormat::Symbol => Box::new(SymbolGuards::new(config)),
        LearnerFormat::Time => Box::new(TimeGuards::new(config)),
    }
}

fn parse_encoded(field: &str, line_no: usize, line: &str) -> Result<i64> {
    field
        .parse::<i64>()
        .map_err(|_| Error::parse(line_no, line, format!("encoded bound `{field}` is not an integer")))
}

/// How a signed id from a text file maps onto the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IdKind {
    State(StateId),
    Sink,
}

/// Parse a state id; the configured sink id is recognized, any other
/// negative or oversized id is malformed.
pub(crate) fn parse_id(field: &str, sink_id: i64, line_no: usize, line: &str) -> Result<IdKind> {
    let raw = field
        .parse::<i64>()
        .map_err(|_| Error::parse(line_no, line, format!("state id `{field}` is not an integer")))?;
    if raw == sink_id {
        return Ok(IdKind::Sink);
    }
    StateId::try_from(raw)
        .map(IdKind::State)
        .map_err(|_| Error::parse(line_no, line, format!("state id {raw} is out of range")))
}

/// Compile a static pattern once.
pub(crate) fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).expect("static pattern compiles"))
}
