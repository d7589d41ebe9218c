//! Persisted graph files.
//!
//! ```text
//! digraph a {
//! 0 [shape=circle, label="0\n1.5"];
//! 	0 -> 1 [label="]-Infinity, 0.0]"];
//! 	0 -> 0 [label="]0.0, Infinity["];
//! 1 [shape=circle, label="1\n-2.0"];
//! 	1 -> 1 [label="]-Infinity, Infinity["];
//! }
//! ```
//!
//! The `\n` inside a label is a literal backslash-n. Unbounded ends are the
//! tokens `-Infinity` and `Infinity`, and the closing bracket flips to `[`
//! when the high end is unbounded. Finite values use Rust's shortest
//! round-trip form, so parsing a serialized model gives back the same model.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::OnceLock;

use gta_common::{Error, Result};
use regex::Regex;
use serde::Serialize;
use tracing::{info, warn};

use super::{parse_id, pattern, IdKind, ModelReader};
use crate::automaton::{Automaton, Guard, StateId, Transition};
use crate::logging::{event_names, Stage};

const NEG_INF_TOKEN: &str = "-Infinity";
const POS_INF_TOKEN: &str = "Infinity";

static STATE_LINE: OnceLock<Regex> = OnceLock::new();
static TRANSITION_LINE: OnceLock<Regex> = OnceLock::new();

fn state_line() -> &'static Regex {
    pattern(
        &STATE_LINE,
        r#"^\s*(\S+)\s*\[shape=circle,\s*label="(\S+?)\\n(\S+)"\];\s*$"#,
    )
}

fn transition_line() -> &'static Regex {
    pattern(
        &TRANSITION_LINE,
        r#"^\s*(\S+)\s*->\s*(\S+)\s*\[label="\]([^\s,]+),\s*([^\s\[\]]+)([\]\[])"\];\s*$"#,
    )
}

/// What a graph parse found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DotReport {
    pub states: usize,
    pub transitions: usize,
    pub sink_transitions: usize,
    /// States whose guards do not partition the real line.
    pub non_partition_states: Vec<StateId>,
}

/// Reader and writer for graph files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotCodec {
    sink_id: i64,
}

impl DotCodec {
    pub fn new(sink_id: i64) -> Self {
        DotCodec { sink_id }
    }

    /// Render a model: each state followed by its transitions, states in
    /// insertion order.
    pub fn serialize(&self, model: &Automaton) -> String {
        let mut out = String::from("digraph a {");
        for state in model.states() {
            let _ = write!(
                out,
                "\n{id} [shape=circle, label=\"{id}\\n{p:?}\"];",
                id = state.id,
                p = state.predicted_value
            );
            for t in &state.transitions {
                let _ = write!(
                    out,
                    "\n\t{} -> {} [label=\"{}\"];",
                    t.source,
                    t.dest,
                    render_guard(&t.guard)
                );
            }
        }
        out.push_str("\n}");
        out
    }

    /// Serialize to a file.
    pub fn write(&self, model: &Automaton, path: &Path) -> Result<()> {
        std::fs::write(path, self.serialize(model)).map_err(|e| Error::io(path, e))?;
        info!(
            event = event_names::GRAPH_WRITTEN,
            stage = %Stage::Serialize,
            path = %path.display(),
            states = model.len(),
            "graph written"
        );
        Ok(())
    }

    fn state_id(&self, field: &str, line_no: usize, line: &str) -> Result<Option<StateId>> {
        Ok(match parse_id(field, self.sink_id, line_no, line)? {
            IdKind::State(id) => Some(id),
            IdKind::Sink => None,
        })
    }
}

impl Default for DotCodec {
    fn default() -> Self {
        DotCodec::new(-1)
    }
}

fn render_guard(guard: &Guard) -> String {
    let low = if guard.is_low_unbounded() {
        NEG_INF_TOKEN.to_string()
    } else {
        format!("{:?}", guard.low())
    };
    let high = if guard.is_high_unbounded() {
        format!("{POS_INF_TOKEN}[")
    } else {
        format!("{:?}]", guard.high())
    };
    format!("]{low}, {high}")
}

fn parse_bound(field: &str, line_no: usize, line: &str) -> Result<f64> {
    match field {
        NEG_INF_TOKEN => Ok(f64::NEG_INFINITY),
        POS_INF_TOKEN => Ok(f64::INFINITY),
        _ => field
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| Error::parse(line_no, line, format!("bound `{field}` is not a number"))),
    }
}

impl ModelReader for DotCodec {
    type Report = DotReport;

    fn parse(&self, text: &str) -> Result<(Automaton, DotReport)> {
        let mut model = Automaton::new();
        let mut report = DotReport::default();
        // Destinations without their own declaration are added at the end,
        // in first-reference order.
        let mut referenced: Vec<StateId> = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;

            if line.contains("->") {
                let caps = transition_line().captures(line).ok_or_else(|| {
                    Error::parse(line_no, line, "malformed transition declaration")
                })?;
                let field = |i| caps.get(i).map_or("", |m| m.as_str());

                let source = self.state_id(field(1), line_no, line)?;
                let dest = self.state_id(field(2), line_no, line)?;
                let (Some(source), Some(dest)) = (source, dest) else {
                    report.sink_transitions += 1;
                    continue;
                };

                let low = parse_bound(field(3), line_no, line)?;
                let high = parse_bound(field(4), line_no, line)?;
                let open_high = field(5) == "[";
                if open_high != (high == f64::INFINITY) {
                    return Err(Error::parse(line_no, line, "bracket does not match bound"));
                }
                let guard = Guard::new(low, high)
                    .ok_or_else(|| Error::parse(line_no, line, "guard low bound is not below high bound"))?;

                model.ensure_state(source).transitions.push(Transition {
                    source,
                    dest,
                    guard,
                });
                if !referenced.contains(&dest) {
                    referenced.push(dest);
                }
            } else if line.contains("shape=") {
                let caps = state_line()
                    .captures(line)
                    .ok_or_else(|| Error::parse(line_no, line, "malformed state declaration"))?;
                let field = |i| caps.get(i).map_or("", |m| m.as_str());

                let Some(id) = self.state_id(field(1), line_no, line)? else {
                    continue;
                };
                if field(2) != field(1) {
                    return Err(Error::parse(line_no, line, "label id does not match state id"));
                }
                let value = field(3)
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| {
                        Error::parse(line_no, line, format!("predicted value `{}` is not a number", field(3)))
                    })?;
                model.ensure_state(id).predicted_value = value;
            }
        }

        for dest in referenced {
            model.ensure_state(dest);
        }

        report.states = model.len();
        report.transitions = model.transition_count();
        report.non_partition_states = model
            .states()
            .filter(|s| !s.is_sink() && !s.is_partition())
            .map(|s| s.id)
            .collect();
        if !report.non_partition_states.is_empty() {
            warn!(
                event = event_names::NON_PARTITION_STATES,
                stage = %Stage::Parse,
                states = ?report.non_partition_states,
                "graph has states whose guards do not partition the real line"
            );
        }
        info!(
            event = event_names::GRAPH_PARSED,
            stage = %Stage::Parse,
            states = report.states,
            transitions = report.transitions,
            "graph parsed"
        );

        Ok((model, report))
    }
}
