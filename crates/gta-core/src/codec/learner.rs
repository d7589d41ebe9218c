//! Reader for the external learner's model output.
//!
//! Two line kinds matter:
//!
//! ```text
//! 3 prob: symbol= 12 40          state declaration
//! 3 1 [1012, 1040]->5            transition: source, symbol, [low, high], dest
//! ```
//!
//! Everything else (diagnostics, blank lines) is ignored. The configured sink
//! id is recognized and elided together with every transition touching it.
//! After the scan each state's guards are normalized into a partition.

use std::sync::OnceLock;

use gta_common::{Error, LearnerFormat, Result, Tokenization};
use gta_config::ExperimentConfig;
use regex::{Captures, Regex};
use serde::Serialize;
use tracing::{debug, info};

use super::{guard_decoder, parse_id, pattern, GuardDecoder, GuardFields, IdKind, ModelReader};
use crate::automaton::{Automaton, RawModel, RawTransition};
use crate::logging::{event_names, Stage};

static LEGACY_STATE: OnceLock<Regex> = OnceLock::new();
static LEGACY_TRANSITION: OnceLock<Regex> = OnceLock::new();
static LENIENT_STATE: OnceLock<Regex> = OnceLock::new();
static LENIENT_TRANSITION: OnceLock<Regex> = OnceLock::new();

fn legacy_state() -> &'static Regex {
    pattern(&LEGACY_STATE, r"^(-?\d+) prob: symbol=(?: \d+)+")
}

fn legacy_transition() -> &'static Regex {
    pattern(
        &LEGACY_TRANSITION,
        r"^(-?\d+) (\d+) \[(\d+), (\d+)\]->(-?\d+)$",
    )
}

fn lenient_state() -> &'static Regex {
    pattern(
        &LENIENT_STATE,
        r"^\s*([^\s\[\]]+)\s+prob:\s*symbol\s*=(?:\s*\d+)*\s*$",
    )
}

fn lenient_transition() -> &'static Regex {
    pattern(
        &LENIENT_TRANSITION,
        r"^\s*([^\s\[\]]+)\s+([^\s\[\]]+)\s*\[\s*([^\s,\[\]]+)\s*,\s*([^\s,\[\]]+)\s*\]\s*->\s*([^\s\[\]]+)\s*$",
    )
}

/// What the scan of one learner file found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LearnerReport {
    pub lines: usize,
    pub states: usize,
    pub transitions: usize,
    /// Transitions into or out of the sink, elided.
    pub sink_transitions: usize,
    /// Non-blank lines that were neither declaration kind.
    pub ignored_lines: usize,
    /// Transitions dropped by normalization because another guard shadowed them.
    pub guards_dropped: usize,
}

enum LineKind<'t> {
    State { id: &'t str },
    Transition { source: &'t str, dest: &'t str, guard: GuardFields<'t> },
    Other,
}

fn transition_kind<'t>(caps: &Captures<'t>) -> LineKind<'t> {
    let field = |i| caps.get(i).map_or("", |m| m.as_str());
    LineKind::Transition {
        source: field(1),
        dest: field(5),
        guard: GuardFields {
            symbol: field(2),
            low: field(3),
            high: field(4),
        },
    }
}

/// Parser for learner output in one format.
pub struct LearnerParser<'c> {
    format: LearnerFormat,
    tokenization: Tokenization,
    sink_id: i64,
    decoder: Box<dyn GuardDecoder + 'c>,
}

impl<'c> LearnerParser<'c> {
    /// Parser using the tokenization and sink id from `config`.
    pub fn new(format: LearnerFormat, config: &'c ExperimentConfig) -> Self {
        LearnerParser {
            format,
            tokenization: config.tokenization,
            sink_id: config.sink_id,
            decoder: guard_decoder(format, config),
        }
    }

    pub fn with_tokenization(mut self, tokenization: Tokenization) -> Self {
        self.tokenization = tokenization;
        self
    }

    pub fn format(&self) -> LearnerFormat {
        self.format
    }

    fn classify<'t>(&self, line: &'t str, line_no: usize) -> Result<LineKind<'t>> {
        match self.tokenization {
            Tokenization::Legacy => {
                if let Some(caps) = legacy_state().captures(line) {
                    return Ok(LineKind::State {
                        id: caps.get(1).map_or("", |m| m.as_str()),
                    });
                }
                Ok(legacy_transition()
                    .captures(line)
                    .map_or(LineKind::Other, |caps| transition_kind(&caps)))
            }
            Tokenization::Lenient => {
                if line.contains("->") {
                    let caps = lenient_transition().captures(line).ok_or_else(|| {
                        Error::parse(line_no, line, "malformed transition declaration")
                    })?;
                    return Ok(transition_kind(&caps));
                }
                if line.contains("prob:") {
                    let caps = lenient_state().captures(line).ok_or_else(|| {
                        Error::parse(line_no, line, "malformed state declaration")
                    })?;
                    return Ok(LineKind::State {
                        id: caps.get(1).map_or("", |m| m.as_str()),
                    });
                }
                Ok(LineKind::Other)
            }
        }
    }
}

impl ModelReader for LearnerParser<'_> {
    type Report = LearnerReport;

    fn parse(&self, text: &str) -> Result<(Automaton, LearnerReport)> {
        let mut raw = RawModel::new();
        let mut report = LearnerReport::default();

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            report.lines += 1;

            match self.classify(line, line_no)? {
                LineKind::State { id } => {
                    if let IdKind::State(id) = parse_id(id, self.sink_id, line_no, line)? {
                        raw.declare_state(id);
                    }
                }
                LineKind::Transition {
                    source,
                    dest,
                    guard,
                } => {
                    let source = parse_id(source, self.sink_id, line_no, line)?;
                    let dest = parse_id(dest, self.sink_id, line_no, line)?;
                    let (IdKind::State(source), IdKind::State(dest)) = (source, dest) else {
                        report.sink_transitions += 1;
                        continue;
                    };
                    let (low, high) = self.decoder.decode(guard, line_no, line)?;
                    raw.add_transition(source, RawTransition { dest, low, high });
                }
                LineKind::Other => {
                    if !line.trim().is_empty() {
                        report.ignored_lines += 1;
                        debug!(
                            event = event_names::LINE_IGNORED,
                            stage = %Stage::Parse,
                            line_no,
                            "ignoring learner line"
                        );
                    }
                }
            }
        }

        let (model, normalized) = raw.normalize();
        report.states = normalized.states;
        report.transitions = normalized.transitions;
        report.guards_dropped = normalized.dropped;

        info!(
            event = event_names::LEARNER_PARSED,
            stage = %Stage::Parse,
            format = %self.format,
            tokenization = %self.tokenization,
            states = report.states,
            transitions = report.transitions,
            sink_transitions = report.sink_transitions,
            ignored = report.ignored_lines,
            "learner output parsed"
        );

        Ok((model, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::Guard;
    use gta_config::SymbolBounds;

    const SYMBOL_OUTPUT: &str = "\
-1 prob: symbol= 0 0
0 prob: symbol= 40 12
1 prob: symbol= 3 9
0 0 [1000, 1500]->0
0 1 [1000, 1500]->1
1 0 [1000, 1500]->-1
1 1 [1000, 1500]->1
-1 0 [1000, 1500]->0
";

    fn symbol_config() -> ExperimentConfig {
        ExperimentConfig::default()
    }

    fn parse(format: LearnerFormat, config: &ExperimentConfig, text: &str) -> Result<(Automaton, LearnerReport)> {
        LearnerParser::new(format, config).parse(text)
    }

    #[test]
    fn test_symbol_form() {
        let config = symbol_config();
        let (model, report) = parse(LearnerFormat::Symbol, &config, SYMBOL_OUTPUT).unwrap();

        assert_eq!(model.state_ids().collect::<Vec<_>>(), vec![0, 1]);
        let s0 = model.state(0).unwrap();
        assert_eq!(s0.transitions.len(), 2);
        assert_eq!(s0.transitions[0].guard, Guard::new(f64::NEG_INFINITY, 0.0).unwrap());
        assert_eq!(s0.transitions[0].dest, 0);
        assert_eq!(s0.transitions[1].guard, Guard::new(0.0, f64::INFINITY).unwrap());
        assert_eq!(s0.transitions[1].dest, 1);

        // The transition into the sink is gone, so state 1's loop covers everything.
        let s1 = model.state(1).unwrap();
        assert_eq!(s1.transitions.len(), 1);
        assert_eq!(s1.transitions[0].guard, Guard::FULL);

        assert_eq!(report.sink_transitions, 2);
        assert_eq!(report.states, 2);
        assert_eq!(report.transitions, 3);
        assert!(model.states().all(|s| s.predicted_value == 0.0));
    }

    #[test]
    fn test_sink_never_materialized() {
        let config = symbol_config();
        let (model, _) = parse(LearnerFormat::Symbol, &config, SYMBOL_OUTPUT).unwrap();
        for state in model.states() {
            for t in &state.transitions {
                assert!(model.contains(t.dest));
            }
        }
        assert_eq!(model.len(), 2);
    }

    #[test]
    fn test_time_form() {
        let config = ExperimentConfig::default();
        let text = "\
0 prob: symbol= 5
0 0 [1000, 1500]->1
0 0 [1501, 3000]->2
1 0 [0, 9999]->1
";
        let (model, _) = parse(LearnerFormat::Time, &config, text).unwrap();
        let s0 = model.state(0).unwrap();
        assert_eq!(s0.transitions.len(), 2);
        assert_eq!(s0.transitions[0].guard.low(), f64::NEG_INFINITY);
        assert!((s0.transitions[0].guard.high() - 0.5).abs() < 1e-12);
        assert_eq!(s0.transitions[1].guard.low(), s0.transitions[0].guard.high());
        assert!(s0.transitions[1].guard.is_high_unbounded());
        // Destination 2 never had a state line.
        assert!(model.state(2).unwrap().is_sink());
    }

    #[test]
    fn test_start_state_need_not_come_first() {
        let config = symbol_config();
        let text = "4 prob: symbol= 1\n0 prob: symbol= 1\n0 1 [1, 2]->4\n";
        let (model, _) = parse(LearnerFormat::Symbol, &config, text).unwrap();
        assert_eq!(model.state_ids().collect::<Vec<_>>(), vec![4, 0]);
        assert_eq!(model.step(0, 10.0), 4);
    }

    #[test]
    fn test_empty_input_gives_empty_model() {
        let config = symbol_config();
        let (model, report) = parse(LearnerFormat::Symbol, &config, "").unwrap();
        assert!(model.is_empty());
        assert_eq!(report.lines, 0);
    }

    #[test]
    fn test_diagnostics_ignored() {
        let config = symbol_config();
        let text = "RTI+ finished in 3s\n\n0 prob: symbol= 1\nmerges: 12\n";
        let (model, report) = parse(LearnerFormat::Symbol, &config, text).unwrap();
        assert_eq!(model.len(), 1);
        assert_eq!(report.ignored_lines, 2);
    }

    #[test]
    fn test_lenient_tolerates_whitespace() {
        let config = symbol_config();
        let text = "  0   prob:  symbol= 1  2\n\t0  1 [ 1000 ,1500 ] -> 0 \r\n";
        let (model, _) = parse(LearnerFormat::Symbol, &config, text).unwrap();
        assert_eq!(model.state(0).unwrap().transitions.len(), 1);
    }

    #[test]
    fn test_lenient_rejects_malformed_transition() {
        let config = symbol_config();
        let text = "0 prob: symbol= 1\n0 1 [1000, 1500->1\n";
        let err = parse(LearnerFormat::Symbol, &config, text).unwrap_err();
        match err {
            Error::Parse { line_no, line, .. } => {
                assert_eq!(line_no, 2);
                assert_eq!(line, "0 1 [1000, 1500->1");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_lenient_rejects_non_numeric_fields() {
        let config = symbol_config();
        assert!(matches!(
            parse(LearnerFormat::Symbol, &config, "x prob: symbol= 1\n"),
            Err(Error::Parse { line_no: 1, .. })
        ));
        assert!(matches!(
            parse(LearnerFormat::Time, &config, "0 1 [10a, 20]->1\n"),
            Err(Error::Parse { line_no: 1, .. })
        ));
        assert!(matches!(
            parse(LearnerFormat::Symbol, &config, "0 1 [1, 2]->one\n"),
            Err(Error::Parse { line_no: 1, .. })
        ));
    }

    #[test]
    fn test_legacy_ignores_what_it_cannot_read() {
        let config = symbol_config();
        let text = "0 prob: symbol= 1\n0  1 [1000, 1500]->0\n0 1 [1000, 1500->1\n";
        let (model, report) = LearnerParser::new(LearnerFormat::Symbol, &config)
            .with_tokenization(Tokenization::Legacy)
            .parse(text)
            .unwrap();
        assert!(model.state(0).unwrap().is_sink());
        assert_eq!(report.ignored_lines, 2);
    }

    #[test]
    fn test_legacy_reads_exact_layout() {
        let config = symbol_config();
        let (model, _) = LearnerParser::new(LearnerFormat::Symbol, &config)
            .with_tokenization(Tokenization::Legacy)
            .parse(SYMBOL_OUTPUT)
            .unwrap();
        let (lenient, _) = parse(LearnerFormat::Symbol, &config, SYMBOL_OUTPUT).unwrap();
        assert_eq!(model, lenient);
    }

    #[test]
    fn test_unknown_symbol_is_config_error() {
        let config = symbol_config();
        let err = parse(LearnerFormat::Symbol, &config, "0 5 [1, 2]->0\n").unwrap_err();
        assert!(matches!(err, Error::UnknownCategory { ref symbol, line_no: 1 } if symbol == "5"));
    }

    #[test]
    fn test_foreign_negative_id_rejected() {
        let config = symbol_config();
        let err = parse(LearnerFormat::Symbol, &config, "0 1 [1, 2]->-2\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line_no: 1, .. }));
    }

    #[test]
    fn test_custom_sink_id() {
        let mut config = symbol_config();
        config.sink_id = -9;
        config.alphabet = vec![
            SymbolBounds::new("0", None, Some(1.0)),
            SymbolBounds::new("1", Some(1.0), None),
        ];
        let text = "-9 prob: symbol= 1\n0 1 [1, 2]->-9\n0 0 [1, 2]->0\n";
        let (model, report) = parse(LearnerFormat::Symbol, &config, text).unwrap();
        assert_eq!(model.len(), 1);
        assert_eq!(report.sink_transitions, 1);
        assert_eq!(model.state(0).unwrap().transitions[0].guard, Guard::FULL);
    }

    #[test]
    fn test_shadowed_guard_counted() {
        let config = ExperimentConfig::default();
        // Second guard ends inside the first.
        let text = "0 0 [1000, 3000]->0\n0 0 [1500, 2000]->1\n0 0 [2500, 4000]->2\n";
        let (model, report) = parse(LearnerFormat::Time, &config, text).unwrap();
        assert_eq!(report.guards_dropped, 1);
        assert!(model.state(0).unwrap().is_partition());
    }
}
