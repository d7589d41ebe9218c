//! gta - guarded timed automata toolkit
//!
//! The main entry point, handling:
//! - Importing learner output into graph files, with re-estimation
//! - Streaming predictions and the persistence baseline
//! - Training-file export for the external learners
//! - Scoring predictions against observations
//! - Configuration inspection

use std::io::{BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use gta_common::{
    error::format_error_human, Error, LearnerFormat, OutputFormat, RestimateRule, StructuredError,
    Tokenization, WindowOrigin, SCHEMA_VERSION,
};
use gta_config::{
    list_presets, load_config, validate_experiment, ConfigSnapshot, ExperimentConfig,
    LoadedConfig, PresetName,
};
use gta_core::codec::{DotCodec, ModelReader};
use gta_core::exit_codes::ExitCode;
use gta_core::flat::{load_flat, write_flat};
use gta_core::forecast::Persistence;
use gta_core::logging::{
    event_names, generate_run_id, init_logging, LogConfig, LogContext, LogEvent, LogLevel, Stage,
};
use gta_core::pipeline::{self, baseline_values, import_model, score, ImportOutcome};
use gta_core::training::{self, TrainingFormat};

/// Guarded timed automata: import learned models, predict, and score
#[derive(Parser)]
#[command(name = "gta")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Path to an experiment.json file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use a built-in preset (ignored when --config is given)
    #[arg(long, global = true, value_parser = parse_preset)]
    preset: Option<PresetName>,

    /// Output format for reports
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored error output
    #[arg(long, global = true)]
    no_color: bool,

    /// Override the sliding-window size
    #[arg(long, global = true)]
    window_size: Option<usize>,

    /// Override the time-encoding precision
    #[arg(long, global = true)]
    precision: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse learner output, re-estimate, and write a graph file
    Import(ImportArgs),

    /// Stream one-step-ahead predictions from a graph file
    Predict(PredictArgs),

    /// Persistence baseline predictions
    Baseline(BaselineArgs),

    /// Write a learner training file from a flat sequence
    ExportTrain(ExportTrainArgs),

    /// Compare predictions with observations
    Score(ScoreArgs),

    /// Configuration management
    Config(ConfigArgs),

    /// Print version information
    Version,
}

// ============================================================================
// Command argument structs
// ============================================================================

#[derive(Args, Debug)]
struct ImportArgs {
    /// Learner output file
    #[arg(long)]
    learner: PathBuf,

    /// Learner output format
    #[arg(long, value_enum, default_value_t = LearnerFormat::Symbol)]
    kind: LearnerFormat,

    /// Flat sequence used to re-estimate state predictions
    #[arg(long)]
    calibration: Option<PathBuf>,

    /// Graph file to write (stdout when omitted)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Override the configured learner tokenization
    #[arg(long, value_enum)]
    tokenization: Option<Tokenization>,

    /// Override the configured re-estimation rule
    #[arg(long, value_enum)]
    rule: Option<RestimateRule>,
}

#[derive(Args, Debug)]
struct PredictArgs {
    /// Graph file
    #[arg(long)]
    model: PathBuf,

    /// Flat sequence to predict
    #[arg(long)]
    input: PathBuf,

    /// Prediction file to write (stdout when omitted)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Override the configured window origin
    #[arg(long, value_enum)]
    origin: Option<WindowOrigin>,
}

#[derive(Args, Debug)]
struct BaselineArgs {
    /// Flat sequence to predict
    #[arg(long)]
    input: PathBuf,

    /// Prediction file to write (stdout when omitted)
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ExportTrainArgs {
    /// Flat sequence to slice into windows
    #[arg(long)]
    input: PathBuf,

    /// Training file layout
    #[arg(long, value_enum)]
    kind: TrainingFormat,

    /// Training file to write (stdout when omitted)
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Flat prediction sequence
    #[arg(long)]
    predictions: PathBuf,

    /// Flat observation sequence
    #[arg(long)]
    observations: PathBuf,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Validate a configuration file (or the resolved one)
    Validate {
        /// Path to an experiment.json file
        path: Option<PathBuf>,
    },
    /// List built-in presets
    Presets,
}

fn parse_preset(s: &str) -> Result<PresetName, String> {
    PresetName::parse(s).ok_or_else(|| {
        let names: Vec<&str> = PresetName::ALL.iter().map(|p| p.as_str()).collect();
        format!("unknown preset '{}' (expected one of: {})", s, names.join(", "))
    })
}

// ============================================================================
// Main entry point
// ============================================================================

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            let code = if e.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            std::process::exit(code.as_i32());
        }
    };

    let log_config = LogConfig::from_env(
        LogLevel::from_flags(cli.global.verbose, cli.global.quiet),
        None,
    );
    init_logging(&log_config);

    let run_id = generate_run_id();
    tracing::debug!(
        event = event_names::RUN_STARTED,
        stage = %Stage::Init,
        run_id = %run_id,
        "run started"
    );

    let global = &cli.global;
    let result = match &cli.command {
        Commands::Import(args) => run_import(global, &run_id, args),
        Commands::Predict(args) => run_predict(global, &run_id, args),
        Commands::Baseline(args) => run_baseline(global, &run_id, args),
        Commands::ExportTrain(args) => run_export_train(global, &run_id, args),
        Commands::Score(args) => run_score(global, &run_id, args),
        Commands::Config(args) => run_config(global, &run_id, args),
        Commands::Version => {
            print_version(global);
            Ok(())
        }
    };

    let exit_code = match result {
        Ok(()) => ExitCode::Clean,
        Err(err) => output_error(global, &err),
    };
    tracing::debug!(
        event = event_names::RUN_FINISHED,
        stage = %Stage::Init,
        run_id = %run_id,
        exit_code = exit_code.as_i32(),
        "run finished"
    );

    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Resolved configuration plus the effective values after CLI overrides.
struct Experiment {
    loaded: LoadedConfig,
    config: ExperimentConfig,
}

impl Experiment {
    fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot::new(&self.loaded, &self.config)
    }
}

fn load_experiment(global: &GlobalOpts) -> Result<Experiment, Error> {
    let loaded = load_config(global.config.as_deref(), global.preset).map_err(|e| {
        tracing::error!(event = event_names::CONFIG_ERROR, stage = %Stage::Init, "{}", e);
        Error::from(e)
    })?;

    let mut config = loaded.config.clone();
    if let Some(window_size) = global.window_size {
        config.window_size = window_size;
    }
    if let Some(precision) = global.precision {
        config.precision = precision;
    }
    validate_experiment(&config)?;

    if loaded.paths.experiment.is_none() {
        tracing::debug!(
            event = event_names::CONFIG_DEFAULT_USED,
            stage = %Stage::Init,
            source = %loaded.paths.source,
            "no config file, using built-in values"
        );
    } else {
        tracing::debug!(
            event = event_names::CONFIG_LOADED,
            stage = %Stage::Init,
            source = %loaded.paths.source,
            "config loaded"
        );
    }

    Ok(Experiment { loaded, config })
}

fn read_text(path: &Path) -> Result<String, Error> {
    std::fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Write a payload to `out`, or to stdout when no path is given.
fn emit(out: Option<&Path>, text: &str) -> Result<(), Error> {
    match out {
        Some(path) => std::fs::write(path, text).map_err(|e| Error::io(path, e)),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|e| Error::io("<stdout>", e))
        }
    }
}

/// Stream values to stdout one line at a time.
fn emit_stream(values: impl Iterator<Item = f64>) -> Result<usize, Error> {
    let mut out = BufWriter::new(std::io::stdout().lock());
    let mut count = 0;
    for v in values {
        writeln!(out, "{v:?}").map_err(|e| Error::io("<stdout>", e))?;
        count += 1;
    }
    out.flush().map_err(|e| Error::io("<stdout>", e))?;
    Ok(count)
}

fn report_header(run_id: &str, command: &str) -> serde_json::Value {
    serde_json::json!({
        "schema_version": SCHEMA_VERSION,
        "run_id": run_id,
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "command": command,
    })
}

fn merge(mut base: serde_json::Value, extra: serde_json::Value) -> serde_json::Value {
    if let (Some(base), serde_json::Value::Object(extra)) = (base.as_object_mut(), extra) {
        base.extend(extra);
    }
    base
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("failed to render report: {}", e),
    }
}

fn opt_metric(v: Option<f64>) -> String {
    v.map(|v| format!("{:.6}", v)).unwrap_or_else(|| "n/a".to_string())
}

/// Output an error in the appropriate format and pick the exit code.
fn output_error(global: &GlobalOpts, err: &Error) -> ExitCode {
    let exit_code = ExitCode::from(err);
    match global.format {
        OutputFormat::Json => {
            let structured = StructuredError::from(err);
            let response = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "status": "error",
                "exit_code": exit_code.as_i32(),
                "exit_code_name": exit_code.code_name(),
                "error": structured,
            });
            match serde_json::to_string_pretty(&response) {
                Ok(text) => eprintln!("{}", text),
                Err(_) => eprintln!("{}", structured.to_json()),
            }
        }
        OutputFormat::Summary => {
            eprintln!("[{}] error: {}", exit_code.code_name(), err);
        }
        OutputFormat::Md => {
            let use_color = !global.no_color && std::io::stderr().is_terminal();
            eprintln!("{}", format_error_human(err, use_color));
        }
    }
    exit_code
}

// ============================================================================
// Command implementations
// ============================================================================

fn run_import(global: &GlobalOpts, run_id: &str, args: &ImportArgs) -> Result<(), Error> {
    let mut experiment = load_experiment(global)?;
    if let Some(tokenization) = args.tokenization {
        experiment.config.tokenization = tokenization;
    }
    if let Some(rule) = args.rule {
        experiment.config.restimate_rule = rule;
    }
    let config = &experiment.config;

    let learner_text = read_text(&args.learner)?;
    let calibration = args.calibration.as_deref().map(load_flat).transpose()?;
    let outcome = import_model(&learner_text, args.kind, calibration.as_deref(), config)?;

    let Some(out) = args.out.as_deref() else {
        return emit(None, &outcome.graph);
    };
    DotCodec::new(config.sink_id).write(&outcome.model, out)?;

    let snapshot = experiment.snapshot();
    match global.format {
        OutputFormat::Json => {
            let report = merge(
                report_header(run_id, "import"),
                serde_json::json!({
                    "learner": args.learner.display().to_string(),
                    "kind": args.kind,
                    "output": out.display().to_string(),
                    "model": {
                        "states": outcome.model.len(),
                        "transitions": outcome.model.transition_count(),
                    },
                    "parse": outcome.learner,
                    "restimate": outcome.restimate,
                    "events": import_events(run_id, &outcome),
                    "config": snapshot,
                }),
            );
            print_json(&report);
        }
        OutputFormat::Summary => {
            println!(
                "[{}] import: {} states, {} transitions -> {} (config {})",
                run_id,
                outcome.model.len(),
                outcome.model.transition_count(),
                out.display(),
                snapshot.short_id()
            );
        }
        OutputFormat::Md => {
            println!("# gta import");
            println!();
            println!("Learner output: {} ({})", args.learner.display(), args.kind);
            println!("Graph file: {}", out.display());
            println!();
            println!("| | |");
            println!("|---|---|");
            println!("| States | {} |", outcome.model.len());
            println!("| Transitions | {} |", outcome.model.transition_count());
            println!("| Sink transitions elided | {} |", outcome.learner.sink_transitions);
            println!("| Shadowed guards dropped | {} |", outcome.learner.guards_dropped);
            println!("| Ignored lines | {} |", outcome.learner.ignored_lines);
            if let Some(summary) = &outcome.restimate {
                println!("| Calibration windows | {} |", summary.windows);
                println!("| Unvisited states | {} |", summary.unvisited.len());
            }
            println!();
            println!(
                "Config: {} (window {}, precision {}, hash {})",
                snapshot.source,
                snapshot.summary.window_size,
                snapshot.summary.precision,
                snapshot.short_id()
            );
        }
    }
    Ok(())
}

/// Degradations worth surfacing in the import report itself.
fn import_events(run_id: &str, outcome: &ImportOutcome) -> Vec<LogEvent> {
    let ctx = LogContext::new(run_id);
    let mut events = Vec::new();
    if outcome.learner.guards_dropped > 0 {
        events.push(
            ctx.warn(
                event_names::GUARD_DROPPED,
                Stage::Normalize,
                "transitions shadowed by earlier guards were dropped",
            )
            .with_field("count", outcome.learner.guards_dropped),
        );
    }
    if let Some(summary) = &outcome.restimate {
        if summary.windows == 0 {
            events.push(
                ctx.warn(
                    event_names::SEQUENCE_TOO_SHORT,
                    Stage::Window,
                    "calibration sequence is shorter than the window",
                )
                .with_field("window_size", summary.window_size),
            );
        }
        if !summary.unvisited.is_empty() {
            events.push(
                ctx.warn(
                    event_names::STATES_UNVISITED,
                    Stage::Restimate,
                    "states never visited during re-estimation keep 0.0",
                )
                .with_field("states", &summary.unvisited),
            );
        }
    }
    events
}

fn run_predict(global: &GlobalOpts, run_id: &str, args: &PredictArgs) -> Result<(), Error> {
    let mut experiment = load_experiment(global)?;
    if let Some(origin) = args.origin {
        experiment.config.window_origin = origin;
    }
    let config = &experiment.config;

    let (model, _) = DotCodec::new(config.sink_id).load(&args.model)?;
    let values = load_flat(&args.input)?;

    let Some(out) = args.out.as_deref() else {
        let window = pipeline::configured_window(config)?;
        let predictor = gta_core::automaton::Predictor::new(&model, window, config.window_origin);
        let count = emit_stream(predictor.stream(values.iter().copied()))?;
        tracing::info!(
            event = event_names::PREDICT_FINISHED,
            stage = %Stage::Predict,
            inputs = values.len(),
            predictions = count,
            "prediction finished"
        );
        return Ok(());
    };

    let predictions = pipeline::predict_values(&model, &values, config)?;
    write_flat(out, &predictions)?;
    output_sequence_report(global, run_id, "predict", &values, &predictions, out);
    Ok(())
}

fn run_baseline(global: &GlobalOpts, run_id: &str, args: &BaselineArgs) -> Result<(), Error> {
    let values = load_flat(&args.input)?;
    let Some(out) = args.out.as_deref() else {
        let count = emit_stream(Persistence::stream(values.iter().copied()))?;
        tracing::info!(
            event = event_names::BASELINE_FINISHED,
            stage = %Stage::Baseline,
            predictions = count,
            "baseline finished"
        );
        return Ok(());
    };
    let predictions = baseline_values(&values);
    write_flat(out, &predictions)?;
    output_sequence_report(global, run_id, "baseline", &values, &predictions, out);
    Ok(())
}

fn output_sequence_report(
    global: &GlobalOpts,
    run_id: &str,
    command: &str,
    inputs: &[f64],
    predictions: &[f64],
    out: &Path,
) {
    match global.format {
        OutputFormat::Json => {
            let report = merge(
                report_header(run_id, command),
                serde_json::json!({
                    "inputs": inputs.len(),
                    "predictions": predictions.len(),
                    "output": out.display().to_string(),
                }),
            );
            print_json(&report);
        }
        OutputFormat::Summary => {
            println!(
                "[{}] {}: {} predictions -> {}",
                run_id,
                command,
                predictions.len(),
                out.display()
            );
        }
        OutputFormat::Md => {
            println!("# gta {}", command);
            println!();
            println!("Inputs: {}", inputs.len());
            println!("Predictions: {}", predictions.len());
            println!("Output: {}", out.display());
        }
    }
}

fn run_export_train(global: &GlobalOpts, run_id: &str, args: &ExportTrainArgs) -> Result<(), Error> {
    let experiment = load_experiment(global)?;
    let values = load_flat(&args.input)?;
    let file = training::export(args.kind, &values, &experiment.config)?;

    match args.out.as_deref() {
        None => emit(None, &file.text),
        Some(out) => {
            emit(Some(out), &file.text)?;
            match global.format {
                OutputFormat::Json => print_json(&merge(
                    report_header(run_id, "export-train"),
                    serde_json::json!({
                        "kind": file.format,
                        "windows": file.windows,
                        "window_size": experiment.config.window_size,
                        "output": out.display().to_string(),
                    }),
                )),
                OutputFormat::Summary => println!(
                    "[{}] export-train: {} {} windows -> {}",
                    run_id,
                    file.windows,
                    file.format,
                    out.display()
                ),
                OutputFormat::Md => {
                    println!("# gta export-train");
                    println!();
                    println!("Kind: {}", file.format);
                    println!("Windows: {}", file.windows);
                    println!("Output: {}", out.display());
                }
            }
            Ok(())
        }
    }
}

fn run_score(global: &GlobalOpts, run_id: &str, args: &ScoreArgs) -> Result<(), Error> {
    let predictions = load_flat(&args.predictions)?;
    let observations = load_flat(&args.observations)?;
    let report = score(&predictions, &observations)?;

    match global.format {
        OutputFormat::Json => print_json(&merge(
            report_header(run_id, "score"),
            serde_json::json!({
                "predictions": args.predictions.display().to_string(),
                "observations": args.observations.display().to_string(),
                "count": report.count,
                "metrics": report.metrics,
            }),
        )),
        OutputFormat::Summary => println!(
            "[{}] score: n={} mae={} mape={} rmse={}",
            run_id,
            report.count,
            opt_metric(report.metrics.map(|m| m.mae)),
            opt_metric(report.metrics.map(|m| m.mape)),
            opt_metric(report.metrics.map(|m| m.rmse)),
        ),
        OutputFormat::Md => {
            println!("# gta score");
            println!();
            println!("| Metric | Value |");
            println!("|---|---|");
            println!("| N | {} |", report.count);
            println!("| MAE | {} |", opt_metric(report.metrics.map(|m| m.mae)));
            println!("| MAPE | {} |", opt_metric(report.metrics.map(|m| m.mape)));
            println!("| RMSE | {} |", opt_metric(report.metrics.map(|m| m.rmse)));
        }
    }
    Ok(())
}

fn run_config(global: &GlobalOpts, run_id: &str, args: &ConfigArgs) -> Result<(), Error> {
    match &args.command {
        ConfigCommands::Show => run_config_show(global, run_id),
        ConfigCommands::Validate { path } => run_config_validate(global, run_id, path.as_deref()),
        ConfigCommands::Presets => {
            run_config_presets(global, run_id);
            Ok(())
        }
    }
}

/// Display the effective configuration (including defaults if no file is present).
fn run_config_show(global: &GlobalOpts, run_id: &str) -> Result<(), Error> {
    let experiment = load_experiment(global)?;
    let snapshot = experiment.snapshot();
    let config = &experiment.config;

    match global.format {
        OutputFormat::Json => print_json(&merge(
            report_header(run_id, "config show"),
            serde_json::json!({
                "source": {
                    "kind": snapshot.source,
                    "path": snapshot.path,
                    "hash": snapshot.content_hash,
                    "using_defaults": snapshot.path.is_none(),
                },
                "config": config,
            }),
        )),
        OutputFormat::Summary => println!(
            "[{}] config: source={} window={} precision={} alphabet={}",
            run_id,
            snapshot.source,
            config.window_size,
            config.precision,
            config.alphabet.len()
        ),
        OutputFormat::Md => {
            println!("# gta config show");
            println!();
            match &snapshot.path {
                Some(path) => println!("Source: {} ({})", path, snapshot.source),
                None => println!("Source: **{}**", snapshot.source),
            }
            println!("Hash: {}", snapshot.short_id());
            println!();
            println!("| Setting | Value |");
            println!("|---|---|");
            println!("| window_size | {} |", config.window_size);
            println!("| precision | {} |", config.precision);
            println!("| encoding_offset | {} |", config.encoding_offset);
            println!("| sink_id | {} |", config.sink_id);
            println!("| restimate_rule | {} |", config.restimate_rule);
            println!("| window_origin | {} |", config.window_origin);
            println!("| tokenization | {} |", config.tokenization);
            println!();
            println!("## Alphabet");
            for bounds in &config.alphabet {
                println!(
                    "- `{}`: ({}, {}]",
                    bounds.symbol,
                    bounds.low_bound(),
                    bounds.high_bound()
                );
            }
        }
    }
    Ok(())
}

/// Validate a configuration file.
fn run_config_validate(global: &GlobalOpts, run_id: &str, path: Option<&Path>) -> Result<(), Error> {
    let loaded = match path {
        Some(path) => load_config(Some(path), None)?,
        None => load_config(global.config.as_deref(), global.preset)?,
    };
    let snapshot = ConfigSnapshot::new(&loaded, &loaded.config);

    match global.format {
        OutputFormat::Json => print_json(&merge(
            report_header(run_id, "config validate"),
            serde_json::json!({
                "status": "valid",
                "source": snapshot.source,
                "path": snapshot.path,
                "hash": snapshot.content_hash,
            }),
        )),
        OutputFormat::Summary => println!("[{}] config validate: OK ({})", run_id, snapshot.source),
        OutputFormat::Md => {
            println!("# Configuration Validation");
            println!();
            println!("Status: ✓ Valid");
            match &snapshot.path {
                Some(path) => println!("File: {}", path),
                None => println!("Source: {}", snapshot.source),
            }
        }
    }
    Ok(())
}

fn run_config_presets(global: &GlobalOpts, run_id: &str) {
    let presets = list_presets();
    match global.format {
        OutputFormat::Json => print_json(&merge(
            report_header(run_id, "config presets"),
            serde_json::json!({ "presets": presets }),
        )),
        OutputFormat::Summary => {
            let names: Vec<&str> = presets.iter().map(|p| p.name.as_str()).collect();
            println!("[{}] presets: {}", run_id, names.join(", "));
        }
        OutputFormat::Md => {
            println!("# Presets");
            println!();
            println!("| Name | Window | Precision | Symbols | Description |");
            println!("|---|---|---|---|---|");
            for p in &presets {
                println!(
                    "| {} | {} | {} | {} | {} |",
                    p.name, p.window_size, p.precision, p.alphabet_size, p.description
                );
            }
        }
    }
}

fn print_version(global: &GlobalOpts) {
    let version_info = serde_json::json!({
        "schema_version": SCHEMA_VERSION,
        "gta_version": env!("CARGO_PKG_VERSION"),
        "rust_version": env!("CARGO_PKG_RUST_VERSION"),
    });

    match global.format {
        OutputFormat::Json => print_json(&version_info),
        _ => {
            println!("gta {}", env!("CARGO_PKG_VERSION"));
            println!("schema version: {}", SCHEMA_VERSION);
        }
    }
}
