//! Fuzz target for learner output parsing.
//!
//! Both learner formats and both tokenizations must reject malformed input
//! with an error, never a panic, and anything accepted must be a partition.

#![no_main]

use gta_common::{LearnerFormat, Tokenization};
use gta_config::ExperimentConfig;
use gta_core::codec::{LearnerParser, ModelReader};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let config = ExperimentConfig::default();
    for format in [LearnerFormat::Symbol, LearnerFormat::Time] {
        for tokenization in [Tokenization::Lenient, Tokenization::Legacy] {
            let parser = LearnerParser::new(format, &config).with_tokenization(tokenization);
            if let Ok((model, _)) = parser.parse(data) {
                for state in model.states() {
                    assert!(state.transitions.is_empty() || state.is_partition());
                }
            }
        }
    }
});
