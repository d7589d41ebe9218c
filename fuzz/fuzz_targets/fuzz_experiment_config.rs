//! Fuzz target for experiment.json parsing and validation.

#![no_main]

use gta_config::{validate_experiment, ExperimentConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Should never panic, only return an error
    if let Ok(config) = serde_json::from_slice::<ExperimentConfig>(data) {
        let _ = validate_experiment(&config);
    }
});
