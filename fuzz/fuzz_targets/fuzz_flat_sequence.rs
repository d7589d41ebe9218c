//! Fuzz target for flat sequence files.

#![no_main]

use gta_core::flat::{parse_flat, render_flat};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(values) = parse_flat(data) {
        assert!(values.iter().all(|v| v.is_finite()));
        let reparsed = parse_flat(&render_flat(&values)).expect("rendered sequence parses");
        assert_eq!(reparsed, values);
    }
});
