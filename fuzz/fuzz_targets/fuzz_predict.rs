//! Fuzz target for streaming prediction.
//!
//! Builds a model from arbitrary learner-shaped transitions and checks that
//! prediction output length only depends on the input length and window.

#![no_main]

use std::num::NonZeroUsize;

use arbitrary::Arbitrary;
use gta_common::WindowOrigin;
use gta_core::automaton::{Predictor, RawModel, RawTransition};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    transitions: Vec<(u8, u8, f64, f64)>,
    values: Vec<f64>,
    window: u8,
    carry: bool,
}

fuzz_target!(|input: Input| {
    let mut raw = RawModel::new();
    for (source, dest, low, high) in input.transitions {
        raw.declare_state(u32::from(source));
        raw.add_transition(
            u32::from(source),
            RawTransition {
                dest: u32::from(dest),
                low,
                high,
            },
        );
    }
    let (model, _) = raw.normalize();

    let Some(window) = NonZeroUsize::new(usize::from(input.window % 16)) else {
        return;
    };
    let origin = if input.carry {
        WindowOrigin::Carry
    } else {
        WindowOrigin::Restart
    };
    let predictions = Predictor::new(&model, window, origin).predict(&input.values);
    let expected = if input.values.len() < window.get() {
        0
    } else {
        input.values.len()
    };
    assert_eq!(predictions.len(), expected);
});
