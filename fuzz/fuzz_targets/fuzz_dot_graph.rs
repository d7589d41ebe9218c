//! Fuzz target for graph file parsing.
//!
//! Any graph that parses must serialize and parse back to an equal model.

#![no_main]

use gta_core::codec::{DotCodec, ModelReader};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let codec = DotCodec::default();
    let Ok((model, _)) = codec.parse(data) else {
        return;
    };
    let text = codec.serialize(&model);
    let (again, _) = codec.parse(&text).expect("serialized graph parses");
    assert_eq!(again, model);
});
