#![no_main]

use cxshade_core::Expr;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Any input either parses or reports an error inside the input.
    if let Err(err) = Expr::parse(data) {
        assert!(err.position() <= data.len());
    }
});
